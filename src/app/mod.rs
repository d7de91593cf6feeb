mod orchestrator;
mod runtime;
mod startup;
mod types;


pub use orchestrator::DogvisionApp;
pub use startup::Components;
pub use types::ShutdownReason;

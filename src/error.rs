use thiserror::Error;

#[derive(Error, Debug)]
pub enum DogvisionError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("System error: {message}")]
    System { message: String },

    #[error("Component error in {component}: {message}")]
    Component { component: String, message: String },
}

impl DogvisionError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }

    pub fn component<C: Into<String>, M: Into<String>>(component: C, message: M) -> Self {
        Self::Component {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to open camera device {index}: {details}")]
    DeviceOpen { index: u32, details: String },

    #[error("Frame read failed: {details}")]
    Read { details: String },

    #[error("Capture pipeline error: {details}")]
    Pipeline { details: String },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to create display surface: {details}")]
    Surface { details: String },

    #[error("Failed to present frame: {details}")]
    Present { details: String },

    #[error("Format conversion failed: {details}")]
    FormatConversion { details: String },

    #[error("Failed to load font '{path}': {details}")]
    Font { path: String, details: String },
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input device error on {device}: {details}")]
    Device { device: String, details: String },

    #[error("Terminal input error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, DogvisionError>;

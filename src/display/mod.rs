mod builder;
mod canvas;
mod converter;
mod headless;
mod overlay;
mod stats;
mod surface;
#[cfg(test)]
mod tests;

#[cfg(all(target_os = "linux", feature = "display"))]
mod framebuffer;

pub use builder::{open_display_surface, surface_size};
pub use canvas::{Canvas, BLACK, WHITE};
pub use converter::DisplayConverter;
pub use headless::HeadlessSurface;
pub use overlay::{load_font, OverlayRenderer, StatusStyle};
pub use stats::RenderStats;
pub use surface::DisplaySurface;

#[cfg(all(target_os = "linux", feature = "display"))]
pub use framebuffer::FramebufferSurface;

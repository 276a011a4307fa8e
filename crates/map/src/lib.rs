pub mod config;
pub mod renderer;
pub mod selection;
pub mod surface;

pub use config::*;
pub use renderer::*;
pub use selection::*;
pub use surface::*;

pub mod request;
pub mod viewer;

pub use request::*;
pub use viewer::*;

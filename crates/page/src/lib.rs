//! Page controllers. They own the page state and drive a [`Host`] (the DOM in
//! the browser, a recording double in tests).

pub mod config;
pub mod host;
pub mod map_page;
pub mod media_kit_page;

pub use config::*;
pub use host::*;
pub use map_page::*;
pub use media_kit_page::*;

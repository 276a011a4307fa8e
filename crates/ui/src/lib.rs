//! DOM-free views: the page templates (as `maud` markup), the delegated
//! click actions and the toast stack. Everything here is a pure function of
//! state.

pub mod action;
pub mod templates;
pub mod toasts;

pub use action::*;
pub use maud::Markup;
pub use toasts::*;

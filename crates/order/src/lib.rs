//! Booking inquiry as a `mailto:` hand-off to the visitor's mail client.
//!
//! There is no server: the page cannot know whether the e-mail was sent.

pub mod email;
pub mod form;

pub use email::*;
pub use form::*;

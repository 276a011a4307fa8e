pub mod locale;
pub mod slugs;
pub mod strings;

pub use locale::*;
pub use slugs::*;
pub use strings::*;

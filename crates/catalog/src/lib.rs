//! Static dataset of advertising locations, one mirror per locale.

pub mod dataset;
pub mod location;
pub mod mirror;

pub use dataset::*;
pub use location::*;
pub use mirror::*;

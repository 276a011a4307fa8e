pub mod timers;

pub use timers::*;

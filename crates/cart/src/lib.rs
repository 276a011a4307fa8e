pub mod item;
pub mod storage;
pub mod store;

pub use item::*;
pub use storage::*;
pub use store::*;

pub mod memory;
pub mod postgres;
pub mod stores;

pub use memory::*;
pub use stores::*;

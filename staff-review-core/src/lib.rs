pub mod domain;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod store;

pub use domain::*;
pub use error::*;
pub use filter::*;
pub use pagination::*;
pub use store::*;

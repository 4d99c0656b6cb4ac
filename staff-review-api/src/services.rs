pub mod employee;
pub mod review;

pub use employee::*;
pub use review::*;

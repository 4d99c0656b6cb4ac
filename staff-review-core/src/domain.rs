pub mod ids;
pub mod employee;
pub mod review;
pub mod report;

pub use ids::*;
pub use employee::*;
pub use review::*;
pub use report::*;

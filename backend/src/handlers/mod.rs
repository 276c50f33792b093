pub mod clock;
pub mod common;
pub mod config;
pub mod employees;
pub mod reports;

pub use clock::*;
pub use config::*;
pub use employees::*;
pub use reports::*;

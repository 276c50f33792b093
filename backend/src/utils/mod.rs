pub mod csv;
pub mod time;

pub use time::*;

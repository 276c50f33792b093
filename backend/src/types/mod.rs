pub mod id;

pub use id::{EmployeeId, EventId, InvalidPin};

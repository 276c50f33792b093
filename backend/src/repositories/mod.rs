pub mod clock_event;
pub mod employee;
pub mod memory;

pub use clock_event::{ClockEventRepository, PgClockEventRepository};
pub use employee::{EmployeeRepository, PgEmployeeRepository};
pub use memory::MemoryStore;

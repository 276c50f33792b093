pub mod aggregator;
pub mod directory;
pub mod ledger;
pub mod locks;
pub mod reports;

pub use directory::EmployeeDirectory;
pub use ledger::ClockLedger;
pub use locks::EmployeeLocks;
pub use reports::StatsReporter;

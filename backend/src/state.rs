use std::sync::Arc;

use crate::{
    config::Config,
    db::connection::DbPool,
    repositories::{
        ClockEventRepository, EmployeeRepository, MemoryStore, PgClockEventRepository,
        PgEmployeeRepository,
    },
    services::{ClockLedger, EmployeeDirectory, EmployeeLocks, StatsReporter},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: EmployeeDirectory,
    pub ledger: ClockLedger,
    pub reports: StatsReporter,
}

impl AppState {
    /// Wires the services over the given storage backend. Directory and
    /// ledger share one lock registry so deletes serialize with clock writes.
    pub fn new(
        config: Config,
        employees: Arc<dyn EmployeeRepository>,
        events: Arc<dyn ClockEventRepository>,
    ) -> Self {
        let locks = Arc::new(EmployeeLocks::new());
        let directory = EmployeeDirectory::new(employees.clone(), events.clone(), locks.clone());
        let ledger = ClockLedger::new(employees, events, locks, config.time_zone);
        let reports = StatsReporter::new(directory.clone(), ledger.clone());
        Self {
            config,
            directory,
            ledger,
            reports,
        }
    }

    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(config, store.clone(), store)
    }

    pub fn postgres(config: Config, pool: DbPool) -> Self {
        Self::new(
            config,
            Arc::new(PgEmployeeRepository::new(pool.clone())),
            Arc::new(PgClockEventRepository::new(pool)),
        )
    }
}

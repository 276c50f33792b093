//! Per-employee mutual exclusion for ledger writes.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::types::EmployeeId;

/// Serializes check-and-append sequences for the same employee while letting
/// different employees proceed in parallel.
#[derive(Debug, Default)]
pub struct EmployeeLocks {
    inner: Mutex<HashMap<EmployeeId, Arc<AsyncMutex<()>>>>,
}

impl EmployeeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, employee_id: &EmployeeId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.entry(employee_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }
}

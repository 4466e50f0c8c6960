use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::receipts::{PointsRepository, ReceiptId, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime points store. Nothing is evicted or persisted.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPointsRepository {
    points: Arc<Mutex<HashMap<ReceiptId, i64>>>,
}

impl PointsRepository for InMemoryPointsRepository {
    fn insert(&self, id: ReceiptId, points: i64) -> Result<(), RepositoryError> {
        let mut guard = self.points.lock().expect("repository mutex poisoned");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, points);
        Ok(())
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<i64>, RepositoryError> {
        let guard = self.points.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).copied())
    }
}

#[cfg(test)]
impl InMemoryPointsRepository {
    pub(crate) fn len(&self) -> usize {
        self.points.lock().expect("repository mutex poisoned").len()
    }
}

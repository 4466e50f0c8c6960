use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Item, Receipt, ReceiptId};
use crate::receipts::repository::{PointsRepository, RepositoryError};
use crate::receipts::{receipt_router, ReceiptService};

pub(super) fn target_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "11:11".to_string(),
        items: vec![Item::new("Pepsi - 12-oz", "1.25")],
        total: "1.25".to_string(),
    }
}

pub(super) fn candy_receipt() -> Receipt {
    Receipt {
        retailer: "T's Candy".to_string(),
        purchase_date: "2022-01-09".to_string(),
        purchase_time: "16:00".to_string(),
        items: vec![
            Item::new("Mambas", "2.00"),
            Item::new("Skittles", "1.75"),
            Item::new("Albanese Gummy Bears", "3.25"),
        ],
        total: "7.00".to_string(),
    }
}

pub(super) fn walgreens_receipt() -> Receipt {
    Receipt {
        retailer: "Walgreens".to_string(),
        purchase_date: "2022-01-21".to_string(),
        purchase_time: "08:13".to_string(),
        items: vec![
            Item::new("Pepsi - 12-oz", "1.25"),
            Item::new("Dasani", "1.40"),
        ],
        total: "2.65".to_string(),
    }
}

pub(super) fn record_store_receipt() -> Receipt {
    Receipt {
        retailer: "Record Store".to_string(),
        purchase_date: "2022-01-22".to_string(),
        purchase_time: "15:42".to_string(),
        items: vec![
            Item::new("Blonde - Frank Ocean", "24.99"),
            Item::new("Volcano - Jungle", "17.99"),
            Item::new("Derealised - Jadu Heart", "18.50"),
            Item::new("Rare Pleasure - Mndsgn", "22.99"),
            Item::new("Maps - billy woods", "19.99"),
        ],
        total: "104.46".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    points: Arc<Mutex<HashMap<ReceiptId, i64>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.points.lock().expect("repository mutex poisoned").len()
    }
}

impl PointsRepository for MemoryRepository {
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

pub(super) struct UnavailableRepository;

impl PointsRepository for UnavailableRepository {
    fn insert(&self, _id: ReceiptId, _points: i64) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<i64>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service() -> (ReceiptService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = ReceiptService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(service: ReceiptService<MemoryRepository>) -> axum::Router {
    receipt_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

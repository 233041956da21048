// In-memory port fakes for scheduler tests
//
// The transaction buffers its writes and applies them on commit, so a
// failed or rolled-back transaction leaves nothing behind.

use crate::domain::{
    CatalogItem, ServiceEvent, ServiceEventPatch, TrackedItem, TrackedItemPatch, TrackedItemView,
    Vehicle,
};
use crate::error::{AppError, Result};
use crate::port::{
    CatalogStore, ServiceHistoryStore, ServiceRecordingTransaction, TrackedItemStore,
    Transaction, TransactionalServiceHistory, VehicleLookup,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    vehicles: Vec<Vehicle>,
    catalog: Vec<CatalogItem>,
    tracked: Vec<TrackedItem>,
    events: Vec<ServiceEvent>,
}

impl State {
    fn view(&self, item: &TrackedItem) -> Option<TrackedItemView> {
        let catalog_item = self
            .catalog
            .iter()
            .find(|c| c.id == item.catalog_item_id)?
            .clone();
        Some(TrackedItemView {
            item: item.clone(),
            catalog_item,
        })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    fail_checkpoint: Arc<AtomicBool>,
    untrack_before_update: Arc<AtomicBool>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vehicle(&self, vehicle: Vehicle) {
        self.state.lock().unwrap().vehicles.push(vehicle);
    }

    pub fn add_catalog(&self, id: &str, name: &str, default_interval: i64) -> CatalogItem {
        let item = CatalogItem::new(id, name, default_interval);
        self.state.lock().unwrap().catalog.push(item.clone());
        item
    }

    pub fn add_tracked(&self, item: TrackedItem) {
        self.state.lock().unwrap().tracked.push(item);
    }

    pub fn tracked(&self, id: &str) -> Option<TrackedItem> {
        let state = self.state.lock().unwrap();
        state.tracked.iter().find(|t| t.id == id).cloned()
    }

    pub fn events(&self) -> Vec<ServiceEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Make the next checkpoint write fail after the event was appended
    pub fn fail_next_checkpoint(&self) {
        self.fail_checkpoint.store(true, Ordering::SeqCst);
    }

    /// Delete the target of the next tracked item update just before it runs
    pub fn untrack_before_next_update(&self) {
        self.untrack_before_update.store(true, Ordering::SeqCst);
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VehicleLookup for InMemoryStore {
    async fn get(&self, vehicle_id: &str) -> Result<Option<Vehicle>> {
        let state = self.state.lock().unwrap();
        Ok(state.vehicles.iter().find(|v| v.id == vehicle_id).cloned())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<CatalogItem>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .catalog
            .iter()
            .skip(to_usize(skip))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<CatalogItem>> {
        let state = self.state.lock().unwrap();
        Ok(state.catalog.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl TrackedItemStore for InMemoryStore {
    async fn list_by_vehicle(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TrackedItemView>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tracked
            .iter()
            .filter(|t| t.owner_id == owner_id && t.vehicle_id == vehicle_id)
            .filter_map(|t| state.view(t))
            .skip(to_usize(skip))
            .take(to_usize(limit))
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<TrackedItemView>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tracked
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| state.view(t)))
    }

    async fn create(&self, item: &TrackedItem) -> Result<()> {
        self.state.lock().unwrap().tracked.push(item.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        patch: &TrackedItemPatch,
        updated_at: i64,
    ) -> Result<Option<TrackedItem>> {
        let mut state = self.state.lock().unwrap();
        if self.untrack_before_update.swap(false, Ordering::SeqCst) {
            state.tracked.retain(|t| t.id != id);
        }
        let Some(item) = state.tracked.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        item.merge(patch, updated_at)?;
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.tracked.len();
        state.tracked.retain(|t| t.id != id);
        let deleted = state.tracked.len() != before;
        if deleted {
            state.events.retain(|e| e.tracked_item_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl ServiceHistoryStore for InMemoryStore {
    async fn list_by_tracked_item(&self, tracked_item_id: &str) -> Result<Vec<ServiceEvent>> {
        let state = self.state.lock().unwrap();
        let mut events: Vec<ServiceEvent> = state
            .events
            .iter()
            .filter(|e| e.tracked_item_id == tracked_item_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.service_date.cmp(&a.service_date));
        Ok(events)
    }

    async fn get(&self, id: &str) -> Result<Option<ServiceEvent>> {
        let state = self.state.lock().unwrap();
        Ok(state.events.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, event: &ServiceEvent) -> Result<()> {
        self.state.lock().unwrap().events.push(event.clone());
        Ok(())
    }

    async fn update(&self, id: &str, patch: &ServiceEventPatch) -> Result<Option<ServiceEvent>> {
        let mut state = self.state.lock().unwrap();
        let Some(event) = state.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        event.merge(patch)?;
        Ok(Some(event.clone()))
    }
}

#[async_trait]
impl TransactionalServiceHistory for InMemoryStore {
    async fn begin_service_transaction(&self) -> Result<Box<dyn ServiceRecordingTransaction>> {
        Ok(Box::new(InMemoryTransaction {
            store: self.clone(),
            events: Vec::new(),
            checkpoint: None,
        }))
    }
}

struct PendingCheckpoint {
    tracked_item_id: String,
    odometer: i64,
    date: NaiveDate,
    updated_at: i64,
}

struct InMemoryTransaction {
    store: InMemoryStore,
    events: Vec<ServiceEvent>,
    checkpoint: Option<PendingCheckpoint>,
}

#[async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTransaction {
            store,
            events,
            checkpoint,
        } = *self;

        {
            let mut state = store.state.lock().unwrap();
            state.events.extend(events);
            if let Some(cp) = checkpoint {
                if let Some(item) = state.tracked.iter_mut().find(|t| t.id == cp.tracked_item_id) {
                    item.apply_checkpoint(cp.odometer, cp.date, cp.updated_at);
                }
            }
        }
        store.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.store.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ServiceRecordingTransaction for InMemoryTransaction {
    async fn append_event(&mut self, event: &ServiceEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }

    async fn apply_checkpoint(
        &mut self,
        tracked_item_id: &str,
        odometer: i64,
        date: NaiveDate,
        updated_at: i64,
    ) -> Result<()> {
        if self.store.fail_checkpoint.swap(false, Ordering::SeqCst) {
            return Err(AppError::Database("injected checkpoint failure".to_string()));
        }
        let exists = {
            let state = self.store.state.lock().unwrap();
            state.tracked.iter().any(|t| t.id == tracked_item_id)
        };
        if !exists {
            return Err(AppError::NotFound(format!(
                "tracked item {} not found",
                tracked_item_id
            )));
        }
        self.checkpoint = Some(PendingCheckpoint {
            tracked_item_id: tracked_item_id.to_string(),
            odometer,
            date,
            updated_at,
        });
        Ok(())
    }
}

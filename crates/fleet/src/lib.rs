//! Drone fleet queries for DroneOps.
//!
//! The drone-side counterpart of the roster crate: read/filter operations,
//! status updates, and the maintenance-due view.

#![warn(missing_docs)]

use std::sync::Arc;

use chrono::Days;
use droneops_core::{Date, Drone, DroneFilter, DroneId, DroneStatus};
use droneops_storage::{Collection, FieldUpdate, Result, Store};
use tokio::sync::Mutex;
use tracing::debug;

/// Drone fleet query service.
pub struct Fleet<S: Store> {
    store: Arc<Mutex<S>>,
}

impl<S: Store> Fleet<S> {
    /// Create a fleet view over a shared store.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }

    /// List drones matching the filter, in store order.
    ///
    /// Filtering is conjunctive; an empty result is valid.
    pub async fn find(&self, filter: &DroneFilter) -> Result<Vec<Drone>> {
        let drones = self.store.lock().await.list_drones().await?;
        let matched: Vec<Drone> = drones.into_iter().filter(|d| filter.matches(d)).collect();
        debug!(count = matched.len(), "fleet query");
        Ok(matched)
    }

    /// List available drones, optionally narrowed by capability and location.
    pub async fn available(
        &self,
        capability: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Drone>> {
        self.find(&DroneFilter {
            status: Some(DroneStatus::Available),
            capability: capability.map(str::to_string),
            location: location.map(str::to_string),
        })
        .await
    }

    /// Look up a drone by id.
    pub async fn drone(&self, id: &DroneId) -> Result<Option<Drone>> {
        let drones = self.store.lock().await.list_drones().await?;
        Ok(drones.into_iter().find(|d| &d.drone_id == id))
    }

    /// Update a drone's status.
    pub async fn update_status(&self, id: &DroneId, status: DroneStatus) -> Result<()> {
        self.store
            .lock()
            .await
            .update_field(FieldUpdate::new(
                Collection::Drones,
                id.as_str(),
                "status",
                status.as_str(),
            ))
            .await
    }

    /// Drones whose maintenance falls due within `within_days` of `as_of`.
    ///
    /// Drones with no due date on record are excluded. The caller supplies
    /// the clock via `as_of`.
    pub async fn maintenance_due(&self, as_of: Date, within_days: u64) -> Result<Vec<Drone>> {
        let horizon = as_of
            .checked_add_days(Days::new(within_days))
            .unwrap_or(Date::MAX);
        let drones = self.store.lock().await.list_drones().await?;
        Ok(drones
            .into_iter()
            .filter(|d| d.maintenance_due.is_some_and(|due| due <= horizon))
            .collect())
    }
}

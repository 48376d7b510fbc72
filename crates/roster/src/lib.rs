//! Pilot roster queries for DroneOps.
//!
//! Read/filter operations over the pilot table plus the status update the
//! coordination workflows use. The store is injected by the caller and
//! shared behind a lock; nothing here owns a connection.

#![warn(missing_docs)]

use std::sync::Arc;

use droneops_core::{Pilot, PilotFilter, PilotId, PilotStatus};
use droneops_storage::{Collection, FieldUpdate, Result, Store};
use tokio::sync::Mutex;
use tracing::debug;

/// Pilot roster query service.
pub struct Roster<S: Store> {
    store: Arc<Mutex<S>>,
}

impl<S: Store> Roster<S> {
    /// Create a roster over a shared store.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }

    /// List pilots matching the filter, in store order.
    ///
    /// Filtering is conjunctive; an empty result is valid.
    pub async fn find(&self, filter: &PilotFilter) -> Result<Vec<Pilot>> {
        let pilots = self.store.lock().await.list_pilots().await?;
        let matched: Vec<Pilot> = pilots.into_iter().filter(|p| filter.matches(p)).collect();
        debug!(count = matched.len(), "roster query");
        Ok(matched)
    }

    /// List available pilots, optionally narrowed by skill and location.
    pub async fn available(
        &self,
        skill: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Pilot>> {
        self.find(&PilotFilter {
            status: Some(PilotStatus::Available),
            skill: skill.map(str::to_string),
            location: location.map(str::to_string),
        })
        .await
    }

    /// Look up a pilot by id.
    pub async fn pilot(&self, id: &PilotId) -> Result<Option<Pilot>> {
        let pilots = self.store.lock().await.list_pilots().await?;
        Ok(pilots.into_iter().find(|p| &p.pilot_id == id))
    }

    /// Update a pilot's status.
    pub async fn update_status(&self, id: &PilotId, status: PilotStatus) -> Result<()> {
        self.store
            .lock()
            .await
            .update_field(FieldUpdate::new(
                Collection::Pilots,
                id.as_str(),
                "status",
                status.as_str(),
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droneops_core::text;
    use droneops_storage::MemStore;

    fn pilot(id: &str, skills: &str, location: &str, status: PilotStatus) -> Pilot {
        Pilot {
            pilot_id: PilotId::new(id),
            name: format!("Pilot {id}"),
            skills: text::split_tags(skills),
            certifications: Vec::new(),
            experience_level: None,
            location: location.to_string(),
            status,
            current_assignment: None,
            availability_start: None,
            availability_end: None,
            contact_info: None,
        }
    }

    fn five_pilot_roster() -> Arc<Mutex<MemStore>> {
        let pilots = vec![
            pilot("P001", "Mapping, LiDAR", "Bangalore", PilotStatus::Available),
            pilot("P002", "Thermal", "Bangalore", PilotStatus::Available),
            pilot("P003", "Mapping", "Mumbai", PilotStatus::Available),
            pilot("P004", "Mapping", "Bangalore", PilotStatus::Assigned),
            pilot("P005", "Mapping, Thermal", "Bangalore", PilotStatus::Available),
        ];
        Arc::new(Mutex::new(MemStore::with_records(
            pilots,
            Vec::new(),
            Vec::new(),
        )))
    }

    #[tokio::test]
    async fn conjunctive_filter_returns_matches_in_store_order() {
        let roster = Roster::new(five_pilot_roster());

        let matched = roster
            .available(Some("Mapping"), Some("Bangalore"))
            .await
            .unwrap();

        let ids: Vec<&str> = matched.iter().map(|p| p.pilot_id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "P005"]);
    }

    #[tokio::test]
    async fn empty_result_is_valid() {
        let roster = Roster::new(five_pilot_roster());
        let matched = roster
            .available(Some("Multispectral"), None)
            .await
            .unwrap();
        assert!(matched.is_empty());
    }

    #[tokio::test]
    async fn lookup_and_status_update() {
        let roster = Roster::new(five_pilot_roster());
        let id = PilotId::new("P003");

        roster
            .update_status(&id, PilotStatus::OnLeave)
            .await
            .unwrap();

        let p = roster.pilot(&id).await.unwrap().unwrap();
        assert_eq!(p.status, PilotStatus::OnLeave);
        assert!(roster.pilot(&PilotId::new("P999")).await.unwrap().is_none());
    }
}

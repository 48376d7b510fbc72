//! Conflict detection service.

use std::sync::Arc;

use droneops_core::DroneStatus;
use droneops_storage::{Result, Store};
use tokio::sync::Mutex;
use tracing::debug;

use crate::checks;
use crate::report::{Conflict, Suggestion};

/// Conflict detection over a shared store.
///
/// Reads a full snapshot per scan and never mutates state.
pub struct ConflictDetector<S: Store> {
    store: Arc<Mutex<S>>,
}

impl<S: Store> ConflictDetector<S> {
    /// Create a detector over a shared store.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }

    /// Run every check against the current snapshot.
    ///
    /// Report order is deterministic: double-bookings (by pilot id), then
    /// skill mismatches (by mission store order), then maintenance
    /// assignments (by drone store order).
    pub async fn detect(&self) -> Result<Vec<Conflict>> {
        let (pilots, drones, missions) = {
            let store = self.store.lock().await;
            (
                store.list_pilots().await?,
                store.list_drones().await?,
                store.list_missions().await?,
            )
        };

        let mut conflicts = checks::double_bookings(&missions);
        conflicts.extend(checks::skill_mismatches(&pilots, &missions));
        conflicts.extend(checks::maintenance_assignments(&drones));
        debug!(count = conflicts.len(), "conflict scan complete");
        Ok(conflicts)
    }

    /// Suggest a resolution for a conflict, when one exists.
    ///
    /// Only maintenance conflicts have an automatic suggestion (the first
    /// available drone); the scheduling conflicts need a human call.
    pub async fn suggest_reassignment(&self, conflict: &Conflict) -> Result<Option<Suggestion>> {
        match conflict {
            Conflict::MaintenanceAssignment { drone, .. } => {
                let drones = self.store.lock().await.list_drones().await?;
                Ok(drones
                    .iter()
                    .find(|d| d.status == DroneStatus::Available)
                    .map(|d| Suggestion::ReplaceDrone {
                        grounded: drone.clone(),
                        replacement: d.drone_id.clone(),
                    }))
            }
            Conflict::DoubleBooking { .. } | Conflict::SkillMismatch { .. } => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droneops_core::{
        text, Drone, DroneId, Mission, MissionId, MissionStatus, Pilot, PilotId, PilotStatus,
        Priority,
    };
    use droneops_storage::MemStore;

    fn pilot(id: &str, skills: &str) -> Pilot {
        Pilot {
            pilot_id: PilotId::new(id),
            name: format!("Pilot {id}"),
            skills: text::split_tags(skills),
            certifications: Vec::new(),
            experience_level: None,
            location: "Pune".to_string(),
            status: PilotStatus::Assigned,
            current_assignment: None,
            availability_start: None,
            availability_end: None,
            contact_info: None,
        }
    }

    fn drone(id: &str, status: DroneStatus, assignment: Option<&str>) -> Drone {
        Drone {
            drone_id: DroneId::new(id),
            model: "QuadX".to_string(),
            capabilities: Vec::new(),
            max_range_km: 20,
            payload_kg: 2.5,
            location: "Pune".to_string(),
            status,
            current_assignment: assignment.map(MissionId::new),
            maintenance_due: None,
            last_maintenance: None,
            flight_hours: 0,
            battery_health_pct: 100,
        }
    }

    fn mission(id: &str, pilot: &str, start: &str, end: &str, skills: &str) -> Mission {
        Mission {
            mission_id: MissionId::new(id),
            client_name: "AgriScan Ltd".to_string(),
            location: "Pune".to_string(),
            required_skills: text::split_tags(skills),
            required_certifications: Vec::new(),
            start_date: text::parse_date(start),
            end_date: text::parse_date(end),
            priority: Priority::Medium,
            status: MissionStatus::Active,
            assigned_pilot: Some(PilotId::new(pilot)),
            assigned_drone: None,
            description: String::new(),
            special_requirements: None,
        }
    }

    fn detector() -> ConflictDetector<MemStore> {
        let store = MemStore::with_records(
            vec![pilot("P001", "Mapping")],
            vec![
                drone("D001", DroneStatus::Maintenance, Some("M001")),
                drone("D002", DroneStatus::Available, None),
            ],
            vec![
                mission("M001", "P001", "2024-01-01", "2024-01-05", "Mapping, LiDAR"),
                mission("M002", "P001", "2024-01-05", "2024-01-10", "Mapping"),
            ],
        );
        ConflictDetector::new(Arc::new(Mutex::new(store)))
    }

    #[tokio::test]
    async fn all_checks_feed_one_report() {
        let detector = detector();
        let conflicts = detector.detect().await.unwrap();

        let kinds: Vec<&str> = conflicts.iter().map(Conflict::kind).collect();
        assert_eq!(
            kinds,
            vec!["double_booking", "skill_mismatch", "maintenance_assignment"]
        );
    }

    #[tokio::test]
    async fn detection_is_idempotent_on_an_unchanged_snapshot() {
        let detector = detector();
        let first = detector.detect().await.unwrap();
        let second = detector.detect().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn maintenance_conflict_suggests_an_available_drone() {
        let detector = detector();
        let conflicts = detector.detect().await.unwrap();
        let maintenance = conflicts
            .iter()
            .find(|c| c.kind() == "maintenance_assignment")
            .unwrap();

        let suggestion = detector
            .suggest_reassignment(maintenance)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            suggestion,
            Suggestion::ReplaceDrone {
                grounded: DroneId::new("D001"),
                replacement: DroneId::new("D002"),
            }
        );

        // Scheduling conflicts have no automatic fix.
        let booking = conflicts
            .iter()
            .find(|c| c.kind() == "double_booking")
            .unwrap();
        assert!(detector
            .suggest_reassignment(booking)
            .await
            .unwrap()
            .is_none());
    }
}

//! First-fit resource matching.

use std::sync::Arc;

use droneops_core::{Drone, DroneStatus, Pilot, PilotStatus};
use droneops_storage::{Result, Store};
use tokio::sync::Mutex;

/// What a mission needs from a pilot.
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    /// Skill tags the pilot must hold, all of them
    pub skills: Vec<String>,
    /// Location the pilot must be based at, when it matters
    pub location: Option<String>,
}

/// What a mission needs from a drone.
#[derive(Debug, Clone, Default)]
pub struct DroneRequirements {
    /// Capability tag the drone must carry, when it matters
    pub capability: Option<String>,
    /// Location the drone must be based at, when it matters
    pub location: Option<String>,
}

/// First available pilot, in store order, whose skills cover the
/// requirements and whose location matches when one is given.
///
/// First-fit: ties among equally qualified pilots are broken purely by
/// iteration order. No scoring, no load balancing.
pub fn first_fit_pilot<'a>(pilots: &'a [Pilot], req: &Requirements) -> Option<&'a Pilot> {
    pilots.iter().find(|p| {
        p.status == PilotStatus::Available
            && p.has_all_skills(&req.skills)
            && req.location.as_ref().is_none_or(|loc| &p.location == loc)
    })
}

/// First available drone, in store order, matching the requirements.
pub fn first_fit_drone<'a>(drones: &'a [Drone], req: &DroneRequirements) -> Option<&'a Drone> {
    drones.iter().find(|d| {
        d.status == DroneStatus::Available
            && req.capability.as_deref().is_none_or(|cap| d.has_capability(cap))
            && req.location.as_ref().is_none_or(|loc| &d.location == loc)
    })
}

/// Matching service over a shared store.
pub struct Matcher<S: Store> {
    store: Arc<Mutex<S>>,
}

impl<S: Store> Matcher<S> {
    /// Create a matcher over a shared store.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }

    /// Pick one eligible pilot for the requirements, or none.
    pub async fn match_pilot(&self, req: &Requirements) -> Result<Option<Pilot>> {
        let pilots = self.store.lock().await.list_pilots().await?;
        Ok(first_fit_pilot(&pilots, req).cloned())
    }

    /// Pick one eligible drone for the requirements, or none.
    pub async fn match_drone(&self, req: &DroneRequirements) -> Result<Option<Drone>> {
        let drones = self.store.lock().await.list_drones().await?;
        Ok(first_fit_drone(&drones, req).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droneops_core::{text, PilotId};

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

    #[test]
    fn returns_first_eligible_in_store_order() {
        let pilots = vec![
            pilot("P001", "Mapping", "Bangalore", PilotStatus::Assigned),
            pilot("P002", "Mapping, LiDAR", "Bangalore", PilotStatus::Available),
            pilot("P003", "Mapping, LiDAR", "Bangalore", PilotStatus::Available),
        ];
        let req = Requirements {
            skills: vec!["Mapping".to_string(), "LiDAR".to_string()],
            location: None,
        };
        // P003 is equally qualified; iteration order decides.
        assert_eq!(
            first_fit_pilot(&pilots, &req).unwrap().pilot_id.as_str(),
            "P002"
        );
    }

    #[test]
    fn location_constraint_applies_only_when_given() {
        let pilots = vec![
            pilot("P001", "Mapping", "Mumbai", PilotStatus::Available),
            pilot("P002", "Mapping", "Bangalore", PilotStatus::Available),
        ];
        let anywhere = Requirements {
            skills: vec!["Mapping".to_string()],
            location: None,
        };
        assert_eq!(
            first_fit_pilot(&pilots, &anywhere).unwrap().pilot_id.as_str(),
            "P001"
        );

        let bangalore = Requirements {
            skills: vec!["Mapping".to_string()],
            location: Some("Bangalore".to_string()),
        };
        assert_eq!(
            first_fit_pilot(&pilots, &bangalore).unwrap().pilot_id.as_str(),
            "P002"
        );
    }

    #[test]
    fn none_when_no_pilot_qualifies() {
        let pilots = vec![
            pilot("P001", "Mapping", "Bangalore", PilotStatus::Available),
            pilot("P002", "LiDAR", "Bangalore", PilotStatus::Unavailable),
        ];
        let req = Requirements {
            skills: vec!["LiDAR".to_string()],
            location: None,
        };
        assert!(first_fit_pilot(&pilots, &req).is_none());
    }
}

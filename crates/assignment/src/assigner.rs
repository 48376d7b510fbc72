//! Assignment workflow.

use std::sync::Arc;

use droneops_core::{
    DroneId, DroneStatus, Mission, MissionId, PilotId, PilotStatus,
};
use droneops_storage::{Collection, FieldUpdate, StorageError, Store};
use tokio::sync::Mutex;
use tracing::info;

use crate::matcher::{first_fit_drone, first_fit_pilot, DroneRequirements, Requirements};

/// A committed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The mission that was staffed
    pub mission_id: MissionId,
    /// The pilot committed to it
    pub pilot_id: PilotId,
    /// The drone committed to it
    pub drone_id: DroneId,
}

/// An active pilot engagement, read from the roster side of the relation.
#[derive(Debug, Clone)]
pub struct ActiveAssignment {
    /// Pilot id
    pub pilot_id: PilotId,
    /// Pilot name
    pub pilot_name: String,
    /// Mission the pilot is on
    pub mission_id: MissionId,
}

/// Errors from the assignment workflow.
#[derive(Debug, thiserror::Error)]
pub enum AssignError {
    /// Mission id absent from the store
    #[error("mission {0} not found")]
    MissionNotFound(MissionId),

    /// Requested pilot absent from the store
    #[error("pilot {0} not found")]
    PilotNotFound(PilotId),

    /// Requested drone absent from the store
    #[error("drone {0} not found")]
    DroneNotFound(DroneId),

    /// Requested pilot exists but is not free
    #[error("pilot {pilot} is not available (status: {status})")]
    PilotUnavailable {
        /// The pilot
        pilot: PilotId,
        /// Its current status
        status: PilotStatus,
    },

    /// Requested drone exists but is not free
    #[error("drone {drone} is not available (status: {status})")]
    DroneUnavailable {
        /// The drone
        drone: DroneId,
        /// Its current status
        status: DroneStatus,
    },

    /// No available pilot covers the mission's requirements
    #[error("no available pilot matches the requirements of mission {0}")]
    NoMatchingPilot(MissionId),

    /// No available drone left in the fleet
    #[error("no available drone for mission {0}")]
    NoMatchingDrone(MissionId),

    /// Underlying store failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Assignment workflow over a shared store.
///
/// Holds the store lock across read-decide-write so two callers cannot
/// commit the same pilot or drone to different missions.
pub struct Assigner<S: Store> {
    store: Arc<Mutex<S>>,
}

impl<S: Store> Assigner<S> {
    /// Create an assigner over a shared store.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }

    /// Staff a mission with a pilot and a drone.
    ///
    /// With no overrides, the pilot is matched first-fit from the mission's
    /// required skills and location, and the drone is the first available
    /// one. Overridden resources must exist and be available.
    ///
    /// On success all six relation fields land as one batch: the mission's
    /// assigned pilot/drone and status, and each resource's status plus its
    /// back-reference to the mission. A failure leaves nothing written.
    pub async fn assign(
        &self,
        mission_id: &MissionId,
        pilot_override: Option<&PilotId>,
        drone_override: Option<&DroneId>,
    ) -> Result<Assignment, AssignError> {
        let mut store = self.store.lock().await;

        let missions = store.list_missions().await?;
        let mission = missions
            .iter()
            .find(|m| &m.mission_id == mission_id)
            .ok_or_else(|| AssignError::MissionNotFound(mission_id.clone()))?;

        let pilots = store.list_pilots().await?;
        let pilot_id = match pilot_override {
            Some(id) => {
                let pilot = pilots
                    .iter()
                    .find(|p| &p.pilot_id == id)
                    .ok_or_else(|| AssignError::PilotNotFound(id.clone()))?;
                if pilot.status != PilotStatus::Available {
                    return Err(AssignError::PilotUnavailable {
                        pilot: id.clone(),
                        status: pilot.status,
                    });
                }
                pilot.pilot_id.clone()
            }
            None => {
                let req = requirements_of(mission);
                first_fit_pilot(&pilots, &req)
                    .map(|p| p.pilot_id.clone())
                    .ok_or_else(|| AssignError::NoMatchingPilot(mission_id.clone()))?
            }
        };

        let drones = store.list_drones().await?;
        let drone_id = match drone_override {
            Some(id) => {
                let drone = drones
                    .iter()
                    .find(|d| &d.drone_id == id)
                    .ok_or_else(|| AssignError::DroneNotFound(id.clone()))?;
                if drone.status != DroneStatus::Available {
                    return Err(AssignError::DroneUnavailable {
                        drone: id.clone(),
                        status: drone.status,
                    });
                }
                drone.drone_id.clone()
            }
            None => first_fit_drone(&drones, &DroneRequirements::default())
                .map(|d| d.drone_id.clone())
                .ok_or_else(|| AssignError::NoMatchingDrone(mission_id.clone()))?,
        };

        store
            .update_fields(vec![
                FieldUpdate::new(
                    Collection::Missions,
                    mission_id.as_str(),
                    "assigned_pilot",
                    pilot_id.as_str(),
                ),
                FieldUpdate::new(
                    Collection::Missions,
                    mission_id.as_str(),
                    "assigned_drone",
                    drone_id.as_str(),
                ),
                FieldUpdate::new(Collection::Missions, mission_id.as_str(), "status", "Active"),
                FieldUpdate::new(Collection::Pilots, pilot_id.as_str(), "status", "Assigned"),
                FieldUpdate::new(
                    Collection::Pilots,
                    pilot_id.as_str(),
                    "current_assignment",
                    mission_id.as_str(),
                ),
                FieldUpdate::new(Collection::Drones, drone_id.as_str(), "status", "Deployed"),
                FieldUpdate::new(
                    Collection::Drones,
                    drone_id.as_str(),
                    "current_assignment",
                    mission_id.as_str(),
                ),
            ])
            .await?;

        info!(mission = %mission_id, pilot = %pilot_id, drone = %drone_id, "assignment committed");

        Ok(Assignment {
            mission_id: mission_id.clone(),
            pilot_id,
            drone_id,
        })
    }

    /// Pilots currently engaged on a mission, from the roster side.
    pub async fn active_assignments(&self) -> Result<Vec<ActiveAssignment>, AssignError> {
        let pilots = self.store.lock().await.list_pilots().await?;
        Ok(pilots
            .into_iter()
            .filter_map(|p| {
                let mission_id = p.current_assignment?;
                Some(ActiveAssignment {
                    pilot_id: p.pilot_id,
                    pilot_name: p.name,
                    mission_id,
                })
            })
            .collect())
    }
}

fn requirements_of(mission: &Mission) -> Requirements {
    Requirements {
        skills: mission.required_skills.clone(),
        location: Some(mission.location.clone()),
    }
}

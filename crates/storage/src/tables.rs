//! Shared in-memory table state for the storage backends.

use droneops_core::{Drone, Mission, Pilot};

use crate::fields;
use crate::trait_::{Collection, FieldUpdate, Result, StorageError};

/// The three record tables, in store order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub pilots: Vec<Pilot>,
    pub drones: Vec<Drone>,
    pub missions: Vec<Mission>,
}

impl Tables {
    /// Apply one field update in place.
    pub fn apply(&mut self, update: &FieldUpdate) -> Result<()> {
        let not_found = || StorageError::NotFound {
            collection: update.collection,
            id: update.id.clone(),
        };
        match update.collection {
            Collection::Pilots => {
                let pilot = self
                    .pilots
                    .iter_mut()
                    .find(|p| p.pilot_id.as_str() == update.id)
                    .ok_or_else(not_found)?;
                fields::apply_pilot_field(pilot, &update.field, &update.value)
            }
            Collection::Drones => {
                let drone = self
                    .drones
                    .iter_mut()
                    .find(|d| d.drone_id.as_str() == update.id)
                    .ok_or_else(not_found)?;
                fields::apply_drone_field(drone, &update.field, &update.value)
            }
            Collection::Missions => {
                let mission = self
                    .missions
                    .iter_mut()
                    .find(|m| m.mission_id.as_str() == update.id)
                    .ok_or_else(not_found)?;
                fields::apply_mission_field(mission, &update.field, &update.value)
            }
        }
    }

    /// Apply a batch all-or-nothing: rehearse on a copy, then swap in.
    pub fn apply_batch(&mut self, updates: &[FieldUpdate]) -> Result<()> {
        let mut staged = self.clone();
        for update in updates {
            staged.apply(update)?;
        }
        *self = staged;
        Ok(())
    }

    pub fn append_pilot(&mut self, pilot: &Pilot) -> Result<()> {
        if self.pilots.iter().any(|p| p.pilot_id == pilot.pilot_id) {
            return Err(StorageError::AlreadyExists {
                collection: Collection::Pilots,
                id: pilot.pilot_id.to_string(),
            });
        }
        self.pilots.push(pilot.clone());
        Ok(())
    }

    pub fn append_drone(&mut self, drone: &Drone) -> Result<()> {
        if self.drones.iter().any(|d| d.drone_id == drone.drone_id) {
            return Err(StorageError::AlreadyExists {
                collection: Collection::Drones,
                id: drone.drone_id.to_string(),
            });
        }
        self.drones.push(drone.clone());
        Ok(())
    }

    pub fn append_mission(&mut self, mission: &Mission) -> Result<()> {
        if self
            .missions
            .iter()
            .any(|m| m.mission_id == mission.mission_id)
        {
            return Err(StorageError::AlreadyExists {
                collection: Collection::Missions,
                id: mission.mission_id.to_string(),
            });
        }
        self.missions.push(mission.clone());
        Ok(())
    }
}

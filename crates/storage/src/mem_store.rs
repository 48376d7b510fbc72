//! In-memory storage backend.
//!
//! Same semantics as [`crate::JsonStore`] minus the files. Used by tests and
//! by embedders that load records from elsewhere.

use async_trait::async_trait;
use droneops_core::{Drone, Mission, Pilot};

use crate::tables::Tables;
use crate::trait_::{FieldUpdate, Result, Store};

/// In-memory record store.
#[derive(Debug, Default)]
pub struct MemStore {
    tables: Tables,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with records, preserving the given order.
    pub fn with_records(
        pilots: Vec<Pilot>,
        drones: Vec<Drone>,
        missions: Vec<Mission>,
    ) -> Self {
        Self {
            tables: Tables {
                pilots,
                drones,
                missions,
            },
        }
    }
}

#[async_trait]
impl Store for MemStore {
    async fn list_pilots(&self) -> Result<Vec<Pilot>> {
        Ok(self.tables.pilots.clone())
    }

    async fn list_drones(&self) -> Result<Vec<Drone>> {
        Ok(self.tables.drones.clone())
    }

    async fn list_missions(&self) -> Result<Vec<Mission>> {
        Ok(self.tables.missions.clone())
    }

    async fn update_field(&mut self, update: FieldUpdate) -> Result<()> {
        self.tables.apply(&update)
    }

    async fn update_fields(&mut self, updates: Vec<FieldUpdate>) -> Result<()> {
        self.tables.apply_batch(&updates)
    }

    async fn append_pilot(&mut self, pilot: &Pilot) -> Result<()> {
        self.tables.append_pilot(pilot)
    }

    async fn append_drone(&mut self, drone: &Drone) -> Result<()> {
        self.tables.append_drone(drone)
    }

    async fn append_mission(&mut self, mission: &Mission) -> Result<()> {
        self.tables.append_mission(mission)
    }
}

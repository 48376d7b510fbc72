//! JSON file storage backend.
//!
//! Each collection is one JSON array file (`pilots.json`, `drones.json`,
//! `missions.json`) whose rows carry the external text representation:
//! comma-joined tag lists, ISO dates, empty string for unassigned
//! references. Array order is the store order the matcher and the queries
//! rely on.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use droneops_core::{Drone, Mission, Pilot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::warn;

use crate::tables::Tables;
use crate::trait_::{Collection, FieldUpdate, Result, Store};

/// File-based JSON storage backend.
pub struct JsonStore {
    root: PathBuf,
    tables: Tables,
}

impl JsonStore {
    /// Open a store rooted at the given directory, creating it if needed.
    ///
    /// Missing collection files read as empty tables. Rows that fail to
    /// decode (e.g. an unrecognized status text) are skipped with a warning
    /// rather than failing the whole table.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;

        let tables = Tables {
            pilots: read_table(&root.join("pilots.json"), Collection::Pilots).await?,
            drones: read_table(&root.join("drones.json"), Collection::Drones).await?,
            missions: read_table(&root.join("missions.json"), Collection::Missions).await?,
        };

        Ok(Self { root, tables })
    }

    fn table_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    async fn flush(&self, collection: Collection) -> Result<()> {
        match collection {
            Collection::Pilots => self.write_table(collection, &self.tables.pilots).await,
            Collection::Drones => self.write_table(collection, &self.tables.drones).await,
            Collection::Missions => self.write_table(collection, &self.tables.missions).await,
        }
    }

    async fn write_table<T: Serialize>(&self, collection: Collection, rows: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(rows)?;
        fs::write(self.table_path(collection), json.as_bytes()).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for JsonStore {
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
        let collection = update.collection;
        self.tables.apply(&update)?;
        self.flush(collection).await
    }

    async fn update_fields(&mut self, updates: Vec<FieldUpdate>) -> Result<()> {
        self.tables.apply_batch(&updates)?;
        let mut touched: Vec<Collection> = Vec::new();
        for update in &updates {
            if !touched.contains(&update.collection) {
                touched.push(update.collection);
            }
        }
        for collection in touched {
            self.flush(collection).await?;
        }
        Ok(())
    }

    async fn append_pilot(&mut self, pilot: &Pilot) -> Result<()> {
        self.tables.append_pilot(pilot)?;
        self.flush(Collection::Pilots).await
    }

    async fn append_drone(&mut self, drone: &Drone) -> Result<()> {
        self.tables.append_drone(drone)?;
        self.flush(Collection::Drones).await
    }

    async fn append_mission(&mut self, mission: &Mission) -> Result<()> {
        self.tables.append_mission(mission)?;
        self.flush(Collection::Missions).await
    }
}

async fn read_table<T: DeserializeOwned>(path: &Path, collection: Collection) -> Result<Vec<T>> {
    let json = match fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let rows: Vec<serde_json::Value> = serde_json::from_str(&json)?;
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(%collection, index, error = %e, "skipping undecodable row");
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use droneops_core::{
        text, MissionId, MissionStatus, PilotId, PilotStatus, Priority,
    };

    fn pilot(id: &str, skills: &str, status: PilotStatus) -> Pilot {
        Pilot {
            pilot_id: PilotId::new(id),
            name: format!("Pilot {id}"),
            skills: text::split_tags(skills),
            certifications: Vec::new(),
            experience_level: None,
            location: "Bangalore".to_string(),
            status,
            current_assignment: None,
            availability_start: None,
            availability_end: None,
            contact_info: None,
        }
    }

    fn mission(id: &str) -> Mission {
        Mission {
            mission_id: MissionId::new(id),
            client_name: "AgriScan Ltd".to_string(),
            location: "Pune".to_string(),
            required_skills: text::split_tags("Mapping, LiDAR"),
            required_certifications: Vec::new(),
            start_date: text::parse_date("2024-01-01"),
            end_date: text::parse_date("2024-01-05"),
            priority: Priority::High,
            status: MissionStatus::Planning,
            assigned_pilot: None,
            assigned_drone: None,
            description: "Crop survey".to_string(),
            special_requirements: None,
        }
    }

    #[tokio::test]
    async fn empty_directory_reads_as_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        assert!(store.list_pilots().await.unwrap().is_empty());
        assert!(store.list_missions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_and_update_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = JsonStore::open(dir.path()).await.unwrap();
        store
            .append_pilot(&pilot("P001", "Mapping", PilotStatus::Available))
            .await
            .unwrap();
        store
            .append_pilot(&pilot("P002", "Mapping, LiDAR", PilotStatus::Available))
            .await
            .unwrap();
        store.append_mission(&mission("M001")).await.unwrap();
        store
            .update_field(FieldUpdate::new(
                Collection::Pilots,
                "P002",
                "status",
                "On Leave",
            ))
            .await
            .unwrap();

        let store = JsonStore::open(dir.path()).await.unwrap();
        let pilots = store.list_pilots().await.unwrap();
        assert_eq!(pilots.len(), 2);
        // Store order preserved
        assert_eq!(pilots[0].pilot_id.as_str(), "P001");
        assert_eq!(pilots[1].status, PilotStatus::OnLeave);
        assert_eq!(store.list_missions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rows_carry_the_external_text_representation() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(dir.path()).await.unwrap();
        store.append_mission(&mission("M001")).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("missions.json")).unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(rows[0]["required_skills"], "Mapping, LiDAR");
        assert_eq!(rows[0]["start_date"], "2024-01-01");
        assert_eq!(rows[0]["assigned_pilot"], "");
    }

    #[tokio::test]
    async fn undecodable_rows_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = JsonStore::open(dir.path()).await.unwrap();
            store
                .append_pilot(&pilot("P001", "Mapping", PilotStatus::Available))
                .await
                .unwrap();
        }

        // Corrupt the second row's status by hand.
        let path = dir.path().join("pilots.json");
        let mut rows: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let mut bad = rows[0].clone();
        bad["pilot_id"] = "P002".into();
        bad["status"] = "Busy".into();
        rows.push(bad);
        std::fs::write(&path, serde_json::to_string_pretty(&rows).unwrap()).unwrap();

        let store = JsonStore::open(dir.path()).await.unwrap();
        let pilots = store.list_pilots().await.unwrap();
        assert_eq!(pilots.len(), 1);
        assert_eq!(pilots[0].pilot_id.as_str(), "P001");
    }

    #[tokio::test]
    async fn batch_update_is_atomic_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::open(dir.path()).await.unwrap();
        store
            .append_pilot(&pilot("P001", "Mapping", PilotStatus::Available))
            .await
            .unwrap();
        store.append_mission(&mission("M001")).await.unwrap();

        // Second update targets a missing mission; the first must not land.
        let err = store
            .update_fields(vec![
                FieldUpdate::new(Collection::Pilots, "P001", "status", "Assigned"),
                FieldUpdate::new(Collection::Missions, "M999", "status", "Active"),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::StorageError::NotFound { .. }));

        let store = JsonStore::open(dir.path()).await.unwrap();
        assert_eq!(
            store.list_pilots().await.unwrap()[0].status,
            PilotStatus::Available
        );
    }
}

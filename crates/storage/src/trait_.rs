//! Store trait abstraction.

use async_trait::async_trait;
use droneops_core::{Drone, Mission, Pilot};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The three record collections the engine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Pilot roster
    Pilots,
    /// Drone fleet
    Drones,
    /// Client missions
    Missions,
}

impl Collection {
    /// Stored name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pilots => "pilots",
            Self::Drones => "drones",
            Self::Missions => "missions",
        }
    }

    /// The identifier field of records in this collection.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::Pilots => "pilot_id",
            Self::Drones => "drone_id",
            Self::Missions => "mission_id",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field write, addressed by collection and record id.
///
/// Values cross the boundary as plain text (the external representation) and
/// are parsed into the typed schema before anything is stored.
#[derive(Debug, Clone)]
pub struct FieldUpdate {
    /// Target collection
    pub collection: Collection,
    /// Target record id
    pub id: String,
    /// Field name within the record schema
    pub field: String,
    /// New value, in external text form
    pub value: String,
}

impl FieldUpdate {
    /// Create a field update.
    pub fn new(
        collection: Collection,
        id: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            collection,
            id: id.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error from the backing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record id absent from the collection
    #[error("{collection}: record {id:?} not found")]
    NotFound {
        /// Collection searched
        collection: Collection,
        /// Id that was not found
        id: String,
    },

    /// Field name not part of the collection's schema
    #[error("{collection}: unknown field {field:?}")]
    UnknownField {
        /// Collection targeted
        collection: Collection,
        /// Rejected field name
        field: String,
    },

    /// Value text rejected by the typed schema
    #[error("invalid value {value:?} for field {field:?}: {reason}")]
    InvalidValue {
        /// Field targeted
        field: String,
        /// Rejected value text
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Append of a record whose id is already present
    #[error("{collection}: record {id:?} already exists")]
    AlreadyExists {
        /// Collection targeted
        collection: Collection,
        /// Duplicate id
        id: String,
    },
}

/// Record store abstraction.
///
/// The engine's only persistence boundary: list a collection in store order,
/// update fields by external text value, or append a record. Backends are
/// injected into components by the caller; no global connection exists.
#[async_trait]
pub trait Store: Send + Sync {
    // === Reads (store order) ===

    /// List all pilots, in store order.
    async fn list_pilots(&self) -> Result<Vec<Pilot>>;

    /// List all drones, in store order.
    async fn list_drones(&self) -> Result<Vec<Drone>>;

    /// List all missions, in store order.
    async fn list_missions(&self) -> Result<Vec<Mission>>;

    // === Writes ===

    /// Apply a single field update.
    async fn update_field(&mut self, update: FieldUpdate) -> Result<()>;

    /// Apply a batch of field updates atomically.
    ///
    /// Every update is validated against the current tables before any is
    /// applied; a batch either lands whole or not at all.
    async fn update_fields(&mut self, updates: Vec<FieldUpdate>) -> Result<()>;

    /// Append a pilot record. Fails if the id already exists.
    async fn append_pilot(&mut self, pilot: &Pilot) -> Result<()>;

    /// Append a drone record. Fails if the id already exists.
    async fn append_drone(&mut self, drone: &Drone) -> Result<()>;

    /// Append a mission record. Fails if the id already exists.
    async fn append_mission(&mut self, mission: &Mission) -> Result<()>;
}

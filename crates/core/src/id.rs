//! Identifiers for DroneOps records.
//!
//! Ids are assigned by the external store (`P001`, `D042`, `M003`), so these
//! are thin newtypes over the stored text rather than generated values.

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create from the external id text.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The id as stored text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

record_id! {
    /// Unique identifier for a Pilot
    PilotId
}

record_id! {
    /// Unique identifier for a Drone
    DroneId
}

record_id! {
    /// Unique identifier for a Mission
    MissionId
}

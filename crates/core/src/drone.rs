//! Drone record and fleet filtering.

use serde::{Deserialize, Serialize};
use crate::id::{DroneId, MissionId};
use crate::text;
use crate::{Date, ParseEnumError};

/// A drone in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    /// Unique identifier
    pub drone_id: DroneId,

    /// Airframe model
    pub model: String,

    /// Equipment feature tags, stored comma-separated
    #[serde(with = "text::comma_tags", default)]
    pub capabilities: Vec<String>,

    /// Maximum range in kilometres
    #[serde(default)]
    pub max_range_km: u32,

    /// Payload capacity in kilograms
    #[serde(default)]
    pub payload_kg: f64,

    /// Current base location
    pub location: String,

    /// Fleet status
    pub status: DroneStatus,

    /// Mission this drone is currently assigned to, if any.
    ///
    /// Weak reference, same discipline as `Pilot::current_assignment`.
    #[serde(with = "text::assign_ref", default)]
    pub current_assignment: Option<MissionId>,

    /// When the next maintenance is due
    #[serde(with = "text::lenient_date", default)]
    pub maintenance_due: Option<Date>,

    /// When maintenance was last performed
    #[serde(with = "text::lenient_date", default)]
    pub last_maintenance: Option<Date>,

    /// Accumulated flight hours
    #[serde(default)]
    pub flight_hours: u32,

    /// Battery health, 0-100
    #[serde(default)]
    pub battery_health_pct: u8,
}

impl Drone {
    /// Whether this drone carries the given capability tag (verbatim,
    /// case-sensitive).
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Drone fleet status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneStatus {
    /// Ready for deployment
    Available,
    /// Out on a mission
    Deployed,
    /// Undergoing maintenance
    Maintenance,
    /// Withdrawn from service
    Inactive,
}

impl DroneStatus {
    /// The stored text for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Deployed => "Deployed",
            Self::Maintenance => "Maintenance",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DroneStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(Self::Available),
            "Deployed" => Ok(Self::Deployed),
            "Maintenance" => Ok(Self::Maintenance),
            "Inactive" => Ok(Self::Inactive),
            other => Err(ParseEnumError::new("drone status", other)),
        }
    }
}

/// Conjunctive filter for fleet queries.
#[derive(Debug, Clone, Default)]
pub struct DroneFilter {
    /// Required status
    pub status: Option<DroneStatus>,
    /// Required capability tag (verbatim containment)
    pub capability: Option<String>,
    /// Required location (exact match)
    pub location: Option<String>,
}

impl DroneFilter {
    /// Whether the drone satisfies every supplied criterion.
    pub fn matches(&self, drone: &Drone) -> bool {
        if let Some(status) = self.status {
            if drone.status != status {
                return false;
            }
        }
        if let Some(capability) = &self.capability {
            if !drone.has_capability(capability) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if &drone.location != location {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(id: &str, capabilities: &str, location: &str, status: DroneStatus) -> Drone {
        Drone {
            drone_id: DroneId::new(id),
            model: "QuadX".to_string(),
            capabilities: text::split_tags(capabilities),
            max_range_km: 20,
            payload_kg: 2.5,
            location: location.to_string(),
            status,
            current_assignment: None,
            maintenance_due: None,
            last_maintenance: None,
            flight_hours: 120,
            battery_health_pct: 93,
        }
    }

    #[test]
    fn filter_is_conjunctive() {
        let d = drone("D001", "4K Camera, LiDAR", "Bangalore", DroneStatus::Available);

        let filter = DroneFilter {
            status: Some(DroneStatus::Available),
            capability: Some("LiDAR".to_string()),
            location: Some("Bangalore".to_string()),
        };
        assert!(filter.matches(&d));

        let wrong_capability = DroneFilter {
            capability: Some("Thermal".to_string()),
            ..filter
        };
        assert!(!wrong_capability.matches(&d));
    }

    #[test]
    fn status_round_trips_through_stored_text() {
        for status in [
            DroneStatus::Available,
            DroneStatus::Deployed,
            DroneStatus::Maintenance,
            DroneStatus::Inactive,
        ] {
            assert_eq!(status.as_str().parse::<DroneStatus>().unwrap(), status);
        }
        assert!("Grounded".parse::<DroneStatus>().is_err());
    }
}

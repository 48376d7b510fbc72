//! Mission record.

use serde::{Deserialize, Serialize};
use crate::id::{DroneId, MissionId, PilotId};
use crate::text;
use crate::{Date, ParseEnumError};

/// A client mission.
///
/// Date ranges are closed intervals (`start ..= end`). Both ends decode
/// leniently: date text that does not parse becomes `None`, and such
/// missions are skipped by the double-booking sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    /// Unique identifier
    pub mission_id: MissionId,

    /// Client this mission is flown for
    pub client_name: String,

    /// Operation site
    pub location: String,

    /// Skills the assigned pilot must hold, stored comma-separated
    #[serde(with = "text::comma_tags", default)]
    pub required_skills: Vec<String>,

    /// Certifications the assigned pilot must hold, stored comma-separated
    #[serde(with = "text::comma_tags", default)]
    pub required_certifications: Vec<String>,

    /// First day of the mission
    #[serde(with = "text::lenient_date", default)]
    pub start_date: Option<Date>,

    /// Last day of the mission (inclusive)
    #[serde(with = "text::lenient_date", default)]
    pub end_date: Option<Date>,

    /// Scheduling priority
    pub priority: Priority,

    /// Mission lifecycle status
    pub status: MissionStatus,

    /// Assigned pilot, if any (weak reference, checked at read time)
    #[serde(with = "text::assign_ref", default)]
    pub assigned_pilot: Option<PilotId>,

    /// Assigned drone, if any (weak reference, checked at read time)
    #[serde(with = "text::assign_ref", default)]
    pub assigned_drone: Option<DroneId>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Client-specific requirements outside the skill/cert tags
    #[serde(with = "text::opt_text", default)]
    pub special_requirements: Option<String>,
}

impl Mission {
    /// The mission's date range, when both ends decoded.
    pub fn date_range(&self) -> Option<(Date, Date)> {
        Some((self.start_date?, self.end_date?))
    }
}

/// Mission scheduling priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Routine work
    Low,
    /// Default priority
    Medium,
    /// Time-sensitive
    High,
    /// Drop-everything
    Critical,
}

impl Priority {
    /// The stored text for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Critical" => Ok(Self::Critical),
            other => Err(ParseEnumError::new("priority", other)),
        }
    }
}

/// Mission lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionStatus {
    /// Being scoped, no resources committed
    Planning,
    /// Resources assigned, underway or scheduled
    Active,
    /// Flown and closed out
    Completed,
    /// Called off
    Cancelled,
}

impl MissionStatus {
    /// The stored text for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MissionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Planning" => Ok(Self::Planning),
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(ParseEnumError::new("mission status", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sheet_row_with_placeholders() {
        let row = serde_json::json!({
            "mission_id": "M003",
            "client_name": "AgriScan Ltd",
            "location": "Pune",
            "required_skills": "Mapping, LiDAR",
            "required_certifications": "",
            "start_date": "2024-01-01",
            "end_date": "TBD",
            "priority": "High",
            "status": "Planning",
            "assigned_pilot": "None",
            "assigned_drone": "",
            "description": "Crop survey",
            "special_requirements": ""
        });
        let m: Mission = serde_json::from_value(row).unwrap();
        assert_eq!(m.required_skills, vec!["Mapping", "LiDAR"]);
        assert!(m.required_certifications.is_empty());
        assert_eq!(m.assigned_pilot, None);
        assert_eq!(m.assigned_drone, None);
        assert!(m.start_date.is_some());
        assert_eq!(m.end_date, None);
        assert_eq!(m.date_range(), None);
    }

    #[test]
    fn priority_orders_low_to_critical() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn unknown_status_text_is_rejected() {
        assert!("Pending".parse::<MissionStatus>().is_err());
        assert!(serde_json::from_value::<MissionStatus>(serde_json::json!("Pending")).is_err());
    }
}

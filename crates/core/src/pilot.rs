//! Pilot record and roster filtering.

use serde::{Deserialize, Serialize};
use crate::id::{MissionId, PilotId};
use crate::text;
use crate::{Date, ParseEnumError};

/// A drone pilot on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    /// Unique identifier
    pub pilot_id: PilotId,

    /// Full name
    pub name: String,

    /// Qualification tags, stored comma-separated
    #[serde(with = "text::comma_tags", default)]
    pub skills: Vec<String>,

    /// Certification tags, stored comma-separated
    #[serde(with = "text::comma_tags", default)]
    pub certifications: Vec<String>,

    /// Free-text experience level (e.g. "Senior")
    #[serde(with = "text::opt_text", default)]
    pub experience_level: Option<String>,

    /// Current base location
    #[serde(alias = "current_location")]
    pub location: String,

    /// Roster status
    pub status: PilotStatus,

    /// Mission this pilot is currently assigned to, if any.
    ///
    /// Weak reference: kept in step with `Mission::assigned_pilot` only by
    /// the assignment workflow writing both sides in one batch.
    #[serde(with = "text::assign_ref", default)]
    pub current_assignment: Option<MissionId>,

    /// Start of the availability window, if declared
    #[serde(with = "text::lenient_date", default)]
    pub availability_start: Option<Date>,

    /// End of the availability window, if declared
    #[serde(with = "text::lenient_date", default)]
    pub availability_end: Option<Date>,

    /// Contact details
    #[serde(with = "text::opt_text", default)]
    pub contact_info: Option<String>,
}

impl Pilot {
    /// Whether this pilot holds every one of the given skill tags.
    ///
    /// Matching is verbatim and case-sensitive, over already-trimmed tags.
    pub fn has_all_skills<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .all(|s| self.skills.iter().any(|have| have == s.as_ref()))
    }
}

/// Pilot roster status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PilotStatus {
    /// Free for assignment
    Available,
    /// Assigned to a mission
    #[serde(alias = "On Assignment")]
    Assigned,
    /// On leave
    #[serde(rename = "On Leave")]
    OnLeave,
    /// Not available for other reasons
    Unavailable,
}

impl PilotStatus {
    /// The stored text for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Assigned => "Assigned",
            Self::OnLeave => "On Leave",
            Self::Unavailable => "Unavailable",
        }
    }
}

impl std::fmt::Display for PilotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PilotStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(Self::Available),
            // "On Assignment" is legacy sheet text for the same state.
            "Assigned" | "On Assignment" => Ok(Self::Assigned),
            "On Leave" => Ok(Self::OnLeave),
            "Unavailable" => Ok(Self::Unavailable),
            other => Err(ParseEnumError::new("pilot status", other)),
        }
    }
}

/// Conjunctive filter for roster queries.
///
/// A pilot passes only if every supplied criterion matches.
#[derive(Debug, Clone, Default)]
pub struct PilotFilter {
    /// Required status
    pub status: Option<PilotStatus>,
    /// Required skill tag (verbatim containment)
    pub skill: Option<String>,
    /// Required location (exact match)
    pub location: Option<String>,
}

impl PilotFilter {
    /// Whether the pilot satisfies every supplied criterion.
    pub fn matches(&self, pilot: &Pilot) -> bool {
        if let Some(status) = self.status {
            if pilot.status != status {
                return false;
            }
        }
        if let Some(skill) = &self.skill {
            if !pilot.skills.iter().any(|s| s == skill) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if &pilot.location != location {
                return false;
            }
        }
        true
    }
}

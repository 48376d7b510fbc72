//! Conflict report types.

use droneops_core::{Date, DroneId, MissionId, PilotId};

/// A detected scheduling or staffing conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// A pilot assigned to two missions whose date ranges overlap.
    ///
    /// Ranges are closed intervals; missions that touch at an endpoint
    /// (same-day handoff) count as overlapping.
    DoubleBooking {
        /// The double-booked pilot
        pilot: PilotId,
        /// Earlier mission (by start date)
        first: MissionId,
        /// Later mission
        second: MissionId,
        /// First overlapping day
        overlap_start: Date,
        /// Last overlapping day
        overlap_end: Date,
    },

    /// An assigned pilot lacking skills the mission requires.
    SkillMismatch {
        /// The understaffed mission
        mission: MissionId,
        /// The assigned pilot
        pilot: PilotId,
        /// Required tags the pilot does not hold
        missing_skills: Vec<String>,
    },

    /// A drone in maintenance that still holds an assignment.
    MaintenanceAssignment {
        /// The drone in maintenance
        drone: DroneId,
        /// The mission it is still assigned to
        mission: MissionId,
    },
}

impl Conflict {
    /// Short machine-readable kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DoubleBooking { .. } => "double_booking",
            Self::SkillMismatch { .. } => "skill_mismatch",
            Self::MaintenanceAssignment { .. } => "maintenance_assignment",
        }
    }
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoubleBooking {
                pilot,
                first,
                second,
                overlap_start,
                overlap_end,
            } => write!(
                f,
                "pilot {pilot} double-booked on {first} and {second} ({overlap_start} to {overlap_end})"
            ),
            Self::SkillMismatch {
                mission,
                pilot,
                missing_skills,
            } => write!(
                f,
                "mission {mission}: pilot {pilot} missing skills: {}",
                missing_skills.join(", ")
            ),
            Self::MaintenanceAssignment { drone, mission } => write!(
                f,
                "drone {drone} is in maintenance but assigned to {mission}"
            ),
        }
    }
}

/// A suggested resolution for a conflict.
///
/// Suggestions are advisory; applying one is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Swap the conflicted drone for an available one.
    ReplaceDrone {
        /// The drone that cannot fly
        grounded: DroneId,
        /// An available replacement
        replacement: DroneId,
    },
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReplaceDrone {
                grounded,
                replacement,
            } => write!(f, "reassign from drone {grounded} to drone {replacement}"),
        }
    }
}

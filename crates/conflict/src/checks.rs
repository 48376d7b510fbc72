//! The conflict checks, as pure functions over record snapshots.
//!
//! Each check is stateless and read-only; running one twice over the same
//! snapshot yields the same report.

use std::collections::BTreeMap;

use droneops_core::{Date, Drone, DroneStatus, Mission, MissionId, Pilot, PilotId};

use crate::report::Conflict;

/// Double-booked pilots: overlapping date ranges among a pilot's missions.
///
/// Missions with an unparseable start or end date are skipped silently.
/// Per pilot, missions are sorted by start date and adjacent pairs compared
/// with a closed-interval test (`current.end >= next.start`), so touching
/// endpoints count as overlap.
pub fn double_bookings(missions: &[Mission]) -> Vec<Conflict> {
    // Grouped by pilot id; BTreeMap keeps report order deterministic.
    let mut by_pilot: BTreeMap<&PilotId, Vec<(&MissionId, Date, Date)>> = BTreeMap::new();
    for mission in missions {
        let Some(pilot) = &mission.assigned_pilot else {
            continue;
        };
        let Some((start, end)) = mission.date_range() else {
            continue;
        };
        by_pilot
            .entry(pilot)
            .or_default()
            .push((&mission.mission_id, start, end));
    }

    let mut conflicts = Vec::new();
    for (pilot, mut bookings) in by_pilot {
        bookings.sort_by_key(|&(_, start, _)| start);
        for pair in bookings.windows(2) {
            let (first, _, current_end) = pair[0];
            let (second, next_start, _) = pair[1];
            if current_end >= next_start {
                conflicts.push(Conflict::DoubleBooking {
                    pilot: pilot.clone(),
                    first: first.clone(),
                    second: second.clone(),
                    overlap_start: next_start,
                    overlap_end: current_end,
                });
            }
        }
    }
    conflicts
}

/// Assigned pilots missing required skills.
///
/// Missions whose assigned pilot no longer exists in the roster are skipped
/// silently; the reference is weak and checked at read time.
pub fn skill_mismatches(pilots: &[Pilot], missions: &[Mission]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for mission in missions {
        let Some(pilot_id) = &mission.assigned_pilot else {
            continue;
        };
        let Some(pilot) = pilots.iter().find(|p| &p.pilot_id == pilot_id) else {
            continue;
        };
        let missing: Vec<String> = mission
            .required_skills
            .iter()
            .filter(|required| !pilot.skills.iter().any(|have| have == *required))
            .cloned()
            .collect();
        if !missing.is_empty() {
            conflicts.push(Conflict::SkillMismatch {
                mission: mission.mission_id.clone(),
                pilot: pilot_id.clone(),
                missing_skills: missing,
            });
        }
    }
    conflicts
}

/// Drones in maintenance that still hold an assignment.
pub fn maintenance_assignments(drones: &[Drone]) -> Vec<Conflict> {
    drones
        .iter()
        .filter(|d| d.status == DroneStatus::Maintenance)
        .filter_map(|d| {
            let mission = d.current_assignment.clone()?;
            Some(Conflict::MaintenanceAssignment {
                drone: d.drone_id.clone(),
                mission,
            })
        })
        .collect()
}

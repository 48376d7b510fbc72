//! Typed field dispatch for text-valued updates.
//!
//! `update_field` receives plain text; these functions parse it into the
//! record schema and reject what the schema cannot represent, so arbitrary
//! strings never reach a stored enum or date field.

use droneops_core::{text, Date, Drone, Mission, Pilot};

use crate::trait_::{Collection, Result, StorageError};

fn invalid(field: &str, value: &str, reason: impl std::fmt::Display) -> StorageError {
    StorageError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn unknown(collection: Collection, field: &str) -> StorageError {
    StorageError::UnknownField {
        collection,
        field: field.to_string(),
    }
}

/// Parse a date strictly: empty/placeholder text clears the field, anything
/// else must be ISO `YYYY-MM-DD`.
fn parse_date_strict(field: &str, value: &str) -> Result<Option<Date>> {
    if text::is_placeholder(value) {
        return Ok(None);
    }
    text::parse_date(value).map(Some).ok_or_else(|| {
        invalid(field, value, "expected an ISO YYYY-MM-DD date")
    })
}

fn parse_ref(value: &str) -> Option<String> {
    if text::is_placeholder(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn parse_num<T: std::str::FromStr>(field: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(field, value, e))
}

pub(crate) fn apply_pilot_field(pilot: &mut Pilot, field: &str, value: &str) -> Result<()> {
    match field {
        "name" => pilot.name = value.to_string(),
        "skills" => pilot.skills = text::split_tags(value),
        "certifications" => pilot.certifications = text::split_tags(value),
        "experience_level" => pilot.experience_level = parse_ref(value),
        "location" => pilot.location = value.trim().to_string(),
        "status" => pilot.status = value.parse().map_err(|e| invalid(field, value, e))?,
        "current_assignment" => pilot.current_assignment = parse_ref(value).map(Into::into),
        "availability_start" => pilot.availability_start = parse_date_strict(field, value)?,
        "availability_end" => pilot.availability_end = parse_date_strict(field, value)?,
        "contact_info" => pilot.contact_info = parse_ref(value),
        // The identifier is addressing, not data.
        _ => return Err(unknown(Collection::Pilots, field)),
    }
    Ok(())
}

pub(crate) fn apply_drone_field(drone: &mut Drone, field: &str, value: &str) -> Result<()> {
    match field {
        "model" => drone.model = value.to_string(),
        "capabilities" => drone.capabilities = text::split_tags(value),
        "max_range_km" => drone.max_range_km = parse_num(field, value)?,
        "payload_kg" => drone.payload_kg = parse_num(field, value)?,
        "location" => drone.location = value.trim().to_string(),
        "status" => drone.status = value.parse().map_err(|e| invalid(field, value, e))?,
        "current_assignment" => drone.current_assignment = parse_ref(value).map(Into::into),
        "maintenance_due" => drone.maintenance_due = parse_date_strict(field, value)?,
        "last_maintenance" => drone.last_maintenance = parse_date_strict(field, value)?,
        "flight_hours" => drone.flight_hours = parse_num(field, value)?,
        "battery_health_pct" => drone.battery_health_pct = parse_num(field, value)?,
        _ => return Err(unknown(Collection::Drones, field)),
    }
    Ok(())
}

pub(crate) fn apply_mission_field(mission: &mut Mission, field: &str, value: &str) -> Result<()> {
    match field {
        "client_name" => mission.client_name = value.to_string(),
        "location" => mission.location = value.trim().to_string(),
        "required_skills" => mission.required_skills = text::split_tags(value),
        "required_certifications" => mission.required_certifications = text::split_tags(value),
        "start_date" => mission.start_date = parse_date_strict(field, value)?,
        "end_date" => mission.end_date = parse_date_strict(field, value)?,
        "priority" => mission.priority = value.parse().map_err(|e| invalid(field, value, e))?,
        "status" => mission.status = value.parse().map_err(|e| invalid(field, value, e))?,
        "assigned_pilot" => mission.assigned_pilot = parse_ref(value).map(Into::into),
        "assigned_drone" => mission.assigned_drone = parse_ref(value).map(Into::into),
        "description" => mission.description = value.to_string(),
        "special_requirements" => mission.special_requirements = parse_ref(value),
        _ => return Err(unknown(Collection::Missions, field)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use droneops_core::{MissionId, PilotId, PilotStatus};

    fn pilot() -> Pilot {
        Pilot {
            pilot_id: PilotId::new("P001"),
            name: "Asha Rao".to_string(),
            skills: vec!["Mapping".to_string()],
            certifications: Vec::new(),
            experience_level: None,
            location: "Bangalore".to_string(),
            status: PilotStatus::Available,
            current_assignment: None,
            availability_start: None,
            availability_end: None,
            contact_info: None,
        }
    }

    #[test]
    fn status_text_is_parsed() {
        let mut p = pilot();
        apply_pilot_field(&mut p, "status", "On Leave").unwrap();
        assert_eq!(p.status, PilotStatus::OnLeave);
    }

    #[test]
    fn bad_enum_text_is_rejected() {
        let mut p = pilot();
        let err = apply_pilot_field(&mut p, "status", "Busy").unwrap_err();
        assert!(matches!(err, StorageError::InvalidValue { .. }));
        // Nothing changed
        assert_eq!(p.status, PilotStatus::Available);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut p = pilot();
        let err = apply_pilot_field(&mut p, "call_sign", "Maverick").unwrap_err();
        assert!(matches!(err, StorageError::UnknownField { .. }));
    }

    #[test]
    fn placeholder_clears_assignment() {
        let mut p = pilot();
        p.current_assignment = Some(MissionId::new("M001"));
        apply_pilot_field(&mut p, "current_assignment", "None").unwrap();
        assert_eq!(p.current_assignment, None);
    }

    #[test]
    fn update_dates_are_strict() {
        let mut p = pilot();
        assert!(apply_pilot_field(&mut p, "availability_start", "2024-03-01").is_ok());
        assert!(apply_pilot_field(&mut p, "availability_start", "soon").is_err());
        assert!(apply_pilot_field(&mut p, "availability_start", "").is_ok());
        assert_eq!(p.availability_start, None);
    }
}

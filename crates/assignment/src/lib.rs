//! Resource matching and the assignment workflow.
//!
//! First-fit matching of pilots and drones to mission requirements, and the
//! workflow that commits an assignment by writing both sides of the
//! pilot↔mission and drone↔mission relation in one atomic batch.

#![warn(missing_docs)]

mod matcher;
mod assigner;

pub use matcher::{first_fit_drone, first_fit_pilot, DroneRequirements, Matcher, Requirements};
pub use assigner::{ActiveAssignment, AssignError, Assigner, Assignment};

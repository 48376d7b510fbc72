//! DroneOps CLI - drone operations coordination.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing::Level;

use droneops_assignment::Assigner;
use droneops_conflict::ConflictDetector;
use droneops_core::{
    Date, DroneFilter, DroneId, DroneStatus, Mission, MissionId, MissionStatus, PilotFilter,
    PilotId, PilotStatus, Priority,
};
use droneops_fleet::Fleet;
use droneops_roster::Roster;
use droneops_storage::{JsonStore, Store};

#[derive(Parser)]
#[command(name = "droneops")]
#[command(about = "Drone operations coordination", long_about = None)]
struct Cli {
    /// Directory holding the record store
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show record counts and status breakdowns
    Status,
    /// List pilots
    Pilots {
        /// Filter by status
        #[arg(long)]
        status: Option<PilotStatus>,
        /// Filter by skill tag
        #[arg(long)]
        skill: Option<String>,
        /// Filter by location
        #[arg(long)]
        location: Option<String>,
    },
    /// List drones
    Drones {
        /// Filter by status
        #[arg(long)]
        status: Option<DroneStatus>,
        /// Filter by capability tag
        #[arg(long)]
        capability: Option<String>,
        /// Filter by location
        #[arg(long)]
        location: Option<String>,
    },
    /// List missions
    Missions {
        /// Filter by status
        #[arg(long)]
        status: Option<MissionStatus>,
    },
    /// Update a pilot's status
    UpdatePilot {
        /// Pilot ID
        id: String,
        /// New status
        status: PilotStatus,
    },
    /// Assign a pilot and drone to a mission
    Assign {
        /// Mission ID to staff
        #[arg(long)]
        mission_id: String,
        /// Specific pilot to assign (first-fit match when omitted)
        #[arg(long)]
        pilot_id: Option<String>,
        /// Specific drone to assign (first available when omitted)
        #[arg(long)]
        drone_id: Option<String>,
    },
    /// Check for scheduling and staffing conflicts
    Conflicts,
    /// Create a mission
    AddMission {
        /// Mission ID
        id: String,
        /// Client name
        #[arg(long)]
        client: String,
        /// Operation site
        #[arg(long)]
        location: String,
        /// Required skills, comma-separated
        #[arg(long, default_value = "")]
        skills: String,
        /// Required certifications, comma-separated
        #[arg(long, default_value = "")]
        certifications: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Date,
        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: Date,
        /// Priority
        #[arg(long, default_value = "Medium")]
        priority: Priority,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List drones due for maintenance
    Maintenance {
        /// Horizon in days
        #[arg(long, default_value = "7")]
        days: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let store = JsonStore::open(&cli.data_dir).await?;
    let store = Arc::new(Mutex::new(store));

    match cli.command {
        Commands::Status => {
            let roster = Roster::new(Arc::clone(&store));
            let fleet = Fleet::new(Arc::clone(&store));
            let pilots = roster.find(&PilotFilter::default()).await?;
            let drones = fleet.find(&DroneFilter::default()).await?;
            let missions = store.lock().await.list_missions().await?;

            println!("DroneOps Status");
            println!(
                "  Pilots: {} ({} available)",
                pilots.len(),
                pilots
                    .iter()
                    .filter(|p| p.status == PilotStatus::Available)
                    .count(),
            );
            println!(
                "  Drones: {} ({} available)",
                drones.len(),
                drones
                    .iter()
                    .filter(|d| d.status == DroneStatus::Available)
                    .count(),
            );
            println!(
                "  Missions: {} ({} active, {} high priority or above)",
                missions.len(),
                missions
                    .iter()
                    .filter(|m| m.status == MissionStatus::Active)
                    .count(),
                missions
                    .iter()
                    .filter(|m| m.priority >= Priority::High)
                    .count(),
            );
        }
        Commands::Pilots {
            status,
            skill,
            location,
        } => {
            let roster = Roster::new(store);
            let pilots = roster
                .find(&PilotFilter {
                    status,
                    skill,
                    location,
                })
                .await?;

            println!("Pilots ({})", pilots.len());
            for p in pilots {
                println!(
                    "  {} | {} | {} | {} | {}",
                    p.pilot_id,
                    p.name,
                    p.status,
                    p.location,
                    p.skills.join(", "),
                );
            }
        }
        Commands::Drones {
            status,
            capability,
            location,
        } => {
            let fleet = Fleet::new(store);
            let drones = fleet
                .find(&DroneFilter {
                    status,
                    capability,
                    location,
                })
                .await?;

            println!("Drones ({})", drones.len());
            for d in drones {
                println!(
                    "  {} | {} | {} | {} | {}",
                    d.drone_id,
                    d.model,
                    d.status,
                    d.location,
                    d.capabilities.join(", "),
                );
            }
        }
        Commands::Missions { status } => {
            let missions = store.lock().await.list_missions().await?;
            let missions: Vec<Mission> = missions
                .into_iter()
                .filter(|m| status.is_none() || status == Some(m.status))
                .collect();

            println!("Missions ({})", missions.len());
            for m in missions {
                println!(
                    "  {} | {} | {} | {} | {} to {} | pilot: {} | drone: {}",
                    m.mission_id,
                    m.client_name,
                    m.status,
                    m.priority,
                    m.start_date.map_or_else(|| "?".to_string(), |d| d.to_string()),
                    m.end_date.map_or_else(|| "?".to_string(), |d| d.to_string()),
                    m.assigned_pilot
                        .as_ref()
                        .map_or("unassigned", |p| p.as_str()),
                    m.assigned_drone
                        .as_ref()
                        .map_or("unassigned", |d| d.as_str()),
                );
            }
        }
        Commands::UpdatePilot { id, status } => {
            let roster = Roster::new(store);
            let id = PilotId::new(id);
            roster.update_status(&id, status).await?;
            println!("Updated pilot {id} to {status}");
        }
        Commands::Assign {
            mission_id,
            pilot_id,
            drone_id,
        } => {
            let assigner = Assigner::new(store);
            let mission_id = MissionId::new(mission_id);
            let pilot_id = pilot_id.map(PilotId::new);
            let drone_id = drone_id.map(DroneId::new);

            let assignment = assigner
                .assign(&mission_id, pilot_id.as_ref(), drone_id.as_ref())
                .await?;
            println!(
                "Assigned pilot {} and drone {} to mission {}",
                assignment.pilot_id, assignment.drone_id, assignment.mission_id,
            );
        }
        Commands::Conflicts => {
            let detector = ConflictDetector::new(store);
            let conflicts = detector.detect().await?;

            if conflicts.is_empty() {
                println!("No conflicts found");
                return Ok(());
            }

            println!("Conflicts ({})", conflicts.len());
            for conflict in &conflicts {
                println!("  [{}] {}", conflict.kind(), conflict);
                if let Some(suggestion) = detector.suggest_reassignment(conflict).await? {
                    println!("      suggestion: {suggestion}");
                }
            }
        }
        Commands::AddMission {
            id,
            client,
            location,
            skills,
            certifications,
            start,
            end,
            priority,
            description,
        } => {
            let mission = Mission {
                mission_id: MissionId::new(id),
                client_name: client,
                location,
                required_skills: droneops_core::text::split_tags(&skills),
                required_certifications: droneops_core::text::split_tags(&certifications),
                start_date: Some(start),
                end_date: Some(end),
                priority,
                status: MissionStatus::Planning,
                assigned_pilot: None,
                assigned_drone: None,
                description,
                special_requirements: None,
            };
            store.lock().await.append_mission(&mission).await?;
            println!("Created mission {}", mission.mission_id);
        }
        Commands::Maintenance { days } => {
            let fleet = Fleet::new(store);
            let today = chrono::Utc::now().date_naive();
            let due = fleet.maintenance_due(today, days).await?;

            if due.is_empty() {
                println!("No drones due for maintenance in the next {days} days");
                return Ok(());
            }

            println!("Maintenance due ({})", due.len());
            for d in due {
                println!(
                    "  {} | {} | due {}",
                    d.drone_id,
                    d.model,
                    d.maintenance_due
                        .map_or_else(|| "?".to_string(), |date| date.to_string()),
                );
            }
        }
    }

    Ok(())
}

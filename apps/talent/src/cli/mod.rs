//! # Talent CLI Module
//!
//! This module implements the CLI interface for Talent Compass.
//!
//! ## Available Commands
//!
//! - `dashboard` - KPI cards, charts and top performers
//! - `grid` - The 9-box grid with summary cards
//! - `retention` - Retention watchlist with recommended actions
//! - `next-steps` - Succession pipeline with development plans
//! - `classify` - Classify a single rating pair
//! - `employees` - Search and list employees
//! - `export-csv` - Export the employee table as CSV
//! - `assess` - Record an assessment
//! - `add-employee` - Add a new employee
//! - `edit-employee` - Edit descriptive employee fields
//! - `users` - List user accounts
//! - `add-user` - Provision a user account
//! - `edit-user` - Edit a user account
//! - `grant` / `revoke` - Change a user's capability
//! - `delete-user` - Remove a user account

mod commands;

use crate::config::{CliOverrides, EnvConfig, FileConfig, Settings};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use talent_core::{Capability, Direction, JobGrade, Rating, Readiness, RiskLevel, Role, TalentError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Talent Compass - 9-box succession planning
///
/// Classifies employees on the 9-box grid, aggregates dashboard KPIs and
/// recommends retention and development actions from a JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "talent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML config file (default: talent.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the JSON snapshot
    #[arg(short = 'S', long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Username to act as
    #[arg(long = "as", global = true, value_name = "USERNAME")]
    pub acting_user: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolve settings from this command line, the environment and the config file.
    pub fn settings(&self) -> Result<Settings, TalentError> {
        let file = FileConfig::load(self.config.as_deref())?;
        let cli = CliOverrides {
            snapshot: self.snapshot.clone(),
            acting_user: self.acting_user.clone(),
        };
        Settings::resolve(cli, EnvConfig::from_process(), file)
    }
}

/// Ratings and outcomes of one assessment.
#[derive(Args, Debug, Clone)]
pub struct AssessmentArgs {
    /// Performance rating (1-3)
    #[arg(short, long)]
    pub performance: Rating,

    /// Evolution potential rating (1-3)
    #[arg(short = 't', long)]
    pub potential: Rating,

    /// Risk of loss (Low, Medium, High)
    #[arg(short, long)]
    pub risk: RiskLevel,

    /// Impact of loss (Low, Medium, High)
    #[arg(short, long)]
    pub impact: RiskLevel,

    /// Readiness ("Ready Now", "1-3 Years", "More than 3 Years")
    #[arg(short = 'R', long)]
    pub readiness: Readiness,

    /// Next role in the succession plan
    #[arg(short, long)]
    pub next_role: String,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dashboard
    Dashboard {
        /// Number of top performers to list
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// Show the 9-box grid
    Grid,

    /// Show the retention watchlist
    Retention,

    /// Show the succession pipeline
    NextSteps,

    /// Classify one performance / potential pair
    Classify {
        /// Performance rating (1-3)
        performance: u8,

        /// Evolution potential rating (1-3)
        potential: u8,
    },

    /// List employees
    Employees {
        /// Case-insensitive search on name, job title and department
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only employees of this direction
        #[arg(short, long)]
        direction: Option<Direction>,
    },

    /// Export the employee table as CSV
    ExportCsv {
        /// Output file, or a directory for the dated default name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export date (YYYY-MM-DD) used in the default file name (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record an assessment for an employee
    Assess {
        /// Employee id
        id: String,

        #[command(flatten)]
        assessment: AssessmentArgs,

        /// Assessment date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Assessor comments
        #[arg(long, default_value = "")]
        comments: String,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add a new employee
    AddEmployee {
        /// Full name
        #[arg(long)]
        name: String,

        /// Job title
        #[arg(long)]
        job_title: String,

        /// Job grade (G1-G4)
        #[arg(short, long)]
        grade: JobGrade,

        /// Direction
        #[arg(short, long)]
        direction: Direction,

        /// Department
        #[arg(long)]
        department: String,

        /// Job category (default: Management)
        #[arg(long)]
        job_category: Option<String>,

        #[command(flatten)]
        assessment: AssessmentArgs,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit descriptive employee fields
    EditEmployee {
        /// Employee id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        job_title: Option<String>,

        #[arg(long)]
        grade: Option<JobGrade>,

        #[arg(long)]
        direction: Option<Direction>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        job_category: Option<String>,

        #[arg(long)]
        next_role: Option<String>,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List user accounts
    Users {
        /// Case-insensitive search on full name, username and email
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Provision a user account
    AddUser {
        /// Login name, unique across accounts
        username: String,

        #[arg(long)]
        full_name: String,

        #[arg(long)]
        email: String,

        /// Department; a Manager is restricted to this section
        #[arg(short, long)]
        department: Direction,

        /// Role (Manager, HR); seeds the permission preset
        #[arg(short, long)]
        role: Role,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit a user account
    EditUser {
        /// Username of the account to edit
        username: String,

        #[arg(long)]
        new_username: Option<String>,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<Role>,

        #[arg(long)]
        department: Option<String>,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Grant a capability to a user
    Grant {
        /// Username
        username: String,

        /// Capability key, e.g. canExportReportsToPDF
        capability: Capability,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Revoke a capability from a user
    Revoke {
        /// Username
        username: String,

        /// Capability key, e.g. canManageUsers
        capability: Capability,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a user account
    DeleteUser {
        /// Username
        username: String,

        /// Write the updated snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved settings.
pub fn execute(cli: Cli, settings: &Settings) -> Result<(), TalentError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Dashboard { top }) => cmd_dashboard(settings, json_mode, top),
        Some(Commands::Grid) => cmd_grid(settings, json_mode),
        Some(Commands::Retention) => cmd_retention(settings, json_mode),
        Some(Commands::NextSteps) => cmd_next_steps(settings, json_mode),
        Some(Commands::Classify {
            performance,
            potential,
        }) => cmd_classify(json_mode, performance, potential),
        Some(Commands::Employees { search, direction }) => {
            cmd_employees(settings, json_mode, &search, direction)
        }
        Some(Commands::ExportCsv { output, date }) => {
            cmd_export_csv(settings, output.as_deref(), date)
        }
        Some(Commands::Assess {
            id,
            assessment,
            date,
            comments,
            output,
        }) => cmd_assess(
            settings,
            json_mode,
            &id,
            assessment,
            date,
            comments,
            output.as_deref(),
        ),
        Some(Commands::AddEmployee {
            name,
            job_title,
            grade,
            direction,
            department,
            job_category,
            assessment,
            output,
        }) => {
            let draft = talent_core::EmployeeDraft {
                name,
                job_title,
                job_grade: grade,
                direction,
                department,
                job_category,
                performance: assessment.performance,
                evolution_potential: assessment.potential,
                risk_of_loss: assessment.risk,
                impact_of_loss: assessment.impact,
                readiness: assessment.readiness,
                next_role: assessment.next_role,
            };
            cmd_add_employee(settings, json_mode, draft, output.as_deref())
        }
        Some(Commands::EditEmployee {
            id,
            name,
            job_title,
            grade,
            direction,
            department,
            job_category,
            next_role,
            output,
        }) => {
            let update = talent_core::EmployeeUpdate {
                name,
                job_title,
                job_grade: grade,
                direction,
                department,
                job_category,
                next_role,
            };
            cmd_edit_employee(settings, json_mode, &id, update, output.as_deref())
        }
        Some(Commands::Users { search }) => cmd_users(settings, json_mode, &search),
        Some(Commands::AddUser {
            username,
            full_name,
            email,
            department,
            role,
            output,
        }) => cmd_add_user(
            settings,
            json_mode,
            username,
            full_name,
            email,
            department,
            role,
            output.as_deref(),
        ),
        Some(Commands::EditUser {
            username,
            new_username,
            full_name,
            email,
            role,
            department,
            output,
        }) => {
            let update = talent_core::UserUpdate {
                username: new_username,
                full_name,
                email,
                role,
                department,
            };
            cmd_edit_user(settings, json_mode, &username, update, output.as_deref())
        }
        Some(Commands::Grant {
            username,
            capability,
            output,
        }) => cmd_set_permission(
            settings,
            json_mode,
            &username,
            capability,
            true,
            output.as_deref(),
        ),
        Some(Commands::Revoke {
            username,
            capability,
            output,
        }) => cmd_set_permission(
            settings,
            json_mode,
            &username,
            capability,
            false,
            output.as_deref(),
        ),
        Some(Commands::DeleteUser { username, output }) => {
            cmd_delete_user(settings, json_mode, &username, output.as_deref())
        }
        None => {
            // No subcommand - show the dashboard by default
            cmd_dashboard(settings, json_mode, None)
        }
    }
}

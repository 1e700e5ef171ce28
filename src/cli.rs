use crate::config::{DB_ENV_VAR, DEFAULT_DB_FILE};
use crate::models::Role;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Employee and manager record store")]
#[command(version)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = DB_ENV_VAR, default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::try_from(s)
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the employee and manager tables
    Init,

    /// Insert the built-in sample people
    Seed {
        #[arg(long, value_parser = parse_role, default_value = "employee")]
        role: Role,
    },

    /// Load people from a headerless first_name,last_name,gender file
    Load {
        /// Delimited input file
        file: PathBuf,
        #[arg(long, value_parser = parse_role, default_value = "employee")]
        role: Role,
    },

    /// Print stored people in id order
    List {
        #[arg(long, value_parser = parse_role, default_value = "employee")]
        role: Role,
        /// Append the role tag to each line
        #[arg(long)]
        with_role: bool,
        /// Print the record tag and creation time
        #[arg(long, conflicts_with = "with_role")]
        with_timestamps: bool,
        /// Print JSON instead of text
        #[arg(long, conflicts_with_all = ["with_role", "with_timestamps"])]
        json: bool,
    },

    /// Change fields of a stored person
    Update {
        id: i64,
        #[arg(long, value_parser = parse_role, default_value = "employee")]
        role: Role,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
    },

    /// Seed, optionally load a file, then list everything
    Demo {
        /// Also seed and list managers
        #[arg(long)]
        managers: bool,
        /// Employees file to load after seeding
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

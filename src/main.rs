use clap::Parser;
use std::process;
use roster::cli::{Cli, Commands};
use roster::cli_handlers::{self, LineStyle};
use roster::config::StoreConfig;
use roster::models::PersonUpdate;

fn main() {
    // Logs go to stderr so stdout carries only records
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = StoreConfig::new(&cli.db);

    let result = match cli.command {
        Commands::Init => cli_handlers::handle_init(&config),
        Commands::Seed { role } => cli_handlers::handle_seed(&config, role),
        Commands::Load { file, role } => cli_handlers::handle_load(&config, role, &file),
        Commands::List {
            role,
            with_role,
            with_timestamps,
            json,
        } => {
            let style = if with_timestamps {
                LineStyle::Timestamped
            } else if with_role {
                LineStyle::NameAndRole
            } else {
                LineStyle::Name
            };
            cli_handlers::handle_list(&config, role, style, json)
        }
        Commands::Update {
            id,
            role,
            first_name,
            last_name,
            gender,
        } => cli_handlers::handle_update(
            &config,
            role,
            id,
            PersonUpdate {
                first_name,
                last_name,
                gender,
            },
        ),
        Commands::Demo { managers, csv } => {
            cli_handlers::handle_demo(&config, managers, csv.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

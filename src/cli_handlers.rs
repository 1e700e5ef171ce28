use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::{Person, PersonUpdate, Role, sample_people};
use crate::store::RecordStore;
use std::path::Path;

/// How `list` renders each record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Name,
    NameAndRole,
    Timestamped,
}

pub fn format_line(person: &Person, style: LineStyle) -> String {
    match style {
        LineStyle::Name => person.full_name(),
        LineStyle::NameAndRole => format!("{} {}", person.full_name(), person.role),
        LineStyle::Timestamped => format!(
            "{} {}",
            person,
            person.timestamps.time_created.format("%Y-%m-%d %H:%M:%S")
        ),
    }
}

/// Every command runs against an initialized schema
fn open_store(config: &StoreConfig) -> Result<RecordStore> {
    let store = RecordStore::open(config)?;
    store.initialize_schema()?;
    Ok(store)
}

fn print_people(people: &[Person], style: LineStyle) {
    for person in people {
        println!("{}", format_line(person, style));
    }
}

/// Handle the init command
pub fn handle_init(config: &StoreConfig) -> Result<()> {
    open_store(config)?;
    eprintln!("Initialized {}", config.path.display());
    Ok(())
}

/// Handle the seed command
pub fn handle_seed(config: &StoreConfig, role: Role) -> Result<()> {
    let mut store = open_store(config)?;
    let people = store.insert_batch(role, &sample_people(role))?;
    print_people(&people, LineStyle::Name);
    Ok(())
}

/// Handle the load command
pub fn handle_load(config: &StoreConfig, role: Role, file: &Path) -> Result<()> {
    let mut store = open_store(config)?;
    let people = store.load_file(role, file)?;
    eprintln!("Loaded {} {} record(s) from {}", people.len(), role, file.display());
    Ok(())
}

/// Handle the list command
pub fn handle_list(config: &StoreConfig, role: Role, style: LineStyle, json: bool) -> Result<()> {
    let store = open_store(config)?;
    let people = store.list_all(role)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&people)?);
    } else {
        print_people(&people, style);
    }
    Ok(())
}

/// Handle the update command
pub fn handle_update(config: &StoreConfig, role: Role, id: i64, update: PersonUpdate) -> Result<()> {
    let store = open_store(config)?;
    let person = if update.is_empty() {
        store.get(role, id)?
    } else {
        store.update(role, id, update)?
    };
    println!("{}", format_line(&person, LineStyle::NameAndRole));
    Ok(())
}

/// Handle the demo command
pub fn handle_demo(config: &StoreConfig, managers: bool, csv: Option<&Path>) -> Result<()> {
    let mut store = open_store(config)?;

    store.insert_batch(Role::Employee, &sample_people(Role::Employee))?;
    if managers {
        store.insert_batch(Role::Manager, &sample_people(Role::Manager))?;
    }
    if let Some(file) = csv {
        // Show the seeded list before the file extends it
        print_people(&store.list_all(Role::Employee)?, LineStyle::NameAndRole);
        store.load_file(Role::Employee, file)?;
    }

    print_people(&store.list_all(Role::Employee)?, LineStyle::NameAndRole);
    if managers {
        print_people(&store.list_all(Role::Manager)?, LineStyle::NameAndRole);
    }
    Ok(())
}

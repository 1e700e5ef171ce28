use crate::config::StoreConfig;
use crate::db::Database;
use crate::error::{Result, StoreError};
use crate::loader;
use crate::models::{MAX_GENDER_LEN, MAX_NAME_LEN, NewPerson, Person, PersonUpdate, Role};
use std::path::Path;
use tracing::info;

/// Validating facade over the database
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    /// Open the store at the configured location
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let db = Database::open(&config.path)?;
        Ok(RecordStore { db })
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(RecordStore { db })
    }

    /// Ensure both role tables exist. Safe to call repeatedly.
    pub fn initialize_schema(&self) -> Result<()> {
        self.db.init()?;
        info!("schema ready");
        Ok(())
    }

    // ==================== Person Operations ====================

    /// Validate then insert every record atomically.
    ///
    /// The first record receives the lowest new id. If any record is
    /// invalid nothing is written.
    pub fn insert_batch(&mut self, role: Role, records: &[NewPerson]) -> Result<Vec<Person>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        for (index, record) in records.iter().enumerate() {
            validate(index, &record.first_name, &record.last_name, &record.gender)?;
        }

        let people = self.db.insert_batch(role, records)?;
        info!(
            %role,
            count = people.len(),
            first_id = people.first().map(|p| p.id),
            "committed batch"
        );
        Ok(people)
    }

    /// Parse a delimited file without touching the database
    pub fn load_from_delimited_text<P: AsRef<Path>>(path: P) -> Result<Vec<NewPerson>> {
        loader::load_from_delimited_text(path)
    }

    /// Parse a delimited file and insert its records as one batch
    pub fn load_file<P: AsRef<Path>>(&mut self, role: Role, path: P) -> Result<Vec<Person>> {
        let records = loader::load_from_delimited_text(path)?;
        self.insert_batch(role, &records)
    }

    /// All records of a role, ascending by id
    pub fn list_all(&self, role: Role) -> Result<Vec<Person>> {
        self.db.get_all_people(role)
    }

    pub fn count(&self, role: Role) -> Result<i64> {
        self.db.count_people(role)
    }

    pub fn get(&self, role: Role, id: i64) -> Result<Person> {
        self.db
            .get_person(role, id)?
            .ok_or(StoreError::NotFound { role, id })
    }

    /// Change any of the human fields; id and creation time stay fixed
    pub fn update(&self, role: Role, id: i64, update: PersonUpdate) -> Result<Person> {
        let current = self.get(role, id)?;
        let first_name = update.first_name.unwrap_or(current.first_name);
        let last_name = update.last_name.unwrap_or(current.last_name);
        let gender = update.gender.unwrap_or(current.gender);
        validate(0, &first_name, &last_name, &gender)?;

        let person = self
            .db
            .update_person(role, id, &first_name, &last_name, &gender)?
            .ok_or(StoreError::NotFound { role, id })?;
        info!(%role, id, "updated record");
        Ok(person)
    }
}

fn validate(index: usize, first_name: &str, last_name: &str, gender: &str) -> Result<()> {
    check_text(index, "first_name", first_name, MAX_NAME_LEN, true)?;
    check_text(index, "last_name", last_name, MAX_NAME_LEN, true)?;
    check_text(index, "gender", gender, MAX_GENDER_LEN, false)
}

fn check_text(
    index: usize,
    field: &'static str,
    value: &str,
    max: usize,
    required: bool,
) -> Result<()> {
    if required && value.trim().is_empty() {
        return Err(StoreError::Validation {
            index,
            field,
            reason: "is missing".to_string(),
        });
    }
    let len = value.chars().count();
    if len > max {
        return Err(StoreError::Validation {
            index,
            field,
            reason: format!("is {len} characters, limit is {max}"),
        });
    }
    Ok(())
}

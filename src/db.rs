use crate::error::{Result, StoreError};
use crate::models::{NewPerson, Person, Role, Timestamps};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;

/// Columns every role table must carry
const COLUMNS: [&str; 6] = [
    "id",
    "first_name",
    "last_name",
    "gender",
    "time_created",
    "time_updated",
];

/// Database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            StoreError::Schema(format!("cannot open {}: {e}", path.display()))
        })?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        // journal_mode answers with the resulting mode, so read it back
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Schema(format!("{} is not writable: {e}", path.display())))?;

        Ok(Database { conn })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Database { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the role tables if absent and check their columns
    pub fn init(&self) -> Result<()> {
        for role in Role::ALL {
            self.create_table(role)?;
            self.verify_table(role)?;
        }
        Ok(())
    }

    fn create_table(&self, role: Role) -> Result<()> {
        self.conn
            .execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id INTEGER PRIMARY KEY AUTOINCREMENT,
                        first_name VARCHAR(100) NOT NULL,
                        last_name VARCHAR(100) NOT NULL,
                        gender VARCHAR(32) NOT NULL DEFAULT '',
                        time_created TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
                        time_updated TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
                    )",
                    role.table()
                ),
                [],
            )
            .map_err(|e| StoreError::Schema(format!("cannot create table {}: {e}", role.table())))?;
        Ok(())
    }

    fn verify_table(&self, role: Role) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", role.table()))?;
        let present = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let missing: Vec<&str> = COLUMNS
            .iter()
            .copied()
            .filter(|c| !present.iter().any(|p| p == c))
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::Schema(format!(
                "existing table {} is missing columns: {}",
                role.table(),
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Check if the table for a role exists
    pub fn table_exists(&self, role: Role) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [role.table()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ==================== Person Operations ====================

    /// Insert all records in one transaction, in order
    pub fn insert_batch(&mut self, role: Role, people: &[NewPerson]) -> Result<Vec<Person>> {
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        let tx = self.conn.transaction()?;
        let mut inserted = Vec::with_capacity(people.len());
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (first_name, last_name, gender, time_created, time_updated)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                role.table()
            ))?;
            for person in people {
                let id = stmt.insert((
                    &person.first_name,
                    &person.last_name,
                    &person.gender,
                    &now_str,
                ))?;
                inserted.push(Person {
                    id,
                    first_name: person.first_name.clone(),
                    last_name: person.last_name.clone(),
                    gender: person.gender.clone(),
                    role,
                    timestamps: Timestamps {
                        time_created: now,
                        time_updated: now,
                    },
                });
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    pub fn get_person(&self, role: Role, id: i64) -> Result<Option<Person>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT id, first_name, last_name, gender, time_created, time_updated
                     FROM {} WHERE id = ?1",
                    role.table()
                ),
                [id],
                |row| person_from_row(row, role),
            )
            .optional()
            .map_err(|e| e.into())
    }

    pub fn get_all_people(&self, role: Role) -> Result<Vec<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, first_name, last_name, gender, time_created, time_updated
             FROM {}
             ORDER BY id",
            role.table()
        ))?;

        let people = stmt.query_map([], |row| person_from_row(row, role))?;
        people
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into())
    }

    pub fn count_people(&self, role: Role) -> Result<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", role.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Overwrite the human fields of a row and refresh `time_updated`
    pub fn update_person(
        &self,
        role: Role,
        id: i64,
        first_name: &str,
        last_name: &str,
        gender: &str,
    ) -> Result<Option<Person>> {
        let now = Utc::now().to_rfc3339();

        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET first_name = ?1, last_name = ?2, gender = ?3, time_updated = ?4
                 WHERE id = ?5",
                role.table()
            ),
            (first_name, last_name, gender, &now, id),
        )?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_person(role, id)
    }
}

// ==================== Row Parsers ====================

fn person_from_row(row: &Row, role: Role) -> std::result::Result<Person, rusqlite::Error> {
    Ok(Person {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        gender: row.get(3)?,
        role,
        timestamps: Timestamps {
            time_created: parse_datetime(4, row.get(4)?)?,
            time_updated: parse_datetime(5, row.get(5)?)?,
        },
    })
}

fn parse_datetime(idx: usize, s: String) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Column defaults and hand-edited rows may lack an offset; assume UTC
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Ok(DateTime::from_naive_utc_and_offset(ndt, Utc));
        }
    }
    Err(rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Cannot parse datetime: {s}"),
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample() -> Vec<NewPerson> {
        vec![
            NewPerson::new("Joe", "Smith", "Male"),
            NewPerson::new("Jill", "Williams", "Female"),
        ]
    }

    #[test]
    fn test_create_database() {
        let temp = NamedTempFile::new().unwrap();
        let db = Database::open(temp.path()).unwrap();
        assert!(!db.table_exists(Role::Employee).unwrap());

        db.init().unwrap();
        assert!(db.table_exists(Role::Employee).unwrap());
        assert!(db.table_exists(Role::Manager).unwrap());
    }

    #[test]
    fn test_insert_batch_assigns_ids_in_order() {
        let mut db = Database::open_in_memory().unwrap();
        db.init().unwrap();

        let people = db.insert_batch(Role::Employee, &sample()).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0].id + 1, people[1].id);
        assert_eq!(people[0].first_name, "Joe");

        let stored = db.get_all_people(Role::Employee).unwrap();
        assert_eq!(stored, people);
    }

    #[test]
    fn test_get_person_missing() {
        let db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        assert!(db.get_person(Role::Manager, 42).unwrap().is_none());
    }

    #[test]
    fn test_update_person() {
        let mut db = Database::open_in_memory().unwrap();
        db.init().unwrap();
        let joe = db.insert_batch(Role::Employee, &sample()).unwrap().remove(0);

        let updated = db
            .update_person(Role::Employee, joe.id, "Joseph", "Smith", "Male")
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, joe.id);
        assert_eq!(updated.first_name, "Joseph");
        assert_eq!(updated.timestamps.time_created, joe.timestamps.time_created);
        assert!(updated.timestamps.time_updated >= joe.timestamps.time_updated);

        assert!(
            db.update_person(Role::Employee, 999, "A", "B", "")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_incompatible_table_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "CREATE TABLE employee (id INTEGER PRIMARY KEY, first_name TEXT, last_name TEXT)",
                [],
            )
            .unwrap();

        let err = db.init().unwrap_err();
        assert!(matches!(err, StoreError::Schema(ref msg) if msg.contains("gender")));
    }

    #[test]
    fn test_parse_default_timestamp_format() {
        let dt = parse_datetime(0, "2024-03-01 12:30:00".to_string()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:00+00:00");
        assert!(parse_datetime(0, "yesterday".to_string()).is_err());
    }
}

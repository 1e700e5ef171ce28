use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_GENDER_LEN: usize = 32;

/// Which table a person lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Employee, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// Columns shared by every table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub time_created: DateTime<Utc>,
    pub time_updated: DateTime<Utc>,
}

/// A persisted person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub role: Role,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Person {
    /// `<first> <last>`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {} {}>", self.role, self.first_name, self.last_name)
    }
}

/// New person input, not yet persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
}

impl NewPerson {
    pub fn new(first_name: &str, last_name: &str, gender: &str) -> Self {
        NewPerson {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: gender.to_string(),
        }
    }
}

/// Person update input
#[derive(Debug, Clone, Default)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
}

impl PersonUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.gender.is_none()
    }
}

/// Built-in sample rows for a role
pub fn sample_people(role: Role) -> Vec<NewPerson> {
    match role {
        Role::Employee => vec![
            NewPerson::new("Joe", "Smith", "Male"),
            NewPerson::new("Jill", "Williams", "Female"),
            NewPerson::new("John", "Doe", "Male"),
        ],
        Role::Manager => vec![
            NewPerson::new("Billy", "Bob", "Male"),
            NewPerson::new("Jamie", "Jules", "Female"),
            NewPerson::new("Leila", "Lulips", "Male"),
        ],
    }
}

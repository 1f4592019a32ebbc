use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::{Identity, Timestamp};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub(crate) fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

record_id!(
    /// Identifier of an education history entry.
    EducationId
);
record_id!(
    /// Identifier of a work history entry.
    WorkId
);
record_id!(
    /// Identifier of a registered company.
    CompanyId
);
record_id!(
    /// Identifier of a job post.
    JobId
);
record_id!(
    /// Identifier of a submitted job application.
    ApplicationId
);

/// Job seeker profile, keyed by the identity that registered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Identity,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationHistory {
    pub id: EducationId,
    pub user_id: Identity,
    pub education_level: String,
    pub institution: String,
    pub field_of_study: String,
    pub year_of_entry: u32,
    pub year_of_graduation: u32,
    pub gpa: f64,
    pub description: String,
    pub created_at: Timestamp,
}

impl EducationHistory {
    /// Overwrite every caller-mutable field; id, owner and creation time stay put.
    pub(crate) fn apply(&mut self, payload: EducationHistoryPayload) {
        self.education_level = payload.education_level;
        self.institution = payload.institution;
        self.field_of_study = payload.field_of_study;
        self.year_of_entry = payload.year_of_entry;
        self.year_of_graduation = payload.year_of_graduation;
        self.gpa = payload.gpa;
        self.description = payload.description;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHistory {
    pub id: WorkId,
    pub user_id: Identity,
    pub company_name: String,
    pub position: String,
    pub year_started: u32,
    pub year_ended: u32,
    pub salary: String,
    pub description: String,
    pub created_at: Timestamp,
}

impl WorkHistory {
    /// Overwrite every caller-mutable field; id, owner and creation time stay put.
    pub(crate) fn apply(&mut self, payload: WorkHistoryPayload) {
        self.company_name = payload.company_name;
        self.position = payload.position;
        self.year_started = payload.year_started;
        self.year_ended = payload.year_ended;
        self.salary = payload.salary;
        self.description = payload.description;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub admin: Identity,
    pub created_at: Timestamp,
}

impl Company {
    /// Merge provided fields. `admin`, `id` and `created_at` are not caller-mutable.
    pub(crate) fn apply(&mut self, changes: CompanyChanges) {
        let CompanyChanges {
            name,
            email,
            phone,
            address,
            description,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

/// Whether a job post still accepts applications. Closing is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Open,
    Closed,
}

impl PostStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PostStatus::Open => "open",
            PostStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub position: String,
    pub requirements: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub post_owner: Identity,
    pub post_status: PostStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.post_status == PostStatus::Open
    }

    /// Merge provided fields. Owner, company binding, status and timestamps are system-owned.
    pub(crate) fn apply(&mut self, changes: JobChanges) {
        let JobChanges {
            position,
            requirements,
            location,
            salary,
            description,
        } = changes;
        if let Some(position) = position {
            self.position = position;
        }
        if let Some(requirements) = requirements {
            self.requirements = requirements;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(salary) = salary {
            self.salary = salary;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub user_id: Identity,
    pub cover_letter: String,
    pub resume: String,
    #[serde(default)]
    pub portfolio: Option<String>,
    pub application_date: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationHistoryPayload {
    pub education_level: String,
    pub institution: String,
    pub field_of_study: String,
    pub year_of_entry: u32,
    pub year_of_graduation: u32,
    pub gpa: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHistoryPayload {
    pub company_name: String,
    pub position: String,
    pub year_started: u32,
    pub year_ended: u32,
    pub salary: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub description: String,
}

/// Partial company update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPayload {
    /// Company to post under. When omitted the caller's first administered company is used.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    pub position: String,
    pub requirements: String,
    pub location: String,
    pub salary: String,
    pub description: String,
}

/// Partial job update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobChanges {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplicationPayload {
    pub job_id: JobId,
    pub cover_letter: String,
    pub resume: String,
    #[serde(default)]
    pub portfolio: Option<String>,
}

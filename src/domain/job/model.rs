//! Job domain entity

use chrono::{DateTime, Utc};

/// Hiring company embedded in every job posting
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// Job posting
#[derive(Debug, Clone)]
pub struct Job {
    pub id: String,
    pub title: String,
    /// Employment type, e.g. "Full-Time"
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<f64>,
    pub company: Company,
    /// Creating user, set only when the job was posted by an authenticated user
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Ownerless jobs may be modified by anyone allowed to mutate jobs.
    pub fn can_be_modified_by(&self, user_id: &str) -> bool {
        match &self.owner_id {
            Some(owner) => owner == user_id,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(owner_id: Option<&str>) -> Job {
        let now = Utc::now();
        Job {
            id: "65f1c2a9e4b0a1b2c3d4e5f6".into(),
            title: "Software Engineer".into(),
            job_type: None,
            description: None,
            location: None,
            salary: None,
            company: Company {
                name: "Tech Corp".into(),
                contact_email: None,
                contact_phone: None,
            },
            owner_id: owner_id.map(String::from),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owned_job_is_only_modifiable_by_owner() {
        let j = job(Some("owner"));
        assert!(j.can_be_modified_by("owner"));
        assert!(!j.can_be_modified_by("someone-else"));
    }

    #[test]
    fn ownerless_job_is_modifiable_by_anyone() {
        assert!(job(None).can_be_modified_by("anyone"));
    }
}

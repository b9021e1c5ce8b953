//! Job DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::JobDraft;
use crate::domain::{Company, Job, UpdateJobDto};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CompanyDto {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(rename = "contactEmail", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 254))]
    pub contact_email: Option<String>,
    #[serde(rename = "contactPhone", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32))]
    pub contact_phone: Option<String>,
}

impl From<CompanyDto> for Company {
    fn from(c: CompanyDto) -> Self {
        Self {
            name: c.name.unwrap_or_default(),
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
        }
    }
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self {
            name: Some(c.name),
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
        }
    }
}

/// Body of `POST /api/jobs`; `title` and `company.name` are required.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateJobRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = 50))]
    pub job_type: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(range(min = 0.0))]
    pub salary: Option<f64>,
    #[validate(nested)]
    pub company: Option<CompanyDto>,
}

impl From<CreateJobRequest> for JobDraft {
    fn from(r: CreateJobRequest) -> Self {
        Self {
            title: r.title,
            job_type: r.job_type,
            description: r.description,
            location: r.location,
            salary: r.salary,
            company: r.company.map(Company::from),
        }
    }
}

/// Body of `PUT /api/jobs/{id}`; absent fields are left unchanged and
/// `company`, when sent, replaces the stored company.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateJobRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = 50))]
    pub job_type: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(range(min = 0.0))]
    pub salary: Option<f64>,
    #[validate(nested)]
    pub company: Option<CompanyDto>,
}

impl From<UpdateJobRequest> for UpdateJobDto {
    fn from(r: UpdateJobRequest) -> Self {
        Self {
            title: r.title,
            job_type: r.job_type,
            description: r.description,
            location: r.location,
            salary: r.salary,
            company: r.company.map(Company::from),
        }
    }
}

/// Job API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub company: CompanyDto,
    /// Creator, present for jobs posted by an authenticated user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobDto {
    fn from(j: Job) -> Self {
        Self {
            id: j.id,
            title: j.title,
            job_type: j.job_type,
            description: j.description,
            location: j.location,
            salary: j.salary,
            company: j.company.into(),
            user_id: j.owner_id,
            created_at: j.created_at,
            updated_at: j.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_serializes_with_document_keys() {
        let now = Utc::now();
        let dto = JobDto::from(Job {
            id: "65f1c2a9e4b0a1b2c3d4e5f6".into(),
            title: "Software Engineer".into(),
            job_type: Some("Full-Time".into()),
            description: None,
            location: None,
            salary: Some(100000.0),
            company: Company {
                name: "Tech Corp".into(),
                contact_email: Some("hr@techcorp.com".into()),
                contact_phone: None,
            },
            owner_id: None,
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["_id"], "65f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(json["type"], "Full-Time");
        assert_eq!(json["company"]["contactEmail"], "hr@techcorp.com");
        assert!(json.get("description").is_none());
        assert!(json.get("user_id").is_none());
        assert!(json["company"].get("contactPhone").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn negative_salary_fails_validation() {
        let request: CreateJobRequest =
            serde_json::from_str(r#"{"title": "x", "salary": -1, "company": {"name": "c"}}"#)
                .unwrap();
        assert!(request.validate().is_err());
    }
}

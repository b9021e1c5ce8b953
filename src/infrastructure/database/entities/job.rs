//! `jobs` collection document

use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

use super::from_bson_datetime;
use crate::domain::{Company, CreateJobDto, DomainError, DomainResult, Job, UpdateJobDto};

pub const COLLECTION: &str = "jobs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEntity {
    pub name: String,
    #[serde(rename = "contactEmail", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(rename = "contactPhone", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEntity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub company: CompanyEntity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ObjectId>,
    #[serde(rename = "createdAt")]
    pub created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: BsonDateTime,
}

impl From<Company> for CompanyEntity {
    fn from(c: Company) -> Self {
        Self {
            name: c.name,
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
        }
    }
}

impl From<CompanyEntity> for Company {
    fn from(c: CompanyEntity) -> Self {
        Self {
            name: c.name,
            contact_email: c.contact_email,
            contact_phone: c.contact_phone,
        }
    }
}

impl JobEntity {
    pub fn from_create_dto(dto: CreateJobDto) -> DomainResult<Self> {
        let user_id = dto
            .owner_id
            .as_deref()
            .map(ObjectId::parse_str)
            .transpose()
            .map_err(|e| DomainError::Internal(format!("Invalid owner id: {}", e)))?;

        let now = BsonDateTime::now();
        Ok(Self {
            id: ObjectId::new(),
            title: dto.title,
            job_type: dto.job_type,
            description: dto.description,
            location: dto.location,
            salary: dto.salary,
            company: dto.company.into(),
            user_id,
            created_at: now,
            updated_at: now,
        })
    }
}

impl From<JobEntity> for Job {
    fn from(e: JobEntity) -> Self {
        Self {
            id: e.id.to_hex(),
            title: e.title,
            job_type: e.job_type,
            description: e.description,
            location: e.location,
            salary: e.salary,
            company: e.company.into(),
            owner_id: e.user_id.map(|id| id.to_hex()),
            created_at: from_bson_datetime(e.created_at),
            updated_at: from_bson_datetime(e.updated_at),
        }
    }
}

/// Builds the `$set` update for a partial job update.
pub fn update_document(dto: UpdateJobDto) -> DomainResult<Document> {
    let mut set = doc! { "updatedAt": BsonDateTime::now() };

    if let Some(title) = dto.title {
        set.insert("title", title);
    }
    if let Some(job_type) = dto.job_type {
        set.insert("type", job_type);
    }
    if let Some(description) = dto.description {
        set.insert("description", description);
    }
    if let Some(location) = dto.location {
        set.insert("location", location);
    }
    if let Some(salary) = dto.salary {
        set.insert("salary", salary);
    }
    if let Some(company) = dto.company {
        let company = mongodb::bson::to_document(&CompanyEntity::from(company))
            .map_err(|e| DomainError::Internal(format!("Serialization error: {}", e)))?;
        set.insert("company", company);
    }

    Ok(doc! { "$set": set })
}

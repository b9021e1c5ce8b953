//! In-memory storage implementation
//!
//! Used for development without a MongoDB server and throughout the test
//! suite. Ids are generated in ObjectId form so both backends look alike to
//! HTTP clients.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mongodb::bson::oid::ObjectId;

use crate::domain::{
    CreateJobDto, CreateUserDto, DomainError, DomainResult, Job, JobRepository,
    RepositoryProvider, UpdateJobDto, User, UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
    /// email -> user id; the entry API makes the uniqueness check atomic
    emails: DashMap<String, String>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let id = ObjectId::new().to_hex();

        match self.emails.entry(dto.email.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict("User already exists".to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
            }
        }

        let now = Utc::now();
        let user = User {
            id: id.clone(),
            name: dto.name,
            email: dto.email,
            password_hash: dto.password_hash,
            phone_number: dto.phone_number,
            gender: dto.gender,
            date_of_birth: dto.date_of_birth,
            membership_status: dto.membership_status,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|r| r.value().clone()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|r| r.value().clone()))
    }
}

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<String, Job>,
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn list(&self) -> DomainResult<Vec<Job>> {
        let mut jobs: Vec<Job> = self.jobs.iter().map(|r| r.value().clone()).collect();
        // ObjectId hex sorts by creation time, matching the `_id` order of the Mongo store
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(jobs)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Job>> {
        Ok(self.jobs.get(id).map(|r| r.value().clone()))
    }

    async fn create(&self, dto: CreateJobDto) -> DomainResult<Job> {
        let now = Utc::now();
        let job = Job {
            id: ObjectId::new().to_hex(),
            title: dto.title,
            job_type: dto.job_type,
            description: dto.description,
            location: dto.location,
            salary: dto.salary,
            company: dto.company,
            owner_id: dto.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn update(&self, id: &str, dto: UpdateJobDto) -> DomainResult<Option<Job>> {
        let Some(mut entry) = self.jobs.get_mut(id) else {
            return Ok(None);
        };

        let job = entry.value_mut();
        dto.apply_to(job);
        job.updated_at = Utc::now();

        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        Ok(self.jobs.remove(id).is_some())
    }
}

/// In-memory counterpart of the MongoDB repository provider
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    jobs: InMemoryJobRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn jobs(&self) -> &dyn JobRepository {
        &self.jobs
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::Company;

    fn user_dto(email: &str) -> CreateUserDto {
        CreateUserDto {
            name: "John Doe".into(),
            email: email.into(),
            password_hash: "$2b$04$hash".into(),
            phone_number: "1234567890".into(),
            gender: "Male".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            membership_status: "Active".into(),
        }
    }

    fn job_dto(title: &str) -> CreateJobDto {
        CreateJobDto {
            title: title.into(),
            job_type: Some("Full-Time".into()),
            description: None,
            location: Some("New York".into()),
            salary: Some(100000.0),
            company: Company {
                name: "Tech Corp".into(),
                contact_email: Some("hr@techcorp.com".into()),
                contact_phone: None,
            },
            owner_id: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepository::default();
        let user = repo.create(user_dto("john@example.com")).await.unwrap();

        let err = repo.create(user_dto("john@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let found = repo.find_by_email("john@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo.find_by_id(&user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn jobs_are_listed_in_insertion_order() {
        let repo = InMemoryJobRepository::default();
        let first = repo.create(job_dto("first")).await.unwrap();
        let second = repo.create(job_dto("second")).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_merges_and_delete_removes() {
        let repo = InMemoryJobRepository::default();
        let job = repo.create(job_dto("Engineer")).await.unwrap();

        let patch = UpdateJobDto {
            salary: Some(120000.0),
            ..Default::default()
        };
        let updated = repo.update(&job.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.salary, Some(120000.0));
        assert_eq!(updated.title, "Engineer");
        assert!(updated.updated_at >= job.updated_at);

        assert!(repo.delete(&job.id).await.unwrap());
        assert!(!repo.delete(&job.id).await.unwrap());
        assert!(repo.find_by_id(&job.id).await.unwrap().is_none());
    }
}

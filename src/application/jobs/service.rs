//! Job posting service
//!
//! Owns the id-shape checks, required-field rules and the ownership policy
//! for job mutations.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Company, CreateJobDto, DomainError, DomainResult, Job, RepositoryProvider, UpdateJobDto,
};
use crate::shared::validations::{canonical_object_id, is_blank};

/// Job creation payload before required-field checks
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<f64>,
    pub company: Option<Company>,
}

pub struct JobService {
    repos: Arc<dyn RepositoryProvider>,
    enforce_ownership: bool,
}

impl JobService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, enforce_ownership: bool) -> Self {
        Self {
            repos,
            enforce_ownership,
        }
    }

    pub async fn list(&self) -> DomainResult<Vec<Job>> {
        self.repos.jobs().list().await
    }

    /// Malformed ids are reported as not found.
    pub async fn get(&self, id: &str) -> DomainResult<Job> {
        let Some(key) = canonical_object_id(id) else {
            return Err(DomainError::job_not_found(id));
        };

        self.repos
            .jobs()
            .find_by_id(&key)
            .await?
            .ok_or_else(|| DomainError::job_not_found(id))
    }

    /// Create a job; `owner` is stamped onto the record when present.
    pub async fn create(&self, draft: JobDraft, owner: Option<&str>) -> DomainResult<Job> {
        let title = draft.title.filter(|t| !is_blank(Some(t.as_str())));
        let company = draft.company.filter(|c| !is_blank(Some(c.name.as_str())));

        let (Some(title), Some(company)) = (title, company) else {
            return Err(DomainError::Validation(
                "Title and company.name are required".into(),
            ));
        };

        let job = self
            .repos
            .jobs()
            .create(CreateJobDto {
                title,
                job_type: draft.job_type,
                description: draft.description,
                location: draft.location,
                salary: draft.salary,
                company,
                owner_id: owner.map(String::from),
            })
            .await?;

        metrics::counter!("jobs_created_total").increment(1);
        info!(job_id = %job.id, owner_id = ?job.owner_id, "Job created");

        Ok(job)
    }

    /// Partially update a job on behalf of `actor` (`None` in the open variant).
    pub async fn update(
        &self,
        id: &str,
        patch: UpdateJobDto,
        actor: Option<&str>,
    ) -> DomainResult<Job> {
        let key = Self::mutation_key(id)?;

        let title_cleared = patch.title.as_deref().is_some_and(|t| t.trim().is_empty());
        let company_unnamed = patch
            .company
            .as_ref()
            .is_some_and(|c| c.name.trim().is_empty());
        if title_cleared || company_unnamed {
            return Err(DomainError::Validation("Invalid job data".into()));
        }

        self.authorize_mutation(&key, actor).await?;

        let job = self
            .repos
            .jobs()
            .update(&key, patch)
            .await?
            .ok_or_else(|| DomainError::job_not_found(id))?;

        info!(job_id = %job.id, "Job updated");
        Ok(job)
    }

    pub async fn delete(&self, id: &str, actor: Option<&str>) -> DomainResult<()> {
        let key = Self::mutation_key(id)?;
        self.authorize_mutation(&key, actor).await?;

        if !self.repos.jobs().delete(&key).await? {
            return Err(DomainError::job_not_found(id));
        }

        info!(job_id = %id, "Job deleted");
        Ok(())
    }

    /// Mutations answer a malformed id with a client error rather than a 404.
    fn mutation_key(id: &str) -> DomainResult<String> {
        canonical_object_id(id).ok_or_else(|| DomainError::Validation("Job not found".into()))
    }

    async fn authorize_mutation(&self, id: &str, actor: Option<&str>) -> DomainResult<()> {
        let Some(actor) = actor.filter(|_| self.enforce_ownership) else {
            return Ok(());
        };

        let job = self
            .repos
            .jobs()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::job_not_found(id))?;

        if !job.can_be_modified_by(actor) {
            return Err(DomainError::Forbidden(
                "Not authorized to modify this job".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    const OWNER: &str = "65f1c2a9e4b0a1b2c3d4e5f6";
    const OTHER: &str = "65f1c2a9e4b0a1b2c3d4e5f7";

    fn service(enforce_ownership: bool) -> JobService {
        JobService::new(Arc::new(InMemoryRepositoryProvider::new()), enforce_ownership)
    }

    fn draft() -> JobDraft {
        JobDraft {
            title: Some("Software Engineer".into()),
            job_type: Some("Full-Time".into()),
            description: Some("Develop and maintain software applications.".into()),
            location: Some("New York".into()),
            salary: Some(100000.0),
            company: Some(Company {
                name: "Tech Corp".into(),
                contact_email: Some("hr@techcorp.com".into()),
                contact_phone: Some("123-456-7890".into()),
            }),
        }
    }

    #[tokio::test]
    async fn create_requires_title_and_company_name() {
        let svc = service(true);

        let mut no_title = draft();
        no_title.title = Some(String::new());
        let mut no_company = draft();
        no_company.company = None;

        for input in [no_title, no_company] {
            let err = svc.create(input, None).await.unwrap_err();
            assert_eq!(err.to_string(), "Title and company.name are required");
        }
    }

    #[tokio::test]
    async fn create_stamps_owner() {
        let svc = service(true);
        let job = svc.create(draft(), Some(OWNER)).await.unwrap();
        assert_eq!(job.owner_id.as_deref(), Some(OWNER));

        let fetched = svc.get(&job.id).await.unwrap();
        assert_eq!(fetched.title, "Software Engineer");
    }

    #[tokio::test]
    async fn malformed_ids() {
        let svc = service(true);

        assert!(matches!(
            svc.get("invalid-id").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.update("invalid-id", UpdateJobDto::default(), None).await,
            Err(DomainError::Validation(ref m)) if m == "Job not found"
        ));
        assert!(matches!(
            svc.delete("invalid-id", None).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn ids_are_case_insensitive() {
        let svc = service(true);
        let job = svc.create(draft(), Some(OWNER)).await.unwrap();
        let upper = job.id.to_uppercase();

        assert_eq!(svc.get(&upper).await.unwrap().id, job.id);

        let patch = UpdateJobDto {
            title: Some("Staff Engineer".into()),
            ..Default::default()
        };
        let updated = svc.update(&upper, patch, Some(OWNER)).await.unwrap();
        assert_eq!(updated.title, "Staff Engineer");

        svc.delete(&upper, Some(OWNER)).await.unwrap();
        assert!(matches!(svc.get(&job.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn empty_title_update_is_rejected() {
        let svc = service(true);
        let job = svc.create(draft(), None).await.unwrap();

        let patch = UpdateJobDto {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = svc.update(&job.id, patch, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid job data");
    }

    #[tokio::test]
    async fn ownership_is_enforced_on_mutations() {
        let svc = service(true);
        let job = svc.create(draft(), Some(OWNER)).await.unwrap();

        let patch = UpdateJobDto {
            title: Some("Senior Engineer".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update(&job.id, patch.clone(), Some(OTHER)).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            svc.delete(&job.id, Some(OTHER)).await,
            Err(DomainError::Forbidden(_))
        ));

        let updated = svc.update(&job.id, patch, Some(OWNER)).await.unwrap();
        assert_eq!(updated.title, "Senior Engineer");
        svc.delete(&job.id, Some(OWNER)).await.unwrap();
        assert!(matches!(svc.get(&job.id).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn ownership_can_be_disabled() {
        let svc = service(false);
        let job = svc.create(draft(), Some(OWNER)).await.unwrap();
        svc.delete(&job.id, Some(OTHER)).await.unwrap();
    }

    #[tokio::test]
    async fn missing_job_is_not_found() {
        let svc = service(true);
        assert!(matches!(
            svc.delete(OWNER, Some(OWNER)).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.update(OWNER, UpdateJobDto::default(), None).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}

use super::{Company, Job};

/// Partial update; `None` leaves the stored value untouched.
///
/// `company`, when present, replaces the embedded company as a whole.
#[derive(Debug, Clone, Default)]
pub struct UpdateJobDto {
    pub title: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<f64>,
    pub company: Option<Company>,
}

impl UpdateJobDto {
    /// Applies the patch in place. Used by stores without server-side `$set`.
    pub fn apply_to(self, job: &mut Job) {
        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(job_type) = self.job_type {
            job.job_type = Some(job_type);
        }
        if let Some(description) = self.description {
            job.description = Some(description);
        }
        if let Some(location) = self.location {
            job.location = Some(location);
        }
        if let Some(salary) = self.salary {
            job.salary = Some(salary);
        }
        if let Some(company) = self.company {
            job.company = company;
        }
    }
}

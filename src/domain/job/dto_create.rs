use super::Company;

#[derive(Debug, Clone)]
pub struct CreateJobDto {
    pub title: String,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<f64>,
    pub company: Company,
    pub owner_id: Option<String>,
}

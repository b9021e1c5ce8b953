use chrono::{DateTime, NaiveDate, Utc};

/// Registered account. `password_hash` never leaves the service layer.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub membership_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

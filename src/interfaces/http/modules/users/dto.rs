//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::SignupInput;
use crate::domain::User;

/// Signup request; presence and format rules are applied by the service in a fixed order.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 72))]
    pub password: Option<String>,
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    #[validate(length(max = 32))]
    pub gender: Option<String>,
    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
    #[validate(length(max = 32))]
    pub membership_status: Option<String>,
}

impl From<SignupRequest> for SignupInput {
    fn from(r: SignupRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            password: r.password,
            phone_number: r.phone_number,
            gender: r.gender,
            date_of_birth: r.date_of_birth,
            membership_status: r.membership_status,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by signup and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub email: String,
    /// HS256 JWT, valid for three days
    pub token: String,
}

/// Public profile of the authenticated user; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: DateTime<Utc>,
    pub membership_status: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone_number: u.phone_number,
            gender: u.gender,
            date_of_birth: u.date_of_birth.and_time(chrono::NaiveTime::default()).and_utc(),
            membership_status: u.membership_status,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

//! `users` collection document

use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::{date_from_bson, date_to_bson, from_bson_datetime};
use crate::domain::{CreateUserDto, User};

pub const COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: BsonDateTime,
    pub membership_status: String,
    #[serde(rename = "createdAt")]
    pub created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: BsonDateTime,
}

impl UserEntity {
    pub fn from_create_dto(dto: CreateUserDto) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: ObjectId::new(),
            name: dto.name,
            email: dto.email,
            password: dto.password_hash,
            phone_number: dto.phone_number,
            gender: dto.gender,
            date_of_birth: date_to_bson(dto.date_of_birth),
            membership_status: dto.membership_status,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: e.id.to_hex(),
            name: e.name,
            email: e.email,
            password_hash: e.password,
            phone_number: e.phone_number,
            gender: e.gender,
            date_of_birth: date_from_bson(e.date_of_birth),
            membership_status: e.membership_status,
            created_at: from_bson_datetime(e.created_at),
            updated_at: from_bson_datetime(e.updated_at),
        }
    }
}

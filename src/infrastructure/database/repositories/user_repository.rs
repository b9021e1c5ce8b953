use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::{Collection, Database};

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepository};
use crate::infrastructure::database::entities::user::{self, UserEntity};

/// MongoDB duplicate-key error code
const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(w)) if w.code == DUPLICATE_KEY
    )
}

pub struct MongoUserRepository {
    collection: Collection<UserEntity>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(user::COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let entity = UserEntity::from_create_dto(dto);

        // The unique index on `email` settles concurrent signups for the same address.
        self.collection.insert_one(&entity).await.map_err(|e| {
            if is_duplicate_key(&e) {
                DomainError::Conflict("User already exists".to_string())
            } else {
                DomainError::from(e)
            }
        })?;

        Ok(entity.into())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let entity = self.collection.find_one(doc! { "email": email }).await?;
        Ok(entity.map(User::from))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let entity = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(entity.map(User::from))
    }
}

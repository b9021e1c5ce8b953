use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::domain::{CreateJobDto, DomainResult, Job, JobRepository, UpdateJobDto};
use crate::infrastructure::database::entities::job::{self, update_document, JobEntity};

pub struct MongoJobRepository {
    collection: Collection<JobEntity>,
}

impl MongoJobRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(job::COLLECTION),
        }
    }
}

#[async_trait]
impl JobRepository for MongoJobRepository {
    async fn list(&self) -> DomainResult<Vec<Job>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let entities: Vec<JobEntity> = cursor.try_collect().await?;
        Ok(entities.into_iter().map(Job::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Job>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let entity = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(entity.map(Job::from))
    }

    async fn create(&self, dto: CreateJobDto) -> DomainResult<Job> {
        let entity = JobEntity::from_create_dto(dto)?;
        self.collection.insert_one(&entity).await?;
        Ok(entity.into())
    }

    async fn update(&self, id: &str, dto: UpdateJobDto) -> DomainResult<Option<Job>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, update_document(dto)?)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(Job::from))
    }

    async fn delete(&self, id: &str) -> DomainResult<bool> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }
}

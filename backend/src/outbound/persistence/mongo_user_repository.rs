//! MongoDB-backed `UserRepository` implementation.
//!
//! Every method issues exactly one driver call against the `users`
//! collection. Timeouts are applied by the calling service, not here.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, doc};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::{debug, info};

use super::models::{NAME_FIELD, USER_ID_FIELD, UserDocument};
use super::mongo_error_mapping::{map_document_error, map_insert_error, map_query_error};
use super::store::StoreError;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// User repository over a MongoDB collection handle.
///
/// The handle is cheap to clone and safe for concurrent use; one instance is
/// shared by every request.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Wrap an open collection handle.
    pub fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }

    /// Create the unique indexes lookups and the name check rely on.
    ///
    /// The unique index on `name` is what makes the create path safe against
    /// two concurrent requests for the same name.
    ///
    /// # Errors
    /// Returns [`StoreError::Index`] when the server rejects an index, for
    /// example because existing documents already violate uniqueness.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for field in [USER_ID_FIELD, NAME_FIELD] {
            let model = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection
                .create_index(model)
                .await
                .map_err(|e| StoreError::index(field, e.to_string()))?;
            debug!(field, "unique index ensured");
        }
        info!(collection = self.collection.name(), "user indexes ready");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    fn next_id(&self) -> Result<UserId, UserPersistenceError> {
        UserId::new(ObjectId::new().to_hex())
            .map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, UserPersistenceError> {
        let found = self
            .collection
            .find_one(doc! { USER_ID_FIELD: user_id })
            .await
            .map_err(|e| map_query_error(&e))?;
        found
            .map(User::try_from)
            .transpose()
            .map_err(|e| map_document_error(&e))
    }

    async fn count_by_name(&self, name: &str) -> Result<u64, UserPersistenceError> {
        self.collection
            .count_documents(doc! { NAME_FIELD: name })
            .await
            .map_err(|e| map_query_error(&e))
    }

    async fn insert(&self, user: &User) -> Result<UserId, UserPersistenceError> {
        let document = UserDocument::try_from(user).map_err(|e| map_document_error(&e))?;
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| map_insert_error(&e, user.name()))?;
        let inserted = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s,
            other => other.to_string(),
        };
        UserId::new(inserted).map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn delete_by_user_id(&self, user_id: &str) -> Result<u64, UserPersistenceError> {
        self.collection
            .delete_one(doc! { USER_ID_FIELD: user_id })
            .await
            .map(|result| result.deleted_count)
            .map_err(|e| map_query_error(&e))
    }
}

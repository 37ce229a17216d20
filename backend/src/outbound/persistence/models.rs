//! Stored document shape for user records.
//!
//! Documents keep the store-native `_id` (an `ObjectId`) next to `user_id`,
//! its hex string copy, which is the field lookups and deletes filter on.
//! Profile fields are flattened into the document root.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::{Profile, User, UserId, UserValidationError};

/// Field holding the queryable hex copy of `_id`.
pub const USER_ID_FIELD: &str = "user_id";
/// Field holding the unique user name.
pub const NAME_FIELD: &str = "name";

/// Document layout of the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Failures converting between domain users and stored documents.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentMappingError {
    #[error("user id `{id}` is not an ObjectId: {message}")]
    NotAnObjectId { id: String, message: String },
    #[error("stored user id is invalid: {0}")]
    InvalidUserId(#[from] UserValidationError),
}

impl TryFrom<&User> for UserDocument {
    type Error = DocumentMappingError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let id = ObjectId::parse_str(user.id().as_ref()).map_err(|err| {
            DocumentMappingError::NotAnObjectId {
                id: user.id().to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            id,
            user_id: id.to_hex(),
            name: user.name().to_owned(),
            profile: user.profile().clone(),
        })
    }
}

impl TryFrom<UserDocument> for User {
    type Error = DocumentMappingError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let UserDocument {
            id,
            user_id,
            name,
            profile,
        } = document;
        // Documents written before `user_id` existed fall back to `_id`.
        let user_id = if user_id.is_empty() {
            id.to_hex()
        } else {
            user_id
        };
        Ok(User::from_parts(UserId::new(user_id)?, name, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;
    use mongodb::bson::{Bson, doc, from_document, to_document};
    use rstest::{fixture, rstest};
    use serde_json::json;

    const HEX: &str = "65f1c0ffee0000000000beef";

    #[fixture]
    fn alice() -> User {
        let mut profile = Profile::new();
        profile.insert("gender".into(), json!("female"));
        profile.insert("age".into(), json!(36));
        NewUser::new("alice", profile).with_id(UserId::new(HEX).expect("valid id"))
    }

    #[rstest]
    fn document_stores_object_id_and_hex_copy(alice: User) {
        let document = UserDocument::try_from(&alice).expect("user maps to document");
        let stored = to_document(&document).expect("document serialises to BSON");

        assert_eq!(
            stored.get("_id"),
            Some(&Bson::ObjectId(ObjectId::parse_str(HEX).expect("valid hex")))
        );
        assert_eq!(stored.get_str(USER_ID_FIELD).expect("user_id stored"), HEX);
        assert_eq!(stored.get_str(NAME_FIELD).expect("name stored"), "alice");
        assert_eq!(stored.get_str("gender").expect("profile flattened"), "female");
    }

    #[rstest]
    fn stored_document_maps_back_to_user(alice: User) {
        let stored = doc! {
            "_id": ObjectId::parse_str(HEX).expect("valid hex"),
            "user_id": HEX,
            "name": "alice",
            "gender": "female",
            "age": 36_i64,
        };

        let document: UserDocument = from_document(stored).expect("document deserialises");
        let user = User::try_from(document).expect("document maps to user");

        assert_eq!(user, alice);
    }

    #[rstest]
    fn missing_user_id_falls_back_to_object_id() {
        let stored = doc! { "_id": ObjectId::parse_str(HEX).expect("valid hex"), "name": "legacy" };

        let document: UserDocument = from_document(stored).expect("document deserialises");
        let user = User::try_from(document).expect("document maps to user");

        assert_eq!(user.id().as_ref(), HEX);
    }

    #[rstest]
    fn non_object_id_users_cannot_be_stored() {
        let user = NewUser::new("mallory", Profile::new())
            .with_id(UserId::new("not-hex").expect("non-empty id"));

        let err = UserDocument::try_from(&user).expect_err("id is rejected");

        assert!(matches!(err, DocumentMappingError::NotAnObjectId { .. }));
    }
}

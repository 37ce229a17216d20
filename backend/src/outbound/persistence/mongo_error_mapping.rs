//! Shared mapping from MongoDB driver failures to user persistence errors.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use super::models::DocumentMappingError;
use crate::domain::ports::UserPersistenceError;

/// Server error code for unique index violations.
pub(super) const DUPLICATE_KEY_CODE: i32 = 11000;

pub(super) fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

pub(super) fn map_query_error(error: &MongoError) -> UserPersistenceError {
    UserPersistenceError::query(error.to_string())
}

/// Map an insert failure, turning unique index violations into
/// [`UserPersistenceError::Duplicate`] for `name`.
pub(super) fn map_insert_error(error: &MongoError, name: &str) -> UserPersistenceError {
    if is_duplicate_key(error) {
        UserPersistenceError::duplicate(name)
    } else {
        map_query_error(error)
    }
}

pub(super) fn map_document_error(error: &DocumentMappingError) -> UserPersistenceError {
    UserPersistenceError::query(error.to_string())
}

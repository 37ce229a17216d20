//! MongoDB persistence adapter for user records.
//!
//! - [`store`] opens the client and proves connectivity at startup.
//! - [`models`] defines the stored document layout.
//! - [`MongoUserRepository`] implements the domain `UserRepository` port.

mod mongo_error_mapping;
pub mod models;
mod mongo_user_repository;
pub mod store;

pub use models::{DocumentMappingError, UserDocument};
pub use mongo_user_repository::MongoUserRepository;
pub use store::{StoreConfig, StoreError, connect};

//! Domain primitives, ports, and use cases.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters, the ports those adapters implement, and the service
//! that runs each user record use case.
//!
//! Public surface:
//! - `User`, `NewUser`, `UserId`, `Profile`: the stored user record.
//! - `DomainError`, `ErrorCode`: transport-agnostic failures.
//! - `UserRecordsService`: fetch, create, and delete use cases.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_records;

pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::user::{NewUser, Profile, RESERVED_FIELDS, User, UserId, UserValidationError};
pub use self::user_records::{DEFAULT_OPERATION_TIMEOUT, UserRecordsService};

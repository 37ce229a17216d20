//! Outbound adapters implementing domain ports.
//!
//! The only driven dependency is the MongoDB record store under
//! [`persistence`].

pub mod persistence;

//! Postgres access for section offerings and faculty loads.
//!
//! Services load rows together with their associations in a fixed number of
//! batched queries, convert them to `models` records, and hand them to
//! `normalizer` for enrichment and validation.

pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use db::{DbConfig, create_connection};
pub use error::ServiceError;

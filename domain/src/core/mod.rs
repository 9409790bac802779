//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — generative-text models and their [`model::ModelTier`]
//! - [`topic::Topic`] — a validated topic to put before the Council
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod topic;

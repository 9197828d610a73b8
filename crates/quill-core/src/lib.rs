//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, publish/visibility rules, pagination, ports and the services that
//! orchestrate them.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod rules;
pub mod services;

pub use error::{DomainError, RepoError, ValidationErrors};

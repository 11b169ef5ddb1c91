//! ecoval - strict, deterministic validation contracts for the EcoTrack backend
//!
//! Pure data-shape validation for eight CRUD entities (users, goals,
//! eco-activities, resources, challenges, enrollments, notifications,
//! feedback). Each entity has four contracts: stored record, create input,
//! update input, search input. Input is untyped JSON; output is a typed
//! value with defaults applied and dates normalized to UTC, or a
//! [`ValidationError`] listing every violated field and rule.
//!
//! Validation is a pure, synchronous, stateless transformation: no I/O, no
//! shared state, safe to call from any number of threads.

pub mod entities;
pub mod error;
pub mod payload;
pub mod registry;
pub mod search;

pub use entities::*;
pub use error::{Rule, ValidationError, ValidationResult, Violation};
pub use registry::{validate_create, validate_record, validate_search, validate_update, Entity};
pub use search::{SearchInput, SortKey, SortOrder};

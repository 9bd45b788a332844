#![deny(missing_docs)]
#![doc = "Core error and expression-tree types for the SAR codec, the boundary between a symbolic proof engine and a flat-sequence neural policy."]

/// Expression-tree entities and the per-statement entity table.
pub mod entity;
/// Structured error types shared across SAR crates.
pub mod errors;
/// Logic statements and proof-state snapshots.
pub mod statement;

pub use entity::{Entity, EntityId, EntityTable, OpKind};
pub use errors::{ErrorInfo, SarError};
pub use statement::{ProofState, RelationKind, Statement};

#![deny(missing_docs)]
#![doc = "Mask generation, diff encoding and the action codec bridging symbolic proof states and flat policy token sequences."]

/// Action encode/decode against an objective statement.
pub mod action;
/// Insert/remove annotated diffs between formula strings.
pub mod diff;
/// Policy input-formula construction from proof states.
pub mod input;
/// Per-entity contextual mask generation.
pub mod mask;
/// Multi-pointer mask merging.
pub mod merge;

pub use action::{Action, ActionCodec, AxiomRef, EntityRef};
pub use diff::find_diff;
pub use input::{policy_input_formula, state_input_parts, Destination};
pub use mask::{generate_masks, MaskTable, DEFAULT_MASK_SYMBOL};
pub use merge::merge_masks;

//! Stateless data helpers.
//!
//! This crate is a small collection of pure utility functions:
//! - Runtime type tagging and deep cloning of dynamic values
//! - A cooperative timed wait
//! - Filename-to-category classification
//! - Path segment joining
//! - Token-substitution timestamp formatting
//! - Decimal-safe addition
//! - Tree transforms over parent/child shaped data: lookup, ancestor
//!   chains, filtering, flatten and rebuild
//!
//! Every helper is reentrant and side-effect free; the tree transforms are
//! copy-returning and never mutate their input.

pub mod date;
pub mod errors;
pub mod file;
pub mod math;
pub mod path;
pub mod tree;
pub mod util;
pub mod value;
pub mod wait;

pub use date::{format_timestamp, DateInput, DEFAULT_TEMPLATE};
pub use errors::{Error, Result};
pub use file::{classify_file, FileCategory};
pub use math::add_precise;
pub use path::join_path;
pub use tree::{
    ancestor_chain, build_tree, filter_by_field, find_node, flatten, parent_of, search_by_field,
    TreeFields,
};
pub use value::{classify, deep_clone, TypeTag, ValueKind};
pub use wait::wait;

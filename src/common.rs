//! Common building blocks shared by every operation.
//!
//! This module provides typed attribute values, their flattening into plain JSON
//! and the condition expressions used by write and query requests.

/// Condition expressions for conditional writes and query key conditions.
pub mod condition;

/// Typed attribute values and their flattening into plain JSON values.
pub mod value;

//! Read operations for retrieving data from DynamoDB tables.
//!
//! This module provides the query operation, which follows every page of the
//! response and flattens the items of all of them into one ordered collection.

/// Query operation for retrieving items with key conditions.
pub mod query;

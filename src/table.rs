//! Table operations.
//!
//! This module provides the create table chain:
//! - Declaring the hash and range keys of a table
//! - Provisioning its read and write capacity
//! - Adding global and local secondary indexes

/// Key schema, attribute definitions and index model shared by table operations.
pub mod common;

/// Create table operation.
pub mod create_table;

/// Secondary index sub-chains of the create table operation.
pub mod index;

#![deny(missing_docs)]
#![deny(warnings)]

//! # Fluent Dynamo
//!
//! A fluent request builder that validates Amazon DynamoDB requests before sending them.
//!
//! ## Overview
//!
//! This library lets a caller assemble a request through chained method calls and:
//! - Checks the assembled request against the structural rules of the protocol before any network call
//! - Reports the first broken rule as a structured [`ValidationError`]
//! - Hands transport failures back untouched
//! - Follows query pagination and flattens every item into plain JSON values
//!
//! Nothing happens until a chain is awaited, so a chain can be composed conditionally
//! and fired exactly once.
//!
//! ## Quick Example
//!
//! ```no_run
//! use fluent_dynamo::{FluentDynamo, SdkTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dynamo = FluentDynamo::new(SdkTransport::default())
//!     .with_endpoint("http://localhost:8000")
//!     .with_region("us-east-1")
//!     .with_access_key_id("access")
//!     .with_secret_access_key("secret");
//!
//! // {TableName: "Thread", Item: {ForumName: {S: "Amazon"}, Subject: {S: "DynamoDB"}}}
//! dynamo
//!     .put_item("Thread")
//!     .with_attribute("ForumName")
//!     .as_string("Amazon")
//!     .with_attribute("Subject")
//!     .as_string("DynamoDB")
//!     .await?;
//!
//! // every page, flattened: [{"ForumName": "Amazon", "Subject": "DynamoDB", ...}, ...]
//! let items = dynamo
//!     .query("Thread")
//!     .with_condition("ForumName")
//!     .is_equal_to_string("Amazon")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Typed values, flattening and condition expressions
//! - [`mod@table`] - Table operations (CreateTable) and secondary indexes
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)
//! - [`mod@read`] - Read operations (Query)
//! - [`mod@validation`] - The validators every operation runs before sending
//! - [`mod@transport`] - The seam requests are sent through

/// Entry point and connection settings of every request chain.
pub mod client;

/// Typed values, flattening and condition expressions.
pub mod common;

/// Failures of request chains.
pub mod error;

/// Read operations for retrieving data from DynamoDB tables.
pub mod read;

/// Table operations.
///
/// This module provides operations for:
/// - Creating tables with their key schema and throughput
/// - Declaring global and local secondary indexes
pub mod table;

/// The seam validated requests are sent through.
pub mod transport;

/// Validators every operation runs before sending.
pub mod validation;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating items with set and remove clauses
/// - Deleting items by key
pub mod write;

pub use client::{ConnectionOptions, FluentDynamo};
pub use error::Error;
pub use transport::{SdkTransport, Transport};
pub use validation::ValidationError;

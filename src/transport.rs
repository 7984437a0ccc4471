//! The seam between validated requests and the service.
//!
//! A [`Transport`] receives a request that already passed validation, in its
//! wire shape, together with the [`ConnectionOptions`] of the chain. Its error
//! type is opaque to the builders and reaches the caller unchanged.

/// Transport backed by the AWS SDK client.
mod sdk;

#[cfg(test)]
pub(crate) mod stub;

pub use sdk::SdkTransport;

use crate::{
    client::ConnectionOptions,
    read::query::QueryInput,
    table::create_table::CreateTableInput,
    write::{delete_item::DeleteItemInput, put_item::PutItemInput, update_item::UpdateItemInput},
};

use aws_sdk_dynamodb::operation;
use std::error;

/// Sends wire requests, one method per operation.
///
/// Implementations are expected to send each request once: no retry policy is
/// applied on top of them.
pub trait Transport {
    /// The error returned when a request fails.
    type Error: error::Error + Send + Sync + 'static;

    /// Creates a table.
    fn create_table(
        &self,
        options: &ConnectionOptions,
        input: CreateTableInput,
    ) -> impl Future<Output = Result<operation::create_table::CreateTableOutput, Self::Error>> + Send;

    /// Deletes an item.
    fn delete_item(
        &self,
        options: &ConnectionOptions,
        input: DeleteItemInput,
    ) -> impl Future<Output = Result<operation::delete_item::DeleteItemOutput, Self::Error>> + Send;

    /// Puts an item.
    fn put_item(
        &self,
        options: &ConnectionOptions,
        input: PutItemInput,
    ) -> impl Future<Output = Result<operation::put_item::PutItemOutput, Self::Error>> + Send;

    /// Fetches one page of a query.
    fn query(
        &self,
        options: &ConnectionOptions,
        input: QueryInput,
    ) -> impl Future<Output = Result<operation::query::QueryOutput, Self::Error>> + Send;

    /// Updates an item.
    fn update_item(
        &self,
        options: &ConnectionOptions,
        input: UpdateItemInput,
    ) -> impl Future<Output = Result<operation::update_item::UpdateItemOutput, Self::Error>> + Send;
}

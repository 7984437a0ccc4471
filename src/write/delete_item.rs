use crate::{
    client::ConnectionOptions,
    common::value::{self, AttributeValueBuilder, TypedValue},
    error::Error,
    transport::Transport,
    validation::{self, ValidationError},
};

use aws_sdk_dynamodb::{operation, types};
use indexmap::IndexMap;
use std::{collections, future::IntoFuture, pin::Pin};

/// delete item request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItemInput {
    /// The primary key of the item.
    pub key: collections::HashMap<String, types::AttributeValue>,
    /// The table name.
    pub table_name: String,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use fluent_dynamo::{FluentDynamo, SdkTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dynamo = FluentDynamo::new(SdkTransport::default())
///     .with_region("us-east-1")
///     .with_access_key_id("access")
///     .with_secret_access_key("secret");
/// dynamo
///     .delete_item("Thread")
///     .with_hash_key("ForumName")
///     .as_string("Amazon")
///     .with_range_key("Subject")
///     .as_string("DynamoDB")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeleteItem<'a, T> {
    key: IndexMap<String, TypedValue>,
    options: ConnectionOptions,
    table_name: String,
    transport: &'a T,
}

impl<'a, T: Transport> DeleteItem<'a, T> {
    pub(crate) fn new(transport: &'a T, options: ConnectionOptions, table_name: String) -> Self {
        Self {
            key: IndexMap::new(),
            options,
            table_name,
            transport,
        }
    }

    crate::connection_setters!();

    fn assign(&mut self, name: String, value: TypedValue) {
        self.key.insert(name, value);
    }

    /// Sets the hash key of the item.
    pub fn with_hash_key(self, name: impl Into<String>) -> AttributeValueBuilder<Self> {
        AttributeValueBuilder::new(self, name.into(), Self::assign)
    }

    /// Sets the range key of the item.
    pub fn with_range_key(self, name: impl Into<String>) -> AttributeValueBuilder<Self> {
        AttributeValueBuilder::new(self, name.into(), Self::assign)
    }

    /// Runs the validators: table name, connection, key attributes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::table_name_is_valid_length(&self.table_name)?;
        validation::connection_is_valid(&self.options)?;
        validation::attributes_are_valid(&self.key)
    }

    /// Execute the delete item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "fluent_dynamo.delete_item",
            skip_all,
            fields(table_name = %self.table_name),
            err
        )
    )]
    pub async fn send(self) -> Result<operation::delete_item::DeleteItemOutput, Error<T::Error>> {
        self.validate().map_err(validation::rejected)?;
        let input = DeleteItemInput {
            key: value::into_wire(self.key),
            table_name: self.table_name,
        };
        self.transport
            .delete_item(&self.options, input)
            .await
            .map_err(Error::Transport)
    }
}

impl<'a, T: Transport + Sync> IntoFuture for DeleteItem<'a, T> {
    type Output = Result<operation::delete_item::DeleteItemOutput, Error<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

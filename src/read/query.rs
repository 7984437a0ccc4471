use crate::{
    client::ConnectionOptions,
    common::{
        condition::{KeyCondition, KeyConditionBuilder, KeyConditionInput},
        value::{self, Item},
    },
    error::Error,
    transport::Transport,
    validation::{self, ValidationError},
};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::{collections, future::IntoFuture, pin::Pin};

/// query request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryInput {
    /// Whether reads are strongly consistent.
    pub consistent_read: bool,
    /// Where the page starts, the cursor of the previous page.
    pub exclusive_start_key: Option<collections::HashMap<String, types::AttributeValue>>,
    /// The index queried instead of the table.
    pub index_name: Option<String>,
    /// Conditions on the key attributes.
    pub key_conditions: collections::HashMap<String, KeyConditionInput>,
    /// The maximum number of items evaluated per page.
    pub limit: Option<i32>,
    /// The table name.
    pub table_name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct QueryRequest {
    consistent_read: bool,
    index_name: Option<String>,
    key_conditions: IndexMap<String, KeyCondition>,
    limit: Option<i64>,
    table_name: String,
}

impl From<QueryRequest> for QueryInput {
    fn from(request: QueryRequest) -> Self {
        Self {
            consistent_read: request.consistent_read,
            exclusive_start_key: None,
            index_name: request.index_name,
            key_conditions: request
                .key_conditions
                .into_iter()
                .map(|(name, condition)| (name, condition.into()))
                .collect(),
            limit: request.limit.and_then(|limit| i32::try_from(limit).ok()),
            table_name: request.table_name,
        }
    }
}

/// Query operation.
///
/// Awaiting the query fetches every page, one after the other, and resolves
/// with the flattened items of all of them in order.
///
/// ```rust,no_run
/// use fluent_dynamo::{FluentDynamo, SdkTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dynamo = FluentDynamo::new(SdkTransport::default())
///     .with_region("us-east-1")
///     .with_access_key_id("access")
///     .with_secret_access_key("secret");
/// let items = dynamo
///     .query("Thread")
///     .with_condition("ForumName")
///     .is_equal_to_string("Amazon")
///     .with_condition("Subject")
///     .begins_with("Dynamo")
///     .await?;
/// for item in items {
///     println!("{}", item["Subject"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Query<'a, T> {
    options: ConnectionOptions,
    request: QueryRequest,
    transport: &'a T,
}

impl<'a, T: Transport> Query<'a, T> {
    pub(crate) fn new(transport: &'a T, options: ConnectionOptions, table_name: String) -> Self {
        Self {
            options,
            request: QueryRequest {
                table_name,
                ..Default::default()
            },
            transport,
        }
    }

    crate::connection_setters!();

    fn assign(&mut self, name: String, condition: KeyCondition) {
        self.request.key_conditions.insert(name, condition);
    }

    /// Queries an index instead of the table.
    pub fn with_index(mut self, index_name: impl Into<String>) -> Self {
        self.request.index_name = Some(index_name.into());
        self
    }

    /// Reads with strong consistency.
    pub fn with_consistent_read(mut self) -> Self {
        self.request.consistent_read = true;
        self
    }

    /// Limits the number of items evaluated per page.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.request.limit = Some(limit);
        self
    }

    /// Adds a condition on a key attribute.
    pub fn with_condition(self, name: impl Into<String>) -> KeyConditionBuilder<Self> {
        KeyConditionBuilder::new(self, name.into(), Self::assign)
    }

    /// Runs the validators: table name, connection, key conditions, limit.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::table_name_is_valid_length(&self.request.table_name)?;
        validation::connection_is_valid(&self.options)?;
        validation::key_conditions_are_valid(&self.request.key_conditions)?;
        validation::limit_is_valid(self.request.limit)
    }

    /// Execute the query operation, following every page.
    ///
    /// A transport failure on any page fails the whole query; the items of the
    /// pages already fetched are dropped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "fluent_dynamo.query",
            skip_all,
            fields(table_name = %self.request.table_name),
            err
        )
    )]
    pub async fn send(self) -> Result<Vec<Item>, Error<T::Error>> {
        self.validate().map_err(validation::rejected)?;
        let mut input = QueryInput::from(self.request);
        let mut items = Vec::new();
        loop {
            let output = self
                .transport
                .query(&self.options, input.clone())
                .await
                .map_err(Error::Transport)?;
            let page = output.items.unwrap_or_default();
            #[cfg(feature = "tracing")]
            tracing::debug!(items = page.len(), "query page fetched");
            items.extend(page.into_iter().map(value::flatten_item));
            match output.last_evaluated_key {
                Some(cursor) if !cursor.is_empty() => input.exclusive_start_key = Some(cursor),
                _ => return Ok(items),
            }
        }
    }
}

impl<'a, T: Transport + Sync> IntoFuture for Query<'a, T> {
    type Output = Result<Vec<Item>, Error<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

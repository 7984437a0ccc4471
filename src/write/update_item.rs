use crate::{
    client::ConnectionOptions,
    common::{
        condition::{ConditionBuilder, ExpressionValues},
        value::{self, AttributeValueBuilder, Item, TypedValue},
    },
    error::Error,
    transport::Transport,
    validation::{self, ValidationError},
};

use aws_sdk_dynamodb::{operation, types};
use indexmap::IndexMap;
use std::{collections, future::IntoFuture, ops, pin::Pin};

/// Joins the clauses of one update action.
const CLAUSE_SEPARATOR: &str = ", ";

/// Joins the update actions.
const ACTION_SEPARATOR: &str = " ";

/// update expression action
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum UpdateAction {
    Remove,
    Set,
}

impl ops::Deref for UpdateAction {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Remove => "remove",
            Self::Set => "set",
        }
    }
}

/// update item request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItemInput {
    /// Clauses the existing item must satisfy, joined with `and`.
    pub condition_expression: Option<String>,
    /// Values of the `:vN` placeholders of both expressions.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// The primary key of the item.
    pub key: collections::HashMap<String, types::AttributeValue>,
    /// Which attributes the response carries.
    pub return_values: Option<types::ReturnValue>,
    /// The table name.
    pub table_name: String,
    /// The set and remove clauses.
    pub update_expression: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemRequest {
    actions: IndexMap<UpdateAction, Vec<String>>,
    expression: ExpressionValues,
    key: IndexMap<String, TypedValue>,
    return_values: Option<types::ReturnValue>,
    table_name: String,
}

impl UpdateItemRequest {
    fn update_expression(&self) -> Option<String> {
        if self.actions.is_empty() {
            return None;
        }
        let expression = self
            .actions
            .iter()
            .map(|(action, clauses)| format!("{} {}", &**action, clauses.join(CLAUSE_SEPARATOR)))
            .collect::<Vec<_>>()
            .join(ACTION_SEPARATOR);
        Some(expression)
    }
}

impl From<UpdateItemRequest> for UpdateItemInput {
    fn from(request: UpdateItemRequest) -> Self {
        let update_expression = request.update_expression();
        let (condition_expression, expression_attribute_values) = request.expression.into_wire();
        Self {
            condition_expression,
            expression_attribute_values,
            key: value::into_wire(request.key),
            return_values: request.return_values,
            table_name: request.table_name,
            update_expression,
        }
    }
}

/// Update item operation.
///
/// Set and remove clauses are grouped by action, in the order each action is
/// first used; set values and condition values share one placeholder counter.
///
/// ```rust,no_run
/// use fluent_dynamo::{FluentDynamo, SdkTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dynamo = FluentDynamo::new(SdkTransport::default())
///     .with_region("us-east-1")
///     .with_access_key_id("access")
///     .with_secret_access_key("secret");
/// // set LastPostedBy = :v0 remove Archived, if LastPostedBy = :v1
/// dynamo
///     .update_item("Thread")
///     .with_hash_key("ForumName")
///     .as_string("Amazon")
///     .with_range_key("Subject")
///     .as_string("DynamoDB")
///     .with_set_expression("LastPostedBy")
///     .as_string("alice@example.com")
///     .with_remove_expression("Archived")
///     .with_condition("LastPostedBy")
///     .is_equal_to_string("fred@example.com")
///     .with_all_new_return_values()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UpdateItem<'a, T> {
    options: ConnectionOptions,
    request: UpdateItemRequest,
    transport: &'a T,
}

macro_rules! return_values_setters {
    ($($(#[$meta:meta])* $name:ident => $return_value:ident,)*) => {
        $(
            $(#[$meta])*
            pub fn $name(self) -> Self {
                self.with_return_values(types::ReturnValue::$return_value)
            }
        )*
    };
}

impl<'a, T: Transport> UpdateItem<'a, T> {
    pub(crate) fn new(transport: &'a T, options: ConnectionOptions, table_name: String) -> Self {
        Self {
            options,
            request: UpdateItemRequest {
                table_name,
                ..Default::default()
            },
            transport,
        }
    }

    crate::connection_setters!();

    fn assign_key(&mut self, name: String, value: TypedValue) {
        self.request.key.insert(name, value);
    }

    fn assign_set(&mut self, name: String, value: TypedValue) {
        let placeholder = self.request.expression.bind(value);
        self.request
            .actions
            .entry(UpdateAction::Set)
            .or_default()
            .push(format!("{name} = {placeholder}"));
    }

    fn expression(&mut self) -> &mut ExpressionValues {
        &mut self.request.expression
    }

    /// Sets the hash key of the item.
    pub fn with_hash_key(self, name: impl Into<String>) -> AttributeValueBuilder<Self> {
        AttributeValueBuilder::new(self, name.into(), Self::assign_key)
    }

    /// Sets the range key of the item.
    pub fn with_range_key(self, name: impl Into<String>) -> AttributeValueBuilder<Self> {
        AttributeValueBuilder::new(self, name.into(), Self::assign_key)
    }

    /// Adds a `set name = value` clause.
    pub fn with_set_expression(self, name: impl Into<String>) -> AttributeValueBuilder<Self> {
        AttributeValueBuilder::new(self, name.into(), Self::assign_set)
    }

    /// Adds a `remove name` clause.
    pub fn with_remove_expression(mut self, name: impl Into<String>) -> Self {
        self.request
            .actions
            .entry(UpdateAction::Remove)
            .or_default()
            .push(name.into());
        self
    }

    /// Adds a condition the existing item must satisfy.
    pub fn with_condition(self, name: impl Into<String>) -> ConditionBuilder<Self> {
        ConditionBuilder::new(self, name.into(), Self::expression)
    }

    /// Sets which attributes the response carries.
    pub fn with_return_values(mut self, return_values: impl Into<types::ReturnValue>) -> Self {
        self.request.return_values = Some(return_values.into());
        self
    }

    return_values_setters! {
        /// The response carries no attributes.
        with_no_return_values => None,
        /// The response carries the item as it was before the update.
        with_all_old_return_values => AllOld,
        /// The response carries the updated attributes as they were before the update.
        with_updated_old_return_values => UpdatedOld,
        /// The response carries the item as it is after the update.
        with_all_new_return_values => AllNew,
        /// The response carries the updated attributes as they are after the update.
        with_updated_new_return_values => UpdatedNew,
    }

    /// Runs the validators: table name, connection, key attributes, expression values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::table_name_is_valid_length(&self.request.table_name)?;
        validation::connection_is_valid(&self.options)?;
        validation::attributes_are_valid(&self.request.key)?;
        validation::attributes_are_valid(&self.request.expression.values)
    }

    /// Execute the update item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "fluent_dynamo.update_item",
            skip_all,
            fields(table_name = %self.request.table_name),
            err
        )
    )]
    pub async fn send(self) -> Result<operation::update_item::UpdateItemOutput, Error<T::Error>> {
        self.validate().map_err(validation::rejected)?;
        self.transport
            .update_item(&self.options, self.request.into())
            .await
            .map_err(Error::Transport)
    }

    /// Execute the update item operation and flatten the returned attributes.
    ///
    /// A response without attributes flattens to an empty item.
    pub async fn send_attributes(self) -> Result<Item, Error<T::Error>> {
        let output = self.send().await?;
        Ok(value::flatten_item(output.attributes.unwrap_or_default()))
    }
}

impl<'a, T: Transport + Sync> IntoFuture for UpdateItem<'a, T> {
    type Output = Result<operation::update_item::UpdateItemOutput, Error<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

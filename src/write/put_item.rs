use crate::{
    client::ConnectionOptions,
    common::{
        condition::{ConditionBuilder, ExpressionValues},
        value::{self, AttributeValueBuilder, TypedValue},
    },
    error::Error,
    transport::Transport,
    validation::{self, ValidationError},
};

use aws_sdk_dynamodb::{operation, types};
use indexmap::IndexMap;
use std::{collections, future::IntoFuture, pin::Pin};

/// put item request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItemInput {
    /// Clauses the stored item must satisfy, joined with `and`.
    pub condition_expression: Option<String>,
    /// Values of the `:vN` placeholders.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// The item to store.
    pub item: collections::HashMap<String, types::AttributeValue>,
    /// The table name.
    pub table_name: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct PutItemRequest {
    expression: ExpressionValues,
    item: IndexMap<String, TypedValue>,
    table_name: String,
}

impl From<PutItemRequest> for PutItemInput {
    fn from(request: PutItemRequest) -> Self {
        let (condition_expression, expression_attribute_values) = request.expression.into_wire();
        Self {
            condition_expression,
            expression_attribute_values,
            item: value::into_wire(request.item),
            table_name: request.table_name,
        }
    }
}

/// Put item operation.
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
///     .put_item("Thread")
///     .with_attribute("ForumName")
///     .as_string("Amazon")
///     .with_attribute("PostCount")
///     .as_number(100)
///     .with_condition("ForumName")
///     .is_not_equal_to_string("Amazon")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PutItem<'a, T> {
    options: ConnectionOptions,
    request: PutItemRequest,
    transport: &'a T,
}

impl<'a, T: Transport> PutItem<'a, T> {
    pub(crate) fn new(transport: &'a T, options: ConnectionOptions, table_name: String) -> Self {
        Self {
            options,
            request: PutItemRequest {
                table_name,
                ..Default::default()
            },
            transport,
        }
    }

    crate::connection_setters!();

    fn assign(&mut self, name: String, value: TypedValue) {
        self.request.item.insert(name, value);
    }

    fn expression(&mut self) -> &mut ExpressionValues {
        &mut self.request.expression
    }

    /// Sets an attribute of the item; a later value for the same name replaces it.
    pub fn with_attribute(self, name: impl Into<String>) -> AttributeValueBuilder<Self> {
        AttributeValueBuilder::new(self, name.into(), Self::assign)
    }

    /// Adds a condition the existing item must satisfy.
    pub fn with_condition(self, name: impl Into<String>) -> ConditionBuilder<Self> {
        ConditionBuilder::new(self, name.into(), Self::expression)
    }

    /// Runs the validators: table name, connection, item attributes, condition values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::table_name_is_valid_length(&self.request.table_name)?;
        validation::connection_is_valid(&self.options)?;
        validation::attributes_are_valid(&self.request.item)?;
        validation::attributes_are_valid(&self.request.expression.values)
    }

    /// Execute the put item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "fluent_dynamo.put_item",
            skip_all,
            fields(table_name = %self.request.table_name),
            err
        )
    )]
    pub async fn send(self) -> Result<operation::put_item::PutItemOutput, Error<T::Error>> {
        self.validate().map_err(validation::rejected)?;
        self.transport
            .put_item(&self.options, self.request.into())
            .await
            .map_err(Error::Transport)
    }
}

impl<'a, T: Transport + Sync> IntoFuture for PutItem<'a, T> {
    type Output = Result<operation::put_item::PutItemOutput, Error<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        FluentDynamo,
        transport::stub::{Sent, StubError, StubTransport},
    };

    use rstest::rstest;

    fn dynamo(transport: StubTransport) -> FluentDynamo<StubTransport> {
        FluentDynamo::new(transport).with_options(StubTransport::options())
    }

    fn string(value: &str) -> types::AttributeValue {
        types::AttributeValue::S(value.to_string())
    }

    type Build = for<'a> fn(&'a FluentDynamo<StubTransport>) -> PutItem<'a, StubTransport>;

    fn staged(build: Build) -> PutItemInput {
        let dynamo = dynamo(StubTransport::default());
        build(&dynamo).request.into()
    }

    fn validated(build: Build) -> Result<(), ValidationError> {
        let dynamo = dynamo(StubTransport::default());
        build(&dynamo).validate()
    }

    fn thread_item(dynamo: &FluentDynamo<StubTransport>) -> PutItem<'_, StubTransport> {
        dynamo
            .put_item("Thread")
            .with_attribute("ForumName")
            .as_string("Amazon")
            .with_attribute("Subject")
            .as_string("DynamoDB")
    }

    #[rstest]
    #[case::attributes(
        staged(thread_item),
        PutItemInput {
            item: collections::HashMap::from([
                ("ForumName".to_string(), string("Amazon")),
                ("Subject".to_string(), string("DynamoDB")),
            ]),
            table_name: "Thread".to_string(),
            ..Default::default()
        }
    )]
    #[case::conditions(
        staged(|dynamo| thread_item(dynamo)
            .with_attribute("LastPostDateTime")
            .as_string("201303190422")
            .with_attribute("PostCount")
            .as_number(100)
            .with_condition("ForumName")
            .is_not_equal_to_string("Amazon")
            .with_condition("Subject")
            .is_not_equal_to_string("DynamoDB")),
        PutItemInput {
            condition_expression: Some("ForumName <> :v0 and Subject <> :v1".to_string()),
            expression_attribute_values: Some(collections::HashMap::from([
                (":v0".to_string(), string("Amazon")),
                (":v1".to_string(), string("DynamoDB")),
            ])),
            item: collections::HashMap::from([
                ("ForumName".to_string(), string("Amazon")),
                ("Subject".to_string(), string("DynamoDB")),
                ("LastPostDateTime".to_string(), string("201303190422")),
                ("PostCount".to_string(), types::AttributeValue::N("100".to_string())),
            ]),
            table_name: "Thread".to_string(),
        }
    )]
    #[case::replaced_attribute(
        staged(|dynamo| dynamo
            .put_item("Thread")
            .with_attribute("PostCount")
            .as_number(1)
            .with_attribute("PostCount")
            .as_type("N", 2)),
        PutItemInput {
            item: collections::HashMap::from([(
                "PostCount".to_string(),
                types::AttributeValue::N("2".to_string()),
            )]),
            table_name: "Thread".to_string(),
            ..Default::default()
        }
    )]
    fn test_put_item_request(#[case] request: PutItemInput, #[case] expected: PutItemInput) {
        assert_eq!(request, expected);
    }

    #[tokio::test]
    async fn test_put_item_sends_request() {
        let dynamo = dynamo(StubTransport::default());
        let output = thread_item(&dynamo).await.unwrap();
        assert_eq!(output, StubTransport::put_item_output());
        assert_eq!(
            dynamo.transport().sent(),
            vec![(StubTransport::options(), Sent::PutItem(staged(thread_item)))]
        );
    }

    #[tokio::test]
    async fn test_put_item_transport_failure() {
        let dynamo = dynamo(StubTransport::failing("failure"));
        let error = dynamo
            .put_item("Thread")
            .with_attribute("ForumName")
            .as_string("Amazon")
            .send()
            .await
            .unwrap_err();
        assert_eq!(error, Error::Transport(StubError("failure".to_string())));
    }

    #[rstest]
    #[case::short_name(
        validated(|dynamo| dynamo.put_item("ab").with_attribute("").as_string("Amazon")),
        ValidationError::TableNameInvalidLength
    )]
    #[case::attribute_name_null(
        validated(|dynamo| dynamo.put_item("Thread").with_attribute("").as_string("Amazon")),
        ValidationError::AttributeNameNull
    )]
    #[case::attribute_value_null(
        validated(|dynamo| dynamo
            .put_item("Thread")
            .with_attribute("ForumName")
            .as_type("S", Option::<String>::None)),
        ValidationError::AttributeValueNull
    )]
    #[case::attribute_invalid_type(
        validated(|dynamo| dynamo
            .put_item("Thread")
            .with_attribute("ForumName")
            .as_type("STRING", "Amazon")),
        ValidationError::AttributeInvalidType
    )]
    #[case::condition_invalid_type(
        validated(|dynamo| dynamo
            .put_item("Thread")
            .with_attribute("ForumName")
            .as_string("Amazon")
            .with_condition("PostCount")
            .is_greater_than("NUMBER", 10)),
        ValidationError::AttributeInvalidType
    )]
    fn test_put_item_validation(
        #[case] result: Result<(), ValidationError>,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(result, Err(expected));
    }

    #[tokio::test]
    async fn test_put_item_validates_region() {
        let dynamo = dynamo(StubTransport::default());
        let error = dynamo
            .put_item("Thread")
            .with_region("mars-north-1")
            .with_attribute("ForumName")
            .as_string("Amazon")
            .await
            .unwrap_err();
        assert_eq!(error.as_validation(), Some(&ValidationError::RegionInvalid));
        assert!(dynamo.transport().sent().is_empty());
    }
}

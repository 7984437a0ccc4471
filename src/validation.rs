//! Pre-dispatch validation.
//!
//! Every validator is a pure check over one facet of a request or of the
//! [`ConnectionOptions`]. A validator either passes or returns exactly one
//! [`ValidationError`]. Operations run their validators in a fixed order and
//! stop at the first failure, so the reported error for a request breaking
//! several rules is always the one checked first.

use crate::{
    client::ConnectionOptions,
    common::{condition::KeyCondition, value::TypedValue},
    table::common::{AttributeDefinition, KeySchemaEntry},
};

use aws_sdk_dynamodb::types;

/// Regions a request may be sent to.
pub const REGIONS: [&str; 9] = [
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "eu-west-1",
    "eu-central-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "sa-east-1",
];

/// Attribute types allowed for table and index keys.
pub const KEY_ATTRIBUTE_TYPES: [types::ScalarAttributeType; 3] = [
    types::ScalarAttributeType::B,
    types::ScalarAttributeType::N,
    types::ScalarAttributeType::S,
];

/// Comparison operators allowed in query key conditions.
pub const COMPARISON_OPERATORS: [types::ComparisonOperator; 13] = [
    types::ComparisonOperator::BeginsWith,
    types::ComparisonOperator::Between,
    types::ComparisonOperator::Contains,
    types::ComparisonOperator::Eq,
    types::ComparisonOperator::Ge,
    types::ComparisonOperator::Gt,
    types::ComparisonOperator::In,
    types::ComparisonOperator::Le,
    types::ComparisonOperator::Lt,
    types::ComparisonOperator::Ne,
    types::ComparisonOperator::NotContains,
    types::ComparisonOperator::NotNull,
    types::ComparisonOperator::Null,
];

const MIN_TABLE_NAME_LENGTH: usize = 3;
const MAX_TABLE_NAME_LENGTH: usize = 255;

/// A request that broke one of the structural rules of the protocol.
///
/// ```rust
/// use fluent_dynamo::ValidationError;
///
/// let error = ValidationError::TableNameInvalidLength;
/// assert_eq!(error.kind(), "input-validation");
/// assert_eq!(error.property(), "table-name");
/// assert_eq!(error.name(), "TableNameInvalidLengthError");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The table name is shorter than 3 or longer than 255 characters.
    #[error("The table name must be between 3 and 255 characters")]
    TableNameInvalidLength,
    /// The endpoint is not a URL.
    #[error("The specified endpoint is not a valid URL")]
    EndpointInvalid,
    /// The region is missing or outside [`REGIONS`].
    #[error("The specified region is not a valid region")]
    RegionInvalid,
    /// No access key id was given.
    #[error("The access key id cannot be null")]
    AccessKeyIdNull,
    /// No secret access key was given.
    #[error("The secret access key cannot be null")]
    SecretAccessKeyNull,
    /// The key schema has no hash key.
    #[error("A table must have exactly one hash key")]
    HashKeyUndefined,
    /// The key schema has more than one hash key.
    #[error("A table must have exactly one hash key")]
    MultipleHashKey,
    /// The hash key has an empty attribute name.
    #[error("The hash key cannot be null")]
    HashKeyNull,
    /// The hash key attribute is not typed S, N or B.
    #[error("The specified hash key type is not a valid type")]
    HashKeyInvalidType,
    /// The key schema has more than one range key.
    #[error("A table must have no more than one range key")]
    MultipleRangeKey,
    /// The range key has an empty attribute name.
    #[error("The range key cannot be null")]
    RangeKeyNull,
    /// The range key attribute is not typed S, N or B.
    #[error("The specified range key type is not a valid type")]
    RangeKeyInvalidType,
    /// No read capacity was given.
    #[error("The provisioned read capacity must be defined")]
    ReadCapacityUndefined,
    /// The read capacity is lower than one.
    #[error("The provisioned read capacity must be greater than zero")]
    ReadCapacityInvalid,
    /// No write capacity was given.
    #[error("The provisioned write capacity must be defined")]
    WriteCapacityUndefined,
    /// The write capacity is lower than one.
    #[error("The provisioned write capacity must be greater than zero")]
    WriteCapacityInvalid,
    /// An attribute has an empty name.
    #[error("The attribute name cannot be null")]
    AttributeNameNull,
    /// An attribute has no value.
    #[error("The attribute value cannot be null")]
    AttributeValueNull,
    /// An attribute value does not carry one of the supported types.
    #[error("The specified attribute type is not a valid type")]
    AttributeInvalidType,
    /// A key condition has an empty attribute name.
    #[error("The comparison attribute cannot be null")]
    ComparisonKeyNull,
    /// A key condition value is missing.
    #[error("The comparison value cannot be null")]
    ComparisonValueNull,
    /// A key condition value does not carry one of the supported types.
    #[error("The specified comparison value type is not a valid type")]
    ComparisonValueInvalidType,
    /// A key condition operator is outside [`COMPARISON_OPERATORS`].
    #[error("The specified comparison operator is not a valid operator")]
    ComparisonOperatorInvalid,
    /// The limit is not a positive 32-bit integer.
    #[error("The limit must be a positive integer")]
    LimitInvalid,
}

impl ValidationError {
    /// Error family shared by every validation failure.
    pub const KIND: &'static str = "input-validation";

    /// Error family, always [`ValidationError::KIND`].
    pub fn kind(&self) -> &'static str {
        Self::KIND
    }

    /// The request property that failed validation.
    pub fn property(&self) -> &'static str {
        match self {
            Self::TableNameInvalidLength => "table-name",
            Self::EndpointInvalid => "endpoint",
            Self::RegionInvalid => "region",
            Self::AccessKeyIdNull => "access-key-id",
            Self::SecretAccessKeyNull => "secret-access-key",
            Self::HashKeyUndefined
            | Self::MultipleHashKey
            | Self::HashKeyNull
            | Self::HashKeyInvalidType => "hash-key",
            Self::MultipleRangeKey | Self::RangeKeyNull | Self::RangeKeyInvalidType => "range-key",
            Self::ReadCapacityUndefined | Self::ReadCapacityInvalid => "read-capacity",
            Self::WriteCapacityUndefined | Self::WriteCapacityInvalid => "write-capacity",
            Self::AttributeNameNull | Self::AttributeValueNull | Self::AttributeInvalidType => {
                "attribute"
            }
            Self::ComparisonKeyNull
            | Self::ComparisonValueNull
            | Self::ComparisonValueInvalidType
            | Self::ComparisonOperatorInvalid => "comparison",
            Self::LimitInvalid => "limit",
        }
    }

    /// The stable name of the failure.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TableNameInvalidLength => "TableNameInvalidLengthError",
            Self::EndpointInvalid => "EndpointInvalidError",
            Self::RegionInvalid => "RegionInvalidError",
            Self::AccessKeyIdNull => "AccessKeyIdNullError",
            Self::SecretAccessKeyNull => "SecretAccessKeyNullError",
            Self::HashKeyUndefined => "HashKeyUndefinedError",
            Self::MultipleHashKey => "MultipleHashKeyError",
            Self::HashKeyNull => "HashKeyNullError",
            Self::HashKeyInvalidType => "HashKeyInvalidTypeError",
            Self::MultipleRangeKey => "MultipleRangeKeyError",
            Self::RangeKeyNull => "RangeKeyNullError",
            Self::RangeKeyInvalidType => "RangeKeyInvalidTypeError",
            Self::ReadCapacityUndefined => "ReadCapacityUndefinedError",
            Self::ReadCapacityInvalid => "ReadCapacityInvalidError",
            Self::WriteCapacityUndefined => "WriteCapacityUndefinedError",
            Self::WriteCapacityInvalid => "WriteCapacityInvalidError",
            Self::AttributeNameNull => "AttributeNameNullError",
            Self::AttributeValueNull => "AttributeValueNullError",
            Self::AttributeInvalidType => "AttributeInvalidTypeError",
            Self::ComparisonKeyNull => "ComparisonKeyNullError",
            Self::ComparisonValueNull => "ComparisonValueNullError",
            Self::ComparisonValueInvalidType => "ComparisonValueInvalidTypeError",
            Self::ComparisonOperatorInvalid => "ComparisonOperatorInvalidError",
            Self::LimitInvalid => "LimitInvalidError",
        }
    }

    /// The human readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn is_null(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Checks that the table name has between 3 and 255 characters.
pub fn table_name_is_valid_length(table_name: &str) -> Result<(), ValidationError> {
    let length = table_name.chars().count();
    if (MIN_TABLE_NAME_LENGTH..=MAX_TABLE_NAME_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::TableNameInvalidLength)
    }
}

/// Checks that the endpoint, when present, is an absolute URL with a host.
pub fn endpoint_is_valid(endpoint: Option<&str>) -> Result<(), ValidationError> {
    match endpoint {
        Some(endpoint) => match url::Url::parse(endpoint) {
            Ok(url) if url.has_host() => Ok(()),
            _ => Err(ValidationError::EndpointInvalid),
        },
        None => Ok(()),
    }
}

/// Checks that the region is one of [`REGIONS`].
pub fn region_is_valid(region: Option<&str>) -> Result<(), ValidationError> {
    match region {
        Some(region) if REGIONS.contains(&region) => Ok(()),
        _ => Err(ValidationError::RegionInvalid),
    }
}

/// Checks that an access key id is set.
pub fn access_key_id_is_not_null(access_key_id: Option<&str>) -> Result<(), ValidationError> {
    if is_null(access_key_id) {
        return Err(ValidationError::AccessKeyIdNull);
    }
    Ok(())
}

/// Checks that a secret access key is set.
pub fn secret_access_key_is_not_null(
    secret_access_key: Option<&str>,
) -> Result<(), ValidationError> {
    if is_null(secret_access_key) {
        return Err(ValidationError::SecretAccessKeyNull);
    }
    Ok(())
}

/// Runs the connection validators: endpoint, region, access key id, secret access key.
pub fn connection_is_valid(options: &ConnectionOptions) -> Result<(), ValidationError> {
    endpoint_is_valid(options.endpoint.as_deref())?;
    region_is_valid(options.region.as_deref())?;
    access_key_id_is_not_null(options.access_key_id.as_deref())?;
    secret_access_key_is_not_null(options.secret_access_key.as_deref())
}

fn is_key_attribute(attributes: &[AttributeDefinition], name: &str) -> bool {
    attributes
        .iter()
        .find(|attribute| attribute.attribute_name == name)
        .and_then(|attribute| attribute.attribute_type.as_ref())
        .is_some_and(|attribute_type| KEY_ATTRIBUTE_TYPES.contains(attribute_type))
}

/// Checks that the key schema has exactly one named hash key typed S, N or B.
pub fn hash_key_is_valid(
    key_schema: &[KeySchemaEntry],
    attributes: &[AttributeDefinition],
) -> Result<(), ValidationError> {
    let mut hash_keys = key_schema
        .iter()
        .filter(|key| key.key_type == types::KeyType::Hash);
    let key = hash_keys.next().ok_or(ValidationError::HashKeyUndefined)?;
    if hash_keys.next().is_some() {
        return Err(ValidationError::MultipleHashKey);
    }
    if key.attribute_name.is_empty() {
        return Err(ValidationError::HashKeyNull);
    }
    if !is_key_attribute(attributes, &key.attribute_name) {
        return Err(ValidationError::HashKeyInvalidType);
    }
    Ok(())
}

/// Checks that the key schema has at most one range key, named and typed S, N or B.
pub fn range_key_is_valid(
    key_schema: &[KeySchemaEntry],
    attributes: &[AttributeDefinition],
) -> Result<(), ValidationError> {
    let mut range_keys = key_schema
        .iter()
        .filter(|key| key.key_type == types::KeyType::Range);
    let Some(key) = range_keys.next() else {
        return Ok(());
    };
    if range_keys.next().is_some() {
        return Err(ValidationError::MultipleRangeKey);
    }
    if key.attribute_name.is_empty() {
        return Err(ValidationError::RangeKeyNull);
    }
    if !is_key_attribute(attributes, &key.attribute_name) {
        return Err(ValidationError::RangeKeyInvalidType);
    }
    Ok(())
}

/// Checks that the read capacity is set and at least one.
pub fn read_capacity_is_valid(capacity: Option<i64>) -> Result<(), ValidationError> {
    match capacity {
        None => Err(ValidationError::ReadCapacityUndefined),
        Some(capacity) if capacity < 1 => Err(ValidationError::ReadCapacityInvalid),
        Some(_) => Ok(()),
    }
}

/// Checks that the write capacity is set and at least one.
pub fn write_capacity_is_valid(capacity: Option<i64>) -> Result<(), ValidationError> {
    match capacity {
        None => Err(ValidationError::WriteCapacityUndefined),
        Some(capacity) if capacity < 1 => Err(ValidationError::WriteCapacityInvalid),
        Some(_) => Ok(()),
    }
}

/// Checks that every attribute is named, has a value, and that the value carries its declared type.
pub fn attributes_are_valid<'a, I>(attributes: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a String, &'a TypedValue)>,
{
    for (name, value) in attributes {
        if name.is_empty() {
            return Err(ValidationError::AttributeNameNull);
        }
        if value.value.is_none() {
            return Err(ValidationError::AttributeValueNull);
        }
        if !value.is_valid_type() {
            return Err(ValidationError::AttributeInvalidType);
        }
    }
    Ok(())
}

/// Checks every query key condition: attribute name, each value, then the operator.
pub fn key_conditions_are_valid<'a, I>(conditions: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a String, &'a KeyCondition)>,
{
    for (name, condition) in conditions {
        if name.is_empty() {
            return Err(ValidationError::ComparisonKeyNull);
        }
        for value in &condition.values {
            if value.value.is_none() {
                return Err(ValidationError::ComparisonValueNull);
            }
            if !value.is_valid_type() {
                return Err(ValidationError::ComparisonValueInvalidType);
            }
        }
        if !COMPARISON_OPERATORS.contains(&condition.comparison_operator) {
            return Err(ValidationError::ComparisonOperatorInvalid);
        }
    }
    Ok(())
}

/// Checks that the limit, when present, is a positive integer the wire can carry.
pub fn limit_is_valid(limit: Option<i64>) -> Result<(), ValidationError> {
    match limit {
        Some(limit) if limit < 1 || i32::try_from(limit).is_err() => {
            Err(ValidationError::LimitInvalid)
        }
        _ => Ok(()),
    }
}

/// Reports a rejected request before handing the failure back.
pub(crate) fn rejected(error: ValidationError) -> ValidationError {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        property = error.property(),
        name = error.name(),
        "request rejected before dispatch"
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    use indexmap::IndexMap;
    use rstest::rstest;

    fn attribute(name: &str, attribute_type: &str) -> AttributeDefinition {
        AttributeDefinition {
            attribute_name: name.to_string(),
            attribute_type: Some(attribute_type.into()),
        }
    }

    fn key(name: &str, key_type: types::KeyType) -> KeySchemaEntry {
        KeySchemaEntry {
            attribute_name: name.to_string(),
            key_type,
        }
    }

    #[rstest]
    #[case::too_short("ab".to_string(), Err(ValidationError::TableNameInvalidLength))]
    #[case::empty(String::new(), Err(ValidationError::TableNameInvalidLength))]
    #[case::shortest("abc".to_string(), Ok(()))]
    #[case::multibyte("äöü".to_string(), Ok(()))]
    #[case::longest("a".repeat(255), Ok(()))]
    #[case::too_long("a".repeat(256), Err(ValidationError::TableNameInvalidLength))]
    fn test_table_name_is_valid_length(
        #[case] table_name: String,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(table_name_is_valid_length(&table_name), expected);
    }

    #[rstest]
    #[case::absent(None, Ok(()))]
    #[case::http(Some("http://localhost:8000"), Ok(()))]
    #[case::https(Some("https://dynamodb.us-east-1.amazonaws.com"), Ok(()))]
    #[case::bare_word(Some("endpoint"), Err(ValidationError::EndpointInvalid))]
    #[case::no_host(Some("localhost:8000"), Err(ValidationError::EndpointInvalid))]
    fn test_endpoint_is_valid(
        #[case] endpoint: Option<&str>,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(endpoint_is_valid(endpoint), expected);
    }

    #[rstest]
    #[case::listed(Some("eu-central-1"), Ok(()))]
    #[case::unlisted(Some("mars-north-1"), Err(ValidationError::RegionInvalid))]
    #[case::absent(None, Err(ValidationError::RegionInvalid))]
    fn test_region_is_valid(
        #[case] region: Option<&str>,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(region_is_valid(region), expected);
    }

    #[test]
    fn test_every_listed_region_is_valid() {
        for region in REGIONS {
            assert_eq!(region_is_valid(Some(region)), Ok(()));
        }
    }

    #[rstest]
    #[case::complete(
        ConnectionOptions {
            access_key_id: Some("access".to_string()),
            endpoint: None,
            region: Some("us-east-1".to_string()),
            secret_access_key: Some("secret".to_string()),
        },
        Ok(())
    )]
    #[case::endpoint_before_region(
        ConnectionOptions {
            endpoint: Some("endpoint".to_string()),
            ..Default::default()
        },
        Err(ValidationError::EndpointInvalid)
    )]
    #[case::region_before_keys(
        ConnectionOptions::default(),
        Err(ValidationError::RegionInvalid)
    )]
    #[case::empty_access_key(
        ConnectionOptions {
            access_key_id: Some(String::new()),
            region: Some("us-east-1".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..Default::default()
        },
        Err(ValidationError::AccessKeyIdNull)
    )]
    #[case::missing_secret(
        ConnectionOptions {
            access_key_id: Some("access".to_string()),
            region: Some("us-east-1".to_string()),
            ..Default::default()
        },
        Err(ValidationError::SecretAccessKeyNull)
    )]
    fn test_connection_is_valid(
        #[case] options: ConnectionOptions,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(connection_is_valid(&options), expected);
    }

    #[rstest]
    #[case::single(
        vec![key("a", types::KeyType::Hash)],
        vec![attribute("a", "S")],
        Ok(())
    )]
    #[case::undefined(
        vec![key("a", types::KeyType::Range)],
        vec![attribute("a", "S")],
        Err(ValidationError::HashKeyUndefined)
    )]
    #[case::multiple(
        vec![key("a", types::KeyType::Hash), key("b", types::KeyType::Hash)],
        vec![attribute("a", "S"), attribute("b", "S")],
        Err(ValidationError::MultipleHashKey)
    )]
    #[case::empty_name(
        vec![key("", types::KeyType::Hash)],
        vec![attribute("", "S")],
        Err(ValidationError::HashKeyNull)
    )]
    #[case::unknown_type(
        vec![key("a", types::KeyType::Hash)],
        vec![attribute("a", "BOOL")],
        Err(ValidationError::HashKeyInvalidType)
    )]
    #[case::undeclared_attribute(
        vec![key("a", types::KeyType::Hash)],
        vec![],
        Err(ValidationError::HashKeyInvalidType)
    )]
    fn test_hash_key_is_valid(
        #[case] key_schema: Vec<KeySchemaEntry>,
        #[case] attributes: Vec<AttributeDefinition>,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(hash_key_is_valid(&key_schema, &attributes), expected);
    }

    #[rstest]
    #[case::absent(vec![key("a", types::KeyType::Hash)], vec![attribute("a", "S")], Ok(()))]
    #[case::single(
        vec![key("a", types::KeyType::Hash), key("b", types::KeyType::Range)],
        vec![attribute("a", "S"), attribute("b", "N")],
        Ok(())
    )]
    #[case::multiple(
        vec![key("b", types::KeyType::Range), key("c", types::KeyType::Range)],
        vec![attribute("b", "N"), attribute("c", "N")],
        Err(ValidationError::MultipleRangeKey)
    )]
    #[case::empty_name(
        vec![key("", types::KeyType::Range)],
        vec![attribute("", "N")],
        Err(ValidationError::RangeKeyNull)
    )]
    #[case::unknown_type(
        vec![key("b", types::KeyType::Range)],
        vec![attribute("b", "SS")],
        Err(ValidationError::RangeKeyInvalidType)
    )]
    fn test_range_key_is_valid(
        #[case] key_schema: Vec<KeySchemaEntry>,
        #[case] attributes: Vec<AttributeDefinition>,
        #[case] expected: Result<(), ValidationError>,
    ) {
        assert_eq!(range_key_is_valid(&key_schema, &attributes), expected);
    }

    #[rstest]
    #[case::undefined(None, Err(ValidationError::ReadCapacityUndefined), Err(ValidationError::WriteCapacityUndefined))]
    #[case::zero(Some(0), Err(ValidationError::ReadCapacityInvalid), Err(ValidationError::WriteCapacityInvalid))]
    #[case::negative(Some(-5), Err(ValidationError::ReadCapacityInvalid), Err(ValidationError::WriteCapacityInvalid))]
    #[case::one(Some(1), Ok(()), Ok(()))]
    fn test_capacity_is_valid(
        #[case] capacity: Option<i64>,
        #[case] expected_read: Result<(), ValidationError>,
        #[case] expected_write: Result<(), ValidationError>,
    ) {
        assert_eq!(read_capacity_is_valid(capacity), expected_read);
        assert_eq!(write_capacity_is_valid(capacity), expected_write);
    }

    #[rstest]
    #[case::string("a", TypedValue::string("b"), Ok(()))]
    #[case::empty_name("", TypedValue::string("b"), Err(ValidationError::AttributeNameNull))]
    #[case::null_value("a", TypedValue::new("S", Option::<String>::None), Err(ValidationError::AttributeValueNull))]
    #[case::unknown_type("a", TypedValue::new("X", "b"), Err(ValidationError::AttributeInvalidType))]
    #[case::mismatched_type("a", TypedValue::new("BOOL", "b"), Err(ValidationError::AttributeInvalidType))]
    fn test_attributes_are_valid(
        #[case] name: &str,
        #[case] value: TypedValue,
        #[case] expected: Result<(), ValidationError>,
    ) {
        let attributes = IndexMap::from([(name.to_string(), value)]);
        assert_eq!(attributes_are_valid(&attributes), expected);
    }

    #[rstest]
    #[case::equal(
        "a",
        KeyCondition {
            comparison_operator: types::ComparisonOperator::Eq,
            values: vec![TypedValue::string("b")],
        },
        Ok(())
    )]
    #[case::not_null_without_values(
        "a",
        KeyCondition {
            comparison_operator: types::ComparisonOperator::NotNull,
            values: vec![],
        },
        Ok(())
    )]
    #[case::empty_name(
        "",
        KeyCondition {
            comparison_operator: types::ComparisonOperator::Eq,
            values: vec![TypedValue::string("b")],
        },
        Err(ValidationError::ComparisonKeyNull)
    )]
    #[case::null_value(
        "a",
        KeyCondition {
            comparison_operator: types::ComparisonOperator::Eq,
            values: vec![TypedValue::new("N", ())],
        },
        Err(ValidationError::ComparisonValueNull)
    )]
    #[case::unknown_value_type(
        "a",
        KeyCondition {
            comparison_operator: types::ComparisonOperator::Eq,
            values: vec![TypedValue::new("STRING", "b")],
        },
        Err(ValidationError::ComparisonValueInvalidType)
    )]
    #[case::value_checked_before_operator(
        "a",
        KeyCondition {
            comparison_operator: "LIKE".into(),
            values: vec![TypedValue::new("N", ())],
        },
        Err(ValidationError::ComparisonValueNull)
    )]
    #[case::unknown_operator(
        "a",
        KeyCondition {
            comparison_operator: "LIKE".into(),
            values: vec![TypedValue::string("b")],
        },
        Err(ValidationError::ComparisonOperatorInvalid)
    )]
    fn test_key_conditions_are_valid(
        #[case] name: &str,
        #[case] condition: KeyCondition,
        #[case] expected: Result<(), ValidationError>,
    ) {
        let conditions = IndexMap::from([(name.to_string(), condition)]);
        assert_eq!(key_conditions_are_valid(&conditions), expected);
    }

    #[rstest]
    #[case::absent(None, Ok(()))]
    #[case::positive(Some(10), Ok(()))]
    #[case::zero(Some(0), Err(ValidationError::LimitInvalid))]
    #[case::overflow(Some(i64::from(i32::MAX) + 1), Err(ValidationError::LimitInvalid))]
    fn test_limit_is_valid(#[case] limit: Option<i64>, #[case] expected: Result<(), ValidationError>) {
        assert_eq!(limit_is_valid(limit), expected);
    }

    #[test]
    fn test_error_fields() {
        let error = ValidationError::MultipleRangeKey;
        assert_eq!(error.kind(), "input-validation");
        assert_eq!(error.property(), "range-key");
        assert_eq!(error.name(), "MultipleRangeKeyError");
        assert_eq!(
            error.message(),
            "A table must have no more than one range key"
        );
    }
}

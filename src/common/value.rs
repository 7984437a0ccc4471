use aws_sdk_dynamodb::{primitives::Blob, types};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::{collections, fmt};

/// A flattened item: attribute names mapped to plain JSON values.
pub type Item = collections::HashMap<String, serde_json::Value>;

/// Attribute data type, named as on the wire.
///
/// Type names that are not part of the protocol parse to [`AttributeType::Unknown`]
/// and are rejected when the request is validated.
///
/// ```rust
/// use fluent_dynamo::common::value::AttributeType;
///
/// assert_eq!(AttributeType::from("BOOL"), AttributeType::Bool);
/// assert!(!AttributeType::from("STRING").is_known());
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum AttributeType {
    /// Binary.
    B,
    /// Boolean.
    Bool,
    /// Binary set.
    Bs,
    /// List.
    L,
    /// Map.
    M,
    /// Number.
    N,
    /// Number set.
    Ns,
    /// Null.
    Null,
    /// String.
    S,
    /// String set.
    Ss,
    /// A type name outside the protocol.
    Unknown(String),
}

impl AttributeType {
    /// The wire names of every supported type.
    pub const fn values() -> &'static [&'static str] {
        &["B", "BOOL", "BS", "L", "M", "N", "NS", "NULL", "S", "SS"]
    }

    /// The wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::B => "B",
            Self::Bool => "BOOL",
            Self::Bs => "BS",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::Ns => "NS",
            Self::Null => "NULL",
            Self::S => "S",
            Self::Ss => "SS",
            Self::Unknown(name) => name,
        }
    }

    /// Whether this type is one of the protocol types.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    fn matches(&self, value: &types::AttributeValue) -> bool {
        matches!(
            (self, value),
            (Self::B, types::AttributeValue::B(_))
                | (Self::Bool, types::AttributeValue::Bool(_))
                | (Self::Bs, types::AttributeValue::Bs(_))
                | (Self::L, types::AttributeValue::L(_))
                | (Self::M, types::AttributeValue::M(_))
                | (Self::N, types::AttributeValue::N(_))
                | (Self::Ns, types::AttributeValue::Ns(_))
                | (Self::Null, types::AttributeValue::Null(_))
                | (Self::S, types::AttributeValue::S(_))
                | (Self::Ss, types::AttributeValue::Ss(_))
        )
    }

    // serde has no notion of sets, binaries or numbers carried as strings
    fn coerce(&self, value: types::AttributeValue) -> types::AttributeValue {
        let coerced = match (self, &value) {
            (Self::N, types::AttributeValue::S(_)) => number(&value).map(types::AttributeValue::N),
            (Self::B, _) => blob(&value).map(types::AttributeValue::B),
            (Self::Ss, types::AttributeValue::L(list)) => list
                .iter()
                .map(|value| value.as_s().ok().cloned())
                .collect::<Option<Vec<_>>>()
                .map(types::AttributeValue::Ss),
            (Self::Ns, types::AttributeValue::L(list)) => list
                .iter()
                .map(number)
                .collect::<Option<Vec<_>>>()
                .map(types::AttributeValue::Ns),
            (Self::Bs, types::AttributeValue::L(list)) => list
                .iter()
                .map(blob)
                .collect::<Option<Vec<_>>>()
                .map(types::AttributeValue::Bs),
            _ => None,
        };
        coerced.unwrap_or(value)
    }
}

fn number(value: &types::AttributeValue) -> Option<String> {
    match value {
        types::AttributeValue::N(number) => Some(number.clone()),
        types::AttributeValue::S(number) if number.parse::<f64>().is_ok_and(f64::is_finite) => {
            Some(number.clone())
        }
        _ => None,
    }
}

/// A binary from a base64 string or a sequence of bytes.
fn blob(value: &types::AttributeValue) -> Option<Blob> {
    match value {
        types::AttributeValue::B(blob) => Some(blob.clone()),
        types::AttributeValue::S(encoded) => STANDARD.decode(encoded).ok().map(Blob::new),
        types::AttributeValue::L(bytes) => bytes
            .iter()
            .map(|byte| byte.as_n().ok()?.parse::<u8>().ok())
            .collect::<Option<Vec<u8>>>()
            .map(Blob::new),
        _ => None,
    }
}

// the protocol rejects empty sets
fn is_empty_set(value: &types::AttributeValue) -> bool {
    match value {
        types::AttributeValue::Ss(values) | types::AttributeValue::Ns(values) => values.is_empty(),
        types::AttributeValue::Bs(values) => values.is_empty(),
        _ => false,
    }
}

impl From<&str> for AttributeType {
    fn from(name: &str) -> Self {
        match name {
            "B" => Self::B,
            "BOOL" => Self::Bool,
            "BS" => Self::Bs,
            "L" => Self::L,
            "M" => Self::M,
            "N" => Self::N,
            "NS" => Self::Ns,
            "NULL" => Self::Null,
            "S" => Self::S,
            "SS" => Self::Ss,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for AttributeType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value tagged with the attribute type it was declared with.
///
/// `value` is `None` when the declared value was null or an empty set.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use fluent_dynamo::common::value::TypedValue;
///
/// let value = TypedValue::new("N", "100");
/// assert_eq!(value.value, Some(AttributeValue::N("100".to_string())));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TypedValue {
    /// The declared attribute type.
    pub attribute_type: AttributeType,
    /// The wire value.
    pub value: Option<types::AttributeValue>,
}

impl TypedValue {
    /// Declares `value` with a runtime attribute type.
    ///
    /// The value is serialized with `serde_dynamo`, then converted to the declared
    /// shape: sequences declared as sets, numeric strings declared as numbers, and
    /// base64 strings or byte sequences declared as binaries.
    pub fn new<V: Serialize>(attribute_type: impl Into<AttributeType>, value: V) -> Self {
        let attribute_type = attribute_type.into();
        let value = match to_attribute_value::<_, types::AttributeValue>(value) {
            Ok(types::AttributeValue::Null(_)) if attribute_type != AttributeType::Null => None,
            Ok(value) => Some(attribute_type.coerce(value)).filter(|value| !is_empty_set(value)),
            Err(_) => None,
        };
        Self {
            attribute_type,
            value,
        }
    }

    fn typed(attribute_type: AttributeType, value: types::AttributeValue) -> Self {
        Self {
            attribute_type,
            value: (!is_empty_set(&value)).then_some(value),
        }
    }

    /// A string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::typed(AttributeType::S, types::AttributeValue::S(value.into()))
    }

    /// A number value, kept in its textual wire form.
    pub fn number(value: impl fmt::Display) -> Self {
        Self::typed(AttributeType::N, types::AttributeValue::N(value.to_string()))
    }

    /// A binary value.
    pub fn binary(value: impl Into<Vec<u8>>) -> Self {
        Self::typed(AttributeType::B, types::AttributeValue::B(Blob::new(value)))
    }

    /// A boolean value.
    pub fn boolean(value: bool) -> Self {
        Self::typed(AttributeType::Bool, types::AttributeValue::Bool(value))
    }

    /// The null value.
    pub fn null() -> Self {
        Self::typed(AttributeType::Null, types::AttributeValue::Null(true))
    }

    /// A string set.
    pub fn string_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::typed(AttributeType::Ss, types::AttributeValue::Ss(values))
    }

    /// A number set.
    pub fn number_set<I, N>(values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: fmt::Display,
    {
        let values = values.into_iter().map(|value| value.to_string()).collect();
        Self::typed(AttributeType::Ns, types::AttributeValue::Ns(values))
    }

    /// A binary set.
    pub fn binary_set<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let values = values.into_iter().map(Blob::new).collect();
        Self::typed(AttributeType::Bs, types::AttributeValue::Bs(values))
    }

    /// A list of wire values.
    pub fn list(values: Vec<types::AttributeValue>) -> Self {
        Self::typed(AttributeType::L, types::AttributeValue::L(values))
    }

    /// A map of wire values.
    pub fn map(values: collections::HashMap<String, types::AttributeValue>) -> Self {
        Self::typed(AttributeType::M, types::AttributeValue::M(values))
    }

    /// Whether the value is present and carries its declared, supported type.
    pub fn is_valid_type(&self) -> bool {
        self.value
            .as_ref()
            .is_some_and(|value| self.attribute_type.matches(value))
    }
}

pub(crate) fn into_wire<I>(values: I) -> collections::HashMap<String, types::AttributeValue>
where
    I: IntoIterator<Item = (String, TypedValue)>,
{
    values
        .into_iter()
        .filter_map(|(name, value)| value.value.map(|value| (name, value)))
        .collect()
}

/// Finishes an attribute by choosing its type and value, then hands the owning builder back.
pub struct AttributeValueBuilder<B> {
    assign: fn(&mut B, String, TypedValue),
    builder: B,
    name: String,
}

impl<B> AttributeValueBuilder<B> {
    pub(crate) fn new(builder: B, name: String, assign: fn(&mut B, String, TypedValue)) -> Self {
        Self {
            assign,
            builder,
            name,
        }
    }

    /// Uses an already typed value.
    pub fn as_value(mut self, value: TypedValue) -> B {
        (self.assign)(&mut self.builder, self.name, value);
        self.builder
    }

    /// Uses `value` declared with a runtime attribute type such as `"S"` or `"NS"`.
    pub fn as_type<V: Serialize>(self, attribute_type: impl Into<AttributeType>, value: V) -> B {
        self.as_value(TypedValue::new(attribute_type, value))
    }

    /// Uses a string value.
    pub fn as_string(self, value: impl Into<String>) -> B {
        self.as_value(TypedValue::string(value))
    }

    /// Uses a number value.
    pub fn as_number(self, value: impl fmt::Display) -> B {
        self.as_value(TypedValue::number(value))
    }

    /// Uses a binary value.
    pub fn as_binary(self, value: impl Into<Vec<u8>>) -> B {
        self.as_value(TypedValue::binary(value))
    }

    /// Uses a boolean value.
    pub fn as_boolean(self, value: bool) -> B {
        self.as_value(TypedValue::boolean(value))
    }

    /// Uses the null value.
    pub fn as_null(self) -> B {
        self.as_value(TypedValue::null())
    }

    /// Uses a string set.
    pub fn as_string_set<I, S>(self, values: I) -> B
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.as_value(TypedValue::string_set(values))
    }

    /// Uses a number set.
    pub fn as_number_set<I, N>(self, values: I) -> B
    where
        I: IntoIterator<Item = N>,
        N: fmt::Display,
    {
        self.as_value(TypedValue::number_set(values))
    }

    /// Uses a binary set.
    pub fn as_binary_set<I, V>(self, values: I) -> B
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        self.as_value(TypedValue::binary_set(values))
    }

    /// Uses a list value.
    pub fn as_list(self, values: Vec<types::AttributeValue>) -> B {
        self.as_value(TypedValue::list(values))
    }

    /// Uses a map value.
    pub fn as_map(self, values: collections::HashMap<String, types::AttributeValue>) -> B {
        self.as_value(TypedValue::map(values))
    }
}

impl<B: fmt::Debug> fmt::Debug for AttributeValueBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeValueBuilder")
            .field("builder", &self.builder)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// f64 carries any decimal of up to 15 significant digits
const F64_DIGITS: usize = 15;

fn significant_digits(number: &str) -> usize {
    let mantissa = number.split(['e', 'E']).next().unwrap_or_default();
    let digits = mantissa.chars().filter(char::is_ascii_digit).collect::<String>();
    digits.trim_start_matches('0').trim_end_matches('0').len()
}

fn flatten_number(number: String) -> serde_json::Value {
    if let Ok(value) = number.parse::<i64>() {
        return value.into();
    }
    if let Ok(value) = number.parse::<u64>() {
        return value.into();
    }
    if significant_digits(&number) > F64_DIGITS {
        return serde_json::Value::String(number);
    }
    number
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or(serde_json::Value::String(number), serde_json::Value::Number)
}

fn flatten_blob(blob: Blob) -> serde_json::Value {
    serde_json::Value::String(STANDARD.encode(blob.as_ref()))
}

/// Collapses a `{type: value}` wire value into its plain value.
///
/// Numbers, including the members of number sets, become JSON numbers; a number
/// JSON cannot carry exactly stays a string. Binary values become base64 strings.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use fluent_dynamo::common::value::flatten_value;
///
/// assert_eq!(flatten_value(AttributeValue::N("100".to_string())), serde_json::json!(100));
/// ```
pub fn flatten_value(value: types::AttributeValue) -> serde_json::Value {
    match value {
        types::AttributeValue::B(blob) => flatten_blob(blob),
        types::AttributeValue::Bool(value) => serde_json::Value::Bool(value),
        types::AttributeValue::Bs(blobs) => blobs.into_iter().map(flatten_blob).collect(),
        types::AttributeValue::L(values) => values.into_iter().map(flatten_value).collect(),
        types::AttributeValue::M(values) => serde_json::Value::Object(
            values
                .into_iter()
                .map(|(name, value)| (name, flatten_value(value)))
                .collect(),
        ),
        types::AttributeValue::N(number) => flatten_number(number),
        types::AttributeValue::Ns(numbers) => numbers.into_iter().map(flatten_number).collect(),
        types::AttributeValue::S(value) => serde_json::Value::String(value),
        types::AttributeValue::Ss(values) => values.into_iter().map(serde_json::Value::String).collect(),
        _ => serde_json::Value::Null,
    }
}

/// Flattens every attribute of a wire item.
pub fn flatten_item(item: collections::HashMap<String, types::AttributeValue>) -> Item {
    item.into_iter()
        .map(|(name, value)| (name, flatten_value(value)))
        .collect()
}

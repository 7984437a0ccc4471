use aws_sdk_dynamodb::types;
use std::fmt;

/// Declares the type of an attribute used as a key.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AttributeDefinition {
    /// The attribute name.
    pub attribute_name: String,
    /// The attribute type, `None` until one is chosen.
    pub attribute_type: Option<types::ScalarAttributeType>,
}

/// One key of a table or index key schema.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeySchemaEntry {
    /// The attribute name.
    pub attribute_name: String,
    /// Hash or range.
    pub key_type: types::KeyType,
}

/// Provisioned throughput of a table or global secondary index.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Throughput {
    /// Read capacity units.
    pub read_capacity_units: Option<i64>,
    /// Write capacity units.
    pub write_capacity_units: Option<i64>,
}

/// Attributes copied into a secondary index.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Projection {
    /// `ALL`, `KEYS_ONLY` or `INCLUDE`.
    pub projection_type: Option<types::ProjectionType>,
    /// The non key attributes of an `INCLUDE` projection.
    pub non_key_attributes: Option<Vec<String>>,
}

/// A global or local secondary index.
///
/// Only global indexes carry their own throughput; local ones share the table's.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SecondaryIndex {
    /// The index name.
    pub index_name: String,
    /// The index keys.
    pub key_schema: Vec<KeySchemaEntry>,
    /// The projected attributes.
    pub projection: Projection,
    /// The index throughput, global indexes only.
    pub provisioned_throughput: Option<Throughput>,
}

/// Sets the type of `name`, reusing its definition when it is already declared.
pub(crate) fn define_attribute(
    definitions: &mut Vec<AttributeDefinition>,
    name: &str,
    attribute_type: types::ScalarAttributeType,
) {
    match definitions
        .iter_mut()
        .find(|definition| definition.attribute_name == name)
    {
        Some(definition) => definition.attribute_type = Some(attribute_type),
        None => definitions.push(AttributeDefinition {
            attribute_name: name.to_string(),
            attribute_type: Some(attribute_type),
        }),
    }
}

/// Chooses the type of a key attribute.
///
/// The key joins the schema once its type is chosen.
pub struct KeyTypeBuilder<B> {
    assign: fn(&mut B, KeySchemaEntry, types::ScalarAttributeType),
    builder: B,
    key: KeySchemaEntry,
}

impl<B> KeyTypeBuilder<B> {
    pub(crate) fn new(
        builder: B,
        key: KeySchemaEntry,
        assign: fn(&mut B, KeySchemaEntry, types::ScalarAttributeType),
    ) -> Self {
        Self {
            assign,
            builder,
            key,
        }
    }

    /// Declares the key with a runtime type name.
    pub fn as_type(mut self, attribute_type: impl Into<types::ScalarAttributeType>) -> B {
        (self.assign)(&mut self.builder, self.key, attribute_type.into());
        self.builder
    }

    /// Declares a string key.
    pub fn as_string(self) -> B {
        self.as_type(types::ScalarAttributeType::S)
    }

    /// Declares a number key.
    pub fn as_number(self) -> B {
        self.as_type(types::ScalarAttributeType::N)
    }

    /// Declares a binary key.
    pub fn as_binary(self) -> B {
        self.as_type(types::ScalarAttributeType::B)
    }
}

impl<B: fmt::Debug> fmt::Debug for KeyTypeBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTypeBuilder")
            .field("builder", &self.builder)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn definition(name: &str, attribute_type: types::ScalarAttributeType) -> AttributeDefinition {
        AttributeDefinition {
            attribute_name: name.to_string(),
            attribute_type: Some(attribute_type),
        }
    }

    #[rstest]
    #[case::new_attribute(
        vec![definition("ForumName", types::ScalarAttributeType::S)],
        "Subject",
        types::ScalarAttributeType::S,
        vec![
            definition("ForumName", types::ScalarAttributeType::S),
            definition("Subject", types::ScalarAttributeType::S),
        ]
    )]
    #[case::existing_attribute(
        vec![definition("ForumName", types::ScalarAttributeType::S)],
        "ForumName",
        types::ScalarAttributeType::S,
        vec![definition("ForumName", types::ScalarAttributeType::S)]
    )]
    #[case::retyped_attribute(
        vec![definition("PostCount", types::ScalarAttributeType::S)],
        "PostCount",
        types::ScalarAttributeType::N,
        vec![definition("PostCount", types::ScalarAttributeType::N)]
    )]
    fn test_define_attribute(
        #[case] mut definitions: Vec<AttributeDefinition>,
        #[case] name: &str,
        #[case] attribute_type: types::ScalarAttributeType,
        #[case] expected: Vec<AttributeDefinition>,
    ) {
        define_attribute(&mut definitions, name, attribute_type);
        assert_eq!(definitions, expected);
    }

    fn defined(
        build: fn(KeyTypeBuilder<Vec<AttributeDefinition>>) -> Vec<AttributeDefinition>,
    ) -> Vec<AttributeDefinition> {
        let key = KeySchemaEntry {
            attribute_name: "ForumName".to_string(),
            key_type: types::KeyType::Hash,
        };
        build(KeyTypeBuilder::new(Vec::new(), key, |definitions, key, attribute_type| {
            define_attribute(definitions, &key.attribute_name, attribute_type);
        }))
    }

    #[rstest]
    #[case::string(defined(|builder| builder.as_string()), types::ScalarAttributeType::S)]
    #[case::number(defined(|builder| builder.as_number()), types::ScalarAttributeType::N)]
    #[case::binary(defined(|builder| builder.as_binary()), types::ScalarAttributeType::B)]
    #[case::runtime(defined(|builder| builder.as_type("BOOL")), types::ScalarAttributeType::from("BOOL"))]
    fn test_key_type_builder(
        #[case] definitions: Vec<AttributeDefinition>,
        #[case] expected: types::ScalarAttributeType,
    ) {
        assert_eq!(definitions, vec![definition("ForumName", expected)]);
    }
}

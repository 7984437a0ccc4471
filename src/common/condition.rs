use crate::common::value::{self, AttributeType, TypedValue};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::Serialize;
use std::{collections, fmt, ops};

/// Joins the clauses of a condition expression.
const CONDITION_SEPARATOR: &str = " and ";

/// Comparison operator of a condition expression.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ConditionOperator {
    /// `=`
    Equal,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `<>`
    NotEqual,
}

impl ops::Deref for ConditionOperator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Equal => "=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::NotEqual => "<>",
        }
    }
}

/// Condition expression and the placeholder values of a write request.
///
/// Placeholders are numbered `:v0`, `:v1`, ... in the order values are bound,
/// whichever clause binds them.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionValues {
    pub(crate) condition_expression: Option<String>,
    pub(crate) values: IndexMap<String, TypedValue>,
}

impl ExpressionValues {
    pub(crate) fn bind(&mut self, value: TypedValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    pub(crate) fn push_condition(
        &mut self,
        name: &str,
        operator: ConditionOperator,
        value: TypedValue,
    ) {
        let placeholder = self.bind(value);
        let clause = format!("{name} {} {placeholder}", &*operator);
        self.condition_expression = Some(match self.condition_expression.take() {
            Some(expression) => format!("{expression}{CONDITION_SEPARATOR}{clause}"),
            None => clause,
        });
    }

    pub(crate) fn into_wire(
        self,
    ) -> (
        Option<String>,
        Option<collections::HashMap<String, types::AttributeValue>>,
    ) {
        let values = (!self.values.is_empty()).then(|| value::into_wire(self.values));
        (self.condition_expression, values)
    }
}

/// Adds a condition on one attribute of a write request.
///
/// Each condition binds its value to the next `:vN` placeholder and is joined to
/// the previous ones with `and`.
pub struct ConditionBuilder<B> {
    builder: B,
    expression: fn(&mut B) -> &mut ExpressionValues,
    name: String,
}

impl<B> ConditionBuilder<B> {
    pub(crate) fn new(
        builder: B,
        name: String,
        expression: fn(&mut B) -> &mut ExpressionValues,
    ) -> Self {
        Self {
            builder,
            expression,
            name,
        }
    }

    /// Compares the attribute with an already typed value.
    pub fn is(mut self, operator: ConditionOperator, value: TypedValue) -> B {
        (self.expression)(&mut self.builder).push_condition(&self.name, operator, value);
        self.builder
    }

    /// Compares the attribute with `value` declared with a runtime attribute type.
    pub fn is_operation<V: Serialize>(
        self,
        operator: ConditionOperator,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.is(operator, TypedValue::new(attribute_type, value))
    }

    /// `attribute < value`
    pub fn is_less_than<V: Serialize>(self, attribute_type: impl Into<AttributeType>, value: V) -> B {
        self.is_operation(ConditionOperator::LessThan, attribute_type, value)
    }

    /// `attribute < number`
    pub fn is_less_than_number(self, value: impl fmt::Display) -> B {
        self.is(ConditionOperator::LessThan, TypedValue::number(value))
    }

    /// `attribute <= value`
    pub fn is_less_than_or_equal_to<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.is_operation(ConditionOperator::LessThanOrEqual, attribute_type, value)
    }

    /// `attribute <= number`
    pub fn is_less_than_or_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is(ConditionOperator::LessThanOrEqual, TypedValue::number(value))
    }

    /// `attribute > value`
    pub fn is_greater_than<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.is_operation(ConditionOperator::GreaterThan, attribute_type, value)
    }

    /// `attribute > number`
    pub fn is_greater_than_number(self, value: impl fmt::Display) -> B {
        self.is(ConditionOperator::GreaterThan, TypedValue::number(value))
    }

    /// `attribute >= value`
    pub fn is_greater_than_or_equal_to<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.is_operation(ConditionOperator::GreaterThanOrEqual, attribute_type, value)
    }

    /// `attribute >= number`
    pub fn is_greater_than_or_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is(ConditionOperator::GreaterThanOrEqual, TypedValue::number(value))
    }

    /// `attribute = value`
    pub fn is_equal_to<V: Serialize>(self, attribute_type: impl Into<AttributeType>, value: V) -> B {
        self.is_operation(ConditionOperator::Equal, attribute_type, value)
    }

    /// `attribute = string`
    pub fn is_equal_to_string(self, value: impl Into<String>) -> B {
        self.is(ConditionOperator::Equal, TypedValue::string(value))
    }

    /// `attribute = number`
    pub fn is_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is(ConditionOperator::Equal, TypedValue::number(value))
    }

    /// `attribute <> value`
    pub fn is_not_equal_to<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.is_operation(ConditionOperator::NotEqual, attribute_type, value)
    }

    /// `attribute <> string`
    pub fn is_not_equal_to_string(self, value: impl Into<String>) -> B {
        self.is(ConditionOperator::NotEqual, TypedValue::string(value))
    }

    /// `attribute <> number`
    pub fn is_not_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is(ConditionOperator::NotEqual, TypedValue::number(value))
    }
}

impl<B: fmt::Debug> fmt::Debug for ConditionBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionBuilder")
            .field("builder", &self.builder)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Key condition of a query on one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition {
    /// How the attribute is compared with the values.
    pub comparison_operator: types::ComparisonOperator,
    /// The values compared with, in operator order.
    pub values: Vec<TypedValue>,
}

/// Key condition as sent on the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyConditionInput {
    /// The values compared with.
    pub attribute_value_list: Vec<types::AttributeValue>,
    /// How the attribute is compared with the values.
    pub comparison_operator: types::ComparisonOperator,
}

impl From<KeyCondition> for KeyConditionInput {
    fn from(condition: KeyCondition) -> Self {
        Self {
            attribute_value_list: condition
                .values
                .into_iter()
                .filter_map(|value| value.value)
                .collect(),
            comparison_operator: condition.comparison_operator,
        }
    }
}

/// Adds a key condition on one attribute of a query.
///
/// A later condition on the same attribute replaces the earlier one.
pub struct KeyConditionBuilder<B> {
    assign: fn(&mut B, String, KeyCondition),
    builder: B,
    name: String,
}

impl<B> KeyConditionBuilder<B> {
    pub(crate) fn new(builder: B, name: String, assign: fn(&mut B, String, KeyCondition)) -> Self {
        Self {
            assign,
            builder,
            name,
        }
    }

    /// Compares the attribute using any operator and its values.
    pub fn is_operation(
        mut self,
        comparison_operator: impl Into<types::ComparisonOperator>,
        values: Vec<TypedValue>,
    ) -> B {
        let condition = KeyCondition {
            comparison_operator: comparison_operator.into(),
            values,
        };
        (self.assign)(&mut self.builder, self.name, condition);
        self.builder
    }

    fn compare<V: Serialize>(
        self,
        comparison_operator: types::ComparisonOperator,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.is_operation(
            comparison_operator,
            vec![TypedValue::new(attribute_type, value)],
        )
    }

    /// `EQ`
    pub fn is_equal_to<V: Serialize>(self, attribute_type: impl Into<AttributeType>, value: V) -> B {
        self.compare(types::ComparisonOperator::Eq, attribute_type, value)
    }

    /// `EQ` on a string.
    pub fn is_equal_to_string(self, value: impl Into<String>) -> B {
        self.is_operation(types::ComparisonOperator::Eq, vec![TypedValue::string(value)])
    }

    /// `EQ` on a number.
    pub fn is_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is_operation(types::ComparisonOperator::Eq, vec![TypedValue::number(value)])
    }

    /// `NE`
    pub fn is_not_equal_to<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.compare(types::ComparisonOperator::Ne, attribute_type, value)
    }

    /// `LT`
    pub fn is_less_than<V: Serialize>(self, attribute_type: impl Into<AttributeType>, value: V) -> B {
        self.compare(types::ComparisonOperator::Lt, attribute_type, value)
    }

    /// `LT` on a number.
    pub fn is_less_than_number(self, value: impl fmt::Display) -> B {
        self.is_operation(types::ComparisonOperator::Lt, vec![TypedValue::number(value)])
    }

    /// `LE`
    pub fn is_less_than_or_equal_to<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.compare(types::ComparisonOperator::Le, attribute_type, value)
    }

    /// `LE` on a number.
    pub fn is_less_than_or_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is_operation(types::ComparisonOperator::Le, vec![TypedValue::number(value)])
    }

    /// `GT`
    pub fn is_greater_than<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.compare(types::ComparisonOperator::Gt, attribute_type, value)
    }

    /// `GT` on a number.
    pub fn is_greater_than_number(self, value: impl fmt::Display) -> B {
        self.is_operation(types::ComparisonOperator::Gt, vec![TypedValue::number(value)])
    }

    /// `GE`
    pub fn is_greater_than_or_equal_to<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.compare(types::ComparisonOperator::Ge, attribute_type, value)
    }

    /// `GE` on a number.
    pub fn is_greater_than_or_equal_to_number(self, value: impl fmt::Display) -> B {
        self.is_operation(types::ComparisonOperator::Ge, vec![TypedValue::number(value)])
    }

    /// `BEGINS_WITH`
    pub fn begins_with(self, prefix: impl Into<String>) -> B {
        self.is_operation(
            types::ComparisonOperator::BeginsWith,
            vec![TypedValue::string(prefix)],
        )
    }

    /// `BETWEEN`, both bounds inclusive.
    pub fn is_between<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        lower: V,
        upper: V,
    ) -> B {
        let attribute_type = attribute_type.into();
        let values = vec![
            TypedValue::new(attribute_type.clone(), lower),
            TypedValue::new(attribute_type, upper),
        ];
        self.is_operation(types::ComparisonOperator::Between, values)
    }

    /// `IN`
    pub fn is_in<I, V>(self, attribute_type: impl Into<AttributeType>, values: I) -> B
    where
        I: IntoIterator<Item = V>,
        V: Serialize,
    {
        let attribute_type = attribute_type.into();
        let values = values
            .into_iter()
            .map(|value| TypedValue::new(attribute_type.clone(), value))
            .collect();
        self.is_operation(types::ComparisonOperator::In, values)
    }

    /// `CONTAINS`
    pub fn contains<V: Serialize>(self, attribute_type: impl Into<AttributeType>, value: V) -> B {
        self.compare(types::ComparisonOperator::Contains, attribute_type, value)
    }

    /// `NOT_CONTAINS`
    pub fn not_contains<V: Serialize>(
        self,
        attribute_type: impl Into<AttributeType>,
        value: V,
    ) -> B {
        self.compare(types::ComparisonOperator::NotContains, attribute_type, value)
    }

    /// `NULL`
    pub fn is_null(self) -> B {
        self.is_operation(types::ComparisonOperator::Null, Vec::new())
    }

    /// `NOT_NULL`
    pub fn is_not_null(self) -> B {
        self.is_operation(types::ComparisonOperator::NotNull, Vec::new())
    }
}

impl<B: fmt::Debug> fmt::Debug for KeyConditionBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyConditionBuilder")
            .field("builder", &self.builder)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

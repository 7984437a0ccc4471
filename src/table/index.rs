use crate::{
    error::Error,
    table::{
        common::{self, KeySchemaEntry, KeyTypeBuilder, SecondaryIndex, Throughput},
        create_table::{CreateTable, CreateTableInput},
    },
    transport::Transport,
};

use aws_sdk_dynamodb::{operation, types};
use std::{fmt, future::IntoFuture, marker, pin::Pin};

/// Where the indexes of a kind live in a create table request.
pub trait IndexKind {
    /// The indexes of this kind.
    fn indexes(request: &mut CreateTableInput) -> &mut Vec<SecondaryIndex>;
}

/// Global secondary index marker.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Global;

impl IndexKind for Global {
    fn indexes(request: &mut CreateTableInput) -> &mut Vec<SecondaryIndex> {
        &mut request.global_secondary_indexes
    }
}

/// Local secondary index marker.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Local;

impl IndexKind for Local {
    fn indexes(request: &mut CreateTableInput) -> &mut Vec<SecondaryIndex> {
        &mut request.local_secondary_indexes
    }
}

/// Configures one secondary index of a create table chain.
///
/// The builder keeps the whole chain: starting another index, calling
/// [`SecondaryIndexBuilder::done`] or awaiting it carries on with the table.
pub struct SecondaryIndexBuilder<'a, T, K> {
    kind: marker::PhantomData<K>,
    position: usize,
    table: CreateTable<'a, T>,
}

impl<'a, T: Transport, K: IndexKind> SecondaryIndexBuilder<'a, T, K> {
    pub(crate) fn new(table: CreateTable<'a, T>, position: usize) -> Self {
        Self {
            kind: marker::PhantomData,
            position,
            table,
        }
    }

    fn index(&mut self) -> Option<&mut SecondaryIndex> {
        K::indexes(&mut self.table.request).get_mut(self.position)
    }

    fn define_key(&mut self, key: KeySchemaEntry, attribute_type: types::ScalarAttributeType) {
        common::define_attribute(
            &mut self.table.request.attribute_definitions,
            &key.attribute_name,
            attribute_type,
        );
        if let Some(index) = self.index() {
            index.key_schema.push(key);
        }
    }

    /// Adds the hash key of the index.
    pub fn with_hash_key(self, name: impl Into<String>) -> KeyTypeBuilder<Self> {
        let key = KeySchemaEntry {
            attribute_name: name.into(),
            key_type: types::KeyType::Hash,
        };
        KeyTypeBuilder::new(self, key, Self::define_key)
    }

    /// Adds the range key of the index.
    pub fn with_range_key(self, name: impl Into<String>) -> KeyTypeBuilder<Self> {
        let key = KeySchemaEntry {
            attribute_name: name.into(),
            key_type: types::KeyType::Range,
        };
        KeyTypeBuilder::new(self, key, Self::define_key)
    }

    /// Projects attributes with a runtime projection type name.
    pub fn with_projection(mut self, projection_type: impl Into<types::ProjectionType>) -> Self {
        if let Some(index) = self.index() {
            index.projection.projection_type = Some(projection_type.into());
        }
        self
    }

    /// Projects every attribute.
    pub fn with_all_attributes_projection(self) -> Self {
        self.with_projection(types::ProjectionType::All)
    }

    /// Projects the table and index keys only.
    pub fn with_keys_only_projection(self) -> Self {
        self.with_projection(types::ProjectionType::KeysOnly)
    }

    /// Projects the keys and the listed attributes.
    pub fn with_include_projection<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(index) = self.index() {
            index.projection.projection_type = Some(types::ProjectionType::Include);
            index.projection.non_key_attributes =
                Some(attributes.into_iter().map(Into::into).collect());
        }
        self
    }

    /// Finishes this index and starts a global secondary index.
    pub fn with_global_secondary_index(
        self,
        name: impl Into<String>,
    ) -> SecondaryIndexBuilder<'a, T, Global> {
        self.table.with_global_secondary_index(name)
    }

    /// Finishes this index and starts a local secondary index.
    pub fn with_local_secondary_index(
        self,
        name: impl Into<String>,
    ) -> SecondaryIndexBuilder<'a, T, Local> {
        self.table.with_local_secondary_index(name)
    }

    /// Finishes this index and returns to the table.
    pub fn done(self) -> CreateTable<'a, T> {
        self.table
    }

    /// Execute the create table operation.
    pub async fn send(
        self,
    ) -> Result<operation::create_table::CreateTableOutput, Error<T::Error>> {
        self.table.send().await
    }
}

impl<'a, T: Transport> SecondaryIndexBuilder<'a, T, Global> {
    fn throughput(&mut self) -> Option<&mut Throughput> {
        self.index()
            .map(|index| index.provisioned_throughput.get_or_insert_with(Throughput::default))
    }

    /// Sets the read capacity units of the index.
    pub fn with_read_capacity(mut self, units: i64) -> Self {
        if let Some(throughput) = self.throughput() {
            throughput.read_capacity_units = Some(units);
        }
        self
    }

    /// Sets the write capacity units of the index.
    pub fn with_write_capacity(mut self, units: i64) -> Self {
        if let Some(throughput) = self.throughput() {
            throughput.write_capacity_units = Some(units);
        }
        self
    }
}

impl<'a, T: Transport + Sync, K: IndexKind> IntoFuture for SecondaryIndexBuilder<'a, T, K> {
    type Output = Result<operation::create_table::CreateTableOutput, Error<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        self.table.into_future()
    }
}

impl<T: fmt::Debug, K> fmt::Debug for SecondaryIndexBuilder<'_, T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecondaryIndexBuilder")
            .field("position", &self.position)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FluentDynamo, table::common::Projection, transport::stub::StubTransport};

    use rstest::rstest;

    fn dynamo() -> FluentDynamo<StubTransport> {
        FluentDynamo::new(StubTransport::default())
    }

    fn projected(
        project: for<'a> fn(
            SecondaryIndexBuilder<'a, StubTransport, Local>,
        ) -> SecondaryIndexBuilder<'a, StubTransport, Local>,
    ) -> Projection {
        let dynamo = dynamo();
        let table = project(dynamo.create_table("Thread").with_local_secondary_index("Index")).done();
        table.request().local_secondary_indexes[0].projection.clone()
    }

    #[rstest]
    #[case::all(
        projected(|index| index.with_all_attributes_projection()),
        Projection {
            projection_type: Some(types::ProjectionType::All),
            non_key_attributes: None,
        }
    )]
    #[case::keys_only(
        projected(|index| index.with_keys_only_projection()),
        Projection {
            projection_type: Some(types::ProjectionType::KeysOnly),
            non_key_attributes: None,
        }
    )]
    #[case::include(
        projected(|index| index.with_include_projection(["Subject", "LastPostedBy"])),
        Projection {
            projection_type: Some(types::ProjectionType::Include),
            non_key_attributes: Some(vec!["Subject".to_string(), "LastPostedBy".to_string()]),
        }
    )]
    #[case::runtime(
        projected(|index| index.with_projection("ALL")),
        Projection {
            projection_type: Some(types::ProjectionType::All),
            non_key_attributes: None,
        }
    )]
    fn test_projection(#[case] projection: Projection, #[case] expected: Projection) {
        assert_eq!(projection, expected);
    }

    #[test]
    fn test_indexes_share_attribute_definitions() {
        let dynamo = dynamo();
        let table = dynamo
            .create_table("Thread")
            .with_hash_key("ForumName")
            .as_string()
            .with_global_secondary_index("First")
            .with_hash_key("ForumName")
            .as_string()
            .with_local_secondary_index("Second")
            .with_hash_key("ForumName")
            .as_string()
            .done();
        let request = table.request();
        assert_eq!(request.attribute_definitions.len(), 1);
        assert_eq!(request.global_secondary_indexes[0].key_schema.len(), 1);
        assert_eq!(request.local_secondary_indexes[0].key_schema.len(), 1);
        assert_eq!(request.key_schema.len(), 1);
    }

    #[test]
    fn test_capacities_apply_to_their_own_index() {
        let dynamo = dynamo();
        let table = dynamo
            .create_table("Thread")
            .with_read_capacity(5)
            .with_global_secondary_index("First")
            .with_read_capacity(1)
            .with_global_secondary_index("Second")
            .with_write_capacity(2)
            .done();
        let request = table.request();
        assert_eq!(request.provisioned_throughput.read_capacity_units, Some(5));
        assert_eq!(
            request.global_secondary_indexes[0].provisioned_throughput,
            Some(Throughput {
                read_capacity_units: Some(1),
                write_capacity_units: None,
            })
        );
        assert_eq!(
            request.global_secondary_indexes[1].provisioned_throughput,
            Some(Throughput {
                read_capacity_units: None,
                write_capacity_units: Some(2),
            })
        );
    }

    #[test]
    fn test_local_index_has_no_throughput() {
        let dynamo = dynamo();
        let table = dynamo
            .create_table("Thread")
            .with_local_secondary_index("Index")
            .done();
        assert_eq!(table.request().local_secondary_indexes[0].provisioned_throughput, None);
    }
}

use crate::{
    client::ConnectionOptions,
    error::Error,
    table::{
        common::{self, AttributeDefinition, KeySchemaEntry, KeyTypeBuilder, SecondaryIndex, Throughput},
        index::{Global, Local, SecondaryIndexBuilder},
    },
    transport::Transport,
    validation::{self, ValidationError},
};

use aws_sdk_dynamodb::{operation, types};
use std::{future::IntoFuture, pin::Pin};

/// create table request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateTableInput {
    /// Types of every key attribute of the table and its indexes.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Global secondary indexes, in declaration order.
    pub global_secondary_indexes: Vec<SecondaryIndex>,
    /// The table keys.
    pub key_schema: Vec<KeySchemaEntry>,
    /// Local secondary indexes, in declaration order.
    pub local_secondary_indexes: Vec<SecondaryIndex>,
    /// The table throughput.
    pub provisioned_throughput: Throughput,
    /// The table name.
    pub table_name: String,
}

/// Create table operation.
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
///     .create_table("Thread")
///     .with_hash_key("ForumName")
///     .as_string()
///     .with_range_key("Subject")
///     .as_string()
///     .with_read_capacity(5)
///     .with_write_capacity(5)
///     .with_global_secondary_index("PostCountIndex")
///     .with_hash_key("ForumName")
///     .as_string()
///     .with_range_key("PostCount")
///     .as_number()
///     .with_read_capacity(1)
///     .with_write_capacity(1)
///     .with_all_attributes_projection()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CreateTable<'a, T> {
    options: ConnectionOptions,
    pub(crate) request: CreateTableInput,
    transport: &'a T,
}

impl<'a, T: Transport> CreateTable<'a, T> {
    pub(crate) fn new(transport: &'a T, options: ConnectionOptions, table_name: String) -> Self {
        Self {
            options,
            request: CreateTableInput {
                table_name,
                ..Default::default()
            },
            transport,
        }
    }

    crate::connection_setters!();

    /// The request built so far.
    pub fn request(&self) -> &CreateTableInput {
        &self.request
    }

    fn define_key(&mut self, key: KeySchemaEntry, attribute_type: types::ScalarAttributeType) {
        common::define_attribute(
            &mut self.request.attribute_definitions,
            &key.attribute_name,
            attribute_type,
        );
        self.request.key_schema.push(key);
    }

    /// Adds the hash key of the table.
    pub fn with_hash_key(self, name: impl Into<String>) -> KeyTypeBuilder<Self> {
        let key = KeySchemaEntry {
            attribute_name: name.into(),
            key_type: types::KeyType::Hash,
        };
        KeyTypeBuilder::new(self, key, Self::define_key)
    }

    /// Adds the range key of the table.
    pub fn with_range_key(self, name: impl Into<String>) -> KeyTypeBuilder<Self> {
        let key = KeySchemaEntry {
            attribute_name: name.into(),
            key_type: types::KeyType::Range,
        };
        KeyTypeBuilder::new(self, key, Self::define_key)
    }

    /// Sets the read capacity units of the table.
    pub fn with_read_capacity(mut self, units: i64) -> Self {
        self.request.provisioned_throughput.read_capacity_units = Some(units);
        self
    }

    /// Sets the write capacity units of the table.
    pub fn with_write_capacity(mut self, units: i64) -> Self {
        self.request.provisioned_throughput.write_capacity_units = Some(units);
        self
    }

    /// Starts a global secondary index.
    pub fn with_global_secondary_index(
        mut self,
        name: impl Into<String>,
    ) -> SecondaryIndexBuilder<'a, T, Global> {
        self.request.global_secondary_indexes.push(SecondaryIndex {
            index_name: name.into(),
            provisioned_throughput: Some(Throughput::default()),
            ..Default::default()
        });
        let position = self.request.global_secondary_indexes.len() - 1;
        SecondaryIndexBuilder::new(self, position)
    }

    /// Starts a local secondary index.
    pub fn with_local_secondary_index(
        mut self,
        name: impl Into<String>,
    ) -> SecondaryIndexBuilder<'a, T, Local> {
        self.request.local_secondary_indexes.push(SecondaryIndex {
            index_name: name.into(),
            ..Default::default()
        });
        let position = self.request.local_secondary_indexes.len() - 1;
        SecondaryIndexBuilder::new(self, position)
    }

    /// Runs the validators: table name, connection, table keys and throughput,
    /// then every global and every local secondary index.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let request = &self.request;
        let attributes = &request.attribute_definitions;
        validation::table_name_is_valid_length(&request.table_name)?;
        validation::connection_is_valid(&self.options)?;
        validation::hash_key_is_valid(&request.key_schema, attributes)?;
        validation::range_key_is_valid(&request.key_schema, attributes)?;
        validation::read_capacity_is_valid(request.provisioned_throughput.read_capacity_units)?;
        validation::write_capacity_is_valid(request.provisioned_throughput.write_capacity_units)?;
        for index in &request.global_secondary_indexes {
            let throughput = index.provisioned_throughput.unwrap_or_default();
            validation::hash_key_is_valid(&index.key_schema, attributes)?;
            validation::range_key_is_valid(&index.key_schema, attributes)?;
            validation::read_capacity_is_valid(throughput.read_capacity_units)?;
            validation::write_capacity_is_valid(throughput.write_capacity_units)?;
        }
        for index in &request.local_secondary_indexes {
            validation::hash_key_is_valid(&index.key_schema, attributes)?;
            validation::range_key_is_valid(&index.key_schema, attributes)?;
        }
        Ok(())
    }

    /// Execute the create table operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "fluent_dynamo.create_table",
            skip_all,
            fields(table_name = %self.request.table_name),
            err
        )
    )]
    pub async fn send(
        self,
    ) -> Result<operation::create_table::CreateTableOutput, Error<T::Error>> {
        self.validate().map_err(validation::rejected)?;
        self.transport
            .create_table(&self.options, self.request)
            .await
            .map_err(Error::Transport)
    }
}

impl<'a, T: Transport + Sync> IntoFuture for CreateTable<'a, T> {
    type Output = Result<operation::create_table::CreateTableOutput, Error<T::Error>>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

use crate::{
    client::ConnectionOptions,
    common::condition::KeyConditionInput,
    read::query::QueryInput,
    table::{
        common::{AttributeDefinition, KeySchemaEntry, Projection, SecondaryIndex, Throughput},
        create_table::CreateTableInput,
    },
    transport::Transport,
    write::{delete_item::DeleteItemInput, put_item::PutItemInput, update_item::UpdateItemInput},
};

use aws_sdk_dynamodb::{
    Client,
    config::{self, BehaviorVersion, Credentials, Region, http::HttpResponse},
    error::{BuildError, SdkError},
    operation, types,
};
use std::collections;

const CREDENTIALS_PROVIDER: &str = "fluent-dynamo";

/// Sends requests with an [`aws_sdk_dynamodb::Client`].
///
/// A client is configured from the [`ConnectionOptions`] of each request, so
/// chains with different regions or credentials can share one transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct SdkTransport;

fn client(options: &ConnectionOptions) -> Client {
    let mut builder = config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(options.region.clone().map(Region::new));
    if let (Some(access_key_id), Some(secret_access_key)) =
        (&options.access_key_id, &options.secret_access_key)
    {
        builder = builder.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            CREDENTIALS_PROVIDER,
        ));
    }
    builder.set_endpoint_url(options.endpoint.clone());
    Client::from_conf(builder.build())
}

fn construction_failure<E>(error: BuildError) -> aws_sdk_dynamodb::Error
where
    aws_sdk_dynamodb::Error: From<SdkError<E, HttpResponse>>,
{
    SdkError::<E, HttpResponse>::construction_failure(error).into()
}

fn attribute_definition(
    definition: AttributeDefinition,
) -> Result<types::AttributeDefinition, BuildError> {
    types::AttributeDefinition::builder()
        .attribute_name(definition.attribute_name)
        .set_attribute_type(definition.attribute_type)
        .build()
}

fn key_schema(entries: Vec<KeySchemaEntry>) -> Result<Vec<types::KeySchemaElement>, BuildError> {
    entries
        .into_iter()
        .map(|entry| {
            types::KeySchemaElement::builder()
                .attribute_name(entry.attribute_name)
                .key_type(entry.key_type)
                .build()
        })
        .collect()
}

fn provisioned_throughput(
    throughput: Throughput,
) -> Result<types::ProvisionedThroughput, BuildError> {
    types::ProvisionedThroughput::builder()
        .set_read_capacity_units(throughput.read_capacity_units)
        .set_write_capacity_units(throughput.write_capacity_units)
        .build()
}

fn projection(projection: Projection) -> types::Projection {
    types::Projection::builder()
        .set_projection_type(projection.projection_type)
        .set_non_key_attributes(projection.non_key_attributes)
        .build()
}

fn global_secondary_index(
    index: SecondaryIndex,
) -> Result<types::GlobalSecondaryIndex, BuildError> {
    types::GlobalSecondaryIndex::builder()
        .index_name(index.index_name)
        .set_key_schema(Some(key_schema(index.key_schema)?))
        .projection(projection(index.projection))
        .set_provisioned_throughput(
            index
                .provisioned_throughput
                .map(provisioned_throughput)
                .transpose()?,
        )
        .build()
}

fn local_secondary_index(index: SecondaryIndex) -> Result<types::LocalSecondaryIndex, BuildError> {
    types::LocalSecondaryIndex::builder()
        .index_name(index.index_name)
        .set_key_schema(Some(key_schema(index.key_schema)?))
        .projection(projection(index.projection))
        .build()
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}

fn condition(condition: KeyConditionInput) -> Result<types::Condition, BuildError> {
    types::Condition::builder()
        .set_attribute_value_list(Some(condition.attribute_value_list))
        .comparison_operator(condition.comparison_operator)
        .build()
}

fn create_table_request(
    builder: operation::create_table::builders::CreateTableFluentBuilder,
    input: CreateTableInput,
) -> Result<operation::create_table::builders::CreateTableFluentBuilder, BuildError> {
    let attribute_definitions = input
        .attribute_definitions
        .into_iter()
        .map(attribute_definition)
        .collect::<Result<Vec<_>, _>>()?;
    let global_secondary_indexes = input
        .global_secondary_indexes
        .into_iter()
        .map(global_secondary_index)
        .collect::<Result<Vec<_>, _>>()?;
    let local_secondary_indexes = input
        .local_secondary_indexes
        .into_iter()
        .map(local_secondary_index)
        .collect::<Result<Vec<_>, _>>()?;
    let builder = builder
        .table_name(input.table_name)
        .set_attribute_definitions(Some(attribute_definitions))
        .set_key_schema(Some(key_schema(input.key_schema)?))
        .provisioned_throughput(provisioned_throughput(input.provisioned_throughput)?)
        .set_global_secondary_indexes(non_empty(global_secondary_indexes))
        .set_local_secondary_indexes(non_empty(local_secondary_indexes));
    Ok(builder)
}

fn query_request(
    builder: operation::query::builders::QueryFluentBuilder,
    input: QueryInput,
) -> Result<operation::query::builders::QueryFluentBuilder, BuildError> {
    let key_conditions = input
        .key_conditions
        .into_iter()
        .map(|(name, key_condition)| Ok((name, condition(key_condition)?)))
        .collect::<Result<collections::HashMap<_, _>, BuildError>>()?;
    let builder = builder
        .table_name(input.table_name)
        .set_index_name(input.index_name)
        .consistent_read(input.consistent_read)
        .set_key_conditions(Some(key_conditions))
        .set_limit(input.limit)
        .set_exclusive_start_key(input.exclusive_start_key);
    Ok(builder)
}

impl Transport for SdkTransport {
    type Error = aws_sdk_dynamodb::Error;

    async fn create_table(
        &self,
        options: &ConnectionOptions,
        input: CreateTableInput,
    ) -> Result<operation::create_table::CreateTableOutput, Self::Error> {
        let request = create_table_request(client(options).create_table(), input)
            .map_err(construction_failure::<operation::create_table::CreateTableError>)?;
        Ok(request.send().await?)
    }

    async fn delete_item(
        &self,
        options: &ConnectionOptions,
        input: DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, Self::Error> {
        let output = client(options)
            .delete_item()
            .table_name(input.table_name)
            .set_key(Some(input.key))
            .send()
            .await?;
        Ok(output)
    }

    async fn put_item(
        &self,
        options: &ConnectionOptions,
        input: PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, Self::Error> {
        let output = client(options)
            .put_item()
            .table_name(input.table_name)
            .set_item(Some(input.item))
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_values(input.expression_attribute_values)
            .send()
            .await?;
        Ok(output)
    }

    async fn query(
        &self,
        options: &ConnectionOptions,
        input: QueryInput,
    ) -> Result<operation::query::QueryOutput, Self::Error> {
        let request = query_request(client(options).query(), input)
            .map_err(construction_failure::<operation::query::QueryError>)?;
        Ok(request.send().await?)
    }

    async fn update_item(
        &self,
        options: &ConnectionOptions,
        input: UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, Self::Error> {
        let output = client(options)
            .update_item()
            .table_name(input.table_name)
            .set_key(Some(input.key))
            .set_update_expression(input.update_expression)
            .set_condition_expression(input.condition_expression)
            .set_expression_attribute_values(input.expression_attribute_values)
            .set_return_values(input.return_values)
            .send()
            .await?;
        Ok(output)
    }
}

use crate::{
    client::ConnectionOptions,
    read::query::QueryInput,
    table::create_table::CreateTableInput,
    transport::Transport,
    write::{delete_item::DeleteItemInput, put_item::PutItemInput, update_item::UpdateItemInput},
};

use aws_sdk_dynamodb::{operation, types};
use std::{collections, sync};

/// A request recorded by [`StubTransport`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Sent {
    CreateTable(CreateTableInput),
    DeleteItem(DeleteItemInput),
    PutItem(PutItemInput),
    Query(QueryInput),
    UpdateItem(UpdateItemInput),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct StubError(pub(crate) String);

/// Records every request and answers with canned outputs.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    failure: Option<StubError>,
    pages: sync::Mutex<collections::VecDeque<Result<operation::query::QueryOutput, StubError>>>,
    sent: sync::Mutex<Vec<(ConnectionOptions, Sent)>>,
}

impl StubTransport {
    /// Fails every request with `message`.
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(StubError(message.to_string())),
            ..Default::default()
        }
    }

    /// Answers successive queries with `pages`, then with empty pages.
    pub(crate) fn paged(
        pages: Vec<Result<operation::query::QueryOutput, StubError>>,
    ) -> Self {
        Self {
            pages: sync::Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    /// Options passing every connection validator.
    pub(crate) fn options() -> ConnectionOptions {
        ConnectionOptions {
            access_key_id: Some("access".to_string()),
            endpoint: Some("http://localhost:8000".to_string()),
            region: Some("us-east-1".to_string()),
            secret_access_key: Some("secret".to_string()),
        }
    }

    /// The output every put item answers with.
    pub(crate) fn put_item_output() -> operation::put_item::PutItemOutput {
        operation::put_item::PutItemOutput::builder()
            .set_attributes(Some(collections::HashMap::from([(
                "ForumName".to_string(),
                types::AttributeValue::S("Amazon".to_string()),
            )])))
            .build()
    }

    /// The output every update item answers with.
    pub(crate) fn update_item_output() -> operation::update_item::UpdateItemOutput {
        operation::update_item::UpdateItemOutput::builder()
            .set_attributes(Some(collections::HashMap::from([
                (
                    "LastPostedBy".to_string(),
                    types::AttributeValue::S("alice@example.com".to_string()),
                ),
                ("Views".to_string(), types::AttributeValue::N("5".to_string())),
            ])))
            .build()
    }

    /// The requests sent so far, in order.
    pub(crate) fn sent(&self) -> Vec<(ConnectionOptions, Sent)> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, options: &ConnectionOptions, sent: Sent) -> Result<(), StubError> {
        self.sent.lock().unwrap().push((options.clone(), sent));
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

impl Transport for StubTransport {
    type Error = StubError;

    async fn create_table(
        &self,
        options: &ConnectionOptions,
        input: CreateTableInput,
    ) -> Result<operation::create_table::CreateTableOutput, Self::Error> {
        self.record(options, Sent::CreateTable(input))?;
        Ok(operation::create_table::CreateTableOutput::builder().build())
    }

    async fn delete_item(
        &self,
        options: &ConnectionOptions,
        input: DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, Self::Error> {
        self.record(options, Sent::DeleteItem(input))?;
        Ok(operation::delete_item::DeleteItemOutput::builder().build())
    }

    async fn put_item(
        &self,
        options: &ConnectionOptions,
        input: PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, Self::Error> {
        self.record(options, Sent::PutItem(input))?;
        Ok(Self::put_item_output())
    }

    async fn query(
        &self,
        options: &ConnectionOptions,
        input: QueryInput,
    ) -> Result<operation::query::QueryOutput, Self::Error> {
        self.record(options, Sent::Query(input))?;
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(operation::query::QueryOutput::builder().build()))
    }

    async fn update_item(
        &self,
        options: &ConnectionOptions,
        input: UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, Self::Error> {
        self.record(options, Sent::UpdateItem(input))?;
        Ok(Self::update_item_output())
    }
}

use crate::{
    read::query::Query,
    table::create_table::CreateTable,
    transport::{SdkTransport, Transport},
    write::{delete_item::DeleteItem, put_item::PutItem, update_item::UpdateItem},
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where and as whom requests are sent.
///
/// Every field is optional while a chain is being built; the connection
/// validators decide at send time which of them are required.
///
/// ```rust
/// use fluent_dynamo::ConnectionOptions;
///
/// let options: ConnectionOptions = serde_json::from_str(
///     r#"{"region": "us-east-1", "accessKeyId": "access", "secretAccessKey": "secret"}"#,
/// )
/// .unwrap();
/// assert_eq!(options.region.as_deref(), Some("us-east-1"));
/// assert_eq!(options.endpoint, None);
/// ```
#[derive(Clone, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOptions {
    /// The access key id of the credentials.
    pub access_key_id: Option<String>,
    /// A custom endpoint, such as a local DynamoDB.
    pub endpoint: Option<String>,
    /// The region requests are sent to.
    pub region: Option<String>,
    /// The secret access key of the credentials.
    pub secret_access_key: Option<String>,
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("access_key_id", &self.access_key_id)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// implement the connection setters on a type holding `options: ConnectionOptions`
#[doc(hidden)]
#[macro_export]
macro_rules! connection_setters {
    () => {
        /// The connection settings requests are sent with.
        pub fn options(&self) -> &$crate::ConnectionOptions {
            &self.options
        }

        /// Sends requests to a custom endpoint.
        pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.options.endpoint = Some(endpoint.into());
            self
        }

        /// Sends requests to a region.
        pub fn with_region(mut self, region: impl Into<String>) -> Self {
            self.options.region = Some(region.into());
            self
        }

        /// Signs requests with an access key id.
        pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
            self.options.access_key_id = Some(access_key_id.into());
            self
        }

        /// Signs requests with a secret access key.
        pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
            self.options.secret_access_key = Some(secret_access_key.into());
            self
        }
    };
}

/// Entry point of every request chain.
///
/// The client holds default [`ConnectionOptions`]; each factory hands a copy of
/// them to the new chain, so overriding a setting on one chain never leaks into
/// another.
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
///     .with_attribute("Subject")
///     .as_string("DynamoDB")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct FluentDynamo<T = SdkTransport> {
    options: ConnectionOptions,
    transport: T,
}

impl<T: Transport> FluentDynamo<T> {
    /// Creates a client sending requests through `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            options: ConnectionOptions::default(),
            transport,
        }
    }

    /// Replaces every default connection setting at once.
    pub fn with_options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    crate::connection_setters!();

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Starts a create table chain.
    pub fn create_table(&self, table_name: impl Into<String>) -> CreateTable<'_, T> {
        CreateTable::new(&self.transport, self.options.clone(), table_name.into())
    }

    /// Starts a put item chain.
    pub fn put_item(&self, table_name: impl Into<String>) -> PutItem<'_, T> {
        PutItem::new(&self.transport, self.options.clone(), table_name.into())
    }

    /// Starts a delete item chain.
    pub fn delete_item(&self, table_name: impl Into<String>) -> DeleteItem<'_, T> {
        DeleteItem::new(&self.transport, self.options.clone(), table_name.into())
    }

    /// Starts an update item chain.
    pub fn update_item(&self, table_name: impl Into<String>) -> UpdateItem<'_, T> {
        UpdateItem::new(&self.transport, self.options.clone(), table_name.into())
    }

    /// Starts a query chain.
    pub fn query(&self, table_name: impl Into<String>) -> Query<'_, T> {
        Query::new(&self.transport, self.options.clone(), table_name.into())
    }
}

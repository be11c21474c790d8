//! Generic REST resources.
//!
//! A resource is a named server-side collection addressed as
//! `v1.0/<name>[/<id>]` (CRUD, search) and `v2.0/<name>` (enumeration).
//! [`ApiResource`] describes one; the capability traits in [`traits`] add one
//! verb each through provided methods, so a resource type opts into exactly
//! the verbs the server supports with empty `impl` blocks:
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use sharpai::resource::{ApiResource, Creatable, Exists, Retrievable, Include};
//! use sharpai::SharpAiClient;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Tenant {
//!     #[serde(rename = "GUID", skip_serializing_if = "Option::is_none")]
//!     guid: Option<String>,
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! struct Tenants(SharpAiClient);
//!
//! impl ApiResource for Tenants {
//!     type Model = Tenant;
//!     fn name(&self) -> &str { "tenants" }
//!     fn client(&self) -> &SharpAiClient { &self.0 }
//! }
//!
//! impl Exists for Tenants {}
//! impl Creatable for Tenants {}
//! impl Retrievable for Tenants {}
//!
//! # async fn run() -> sharpai::Result<()> {
//! let tenants = Tenants(SharpAiClient::new("http://localhost:8000")?);
//! let created = tenants.create(&Tenant { guid: None, name: "acme".into() }).await?;
//! let id = created.guid.unwrap_or_default();
//! assert!(tenants.exists(&id).await);
//! let _same = tenants.retrieve(&id, Include::data()).await?;
//! # Ok(())
//! # }
//! ```

pub mod traits;

use std::fmt;
use std::marker::PhantomData;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::client::{self, SharpAiClient};
use crate::url::QueryParams;

pub use traits::{
    AllRetrievable, Creatable, CreatableMultiple, Deletable, Enumerable, EnumerableWithQuery,
    Exists, Retrievable, Searchable, Updatable,
};

/// A named collection on the server.
pub trait ApiResource: Send + Sync {
    /// Type the server's objects decode into. Use `serde_json::Value` for an
    /// unvalidated resource.
    type Model: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Collection name used in URLs.
    fn name(&self) -> &str;

    fn client(&self) -> &SharpAiClient;

    /// Verb used by [`Creatable`]. Default: `PUT`.
    fn create_method(&self) -> Method {
        Method::PUT
    }
}

/// Optional expansions of retrieved objects, sent as bare query flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Include {
    /// Include object data (`incldata`).
    pub data: bool,
    /// Include subordinate objects (`inclsub`).
    pub subordinates: bool,
}

impl Include {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn data() -> Self {
        Self {
            data: true,
            subordinates: false,
        }
    }

    pub fn subordinates() -> Self {
        Self {
            data: false,
            subordinates: true,
        }
    }

    pub fn with_data(mut self, data: bool) -> Self {
        self.data = data;
        self
    }

    pub fn with_subordinates(mut self, subordinates: bool) -> Self {
        self.subordinates = subordinates;
        self
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .flag_if("incldata", self.data)
            .flag_if("inclsub", self.subordinates)
    }
}

/// Ready-made resource implementing every capability for model `M`.
pub struct Resource<M> {
    client: SharpAiClient,
    name: String,
    create_method: Method,
    _model: PhantomData<fn() -> M>,
}

impl<M> Resource<M> {
    pub fn new(client: SharpAiClient, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            create_method: Method::PUT,
            _model: PhantomData,
        }
    }

    /// Resource bound to the process-wide client.
    pub fn from_global(name: impl Into<String>) -> Result<Self> {
        Ok(Self::new(client::client()?, name))
    }

    /// Use `method` instead of `PUT` for [`Creatable::create`].
    pub fn with_create_method(mut self, method: Method) -> Self {
        self.create_method = method;
        self
    }
}

impl<M> Clone for Resource<M> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            name: self.name.clone(),
            create_method: self.create_method.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for Resource<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("create_method", &self.create_method)
            .field("endpoint", &self.client.endpoint())
            .finish()
    }
}

impl<M> ApiResource for Resource<M>
where
    M: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    type Model = M;

    fn name(&self) -> &str {
        &self.name
    }

    fn client(&self) -> &SharpAiClient {
        &self.client
    }

    fn create_method(&self) -> Method {
        self.create_method.clone()
    }
}

macro_rules! impl_capabilities {
    ($($capability:ident),* $(,)?) => {
        $(
            impl<M> $capability for Resource<M>
            where
                M: Serialize + DeserializeOwned + Send + Sync + 'static,
            {
            }
        )*
    };
}

impl_capabilities!(
    Exists,
    Creatable,
    CreatableMultiple,
    Retrievable,
    Updatable,
    Deletable,
    AllRetrievable,
    Searchable,
    Enumerable,
    EnumerableWithQuery,
);

//! Catalog source resource: where a catalog item was imported from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::Client;
use crate::error::CatalogError;
use crate::resource::{Entitleable, ResourceOptions};

const INDEX_PATH: &str = "/catalog/api/admin/sources";

/// A catalog source record as returned by the vRA API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A catalog source, identified by id or carrying a pre-fetched record.
#[derive(Debug)]
pub struct CatalogSource<'a> {
    client: &'a Client,
    id: String,
    data: SourceData,
}

impl<'a> CatalogSource<'a> {
    /// Construct a source, fetching its record when only an id is given.
    pub fn new(
        client: &'a Client,
        options: ResourceOptions<SourceData>,
    ) -> Result<Self, CatalogError> {
        options.validate()?;
        let (id, data) = match (options.id, options.data) {
            (_, Some(data)) => (data.id.clone(), data),
            (Some(id), None) => {
                let data = fetch_source(client, &id)?;
                (id, data)
            }
            (None, None) => return Err(CatalogError::Validation),
        };

        Ok(Self { client, id, data })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &SourceData {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    pub fn type_id(&self) -> Option<&str> {
        self.data.type_id.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.data.description.as_deref()
    }
}

impl Entitleable for CatalogSource<'_> {
    const IDENTIFIER_TYPE: &'static str = "CatalogSourceIdentifier";

    fn client(&self) -> &Client {
        self.client
    }

    fn id(&self) -> &str {
        &self.id
    }
}

fn fetch_source(client: &Client, id: &str) -> Result<SourceData, CatalogError> {
    debug!(id, "fetching catalog source");
    Ok(client.get_parsed(&format!("{INDEX_PATH}/{id}"))?)
}

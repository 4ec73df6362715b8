//! Catalog type resource: the classification of a catalog item.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::CatalogError;
use crate::resource::ResourceOptions;

const INDEX_PATH: &str = "/catalog/api/types";

/// A catalog type record.
///
/// Item records embed this as their `type` sub-object; anything beyond the
/// identifying fields is vendor-defined and retained as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTypeData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A catalog type, identified by id or carrying a pre-fetched record.
#[derive(Debug)]
pub struct CatalogType {
    id: String,
    data: CatalogTypeData,
}

impl CatalogType {
    /// Construct a type, fetching its record when only an id is given.
    pub fn new(
        client: &Client,
        options: ResourceOptions<CatalogTypeData>,
    ) -> Result<Self, CatalogError> {
        options.validate()?;
        let (id, data) = match (options.id, options.data) {
            (_, Some(data)) => (data.id.clone(), data),
            (Some(id), None) => {
                let data = fetch_type(client, &id)?;
                (id, data)
            }
            (None, None) => return Err(CatalogError::Validation),
        };

        Ok(Self { id, data })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &CatalogTypeData {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }
}

fn fetch_type(client: &Client, id: &str) -> Result<CatalogTypeData, CatalogError> {
    debug!(id, "fetching catalog type");
    Ok(client.get_parsed(&format!("{INDEX_PATH}/{id}"))?)
}

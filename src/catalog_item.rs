//! Catalog item resource: fetching, field access, and template export.

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog_source::CatalogSource;
use crate::catalog_type::{CatalogType, CatalogTypeData};
use crate::client::Client;
use crate::error::CatalogError;
use crate::resource::{Entitleable, ResourceOptions};

const INDEX_PATH: &str = "/catalog/api/admin/items";

/// Conventional directory for bulk template exports.
pub const DEFAULT_TEMPLATE_DIR: &str = "vra_templates";

// Keys of the `organization` mapping.
const TENANT_REF: &str = "tenantRef";
const TENANT_LABEL: &str = "tenantLabel";
const SUBTENANT_REF: &str = "subtenantRef";
const SUBTENANT_LABEL: &str = "subtenantLabel";

/// Tenant attributes of a catalog item. Values may be null on the wire.
pub type Organization = BTreeMap<String, Option<String>>;

static EMPTY_ORGANIZATION: Organization = BTreeMap::new();

/// Binding between a catalog item and the provider-side blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderBinding {
    pub binding_id: String,
    #[serde(default)]
    pub provider_ref: Option<String>,
}

/// A catalog item record as returned by the vRA API.
///
/// Only `id` is required; the remaining fields are projected as-is and may
/// be absent depending on the item's source and lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub icon_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub provider_binding: Option<ProviderBinding>,
    #[serde(default, rename = "type")]
    pub type_: Option<CatalogTypeData>,
}

/// A single catalog item: a read-only view over one fetched record.
///
/// Constructed per lookup, either from a pre-fetched record or by id (one
/// blocking fetch). The derived [`CatalogSource`] and [`CatalogType`]
/// objects are built on first access and cached for the item's lifetime.
#[derive(Debug)]
pub struct CatalogItem<'a> {
    client: &'a Client,
    id: String,
    data: CatalogItemData,
    source: OnceCell<CatalogSource<'a>>,
    type_: OnceCell<CatalogType>,
}

impl<'a> CatalogItem<'a> {
    /// Construct an item from [`ResourceOptions`].
    ///
    /// With `data` supplied the id is taken from the record and no request
    /// is made; with only an `id` the record is fetched. Neither is a
    /// validation error, raised before any network call.
    pub fn new(
        client: &'a Client,
        options: ResourceOptions<CatalogItemData>,
    ) -> Result<Self, CatalogError> {
        options.validate()?;
        let (id, data) = match (options.id, options.data) {
            (_, Some(data)) => (data.id.clone(), data),
            (Some(id), None) => {
                let data = fetch_catalog_item(client, &id)?;
                (id, data)
            }
            (None, None) => return Err(CatalogError::Validation),
        };

        Ok(Self {
            client,
            id,
            data,
            source: OnceCell::new(),
            type_: OnceCell::new(),
        })
    }

    /// Fetch an item by id.
    pub fn fetch_by_id(client: &'a Client, id: impl Into<String>) -> Result<Self, CatalogError> {
        Self::new(client, ResourceOptions::by_id(id))
    }

    /// Wrap a pre-fetched record without making a request.
    pub fn from_data(client: &'a Client, data: CatalogItemData) -> Result<Self, CatalogError> {
        Self::new(client, ResourceOptions::from_data(data))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &CatalogItemData {
        &self.data
    }

    pub fn name(&self) -> Option<&str> {
        self.data.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.data.description.as_deref()
    }

    pub fn source_id(&self) -> Option<&str> {
        self.data.source_id.as_deref()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.data.source_name.as_deref()
    }

    pub fn icon_id(&self) -> Option<&str> {
        self.data.icon_id.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.data.status.as_deref()
    }

    /// The item's tenant attributes; empty when the record carries none.
    pub fn organization(&self) -> &Organization {
        self.data.organization.as_ref().unwrap_or(&EMPTY_ORGANIZATION)
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.organization_value(TENANT_REF)
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.organization_value(TENANT_LABEL)
    }

    pub fn subtenant_id(&self) -> Option<&str> {
        self.organization_value(SUBTENANT_REF)
    }

    pub fn subtenant_name(&self) -> Option<&str> {
        self.organization_value(SUBTENANT_LABEL)
    }

    /// The provider-side blueprint id, `None` when the record carries no
    /// provider binding.
    pub fn blueprint_id(&self) -> Option<&str> {
        self.data
            .provider_binding
            .as_ref()
            .map(|binding| binding.binding_id.as_str())
    }

    /// The item's catalog source, constructed (with its own fetch) on first
    /// access and cached for the item's lifetime.
    pub fn source(&self) -> Result<&CatalogSource<'a>, CatalogError> {
        if let Some(source) = self.source.get() {
            return Ok(source);
        }
        let id = self
            .data
            .source_id
            .clone()
            .ok_or(CatalogError::Validation)?;
        let source = CatalogSource::new(self.client, ResourceOptions::by_id(id))?;
        Ok(self.source.get_or_init(|| source))
    }

    /// The item's catalog type, built from the record's `type` sub-object
    /// on first access and cached for the item's lifetime.
    pub fn item_type(&self) -> Result<&CatalogType, CatalogError> {
        if let Some(catalog_type) = self.type_.get() {
            return Ok(catalog_type);
        }
        let data = self.data.type_.clone().ok_or(CatalogError::Validation)?;
        let catalog_type = CatalogType::new(self.client, ResourceOptions::from_data(data))?;
        Ok(self.type_.get_or_init(|| catalog_type))
    }

    fn organization_value(&self, key: &str) -> Option<&str> {
        self.organization().get(key).and_then(Option::as_deref)
    }

    // -----------------------------------------------------------------------
    // Template export
    // -----------------------------------------------------------------------

    /// Fetch the raw provisioning-request template for a catalog item.
    ///
    /// The body is returned uninterpreted; transport errors propagate as-is.
    pub fn dump_template(client: &Client, id: &str) -> Result<String, CatalogError> {
        Ok(client.get_raw(&format!(
            "/catalog-service/api/consumer/entitledCatalogItems/{id}/requests/template"
        ))?)
    }

    /// Write a catalog item's template to a file as pretty-printed JSON.
    ///
    /// Defaults to `{id}.json` in the working directory. The file is
    /// overwritten if it exists; the path written is returned.
    pub fn write_template(
        client: &Client,
        id: &str,
        filename: Option<PathBuf>,
    ) -> Result<PathBuf, CatalogError> {
        let filename = filename.unwrap_or_else(|| PathBuf::from(format!("{id}.json")));
        let contents = Self::dump_template(client, id)?;
        let template: serde_json::Value = serde_json::from_str(&contents)?;
        fs::write(&filename, serde_json::to_string_pretty(&template)?)?;
        debug!(id, filename = %filename.display(), "wrote catalog template");
        Ok(filename)
    }

    /// Export the templates of every entitled catalog item into `dir_name`.
    ///
    /// File names derive from the item id when `use_id` is set, otherwise
    /// from the item name with spaces replaced by underscores (falling back
    /// to the id for nameless records); the full path is lower-cased. The
    /// batch is fail-fast: the first error aborts the remaining items and
    /// already-written files are left in place.
    pub fn dump_templates(
        client: &Client,
        dir_name: impl AsRef<Path>,
        use_id: bool,
    ) -> Result<Vec<PathBuf>, CatalogError> {
        let dir_name = dir_name.as_ref();
        fs::create_dir_all(dir_name)?;

        let items = client.catalog().entitled_items()?;
        let mut written = Vec::with_capacity(items.len());
        for item in &items {
            let base = if use_id {
                item.id().to_string()
            } else {
                item.name().unwrap_or(item.id()).replace(' ', "_")
            };
            let filename = PathBuf::from(
                dir_name
                    .join(format!("{base}.json"))
                    .to_string_lossy()
                    .to_lowercase(),
            );
            Self::write_template(client, item.id(), Some(filename.clone()))?;
            written.push(filename);
        }
        Ok(written)
    }
}

impl Entitleable for CatalogItem<'_> {
    const IDENTIFIER_TYPE: &'static str = "CatalogItemIdentifier";

    fn client(&self) -> &Client {
        self.client
    }

    fn id(&self) -> &str {
        &self.id
    }
}

fn fetch_catalog_item(client: &Client, id: &str) -> Result<CatalogItemData, CatalogError> {
    debug!(id, "fetching catalog item");
    client
        .get_parsed(&format!("{INDEX_PATH}/{id}"))
        .map_err(|err| {
            // The only error translation in this module: the raw 404 from
            // the fetch-by-id path is never exposed to callers.
            if err.is_not_found() {
                CatalogError::NotFound { id: id.to_string() }
            } else {
                err.into()
            }
        })
}

//! Catalog-wide operations: item listing and entitled-item enumeration.

use serde::Deserialize;
use tracing::debug;

use crate::catalog_item::{CatalogItem, CatalogItemData};
use crate::client::Client;
use crate::error::CatalogError;

// The listing endpoints page their results; one large page covers the
// catalogs this client targets, full pagination is left to the server SDKs.
const PAGE_SIZE: u32 = 1000;

#[derive(Debug, Deserialize)]
struct ItemsPage {
    #[serde(default)]
    content: Vec<CatalogItemData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntitledItemEntry {
    catalog_item: CatalogItemData,
}

#[derive(Debug, Deserialize)]
struct EntitledItemsPage {
    #[serde(default)]
    content: Vec<EntitledItemEntry>,
}

/// Handle for catalog-wide operations, obtained via [`Client::catalog`].
#[derive(Debug)]
pub struct Catalog<'a> {
    client: &'a Client,
}

impl<'a> Catalog<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All catalog items visible to the client.
    pub fn all_items(&self) -> Result<Vec<CatalogItem<'a>>, CatalogError> {
        let page: ItemsPage = self
            .client
            .get_parsed(&format!("/catalog/api/admin/items?size={PAGE_SIZE}"))?;
        debug!(n_items = page.content.len(), "received catalog items");
        page.content
            .into_iter()
            .map(|data| CatalogItem::from_data(self.client, data))
            .collect()
    }

    /// Catalog items the requesting principal is entitled to, carrying the
    /// records from the listing response (no per-item fetch).
    pub fn entitled_items(&self) -> Result<Vec<CatalogItem<'a>>, CatalogError> {
        let page: EntitledItemsPage = self.client.get_parsed(&format!(
            "/catalog-service/api/consumer/entitledCatalogItems?limit={PAGE_SIZE}"
        ))?;
        debug!(n_items = page.content.len(), "received entitled items");
        page.content
            .into_iter()
            .map(|entry| CatalogItem::from_data(self.client, entry.catalog_item))
            .collect()
    }
}

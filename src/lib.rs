//! Client library for the VMware vRealize Automation (vRA) service catalog.
//!
//! This crate provides:
//! - HTTP client construction with bearer token authentication
//! - Catalog item lookup with typed accessors over the remote record
//! - Derived source/type resources and entitlement requests
//! - Bulk export of provisioning-request templates to disk
//!
//! ## Usage
//!
//! ```ignore
//! use vra_client::{CatalogItem, Client, ClientConfig};
//!
//! let config = ClientConfig::new("https://vra.corp.local").with_token(token);
//! let client = Client::new(config)?;
//!
//! let item = CatalogItem::fetch_by_id(&client, "f2e8c-...")?;
//! println!("{:?} from {:?}", item.name(), item.source_name());
//!
//! CatalogItem::dump_templates(&client, vra_client::DEFAULT_TEMPLATE_DIR, false)?;
//! ```
//!
//! All requests are synchronous and blocking; there is no retry or recovery
//! logic, every error surfaces to the caller.

mod catalog;
mod catalog_item;
mod catalog_source;
mod catalog_type;
mod client;
mod config;
mod error;
mod resource;

pub use catalog::Catalog;
pub use catalog_item::{
    CatalogItem,
    CatalogItemData,
    Organization,
    ProviderBinding,
    DEFAULT_TEMPLATE_DIR,
};
pub use catalog_source::{CatalogSource, SourceData};
pub use catalog_type::{CatalogType, CatalogTypeData};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{CatalogError, ClientError};
pub use resource::{Entitleable, EntitlementOptions, ResourceOptions};

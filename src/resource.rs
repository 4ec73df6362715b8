//! Shared contract for catalog resource types.
//!
//! Every catalog resource (item, source, ...) is constructed from the same
//! shape of options and shares the entitlement operation; this module holds
//! that contract so the resource types stay thin.

use serde_json::json;

use crate::client::Client;
use crate::error::CatalogError;

/// Construction options shared by catalog resource types.
///
/// A resource is identified either by `id` (triggering a fetch) or by a
/// pre-fetched `data` record. Supplying neither is a validation error,
/// raised before any network call is made.
#[derive(Debug, Clone)]
pub struct ResourceOptions<D> {
    pub id: Option<String>,
    pub data: Option<D>,
}

impl<D> Default for ResourceOptions<D> {
    fn default() -> Self {
        Self {
            id: None,
            data: None,
        }
    }
}

impl<D> ResourceOptions<D> {
    /// Identify the resource by id; the record will be fetched.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            data: None,
        }
    }

    /// Supply a pre-fetched record; no fetch is performed.
    pub fn from_data(data: D) -> Self {
        Self {
            id: None,
            data: Some(data),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_none() && self.data.is_none() {
            return Err(CatalogError::Validation);
        }
        Ok(())
    }
}

/// Options for [`Entitleable::entitle`].
#[derive(Debug, Clone)]
pub struct EntitlementOptions {
    /// Project the entitlement is granted to.
    pub project_id: String,
    /// Extra definition fields merged into the request. The `id` and `type`
    /// keys are always set by the resource itself.
    pub definition: serde_json::Map<String, serde_json::Value>,
}

impl EntitlementOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            definition: serde_json::Map::new(),
        }
    }
}

/// Entitlement support shared by catalog resource types.
///
/// Each resource contributes the discriminator the entitlement API expects
/// in the request definition (`"CatalogItemIdentifier"` for items,
/// `"CatalogSourceIdentifier"` for sources).
pub trait Entitleable {
    /// Discriminator written into the entitlement definition.
    const IDENTIFIER_TYPE: &'static str;

    fn client(&self) -> &Client;
    fn id(&self) -> &str;

    /// Grant a project access to this resource.
    ///
    /// Issues `POST /catalog/api/admin/entitlements`. A caller-supplied
    /// `type` in the definition is overwritten by [`Self::IDENTIFIER_TYPE`].
    /// Transport errors propagate untranslated.
    fn entitle(&self, options: &EntitlementOptions) -> Result<serde_json::Value, CatalogError> {
        let mut definition = options.definition.clone();
        definition.insert("id".to_string(), json!(self.id()));
        definition.insert("type".to_string(), json!(Self::IDENTIFIER_TYPE));

        let body = json!({
            "projectId": options.project_id,
            "definition": definition,
        });
        Ok(self
            .client()
            .post_json("/catalog/api/admin/entitlements", &body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_item::CatalogItemData;

    #[test]
    fn empty_options_fail_validation() {
        let options: ResourceOptions<CatalogItemData> = ResourceOptions::default();
        assert!(matches!(
            options.validate(),
            Err(CatalogError::Validation)
        ));
    }

    #[test]
    fn id_only_options_pass_validation() {
        let options: ResourceOptions<CatalogItemData> = ResourceOptions::by_id("abc123");
        assert!(options.validate().is_ok());
    }
}

//! FHIR Bundle model
//!
//! Version-agnostic model for Bundles. Entry resources stay untyped
//! (`serde_json::Value`) so arbitrary resource types can pass through.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// FHIR Bundle resource
///
/// A container for a collection of resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id of this artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Indicates the purpose of this bundle - how it was intended to be used
    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// When the bundle was assembled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Entry in the bundle - will have a resource or information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<BundleEntry>>,

    /// Additional content beyond core fields (extensions, version-specific fields)
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

fn default_resource_type() -> String {
    "Bundle".to_string()
}

/// Type of Bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Document,
    Message,
    /// A transaction - intended to be processed atomically
    Transaction,
    #[serde(rename = "transaction-response")]
    TransactionResponse,
    Batch,
    #[serde(rename = "batch-response")]
    BatchResponse,
    History,
    Searchset,
    /// A set of resources collected for a specific purpose
    Collection,
}

/// Entry in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// Full URL for the entry (e.g., urn:uuid:...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    /// A resource in this bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    /// Transaction/batch request details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<BundleEntryRequest>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

/// Request details for a Bundle entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryRequest {
    /// HTTP verb for the entry (GET | POST | PUT | PATCH | DELETE)
    pub method: String,

    /// URL for HTTP equivalent of this entry
    pub url: String,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: HashMap<String, Value>,
}

impl BundleEntry {
    /// Resource type of the entry's resource, if present
    pub fn resource_type(&self) -> Option<&str> {
        self.resource
            .as_ref()
            .and_then(|r| r.get("resourceType"))
            .and_then(Value::as_str)
    }

    /// Logical id of the entry's resource, if present
    pub fn resource_id(&self) -> Option<&str> {
        self.resource
            .as_ref()
            .and_then(|r| r.get("id"))
            .and_then(Value::as_str)
    }
}

impl Bundle {
    /// Create a new Bundle with minimal required fields
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            id: None,
            bundle_type,
            timestamp: None,
            entry: None,
            extensions: HashMap::new(),
        }
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Get the number of entries in the bundle
    pub fn entry_count(&self) -> usize {
        self.entry.as_ref().map(|e| e.len()).unwrap_or(0)
    }

    /// Get entries as a slice
    pub fn entries(&self) -> &[BundleEntry] {
        self.entry.as_deref().unwrap_or(&[])
    }

    /// Add an entry to the bundle
    pub fn add_entry(&mut self, entry: BundleEntry) {
        self.entry.get_or_insert_with(Vec::new).push(entry);
    }

    /// Add a resource as a `PUT <ResourceType>/<id>` transaction entry
    ///
    /// No-op when the resource lacks a `resourceType` or `id`.
    pub fn add_put_entry(&mut self, full_url: Option<String>, resource: Value) {
        let resource_type = resource
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_string);
        let id = resource.get("id").and_then(Value::as_str).map(str::to_string);
        let (Some(resource_type), Some(id)) = (resource_type, id) else {
            return;
        };
        self.add_entry(BundleEntry {
            full_url,
            resource: Some(resource),
            request: Some(BundleEntryRequest {
                method: "PUT".to_string(),
                url: format!("{resource_type}/{id}"),
                extensions: HashMap::new(),
            }),
            extensions: HashMap::new(),
        });
    }

    /// Iterate over entry resources of the given resource type
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a Value> {
        self.entries()
            .iter()
            .filter(move |e| e.resource_type() == Some(resource_type))
            .filter_map(|e| e.resource.as_ref())
    }
}

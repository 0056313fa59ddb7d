//! Object references shared by the VM-operator CRDs
//!
//! Provides the Kubernetes-style references used for cross-resource links
//! (image providers, network providers) and for pulling data out of Secrets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference to an object in the same namespace, identified by type and name.
///
/// This follows the Kubernetes `TypedLocalObjectReference` pattern, with the
/// full `apiVersion` instead of only the API group:
/// - `apiVersion`: Group and version of the referenced resource (e.g., "vmoperator.vmware.com/v1alpha2")
/// - `kind`: Kind of the referenced resource (e.g., "VirtualMachineClass")
/// - `name`: Name of the referenced resource
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectRef {
    /// API version of the referenced resource
    pub api_version: String,

    /// Kind of the referenced resource
    pub kind: String,

    /// Name of the referenced resource
    pub name: String,
}

impl LocalObjectRef {
    /// Create a new reference with apiVersion, kind, and name
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Helper to create a reference to a resource in the VM-operator API group
    pub fn vmoperator(kind: &str, name: impl Into<String>) -> Self {
        Self::new(crate::API_VERSION, kind, name)
    }
}

/// Reference to an object whose kind may be omitted, such as a network.
///
/// When `kind` is empty the consumer picks the default for the field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialObjectRef {
    /// API version of the referenced resource (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the referenced resource (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Name of the referenced resource
    pub name: String,
}

/// Selects a single key of a Secret in the same namespace.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Name of the Secret
    pub name: String,

    /// Key within the Secret's data
    pub key: String,
}

/// Either a literal value or a value sourced from a Secret key.
///
/// Only one of `value` or `from` should be set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueOrSecretKeySelector {
    /// Literal value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Secret key holding the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<SecretKeySelector>,
}

/// A key paired with a literal or Secret-sourced value (used for vApp properties).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KeyValueOrSecretKeySelectorPair {
    /// Property key
    pub key: String,

    /// Property value
    #[serde(default)]
    pub value: ValueOrSecretKeySelector,
}

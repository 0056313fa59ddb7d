//! VirtualMachineImage and ClusterVirtualMachineImage CRDs
//!
//! Images are published by a content provider; users only read them. The
//! namespaced and cluster-scoped kinds share the same status shape.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::conditions::{Condition, impl_conditions};
use crate::references::LocalObjectRef;

/// VirtualMachineImageSpec defines the desired state of a VirtualMachineImage
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[kube(
    group = "vmoperator.vmware.com",
    version = "v1alpha2",
    kind = "VirtualMachineImage",
    namespaced,
    shortname = "vmi",
    shortname = "vmimage",
    status = "VirtualMachineImageStatus",
    printcolumn = r#"{"name":"Display-Name","type":"string","jsonPath":".status.name"}"#,
    printcolumn = r#"{"name":"Image-Version","type":"string","jsonPath":".status.productInfo.version"}"#,
    printcolumn = r#"{"name":"OS-Name","type":"string","jsonPath":".status.osInfo.type"}"#,
    printcolumn = r#"{"name":"Type","type":"string","jsonPath":".status.type"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineImageSpec {
    /// Provider object the image was synced from (e.g., a content library item)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<LocalObjectRef>,
}

/// ClusterVirtualMachineImageSpec defines the desired state of a ClusterVirtualMachineImage
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[kube(
    group = "vmoperator.vmware.com",
    version = "v1alpha2",
    kind = "ClusterVirtualMachineImage",
    shortname = "cvmi",
    shortname = "cvmimage",
    status = "VirtualMachineImageStatus",
    printcolumn = r#"{"name":"Display-Name","type":"string","jsonPath":".status.name"}"#,
    printcolumn = r#"{"name":"Image-Version","type":"string","jsonPath":".status.productInfo.version"}"#,
    printcolumn = r#"{"name":"OS-Name","type":"string","jsonPath":".status.osInfo.type"}"#,
    printcolumn = r#"{"name":"Type","type":"string","jsonPath":".status.type"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterVirtualMachineImageSpec {
    /// Provider object the image was synced from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<LocalObjectRef>,
}

impl From<ClusterVirtualMachineImageSpec> for VirtualMachineImageSpec {
    fn from(spec: ClusterVirtualMachineImageSpec) -> Self {
        Self {
            provider_ref: spec.provider_ref,
        }
    }
}

impl From<VirtualMachineImageSpec> for ClusterVirtualMachineImageSpec {
    fn from(spec: VirtualMachineImageSpec) -> Self {
        Self {
            provider_ref: spec.provider_ref,
        }
    }
}

/// VirtualMachineImageStatus defines the observed state of an image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineImageStatus {
    /// Display name of the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Capabilities advertised by the image (e.g., "cloud-init")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,

    /// Firmware the image boots with (BIOS or EFI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,

    /// Hardware version the image was built for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_version: Option<i32>,

    /// Guest operating system
    #[serde(default)]
    pub os_info: VirtualMachineImageOsInfo,

    /// User-configurable OVF properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ovf_properties: Vec<OvfProperty>,

    /// Product metadata from the OVF
    #[serde(default)]
    pub product_info: VirtualMachineImageProductInfo,

    /// Provider content version; changes when the content changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_content_version: Option<String>,

    /// Identifier of the item in the provider
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "providerItemID")]
    pub provider_item_id: Option<String>,

    /// OVF or ISO
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<ImageType>,

    /// Disks in the image
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<VirtualMachineImageDiskInfo>,

    /// Latest observations of the image state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl_conditions!(VirtualMachineImageStatus);

/// Image content format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageType {
    /// OVF template
    Ovf,
    /// ISO installation media
    Iso,
}

/// Guest OS described by an image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineImageOsInfo {
    /// Guest OS identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Guest OS type, e.g. "ubuntu64Guest"
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<String>,

    /// Guest OS version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Product metadata
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineImageProductInfo {
    /// Product name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Vendor name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Short version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Full version including build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_version: Option<String>,
}

/// OVF property a user may set through vAppConfig
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OvfProperty {
    /// Property key
    pub key: String,

    /// OVF type, e.g. "string" or "int"
    #[serde(rename = "type")]
    pub type_: String,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Disk shipped with an image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineImageDiskInfo {
    /// Virtual disk capacity as a quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,

    /// Size on the datastore as a quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl VirtualMachineImageStatus {
    /// Whether the image advertises the given capability.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

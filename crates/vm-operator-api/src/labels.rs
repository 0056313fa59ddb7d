//! Well-known label and annotation keys.
//!
//! The keys are read and written by the reconcilers that consume these types;
//! nothing in this crate acts on them.

/// Zone a VirtualMachine was placed in.
pub const ZONE_LABEL: &str = "topology.kubernetes.io/zone";

/// Failure domain label kept for clusters predating the zone label.
pub const FAILURE_DOMAIN_LABEL: &str = "failure-domain.beta.kubernetes.io/zone";

/// When present on a VirtualMachine, the controller skips reconciliation.
pub const PAUSE_ANNOTATION: &str = "vmoperator.vmware.com/paused";

/// Set once the first boot of a VirtualMachine has completed.
pub const FIRST_BOOT_DONE_ANNOTATION: &str = "virtualmachine.vmoperator.vmware.com/first-boot-done";

/// Instance ID handed to cloud-init; changing it re-runs cloud-init.
pub const CLOUD_INIT_INSTANCE_ID_ANNOTATION: &str = "vmoperator.vmware.com/cloud-init-instance-id";

/// Cluster module group a VirtualMachine belongs to.
pub const CLUSTER_MODULE_NAME_ANNOTATION: &str = "vsphere-cluster-module-group";

/// Comma-separated provider tag IDs attached to the backing VM.
pub const PROVIDER_TAGS_ANNOTATION: &str = "vsphere-tag";

/// Marks resources managed by a vCenter extension.
pub const MANAGED_BY_EXTENSION_KEY_ANNOTATION: &str = "vmoperator.vmware.com/managed-by-extension-key";

/// Marks resources managed by a vCenter extension type.
pub const MANAGED_BY_EXTENSION_TYPE_ANNOTATION: &str = "vmoperator.vmware.com/managed-by-extension-type";

/// Skips the "image is supported" check when deploying from an image.
pub const IMAGE_SUPPORTED_CHECK_ANNOTATION: &str = "vmoperator.vmware.com/image-supported-check";

/// Value of [`IMAGE_SUPPORTED_CHECK_ANNOTATION`] that disables the check.
pub const IMAGE_SUPPORTED_CHECK_DISABLE: &str = "disable";

/// Prefix for image labels describing the guest OS.
pub const IMAGE_OS_LABEL_PREFIX: &str = "os.vmoperator.vmware.com/";

/// Guest OS identifier label on images.
pub const IMAGE_OS_ID_LABEL: &str = "os.vmoperator.vmware.com/id";

/// Guest OS type label on images.
pub const IMAGE_OS_TYPE_LABEL: &str = "os.vmoperator.vmware.com/type";

/// Guest OS version label on images.
pub const IMAGE_OS_VERSION_LABEL: &str = "os.vmoperator.vmware.com/version";

/// Image label naming the content library item it was synced from.
pub const CONTENT_LIBRARY_ITEM_LABEL: &str = "imageregistry.vmware.com/content-library-item";

/// Returns true when `annotations` carries the pause annotation (any value).
pub fn is_paused(annotations: Option<&std::collections::BTreeMap<String, String>>) -> bool {
    annotations.is_some_and(|a| a.contains_key(PAUSE_ANNOTATION))
}

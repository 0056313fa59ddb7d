//! VirtualMachineClass CRD
//!
//! Describes the virtual hardware and resource policy of a VM. A class is
//! referenced by name from `VirtualMachineSpec::class_name`.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::conditions::{Condition, impl_conditions};
use crate::validation::{FieldError, Validate, ValidationErrors, check_quantity};

/// VirtualMachineClassSpec describes the virtual hardware and resource policy shared by VMs of a class
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[kube(
    group = "vmoperator.vmware.com",
    version = "v1alpha2",
    kind = "VirtualMachineClass",
    namespaced,
    shortname = "vmclass",
    status = "VirtualMachineClassStatus",
    printcolumn = r#"{"name":"CPU","type":"string","jsonPath":".spec.hardware.cpus"}"#,
    printcolumn = r#"{"name":"Memory","type":"string","jsonPath":".spec.hardware.memory"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineClassSpec {
    /// Controller responsible for VMs of this class (defaults to the VM-operator controller)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_name: Option<String>,

    /// Virtual hardware
    #[serde(default)]
    pub hardware: VirtualMachineClassHardware,

    /// Resource requests and limits
    #[serde(default)]
    pub policies: VirtualMachineClassPolicies,

    /// Free-form description shown to users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reserved capacity profile this class belongs to
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "reservedProfileID")]
    pub reserved_profile_id: Option<String>,

    /// Number of reserved slots for this class in the profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_slots: Option<i32>,
}

/// Virtual hardware of a class
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineClassHardware {
    /// Number of virtual CPUs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<i64>,

    /// Memory as a quantity (e.g., "4Gi")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,

    /// Passthrough and vGPU devices
    #[serde(default)]
    pub devices: VirtualDevices,

    /// Local storage created with every VM
    #[serde(default)]
    pub instance_storage: InstanceStorage,
}

/// Devices attached to every VM of the class
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDevices {
    /// NVIDIA vGPU devices
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "vgpuDevices")]
    pub vgpu_devices: Vec<VgpuDevice>,

    /// PCI passthrough devices matched by vendor and device ID
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "dynamicDirectPathIODevices")]
    pub dynamic_direct_path_io_devices: Vec<DynamicDirectPathIoDevice>,
}

/// vGPU device
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VgpuDevice {
    /// vGPU profile, e.g. "grid_t4-4q"
    pub profile_name: String,
}

/// PCI passthrough device
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDirectPathIoDevice {
    /// PCI vendor ID
    #[serde(rename = "vendorID")]
    pub vendor_id: i64,

    /// PCI device ID
    #[serde(rename = "deviceID")]
    pub device_id: i64,

    /// Label that narrows the match to specific host devices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
}

/// Local storage provisioned for every VM of the class
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStorage {
    /// StorageClass the volumes are provisioned from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Volumes created per VM
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<InstanceStorageVolume>,
}

/// One instance storage volume
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStorageVolume {
    /// Volume size as a quantity
    pub size: String,
}

/// Placement and resource policies
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineClassPolicies {
    /// CPU and memory reservations and limits
    #[serde(default)]
    pub resources: VirtualMachineClassResources,
}

/// Requests must not exceed limits.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineClassResources {
    /// Guaranteed amounts (reservations)
    #[serde(default)]
    pub requests: VirtualMachineResourceSpec,

    /// Upper bounds
    #[serde(default)]
    pub limits: VirtualMachineResourceSpec,
}

/// CPU and memory amounts as quantities
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineResourceSpec {
    /// CPU, e.g. "2" or "500m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    /// Memory, e.g. "4Gi"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

/// VirtualMachineClassStatus defines the observed state of a VirtualMachineClass
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineClassStatus {
    /// Capabilities the hosts can offer for this class (e.g., "vgpu")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,

    /// Whether the class can be used by VMs
    #[serde(default)]
    pub ready: bool,

    /// Latest observations of the class state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl_conditions!(VirtualMachineClassStatus);

impl Validate for VirtualMachineClassSpec {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Some(cpus) = self.hardware.cpus {
            if cpus <= 0 {
                errors.push(FieldError::invalid("spec.hardware.cpus", cpus, "must be positive"));
            }
        }
        if let Some(memory) = &self.hardware.memory {
            check_quantity(&mut errors, "spec.hardware.memory", memory);
        }
        for (i, volume) in self.hardware.instance_storage.volumes.iter().enumerate() {
            check_quantity(&mut errors, &format!("spec.hardware.instanceStorage.volumes[{i}].size"), &volume.size);
        }
        if let Some(slots) = self.reserved_slots {
            if slots < 0 {
                errors.push(FieldError::invalid("spec.reservedSlots", slots, "must not be negative"));
            }
        }

        check_requests_within_limits(&mut errors, "spec.policies.resources", &self.policies.resources.requests, &self.policies.resources.limits);

        errors.into_result()
    }
}

/// Report each resource whose request exceeds its limit. Resources missing
/// on either side are not compared.
pub(crate) fn check_requests_within_limits(
    errors: &mut ValidationErrors,
    base: &str,
    requests: &VirtualMachineResourceSpec,
    limits: &VirtualMachineResourceSpec,
) {
    let pairs = [
        ("cpu", requests.cpu.as_deref(), limits.cpu.as_deref()),
        ("memory", requests.memory.as_deref(), limits.memory.as_deref()),
    ];
    for (name, request, limit) in pairs {
        let request_field = format!("{base}.requests.{name}");
        let request = request.and_then(|r| check_quantity(errors, &request_field, r).map(|milli| (r, milli)));
        let limit = limit.and_then(|l| check_quantity(errors, &format!("{base}.limits.{name}"), l));
        if let (Some((raw, request)), Some(limit)) = (request, limit) {
            if request > limit {
                errors.push(FieldError::invalid(request_field, raw, "must be less than or equal to the limit"));
            }
        }
    }
}

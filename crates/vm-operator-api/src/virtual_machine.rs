//! VirtualMachine CRD
//!
//! Desired and observed state of a single virtual machine. The spec is
//! entirely optional so that a VM can be created from nothing but an image
//! and a class; defaults are applied by the controller.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::conditions::{Condition, impl_conditions};
use crate::references::{KeyValueOrSecretKeySelectorPair, LocalObjectRef, PartialObjectRef, SecretKeySelector};
use crate::validation::{FieldError, Validate, ValidationErrors, check_port, check_unique, is_dns_label, parse_cidr};

/// Lowest hardware version accepted in `minHardwareVersion`.
pub const MIN_SUPPORTED_HARDWARE_VERSION: i32 = 13;

/// VirtualMachineSpec defines the desired state of a VirtualMachine
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[kube(
    group = "vmoperator.vmware.com",
    version = "v1alpha2",
    kind = "VirtualMachine",
    namespaced,
    shortname = "vm",
    status = "VirtualMachineStatus",
    printcolumn = r#"{"name":"Power-State","type":"string","jsonPath":".status.powerState"}"#,
    printcolumn = r#"{"name":"Class","type":"string","priority":1,"jsonPath":".spec.className"}"#,
    printcolumn = r#"{"name":"Image","type":"string","priority":1,"jsonPath":".spec.imageName"}"#,
    printcolumn = r#"{"name":"Primary-IP4","type":"string","priority":1,"jsonPath":".status.network.primaryIP4"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSpec {
    /// Name of the VirtualMachineImage or ClusterVirtualMachineImage to deploy from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,

    /// Name of the VirtualMachineClass describing the VM's hardware
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// StorageClass used for the VM's boot disk and instance storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Guest bootstrap configuration
    ///
    /// CloudInit may not be combined with any other provider. LinuxPrep and
    /// Sysprep are mutually exclusive; either may be combined with vAppConfig.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<VirtualMachineBootstrapSpec>,

    /// Network configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<VirtualMachineNetworkSpec>,

    /// Desired power state (defaults to PoweredOn)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_state: Option<VirtualMachinePowerState>,

    /// How to power off the VM (defaults to TrySoft)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_off_mode: Option<VirtualMachinePowerOpMode>,

    /// How to suspend the VM (defaults to TrySoft)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspend_mode: Option<VirtualMachinePowerOpMode>,

    /// How to restart the VM (defaults to TrySoft)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_mode: Option<VirtualMachinePowerOpMode>,

    /// Request a restart by setting "now"; the controller replaces it with
    /// the RFC 3339 time at which the restart was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_restart_time: Option<String>,

    /// Volumes attached to the VM
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VirtualMachineVolume>,

    /// Readiness probe
    ///
    /// Only one of tcpSocket, guestHeartbeat, or guestInfo may be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readiness_probe: Option<VirtualMachineReadinessProbeSpec>,

    /// Advanced provider-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<VirtualMachineAdvancedSpec>,

    /// Reserved capacity settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<VirtualMachineReservedSpec>,

    /// Minimum hardware version of the VM (at least 13)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_hardware_version: Option<i32>,
}

/// Power state of a VirtualMachine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum VirtualMachinePowerState {
    /// Running
    PoweredOn,
    /// Stopped
    PoweredOff,
    /// Suspended to memory
    Suspended,
}

/// Power operation behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum VirtualMachinePowerOpMode {
    /// Perform the operation immediately, without involving the guest
    Hard,
    /// Ask the guest to perform the operation
    Soft,
    /// Ask the guest, falling back to Hard after a timeout
    #[default]
    TrySoft,
}

/// Bootstrap providers for the guest
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineBootstrapSpec {
    /// Cloud-init
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_init: Option<VirtualMachineBootstrapCloudInitSpec>,

    /// LinuxPrep customization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux_prep: Option<VirtualMachineBootstrapLinuxPrepSpec>,

    /// Windows Sysprep customization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sysprep: Option<VirtualMachineBootstrapSysprepSpec>,

    /// vApp properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_app_config: Option<VirtualMachineBootstrapVAppConfigSpec>,
}

/// Cloud-init bootstrap
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineBootstrapCloudInitSpec {
    /// Secret key holding raw cloud-config user data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_cloud_config: Option<SecretKeySelector>,

    /// SSH public keys added to the default user
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_authorized_keys: Vec<String>,

    /// Instance ID presented to cloud-init (defaults to the VM's UID)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "instanceID")]
    pub instance_id: Option<String>,
}

/// LinuxPrep guest customization
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineBootstrapLinuxPrepSpec {
    /// Whether the hardware clock is in UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_clock_is_utc: Option<bool>,

    /// Time zone, e.g. "America/New_York"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Sysprep guest customization
///
/// Either rawSysprep or sysprep, not both.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineBootstrapSysprepSpec {
    /// Secret key holding a raw unattend.xml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_sysprep: Option<SecretKeySelector>,

    /// Structured sysprep configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sysprep: Option<Sysprep>,
}

/// Structured sysprep configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Sysprep {
    /// GuiUnattended section of unattend.xml
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gui_unattended: Option<GuiUnattended>,

    /// Owner and product key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<SysprepUserData>,

    /// Domain or workgroup membership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<SysprepIdentification>,
}

/// Unattended login settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GuiUnattended {
    /// Log in as Administrator automatically
    #[serde(default)]
    pub auto_logon: bool,

    /// Number of automatic logins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_logon_count: Option<i32>,

    /// Administrator password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretKeySelector>,

    /// Windows time zone index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<i32>,
}

/// Registered owner
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SysprepUserData {
    /// Owner name
    #[serde(default)]
    pub full_name: String,

    /// Organization name
    #[serde(default)]
    pub org_name: String,

    /// Secret key holding the product key
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "productID")]
    pub product_id: Option<SecretKeySelector>,
}

/// Domain or workgroup membership; joinDomain and joinWorkgroup are mutually exclusive
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SysprepIdentification {
    /// Domain to join
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_domain: Option<String>,

    /// Account used to join the domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_admin: Option<String>,

    /// Secret key holding the domain admin password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_admin_password: Option<SecretKeySelector>,

    /// Workgroup to join
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_workgroup: Option<String>,
}

/// vApp properties; properties and rawProperties are mutually exclusive
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineBootstrapVAppConfigSpec {
    /// Individual properties, by value or from a secret
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<KeyValueOrSecretKeySelectorPair>,

    /// Name of a Secret whose keys are used as vApp properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_properties: Option<String>,
}

/// Guest network configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineNetworkSpec {
    /// Guest host name (defaults to the VM name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,

    /// Disable networking entirely; interfaces are ignored
    #[serde(default)]
    pub disabled: bool,

    /// Global DNS servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,

    /// Global DNS search domains
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_domains: Vec<String>,

    /// Network interfaces, in guest device order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<VirtualMachineNetworkInterfaceSpec>,
}

/// One guest network interface
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineNetworkInterfaceSpec {
    /// Interface name, unique within the VM (e.g., "eth0")
    pub name: String,

    /// Network to attach to (defaults to the namespace's default network)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<PartialObjectRef>,

    /// Static addresses in IP/prefix form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,

    /// Use DHCPv4; excludes gateway4 and IPv4 addresses
    #[serde(default)]
    pub dhcp4: bool,

    /// Use DHCPv6; excludes gateway6 and IPv6 addresses
    #[serde(default)]
    pub dhcp6: bool,

    /// IPv4 default gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway4: Option<String>,

    /// IPv6 default gateway
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway6: Option<String>,

    /// MTU in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,

    /// Per-interface DNS servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,

    /// Static routes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<VirtualMachineNetworkRouteSpec>,

    /// Per-interface DNS search domains
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_domains: Vec<String>,
}

/// Static route
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineNetworkRouteSpec {
    /// Destination in IP/prefix form
    pub to: String,

    /// Next hop
    pub via: String,

    /// Route metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<i32>,
}

/// A volume attached to the VM
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineVolume {
    /// Volume name, a DNS label unique within the VM
    pub name: String,

    /// Backing claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PersistentVolumeClaimVolumeSource>,
}

/// Reference to a PersistentVolumeClaim
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimVolumeSource {
    /// Claim name in the VM namespace
    pub claim_name: String,

    /// Attach read-only
    #[serde(default)]
    pub read_only: bool,

    /// Set when the claim is instance storage created from the class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_volume_claim: Option<InstanceVolumeClaimVolumeSource>,
}

/// Instance storage claim
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InstanceVolumeClaimVolumeSource {
    /// StorageClass for the claim
    pub storage_class: String,

    /// Requested size as a quantity
    pub size: String,
}

/// Readiness probe; only one action may be set
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineReadinessProbeSpec {
    /// Ready when the port accepts connections
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "tcpSocket")]
    pub tcp_socket: Option<TcpSocketAction>,

    /// Ready when guest heartbeat reaches a threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_heartbeat: Option<GuestHeartbeatAction>,

    /// Guest info keys whose values must match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guest_info: Vec<GuestInfoAction>,

    /// Seconds before a probe attempt times out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,

    /// Seconds between probe attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
}

/// TCP connect check
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TcpSocketAction {
    /// Port to connect to
    pub port: i32,

    /// Host to connect to (defaults to the VM's primary IP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Guest heartbeat check
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GuestHeartbeatAction {
    /// Lowest status that counts as ready
    #[serde(default)]
    pub threshold_status: GuestHeartbeatStatus,
}

/// VMware Tools heartbeat status, best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuestHeartbeatStatus {
    /// Healthy
    #[default]
    Green,
    /// Intermittent
    Yellow,
    /// No heartbeat
    Red,
    /// Tools not running
    Gray,
}

/// Guest info key check
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfoAction {
    /// Guest info key
    pub key: String,

    /// Regular expression the value must match; any value when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Advanced provider-specific options
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineAdvancedSpec {
    /// Boot disk capacity as a quantity; only grows the image's disk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_disk_capacity: Option<String>,

    /// Provisioning mode for volumes without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_volume_provisioning_mode: Option<VolumeProvisioningMode>,

    /// Enable changed block tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_block_tracking: Option<bool>,
}

/// Disk provisioning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum VolumeProvisioningMode {
    /// Allocate on write
    Thin,
    /// Allocate up front
    Thick,
    /// Allocate and zero up front
    ThickEagerZero,
}

/// Reserved capacity settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineReservedSpec {
    /// VirtualMachineSetResourcePolicy the VM is placed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_policy_name: Option<String>,
}

/// VirtualMachineStatus defines the observed state of a VirtualMachine
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineStatus {
    /// Host the VM is running on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Observed power state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_state: Option<VirtualMachinePowerState>,

    /// Latest observations of the VM state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// Observed guest networking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<VirtualMachineNetworkStatus>,

    /// Provider identifier of the backing VM
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "uniqueID")]
    pub unique_id: Option<String>,

    /// BIOS UUID
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "biosUUID")]
    pub bios_uuid: Option<String>,

    /// Instance UUID
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "instanceUUID")]
    pub instance_uuid: Option<String>,

    /// Per-volume attachment state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VirtualMachineVolumeStatus>,

    /// Whether changed block tracking is on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_block_tracking: Option<bool>,

    /// Availability zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    /// When the last requested restart happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_restart_time: Option<DateTime<Utc>>,

    /// Observed hardware version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_version: Option<i32>,

    /// Class the VM was deployed with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<LocalObjectRef>,

    /// Image the VM was deployed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<LocalObjectRef>,
}

impl_conditions!(VirtualMachineStatus);

/// Observed guest networking
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineNetworkStatus {
    /// Primary IPv4 address
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "primaryIP4")]
    pub primary_ip4: Option<String>,

    /// Primary IPv6 address
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "primaryIP6")]
    pub primary_ip6: Option<String>,

    /// Observed interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<VirtualMachineNetworkInterfaceStatus>,
}

/// One observed interface
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineNetworkInterfaceStatus {
    /// Interface name from the spec
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MAC address
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "macAddr")]
    pub mac_addr: Option<String>,

    /// Assigned addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<VirtualMachineNetworkInterfaceIpAddrStatus>,
}

/// An address on an interface
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineNetworkInterfaceIpAddrStatus {
    /// Address in IP/prefix form
    pub address: String,

    /// How the address was assigned (dhcp, static, linklayer, random)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Address state (preferred, deprecated, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Attachment state of one volume
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineVolumeStatus {
    /// Volume name from the spec
    pub name: String,

    /// Whether the disk is attached
    #[serde(default)]
    pub attached: bool,

    /// UUID of the attached disk
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "diskUUID")]
    pub disk_uuid: Option<String>,

    /// Last attach error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VirtualMachine {
    /// Desired power state, defaulting to PoweredOn.
    pub fn desired_power_state(&self) -> VirtualMachinePowerState {
        self.spec.power_state.unwrap_or(VirtualMachinePowerState::PoweredOn)
    }

    /// Whether reconciliation is paused via annotation.
    pub fn is_paused(&self) -> bool {
        crate::labels::is_paused(self.metadata.annotations.as_ref())
    }
}

impl Validate for VirtualMachineSpec {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if let Some(bootstrap) = &self.bootstrap {
            validate_bootstrap(&mut errors, bootstrap);
        }
        if let Some(network) = &self.network {
            validate_network(&mut errors, network);
        }
        validate_volumes(&mut errors, &self.volumes);
        if let Some(probe) = &self.readiness_probe {
            validate_readiness_probe(&mut errors, probe);
        }
        if let Some(version) = self.min_hardware_version {
            if version < MIN_SUPPORTED_HARDWARE_VERSION {
                errors.push(FieldError::invalid(
                    "spec.minHardwareVersion",
                    version,
                    format!("must be at least {MIN_SUPPORTED_HARDWARE_VERSION}"),
                ));
            }
        }
        if let Some(capacity) = self.advanced.as_ref().and_then(|a| a.boot_disk_capacity.as_deref()) {
            crate::validation::check_quantity(&mut errors, "spec.advanced.bootDiskCapacity", capacity);
        }
        if let Some(next) = self.next_restart_time.as_deref() {
            if !next.is_empty() && !next.eq_ignore_ascii_case("now") && DateTime::parse_from_rfc3339(next).is_err() {
                errors.push(FieldError::invalid(
                    "spec.nextRestartTime",
                    next,
                    "must be \"now\" or an RFC 3339 time",
                ));
            }
        }

        errors.into_result()
    }
}

fn validate_bootstrap(errors: &mut ValidationErrors, bootstrap: &VirtualMachineBootstrapSpec) {
    const BASE: &str = "spec.bootstrap";

    if bootstrap.cloud_init.is_some() {
        let others = [
            ("linuxPrep", bootstrap.linux_prep.is_some()),
            ("sysprep", bootstrap.sysprep.is_some()),
            ("vAppConfig", bootstrap.v_app_config.is_some()),
        ];
        for (name, _) in others.iter().filter(|(_, set)| *set) {
            errors.push(FieldError::mutually_exclusive([
                format!("{BASE}.cloudInit"),
                format!("{BASE}.{name}"),
            ]));
        }
    }

    if bootstrap.linux_prep.is_some() && bootstrap.sysprep.is_some() {
        errors.push(FieldError::mutually_exclusive([
            format!("{BASE}.linuxPrep"),
            format!("{BASE}.sysprep"),
        ]));
    }

    if let Some(sysprep) = &bootstrap.sysprep {
        match (&sysprep.raw_sysprep, &sysprep.sysprep) {
            (Some(_), Some(_)) => errors.push(FieldError::mutually_exclusive([
                format!("{BASE}.sysprep.rawSysprep"),
                format!("{BASE}.sysprep.sysprep"),
            ])),
            (None, None) => errors.push(FieldError::required(format!("{BASE}.sysprep.sysprep"))),
            _ => {}
        }
        let identification = sysprep.sysprep.as_ref().and_then(|s| s.identification.as_ref());
        if let Some(identification) = identification {
            if identification.join_domain.is_some() && identification.join_workgroup.is_some() {
                errors.push(FieldError::mutually_exclusive([
                    format!("{BASE}.sysprep.sysprep.identification.joinDomain"),
                    format!("{BASE}.sysprep.sysprep.identification.joinWorkgroup"),
                ]));
            }
        }
    }

    if let Some(v_app) = &bootstrap.v_app_config {
        if !v_app.properties.is_empty() && v_app.raw_properties.is_some() {
            errors.push(FieldError::mutually_exclusive([
                format!("{BASE}.vAppConfig.properties"),
                format!("{BASE}.vAppConfig.rawProperties"),
            ]));
        }
    }
}

fn validate_network(errors: &mut ValidationErrors, network: &VirtualMachineNetworkSpec) {
    check_unique(
        errors,
        "spec.network.interfaces.name",
        network.interfaces.iter().map(|i| i.name.as_str()).filter(|n| !n.is_empty()),
    );

    for (i, interface) in network.interfaces.iter().enumerate() {
        let base = format!("spec.network.interfaces[{i}]");
        if interface.name.is_empty() {
            errors.push(FieldError::required(format!("{base}.name")));
        }

        for (j, address) in interface.addresses.iter().enumerate() {
            let field = format!("{base}.addresses[{j}]");
            match parse_cidr(address) {
                Ok(IpAddr::V4(_)) if interface.dhcp4 => errors.push(FieldError::mutually_exclusive([
                    field,
                    format!("{base}.dhcp4"),
                ])),
                Ok(IpAddr::V6(_)) if interface.dhcp6 => errors.push(FieldError::mutually_exclusive([
                    field,
                    format!("{base}.dhcp6"),
                ])),
                Ok(_) => {}
                Err(reason) => errors.push(FieldError::invalid(field, address, reason)),
            }
        }

        validate_gateway(errors, &base, "gateway4", interface.gateway4.as_deref(), interface.dhcp4, true);
        validate_gateway(errors, &base, "gateway6", interface.gateway6.as_deref(), interface.dhcp6, false);

        if let Some(mtu) = interface.mtu {
            if mtu <= 0 {
                errors.push(FieldError::invalid(format!("{base}.mtu"), mtu, "must be positive"));
            }
        }

        for (j, route) in interface.routes.iter().enumerate() {
            if let Err(reason) = parse_cidr(&route.to) {
                errors.push(FieldError::invalid(format!("{base}.routes[{j}].to"), &route.to, reason));
            }
            if route.via.parse::<IpAddr>().is_err() {
                errors.push(FieldError::invalid(
                    format!("{base}.routes[{j}].via"),
                    &route.via,
                    "must be an IP address",
                ));
            }
        }
    }
}

fn validate_gateway(
    errors: &mut ValidationErrors,
    base: &str,
    name: &str,
    gateway: Option<&str>,
    dhcp: bool,
    v4: bool,
) {
    let Some(gateway) = gateway else {
        return;
    };
    let field = format!("{base}.{name}");
    let dhcp_field = if v4 { "dhcp4" } else { "dhcp6" };
    if dhcp {
        errors.push(FieldError::mutually_exclusive([field, format!("{base}.{dhcp_field}")]));
        return;
    }
    // "None" disables the default route on the interface.
    if gateway == "None" {
        return;
    }
    match gateway.parse::<IpAddr>() {
        Ok(ip) if ip.is_ipv4() == v4 => {}
        _ => {
            let family = if v4 { "IPv4" } else { "IPv6" };
            errors.push(FieldError::invalid(field, gateway, format!("must be an {family} address")));
        }
    }
}

fn validate_volumes(errors: &mut ValidationErrors, volumes: &[VirtualMachineVolume]) {
    check_unique(
        errors,
        "spec.volumes.name",
        volumes.iter().map(|v| v.name.as_str()).filter(|n| !n.is_empty()),
    );

    for (i, volume) in volumes.iter().enumerate() {
        let base = format!("spec.volumes[{i}]");
        if volume.name.is_empty() {
            errors.push(FieldError::required(format!("{base}.name")));
        } else if !is_dns_label(&volume.name) {
            errors.push(FieldError::invalid(format!("{base}.name"), &volume.name, "must be a DNS label"));
        }

        match &volume.persistent_volume_claim {
            None => errors.push(FieldError::required(format!("{base}.persistentVolumeClaim"))),
            Some(pvc) => {
                if pvc.claim_name.is_empty() {
                    errors.push(FieldError::required(format!("{base}.persistentVolumeClaim.claimName")));
                }
                if let Some(instance) = &pvc.instance_volume_claim {
                    crate::validation::check_quantity(
                        errors,
                        &format!("{base}.persistentVolumeClaim.instanceVolumeClaim.size"),
                        &instance.size,
                    );
                }
            }
        }
    }
}

fn validate_readiness_probe(errors: &mut ValidationErrors, probe: &VirtualMachineReadinessProbeSpec) {
    const BASE: &str = "spec.readinessProbe";

    let actions: Vec<&str> = [
        ("tcpSocket", probe.tcp_socket.is_some()),
        ("guestHeartbeat", probe.guest_heartbeat.is_some()),
        ("guestInfo", !probe.guest_info.is_empty()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect();
    if actions.len() > 1 {
        errors.push(FieldError::mutually_exclusive(actions.iter().map(|a| format!("{BASE}.{a}"))));
    }

    if let Some(tcp) = &probe.tcp_socket {
        check_port(errors, &format!("{BASE}.tcpSocket.port"), tcp.port);
    }
    for (name, value) in [("timeoutSeconds", probe.timeout_seconds), ("periodSeconds", probe.period_seconds)] {
        if let Some(seconds) = value {
            if seconds < 1 {
                errors.push(FieldError::invalid(format!("{BASE}.{name}"), seconds, "must be at least 1"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Conditions, VIRTUAL_MACHINE_CREATED_CONDITION};

    fn cloud_init() -> VirtualMachineBootstrapCloudInitSpec {
        VirtualMachineBootstrapCloudInitSpec {
            raw_cloud_config: Some(SecretKeySelector {
                name: "user-data".to_string(),
                key: "cloud-config".to_string(),
            }),
            ..Default::default()
        }
    }

    fn pvc_volume(name: &str) -> VirtualMachineVolume {
        VirtualMachineVolume {
            name: name.to_string(),
            persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
                claim_name: format!("{name}-pvc"),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_empty_spec_is_valid() {
        assert_eq!(VirtualMachineSpec::default().validate(), Ok(()));
    }

    #[test]
    fn test_cloud_init_excludes_other_providers() {
        let spec = VirtualMachineSpec {
            bootstrap: Some(VirtualMachineBootstrapSpec {
                cloud_init: Some(cloud_init()),
                sysprep: Some(VirtualMachineBootstrapSysprepSpec {
                    sysprep: Some(Sysprep::default()),
                    ..Default::default()
                }),
                v_app_config: Some(VirtualMachineBootstrapVAppConfigSpec::default()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let errors = spec.validate().expect_err("cloudInit with sysprep and vAppConfig");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, FieldError::MutuallyExclusive { .. })));
        assert!(errors.iter().any(|e| e.to_string().contains("spec.bootstrap.sysprep")));
        assert!(errors.iter().any(|e| e.to_string().contains("spec.bootstrap.vAppConfig")));
    }

    #[test]
    fn test_linux_prep_with_vapp_config_is_valid() {
        let spec = VirtualMachineSpec {
            bootstrap: Some(VirtualMachineBootstrapSpec {
                linux_prep: Some(VirtualMachineBootstrapLinuxPrepSpec {
                    hardware_clock_is_utc: Some(true),
                    time_zone: Some("UTC".to_string()),
                }),
                v_app_config: Some(VirtualMachineBootstrapVAppConfigSpec {
                    raw_properties: Some("vapp-props".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(spec.validate(), Ok(()));

        let spec = VirtualMachineSpec {
            bootstrap: Some(VirtualMachineBootstrapSpec {
                v_app_config: Some(VirtualMachineBootstrapVAppConfigSpec {
                    properties: vec![KeyValueOrSecretKeySelectorPair::default()],
                    raw_properties: Some("vapp-props".to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("properties with rawProperties");
        assert_eq!(
            errors.0,
            vec![FieldError::mutually_exclusive([
                "spec.bootstrap.vAppConfig.properties",
                "spec.bootstrap.vAppConfig.rawProperties",
            ])]
        );
    }

    #[test]
    fn test_sysprep_requires_exactly_one_source() {
        let mut bootstrap = VirtualMachineBootstrapSpec {
            sysprep: Some(VirtualMachineBootstrapSysprepSpec::default()),
            ..Default::default()
        };
        let spec = VirtualMachineSpec {
            bootstrap: Some(bootstrap.clone()),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("empty sysprep");
        assert_eq!(errors.0, vec![FieldError::required("spec.bootstrap.sysprep.sysprep")]);

        bootstrap.sysprep = Some(VirtualMachineBootstrapSysprepSpec {
            raw_sysprep: Some(SecretKeySelector::default()),
            sysprep: Some(Sysprep::default()),
        });
        let spec = VirtualMachineSpec {
            bootstrap: Some(bootstrap),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("both sysprep sources");
        assert!(matches!(errors.0[0], FieldError::MutuallyExclusive { .. }));
    }

    #[test]
    fn test_network_interface_rules() {
        let spec = VirtualMachineSpec {
            network: Some(VirtualMachineNetworkSpec {
                interfaces: vec![
                    VirtualMachineNetworkInterfaceSpec {
                        name: "eth0".to_string(),
                        addresses: vec!["192.168.1.10/24".to_string(), "2001:db8::10/64".to_string()],
                        gateway4: Some("192.168.1.1".to_string()),
                        gateway6: Some("2001:db8::1".to_string()),
                        ..Default::default()
                    },
                    VirtualMachineNetworkInterfaceSpec {
                        name: "eth1".to_string(),
                        dhcp4: true,
                        gateway6: Some("None".to_string()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(spec.validate(), Ok(()));

        let spec = VirtualMachineSpec {
            network: Some(VirtualMachineNetworkSpec {
                interfaces: vec![
                    VirtualMachineNetworkInterfaceSpec {
                        name: "eth0".to_string(),
                        dhcp4: true,
                        addresses: vec!["10.0.0.5/8".to_string()],
                        gateway4: Some("10.0.0.1".to_string()),
                        ..Default::default()
                    },
                    VirtualMachineNetworkInterfaceSpec {
                        name: "eth0".to_string(),
                        addresses: vec!["10.0.0.6".to_string()],
                        gateway6: Some("10.0.0.1".to_string()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("invalid interfaces");
        let fields: Vec<&str> = errors.iter().map(FieldError::field).collect();
        assert_eq!(
            fields,
            vec![
                "spec.network.interfaces.name",
                "spec.network.interfaces[0].addresses[0]",
                "spec.network.interfaces[0].gateway4",
                "spec.network.interfaces[1].addresses[0]",
                "spec.network.interfaces[1].gateway6",
            ]
        );
    }

    #[test]
    fn test_dhcp6_excludes_static_ipv6() {
        let spec = VirtualMachineSpec {
            network: Some(VirtualMachineNetworkSpec {
                interfaces: vec![VirtualMachineNetworkInterfaceSpec {
                    name: "eth0".to_string(),
                    dhcp6: true,
                    addresses: vec!["192.168.1.10/24".to_string(), "2001:db8::10/64".to_string()],
                    gateway6: Some("2001:db8::1".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("dhcp6 with static IPv6");
        assert_eq!(
            errors.0,
            vec![
                FieldError::mutually_exclusive([
                    "spec.network.interfaces[0].addresses[1]",
                    "spec.network.interfaces[0].dhcp6",
                ]),
                FieldError::mutually_exclusive([
                    "spec.network.interfaces[0].gateway6",
                    "spec.network.interfaces[0].dhcp6",
                ]),
            ]
        );
    }

    #[test]
    fn test_empty_names_are_only_required() {
        let spec = VirtualMachineSpec {
            network: Some(VirtualMachineNetworkSpec {
                interfaces: vec![
                    VirtualMachineNetworkInterfaceSpec::default(),
                    VirtualMachineNetworkInterfaceSpec::default(),
                ],
                ..Default::default()
            }),
            volumes: vec![
                VirtualMachineVolume {
                    name: String::new(),
                    ..pvc_volume("a")
                },
                VirtualMachineVolume {
                    name: String::new(),
                    ..pvc_volume("b")
                },
            ],
            ..Default::default()
        };
        let errors = spec.validate().expect_err("empty names");
        assert_eq!(
            errors.0,
            vec![
                FieldError::required("spec.network.interfaces[0].name"),
                FieldError::required("spec.network.interfaces[1].name"),
                FieldError::required("spec.volumes[0].name"),
                FieldError::required("spec.volumes[1].name"),
            ]
        );
    }

    #[test]
    fn test_volume_rules() {
        let spec = VirtualMachineSpec {
            volumes: vec![
                pvc_volume("data"),
                pvc_volume("data"),
                VirtualMachineVolume {
                    name: "Bad_Name".to_string(),
                    persistent_volume_claim: None,
                },
            ],
            ..Default::default()
        };
        let errors = spec.validate().expect_err("invalid volumes");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.0[0], FieldError::duplicate("spec.volumes.name", "data"));
        assert_eq!(errors.0[2], FieldError::required("spec.volumes[2].persistentVolumeClaim"));
    }

    #[test]
    fn test_readiness_probe_single_action() {
        let spec = VirtualMachineSpec {
            readiness_probe: Some(VirtualMachineReadinessProbeSpec {
                tcp_socket: Some(TcpSocketAction { port: 0, host: None }),
                guest_heartbeat: Some(GuestHeartbeatAction::default()),
                period_seconds: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("invalid probe");
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors.0[0], FieldError::MutuallyExclusive { .. }));
    }

    #[test]
    fn test_hardware_version_restart_time_and_capacity() {
        let spec = VirtualMachineSpec {
            min_hardware_version: Some(11),
            next_restart_time: Some("tomorrow".to_string()),
            advanced: Some(VirtualMachineAdvancedSpec {
                boot_disk_capacity: Some("lots".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("invalid scalars");
        let fields: Vec<&str> = errors.iter().map(FieldError::field).collect();
        assert_eq!(
            fields,
            vec!["spec.minHardwareVersion", "spec.advanced.bootDiskCapacity", "spec.nextRestartTime"]
        );

        let spec = VirtualMachineSpec {
            min_hardware_version: Some(MIN_SUPPORTED_HARDWARE_VERSION),
            next_restart_time: Some("now".to_string()),
            ..Default::default()
        };
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn test_desired_power_state_and_pause() {
        let mut vm = VirtualMachine::new("web-0", VirtualMachineSpec::default());
        assert_eq!(vm.desired_power_state(), VirtualMachinePowerState::PoweredOn);
        assert!(!vm.is_paused());

        vm.spec.power_state = Some(VirtualMachinePowerState::Suspended);
        vm.metadata.annotations = Some(
            [(crate::labels::PAUSE_ANNOTATION.to_string(), "true".to_string())]
                .into_iter()
                .collect(),
        );
        assert_eq!(vm.desired_power_state(), VirtualMachinePowerState::Suspended);
        assert!(vm.is_paused());
    }

    #[test]
    fn test_status_conditions() {
        let mut status = VirtualMachineStatus::default();
        status.mark_true(VIRTUAL_MACHINE_CREATED_CONDITION);
        assert!(status.is_true(VIRTUAL_MACHINE_CREATED_CONDITION));
    }
}

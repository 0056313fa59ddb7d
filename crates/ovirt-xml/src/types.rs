//! Engine API records
//!
//! Every field is optional. `None` means "not set" and is omitted from the
//! XML; `Some(vec![])` is an explicitly empty list and is written as an empty
//! wrapper element. Entity records carry `id` and `href`, which are written as
//! XML attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{
    Architecture, BootDevice, CpuMode, DiskFormat, DiskInterface, DiskStatus, HostStatus, NicInterface,
    TemplateStatus, VmAffinity, VmStatus, VmType,
};

/// Virtual machine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vm {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Free-form comment
    pub comment: Option<String>,
    /// CPU configuration
    pub cpu: Option<Cpu>,
    /// When the entity was created
    pub creation_time: Option<DateTime<Utc>>,
    /// Hook properties
    pub custom_properties: Option<Vec<CustomProperty>>,
    /// Refuse deletion while set
    pub delete_protected: Option<bool>,
    /// Description
    pub description: Option<String>,
    /// Guest initialization data
    pub initialization: Option<Initialization>,
    /// Memory in bytes
    pub memory: Option<i64>,
    /// Memory ballooning and guarantees
    pub memory_policy: Option<MemoryPolicy>,
    /// Name
    pub name: Option<String>,
    /// Guest operating system and boot settings
    pub os: Option<OperatingSystem>,
    /// Host placement
    pub placement_policy: Option<VmPlacementPolicy>,
    /// When the VM was last started
    pub start_time: Option<DateTime<Utc>>,
    /// Discard changes on shutdown
    pub stateless: Option<bool>,
    /// Current state
    pub status: Option<VmStatus>,
    /// Device preset
    #[serde(rename = "type")]
    pub type_: Option<VmType>,

    /// Cluster the entity belongs to
    pub cluster: Option<Cluster>,
    /// Attached disks
    pub disk_attachments: Option<Vec<DiskAttachment>>,
    /// Host the VM runs on
    pub host: Option<Host>,
    /// Instance type the VM was sized from
    pub instance_type: Option<InstanceType>,
    /// Network interfaces
    pub nics: Option<Vec<Nic>>,
    /// Tags assigned to the VM
    pub tags: Option<Vec<Tag>>,
    /// Template the VM was created from
    pub template: Option<Box<Template>>,
}

/// Template a VM is created from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Free-form comment
    pub comment: Option<String>,
    /// CPU configuration
    pub cpu: Option<Cpu>,
    /// When the entity was created
    pub creation_time: Option<DateTime<Utc>>,
    /// Description
    pub description: Option<String>,
    /// Memory in bytes
    pub memory: Option<i64>,
    /// Name
    pub name: Option<String>,
    /// Guest operating system and boot settings
    pub os: Option<OperatingSystem>,
    /// Template state
    pub status: Option<TemplateStatus>,
    /// Device preset of VMs created from the template
    #[serde(rename = "type")]
    pub type_: Option<VmType>,

    /// Cluster the entity belongs to
    pub cluster: Option<Cluster>,
    /// VM the template was created from
    pub vm: Option<Box<Vm>>,
}

/// Guest CPU
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cpu {
    /// CPU architecture
    pub architecture: Option<Architecture>,
    /// CPU model selection
    pub mode: Option<CpuMode>,
    /// Speed in MHz
    pub speed: Option<f64>,
    /// Sockets, cores and threads
    pub topology: Option<CpuTopology>,
}

/// CPU topology
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuTopology {
    /// Cores per socket
    pub cores: Option<i64>,
    /// Sockets
    pub sockets: Option<i64>,
    /// Threads per core
    pub threads: Option<i64>,
}

impl CpuTopology {
    /// Topology with every field set.
    pub fn new(cores: i64, sockets: i64, threads: i64) -> Self {
        Self {
            cores: Some(cores),
            sockets: Some(sockets),
            threads: Some(threads),
        }
    }
}

/// Guest OS and boot settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingSystem {
    /// Boot order
    pub boot: Option<Boot>,
    /// Kernel command line for direct boot
    pub cmdline: Option<String>,
    /// Kernel path for direct boot
    pub kernel: Option<String>,
    /// Engine OS identifier, e.g. "rhel_9x64"
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// Boot configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boot {
    /// Boot devices in order
    pub devices: Option<Vec<BootDevice>>,
}

/// Memory guarantees and limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryPolicy {
    /// Enable the memory balloon
    pub ballooning: Option<bool>,
    /// Guaranteed memory in bytes
    pub guaranteed: Option<i64>,
    /// Maximum memory in bytes (memory hot-plug ceiling)
    pub max: Option<i64>,
}

/// Guest initialization (cloud-init / sysprep) data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Initialization {
    /// Cloud-init script run on first boot
    pub custom_script: Option<String>,
    /// DNS search domains, space separated
    pub dns_search: Option<String>,
    /// DNS servers, space separated
    pub dns_servers: Option<String>,
    /// Guest host name
    pub host_name: Option<String>,
    /// Regenerate SSH host keys
    pub regenerate_ssh_keys: Option<bool>,
    /// Guest time zone
    pub timezone: Option<String>,
    /// User to create
    pub user_name: Option<String>,
}

/// Where a VM may run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmPlacementPolicy {
    /// Migration policy
    pub affinity: Option<VmAffinity>,
    /// Hosts the VM may run on
    pub hosts: Option<Vec<Host>>,
}

/// Hypervisor host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Host {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Address the engine reaches the host at
    pub address: Option<String>,
    /// Free-form comment
    pub comment: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Name
    pub name: Option<String>,
    /// Host state
    pub status: Option<HostStatus>,

    /// Cluster the entity belongs to
    pub cluster: Option<Cluster>,
}

/// Cluster of hosts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Free-form comment
    pub comment: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Name
    pub name: Option<String>,
}

/// Named hardware profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceType {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Description
    pub description: Option<String>,
    /// Memory in bytes
    pub memory: Option<i64>,
    /// Name
    pub name: Option<String>,
}

/// Label attached to entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Description
    pub description: Option<String>,
    /// Tag name
    pub name: Option<String>,

    /// Parent tag
    pub parent: Option<Box<Tag>>,
}

/// Virtual network interface card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nic {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Free-form comment
    pub comment: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Emulated NIC model
    pub interface: Option<NicInterface>,
    /// Link state is up
    pub linked: Option<bool>,
    /// MAC address
    pub mac: Option<Mac>,
    /// Name
    pub name: Option<String>,
    /// Hot-plugged into the guest
    pub plugged: Option<bool>,

    /// VM owning the NIC
    pub vm: Option<Box<Vm>>,
    /// Profile applied to the NIC
    pub vnic_profile: Option<VnicProfile>,
}

/// MAC address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mac {
    /// MAC address in colon form
    pub address: Option<String>,
}

/// Network settings applied to NICs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VnicProfile {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Description
    pub description: Option<String>,
    /// Name
    pub name: Option<String>,

    /// Logical network
    pub network: Option<Network>,
}

/// Logical network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Description
    pub description: Option<String>,
    /// MTU in bytes
    pub mtu: Option<i64>,
    /// Name
    pub name: Option<String>,
}

/// Virtual disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disk {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Display alias
    pub alias: Option<String>,
    /// Bytes used on storage
    pub actual_size: Option<i64>,
    /// Description
    pub description: Option<String>,
    /// On-disk format
    pub format: Option<DiskFormat>,
    /// Name
    pub name: Option<String>,
    /// Virtual size in bytes, as seen by the guest
    pub provisioned_size: Option<i64>,
    /// May be attached to several VMs
    pub shareable: Option<bool>,
    /// Thin provisioned
    pub sparse: Option<bool>,
    /// Current state
    pub status: Option<DiskStatus>,
    /// Bytes used including snapshots
    pub total_size: Option<i64>,

    /// Storage domains holding the disk
    pub storage_domains: Option<Vec<StorageDomain>>,
}

/// Attachment of a disk to a VM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskAttachment {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Attachment is active
    pub active: Option<bool>,
    /// Boot from this disk
    pub bootable: Option<bool>,
    /// Guest bus
    pub interface: Option<DiskInterface>,
    /// Pass discard requests to storage
    pub pass_discard: Option<bool>,
    /// Attached read-only
    pub read_only: Option<bool>,
    /// Allow SCSI reservation
    pub uses_scsi_reservation: Option<bool>,

    /// Attached disk
    pub disk: Option<Disk>,
    /// VM the disk is attached to
    pub vm: Option<Box<Vm>>,
}

/// Storage domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageDomain {
    /// Engine identifier
    pub id: Option<String>,
    /// API path of the entity
    pub href: Option<String>,

    /// Free bytes
    pub available: Option<i64>,
    /// Free-form comment
    pub comment: Option<String>,
    /// Bytes promised to disks
    pub committed: Option<i64>,
    /// Description
    pub description: Option<String>,
    /// Name
    pub name: Option<String>,
    /// Used bytes
    pub used: Option<i64>,
}

/// Free-form VM property interpreted by engine hooks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomProperty {
    /// Name
    pub name: Option<String>,
    /// Pattern the value must match
    pub regexp: Option<String>,
    /// Value
    pub value: Option<String>,
}

impl CustomProperty {
    /// Property with a name and value and no pattern.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            regexp: None,
        }
    }
}

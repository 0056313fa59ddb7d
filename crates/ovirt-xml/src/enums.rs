//! Enumerated values of the engine API
//!
//! Every enum is written to XML as its snake_case wire value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[doc = ""]
                #[doc = concat!("Wire value `", $wire, "`.")]
                #[serde(rename = $wire)]
                $variant
            ),+
        }

        impl $name {
            /// Every value, in wire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Run state of a virtual machine
    VmStatus {
        /// Not running
        Down => "down",
        /// Not running, an operation holds the disks
        ImageLocked => "image_locked",
        Migrating => "migrating",
        NotResponding => "not_responding",
        Paused => "paused",
        PoweringDown => "powering_down",
        PoweringUp => "powering_up",
        RebootInProgress => "reboot_in_progress",
        RestoringState => "restoring_state",
        SavingState => "saving_state",
        Suspended => "suspended",
        Unassigned => "unassigned",
        Unknown => "unknown",
        Up => "up",
        WaitForLaunch => "wait_for_launch",
    }
}

wire_enum! {
    /// Preset that decides which devices a VM gets
    VmType {
        /// SPICE console and sound device
        Desktop => "desktop",
        /// No sound device
        Server => "server",
        /// Headless, host CPU pass-through, no balloon, no migration
        HighPerformance => "high_performance",
    }
}

wire_enum! {
    /// How the guest CPU model is chosen
    CpuMode {
        Custom => "custom",
        /// Copy the host CPU make and model
        HostModel => "host_model",
        /// Pass the host CPU through, for nested virtualization
        HostPassthrough => "host_passthrough",
    }
}

wire_enum! {
    /// Whether a VM may move to another host
    VmAffinity {
        /// Automatic and manual migration (default)
        Migratable => "migratable",
        Pinned => "pinned",
        /// Manual migration only
        UserMigratable => "user_migratable",
    }
}

wire_enum! {
    /// CPU architecture
    Architecture {
        Aarch64 => "aarch64",
        Ppc64 => "ppc64",
        S390x => "s390x",
        Undefined => "undefined",
        X86_64 => "x86_64",
    }
}

wire_enum! {
    /// Device the guest boots from
    BootDevice {
        Cdrom => "cdrom",
        Hd => "hd",
        Network => "network",
    }
}

wire_enum! {
    /// Emulated NIC model
    NicInterface {
        E1000 => "e1000",
        E1000e => "e1000e",
        PciPassthrough => "pci_passthrough",
        Rtl8139 => "rtl8139",
        Rtl8139Virtio => "rtl8139_virtio",
        SpaprVlan => "spapr_vlan",
        Virtio => "virtio",
    }
}

wire_enum! {
    /// On-disk image format
    DiskFormat {
        /// Copy-on-write (qcow2)
        Cow => "cow",
        Raw => "raw",
    }
}

wire_enum! {
    /// Disk state
    DiskStatus {
        Illegal => "illegal",
        Locked => "locked",
        Ok => "ok",
    }
}

wire_enum! {
    /// Bus a disk is attached to the guest through
    DiskInterface {
        Ide => "ide",
        Sata => "sata",
        SpaprVscsi => "spapr_vscsi",
        Virtio => "virtio",
        VirtioScsi => "virtio_scsi",
    }
}

wire_enum! {
    /// Template state
    TemplateStatus {
        Illegal => "illegal",
        Locked => "locked",
        Ok => "ok",
    }
}

wire_enum! {
    /// Host state as seen by the engine
    HostStatus {
        Connecting => "connecting",
        Down => "down",
        Error => "error",
        Initializing => "initializing",
        InstallFailed => "install_failed",
        Installing => "installing",
        Kdumping => "kdumping",
        Maintenance => "maintenance",
        NonOperational => "non_operational",
        NonResponsive => "non_responsive",
        PendingApproval => "pending_approval",
        PreparingForMaintenance => "preparing_for_maintenance",
        Reboot => "reboot",
        Unassigned => "unassigned",
        Up => "up",
    }
}

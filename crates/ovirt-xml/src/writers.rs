//! Per-record XML writers
//!
//! Each implementation follows the same shape: `id`/`href` attributes, then
//! plain attributes in alphabetical order, then links to other entities in
//! alphabetical order. Unset fields are skipped.

use std::io::Write;

use crate::error::XmlError;
use crate::marshal::{XmlWrite, identity_attrs, write_many};
use crate::types::{
    Boot, Cluster, Cpu, CpuTopology, CustomProperty, Disk, DiskAttachment, Host, Initialization, InstanceType,
    Mac, MemoryPolicy, Network, Nic, OperatingSystem, StorageDomain, Tag, Template, Vm, VmPlacementPolicy,
    VnicProfile,
};
use crate::writer::XmlWriter;

impl XmlWrite for Vm {
    const TAG: &'static str = "vm";
    const PLURAL_TAG: &'static str = "vms";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.comment {
            writer.write_character("comment", r)?;
        }
        if let Some(r) = &self.cpu {
            r.write_xml(writer, "cpu")?;
        }
        if let Some(r) = &self.creation_time {
            writer.write_date("creation_time", r)?;
        }
        if let Some(r) = &self.custom_properties {
            write_many(writer, r, Some("custom_properties"), Some("custom_property"))?;
        }
        if let Some(r) = self.delete_protected {
            writer.write_bool("delete_protected", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = &self.initialization {
            r.write_xml(writer, "initialization")?;
        }
        if let Some(r) = self.memory {
            writer.write_i64("memory", r)?;
        }
        if let Some(r) = &self.memory_policy {
            r.write_xml(writer, "memory_policy")?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = &self.os {
            r.write_xml(writer, "os")?;
        }
        if let Some(r) = &self.placement_policy {
            r.write_xml(writer, "placement_policy")?;
        }
        if let Some(r) = &self.start_time {
            writer.write_date("start_time", r)?;
        }
        if let Some(r) = self.stateless {
            writer.write_bool("stateless", r)?;
        }
        if let Some(r) = self.status {
            writer.write_character("status", r.as_str())?;
        }
        if let Some(r) = self.type_ {
            writer.write_character("type", r.as_str())?;
        }
        if let Some(r) = &self.cluster {
            r.write_xml(writer, "cluster")?;
        }
        if let Some(r) = &self.disk_attachments {
            write_many(writer, r, Some("disk_attachments"), Some("disk_attachment"))?;
        }
        if let Some(r) = &self.host {
            r.write_xml(writer, "host")?;
        }
        if let Some(r) = &self.instance_type {
            r.write_xml(writer, "instance_type")?;
        }
        if let Some(r) = &self.nics {
            write_many(writer, r, Some("nics"), Some("nic"))?;
        }
        if let Some(r) = &self.tags {
            write_many(writer, r, Some("tags"), Some("tag"))?;
        }
        if let Some(r) = &self.template {
            r.write_xml(writer, "template")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Template {
    const TAG: &'static str = "template";
    const PLURAL_TAG: &'static str = "templates";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.comment {
            writer.write_character("comment", r)?;
        }
        if let Some(r) = &self.cpu {
            r.write_xml(writer, "cpu")?;
        }
        if let Some(r) = &self.creation_time {
            writer.write_date("creation_time", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = self.memory {
            writer.write_i64("memory", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = &self.os {
            r.write_xml(writer, "os")?;
        }
        if let Some(r) = self.status {
            writer.write_character("status", r.as_str())?;
        }
        if let Some(r) = self.type_ {
            writer.write_character("type", r.as_str())?;
        }
        if let Some(r) = &self.cluster {
            r.write_xml(writer, "cluster")?;
        }
        if let Some(r) = &self.vm {
            r.write_xml(writer, "vm")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Cpu {
    const TAG: &'static str = "cpu";
    const PLURAL_TAG: &'static str = "cpus";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = self.architecture {
            writer.write_character("architecture", r.as_str())?;
        }
        if let Some(r) = self.mode {
            writer.write_character("mode", r.as_str())?;
        }
        if let Some(r) = self.speed {
            writer.write_f64("speed", r)?;
        }
        if let Some(r) = &self.topology {
            r.write_xml(writer, "topology")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for CpuTopology {
    const TAG: &'static str = "cpu_topology";
    const PLURAL_TAG: &'static str = "cpu_topologies";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = self.cores {
            writer.write_i64("cores", r)?;
        }
        if let Some(r) = self.sockets {
            writer.write_i64("sockets", r)?;
        }
        if let Some(r) = self.threads {
            writer.write_i64("threads", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for OperatingSystem {
    const TAG: &'static str = "operating_system";
    const PLURAL_TAG: &'static str = "operating_systems";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = &self.boot {
            r.write_xml(writer, "boot")?;
        }
        if let Some(r) = &self.cmdline {
            writer.write_character("cmdline", r)?;
        }
        if let Some(r) = &self.kernel {
            writer.write_character("kernel", r)?;
        }
        if let Some(r) = &self.type_ {
            writer.write_character("type", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Boot {
    const TAG: &'static str = "boot";
    const PLURAL_TAG: &'static str = "boots";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = &self.devices {
            writer.write_characters("devices", "device", r.iter().map(|d| d.as_str()))?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for MemoryPolicy {
    const TAG: &'static str = "memory_policy";
    const PLURAL_TAG: &'static str = "memory_policies";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = self.ballooning {
            writer.write_bool("ballooning", r)?;
        }
        if let Some(r) = self.guaranteed {
            writer.write_i64("guaranteed", r)?;
        }
        if let Some(r) = self.max {
            writer.write_i64("max", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Initialization {
    const TAG: &'static str = "initialization";
    const PLURAL_TAG: &'static str = "initializations";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = &self.custom_script {
            writer.write_character("custom_script", r)?;
        }
        if let Some(r) = &self.dns_search {
            writer.write_character("dns_search", r)?;
        }
        if let Some(r) = &self.dns_servers {
            writer.write_character("dns_servers", r)?;
        }
        if let Some(r) = &self.host_name {
            writer.write_character("host_name", r)?;
        }
        if let Some(r) = self.regenerate_ssh_keys {
            writer.write_bool("regenerate_ssh_keys", r)?;
        }
        if let Some(r) = &self.timezone {
            writer.write_character("timezone", r)?;
        }
        if let Some(r) = &self.user_name {
            writer.write_character("user_name", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for VmPlacementPolicy {
    const TAG: &'static str = "vm_placement_policy";
    const PLURAL_TAG: &'static str = "vm_placement_policies";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = self.affinity {
            writer.write_character("affinity", r.as_str())?;
        }
        if let Some(r) = &self.hosts {
            write_many(writer, r, Some("hosts"), Some("host"))?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Host {
    const TAG: &'static str = "host";
    const PLURAL_TAG: &'static str = "hosts";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.address {
            writer.write_character("address", r)?;
        }
        if let Some(r) = &self.comment {
            writer.write_character("comment", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = self.status {
            writer.write_character("status", r.as_str())?;
        }
        if let Some(r) = &self.cluster {
            r.write_xml(writer, "cluster")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Cluster {
    const TAG: &'static str = "cluster";
    const PLURAL_TAG: &'static str = "clusters";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.comment {
            writer.write_character("comment", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for InstanceType {
    const TAG: &'static str = "instance_type";
    const PLURAL_TAG: &'static str = "instance_types";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = self.memory {
            writer.write_i64("memory", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Tag {
    const TAG: &'static str = "tag";
    const PLURAL_TAG: &'static str = "tags";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = &self.parent {
            r.write_xml(writer, "parent")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Nic {
    const TAG: &'static str = "nic";
    const PLURAL_TAG: &'static str = "nics";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.comment {
            writer.write_character("comment", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = self.interface {
            writer.write_character("interface", r.as_str())?;
        }
        if let Some(r) = self.linked {
            writer.write_bool("linked", r)?;
        }
        if let Some(r) = &self.mac {
            r.write_xml(writer, "mac")?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = self.plugged {
            writer.write_bool("plugged", r)?;
        }
        if let Some(r) = &self.vm {
            r.write_xml(writer, "vm")?;
        }
        if let Some(r) = &self.vnic_profile {
            r.write_xml(writer, "vnic_profile")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Mac {
    const TAG: &'static str = "mac";
    const PLURAL_TAG: &'static str = "macs";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = &self.address {
            writer.write_character("address", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for VnicProfile {
    const TAG: &'static str = "vnic_profile";
    const PLURAL_TAG: &'static str = "vnic_profiles";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = &self.network {
            r.write_xml(writer, "network")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Network {
    const TAG: &'static str = "network";
    const PLURAL_TAG: &'static str = "networks";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = self.mtu {
            writer.write_i64("mtu", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for Disk {
    const TAG: &'static str = "disk";
    const PLURAL_TAG: &'static str = "disks";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = self.actual_size {
            writer.write_i64("actual_size", r)?;
        }
        if let Some(r) = &self.alias {
            writer.write_character("alias", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = self.format {
            writer.write_character("format", r.as_str())?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = self.provisioned_size {
            writer.write_i64("provisioned_size", r)?;
        }
        if let Some(r) = self.shareable {
            writer.write_bool("shareable", r)?;
        }
        if let Some(r) = self.sparse {
            writer.write_bool("sparse", r)?;
        }
        if let Some(r) = self.status {
            writer.write_character("status", r.as_str())?;
        }
        if let Some(r) = self.total_size {
            writer.write_i64("total_size", r)?;
        }
        if let Some(r) = &self.storage_domains {
            write_many(writer, r, Some("storage_domains"), Some("storage_domain"))?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for DiskAttachment {
    const TAG: &'static str = "disk_attachment";
    const PLURAL_TAG: &'static str = "disk_attachments";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = self.active {
            writer.write_bool("active", r)?;
        }
        if let Some(r) = self.bootable {
            writer.write_bool("bootable", r)?;
        }
        if let Some(r) = self.interface {
            writer.write_character("interface", r.as_str())?;
        }
        if let Some(r) = self.pass_discard {
            writer.write_bool("pass_discard", r)?;
        }
        if let Some(r) = self.read_only {
            writer.write_bool("read_only", r)?;
        }
        if let Some(r) = self.uses_scsi_reservation {
            writer.write_bool("uses_scsi_reservation", r)?;
        }
        if let Some(r) = &self.disk {
            r.write_xml(writer, "disk")?;
        }
        if let Some(r) = &self.vm {
            r.write_xml(writer, "vm")?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for StorageDomain {
    const TAG: &'static str = "storage_domain";
    const PLURAL_TAG: &'static str = "storage_domains";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &identity_attrs(&self.id, &self.href))?;
        if let Some(r) = self.available {
            writer.write_i64("available", r)?;
        }
        if let Some(r) = &self.comment {
            writer.write_character("comment", r)?;
        }
        if let Some(r) = self.committed {
            writer.write_i64("committed", r)?;
        }
        if let Some(r) = &self.description {
            writer.write_character("description", r)?;
        }
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = self.used {
            writer.write_i64("used", r)?;
        }
        writer.write_end(tag)
    }
}

impl XmlWrite for CustomProperty {
    const TAG: &'static str = "custom_property";
    const PLURAL_TAG: &'static str = "custom_properties";

    fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>, tag: &str) -> Result<(), XmlError> {
        writer.write_start(tag, &[])?;
        if let Some(r) = &self.name {
            writer.write_character("name", r)?;
        }
        if let Some(r) = &self.regexp {
            writer.write_character("regexp", r)?;
        }
        if let Some(r) = &self.value {
            writer.write_character("value", r)?;
        }
        writer.write_end(tag)
    }
}

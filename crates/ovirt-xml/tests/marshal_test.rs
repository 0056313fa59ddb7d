use chrono::{TimeZone, Utc};
use ovirt_xml::{
    Architecture, Boot, BootDevice, Cluster, Cpu, CpuMode, CpuTopology, CustomProperty, Disk, DiskAttachment,
    DiskFormat, DiskInterface, Host, HostStatus, Initialization, InstanceType, Mac, MemoryPolicy, Network, Nic,
    NicInterface, OperatingSystem, StorageDomain, Tag, Template, TemplateStatus, Vm, VmAffinity, VmPlacementPolicy,
    VmStatus, VmType, VnicProfile, WriterConfig, XmlError, XmlWriter, to_xml_string, to_xml_string_many, write_many,
    write_one,
};

fn compact() -> XmlWriter<Vec<u8>> {
    XmlWriter::new(Vec::new(), &WriterConfig::compact()).expect("writer")
}

fn finish(writer: XmlWriter<Vec<u8>>) -> String {
    String::from_utf8(writer.into_inner()).expect("utf-8")
}

#[test]
fn test_write_one_nil_input() {
    let mut writer = compact();
    let err = write_one::<_, Vm>(&mut writer, None, None).expect_err("nil input");
    assert!(matches!(err, XmlError::NilInput));
    assert_eq!(err.to_string(), "input object pointer is nil");
    assert!(writer.into_inner().is_empty());
}

#[test]
fn test_write_one_default_and_custom_tag() {
    let cluster = Cluster {
        id: Some("c1".to_string()),
        name: Some("Default".to_string()),
        ..Default::default()
    };

    let mut writer = compact();
    write_one(&mut writer, Some(&cluster), None).expect("write");
    assert_eq!(finish(writer), r#"<cluster id="c1"><name>Default</name></cluster>"#);

    let mut writer = compact();
    write_one(&mut writer, Some(&cluster), Some("home")).expect("write");
    assert_eq!(finish(writer), r#"<home id="c1"><name>Default</name></home>"#);
}

#[test]
fn test_empty_record() {
    let xml = to_xml_string(&Vm::default(), &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, "<vm></vm>");
}

#[test]
fn test_id_and_href_attributes() {
    let vm = Vm {
        id: Some("123".to_string()),
        href: Some("/ovirt-engine/api/vms/123".to_string()),
        ..Default::default()
    };
    let xml = to_xml_string(&vm, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, r#"<vm id="123" href="/ovirt-engine/api/vms/123"></vm>"#);

    let href_only = Vm {
        href: Some("/ovirt-engine/api/vms/123".to_string()),
        ..Default::default()
    };
    let xml = to_xml_string(&href_only, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, r#"<vm href="/ovirt-engine/api/vms/123"></vm>"#);
}

#[test]
fn test_vm_field_order() {
    let vm = Vm {
        id: Some("123".to_string()),
        name: Some("web-0".to_string()),
        memory: Some(1_073_741_824),
        cpu: Some(Cpu {
            mode: Some(CpuMode::HostPassthrough),
            topology: Some(CpuTopology::new(2, 1, 1)),
            ..Default::default()
        }),
        status: Some(VmStatus::Down),
        type_: Some(VmType::Server),
        stateless: Some(false),
        cluster: Some(Cluster {
            id: Some("c1".to_string()),
            ..Default::default()
        }),
        template: Some(Box::new(Template {
            name: Some("Blank".to_string()),
            ..Default::default()
        })),
        ..Default::default()
    };
    let xml = to_xml_string(&vm, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            r#"<vm id="123">"#,
            "<cpu><mode>host_passthrough</mode>",
            "<topology><cores>2</cores><sockets>1</sockets><threads>1</threads></topology></cpu>",
            "<memory>1073741824</memory>",
            "<name>web-0</name>",
            "<stateless>false</stateless>",
            "<status>down</status>",
            "<type>server</type>",
            r#"<cluster id="c1"></cluster>"#,
            "<template><name>Blank</name></template>",
            "</vm>",
        )
    );
}

#[test]
fn test_vm_nested_policies() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single().expect("date");
    let vm = Vm {
        creation_time: Some(created),
        custom_properties: Some(vec![CustomProperty::new("sap_agent", "true")]),
        initialization: Some(Initialization {
            host_name: Some("web-0.example.com".to_string()),
            custom_script: Some("#cloud-config\n".to_string()),
            ..Default::default()
        }),
        os: Some(OperatingSystem {
            type_: Some("rhel_9x64".to_string()),
            boot: Some(Boot {
                devices: Some(vec![BootDevice::Hd, BootDevice::Network]),
            }),
            ..Default::default()
        }),
        placement_policy: Some(VmPlacementPolicy {
            affinity: Some(VmAffinity::Pinned),
            hosts: Some(vec![]),
        }),
        ..Default::default()
    };
    let xml = to_xml_string(&vm, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            "<vm>",
            "<creation_time>2024-05-01T10:00:00Z</creation_time>",
            "<custom_properties><custom_property><name>sap_agent</name><value>true</value></custom_property></custom_properties>",
            "<initialization><custom_script>#cloud-config\n</custom_script><host_name>web-0.example.com</host_name></initialization>",
            "<os><boot><devices><device>hd</device><device>network</device></devices></boot><type>rhel_9x64</type></os>",
            "<placement_policy><affinity>pinned</affinity><hosts></hosts></placement_policy>",
            "</vm>",
        )
    );
}

#[test]
fn test_absent_and_empty_lists() {
    let absent = Vm::default();
    let empty = Vm {
        nics: Some(vec![]),
        ..Default::default()
    };
    assert_eq!(to_xml_string(&absent, &WriterConfig::compact()).expect("marshal"), "<vm></vm>");
    assert_eq!(
        to_xml_string(&empty, &WriterConfig::compact()).expect("marshal"),
        "<vm><nics></nics></vm>"
    );
}

#[test]
fn test_nic() {
    let nic = Nic {
        name: Some("nic1".to_string()),
        interface: Some(NicInterface::Virtio),
        mac: Some(Mac {
            address: Some("56:6f:1a:2b:00:01".to_string()),
        }),
        plugged: Some(true),
        linked: Some(true),
        vnic_profile: Some(VnicProfile {
            id: Some("p1".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = to_xml_string(&nic, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            "<nic><interface>virtio</interface><linked>true</linked>",
            "<mac><address>56:6f:1a:2b:00:01</address></mac>",
            "<name>nic1</name><plugged>true</plugged>",
            r#"<vnic_profile id="p1"></vnic_profile></nic>"#,
        )
    );
}

#[test]
fn test_disk_attachment() {
    let attachment = DiskAttachment {
        bootable: Some(true),
        active: Some(true),
        interface: Some(DiskInterface::VirtioScsi),
        disk: Some(Disk {
            format: Some(DiskFormat::Cow),
            provisioned_size: Some(10_737_418_240),
            sparse: Some(true),
            alias: Some("root".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = to_xml_string(&attachment, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            "<disk_attachment><active>true</active><bootable>true</bootable>",
            "<interface>virtio_scsi</interface>",
            "<disk><alias>root</alias><format>cow</format>",
            "<provisioned_size>10737418240</provisioned_size><sparse>true</sparse></disk>",
            "</disk_attachment>",
        )
    );
}

#[test]
fn test_nested_tag_parent() {
    let tag = Tag {
        name: Some("prod".to_string()),
        parent: Some(Box::new(Tag {
            name: Some("root".to_string()),
            ..Default::default()
        })),
        ..Default::default()
    };
    let xml = to_xml_string(&tag, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, "<tag><name>prod</name><parent><name>root</name></parent></tag>");
}

#[test]
fn test_text_is_escaped() {
    let vm = Vm {
        description: Some("a < b & c".to_string()),
        ..Default::default()
    };
    let xml = to_xml_string(&vm, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, "<vm><description>a &lt; b &amp; c</description></vm>");
}

#[test]
fn test_write_many_tags() {
    let vms = vec![
        Vm {
            name: Some("a".to_string()),
            ..Default::default()
        },
        Vm {
            name: Some("b".to_string()),
            ..Default::default()
        },
    ];

    let xml = to_xml_string_many(&vms, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, "<vms><vm><name>a</name></vm><vm><name>b</name></vm></vms>");

    let mut writer = compact();
    write_many(&mut writer, &vms, Some("items"), Some("item")).expect("write");
    assert_eq!(
        finish(writer),
        "<items><item><name>a</name></item><item><name>b</name></item></items>"
    );

    let none: Vec<Vm> = Vec::new();
    let xml = to_xml_string_many(&none, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, "<vms></vms>");
}

#[test]
fn test_pretty_with_declaration() {
    let vm = Vm {
        name: Some("web-0".to_string()),
        cluster: Some(Cluster {
            id: Some("c1".to_string()),
            name: Some("Default".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = to_xml_string(&vm, &WriterConfig::pretty(2)).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<vm>\n",
            "  <name>web-0</name>\n",
            "  <cluster id=\"c1\">\n",
            "    <name>Default</name>\n",
            "  </cluster>\n",
            "</vm>",
        )
    );
}

const VM_YAML: &str = r#"
id: "123"
name: web-0
memory: 2147483648
type: server
cpu:
  topology:
    cores: 2
    sockets: 1
    threads: 1
cluster:
  name: Default
nics:
  - name: nic1
    interface: virtio
"#;

#[test]
fn test_yaml_fixture_to_xml() {
    let vm: Vm = serde_yaml::from_str(VM_YAML).expect("parse");
    let xml = to_xml_string(&vm, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            r#"<vm id="123">"#,
            "<cpu><topology><cores>2</cores><sockets>1</sockets><threads>1</threads></topology></cpu>",
            "<memory>2147483648</memory><name>web-0</name><type>server</type>",
            "<cluster><name>Default</name></cluster>",
            "<nics><nic><interface>virtio</interface><name>nic1</name></nic></nics>",
            "</vm>",
        )
    );
}

#[test]
fn test_template() {
    let created = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).single().expect("date");
    let template = Template {
        id: Some("t1".to_string()),
        href: Some("/ovirt-engine/api/templates/t1".to_string()),
        comment: Some("golden".to_string()),
        cpu: Some(Cpu {
            architecture: Some(Architecture::X86_64),
            speed: Some(2400.0),
            ..Default::default()
        }),
        creation_time: Some(created),
        description: Some("base image".to_string()),
        memory: Some(4_294_967_296),
        name: Some("rhel9".to_string()),
        os: Some(OperatingSystem {
            type_: Some("rhel_9x64".to_string()),
            ..Default::default()
        }),
        status: Some(TemplateStatus::Ok),
        type_: Some(VmType::HighPerformance),
        cluster: Some(Cluster {
            id: Some("c1".to_string()),
            ..Default::default()
        }),
        vm: Some(Box::new(Vm {
            id: Some("v1".to_string()),
            ..Default::default()
        })),
    };
    let xml = to_xml_string(&template, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            r#"<template id="t1" href="/ovirt-engine/api/templates/t1">"#,
            "<comment>golden</comment>",
            "<cpu><architecture>x86_64</architecture><speed>2400</speed></cpu>",
            "<creation_time>2023-01-02T03:04:05Z</creation_time>",
            "<description>base image</description>",
            "<memory>4294967296</memory>",
            "<name>rhel9</name>",
            "<os><type>rhel_9x64</type></os>",
            "<status>ok</status>",
            "<type>high_performance</type>",
            r#"<cluster id="c1"></cluster>"#,
            r#"<vm id="v1"></vm>"#,
            "</template>",
        )
    );
}

#[test]
fn test_host() {
    let host = Host {
        id: Some("h1".to_string()),
        address: Some("10.0.0.11".to_string()),
        comment: Some("rack 4".to_string()),
        description: Some("compute".to_string()),
        name: Some("node-1".to_string()),
        status: Some(HostStatus::NonOperational),
        cluster: Some(Cluster {
            name: Some("Default".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = to_xml_string(&host, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            r#"<host id="h1">"#,
            "<address>10.0.0.11</address><comment>rack 4</comment><description>compute</description>",
            "<name>node-1</name><status>non_operational</status>",
            "<cluster><name>Default</name></cluster>",
            "</host>",
        )
    );
}

#[test]
fn test_memory_policy() {
    let policy = MemoryPolicy {
        ballooning: Some(false),
        guaranteed: Some(1_073_741_824),
        max: Some(4_294_967_296),
    };
    let xml = to_xml_string(&policy, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            "<memory_policy><ballooning>false</ballooning>",
            "<guaranteed>1073741824</guaranteed><max>4294967296</max></memory_policy>",
        )
    );
}

#[test]
fn test_instance_type() {
    let instance_type = InstanceType {
        id: Some("i1".to_string()),
        href: Some("/ovirt-engine/api/instancetypes/i1".to_string()),
        description: Some("2 vCPU, 2 GiB".to_string()),
        memory: Some(2_147_483_648),
        name: Some("Small".to_string()),
    };
    let xml = to_xml_string(&instance_type, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            r#"<instance_type id="i1" href="/ovirt-engine/api/instancetypes/i1">"#,
            "<description>2 vCPU, 2 GiB</description><memory>2147483648</memory><name>Small</name>",
            "</instance_type>",
        )
    );
}

#[test]
fn test_vnic_profile_network() {
    let profile = VnicProfile {
        name: Some("ovirtmgmt".to_string()),
        description: Some("management".to_string()),
        network: Some(Network {
            id: Some("n1".to_string()),
            description: Some("mgmt net".to_string()),
            mtu: Some(9000),
            name: Some("ovirtmgmt".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = to_xml_string(&profile, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            "<vnic_profile><description>management</description><name>ovirtmgmt</name>",
            r#"<network id="n1"><description>mgmt net</description><mtu>9000</mtu><name>ovirtmgmt</name></network>"#,
            "</vnic_profile>",
        )
    );
}

#[test]
fn test_disk_storage_domains() {
    let disk = Disk {
        id: Some("d1".to_string()),
        actual_size: Some(1024),
        total_size: Some(2048),
        status: Some(ovirt_xml::DiskStatus::Ok),
        shareable: Some(false),
        storage_domains: Some(vec![StorageDomain {
            id: Some("sd1".to_string()),
            available: Some(500),
            comment: Some("nfs".to_string()),
            committed: Some(300),
            description: Some("data".to_string()),
            name: Some("data1".to_string()),
            used: Some(200),
            ..Default::default()
        }]),
        ..Default::default()
    };
    let xml = to_xml_string(&disk, &WriterConfig::compact()).expect("marshal");
    assert_eq!(
        xml,
        concat!(
            r#"<disk id="d1"><actual_size>1024</actual_size><shareable>false</shareable>"#,
            "<status>ok</status><total_size>2048</total_size>",
            r#"<storage_domains><storage_domain id="sd1">"#,
            "<available>500</available><comment>nfs</comment><committed>300</committed>",
            "<description>data</description><name>data1</name><used>200</used>",
            "</storage_domain></storage_domains></disk>",
        )
    );
}

#[test]
fn test_non_finite_cpu_speed() {
    let cpu = Cpu {
        speed: Some(f64::INFINITY),
        ..Default::default()
    };
    let xml = to_xml_string(&cpu, &WriterConfig::compact()).expect("marshal");
    assert_eq!(xml, "<cpu><speed>INF</speed></cpu>");
}

#[test]
fn test_control_character_in_name_is_rejected() {
    let vm = Vm {
        name: Some("a\u{1}b".to_string()),
        ..Default::default()
    };
    let err = to_xml_string(&vm, &WriterConfig::compact()).expect_err("control character");
    assert!(matches!(err, XmlError::InvalidCharacter { ref element, code: 1 } if element == "name"));
}

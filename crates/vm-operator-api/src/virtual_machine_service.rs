//! VirtualMachineService CRD
//!
//! Exposes a set of VMs selected by label, the way a core `Service` exposes
//! pods.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, Validate, ValidationErrors, check_port, check_unique, parse_cidr};

/// VirtualMachineServiceSpec defines how a set of VMs is exposed
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[kube(
    group = "vmoperator.vmware.com",
    version = "v1alpha2",
    kind = "VirtualMachineService",
    namespaced,
    shortname = "vmservice",
    status = "VirtualMachineServiceStatus",
    printcolumn = r#"{"name":"Type","type":"string","jsonPath":".spec.type"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineServiceSpec {
    /// Service type (defaults to ClusterIP)
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_: Option<VirtualMachineServiceType>,

    /// Ports exposed by the service
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<VirtualMachineServicePort>,

    /// Labels selecting the VMs behind the service
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,

    /// Requested load balancer IP, for LoadBalancer services
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "loadBalancerIP")]
    pub load_balancer_ip: Option<String>,

    /// CIDRs allowed to reach a LoadBalancer service
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_balancer_source_ranges: Vec<String>,

    /// Requested cluster IP; "None" makes the service headless
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clusterIP")]
    pub cluster_ip: Option<String>,

    /// DNS name returned for ExternalName services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
}

/// How the service is exposed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum VirtualMachineServiceType {
    /// Cluster-internal virtual IP
    #[default]
    ClusterIP,
    /// External load balancer
    LoadBalancer,
    /// DNS CNAME to externalName
    ExternalName,
}

/// A port exposed by a VirtualMachineService
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineServicePort {
    /// Port name; required and unique when more than one port is listed
    #[serde(default)]
    pub name: String,

    /// TCP, UDP or SCTP (defaults to TCP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Port exposed by the service
    pub port: i32,

    /// Port on the VMs
    pub target_port: i32,
}

/// VirtualMachineServiceStatus defines the observed state of a VirtualMachineService
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineServiceStatus {
    /// Load balancer state, for LoadBalancer services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer: Option<LoadBalancerStatus>,
}

/// Load balancer state
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerStatus {
    /// Ingress points of the load balancer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<LoadBalancerIngress>,
}

/// A load balancer ingress point; ip or hostname
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerIngress {
    /// Ingress IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Ingress DNS name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

const PROTOCOLS: [&str; 3] = ["TCP", "UDP", "SCTP"];

impl Validate for VirtualMachineServiceSpec {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let service_type = self.type_.unwrap_or_default();

        match service_type {
            VirtualMachineServiceType::ExternalName => {
                if self.external_name.as_deref().is_none_or(str::is_empty) {
                    errors.push(FieldError::required("spec.externalName"));
                }
            }
            _ => {
                if self.ports.is_empty() {
                    errors.push(FieldError::required("spec.ports"));
                }
            }
        }

        if self.ports.len() > 1 {
            for (i, port) in self.ports.iter().enumerate() {
                if port.name.is_empty() {
                    errors.push(FieldError::required(format!("spec.ports[{i}].name")));
                }
            }
            check_unique(
                &mut errors,
                "spec.ports.name",
                self.ports.iter().map(|p| p.name.as_str()).filter(|n| !n.is_empty()),
            );
        }

        for (i, port) in self.ports.iter().enumerate() {
            check_port(&mut errors, &format!("spec.ports[{i}].port"), port.port);
            check_port(&mut errors, &format!("spec.ports[{i}].targetPort"), port.target_port);
            if let Some(protocol) = &port.protocol {
                if !PROTOCOLS.contains(&protocol.as_str()) {
                    errors.push(FieldError::invalid(
                        format!("spec.ports[{i}].protocol"),
                        protocol,
                        "must be one of TCP, UDP, SCTP",
                    ));
                }
            }
        }

        if service_type != VirtualMachineServiceType::LoadBalancer {
            if self.load_balancer_ip.is_some() {
                errors.push(FieldError::invalid(
                    "spec.loadBalancerIP",
                    self.load_balancer_ip.as_deref().unwrap_or_default(),
                    "only allowed for LoadBalancer services",
                ));
            }
            if !self.load_balancer_source_ranges.is_empty() {
                errors.push(FieldError::invalid(
                    "spec.loadBalancerSourceRanges",
                    self.load_balancer_source_ranges.join(","),
                    "only allowed for LoadBalancer services",
                ));
            }
        }
        for (i, range) in self.load_balancer_source_ranges.iter().enumerate() {
            if let Err(reason) = parse_cidr(range) {
                errors.push(FieldError::invalid(format!("spec.loadBalancerSourceRanges[{i}]"), range, reason));
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(name: &str, port: i32) -> VirtualMachineServicePort {
        VirtualMachineServicePort {
            name: name.to_string(),
            protocol: None,
            port,
            target_port: port,
        }
    }

    #[test]
    fn test_load_balancer_service() {
        let spec = VirtualMachineServiceSpec {
            type_: Some(VirtualMachineServiceType::LoadBalancer),
            ports: vec![port("https", 443), port("ssh", 22)],
            selector: [("app".to_string(), "web".to_string())].into_iter().collect(),
            load_balancer_source_ranges: vec!["10.0.0.0/8".to_string()],
            ..Default::default()
        };
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn test_external_name_requires_name() {
        let spec = VirtualMachineServiceSpec {
            type_: Some(VirtualMachineServiceType::ExternalName),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("missing externalName");
        assert_eq!(errors.0, vec![FieldError::required("spec.externalName")]);
    }

    #[test]
    fn test_port_rules() {
        let mut ports = vec![port("web", 80), port("web", 0), port("", 8080)];
        ports[2].protocol = Some("HTTP".to_string());
        let spec = VirtualMachineServiceSpec {
            ports,
            load_balancer_ip: Some("10.0.0.1".to_string()),
            ..Default::default()
        };
        let errors = spec.validate().expect_err("invalid ports");
        let fields: Vec<&str> = errors.iter().map(FieldError::field).collect();
        assert_eq!(
            fields,
            vec![
                "spec.ports[2].name",
                "spec.ports.name",
                "spec.ports[1].port",
                "spec.ports[1].targetPort",
                "spec.ports[2].protocol",
                "spec.loadBalancerIP",
            ]
        );
    }

    #[test]
    fn test_type_wire_format() {
        let spec = VirtualMachineServiceSpec {
            type_: Some(VirtualMachineServiceType::ClusterIP),
            cluster_ip: Some("None".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&spec).expect("serialize");
        assert_eq!(json["type"], "ClusterIP");
        assert_eq!(json["clusterIP"], "None");
    }
}

//! VirtualMachineSetResourcePolicy CRD
//!
//! Groups VMs under a shared resource pool and folder, and into cluster
//! modules for anti-affinity.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, Validate, ValidationErrors, check_unique};
use crate::virtual_machine_class::{VirtualMachineResourceSpec, check_requests_within_limits};

/// VirtualMachineSetResourcePolicySpec groups VMs under one resource pool and folder
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[kube(
    group = "vmoperator.vmware.com",
    version = "v1alpha2",
    kind = "VirtualMachineSetResourcePolicy",
    namespaced,
    status = "VirtualMachineSetResourcePolicyStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSetResourcePolicySpec {
    /// Resource pool created for the policy
    #[serde(default)]
    pub resource_pool: ResourcePoolSpec,

    /// Folder the VMs are placed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Cluster module groups; VMs in the same group are spread across hosts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_module_groups: Vec<String>,
}

/// Resource pool settings; reservations must not exceed limits
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePoolSpec {
    /// Resource pool name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Guaranteed resources
    #[serde(default)]
    pub reservations: VirtualMachineResourceSpec,

    /// Resource ceiling
    #[serde(default)]
    pub limits: VirtualMachineResourceSpec,
}

/// VirtualMachineSetResourcePolicyStatus defines the observed state of a policy
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSetResourcePolicyStatus {
    /// Cluster modules created for the groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_modules: Vec<VSphereClusterModuleStatus>,
}

/// Cluster module created for one group
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VSphereClusterModuleStatus {
    /// Group name from clusterModuleGroups
    pub group_name: String,

    /// UUID of the cluster module
    #[serde(rename = "moduleUUID")]
    pub module_uuid: String,

    /// Managed object ID of the cluster holding the module
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "clusterMoID")]
    pub cluster_mo_id: Option<String>,
}

impl VirtualMachineSetResourcePolicyStatus {
    /// Module UUID created for a cluster module group, if any.
    pub fn module_uuid(&self, group_name: &str) -> Option<&str> {
        self.cluster_modules
            .iter()
            .find(|m| m.group_name == group_name)
            .map(|m| m.module_uuid.as_str())
    }
}

impl Validate for VirtualMachineSetResourcePolicySpec {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        check_unique(
            &mut errors,
            "spec.clusterModuleGroups",
            self.cluster_module_groups.iter().map(String::as_str).filter(|g| !g.is_empty()),
        );
        for (i, group) in self.cluster_module_groups.iter().enumerate() {
            if group.is_empty() {
                errors.push(FieldError::required(format!("spec.clusterModuleGroups[{i}]")));
            }
        }

        // Reservations play the role of requests for the pool.
        let pool = &self.resource_pool;
        let mut pool_errors = ValidationErrors::default();
        check_requests_within_limits(&mut pool_errors, "spec.resourcePool", &pool.reservations, &pool.limits);
        errors.extend(pool_errors.0.into_iter().map(|e| match e {
            FieldError::Invalid { field, value, reason } => FieldError::Invalid {
                field: field.replace(".requests.", ".reservations."),
                value,
                reason,
            },
            other => other,
        }));

        errors.into_result()
    }
}

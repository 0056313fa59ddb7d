//! VM-operator CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the `vmoperator.vmware.com`
//! API group, plus the condition and label tables the controllers that
//! consume them rely on.

#![warn(missing_docs)]

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;

pub mod conditions;
pub mod labels;
pub mod quantity;
pub mod references;
pub mod validation;
pub mod virtual_machine;
pub mod virtual_machine_class;
pub mod virtual_machine_image;
pub mod virtual_machine_service;
pub mod virtual_machine_set_resource_policy;

pub use conditions::{Condition, ConditionStatus, Conditions};
pub use references::*;
pub use validation::{FieldError, Validate, ValidationErrors};
pub use virtual_machine::*;
pub use virtual_machine_class::*;
pub use virtual_machine_image::*;
pub use virtual_machine_service::*;
pub use virtual_machine_set_resource_policy::*;

/// API group of every resource in this crate
pub const GROUP: &str = "vmoperator.vmware.com";

/// API version served by this crate
pub const VERSION: &str = "v1alpha2";

/// `apiVersion` value for objects of this crate
pub const API_VERSION: &str = "vmoperator.vmware.com/v1alpha2";

/// Every CRD defined by this crate, in installation order.
pub fn crds() -> Vec<CustomResourceDefinition> {
    vec![
        VirtualMachineClass::crd(),
        VirtualMachineImage::crd(),
        ClusterVirtualMachineImage::crd(),
        VirtualMachineSetResourcePolicy::crd(),
        VirtualMachine::crd(),
        VirtualMachineService::crd(),
    ]
}

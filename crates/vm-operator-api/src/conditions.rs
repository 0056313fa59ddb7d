//! Status conditions
//!
//! Condition record shared by every status type, the condition-type and
//! condition-reason tables, and the [`Conditions`] accessor trait.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary condition; true when every other condition is true.
pub const READY_CONDITION: &str = "Ready";

/// VirtualMachineClass referenced by the VM exists and is usable.
pub const VIRTUAL_MACHINE_CLASS_READY_CONDITION: &str = "VirtualMachineClassReady";
/// VirtualMachineImage referenced by the VM exists and is usable.
pub const VIRTUAL_MACHINE_IMAGE_READY_CONDITION: &str = "VirtualMachineImageReady";
/// Resource policy referenced by the VM exists and has been applied.
pub const VIRTUAL_MACHINE_SET_RESOURCE_POLICY_READY_CONDITION: &str =
    "VirtualMachineConditionVMSetResourcePolicyReady";
/// Bootstrap data (cloud-init, sysprep, ...) was resolved.
pub const VIRTUAL_MACHINE_BOOTSTRAP_READY_CONDITION: &str = "VirtualMachineBootstrapReady";
/// Network interfaces were resolved against their providers.
pub const VIRTUAL_MACHINE_NETWORK_READY_CONDITION: &str = "VirtualMachineConditionNetworkReady";
/// Volumes were resolved and attached.
pub const VIRTUAL_MACHINE_STORAGE_READY_CONDITION: &str = "VirtualMachineStorageReady";
/// The backing VM has been created on the provider.
pub const VIRTUAL_MACHINE_CREATED_CONDITION: &str = "VirtualMachineCreated";
/// Guest customization progress, reported by the guest.
pub const GUEST_CUSTOMIZATION_CONDITION: &str = "GuestCustomization";
/// Guest tools status.
pub const VIRTUAL_MACHINE_TOOLS_CONDITION: &str = "VirtualMachineTools";
/// Reconciliation of the VM is enabled.
pub const VIRTUAL_MACHINE_RECONCILE_READY_CONDITION: &str = "VirtualMachineReconcileReady";
/// Image content was synced from its provider.
pub const VIRTUAL_MACHINE_IMAGE_SYNCED_CONDITION: &str = "VirtualMachineImageSynced";
/// Image provider is reachable and security-compliant.
pub const VIRTUAL_MACHINE_IMAGE_PROVIDER_READY_CONDITION: &str = "VirtualMachineImageProviderReady";

/// Referenced class does not exist.
pub const VIRTUAL_MACHINE_CLASS_NOT_FOUND_REASON: &str = "VirtualMachineClassNotFound";
/// Referenced image does not exist.
pub const VIRTUAL_MACHINE_IMAGE_NOT_FOUND_REASON: &str = "VirtualMachineImageNotFound";
/// Referenced image exists but is not ready.
pub const VIRTUAL_MACHINE_IMAGE_NOT_READY_REASON: &str = "VirtualMachineImageNotReady";
/// Referenced resource policy does not exist.
pub const VIRTUAL_MACHINE_SET_RESOURCE_POLICY_NOT_FOUND_REASON: &str = "VirtualMachineSetResourcePolicyNotFound";
/// Bootstrap data secret is missing.
pub const VIRTUAL_MACHINE_BOOTSTRAP_SECRET_NOT_FOUND_REASON: &str = "BootstrapSecretNotFound";
/// Interface network is missing.
pub const VIRTUAL_MACHINE_NETWORK_NOT_FOUND_REASON: &str = "NetworkNotFound";
/// Storage class is missing.
pub const VIRTUAL_MACHINE_STORAGE_CLASS_NOT_FOUND_REASON: &str = "StorageClassNotFound";

/// No customization was requested.
pub const GUEST_CUSTOMIZATION_IDLE_REASON: &str = "GuestCustomizationIdle";
/// Customization is queued.
pub const GUEST_CUSTOMIZATION_PENDING_REASON: &str = "GuestCustomizationPending";
/// Customization is in progress.
pub const GUEST_CUSTOMIZATION_RUNNING_REASON: &str = "GuestCustomizationRunning";
/// Customization finished.
pub const GUEST_CUSTOMIZATION_SUCCEEDED_REASON: &str = "GuestCustomizationSucceeded";
/// Customization failed.
pub const GUEST_CUSTOMIZATION_FAILED_REASON: &str = "GuestCustomizationFailed";

/// Guest tools are not running.
pub const VIRTUAL_MACHINE_TOOLS_NOT_RUNNING_REASON: &str = "VirtualMachineToolsNotRunning";
/// Guest tools are running.
pub const VIRTUAL_MACHINE_TOOLS_RUNNING_REASON: &str = "VirtualMachineToolsRunning";

/// Reconciliation is active.
pub const VIRTUAL_MACHINE_RECONCILE_RUNNING_REASON: &str = "VirtualMachineReconcileRunning";
/// Reconciliation is paused by annotation.
pub const VIRTUAL_MACHINE_RECONCILE_PAUSED_REASON: &str = "VirtualMachineReconcilePaused";

/// Image content has not been synced.
pub const VIRTUAL_MACHINE_IMAGE_NOT_SYNCED_REASON: &str = "VirtualMachineImageNotSynced";
/// Image provider is not ready.
pub const VIRTUAL_MACHINE_IMAGE_PROVIDER_NOT_READY_REASON: &str = "VirtualMachineImageProviderNotReady";
/// Image provider failed its security check.
pub const VIRTUAL_MACHINE_IMAGE_PROVIDER_SECURITY_NOT_COMPLIANT_REASON: &str =
    "VirtualMachineImageProviderSecurityNotCompliant";

/// Condition status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum ConditionStatus {
    /// Condition holds
    True,
    /// Condition does not hold
    False,
    /// Not yet determined
    #[default]
    Unknown,
}

/// A single observation of one aspect of a resource's state.
///
/// Mirrors `metav1.Condition`: exactly one entry per `type` in a list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition type, in CamelCase (e.g., "Ready")
    #[serde(rename = "type")]
    pub type_: String,

    /// Condition status
    pub status: ConditionStatus,

    /// `metadata.generation` the condition was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Last time `status` changed
    pub last_transition_time: DateTime<Utc>,

    /// Machine-readable reason for the last transition, in CamelCase
    #[serde(default)]
    pub reason: String,

    /// Human-readable detail
    #[serde(default)]
    pub message: String,
}

impl Condition {
    /// A condition of `type_` with the given status, stamped now.
    pub fn new(type_: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            type_: type_.into(),
            status,
            observed_generation: None,
            last_transition_time: Utc::now(),
            reason: String::new(),
            message: String::new(),
        }
    }

    /// Set the reason and message.
    pub fn with_reason(mut self, reason: impl Into<String>, message: impl Into<String>) -> Self {
        self.reason = reason.into();
        self.message = message.into();
        self
    }

    /// Set the observed generation.
    pub fn with_observed_generation(mut self, generation: i64) -> Self {
        self.observed_generation = Some(generation);
        self
    }
}

/// Access to a status type's condition list.
///
/// Implementors only provide the two accessors; every mutation goes through
/// [`Conditions::set_condition`], which keeps one condition per type.
pub trait Conditions {
    /// Current conditions.
    fn conditions(&self) -> &[Condition];
    /// Mutable access for the provided methods.
    fn conditions_mut(&mut self) -> &mut Vec<Condition>;

    /// Look up a condition by type.
    fn get_condition(&self, type_: &str) -> Option<&Condition> {
        self.conditions().iter().find(|c| c.type_ == type_)
    }

    /// True when the condition exists with status `True`.
    fn is_true(&self, type_: &str) -> bool {
        self.get_condition(type_).is_some_and(|c| c.status == ConditionStatus::True)
    }

    /// True when the condition exists with status `False`.
    fn is_false(&self, type_: &str) -> bool {
        self.get_condition(type_).is_some_and(|c| c.status == ConditionStatus::False)
    }

    /// Insert or replace the condition with the same type.
    ///
    /// When the existing condition has the same status its
    /// `last_transition_time` is kept.
    fn set_condition(&mut self, mut condition: Condition) {
        let conditions = self.conditions_mut();
        match conditions.iter_mut().find(|c| c.type_ == condition.type_) {
            Some(existing) => {
                if existing.status == condition.status {
                    condition.last_transition_time = existing.last_transition_time;
                } else {
                    debug!(
                        condition = %condition.type_,
                        from = ?existing.status,
                        to = ?condition.status,
                        "Condition transitioned"
                    );
                }
                *existing = condition;
            }
            None => {
                debug!(condition = %condition.type_, status = ?condition.status, "Condition added");
                conditions.push(condition);
            }
        }
    }

    /// Set the condition to `True` with no reason.
    fn mark_true(&mut self, type_: &str) {
        self.set_condition(Condition::new(type_, ConditionStatus::True));
    }

    /// Set the condition to `False` with a reason and message.
    fn mark_false(&mut self, type_: &str, reason: &str, message: &str) {
        self.set_condition(Condition::new(type_, ConditionStatus::False).with_reason(reason, message));
    }

    /// Set the condition to `Unknown` with a reason and message.
    fn mark_unknown(&mut self, type_: &str, reason: &str, message: &str) {
        self.set_condition(Condition::new(type_, ConditionStatus::Unknown).with_reason(reason, message));
    }

    /// Remove the condition with the given type, if any.
    fn delete_condition(&mut self, type_: &str) {
        self.conditions_mut().retain(|c| c.type_ != type_);
    }
}

/// Implements [`Conditions`] for status types with a `conditions: Vec<Condition>` field.
macro_rules! impl_conditions {
    ($($status:ty),+ $(,)?) => {
        $(
            impl $crate::conditions::Conditions for $status {
                fn conditions(&self) -> &[$crate::conditions::Condition] {
                    &self.conditions
                }

                fn conditions_mut(&mut self) -> &mut Vec<$crate::conditions::Condition> {
                    &mut self.conditions
                }
            }
        )+
    };
}

pub(crate) use impl_conditions;

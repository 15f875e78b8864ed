//! Registration wizard
//!
//! The four-step account registration flow: role selection, details entry,
//! review, subscription choice. All gating and transition rules live in
//! [`state::RegistrationWizard`]; the interactive prompts in the CLI layer
//! are a thin driver over it.

pub mod fields;
pub mod role;
pub mod state;

pub use fields::{AccountFields, Details, Field, ProviderFields};
pub use role::{Role, RoleCatalog, RoleEntry, RoleId, SubscriptionPlan};
pub use state::{
    MemoryRoleStore, RegisterPayload, RegisterReceipt, RegistrationWizard, RoleStore, Step,
    SubmissionAdapter, SubmissionFailure, WizardError,
};

use crate::core::ClientStore;

impl RoleStore for ClientStore {
    fn persist_role(&mut self, role: Role) {
        // The state file is a cache; a failed write only loses rehydration.
        let _ = self.set_last_role(role.as_str());
    }

    fn stored_role(&self) -> Option<Role> {
        // Unknown stored values are ignored rather than erroring.
        self.last_role().and_then(|name| name.parse().ok())
    }
}

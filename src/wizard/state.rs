//! The registration wizard state machine
//!
//! Steps move only through `next`/`prev`; selecting a role is the one
//! transition with a side effect (the role name is written to durable client
//! storage so a later session can rehydrate the selection). Submission is
//! two-phase so exactly one account-creation request can be in flight.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::storage::StoredUser;
use crate::schema::{FieldIssue, FormKind, FormValidator, SchemaError};
use crate::wizard::fields::{Details, Field};
use crate::wizard::role::{Role, RoleCatalog, RoleId, SubscriptionPlan};

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SelectRole,
    EnterDetails,
    Review,
    ChoosePlan,
    Submitted,
}

impl Step {
    /// 1-based step number shown in the progress banner
    pub fn number(&self) -> u8 {
        match self {
            Step::SelectRole => 1,
            Step::EnterDetails => 2,
            Step::Review => 3,
            Step::ChoosePlan => 4,
            Step::Submitted => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::SelectRole => "Select Role",
            Step::EnterDetails => "Enter Details",
            Step::Review => "Review",
            Step::ChoosePlan => "Subscription",
            Step::Submitted => "Submitted",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum WizardError {
    /// Step gating failed; one issue per offending field
    #[error("please fill all required fields correctly")]
    #[diagnostic(code(bmv::wizard::validation))]
    Validation { issues: Vec<FieldIssue> },

    #[error("select a role to continue")]
    #[diagnostic(code(bmv::wizard::role_missing))]
    RoleMissing,

    /// Distinct from field validation: the catalog has no usable id for the
    /// selected role
    #[error("unable to fetch role ID, try again later")]
    #[diagnostic(
        code(bmv::wizard::role_unresolved),
        help("the role catalog has no entry matching the selected role; retry once the backend is reachable")
    )]
    RoleUnresolved,

    #[error("choose a subscription plan before submitting")]
    #[diagnostic(code(bmv::wizard::plan_missing))]
    PlanMissing,

    #[error("a submission is already in progress")]
    #[diagnostic(code(bmv::wizard::submission_pending))]
    SubmissionPending,

    #[error("registration failed: {message}")]
    #[diagnostic(code(bmv::wizard::submission_failed), help("your entries are preserved; submit again to retry"))]
    SubmissionFailed { message: String },

    #[error("{action} is not valid at step \"{step}\"")]
    #[diagnostic(code(bmv::wizard::invalid_transition))]
    InvalidTransition {
        step: &'static str,
        action: &'static str,
    },

    #[error("the {field} field is not collected for role {role}")]
    #[diagnostic(code(bmv::wizard::field_not_collected))]
    FieldNotCollected {
        field: &'static str,
        role: &'static str,
    },
}

/// Durable storage capability the wizard needs: remember the selected role
/// name across sessions. Step and field state are deliberately not persisted.
pub trait RoleStore {
    fn persist_role(&mut self, role: Role);
    fn stored_role(&self) -> Option<Role>;
}

/// In-memory role store for tests and stateless runs
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    role: Option<Role>,
}

impl RoleStore for MemoryRoleStore {
    fn persist_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    fn stored_role(&self) -> Option<Role> {
        self.role
    }
}

/// Body of the account-creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: RoleId,
}

/// Outcome of a successful account creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterReceipt {
    /// Token issued by the backend
    pub token: String,
    /// User echo from the response body
    pub user: StoredUser,
}

/// A failed account creation, already reduced to a user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub message: String,
}

impl std::fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The backend call that creates the account. The real implementation lives
/// in the API layer; tests substitute fakes.
pub trait SubmissionAdapter {
    fn register(&mut self, payload: &RegisterPayload) -> Result<RegisterReceipt, SubmissionFailure>;
}

/// The four-step registration wizard
pub struct RegistrationWizard<'s> {
    step: Step,
    details: Option<Details>,
    role_id: Option<RoleId>,
    plan: Option<SubscriptionPlan>,
    catalog: Option<RoleCatalog>,
    issued_token: Option<String>,
    submit_in_flight: bool,
    validator: FormValidator,
    store: &'s mut dyn RoleStore,
}

impl<'s> RegistrationWizard<'s> {
    /// Create a fresh wizard at step 1.
    ///
    /// A role name remembered in the store rehydrates the role selection;
    /// the wizard still starts at step 1 and fields start empty.
    pub fn new(store: &'s mut dyn RoleStore) -> Result<Self, SchemaError> {
        let details = store.stored_role().map(Details::new);
        Ok(Self {
            step: Step::SelectRole,
            details,
            role_id: None,
            plan: None,
            catalog: None,
            issued_token: None,
            submit_in_flight: false,
            validator: FormValidator::new()?,
            store,
        })
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn role(&self) -> Option<Role> {
        self.details.as_ref().map(Details::role)
    }

    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    pub fn plan(&self) -> Option<SubscriptionPlan> {
        self.plan
    }

    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Token captured after a successful submission
    pub fn issued_token(&self) -> Option<&str> {
        self.issued_token.as_deref()
    }

    pub fn catalog_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    /// Install the fetched role catalog and (re-)resolve the role id.
    ///
    /// Called whenever the catalog fetch completes; a late-arriving catalog
    /// unblocks submission without any other state change.
    pub fn load_catalog(&mut self, catalog: RoleCatalog) {
        self.catalog = Some(catalog);
        self.resolve_role_id();
    }

    fn resolve_role_id(&mut self) {
        self.role_id = match (self.role(), self.catalog.as_ref()) {
            (Some(role), Some(catalog)) => catalog.resolve(role),
            _ => None,
        };
    }

    /// Pick a role at step 1. Persists the role name and auto-advances to
    /// step 2.
    pub fn select_role(&mut self, role: Role) -> Result<(), WizardError> {
        if self.step != Step::SelectRole {
            return Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "select_role",
            });
        }
        self.details = Some(match self.details.take() {
            Some(details) => details.retag(role),
            None => Details::new(role),
        });
        self.store.persist_role(role);
        self.resolve_role_id();
        self.step = Step::EnterDetails;
        Ok(())
    }

    /// Update one detail field at step 2
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), WizardError> {
        if self.step != Step::EnterDetails {
            return Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "set_field",
            });
        }
        self.details_mut()?.set(field, value)
    }

    /// Read one detail field (any step; the review screen uses this)
    pub fn field(&self, field: Field) -> Option<&str> {
        self.details.as_ref().and_then(|details| details.get(field))
    }

    fn details_mut(&mut self) -> Result<&mut Details, WizardError> {
        self.details.as_mut().ok_or(WizardError::RoleMissing)
    }

    /// Issues for the current detail fields; empty when step 2 may advance
    pub fn validate_details(&self) -> Vec<FieldIssue> {
        match self.details.as_ref() {
            Some(details) => self
                .validator
                .validate(FormKind::Register, &details.to_instance()),
            None => Vec::new(),
        }
    }

    /// Advance one step, gating on the current step's requirements. Entered
    /// data is preserved whether or not the transition happens.
    pub fn next(&mut self) -> Result<(), WizardError> {
        match self.step {
            Step::SelectRole => {
                if self.details.is_none() {
                    return Err(WizardError::RoleMissing);
                }
                self.step = Step::EnterDetails;
                Ok(())
            }
            Step::EnterDetails => {
                let issues = self.validate_details();
                if !issues.is_empty() {
                    return Err(WizardError::Validation { issues });
                }
                self.step = Step::Review;
                Ok(())
            }
            Step::Review => {
                self.step = Step::ChoosePlan;
                Ok(())
            }
            Step::ChoosePlan | Step::Submitted => Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "next",
            }),
        }
    }

    /// Go back one step. Never validates and never clears entered data.
    pub fn prev(&mut self) -> Result<(), WizardError> {
        match self.step {
            Step::EnterDetails => {
                self.step = Step::SelectRole;
                Ok(())
            }
            Step::Review => {
                self.step = Step::EnterDetails;
                Ok(())
            }
            Step::ChoosePlan => {
                self.step = Step::Review;
                Ok(())
            }
            Step::SelectRole | Step::Submitted => Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "prev",
            }),
        }
    }

    /// Pick a subscription plan at step 4
    pub fn choose_plan(&mut self, plan: SubscriptionPlan) -> Result<(), WizardError> {
        if self.step != Step::ChoosePlan {
            return Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "choose_plan",
            });
        }
        self.plan = Some(plan);
        Ok(())
    }

    /// Start a submission: checks the step-4 gate and marks a request in
    /// flight. Returns the account-creation payload to send. A second call
    /// while a request is pending is rejected without side effects.
    pub fn begin_submit(&mut self) -> Result<RegisterPayload, WizardError> {
        if self.submit_in_flight {
            return Err(WizardError::SubmissionPending);
        }
        if self.step != Step::ChoosePlan {
            return Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "submit",
            });
        }
        if self.plan.is_none() {
            return Err(WizardError::PlanMissing);
        }
        let details = self.details.as_ref().ok_or(WizardError::RoleMissing)?;
        let role_id = self.role_id.ok_or(WizardError::RoleUnresolved)?;
        let account = details.account();
        self.submit_in_flight = true;
        Ok(RegisterPayload {
            username: account.full_name.clone(),
            email: account.email.clone(),
            password: account.password.clone(),
            role: role_id,
        })
    }

    /// Finish a submission with the backend outcome. Success is terminal;
    /// failure keeps the wizard at step 4 with everything intact for retry.
    pub fn complete_submit(
        &mut self,
        outcome: Result<RegisterReceipt, SubmissionFailure>,
    ) -> Result<RegisterReceipt, WizardError> {
        if !self.submit_in_flight {
            return Err(WizardError::InvalidTransition {
                step: self.step.title(),
                action: "complete_submit",
            });
        }
        self.submit_in_flight = false;
        match outcome {
            Ok(receipt) => {
                self.issued_token = Some(receipt.token.clone());
                self.step = Step::Submitted;
                Ok(receipt)
            }
            Err(failure) => Err(WizardError::SubmissionFailed {
                message: failure.message,
            }),
        }
    }

    /// One-shot submission against an adapter
    pub fn submit(
        &mut self,
        adapter: &mut dyn SubmissionAdapter,
    ) -> Result<RegisterReceipt, WizardError> {
        let payload = self.begin_submit()?;
        let outcome = adapter.register(&payload);
        self.complete_submit(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::wizard::role::RoleEntry;

    fn catalog() -> RoleCatalog {
        RoleCatalog::new(vec![
            RoleEntry {
                id: "2".into(),
                name: "Individual".into(),
            },
            RoleEntry {
                id: "3".into(),
                name: "Vendor".into(),
            },
            RoleEntry {
                id: "4".into(),
                name: "Freelancer".into(),
            },
        ])
    }

    /// Adapter that succeeds and counts the calls it receives
    struct CountingAdapter {
        calls: usize,
        payloads: Vec<RegisterPayload>,
    }

    impl CountingAdapter {
        fn new() -> Self {
            Self {
                calls: 0,
                payloads: Vec::new(),
            }
        }
    }

    impl SubmissionAdapter for CountingAdapter {
        fn register(
            &mut self,
            payload: &RegisterPayload,
        ) -> Result<RegisterReceipt, SubmissionFailure> {
            self.calls += 1;
            self.payloads.push(payload.clone());
            Ok(RegisterReceipt {
                token: "issued-token".into(),
                user: StoredUser {
                    id: Some("9".into()),
                    username: payload.username.clone(),
                    email: Some(payload.email.clone()),
                    role: None,
                    role_id: Some(payload.role.0),
                },
            })
        }
    }

    fn fill_vendor_details(wizard: &mut RegistrationWizard<'_>) {
        wizard.set_field(Field::FullName, "Priya Shah").unwrap();
        wizard.set_field(Field::Email, "priya@example.com").unwrap();
        wizard.set_field(Field::Contact, "9123456780").unwrap();
        wizard.set_field(Field::Password, "secret1").unwrap();
        wizard.set_field(Field::Category, "catering").unwrap();
        wizard.set_field(Field::Service, "food-service").unwrap();
    }

    #[test]
    fn test_selecting_any_role_advances_to_step_two() {
        for &role in Role::all() {
            let mut store = MemoryRoleStore::default();
            let mut wizard = RegistrationWizard::new(&mut store).unwrap();
            wizard.select_role(role).unwrap();
            assert_eq!(wizard.step(), Step::EnterDetails);
            assert_eq!(wizard.role(), Some(role));
        }
    }

    #[test]
    fn test_role_persisted_to_store_on_selection() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.select_role(Role::Vendor).unwrap();
        drop(wizard);
        assert_eq!(store.stored_role(), Some(Role::Vendor));
    }

    #[test]
    fn test_stored_role_rehydrates_at_step_one() {
        let mut store = MemoryRoleStore::default();
        store.persist_role(Role::Freelancer);
        let wizard = RegistrationWizard::new(&mut store).unwrap();
        assert_eq!(wizard.step(), Step::SelectRole);
        assert_eq!(wizard.role(), Some(Role::Freelancer));
        // Fields are not persisted across sessions
        assert_eq!(wizard.field(Field::FullName), Some(""));
    }

    #[test]
    fn test_short_contact_blocks_advancement() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.select_role(Role::Individual).unwrap();
        wizard.set_field(Field::FullName, "Asha").unwrap();
        wizard.set_field(Field::Email, "asha@example.com").unwrap();
        wizard.set_field(Field::Contact, "12345").unwrap();
        wizard.set_field(Field::Password, "secret1").unwrap();

        let err = wizard.next().unwrap_err();
        match err {
            WizardError::Validation { issues } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field, "contact");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(wizard.step(), Step::EnterDetails);

        wizard.set_field(Field::Contact, "9876543210").unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.step(), Step::Review);
    }

    #[test]
    fn test_back_navigation_preserves_fields() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.select_role(Role::Individual).unwrap();
        wizard.set_field(Field::FullName, "Asha").unwrap();
        wizard.set_field(Field::Email, "asha@example.com").unwrap();
        wizard.set_field(Field::Contact, "9876543210").unwrap();
        wizard.set_field(Field::Password, "secret1").unwrap();
        wizard.next().unwrap();

        wizard.prev().unwrap();
        assert_eq!(wizard.step(), Step::EnterDetails);
        wizard.prev().unwrap();
        assert_eq!(wizard.step(), Step::SelectRole);
        wizard.select_role(Role::Individual).unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.field(Field::FullName), Some("Asha"));
    }

    #[test]
    fn test_prev_never_validates() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.select_role(Role::Vendor).unwrap();
        // Nothing filled in; forward is blocked but backward is not
        assert!(wizard.next().is_err());
        assert!(wizard.prev().is_ok());
        assert_eq!(wizard.step(), Step::SelectRole);
    }

    #[test]
    fn test_double_submit_issues_one_call() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.load_catalog(catalog());
        wizard.select_role(Role::Vendor).unwrap();
        fill_vendor_details(&mut wizard);
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.choose_plan(SubscriptionPlan::Pro).unwrap();

        let first = wizard.begin_submit();
        assert!(first.is_ok());
        let second = wizard.begin_submit();
        assert!(matches!(second, Err(WizardError::SubmissionPending)));
    }

    #[test]
    fn test_unresolved_role_blocks_submission() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        // Catalog loaded but has no vendor entry
        wizard.load_catalog(RoleCatalog::new(vec![RoleEntry {
            id: "1".into(),
            name: "Authenticated".into(),
        }]));
        wizard.select_role(Role::Vendor).unwrap();
        fill_vendor_details(&mut wizard);
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.choose_plan(SubscriptionPlan::Pro).unwrap();

        assert!(wizard.role_id().is_none());
        assert!(matches!(
            wizard.begin_submit(),
            Err(WizardError::RoleUnresolved)
        ));
        // Still at step 4, free to retry once the catalog has the role
        assert_eq!(wizard.step(), Step::ChoosePlan);
        wizard.load_catalog(catalog());
        assert!(wizard.begin_submit().is_ok());
    }

    #[test]
    fn test_missing_catalog_blocks_submission() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.select_role(Role::Individual).unwrap();
        wizard.set_field(Field::FullName, "Asha").unwrap();
        wizard.set_field(Field::Email, "asha@example.com").unwrap();
        wizard.set_field(Field::Contact, "9876543210").unwrap();
        wizard.set_field(Field::Password, "secret1").unwrap();
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.choose_plan(SubscriptionPlan::StartUp).unwrap();

        assert!(!wizard.catalog_loaded());
        assert!(matches!(
            wizard.begin_submit(),
            Err(WizardError::RoleUnresolved)
        ));
    }

    #[test]
    fn test_submission_failure_is_retryable() {
        struct FailingAdapter;
        impl SubmissionAdapter for FailingAdapter {
            fn register(
                &mut self,
                _payload: &RegisterPayload,
            ) -> Result<RegisterReceipt, SubmissionFailure> {
                Err(SubmissionFailure {
                    message: "email already taken".into(),
                })
            }
        }

        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.load_catalog(catalog());
        wizard.select_role(Role::Vendor).unwrap();
        fill_vendor_details(&mut wizard);
        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.choose_plan(SubscriptionPlan::Pro).unwrap();

        let err = wizard.submit(&mut FailingAdapter).unwrap_err();
        assert!(matches!(err, WizardError::SubmissionFailed { .. }));
        assert_eq!(wizard.step(), Step::ChoosePlan);
        assert_eq!(wizard.field(Field::FullName), Some("Priya Shah"));

        // Retry succeeds
        let mut adapter = CountingAdapter::new();
        wizard.submit(&mut adapter).unwrap();
        assert_eq!(wizard.step(), Step::Submitted);
        assert_eq!(adapter.calls, 1);
    }

    #[test]
    fn test_vendor_end_to_end() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.load_catalog(catalog());
        wizard.select_role(Role::Vendor).unwrap();
        fill_vendor_details(&mut wizard);
        wizard.next().unwrap();
        assert_eq!(wizard.step(), Step::Review);
        wizard.next().unwrap();
        wizard.choose_plan(SubscriptionPlan::Pro).unwrap();

        let mut adapter = CountingAdapter::new();
        let receipt = wizard.submit(&mut adapter).unwrap();

        assert_eq!(adapter.calls, 1);
        assert_eq!(
            adapter.payloads[0],
            RegisterPayload {
                username: "Priya Shah".into(),
                email: "priya@example.com".into(),
                password: "secret1".into(),
                role: RoleId(3),
            }
        );
        assert_eq!(wizard.step(), Step::Submitted);
        assert_eq!(wizard.issued_token(), Some("issued-token"));
        assert_eq!(receipt.user.username, "Priya Shah");
    }

    #[test]
    fn test_role_change_requires_returning_to_step_one() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.select_role(Role::Individual).unwrap();
        assert!(matches!(
            wizard.select_role(Role::Vendor),
            Err(WizardError::InvalidTransition { .. })
        ));
        wizard.prev().unwrap();
        wizard.select_role(Role::Vendor).unwrap();
        assert_eq!(wizard.role(), Some(Role::Vendor));
    }

    #[test]
    fn test_set_field_only_at_step_two() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        assert!(matches!(
            wizard.set_field(Field::FullName, "x"),
            Err(WizardError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_submit_requires_plan() {
        let mut store = MemoryRoleStore::default();
        let mut wizard = RegistrationWizard::new(&mut store).unwrap();
        wizard.load_catalog(catalog());
        wizard.select_role(Role::Individual).unwrap();
        wizard.set_field(Field::FullName, "Asha").unwrap();
        wizard.set_field(Field::Email, "asha@example.com").unwrap();
        wizard.set_field(Field::Contact, "9876543210").unwrap();
        wizard.set_field(Field::Password, "secret1").unwrap();
        wizard.next().unwrap();
        wizard.next().unwrap();

        assert!(matches!(
            wizard.begin_submit(),
            Err(WizardError::PlanMissing)
        ));
    }
}

//! Detail fields collected at step 2
//!
//! The field set is a tagged union over the role: an individual only carries
//! account fields, providers additionally carry company/category/service.
//! Reading or writing a field a role does not collect is a typed error, so
//! there is no way to smuggle a provider field through an individual
//! registration.

use serde_json::json;

use crate::wizard::role::Role;
use crate::wizard::state::WizardError;

/// Fields every registration collects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFields {
    pub full_name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
}

/// Additional fields collected from vendors and freelancers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFields {
    pub account: AccountFields,
    /// Optional company name
    pub company: String,
    pub category: String,
    pub service: String,
}

/// One logical form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Contact,
    Password,
    Company,
    Category,
    Service,
}

impl Field {
    /// Schema property name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Email => "email",
            Field::Contact => "contact",
            Field::Password => "password",
            Field::Company => "company",
            Field::Category => "category",
            Field::Service => "service",
        }
    }

    /// Prompt label
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email",
            Field::Contact => "Contact Number",
            Field::Password => "Password",
            Field::Company => "Company Name (optional)",
            Field::Category => "Category",
            Field::Service => "Service",
        }
    }

    /// Whether only vendor/freelancer registrations collect this field
    pub fn provider_only(&self) -> bool {
        matches!(self, Field::Company | Field::Category | Field::Service)
    }

    /// The fields a given role collects, in prompt order
    pub fn for_role(role: Role) -> &'static [Field] {
        if role.collects_provider_fields() {
            &[
                Field::FullName,
                Field::Email,
                Field::Contact,
                Field::Password,
                Field::Company,
                Field::Category,
                Field::Service,
            ]
        } else {
            &[Field::FullName, Field::Email, Field::Contact, Field::Password]
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role-tagged detail fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    Individual(AccountFields),
    Vendor(ProviderFields),
    Freelancer(ProviderFields),
}

impl Details {
    /// Fresh, empty details for a role
    pub fn new(role: Role) -> Self {
        match role {
            Role::Individual => Details::Individual(AccountFields::default()),
            Role::Vendor => Details::Vendor(ProviderFields::default()),
            Role::Freelancer => Details::Freelancer(ProviderFields::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Details::Individual(_) => Role::Individual,
            Details::Vendor(_) => Role::Vendor,
            Details::Freelancer(_) => Role::Freelancer,
        }
    }

    /// Re-tag for a different role, carrying over whatever the new role
    /// still collects. Provider fields survive a vendor/freelancer switch
    /// and are dropped when switching to individual.
    pub fn retag(self, role: Role) -> Self {
        if self.role() == role {
            return self;
        }
        match (self, role) {
            (Details::Vendor(p), Role::Freelancer) => Details::Freelancer(p),
            (Details::Freelancer(p), Role::Vendor) => Details::Vendor(p),
            (Details::Vendor(p) | Details::Freelancer(p), Role::Individual) => {
                Details::Individual(p.account)
            }
            (Details::Individual(account), Role::Vendor) => Details::Vendor(ProviderFields {
                account,
                ..ProviderFields::default()
            }),
            (Details::Individual(account), Role::Freelancer) => {
                Details::Freelancer(ProviderFields {
                    account,
                    ..ProviderFields::default()
                })
            }
            (details, _) => details,
        }
    }

    pub fn account(&self) -> &AccountFields {
        match self {
            Details::Individual(account) => account,
            Details::Vendor(provider) | Details::Freelancer(provider) => &provider.account,
        }
    }

    fn account_mut(&mut self) -> &mut AccountFields {
        match self {
            Details::Individual(account) => account,
            Details::Vendor(provider) | Details::Freelancer(provider) => &mut provider.account,
        }
    }

    pub fn provider(&self) -> Option<&ProviderFields> {
        match self {
            Details::Individual(_) => None,
            Details::Vendor(provider) | Details::Freelancer(provider) => Some(provider),
        }
    }

    fn provider_mut(&mut self) -> Option<&mut ProviderFields> {
        match self {
            Details::Individual(_) => None,
            Details::Vendor(provider) | Details::Freelancer(provider) => Some(provider),
        }
    }

    /// Read a field's current value; `None` when this role does not collect
    /// the field
    pub fn get(&self, field: Field) -> Option<&str> {
        let account = self.account();
        match field {
            Field::FullName => Some(account.full_name.as_str()),
            Field::Email => Some(account.email.as_str()),
            Field::Contact => Some(account.contact.as_str()),
            Field::Password => Some(account.password.as_str()),
            Field::Company => self.provider().map(|p| p.company.as_str()),
            Field::Category => self.provider().map(|p| p.category.as_str()),
            Field::Service => self.provider().map(|p| p.service.as_str()),
        }
    }

    /// Write a field's value; provider fields reject non-provider roles
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), WizardError> {
        let role = self.role();
        let reject = || WizardError::FieldNotCollected {
            field: field.as_str(),
            role: role.as_str(),
        };
        match field {
            Field::FullName => self.account_mut().full_name = value.to_string(),
            Field::Email => self.account_mut().email = value.to_string(),
            Field::Contact => self.account_mut().contact = value.to_string(),
            Field::Password => self.account_mut().password = value.to_string(),
            Field::Company => self.provider_mut().ok_or_else(reject)?.company = value.to_string(),
            Field::Category => self.provider_mut().ok_or_else(reject)?.category = value.to_string(),
            Field::Service => self.provider_mut().ok_or_else(reject)?.service = value.to_string(),
        }
        Ok(())
    }

    /// Build the schema validation instance for the current role
    pub fn to_instance(&self) -> serde_json::Value {
        let account = self.account();
        let mut instance = json!({
            "role": self.role().as_str(),
            "full_name": account.full_name,
            "email": account.email,
            "contact": account.contact,
            "password": account.password,
        });
        if let Some(provider) = self.provider() {
            instance["company"] = json!(provider.company);
            instance["category"] = json!(provider.category);
            instance["service"] = json!(provider.service);
        }
        instance
    }
}

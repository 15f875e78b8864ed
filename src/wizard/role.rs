//! Account roles, the backend role catalog, and subscription plans

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three account kinds the marketplace registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Someone planning an event
    Individual,
    /// A service provider like a venue or caterer
    Vendor,
    /// An individual provider like a DJ or driver
    Freelancer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Individual => "individual",
            Role::Vendor => "vendor",
            Role::Freelancer => "freelancer",
        }
    }

    /// Display label for prompts
    pub fn label(&self) -> &'static str {
        match self {
            Role::Individual => "Individual",
            Role::Vendor => "Vendor",
            Role::Freelancer => "Freelancer",
        }
    }

    /// One-line card copy shown during role selection
    pub fn description(&self) -> &'static str {
        match self {
            Role::Individual => "If you are planning an event",
            Role::Vendor => "If you are a service provider like a venue, caterer etc.",
            Role::Freelancer => "If you are an individual provider like a DJ, driver etc.",
        }
    }

    /// Vendors and freelancers fill in company/category/service details
    pub fn collects_provider_fields(&self) -> bool {
        matches!(self, Role::Vendor | Role::Freelancer)
    }

    pub fn all() -> &'static [Role] {
        &[Role::Individual, Role::Vendor, Role::Freelancer]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(Role::Individual),
            "vendor" => Ok(Role::Vendor),
            "freelancer" => Ok(Role::Freelancer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Numeric role identifier assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub u32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the backend role catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    /// Ids arrive as numbers or strings depending on the backend snapshot
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// The backend's role-name → id mapping
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    entries: Vec<RoleEntry>,
}

impl RoleCatalog {
    pub fn new(entries: Vec<RoleEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RoleEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a role to its numeric id by case-insensitive name match.
    ///
    /// No matching entry, or a non-numeric id, leaves the role unresolved.
    pub fn resolve(&self, role: Role) -> Option<RoleId> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(role.as_str()))
            .and_then(|entry| entry.id.parse().ok())
            .map(RoleId)
    }
}

/// Subscription plans offered at the final wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionPlan {
    StartUp,
    Pro,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::StartUp => "start-up",
            SubscriptionPlan::Pro => "pro",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionPlan::StartUp => "Start-Up",
            SubscriptionPlan::Pro => "Pro",
            SubscriptionPlan::Enterprise => "Enterprise",
        }
    }

    pub fn price(&self) -> &'static str {
        match self {
            SubscriptionPlan::StartUp => "Free",
            SubscriptionPlan::Pro => "$49",
            SubscriptionPlan::Enterprise => "$99",
        }
    }

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            SubscriptionPlan::StartUp => {
                &["Unlimited Downloads", "Email Support", "Lifetime Access"]
            }
            SubscriptionPlan::Pro => {
                &["Everything in Free", "Custom Call Support", "1 Year Access"]
            }
            SubscriptionPlan::Enterprise => {
                &["Everything in Pro", "Priority Support", "Lifetime Access"]
            }
        }
    }

    pub fn all() -> &'static [SubscriptionPlan] {
        &[
            SubscriptionPlan::StartUp,
            SubscriptionPlan::Pro,
            SubscriptionPlan::Enterprise,
        ]
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start-up" | "startup" => Ok(SubscriptionPlan::StartUp),
            "pro" => Ok(SubscriptionPlan::Pro),
            "enterprise" => Ok(SubscriptionPlan::Enterprise),
            other => Err(format!("unknown plan: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RoleCatalog {
        RoleCatalog::new(vec![
            RoleEntry {
                id: "1".into(),
                name: "Authenticated".into(),
            },
            RoleEntry {
                id: "3".into(),
                name: "Vendor".into(),
            },
            RoleEntry {
                id: "4".into(),
                name: "FREELANCER".into(),
            },
        ])
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.resolve(Role::Vendor), Some(RoleId(3)));
        assert_eq!(catalog.resolve(Role::Freelancer), Some(RoleId(4)));
    }

    #[test]
    fn test_resolve_missing_name() {
        assert_eq!(catalog().resolve(Role::Individual), None);
    }

    #[test]
    fn test_resolve_non_numeric_id() {
        let catalog = RoleCatalog::new(vec![RoleEntry {
            id: "vendor-id".into(),
            name: "Vendor".into(),
        }]);
        assert_eq!(catalog.resolve(Role::Vendor), None);
    }

    #[test]
    fn test_role_entry_accepts_numeric_ids() {
        let entry: RoleEntry = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Vendor",
        }))
        .unwrap();
        assert_eq!(entry.id, "3");
    }

    #[test]
    fn test_plan_wire_names() {
        assert_eq!(
            serde_json::to_string(&SubscriptionPlan::StartUp).unwrap(),
            "\"start-up\""
        );
        assert_eq!("startup".parse::<SubscriptionPlan>().unwrap(), SubscriptionPlan::StartUp);
    }
}

//! Subscription plans and the plan catalogue.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::user::Permission;

/// Subscription tier. Wire format: lowercase plan id (`"starter"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Starter,
    Professional,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Starter, Plan::Professional, Plan::Enterprise];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    /// Permissions granted to a newly created account on this plan.
    pub fn default_permissions(self) -> BTreeSet<Permission> {
        match self {
            Self::Starter => BTreeSet::from([Permission::Basic]),
            Self::Professional | Self::Enterprise => {
                BTreeSet::from([Permission::Basic, Permission::Advanced])
            }
        }
    }

    pub fn details(self) -> PlanDetails {
        match self {
            Self::Starter => PlanDetails {
                id: self,
                name: "Starter",
                price: 0,
                currency: "USD",
                billing: Billing::Free,
                limits: PlanLimits {
                    projects: Some(5),
                    reports: Some(10),
                    storage_gb: 1,
                    api_calls: 100,
                    team_members: Some(1),
                },
            },
            Self::Professional => PlanDetails {
                id: self,
                name: "Professional",
                price: 99,
                currency: "USD",
                billing: Billing::Monthly,
                limits: PlanLimits {
                    projects: Some(25),
                    reports: Some(100),
                    storage_gb: 10,
                    api_calls: 1000,
                    team_members: Some(5),
                },
            },
            Self::Enterprise => PlanDetails {
                id: self,
                name: "Enterprise",
                price: 299,
                currency: "USD",
                billing: Billing::Monthly,
                limits: PlanLimits {
                    projects: None,
                    reports: None,
                    storage_gb: 100,
                    api_calls: 10000,
                    team_members: None,
                },
            },
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(pub String);

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "starter" => Ok(Self::Starter),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(UnknownPlan(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Billing {
    Free,
    Monthly,
}

/// Usage limits of a plan. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub projects: Option<u32>,
    pub reports: Option<u32>,
    pub storage_gb: u32,
    pub api_calls: u32,
    pub team_members: Option<u32>,
}

/// Catalogue entry for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    pub id: Plan,
    pub name: &'static str,
    /// Price in whole currency units per billing period.
    pub price: u32,
    pub currency: &'static str,
    pub billing: Billing,
    pub limits: PlanLimits,
}

/// All plans, cheapest first.
pub fn catalogue() -> Vec<PlanDetails> {
    Plan::ALL.iter().map(|p| p.details()).collect()
}

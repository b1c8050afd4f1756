use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

impl FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" => Ok(BillingCycle::Monthly),
            "yearly" | "year" | "annual" => Ok(BillingCycle::Yearly),
            _ => Err(format!("Invalid billing cycle: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub monthly_price: f64,
    pub features: Vec<&'static str>,
    pub popular: bool,
}

/// A plan priced for a particular billing cycle.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuote {
    #[serde(flatten)]
    pub plan: SubscriptionPlan,
    pub billing_cycle: BillingCycle,
    /// Amount charged per billing period
    pub price: f64,
    /// Savings versus paying monthly for the same period
    pub savings: f64,
}

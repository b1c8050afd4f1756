use crate::error::{AppError, Result};
use crate::models::{BillingCycle, PlanQuote};
use crate::services::pricing::price_list;
use axum::{extract::Query, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PricingParams {
    #[serde(default)]
    pub cycle: Option<String>,
}

/// GET /pricing?cycle=monthly|yearly
pub async fn list_pricing(Query(params): Query<PricingParams>) -> Result<Json<Vec<PlanQuote>>> {
    let cycle = match params.cycle.as_deref() {
        None => BillingCycle::default(),
        Some(c) => c.parse().map_err(AppError::InvalidRequest)?,
    };
    Ok(Json(price_list(cycle)))
}

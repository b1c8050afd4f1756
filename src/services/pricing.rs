use crate::constants::YEARLY_DISCOUNT;
use crate::models::{BillingCycle, PlanQuote, SubscriptionPlan};

pub fn subscription_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan {
            id: "free",
            name: "Free",
            monthly_price: 0.0,
            features: vec![
                "Generate basic tour itineraries",
                "Book available tours",
                "Access to refill stations",
                "Basic AI travel assistance",
            ],
            popular: false,
        },
        SubscriptionPlan {
            id: "premium",
            name: "Premium",
            monthly_price: 29.0,
            features: vec![
                "Everything in Free",
                "Custom tour generation",
                "Preferred location selection",
                "Budget customization",
                "Priority AI assistance",
                "Exclusive travel deals",
            ],
            popular: true,
        },
    ]
}

/// Price a plan for one billing period. Yearly billing charges twelve
/// months less the yearly discount.
pub fn quote(plan: SubscriptionPlan, cycle: BillingCycle) -> PlanQuote {
    let (price, savings) = match cycle {
        BillingCycle::Monthly => (plan.monthly_price, 0.0),
        BillingCycle::Yearly => {
            let full = plan.monthly_price * 12.0;
            let discounted = round_cents(full * (1.0 - YEARLY_DISCOUNT));
            (discounted, round_cents(full - discounted))
        }
    };

    PlanQuote {
        plan,
        billing_cycle: cycle,
        price,
        savings,
    }
}

pub fn price_list(cycle: BillingCycle) -> Vec<PlanQuote> {
    subscription_plans()
        .into_iter()
        .map(|plan| quote(plan, cycle))
        .collect()
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

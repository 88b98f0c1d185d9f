use rust_decimal::{Decimal, RoundingStrategy};

/// Amounts derived from a discount percentage, rounded half-up at the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedPurchase {
    pub discount_applied: Decimal,
    pub final_amount: Decimal,
}

/// Returns `None` when the amount is too large to price without overflow.
pub fn price_purchase(amount: Decimal, percent: u8) -> Option<PricedPurchase> {
    let discount_applied = amount
        .checked_mul(Decimal::from(percent))?
        .checked_div(Decimal::ONE_HUNDRED)
        .map(to_cents)?;
    let final_amount = amount.checked_sub(discount_applied).map(to_cents)?;
    Some(PricedPurchase {
        discount_applied,
        final_amount,
    })
}

pub fn benefit_label(percent: u8) -> String {
    if percent > 0 {
        format!("Discount {percent}%")
    } else {
        "No applicable benefit".to_string()
    }
}

fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

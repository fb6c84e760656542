use rust_decimal::Decimal;

use crate::config::ROUNDING_DP;

/// Price implied by an amount spread over `units`, rounded to the ledger's
/// precision. `None` when there are no units to spread it over.
pub fn unit_price(amount: Decimal, units: Decimal) -> Option<Decimal> {
    amount
        .checked_div(units)
        .map(|price| price.round_dp(ROUNDING_DP))
}

/// Average-cost basis left after reducing a holding to `remaining_units`.
pub fn average_cost_after_sell(
    units: Decimal,
    cost_basis: Decimal,
    remaining_units: Decimal,
) -> Decimal {
    match cost_basis.checked_div(units) {
        Some(cost_per_unit) => remaining_units * cost_per_unit,
        None => Decimal::ZERO,
    }
}

pub fn market_value(units: Decimal, price: Decimal) -> Decimal {
    round(units * price)
}

pub fn round(value: Decimal) -> Decimal {
    value.round_dp(ROUNDING_DP).normalize()
}

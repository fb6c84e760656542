use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use crate::app::calc;

/// Running holding for one fund under average-cost valuation.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, new)]
pub struct Position {
    units: Decimal,
    cost_basis: Decimal,
}

impl Position {
    pub fn buy(&mut self, units: Decimal, amount: Decimal) {
        self.units += units;
        self.cost_basis += amount;
    }

    /// Removes `units` and rescales the basis so that the per-unit cost of the
    /// remaining holding is unchanged.
    pub fn sell(&mut self, units: Decimal) {
        let remaining = self.units - units;
        self.cost_basis = calc::average_cost_after_sell(self.units, self.cost_basis, remaining);
        self.units = remaining;
    }
}

pub mod cards;
pub mod delivery;
pub mod layout;
pub mod materials;
pub mod quantity;
pub mod sticker;

use rust_decimal::{Decimal, RoundingStrategy};

/// Orders whose shadow total lands under this are topped up by a flat
/// surcharge. Shared by the sticker and card calculators.
pub(crate) const MINIMUM_ORDER_CENTS: i64 = 3_500;
pub(crate) const SMALL_ORDER_SURCHARGE_CENTS: i64 = 1_000;

pub(crate) fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub(crate) fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn round_3dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

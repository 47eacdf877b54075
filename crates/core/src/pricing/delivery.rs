use rust_decimal::Decimal;

use crate::domain::quote::CourierFee;
use crate::pricing::dollars;

/// Fee charged when the postal prefix is missing or outside the zone table.
pub const DEFAULT_COURIER_FEE_CENTS: i64 = 1_200;

/// Flat courier fee for a destination postal code. Zones are keyed by the
/// first two characters; anything unrecognized ships at the default rate.
pub fn resolve_courier(postal_code: &str, default_fee: Decimal) -> CourierFee {
    let trimmed = postal_code.trim();
    let prefix: String = trimmed.chars().take(2).collect();
    let fee = zone_fee_cents(&prefix).map_or(default_fee, dollars);
    CourierFee { postal_prefix: prefix, fee }
}

pub fn courier_fee(postal_code: &str) -> CourierFee {
    resolve_courier(postal_code, dollars(DEFAULT_COURIER_FEE_CENTS))
}

fn zone_fee_cents(prefix: &str) -> Option<i64> {
    if prefix.len() != 2 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let district: u32 = prefix.parse().ok()?;
    match district {
        1..=10 => Some(1_200),
        11..=13 => Some(1_500),
        14..=33 => Some(1_200),
        34..=55 => Some(1_000),
        56..=59 => Some(1_200),
        60..=73 => Some(1_500),
        75..=80 => Some(1_200),
        81..=82 => Some(1_000),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{courier_fee, resolve_courier};

    #[test]
    fn central_districts_ship_at_twelve() {
        assert_eq!(courier_fee("018936").fee, dec!(12.00));
        assert_eq!(courier_fee("238801").fee, dec!(12.00));
        assert_eq!(courier_fee("579828").fee, dec!(12.00));
    }

    #[test]
    fn outlying_districts_ship_at_fifteen() {
        assert_eq!(courier_fee("120300").fee, dec!(15.00));
        assert_eq!(courier_fee("640001").fee, dec!(15.00));
        assert_eq!(courier_fee("730742").fee, dec!(15.00));
    }

    #[test]
    fn eastern_and_island_districts_ship_at_ten() {
        assert_eq!(courier_fee("460001").fee, dec!(10.00));
        assert_eq!(courier_fee("349999").fee, dec!(10.00));
        assert_eq!(courier_fee("820123").fee, dec!(10.00));
    }

    #[test]
    fn gaps_in_the_zone_table_fall_back_to_the_default() {
        // 74 and 83+ have no zone row.
        assert_eq!(courier_fee("740000").fee, dec!(12.00));
        assert_eq!(courier_fee("830001").fee, dec!(12.00));
        assert_eq!(courier_fee("009999").fee, dec!(12.00));
    }

    #[test]
    fn malformed_postal_codes_use_the_default() {
        assert_eq!(courier_fee("").fee, dec!(12.00));
        assert_eq!(courier_fee("5").fee, dec!(12.00));
        assert_eq!(courier_fee("S123456").fee, dec!(12.00));
    }

    #[test]
    fn the_default_fee_is_configurable() {
        let fee = resolve_courier("S123456", dec!(8.00));
        assert_eq!(fee.fee, dec!(8.00));
        assert_eq!(fee.postal_prefix, "S1");

        // Zoned prefixes ignore the override.
        assert_eq!(resolve_courier("460001", dec!(8.00)).fee, dec!(10.00));
    }

    #[test]
    fn prefix_is_echoed_for_display() {
        assert_eq!(courier_fee("018936").postal_prefix, "01");
        assert_eq!(courier_fee("").postal_prefix, "");
    }
}

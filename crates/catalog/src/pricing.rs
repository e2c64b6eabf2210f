//! Price range aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated `{min, max, range}` over a set of prices.
///
/// `range` is the display form: the single value when `min == max`, else
/// `"min - max"`. An empty price set yields `min = max = None` and an empty
/// `range` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub range: String,
}

impl PriceRange {
    /// Range over no prices.
    pub fn empty() -> Self {
        Self {
            min: None,
            max: None,
            range: String::new(),
        }
    }

    /// Reduce a set of prices to its display range.
    pub fn from_prices(prices: &[Decimal]) -> Self {
        let Some(&first) = prices.first() else {
            return Self::empty();
        };

        let mut min = first;
        let mut max = first;
        for &price in &prices[1..] {
            min = min.min(price);
            max = max.max(price);
        }

        let range = if min == max {
            format_price(min)
        } else {
            format!("{} - {}", format_price(min), format_price(max))
        };

        Self {
            min: Some(min),
            max: Some(max),
            range,
        }
    }
}

/// Trailing zeros stripped for display ("10.00" renders as "10").
fn format_price(price: Decimal) -> String {
    price.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    #[test]
    fn empty_input_yields_sentinel() {
        let range = PriceRange::from_prices(&[]);
        assert_eq!(range, PriceRange::empty());
        assert_eq!(range.min, None);
        assert_eq!(range.max, None);
        assert_eq!(range.range, "");
    }

    #[test]
    fn singleton_renders_single_value() {
        let range = PriceRange::from_prices(&[dec(10, 0)]);
        assert_eq!(range.min, Some(dec(10, 0)));
        assert_eq!(range.max, Some(dec(10, 0)));
        assert_eq!(range.range, "10");
    }

    #[test]
    fn equal_prices_render_single_value() {
        let range = PriceRange::from_prices(&[dec(1250, 2), dec(1250, 2)]);
        assert_eq!(range.range, "12.5");
    }

    #[test]
    fn distinct_prices_render_min_dash_max() {
        let range = PriceRange::from_prices(&[dec(25, 0), dec(10, 0), dec(15, 0)]);
        assert_eq!(range.min, Some(dec(10, 0)));
        assert_eq!(range.max, Some(dec(25, 0)));
        assert_eq!(range.range, "10 - 25");
    }

    #[test]
    fn display_strips_trailing_zeros() {
        let range = PriceRange::from_prices(&[dec(1000, 2), dec(2550, 2)]);
        assert_eq!(range.range, "10 - 25.5");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: min <= max for every non-empty input.
            #[test]
            fn min_never_exceeds_max(cents in proptest::collection::vec(0i64..1_000_000, 1..20)) {
                let prices: Vec<Decimal> = cents.iter().map(|&c| Decimal::new(c, 2)).collect();
                let range = PriceRange::from_prices(&prices);
                let (min, max) = (range.min.unwrap(), range.max.unwrap());
                prop_assert!(min <= max);
            }

            /// Property: the display string is a single value iff min == max.
            #[test]
            fn range_is_single_value_iff_extremes_match(cents in proptest::collection::vec(0i64..1_000_000, 1..20)) {
                let prices: Vec<Decimal> = cents.iter().map(|&c| Decimal::new(c, 2)).collect();
                let range = PriceRange::from_prices(&prices);
                prop_assert!(!range.range.is_empty());
                if range.min == range.max {
                    prop_assert!(!range.range.contains(" - "));
                } else {
                    prop_assert!(range.range.contains(" - "));
                }
            }

            /// Property: the extremes come from the input set.
            #[test]
            fn extremes_are_members_of_the_input(cents in proptest::collection::vec(0i64..1_000_000, 1..20)) {
                let prices: Vec<Decimal> = cents.iter().map(|&c| Decimal::new(c, 2)).collect();
                let range = PriceRange::from_prices(&prices);
                prop_assert!(prices.contains(&range.min.unwrap()));
                prop_assert!(prices.contains(&range.max.unwrap()));
            }
        }
    }
}

//! Offer Price Display Rule
//!
//! An offer price is only honored when it is strictly below the regular
//! price; otherwise the regular price is shown on its own.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PriceDisplay {
    /// Regular price only
    Regular { price: Decimal },
    /// Discounted: offer shown prominently, regular price struck through
    Offer {
        price: Decimal,
        offer_price: Decimal,
        #[serde(skip_serializing_if = "Option::is_none")]
        offer_text: Option<String>,
    },
}

pub fn price_display(
    price: Decimal,
    offer_price: Option<Decimal>,
    offer_text: Option<&str>,
) -> PriceDisplay {
    match offer_price {
        Some(offer) if offer < price => PriceDisplay::Offer {
            price,
            offer_price: offer,
            offer_text: offer_text.map(str::to_string),
        },
        _ => PriceDisplay::Regular { price },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn no_offer_shows_regular_price() {
        assert_eq!(
            price_display(d(1000), None, None),
            PriceDisplay::Regular { price: d(1000) }
        );
    }

    #[test]
    fn lower_offer_is_honored() {
        assert_eq!(
            price_display(d(1000), Some(d(750)), Some("25% off")),
            PriceDisplay::Offer {
                price: d(1000),
                offer_price: d(750),
                offer_text: Some("25% off".to_string()),
            }
        );
    }

    #[test]
    fn equal_offer_is_ignored() {
        assert_eq!(
            price_display(d(1000), Some(d(1000)), None),
            PriceDisplay::Regular { price: d(1000) }
        );
    }

    #[test]
    fn higher_offer_is_ignored() {
        assert_eq!(
            price_display(d(1000), Some(d(1200)), Some("deal")),
            PriceDisplay::Regular { price: d(1000) }
        );
    }
}

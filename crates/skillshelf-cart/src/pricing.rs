//! Order pricing: subtotal, promo discount, total.

/// The single recognized promo code.
pub const PROMO_CODE: &str = "WELCOME10";

const PROMO_DISCOUNT_PERCENT: u64 = 10;

/// A cart line joined with its catalog price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
    pub module_id: String,
    pub price: u64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

/// Discount for a promo code against a subtotal. Unrecognized codes discount
/// nothing. The discount never exceeds the subtotal, so the total cannot go
/// negative.
pub fn promo_discount(promo_code: &str, subtotal: u64) -> u64 {
    if promo_code == PROMO_CODE {
        subtotal * PROMO_DISCOUNT_PERCENT / 100
    } else {
        0
    }
}

/// Price an order: subtotal over price x quantity, minus the promo discount.
pub fn price_order(items: &[PricedItem], promo_code: &str) -> OrderTotals {
    let subtotal = items
        .iter()
        .map(|item| item.price * u64::from(item.quantity))
        .sum();
    let discount = promo_discount(promo_code, subtotal);

    OrderTotals {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: u64) -> PricedItem {
        PricedItem {
            module_id: id.to_string(),
            price,
            quantity: 1,
        }
    }

    #[test]
    fn welcome10_discounts_ten_percent() {
        let totals = price_order(&[item("a", 6000), item("b", 4000)], "WELCOME10");
        assert_eq!(totals.subtotal, 10000);
        assert_eq!(totals.discount, 1000);
        assert_eq!(totals.total, 9000);
    }

    #[test]
    fn unrecognized_code_discounts_nothing() {
        let totals = price_order(&[item("a", 5000)], "WELCOME20");
        assert_eq!(totals.discount, 0);
        assert_eq!(totals.total, 5000);
    }

    #[test]
    fn empty_promo_discounts_nothing() {
        let totals = price_order(&[item("a", 5000)], "");
        assert_eq!(totals.subtotal, 5000);
        assert_eq!(totals.discount, 0);
        assert_eq!(totals.total, 5000);
    }

    #[test]
    fn empty_order_totals_zero() {
        let totals = price_order(&[], "WELCOME10");
        assert_eq!(totals.subtotal, 0);
        assert_eq!(totals.discount, 0);
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn quantity_multiplies_price() {
        let totals = price_order(
            &[PricedItem {
                module_id: "a".into(),
                price: 2500,
                quantity: 2,
            }],
            "",
        );
        assert_eq!(totals.subtotal, 5000);
    }
}

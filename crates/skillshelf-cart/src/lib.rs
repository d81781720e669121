//! The visitor's pending-purchase selection.
//!
//! State transitions go through [`reduce`], a pure function over a tagged
//! action type, so the reducer is testable independently of the web layer.
//! The cart is session-scoped: the page layer serializes it into a session
//! cookie and nothing is ever stored server-side.

mod checkout;
mod pricing;

pub use checkout::{CheckoutError, CheckoutFlow, CheckoutPhase};
pub use pricing::{OrderTotals, PricedItem, price_order, promo_discount, PROMO_CODE};

use serde::{Deserialize, Serialize};

/// One cart line. Quantity is always 1 in practice; at most one item exists
/// per module id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub module_id: String,
    pub quantity: u32,
}

/// The cart contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

/// Cart transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    AddItem(String),
    RemoveItem(String),
    Clear,
}

/// Apply an action to the cart. All actions are total: adding a present item
/// and removing an absent one are silent no-ops.
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(module_id) => {
            if state.items.iter().any(|item| item.module_id == module_id) {
                return state;
            }
            let mut items = state.items;
            items.push(CartItem {
                module_id,
                quantity: 1,
            });
            CartState { items }
        }
        CartAction::RemoveItem(module_id) => CartState {
            items: state
                .items
                .into_iter()
                .filter(|item| item.module_id != module_id)
                .collect(),
        },
        CartAction::Clear => CartState::default(),
    }
}

impl CartState {
    pub fn is_in_cart(&self, module_id: &str) -> bool {
        self.items.iter().any(|item| item.module_id == module_id)
    }

    /// Number of distinct items. Derived, not stored.
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn module_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.module_id.clone()).collect()
    }
}

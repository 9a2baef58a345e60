//! Simulated checkout.
//!
//! Checkout here builds a read-only order summary from the pre-checkout
//! cart and nothing else: no network call, no order persistence. The
//! service clears the cart once the summary is taken.

use pet_pantry_core::{LineItem, Price};

use crate::model::{CartState, CartTotals};

/// One itemized line of the order confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: Price,
}

/// Read-only order confirmation, reflecting the cart as it stood at the
/// moment of checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub totals: CartTotals,
}

impl OrderSummary {
    /// Capture the current cart into an order summary.
    #[must_use]
    pub fn from_state(state: &CartState, totals: CartTotals) -> Self {
        Self {
            lines: state.items().iter().map(OrderLine::from).collect(),
            totals,
        }
    }
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }
}

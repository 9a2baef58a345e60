//! The persisted cart line item.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// One product entry in the cart with an associated quantity.
///
/// Field names match the persisted storage layout
/// (`{id, name, price, image, quantity}`), so this type round-trips
/// through the persistence adapter unchanged.
///
/// Invariants (enforced by the cart model, not by this type):
/// - at most one `LineItem` per `id` in a cart
/// - `quantity >= 1` whenever the item is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque product identifier, unique within the cart.
    pub id: ProductId,
    /// Display label.
    pub name: String,
    /// Unit price in minor currency units.
    pub price: Price,
    /// Product image URI or placeholder.
    pub image: String,
    /// Units of this product in the cart.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Display label applied when a candidate omits its name.
    pub const DEFAULT_NAME: &'static str = "Item";

    /// Image URI applied when a candidate omits its image.
    pub const PLACEHOLDER_IMAGE: &'static str =
        "https://via.placeholder.com/100x100?text=No+photo";

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.saturating_mul(self.quantity)
    }
}

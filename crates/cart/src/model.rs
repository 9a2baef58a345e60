//! Pure cart state: the merge, clamp and totals rules.
//!
//! `CartState` owns the ordered line-item collection and enforces its two
//! invariants: at most one line item per product id, and a stored quantity
//! of at least 1 (an item driven to zero or below is removed instead).
//! It performs no I/O and no rendering, so every rule here is testable in
//! isolation; the [`crate::service`] layer wires in persistence,
//! notifications and change broadcasts.

use pet_pantry_core::{LineItem, Price, ProductId};

/// Raw item data as read from a product element's data attributes.
///
/// Everything is optional and stringly typed because it comes straight
/// off the markup; the model applies defaults and coercion on insertion.
#[derive(Debug, Clone, Default)]
pub struct ItemCandidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ItemCandidate {
    /// Candidate with only an id set.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// What an add did, so the caller can pick the right notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was inserted with quantity 1.
    Inserted { name: String },
    /// An existing line item's quantity went up by 1.
    QuantityIncreased { name: String, quantity: u32 },
    /// The candidate had no usable id; nothing changed.
    Rejected,
}

/// What a quantity delta did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// The quantity was updated and stays positive.
    Updated { name: String, quantity: u32 },
    /// The quantity reached zero or below; the item was removed.
    Removed(LineItem),
    /// No item with that id; nothing changed.
    NotFound,
}

/// Delivery fee policy: a flat fee waived once the subtotal reaches the
/// free-delivery threshold. The comparison is inclusive: a subtotal equal
/// to the threshold already ships free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    pub free_threshold: Price,
    pub flat_fee: Price,
}

/// Derived cart aggregates. Computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Total units across all line items.
    pub item_count: u32,
    /// Sum of unit price times quantity across all line items.
    pub subtotal: Price,
    /// Flat surcharge, or zero at/above the free-delivery threshold.
    pub delivery_fee: Price,
    /// Subtotal plus delivery fee.
    pub grand_total: Price,
    /// How far the subtotal is from free delivery (zero once reached).
    pub remaining_for_free_delivery: Price,
}

/// Ordered collection of cart line items.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build state from a persisted collection, re-establishing the
    /// invariants on data we did not write ourselves: entries without an
    /// id are dropped, duplicate ids merge by summing quantities, and
    /// quantities are clamped to at least 1.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut state = Self::new();
        for mut item in items {
            if item.id.is_empty() {
                tracing::warn!("Dropping stored cart entry without an id");
                continue;
            }
            item.quantity = item.quantity.max(1);
            match state.items.iter().position(|existing| existing.id == item.id) {
                Some(index) => {
                    if let Some(existing) = state.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => state.items.push(item),
            }
        }
        state
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a candidate to the cart.
    ///
    /// A candidate without an id is rejected (logged, no state change).
    /// A known id increments the existing line's quantity by 1; a new id
    /// inserts a fresh line with quantity 1, applying defaults for any
    /// missing name, price or image.
    pub fn add(&mut self, candidate: &ItemCandidate) -> AddOutcome {
        let Some(id) = candidate.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
        else {
            tracing::error!(?candidate, "Rejected cart candidate without an id");
            return AddOutcome::Rejected;
        };
        let id = ProductId::from(id);

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            return AddOutcome::QuantityIncreased {
                name: item.name.clone(),
                quantity: item.quantity,
            };
        }

        let name = candidate
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(LineItem::DEFAULT_NAME)
            .to_owned();
        let item = LineItem {
            id,
            name: name.clone(),
            price: coerce_price(candidate.price.as_deref()),
            image: candidate
                .image
                .as_deref()
                .filter(|image| !image.is_empty())
                .unwrap_or(LineItem::PLACEHOLDER_IMAGE)
                .to_owned(),
            quantity: 1,
        };
        self.items.push(item);
        AddOutcome::Inserted { name }
    }

    /// Remove the line item with the given id, returning it if present.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let position = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Apply a signed quantity change to the line item with the given id.
    ///
    /// A resulting quantity of zero or below removes the item, so a
    /// non-positive quantity is never stored. Any integer delta is
    /// accepted; the usual callers pass plus or minus 1.
    pub fn apply_quantity_delta(&mut self, id: &ProductId, delta: i64) -> DeltaOutcome {
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return DeltaOutcome::NotFound;
        };

        let new_quantity = i64::from(item.quantity).saturating_add(delta);
        if new_quantity <= 0 {
            return match self.remove(id) {
                Some(removed) => DeltaOutcome::Removed(removed),
                None => DeltaOutcome::NotFound,
            };
        }

        item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        DeltaOutcome::Updated {
            name: item.name.clone(),
            quantity: item.quantity,
        }
    }

    /// Drain all line items, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Compute the derived aggregates under the given delivery policy.
    #[must_use]
    pub fn totals(&self, policy: DeliveryPolicy) -> CartTotals {
        let item_count = self
            .items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity));
        let subtotal = self
            .items
            .iter()
            .fold(Price::ZERO, |sum, item| sum.saturating_add(item.line_total()));

        let delivery_fee = if subtotal >= policy.free_threshold {
            Price::ZERO
        } else {
            policy.flat_fee
        };

        CartTotals {
            item_count,
            subtotal,
            delivery_fee,
            grand_total: subtotal.saturating_add(delivery_fee),
            remaining_for_free_delivery: policy.free_threshold.saturating_sub(subtotal),
        }
    }
}

/// Coerce an externally supplied price string the way `parseInt` would:
/// surrounding whitespace ignored, optional sign, leading decimal digits,
/// everything after the first non-digit discarded. Unparseable input
/// falls back to zero, and negative results clamp to zero because unit
/// prices are non-negative.
fn coerce_price(raw: Option<&str>) -> Price {
    let Some(raw) = raw else {
        return Price::ZERO;
    };

    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| rest.get(..end).unwrap_or(""));

    match digits.parse::<i64>() {
        Ok(_) if negative => Price::ZERO,
        Ok(amount) => Price::new(amount),
        Err(_) => Price::ZERO,
    }
}

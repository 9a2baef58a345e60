//! View projection of cart state into display fragments.
//!
//! Rendering is a pure function of current state: the same state always
//! yields the same fragment, and rendering has no side effects, so it is
//! always safe to re-render after every mutation. DOM attachment is the
//! embedding page's job; this module only produces the fragments.

use askama::Template;
use pet_pantry_core::{CurrencyCode, LineItem, Price};

use crate::checkout::OrderSummary;
use crate::error::CartError;
use crate::model::CartTotals;
use crate::notify::Notification;

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Summary display data for templates.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub subtotal: String,
    pub delivery_fee: String,
    pub free_delivery: bool,
    pub remaining_for_free_delivery: String,
    pub grand_total: String,
}

/// Order confirmation line display data for templates.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a price as a display string.
fn format_price(price: Price) -> String {
    price.display(CurrencyCode::default())
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: format_price(item.price),
            line_price: format_price(item.line_total()),
        }
    }
}

impl From<&CartTotals> for SummaryView {
    fn from(totals: &CartTotals) -> Self {
        Self {
            subtotal: format_price(totals.subtotal),
            delivery_fee: format_price(totals.delivery_fee),
            free_delivery: totals.delivery_fee.is_zero(),
            remaining_for_free_delivery: format_price(totals.remaining_for_free_delivery),
            grand_total: format_price(totals.grand_total),
        }
    }
}

// =============================================================================
// Fragment Templates
// =============================================================================

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountTemplate {
    count: u32,
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate {
    items: Vec<CartItemView>,
}

/// Cart summary fragment template.
#[derive(Template)]
#[template(path = "partials/cart_summary.html")]
struct CartSummaryTemplate {
    summary: SummaryView,
}

/// Notification toast fragment template.
#[derive(Template)]
#[template(path = "partials/notification.html")]
struct NotificationTemplate {
    id: String,
    css_class: &'static str,
    icon: &'static str,
    color: &'static str,
    message: String,
}

/// Order confirmation fragment template.
#[derive(Template)]
#[template(path = "checkout/receipt.html")]
struct ReceiptTemplate {
    lines: Vec<OrderLineView>,
    summary: SummaryView,
}

/// Render the badge fragment for every badge anchor point: hidden at
/// zero items, the item count otherwise.
///
/// # Errors
///
/// Returns `CartError::Template` if rendering fails.
pub fn render_badge(totals: &CartTotals) -> Result<String, CartError> {
    let template = CartCountTemplate {
        count: totals.item_count,
    };
    Ok(template.render()?)
}

/// Render the item-list fragment: one row per line item in collection
/// order, or the empty-state fragment when the cart is empty.
///
/// # Errors
///
/// Returns `CartError::Template` if rendering fails.
pub fn render_items(items: &[LineItem]) -> Result<String, CartError> {
    let template = CartItemsTemplate {
        items: items.iter().map(CartItemView::from).collect(),
    };
    Ok(template.render()?)
}

/// Render the summary fragment: subtotal, delivery fee (or free
/// indicator), the remaining-for-free-delivery hint while a fee applies,
/// grand total and the checkout trigger.
///
/// # Errors
///
/// Returns `CartError::Template` if rendering fails.
pub fn render_summary(totals: &CartTotals) -> Result<String, CartError> {
    let template = CartSummaryTemplate {
        summary: SummaryView::from(totals),
    };
    Ok(template.render()?)
}

/// Render one notification toast.
///
/// # Errors
///
/// Returns `CartError::Template` if rendering fails.
pub fn render_notification(notification: &Notification) -> Result<String, CartError> {
    let template = NotificationTemplate {
        id: notification.id.to_string(),
        css_class: notification.kind.css_class(),
        icon: notification.kind.icon(),
        color: notification.kind.color(),
        message: notification.message.clone(),
    };
    Ok(template.render()?)
}

/// Render the read-only order confirmation.
///
/// # Errors
///
/// Returns `CartError::Template` if rendering fails.
pub fn render_receipt(summary: &OrderSummary) -> Result<String, CartError> {
    let template = ReceiptTemplate {
        lines: summary
            .lines
            .iter()
            .map(|line| OrderLineView {
                name: line.name.clone(),
                quantity: line.quantity,
                line_total: format_price(line.line_total),
            })
            .collect(),
        summary: SummaryView::from(&summary.totals),
    };
    Ok(template.render()?)
}

#[cfg(test)]
mod tests {
    use crate::model::{CartState, DeliveryPolicy, ItemCandidate};
    use crate::notify::{NotificationKind, Notifier};

    use super::*;

    const POLICY: DeliveryPolicy = DeliveryPolicy {
        free_threshold: Price::new(1000),
        flat_fee: Price::new(300),
    };

    fn cart_with(prices: &[(&str, &str)]) -> CartState {
        let mut cart = CartState::new();
        for (id, price) in prices {
            cart.add(&ItemCandidate {
                id: Some((*id).to_owned()),
                name: Some(format!("Item {id}")),
                price: Some((*price).to_owned()),
                image: None,
            });
        }
        cart
    }

    #[test]
    fn test_badge_hidden_at_zero() {
        let totals = CartState::new().totals(POLICY);
        let html = render_badge(&totals).unwrap();
        assert!(html.contains("d-none"));
        assert!(!html.contains('1'));
    }

    #[test]
    fn test_badge_shows_item_count() {
        let mut cart = cart_with(&[("a", "500")]);
        cart.add(&ItemCandidate::with_id("a"));
        cart.add(&ItemCandidate::with_id("b"));

        let html = render_badge(&cart.totals(POLICY)).unwrap();
        assert!(html.contains(">3<"));
        assert!(!html.contains("d-none"));
    }

    #[test]
    fn test_items_empty_state() {
        let html = render_items(&[]).unwrap();
        assert!(html.contains("Your cart is empty"));
        assert!(!html.contains("cart-item-row"));
    }

    #[test]
    fn test_items_rows_in_collection_order() {
        let cart = cart_with(&[("b", "700"), ("a", "500")]);
        let html = render_items(cart.items()).unwrap();

        let first = html.find("data-id=\"b\"").unwrap();
        let second = html.find("data-id=\"a\"").unwrap();
        assert!(first < second);
        assert!(html.contains("Item b"));
        assert!(html.contains("$700"));
        assert!(html.contains("data-action=\"increase\""));
        assert!(html.contains("data-action=\"decrease\""));
        assert!(html.contains("data-action=\"remove\""));
    }

    #[test]
    fn test_summary_below_threshold_shows_fee_and_hint() {
        let cart = cart_with(&[("a", "500")]);
        let html = render_summary(&cart.totals(POLICY)).unwrap();
        assert!(html.contains("$300"));
        assert!(html.contains("$500 more for free delivery"));
        assert!(html.contains("$800"));
        assert!(!html.contains("Free"));
    }

    #[test]
    fn test_summary_at_threshold_shows_free_without_hint() {
        let cart = cart_with(&[("a", "1000")]);
        let html = render_summary(&cart.totals(POLICY)).unwrap();
        assert!(html.contains("Free"));
        assert!(!html.contains("more for free delivery"));
        assert!(html.contains("$1000"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let cart = cart_with(&[("a", "500"), ("b", "250")]);
        let totals = cart.totals(POLICY);

        assert_eq!(
            render_items(cart.items()).unwrap(),
            render_items(cart.items()).unwrap()
        );
        assert_eq!(
            render_summary(&totals).unwrap(),
            render_summary(&totals).unwrap()
        );
        assert_eq!(render_badge(&totals).unwrap(), render_badge(&totals).unwrap());
    }

    #[test]
    fn test_notification_toast_carries_id_and_kind() {
        let notifier = Notifier::default();
        let id = notifier.notify("\"Dog Food\" added to cart", NotificationKind::Success);
        let notification = notifier.active().pop().unwrap();

        let html = render_notification(&notification).unwrap();
        assert!(html.contains(&id.to_string()));
        assert!(html.contains("notification success"));
        assert!(html.contains("check-circle-fill"));
        assert!(html.contains("added to cart"));
        assert!(html.contains("data-action=\"dismiss\""));
    }

    #[test]
    fn test_receipt_itemizes_lines_and_totals() {
        let mut cart = cart_with(&[("a", "500")]);
        cart.add(&ItemCandidate::with_id("a"));
        let totals = cart.totals(POLICY);
        let summary = OrderSummary::from_state(&cart, totals);

        let html = render_receipt(&summary).unwrap();
        assert!(html.contains("Order confirmation"));
        assert!(html.contains("Item a"));
        assert!(html.contains("\u{d7} 2"));
        assert!(html.contains("$1000"));
    }
}

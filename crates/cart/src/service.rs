//! Cart service: the single owned access point over cart state.
//!
//! The service replaces the ambient module-level cart of older storefront
//! scripts with an explicitly owned object: it loads its state from the
//! persistence adapter on construction, applies every mutation through
//! the pure model, persists after each change, and broadcasts the updated
//! collection to subscribers (badge and page renderers) instead of
//! calling into rendering code itself.
//!
//! Failure policy: a failed save is reported once as a warning and the
//! service keeps operating in memory for the rest of the session. No cart
//! operation panics or propagates a fatal error.
//!
//! Known limitation carried over from the storefront: two views backed by
//! the same store (e.g., two open tabs) do not reconcile with each other;
//! last save wins.

use pet_pantry_core::{LineItem, ProductId};

use crate::checkout::OrderSummary;
use crate::config::CartConfig;
use crate::error::CartError;
use crate::model::{AddOutcome, CartState, CartTotals, DeliveryPolicy, DeltaOutcome, ItemCandidate};
use crate::notify::{NotificationKind, Notifier};
use crate::store::CartStore;

/// Yes/no gate for destructive actions that need the user's explicit
/// confirmation. Clearing the cart is the only gated mutation.
pub trait ConfirmationGate {
    /// Ask the user to confirm; `true` proceeds.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Listener invoked with the updated collection after every persisted
/// mutation (the cross-view "cart updated" signal).
type UpdateListener = Box<dyn Fn(&[LineItem])>;

/// The cart state manager.
pub struct CartService {
    state: CartState,
    store: Box<dyn CartStore>,
    notifier: Notifier,
    policy: DeliveryPolicy,
    listeners: Vec<UpdateListener>,
    storage_degraded: bool,
}

impl CartService {
    /// Create a service, loading persisted state through the store.
    ///
    /// Construction never fails: missing or corrupt stored data yields an
    /// empty cart, and stored data is re-validated against the model
    /// invariants before use.
    #[must_use]
    pub fn new(config: &CartConfig, store: Box<dyn CartStore>, notifier: Notifier) -> Self {
        let state = CartState::from_items(store.load());
        Self {
            state,
            store,
            notifier,
            policy: config.delivery_policy(),
            listeners: Vec::new(),
            storage_degraded: false,
        }
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Current derived aggregates.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.state.totals(self.policy)
    }

    /// The shared notification queue.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Register a listener for the cross-view update signal. Every
    /// persisted mutation invokes each listener once with the updated
    /// collection.
    pub fn subscribe(&mut self, listener: impl Fn(&[LineItem]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add a candidate item; a known id increments quantity, a new id
    /// inserts with quantity 1. Candidates without an id are logged and
    /// ignored.
    pub fn add_item(&mut self, candidate: &ItemCandidate) {
        match self.state.add(candidate) {
            AddOutcome::Rejected => {}
            AddOutcome::QuantityIncreased { name, .. } => {
                self.persist();
                self.notifier.notify(
                    format!("Quantity of \"{name}\" increased"),
                    NotificationKind::Success,
                );
                self.broadcast();
            }
            AddOutcome::Inserted { name } => {
                self.persist();
                self.notifier
                    .notify(format!("\"{name}\" added to cart"), NotificationKind::Success);
                self.broadcast();
            }
        }
    }

    /// Remove the item with the given id. A lookup miss changes nothing
    /// and surfaces as an info notification.
    pub fn remove_item(&mut self, id: &ProductId) {
        match self.state.remove(id) {
            Some(item) => {
                self.persist();
                self.notifier.notify(
                    format!("\"{}\" removed from cart", item.name),
                    NotificationKind::Error,
                );
                self.broadcast();
            }
            None => {
                tracing::debug!(%id, "Remove requested for an item not in the cart");
                self.notifier
                    .notify("Item is not in the cart", NotificationKind::Info);
            }
        }
    }

    /// Apply a signed quantity change; driving the quantity to zero or
    /// below removes the item (with the removal notification). Plain
    /// quantity changes persist silently.
    pub fn set_quantity_delta(&mut self, id: &ProductId, delta: i64) {
        match self.state.apply_quantity_delta(id, delta) {
            DeltaOutcome::NotFound => {}
            DeltaOutcome::Removed(item) => {
                self.persist();
                self.notifier.notify(
                    format!("\"{}\" removed from cart", item.name),
                    NotificationKind::Error,
                );
                self.broadcast();
            }
            DeltaOutcome::Updated { .. } => {
                self.persist();
                self.broadcast();
            }
        }
    }

    /// Empty the cart behind the confirmation gate. An already-empty cart
    /// skips the prompt entirely.
    pub fn clear(&mut self, gate: &dyn ConfirmationGate) {
        if self.state.is_empty() {
            return;
        }
        if !gate.confirm("Clear the cart?") {
            return;
        }

        self.state.clear();
        self.persist();
        self.notifier.notify("Cart cleared", NotificationKind::Info);
        self.broadcast();
    }

    /// Simulated checkout: capture an order summary of the current cart,
    /// then clear it unconditionally (no confirmation gate, unlike
    /// [`Self::clear`]).
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` (and queues an error notification)
    /// when there is nothing to check out; state is unchanged.
    pub fn checkout(&mut self) -> Result<OrderSummary, CartError> {
        let totals = self.totals();
        if totals.item_count == 0 {
            self.notifier
                .notify("Your cart is empty", NotificationKind::Error);
            return Err(CartError::EmptyCart);
        }

        let summary = OrderSummary::from_state(&self.state, totals);
        self.state.clear();
        self.persist();
        self.notifier
            .notify("Order placed, thank you!", NotificationKind::Success);
        self.broadcast();
        Ok(summary)
    }

    /// Save the collection; a failure downgrades to an in-memory session
    /// with a one-time warning.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.state.items()) {
            tracing::warn!(error = %e, "Failed to persist cart, continuing in memory");
            if !self.storage_degraded {
                self.storage_degraded = true;
                self.notifier.notify(
                    "Your cart could not be saved and will only last this session",
                    NotificationKind::Error,
                );
            }
        }
    }

    fn broadcast(&self) {
        for listener in &self.listeners {
            listener(self.state.items());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::store::MemoryStore;

    struct Approve;
    impl ConfirmationGate for Approve {
        fn confirm(&self, _prompt: &str) -> bool {
            true
        }
    }

    struct Decline;
    impl ConfirmationGate for Decline {
        fn confirm(&self, _prompt: &str) -> bool {
            false
        }
    }

    fn dog_food() -> ItemCandidate {
        ItemCandidate {
            id: Some("a".to_owned()),
            name: Some("Dog Food".to_owned()),
            price: Some("500".to_owned()),
            image: None,
        }
    }

    fn service_with(store: &MemoryStore) -> CartService {
        CartService::new(
            &CartConfig::default(),
            Box::new(store.clone()),
            Notifier::default(),
        )
    }

    #[test]
    fn test_add_persists_and_notifies() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);

        service.add_item(&dog_food());
        assert_eq!(store.load().len(), 1);

        let active = service.notifier().active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "\"Dog Food\" added to cart");
        assert_eq!(active[0].kind, NotificationKind::Success);

        service.add_item(&dog_food());
        assert_eq!(store.load()[0].quantity, 2);
        assert_eq!(
            service.notifier().active()[1].message,
            "Quantity of \"Dog Food\" increased"
        );
    }

    #[test]
    fn test_add_without_id_changes_nothing() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);

        service.add_item(&ItemCandidate::default());
        assert!(service.items().is_empty());
        assert!(store.raw().is_none());
        assert!(service.notifier().is_empty());
    }

    #[test]
    fn test_remove_notifies_with_item_name() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.add_item(&dog_food());

        service.remove_item(&ProductId::from("a"));
        assert!(service.items().is_empty());
        assert!(store.load().is_empty());

        let last = service.notifier().active().pop().unwrap();
        assert_eq!(last.message, "\"Dog Food\" removed from cart");
        assert_eq!(last.kind, NotificationKind::Error);
    }

    #[test]
    fn test_remove_unknown_id_reports_info() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.add_item(&dog_food());

        service.remove_item(&ProductId::from("nope"));
        assert_eq!(service.items().len(), 1);

        let last = service.notifier().active().pop().unwrap();
        assert_eq!(last.message, "Item is not in the cart");
        assert_eq!(last.kind, NotificationKind::Info);
    }

    #[test]
    fn test_delta_to_zero_removes_and_persists() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.add_item(&dog_food());

        service.set_quantity_delta(&ProductId::from("a"), -1);
        assert!(service.items().is_empty());
        assert!(store.load().is_empty());
        assert_eq!(service.totals().item_count, 0);
    }

    #[test]
    fn test_plain_delta_persists_without_notification() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.add_item(&dog_food());
        let notifications_before = service.notifier().active().len();

        service.set_quantity_delta(&ProductId::from("a"), 1);
        assert_eq!(store.load()[0].quantity, 2);
        assert_eq!(service.notifier().active().len(), notifications_before);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.add_item(&dog_food());
        let notifications_before = service.notifier().active().len();

        service.clear(&Decline);
        assert_eq!(service.items().len(), 1);
        assert_eq!(store.load().len(), 1);
        assert_eq!(service.notifier().active().len(), notifications_before);

        service.clear(&Approve);
        assert!(service.items().is_empty());
        assert!(store.load().is_empty());
        let last = service.notifier().active().pop().unwrap();
        assert_eq!(last.message, "Cart cleared");
        assert_eq!(last.kind, NotificationKind::Info);
    }

    #[test]
    fn test_clear_on_empty_cart_skips_the_gate() {
        struct Panicking;
        impl ConfirmationGate for Panicking {
            fn confirm(&self, _prompt: &str) -> bool {
                panic!("gate must not be consulted for an empty cart");
            }
        }

        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.clear(&Panicking);
    }

    #[test]
    fn test_checkout_clears_and_reflects_pre_checkout_totals() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        service.add_item(&dog_food());
        service.add_item(&dog_food());

        let summary = service.checkout().unwrap();
        assert_eq!(summary.totals.item_count, 2);
        assert_eq!(summary.totals.subtotal.amount(), 1000);
        assert_eq!(summary.totals.delivery_fee.amount(), 0);
        assert_eq!(summary.lines.len(), 1);

        assert!(service.items().is_empty());
        assert_eq!(service.totals().item_count, 0);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_checkout_on_empty_cart_fails() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);

        let err = service.checkout().unwrap_err();
        assert!(matches!(err, CartError::EmptyCart));

        let last = service.notifier().active().pop().unwrap();
        assert_eq!(last.message, "Your cart is empty");
        assert_eq!(last.kind, NotificationKind::Error);
    }

    #[test]
    fn test_subscribers_receive_every_persisted_mutation() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);

        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        service.subscribe(move |items| sink.borrow_mut().push(items.len()));

        service.add_item(&dog_food());
        service.add_item(&ItemCandidate::with_id("b"));
        service.remove_item(&ProductId::from("b"));
        service.remove_item(&ProductId::from("missing")); // no mutation, no signal

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_save_failure_degrades_to_in_memory_session() {
        let store = MemoryStore::new();
        let mut service = service_with(&store);
        store.set_fail_saves(true);

        service.add_item(&dog_food());
        service.add_item(&dog_food());

        // In-memory state kept working even though nothing was persisted.
        assert_eq!(service.items()[0].quantity, 2);
        assert!(store.raw().is_none());

        // Exactly one storage warning, regardless of how many saves failed.
        let warnings: Vec<_> = service
            .notifier()
            .active()
            .into_iter()
            .filter(|n| n.message.contains("could not be saved"))
            .collect();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_state_reloads_from_store() {
        let store = MemoryStore::new();
        {
            let mut service = service_with(&store);
            service.add_item(&dog_food());
            service.add_item(&dog_food());
        }

        let reloaded = service_with(&store);
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].quantity, 2);
        assert_eq!(reloaded.totals().subtotal.amount(), 1000);
    }
}

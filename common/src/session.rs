//! The single owner of cart and checkout state for one app session.
//!
//! Views get at it through shared context and never keep their own copy of
//! the cart. Every cart mutation re-syncs the host main button.

use crate::cart::{Cart, CartLineItem, LineItemId};
use crate::checkout::{CheckoutForm, DeliveryType};
use crate::config::PopupMessages;
use crate::error::CheckoutError;
use crate::host::{HostPlatform, MainButtonState};
use crate::id::RemoteId;
use crate::order::{OrderOutcome, OrderRequest};

pub struct ShopSession<H> {
    host: H,
    messages: PopupMessages,
    cart: Cart,
    cart_open: bool,
    checkout: Option<CheckoutForm>,
}

impl<H: HostPlatform> ShopSession<H> {
    pub fn new(host: H, messages: PopupMessages) -> Self {
        Self {
            host,
            messages,
            cart: Cart::new(),
            cart_open: false,
            checkout: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn checkout(&self) -> Option<&CheckoutForm> {
        self.checkout.as_ref()
    }

    /// Mutable access to the open checkout form, for field edits.
    pub fn checkout_mut(&mut self) -> Option<&mut CheckoutForm> {
        self.checkout.as_mut()
    }

    pub fn add_to_cart(&mut self, item: CartLineItem) -> LineItemId {
        let id = self.cart.append(item);
        tracing::debug!("Added line item {:?}; cart has {} items", id, self.cart.len());
        self.sync_main_button();
        id
    }

    pub fn remove_at(&mut self, index: usize) -> Option<CartLineItem> {
        let removed = self.cart.remove_at(index);
        if removed.is_none() {
            tracing::debug!("Ignoring removal at {index}: cart has {} items", self.cart.len());
        }
        self.sync_main_button();
        removed
    }

    pub fn update_quantity(&mut self, index: usize, new_quantity: u32) -> bool {
        let changed = self.cart.update_quantity(index, new_quantity);
        self.sync_main_button();
        changed
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// "Оформить заказ": close the cart sheet and open a fresh checkout form.
    pub fn proceed_to_checkout(&mut self) {
        self.cart_open = false;
        self.checkout = Some(CheckoutForm::new());
    }

    /// Dismiss the checkout form. The cart is left alone.
    pub fn close_checkout(&mut self) {
        self.checkout = None;
    }

    /// Run the form's submit step and snapshot the cart into a request.
    /// The cart is not cleared here.
    pub fn begin_order(&mut self, user_id: Option<RemoteId>) -> Result<OrderRequest, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let form = self.checkout.as_mut().ok_or(CheckoutError::NotOpen)?;
        let answers = form.submit()?;
        let request = OrderRequest::new(&self.cart, answers, user_id);
        tracing::info!(
            "Submitting order: {} items, total {}, {:?}",
            request.products.len(),
            request.total_price,
            request.delivery_type
        );
        Ok(request)
    }

    /// Apply the result of a submission to whatever state exists now.
    ///
    /// The form may have been dismissed while the request was in flight; an
    /// accepted order still clears the cart and notifies the customer.
    pub fn apply_outcome(&mut self, outcome: &OrderOutcome) {
        match outcome {
            OrderOutcome::Accepted { delivery_type } => {
                self.finish_accepted(*delivery_type);
            }
            OrderOutcome::Rejected { .. } | OrderOutcome::TransportFailed { .. } => {
                if let Some(form) = self.checkout.as_mut() {
                    if let Err(e) = form.reject() {
                        tracing::debug!("Checkout form not awaiting a result: {e}");
                    }
                }
            }
        }
        self.host.show_popup(&self.messages.popup_for(outcome));
    }

    fn finish_accepted(&mut self, delivery_type: DeliveryType) {
        if let Some(form) = self.checkout.as_mut() {
            if let Err(e) = form.accept() {
                tracing::debug!("Checkout form not awaiting a result: {e}");
            }
        }
        self.checkout = None;
        self.cart.clear();
        self.host.hide_main_button();
        tracing::info!("Order accepted ({delivery_type:?}); cart cleared");
    }

    fn sync_main_button(&self) {
        self.host
            .apply_main_button(&MainButtonState::for_cart_len(self.cart.len()));
    }
}

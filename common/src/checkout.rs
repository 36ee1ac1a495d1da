use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, MissingField};

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Pickup,
    Delivery,
}

impl DeliveryType {
    pub fn label(self) -> &'static str {
        match self {
            DeliveryType::Pickup => "Самовывоз",
            DeliveryType::Delivery => "Доставка",
        }
    }
}

/// How the customer pays. Collected but never required for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayType {
    Cash,
    Transfer,
}

impl PayType {
    pub fn label(self) -> &'static str {
        match self {
            PayType::Cash => "Наличные",
            PayType::Transfer => "Перевод",
        }
    }
}

/// Checkout form lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// Fields are being filled in.
    Collecting,
    /// Submit pressed, required fields being checked.
    Validating,
    /// Order handed to the submitter, waiting for the service.
    Submitting,
    /// Service accepted the order.
    Accepted,
    /// Service or network refused the order. Editable again, like `Collecting`.
    Rejected,
}

impl CheckoutPhase {
    /// Returns true if moving from self to `next` is a valid step.
    pub fn can_transition_to(self, next: CheckoutPhase) -> bool {
        matches!(
            (self, next),
            (CheckoutPhase::Collecting, CheckoutPhase::Validating)
                | (CheckoutPhase::Rejected, CheckoutPhase::Validating)
                | (CheckoutPhase::Rejected, CheckoutPhase::Collecting)
                | (CheckoutPhase::Validating, CheckoutPhase::Collecting)
                | (CheckoutPhase::Validating, CheckoutPhase::Submitting)
                | (CheckoutPhase::Submitting, CheckoutPhase::Accepted)
                | (CheckoutPhase::Submitting, CheckoutPhase::Rejected)
        )
    }

    pub fn is_editable(self) -> bool {
        matches!(self, CheckoutPhase::Collecting | CheckoutPhase::Rejected)
    }
}

/// Validated answers handed to the order submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutAnswers {
    pub delivery_type: DeliveryType,
    pub pay_type: Option<PayType>,
    pub phone: String,
    /// Present only for delivery orders.
    pub address: Option<String>,
}

/// Delivery fee rule shown under the address field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPolicy {
    pub free_from: u64,
    pub fee: u64,
    pub area: String,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            free_from: 1000,
            fee: 200,
            area: "г. Аксай".to_string(),
        }
    }
}

impl DeliveryPolicy {
    /// Fee the courier charges for an order of this total.
    pub fn fee_for(&self, total: u64) -> u64 {
        if total >= self.free_from {
            0
        } else {
            self.fee
        }
    }

    pub fn notice(&self) -> String {
        format!(
            "Доставка по {} бесплатна при заказе от {}р. При заказе до {}р - доставка {}р",
            self.area, self.free_from, self.free_from, self.fee
        )
    }
}

/// The checkout form and its submission state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    delivery_type: Option<DeliveryType>,
    pay_type: Option<PayType>,
    phone: String,
    address: String,
    phase: CheckoutPhase,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self {
            delivery_type: None,
            pay_type: None,
            phone: String::new(),
            address: String::new(),
            phase: CheckoutPhase::Collecting,
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn delivery_type(&self) -> Option<DeliveryType> {
        self.delivery_type
    }

    pub fn pay_type(&self) -> Option<PayType> {
        self.pay_type
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the address field is on screen.
    pub fn needs_address(&self) -> bool {
        self.delivery_type == Some(DeliveryType::Delivery)
    }

    pub fn set_delivery_type(&mut self, value: DeliveryType) -> bool {
        self.edit(|f| f.delivery_type = Some(value))
    }

    pub fn set_pay_type(&mut self, value: PayType) -> bool {
        self.edit(|f| f.pay_type = Some(value))
    }

    pub fn set_phone(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|f| f.phone = value)
    }

    pub fn set_address(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|f| f.address = value)
    }

    /// Field edits apply only while the form is editable. Editing a rejected
    /// form puts it back into `Collecting`.
    fn edit(&mut self, apply: impl FnOnce(&mut Self)) -> bool {
        if !self.phase.is_editable() {
            return false;
        }
        apply(self);
        self.phase = CheckoutPhase::Collecting;
        true
    }

    /// First required field that is still empty, if any.
    pub fn missing_field(&self) -> Option<MissingField> {
        match self.delivery_type {
            None => Some(MissingField::DeliveryType),
            Some(_) if self.phone.is_empty() => Some(MissingField::Phone),
            Some(DeliveryType::Delivery) if self.address.is_empty() => Some(MissingField::Address),
            Some(_) => None,
        }
    }

    /// Submit control state: enabled iff the form is editable and complete.
    pub fn can_submit(&self) -> bool {
        self.phase.is_editable() && self.missing_field().is_none()
    }

    /// Explicit submit: validate and, on success, enter `Submitting` and hand
    /// back the answers for the order submitter.
    pub fn submit(&mut self) -> Result<CheckoutAnswers, CheckoutError> {
        self.transition(CheckoutPhase::Validating)?;
        if let Some(field) = self.missing_field() {
            self.phase = CheckoutPhase::Collecting;
            return Err(CheckoutError::Incomplete(field));
        }
        self.transition(CheckoutPhase::Submitting)?;
        Ok(self.answers_unchecked())
    }

    /// The service accepted the order.
    pub fn accept(&mut self) -> Result<(), CheckoutError> {
        self.transition(CheckoutPhase::Accepted)
    }

    /// The order failed; the form stays open for another attempt.
    pub fn reject(&mut self) -> Result<(), CheckoutError> {
        self.transition(CheckoutPhase::Rejected)
    }

    fn transition(&mut self, next: CheckoutPhase) -> Result<(), CheckoutError> {
        if !self.phase.can_transition_to(next) {
            return Err(CheckoutError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    fn answers_unchecked(&self) -> CheckoutAnswers {
        let delivery_type = self.delivery_type.unwrap_or(DeliveryType::Pickup);
        CheckoutAnswers {
            delivery_type,
            pay_type: self.pay_type,
            phone: self.phone.clone(),
            address: (delivery_type == DeliveryType::Delivery).then(|| self.address.clone()),
        }
    }
}

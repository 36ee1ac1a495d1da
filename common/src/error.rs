use thiserror::Error;

use crate::checkout::CheckoutPhase;

/// Required checkout field that is still empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    DeliveryType,
    Phone,
    Address,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("checkout form is not open")]
    NotOpen,
    #[error("cart is empty")]
    EmptyCart,
    #[error("required field missing: {0:?}")]
    Incomplete(MissingField),
    #[error("checkout cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: CheckoutPhase,
        to: CheckoutPhase,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("invalid config: {0}")]
    Parse(String),
}

/// Failure to load the product catalog. Logged, never shown to the customer.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(String),
    #[error("catalog service returned HTTP {0}")]
    Status(u16),
    #[error("catalog body is not a valid product list: {0}")]
    Decode(String),
}

/// Failure to submit an order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The service answered with a non-2xx status.
    #[error("order service returned HTTP {status}")]
    Rejected { status: u16, body: String },
    /// The request never completed.
    #[error("{0}")]
    Transport(String),
    /// 2xx answer whose body is not JSON.
    #[error("{0}")]
    Decode(String),
    #[error("could not encode order: {0}")]
    Encode(String),
}

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLineItem};
use crate::checkout::{CheckoutAnswers, DeliveryType, PayType};
use crate::error::OrderError;
use crate::id::RemoteId;

/// Body of `POST /api/web-data`.
///
/// Every field is listed explicitly; nothing from the form is spread in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub products: Vec<CartLineItem>,
    pub total_price: u64,
    pub delivery_type: DeliveryType,
    pub pay_type: Option<PayType>,
    pub phone: String,
    pub address: Option<String>,
    /// Host user id; omitted when the app runs outside the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RemoteId>,
}

impl OrderRequest {
    /// Snapshot the cart and the checkout answers into one request.
    pub fn new(cart: &Cart, answers: CheckoutAnswers, user_id: Option<RemoteId>) -> Self {
        Self {
            products: cart.items().to_vec(),
            total_price: cart.total(),
            delivery_type: answers.delivery_type,
            pay_type: answers.pay_type,
            phone: answers.phone,
            address: answers.address,
            user_id,
        }
    }

    pub fn to_json(&self) -> Result<String, OrderError> {
        serde_json::to_string(self).map_err(|e| OrderError::Encode(e.to_string()))
    }
}

/// What happened to a submission, as far as the UI is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    Accepted { delivery_type: DeliveryType },
    Rejected { status: u16 },
    TransportFailed { description: String },
}

impl OrderOutcome {
    /// Map the submitter's result for an order of the given delivery type.
    pub fn from_result<T>(delivery_type: DeliveryType, result: &Result<T, OrderError>) -> Self {
        match result {
            Ok(_) => OrderOutcome::Accepted { delivery_type },
            Err(OrderError::Rejected { status, .. }) => OrderOutcome::Rejected { status: *status },
            Err(e) => OrderOutcome::TransportFailed {
                description: e.to_string(),
            },
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, OrderOutcome::Accepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::line_item;

    fn answers(delivery_type: DeliveryType, address: Option<&str>) -> CheckoutAnswers {
        CheckoutAnswers {
            delivery_type,
            pay_type: Some(PayType::Cash),
            phone: "+79990000000".to_string(),
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn test_request_totals_include_quantity() {
        let mut cart = Cart::new();
        cart.append(line_item(1, 250, 2));
        cart.append(line_item(2, 100, 1));
        let request = OrderRequest::new(&cart, answers(DeliveryType::Pickup, None), None);
        assert_eq!(request.total_price, 600);
        assert_eq!(request.products.len(), 2);
    }

    #[test]
    fn test_request_wire_shape() {
        let mut cart = Cart::new();
        cart.append(line_item(1, 250, 1));
        let request = OrderRequest::new(
            &cart,
            answers(DeliveryType::Delivery, Some("ул. Ленина, 1")),
            Some(RemoteId::Number(123456789)),
        );
        let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(json["totalPrice"], 250);
        assert_eq!(json["deliveryType"], "delivery");
        assert_eq!(json["payType"], "cash");
        assert_eq!(json["phone"], "+79990000000");
        assert_eq!(json["address"], "ул. Ленина, 1");
        assert_eq!(json["userId"], 123456789);
        assert_eq!(json["products"][0]["finalPrice"], 250);
    }

    #[test]
    fn test_pickup_sends_null_address_and_omits_missing_user() {
        let request = OrderRequest::new(&Cart::new(), answers(DeliveryType::Pickup, None), None);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["address"].is_null());
        assert!(json.get("userId").is_none());
    }

    #[test]
    fn test_outcome_mapping() {
        let ok: Result<(), OrderError> = Ok(());
        assert_eq!(
            OrderOutcome::from_result(DeliveryType::Pickup, &ok),
            OrderOutcome::Accepted {
                delivery_type: DeliveryType::Pickup
            }
        );

        let rejected: Result<(), OrderError> = Err(OrderError::Rejected {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(
            OrderOutcome::from_result(DeliveryType::Pickup, &rejected),
            OrderOutcome::Rejected { status: 500 }
        );

        let failed: Result<(), OrderError> = Err(OrderError::Transport("Failed to fetch".into()));
        assert_eq!(
            OrderOutcome::from_result(DeliveryType::Pickup, &failed),
            OrderOutcome::TransportFailed {
                description: "Failed to fetch".into()
            }
        );
    }
}

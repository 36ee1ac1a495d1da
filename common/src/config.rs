use serde::{Deserialize, Serialize};
use url::Url;

use crate::checkout::{DeliveryPolicy, DeliveryType};
use crate::error::ConfigError;
use crate::host::Popup;
use crate::order::OrderOutcome;

const DEFAULT_PRODUCT_SERVICE_URL: &str = "https://node.shavukha-aksay.ru/api";
const DEFAULT_ORDER_SERVICE_URL: &str = "https://node.shavukha-aksay.ru";

const CATALOG_PATH: &str = "api/products";
const ORDER_PATH: &str = "api/web-data";

/// Which confirmation text a delivery order gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryWording {
    /// "Ожидайте принятия заказа, с вами свяжутся"
    #[default]
    AwaitConfirmation,
    /// "Доставщик будет в течении часа"
    CourierWithinHour,
}

/// Popup texts for every order outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupMessages {
    pub accepted_title: String,
    pub pickup_message: String,
    pub delivery_wording: DeliveryWording,
    pub error_title: String,
}

impl Default for PopupMessages {
    fn default() -> Self {
        Self {
            accepted_title: "Заказ принят".to_string(),
            pickup_message: "Можете забирать заказ через 15 минут".to_string(),
            delivery_wording: DeliveryWording::default(),
            error_title: "Ошибка".to_string(),
        }
    }
}

impl PopupMessages {
    pub fn accepted_message(&self, delivery_type: DeliveryType) -> String {
        match (delivery_type, self.delivery_wording) {
            (DeliveryType::Pickup, _) => self.pickup_message.clone(),
            (DeliveryType::Delivery, DeliveryWording::AwaitConfirmation) => {
                "Ожидайте принятия заказа, с вами свяжутся".to_string()
            }
            (DeliveryType::Delivery, DeliveryWording::CourierWithinHour) => {
                "Доставщик будет в течении часа".to_string()
            }
        }
    }

    /// Popup shown for an order outcome.
    pub fn popup_for(&self, outcome: &OrderOutcome) -> Popup {
        match outcome {
            OrderOutcome::Accepted { delivery_type } => {
                Popup::ok(&self.accepted_title, self.accepted_message(*delivery_type))
            }
            OrderOutcome::Rejected { status } => {
                Popup::ok(&self.error_title, format!("Ошибка сервера: {status}"))
            }
            OrderOutcome::TransportFailed { description } => {
                Popup::ok(&self.error_title, format!("Произошла ошибка: {description}"))
            }
        }
    }
}

/// Endpoints and texts of the ordering app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Base URL of the product service; the catalog lives at `/api/products`.
    pub product_service_url: String,
    /// Base URL of the order service; orders go to `/api/web-data`.
    pub order_service_url: String,
    pub messages: PopupMessages,
    pub delivery: DeliveryPolicy,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            product_service_url: DEFAULT_PRODUCT_SERVICE_URL.to_string(),
            order_service_url: DEFAULT_ORDER_SERVICE_URL.to_string(),
            messages: PopupMessages::default(),
            delivery: DeliveryPolicy::default(),
        }
    }
}

impl ShopConfig {
    /// Defaults, overridden by `SHAVUKHA_PRODUCT_URL` / `SHAVUKHA_ORDER_URL`
    /// when they were set at compile time.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("SHAVUKHA_PRODUCT_URL").filter(|s| !s.is_empty()) {
            config.product_service_url = url.to_string();
        }
        if let Some(url) = option_env!("SHAVUKHA_ORDER_URL").filter(|s| !s.is_empty()) {
            config.order_service_url = url.to_string();
        }
        config
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(body: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(body).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog_url()?;
        self.order_url()?;
        Ok(())
    }

    pub fn catalog_url(&self) -> Result<Url, ConfigError> {
        endpoint("product_service_url", &self.product_service_url, CATALOG_PATH)
    }

    pub fn order_url(&self) -> Result<Url, ConfigError> {
        endpoint("order_service_url", &self.order_service_url, ORDER_PATH)
    }
}

/// Parse an http(s) base URL and resolve `path` below it. A path on the base
/// is kept: `https://host/api` + `api/products` is `https://host/api/api/products`.
fn endpoint(name: &'static str, base: &str, path: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        name,
        value: base.to_string(),
    };
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    if !url.path().ends_with('/') {
        let dir = format!("{}/", url.path());
        url.set_path(&dir);
    }
    url.join(path).map_err(|_| invalid())
}

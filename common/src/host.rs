//! Calls into the embedding chat application.
//!
//! The host owns a main action button under the web view and a native popup.
//! Every call is fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::id::RemoteId;

/// Label of the main button while the cart has items.
pub const MAIN_BUTTON_LABEL: &str = "В корзину";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupButtonKind {
    Default,
    Ok,
    Close,
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupButton {
    #[serde(rename = "type")]
    pub kind: PopupButtonKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl PopupButton {
    pub fn ok() -> Self {
        Self {
            kind: PopupButtonKind::Ok,
            id: None,
            text: None,
        }
    }
}

/// Parameters of a native popup, serialized as the host expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub title: String,
    pub message: String,
    pub buttons: Vec<PopupButton>,
}

impl Popup {
    /// Popup with a single OK button.
    pub fn ok(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec![PopupButton::ok()],
        }
    }
}

/// What the main button should look like for the current cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainButtonState {
    Hidden,
    Visible { text: String },
}

impl MainButtonState {
    pub fn for_cart_len(len: usize) -> Self {
        if len == 0 {
            MainButtonState::Hidden
        } else {
            MainButtonState::Visible {
                text: MAIN_BUTTON_LABEL.to_string(),
            }
        }
    }
}

/// The host surface the app talks to.
pub trait HostPlatform {
    fn show_main_button(&self);
    fn hide_main_button(&self);
    fn set_main_button_text(&self, text: &str);
    /// Register the handler run when the main button is pressed.
    fn on_main_button_click(&self, handler: Box<dyn Fn()>);
    fn show_popup(&self, popup: &Popup);

    /// Push a main button state to the host.
    fn apply_main_button(&self, state: &MainButtonState) {
        match state {
            MainButtonState::Hidden => self.hide_main_button(),
            MainButtonState::Visible { text } => {
                self.show_main_button();
                self.set_main_button_text(text);
            }
        }
    }
}

/// Host used when the app runs outside the chat application. Logs every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHost;

impl HostPlatform for LoggingHost {
    fn show_main_button(&self) {
        tracing::debug!("Main button shown (offline mode)");
    }

    fn hide_main_button(&self) {
        tracing::debug!("Main button hidden (offline mode)");
    }

    fn set_main_button_text(&self, text: &str) {
        tracing::debug!("Main button text set to {text:?} (offline mode)");
    }

    fn on_main_button_click(&self, _handler: Box<dyn Fn()>) {
        tracing::debug!("Main button handler registered (offline mode)");
    }

    fn show_popup(&self, popup: &Popup) {
        tracing::info!("Popup (offline mode): {} - {}", popup.title, popup.message);
    }
}

/// The user the host launched the app for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    #[serde(default)]
    pub id: Option<RemoteId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl HostUser {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Гость")
    }

    pub fn avatar_url(&self) -> &str {
        self.photo_url.as_deref().unwrap_or("/default-avatar.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_serializes_for_host() {
        let popup = Popup::ok("Заказ принят", "Можете забирать заказ через 15 минут");
        let json = serde_json::to_value(&popup).unwrap();
        assert_eq!(json["buttons"][0], serde_json::json!({"type": "ok"}));
        assert_eq!(json["title"], "Заказ принят");
    }

    #[test]
    fn test_main_button_state_follows_cart() {
        assert_eq!(MainButtonState::for_cart_len(0), MainButtonState::Hidden);
        assert_eq!(
            MainButtonState::for_cart_len(2),
            MainButtonState::Visible {
                text: "В корзину".into()
            }
        );
    }

    #[test]
    fn test_guest_user_fallbacks() {
        let user = HostUser::default();
        assert_eq!(user.display_name(), "Гость");
        assert_eq!(user.avatar_url(), "/default-avatar.png");

        let user: HostUser =
            serde_json::from_str(r#"{"id": 42, "username": "shawa_fan", "first_name": "Ivan"}"#)
                .unwrap();
        assert_eq!(user.id, Some(RemoteId::Number(42)));
        assert_eq!(user.display_name(), "shawa_fan");
    }
}

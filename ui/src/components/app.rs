use dioxus::prelude::*;

use shavukha_client::{apply_catalog_result, ShopApi};
use shavukha_common::host::HostPlatform;
use shavukha_common::session::ShopSession;

use super::cart_sheet::CartSheet;
use super::order_modal::OrderModal;
use super::product_list::ProductList;
use super::shared_state::{use_session, use_shared_state, Services, SharedState};
use super::telegram::TelegramHost;

#[component]
pub fn App() -> Element {
    let host = TelegramHost;
    let services = use_context_provider(Services::from_build_env);
    let messages = services.config.messages.clone();
    let session = use_context_provider(|| Signal::new(ShopSession::new(host, messages)));
    let mut shared = use_context_provider(|| Signal::new(SharedState::new(host.user())));

    // Host wiring runs once per app mount.
    use_hook(move || {
        host.ready();
        host.on_main_button_click(Box::new(move || {
            let mut session = session;
            session.write().open_cart();
        }));
    });

    // Catalog fetch at mount; failures are only logged.
    use_effect(move || {
        let Some(api) = services.api.clone() else {
            return;
        };
        spawn(async move {
            let result = api.fetch_catalog().await;
            if apply_catalog_result(&mut shared.write().catalog, result).is_err() {
                tracing::debug!("Keeping the previous catalog");
            }
        });
    });

    rsx! {
        div { class: "product-list-container",
            AppHeader {}
            ProductList {}
            CartSheet {}
            OrderModal {}
        }
    }
}

/// User badge and cart counter.
#[component]
fn AppHeader() -> Element {
    let mut session = use_session();
    let shared = use_shared_state();

    let (name, avatar) = {
        let state = shared.read();
        (
            state.user.display_name().to_string(),
            state.user.avatar_url().to_string(),
        )
    };
    let item_count = session.read().cart().len();

    rsx! {
        header { class: "product-list-header",
            div { class: "user-info",
                img { class: "user-avatar", src: "{avatar}", alt: "User" }
                span { class: "username", "{name}" }
            }
            div { class: "cart-info",
                onclick: move |_| session.write().open_cart(),
                if item_count > 0 {
                    span { class: "cart-count", "{item_count}" }
                }
                span { class: "cart-icon", "🛒" }
            }
        }
    }
}

use dioxus::prelude::*;

use shavukha_client::HttpShopApi;
use shavukha_common::config::ShopConfig;
use shavukha_common::host::HostUser;
use shavukha_common::product::{Catalog, CategoryFilter};
use shavukha_common::session::ShopSession;

use super::telegram::TelegramHost;

/// The one cart/checkout owner, shared by every view.
pub type Session = ShopSession<TelegramHost>;

/// Network-sourced and view state shared across all components.
#[derive(Clone, Debug, Default)]
pub struct SharedState {
    /// Products fetched at startup. Empty sections until the fetch succeeds.
    pub catalog: Catalog,
    /// Active category tab.
    pub filter: CategoryFilter,
    /// The user the host launched us for.
    pub user: HostUser,
}

impl SharedState {
    pub fn new(user: HostUser) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }
}

/// Everything needed to reach the shop services.
#[derive(Clone)]
pub struct Services {
    pub config: ShopConfig,
    /// `None` only if neither the build-time nor the default URLs parse;
    /// the menu then stays empty and ordering is disabled.
    pub api: Option<HttpShopApi>,
}

impl Services {
    /// Build-time config, falling back to the defaults if it does not validate.
    pub fn from_build_env() -> Self {
        let config = ShopConfig::from_build_env();
        match HttpShopApi::new(&config) {
            Ok(api) => Self {
                config,
                api: Some(api),
            },
            Err(e) => {
                tracing::error!("Invalid shop config, using defaults: {e}");
                let api = HttpShopApi::production()
                    .inspect_err(|e| tracing::error!("Default shop config is invalid: {e}"))
                    .ok();
                Self {
                    config: ShopConfig::default(),
                    api,
                }
            }
        }
    }
}

pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

pub fn use_shared_state() -> Signal<SharedState> {
    use_context::<Signal<SharedState>>()
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

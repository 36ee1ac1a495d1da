//! Bridge to `window.Telegram.WebApp`.
//!
//! Outside the Telegram client (or in non-WASM builds) every call falls back
//! to the logging host.

use shavukha_common::host::{HostPlatform, HostUser, LoggingHost, Popup};

#[derive(Clone, Copy, Debug, Default)]
pub struct TelegramHost;

impl TelegramHost {
    /// Tell the client the app is ready to be shown.
    pub fn ready(&self) {
        #[cfg(target_family = "wasm")]
        if let Some(app) = web::web_app() {
            web::call(&app, "ready", &[]);
            web::call(&app, "expand", &[]);
            return;
        }
        tracing::debug!("Not running inside Telegram; using offline host");
    }

    /// The user the app was opened by, or a guest.
    pub fn user(&self) -> HostUser {
        #[cfg(target_family = "wasm")]
        if let Some(user) = web::init_user() {
            return user;
        }
        HostUser::default()
    }
}

impl HostPlatform for TelegramHost {
    fn show_main_button(&self) {
        #[cfg(target_family = "wasm")]
        if let Some(button) = web::main_button() {
            web::call(&button, "show", &[]);
            return;
        }
        LoggingHost.show_main_button();
    }

    fn hide_main_button(&self) {
        #[cfg(target_family = "wasm")]
        if let Some(button) = web::main_button() {
            web::call(&button, "hide", &[]);
            return;
        }
        LoggingHost.hide_main_button();
    }

    fn set_main_button_text(&self, text: &str) {
        #[cfg(target_family = "wasm")]
        if let Some(button) = web::main_button() {
            web::call(&button, "setParams", &[web::text_params(text)]);
            return;
        }
        LoggingHost.set_main_button_text(text);
    }

    fn on_main_button_click(&self, handler: Box<dyn Fn()>) {
        #[cfg(target_family = "wasm")]
        if let Some(button) = web::main_button() {
            web::call(&button, "onClick", &[web::callback(handler)]);
            return;
        }
        LoggingHost.on_main_button_click(handler);
    }

    fn show_popup(&self, popup: &Popup) {
        #[cfg(target_family = "wasm")]
        if let Some(app) = web::web_app() {
            match serde_wasm_bindgen::to_value(popup) {
                Ok(params) => web::call(&app, "showPopup", &[params]),
                Err(e) => tracing::error!("Failed to encode popup: {e}"),
            }
            return;
        }
        LoggingHost.show_popup(popup);
    }
}

#[cfg(target_family = "wasm")]
mod web {
    use js_sys::{Array, Function, Object, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    use shavukha_common::host::HostUser;

    fn get(target: &JsValue, key: &str) -> Option<JsValue> {
        Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    }

    pub fn web_app() -> Option<JsValue> {
        let window = web_sys::window()?;
        let telegram = get(&window, "Telegram")?;
        get(&telegram, "WebApp")
    }

    pub fn main_button() -> Option<JsValue> {
        get(&web_app()?, "MainButton")
    }

    pub fn init_user() -> Option<HostUser> {
        let init = get(&web_app()?, "initDataUnsafe")?;
        let user = get(&init, "user")?;
        match serde_wasm_bindgen::from_value(user) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!("Unreadable Telegram user: {e}");
                None
            }
        }
    }

    /// Call `target[method](...args)`, logging instead of throwing.
    pub fn call(target: &JsValue, method: &str, args: &[JsValue]) {
        let Some(function) = get(target, method) else {
            tracing::error!("Telegram.WebApp has no {method}");
            return;
        };
        let Some(function) = function.dyn_ref::<Function>() else {
            tracing::error!("Telegram.WebApp.{method} is not a function");
            return;
        };
        let js_args = Array::new();
        for arg in args {
            js_args.push(arg);
        }
        if let Err(e) = function.apply(target, &js_args) {
            tracing::error!("Telegram.WebApp.{method} failed: {e:?}");
        }
    }

    pub fn text_params(text: &str) -> JsValue {
        let params = Object::new();
        let _ = Reflect::set(&params, &JsValue::from_str("text"), &JsValue::from_str(text));
        params.into()
    }

    pub fn callback(handler: Box<dyn Fn()>) -> JsValue {
        Closure::<dyn Fn()>::new(move || handler()).into_js_value()
    }
}

use dioxus::prelude::*;

use shavukha_client::dispatch_order;
use shavukha_common::checkout::{CheckoutForm, DeliveryType, PayType};

use super::shared_state::{use_services, use_session, use_shared_state, Session};

/// Checkout form shown over the menu once the customer proceeds from the cart.
#[component]
pub fn OrderModal() -> Element {
    let mut session = use_session();
    let shared = use_shared_state();
    let services = use_services();

    let state = session.read();
    let Some(form) = state.checkout().cloned() else {
        return rsx! {};
    };
    let total = state.cart().total();
    drop(state);

    let delivery_type = form.delivery_type();
    let pay_type = form.pay_type();
    let phone = form.phone().to_string();
    let address = form.address().to_string();
    let needs_address = form.needs_address();
    let can_submit = form.can_submit() && services.api.is_some();
    let notice = services.config.delivery.notice();

    let place_order = move |_| {
        let Some(api) = services.api.clone() else {
            tracing::error!("Order service is not configured");
            return;
        };
        let user_id = shared.read().user.id.clone();
        let request = match session.write().begin_order(user_id) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Order not submitted: {e}");
                return;
            }
        };
        spawn(async move {
            let outcome = dispatch_order(&api, &request).await;
            session.write().apply_outcome(&outcome);
        });
    };

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal-content",
                h2 { "Оформление заказа" }
                div { class: "delivery-type",
                    {[DeliveryType::Pickup, DeliveryType::Delivery].into_iter().map(|option| {
                        let label = option.label();
                        rsx! {
                            label { key: "{label}",
                                input {
                                    r#type: "radio",
                                    name: "delivery-type",
                                    checked: delivery_type == Some(option),
                                    onchange: move |_| edit(session, |f| f.set_delivery_type(option)),
                                }
                                "{label}"
                            }
                        }
                    })}
                }
                div { class: "form-group",
                    label { "Способ оплаты:" }
                }
                div { class: "delivery-type",
                    {[PayType::Cash, PayType::Transfer].into_iter().map(|option| {
                        let label = option.label();
                        rsx! {
                            label { key: "{label}",
                                input {
                                    r#type: "radio",
                                    name: "pay-type",
                                    checked: pay_type == Some(option),
                                    onchange: move |_| edit(session, |f| f.set_pay_type(option)),
                                }
                                "{label}"
                            }
                        }
                    })}
                }
                div { class: "form-group",
                    label { "Номер телефона:" }
                    input {
                        r#type: "tel",
                        value: "{phone}",
                        placeholder: "+7 (___) ___-__-__",
                        oninput: move |evt| edit(session, |f| f.set_phone(evt.value())),
                    }
                }
                if needs_address {
                    div { class: "form-group",
                        label { "Адрес доставки:" }
                        textarea {
                            value: "{address}",
                            placeholder: "Введите адрес доставки",
                            oninput: move |evt| edit(session, |f| f.set_address(evt.value())),
                        }
                        label { "{notice}" }
                    }
                }
                div { class: "total-price", "Итого к оплате: {total} ₽" }
                div { class: "modal-buttons",
                    button {
                        r#type: "button",
                        onclick: move |_| session.write().close_checkout(),
                        "Отмена"
                    }
                    button {
                        r#type: "button",
                        disabled: !can_submit,
                        onclick: place_order,
                        "Заказать"
                    }
                }
            }
        }
    }
}

/// Apply a field edit to the open form. Edits are ignored while a submission
/// is in flight.
fn edit(mut session: Signal<Session>, apply: impl FnOnce(&mut CheckoutForm) -> bool) {
    let mut state = session.write();
    let Some(form) = state.checkout_mut() else {
        return;
    };
    if !apply(form) {
        tracing::debug!("Checkout form is not editable in {:?}", form.phase());
    }
}

use dioxus::prelude::*;

use shavukha_common::cart::CartLineItem;
use shavukha_common::currency::format_amount;

use super::shared_state::use_session;

/// Bottom sheet listing the cart. Items are addressed by position.
#[component]
pub fn CartSheet() -> Element {
    let mut session = use_session();

    let state = session.read();
    if !state.is_cart_open() {
        return rsx! {};
    }
    let items: Vec<CartLineItem> = state.cart().items().to_vec();
    let total = format_amount(state.cart().total());
    drop(state);

    rsx! {
        div { class: "cart-backdrop", onclick: move |_| session.write().close_cart() }
        div { class: "cart-modal",
            div { class: "cart-header",
                h3 { "Корзина" }
                button { class: "close-btn", onclick: move |_| session.write().close_cart(), "✕" }
            }
            if items.is_empty() {
                div { class: "cart-empty",
                    span { class: "cart-empty-icon", "🛒" }
                    p { "Корзина пуста" }
                }
            } else {
                div { class: "cart-items",
                    {items.into_iter().enumerate().map(|(index, item)| {
                        let key = item.id.0;
                        let quantity = item.quantity;
                        let price = format_amount(item.final_price);
                        let additions = item.additions_summary();
                        let removals = item.removals_summary();
                        let name = item.product.name.clone();
                        let photo_url = item.product.photo_url.clone();
                        rsx! {
                            div { class: "cart-item", key: "{key}",
                                img { src: "{photo_url}", alt: "{name}" }
                                div { class: "item-details",
                                    h4 { "{name}" }
                                    div { class: "item-customization",
                                        if let Some(text) = additions {
                                            small { "{text}" }
                                        }
                                        if let Some(text) = removals {
                                            small { "{text}" }
                                        }
                                    }
                                    div { class: "item-price", "{price}" }
                                }
                                div { class: "item-controls",
                                    button {
                                        class: "quantity-btn",
                                        disabled: quantity <= 1,
                                        onclick: move |_| {
                                            session.write().update_quantity(index, quantity.saturating_sub(1));
                                        },
                                        "−"
                                    }
                                    span { class: "quantity", "{quantity}" }
                                    button {
                                        class: "quantity-btn",
                                        onclick: move |_| {
                                            session.write().update_quantity(index, quantity + 1);
                                        },
                                        "+"
                                    }
                                    button {
                                        class: "remove-btn",
                                        onclick: move |_| {
                                            session.write().remove_at(index);
                                        },
                                        "🗑️"
                                    }
                                }
                            }
                        }
                    })}
                }
                div { class: "cart-footer",
                    div { class: "cart-total",
                        span { "Итого:" }
                        span { class: "total-price", "{total}" }
                    }
                    div { class: "checkout-btn-1",
                        button {
                            class: "checkout-btn",
                            onclick: move |_| session.write().proceed_to_checkout(),
                            "Оформить заказ"
                        }
                    }
                }
            }
        }
    }
}

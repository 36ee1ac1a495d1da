use dioxus::prelude::*;

use shavukha_common::currency::{format_amount, format_surcharge};
use shavukha_common::customizer::Customizer;
use shavukha_common::product::Product;

use super::shared_state::use_session;

/// One menu item with its ingredient customizer and "add to cart" button.
#[component]
pub fn ProductCard(product: Product) -> Element {
    let mut session = use_session();
    let mut customizer = use_signal({
        let product = product.clone();
        move || Customizer::new(product)
    });
    // A catalog reload can hand the same card a changed product.
    use_effect(use_reactive!(|product| {
        if customizer.peek().product() != &product {
            customizer.write().refresh(product);
        }
    }));
    let mut show_details = use_signal(|| false);
    let mut just_added = use_signal(|| false);

    let price = format_amount(customizer.read().compute_price());
    let name = product.name.clone();
    let description = product.description.clone();
    let photo_url = product.photo_url.clone();
    let calories = product.calories_label();
    let cooking_time = product.cooking_time_label();

    let add_to_cart = move |_| {
        let item = customizer.write().commit();
        session.write().add_to_cart(item);
        just_added.set(true);
        spawn(async move {
            added_flash_delay().await;
            just_added.set(false);
        });
    };

    let add_label = if *just_added.read() {
        "✓ Добавлено"
    } else {
        "Добавить в корзину"
    };
    let add_class = if *just_added.read() {
        "add-to-cart-btn added"
    } else {
        "add-to-cart-btn"
    };

    rsx! {
        div { class: "product-card",
            if product.popular {
                span { class: "popular-badge", "🔥 Популярное" }
            }
            div { class: "image-container",
                img { src: "{photo_url}", alt: "{name}" }
                div { class: "image-overlay",
                    button {
                        class: "details-btn",
                        onclick: move |_| show_details.set(true),
                        "Подробнее"
                    }
                }
            }
            div { class: "product-content",
                h3 { "{name}" }
                p { class: "description", "{description}" }
                div { class: "price", "{price}" }
                if *show_details.read() {
                    div { class: "details-modal",
                        button {
                            class: "close-btn",
                            "aria-label": "Close details",
                            onclick: move |_| show_details.set(false),
                            "✕"
                        }
                        div { class: "ingredients-section",
                            h4 { "Дополнительно:" }
                            {product.ingredients.iter().cloned().map(|ing| {
                                let checked = customizer.read().is_added(&ing.id);
                                let surcharge = format_surcharge(ing.price);
                                let key = ing.id.0.to_string();
                                let name = ing.name.clone();
                                rsx! {
                                    div { class: "ingredient-item", key: "add-{key}",
                                        label {
                                            input {
                                                r#type: "checkbox",
                                                checked: checked,
                                                onchange: move |_| {
                                                    customizer.write().toggle_additive(&ing);
                                                },
                                            }
                                            span { "{name}" }
                                            span { class: "price-tag", "{surcharge}" }
                                        }
                                    }
                                }
                            })}
                            {product.removable_ingredients.iter().cloned().map(|ing| {
                                let checked = customizer.read().is_removed(&ing.id);
                                let key = ing.id.0.to_string();
                                let name = ing.name.clone();
                                rsx! {
                                    div { class: "ingredient-item", key: "remove-{key}",
                                        label {
                                            input {
                                                r#type: "checkbox",
                                                checked: checked,
                                                onchange: move |_| {
                                                    customizer.write().toggle_removal(&ing);
                                                },
                                            }
                                            "Убрать {name}"
                                        }
                                    }
                                }
                            })}
                        }
                        div { class: "additional-info",
                            span { class: "calories", "🔥 {calories}" }
                            span { class: "cooking-time", "⏱️ {cooking_time}" }
                        }
                    }
                }
                button {
                    class: "{add_class}",
                    onclick: add_to_cart,
                    "{add_label}"
                }
            }
        }
    }
}

/// How long the "added" state stays on the button.
async fn added_flash_delay() {
    #[cfg(target_family = "wasm")]
    gloo_timers::future::TimeoutFuture::new(300).await;
}

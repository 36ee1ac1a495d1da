use dioxus::prelude::*;

use shavukha_common::product::{CategoryFilter, Product};

use super::product_card::ProductCard;
use super::shared_state::use_shared_state;

#[component]
pub fn ProductList() -> Element {
    let mut shared = use_shared_state();

    let state = shared.read();
    let active = state.filter.clone();
    // Tuple: (section key, section title, products)
    let sections: Vec<(String, String, Vec<Product>)> = state
        .catalog
        .sections(&active)
        .map(|(category, products)| {
            (
                category.key().to_string(),
                category.title().to_string(),
                products.to_vec(),
            )
        })
        .collect();
    drop(state);

    rsx! {
        nav { class: "category-nav",
            {CategoryFilter::tabs().into_iter().map(|(filter, label)| {
                let class = if filter == active { "category-btn active" } else { "category-btn" };
                rsx! {
                    button {
                        class: "{class}",
                        onclick: move |_| shared.write().filter = filter.clone(),
                        "{label}"
                    }
                }
            })}
        }
        div { class: "products-container",
            {sections.into_iter().map(|(key, title, products)| {
                rsx! {
                    section { key: "{key}",
                        h2 { "{title}" }
                        div { class: "products-grid",
                            {products.into_iter().map(|product| {
                                let id = product.id.0.to_string();
                                rsx! {
                                    ProductCard { key: "{id}", product }
                                }
                            })}
                        }
                    }
                }
            })}
        }
    }
}

//! HTTP side of the ordering app: the product and order services.

pub mod api;
pub mod catalog;
pub mod submit;

pub use api::{HttpShopApi, ShopApi};
pub use catalog::{apply_catalog_result, load_catalog};
pub use submit::{dispatch_order, submit_order};

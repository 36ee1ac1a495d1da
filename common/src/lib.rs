pub mod cart;
pub mod checkout;
pub mod config;
pub mod currency;
pub mod customizer;
pub mod error;
pub mod host;
pub mod id;
pub mod ingredient;
pub mod order;
pub mod product;
pub mod session;
mod wire;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

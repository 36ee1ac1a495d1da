pub mod app;
pub mod cart_sheet;
pub mod order_modal;
pub mod product_card;
pub mod product_list;
pub mod shared_state;
pub mod telegram;

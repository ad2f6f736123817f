// diecast_cart/src/model/mod.rs

//! Data carried between the store, the synchronizer and presentation layers.

pub mod cart_line;
pub mod checkout;
pub mod product;
pub mod view;

pub use cart_line::{CartLine, NewCartLine};
pub use checkout::CheckoutSummary;
pub use product::ProductSnapshot;
pub use view::CartView;

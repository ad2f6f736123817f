// storefront/src/store/mod.rs

pub mod postgres;

pub use postgres::PgCartStore;

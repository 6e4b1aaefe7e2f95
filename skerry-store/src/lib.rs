pub mod app_config;
pub mod booking_store;
pub mod database;

pub use app_config::Config;
pub use booking_store::PgBookingStore;
pub use database::DbClient;

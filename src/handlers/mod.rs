pub mod auth;
pub mod destinations;
pub mod health;
pub mod users;

pub use destinations::destinations_config;
pub use health::health_check;
pub use users::users_config;

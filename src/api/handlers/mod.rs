//! HTTP request handlers.

pub mod referrer_handler;
pub mod system_handler;
pub mod three_k_handler;
pub mod user_handler;

pub use referrer_handler::referrer_routes;
pub use system_handler::system_routes;
pub use three_k_handler::three_k_routes;
pub use user_handler::user_routes;

//! HTTP request handlers.

pub mod demo_handler;
pub mod health_handler;
pub mod person_handler;

pub use demo_handler::demo_routes;
pub use health_handler::health_routes;
pub use person_handler::person_routes;

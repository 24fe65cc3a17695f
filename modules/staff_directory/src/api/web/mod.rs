pub mod cookies;
pub mod error;
pub mod extract;
pub mod forms;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;

pub use routes::register_routes;
pub use state::WebState;

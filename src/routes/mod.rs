pub mod api;
pub mod choices;
pub mod products;
pub mod users;

pub use api::configure;

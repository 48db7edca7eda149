pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod pages;
pub mod route;
pub mod state;
pub mod utils;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use state::AppContext;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use db::sqlite::AdvisingStorage;
pub use error::AdminError;
pub use router::{AdminState, admin_router};

pub mod session_upsert;
pub mod settings;

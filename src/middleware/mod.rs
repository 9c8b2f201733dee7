pub mod extract;
pub mod identity;

pub use extract::{JsonBody, QueryParams};
pub use identity::CurrentIdentity;

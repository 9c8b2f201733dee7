//! Acting identity for the dashboard: who is signed in, under which role, and
//! which major/student is currently selected.
//!
//! Layout:
//! - `persistence.rs`: the storage port (`MemoryPersistence`, `FilePersistence`)
//! - `provider.rs`: user fabrication behind `IdentityProvider`
//! - `context.rs`: the state holder handlers share

pub mod context;
pub mod persistence;
pub mod provider;

pub use context::{IdentityContext, IdentitySnapshot, SharedIdentity};
pub use persistence::{FilePersistence, MemoryPersistence, PersistencePort};
pub use provider::{DemoIdentityProvider, IdentityProvider, Role, User};

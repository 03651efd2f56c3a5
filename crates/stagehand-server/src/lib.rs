// ABOUTME: HTTP server entries for stagehand, built on axum.
// ABOUTME: Provides the web entry, Basic Auth middleware, embedded asset serving, and the Boot orchestrator.

pub mod assets;
pub mod auth;
pub mod boot;
pub mod entry;
pub mod internal;
mod serve;

pub use auth::{BasicAuthLayer, basic_auth, verify_credentials};
pub use boot::{Boot, BootError, EntryHandle};
pub use entry::WebEntry;
pub use internal::InternalEntry;

//! Providers: named REST APIs and their discovery on disk

mod bundle;
mod loader;

pub use bundle::{ProviderBundle, ProviderConfig};
pub use loader::{load_provider, load_providers, parse_document};

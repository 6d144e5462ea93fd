// Library exports for integration tests and binaries

pub mod archive;
pub mod bundle;
pub mod config;
pub mod error;
pub mod locale;
pub mod phrases;
pub mod retry;
pub mod store;
pub mod sync;
pub mod wti;

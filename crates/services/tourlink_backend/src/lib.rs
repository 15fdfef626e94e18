// --- File: crates/services/tourlink_backend/src/lib.rs ---
pub mod app;
pub mod service_factory;

pub use app::build_app;
pub use service_factory::{StartupError, TourlinkServices};

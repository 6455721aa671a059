// src/lib.rs
pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod feedback;
pub mod generator;
pub mod logging;
pub mod metrics;
pub mod notifications;
pub mod roles;
pub mod scenario;
pub mod session;
pub mod types;
pub mod zones;

pub use cache::SessionCache;
pub use errors::{CockpitError, Result};
pub use generator::{generate_bundle, generate_bundle_with, generate_scenario_bundle};
pub use scenario::Scenario;
pub use session::SessionContext;
pub use types::ScenarioDatasetBundle;

//! Infrastructure layer: tenant-isolated reference data, dataset files, env config.

pub mod config;
pub mod dataset;
pub mod read_model;
pub mod workspace;

mod integration_tests;

pub use config::readiness_config_from_env;
pub use dataset::{Dataset, DatasetError, TenantData};
pub use read_model::{InMemoryTenantStore, TenantStore};
pub use workspace::{InMemoryWorkspace, TenantView};

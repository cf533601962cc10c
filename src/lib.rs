pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::LocalStorage;
pub use crate::app::{Console, Session};
pub use crate::config::AppConfig;
pub use crate::core::catalog::Catalog;
pub use crate::core::enrollment::{Enrollment, EnrollmentService, RegistrationError, RegistrationRequest};
pub use crate::core::persistence::RecordStore;
pub use crate::core::registry::Registry;
pub use crate::utils::error::{EnrollError, Result};

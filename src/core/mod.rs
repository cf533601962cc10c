pub mod catalog;
pub mod enrollment;
pub mod persistence;
pub mod registry;

pub use crate::domain::model::{Course, Identity, Lecturer, Person, PersonId, Student};
pub use crate::domain::ports::{ConfigProvider, EnrollmentPolicy, Storage};
pub use crate::utils::error::Result;

use crate::app::display;
use crate::core::catalog::Catalog;
use crate::core::enrollment::{Enrollment, EnrollmentService, RegistrationError, RegistrationRequest};
use crate::core::persistence::{LoadSummary, RecordStore};
use crate::core::registry::Registry;
use crate::domain::ports::{ConfigProvider, Storage};

/// Everything one run of the program works on: people, courses and the workflow
/// that persists them.
pub struct Session<S: Storage> {
    pub registry: Registry,
    pub catalog: Catalog,
    service: EnrollmentService<S>,
}

impl<S: Storage> Session<S> {
    /// Seeds the default lecturers and courses, then loads saved records on top.
    ///
    /// Unreadable record files are logged and the session starts from the seed
    /// state instead, with saving disabled so the files on disk are left alone.
    pub fn open<C: ConfigProvider>(storage: S, config: &C) -> (Self, LoadSummary) {
        let policy = config.policy().clone();
        let mut registry = Registry::new();
        let mut catalog = Catalog::seeded(&mut registry, &policy);

        let mut store = RecordStore::from_config(storage, config);
        let summary = match store.load(&mut registry, &mut catalog) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("❌ Failed to load records: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                registry = Registry::new();
                catalog = Catalog::seeded(&mut registry, &policy);
                LoadSummary::default()
            }
        };

        if !store.is_writable() {
            tracing::warn!("Record files will not be saved during this run");
        }

        let session = Self {
            registry,
            catalog,
            service: EnrollmentService::new(store, policy),
        };
        (session, summary)
    }

    pub fn register(
        &mut self,
        request: &RegistrationRequest,
    ) -> Result<Enrollment, RegistrationError> {
        self.service
            .register(&mut self.registry, &mut self.catalog, request)
    }

    /// Details of the course behind the 1-based `selector`.
    pub fn course_details(&self, selector: usize) -> Option<String> {
        let course = self.catalog.get_by_index(selector.checked_sub(1)?).ok()?;
        Some(display::course_details(course, &self.catalog, &self.registry))
    }

    pub fn free_places(&self) -> String {
        display::free_places(&self.catalog, &self.registry)
    }

    pub fn enrollments(&self) -> String {
        display::enrollments(&self.registry)
    }

    pub fn cancellation_report(&self) -> String {
        display::cancellation_report(&self.catalog, &self.registry)
    }

    pub fn service(&self) -> &EnrollmentService<S> {
        &self.service
    }
}

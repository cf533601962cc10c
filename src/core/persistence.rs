use crate::adapters::codec::{self, DecodeSummary};
use crate::core::catalog::Catalog;
use crate::core::registry::Registry;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{EnrollError, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub students: DecodeSummary,
    pub courses: DecodeSummary,
}

/// Reads and rewrites the two record files through a [`Storage`] backend.
///
/// Once a load has failed the store refuses to save, so records that could not be
/// read are never replaced by the in-memory state.
pub struct RecordStore<S: Storage> {
    storage: S,
    students_file: String,
    courses_file: String,
    failed_load: Option<String>,
}

impl<S: Storage> RecordStore<S> {
    pub fn new(storage: S, students_file: impl Into<String>, courses_file: impl Into<String>) -> Self {
        Self {
            storage,
            students_file: students_file.into(),
            courses_file: courses_file.into(),
            failed_load: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::new(storage, config.students_file(), config.courses_file())
    }

    /// Loads students first so course rosters can resolve participant emails.
    /// Missing files are treated as empty.
    pub fn load(&mut self, registry: &mut Registry, catalog: &mut Catalog) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();

        summary.students = self
            .read_records(&self.students_file, |data| codec::decode_students(data, registry))
            .inspect_err(|_| self.failed_load = Some(self.students_file.clone()))?;
        summary.courses = self
            .read_records(&self.courses_file, |data| {
                codec::decode_courses(data, registry, catalog)
            })
            .inspect_err(|_| self.failed_load = Some(self.courses_file.clone()))?;

        tracing::info!(
            "📂 Loaded {} students and {} course records ({} malformed lines skipped)",
            summary.students.loaded,
            summary.courses.loaded,
            summary.students.skipped + summary.courses.skipped
        );
        Ok(summary)
    }

    /// Rewrites both files in full. Both writes are attempted; the first failure is
    /// returned.
    pub fn save(&self, registry: &Registry, catalog: &Catalog) -> Result<()> {
        if let Some(file) = &self.failed_load {
            return Err(EnrollError::UnloadedRecordsError { file: file.clone() });
        }

        let students = self.save_students(registry);
        let courses = self.save_courses(catalog, registry);
        students.and(courses)
    }

    fn save_students(&self, registry: &Registry) -> Result<()> {
        let text = codec::encode_students(registry)?;
        self.storage.write_file(&self.students_file, &text)?;
        tracing::debug!("Saved {} students", registry.student_count());
        Ok(())
    }

    fn save_courses(&self, catalog: &Catalog, registry: &Registry) -> Result<()> {
        let text = codec::encode_courses(catalog, registry)?;
        self.storage.write_file(&self.courses_file, &text)?;
        tracing::debug!("Saved {} courses", catalog.len());
        Ok(())
    }

    pub fn is_writable(&self) -> bool {
        self.failed_load.is_none()
    }

    fn read_records(
        &self,
        file: &str,
        decode: impl FnOnce(&[u8]) -> Result<DecodeSummary>,
    ) -> Result<DecodeSummary> {
        match self.storage.read_file(file)? {
            Some(data) => decode(&data),
            None => Ok(DecodeSummary::default()),
        }
    }
}

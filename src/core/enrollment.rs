use crate::core::catalog::Catalog;
use crate::core::persistence::RecordStore;
use crate::core::registry::Registry;
use crate::domain::model::{Identity, PersonId, Student};
use crate::domain::ports::{EnrollmentPolicy, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use thiserror::Error;

/// Registration data as collected from the user. `course` is the 1-based selector
/// shown in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub course: usize,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub matriculation_number: i32,
    pub university: String,
}

impl Validate for RegistrationRequest {
    fn validate(&self) -> Result<()> {
        validation::validate_record_field("First name", &self.firstname)?;
        validation::validate_record_field("Last name", &self.surname)?;
        validation::validate_email("Email", &self.email)?;
        validation::validate_record_field("University", &self.university)?;
        Ok(())
    }
}

/// Expected business rejections. None of these change registry or catalog state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid course selection {selector}: choose a course between 1 and {available}")]
    InvalidSelector { selector: usize, available: usize },

    #[error("Course '{course}' is fully booked")]
    CourseFull { course: String },

    #[error("Enrollment limit reached for student with email {email} (limit {limit})")]
    EnrollmentLimitReached { email: String, limit: usize },

    #[error("{email} is already registered for '{course}'")]
    AlreadyEnrolled { email: String, course: String },

    #[error("Invalid registration: {message}")]
    InvalidRequest { message: String },
}

/// A registration that was applied in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub course: String,
    pub student: PersonId,
    pub new_student: bool,
    /// `false` when rewriting the record files failed. The enrollment still stands.
    pub persisted: bool,
}

pub struct EnrollmentService<S: Storage> {
    store: RecordStore<S>,
    policy: EnrollmentPolicy,
}

impl<S: Storage> EnrollmentService<S> {
    pub fn new(store: RecordStore<S>, policy: EnrollmentPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    /// Validates `request` and, if accepted, records the enrollment on both the
    /// student and the course before rewriting the record files.
    ///
    /// An existing student's limit is taken from the university stored on their
    /// record; the identity fields of the request only matter for new students.
    pub fn register(
        &self,
        registry: &mut Registry,
        catalog: &mut Catalog,
        request: &RegistrationRequest,
    ) -> std::result::Result<Enrollment, RegistrationError> {
        let index = request
            .course
            .checked_sub(1)
            .filter(|i| *i < catalog.len())
            .ok_or(RegistrationError::InvalidSelector {
                selector: request.course,
                available: catalog.len(),
            })?;

        let course = catalog
            .get_by_index(index)
            .map_err(|e| RegistrationError::InvalidRequest {
                message: e.to_string(),
            })?;
        let course_name = course.name.clone();

        if catalog.is_full(course) {
            tracing::warn!("Rejected {}: '{}' is fully booked", request.email, course_name);
            return Err(RegistrationError::CourseFull { course: course_name });
        }

        request
            .validate()
            .map_err(|e| RegistrationError::InvalidRequest {
                message: e.to_string(),
            })?;

        let (student_id, new_student) = match registry.student_id(&request.email) {
            Some(id) => {
                let student = registry.student(id).ok_or_else(|| {
                    RegistrationError::InvalidRequest {
                        message: format!("{} is not a student record", request.email),
                    }
                })?;
                self.check_limit(student)?;
                if student.is_enrolled_in(&course_name) {
                    return Err(RegistrationError::AlreadyEnrolled {
                        email: request.email.clone(),
                        course: course_name,
                    });
                }
                (id, false)
            }
            None => {
                let student = Student::new(
                    Identity::new(&request.firstname, &request.surname, &request.email),
                    request.matriculation_number,
                    &request.university,
                );
                (registry.upsert_student(student).0, true)
            }
        };

        // Every check has passed; both sides change together.
        let course = catalog
            .get_mut_by_index(index)
            .map_err(|e| RegistrationError::InvalidRequest {
                message: e.to_string(),
            })?;
        let student = registry
            .student_mut(student_id)
            .ok_or_else(|| RegistrationError::InvalidRequest {
                message: format!("{} is not a student record", request.email),
            })?;
        student.enrolled_courses.push(course_name.clone());
        course.participants.push(student_id);

        tracing::info!("✅ Registered {} for {}", request.email, course_name);

        let persisted = match self.store.save(registry, catalog) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("❌ Failed to save records: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                false
            }
        };

        Ok(Enrollment {
            course: course_name,
            student: student_id,
            new_student,
            persisted,
        })
    }

    fn check_limit(&self, student: &Student) -> std::result::Result<(), RegistrationError> {
        let limit = self.policy.limit_for(&student.university);
        if student.enrolled_courses.len() >= limit {
            tracing::warn!(
                "Rejected {}: {} of {} enrollments used",
                student.identity.email,
                student.enrolled_courses.len(),
                limit
            );
            return Err(RegistrationError::EnrollmentLimitReached {
                email: student.identity.email.clone(),
                limit,
            });
        }
        Ok(())
    }
}

use crate::core::registry::Registry;
use crate::domain::model::{Course, Identity, Lecturer};
use crate::domain::ports::EnrollmentPolicy;
use thiserror::Error;

/// Lecturer and course offered on a fresh install.
pub const SEED_COURSES: [(&str, &str, &str, &str, &str); 3] = [
    ("Programming", "Adil", "Khan", "adilkhan@gmail.com", "Professor"),
    ("Databases", "Nabia", "Khalid", "nabiakhalid@gmail.com", "Associate Professor"),
    ("Software Engineering", "Sohail", "Akhtar", "sohailakhtar@gmail.com", "Researcher"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid course index {index}: the catalog has {len} courses")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// A course that still accepts registrations.
#[derive(Debug, Clone, Copy)]
pub struct OpenCourse<'a> {
    pub index: usize,
    pub course: &'a Course,
    pub free_places: usize,
}

/// The courses on offer, in selector order.
///
/// Constructed once at startup and handed to whoever needs it; there is no global
/// instance. Like [`Registry`], it is mutated only through `&mut` and is not
/// synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
    capacity: usize,
    minimum_participants: usize,
}

impl Catalog {
    pub fn new(policy: &EnrollmentPolicy) -> Self {
        Self {
            courses: Vec::new(),
            capacity: policy.capacity,
            minimum_participants: policy.minimum_participants,
        }
    }

    /// Registers the seed lecturers in `registry` and offers one course for each.
    pub fn seeded(registry: &mut Registry, policy: &EnrollmentPolicy) -> Self {
        let mut catalog = Self::new(policy);
        for (course, firstname, surname, email, title) in SEED_COURSES {
            let lecturer = registry.add_lecturer(Lecturer::new(
                Identity::new(firstname, surname, email),
                title,
            ));
            catalog.add_course(Course::new(course, lecturer));
        }
        catalog
    }

    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    /// Replaces lecturer and roster of the course with the same name, or appends
    /// `course` when the name is new. Returns the course position.
    pub fn merge_course(&mut self, course: Course) -> usize {
        match self.find_by_name(&course.name) {
            Some(index) => {
                let existing = &mut self.courses[index];
                existing.lecturer = course.lecturer;
                existing.participants = course.participants;
                index
            }
            None => {
                self.courses.push(course);
                self.courses.len() - 1
            }
        }
    }

    pub fn get_by_index(&self, index: usize) -> Result<&Course, OutOfRange> {
        self.courses.get(index).ok_or(OutOfRange {
            index,
            len: self.courses.len(),
        })
    }

    pub(crate) fn get_mut_by_index(&mut self, index: usize) -> Result<&mut Course, OutOfRange> {
        let len = self.courses.len();
        self.courses
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.name == name)
    }

    pub fn is_full(&self, course: &Course) -> bool {
        course.participant_count() >= self.capacity
    }

    pub fn free_places(&self, course: &Course) -> usize {
        self.capacity.saturating_sub(course.participant_count())
    }

    pub fn will_not_run(&self, course: &Course) -> bool {
        course.participant_count() < self.minimum_participants
    }

    pub fn list_underbooked(&self) -> Vec<OpenCourse<'_>> {
        self.courses
            .iter()
            .enumerate()
            .filter_map(|(index, course)| {
                let free_places = self.free_places(course);
                (free_places > 0).then_some(OpenCourse {
                    index,
                    course,
                    free_places,
                })
            })
            .collect()
    }

    /// Courses below the minimum participant count.
    pub fn cancelled(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|c| self.will_not_run(c))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn minimum_participants(&self) -> usize {
        self.minimum_participants
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PersonId;

    fn course_with(n: usize) -> Course {
        let mut course = Course::new("Programming", PersonId(0));
        course.participants = (1..=n).map(PersonId).collect();
        course
    }

    #[test]
    fn test_seeded_catalog_has_three_courses_with_distinct_lecturers() {
        let mut registry = Registry::new();
        let catalog = Catalog::seeded(&mut registry, &EnrollmentPolicy::default());

        let names: Vec<&str> = catalog.courses().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Programming", "Databases", "Software Engineering"]);

        let lecturer = registry.get(catalog.courses()[1].lecturer).unwrap();
        assert_eq!(lecturer.as_lecturer().unwrap().academic_title, "Associate Professor");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_get_by_index_out_of_range() {
        let mut registry = Registry::new();
        let catalog = Catalog::seeded(&mut registry, &EnrollmentPolicy::default());

        assert!(catalog.get_by_index(2).is_ok());
        assert_eq!(catalog.get_by_index(3).unwrap_err(), OutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn test_capacity_queries() {
        let catalog = Catalog::new(&EnrollmentPolicy::default());

        assert!(!catalog.is_full(&course_with(9)));
        assert!(catalog.is_full(&course_with(10)));
        assert_eq!(catalog.free_places(&course_with(4)), 6);
        assert_eq!(catalog.free_places(&course_with(12)), 0);
    }

    #[test]
    fn test_will_not_run_threshold() {
        let catalog = Catalog::new(&EnrollmentPolicy::default());

        assert!(catalog.will_not_run(&course_with(0)));
        assert!(catalog.will_not_run(&course_with(2)));
        assert!(!catalog.will_not_run(&course_with(3)));
    }

    #[test]
    fn test_list_underbooked_skips_full_courses() {
        let mut catalog = Catalog::new(&EnrollmentPolicy::default());
        catalog.add_course(course_with(10));
        let mut open = course_with(7);
        open.name = "Databases".to_string();
        catalog.add_course(open);

        let listed = catalog.list_underbooked();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].index, 1);
        assert_eq!(listed[0].free_places, 3);
    }

    #[test]
    fn test_merge_course_replaces_roster_of_known_name() {
        let mut registry = Registry::new();
        let mut catalog = Catalog::seeded(&mut registry, &EnrollmentPolicy::default());

        let mut loaded = Course::new("Databases", PersonId(7));
        loaded.participants = vec![PersonId(8)];
        assert_eq!(catalog.merge_course(loaded), 1);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.courses()[1].participants, vec![PersonId(8)]);
        assert_eq!(catalog.courses()[1].lecturer, PersonId(7));

        assert_eq!(catalog.merge_course(Course::new("Networks", PersonId(0))), 3);
        assert_eq!(catalog.len(), 4);
    }
}

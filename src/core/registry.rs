use crate::domain::model::{Lecturer, Person, PersonId, Student};
use std::collections::BTreeMap;

/// Owner of every person known to the process.
///
/// People live in an append-only arena and are addressed by [`PersonId`]; students are
/// additionally indexed by email. The catalog only ever holds ids, so there is a single
/// owner for each record. Not meant for concurrent access: callers hold `&mut Registry`
/// for every mutation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registry {
    people: Vec<Person>,
    students: BTreeMap<String, PersonId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lecturer unconditionally. Callers dedupe through
    /// [`find_person_by_email`](Self::find_person_by_email) first.
    pub fn add_lecturer(&mut self, lecturer: Lecturer) -> PersonId {
        self.push(Person::Lecturer(lecturer))
    }

    /// Returns the id of the student with `student.identity.email`, registering
    /// `student` first if that email is unknown. The flag is `true` when a new
    /// record was created.
    pub fn upsert_student(&mut self, student: Student) -> (PersonId, bool) {
        if let Some(id) = self.students.get(&student.identity.email) {
            return (*id, false);
        }

        let email = student.identity.email.clone();
        let id = self.push(Person::Student(student));
        self.students.insert(email, id);
        (id, true)
    }

    pub fn lookup(&self, email: &str) -> Option<&Student> {
        self.student_id(email).and_then(|id| self.student(id))
    }

    pub fn student_id(&self, email: &str) -> Option<PersonId> {
        self.students.get(email).copied()
    }

    /// First person (student or lecturer) registered with `email`.
    pub fn find_person_by_email(&self, email: &str) -> Option<PersonId> {
        self.people
            .iter()
            .position(|p| p.email() == email)
            .map(PersonId)
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.0)
    }

    pub fn student(&self, id: PersonId) -> Option<&Student> {
        self.get(id).and_then(Person::as_student)
    }

    pub(crate) fn student_mut(&mut self, id: PersonId) -> Option<&mut Student> {
        match self.people.get_mut(id.0) {
            Some(Person::Student(s)) => Some(s),
            _ => None,
        }
    }

    /// Students in ascending email order.
    pub fn students(&self) -> impl Iterator<Item = (PersonId, &Student)> {
        self.students
            .values()
            .filter_map(|id| self.student(*id).map(|s| (*id, s)))
    }

    /// Everyone in registration order.
    pub fn people(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(i, p)| (PersonId(i), p))
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    fn push(&mut self, person: Person) -> PersonId {
        self.people.push(person);
        PersonId(self.people.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Identity;

    fn ann() -> Student {
        Student::new(Identity::new("Ann", "Lee", "ann@x.com"), 1001, "BU")
    }

    #[test]
    fn test_upsert_returns_existing_student_for_known_email() {
        let mut registry = Registry::new();
        let (first, created) = registry.upsert_student(ann());
        assert!(created);

        let other = Student::new(Identity::new("Annie", "Lee", "ann@x.com"), 9, "MIT");
        let (second, created) = registry.upsert_student(other);
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(registry.lookup("ann@x.com").unwrap().identity.firstname, "Ann");
        assert_eq!(registry.student_count(), 1);
    }

    #[test]
    fn test_lookup_unknown_email() {
        let registry = Registry::new();
        assert!(registry.lookup("nobody@x.com").is_none());
    }

    #[test]
    fn test_lecturers_are_people_but_not_students() {
        let mut registry = Registry::new();
        let id = registry.add_lecturer(Lecturer::new(
            Identity::new("Adil", "Khan", "adilkhan@gmail.com"),
            "Professor",
        ));

        assert_eq!(registry.find_person_by_email("adilkhan@gmail.com"), Some(id));
        assert!(registry.lookup("adilkhan@gmail.com").is_none());
        assert!(registry.student(id).is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.student_count(), 0);
    }

    #[test]
    fn test_students_iterate_in_email_order() {
        let mut registry = Registry::new();
        for email in ["zed@x.com", "ann@x.com", "max@x.com"] {
            registry.upsert_student(Student::new(Identity::new("F", "S", email), 1, "BU"));
        }

        let emails: Vec<&str> = registry
            .students()
            .map(|(_, s)| s.identity.email.as_str())
            .collect();
        assert_eq!(emails, vec!["ann@x.com", "max@x.com", "zed@x.com"]);

        let people: Vec<&str> = registry.people().map(|(_, p)| p.email()).collect();
        assert_eq!(people, vec!["zed@x.com", "ann@x.com", "max@x.com"]);
    }
}

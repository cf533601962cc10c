use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a person inside the [`Registry`](crate::core::registry::Registry) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub firstname: String,
    pub surname: String,
    pub email: String,
}

impl Identity {
    pub fn new(firstname: impl Into<String>, surname: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            surname: surname.into(),
            email: email.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.firstname, self.surname, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecturer {
    pub identity: Identity,
    pub academic_title: String,
}

impl Lecturer {
    pub fn new(identity: Identity, academic_title: impl Into<String>) -> Self {
        Self {
            identity,
            academic_title: academic_title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub identity: Identity,
    pub matriculation_number: i32,
    pub university: String,
    /// Course names in registration order.
    pub enrolled_courses: Vec<String>,
}

impl Student {
    pub fn new(identity: Identity, matriculation_number: i32, university: impl Into<String>) -> Self {
        Self {
            identity,
            matriculation_number,
            university: university.into(),
            enrolled_courses: Vec::new(),
        }
    }

    pub fn is_enrolled_in(&self, course_name: &str) -> bool {
        self.enrolled_courses.iter().any(|c| c == course_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Person {
    Lecturer(Lecturer),
    Student(Student),
}

impl Person {
    pub fn identity(&self) -> &Identity {
        match self {
            Person::Lecturer(l) => &l.identity,
            Person::Student(s) => &s.identity,
        }
    }

    pub fn email(&self) -> &str {
        &self.identity().email
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Person::Student(s) => Some(s),
            Person::Lecturer(_) => None,
        }
    }

    pub fn as_lecturer(&self) -> Option<&Lecturer> {
        match self {
            Person::Lecturer(l) => Some(l),
            Person::Student(_) => None,
        }
    }
}

/// A course offering. Participants are ids into the registry, never owned students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub lecturer: PersonId,
    pub participants: Vec<PersonId>,
}

impl Course {
    pub fn new(name: impl Into<String>, lecturer: PersonId) -> Self {
        Self {
            name: name.into(),
            lecturer,
            participants: Vec::new(),
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn has_participant(&self, id: PersonId) -> bool {
        self.participants.contains(&id)
    }
}

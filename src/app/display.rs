use crate::core::catalog::Catalog;
use crate::core::registry::Registry;
use crate::domain::model::{Course, Person, PersonId};

pub fn person_line(person: &Person) -> String {
    match person {
        Person::Lecturer(l) => format!(
            "{} {} {} ({})",
            l.academic_title, l.identity.firstname, l.identity.surname, l.identity.email
        ),
        Person::Student(s) => format!(
            "{} {}, Matric#: {}, University: {}, Email: {}, Enrolled courses: {}",
            s.identity.firstname,
            s.identity.surname,
            s.matriculation_number,
            s.university,
            s.identity.email,
            s.enrolled_courses.join(", ")
        ),
    }
}

fn person_by_id(registry: &Registry, id: PersonId) -> String {
    registry
        .get(id)
        .map(person_line)
        .unwrap_or_else(|| "None".to_string())
}

pub fn course_details(course: &Course, catalog: &Catalog, registry: &Registry) -> String {
    let mut out = format!("Course: {}\n", course.name);
    out.push_str(&format!("Lecturer: {}\n", person_by_id(registry, course.lecturer)));
    out.push_str("Participants:\n");
    if course.participants.is_empty() {
        out.push_str(" None\n");
    }
    for id in &course.participants {
        out.push_str(&format!(" {}\n", person_by_id(registry, *id)));
    }
    if catalog.will_not_run(course) {
        out.push_str(&format!(
            "Course will not take place (less than {} participants).\n",
            catalog.minimum_participants()
        ));
    }
    out
}

pub fn free_places(catalog: &Catalog, registry: &Registry) -> String {
    let mut out = String::from("Courses with free places:\n");
    for open in catalog.list_underbooked() {
        out.push_str(&format!(
            "{}: {} free places, Lecturer: {}\n",
            open.course.name,
            open.free_places,
            person_by_id(registry, open.course.lecturer)
        ));
    }
    out
}

pub fn enrollments(registry: &Registry) -> String {
    let mut out = String::from("Enrolled courses for each student:\n");
    for (_, student) in registry.students() {
        out.push_str(&format!(
            "{}: {}\n",
            student.identity.full_name(),
            student.enrolled_courses.join(", ")
        ));
    }
    out
}

/// Courses that will not take place, with their participants and lecturer.
pub fn cancellation_report(catalog: &Catalog, registry: &Registry) -> String {
    let mut out = format!(
        "Courses not taking place due to low participation (<{} participants):\n",
        catalog.minimum_participants()
    );
    for course in catalog.cancelled() {
        out.push_str(&format!("{}:\n", course.name));
        for id in &course.participants {
            out.push_str(&format!(" {}\n", person_by_id(registry, *id)));
        }
        out.push_str(&format!("Lecturer: {}\n", person_by_id(registry, course.lecturer)));
    }
    out
}

//! Line codec for `students.txt` and `courses.txt`.
//!
//! Each line is five `|`-terminated fields followed by a `,`-terminated list:
//!
//! ```text
//! firstname|surname|email|matriculation_number|university|course1,course2,
//! course_name|firstname|surname|email|academic_title|participant1,participant2,
//! ```
//!
//! Fields are never quoted or escaped; request validation keeps `|` and `,` out of
//! every stored value. Files are decoded line by line from raw bytes, so a line that
//! is not valid UTF-8 is dropped like any other malformed line.

use crate::core::catalog::Catalog;
use crate::core::registry::Registry;
use crate::domain::model::{Course, Identity, Lecturer, Person, Student};
use crate::utils::error::{EnrollError, Result};
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

const FIELD_DELIMITER: u8 = b'|';
const LIST_SEPARATOR: char = ',';
/// Fields before the trailing list; shorter lines are dropped on load.
const RECORD_FIELDS: usize = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    pub loaded: usize,
    pub skipped: usize,
}

pub fn encode_students(registry: &Registry) -> Result<String> {
    let mut writer = record_writer();

    for (_, student) in registry.students() {
        let matriculation = student.matriculation_number.to_string();
        let courses = join_list(student.enrolled_courses.iter().map(String::as_str));
        writer.write_record([
            student.identity.firstname.as_str(),
            student.identity.surname.as_str(),
            student.identity.email.as_str(),
            matriculation.as_str(),
            student.university.as_str(),
            courses.as_str(),
        ])?;
    }

    finish(writer)
}

/// Courses whose lecturer reference does not resolve to a [`Lecturer`] are left out.
pub fn encode_courses(catalog: &Catalog, registry: &Registry) -> Result<String> {
    let mut writer = record_writer();

    for course in catalog.courses() {
        let Some(lecturer) = registry.get(course.lecturer).and_then(Person::as_lecturer) else {
            tracing::debug!("Course '{}' has no lecturer record, not persisted", course.name);
            continue;
        };

        let participants = join_list(
            course
                .participants
                .iter()
                .filter_map(|id| registry.get(*id))
                .map(Person::email),
        );
        writer.write_record([
            course.name.as_str(),
            lecturer.identity.firstname.as_str(),
            lecturer.identity.surname.as_str(),
            lecturer.identity.email.as_str(),
            lecturer.academic_title.as_str(),
            participants.as_str(),
        ])?;
    }

    finish(writer)
}

/// Adds every well-formed student line to `registry`. When an email appears twice
/// the first line wins.
pub fn decode_students(data: &[u8], registry: &mut Registry) -> Result<DecodeSummary> {
    let mut summary = DecodeSummary::default();

    for (line_no, record) in record_reader(data).byte_records().enumerate() {
        let Some(record) = utf8_record(record?) else {
            tracing::debug!("students: skipping line {} with invalid UTF-8", line_no + 1);
            summary.skipped += 1;
            continue;
        };
        let Some((fields, list)) = split_record(&record) else {
            tracing::debug!("students: skipping malformed line {}", line_no + 1);
            summary.skipped += 1;
            continue;
        };

        let Ok(matriculation_number) = fields[3].trim().parse::<i32>() else {
            tracing::debug!(
                "students: skipping line {} with matriculation number '{}'",
                line_no + 1,
                fields[3]
            );
            summary.skipped += 1;
            continue;
        };

        let mut student = Student::new(
            Identity::new(fields[0], fields[1], fields[2]),
            matriculation_number,
            fields[4],
        );
        student.enrolled_courses = split_list(list).map(str::to_string).collect();

        let (_, created) = registry.upsert_student(student);
        if created {
            summary.loaded += 1;
        } else {
            tracing::debug!("students: duplicate email '{}' on line {}", fields[2], line_no + 1);
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

/// Merges every well-formed course line into `catalog`.
///
/// The lecturer is matched by email against everyone already in `registry`; an
/// unknown email registers a new [`Lecturer`] from the stored fields. Participant
/// emails that are not known students are dropped.
pub fn decode_courses(
    data: &[u8],
    registry: &mut Registry,
    catalog: &mut Catalog,
) -> Result<DecodeSummary> {
    let mut summary = DecodeSummary::default();

    for (line_no, record) in record_reader(data).byte_records().enumerate() {
        let Some(record) = utf8_record(record?) else {
            tracing::debug!("courses: skipping line {} with invalid UTF-8", line_no + 1);
            summary.skipped += 1;
            continue;
        };
        let Some((fields, list)) = split_record(&record) else {
            tracing::debug!("courses: skipping malformed line {}", line_no + 1);
            summary.skipped += 1;
            continue;
        };

        let lecturer = match registry.find_person_by_email(fields[3]) {
            Some(id) => id,
            None => registry.add_lecturer(Lecturer::new(
                Identity::new(fields[1], fields[2], fields[3]),
                fields[4],
            )),
        };

        let mut course = Course::new(fields[0], lecturer);
        for email in split_list(list) {
            match registry.student_id(email) {
                Some(id) => course.participants.push(id),
                None => tracing::debug!(
                    "courses: '{}' lists unknown participant '{}'",
                    fields[0],
                    email
                ),
            }
        }

        catalog.merge_course(course);
        summary.loaded += 1;
    }

    Ok(summary)
}

fn record_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn record_reader(data: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(data)
}

fn utf8_record(record: ByteRecord) -> Option<StringRecord> {
    StringRecord::from_byte_record(record).ok()
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| EnrollError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| EnrollError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Splits a record into its leading fields and the trailing list segment.
fn split_record(record: &StringRecord) -> Option<([&str; RECORD_FIELDS], &str)> {
    if record.len() <= RECORD_FIELDS {
        return None;
    }

    let mut fields = [""; RECORD_FIELDS];
    for (slot, value) in fields.iter_mut().zip(record.iter()) {
        *slot = value;
    }
    let list = record.get(record.len() - 1).unwrap_or_default();
    Some((fields, list))
}

fn join_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.fold(String::new(), |mut out, item| {
        out.push_str(item);
        out.push(LIST_SEPARATOR);
        out
    })
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(LIST_SEPARATOR).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::EnrollmentPolicy;

    fn seeded() -> (Registry, Catalog) {
        let mut registry = Registry::new();
        let catalog = Catalog::seeded(&mut registry, &EnrollmentPolicy::default());
        (registry, catalog)
    }

    #[test]
    fn test_encode_students_line_format() {
        let mut registry = Registry::new();
        let mut ann = Student::new(Identity::new("Ann", "Lee", "ann@x.com"), 1001, "BU");
        ann.enrolled_courses = vec!["Programming".to_string(), "Databases".to_string()];
        registry.upsert_student(ann);
        registry.upsert_student(Student::new(Identity::new("Bo", "Ng", "bo@x.com"), 7, "MIT"));

        let text = encode_students(&registry).unwrap();
        assert_eq!(
            text,
            "Ann|Lee|ann@x.com|1001|BU|Programming,Databases,\nBo|Ng|bo@x.com|7|MIT|\n"
        );
    }

    #[test]
    fn test_encode_courses_line_format() {
        let (mut registry, mut catalog) = seeded();
        let (ann, _) = registry.upsert_student(Student::new(
            Identity::new("Ann", "Lee", "ann@x.com"),
            1001,
            "BU",
        ));
        catalog.get_mut_by_index(0).unwrap().participants.push(ann);

        let text = encode_courses(&catalog, &registry).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Programming|Adil|Khan|adilkhan@gmail.com|Professor|ann@x.com,"
        );
        assert_eq!(
            lines[2],
            "Software Engineering|Sohail|Akhtar|sohailakhtar@gmail.com|Researcher|"
        );
    }

    #[test]
    fn test_encode_courses_skips_non_lecturer() {
        let (mut registry, mut catalog) = seeded();
        let (student, _) = registry.upsert_student(Student::new(
            Identity::new("Ann", "Lee", "ann@x.com"),
            1001,
            "BU",
        ));
        catalog.get_mut_by_index(1).unwrap().lecturer = student;

        let text = encode_courses(&catalog, &registry).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("Databases"));
    }

    #[test]
    fn test_decode_students_skips_short_lines() {
        let text = "Ann|Lee|ann@x.com|1001|BU|Programming,\n\
                    broken|line|only\n\
                    Bo|Ng|bo@x.com|7|MIT|Databases,\n";
        let mut registry = Registry::new();

        let summary = decode_students(text.as_bytes(), &mut registry).unwrap();
        assert_eq!(summary, DecodeSummary { loaded: 2, skipped: 1 });
        assert_eq!(registry.lookup("bo@x.com").unwrap().enrolled_courses, vec!["Databases"]);
    }

    #[test]
    fn test_decode_students_line_without_trailing_list_is_malformed() {
        let mut registry = Registry::new();
        let summary = decode_students(b"Ann|Lee|ann@x.com|1001|BU\n", &mut registry).unwrap();
        assert_eq!(summary.loaded, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_decode_students_ignores_empty_course_tokens() {
        let mut registry = Registry::new();
        decode_students(b"Ann|Lee|ann@x.com|1001|BU|,Programming,,Databases,\n", &mut registry)
            .unwrap();
        assert_eq!(
            registry.lookup("ann@x.com").unwrap().enrolled_courses,
            vec!["Programming", "Databases"]
        );
    }

    #[test]
    fn test_decode_students_skips_bad_matriculation_number() {
        let mut registry = Registry::new();
        let summary =
            decode_students(b"Ann|Lee|ann@x.com|abc|BU|\nBo|Ng|bo@x.com|7|MIT|\n", &mut registry)
                .unwrap();
        assert_eq!(summary, DecodeSummary { loaded: 1, skipped: 1 });
        assert!(registry.lookup("ann@x.com").is_none());
    }

    #[test]
    fn test_decode_students_accepts_negative_matriculation_number() {
        let mut registry = Registry::new();
        let summary = decode_students(b"Ann|Lee|ann@x.com|-7|BU|\n", &mut registry).unwrap();
        assert_eq!(summary.loaded, 1);
        assert_eq!(registry.lookup("ann@x.com").unwrap().matriculation_number, -7);
        assert_eq!(encode_students(&registry).unwrap(), "Ann|Lee|ann@x.com|-7|BU|\n");
    }

    #[test]
    fn test_decode_students_skips_invalid_utf8_line() {
        let data = b"Ann|Lee|ann@x.com|1001|BU|\nB\xffo|Ng|bo@x.com|7|MIT|\nCy|Li|cy@x.com|8|BU|\n";
        let mut registry = Registry::new();

        let summary = decode_students(data, &mut registry).unwrap();
        assert_eq!(summary, DecodeSummary { loaded: 2, skipped: 1 });
        assert!(registry.lookup("bo@x.com").is_none());
        assert!(registry.lookup("cy@x.com").is_some());
    }

    #[test]
    fn test_decode_courses_reuses_known_lecturer_and_drops_unknown_participants() {
        let (mut registry, mut catalog) = seeded();
        decode_students(b"Ann|Lee|ann@x.com|1001|BU|Programming,\n", &mut registry).unwrap();
        let people_before = registry.len();

        let text = "Programming|Adil|Khan|adilkhan@gmail.com|Professor|ann@x.com,ghost@x.com,\n";
        let summary = decode_courses(text.as_bytes(), &mut registry, &mut catalog).unwrap();

        assert_eq!(summary.loaded, 1);
        assert_eq!(registry.len(), people_before);
        assert_eq!(catalog.len(), 3);
        let programming = catalog.get_by_index(0).unwrap();
        assert_eq!(programming.participants, vec![registry.student_id("ann@x.com").unwrap()]);
    }

    #[test]
    fn test_decode_courses_fabricates_unknown_lecturer() {
        let (mut registry, mut catalog) = seeded();

        let text = "Networks|Sara|Malik|sara@uni.edu|Lecturer|\n";
        decode_courses(text.as_bytes(), &mut registry, &mut catalog).unwrap();

        assert_eq!(catalog.len(), 4);
        let networks = catalog.get_by_index(3).unwrap();
        let lecturer = registry.get(networks.lecturer).unwrap().as_lecturer().unwrap();
        assert_eq!(lecturer.academic_title, "Lecturer");
        assert_eq!(registry.find_person_by_email("sara@uni.edu"), Some(networks.lecturer));
    }

    #[test]
    fn test_decode_courses_skips_invalid_utf8_line() {
        let (mut registry, mut catalog) = seeded();

        let data = b"Old\xffCourse|Sara|Malik|sara@uni.edu|Lecturer|\n\
                     Networks|Sara|Malik|sara@uni.edu|Lecturer|\n";
        let summary = decode_courses(data, &mut registry, &mut catalog).unwrap();

        assert_eq!(summary, DecodeSummary { loaded: 1, skipped: 1 });
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get_by_index(3).unwrap().name, "Networks");
    }
}

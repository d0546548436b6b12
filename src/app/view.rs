//! Presentation of the document: structured JSON dumps, aligned tables and CSV.

use crate::core::store;
use crate::domain::model::{CourseId, Document, StudentId};
use crate::utils::error::{RegistrarError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    #[default]
    Json,
    Table,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewTarget {
    Students,
    Courses,
    Registrations,
}

pub fn render(document: &Document, target: ViewTarget, format: ViewFormat) -> Result<String> {
    match format {
        ViewFormat::Json => render_json(document, target),
        ViewFormat::Table => {
            let (headers, rows) = rows(document, target);
            Ok(render_table(&headers, &rows))
        }
        ViewFormat::Csv => {
            let (headers, rows) = rows(document, target);
            render_csv(&headers, &rows)
        }
    }
}

fn render_json(document: &Document, target: ViewTarget) -> Result<String> {
    let text = match target {
        ViewTarget::Students => serde_json::to_string_pretty(&document.students)?,
        ViewTarget::Courses => serde_json::to_string_pretty(&document.courses)?,
        ViewTarget::Registrations => serde_json::to_string_pretty(&document.enrollments)?,
    };
    Ok(text)
}

fn rows(document: &Document, target: ViewTarget) -> (Vec<&'static str>, Vec<Vec<String>>) {
    match target {
        ViewTarget::Students => (
            vec!["id", "name"],
            document
                .students
                .iter()
                .map(|(id, s)| vec![id.to_string(), s.name.clone()])
                .collect(),
        ),
        ViewTarget::Courses => (
            vec!["id", "name", "course_number", "instructor", "num_seats"],
            document
                .courses
                .iter()
                .map(|(id, c)| {
                    vec![
                        id.to_string(),
                        c.name.clone(),
                        c.course_number.to_string(),
                        c.instructor.clone(),
                        c.num_seats.to_string(),
                    ]
                })
                .collect(),
        ),
        ViewTarget::Registrations => (
            vec!["student_id", "course_id"],
            document
                .enrollments
                .iter()
                .map(|e| vec![e.student_id.to_string(), e.course_id.to_string()])
                .collect(),
        ),
    }
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(headers.to_vec())];
    lines.extend(
        rows.iter()
            .map(|row| format_line(row.iter().map(String::as_str).collect())),
    );
    lines.join("\n")
}

fn render_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| RegistrarError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).trim_end().to_string())
}

/// A student with the ids of the courses they are registered in, or `{}` when absent.
pub fn render_student_detail(document: &Document, student_id: StudentId) -> Result<String> {
    let value = match store::get_student(student_id, &document.students) {
        Some(student) => json!({
            "id": student_id,
            "name": student.name,
            "courses": store::get_courses_for_student(student_id, &document.enrollments),
        }),
        None => json!({}),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// A course with the ids of its registered students, or `{}` when absent.
pub fn render_course_detail(document: &Document, course_id: CourseId) -> Result<String> {
    let value = match store::get_course(course_id, &document.courses) {
        Some(course) => json!({
            "id": course_id,
            "name": course.name,
            "course_number": course.course_number,
            "instructor": course.instructor,
            "num_seats": course.num_seats,
            "students": store::get_students_for_course(course_id, &document.enrollments),
        }),
        None => json!({}),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::default();
        store::add_student("Alice", &mut doc.students).unwrap();
        store::add_student("Bob Smith", &mut doc.students).unwrap();
        store::add_course("Math 101", 101, "Prof. Smith", 30, &mut doc.courses).unwrap();
        store::add_enrollment(2, 1, &mut doc.enrollments, &doc.students, &doc.courses).unwrap();
        doc
    }

    #[test]
    fn test_json_view_uses_string_keys() {
        let text = render(&sample(), ViewTarget::Students, ViewFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["2"]["name"], "Bob Smith");
        assert!(text.starts_with("{\n  \""));
    }

    #[test]
    fn test_table_view_aligns_columns() {
        let text = render(&sample(), ViewTarget::Students, ViewFormat::Table).unwrap();
        assert_eq!(text, "id  name\n1   Alice\n2   Bob Smith");
    }

    #[test]
    fn test_table_view_of_empty_collection_is_header_only() {
        let text = render(&Document::default(), ViewTarget::Registrations, ViewFormat::Table).unwrap();
        assert_eq!(text, "student_id  course_id");
    }

    #[test]
    fn test_csv_view_quotes_when_needed() {
        let mut doc = sample();
        store::add_course("Intro, Part 2", 102, "Dr. X", 10, &mut doc.courses).unwrap();
        let text = render(&doc, ViewTarget::Courses, ViewFormat::Csv).unwrap();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "id,name,course_number,instructor,num_seats");
        assert_eq!(lines[1], "1,Math 101,101,Prof. Smith,30");
        assert_eq!(lines[2], "2,\"Intro, Part 2\",102,Dr. X,10");
    }

    #[test]
    fn test_registrations_json_view() {
        let text = render(&sample(), ViewTarget::Registrations, ViewFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!([{"student_id": 2, "course_id": 1}]));
    }

    #[test]
    fn test_detail_views() {
        let doc = sample();

        let student: serde_json::Value =
            serde_json::from_str(&render_student_detail(&doc, 2).unwrap()).unwrap();
        assert_eq!(student, json!({"id": 2, "name": "Bob Smith", "courses": [1]}));

        let course: serde_json::Value =
            serde_json::from_str(&render_course_detail(&doc, 1).unwrap()).unwrap();
        assert_eq!(course["students"], json!([2]));

        assert_eq!(render_student_detail(&doc, 9).unwrap(), "{}");
    }
}

use crate::app::view::{self, ViewFormat};
use crate::config::cli::Command;
use crate::core::store;
use crate::domain::model::Document;
use crate::utils::error::Result;

/// Applies one command to the document and returns what to print on stdout.
pub fn execute(command: &Command, document: &mut Document, default_format: ViewFormat) -> Result<String> {
    tracing::debug!("Executing {:?}", command);

    match command {
        Command::View { target, format } => {
            view::render(document, *target, format.unwrap_or(default_format))
        }
        Command::AddStudent { name } => {
            let student_id = store::add_student(name, &mut document.students)?;
            tracing::info!("➕ Added student {} ({})", student_id, name);
            Ok(format!("Added student: {} (ID {})", name, student_id))
        }
        Command::AddCourse {
            name,
            course_number,
            instructor,
            num_seats,
        } => {
            let course_id = store::add_course(
                name,
                *course_number,
                instructor,
                *num_seats,
                &mut document.courses,
            )?;
            tracing::info!("➕ Added course {} ({})", course_id, name);
            Ok(format!("Added course: {} (ID {})", name, course_id))
        }
        Command::AddRegistration {
            student_id,
            course_id,
        } => {
            store::add_enrollment(
                *student_id,
                *course_id,
                &mut document.enrollments,
                &document.students,
                &document.courses,
            )?;
            Ok(format!(
                "Added registration for student ID {} to course ID {}",
                student_id, course_id
            ))
        }
        Command::RemoveStudent { student_id } => {
            let student =
                store::remove_student(*student_id, &mut document.students, &mut document.enrollments)?;
            tracing::info!("➖ Removed student {} ({})", student_id, student.name);
            Ok(format!("Removed student ID {}", student_id))
        }
        Command::RemoveCourse { course_id } => {
            let course =
                store::remove_course(*course_id, &mut document.courses, &mut document.enrollments)?;
            tracing::info!("➖ Removed course {} ({})", course_id, course.name);
            Ok(format!("Removed course ID {}", course_id))
        }
        Command::RemoveRegistration {
            student_id,
            course_id,
        } => {
            let removed = store::remove_enrollment(*student_id, *course_id, &mut document.enrollments);
            if removed == 0 {
                tracing::debug!("No registration matched ({}, {})", student_id, course_id);
                return Ok(format!(
                    "No registration for student ID {} in course ID {}",
                    student_id, course_id
                ));
            }
            Ok(format!(
                "Removed registration for student ID {} from course ID {}",
                student_id, course_id
            ))
        }
        Command::ShowStudent { student_id } => view::render_student_detail(document, *student_id),
        Command::ShowCourse { course_id } => view::render_course_detail(document, *course_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::ViewTarget;
    use crate::utils::error::RegistrarError;

    fn run(command: Command, doc: &mut Document) -> Result<String> {
        execute(&command, doc, ViewFormat::Json)
    }

    #[test]
    fn test_add_commands_report_new_ids() {
        let mut doc = Document::default();

        let out = run(
            Command::AddStudent {
                name: "Jane Doe".to_string(),
            },
            &mut doc,
        )
        .unwrap();
        assert_eq!(out, "Added student: Jane Doe (ID 1)");

        let out = run(
            Command::AddCourse {
                name: "Math 101".to_string(),
                course_number: 101,
                instructor: "Prof. Smith".to_string(),
                num_seats: 30,
            },
            &mut doc,
        )
        .unwrap();
        assert_eq!(out, "Added course: Math 101 (ID 1)");
    }

    #[test]
    fn test_bad_registration_is_an_error_without_mutation() {
        let mut doc = Document::default();
        let err = run(
            Command::AddRegistration {
                student_id: 1,
                course_id: 1,
            },
            &mut doc,
        )
        .unwrap_err();

        assert!(matches!(err, RegistrarError::InvalidReference { .. }));
        assert_eq!(err.exit_code(), 0);
        assert!(doc.enrollments.is_empty());
    }

    #[test]
    fn test_remove_registration_without_match_is_not_an_error() {
        let mut doc = Document::default();
        let out = run(
            Command::RemoveRegistration {
                student_id: 4,
                course_id: 2,
            },
            &mut doc,
        )
        .unwrap();
        assert_eq!(out, "No registration for student ID 4 in course ID 2");
    }

    #[test]
    fn test_view_falls_back_to_default_format() {
        let mut doc = Document::default();
        store::add_student("Alice", &mut doc.students).unwrap();

        let command = Command::View {
            target: ViewTarget::Students,
            format: None,
        };
        let out = execute(&command, &mut doc, ViewFormat::Csv).unwrap();
        assert_eq!(out, "id,name\n1,Alice");
    }

    #[test]
    fn test_remove_missing_student_reports_not_found() {
        let mut doc = Document::default();
        let err = run(Command::RemoveStudent { student_id: 3 }, &mut doc).unwrap_err();
        assert_eq!(err.user_friendly_message(), "Student ID 3 not found.");
    }
}

use anyhow::Result;
use registrar::core::store;
use registrar::{Document, Enrollment, JsonFileStorage, RegistrarError, Session, Storage};
use tempfile::TempDir;

fn storage_in(temp_dir: &TempDir) -> JsonFileStorage {
    JsonFileStorage::new(temp_dir.path().join("data").join("database.json"))
}

/// 從空資料庫開始的完整流程，每一步都經過檔案
#[test]
fn test_walkthrough_persists_between_sessions() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let student_id = Session::run(storage_in(&temp_dir), |doc| {
        store::add_student("Alice", &mut doc.students)
    })?;
    assert_eq!(student_id, 1);

    let course_id = Session::run(storage_in(&temp_dir), |doc| {
        store::add_course("CS1", 101, "Dr. X", 20, &mut doc.courses)
    })?;
    assert_eq!(course_id, 1);

    Session::run(storage_in(&temp_dir), |doc| {
        store::add_enrollment(1, 1, &mut doc.enrollments, &doc.students, &doc.courses)
    })?;

    let doc = storage_in(&temp_dir).load()?;
    assert_eq!(store::get_student(1, &doc.students).map(|s| s.name.as_str()), Some("Alice"));
    assert_eq!(
        doc.enrollments,
        vec![Enrollment {
            student_id: 1,
            course_id: 1
        }]
    );
    assert_eq!(store::get_courses_for_student(1, &doc.enrollments), vec![1]);

    Session::run(storage_in(&temp_dir), |doc| {
        store::remove_student(1, &mut doc.students, &mut doc.enrollments).map(|_| ())
    })?;

    let doc = storage_in(&temp_dir).load()?;
    assert!(doc.students.is_empty());
    assert!(doc.enrollments.is_empty());
    assert_eq!(doc.courses.len(), 1);

    println!("✅ Walkthrough test passed!");
    Ok(())
}

#[test]
fn test_failed_command_still_saves_earlier_mutations() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let result = Session::run(storage_in(&temp_dir), |doc| {
        store::add_student("John Doe", &mut doc.students)?;
        store::add_enrollment(1, 7, &mut doc.enrollments, &doc.students, &doc.courses)
    });
    assert!(matches!(result, Err(RegistrarError::InvalidReference { .. })));

    let doc = storage_in(&temp_dir).load()?;
    assert_eq!(doc.students.len(), 1);
    assert!(doc.enrollments.is_empty());
    Ok(())
}

#[test]
fn test_corrupt_database_blocks_the_session_and_keeps_the_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    std::fs::create_dir_all(temp_dir.path().join("data"))?;
    std::fs::write(storage.path(), "{\"students\": [")?;

    let result = Session::run(storage.clone(), |doc| {
        store::add_student("Never saved", &mut doc.students)
    });
    assert!(matches!(result, Err(RegistrarError::DecodeError { .. })));
    assert_eq!(std::fs::read_to_string(storage.path())?, "{\"students\": [");
    Ok(())
}

#[test]
fn test_legacy_file_with_string_keys_loads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    std::fs::create_dir_all(temp_dir.path().join("data"))?;
    std::fs::write(
        storage.path(),
        r#"{"students": {"3": {"name": "Carol"}}, "courses": {}, "registrations": []}"#,
    )?;

    let mut session = Session::open(storage.clone())?;
    assert_eq!(session.students[&3].name, "Carol");
    assert_eq!(store::add_student("Dave", &mut session.students)?, 4);
    session.close()?;

    let doc: Document = storage.load()?;
    assert_eq!(doc.students.len(), 2);
    Ok(())
}

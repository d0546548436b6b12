//! Record operations over the document's collections.
//!
//! Each function mutates only the collections it is handed. Enrollments always
//! point at existing students and courses: `add_enrollment` checks both ids and
//! the remove functions cascade.

use crate::domain::model::{
    Course, CourseId, Courses, Enrollment, Student, StudentId, Students,
};
use crate::utils::error::{RegistrarError, Result};
use std::collections::BTreeMap;

/// One past the highest id in use. Fails instead of wrapping when `u64::MAX` is taken.
fn next_id<V>(entries: &BTreeMap<u64, V>, collection: &'static str) -> Result<u64> {
    let last_id = entries.keys().next_back().copied().unwrap_or(0);
    last_id
        .checked_add(1)
        .ok_or(RegistrarError::IdSpaceExhausted {
            collection,
            last_id,
        })
}

pub fn add_student(name: &str, students: &mut Students) -> Result<StudentId> {
    let student_id = next_id(students, "students")?;
    students.insert(
        student_id,
        Student {
            name: name.to_string(),
        },
    );
    tracing::debug!("Added student {} ({})", student_id, name);
    Ok(student_id)
}

pub fn add_course(
    name: &str,
    course_number: i64,
    instructor: &str,
    num_seats: i64,
    courses: &mut Courses,
) -> Result<CourseId> {
    let course_id = next_id(courses, "courses")?;
    courses.insert(
        course_id,
        Course {
            name: name.to_string(),
            course_number,
            instructor: instructor.to_string(),
            num_seats,
        },
    );
    tracing::debug!("Added course {} ({})", course_id, name);
    Ok(course_id)
}

pub fn add_enrollment(
    student_id: StudentId,
    course_id: CourseId,
    enrollments: &mut Vec<Enrollment>,
    students: &Students,
    courses: &Courses,
) -> Result<()> {
    if !students.contains_key(&student_id) || !courses.contains_key(&course_id) {
        return Err(RegistrarError::InvalidReference {
            student_id,
            course_id,
        });
    }

    enrollments.push(Enrollment {
        student_id,
        course_id,
    });
    tracing::debug!("Enrolled student {} in course {}", student_id, course_id);
    Ok(())
}

/// Removes the student and every enrollment that references it.
pub fn remove_student(
    student_id: StudentId,
    students: &mut Students,
    enrollments: &mut Vec<Enrollment>,
) -> Result<Student> {
    let student = students
        .remove(&student_id)
        .ok_or(RegistrarError::StudentNotFound { student_id })?;

    let before = enrollments.len();
    enrollments.retain(|e| e.student_id != student_id);
    tracing::debug!(
        "Removed student {} and {} enrollment(s)",
        student_id,
        before - enrollments.len()
    );
    Ok(student)
}

/// Removes the course and every enrollment that references it.
pub fn remove_course(
    course_id: CourseId,
    courses: &mut Courses,
    enrollments: &mut Vec<Enrollment>,
) -> Result<Course> {
    let course = courses
        .remove(&course_id)
        .ok_or(RegistrarError::CourseNotFound { course_id })?;

    let before = enrollments.len();
    enrollments.retain(|e| e.course_id != course_id);
    tracing::debug!(
        "Removed course {} and {} enrollment(s)",
        course_id,
        before - enrollments.len()
    );
    Ok(course)
}

/// Drops every enrollment matching the pair and returns how many went. No match is not an error.
pub fn remove_enrollment(
    student_id: StudentId,
    course_id: CourseId,
    enrollments: &mut Vec<Enrollment>,
) -> usize {
    let before = enrollments.len();
    enrollments.retain(|e| !(e.student_id == student_id && e.course_id == course_id));
    before - enrollments.len()
}

pub fn get_student(student_id: StudentId, students: &Students) -> Option<&Student> {
    students.get(&student_id)
}

pub fn get_course(course_id: CourseId, courses: &Courses) -> Option<&Course> {
    courses.get(&course_id)
}

pub fn get_courses_for_student(student_id: StudentId, enrollments: &[Enrollment]) -> Vec<CourseId> {
    enrollments
        .iter()
        .filter(|e| e.student_id == student_id)
        .map(|e| e.course_id)
        .collect()
}

pub fn get_students_for_course(course_id: CourseId, enrollments: &[Enrollment]) -> Vec<StudentId> {
    enrollments
        .iter()
        .filter(|e| e.course_id == course_id)
        .map(|e| e.student_id)
        .collect()
}

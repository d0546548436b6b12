use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type StudentId = u64;
pub type CourseId = u64;

/// Integer-keyed in memory; serde_json writes the keys as strings and parses them back.
pub type Students = BTreeMap<StudentId, Student>;
pub type Courses = BTreeMap<CourseId, Course>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub course_number: i64,
    pub instructor: String,
    pub num_seats: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
}

/// The whole database. Persisted under the keys `students`, `courses` and `registrations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub students: Students,
    #[serde(default)]
    pub courses: Courses,
    #[serde(default, rename = "registrations")]
    pub enrollments: Vec<Enrollment>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty() && self.enrollments.is_empty()
    }
}

use crate::app::view::{ViewFormat, ViewTarget};
use crate::domain::model::{CourseId, StudentId};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "registrar")]
#[command(about = "Interact with the student database")]
pub struct Cli {
    /// Path to a TOML configuration file (defaults to ./registrar.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides database.path from the configuration
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
#[command(rename_all = "snake_case")]
pub enum Command {
    /// View students, courses, or registrations
    View {
        /// Type of data to view
        #[arg(value_enum)]
        target: ViewTarget,

        /// Output format, defaults to display.format from the configuration
        #[arg(short, long, value_enum)]
        format: Option<ViewFormat>,
    },

    /// Add a student
    AddStudent {
        /// Name of the student
        name: String,
    },

    /// Add a course
    AddCourse {
        /// Name of the course
        name: String,
        /// Course number
        #[arg(allow_negative_numbers = true)]
        course_number: i64,
        /// Instructor name
        instructor: String,
        /// Number of seats
        #[arg(allow_negative_numbers = true)]
        num_seats: i64,
    },

    /// Add a registration
    AddRegistration {
        /// Student ID
        student_id: StudentId,
        /// Course ID
        course_id: CourseId,
    },

    /// Remove a student and their registrations
    RemoveStudent {
        /// Student ID to remove
        student_id: StudentId,
    },

    /// Remove a course and its registrations
    RemoveCourse {
        /// Course ID to remove
        course_id: CourseId,
    },

    /// Remove a registration
    RemoveRegistration {
        /// Student ID
        student_id: StudentId,
        /// Course ID
        course_id: CourseId,
    },

    /// Show one student with the courses they are registered in
    ShowStudent {
        /// Student ID
        student_id: StudentId,
    },

    /// Show one course with its registered students
    ShowCourse {
        /// Course ID
        course_id: CourseId,
    },
}

impl Validate for Cli {
    fn validate(&self) -> Result<()> {
        // Record fields are free text; add_student and add_course accept any name.
        if let Some(database) = &self.database {
            validate_path("--database", database)?;
        }
        Ok(())
    }
}

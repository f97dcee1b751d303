//! Per-student attendance entry for one session.
//!
//! Every toggle is submitted on its own, so each row carries its own
//! status: `Unmarked | Failed -> Submitting -> Saved | Failed`. A saved row
//! stays locked until the view is opened again.

use std::time::Duration;

use dto::attendance::CreateAttendanceDto;
use dto::student::StudentDto;
use thiserror::Error;

use crate::services::error::Failure;

/// Pause between the last row being saved and the view closing.
pub const COMPLETION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowStatus {
    Unmarked,
    Submitting,
    Saved,
    Failed(String),
}

impl RowStatus {
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Unmarked | Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    pub student: StudentDto,
    pub present: bool,
    pub status: RowStatus,
    attempt: u32,
}

impl AttendanceRow {
    fn new(student: StudentDto) -> Self {
        Self {
            student,
            present: false,
            status: RowStatus::Unmarked,
            attempt: 0,
        }
    }
}

/// One write to send, tagged with the attempt it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub student_id: String,
    pub attempt: u32,
    pub body: CreateAttendanceDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceError {
    #[error("no roster is loaded")]
    NoRoster,
    #[error("student {0} is not on this roster")]
    UnknownStudent(String),
    #[error("attendance for {0} is already saved")]
    AlreadySaved(String),
    #[error("attendance for {0} is still being saved")]
    Busy(String),
    #[error("the group has no professor id, attendance cannot be recorded")]
    MissingProfessor,
    #[error("student {name} ({id}) has no student-group id")]
    MissingStudentGroup { id: String, name: String },
}

impl From<AttendanceError> for Failure {
    fn from(error: AttendanceError) -> Self {
        Failure::validation(error.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSheet {
    session_id: String,
    professor_id: Option<String>,
    rows: Vec<AttendanceRow>,
}

impl AttendanceSheet {
    /// All students start absent and unmarked.
    pub fn new(
        session_id: impl Into<String>,
        professor_id: Option<String>,
        students: Vec<StudentDto>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            professor_id: professor_id.filter(|id| !id.trim().is_empty()),
            rows: students.into_iter().map(AttendanceRow::new).collect(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    pub fn row(&self, student_id: &str) -> Option<&AttendanceRow> {
        self.rows.iter().find(|row| row.student.id == student_id)
    }

    /// Rows whose student matches the search term, in roster order.
    pub fn filtered(&self, term: &str) -> Vec<AttendanceRow> {
        self.rows
            .iter()
            .filter(|row| row.student.matches(term))
            .cloned()
            .collect()
    }

    /// Marks a student and hands back the write to send. Nothing changes
    /// when an error is returned.
    pub fn toggle(&mut self, student_id: &str, present: bool) -> Result<Submission, AttendanceError> {
        let session = self.session_id.clone();
        let professor = self.professor_id.clone();
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.student.id == student_id)
            .ok_or_else(|| AttendanceError::UnknownStudent(student_id.to_string()))?;

        match row.status {
            RowStatus::Saved => return Err(AttendanceError::AlreadySaved(row.student.full_name.clone())),
            RowStatus::Submitting => return Err(AttendanceError::Busy(row.student.full_name.clone())),
            RowStatus::Unmarked | RowStatus::Failed(_) => {}
        }

        let professor = professor.ok_or(AttendanceError::MissingProfessor)?;
        let student_group = row
            .student
            .student_group_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AttendanceError::MissingStudentGroup {
                id: row.student.id.clone(),
                name: row.student.full_name.clone(),
            })?;

        row.present = present;
        row.status = RowStatus::Submitting;
        row.attempt += 1;

        Ok(Submission {
            student_id: row.student.id.clone(),
            attempt: row.attempt,
            body: CreateAttendanceDto {
                session,
                professor,
                student_group,
                present,
            },
        })
    }

    /// Applies the outcome of a write. Returns `false` when the submission
    /// is not the row's latest attempt.
    pub fn resolve(&mut self, submission: &Submission, result: Result<(), Failure>) -> bool {
        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.student.id == submission.student_id)
        else {
            return false;
        };

        if row.attempt != submission.attempt || row.status != RowStatus::Submitting {
            return false;
        }

        row.status = match result {
            Ok(()) => RowStatus::Saved,
            Err(failure) => RowStatus::Failed(failure.message),
        };
        true
    }

    /// True once every row is saved. An empty roster never completes.
    pub fn is_complete(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|row| row.status == RowStatus::Saved)
    }

    pub fn counts(&self) -> AttendanceCounts {
        let total = self.rows.len();
        let present = self.rows.iter().filter(|row| row.present).count();
        AttendanceCounts {
            total,
            present,
            absent: total - present,
        }
    }
}

//! Navigation from the group list into a group's sessions and from there
//! into attendance entry for one session.
//!
//! [`DrillDown`] is owned by the groups page. Transitions that need data
//! hand back a [`FetchRequest`]; the caller performs the request and feeds
//! the result to `apply_*`. Each transition bumps an epoch, so a result
//! that arrives after the user navigated elsewhere is recognised and
//! dropped instead of overwriting the newer view.

use dto::group::GroupDto;
use dto::session::SessionDto;
use dto::student::StudentDto;
use leptos::logging::log;
use thiserror::Error;

use crate::services::error::Failure;
use crate::state::attendance::{AttendanceError, AttendanceSheet, Submission};
use crate::state::load::Load;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Sessions { group_id: String },
    Roster { group_id: String, session_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub epoch: u64,
    pub target: FetchTarget,
}

/// An attendance write together with the view it was issued from.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMark {
    pub epoch: u64,
    pub submission: Submission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Groups,
    Sessions,
    Attendance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("a session can only be opened from its group")]
    NoGroup,
    #[error("session {session} belongs to group {owner}, not {selected}")]
    ForeignSession {
        session: String,
        owner: String,
        selected: String,
    },
}

/// What the session list should render.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionsView {
    Loading,
    Failed(Failure),
    Empty,
    List(Vec<SessionDto>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrillDown {
    group: Option<GroupDto>,
    session: Option<SessionDto>,
    sessions: Load<Vec<SessionDto>>,
    roster: Load<AttendanceSheet>,
    epoch: u64,
}

impl DrillDown {
    pub fn group(&self) -> Option<&GroupDto> {
        self.group.as_ref()
    }

    pub fn session(&self) -> Option<&SessionDto> {
        self.session.as_ref()
    }

    pub fn sessions(&self) -> &Load<Vec<SessionDto>> {
        &self.sessions
    }

    pub fn roster(&self) -> &Load<AttendanceSheet> {
        &self.roster
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_open(&self) -> bool {
        self.group.is_some()
    }

    pub fn level(&self) -> Level {
        match (&self.group, &self.session) {
            (Some(_), Some(_)) => Level::Attendance,
            (Some(_), None) => Level::Sessions,
            _ => Level::Groups,
        }
    }

    pub fn sessions_view(&self) -> SessionsView {
        match &self.sessions {
            Load::Idle | Load::Loading => SessionsView::Loading,
            Load::Failed(failure) => SessionsView::Failed(failure.clone()),
            Load::Ready(sessions) if sessions.is_empty() => SessionsView::Empty,
            Load::Ready(sessions) => SessionsView::List(sessions.clone()),
        }
    }

    /// Opens a group. Selecting the group that is already open does nothing.
    pub fn select_group(&mut self, group: GroupDto) -> Option<FetchRequest> {
        if self.group.as_ref().is_some_and(|current| current.id == group.id) {
            return None;
        }

        let group_id = group.id.clone();
        self.group = Some(group);
        self.session = None;
        self.sessions = Load::Loading;
        self.roster = Load::Idle;
        Some(self.advance(FetchTarget::Sessions { group_id }))
    }

    /// Opens attendance entry for a session of the current group. Whatever
    /// roster was loaded before is dropped.
    pub fn select_session(&mut self, session: SessionDto) -> Result<FetchRequest, NavigationError> {
        let group_id = self
            .group
            .as_ref()
            .map(|group| group.id.clone())
            .ok_or(NavigationError::NoGroup)?;

        if !session.group_id.is_empty() && session.group_id != group_id {
            return Err(NavigationError::ForeignSession {
                session: session.id,
                owner: session.group_id,
                selected: group_id,
            });
        }

        let session_id = session.id.clone();
        self.session = Some(session);
        self.roster = Load::Loading;
        Ok(self.advance(FetchTarget::Roster {
            group_id,
            session_id,
        }))
    }

    /// One level up: attendance goes back to the session list (keeping the
    /// group), the session list goes back to the groups.
    pub fn go_back(&mut self) -> Level {
        if self.session.is_some() {
            self.session = None;
            self.roster = Load::Idle;
        } else if self.group.is_some() {
            self.group = None;
            self.sessions = Load::Idle;
        }
        self.epoch += 1;
        self.level()
    }

    /// Clears everything. The return value tells the host to dismiss the
    /// dialog.
    pub fn close(&mut self) -> bool {
        *self = Self {
            epoch: self.epoch + 1,
            ..Self::default()
        };
        true
    }

    /// Re-issues the failed fetch of the current level. Navigation is left
    /// as it is; levels that did not fail have nothing to retry.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        match self.level() {
            Level::Groups => None,
            Level::Sessions => {
                self.sessions.failure()?;
                let group_id = self.group.as_ref()?.id.clone();
                self.sessions = Load::Loading;
                Some(self.advance(FetchTarget::Sessions { group_id }))
            }
            Level::Attendance => {
                self.roster.failure()?;
                let group_id = self.group.as_ref()?.id.clone();
                let session_id = self.session.as_ref()?.id.clone();
                self.roster = Load::Loading;
                Some(self.advance(FetchTarget::Roster {
                    group_id,
                    session_id,
                }))
            }
        }
    }

    pub fn apply_sessions(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<SessionDto>, Failure>,
    ) -> bool {
        if !self.accepts(request) || !matches!(request.target, FetchTarget::Sessions { .. }) {
            log!("Dropping stale session list for {:?}", request.target);
            return false;
        }
        self.sessions = Load::from(result);
        true
    }

    pub fn apply_roster(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<StudentDto>, Failure>,
    ) -> bool {
        let FetchTarget::Roster { session_id, .. } = &request.target else {
            return false;
        };
        if !self.accepts(request) {
            log!("Dropping stale roster for {:?}", request.target);
            return false;
        }

        let professor_id = self.group.as_ref().and_then(|group| group.professor_id.clone());
        self.roster = Load::from(
            result.map(|students| AttendanceSheet::new(session_id.clone(), professor_id, students)),
        );
        true
    }

    pub fn toggle_attendance(
        &mut self,
        student_id: &str,
        present: bool,
    ) -> Result<PendingMark, AttendanceError> {
        let epoch = self.epoch;
        let sheet = self.roster.ready_mut().ok_or(AttendanceError::NoRoster)?;
        let submission = sheet.toggle(student_id, present)?;
        Ok(PendingMark { epoch, submission })
    }

    /// Applies a write outcome if the sheet it was issued from is still
    /// the one on screen.
    pub fn resolve_attendance(&mut self, mark: &PendingMark, result: Result<(), Failure>) -> bool {
        if mark.epoch != self.epoch {
            log!(
                "Dropping attendance result for {} from a closed view",
                mark.submission.student_id
            );
            return false;
        }
        match self.roster.ready_mut() {
            Some(sheet) => sheet.resolve(&mark.submission, result),
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.roster.ready().is_some_and(AttendanceSheet::is_complete)
    }

    /// Closes the view once its sheet is complete, unless the user moved on
    /// since `epoch` was read.
    pub fn finish(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || !self.is_complete() {
            return false;
        }
        self.close()
    }

    fn accepts(&self, request: &FetchRequest) -> bool {
        request.epoch == self.epoch
    }

    fn advance(&mut self, target: FetchTarget) -> FetchRequest {
        self.epoch += 1;
        FetchRequest {
            epoch: self.epoch,
            target,
        }
    }
}

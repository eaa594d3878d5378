//! Custom event types for the editor.

use crossterm::event::KeyEvent;

use crate::judge::{JudgeError, SubmissionResult};

/// Events that can occur in the editor application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// A submission reached a terminal status
    RunFinished(SubmissionResult),
    /// Submission or polling failed
    RunFailed(JudgeError),
}

//! Editor session state: the single source of truth for what the user is
//! editing and whether a submission is in flight.

use crate::judge::SubmissionResult;
use crate::languages::{self, Language};

#[derive(Debug)]
pub struct EditorSession {
    pub code: String,
    pub stdin: String,
    pub language: &'static Language,
    pub theme: String,
    /// True from the moment a submission is triggered until it reaches a
    /// terminal status or fails. At most one job is in flight per session.
    pub processing: bool,
    /// Last terminal result, if any.
    pub output: Option<SubmissionResult>,
}

impl EditorSession {
    pub fn new(language: &'static Language, theme: impl Into<String>) -> Self {
        Self {
            code: languages::starter_code(language),
            stdin: String::new(),
            language,
            theme: theme.into(),
            processing: false,
            output: None,
        }
    }

    /// Claim the in-flight slot. Returns false without touching any state
    /// when a submission is already running; the caller must not submit.
    pub fn begin_run(&mut self) -> bool {
        if self.processing {
            return false;
        }
        self.processing = true;
        true
    }

    /// A submission reached a terminal status.
    pub fn finish_run(&mut self, result: SubmissionResult) {
        self.processing = false;
        self.output = Some(result);
    }

    /// A submission or poll failed. The previous result, if any, is left in
    /// place so the user can still see the last successful run.
    pub fn fail_run(&mut self) {
        self.processing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::{StatusMeta, SubmissionResult};

    fn accepted() -> SubmissionResult {
        SubmissionResult {
            status: StatusMeta { id: 3, description: "Accepted".into() },
            stdout: None,
            stderr: None,
            compile_output: None,
            message: None,
            memory: Some(1024),
            time: Some("0.01".into()),
        }
    }

    #[test]
    fn begin_run_rejects_second_submission() {
        let mut session = EditorSession::new(languages::default_language(), "cobalt");
        assert!(session.begin_run());
        // Rapid re-triggers while in flight must all be rejected.
        assert!(!session.begin_run());
        assert!(!session.begin_run());
        assert!(session.processing);
    }

    #[test]
    fn finish_run_clears_processing_and_stores_result() {
        let mut session = EditorSession::new(languages::default_language(), "cobalt");
        assert!(session.begin_run());
        session.finish_run(accepted());
        assert!(!session.processing);
        assert_eq!(session.output.as_ref().map(|r| r.status.id), Some(3));
        // A new submission is possible again.
        assert!(session.begin_run());
    }

    #[test]
    fn fail_run_preserves_previous_output() {
        let mut session = EditorSession::new(languages::default_language(), "cobalt");
        assert!(session.begin_run());
        session.finish_run(accepted());

        assert!(session.begin_run());
        session.fail_run();
        assert!(!session.processing);
        assert!(session.output.is_some(), "stale result stays visible");
    }
}

//! The submission polling loop.
//!
//! Polls are strictly sequential: the next fetch is only scheduled from
//! within the previous fetch's completion, so at most one request and one
//! timer are ever outstanding for a token. Teardown is explicit through a
//! `CancellationToken` checked before every step.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{JudgeError, SubmissionResult};

/// Fixed delay between status polls while the submission is queued/running.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Anything that can answer a status query for a token. `JudgeClient` is the
/// real source; tests drive the loop with scripted responses.
pub trait StatusSource {
    fn fetch_status(
        &mut self,
        token: &str,
    ) -> impl Future<Output = Result<SubmissionResult, JudgeError>> + Send;
}

/// Poll `source` until the submission reaches a terminal status.
///
/// Returns `Ok(Some(result))` on the first non-pending status, `Ok(None)` if
/// `cancel` fires first (teardown — no further fetch is issued), and
/// `Err(JudgeError::Poll(..))` if a fetch fails. A fetch error is terminal;
/// the loop never re-polls through it.
pub async fn watch<S: StatusSource>(
    source: &mut S,
    token: &str,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<Option<SubmissionResult>, JudgeError> {
    loop {
        if cancel.is_cancelled() {
            return Ok(None);
        }
        let result = source
            .fetch_status(token)
            .await
            .map_err(|e| JudgeError::Poll(Box::new(e)))?;
        if !result.status.is_pending() {
            return Ok(Some(result));
        }
        tokio::select! {
            _ = cancel.cancelled() => return Ok(None),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::judge::StatusMeta;

    fn snapshot(id: u8) -> SubmissionResult {
        SubmissionResult {
            status: StatusMeta { id, description: format!("status {id}") },
            stdout: None,
            stderr: None,
            compile_output: None,
            message: None,
            memory: None,
            time: None,
        }
    }

    /// Replays a scripted response sequence and counts fetches.
    struct ScriptedSource {
        responses: VecDeque<Result<SubmissionResult, JudgeError>>,
        polls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(ids: &[u8], polls: Arc<AtomicUsize>) -> Self {
            Self {
                responses: ids.iter().map(|&id| Ok(snapshot(id))).collect(),
                polls,
            }
        }
    }

    impl StatusSource for ScriptedSource {
        fn fetch_status(
            &mut self,
            _token: &str,
        ) -> impl Future<Output = Result<SubmissionResult, JudgeError>> + Send {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.pop_front().expect("script exhausted");
            async move { next }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_status_on_first_poll_ends_immediately() {
        let polls = Arc::new(AtomicUsize::new(0));
        let mut source = ScriptedSource::new(&[3], polls.clone());
        let cancel = CancellationToken::new();

        let start = tokio::time::Instant::now();
        let result = watch(&mut source, "tok", DEFAULT_POLL_INTERVAL, &cancel)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.status.id, 3);
        assert_eq!(polls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_statuses_repoll_every_interval() {
        // [queued, running, queued, wrong answer]: exactly 4 polls, each
        // separated by the fixed interval, terminal on id 4.
        let polls = Arc::new(AtomicUsize::new(0));
        let mut source = ScriptedSource::new(&[1, 2, 1, 4], polls.clone());
        let cancel = CancellationToken::new();

        let start = tokio::time::Instant::now();
        let result = watch(&mut source, "tok", DEFAULT_POLL_INTERVAL, &cancel)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.status.id, 4);
        assert_eq!(polls.load(Ordering::SeqCst), 4);
        assert_eq!(start.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_error_is_terminal_and_not_retried() {
        let polls = Arc::new(AtomicUsize::new(0));
        let mut source = ScriptedSource::new(&[1], polls.clone());
        source
            .responses
            .push_back(Err(JudgeError::Client("connection reset".into())));
        // A further scripted status that must never be fetched.
        source.responses.push_back(Ok(snapshot(3)));
        let cancel = CancellationToken::new();

        let err = watch(&mut source, "tok", DEFAULT_POLL_INTERVAL, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, JudgeError::Poll(_)));
        assert_eq!(polls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_sleep_stops_the_loop() {
        let polls = Arc::new(AtomicUsize::new(0));
        let source = ScriptedSource::new(&[1, 1, 1, 1], polls.clone());
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut source = source;
            watch(&mut source, "tok", DEFAULT_POLL_INTERVAL, &task_cancel).await
        });

        // Let the first poll complete and the inter-poll timer arm.
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();

        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.is_none());
        // The armed timer never produced another fetch after teardown.
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_prevents_any_poll() {
        let polls = Arc::new(AtomicUsize::new(0));
        let mut source = ScriptedSource::new(&[3], polls.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = watch(&mut source, "tok", DEFAULT_POLL_INTERVAL, &cancel)
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }
}

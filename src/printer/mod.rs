//! Maps terminal submission results and failures to user-facing output:
//! toast notifications for the editor, colored stdout for one-shot mode.

use std::time::Duration;

use owo_colors::OwoColorize;

use crate::encode;
use crate::judge::{JudgeError, SubmissionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient banner: message, kind and how long it stays on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NoticeKind,
    pub duration: Duration,
}

const NOTICE_SHORT: Duration = Duration::from_millis(1000);
const NOTICE_LONG: Duration = Duration::from_millis(10_000);

pub fn success_notice() -> Notification {
    Notification {
        message: "Compiled Successfully!".to_string(),
        kind: NoticeKind::Success,
        duration: NOTICE_SHORT,
    }
}

pub fn error_notice(err: &JudgeError) -> Notification {
    let duration = match err {
        // The quota message suggests setting up an own instance; give the
        // user time to read it.
        JudgeError::RateLimited => NOTICE_LONG,
        _ => NOTICE_SHORT,
    };
    Notification { message: error_message(err), kind: NoticeKind::Error, duration }
}

/// Human-readable failure text per classification.
pub fn error_message(err: &JudgeError) -> String {
    match err {
        JudgeError::RateLimited => {
            "Quota exceeded. Please wait or set up your own Judge0 instance.".to_string()
        }
        JudgeError::Service { status, message } => {
            format!("Error {}: {}", status, message.as_deref().unwrap_or("Unexpected error"))
        }
        JudgeError::Network(_) => "No response received. Possible network error.".to_string(),
        JudgeError::Client(msg) => format!("Request failed: {}", msg),
        JudgeError::Poll(_) => "Something went wrong! Please try again.".to_string(),
    }
}

/// Pick what to show for a terminal result and whether it is an error.
///
/// Accepted shows stdout; a compile error shows the compiler output; time
/// limit has no useful streams; everything else shows stderr, falling back
/// to the server's message field.
pub fn primary_output(result: &SubmissionResult) -> (String, bool) {
    match result.status.id {
        3 => (decode_field(&result.stdout), false),
        6 => (decode_field(&result.compile_output), true),
        5 => ("Time Limit Exceeded".to_string(), true),
        _ => {
            let stderr = decode_field(&result.stderr);
            if stderr.is_empty() {
                (decode_field(&result.message), true)
            } else {
                (stderr, true)
            }
        }
    }
}

/// Metrics line rendered whenever a result exists.
pub fn metrics(result: &SubmissionResult) -> String {
    let memory = result
        .memory
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());
    let time = result.time.as_deref().unwrap_or("-");
    format!(
        "Status: {} | Memory: {} KB | Time: {} sec",
        result.status.description, memory, time
    )
}

/// One-shot mode output: body, then metrics, colored by outcome.
pub fn print_result(result: &SubmissionResult) {
    let (body, is_error) = primary_output(result);
    if !body.is_empty() {
        if is_error {
            eprintln!("{}", body.red());
        } else {
            println!("{}", body);
        }
    }
    if result.status.is_accepted() {
        println!("{}", metrics(result).green());
    } else {
        println!("{}", metrics(result).yellow());
    }
}

/// Fields arrive base64-encoded; show the raw text if decoding fails.
fn decode_field(field: &Option<String>) -> String {
    match field.as_deref() {
        Some(raw) => encode::decode(raw).unwrap_or_else(|_| raw.to_string()),
        None => String::new(),
    }
}

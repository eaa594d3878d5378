//! Editor application state management.

use std::time::Instant;

use crate::languages::{self, LANGUAGES};
use crate::printer::{Notification, NoticeKind};
use crate::session::EditorSession;

use super::theme::{self, THEMES};

/// Which pane receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Code,
    Stdin,
}

/// A transient on-screen banner with an expiry.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// A plain multi-line edit buffer with a line/column cursor.
///
/// `col` is a character index into the current line; byte offsets are
/// resolved on every edit so multi-byte input stays intact.
#[derive(Debug, Default)]
pub struct EditBuffer {
    pub lines: Vec<String>,
    pub row: usize,
    pub col: usize,
}

impl EditBuffer {
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines, row: 0, col: 0 }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line(&self) -> &str {
        &self.lines[self.row]
    }

    fn line_chars(&self) -> usize {
        self.line().chars().count()
    }

    fn byte_at(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let byte = Self::byte_at(self.line(), self.col);
        self.lines[self.row].insert(byte, c);
        self.col += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        let byte = Self::byte_at(self.line(), self.col);
        let rest = self.lines[self.row].split_off(byte);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let byte = Self::byte_at(self.line(), self.col - 1);
            self.lines[self.row].remove(byte);
            self.col -= 1;
        } else if self.row > 0 {
            // Merge with the previous line
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_chars();
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_chars() {
            let byte = Self::byte_at(self.line(), self.col);
            self.lines[self.row].remove(byte);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_chars();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_chars() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_chars());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_chars());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_chars();
    }
}

/// Application state for the editor
#[derive(Debug)]
pub struct App {
    pub session: EditorSession,
    pub code: EditBuffer,
    pub stdin: EditBuffer,
    pub focus: Focus,
    pub language_index: usize,
    pub theme_index: usize,
    pub show_help: bool,
    pub toast: Option<Toast>,
}

impl App {
    pub fn new(session: EditorSession) -> Self {
        let language_index = LANGUAGES
            .iter()
            .position(|l| l.id == session.language.id)
            .unwrap_or(0);
        let theme_index = theme::find(&session.theme).unwrap_or(0);
        let code = EditBuffer::from_text(&session.code);
        let stdin = EditBuffer::from_text(&session.stdin);
        Self {
            session,
            code,
            stdin,
            focus: Focus::Code,
            language_index,
            theme_index,
            show_help: false,
            toast: None,
        }
    }

    pub fn theme(&self) -> &'static super::theme::Theme {
        &THEMES[self.theme_index]
    }

    pub fn focused_buffer(&mut self) -> &mut EditBuffer {
        match self.focus {
            Focus::Code => &mut self.code,
            Focus::Stdin => &mut self.stdin,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Code => Focus::Stdin,
            Focus::Stdin => Focus::Code,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cycle_language(&mut self) {
        self.language_index = (self.language_index + 1) % LANGUAGES.len();
        self.session.language = &LANGUAGES[self.language_index];
    }

    pub fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % THEMES.len();
        self.session.theme = THEMES[self.theme_index].name.to_string();
    }

    /// Mirror the edit buffers into the session, which stays the single
    /// source of truth for submissions.
    pub fn sync_session(&mut self) {
        self.session.code = self.code.text();
        self.session.stdin = self.stdin.text();
    }

    pub fn notify(&mut self, notice: Notification) {
        self.toast = Some(Toast {
            message: notice.message,
            kind: notice.kind,
            expires_at: Instant::now() + notice.duration,
        });
    }

    /// Drop the toast once its display window has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    pub fn language_label(&self) -> &'static str {
        languages::LANGUAGES[self.language_index].name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn buffer_round_trips_text() {
        let buf = EditBuffer::from_text("fn main() {\n}\n");
        assert_eq!(buf.text(), "fn main() {\n}\n");
        assert_eq!(buf.lines.len(), 3);
    }

    #[test]
    fn insert_and_newline() {
        let mut buf = EditBuffer::from_text("");
        buf.insert_str("ab");
        buf.insert_newline();
        buf.insert_char('c');
        assert_eq!(buf.text(), "ab\nc");
        assert_eq!((buf.row, buf.col), (1, 1));
    }

    #[test]
    fn backspace_merges_lines() {
        let mut buf = EditBuffer::from_text("ab\ncd");
        buf.row = 1;
        buf.col = 0;
        buf.backspace();
        assert_eq!(buf.text(), "abcd");
        assert_eq!((buf.row, buf.col), (0, 2));
    }

    #[test]
    fn delete_at_line_end_merges_next() {
        let mut buf = EditBuffer::from_text("ab\ncd");
        buf.col = 2;
        buf.delete();
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn cursor_handles_multibyte_chars() {
        let mut buf = EditBuffer::from_text("héllo");
        buf.col = 2;
        buf.insert_char('x');
        assert_eq!(buf.text(), "héxllo");
        buf.backspace();
        assert_eq!(buf.text(), "héllo");
    }

    #[test]
    fn vertical_movement_clamps_column() {
        let mut buf = EditBuffer::from_text("longer line\nab");
        buf.col = 8;
        buf.move_down();
        assert_eq!((buf.row, buf.col), (1, 2));
    }

    #[test]
    fn toast_expires_on_tick() {
        let session = EditorSession::new(crate::languages::default_language(), "cobalt");
        let mut app = App::new(session);
        app.notify(crate::printer::success_notice());
        assert!(app.toast.is_some());
        app.tick(Instant::now() + Duration::from_secs(5));
        assert!(app.toast.is_none());
    }
}

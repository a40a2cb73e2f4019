use chrono::{DateTime, Local};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::content::OWNER_NAME;

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str =
    "Message sent successfully! I'll get back to you within 24 hours.";

/// Banner display windows in base ticks (50 ms each): 7 s for success,
/// 10 s for failure.
pub const SUCCESS_CLEAR_TICKS: u32 = 140;
pub const FAILURE_CLEAR_TICKS: u32 = 200;

pub const ERR_NAME_REQUIRED: &str = "Name is required";
pub const ERR_NAME_SHORT: &str = "Name must be at least 2 characters";
pub const ERR_EMAIL_REQUIRED: &str = "Email is required";
pub const ERR_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const ERR_MESSAGE_REQUIRED: &str = "Message is required";
pub const ERR_MESSAGE_SHORT: &str = "Message must be at least 10 characters";
pub const ERR_MESSAGE_LONG: &str = "Message is too long (max 1000 characters)";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Per-field validation results. Fields are checked independently so a
/// submission with several bad fields shows every error at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_clear(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

/// Validate field values against the submission rules. Name and message
/// are trimmed first; the email pattern runs on the raw value, so
/// leading or trailing whitespace fails it.
pub fn validate_fields(name: &str, email: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let name = name.trim();
    if name.is_empty() {
        errors.name = Some(ERR_NAME_REQUIRED);
    } else if name.chars().count() < 2 {
        errors.name = Some(ERR_NAME_SHORT);
    }

    if email.trim().is_empty() {
        errors.email = Some(ERR_EMAIL_REQUIRED);
    } else if !is_valid_email(email) {
        errors.email = Some(ERR_EMAIL_INVALID);
    }

    let message = message.trim();
    if message.is_empty() {
        errors.message = Some(ERR_MESSAGE_REQUIRED);
    } else if message.chars().count() < 10 {
        errors.message = Some(ERR_MESSAGE_SHORT);
    } else if message.chars().count() > 1000 {
        errors.message = Some(ERR_MESSAGE_LONG);
    }

    errors
}

/// Outbound payload for the relay template. Key names are dictated by
/// the relay service's template contract.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
    pub reply_to: String,
    pub date: String,
}

impl TemplateParams {
    /// Build the payload from trimmed field values plus the fixed
    /// recipient and a long-form local timestamp
    /// ("Monday, January 5, 2026 at 03:04 PM").
    pub fn build(name: &str, email: &str, message: &str, now: DateTime<Local>) -> Self {
        let email = email.trim().to_string();
        Self {
            from_name: name.trim().to_string(),
            from_email: email.clone(),
            message: message.trim().to_string(),
            to_name: OWNER_NAME.to_string(),
            reply_to: email,
            date: now.format("%A, %B %-d, %Y at %I:%M %p").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Sending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Outcome banner shown under the form, cleared after a tick deadline.
#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    pub kind: BannerKind,
    pub clear_in: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
    Submit,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Submit,
            Field::Submit => Field::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Field::Name => Field::Submit,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
            Field::Submit => Field::Message,
        }
    }
}

/// Contact form state: field buffers, the focused field with a character
/// cursor, validation errors, and the submission state machine.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focused: Option<Field>,
    pub cursor: usize,
    pub errors: FieldErrors,
    pub state: SubmissionState,
    pub banner: Option<Banner>,
}

/// Convert a character index to a byte index for UTF-8 safe edits.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl ContactForm {
    pub fn is_sending(&self) -> bool {
        self.state == SubmissionState::Sending
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_sending() {
            SENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Run validation over the current buffers; populates `errors` and
    /// returns whether the form may proceed to the send.
    pub fn validate(&mut self) -> bool {
        self.state = SubmissionState::Validating;
        self.errors = validate_fields(&self.name, &self.email, &self.message);
        if self.errors.is_clear() {
            true
        } else {
            self.state = SubmissionState::Idle;
            false
        }
    }

    pub fn begin_send(&mut self) {
        self.banner = None;
        self.state = SubmissionState::Sending;
    }

    /// Success path: confirmation banner, fields cleared, timed reset.
    pub fn complete_success(&mut self) {
        self.state = SubmissionState::Succeeded;
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.cursor = 0;
        self.banner = Some(Banner {
            text: SUCCESS_MESSAGE.to_string(),
            kind: BannerKind::Success,
            clear_in: SUCCESS_CLEAR_TICKS,
        });
    }

    /// Failure path: the form keeps its contents so the user can retry.
    pub fn complete_failure(&mut self, reason: &str) {
        self.state = SubmissionState::Failed;
        self.banner = Some(Banner {
            text: format!("❌ {reason}"),
            kind: BannerKind::Error,
            clear_in: FAILURE_CLEAR_TICKS,
        });
    }

    /// Countdown for the banner window; terminal states fall back to
    /// idle once the banner clears.
    pub fn tick(&mut self) {
        if let Some(banner) = &mut self.banner {
            banner.clear_in = banner.clear_in.saturating_sub(1);
            if banner.clear_in == 0 {
                self.banner = None;
                self.state = SubmissionState::Idle;
            }
        }
    }

    // Editing -------------------------------------------------------------

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focused {
            Some(Field::Name) => Some(&mut self.name),
            Some(Field::Email) => Some(&mut self.email),
            Some(Field::Message) => Some(&mut self.message),
            _ => None,
        }
    }

    fn focused_len(&self) -> usize {
        match self.focused {
            Some(Field::Name) => self.name.chars().count(),
            Some(Field::Email) => self.email.chars().count(),
            Some(Field::Message) => self.message.chars().count(),
            _ => 0,
        }
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = Some(field);
        self.cursor = self.focused_len();
    }

    pub fn focus_next(&mut self) {
        let next = self.focused.map(|f| f.next()).unwrap_or(Field::Name);
        self.focus(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = self.focused.map(|f| f.prev()).unwrap_or(Field::Submit);
        self.focus(prev);
    }

    pub fn blur(&mut self) {
        self.focused = None;
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(buffer) = self.focused_buffer() {
            let byte_pos = char_to_byte_index(buffer, cursor);
            buffer.insert(byte_pos, c);
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor - 1;
        if let Some(buffer) = self.focused_buffer() {
            let byte_pos = char_to_byte_index(buffer, cursor);
            buffer.remove(byte_pos);
            self.cursor = cursor;
        }
    }

    pub fn delete(&mut self) {
        let cursor = self.cursor;
        if cursor >= self.focused_len() {
            return;
        }
        if let Some(buffer) = self.focused_buffer() {
            let byte_pos = char_to_byte_index(buffer, cursor);
            buffer.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.focused_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.focused_len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_fields_yield_required_errors() {
        let errors = validate_fields("   ", "", " \t");
        assert_eq!(errors.name, Some(ERR_NAME_REQUIRED));
        assert_eq!(errors.email, Some(ERR_EMAIL_REQUIRED));
        assert_eq!(errors.message, Some(ERR_MESSAGE_REQUIRED));
    }

    #[test]
    fn name_length_boundary() {
        assert_eq!(validate_fields("J", "a@b.c", &"x".repeat(10)).name, Some(ERR_NAME_SHORT));
        assert_eq!(validate_fields("Jo", "a@b.c", &"x".repeat(10)).name, None);
    }

    #[test]
    fn message_length_boundaries_are_inclusive() {
        let ok = |msg: &str| validate_fields("Jo", "a@b.c", msg).message;
        assert_eq!(ok(&"x".repeat(9)), Some(ERR_MESSAGE_SHORT));
        assert_eq!(ok(&"x".repeat(10)), None);
        assert_eq!(ok(&"x".repeat(1000)), None);
        assert_eq!(ok(&"x".repeat(1001)), Some(ERR_MESSAGE_LONG));
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        let errors = validate_fields("Jo", "a@b", &"x".repeat(10));
        assert_eq!(errors.email, Some(ERR_EMAIL_INVALID));
    }

    #[test]
    fn email_with_surrounding_whitespace_is_invalid() {
        // The pattern runs on the raw value, not a trimmed copy.
        let errors = validate_fields("Jo", " a@b.c ", &"x".repeat(10));
        assert_eq!(errors.email, Some(ERR_EMAIL_INVALID));
    }

    #[test]
    fn errors_are_cumulative_across_fields() {
        let errors = validate_fields("J", "nope", "short");
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.message.is_some());
    }

    #[test]
    fn invalid_submit_returns_to_idle() {
        let mut form = ContactForm::default();
        form.name = "J".to_string();
        assert!(!form.validate());
        assert_eq!(form.state, SubmissionState::Idle);
        assert!(!form.errors.is_clear());
    }

    #[test]
    fn success_clears_fields_and_banner_expires() {
        let mut form = ContactForm {
            name: "Jordan".into(),
            email: "j@example.com".into(),
            message: "Hello from the tests.".into(),
            ..Default::default()
        };
        form.begin_send();
        form.complete_success();

        assert!(form.name.is_empty());
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());
        assert_eq!(form.state, SubmissionState::Succeeded);
        let banner = form.banner.as_ref().unwrap();
        assert_eq!(banner.text, SUCCESS_MESSAGE);
        assert_eq!(banner.kind, BannerKind::Success);

        for _ in 0..SUCCESS_CLEAR_TICKS {
            form.tick();
        }
        assert!(form.banner.is_none());
        assert_eq!(form.state, SubmissionState::Idle);
    }

    #[test]
    fn failure_keeps_fields_and_prefixes_marker() {
        let mut form = ContactForm {
            name: "Jordan".into(),
            email: "j@example.com".into(),
            message: "Hello from the tests.".into(),
            ..Default::default()
        };
        form.begin_send();
        form.complete_failure("quota exceeded");

        assert_eq!(form.name, "Jordan");
        assert_eq!(form.state, SubmissionState::Failed);
        let banner = form.banner.as_ref().unwrap();
        assert!(banner.text.contains("quota exceeded"));
        assert!(banner.text.starts_with('❌'));
        assert_eq!(banner.clear_in, FAILURE_CLEAR_TICKS);
    }

    #[test]
    fn template_params_trim_and_stamp() {
        let now = Local.with_ymd_and_hms(2026, 1, 5, 15, 4, 0).unwrap();
        let params = TemplateParams::build("  Jordan  ", " j@example.com ", "  hi there!  ", now);
        assert_eq!(params.from_name, "Jordan");
        assert_eq!(params.from_email, "j@example.com");
        assert_eq!(params.reply_to, "j@example.com");
        assert_eq!(params.message, "hi there!");
        assert_eq!(params.to_name, crate::content::OWNER_NAME);
        assert_eq!(params.date, "Monday, January 5, 2026 at 03:04 PM");
    }

    #[test]
    fn editing_is_utf8_safe() {
        let mut form = ContactForm::default();
        form.focus(Field::Name);
        for c in "héllo".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.name, "héllo");
        form.cursor_left();
        form.cursor_left();
        form.backspace();
        assert_eq!(form.name, "hélo");
        form.delete();
        assert_eq!(form.name, "héo");
    }
}

//! Contact form state and validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "your@email.com",
            Field::Message => "Your message...",
        }
    }
}

/// The message a visitor sends
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

/// Per-field validation messages
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Email => self.email = None,
            Field::Message => self.message = None,
        }
    }

    pub fn count(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\S+@\S+\.\S+").ok())
        .as_ref()
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}

/// Validate every field. Pure: the form is not touched.
pub fn validate(form: &ContactForm) -> FormErrors {
    let mut errors = FormErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required".to_string());
    }

    if form.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !is_valid_email(&form.email) {
        errors.email = Some("Please enter a valid email address".to_string());
    }

    if form.message.trim().is_empty() {
        errors.message = Some("Message is required".to_string());
    }

    errors
}

/// Which control of the form has keyboard focus
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormFocus {
    Field(Field),
    Submit,
}

impl FormFocus {
    pub fn next(&self) -> FormFocus {
        match self {
            FormFocus::Field(Field::Name) => FormFocus::Field(Field::Email),
            FormFocus::Field(Field::Email) => FormFocus::Field(Field::Message),
            FormFocus::Field(Field::Message) => FormFocus::Submit,
            FormFocus::Submit => FormFocus::Field(Field::Name),
        }
    }

    pub fn prev(&self) -> FormFocus {
        match self {
            FormFocus::Field(Field::Name) => FormFocus::Submit,
            FormFocus::Field(Field::Email) => FormFocus::Field(Field::Name),
            FormFocus::Field(Field::Message) => FormFocus::Field(Field::Email),
            FormFocus::Submit => FormFocus::Field(Field::Message),
        }
    }
}

/// Full interactive state of the contact form
#[derive(Clone, Debug)]
pub struct ContactFormState {
    pub data: ContactForm,
    pub errors: FormErrors,
    pub is_submitting: bool,
    pub focus: FormFocus,
    /// A text field currently owns the keyboard
    pub editing: bool,
    pub cursor: usize,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFormState {
    pub fn new() -> Self {
        ContactFormState {
            data: ContactForm::default(),
            errors: FormErrors::default(),
            is_submitting: false,
            focus: FormFocus::Field(Field::Name),
            editing: false,
            cursor: 0,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.data.get(field)
    }

    /// Replace a field's value; clears only that field's error
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.data.get_mut(field) = value.into();
        self.errors.clear(field);
        if self.focused_field() == Some(field) {
            let value = self.data.get(field);
            let mut cursor = self.cursor.min(value.len());
            while !value.is_char_boundary(cursor) {
                cursor -= 1;
            }
            self.cursor = cursor;
        }
    }

    pub fn focused_field(&self) -> Option<Field> {
        match self.focus {
            FormFocus::Field(f) => Some(f),
            FormFocus::Submit => None,
        }
    }

    // ========================
    // Focus
    // ========================

    pub fn focus_next(&mut self) {
        self.editing = false;
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.editing = false;
        self.focus = self.focus.prev();
    }

    /// Start editing the focused field. Returns false on the submit button.
    pub fn start_editing(&mut self) -> bool {
        match self.focused_field() {
            Some(field) if !self.is_submitting => {
                self.editing = true;
                self.cursor = self.data.get(field).len();
                true
            }
            _ => false,
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    // ========================
    // Text editing
    // ========================

    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.editing_field() else {
            return;
        };
        let cursor = self.cursor;
        let text = self.data.get_mut(field);
        if cursor <= text.len() {
            text.insert(cursor, c);
            self.cursor = cursor + c.len_utf8();
        }
        self.errors.clear(field);
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.editing_field() else {
            return;
        };
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        let text = self.data.get_mut(field);
        let prev = text[..cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        text.drain(prev..cursor);
        self.cursor = prev;
        self.errors.clear(field);
    }

    pub fn delete_word_back(&mut self) {
        let Some(field) = self.editing_field() else {
            return;
        };
        let cursor = self.cursor;
        let text = self.data.get_mut(field);
        let before = &text[..cursor];
        let trimmed = before.trim_end_matches(char::is_whitespace);
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        if start == cursor {
            return;
        }
        text.drain(start..cursor);
        self.cursor = start;
        self.errors.clear(field);
    }

    pub fn cursor_left(&mut self) {
        let Some(field) = self.editing_field() else {
            return;
        };
        let text = self.data.get(field);
        self.cursor = text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    pub fn cursor_right(&mut self) {
        let Some(field) = self.editing_field() else {
            return;
        };
        let text = self.data.get(field);
        if self.cursor < text.len() {
            self.cursor = text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(text.len());
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        if let Some(field) = self.editing_field() {
            self.cursor = self.data.get(field).len();
        }
    }

    fn editing_field(&self) -> Option<Field> {
        if self.editing {
            self.focused_field()
        } else {
            None
        }
    }

    // ========================
    // Submission
    // ========================

    /// Validate and, if clean, enter the submitting state.
    ///
    /// Returns the message to send, or `None` when validation failed or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactForm> {
        if self.is_submitting {
            return None;
        }
        self.errors = validate(&self.data);
        if !self.errors.is_empty() {
            return None;
        }
        self.editing = false;
        self.is_submitting = true;
        Some(self.data.clone())
    }

    /// Leave the submitting state. A successful send clears the form.
    pub fn finish_submit(&mut self, success: bool) {
        self.is_submitting = false;
        if success {
            self.data = ContactForm::default();
            self.errors = FormErrors::default();
            self.focus = FormFocus::Field(Field::Name);
            self.cursor = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, email: &str, message: &str) -> ContactFormState {
        let mut form = ContactFormState::new();
        form.set_field(Field::Name, name);
        form.set_field(Field::Email, email);
        form.set_field(Field::Message, message);
        form
    }

    #[test]
    fn test_empty_name_is_the_only_error() {
        let mut form = filled("", "a@b.com", "Hello there");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors.count(), 1);
        assert_eq!(form.errors.get(Field::Name), Some("Name is required"));
        assert_eq!(form.errors.get(Field::Email), None);
        assert_eq!(form.errors.get(Field::Message), None);
        assert!(!form.is_submitting);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let errors = validate(&ContactForm {
            name: "   ".into(),
            email: " ".into(),
            message: "\n\t".into(),
        });
        assert_eq!(errors.count(), 3);
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
    }

    #[test]
    fn test_correcting_email_clears_only_its_error() {
        let mut form = filled("", "not-an-email", "Hi");
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.errors.get(Field::Email),
            Some("Please enter a valid email address")
        );
        assert!(form.errors.get(Field::Name).is_some());

        form.set_field(Field::Email, "a@b.com");
        assert_eq!(form.errors.get(Field::Email), None);
        assert!(form.errors.get(Field::Name).is_some());

        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors.get(Field::Email), None);
        assert_eq!(form.errors.get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn test_typing_clears_field_error() {
        let mut form = ContactFormState::new();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.errors.count(), 3);

        assert!(form.start_editing());
        form.insert_char('J');
        assert_eq!(form.value(Field::Name), "J");
        assert_eq!(form.errors.get(Field::Name), None);
        assert_eq!(form.errors.count(), 2);
    }

    #[test]
    fn test_submit_lifecycle() {
        let mut form = filled("Jane", "jane@example.com", "Let's talk");
        let sent = form.begin_submit().unwrap();
        assert_eq!(sent.name, "Jane");
        assert!(form.is_submitting);

        // The control is disabled while a submission is in flight
        assert!(form.begin_submit().is_none());

        form.finish_submit(true);
        assert!(!form.is_submitting);
        assert_eq!(form.data, ContactForm::default());
    }

    #[test]
    fn test_failed_submit_preserves_input() {
        let mut form = filled("Jane", "jane@example.com", "Let's talk");
        form.begin_submit().unwrap();
        form.finish_submit(false);
        assert!(!form.is_submitting);
        assert_eq!(form.value(Field::Message), "Let's talk");
    }

    #[test]
    fn test_editing_ops() {
        let mut form = ContactFormState::new();
        form.focus_next();
        assert_eq!(form.focused_field(), Some(Field::Email));
        form.start_editing();
        for c in "hi there".chars() {
            form.insert_char(c);
        }
        form.delete_word_back();
        assert_eq!(form.value(Field::Email), "hi ");
        form.backspace();
        form.cursor_left();
        form.insert_char('é');
        assert_eq!(form.value(Field::Email), "héi");
        form.cursor_end();
        form.backspace();
        assert_eq!(form.value(Field::Email), "hé");
    }

    #[test]
    fn test_set_field_keeps_cursor_on_char_boundary() {
        let mut form = ContactFormState::new();
        form.focus_next();
        form.start_editing();
        for c in "abc".chars() {
            form.insert_char(c);
        }
        form.set_field(Field::Email, "éé");
        assert_eq!(form.cursor, 2);

        form.insert_char('x');
        assert_eq!(form.value(Field::Email), "éxé");
    }

    #[test]
    fn test_keys_ignored_when_not_editing() {
        let mut form = ContactFormState::new();
        form.insert_char('x');
        assert_eq!(form.value(Field::Name), "");
    }

    #[test]
    fn test_focus_cycle_includes_submit() {
        let mut form = ContactFormState::new();
        form.focus_prev();
        assert_eq!(form.focus, FormFocus::Submit);
        assert!(!form.start_editing());
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Field(Field::Name));
    }
}

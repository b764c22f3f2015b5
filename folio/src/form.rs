//! Contact form. Validation only; nothing leaves the machine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    fn index(&self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Subject => 2,
            Field::Message => 3,
        }
    }

    fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    fn prev(&self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Modal notice shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Incomplete,
    Sent { name: String },
}

impl Alert {
    pub fn message(&self) -> String {
        match self {
            Alert::Incomplete => "Please fill in every field.".to_string(),
            Alert::Sent { name } => format!(
                "Thank you {name} for your message! We will get back to you as soon as possible."
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: [String; 4],
    focus: Option<Field>,
    alert: Option<Alert>,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Field being edited; `None` while the form is not focused.
    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Validate and "send". A complete form is cleared.
    pub fn submit(&mut self) -> &Alert {
        let complete = self.values.iter().all(|v| !v.trim().is_empty());
        let alert = if complete {
            let name = self.value(Field::Name).to_string();
            tracing::info!(
                name = %name,
                email = %self.value(Field::Email),
                "contact form submitted (kept local)"
            );
            self.values = Default::default();
            self.focus = Some(Field::Name);
            Alert::Sent { name }
        } else {
            Alert::Incomplete
        };
        self.alert.insert(alert)
    }

    /// Append pasted text to the focused field. Line breaks become spaces.
    /// Returns false when no field is focused.
    pub fn paste(&mut self, text: &str) -> bool {
        let Some(field) = self.focus.filter(|_| self.alert.is_none()) else {
            return false;
        };
        let value = &mut self.values[field.index()];
        for line in text.lines() {
            if !value.is_empty() && !line.is_empty() && !value.ends_with(' ') {
                value.push(' ');
            }
            value.extend(line.chars().filter(|c| !c.is_control()));
        }
        true
    }

    /// Returns true if the key was used by the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.alert.is_some() {
            self.dismiss_alert();
            return true;
        }

        let Some(field) = self.focus else {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('i') => {
                    self.focus = Some(Field::Name);
                    true
                }
                _ => false,
            };
        };

        match key.code {
            KeyCode::Esc => self.focus = None,
            KeyCode::Tab | KeyCode::Down => self.focus = Some(field.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus = Some(field.prev()),
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.values[field.index()].push(c);
            }
            KeyCode::Backspace => {
                self.values[field.index()].pop();
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ContactForm, text: &str) {
        for c in text.chars() {
            assert!(form.handle_key(key(KeyCode::Char(c))));
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set_value(Field::Name, "Ann");
        form.set_value(Field::Email, "ann@example.com");
        form.set_value(Field::Subject, "Hello");
        form.set_value(Field::Message, "Nice work");
        form
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut form = filled();
        form.set_value(Field::Subject, "   ");
        assert_eq!(form.submit(), &Alert::Incomplete);
        assert_eq!(form.value(Field::Name), "Ann");
    }

    #[test]
    fn test_complete_form_thanks_and_resets() {
        let mut form = filled();
        let alert = form.submit().clone();
        assert_eq!(alert, Alert::Sent { name: "Ann".into() });
        assert!(alert.message().starts_with("Thank you Ann"));
        assert!(Field::ALL.iter().all(|f| form.value(*f).is_empty()));
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut form = ContactForm::default();
        assert!(!form.handle_key(key(KeyCode::Char('x'))));

        assert!(form.handle_key(key(KeyCode::Enter)));
        type_text(&mut form, "Bo");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "b@x.io");
        form.handle_key(key(KeyCode::Backspace));

        assert_eq!(form.value(Field::Name), "Bo");
        assert_eq!(form.value(Field::Email), "b@x.i");
        assert_eq!(form.focus(), Some(Field::Email));
    }

    #[test]
    fn test_any_key_dismisses_alert() {
        let mut form = ContactForm::default();
        form.handle_key(key(KeyCode::Enter));
        form.handle_key(key(KeyCode::Enter));
        assert_eq!(form.alert(), Some(&Alert::Incomplete));

        assert!(form.handle_key(key(KeyCode::Char('q'))));
        assert!(form.alert().is_none());
        assert_eq!(form.value(Field::Name), "");
    }

    #[test]
    fn test_paste_goes_to_focused_field() {
        let mut form = ContactForm::default();
        assert!(!form.paste("ignored"));
        assert_eq!(form.value(Field::Name), "");

        form.handle_key(key(KeyCode::Char('i')));
        form.handle_key(key(KeyCode::Up));
        type_text(&mut form, "Hi.");
        assert!(form.paste("Line one\r\nline two\n"));
        assert_eq!(form.value(Field::Message), "Hi. Line one line two");
        assert_eq!(form.value(Field::Name), "");
    }

    #[test]
    fn test_escape_leaves_form() {
        let mut form = ContactForm::default();
        form.handle_key(key(KeyCode::Char('i')));
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), Some(Field::Message));
        form.handle_key(key(KeyCode::Esc));
        assert_eq!(form.focus(), None);
        assert!(!form.handle_key(key(KeyCode::Char('q'))));
    }
}

//! Submitted form payloads and their validation.
//!
//! Validation never touches the store. Slug uniqueness is decided by the
//! store at write time and reported back through [`FormErrors::duplicate_slug`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slug::{is_valid_slug, slugify_truncated};

/// Suffix of the error shown when a slug is already taken.
pub const WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_SLUG_LENGTH: usize = 100;
pub const MAX_USERNAME_LENGTH: usize = 150;
pub const MIN_PASSWORD_LENGTH: usize = 8;

const REQUIRED: &str = "Обязательное поле.";

/// Field-level validation errors, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Error set for a slug that collides with another note
    pub fn duplicate_slug(slug: &str) -> Self {
        let mut errors = Self::new();
        errors.add("slug", format!("{}{}", slug, WARNING));
        errors
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Raw note form as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

/// A note form that passed validation, slug resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}

impl NoteForm {
    pub fn new(title: &str, text: &str, slug: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            slug: slug.to_string(),
        }
    }

    /// Validate the form. Fields are trimmed and a blank slug is derived
    /// from the title.
    pub fn clean(&self) -> Result<CleanNote, FormErrors> {
        let mut errors = FormErrors::new();
        let title = self.title.trim();
        let text = self.text.trim();

        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else if title.chars().count() > MAX_TITLE_LENGTH {
            errors.add(
                "title",
                format!("Не более {} символов.", MAX_TITLE_LENGTH),
            );
        }

        if text.is_empty() {
            errors.add("text", REQUIRED);
        }

        let slug = self.slug.trim();
        if slug.chars().count() > MAX_SLUG_LENGTH {
            errors.add("slug", format!("Не более {} символов.", MAX_SLUG_LENGTH));
        } else if !slug.is_empty() && !is_valid_slug(slug) {
            errors.add(
                "slug",
                "Допустимы только латинские буквы, цифры, дефис и подчёркивание.",
            );
        }

        let slug = if slug.is_empty() {
            slugify_truncated(title, MAX_SLUG_LENGTH)
        } else {
            slug.to_string()
        };

        errors.into_result(CleanNote {
            title: title.to_string(),
            text: text.to_string(),
            slug,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn clean(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.username.trim().is_empty() {
            errors.add("username", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.into_result(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    /// Validate everything except username availability
    pub fn clean(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", REQUIRED);
        } else if username.chars().count() > MAX_USERNAME_LENGTH {
            errors.add(
                "username",
                format!("Не более {} символов.", MAX_USERNAME_LENGTH),
            );
        } else if !is_valid_username(username) {
            errors.add(
                "username",
                "Допустимы только буквы, цифры и символы @/./+/-/_.",
            );
        }

        if self.password1.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password1",
                format!("Пароль должен содержать не менее {} символов.", MIN_PASSWORD_LENGTH),
            );
        }
        if self.password1 != self.password2 {
            errors.add("password2", "Введённые пароли не совпадают.");
        }

        errors.into_result(())
    }
}

pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_with_explicit_slug() {
        let form = NoteForm::new("Заголовок", "Текст", "note-slug");
        let clean = form.clean().unwrap();
        assert_eq!(clean.title, "Заголовок");
        assert_eq!(clean.text, "Текст");
        assert_eq!(clean.slug, "note-slug");
    }

    #[test]
    fn test_clean_derives_slug_from_title() {
        let form = NoteForm::new("Заголовок", "Текст", "");
        assert_eq!(form.clean().unwrap().slug, "zagolovok");

        let form = NoteForm::new("Заголовок", "Текст", "   ");
        assert_eq!(form.clean().unwrap().slug, "zagolovok");
    }

    #[test]
    fn test_clean_strips_whitespace() {
        let form = NoteForm::new("  Заголовок  ", "\n Текст \n", " note-slug ");
        let clean = form.clean().unwrap();
        assert_eq!(clean.title, "Заголовок");
        assert_eq!(clean.text, "Текст");
        assert_eq!(clean.slug, "note-slug");

        let form = NoteForm::new("  Заголовок  ", "Текст", "");
        assert_eq!(form.clean().unwrap().slug, "zagolovok");
    }

    #[test]
    fn test_clean_required_fields() {
        let errors = NoteForm::new("", "", "").clean().unwrap_err();
        assert_eq!(errors.get("title"), [REQUIRED.to_string()]);
        assert_eq!(errors.get("text"), [REQUIRED.to_string()]);
        assert!(errors.get("slug").is_empty());
    }

    #[test]
    fn test_clean_title_too_long() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        let errors = NoteForm::new(&title, "Текст", "ok").clean().unwrap_err();
        assert_eq!(errors.get("title").len(), 1);
    }

    #[test]
    fn test_clean_long_title_derives_bounded_slug() {
        let title = "я".repeat(MAX_TITLE_LENGTH);
        let clean = NoteForm::new(&title, "Текст", "").clean().unwrap();
        assert_eq!(clean.slug.len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn test_clean_invalid_slug() {
        let errors = NoteForm::new("Title", "Text", "bad slug!").clean().unwrap_err();
        assert_eq!(errors.get("slug").len(), 1);

        let long = "s".repeat(MAX_SLUG_LENGTH + 1);
        let errors = NoteForm::new("Title", "Text", &long).clean().unwrap_err();
        assert_eq!(errors.get("slug").len(), 1);
    }

    #[test]
    fn test_duplicate_slug_message() {
        let errors = FormErrors::duplicate_slug("note-slug");
        assert_eq!(errors.get("slug"), [format!("note-slug{}", WARNING)]);
    }

    #[test]
    fn test_login_form_required() {
        let errors = LoginForm::default().clean().unwrap_err();
        assert_eq!(errors.get("username").len(), 1);
        assert_eq!(errors.get("password").len(), 1);
    }

    #[test]
    fn test_signup_form_validation() {
        let ok = SignupForm {
            username: "Читатель".to_string(),
            password1: "longenough".to_string(),
            password2: "longenough".to_string(),
        };
        assert!(ok.clean().is_ok());

        let mismatch = SignupForm {
            username: "reader".to_string(),
            password1: "longenough".to_string(),
            password2: "different1".to_string(),
        };
        let errors = mismatch.clean().unwrap_err();
        assert_eq!(errors.get("password2").len(), 1);

        let short = SignupForm {
            username: "bad name".to_string(),
            password1: "short".to_string(),
            password2: "short".to_string(),
        };
        let errors = short.clean().unwrap_err();
        assert_eq!(errors.get("username").len(), 1);
        assert_eq!(errors.get("password1").len(), 1);
    }
}

use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::email_address::EmailAddress;

/// Subject used when the submitter did not provide one.
pub const DEFAULT_SUBJECT: &str = "New Contact Form Submission";

/// A contact form submission as received, before any business rules have
/// been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// A validated and normalized contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: Option<ContactMessageSubject>,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

/// Used as display name of the notification's sender, so it must fit on a
/// single header line.
#[nutype(
    sanitize(trim),
    validate(
        not_empty,
        len_char_min = 2,
        len_char_max = 256,
        predicate = |name| !name.chars().any(char::is_control),
    ),
    derive(Debug, Display, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 3, len_char_max = 256),
    derive(Debug, Display, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_min = 10, len_char_max = 5000),
    derive(Debug, Display, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

impl ContactMessage {
    /// The subject line to use for this message, falling back to
    /// [`DEFAULT_SUBJECT`].
    pub fn effective_subject(&self) -> &str {
        self.subject.as_deref().map_or(DEFAULT_SUBJECT, String::as_str)
    }
}

impl From<ContactMessage> for ContactSubmission {
    fn from(value: ContactMessage) -> Self {
        Self {
            name: value.author.name.into_inner(),
            email: value.author.email.as_str().into(),
            subject: value.subject.map(ContactMessageSubject::into_inner),
            message: value.content.into_inner(),
        }
    }
}

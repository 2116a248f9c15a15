use folio_models::contact::ContactSubmission;
use serde::Deserialize;

/// Request body of `POST /api/email/contact`.
///
/// Only checks the shape of the request; the business rules are applied by
/// the contact feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    pub name: String,
    /// Email address of the sender
    pub email: String,
    /// Subject of the message
    #[serde(default)]
    pub subject: Option<String>,
    /// Content of the message
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
        }
    }
}

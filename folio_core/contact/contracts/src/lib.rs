use std::future::Future;

use folio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and relay it to the site owner.
    ///
    /// Succeeds as soon as the notification has been delivered to the relay.
    /// If enabled, an auto-reply is sent to the submitter afterwards; its
    /// outcome never affects the result.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Invalid(#[from] ContactValidationError),
    #[error("Recipient email is not configured")]
    RecipientNotConfigured,
    #[error("Failed to send email. Please try again later.")]
    Send,
}

/// Business rule violated by a submission. Rules are checked in declaration
/// order and the first violation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Name must be between 2 and 256 characters long")]
    Name,
    #[error("Please provide a valid email address")]
    Email,
    #[error("Subject must be between 3 and 256 characters long")]
    Subject,
    #[error("Message must be between 10 and 5000 characters long")]
    Message,
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

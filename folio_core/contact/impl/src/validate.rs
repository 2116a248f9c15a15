use folio_core_contact_contracts::ContactValidationError;
use folio_models::contact::{
    ContactMessage, ContactMessageAuthor, ContactMessageAuthorName, ContactMessageContent,
    ContactMessageSubject, ContactSubmission,
};

/// Apply the contact form business rules to a submission, returning the
/// trimmed message or the first rule it violates.
pub fn validate(submission: ContactSubmission) -> Result<ContactMessage, ContactValidationError> {
    let name = ContactMessageAuthorName::try_new(submission.name)
        .map_err(|_| ContactValidationError::Name)?;

    let email = submission
        .email
        .trim()
        .parse()
        .map_err(|_| ContactValidationError::Email)?;

    let subject = submission
        .subject
        .map(ContactMessageSubject::try_new)
        .transpose()
        .map_err(|_| ContactValidationError::Subject)?;

    let content = ContactMessageContent::try_new(submission.message)
        .map_err(|_| ContactValidationError::Message)?;

    Ok(ContactMessage {
        author: ContactMessageAuthor { name, email },
        subject,
        content,
    })
}

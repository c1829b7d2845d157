use snafu::{Snafu, ensure};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ContactError {
    #[snafu(display("name is required"))]
    MissingName { stage: &'static str },
    #[snafu(display("'{email}' is not a valid email address"))]
    InvalidEmail { stage: &'static str, email: String },
    #[snafu(display("message is required"))]
    MissingMessage { stage: &'static str },
}

pub type ContactResult<T> = Result<T, ContactError>;

/// Raw field values of the contact form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A validated, trimmed form ready to hand to a [`ContactSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn submit(&self) -> ContactResult<ContactSubmission> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        ensure!(
            !name.is_empty(),
            MissingNameSnafu {
                stage: "contact-validate-name",
            }
        );
        ensure!(
            is_plausible_email(email),
            InvalidEmailSnafu {
                stage: "contact-validate-email",
                email,
            }
        );
        ensure!(
            !message.is_empty(),
            MissingMessageSnafu {
                stage: "contact-validate-message",
            }
        );

        Ok(ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

/// Destination for contact submissions. There is no backend; see [`LogContactSink`].
pub trait ContactSink: Send + Sync {
    fn deliver(&self, submission: &ContactSubmission);
}

/// Records submissions in the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogContactSink;

impl ContactSink for LogContactSink {
    fn deliver(&self, submission: &ContactSubmission) {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            message_len = submission.message.chars().count(),
            "contact form submitted"
        );
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_fields_on_submit() {
        let form = ContactForm::new("  Анна ", " anna@example.com ", "\nВопрос\n");

        let submission = form.submit().unwrap();

        assert_eq!(submission.name, "Анна");
        assert_eq!(submission.email, "anna@example.com");
        assert_eq!(submission.message, "Вопрос");
    }

    #[test]
    fn rejects_blank_name() {
        let form = ContactForm::new("   ", "a@b.c", "hi");
        assert!(matches!(form.submit(), Err(ContactError::MissingName { .. })));
    }

    #[test]
    fn rejects_malformed_email() {
        for email in [
            "",
            "plain",
            "@example.com",
            "user@",
            "a@b@c",
            "a b@c.d",
            "a\t@b.c",
            "a@b\u{a0}.c",
        ] {
            let form = ContactForm::new("Name", email, "hi");
            assert!(
                matches!(form.submit(), Err(ContactError::InvalidEmail { .. })),
                "accepted {email:?}"
            );
        }
    }

    #[test]
    fn rejects_blank_message() {
        let form = ContactForm::new("Name", "a@b.c", "  ");
        assert!(matches!(
            form.submit(),
            Err(ContactError::MissingMessage { .. })
        ));
    }
}

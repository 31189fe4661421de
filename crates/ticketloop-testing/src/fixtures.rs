//! Test data builders for ticket submissions.
//!
//! Builder pattern with configurable properties and sensible defaults.
//! Emails default to a unique address per build so tests do not collide on
//! the contacts unique constraint unless they mean to.

use ticketloop_core::TicketSubmission;
use uuid::Uuid;

/// Builder for ticket submissions.
pub struct SubmissionBuilder {
    full_name: String,
    email: Option<String>,
    issue_description: String,
}

impl SubmissionBuilder {
    /// Creates a builder with sensible defaults.
    pub fn new() -> Self {
        Self {
            full_name: "Jane Doe".to_string(),
            email: None,
            issue_description: "something is broken".to_string(),
        }
    }

    /// Sets the submitter name.
    #[must_use]
    pub fn full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = name.into();
        self
    }

    /// Sets the submitter email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the issue description.
    #[must_use]
    pub fn issue_description(mut self, description: impl Into<String>) -> Self {
        self.issue_description = description.into();
        self
    }

    /// Builds the submission.
    pub fn build(self) -> TicketSubmission {
        TicketSubmission {
            full_name: self.full_name,
            email: self
                .email
                .unwrap_or_else(|| format!("user-{}@example.com", Uuid::new_v4().simple())),
            issue_description: self.issue_description,
        }
    }
}

impl Default for SubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_generates_unique_emails() {
        let a = SubmissionBuilder::new().build();
        let b = SubmissionBuilder::new().build();

        assert_ne!(a.email, b.email);
    }

    #[test]
    fn builder_overrides_apply() {
        let submission = SubmissionBuilder::new()
            .full_name("John Roe")
            .email("john@example.com")
            .issue_description("printer jam")
            .build();

        assert_eq!(submission.full_name, "John Roe");
        assert_eq!(submission.email, "john@example.com");
        assert_eq!(submission.issue_description, "printer jam");
    }
}

//! Input validation and normalization for ticket submissions.
//!
//! Raw submitted fields are trimmed, the email is case-folded and checked
//! against address grammar, and free text is HTML-escaped before it ever
//! reaches the database. Validation failures abort the operation before any
//! persistence is attempted.

use std::str::FromStr;

use email_address::EmailAddress;
use serde::Deserialize;

use crate::error::{CoreError, Result};

/// Raw fields of a ticket submission, exactly as received.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicketSubmission {
    /// Submitter's display name.
    pub full_name: String,

    /// Submitter's email address. Deduplication key for contacts.
    pub email: String,

    /// Free-text description of the issue.
    pub issue_description: String,
}

/// A submission whose fields have passed validation and normalization.
///
/// Construction goes through [`normalize`]; the fields are safe to persist
/// and to embed in HTML-rendering consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSubmission {
    /// Trimmed, HTML-escaped display name. May be empty.
    pub full_name: String,

    /// Trimmed, lowercased, grammar-checked email address.
    pub email: String,

    /// Trimmed, HTML-escaped issue description. May be empty.
    pub issue_description: String,
}

/// Validates and normalizes a raw submission.
///
/// Free-text fields are trimmed and HTML-escaped; an empty result is
/// accepted. The email must parse as `local@domain` with a dotted domain,
/// otherwise the submission fails with a `Validation` error naming the
/// `email` field.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the email does not conform to
/// address grammar.
pub fn normalize(submission: TicketSubmission) -> Result<NormalizedSubmission> {
    Ok(NormalizedSubmission {
        full_name: sanitize_text(&submission.full_name),
        email: normalize_email(&submission.email)?,
        issue_description: sanitize_text(&submission.issue_description),
    })
}

/// Trims and HTML-escapes a free-text field.
fn sanitize_text(raw: &str) -> String {
    html_escape::encode_text(raw.trim()).into_owned()
}

/// Trims, lowercases, and validates an email address.
fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();

    let parsed = EmailAddress::from_str(&email)
        .map_err(|e| CoreError::validation("email", e.to_string()))?;

    // `a@b` parses, but submitters are external so a dotted public domain
    // is required.
    if !parsed.domain().contains('.') {
        return Err(CoreError::validation("email", "domain must contain a dot"));
    }

    Ok(sanitize_text(&email))
}

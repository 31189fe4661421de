//! Core domain models and strongly-typed identifiers.
//!
//! Defines contacts, tickets, and newtype ID wrappers for compile-time type
//! safety. Includes database serialization traits and the ticket status
//! state machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

type PgDb = sqlx::Postgres;
type PgRow = sqlx::postgres::PgRow;
type PgValueRef<'r> = sqlx::postgres::PgValueRef<'r>;
type PgTypeInfo = sqlx::postgres::PgTypeInfo;
type PgArgumentBuffer = sqlx::postgres::PgArgumentBuffer;
type EncodeResult =
    Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync + 'static>>;
type BoxDynError = sqlx::error::BoxDynError;

/// Strongly-typed contact identifier.
///
/// Wraps a UUID to prevent mixing with ticket identifiers. Contacts are
/// created once per distinct email and never deleted, so the ID is stable
/// for the lifetime of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub Uuid);

impl ContactId {
    /// Creates a new random contact ID.
    ///
    /// Uses UUID v4 for globally unique identifiers without coordination.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ContactId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl sqlx::Type<PgDb> for ContactId {
    fn type_info() -> PgTypeInfo {
        <Uuid as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for ContactId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let uuid = <Uuid as sqlx::Decode<PgDb>>::decode(value)?;
        Ok(Self(uuid))
    }
}

impl sqlx::Encode<'_, PgDb> for ContactId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <Uuid as sqlx::Encode<PgDb>>::encode_by_ref(&self.0, buf)
    }
}

/// Strongly-typed ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(pub Uuid);

impl TicketId {
    /// Creates a new random ticket ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TicketId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl sqlx::Type<PgDb> for TicketId {
    fn type_info() -> PgTypeInfo {
        <Uuid as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for TicketId {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let uuid = <Uuid as sqlx::Decode<PgDb>>::decode(value)?;
        Ok(Self(uuid))
    }
}

impl sqlx::Encode<'_, PgDb> for TicketId {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <Uuid as sqlx::Encode<PgDb>>::encode_by_ref(&self.0, buf)
    }
}

/// Ticket lifecycle status.
///
/// Tickets have exactly one transition:
///
/// ```text
/// Open -> Resolved
/// ```
///
/// Open is the initial state and Resolved is terminal. Resolving an
/// already-resolved ticket re-applies the terminal state and is not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Initial state after submission. Awaiting support action.
    Open,

    /// Terminal state. No transition leads out of Resolved.
    Resolved,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

impl sqlx::Type<PgDb> for TicketStatus {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<PgDb>>::type_info()
    }
}

impl<'r> sqlx::Decode<'r, PgDb> for TicketStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as sqlx::Decode<PgDb>>::decode(value)?;
        match s {
            "open" => Ok(Self::Open),
            "resolved" => Ok(Self::Resolved),
            _ => Err(format!("invalid ticket status: {s}").into()),
        }
    }
}

impl sqlx::Encode<'_, PgDb> for TicketStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> EncodeResult {
        <String as sqlx::Encode<PgDb>>::encode_by_ref(&self.to_string(), buf)
    }
}

/// A person who has submitted at least one ticket.
///
/// Contacts are deduplicated by email: the first submission under a new
/// email creates the row, later submissions reuse it. The stored name is
/// first-write-wins and the row is never updated or deleted by this
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    /// Unique identifier for this contact.
    pub id: ContactId,

    /// Display name captured from the first submission.
    pub full_name: String,

    /// Lowercased email address, unique across all contacts.
    pub email: String,

    /// When this contact was created.
    pub created_at: DateTime<Utc>,
}

/// A single support request tied to one contact.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ticket {
    /// Unique identifier for this ticket.
    pub id: TicketId,

    /// Owning contact. Required and immutable.
    pub contact_id: ContactId,

    /// Sanitized description of the issue.
    pub issue_description: String,

    /// Current lifecycle status.
    pub status: TicketStatus,

    /// When this ticket was submitted.
    pub created_at: DateTime<Utc>,
}

/// A ticket paired with its owning contact.
///
/// This is the only shape handed to API callers and to the notifier. The
/// contact is fetched with an explicit join, never as a serialization side
/// effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketWithContact {
    /// Unique identifier for this ticket.
    pub id: TicketId,

    /// Owning contact identifier.
    pub contact_id: ContactId,

    /// Sanitized description of the issue.
    pub issue_description: String,

    /// Current lifecycle status.
    pub status: TicketStatus,

    /// When this ticket was submitted.
    pub created_at: DateTime<Utc>,

    /// The owning contact's data.
    pub contact: Contact,
}

impl TicketWithContact {
    /// Pairs a ticket with its owning contact.
    pub fn new(ticket: Ticket, contact: Contact) -> Self {
        Self {
            id: ticket.id,
            contact_id: ticket.contact_id,
            issue_description: ticket.issue_description,
            status: ticket.status,
            created_at: ticket.created_at,
            contact,
        }
    }
}

impl<'r> sqlx::FromRow<'r, PgRow> for TicketWithContact {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Self {
            id: row.try_get("id")?,
            contact_id: row.try_get("contact_id")?,
            issue_description: row.try_get("issue_description")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            contact: Contact {
                id: row.try_get("contact_id")?,
                full_name: row.try_get("contact_full_name")?,
                email: row.try_get("contact_email")?,
                created_at: row.try_get("contact_created_at")?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_status_display_format() {
        assert_eq!(TicketStatus::Open.to_string(), "open");
        assert_eq!(TicketStatus::Resolved.to_string(), "resolved");
    }

    #[test]
    fn ticket_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TicketStatus::Open).unwrap(), r#""open""#);
        assert_eq!(serde_json::to_string(&TicketStatus::Resolved).unwrap(), r#""resolved""#);
    }

    #[test]
    fn ticket_with_contact_serializes_nested_contact() {
        let contact = Contact {
            id: ContactId::new(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            created_at: Utc::now(),
        };
        let ticket = Ticket {
            id: TicketId::new(),
            contact_id: contact.id,
            issue_description: "printer on fire".to_string(),
            status: TicketStatus::Open,
            created_at: Utc::now(),
        };

        let value =
            serde_json::to_value(TicketWithContact::new(ticket, contact.clone())).unwrap();

        assert_eq!(value["status"], "open");
        assert_eq!(value["contact"]["email"], "jane@example.com");
        assert_eq!(value["contact_id"], serde_json::to_value(contact.id).unwrap());
    }
}

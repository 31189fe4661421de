//! Integration tests for storage repositories.
//!
//! Tests database operations using the production Storage repositories to
//! ensure correctness of SQL queries and data integrity.

use ticketloop_core::{CoreError, ContactId, TicketId, TicketStatus};
use ticketloop_testing::TestEnv;

#[tokio::test]
async fn storage_health_check() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    assert!(storage.health_check().await.is_ok());
}

#[tokio::test]
async fn contact_insert_and_lookup_round_trip() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    let created = storage
        .contacts
        .insert_if_absent_in_tx(&mut tx, "Jane Doe", "jane@example.com")
        .await
        .unwrap()
        .expect("insert new contact");
    tx.commit().await.unwrap();

    assert_eq!(created.full_name, "Jane Doe");
    assert_eq!(created.email, "jane@example.com");

    let found = storage.contacts.find_by_email("jane@example.com").await.unwrap();
    assert_eq!(found.as_ref().map(|c| c.id), Some(created.id));

    let by_id = storage.contacts.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.map(|c| c.email), Some("jane@example.com".to_string()));
}

#[tokio::test]
async fn contact_insert_tolerates_existing_email() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    storage
        .contacts
        .insert_if_absent_in_tx(&mut tx, "Jane Doe", "jane@example.com")
        .await
        .unwrap()
        .expect("insert new contact");
    tx.commit().await.unwrap();

    // Second insert under the same email returns None instead of erroring
    let mut tx = storage.pool().begin().await.unwrap();
    let second = storage
        .contacts
        .insert_if_absent_in_tx(&mut tx, "Someone Else", "jane@example.com")
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(second.is_none());
    assert_eq!(storage.contacts.count().await.unwrap(), 1);

    // The stored name is the first writer's
    let stored = storage.contacts.find_by_email("jane@example.com").await.unwrap().unwrap();
    assert_eq!(stored.full_name, "Jane Doe");
}

#[tokio::test]
async fn ticket_create_joins_contact_on_read() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    let contact = storage
        .contacts
        .insert_if_absent_in_tx(&mut tx, "Jane Doe", "jane@example.com")
        .await
        .unwrap()
        .unwrap();
    let ticket =
        storage.tickets.create_in_tx(&mut tx, contact.id, "printer on fire").await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.contact_id, contact.id);

    let fetched = storage.tickets.find_with_contact(ticket.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, ticket.id);
    assert_eq!(fetched.issue_description, "printer on fire");
    assert_eq!(fetched.contact.email, "jane@example.com");
    assert_eq!(fetched.contact.full_name, "Jane Doe");
}

#[tokio::test]
async fn ticket_create_rejects_unknown_contact() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    let err = storage
        .tickets
        .create_in_tx(&mut tx, ContactId::new(), "orphan ticket")
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn list_returns_every_ticket() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    let contact = storage
        .contacts
        .insert_if_absent_in_tx(&mut tx, "Jane Doe", "jane@example.com")
        .await
        .unwrap()
        .unwrap();
    let first = storage.tickets.create_in_tx(&mut tx, contact.id, "first").await.unwrap();
    let second = storage.tickets.create_in_tx(&mut tx, contact.id, "second").await.unwrap();
    tx.commit().await.unwrap();

    let listed = storage.tickets.list_with_contacts().await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(storage.tickets.count().await.unwrap(), 2);
    let ids: Vec<_> = listed.iter().map(|t| t.id).collect();
    assert!(ids.contains(&first.id));
    assert!(ids.contains(&second.id));
    assert!(listed.iter().all(|t| t.contact.id == contact.id));
}

#[tokio::test]
async fn mark_resolved_reports_missing_tickets() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    let updated = storage.tickets.mark_resolved_in_tx(&mut tx, TicketId::new()).await.unwrap();
    tx.commit().await.unwrap();

    assert!(!updated);
}

#[tokio::test]
async fn mark_resolved_applies_terminal_state_repeatedly() {
    let env = TestEnv::new().await.unwrap();
    let storage = env.storage();

    let mut tx = storage.pool().begin().await.unwrap();
    let contact = storage
        .contacts
        .insert_if_absent_in_tx(&mut tx, "Jane Doe", "jane@example.com")
        .await
        .unwrap()
        .unwrap();
    let ticket = storage.tickets.create_in_tx(&mut tx, contact.id, "flaky").await.unwrap();
    tx.commit().await.unwrap();

    for _ in 0..2 {
        let mut tx = storage.pool().begin().await.unwrap();
        assert!(storage.tickets.mark_resolved_in_tx(&mut tx, ticket.id).await.unwrap());
        tx.commit().await.unwrap();
    }

    let fetched = storage.tickets.find_with_contact(ticket.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, TicketStatus::Resolved);
}

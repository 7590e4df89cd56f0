#![forbid(unsafe_code)]

use ad_app::WireError;
use ad_app::wire::{
    client_from_row, lead_from_row, lead_to_row, ticket_from_row, ticket_to_row,
};
use ad_core::model::{Lead, LeadSource, LeadStatus, TicketPriority, TicketStatus};
use ad_storage::Row;
use serde_json::{Value, json};

fn row(value: Value) -> Row {
    let Value::Object(map) = value else {
        panic!("wire rows are json objects");
    };
    map
}

#[test]
fn ticket_row_maps_every_field() {
    let ticket = ticket_from_row(row(json!({
        "id": "tkt-000007",
        "user_id": "gallery",
        "title": "Provenance question",
        "description": "Collector asks for the 1962 bill of sale",
        "category": "Authentication",
        "priority": "urgent",
        "status": "in-progress",
        "assigned_to": "Sarah Chen",
        "created_at": 1_700_000_001_000i64,
        "updated_at": 1_700_000_002_000i64,
    })))
    .expect("complete ticket row");

    assert_eq!(ticket.id, "tkt-000007");
    assert_eq!(ticket.priority, TicketPriority::Urgent);
    assert_eq!(ticket.status, TicketStatus::InProgress);
    assert_eq!(ticket.assigned_to.as_deref(), Some("Sarah Chen"));
    assert_eq!(ticket.created_at_ms, 1_700_000_001_000);
    assert_eq!(ticket.updated_at_ms, 1_700_000_002_000);
}

#[test]
fn missing_enums_fall_back_to_defaults() {
    let ticket = ticket_from_row(row(json!({
        "id": "tkt-000001",
        "title": "t", "description": "d", "category": "General",
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect("row without priority or status");
    assert_eq!(ticket.priority, TicketPriority::Medium);
    assert_eq!(ticket.status, TicketStatus::Open);

    let lead = lead_from_row(row(json!({
        "id": "lead-000001",
        "name": "n", "email": "e@example.com",
        "last_contact": 1i64, "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect("row without status or source");
    assert_eq!(lead.status, LeadStatus::Cold);
    assert_eq!(lead.source, LeadSource::Website);
    assert!(lead.art_interests.is_empty());
    assert_eq!(lead.budget, None);
}

#[test]
fn unknown_enum_values_are_rejected_with_the_offending_value() {
    let err = ticket_from_row(row(json!({
        "id": "tkt-000001",
        "title": "t", "description": "d", "category": "General",
        "status": "reopened",
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect_err("unknown status");
    match err {
        WireError::UnknownEnum { field, value } => {
            assert_eq!(field, "status");
            assert_eq!(value, "reopened");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rows_without_identity_or_timestamps_are_rejected() {
    let err = ticket_from_row(row(json!({
        "title": "t", "description": "d", "category": "General",
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect_err("missing id");
    assert!(matches!(err, WireError::MissingField("id")));

    let err = lead_from_row(row(json!({
        "id": "lead-000001", "name": "n", "email": "e@example.com",
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect_err("missing last_contact");
    assert!(matches!(err, WireError::MissingField("last_contact")));
}

#[test]
fn client_purchases_read_as_zero_when_absent() {
    let client = client_from_row(row(json!({
        "id": "cli-000001",
        "name": "Museum of Modern Glass", "email": "curator@momg.org",
        "total_purchases": null,
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect("client without purchase history");
    assert_eq!(client.total_purchases, 0.0);
    assert!(client.art_collection.is_empty());
    assert_eq!(client.last_purchase_ms, None);

    let client = client_from_row(row(json!({
        "id": "cli-000002",
        "name": "n", "email": "e@example.com",
        "total_purchases": 125_000,
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect("integer purchase total");
    assert_eq!(client.total_purchases, 125_000.0);
}

#[test]
fn blank_optional_text_reads_as_unset() {
    let ticket = ticket_from_row(row(json!({
        "id": "tkt-000001",
        "title": "t", "description": "d", "category": "General",
        "assigned_to": "   ",
        "created_at": 1i64, "updated_at": 1i64,
    })))
    .expect("blank assignee");
    assert_eq!(ticket.assigned_to, None);
}

#[test]
fn lead_round_trips_through_its_row_form() {
    let lead = Lead {
        id: "lead-000042".to_string(),
        name: "Maria Rodriguez".to_string(),
        email: "maria@artcollector.com".to_string(),
        phone: Some("+1 555 0102".to_string()),
        company: None,
        status: LeadStatus::Hot,
        source: LeadSource::Exhibition,
        art_interests: vec!["Contemporary".to_string(), "Sculpture".to_string()],
        budget: Some(50_000.0),
        notes: Some("Met at the spring fair".to_string()),
        last_contact_ms: 1_700_000_003_000,
        created_at_ms: 1_700_000_001_000,
        updated_at_ms: 1_700_000_002_000,
    };
    let round_tripped = lead_from_row(lead_to_row(&lead)).expect("round trip");
    assert_eq!(round_tripped, lead);
}

#[test]
fn ticket_rows_keep_snake_case_keys() {
    let ticket = ticket_from_row(row(json!({
        "id": "tkt-000001",
        "title": "t", "description": "d", "category": "General",
        "assigned_to": "Sarah Chen",
        "created_at": 1i64, "updated_at": 2i64,
    })))
    .expect("ticket row");
    let serialized = ticket_to_row(&ticket);
    assert_eq!(
        serialized.get("assigned_to").and_then(Value::as_str),
        Some("Sarah Chen")
    );
    assert_eq!(serialized.get("created_at").and_then(Value::as_i64), Some(1));
    assert_eq!(serialized.get("updated_at").and_then(Value::as_i64), Some(2));
    assert!(!serialized.contains_key("assignedTo"));
}

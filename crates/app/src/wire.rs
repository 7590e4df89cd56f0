#![forbid(unsafe_code)]

//! Wire rows as the store serves them: snake_case keys, timestamps as
//! integer milliseconds. All mapping into typed records happens here, at
//! the cache boundary, so the rest of the crate never sees raw rows.

use crate::cache::{NoDraft, TableRecord};
use ad_core::ids::UserId;
use ad_core::model::{
    Client, EntityKind, Lead, LeadDraft, LeadSource, LeadStatus, Ticket, TicketDraft,
    TicketPriority, TicketStatus, ValidationError,
};
use ad_storage::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug)]
pub enum WireError {
    /// The row does not deserialize into the expected shape.
    Shape(serde_json::Error),
    MissingField(&'static str),
    UnknownEnum {
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape(err) => write!(f, "unexpected row shape: {err}"),
            Self::MissingField(field) => write!(f, "row is missing {field}"),
            Self::UnknownEnum { field, value } => {
                write!(f, "row holds unknown {field}: {value:?}")
            }
        }
    }
}

impl std::error::Error for WireError {}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct TicketRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct LeadRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub art_interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ClientRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_purchases: Option<f64>,
    #[serde(default)]
    pub art_collection: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_purchase: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

fn to_row<T: Serialize>(value: &T) -> Row {
    // Row structs always serialize to JSON objects.
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Row::new(),
    }
}

fn required_id(id: Option<String>) -> Result<String, WireError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(WireError::MissingField("id")),
    }
}

fn required_ms(value: Option<i64>, field: &'static str) -> Result<i64, WireError> {
    value.ok_or(WireError::MissingField(field))
}

/// Blank optional text means "not set" regardless of how the form or the
/// store spelled it.
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

pub fn ticket_from_row(row: Row) -> Result<Ticket, WireError> {
    let wire: TicketRow = serde_json::from_value(Value::Object(row)).map_err(WireError::Shape)?;
    let priority = match optional_text(wire.priority) {
        None => TicketPriority::default(),
        Some(value) => TicketPriority::parse(&value).ok_or(WireError::UnknownEnum {
            field: "priority",
            value,
        })?,
    };
    let status = match optional_text(wire.status) {
        None => TicketStatus::default(),
        Some(value) => TicketStatus::parse(&value).ok_or(WireError::UnknownEnum {
            field: "status",
            value,
        })?,
    };
    Ok(Ticket {
        id: required_id(wire.id)?,
        title: wire.title,
        description: wire.description,
        category: wire.category,
        priority,
        status,
        assigned_to: optional_text(wire.assigned_to),
        created_at_ms: required_ms(wire.created_at, "created_at")?,
        updated_at_ms: required_ms(wire.updated_at, "updated_at")?,
    })
}

pub fn ticket_to_row(ticket: &Ticket) -> Row {
    to_row(&TicketRow {
        id: Some(ticket.id.clone()),
        user_id: None,
        title: ticket.title.clone(),
        description: ticket.description.clone(),
        category: ticket.category.clone(),
        priority: Some(ticket.priority.as_str().to_string()),
        status: Some(ticket.status.as_str().to_string()),
        assigned_to: ticket.assigned_to.clone(),
        created_at: Some(ticket.created_at_ms),
        updated_at: Some(ticket.updated_at_ms),
    })
}

pub fn lead_from_row(row: Row) -> Result<Lead, WireError> {
    let wire: LeadRow = serde_json::from_value(Value::Object(row)).map_err(WireError::Shape)?;
    let status = match optional_text(wire.status) {
        None => LeadStatus::default(),
        Some(value) => LeadStatus::parse(&value).ok_or(WireError::UnknownEnum {
            field: "status",
            value,
        })?,
    };
    let source = match optional_text(wire.source) {
        None => LeadSource::default(),
        Some(value) => LeadSource::parse(&value).ok_or(WireError::UnknownEnum {
            field: "source",
            value,
        })?,
    };
    Ok(Lead {
        id: required_id(wire.id)?,
        name: wire.name,
        email: wire.email,
        phone: optional_text(wire.phone),
        company: optional_text(wire.company),
        status,
        source,
        art_interests: wire.art_interests,
        budget: wire.budget,
        notes: optional_text(wire.notes),
        last_contact_ms: required_ms(wire.last_contact, "last_contact")?,
        created_at_ms: required_ms(wire.created_at, "created_at")?,
        updated_at_ms: required_ms(wire.updated_at, "updated_at")?,
    })
}

pub fn lead_to_row(lead: &Lead) -> Row {
    to_row(&LeadRow {
        id: Some(lead.id.clone()),
        user_id: None,
        name: lead.name.clone(),
        email: lead.email.clone(),
        phone: lead.phone.clone(),
        company: lead.company.clone(),
        status: Some(lead.status.as_str().to_string()),
        source: Some(lead.source.as_str().to_string()),
        art_interests: lead.art_interests.clone(),
        budget: lead.budget,
        notes: lead.notes.clone(),
        last_contact: Some(lead.last_contact_ms),
        created_at: Some(lead.created_at_ms),
        updated_at: Some(lead.updated_at_ms),
    })
}

pub fn client_from_row(row: Row) -> Result<Client, WireError> {
    let wire: ClientRow = serde_json::from_value(Value::Object(row)).map_err(WireError::Shape)?;
    Ok(Client {
        id: required_id(wire.id)?,
        name: wire.name,
        email: wire.email,
        phone: optional_text(wire.phone),
        company: optional_text(wire.company),
        // The store reports null purchases for clients converted before
        // billing was wired up; they read as zero.
        total_purchases: wire.total_purchases.unwrap_or(0.0),
        art_collection: wire.art_collection,
        preferred_artist: optional_text(wire.preferred_artist),
        notes: optional_text(wire.notes),
        last_purchase_ms: wire.last_purchase,
        created_at_ms: required_ms(wire.created_at, "created_at")?,
        updated_at_ms: required_ms(wire.updated_at, "updated_at")?,
    })
}

pub fn client_to_row(client: &Client) -> Row {
    to_row(&ClientRow {
        id: Some(client.id.clone()),
        user_id: None,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        company: client.company.clone(),
        total_purchases: Some(client.total_purchases),
        art_collection: client.art_collection.clone(),
        preferred_artist: client.preferred_artist.clone(),
        notes: client.notes.clone(),
        last_purchase: client.last_purchase_ms,
        created_at: Some(client.created_at_ms),
        updated_at: Some(client.updated_at_ms),
    })
}

impl TableRecord for Ticket {
    const KIND: EntityKind = EntityKind::Ticket;
    type Draft = TicketDraft;

    fn from_row(row: Row) -> Result<Self, WireError> {
        ticket_from_row(row)
    }

    fn draft_to_row(draft: &TicketDraft, owner: &UserId) -> Row {
        to_row(&TicketRow {
            id: None,
            user_id: Some(owner.as_str().to_string()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            priority: Some(draft.priority.as_str().to_string()),
            status: Some(draft.status.as_str().to_string()),
            assigned_to: optional_text(draft.assigned_to.clone()),
            created_at: None,
            updated_at: None,
        })
    }

    fn validate(draft: &TicketDraft) -> Result<(), ValidationError> {
        draft.validate()
    }
}

impl TableRecord for Lead {
    const KIND: EntityKind = EntityKind::Lead;
    type Draft = LeadDraft;

    fn from_row(row: Row) -> Result<Self, WireError> {
        lead_from_row(row)
    }

    fn draft_to_row(draft: &LeadDraft, owner: &UserId) -> Row {
        to_row(&LeadRow {
            id: None,
            user_id: Some(owner.as_str().to_string()),
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: optional_text(draft.phone.clone()),
            company: optional_text(draft.company.clone()),
            status: Some(draft.status.as_str().to_string()),
            source: Some(draft.source.as_str().to_string()),
            art_interests: draft.art_interests.clone(),
            budget: draft.budget,
            notes: optional_text(draft.notes.clone()),
            last_contact: Some(draft.last_contact_ms),
            created_at: None,
            updated_at: None,
        })
    }

    fn validate(draft: &LeadDraft) -> Result<(), ValidationError> {
        draft.validate()
    }
}

impl TableRecord for Client {
    const KIND: EntityKind = EntityKind::Client;
    type Draft = NoDraft;

    fn from_row(row: Row) -> Result<Self, WireError> {
        client_from_row(row)
    }

    fn draft_to_row(draft: &NoDraft, _owner: &UserId) -> Row {
        match *draft {}
    }

    fn validate(draft: &NoDraft) -> Result<(), ValidationError> {
        match *draft {}
    }
}

use super::*;

#[test]
fn priority_round_trips_and_defaults_to_medium() {
    for priority in [
        TicketPriority::Low,
        TicketPriority::Medium,
        TicketPriority::High,
        TicketPriority::Urgent,
    ] {
        assert_eq!(TicketPriority::parse(priority.as_str()), Some(priority));
    }
    assert_eq!(TicketPriority::parse("critical"), None);
    assert_eq!(TicketPriority::default(), TicketPriority::Medium);
}

#[test]
fn status_round_trips_and_defaults_to_open() {
    for status in TicketStatus::ALL.iter().copied() {
        assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(TicketStatus::parse("in progress"), None);
    assert_eq!(TicketStatus::default(), TicketStatus::Open);
}

#[test]
fn lead_enums_round_trip() {
    for status in [
        LeadStatus::Cold,
        LeadStatus::Warm,
        LeadStatus::Hot,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ] {
        assert_eq!(LeadStatus::parse(status.as_str()), Some(status));
    }
    for source in [
        LeadSource::Website,
        LeadSource::Referral,
        LeadSource::Exhibition,
        LeadSource::SocialMedia,
        LeadSource::ColdCall,
        LeadSource::Other,
    ] {
        assert_eq!(LeadSource::parse(source.as_str()), Some(source));
    }
    assert_eq!(LeadSource::parse("walk_in"), None);
}

#[test]
fn ticket_draft_requires_title_description_category() {
    let draft = TicketDraft::new("Painting authentication", "Need certificate", "Authentication");
    assert_eq!(draft.validate(), Ok(()));
    assert_eq!(draft.priority, TicketPriority::Medium);
    assert_eq!(draft.status, TicketStatus::Open);

    let mut missing = draft.clone();
    missing.title = "   ".to_string();
    assert_eq!(missing.validate(), Err(ValidationError::MissingField("title")));

    let mut missing = draft.clone();
    missing.description = String::new();
    assert_eq!(
        missing.validate(),
        Err(ValidationError::MissingField("description"))
    );

    let mut missing = draft;
    missing.category = String::new();
    assert_eq!(
        missing.validate(),
        Err(ValidationError::MissingField("category"))
    );
}

#[test]
fn lead_draft_rejects_negative_budget() {
    let mut draft = LeadDraft::new("Maria Rodriguez", "maria@artcollector.com", 1_700_000_000_000);
    assert_eq!(draft.validate(), Ok(()));

    draft.budget = Some(-1.0);
    assert_eq!(
        draft.validate(),
        Err(ValidationError::NegativeAmount("budget"))
    );

    draft.budget = Some(50_000.0);
    draft.email = String::new();
    assert_eq!(draft.validate(), Err(ValidationError::MissingField("email")));
}

#[test]
fn entity_kind_maps_to_tables() {
    assert_eq!(EntityKind::Ticket.table(), "tickets");
    assert_eq!(EntityKind::Lead.table(), "leads");
    assert_eq!(EntityKind::Client.table(), "clients");
}

#[test]
fn user_id_validation() {
    use crate::ids::{UserId, UserIdError};

    assert_eq!(UserId::try_new("").unwrap_err(), UserIdError::Empty);
    assert_eq!(UserId::try_new("   ").unwrap_err(), UserIdError::Empty);
    assert_eq!(
        UserId::try_new("u".repeat(129)).unwrap_err(),
        UserIdError::TooLong
    );
    assert_eq!(UserId::try_new("user-7").unwrap().as_str(), "user-7");
}

#![forbid(unsafe_code)]

//! Form state holds exactly what the user typed. Submit validates and
//! hands a draft to the cache; the screen keeps the form instance around
//! on failure so nothing has to be re-entered.

use ad_core::model::{
    LeadDraft, LeadSource, LeadStatus, TicketDraft, TicketPriority, TicketStatus, ValidationError,
};

pub const TICKET_CATEGORIES: &[&str] = &[
    "Authentication",
    "Exhibition",
    "Sales",
    "Shipping",
    "Conservation",
    "Insurance",
    "Client Relations",
    "Technical",
    "General",
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: TicketPriority,
    pub assigned_to: String,
}

impl TicketForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&self) -> Result<TicketDraft, ValidationError> {
        let draft = TicketDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            priority: self.priority,
            status: TicketStatus::default(),
            assigned_to: non_empty(&self.assigned_to),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: LeadStatus,
    pub source: LeadSource,
    /// Comma-separated as typed; split on submit.
    pub art_interests: String,
    pub budget: String,
    pub notes: String,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// `last_contact_ms` defaults to submit time, matching the behavior of
    /// the lead entry screen.
    pub fn submit(&self, last_contact_ms: i64) -> Result<LeadDraft, ValidationError> {
        let budget = match self.budget.trim() {
            "" => None,
            text => Some(
                text.parse::<f64>()
                    .map_err(|_| ValidationError::InvalidNumber("budget"))?,
            ),
        };
        let draft = LeadDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            company: non_empty(&self.company),
            status: self.status,
            source: self.source,
            art_interests: split_tags(&self.art_interests),
            budget,
            notes: non_empty(&self.notes),
            last_contact_ms,
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_form_trims_and_defaults() {
        let form = TicketForm {
            title: "  Frame repair  ".to_string(),
            description: "Gilt frame chipped in transit".to_string(),
            category: "Conservation".to_string(),
            priority: TicketPriority::High,
            assigned_to: "   ".to_string(),
        };
        let draft = form.submit().expect("valid form");
        assert_eq!(draft.title, "Frame repair");
        assert_eq!(draft.status, TicketStatus::Open);
        assert_eq!(draft.assigned_to, None);
    }

    #[test]
    fn ticket_form_rejects_missing_required_fields() {
        let form = TicketForm {
            title: "Missing the rest".to_string(),
            ..TicketForm::new()
        };
        assert_eq!(
            form.submit(),
            Err(ValidationError::MissingField("description"))
        );
    }

    #[test]
    fn lead_form_splits_interest_tags_in_order() {
        let form = LeadForm {
            name: "Maria Rodriguez".to_string(),
            email: "maria@artcollector.com".to_string(),
            art_interests: " Contemporary , Abstract ,, ".to_string(),
            ..LeadForm::new()
        };
        let draft = form.submit(1_700_000_000_000).expect("valid form");
        assert_eq!(draft.art_interests, ["Contemporary", "Abstract"]);
        assert_eq!(draft.budget, None);
        assert_eq!(draft.status, LeadStatus::Cold);
        assert_eq!(draft.source, LeadSource::Website);
        assert_eq!(draft.last_contact_ms, 1_700_000_000_000);
    }

    #[test]
    fn lead_form_budget_parsing() {
        let mut form = LeadForm {
            name: "David Chen".to_string(),
            email: "d.chen@modernspaces.com".to_string(),
            budget: "25000".to_string(),
            ..LeadForm::new()
        };
        let draft = form.submit(0).expect("valid form");
        assert_eq!(draft.budget, Some(25_000.0));

        form.budget = "lots".to_string();
        assert_eq!(
            form.submit(0),
            Err(ValidationError::InvalidNumber("budget"))
        );

        form.budget = "-5".to_string();
        assert_eq!(
            form.submit(0),
            Err(ValidationError::NegativeAmount("budget"))
        );
    }
}

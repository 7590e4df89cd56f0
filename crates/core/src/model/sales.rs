#![forbid(unsafe_code)]

use super::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeadStatus {
    Cold,
    Warm,
    Hot,
    Converted,
    Lost,
}

impl LeadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::Cold => "cold",
            LeadStatus::Warm => "warm",
            LeadStatus::Hot => "hot",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cold" => Some(LeadStatus::Cold),
            "warm" => Some(LeadStatus::Warm),
            "hot" => Some(LeadStatus::Hot),
            "converted" => Some(LeadStatus::Converted),
            "lost" => Some(LeadStatus::Lost),
            _ => None,
        }
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        LeadStatus::Cold
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeadSource {
    Website,
    Referral,
    Exhibition,
    SocialMedia,
    ColdCall,
    Other,
}

impl LeadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::Exhibition => "exhibition",
            LeadSource::SocialMedia => "social_media",
            LeadSource::ColdCall => "cold_call",
            LeadSource::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "website" => Some(LeadSource::Website),
            "referral" => Some(LeadSource::Referral),
            "exhibition" => Some(LeadSource::Exhibition),
            "social_media" => Some(LeadSource::SocialMedia),
            "cold_call" => Some(LeadSource::ColdCall),
            "other" => Some(LeadSource::Other),
            _ => None,
        }
    }
}

impl Default for LeadSource {
    fn default() -> Self {
        LeadSource::Website
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: LeadSource,
    /// Tag order is display order; tags carry no further semantics.
    pub art_interests: Vec<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    pub last_contact_ms: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: LeadSource,
    pub art_interests: Vec<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    pub last_contact_ms: i64,
}

impl LeadDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, last_contact_ms: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            company: None,
            status: LeadStatus::default(),
            source: LeadSource::default(),
            art_interests: Vec::new(),
            budget: None,
            notes: None,
            last_contact_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.budget.is_some_and(|amount| amount < 0.0) {
            return Err(ValidationError::NegativeAmount("budget"));
        }
        Ok(())
    }
}

/// Read-only in the portal: clients are converted from leads by back-office
/// tooling, so no draft type exists for them.
#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub total_purchases: f64,
    pub art_collection: Vec<String>,
    pub preferred_artist: Option<String>,
    pub notes: Option<String>,
    pub last_purchase_ms: Option<i64>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

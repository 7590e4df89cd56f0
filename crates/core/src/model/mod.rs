#![forbid(unsafe_code)]

mod sales;
mod tickets;

pub use sales::*;
pub use tickets::*;

#[cfg(test)]
mod tests;

/// The three record collections served by the portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ticket,
    Lead,
    Client,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Ticket => "ticket",
            EntityKind::Lead => "lead",
            EntityKind::Client => "client",
        }
    }

    /// Name of the remote table backing this kind.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Ticket => "tickets",
            EntityKind::Lead => "leads",
            EntityKind::Client => "clients",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    NegativeAmount(&'static str),
    InvalidNumber(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::NegativeAmount(field) => write!(f, "{field} must not be negative"),
            Self::InvalidNumber(field) => write!(f, "{field} must be a number"),
        }
    }
}

impl std::error::Error for ValidationError {}

#![forbid(unsafe_code)]

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient, non-fatal message shown at the top of a screen until the
/// next action replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::error(err.to_string())
    }

    pub fn render(&self) -> String {
        match self.level {
            NoticeLevel::Info => format!("[info] {}", self.message),
            NoticeLevel::Error => format!("[error] {}", self.message),
        }
    }
}

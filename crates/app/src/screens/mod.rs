#![forbid(unsafe_code)]

mod sales;
mod support;

pub use sales::{SalesScreen, SalesTab};
pub use support::{SupportScreen, SupportView};

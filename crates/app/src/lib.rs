#![forbid(unsafe_code)]

mod cache;
mod error;
mod forms;
mod gate;
mod notices;
mod screens;
mod views;
pub mod wire;

pub use cache::{NoDraft, TableRecord, ViewCache};
pub use error::{AppError, DataError};
pub use forms::{LeadForm, TicketForm};
pub use gate::{GateState, Redirect, SessionGate};
pub use notices::{Notice, NoticeLevel};
pub use screens::{SalesScreen, SalesTab, SupportScreen, SupportView};
pub use views::{render_client_list, render_lead_list, render_ticket_list};
pub use wire::WireError;

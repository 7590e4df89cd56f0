#![forbid(unsafe_code)]

mod sales;
mod stats;
mod tickets;
mod time;

pub use sales::{render_client_list, render_lead_list};
pub(crate) use stats::{render_sales_stats, render_support_stats};
pub use tickets::render_ticket_list;
pub(crate) use self::time::ts_ms_to_date;

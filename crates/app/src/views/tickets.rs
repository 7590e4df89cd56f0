#![forbid(unsafe_code)]

use super::ts_ms_to_date;
use ad_core::model::{Ticket, TicketStatus};

/// Read-only projection of the ticket list. With `show_actions` each row
/// carries the status-change hint the all-tickets screen offers.
pub fn render_ticket_list(tickets: &[Ticket], show_actions: bool) -> String {
    if tickets.is_empty() {
        return "No tickets found\nCreate your first support ticket to get started.\n".to_string();
    }

    let mut out = String::new();
    for ticket in tickets {
        out.push_str(&format!(
            "{} [{}] [{}] ({})\n",
            ticket.title,
            ticket.priority.label(),
            ticket.status.label(),
            ticket.category,
        ));
        out.push_str(&format!("  {}\n", ticket.description));
        match &ticket.assigned_to {
            Some(assignee) => out.push_str(&format!("  Assigned to: {assignee}")),
            None => out.push_str("  Unassigned"),
        }
        out.push_str(&format!(
            "  |  Created: {}  |  {}\n",
            ts_ms_to_date(ticket.created_at_ms),
            ticket.id,
        ));
        if show_actions {
            let options: Vec<&str> = TicketStatus::ALL
                .iter()
                .filter(|status| **status != ticket.status)
                .map(|status| status.as_str())
                .collect();
            out.push_str(&format!("  Set status: {}\n", options.join(" | ")));
        }
        out.push('\n');
    }
    out
}

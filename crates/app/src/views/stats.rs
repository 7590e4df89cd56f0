#![forbid(unsafe_code)]

use ad_core::model::{Client, Lead, LeadStatus, Ticket, TicketPriority, TicketStatus};

pub(crate) fn render_support_stats(tickets: &[Ticket]) -> String {
    let open = count_status(tickets, TicketStatus::Open);
    let in_progress = count_status(tickets, TicketStatus::InProgress);
    let resolved = count_status(tickets, TicketStatus::Resolved);
    let urgent = tickets
        .iter()
        .filter(|ticket| ticket.priority == TicketPriority::Urgent)
        .count();

    let mut out = format!(
        "Total Tickets: {}  |  Open Tickets: {open}  |  In Progress: {in_progress}  |  Resolved: {resolved}\n",
        tickets.len(),
    );
    if urgent > 0 {
        let plural = if urgent > 1 { "s" } else { "" };
        out.push_str(&format!("{urgent} urgent ticket{plural}\n"));
    }
    out
}

fn count_status(tickets: &[Ticket], status: TicketStatus) -> usize {
    tickets
        .iter()
        .filter(|ticket| ticket.status == status)
        .count()
}

pub(crate) fn render_sales_stats(leads: &[Lead], clients: &[Client]) -> String {
    let hot = leads
        .iter()
        .filter(|lead| lead.status == LeadStatus::Hot)
        .count();
    let pipeline: f64 = leads.iter().filter_map(|lead| lead.budget).sum();
    format!(
        "Total Leads: {}  |  Hot Leads: {hot}  |  Total Clients: {}  |  Revenue Pipeline: {}\n",
        leads.len(),
        clients.len(),
        format_usd(pipeline),
    )
}

/// Dollar amount with thousands separators; cents only when present.
pub(crate) fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let mut whole = amount.trunc() as i64;
    let mut cents = ((amount - amount.trunc()) * 100.0).round() as i64;
    if cents >= 100 {
        whole += 1;
        cents = 0;
    }

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting_groups_thousands() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(950.0), "$950");
        assert_eq!(format_usd(50_000.0), "$50,000");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
        assert_eq!(format_usd(125.5), "$125.50");
    }
}

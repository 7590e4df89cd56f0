#![forbid(unsafe_code)]

use super::stats::format_usd;
use super::ts_ms_to_date;
use ad_core::model::{Client, Lead};

pub fn render_lead_list(leads: &[Lead]) -> String {
    if leads.is_empty() {
        return "No leads found. Create your first lead to get started.\n".to_string();
    }

    let mut out = String::new();
    for lead in leads {
        out.push_str(&format!(
            "{} [{}] via {}\n",
            lead.name,
            lead.status.as_str(),
            lead.source.as_str(),
        ));
        out.push_str(&format!("  {}", lead.email));
        if let Some(phone) = &lead.phone {
            out.push_str(&format!("  |  {phone}"));
        }
        if let Some(company) = &lead.company {
            out.push_str(&format!("  |  {company}"));
        }
        out.push('\n');
        if !lead.art_interests.is_empty() {
            out.push_str(&format!("  Interests: {}\n", lead.art_interests.join(", ")));
        }
        if let Some(budget) = lead.budget {
            out.push_str(&format!("  Budget: {}\n", format_usd(budget)));
        }
        if let Some(notes) = &lead.notes {
            out.push_str(&format!("  Notes: {notes}\n"));
        }
        out.push_str(&format!(
            "  Last contact: {}  |  {}\n\n",
            ts_ms_to_date(lead.last_contact_ms),
            lead.id,
        ));
    }
    out
}

pub fn render_client_list(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "No clients found. Convert leads to build your client base.\n".to_string();
    }

    let mut out = String::new();
    for client in clients {
        out.push_str(&format!("{}\n", client.name));
        out.push_str(&format!("  {}", client.email));
        if let Some(company) = &client.company {
            out.push_str(&format!("  |  {company}"));
        }
        out.push('\n');
        out.push_str(&format!(
            "  Total purchases: {}\n",
            format_usd(client.total_purchases)
        ));
        if !client.art_collection.is_empty() {
            out.push_str(&format!(
                "  Collection: {}\n",
                client.art_collection.join(", ")
            ));
        }
        if let Some(artist) = &client.preferred_artist {
            out.push_str(&format!("  Preferred artist: {artist}\n"));
        }
        if let Some(last_purchase) = client.last_purchase_ms {
            out.push_str(&format!(
                "  Last purchase: {}\n",
                ts_ms_to_date(last_purchase)
            ));
        }
        out.push_str(&format!("  {}\n\n", client.id));
    }
    out
}

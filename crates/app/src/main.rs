#![forbid(unsafe_code)]

use ad_app::{SalesScreen, SalesTab, SupportScreen, SupportView};
use ad_core::model::{LeadSource, LeadStatus, TicketPriority, TicketStatus};
use ad_storage::{RemoteStore, SqliteStore};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

fn usage() -> &'static str {
    "artdesk: gallery support and sales portal\n\n\
USAGE:\n\
  artdesk [--storage-dir DIR] [--user ID] [--email ADDR]\n\n\
COMMANDS (at the prompt):\n\
  dashboard | tickets | sales | leads | clients\n\
  new-ticket | new-lead\n\
  status <ticket-id> <open|in-progress|resolved|closed>\n\
  refresh | signout | quit\n"
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

struct PortalConfig {
    storage_dir: PathBuf,
    user: String,
    email: String,
}

fn parse_config() -> Result<PortalConfig, String> {
    let mut storage_dir = env_var("ARTDESK_STORAGE_DIR").map(PathBuf::from);
    let mut user = env_var("ARTDESK_USER");
    let mut email = env_var("ARTDESK_EMAIL");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--storage-dir" => {
                storage_dir = Some(PathBuf::from(
                    args.next().ok_or("--storage-dir requires a value")?,
                ));
            }
            "--user" => user = Some(args.next().ok_or("--user requires a value")?),
            "--email" => email = Some(args.next().ok_or("--email requires a value")?),
            "--help" | "-h" => return Err(usage().to_string()),
            other => return Err(format!("unknown argument: {other}\n\n{}", usage())),
        }
    }

    let storage_dir = storage_dir.unwrap_or_else(|| PathBuf::from(".artdesk"));
    let user = user.unwrap_or_else(|| "gallery".to_string());
    let email = email.unwrap_or_else(|| format!("{user}@artdesk.local"));
    Ok(PortalConfig {
        storage_dir,
        user,
        email,
    })
}

fn prompt_line(stdin: &std::io::Stdin, label: &str) -> Option<String> {
    print!("{label}: ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn run_new_ticket(stdin: &std::io::Stdin, screen: &mut SupportScreen) {
    screen.open_ticket_form();
    let Some(form) = screen.ticket_form_mut() else {
        return;
    };
    let Some(title) = prompt_line(stdin, "Title") else {
        return;
    };
    form.title = title;
    let Some(category) = prompt_line(stdin, "Category") else {
        return;
    };
    form.category = category;
    if let Some(priority) = prompt_line(stdin, "Priority [low|medium|high|urgent]") {
        if let Some(parsed) = TicketPriority::parse(priority.as_str()) {
            form.priority = parsed;
        }
    }
    let Some(description) = prompt_line(stdin, "Description") else {
        return;
    };
    form.description = description;
    if let Some(assignee) = prompt_line(stdin, "Assign to (optional)") {
        form.assigned_to = assignee;
    }
    // Failure keeps the form open with everything still filled in.
    let _ = screen.submit_ticket_form();
}

fn run_new_lead(stdin: &std::io::Stdin, screen: &mut SalesScreen) {
    screen.open_lead_form();
    let Some(form) = screen.lead_form_mut() else {
        return;
    };
    let Some(name) = prompt_line(stdin, "Name") else {
        return;
    };
    form.name = name;
    let Some(email) = prompt_line(stdin, "Email") else {
        return;
    };
    form.email = email;
    if let Some(status) = prompt_line(stdin, "Status [cold|warm|hot|converted|lost]") {
        if let Some(parsed) = LeadStatus::parse(status.as_str()) {
            form.status = parsed;
        }
    }
    if let Some(source) = prompt_line(
        stdin,
        "Source [website|referral|exhibition|social_media|cold_call|other]",
    ) {
        if let Some(parsed) = LeadSource::parse(source.as_str()) {
            form.source = parsed;
        }
    }
    if let Some(interests) = prompt_line(stdin, "Art interests (comma separated)") {
        form.art_interests = interests;
    }
    if let Some(budget) = prompt_line(stdin, "Budget (optional)") {
        form.budget = budget;
    }
    if let Some(company) = prompt_line(stdin, "Company (optional)") {
        form.company = company;
    }
    if let Some(notes) = prompt_line(stdin, "Notes (optional)") {
        form.notes = notes;
    }
    let _ = screen.submit_lead_form();
}

fn main() {
    let config = match parse_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let store = match SqliteStore::open(&config.storage_dir) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            eprintln!("artdesk: cannot open store: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = store.sign_in(config.user.as_str(), config.email.as_str()) {
        eprintln!("artdesk: sign in failed: {err}");
        std::process::exit(1);
    }

    let shared: Arc<dyn RemoteStore> = store;
    let mut support = SupportScreen::mount(Arc::clone(&shared));
    let mut sales = SalesScreen::mount(Arc::clone(&shared));
    let mut on_sales = false;

    let stdin = std::io::stdin();
    println!("{}", support.render());
    loop {
        if support.redirect().is_some() || sales.redirect().is_some() {
            println!("Signed out. Bye.");
            return;
        }
        let Some(line) = prompt_line(&stdin, "artdesk") else {
            return;
        };
        match line.as_str() {
            "" => continue,
            "quit" | "exit" => return,
            "help" => {
                println!("{}", usage());
                continue;
            }
            "dashboard" => {
                on_sales = false;
                support.set_view(SupportView::Dashboard);
                support.refresh();
            }
            "tickets" => {
                on_sales = false;
                support.set_view(SupportView::Tickets);
                support.refresh();
            }
            "sales" | "leads" => {
                on_sales = true;
                sales.set_tab(SalesTab::Leads);
                sales.refresh();
            }
            "clients" => {
                on_sales = true;
                sales.set_tab(SalesTab::Clients);
                sales.refresh();
            }
            "refresh" => {
                if on_sales {
                    sales.refresh();
                } else {
                    support.refresh();
                }
            }
            "new-ticket" => {
                on_sales = false;
                run_new_ticket(&stdin, &mut support);
            }
            "new-lead" => {
                on_sales = true;
                run_new_lead(&stdin, &mut sales);
            }
            "signout" => {
                let result = if on_sales {
                    sales.sign_out()
                } else {
                    support.sign_out()
                };
                if let Err(err) = result {
                    eprintln!("artdesk: {err}");
                }
            }
            other => {
                let mut parts = other.split_whitespace();
                if parts.next() == Some("status") {
                    let (Some(id), Some(status)) = (parts.next(), parts.next()) else {
                        eprintln!("usage: status <ticket-id> <open|in-progress|resolved|closed>");
                        continue;
                    };
                    let Some(status) = TicketStatus::parse(status) else {
                        eprintln!("unknown status: {status}");
                        continue;
                    };
                    on_sales = false;
                    let _ = support.set_ticket_status(id, status);
                } else {
                    eprintln!("unknown command: {other} (try `help`)");
                    continue;
                }
            }
        }
        let rendered = if on_sales {
            sales.render()
        } else {
            support.render()
        };
        println!("{rendered}");
    }
}

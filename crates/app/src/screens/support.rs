#![forbid(unsafe_code)]

use crate::cache::ViewCache;
use crate::error::AppError;
use crate::forms::TicketForm;
use crate::gate::{GateState, Redirect, SessionGate};
use crate::notices::Notice;
use crate::views::{render_support_stats, render_ticket_list};
use ad_core::model::{Ticket, TicketStatus};
use ad_storage::RemoteStore;
use std::sync::Arc;

const RECENT_TICKETS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupportView {
    Dashboard,
    Tickets,
}

/// The support portal screen: dashboard with stats and recent tickets,
/// plus the all-tickets view with status actions. All data access runs
/// through the session gate and the screen-owned ticket cache.
pub struct SupportScreen {
    gate: SessionGate,
    tickets: ViewCache<Ticket>,
    view: SupportView,
    form: Option<TicketForm>,
    notice: Option<Notice>,
}

impl SupportScreen {
    pub fn mount(store: Arc<dyn RemoteStore>) -> Self {
        let gate = SessionGate::mount(Arc::clone(&store));
        let mut screen = Self {
            gate,
            tickets: ViewCache::new(store),
            view: SupportView::Dashboard,
            form: None,
            notice: None,
        };
        screen.refresh();
        screen
    }

    pub fn redirect(&self) -> Option<Redirect> {
        self.gate.redirect()
    }

    pub fn view(&self) -> SupportView {
        self.view
    }

    pub fn set_view(&mut self, view: SupportView) {
        self.view = view;
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn tickets(&self) -> &[Ticket] {
        self.tickets.current(self.gate.user_id().as_ref())
    }

    /// Re-fetches the ticket list. A failed fetch keeps the prior list and
    /// surfaces a notice instead of failing the screen.
    pub fn refresh(&mut self) {
        if let Err(err) = self.tickets.fetch(self.gate.user_id().as_ref()) {
            self.notice = Some(Notice::from_error(&err));
        }
    }

    pub fn open_ticket_form(&mut self) {
        if self.form.is_none() {
            self.form = Some(TicketForm::new());
        }
    }

    pub fn cancel_ticket_form(&mut self) {
        self.form = None;
    }

    pub fn ticket_form(&self) -> Option<&TicketForm> {
        self.form.as_ref()
    }

    pub fn ticket_form_mut(&mut self) -> Option<&mut TicketForm> {
        self.form.as_mut()
    }

    /// Submits the open form. On success the form closes and the list is
    /// re-fetched; on failure the form keeps its entered data for retry.
    pub fn submit_ticket_form(&mut self) -> Result<(), AppError> {
        let Some(form) = self.form.clone() else {
            return Ok(());
        };
        let draft = match form.submit() {
            Ok(draft) => draft,
            Err(err) => {
                let err = AppError::Validation(err);
                self.notice = Some(Notice::from_error(&err));
                return Err(err);
            }
        };
        let user = self.gate.user_id();
        match self.tickets.create(user.as_ref(), &draft) {
            Ok(ticket) => {
                self.form = None;
                self.notice = Some(Notice::info(format!("Ticket {} created", ticket.id)));
                self.refresh();
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err));
                Err(err)
            }
        }
    }

    /// Status action from the ticket list. Success re-fetches; failure
    /// leaves the prior status displayed.
    pub fn set_ticket_status(
        &mut self,
        ticket_id: &str,
        status: TicketStatus,
    ) -> Result<(), AppError> {
        let user = self.gate.user_id();
        match self.tickets.update_status(user.as_ref(), ticket_id, status) {
            Ok(ticket) => {
                self.notice = Some(Notice::info(format!(
                    "Ticket {} is now {}",
                    ticket.id,
                    ticket.status.label()
                )));
                self.refresh();
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::from_error(&err));
                Err(err)
            }
        }
    }

    pub fn sign_out(&mut self) -> Result<(), AppError> {
        match self.gate.sign_out() {
            Ok(()) => Ok(()),
            Err(err) => {
                self.notice = Some(Notice::from_error(&err));
                Err(err)
            }
        }
    }

    pub fn render(&self) -> String {
        match self.gate.state() {
            GateState::Resolving => return "Loading...\n".to_string(),
            // The screen has already decided to redirect; render nothing.
            GateState::SignedOut => return String::new(),
            GateState::SignedIn(_) => {}
        }

        let mut out = String::from("ArtDesk\nInternal Support Portal\n\n");
        if let Some(notice) = &self.notice {
            out.push_str(&notice.render());
            out.push_str("\n\n");
        }

        let tickets = self.tickets();
        match self.view {
            SupportView::Dashboard => {
                out.push_str("Support Dashboard\n");
                out.push_str(&render_support_stats(tickets));
                out.push_str("\nRecent Tickets\n");
                let recent = &tickets[..tickets.len().min(RECENT_TICKETS)];
                out.push_str(&render_ticket_list(recent, false));
            }
            SupportView::Tickets => {
                out.push_str("All Tickets\n");
                out.push_str(&render_ticket_list(tickets, true));
            }
        }

        if let Some(form) = &self.form {
            out.push_str("\nCreate New Ticket\n");
            out.push_str(&format!("  Title: {}\n", form.title));
            out.push_str(&format!("  Category: {}\n", form.category));
            out.push_str(&format!("  Priority: {}\n", form.priority.label()));
            out.push_str(&format!("  Description: {}\n", form.description));
            out.push_str(&format!("  Assign To: {}\n", form.assigned_to));
        }
        out
    }
}

#![forbid(unsafe_code)]

use crate::cache::ViewCache;
use crate::error::AppError;
use crate::forms::LeadForm;
use crate::gate::{GateState, Redirect, SessionGate};
use crate::notices::Notice;
use crate::views::{render_client_list, render_lead_list, render_sales_stats};
use ad_core::model::{Client, Lead};
use ad_storage::{RemoteStore, now_ms};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SalesTab {
    Leads,
    Clients,
}

/// The sales screen: leads and clients behind one gate, rendered as two
/// tabs over screen-owned caches. Leads are created here; clients are a
/// read-only registry.
pub struct SalesScreen {
    gate: SessionGate,
    leads: ViewCache<Lead>,
    clients: ViewCache<Client>,
    tab: SalesTab,
    form: Option<LeadForm>,
    notice: Option<Notice>,
}

impl SalesScreen {
    pub fn mount(store: Arc<dyn RemoteStore>) -> Self {
        let gate = SessionGate::mount(Arc::clone(&store));
        let mut screen = Self {
            gate,
            leads: ViewCache::new(Arc::clone(&store)),
            clients: ViewCache::new(store),
            tab: SalesTab::Leads,
            form: None,
            notice: None,
        };
        screen.refresh();
        screen
    }

    pub fn redirect(&self) -> Option<Redirect> {
        self.gate.redirect()
    }

    pub fn tab(&self) -> SalesTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: SalesTab) {
        self.tab = tab;
        self.notice = None;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn leads(&self) -> &[Lead] {
        self.leads.current(self.gate.user_id().as_ref())
    }

    pub fn clients(&self) -> &[Client] {
        self.clients.current(self.gate.user_id().as_ref())
    }

    /// Re-fetches both collections. Either failure keeps that collection's
    /// prior list and surfaces a notice.
    pub fn refresh(&mut self) {
        let user = self.gate.user_id();
        if let Err(err) = self.leads.fetch(user.as_ref()) {
            self.notice = Some(Notice::from_error(&err));
        }
        if let Err(err) = self.clients.fetch(user.as_ref()) {
            self.notice = Some(Notice::from_error(&err));
        }
    }

    pub fn open_lead_form(&mut self) {
        if self.form.is_none() {
            self.form = Some(LeadForm::new());
        }
    }

    pub fn cancel_lead_form(&mut self) {
        self.form = None;
    }

    pub fn lead_form(&self) -> Option<&LeadForm> {
        self.form.as_ref()
    }

    pub fn lead_form_mut(&mut self) -> Option<&mut LeadForm> {
        self.form.as_mut()
    }

    pub fn submit_lead_form(&mut self) -> Result<(), AppError> {
        let Some(form) = self.form.clone() else {
            return Ok(());
        };
        let draft = match form.submit(now_ms()) {
            Ok(draft) => draft,
            Err(err) => {
                let err = AppError::Validation(err);
                self.notice = Some(Notice::from_error(&err));
                return Err(err);
            }
        };
        let user = self.gate.user_id();
        match self.leads.create(user.as_ref(), &draft) {
            Ok(lead) => {
                self.form = None;
                self.notice = Some(Notice::info(format!("Lead {} created", lead.id)));
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
            GateState::SignedOut => return String::new(),
            GateState::SignedIn(_) => {}
        }

        let mut out = String::from("Sales & Clients\nManage leads and client relationships\n\n");
        if let Some(notice) = &self.notice {
            out.push_str(&notice.render());
            out.push_str("\n\n");
        }

        let leads = self.leads();
        let clients = self.clients();
        out.push_str(&render_sales_stats(leads, clients));
        out.push_str(&format!(
            "\nLeads ({})  |  Clients ({})\n\n",
            leads.len(),
            clients.len()
        ));
        match self.tab {
            SalesTab::Leads => out.push_str(&render_lead_list(leads)),
            SalesTab::Clients => out.push_str(&render_client_list(clients)),
        }

        if let Some(form) = &self.form {
            out.push_str("\nAdd New Lead\n");
            out.push_str(&format!("  Name: {}\n", form.name));
            out.push_str(&format!("  Email: {}\n", form.email));
            out.push_str(&format!("  Phone: {}\n", form.phone));
            out.push_str(&format!("  Company: {}\n", form.company));
            out.push_str(&format!("  Status: {}\n", form.status.as_str()));
            out.push_str(&format!("  Source: {}\n", form.source.as_str()));
            out.push_str(&format!("  Art Interests: {}\n", form.art_interests));
            out.push_str(&format!("  Budget: {}\n", form.budget));
        }
        out
    }
}

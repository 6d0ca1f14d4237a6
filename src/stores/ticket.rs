//! Ticket state container

use crate::api;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{ListQuery, NewTicket, Page, Review, Ticket};

/// Ticket list, current ticket, and request bookkeeping.
#[derive(Debug, Clone)]
pub struct TicketStore {
    pub tickets: Vec<Ticket>,
    pub current: Option<Ticket>,
    pub loading: bool,
    pub error: Option<String>,
    pub total: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for TicketStore {
    fn default() -> Self {
        Self {
            tickets: Vec::new(),
            current: None,
            loading: false,
            error: None,
            total: 0,
            current_page: 1,
            page_size: 10,
        }
    }
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn record_failure(&mut self, err: &ApiError) {
        self.error = Some(err.message().to_string());
    }

    /// Splice a mutated ticket into the list by id and keep `current` in sync
    fn sync_ticket(&mut self, ticket: &Ticket) {
        if let Some(existing) = self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            *existing = ticket.clone();
        }
        if self.current.as_ref().map(|t| t.id) == Some(ticket.id) {
            self.current = Some(ticket.clone());
        }
    }

    /// Submit a new ticket; on success it is prepended to the list.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        input: &NewTicket,
    ) -> Result<Ticket, ApiError> {
        self.begin();
        let result = client.fetch::<Ticket>(api::ticket::submit(input)).await;
        self.loading = false;
        match result {
            Ok(ticket) => {
                self.tickets.insert(0, ticket.clone());
                self.total += 1;
                Ok(ticket)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch a page of tickets, replacing the list.
    pub async fn load_list(
        &mut self,
        client: &ApiClient,
        query: &ListQuery,
    ) -> Result<(), ApiError> {
        self.begin();
        let result = client.fetch::<Page<Ticket>>(api::ticket::list(query)).await;
        self.loading = false;
        match result {
            Ok(page) => {
                self.tickets = page.records;
                self.total = page.total;
                self.current_page = page.current;
                self.page_size = page.size;
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch one ticket into `current`.
    pub async fn load_detail(&mut self, client: &ApiClient, id: i64) -> Result<Ticket, ApiError> {
        self.begin();
        let result = client.fetch::<Ticket>(api::ticket::detail(id)).await;
        self.loading = false;
        match result {
            Ok(ticket) => {
                self.current = Some(ticket.clone());
                Ok(ticket)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Update a ticket and splice the result into local state.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: i64,
        input: &NewTicket,
    ) -> Result<Ticket, ApiError> {
        self.mutate(client, api::ticket::update(id, input)).await
    }

    /// Cancel an open ticket.
    pub async fn cancel(&mut self, client: &ApiClient, id: i64) -> Result<Ticket, ApiError> {
        self.mutate(client, api::ticket::cancel(id)).await
    }

    /// Confirm a resolved ticket.
    pub async fn confirm(&mut self, client: &ApiClient, id: i64) -> Result<Ticket, ApiError> {
        self.mutate(client, api::ticket::confirm(id)).await
    }

    /// Leave a review on a ticket.
    pub async fn review(
        &mut self,
        client: &ApiClient,
        id: i64,
        review: &Review,
    ) -> Result<Ticket, ApiError> {
        self.mutate(client, api::ticket::review(id, review)).await
    }

    async fn mutate(
        &mut self,
        client: &ApiClient,
        descriptor: crate::client::RequestDescriptor,
    ) -> Result<Ticket, ApiError> {
        self.begin();
        let result = client.fetch::<Ticket>(descriptor).await;
        self.loading = false;
        match result {
            Ok(ticket) => {
                self.sync_ticket(&ticket);
                Ok(ticket)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Delete a ticket. On success exactly that item leaves the list and a
    /// matching `current` is cleared.
    pub async fn delete(&mut self, client: &ApiClient, id: i64) -> Result<(), ApiError> {
        self.begin();
        let result = client.send(api::ticket::delete(id)).await;
        self.loading = false;
        match result {
            Ok(_) => {
                self.tickets.retain(|t| t.id != id);
                if self.current.as_ref().map(|t| t.id) == Some(id) {
                    self.current = None;
                }
                self.total = self.total.saturating_sub(1);
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Look up a ticket already in the list
    pub fn ticket_by_id(&self, id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }
}

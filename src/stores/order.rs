//! Order state container
//!
//! Unlike tickets, the order list is paged incrementally: fetching a page
//! beyond the first appends to the items already loaded.

use crate::api;
use crate::client::{ApiClient, RequestDescriptor};
use crate::error::ApiError;
use crate::models::{ListQuery, NewOrder, Order, Page, Review};

/// Order list, current order, and request bookkeeping.
#[derive(Debug, Clone)]
pub struct OrderStore {
    pub orders: Vec<Order>,
    pub current: Option<Order>,
    pub loading: bool,
    pub error: Option<String>,
    pub total: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            current: None,
            loading: false,
            error: None,
            total: 0,
            current_page: 1,
            page_size: 10,
        }
    }
}

impl OrderStore {
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

    /// Whether more pages remain beyond what is loaded
    pub fn has_more(&self) -> bool {
        (self.orders.len() as u64) < self.total
    }

    /// Submit a new order.
    pub async fn submit(&mut self, client: &ApiClient, input: &NewOrder) -> Result<Order, ApiError> {
        self.begin();
        let result = client.fetch::<Order>(api::order::submit(input)).await;
        self.loading = false;
        match result {
            Ok(order) => Ok(order),
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch a page of orders. The first page replaces the list, any later
    /// page is appended.
    pub async fn load_page(&mut self, client: &ApiClient, page: u32) -> Result<(), ApiError> {
        self.begin();
        let query = ListQuery {
            page,
            page_size: self.page_size,
            status: None,
        };
        let result = client.fetch::<Page<Order>>(api::order::list(&query)).await;
        self.loading = false;
        match result {
            Ok(fetched) => {
                if page <= 1 {
                    self.orders = fetched.records;
                } else {
                    self.orders.extend(fetched.records);
                }
                self.total = fetched.total;
                self.current_page = page;
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch one order into `current`.
    pub async fn load_detail(&mut self, client: &ApiClient, id: i64) -> Result<Order, ApiError> {
        self.begin();
        let result = client.fetch::<Order>(api::order::detail(id)).await;
        self.loading = false;
        match result {
            Ok(order) => {
                self.current = Some(order.clone());
                Ok(order)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Update an order.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: i64,
        input: &NewOrder,
    ) -> Result<Order, ApiError> {
        self.mutate(client, id, api::order::update(id, input)).await
    }

    /// Cancel an order.
    pub async fn cancel(&mut self, client: &ApiClient, id: i64) -> Result<Order, ApiError> {
        self.mutate(client, id, api::order::cancel(id)).await
    }

    /// Confirm receipt of an order.
    pub async fn confirm(&mut self, client: &ApiClient, id: i64) -> Result<Order, ApiError> {
        self.mutate(client, id, api::order::confirm(id)).await
    }

    /// Leave a review on an order.
    pub async fn review(
        &mut self,
        client: &ApiClient,
        id: i64,
        review: &Review,
    ) -> Result<Order, ApiError> {
        self.mutate(client, id, api::order::review(id, review)).await
    }

    async fn mutate(
        &mut self,
        client: &ApiClient,
        id: i64,
        descriptor: RequestDescriptor,
    ) -> Result<Order, ApiError> {
        self.begin();
        let result = client.fetch::<Order>(descriptor).await;
        self.loading = false;
        match result {
            Ok(order) => {
                if let Some(existing) = self.orders.iter_mut().find(|o| o.id == id) {
                    *existing = order.clone();
                }
                if self.current.as_ref().map(|o| o.id) == Some(id) {
                    self.current = Some(order.clone());
                }
                Ok(order)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Delete an order and drop it from local state.
    pub async fn delete(&mut self, client: &ApiClient, id: i64) -> Result<(), ApiError> {
        self.begin();
        let result = client.send(api::order::delete(id)).await;
        self.loading = false;
        match result {
            Ok(_) => {
                self.orders.retain(|o| o.id != id);
                if self.current.as_ref().map(|o| o.id) == Some(id) {
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

    /// Restore the initial snapshot (used when leaving the order views)
    pub fn reset(&mut self) {
        *self = Self {
            page_size: self.page_size,
            ..Self::default()
        };
    }
}

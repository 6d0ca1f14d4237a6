//! Order endpoints (`/orders/*`)

use super::with_list_query;
use crate::client::RequestDescriptor;
use crate::models::{ListQuery, NewOrder, Review};

/// Submit a new order
pub fn submit(payload: &NewOrder) -> RequestDescriptor {
    RequestDescriptor::post("/orders/submit").json(payload)
}

/// Fetch a page of the order list
pub fn list(query: &ListQuery) -> RequestDescriptor {
    with_list_query(RequestDescriptor::get("/orders/list"), query)
}

/// Fetch one order
pub fn detail(id: i64) -> RequestDescriptor {
    RequestDescriptor::get(format!("/orders/{}", id))
}

/// Update an order
pub fn update(id: i64, payload: &NewOrder) -> RequestDescriptor {
    RequestDescriptor::put(format!("/orders/{}", id)).json(payload)
}

/// Delete an order
pub fn delete(id: i64) -> RequestDescriptor {
    RequestDescriptor::delete(format!("/orders/{}", id))
}

/// Cancel an order
pub fn cancel(id: i64) -> RequestDescriptor {
    RequestDescriptor::post(format!("/orders/{}/cancel", id))
}

/// Confirm receipt of an order
pub fn confirm(id: i64) -> RequestDescriptor {
    RequestDescriptor::post(format!("/orders/{}/confirm", id))
}

/// Leave a review on an order
pub fn review(id: i64, payload: &Review) -> RequestDescriptor {
    RequestDescriptor::post(format!("/orders/{}/review", id)).json(payload)
}

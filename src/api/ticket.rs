//! Ticket endpoints (`/tickets/*`)

use super::with_list_query;
use crate::client::{Part, RequestDescriptor};
use crate::models::{ListQuery, NewTicket, Review};

/// Submit a new ticket
pub fn submit(payload: &NewTicket) -> RequestDescriptor {
    RequestDescriptor::post("/tickets/submit").json(payload)
}

/// Fetch a page of the ticket list
pub fn list(query: &ListQuery) -> RequestDescriptor {
    with_list_query(RequestDescriptor::get("/tickets/list"), query)
}

/// Fetch one ticket
pub fn detail(id: i64) -> RequestDescriptor {
    RequestDescriptor::get(format!("/tickets/{}", id))
}

/// Update a ticket
pub fn update(id: i64, payload: &NewTicket) -> RequestDescriptor {
    RequestDescriptor::put(format!("/tickets/{}", id)).json(payload)
}

/// Delete a ticket
pub fn delete(id: i64) -> RequestDescriptor {
    RequestDescriptor::delete(format!("/tickets/{}", id))
}

/// Cancel an open ticket
pub fn cancel(id: i64) -> RequestDescriptor {
    RequestDescriptor::post(format!("/tickets/{}/cancel", id))
}

/// Confirm a resolved ticket
pub fn confirm(id: i64) -> RequestDescriptor {
    RequestDescriptor::post(format!("/tickets/{}/confirm", id))
}

/// Leave a review on a ticket
pub fn review(id: i64, payload: &Review) -> RequestDescriptor {
    RequestDescriptor::post(format!("/tickets/{}/review", id)).json(payload)
}

/// Upload a file attachment. Multipart: the transport sets the boundary
/// content type itself.
pub fn upload_attachment(
    id: i64,
    file_name: impl Into<String>,
    mime: impl Into<String>,
    data: Vec<u8>,
) -> RequestDescriptor {
    RequestDescriptor::post(format!("/tickets/{}/attachments", id))
        .multipart(vec![Part::file("file", file_name, mime, data)])
}

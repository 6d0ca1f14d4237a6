//! Resource action modules
//!
//! Pure builders mapping each domain operation 1:1 to a
//! [`RequestDescriptor`](crate::client::RequestDescriptor): method, path with
//! interpolated ids, and body. No state mutation, no retry, no validation
//! beyond constructing a well-formed descriptor.

pub mod order;
pub mod ticket;
pub mod user;

use crate::client::RequestDescriptor;
use crate::models::ListQuery;

/// Apply shared list-query parameters to a descriptor
fn with_list_query(mut descriptor: RequestDescriptor, query: &ListQuery) -> RequestDescriptor {
    descriptor = descriptor
        .query("page", query.page)
        .query("pageSize", query.page_size);
    if let Some(status) = &query.status {
        descriptor = descriptor.query("status", status);
    }
    descriptor
}

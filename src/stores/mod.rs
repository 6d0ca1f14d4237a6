//! State containers
//!
//! Per-domain mutable state bridging the resource action modules to whatever
//! observes it. Every action follows the same contract: mark loading and
//! clear the previous error, dispatch through the client, apply the success
//! mutation or record the normalized error message (domain state untouched),
//! and always drop the loading flag before returning.
//!
//! The containers are plain `&mut self` state; two in-flight actions on the
//! same container are sequenced by the caller, not by the container.

pub mod order;
pub mod ticket;
pub mod user;

pub use order::OrderStore;
pub use ticket::TicketStore;
pub use user::UserStore;

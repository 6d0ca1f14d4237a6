//! Route table and auth guard
//!
//! Typed rendering of the client's route table. The guard mirrors the
//! navigation rules: protected routes require a logged-in session, and a
//! logged-in user asking for the login or register screen lands on the
//! ticket history instead.

/// Client routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    TicketHistory,
    SubmitTicket,
    TicketDetail(i64),
    NotFound,
}

impl Route {
    /// Path for this route
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::TicketHistory => "/ticket-history".to_string(),
            Self::SubmitTicket => "/submit-ticket".to_string(),
            Self::TicketDetail(id) => format!("/ticket-detail/{}", id),
            Self::NotFound => "/not-found".to_string(),
        }
    }

    /// Whether the route requires an authenticated session
    pub fn requires_auth(&self) -> bool {
        match self {
            Self::Login | Self::Register | Self::NotFound => false,
            Self::TicketHistory | Self::SubmitTicket | Self::TicketDetail(_) => true,
        }
    }
}

/// Root redirect target
pub fn home() -> Route {
    Route::TicketHistory
}

/// Resolve a navigation target against the session state.
pub fn resolve(target: Route, logged_in: bool) -> Route {
    if target.requires_auth() && !logged_in {
        return Route::Login;
    }
    if matches!(target, Route::Login | Route::Register) && logged_in {
        return Route::TicketHistory;
    }
    target
}

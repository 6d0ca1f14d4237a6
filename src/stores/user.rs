//! User state container
//!
//! The credential itself lives in the injected [`SessionContext`]; this
//! container carries the request bookkeeping and drives the login flow, the
//! only place besides the expiry handler allowed to write the session.
//!
//! [`SessionContext`]: crate::session::SessionContext

use crate::api;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest,
    UserInfo,
};

/// Profile bookkeeping around the session.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    pub loading: bool,
    pub error: Option<String>,
}

impl UserStore {
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

    /// Log in. On success the session holds the credential and the profile
    /// that came with it, and the credential is persisted.
    pub async fn login(
        &mut self,
        client: &ApiClient,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.begin();
        let payload = LoginRequest {
            username: username.into(),
            password: password.into(),
        };
        let result = client.fetch::<LoginResponse>(api::user::login(&payload)).await;
        self.loading = false;
        match result {
            Ok(response) => {
                client.session().establish(response.token, response.user);
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Register a new account. Registration does not log in; the returned
    /// profile is cached for the login screen to prefill.
    pub async fn register(
        &mut self,
        client: &ApiClient,
        payload: &RegisterRequest,
    ) -> Result<UserInfo, ApiError> {
        self.begin();
        let result = client.fetch::<UserInfo>(api::user::register(payload)).await;
        self.loading = false;
        match result {
            Ok(user) => {
                client.session().cache_profile(user.clone());
                Ok(user)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Fetch the authenticated user's profile into the session cache.
    pub async fn load_info(&mut self, client: &ApiClient) -> Result<UserInfo, ApiError> {
        self.begin();
        let result = client.fetch::<UserInfo>(api::user::get_info()).await;
        self.loading = false;
        match result {
            Ok(user) => {
                client.session().cache_profile(user.clone());
                Ok(user)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Change the account password.
    pub async fn change_password(
        &mut self,
        client: &ApiClient,
        old_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Result<(), ApiError> {
        self.begin();
        let payload = ChangePasswordRequest {
            old_password: old_password.into(),
            new_password: new_password.into(),
        };
        let result = client.send(api::user::change_password(&payload)).await;
        self.loading = false;
        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Update profile fields; the refreshed profile replaces the cache.
    pub async fn update_info(
        &mut self,
        client: &ApiClient,
        payload: &UpdateUserRequest,
    ) -> Result<UserInfo, ApiError> {
        self.begin();
        let result = client.fetch::<UserInfo>(api::user::update_info(payload)).await;
        self.loading = false;
        match result {
            Ok(user) => {
                client.session().cache_profile(user.clone());
                Ok(user)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Explicit logout: credential and cached profile are dropped.
    pub fn logout(&mut self, client: &ApiClient) {
        client.session().logout();
        self.error = None;
    }
}

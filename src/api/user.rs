//! User endpoints (`/users/*`)

use crate::client::RequestDescriptor;
use crate::models::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateUserRequest};

/// Log in with username and password
pub fn login(payload: &LoginRequest) -> RequestDescriptor {
    RequestDescriptor::post("/users/login").json(payload)
}

/// Register a new account
pub fn register(payload: &RegisterRequest) -> RequestDescriptor {
    RequestDescriptor::post("/users/register").json(payload)
}

/// Fetch the authenticated user's profile
pub fn get_info() -> RequestDescriptor {
    RequestDescriptor::get("/users/info")
}

/// Change the account password
pub fn change_password(payload: &ChangePasswordRequest) -> RequestDescriptor {
    RequestDescriptor::put("/users/password").json(payload)
}

/// Update profile fields
pub fn update_info(payload: &UpdateUserRequest) -> RequestDescriptor {
    RequestDescriptor::put("/users/info").json(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RequestBody;
    use reqwest::Method;

    #[test]
    fn test_login_descriptor() {
        let d = login(&LoginRequest {
            username: "张三".to_string(),
            password: "secret".to_string(),
        });
        assert_eq!(d.method(), &Method::POST);
        assert_eq!(d.path(), "/users/login");
        match d.body() {
            RequestBody::Json(value) => assert_eq!(value["username"], "张三"),
            _ => panic!("Expected Json body"),
        }
    }

    #[test]
    fn test_get_info_descriptor() {
        let d = get_info();
        assert_eq!(d.method(), &Method::GET);
        assert_eq!(d.path(), "/users/info");
    }

    #[test]
    fn test_change_password_descriptor() {
        let d = change_password(&ChangePasswordRequest {
            old_password: "a".to_string(),
            new_password: "b".to_string(),
        });
        assert_eq!(d.method(), &Method::PUT);
        assert_eq!(d.path(), "/users/password");
    }
}

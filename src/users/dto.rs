use serde::{Deserialize, Serialize};

use crate::users::repo::User;

/// Form body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Form body for login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Generic confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct EndpointsResponse {
    pub endpoints: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct UserCountResponse {
    pub user_count: i64,
}

/// Full listing, hashes included.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

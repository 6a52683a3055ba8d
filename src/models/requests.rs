use serde::{Deserialize, Serialize};

/// Body of `POST /sign`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignRequest {
    pub message: String,
}

/// Body of `POST /verify`.
///
/// The signature is collected through the modal prompt at call time; a
/// cancelled prompt is sent as `null`, never dropped from the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub message: String,
    pub signature: Option<String>,
}

/// Body of `POST /register`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub password: String,
}

/// Body of `POST /authenticate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub user_id: String,
    pub password: String,
    pub auth_message: String,
}

use crate::models::requests::{AuthenticateRequest, RegisterRequest, SignRequest, VerifyRequest};
use log::info;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

pub const SIGN_ROUTE: &str = "/sign";
pub const VERIFY_ROUTE: &str = "/verify";
pub const REGISTER_ROUTE: &str = "/register";
pub const AUTHENTICATE_ROUTE: &str = "/authenticate";

#[derive(Error, Debug)]
pub enum GatewayServiceError {
    #[error("HTTP request error: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Response decode error: {0}")]
    DecodeError(#[from] serde_json::Error),
}

pub async fn send_sign_request(
    base_url: &str,
    request: SignRequest,
) -> Result<Value, GatewayServiceError> {
    info!("Sending sign request to gateway");

    let response = post_json(base_url, SIGN_ROUTE, &request).await?;

    info!("Received sign response from gateway");

    Ok(response)
}

pub async fn send_verify_request(
    base_url: &str,
    request: VerifyRequest,
) -> Result<Value, GatewayServiceError> {
    info!("Sending verify request to gateway");

    let response = post_json(base_url, VERIFY_ROUTE, &request).await?;

    info!("Received verify response from gateway");

    Ok(response)
}

pub async fn send_register_request(
    base_url: &str,
    request: RegisterRequest,
) -> Result<Value, GatewayServiceError> {
    info!("Sending register request to gateway");

    let response = post_json(base_url, REGISTER_ROUTE, &request).await?;

    info!("Received register response from gateway");

    Ok(response)
}

pub async fn send_authenticate_request(
    base_url: &str,
    request: AuthenticateRequest,
) -> Result<Value, GatewayServiceError> {
    info!("Sending authenticate request to gateway");

    let response = post_json(base_url, AUTHENTICATE_ROUTE, &request).await?;

    info!("Received authenticate response from gateway");

    Ok(response)
}

// The gateway is never consulted about the status code: an error payload with
// a well-formed JSON body decodes exactly like a success payload.
async fn post_json<T: serde::Serialize>(
    base_url: &str,
    route: &str,
    request: &T,
) -> Result<Value, GatewayServiceError> {
    let client = Client::new();
    let body = client
        .post(format!("{base_url}{route}"))
        .json(request)
        .send()
        .await?
        .text()
        .await?;

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::{
        send_authenticate_request, send_register_request, send_sign_request, send_verify_request,
        GatewayServiceError,
    };
    use crate::models::requests::{
        AuthenticateRequest, RegisterRequest, SignRequest, VerifyRequest,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sign_posts_exactly_one_json_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sign"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "message": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "hello",
                "signature": "ab12"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = send_sign_request(
            &server.uri(),
            SignRequest {
                message: "hello".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response, json!({ "message": "hello", "signature": "ab12" }));
    }

    #[tokio::test]
    async fn sign_sends_empty_and_escaped_messages_as_is() {
        for message in ["", "line \"one\"\nline two"] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/sign"))
                .and(body_json(json!({ "message": message })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
                .expect(1)
                .mount(&server)
                .await;

            send_sign_request(
                &server.uri(),
                SignRequest {
                    message: message.to_string(),
                },
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn verify_includes_null_signature_from_cancelled_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify"))
            .and(body_json(json!({ "message": "hello", "signature": null })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_valid": false })))
            .expect(1)
            .mount(&server)
            .await;

        let response = send_verify_request(
            &server.uri(),
            VerifyRequest {
                message: "hello".to_string(),
                signature: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(response, json!({ "is_valid": false }));
    }

    #[tokio::test]
    async fn verify_includes_prompted_signature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify"))
            .and(body_json(json!({ "message": "hello", "signature": "ab12" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_valid": true })))
            .expect(1)
            .mount(&server)
            .await;

        send_verify_request(
            &server.uri(),
            VerifyRequest {
                message: "hello".to_string(),
                signature: Some("ab12".to_string()),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn register_posts_user_id_and_password() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .and(body_json(json!({ "user_id": "alice", "password": "s3cret" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": "User alice registered successfully."
            })))
            .expect(1)
            .mount(&server)
            .await;

        send_register_request(
            &server.uri(),
            RegisterRequest {
                user_id: "alice".to_string(),
                password: "s3cret".to_string(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn register_returns_error_payload_from_500_as_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "invalid" })))
            .expect(1)
            .mount(&server)
            .await;

        let response = send_register_request(
            &server.uri(),
            RegisterRequest {
                user_id: "alice".to_string(),
                password: "s3cret".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response, json!({ "error": "invalid" }));
    }

    #[tokio::test]
    async fn authenticate_posts_all_three_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .and(body_json(json!({
                "user_id": "alice",
                "password": "s3cret",
                "auth_message": "login challenge"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "password_validation": "Password matched!"
            })))
            .expect(1)
            .mount(&server)
            .await;

        send_authenticate_request(
            &server.uri(),
            AuthenticateRequest {
                user_id: "alice".to_string(),
                password: "s3cret".to_string(),
                auth_message: "login challenge".to_string(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn non_json_response_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = send_authenticate_request(
            &server.uri(),
            AuthenticateRequest {
                user_id: "alice".to_string(),
                password: "s3cret".to_string(),
                auth_message: "login challenge".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(GatewayServiceError::DecodeError(_))));
    }
}

use crate::models::requests::{AuthenticateRequest, RegisterRequest, SignRequest, VerifyRequest};
use crate::page::surface::{self, OutputRegion, PageInputs};
use crate::services::gateway_service::{self, GatewayServiceError};
use log::error;
use serde_json::Value;

/// What became of a triggered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The decoded response was rendered into the target output region.
    Rendered,
    /// The response arrived, but a newer action had been issued for the
    /// region in the meantime; nothing was written.
    Superseded,
    /// The request or response decoding failed; the region is unchanged.
    Failed,
}

pub type FailureHook = Box<dyn Fn(&GatewayServiceError) + Send + Sync>;

/// Binds the four operator actions to the page surface and the gateway.
///
/// Each action reads its inputs, posts one JSON request, and renders the
/// decoded response verbatim into its output region: sign and verify share
/// `signature-output`, register and authenticate share `mfa-output`. Actions
/// carry no state across invocations, and failures never reach a region;
/// they go to the failure hook, which logs by default.
pub struct InteractionController<P: PageInputs> {
    base_url: String,
    inputs: P,
    signature_output: OutputRegion,
    mfa_output: OutputRegion,
    on_failure: FailureHook,
}

impl<P: PageInputs> InteractionController<P> {
    pub fn new(base_url: impl Into<String>, inputs: P) -> Self {
        Self {
            base_url: base_url.into(),
            inputs,
            signature_output: OutputRegion::new(surface::SIGNATURE_OUTPUT),
            mfa_output: OutputRegion::new(surface::MFA_OUTPUT),
            on_failure: Box::new(|e| error!("Gateway action failed: {e}")),
        }
    }

    /// Replace the failure hook. A no-op hook makes failures fully silent.
    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.on_failure = hook;
        self
    }

    pub fn inputs(&self) -> &P {
        &self.inputs
    }

    pub fn signature_output(&self) -> &OutputRegion {
        &self.signature_output
    }

    pub fn mfa_output(&self) -> &OutputRegion {
        &self.mfa_output
    }

    /// Sign the current content of the `message` field.
    pub async fn sign_message(&self) -> ActionOutcome {
        let request = SignRequest {
            message: self.inputs.field_value(surface::MESSAGE_FIELD),
        };

        let ticket = self.signature_output.begin();
        let result = gateway_service::send_sign_request(&self.base_url, request).await;
        self.render(&self.signature_output, ticket, result)
    }

    /// Verify a signature against the current content of the `message` field.
    ///
    /// The signature is acquired through the modal prompt strictly before the
    /// request is built; a cancelled prompt still produces a request, with a
    /// `null` signature.
    pub async fn verify_signature(&self) -> ActionOutcome {
        let message = self.inputs.field_value(surface::MESSAGE_FIELD);
        let signature = self.inputs.prompt("Enter signature to verify:");
        let request = VerifyRequest { message, signature };

        let ticket = self.signature_output.begin();
        let result = gateway_service::send_verify_request(&self.base_url, request).await;
        self.render(&self.signature_output, ticket, result)
    }

    /// Register the user named by the `user_id` and `password` fields.
    pub async fn register_user(&self) -> ActionOutcome {
        let request = RegisterRequest {
            user_id: self.inputs.field_value(surface::USER_ID_FIELD),
            password: self.inputs.field_value(surface::PASSWORD_FIELD),
        };

        let ticket = self.mfa_output.begin();
        let result = gateway_service::send_register_request(&self.base_url, request).await;
        self.render(&self.mfa_output, ticket, result)
    }

    /// Authenticate with the password plus the auxiliary auth message.
    pub async fn authenticate_user(&self) -> ActionOutcome {
        let request = AuthenticateRequest {
            user_id: self.inputs.field_value(surface::USER_ID_FIELD),
            password: self.inputs.field_value(surface::PASSWORD_FIELD),
            auth_message: self.inputs.field_value(surface::AUTH_MESSAGE_FIELD),
        };

        let ticket = self.mfa_output.begin();
        let result = gateway_service::send_authenticate_request(&self.base_url, request).await;
        self.render(&self.mfa_output, ticket, result)
    }

    fn render(
        &self,
        region: &OutputRegion,
        ticket: u64,
        result: Result<Value, GatewayServiceError>,
    ) -> ActionOutcome {
        match result {
            Ok(value) => {
                if region.commit(ticket, value.to_string()) {
                    ActionOutcome::Rendered
                } else {
                    ActionOutcome::Superseded
                }
            }
            Err(e) => {
                (self.on_failure)(&e);
                ActionOutcome::Failed
            }
        }
    }
}

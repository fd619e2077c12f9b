//! HTTP implementation of the auth collaborator.

use async_trait::async_trait;
use serde::Serialize;
use swapmarket_core::auth::{AuthApi, AuthResponse, Credentials, SignupData};
use swapmarket_core::error::Result;
use swapmarket_core::user::User;

use crate::client::ApiClient;

/// Auth endpoints over REST. Stateless: persistence of the returned token
/// and user snapshot is the session manager's job.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse> {
        self.client.post("/auth/login", &credentials).await
    }

    async fn signup(&self, data: SignupData) -> Result<AuthResponse> {
        self.client.post("/auth/signup", &data).await
    }

    async fn logout(&self) -> Result<()> {
        self.client.post_empty("/auth/logout").await
    }

    async fn current_user(&self) -> Result<User> {
        self.client.get("/auth/me").await
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        self.client
            .post_unit("/auth/forgot-password", &ForgotPasswordRequest { email })
            .await
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        self.client
            .post_unit(
                "/auth/reset-password",
                &ResetPasswordRequest { token, new_password },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_request_serializes_camel_case() {
        let body = ResetPasswordRequest {
            token: "t-1",
            new_password: "hunter2",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["token"], "t-1");
        assert_eq!(json["newPassword"], "hunter2");
    }

    #[test]
    fn auth_response_parses_wire_form() {
        let json = r#"{
            "user": {
                "id": "u1",
                "email": "a@b.c",
                "username": "ab",
                "firstName": "A",
                "lastName": "B"
            },
            "token": "bearer-123"
        }"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.user.id, "u1");
        assert_eq!(parsed.token, "bearer-123");
    }
}

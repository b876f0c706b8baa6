// Password-grant auth endpoints. Sessions are plain bearer tokens; refresh
// is out of scope, an expired token just surfaces as Unauthorized.
impl SupabaseClient {
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .auth_request("token?grant_type=password")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    /// Returns `None` when the project requires email confirmation before the
    /// first session is issued.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthSession>, ApiError> {
        let response = self
            .auth_request("signup")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        let body: serde_json::Value = response.json().await?;

        if body.get("access_token").and_then(|t| t.as_str()).is_some() {
            let session: AuthSession = serde_json::from_value(body)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let response = self
            .auth_request("logout")
            .bearer_auth(self.bearer())
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }
}

use contracts::shared::api_envelope::ApiError;
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};

use crate::shared::api_client::{get_json, post_json};

pub async fn login(request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    post_json("/api/auth/login", request).await?.into_item()
}

pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, ApiError> {
    post_json("/api/auth/refresh", &RefreshRequest { refresh_token })
        .await?
        .into_item()
}

/// Revokes the refresh token server side.
pub async fn logout(refresh_token: String) -> Result<(), ApiError> {
    post_json("/api/auth/logout", &RefreshRequest { refresh_token }).await?;
    Ok(())
}

/// Uses the stored access token.
pub async fn current_user() -> Result<UserInfo, ApiError> {
    get_json("/api/auth/me").await?.into_item()
}

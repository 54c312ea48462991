use contracts::shared::api_envelope::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_client::set_unauthorized_handler;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn from_login(response: LoginResponse) -> Self {
        Self {
            access_token: Some(response.access_token),
            user_info: response.user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn display_name(&self) -> String {
        self.user_info
            .as_ref()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Guest".to_string())
    }
}

async fn restore_session() -> Option<AuthState> {
    let access_token = storage::get_access_token()?;
    if let Ok(user) = api::current_user().await {
        return Some(AuthState {
            access_token: Some(access_token),
            user_info: Some(user),
        });
    }
    let refresh = storage::get_refresh_token()?;
    let response = api::refresh_token(refresh).await.ok()?;
    storage::save_access_token(&response.access_token);
    let user = api::current_user().await.ok();
    Some(AuthState {
        access_token: Some(response.access_token),
        user_info: user,
    })
}

/// Restores the stored session and drops it on any 401.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState {
        access_token: storage::get_access_token(),
        user_info: None,
    });

    set_unauthorized_handler(move || {
        log::warn!("session rejected by the backend, signing out");
        storage::clear_tokens();
        auth_state.try_set(AuthState::default());
    });

    if auth_state.with_untracked(AuthState::is_authenticated) {
        spawn_local(async move {
            match restore_session().await {
                Some(state) => {
                    auth_state.try_set(state);
                }
                None => {
                    storage::clear_tokens();
                    auth_state.try_set(AuthState::default());
                }
            }
        });
    }

    provide_context(auth_state);

    children()
}

pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

pub async fn do_login(auth_state: RwSignal<AuthState>, request: LoginRequest) -> Result<(), ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    let response = api::login(&request).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(response.refresh_token.as_deref());
    log::info!("signed in as {}", request.username);

    auth_state.try_set(AuthState::from_login(response));
    Ok(())
}

pub async fn do_logout(auth_state: RwSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(err) = api::logout(refresh_token).await {
            log::warn!("logout request failed: {}", err);
        }
    }
    storage::clear_tokens();
    auth_state.try_set(AuthState::default());
}

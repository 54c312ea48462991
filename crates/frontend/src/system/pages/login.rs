use contracts::system::auth::LoginRequest;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::form_field::TextField;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error_message = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);

    let auth_state = use_auth();

    let field_error = move |key: &'static str| {
        Signal::derive(move || errors.with(|e| e.get(key).map(str::to_string)))
    };

    let submit = move || {
        if is_loading.get_untracked() {
            return;
        }
        let request = LoginRequest {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(found) = request.validate() {
            errors.set(found);
            return;
        }
        errors.set(FieldErrors::new());
        error_message.set(None);
        is_loading.set(true);

        spawn_local(async move {
            if let Err(err) = do_login(auth_state, request).await {
                log::warn!("login failed: {}", err);
                error_message.try_set(Some(err.user_message()));
            }
            is_loading.try_set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Operations Dashboard"</h1>
                <h2>"Sign in"</h2>

                {move || error_message.get().map(|e| view! { <div class="error-message">{e}</div> })}

                <form on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit();
                }>
                    <TextField
                        id="username"
                        label="Username"
                        value=username
                        on_input=Callback::new(move |v| username.set(v))
                        error=field_error("username")
                        disabled=is_loading
                    />
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            class="form__input"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        {move || {
                            errors
                                .with(|e| e.get("password").map(str::to_string))
                                .map(|e| view! { <div class="field-error">{e}</div> })
                        }}
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

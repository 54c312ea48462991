use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::config;
use crate::shared::notifications::{NotificationHost, NotificationService};
use crate::shared::theme::ThemeProvider;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let settings = &config().notifications;
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new(settings.max_visible, settings.timeout_ms));

    view! {
        <ThemeProvider>
            <AuthProvider>
                <AppShell />
                <NotificationHost />
            </AuthProvider>
        </ThemeProvider>
    }
}

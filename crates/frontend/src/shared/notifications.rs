//! Snackbar notifications.
//!
//! [`NotificationQueue`] is plain data; [`NotificationService`] wraps it in a
//! signal, auto-dismisses entries and is provided once at the app root.

use contracts::shared::api_envelope::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Info => "toast toast--info",
            NotificationKind::Success => "toast toast--success",
            NotificationKind::Warning => "toast toast--warning",
            NotificationKind::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn from_api_error(err: &ApiError) -> Self {
        Self::error(err.user_message())
    }
}

/// Anything that can surface a notification to the user.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    pub id: Uuid,
    pub notification: Notification,
}

/// Visible toasts, oldest first. Pushing beyond `max_visible` drops the oldest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<ToastItem>,
    max_visible: usize,
}

impl NotificationQueue {
    pub fn new(max_visible: usize) -> Self {
        Self {
            items: Vec::new(),
            max_visible: max_visible.max(1),
        }
    }

    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(ToastItem { id, notification });
        while self.items.len() > self.max_visible {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[ToastItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    queue: RwSignal<NotificationQueue>,
    timeout_ms: u32,
}

impl NotificationService {
    pub fn new(max_visible: usize, timeout_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::new(max_visible)),
            timeout_ms,
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }

    pub fn items(&self) -> Vec<ToastItem> {
        self.queue.with(|q| q.items().to_vec())
    }
}

impl Notifier for NotificationService {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => log::warn!("notify: {}", notification.message),
            _ => log::debug!("notify: {}", notification.message),
        }
        let mut id = Uuid::nil();
        self.queue.update(|q| id = q.push(notification));

        if self.timeout_ms > 0 {
            let svc = *self;
            let timeout = self.timeout_ms;
            spawn_local(async move {
                TimeoutFuture::new(timeout).await;
                svc.dismiss(id);
            });
        }
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>()
        .expect("NotificationService not provided in context (provide it in app root)")
}

/// Renders the toast stack. Must be mounted exactly once.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();

    view! {
        <div class="toast-host">
            <For
                each=move || svc.items()
                key=|item| item.id
                children=move |item: ToastItem| {
                    let id = item.id;
                    view! {
                        <div class=item.notification.kind.css_class() role="status">
                            <span class="toast__message">{item.notification.message.clone()}</span>
                            <button class="toast__close" on:click=move |_| svc.dismiss(id) title="Dismiss">
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Collects notifications instead of showing them.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub seen: RefCell<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn count(&self) -> usize {
            self.seen.borrow().len()
        }

        pub fn kinds(&self) -> Vec<NotificationKind> {
            self.seen.borrow().iter().map(|n| n.kind).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.borrow_mut().push(notification);
        }
    }

    #[test]
    fn queue_drops_oldest_beyond_limit() {
        let mut queue = NotificationQueue::new(2);
        let first = queue.push(Notification::info("one"));
        queue.push(Notification::info("two"));
        queue.push(Notification::error("three"));

        assert_eq!(queue.len(), 2);
        assert!(!queue.dismiss(first));
        let messages: Vec<&str> = queue
            .items()
            .iter()
            .map(|i| i.notification.message.as_str())
            .collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut queue = NotificationQueue::new(5);
        let a = queue.push(Notification::success("saved"));
        let b = queue.push(Notification::warning("careful"));
        assert!(queue.dismiss(a));
        assert_eq!(queue.items()[0].id, b);
    }

    #[test]
    fn api_errors_become_error_toasts() {
        let n = Notification::from_api_error(&ApiError::Api {
            status: 500,
            message: "Database unavailable".into(),
        });
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.message, "Database unavailable");
    }
}

//! Toast stack rendering queued notifications.

use leptos::prelude::*;

use crate::state::notify::{NotificationState, Toast};

/// Fixed-position stack of active notifications. Each toast can also be
/// closed by hand before its timer fires.
#[component]
pub fn Toasts() -> impl IntoView {
    let toasts = expect_context::<RwSignal<NotificationState>>();

    view! {
        <div class="toasts" role="status">
            <For
                each=move || toasts.get().toasts
                key=|toast: &Toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let class = format!("toast toast--{}", toast.notification.severity.as_str());
                    view! {
                        <div class=class>
                            <span class="toast__message">{toast.notification.message}</span>
                            <button
                                class="toast__close"
                                on:click=move |_| toasts.update(|s| {
                                    s.dismiss(id);
                                })
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

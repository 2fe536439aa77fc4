//! Feedback screen: mark a prediction record as correct or not.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::app::ApiContext;
use crate::net::api::submit_feedback;

/// Numeric ids go over the wire as numbers, anything else as a string.
pub(crate) fn parse_record_id(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.parse::<u64>().map_or_else(|_| Value::from(raw), Value::from))
}

#[component]
pub fn FeedbackPage() -> impl IntoView {
    let api = use_context::<ApiContext>();
    let record_id = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let send = move |is_correct: bool| {
        if busy.get() {
            return;
        }
        let Some(id) = parse_record_id(&record_id.get()) else {
            info.set("Enter a record id first.".to_owned());
            return;
        };
        let Some(api) = api else {
            return;
        };
        let client = api.get_value();
        busy.set(true);
        info.set(String::new());

        leptos::task::spawn_local(async move {
            match submit_feedback(&client, id, is_correct).await {
                Ok(_) => info.set("Thanks, feedback recorded.".to_owned()),
                Err(e) => info.set(format!("Feedback failed: {}", e.user_message())),
            }
            busy.set(false);
        });
    };

    view! {
        <section class="page page--feedback">
            <h1>"Feedback"</h1>
            <input
                class="feedback-input"
                type="text"
                placeholder="Record id"
                prop:value=move || record_id.get()
                on:input=move |ev| record_id.set(event_target_value(&ev))
            />
            <div class="feedback-actions">
                <button on:click=move |_| send(true) disabled=move || busy.get()>"Correct"</button>
                <button on:click=move |_| send(false) disabled=move || busy.get()>"Incorrect"</button>
            </div>
            <Show when=move || !info.get().is_empty()>
                <p class="feedback-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}

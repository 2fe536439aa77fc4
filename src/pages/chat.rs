//! Bias-check screen: submit text, show the predicted label.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::app::ApiContext;
use crate::net::api::check_bias;

/// Short description of a prediction, from either response shape.
pub(crate) fn prediction_summary(value: &Value) -> String {
    let data = value.get("data").filter(|d| !d.is_null()).unwrap_or(value);
    let label = data.get("label").and_then(Value::as_str);
    let score = data.get("score").or_else(|| data.get("confidence")).and_then(Value::as_f64);
    match (label, score) {
        (Some(label), Some(score)) => format!("{label} ({:.0}%)", score * 100.0),
        (Some(label), None) => label.to_owned(),
        _ => data.to_string(),
    }
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let api = use_context::<ApiContext>();
    let text = RwSignal::new(String::new());
    let result = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let value = text.get().trim().to_owned();
        if value.is_empty() {
            return;
        }
        let Some(api) = api else {
            return;
        };
        let client = api.get_value();
        busy.set(true);
        result.set(None);

        leptos::task::spawn_local(async move {
            // Failures are already shown by the pipeline's notification.
            if let Ok(response) = check_bias(&client, &value).await {
                result.set(Some(prediction_summary(&response)));
            }
            busy.set(false);
        });
    };

    view! {
        <section class="page page--chat">
            <form class="chat-form" on:submit=on_submit>
                <textarea
                    class="chat-input"
                    placeholder="Paste text to check"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                ></textarea>
                <button class="chat-button" type="submit" disabled=move || busy.get()>
                    "Check"
                </button>
            </form>
            <Show when=move || result.get().is_some()>
                <p class="chat-result">{move || result.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}

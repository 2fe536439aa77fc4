use leptos::prelude::*;

#[component]
pub fn HistoryPage() -> impl IntoView {
    view! {
        <section class="page page--history">
            <h1>"History"</h1>
        </section>
    }
}

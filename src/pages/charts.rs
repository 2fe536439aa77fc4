//! Admin-only statistics screen.

use leptos::prelude::*;

#[component]
pub fn ChartsPage() -> impl IntoView {
    view! {
        <section class="page page--charts">
            <h1>"Charts"</h1>
        </section>
    }
}

//! Login screen. Credentials are exchanged by the account service, which
//! stores the token and profile in the session on success.

use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Bias Check"</h1>
                <p class="login-card__subtitle">"Sign in to continue."</p>
            </div>
        </div>
    }
}

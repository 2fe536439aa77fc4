//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    NavigateOptions, StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::toasts::Toasts;
use crate::config::ApiConfig;
use crate::net::request::{RequestPipeline, SessionEvent};
use crate::net::transport::BrowserTransport;
use crate::pages::{charts::ChartsPage, chat::ChatPage, feedback::FeedbackPage, history::HistoryPage, login::LoginPage};
use crate::routes::guard::Guarded;
use crate::routes::table::{AppRoute, LOGIN_ROUTE, ROOT_REDIRECT};
use crate::state::notify::NotificationState;
use crate::state::session::Session;
use crate::util::storage::LocalStorageStore;

/// Request pipeline over the browser's `fetch`.
pub type ApiClient = RequestPipeline<BrowserTransport>;
/// Session context shared by the guard and the pipeline.
pub type SessionContext = StoredValue<Session, LocalStorage>;
/// API client context for pages.
pub type ApiContext = StoredValue<ApiClient, LocalStorage>;

/// Root application component.
///
/// Provides the session and notification contexts and sets up client-side
/// routing. Every screen renders behind `Guarded`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session: SessionContext = StoredValue::new_local(Session::new(LocalStorageStore));
    let toasts = RwSignal::new(NotificationState::default());
    provide_context(session);
    provide_context(toasts);

    view! {
        <Title text="Bias Check"/>

        <Router>
            <ApiProvider>
                <main class="app-main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=|| view! { <Redirect path=ROOT_REDIRECT.path()/> }/>
                        <Route
                            path=StaticSegment("login")
                            view=|| view! { <Guarded route=AppRoute::Login><LoginPage/></Guarded> }
                        />
                        <Route
                            path=StaticSegment("chat")
                            view=|| view! { <Guarded route=AppRoute::Chat><ChatPage/></Guarded> }
                        />
                        <Route
                            path=StaticSegment("history")
                            view=|| view! { <Guarded route=AppRoute::History><HistoryPage/></Guarded> }
                        />
                        <Route
                            path=StaticSegment("feedback")
                            view=|| view! { <Guarded route=AppRoute::Feedback><FeedbackPage/></Guarded> }
                        />
                        <Route
                            path=StaticSegment("charts")
                            view=|| view! { <Guarded route=AppRoute::Charts><ChartsPage/></Guarded> }
                        />
                    </Routes>
                </main>
            </ApiProvider>
            <Toasts/>
        </Router>
    }
}

/// Builds the API client inside the router so auth expiry can navigate.
///
/// The pipeline clears the session itself; this controller only owns the
/// redirect to the login screen.
#[component]
fn ApiProvider(children: Children) -> impl IntoView {
    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        log::warn!("invalid API config, using defaults: {e}");
        ApiConfig::default()
    });
    let toasts = expect_context::<RwSignal<NotificationState>>();
    let session = expect_context::<SessionContext>().get_value();
    let navigate = use_navigate();

    let client = RequestPipeline::new(config, BrowserTransport, session, toasts).on_session_event(move |event| match event {
        SessionEvent::AuthExpired => navigate(LOGIN_ROUTE.path(), NavigateOptions::default()),
    });
    let api: ApiContext = StoredValue::new_local(client);
    provide_context(api);

    children()
}

//! Navigation guard run before every route renders.
//!
//! DESIGN
//! ======
//! `evaluate` is a pure function of the target's flags and the stored
//! identity so the whole decision table is unit-testable. `Guarded` is the
//! thin Leptos wrapper that applies the decision inside the router.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::table::{ADMIN_LANDING, AppRoute, DEFAULT_ROUTE, LOGIN_ROUTE, RouteDescriptor};
use crate::app::SessionContext;
use crate::state::session::{Identity, Session};

/// Outcome of one guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(AppRoute),
}

/// Decide whether `target` may render for `identity`. Rules apply in order;
/// the first match wins.
pub fn evaluate(target: &RouteDescriptor, identity: &Identity) -> Navigation {
    log::debug!(
        "route guard: to={} requires_auth={} requires_admin={} has_token={} role={:?}",
        target.path,
        target.meta.requires_auth,
        target.meta.requires_admin,
        identity.has_token(),
        identity.role
    );

    let decision = if target.meta.requires_auth && !identity.has_token() {
        Navigation::Redirect(LOGIN_ROUTE)
    } else if target.meta.requires_admin && !identity.is_admin() {
        Navigation::Redirect(DEFAULT_ROUTE)
    } else if target.route == LOGIN_ROUTE && identity.has_token() {
        Navigation::Redirect(landing_for(identity))
    } else {
        Navigation::Allow
    };

    if let Navigation::Redirect(to) = decision {
        log::debug!("route guard: redirecting {} -> {}", target.path, to.path());
    }
    decision
}

/// Where a signed-in user lands by default.
pub fn landing_for(identity: &Identity) -> AppRoute {
    if identity.is_admin() { ADMIN_LANDING } else { DEFAULT_ROUTE }
}

/// Render `children` only if the guard allows `route`; otherwise redirect.
#[component]
pub fn Guarded(route: AppRoute, children: Children) -> impl IntoView {
    let identity = use_context::<SessionContext>()
        .map(|session| session.with_value(Session::identity))
        .unwrap_or_default();

    match evaluate(route.descriptor(), &identity) {
        Navigation::Allow => children().into_any(),
        Navigation::Redirect(to) => view! { <Redirect path=to.path()/> }.into_any(),
    }
}

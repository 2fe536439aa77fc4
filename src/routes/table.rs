//! Static route table.
//!
//! Each screen is tagged with the two flags the navigation guard reads.
//! The table is never mutated at runtime.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Chat,
    History,
    Feedback,
    Charts,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub route: AppRoute,
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

const PUBLIC: RouteMeta = RouteMeta { requires_auth: false, requires_admin: false };
const AUTH: RouteMeta = RouteMeta { requires_auth: true, requires_admin: false };
const ADMIN: RouteMeta = RouteMeta { requires_auth: true, requires_admin: true };

pub const ROUTES: [RouteDescriptor; 5] = [
    RouteDescriptor { route: AppRoute::Login, path: "/login", name: "Login", meta: PUBLIC },
    RouteDescriptor { route: AppRoute::Chat, path: "/chat", name: "Chat", meta: AUTH },
    RouteDescriptor { route: AppRoute::History, path: "/history", name: "history", meta: AUTH },
    RouteDescriptor { route: AppRoute::Feedback, path: "/feedback", name: "Feedback", meta: AUTH },
    RouteDescriptor { route: AppRoute::Charts, path: "/charts", name: "Charts", meta: ADMIN },
];

/// Where `/` sends everyone.
pub const ROOT_REDIRECT: AppRoute = AppRoute::Chat;
/// Landing page for authenticated non-admin users.
pub const DEFAULT_ROUTE: AppRoute = AppRoute::Chat;
/// Landing page for admins bounced off the login screen.
pub const ADMIN_LANDING: AppRoute = AppRoute::Charts;
pub const LOGIN_ROUTE: AppRoute = AppRoute::Login;

impl AppRoute {
    pub fn descriptor(self) -> &'static RouteDescriptor {
        match self {
            Self::Login => &ROUTES[0],
            Self::Chat => &ROUTES[1],
            Self::History => &ROUTES[2],
            Self::Feedback => &ROUTES[3],
            Self::Charts => &ROUTES[4],
        }
    }

    pub fn path(self) -> &'static str {
        self.descriptor().path
    }
}

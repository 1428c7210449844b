use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_tin_record::ui::list::state::DashboardConfig;
use crate::domain::a001_tin_record::ui::list::TinDashboard;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequireRole;

/// Dashboard for `role`, behind its guard
#[component]
fn RoleDashboard(role: Role) -> impl IntoView {
    let session = use_session();

    view! {
        <RequireRole role=role>
            {move || match session.with(|s| s.api_client()) {
                Some(client) => view! {
                    <TinDashboard config=DashboardConfig::for_role(role) client=client />
                }
                .into_any(),
                None => view! { <div>"Not authenticated. Please login."</div> }.into_any(),
            }}
        </RequireRole>
    }
}

#[component]
fn AdminPage() -> impl IntoView {
    view! { <RoleDashboard role=Role::Administrator /> }
}

#[component]
fn UserPage() -> impl IntoView {
    view! { <RoleDashboard role=Role::RestrictedUser /> }
}

/// Sends the visitor to the dashboard of their role
#[component]
fn HomeRedirect() -> impl IntoView {
    let session = use_session();

    move || match session.with(|s| s.role()) {
        Some(Role::Administrator) => view! { <Redirect path="/admin" /> }.into_any(),
        Some(Role::RestrictedUser) => view! { <Redirect path="/user" /> }.into_any(),
        None => view! { <div>"Not authenticated. Please login."</div> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <div>"404 - Page not found"</div> }>
                <Route path=path!("/") view=HomeRedirect />
                <Route path=path!("/admin") view=AdminPage />
                <Route path=path!("/user") view=UserPage />
            </Routes>
        </Router>
    }
}

use contracts::system::auth::Role;
use leptos::prelude::*;

use super::context::use_session;

/// Renders children only for a signed-in user holding `role`.
/// The TIN service still authorizes every request on its own.
#[component]
pub fn RequireRole(role: Role, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.with(|s| s.access_token.is_some() && s.role() == Some(role))
            fallback=move || {
                if session.with(|s| s.access_token.is_some()) {
                    view! { <div>"Access denied."</div> }
                } else {
                    view! { <div>"Not authenticated. Please login."</div> }
                }
            }
        >
            {children()}
        </Show>
    }
}

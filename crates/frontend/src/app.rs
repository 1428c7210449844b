use crate::routes::routes::AppRoutes;
use crate::shared::toast::{ToastHost, Toaster};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Toasts outlive route changes, so the queue sits at the root.
    provide_context(Toaster::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
        <ToastHost />
    }
}

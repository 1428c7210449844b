use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous / "Page X of Y" / next.
///
/// Whether an edge button is enabled comes from the caller, so the same
/// control serves both the clamping and the wrap-around policy.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    #[prop(into)]
    can_prev: Signal<bool>,

    #[prop(into)]
    can_next: Signal<bool>,

    on_prev: Callback<()>,

    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_prev.run(())
                disabled=move || !can_prev.get()
                aria-label="Previous Page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("Page {} of {}", current_page.get(), total_pages.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_next.run(())
                disabled=move || !can_next.get()
                aria-label="Next Page"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}

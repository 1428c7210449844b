use leptos::prelude::*;

/// Native date picker bound to a `YYYY-MM-DD` string
#[component]
pub fn DateInput(
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd format)
    on_change: impl Fn(String) + 'static,
    #[prop(into)] id: String,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            id=id
            class="form__input"
            required=true
            prop:value=value
            disabled=move || disabled.get()
            on:input=move |ev| {
                on_change(event_target_value(&ev));
            }
        />
    }
}

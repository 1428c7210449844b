use contracts::domain::a001_tin_record::TinField;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_tin_record::ui::list::state::DashboardState;
use crate::shared::components::date_input::DateInput;
use crate::shared::modal::Modal;

#[component]
pub fn TinFormDialog(state: RwSignal<DashboardState>, on_submit: Callback<()>) -> impl IntoView {
    let submitting = Signal::derive(move || state.with(|s| s.controller().is_submitting()));
    let title = Signal::derive(move || {
        state.with(|s| s.dialog().map(|d| d.title()).unwrap_or_default().to_string())
    });
    let submit_label =
        move || state.with(|s| s.dialog().map(|d| d.submit_label()).unwrap_or_default());
    let on_close = Callback::new(move |_| state.update(|s| s.close_dialog()));

    view! {
        <Modal title=title on_close=on_close>
            {move || {
                state
                    .with(|s| s.dialog().and_then(|d| d.error.clone()))
                    .map(|e| view! { <div class="alert alert--error">{e}</div> })
            }}

            <FormField state=state field=TinField::Name disabled=submitting />
            <FormField state=state field=TinField::Address disabled=submitting />
            <FormField state=state field=TinField::Birthdate disabled=submitting />
            <FormField
                state=state
                field=TinField::TinNumber
                disabled=submitting
                placeholder="123-456-789"
            />
            <FormField state=state field=TinField::Date disabled=submitting />

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=submitting
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_submit.run(())
                    disabled=submitting
                >
                    {submit_label}
                </Button>
            </div>
        </Modal>
    }
}

#[component]
fn FormField(
    state: RwSignal<DashboardState>,
    field: TinField,
    disabled: Signal<bool>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let id = format!("tin-form-{:?}", field).to_lowercase();
    let value = Signal::derive(move || {
        state.with(|s| {
            s.dialog()
                .map(|d| d.form.get(field).to_string())
                .unwrap_or_default()
        })
    });
    let set_value = move |v: String| state.update(|s| s.edit_form(field, v));

    let input = match field {
        TinField::Birthdate | TinField::Date => view! {
            <DateInput value=value on_change=set_value id=id.clone() disabled=disabled />
        }
        .into_any(),
        _ => view! {
            <input
                type="text"
                id=id.clone()
                class="form__input"
                required=true
                placeholder=placeholder
                prop:value=value
                disabled=move || disabled.get()
                on:input=move |ev| set_value(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label for=id>{field.label()}</label>
            {input}
        </div>
    }
}

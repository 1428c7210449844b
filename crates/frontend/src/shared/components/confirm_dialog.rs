use leptos::prelude::*;
use thaw::*;

use crate::shared::modal::Modal;

/// Yes/no prompt for state-changing actions
#[component]
pub fn ConfirmDialog(
    #[prop(into)] message: String,
    #[prop(into)] confirm_label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Modal title="Please confirm".to_string() on_close=on_cancel>
            <p class="confirm-dialog__message">{message}</p>
            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_confirm.run(())
                >
                    {confirm_label}
                </Button>
            </div>
        </Modal>
    }
}

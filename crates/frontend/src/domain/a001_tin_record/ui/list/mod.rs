pub mod state;

use contracts::domain::a001_tin_record::{TinRecord, TinRecordId};
use contracts::system::auth::Capability;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_tin_record::api::TinApiClient;
use crate::domain::a001_tin_record::mutation::{Mutation, MutationKind, Step};
use crate::domain::a001_tin_record::ui::details::TinFormDialog;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::toast::{use_toaster, Notice};
use state::{create_state, DashboardConfig, Submission};

/// TIN table for one role. Capabilities and pagination policy come from `config`;
/// the authenticated client is injected by the caller.
#[component]
pub fn TinDashboard(config: DashboardConfig, client: TinApiClient) -> impl IntoView {
    let state = create_state(config);
    let client = StoredValue::new(client);
    let toaster = use_toaster();

    let load_data = move || {
        let Some(ticket) = state.try_update(|s| s.begin_fetch()) else {
            return;
        };
        spawn_local(async move {
            let result = client.get_value().list().await;
            if let Some(Some(notice)) = state.try_update(|s| s.apply_fetch(ticket, result)) {
                toaster.notify(notice);
            }
        });
    };

    let run_mutation = move |mutation: Mutation| {
        spawn_local(async move {
            let result = client.get_value().execute(&mutation).await;
            if let Some(Some(done)) = state.try_update(|s| s.apply_completion(result)) {
                toaster.notify(done.notice.clone());
                if done.refresh {
                    load_data();
                }
            }
        });
    };

    Effect::new(move |_| load_data());

    let search = RwSignal::new(String::new());
    Effect::new(move |_| {
        let query = search.get();
        state.update(|s| s.set_query(query));
    });

    let submit_dialog = Callback::new(move |_| match state.try_update(|s| s.submit_dialog()) {
        Some(Submission::Send(mutation)) => run_mutation(mutation),
        Some(Submission::Blocked(notice)) => toaster.notify(notice),
        _ => {}
    });

    let request_lifecycle = move |kind: MutationKind, id: TinRecordId| {
        match state.try_update(|s| s.request_lifecycle(kind, &id)) {
            Some(Ok(Step::Submit(mutation))) => run_mutation(mutation),
            Some(Err(e)) => {
                log::warn!("TIN {:?} on {} rejected: {}", kind, id, e);
                toaster.notify(Notice::error(e.to_string()));
            }
            _ => {}
        }
    };

    let on_confirm = Callback::new(move |_| {
        if let Some(Some(mutation)) = state.try_update(|s| s.confirm()) {
            run_mutation(mutation);
        }
    });
    let on_cancel_confirm = Callback::new(move |_| state.update(|s| s.cancel_confirmation()));

    let locked = Signal::derive(move || state.with(|s| s.is_locked()));
    let loading = Signal::derive(move || state.with(|s| s.store().is_loading()));
    let page = Memo::new(move |_| state.with(|s| s.visible_page()));
    // Re-mount dialogs only when they open or close, not on every keystroke
    let dialog_open = Memo::new(move |_| state.with(|s| s.dialog().is_some()));
    let pending = Memo::new(move |_| {
        state.with(|s| s.controller().pending_confirmation().map(|m| m.kind()))
    });
    let show_active = state.with_untracked(|s| s.shows_active_column());
    let column_count = if show_active { 7 } else { 6 };

    let render_row = move |tin: TinRecord| {
        let edit_id = tin.id.clone();
        let lifecycle_id = tin.id.clone();
        let delete_id = tin.id.clone();
        let is_active = tin.is_active;
        let lifecycle = if is_active {
            MutationKind::Deactivate
        } else {
            MutationKind::Activate
        };
        let name = tin.name.clone();
        let address = tin.address.clone();
        let birthdate = tin.birthdate_display();
        let tin_number = tin.tin_number.clone();
        let date = tin.date_display();

        view! {
            <TableRow attr:style={if is_active { "" } else { "opacity: 0.5;" }}>
                <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout truncate=true>{address}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout>{birthdate}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout>{tin_number}</TableCellLayout></TableCell>
                <TableCell><TableCellLayout>{date}</TableCellLayout></TableCell>
                {show_active.then(|| view! {
                    <TableCell>
                        <TableCellLayout>
                            {if is_active {
                                view! { <span class="badge badge--success">"Yes"</span> }.into_any()
                            } else {
                                view! { <span class="badge badge--neutral">"No"</span> }.into_any()
                            }}
                        </TableCellLayout>
                    </TableCell>
                })}
                <TableCell>
                    <div class="table__actions">
                        {config.can(Capability::Update).then(|| view! {
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| {
                                    state.update(|s| {
                                        s.open_edit(&edit_id, today());
                                    });
                                }
                                disabled=locked
                                attr:title="Edit TIN"
                            >
                                {icon("edit")}
                            </Button>
                        })}
                        {config.can(lifecycle.required_capability()).then(|| view! {
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| request_lifecycle(lifecycle, lifecycle_id.clone())
                                disabled=locked
                                attr:title={if is_active { "Deactivate TIN" } else { "Activate TIN" }}
                            >
                                {icon(if is_active { "block" } else { "check" })}
                            </Button>
                        })}
                        {config.can(Capability::Delete).then(|| view! {
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| request_lifecycle(MutationKind::Delete, delete_id.clone())
                                disabled=locked
                                attr:title="Delete TIN"
                            >
                                {icon("trash")}
                            </Button>
                        })}
                    </div>
                </TableCell>
            </TableRow>
        }
    };

    view! {
        <div class="page tin-dashboard">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{config.title}</h1>
                    <Badge>{move || page.with(|p| p.total_count.to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    {config.can(Capability::Create).then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                state.update(|s| {
                                    s.open_create(today());
                                });
                            }
                            disabled=locked
                        >
                            {icon("plus")}
                            " Create New TIN"
                        </Button>
                    })}
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div style="flex: 1; max-width: 320px;">
                        <Input value=search placeholder="Search by Name or TIN Number" />
                    </div>
                </div>

                {move || {
                    state
                        .with(|s| s.store().error().map(str::to_string))
                        .map(|e| view! { <div class="alert alert--error">{e}</div> })
                }}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;" attr:aria-label="tin table">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Name"</TableHeaderCell>
                                <TableHeaderCell>"Address"</TableHeaderCell>
                                <TableHeaderCell>"Birthdate"</TableHeaderCell>
                                <TableHeaderCell>"TIN Number"</TableHeaderCell>
                                <TableHeaderCell>"Date"</TableHeaderCell>
                                {show_active.then(|| view! { <TableHeaderCell>"Active"</TableHeaderCell> })}
                                <TableHeaderCell>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                if loading.get() {
                                    view! {
                                        <TableRow>
                                            <TableCell attr:colspan=column_count>
                                                <Spinner />
                                            </TableCell>
                                        </TableRow>
                                    }
                                    .into_any()
                                } else if page.with(|p| p.rows.is_empty()) {
                                    view! {
                                        <TableRow>
                                            <TableCell attr:colspan=column_count>"No TINs found."</TableCell>
                                        </TableRow>
                                    }
                                    .into_any()
                                } else {
                                    page.get().rows.into_iter().map(render_row).collect_view().into_any()
                                }
                            }}
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || page.with(|p| p.total_pages > 1)>
                    <PaginationControls
                        current_page=Signal::derive(move || page.with(|p| p.page))
                        total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                        can_prev=Signal::derive(move || page.with(|p| p.can_prev))
                        can_next=Signal::derive(move || page.with(|p| p.can_next))
                        on_prev=Callback::new(move |_| state.update(|s| s.prev_page()))
                        on_next=Callback::new(move |_| state.update(|s| s.next_page()))
                    />
                </Show>

                {move || {
                    dialog_open
                        .get()
                        .then(|| view! { <TinFormDialog state=state on_submit=submit_dialog /> })
                }}

                {move || {
                    pending.get().map(|kind| view! {
                        <ConfirmDialog
                            message=kind.confirmation_prompt().unwrap_or_default()
                            confirm_label=kind.label()
                            on_confirm=on_confirm
                            on_cancel=on_cancel_confirm
                        />
                    })
                }}
            </div>
        </div>
    }
}

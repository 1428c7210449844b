use chrono::NaiveDate;
use contracts::domain::a001_tin_record::{TinField, TinRecord, TinRecordDto, TinRecordId};
use contracts::system::auth::{Capability, CapabilitySet, Role};
use leptos::prelude::*;

use crate::domain::a001_tin_record::api::RequestError;
use crate::domain::a001_tin_record::mutation::{
    Completion, Mutation, MutationController, MutationKind, MutationRejected, Step,
};
use crate::domain::a001_tin_record::store::{FetchOutcome, FetchTicket, RecordStore};
use crate::shared::list_utils::{filter_list, Searchable};
use crate::shared::pagination::{PagePolicy, Paginator};
use crate::shared::toast::Notice;

impl Searchable for TinRecord {
    fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.tin_number.to_lowercase().contains(query)
    }
}

/// What differs between the administrator and the restricted-user dashboards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub role: Role,
    pub capabilities: CapabilitySet,
    pub policy: PagePolicy,
    pub title: &'static str,
    pub fetch_fallback: &'static str,
}

impl DashboardConfig {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Administrator => Self {
                role,
                capabilities: role.capabilities(),
                policy: PagePolicy::Clamp,
                title: "TIN Management",
                fetch_fallback: "Failed to fetch TINs",
            },
            Role::RestrictedUser => Self {
                role,
                capabilities: role.capabilities(),
                policy: PagePolicy::WrapAround,
                title: "User Dashboard - Your TINs",
                fetch_fallback: "Failed to fetch your TINs",
            },
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormDialog {
    pub form: TinRecordDto,
    /// `None` when creating
    pub editing: Option<TinRecordId>,
    pub error: Option<String>,
}

impl FormDialog {
    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit TIN"
        } else {
            "Create New TIN"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update"
        } else {
            "Create"
        }
    }
}

/// Derived page of the filtered collection
#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub rows: Vec<TinRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Result of pressing the dialog's submit button
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Send to the service
    Send(Mutation),
    /// Rejected locally; show the notice, nothing goes over the network
    Blocked(Notice),
    /// Nothing to submit (dialog closed or another action in flight)
    Ignored,
}

/// Dashboard view state: fetch, filter, paginate, mutate.
///
/// The filtered list and the page are always derived from `store`;
/// they are never stored on their own.
#[derive(Clone, Debug)]
pub struct DashboardState {
    config: DashboardConfig,
    store: RecordStore,
    query: String,
    paginator: Paginator,
    dialog: Option<FormDialog>,
    controller: MutationController,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            store: RecordStore::new(),
            query: String::new(),
            paginator: Paginator::new(config.policy),
            dialog: None,
            controller: MutationController::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn controller(&self) -> &MutationController {
        &self.controller
    }

    pub fn dialog(&self) -> Option<&FormDialog> {
        self.dialog.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_locked(&self) -> bool {
        self.controller.is_locked()
    }

    /// The Active column is only meaningful to roles that can change it
    pub fn shows_active_column(&self) -> bool {
        self.config.capabilities.has_lifecycle_actions()
    }

    // ------------------------------------------------------------------
    // Fetch
    // ------------------------------------------------------------------

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.store.begin_fetch()
    }

    /// Returns a notice to surface when the fetch failed
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<TinRecord>, RequestError>,
    ) -> Option<Notice> {
        match self
            .store
            .complete_fetch(ticket, result, self.config.fetch_fallback)
        {
            FetchOutcome::Applied => {
                self.paginator.reset();
                None
            }
            FetchOutcome::Failed(message) => Some(Notice::error(message)),
            FetchOutcome::Stale => None,
        }
    }

    // ------------------------------------------------------------------
    // Search and pagination
    // ------------------------------------------------------------------

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.paginator.reset();
    }

    pub fn filtered(&self) -> Vec<TinRecord> {
        filter_list(self.store.records(), &self.query)
    }

    pub fn next_page(&mut self) {
        let count = self.filtered().len();
        self.paginator.next(count);
    }

    pub fn prev_page(&mut self) {
        let count = self.filtered().len();
        self.paginator.prev(count);
    }

    pub fn visible_page(&self) -> PageView {
        let filtered = self.filtered();
        let count = filtered.len();
        PageView {
            rows: self.paginator.window(&filtered).to_vec(),
            page: self.paginator.page(),
            total_pages: self.paginator.total_pages(count),
            total_count: count,
            can_prev: self.paginator.can_go_prev(count),
            can_next: self.paginator.can_go_next(count),
        }
    }

    // ------------------------------------------------------------------
    // Form dialog
    // ------------------------------------------------------------------

    pub fn open_create(&mut self, today: NaiveDate) -> bool {
        if self.is_locked() || !self.config.can(Capability::Create) {
            return false;
        }
        self.dialog = Some(FormDialog {
            form: TinRecordDto::blank(today),
            editing: None,
            error: None,
        });
        true
    }

    pub fn open_edit(&mut self, id: &TinRecordId, today: NaiveDate) -> bool {
        if self.is_locked() || !self.config.can(Capability::Update) {
            return false;
        }
        let Some(record) = self.store.records().iter().find(|r| &r.id == id) else {
            return false;
        };
        self.dialog = Some(FormDialog {
            form: TinRecordDto::from_record(record, today),
            editing: Some(record.id.clone()),
            error: None,
        });
        true
    }

    /// Ignored while the dialog's own request is in flight
    pub fn close_dialog(&mut self) {
        if self.controller.is_submitting() {
            return;
        }
        self.dialog = None;
    }

    pub fn edit_form(&mut self, field: TinField, value: String) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.form.set(field, value);
        }
    }

    pub fn submit_dialog(&mut self) -> Submission {
        let Some(dialog) = self.dialog.as_mut() else {
            return Submission::Ignored;
        };
        dialog.error = None;

        let mutation = match &dialog.editing {
            Some(id) => Mutation::Update {
                id: id.clone(),
                dto: dialog.form.clone(),
            },
            None => Mutation::Create(dialog.form.clone()),
        };

        match self.controller.request(mutation, &self.config.capabilities) {
            Ok(Step::Submit(mutation)) => Submission::Send(mutation),
            // form mutations never ask for confirmation
            Ok(Step::Confirm(_)) => Submission::Ignored,
            Err(MutationRejected::Busy) => Submission::Ignored,
            Err(rejected) => {
                let message = rejected.to_string();
                dialog.error = Some(message.clone());
                Submission::Blocked(Notice::error(message))
            }
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle actions
    // ------------------------------------------------------------------

    /// Activate, deactivate or delete. These normally stop in `AwaitingConfirmation`.
    pub fn request_lifecycle(
        &mut self,
        kind: MutationKind,
        id: &TinRecordId,
    ) -> Result<Step, MutationRejected> {
        let record = self
            .store
            .records()
            .iter()
            .find(|r| &r.id == id)
            .ok_or(MutationRejected::UnknownRecord)?;

        let mutation = match kind {
            MutationKind::Activate if !record.is_active => Mutation::Activate(id.clone()),
            MutationKind::Deactivate if record.is_active => Mutation::Deactivate(id.clone()),
            MutationKind::Delete => Mutation::Delete(id.clone()),
            other => return Err(MutationRejected::NotApplicable(other)),
        };

        self.controller.request(mutation, &self.config.capabilities)
    }

    pub fn confirm(&mut self) -> Option<Mutation> {
        self.controller.confirm()
    }

    pub fn cancel_confirmation(&mut self) {
        self.controller.cancel();
    }

    /// Apply the outcome of a submitted mutation. The caller refreshes when
    /// `Completion::refresh` is set.
    pub fn apply_completion(&mut self, result: Result<(), RequestError>) -> Option<Completion> {
        let completion = self.controller.complete(result)?;
        if completion.close_dialog {
            self.dialog = None;
        }
        if let (Some(message), Some(dialog)) = (&completion.form_error, self.dialog.as_mut()) {
            dialog.error = Some(message.clone());
        }
        Some(completion)
    }
}

pub fn create_state(config: DashboardConfig) -> RwSignal<DashboardState> {
    RwSignal::new(DashboardState::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::toast::ToastKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn record(n: usize) -> TinRecord {
        TinRecord {
            id: TinRecordId::new(format!("id-{n}")),
            name: format!("Person {n:02}"),
            address: format!("{n} Mabini St"),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
            tin_number: format!("100-200-{:03}", n),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            is_active: true,
        }
    }

    fn loaded(role: Role, records: Vec<TinRecord>) -> DashboardState {
        let mut state = DashboardState::new(DashboardConfig::for_role(role));
        let ticket = state.begin_fetch();
        assert_eq!(state.apply_fetch(ticket, Ok(records)), None);
        state
    }

    fn names(view: &PageView) -> Vec<String> {
        view.rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_role_configs() {
        let admin = DashboardConfig::for_role(Role::Administrator);
        assert_eq!(admin.policy, PagePolicy::Clamp);
        assert!(admin.can(Capability::Delete));
        let user = DashboardConfig::for_role(Role::RestrictedUser);
        assert_eq!(user.policy, PagePolicy::WrapAround);
        assert!(!user.can(Capability::Deactivate));
        assert_eq!(user.fetch_fallback, "Failed to fetch your TINs");
    }

    #[test]
    fn test_twelve_records_two_pages() {
        let mut state = loaded(Role::Administrator, (1..=12).map(record).collect());
        let view = state.visible_page();
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].name, "Person 01");
        assert_eq!(view.rows[9].name, "Person 10");

        state.next_page();
        let view = state.visible_page();
        assert_eq!(view.page, 2);
        assert_eq!(names(&view), vec!["Person 11", "Person 12"]);
    }

    #[test]
    fn test_policies_at_last_page() {
        let mut admin = loaded(Role::Administrator, (1..=12).map(record).collect());
        admin.next_page();
        assert!(!admin.visible_page().can_next);
        admin.next_page();
        assert_eq!(admin.visible_page().page, 2);

        let mut user = loaded(Role::RestrictedUser, (1..=12).map(record).collect());
        user.next_page();
        assert!(user.visible_page().can_next);
        user.next_page();
        assert_eq!(user.visible_page().page, 1);
    }

    #[test]
    fn test_empty_collection_has_no_pages() {
        let state = loaded(Role::RestrictedUser, vec![]);
        let view = state.visible_page();
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.total_count, 0);
        assert!(view.rows.is_empty());
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_query_change_resets_page_and_filters() {
        let mut state = loaded(Role::Administrator, (1..=25).map(record).collect());
        state.next_page();
        state.next_page();
        assert_eq!(state.visible_page().page, 3);

        state.set_query("PERSON 1".into());
        let view = state.visible_page();
        assert_eq!(view.page, 1);
        // Person 10..=19
        assert_eq!(view.total_count, 10);
        assert!(view.rows.iter().all(|r| r.name.starts_with("Person 1")));
    }

    #[test]
    fn test_query_matches_tin_number() {
        let state = {
            let mut s = loaded(Role::Administrator, (1..=12).map(record).collect());
            s.set_query(" 200-011 ".into());
            s
        };
        assert_eq!(names(&state.visible_page()), vec!["Person 11"]);
    }

    #[test]
    fn test_refetch_resets_page() {
        let mut state = loaded(Role::Administrator, (1..=12).map(record).collect());
        state.next_page();
        let ticket = state.begin_fetch();
        state.apply_fetch(ticket, Ok((1..=12).map(record).collect()));
        assert_eq!(state.visible_page().page, 1);
    }

    #[test]
    fn test_fetch_failure_surfaces_notice() {
        let mut state = DashboardState::new(DashboardConfig::for_role(Role::Administrator));
        let ticket = state.begin_fetch();
        let notice = state.apply_fetch(ticket, Err(RequestError::Network("down".into())));
        assert_eq!(notice, Some(Notice::error("Failed to fetch TINs")));
        assert_eq!(state.store().error(), Some("Failed to fetch TINs"));
        assert_eq!(state.visible_page().total_count, 0);
    }

    #[test]
    fn test_invalid_create_is_blocked_locally() {
        let mut state = loaded(Role::RestrictedUser, vec![]);
        assert!(state.open_create(today()));
        for (field, value) in [
            (TinField::Name, "Ana Reyes"),
            (TinField::Address, "Quezon City"),
            (TinField::Birthdate, "1992-02-29"),
            (TinField::TinNumber, "12-3456-78"),
        ] {
            state.edit_form(field, value.into());
        }

        let message = "TIN Number must contain exactly 9 digits (excluding / or -).";
        assert_eq!(state.submit_dialog(), Submission::Blocked(Notice::error(message)));
        assert_eq!(state.dialog().unwrap().error.as_deref(), Some(message));
        assert!(!state.is_locked());
    }

    #[test]
    fn test_missing_fields_blocked() {
        let mut state = loaded(Role::RestrictedUser, vec![]);
        state.open_create(today());
        match state.submit_dialog() {
            Submission::Blocked(notice) => {
                assert_eq!(notice.message, "Please fill all required fields.")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_successful_update_closes_dialog_and_refetches() {
        let mut state = loaded(Role::RestrictedUser, (1..=3).map(record).collect());
        let id = TinRecordId::new("id-2");
        assert!(state.open_edit(&id, today()));
        assert_eq!(state.dialog().unwrap().title(), "Edit TIN");
        assert_eq!(state.dialog().unwrap().form.birthdate, "1990-01-01");
        state.edit_form(TinField::Name, "Renamed Person".into());

        let Submission::Send(mutation) = state.submit_dialog() else {
            panic!("expected a request");
        };
        assert_eq!(mutation.kind(), MutationKind::Update);
        assert!(state.is_locked());

        let done = state.apply_completion(Ok(())).unwrap();
        assert!(done.refresh);
        assert_eq!(done.notice, Notice::success("TIN updated successfully"));
        assert!(state.dialog().is_none());

        let mut refreshed: Vec<TinRecord> = (1..=3).map(record).collect();
        refreshed[1].name = "Renamed Person".into();
        let ticket = state.begin_fetch();
        state.apply_fetch(ticket, Ok(refreshed));
        assert_eq!(
            names(&state.visible_page()),
            vec!["Person 01", "Renamed Person", "Person 03"]
        );
    }

    #[test]
    fn test_failed_create_keeps_dialog_and_collection() {
        let records: Vec<TinRecord> = (1..=2).map(record).collect();
        let mut state = loaded(Role::Administrator, records.clone());
        state.open_create(today());
        for (field, value) in [
            (TinField::Name, "Dup"),
            (TinField::Address, "Pasig"),
            (TinField::Birthdate, "1980-12-12"),
            (TinField::TinNumber, "100-200-001"),
        ] {
            state.edit_form(field, value.into());
        }
        assert!(matches!(state.submit_dialog(), Submission::Send(_)));

        let done = state
            .apply_completion(Err(RequestError::Status {
                status: 400,
                message: Some("TIN number already exists".into()),
            }))
            .unwrap();
        assert!(!done.refresh);
        assert_eq!(done.notice.kind, ToastKind::Error);
        let dialog = state.dialog().unwrap();
        assert_eq!(dialog.error.as_deref(), Some("TIN number already exists"));
        assert_eq!(dialog.form.name, "Dup");
        assert_eq!(state.store().records(), records.as_slice());
        assert!(!state.is_locked());
    }

    #[test]
    fn test_dialog_cannot_close_while_submitting() {
        let mut state = loaded(Role::Administrator, vec![record(1)]);
        state.open_edit(&TinRecordId::new("id-1"), today());
        assert!(matches!(state.submit_dialog(), Submission::Send(_)));
        state.close_dialog();
        assert!(state.dialog().is_some());
        state.apply_completion(Err(RequestError::Network("x".into())));
        state.close_dialog();
        assert!(state.dialog().is_none());
    }

    #[test]
    fn test_lifecycle_flow_locks_table() {
        let mut state = loaded(Role::Administrator, (1..=2).map(record).collect());
        let id = TinRecordId::new("id-1");
        let step = state.request_lifecycle(MutationKind::Deactivate, &id).unwrap();
        assert_eq!(step, Step::Confirm("Are you sure you want to deactivate this TIN?"));
        assert!(state.is_locked());
        assert!(!state.open_edit(&id, today()));
        assert_eq!(
            state.request_lifecycle(MutationKind::Delete, &TinRecordId::new("id-2")),
            Err(MutationRejected::Busy)
        );

        assert_eq!(state.confirm(), Some(Mutation::Deactivate(id)));
        let done = state.apply_completion(Ok(())).unwrap();
        assert_eq!(done.notice, Notice::success("TIN deactivated successfully"));
        assert!(done.refresh);
        assert!(!state.is_locked());
    }

    #[test]
    fn test_lifecycle_respects_record_state() {
        let mut inactive = record(1);
        inactive.is_active = false;
        let mut state = loaded(Role::Administrator, vec![inactive]);
        let id = TinRecordId::new("id-1");
        assert_eq!(
            state.request_lifecycle(MutationKind::Deactivate, &id),
            Err(MutationRejected::NotApplicable(MutationKind::Deactivate))
        );
        assert!(state.request_lifecycle(MutationKind::Activate, &id).is_ok());
        state.cancel_confirmation();
        assert!(!state.is_locked());
        assert_eq!(
            state.request_lifecycle(MutationKind::Delete, &TinRecordId::new("gone")),
            Err(MutationRejected::UnknownRecord)
        );
    }

    #[test]
    fn test_active_column_follows_lifecycle_capabilities() {
        let admin = DashboardState::new(DashboardConfig::for_role(Role::Administrator));
        assert!(admin.shows_active_column());
        assert_eq!(
            admin.shows_active_column(),
            Role::Administrator.capabilities().has_lifecycle_actions()
        );
    }

    #[test]
    fn test_restricted_user_has_no_lifecycle_actions() {
        let mut state = loaded(Role::RestrictedUser, vec![record(1)]);
        assert!(!state.shows_active_column());
        assert_eq!(
            state.request_lifecycle(MutationKind::Delete, &TinRecordId::new("id-1")),
            Err(MutationRejected::NotPermitted(MutationKind::Delete))
        );
    }
}

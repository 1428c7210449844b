use contracts::system::auth::{Role, UserInfo};
use leptos::prelude::*;

use super::storage;
use crate::domain::a001_tin_record::api::TinApiClient;
use crate::shared::api_utils::api_base;

/// Identity and credentials of the signed-in user.
///
/// Obtained by the sign-in flow outside this console; restored here from storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl Session {
    pub fn restore() -> Self {
        let session = Self {
            access_token: storage::get_access_token(),
            user_info: storage::get_user_info(),
        };
        if session.access_token.is_some() != session.user_info.is_some() {
            // half a session is no session
            storage::clear_session();
            return Self::default();
        }
        session
    }

    pub fn role(&self) -> Option<Role> {
        self.user_info.as_ref().map(|u| u.role)
    }

    /// Authenticated request capability for the TIN endpoints
    pub fn api_client(&self) -> Option<TinApiClient> {
        self.access_token
            .as_ref()
            .map(|token| TinApiClient::new(api_base(), token.clone()))
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = RwSignal::new(Session::restore());
    if let Some(user) = session.with_untracked(|s| s.user_info.clone()) {
        log::debug!("restored session for {} ({})", user.username, user.role);
    }
    provide_context(session);

    children()
}

/// Hook to access the session
pub fn use_session() -> RwSignal<Session> {
    use_context::<RwSignal<Session>>().expect("AuthProvider not found in component tree")
}

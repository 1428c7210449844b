use contracts::system::auth::UserInfo;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const USER_INFO_KEY: &str = "auth_user_info";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
}

/// Identity cached by the sign-in flow alongside the token
pub fn get_user_info() -> Option<UserInfo> {
    let raw = get_local_storage()?.get_item(USER_INFO_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(info) => Some(info),
        Err(e) => {
            log::warn!("ignoring unreadable cached user info: {}", e);
            None
        }
    }
}

/// Drop the stored session
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(USER_INFO_KEY);
    }
}

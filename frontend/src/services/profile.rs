use common::model::profile::StoredUser;
use common::workflow::ProfileLookup;

/// Key under which the sign-in page keeps the current user.
const USER_KEY: &str = "user";

/// Reads the signed-in user that the login page left in `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageProfile;

impl ProfileLookup for LocalStorageProfile {
    fn current_user(&self) -> Option<StoredUser> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(USER_KEY).ok()??;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("ignoring unreadable stored user: {}", err);
                None
            }
        }
    }
}

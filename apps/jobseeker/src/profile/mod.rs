//! Profile page controllers: résumé upload/parse and the two profile forms.
//!
//! Every profile mutation marks the `Users` and `CurrentUser` cache entries
//! stale once it settles, whether it succeeded or not.

pub mod form;
pub mod resume;

use tracing::warn;

use crate::cache::QueryKey;
use crate::models::{User, UserUpdateMe};
use crate::notify::{Toaster, LONG_TOAST_MS};
use crate::session::Session;

pub use form::{CvFields, CvForm, FormState, ProfileFields, ProfileForm};
pub use resume::{ParseState, ResumeFlow, SelectedFile, UploadState};

pub(crate) const PROFILE_KEYS: [QueryKey; 2] = [QueryKey::Users, QueryKey::CurrentUser];

/// Invalidates the profile queries and reloads the current user.
pub(crate) async fn settle(session: &Session) -> Option<User> {
    session.cache.invalidate(&PROFILE_KEYS);
    match session.current_user().await {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Could not reload profile: {e}");
            None
        }
    }
}

/// Sends a partial profile update with the standard toasts.
pub(crate) async fn submit_update(
    session: &Session,
    toaster: &Toaster,
    update: &UserUpdateMe,
) -> Option<User> {
    let result = session.api.update_user_me(update).await;
    match &result {
        Ok(_) => toaster.success("Success!", "User updated successfully.", LONG_TOAST_MS),
        Err(e) => toaster.error("Something went wrong.", &e.detail(), LONG_TOAST_MS),
    }
    settle(session).await;
    result.ok()
}

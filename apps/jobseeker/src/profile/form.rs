//! Edit-mode forms over the current user's profile.

use serde_json::Value;

use super::submit_update;
use crate::errors::ApiError;
use crate::models::{User, UserUpdateMe};
use crate::notify::{Toaster, LONG_TOAST_MS};
use crate::session::Session;

pub const NAME_MAX_LEN: usize = 30;

/// Initial and current values of a form plus its edit-mode flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    initial: F,
    current: F,
    editing: bool,
}

impl<F: Clone + PartialEq> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            initial: values.clone(),
            current: values,
            editing: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn toggle_edit(&mut self) {
        self.editing = !self.editing;
    }

    pub fn values(&self) -> &F {
        &self.current
    }

    pub fn initial(&self) -> &F {
        &self.initial
    }

    /// Mutable access to the current values. Ignored unless in edit mode.
    pub fn values_mut(&mut self) -> Option<&mut F> {
        self.editing.then_some(&mut self.current)
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.initial
    }

    /// Restores the initial values and leaves edit mode.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.editing = false;
    }

    /// Adopts `values` as the new baseline and leaves edit mode.
    pub fn commit(&mut self, values: F) {
        self.initial = values.clone();
        self.current = values;
        self.editing = false;
    }
}

// ── User information ────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub name: String,
    pub username: String,
    pub additional_info: String,
}

impl ProfileFields {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            username: user.username.clone(),
            additional_info: user.additional_info.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.chars().count() > NAME_MAX_LEN {
            return Err(ApiError::Invalid(format!(
                "Name must be at most {NAME_MAX_LEN} characters"
            )));
        }
        if self.username.trim().is_empty() {
            return Err(ApiError::Invalid("Username is required".into()));
        }
        Ok(())
    }

    /// Update containing only the fields that differ from `initial`.
    pub fn changes_from(&self, initial: &ProfileFields) -> UserUpdateMe {
        let changed = |now: &String, before: &String| (now != before).then(|| now.clone());
        UserUpdateMe {
            name: changed(&self.name, &initial.name),
            username: changed(&self.username, &initial.username),
            additional_info: changed(&self.additional_info, &initial.additional_info),
            ..Default::default()
        }
    }
}

/// Name, username and free-text info of the current user.
pub struct ProfileForm {
    session: Session,
    toaster: Toaster,
    pub state: FormState<ProfileFields>,
}

impl ProfileForm {
    pub fn new(session: Session, toaster: Toaster, user: &User) -> Self {
        Self {
            session,
            toaster,
            state: FormState::new(ProfileFields::from_user(user)),
        }
    }

    /// Saves the changed fields. Unchanged or invalid forms send nothing.
    pub async fn save(&mut self) -> bool {
        if !self.state.is_dirty() {
            return false;
        }
        if let Err(e) = self.state.values().validate() {
            self.toaster
                .error("Something went wrong.", &e.detail(), LONG_TOAST_MS);
            return false;
        }

        let update = self.state.values().changes_from(self.state.initial());
        match submit_update(&self.session, &self.toaster, &update).await {
            Some(user) => {
                self.state.commit(ProfileFields::from_user(&user));
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state.reset();
    }
}

// ── Parsed résumé ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvFields {
    pub parsed_work_experiences: Option<Value>,
    pub parsed_educations: Option<Value>,
    pub parsed_languages: Option<Value>,
    pub parsed_skills: Option<Vec<String>>,
    pub additional_info: Option<String>,
}

impl CvFields {
    pub fn from_user(user: &User) -> Self {
        Self {
            parsed_work_experiences: user.parsed_work_experiences.clone(),
            parsed_educations: user.parsed_educations.clone(),
            parsed_languages: user.parsed_languages.clone(),
            parsed_skills: user.parsed_skills.clone(),
            additional_info: user.additional_info.clone(),
        }
    }

    pub fn changes_from(&self, initial: &CvFields) -> UserUpdateMe {
        fn changed<T: Clone + PartialEq>(now: &Option<T>, before: &Option<T>) -> Option<T> {
            if now != before {
                now.clone()
            } else {
                None
            }
        }
        UserUpdateMe {
            parsed_work_experiences: changed(
                &self.parsed_work_experiences,
                &initial.parsed_work_experiences,
            ),
            parsed_educations: changed(&self.parsed_educations, &initial.parsed_educations),
            parsed_languages: changed(&self.parsed_languages, &initial.parsed_languages),
            parsed_skills: changed(&self.parsed_skills, &initial.parsed_skills),
            additional_info: changed(&self.additional_info, &initial.additional_info),
            ..Default::default()
        }
    }
}

/// The structured data extracted from the résumé, editable before generation.
pub struct CvForm {
    session: Session,
    toaster: Toaster,
    pub state: FormState<CvFields>,
}

impl CvForm {
    pub fn new(session: Session, toaster: Toaster, user: &User) -> Self {
        Self {
            session,
            toaster,
            state: FormState::new(CvFields::from_user(user)),
        }
    }

    pub async fn save(&mut self) -> bool {
        if !self.state.is_dirty() {
            return false;
        }
        let update = self.state.values().changes_from(self.state.initial());
        if update.is_empty() {
            // cleared fields cannot be unset through PATCH /users/me
            self.state.reset();
            return false;
        }

        match submit_update(&self.session, &self.toaster, &update).await {
            Some(user) => {
                self.state.commit(CvFields::from_user(&user));
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state.reset();
    }
}

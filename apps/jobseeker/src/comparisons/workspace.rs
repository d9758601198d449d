//! Master-detail controller over the user's comparisons.
//!
//! The four generate/build actions run through `&self` so they can be awaited
//! concurrently; each holds its own loading flag for as long as it is in
//! flight. Every successful action re-fetches the selected comparison. Refreshes
//! are applied in completion order (last resolved wins).

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use super::editor::ListEditor;
use super::BuildPolicy;
use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    Comparison, ComparisonDetail, ComparisonLookup, ComparisonQuery, CoverLetterParagraph,
    Message, ModelParameters, WorkExperience,
};
use crate::notify::{Toaster, SHORT_TOAST_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GenerateWorkExperiences,
    GenerateCoverLetter,
    BuildResume,
    BuildCoverLetter,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::GenerateWorkExperiences,
        Action::GenerateCoverLetter,
        Action::BuildResume,
        Action::BuildCoverLetter,
    ];

    fn success_title(self) -> &'static str {
        match self {
            Action::GenerateWorkExperiences => "Resume Generated",
            Action::GenerateCoverLetter => "Cover Letter Generated",
            Action::BuildResume => "Resume Built",
            Action::BuildCoverLetter => "Cover Letter Built",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            Action::GenerateWorkExperiences => "Failed to generate resume",
            Action::GenerateCoverLetter => "Failed to generate cover letter",
            Action::BuildResume => "Failed to build resume",
            Action::BuildCoverLetter => "Failed to build cover letter",
        }
    }

    /// The build that makes this action's output visible as a PDF.
    fn follow_up(self) -> Option<Action> {
        match self {
            Action::GenerateWorkExperiences => Some(Action::BuildResume),
            Action::GenerateCoverLetter => Some(Action::BuildCoverLetter),
            Action::BuildResume | Action::BuildCoverLetter => None,
        }
    }
}

#[derive(Default)]
struct WorkspaceState {
    comparisons: Vec<Comparison>,
    selected: Option<ComparisonDetail>,
    loading: HashSet<Action>,
    work_experiences: ListEditor<WorkExperience>,
    paragraphs: ListEditor<CoverLetterParagraph>,
}

/// Clears an action's loading flag when the action finishes, however it ends,
/// and wakes anything waiting for a flag to come free.
struct LoadingGuard<'a> {
    state: &'a Mutex<WorkspaceState>,
    released: &'a Notify,
    action: Action,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading
            .remove(&self.action);
        self.released.notify_waiters();
    }
}

/// What to do when the action's loading flag is already set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnBusy {
    /// A repeated click: ignore it.
    Reject,
    /// A chained rebuild: it must run after the one in flight.
    Wait,
}

pub struct ComparisonWorkspace {
    api: ApiClient,
    toaster: Toaster,
    policy: BuildPolicy,
    state: Mutex<WorkspaceState>,
    released: Notify,
}

impl ComparisonWorkspace {
    pub fn new(api: ApiClient, toaster: Toaster, policy: BuildPolicy) -> Self {
        Self {
            api,
            toaster,
            policy,
            state: Mutex::new(WorkspaceState::default()),
            released: Notify::new(),
        }
    }

    pub fn policy(&self) -> BuildPolicy {
        self.policy
    }

    // ── Master list ─────────────────────────────────────────────

    /// Fetches the comparison list. On failure the previous list is kept.
    pub async fn load(&self) -> bool {
        match self.api.get_user_comparisons().await {
            Ok(list) => {
                info!("Loaded {} comparisons", list.data.len());
                self.lock().comparisons = list.data;
                true
            }
            Err(e) => {
                error!("Failed to fetch comparisons: {e}");
                self.toaster
                    .error("Error", "Failed to fetch comparisons", SHORT_TOAST_MS);
                false
            }
        }
    }

    pub fn comparisons(&self) -> Vec<Comparison> {
        self.lock().comparisons.clone()
    }

    /// Fetches the full detail of comparison `id` and makes it the selection.
    pub async fn select(&self, id: i64) -> bool {
        match self.api.lookup_comparison(&ComparisonQuery::by_id(id)).await {
            ComparisonLookup::Found(detail) => {
                self.apply_detail(*detail);
                true
            }
            ComparisonLookup::NotFound => {
                {
                    let mut state = self.lock();
                    state.selected = None;
                    state.work_experiences.reset(Vec::new());
                    state.paragraphs.reset(Vec::new());
                }
                self.toaster
                    .error("Error", "Comparison not found", SHORT_TOAST_MS);
                false
            }
            ComparisonLookup::Error(e) => {
                error!("Failed to fetch comparison {id}: {e}");
                self.toaster
                    .error("Error", "Failed to fetch comparison", SHORT_TOAST_MS);
                false
            }
        }
    }

    pub fn selected(&self) -> Option<ComparisonDetail> {
        self.lock().selected.clone()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.lock().selected.as_ref().map(ComparisonDetail::id)
    }

    /// Re-fetches the selected comparison. On failure the current detail stays.
    pub async fn refresh(&self) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        match self.api.get_comparison(&ComparisonQuery::by_id(id)).await {
            Ok(detail) => {
                self.apply_detail(detail);
                true
            }
            Err(e) => {
                error!("Error refreshing comparison data: {e}");
                self.toaster
                    .error("Error", "Failed to refresh comparison data", SHORT_TOAST_MS);
                false
            }
        }
    }

    /// Stores a fetched detail. A refresh of the same comparison keeps open
    /// edits; switching comparisons closes them.
    fn apply_detail(&self, detail: ComparisonDetail) {
        let mut state = self.lock();
        let same = state.selected.as_ref().map(ComparisonDetail::id) == Some(detail.id());
        if same {
            state.work_experiences.sync(detail.work_experiences.clone());
            state.paragraphs.sync(detail.cover_letter_paragraphs.clone());
        } else {
            state.work_experiences.reset(detail.work_experiences.clone());
            state.paragraphs.reset(detail.cover_letter_paragraphs.clone());
        }
        if let Some(entry) = state
            .comparisons
            .iter_mut()
            .find(|c| c.id == detail.comparison.id)
        {
            *entry = detail.comparison.clone();
        }
        state.selected = Some(detail);
    }

    // ── Actions ─────────────────────────────────────────────────

    pub fn is_loading(&self, action: Action) -> bool {
        self.lock().loading.contains(&action)
    }

    pub async fn generate_work_experiences(&self, parameters: &ModelParameters) -> bool {
        self.perform(Action::GenerateWorkExperiences, Some(parameters))
            .await
    }

    pub async fn generate_cover_letter_paragraphs(&self, parameters: &ModelParameters) -> bool {
        self.perform(Action::GenerateCoverLetter, Some(parameters)).await
    }

    pub async fn build_resume(&self) -> bool {
        self.perform(Action::BuildResume, None).await
    }

    pub async fn build_cover_letter(&self) -> bool {
        self.perform(Action::BuildCoverLetter, None).await
    }

    /// Runs `action` against the selected comparison and refreshes on success.
    /// Under [`BuildPolicy::Chained`] a generate action also runs its build first,
    /// after any build of the same kind already in flight.
    pub async fn perform(&self, action: Action, parameters: Option<&ModelParameters>) -> bool {
        if !self.execute(action, parameters, OnBusy::Reject).await {
            return false;
        }
        if self.policy == BuildPolicy::Chained {
            if let Some(next) = action.follow_up() {
                self.execute(next, None, OnBusy::Wait).await;
            }
        }
        self.refresh().await;
        true
    }

    /// One backend call with its loading flag and toast. No refresh.
    async fn execute(
        &self,
        action: Action,
        parameters: Option<&ModelParameters>,
        on_busy: OnBusy,
    ) -> bool {
        let Some(comparison_id) = self.selected_id() else {
            self.toaster
                .error("Error", "No comparison selected", SHORT_TOAST_MS);
            return false;
        };
        let _guard = match (self.begin(action), on_busy) {
            (Some(guard), _) => guard,
            (None, OnBusy::Wait) => self.wait_and_begin(action).await,
            (None, OnBusy::Reject) => {
                warn!("{action:?} is already running for comparison {comparison_id}");
                return false;
            }
        };

        match self.call(action, comparison_id, parameters).await {
            Ok(response) => {
                self.toaster
                    .success(action.success_title(), &response.message, SHORT_TOAST_MS);
                true
            }
            Err(e) => {
                error!("{action:?} failed for comparison {comparison_id}: {e}");
                self.toaster.error("Error", action.failure(), SHORT_TOAST_MS);
                false
            }
        }
    }

    async fn call(
        &self,
        action: Action,
        comparison_id: i64,
        parameters: Option<&ModelParameters>,
    ) -> Result<Message, ApiError> {
        let model = || parameters.ok_or_else(|| ApiError::Invalid("No model selected".into()));
        match action {
            Action::GenerateWorkExperiences => {
                self.api
                    .generate_work_experiences(comparison_id, model()?)
                    .await
            }
            Action::GenerateCoverLetter => {
                self.api
                    .generate_cover_letter_paragraphs(comparison_id, model()?)
                    .await
            }
            Action::BuildResume => self.api.build_resume(comparison_id).await,
            Action::BuildCoverLetter => self.api.build_cover_letter(comparison_id).await,
        }
    }

    fn begin(&self, action: Action) -> Option<LoadingGuard<'_>> {
        if !self.lock().loading.insert(action) {
            return None;
        }
        Some(LoadingGuard {
            state: &self.state,
            released: &self.released,
            action,
        })
    }

    /// Waits until no `action` is in flight, then claims its flag.
    async fn wait_and_begin(&self, action: Action) -> LoadingGuard<'_> {
        debug!("{action:?} queued behind the one in flight");
        loop {
            // registered before the check so a release in between is not missed
            let released = self.released.notified();
            if let Some(guard) = self.begin(action) {
                return guard;
            }
            released.await;
        }
    }

    // ── Editors ─────────────────────────────────────────────────

    pub fn edit_work_experiences<R>(
        &self,
        f: impl FnOnce(&mut ListEditor<WorkExperience>) -> R,
    ) -> R {
        f(&mut self.lock().work_experiences)
    }

    pub fn edit_paragraphs<R>(
        &self,
        f: impl FnOnce(&mut ListEditor<CoverLetterParagraph>) -> R,
    ) -> R {
        f(&mut self.lock().paragraphs)
    }

    /// Sends the open work-experience draft, then refreshes the comparison.
    /// An unchanged draft just closes the editor.
    pub async fn save_work_experience(&self) -> bool {
        let draft = self.edit_work_experiences(|editor| {
            let dirty = editor.is_dirty();
            editor.edited().map(|(_, draft)| (draft.clone(), dirty))
        });
        let Some((draft, dirty)) = draft else {
            return false;
        };
        if !dirty {
            self.edit_work_experiences(ListEditor::cancel);
            return true;
        }
        if let Err(e) = draft.validate() {
            self.toaster.error("Error", &e.detail(), SHORT_TOAST_MS);
            return false;
        }

        match self.api.edit_work_experience(&draft).await {
            Ok(response) => {
                self.edit_work_experiences(ListEditor::finish_save);
                self.toaster
                    .success("Work Experience Saved", &response.message, SHORT_TOAST_MS);
                self.after_edit(Action::BuildResume).await;
                true
            }
            Err(e) => {
                error!("Failed to save work experience {}: {e}", draft.id);
                self.toaster.error("Error", &e.detail(), SHORT_TOAST_MS);
                false
            }
        }
    }

    /// Sends the open cover-letter paragraph draft, then refreshes the comparison.
    pub async fn save_cover_letter_paragraph(&self) -> bool {
        let draft = self.edit_paragraphs(|editor| {
            let dirty = editor.is_dirty();
            editor.edited().map(|(_, draft)| (draft.clone(), dirty))
        });
        let Some((draft, dirty)) = draft else {
            return false;
        };
        if !dirty {
            self.edit_paragraphs(ListEditor::cancel);
            return true;
        }

        match self.api.edit_cover_letter_paragraph(&draft).await {
            Ok(response) => {
                self.edit_paragraphs(ListEditor::finish_save);
                self.toaster
                    .success("Paragraph Saved", &response.message, SHORT_TOAST_MS);
                self.after_edit(Action::BuildCoverLetter).await;
                true
            }
            Err(e) => {
                error!("Failed to save cover letter paragraph {}: {e}", draft.id);
                self.toaster.error("Error", &e.detail(), SHORT_TOAST_MS);
                false
            }
        }
    }

    async fn after_edit(&self, rebuild: Action) {
        if self.policy == BuildPolicy::Chained {
            self.execute(rebuild, None, OnBusy::Wait).await;
        }
        self.refresh().await;
    }

    fn lock(&self) -> MutexGuard<'_, WorkspaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

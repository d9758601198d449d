use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use tracing::{error, info};

use super::settle;
use crate::display::pdf::is_pdf;
use crate::errors::ApiError;
use crate::models::ModelParameters;
use crate::notify::{Toaster, LONG_TOAST_MS};
use crate::session::Session;

/// A résumé picked for upload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        Ok(Self::new(name, bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Uploading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Idle,
    Parsing,
}

struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Upload and parse of the user's résumé.
///
/// Nothing stops a second upload while one is in flight; whichever response
/// settles last determines what the refreshed profile shows.
pub struct ResumeFlow {
    session: Session,
    toaster: Toaster,
    uploads: AtomicUsize,
    parses: AtomicUsize,
}

impl ResumeFlow {
    pub fn new(session: Session, toaster: Toaster) -> Self {
        Self {
            session,
            toaster,
            uploads: AtomicUsize::new(0),
            parses: AtomicUsize::new(0),
        }
    }

    pub fn upload_state(&self) -> UploadState {
        if self.uploads.load(Ordering::SeqCst) > 0 {
            UploadState::Uploading
        } else {
            UploadState::Idle
        }
    }

    pub fn parse_state(&self) -> ParseState {
        if self.parses.load(Ordering::SeqCst) > 0 {
            ParseState::Parsing
        } else {
            ParseState::Idle
        }
    }

    /// Uploads `file` as the user's résumé. Non-PDF input is rejected without a request.
    pub async fn upload(&self, file: &SelectedFile) -> bool {
        if !is_pdf(&file.bytes) {
            error!("{} is not a PDF", file.name);
            self.toaster
                .error("Error!", "Failed to upload PDF.", LONG_TOAST_MS);
            return false;
        }

        let result = {
            let _in_flight = InFlight::start(&self.uploads);
            self.session
                .api
                .upload_resume(&file.name, file.bytes.clone())
                .await
        };

        let ok = match result {
            Ok(_) => {
                info!("Uploaded résumé {} ({} bytes)", file.name, file.bytes.len());
                self.toaster
                    .success("Success!", "PDF uploaded successfully.", LONG_TOAST_MS);
                true
            }
            Err(e) => {
                error!("Résumé upload failed: {e}");
                self.toaster
                    .error("Error!", "Failed to upload PDF.", LONG_TOAST_MS);
                false
            }
        };
        settle(&self.session).await;
        ok
    }

    /// Asks the backend to parse the uploaded résumé with the chosen model.
    /// The profile is reloaded whatever the outcome.
    pub async fn parse(&self, parameters: Option<&ModelParameters>) -> bool {
        let Some(parameters) = parameters else {
            self.toaster
                .error("Error!", "Select a model first.", LONG_TOAST_MS);
            return false;
        };

        let result = {
            let _in_flight = InFlight::start(&self.parses);
            self.session.api.parse_resume(parameters).await
        };

        let ok = match result {
            Ok(_) => {
                info!(model = %parameters.name, "Résumé parsed");
                self.toaster
                    .success("Success!", "Resume parsed successfully.", LONG_TOAST_MS);
                true
            }
            Err(e) => {
                error!("Résumé parse failed: {e}");
                self.toaster
                    .error("Error!", "Failed to parse resume.", LONG_TOAST_MS);
                false
            }
        };
        settle(&self.session).await;
        ok
    }
}

//! # Detail Forms
//!
//! [`DetailForm`] wraps a [`FormDraft`] with an atomic save: one primary
//! update carrying the whole draft, optionally followed by a queued
//! [`SecondaryUpload`] (an avatar change, for instance).
//!
//! The upload is committed only after the primary update succeeded. A failed
//! upload does not roll the primary back; it is reported in
//! [`SaveReport::upload`] so the caller can tell the user.

use crate::error::{EndpointError, ViewError};
use crate::form::{FormDraft, FormValues};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, info, warn};

/// Identifier of the record a primary update wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub id: String,
}

impl SaveReceipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The primary update of a detail form.
#[async_trait]
pub trait Submit<T>: Send + Sync {
    async fn submit(&self, values: &T) -> Result<SaveReceipt, EndpointError>;
}

/// Work queued by the user that can only run once the record exists.
#[async_trait]
pub trait SecondaryUpload: Debug + Send + Sync {
    fn label(&self) -> &'static str;

    async fn commit(&self, receipt: &SaveReceipt) -> Result<(), EndpointError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    NotQueued,
    Committed(&'static str),
    Failed { label: &'static str, error: ViewError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub receipt: SaveReceipt,
    pub upload: UploadStatus,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        !matches!(self.upload, UploadStatus::Failed { .. })
    }
}

pub type Validator<T> = fn(&T) -> Result<(), String>;

pub struct DetailForm<T: FormValues> {
    draft: FormDraft<T>,
    upload: Option<Box<dyn SecondaryUpload>>,
    validator: Option<Validator<T>>,
}

impl<T: FormValues> DetailForm<T> {
    pub fn new(draft: FormDraft<T>) -> Self {
        Self {
            draft,
            upload: None,
            validator: None,
        }
    }

    pub fn with_validator(mut self, validator: Validator<T>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn draft(&self) -> &FormDraft<T> {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft<T> {
        &mut self.draft
    }

    /// Queues `upload`, replacing any earlier one.
    pub fn queue_upload(&mut self, upload: Box<dyn SecondaryUpload>) {
        debug!(label = upload.label(), "Upload queued");
        self.upload = Some(upload);
    }

    pub fn has_queued_upload(&self) -> bool {
        self.upload.is_some()
    }

    pub fn has_changes(&self) -> bool {
        self.draft.has_unsaved_changes() || self.upload.is_some()
    }

    pub fn validation_error(&self) -> Option<String> {
        self.validator
            .and_then(|validate| validate(self.draft.values()).err())
    }

    /// Save is enabled only with something to save and a valid draft.
    pub fn can_save(&self) -> bool {
        self.has_changes() && self.validation_error().is_none()
    }

    /// Reset is enabled whenever there is something to discard.
    pub fn can_reset(&self) -> bool {
        self.has_changes()
    }

    /// Restores the snapshot and drops the queued upload.
    pub fn reset(&mut self) {
        self.draft.reset();
        self.upload = None;
    }

    /// Submits the full draft, then commits the queued upload.
    ///
    /// On primary failure nothing is committed and both the draft and the
    /// queued upload are kept for a retry.
    pub async fn save(&mut self, primary: &dyn Submit<T>) -> Result<SaveReport, ViewError> {
        if !self.has_changes() {
            return Err(ViewError::Validation("nothing to save".into()));
        }
        if let Some(reason) = self.validation_error() {
            return Err(ViewError::Validation(reason));
        }

        let submitted = self.draft.values().clone();
        let receipt = match primary.submit(&submitted).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "Primary update failed");
                return Err(ViewError::RemoteAction(e));
            }
        };
        info!(id = %receipt.id, "Primary update saved");
        self.draft.commit_submitted(submitted);

        let upload = match self.upload.take() {
            None => UploadStatus::NotQueued,
            Some(upload) => match upload.commit(&receipt).await {
                Ok(()) => {
                    info!(id = %receipt.id, label = upload.label(), "Upload committed");
                    UploadStatus::Committed(upload.label())
                }
                Err(e) => {
                    warn!(id = %receipt.id, label = upload.label(), error = %e, "Upload failed");
                    UploadStatus::Failed {
                        label: upload.label(),
                        error: ViewError::RemoteAction(e),
                    }
                }
            },
        };

        Ok(SaveReport { receipt, upload })
    }
}

impl<T: FormValues> std::fmt::Debug for DetailForm<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailForm")
            .field("draft", &self.draft)
            .field("upload", &self.upload)
            .finish()
    }
}

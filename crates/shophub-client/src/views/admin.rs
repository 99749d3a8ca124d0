//! Admin product upload page.

use std::sync::Arc;

use shophub_commerce::ProductId;

use crate::api::{AdminItem, AdminService, ProductDraft, UploadFile};
use crate::error::ApiError;
use crate::logging::{LogLevel, ViewLogger};
use crate::notify::Prompt;

const DELETE_QUESTION: &str = "Are you sure you want to delete this item?";

/// Result of [`AdminView::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
    /// Validation failed; nothing was sent.
    Invalid(String),
    /// The backend call failed; the form is kept.
    Failed,
}

/// Result of [`AdminView::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

pub struct AdminView {
    service: Arc<dyn AdminService>,
    prompt: Arc<dyn Prompt>,
    logger: ViewLogger,
    items: Vec<AdminItem>,
    form: ProductDraft,
    editing_id: Option<ProductId>,
}

impl AdminView {
    pub fn new(service: Arc<dyn AdminService>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            service,
            prompt,
            logger: ViewLogger::new("admin").with_route("/productUpload"),
            items: Vec::new(),
            form: ProductDraft::default(),
            editing_id: None,
        }
    }

    pub fn with_logger(mut self, logger: ViewLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Fetch every item. On failure the previous list stays.
    pub async fn load(&mut self) -> bool {
        match self.service.list_items().await {
            Ok(items) => {
                self.items = items;
                true
            }
            Err(e) => {
                self.log_failure("failed to load items", &e);
                self.prompt.alert("Failed to load items.");
                false
            }
        }
    }

    /// Start editing `item`: copy its fields into the form.
    pub fn edit(&mut self, item: &AdminItem) {
        self.form = ProductDraft::from_item(item);
        self.editing_id = Some(item.id.clone());
    }

    pub fn cancel_edit(&mut self) {
        self.form = ProductDraft::default();
        self.editing_id = None;
    }

    pub fn add_file(&mut self, file: UploadFile) {
        self.form.files.push(file);
    }

    /// Create or update from the form contents.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(e) = self.form.validate() {
            let message = match e {
                ApiError::Validation(message) => message,
                other => other.to_string(),
            };
            self.prompt.alert(&message);
            return SubmitOutcome::Invalid(message);
        }

        let result = match &self.editing_id {
            Some(id) => self.service.update_item(id, &self.form).await,
            None => self.service.create_item(&self.form).await,
        };

        match result {
            Ok(()) => {
                let outcome = if self.editing_id.is_some() {
                    self.prompt.alert("Item updated!");
                    SubmitOutcome::Updated
                } else {
                    self.prompt.alert("Item saved!");
                    SubmitOutcome::Created
                };
                self.logger
                    .event(LogLevel::Info, "item saved")
                    .field("title", self.form.title.clone())
                    .field("files", self.form.files.len())
                    .field("update", outcome == SubmitOutcome::Updated)
                    .emit();
                self.cancel_edit();
                self.load().await;
                outcome
            }
            Err(e) => {
                self.log_failure("error saving item", &e);
                self.prompt.alert("Error saving item.");
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete after confirmation.
    pub async fn delete(&mut self, id: &ProductId) -> DeleteOutcome {
        if !self.prompt.confirm(DELETE_QUESTION) {
            return DeleteOutcome::Cancelled;
        }
        match self.service.delete_item(id).await {
            Ok(()) => {
                self.prompt.alert("Item deleted");
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.log_failure("error deleting item", &e);
                self.prompt.alert("Error deleting item.");
                DeleteOutcome::Failed
            }
        }
    }

    fn log_failure(&self, message: &str, error: &ApiError) {
        let mut entry = self
            .logger
            .event(LogLevel::Error, message)
            .field("cause", error.to_string());
        if let Some(status) = error.status() {
            entry = entry.field("status", status);
        }
        entry.emit();
    }

    pub fn items(&self) -> &[AdminItem] {
        &self.items
    }

    pub fn form(&self) -> &ProductDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductDraft {
        &mut self.form
    }

    pub fn editing_id(&self) -> Option<&ProductId> {
        self.editing_id.as_ref()
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Update Item"
        } else {
            "Save Item"
        }
    }
}

//! Write-path operations: build a command, hand it to the dispatcher.

use bear_actions::{ActionCommand, Verb, flatten_tags};
use tracing::debug;

use crate::error::Result;
use crate::types::{
    ActionReceipt, AppendToNote, CreateNote, DEFAULT_APPEND_SEPARATOR, DeleteTag, NoteAction,
    OperationResult, UpdateNote,
};
use crate::validation::require_non_empty;

use super::BearService;

impl BearService {
    pub async fn create_note(&self, request: CreateNote) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Title", &request.title)?;
        let command = ActionCommand::new(Verb::Create)
            .text("title", &request.title)
            .text("text", request.content)
            .opt_text("tags", flatten_tags(request.tags.as_slice()))
            .flag("open_note", false)
            .flag("show_window", false);

        Ok(self
            .send(
                command,
                format!("Note \"{}\" created successfully", request.title),
                "Failed to create note",
            )
            .await)
    }

    /// Replace the whole content of a note.
    pub async fn update_note(&self, request: UpdateNote) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Identifier", &request.identifier)?;
        let title = request
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(request.identifier);
        let command = ActionCommand::new(Verb::AddText)
            .text("title", &title)
            .text("text", request.content)
            .text("mode", "replace_all")
            .opt_text("tags", flatten_tags(request.tags.as_slice()))
            .flag("open_note", false)
            .flag("show_window", false);

        Ok(self
            .send(
                command,
                format!("Note \"{title}\" updated successfully"),
                "Failed to update note",
            )
            .await)
    }

    /// Append `separator + content` to the end of a note.
    pub async fn append_to_note(
        &self,
        request: AppendToNote,
    ) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Identifier", &request.identifier)?;
        require_non_empty("Content", &request.content)?;
        let separator = request
            .separator
            .as_deref()
            .unwrap_or(DEFAULT_APPEND_SEPARATOR);
        let command = ActionCommand::new(Verb::AddText)
            .text("title", &request.identifier)
            .text("text", format!("{separator}{}", request.content))
            .text("mode", "append")
            .flag("open_note", false)
            .flag("show_window", false);

        Ok(self
            .send(
                command,
                format!("Content appended to note \"{}\"", request.identifier),
                "Failed to append",
            )
            .await)
    }

    /// Bring a note up in the Bear window.
    pub async fn open_note(&self, identifier: &str) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Identifier", identifier)?;
        let command = ActionCommand::new(Verb::OpenNote).text("title", identifier);

        Ok(self
            .send(
                command,
                format!("Opened note \"{identifier}\" in Bear"),
                "Failed to open note",
            )
            .await)
    }

    pub async fn trash_note(&self, request: NoteAction) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Identifier", &request.identifier)?;
        let command = ActionCommand::new(Verb::Trash)
            .text("search", &request.identifier)
            .flag("show_window", request.show_window);

        Ok(self
            .send(
                command,
                format!("Note \"{}\" moved to trash", request.identifier),
                "Failed to trash note",
            )
            .await)
    }

    pub async fn archive_note(
        &self,
        request: NoteAction,
    ) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Identifier", &request.identifier)?;
        let command = ActionCommand::new(Verb::Archive)
            .text("search", &request.identifier)
            .flag("show_window", request.show_window);

        Ok(self
            .send(
                command,
                format!("Note \"{}\" archived", request.identifier),
                "Failed to archive note",
            )
            .await)
    }

    /// Delete a tag from every note carrying it.
    pub async fn delete_tag(&self, request: DeleteTag) -> Result<OperationResult<ActionReceipt>> {
        require_non_empty("Tag name", &request.name)?;
        let command = ActionCommand::new(Verb::DeleteTag)
            .text("name", &request.name)
            .flag("show_window", request.show_window);

        Ok(self
            .send(
                command,
                format!("Tag \"{}\" deleted", request.name),
                "Failed to delete tag",
            )
            .await)
    }

    async fn send(
        &self,
        command: ActionCommand,
        message: String,
        failure: &str,
    ) -> OperationResult<ActionReceipt> {
        let verb = command.verb();
        let reference = self.builder.build(&command);
        debug!(%verb, "dispatching command");

        let outcome = self.dispatcher.dispatch(&reference).await;
        if outcome.success {
            OperationResult::ok(ActionReceipt {
                verb: verb.to_string(),
                message,
            })
        } else {
            let error = outcome.error.unwrap_or_else(|| "unknown error".to_string());
            OperationResult::failed(format!("{failure}: {error}"))
        }
    }
}

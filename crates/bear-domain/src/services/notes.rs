//! Read-path operations.

use bear_store::{Note, Tag};

use crate::error::Result;
use crate::types::OperationResult;
use crate::validation::{require_non_empty, validate_days, validate_limit};

use super::BearService;

impl BearService {
    /// Search live notes by title or body, newest first.
    pub async fn search_notes(&self, query: &str, limit: usize) -> Result<OperationResult<Vec<Note>>> {
        require_non_empty("Search query", query)?;
        validate_limit(limit)?;
        Ok(OperationResult::ok(self.db.search_notes(query, limit).await?))
    }

    /// Get one note by title or identifier; `data` is `None` when nothing matches.
    pub async fn get_note(&self, identifier: &str) -> Result<OperationResult<Option<Note>>> {
        require_non_empty("Identifier", identifier)?;
        Ok(OperationResult::ok(self.db.get_note(identifier).await?))
    }

    /// Notes carrying `tag` (title, without `#`), newest first.
    pub async fn get_notes_by_tag(
        &self,
        tag: &str,
        limit: usize,
    ) -> Result<OperationResult<Vec<Note>>> {
        require_non_empty("Tag name", tag)?;
        validate_limit(limit)?;
        Ok(OperationResult::ok(self.db.get_notes_by_tag(tag, limit).await?))
    }

    /// Notes modified in the last `days` days, newest first.
    pub async fn get_recent_notes(
        &self,
        days: u32,
        limit: usize,
    ) -> Result<OperationResult<Vec<Note>>> {
        validate_days(days)?;
        validate_limit(limit)?;
        Ok(OperationResult::ok(
            self.db.get_recent_notes(days, limit).await?,
        ))
    }

    /// All titled tags, alphabetical.
    pub async fn list_tags(&self) -> Result<OperationResult<Vec<Tag>>> {
        Ok(OperationResult::ok(self.db.list_tags().await?))
    }

    /// Notes linking to the note named by `identifier` (title or identifier).
    pub async fn get_backlinks(&self, identifier: &str) -> Result<OperationResult<Vec<Note>>> {
        require_non_empty("Identifier", identifier)?;
        Ok(OperationResult::ok(self.db.get_backlinks(identifier).await?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bear_actions::{ActionDispatcher, CommandBuilder, MockLiveness, MockOpener};
    use bear_store::BearDatabase;
    use bear_store::fixtures::FixtureNote;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::DomainError;
    use crate::services::test_support::harness;

    #[tokio::test]
    async fn test_search_returns_newest_within_limit() {
        let h = harness();
        for i in 0..7 {
            h.fixture.insert_note(
                FixtureNote::new(format!("N{i}"))
                    .title(format!("Weekly meeting {i}"))
                    .modified(Utc::now() - Duration::hours(10 - i)),
            );
        }
        h.fixture.insert_note(FixtureNote::new("OFF").title("Unrelated"));

        let result = h.service.search_notes("meeting", 5).await.unwrap();
        assert!(result.success);
        let notes = result.data.unwrap();
        assert_eq!(notes.len(), 5);
        let ids: Vec<_> = notes.iter().map(|n| n.identifier.as_str()).collect();
        assert_eq!(ids, ["N6", "N5", "N4", "N3", "N2"]);
    }

    #[tokio::test]
    async fn test_recent_excludes_old_notes() {
        let h = harness();
        h.fixture
            .insert_note(FixtureNote::new("OLD").modified(Utc::now() - Duration::days(3)));
        h.fixture
            .insert_note(FixtureNote::new("NEW").modified(Utc::now() - Duration::hours(2)));

        let notes = h.service.get_recent_notes(1, 50).await.unwrap().data.unwrap();
        let ids: Vec<_> = notes.iter().map(|n| n.identifier.as_str()).collect();
        assert_eq!(ids, ["NEW"]);
    }

    #[tokio::test]
    async fn test_get_note_not_found_is_success() {
        let h = harness();
        let result = h.service.get_note("missing").await.unwrap();
        assert!(result.success);
        assert_eq!(result.data, Some(None));
    }

    #[tokio::test]
    async fn test_backlinks_for_unresolved_target_are_empty() {
        let h = harness();
        let result = h.service.get_backlinks("ghost").await.unwrap();
        assert!(result.success);
        assert!(result.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tag_listing_and_lookup() {
        let h = harness();
        let tag = h.fixture.insert_tag("projects", "TAG-1");
        let note = h.fixture.insert_note(FixtureNote::new("P1").title("Roadmap"));
        h.fixture.tag_note(note, tag);

        let tags = h.service.list_tags().await.unwrap().data.unwrap();
        assert_eq!(tags[0].title, "projects");

        let notes = h
            .service
            .get_notes_by_tag("projects", 50)
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(notes[0].title, "Roadmap");
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_query() {
        let h = harness();
        assert!(matches!(
            h.service.search_notes("", 10).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            h.service.search_notes("x", 0).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            h.service.get_note("   ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            h.service.get_recent_notes(400, 10).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            h.service.get_notes_by_tag("t", 101).await,
            Err(DomainError::Validation(_))
        ));
        assert!(!h.service.database().is_open());
    }

    #[tokio::test]
    async fn test_missing_store_propagates_connectivity_error() {
        let service = BearService::new(
            BearDatabase::new("/nonexistent/bear/database.sqlite"),
            CommandBuilder::default(),
            ActionDispatcher::new(Arc::new(MockOpener::new())),
            Arc::new(MockLiveness::default()),
        );

        let err = service.search_notes("x", 10).await.unwrap_err();
        assert!(err.is_connectivity());
        assert!(err.to_string().contains("Is Bear installed?"));
    }
}

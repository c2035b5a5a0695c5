//! The Bear access facade.
//!
//! [`BearService`] owns both paths: reads go to the [`BearDatabase`], writes
//! become x-callback-url commands handed to the [`ActionDispatcher`]. The two
//! paths share nothing but the [`OperationResult`](crate::OperationResult)
//! shape returned to callers.

mod actions;
mod notes;

use std::sync::Arc;

use bear_actions::{ActionDispatcher, AppLiveness, CommandBuilder, PgrepLiveness, SystemOpener};
use bear_config::BearConfig;
use bear_store::{BearDatabase, StoreStatus};
use tracing::info;

/// Facade over the read and write paths.
#[derive(Clone)]
pub struct BearService {
    db: BearDatabase,
    builder: CommandBuilder,
    dispatcher: ActionDispatcher,
    liveness: Arc<dyn AppLiveness>,
}

impl std::fmt::Debug for BearService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearService")
            .field("db", &self.db)
            .field("builder", &self.builder)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl BearService {
    /// Assemble the facade from its parts.
    pub fn new(
        db: BearDatabase,
        builder: CommandBuilder,
        dispatcher: ActionDispatcher,
        liveness: Arc<dyn AppLiveness>,
    ) -> Self {
        Self {
            db,
            builder,
            dispatcher,
            liveness,
        }
    }

    /// Build the production facade from configuration.
    pub fn from_config(config: &BearConfig) -> Self {
        let opener = config
            .opener
            .as_deref()
            .map(SystemOpener::new)
            .unwrap_or_default();
        info!(
            database = %config.database_path.display(),
            opener = opener.program(),
            token = config.api_token.is_some(),
            "Initializing Bear service"
        );

        Self::new(
            BearDatabase::new(&config.database_path),
            CommandBuilder::new(config.api_token.clone()),
            ActionDispatcher::new(Arc::new(opener)),
            Arc::new(PgrepLiveness::new(&config.app_process_name)),
        )
    }

    /// The underlying store handle.
    pub fn database(&self) -> &BearDatabase {
        &self.db
    }

    /// Check that the store file exists.
    pub fn verify_store(&self) -> StoreStatus {
        self.db.verify()
    }

    /// Whether the Bear application is running. Writes do not consult this.
    pub async fn is_app_running(&self) -> bool {
        self.liveness.is_running().await
    }

    /// Release the store connection; the next read re-opens it.
    pub fn close(&self) {
        self.db.close();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use bear_actions::{ActionDispatcher, CommandBuilder, MockLiveness, MockOpener};
    use bear_store::BearDatabase;
    use bear_store::fixtures::FixtureStore;

    use super::BearService;

    /// A service over a fixture store with a recording opener.
    pub(crate) struct Harness {
        pub(crate) fixture: FixtureStore,
        pub(crate) opener: Arc<MockOpener>,
        pub(crate) service: BearService,
    }

    pub(crate) fn harness_with(opener: MockOpener, token: Option<&str>) -> Harness {
        let fixture = FixtureStore::new();
        let opener = Arc::new(opener);
        let service = BearService::new(
            BearDatabase::new(fixture.path()),
            CommandBuilder::new(token.map(str::to_string)),
            ActionDispatcher::new(opener.clone()),
            Arc::new(MockLiveness::new(false)),
        );
        Harness {
            fixture,
            opener,
            service,
        }
    }

    pub(crate) fn harness() -> Harness {
        harness_with(MockOpener::new(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::harness;
    use super::*;

    #[test]
    fn test_from_config_uses_configured_path() {
        let mut config = BearConfig::with_home("/nowhere");
        config.database_path = "/tmp/does-not-exist/database.sqlite".into();
        let service = BearService::from_config(&config);

        let status = service.verify_store();
        assert!(!status.exists);
        assert!(
            status
                .error
                .unwrap()
                .contains("/tmp/does-not-exist/database.sqlite")
        );
    }

    #[tokio::test]
    async fn test_liveness_does_not_gate_writes() {
        let h = harness();
        assert!(!h.service.is_app_running().await);

        let result = h.service.open_note("Anything").await.unwrap();
        assert!(result.success);
        assert_eq!(h.opener.opened().len(), 1);
    }

    #[tokio::test]
    async fn test_close_then_read_reopens() {
        let h = harness();
        h.service.list_tags().await.unwrap();
        assert!(h.service.database().is_open());
        h.service.close();
        assert!(!h.service.database().is_open());
        h.service.list_tags().await.unwrap();
        assert!(h.service.database().is_open());
    }
}

//! Use Case Factory
//!
//! Wires storage and use cases to their infrastructure.
//! This is the dependency injection point for the application.

use crate::application::{PublishUseCase, SharedPageStorage};
use crate::config::Config;
use crate::domain::ports::GithubApi;
use crate::error::FolioResult;
use crate::infrastructure::{HttpGithubClient, JsonFileStore, LocalFs};

/// Page storage backed by the on-disk store
pub type FileStorage = SharedPageStorage<JsonFileStore>;

/// Open the configured store.
///
/// A connection saved in the store takes precedence. Otherwise a connection
/// from config and environment is used for this session without being saved.
pub fn open_storage(config: &Config) -> FolioResult<FileStorage> {
    let store = JsonFileStore::new(config.store_dir());
    let mut storage = SharedPageStorage::open(store)?.with_sync_filter(config.sync_filter());

    if storage.github_config().is_none() {
        if let Some(connection) = config.github_connection() {
            storage.use_github_config(connection);
        }
    }
    Ok(storage)
}

pub fn create_github_client() -> FolioResult<HttpGithubClient> {
    Ok(HttpGithubClient::new()?)
}

pub fn create_publish_use_case<'a>(api: &'a dyn GithubApi, config: &Config) -> PublishUseCase<'a> {
    PublishUseCase::new(api, config.site_meta())
}

pub fn create_file_system() -> LocalFs {
    LocalFs::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::NewPage;
    use crate::domain::entities::GithubConfig;
    use crate::domain::ports::KeyValueStore;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.storage.dir = Some(dir.to_path_buf());
        config
    }

    #[test]
    fn open_storage_reads_pages_written_earlier() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let mut first = open_storage(&config).unwrap();
        first.create_page(NewPage::titled("About")).unwrap();

        let second = open_storage(&config).unwrap();
        assert_eq!(second.pages().len(), 1);
        assert_eq!(second.pages()[0].path, "about.html");
    }

    #[test]
    fn open_storage_uses_config_connection_when_store_has_none() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.github.repo = Some("jane/site".to_string());
        config.github.token = Some("t0k".to_string());

        let storage = open_storage(&config).unwrap();
        assert_eq!(storage.github_config().unwrap().repo, "jane/site");
        // session only
        assert!(storage.store().keys().unwrap().is_empty());
    }

    #[test]
    fn saved_connection_wins_over_config() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());

        let mut storage = open_storage(&config).unwrap();
        storage
            .save_github_config(GithubConfig::new("saved/repo", "a"))
            .unwrap();

        config.github.repo = Some("env/repo".to_string());
        config.github.token = Some("b".to_string());
        let storage = open_storage(&config).unwrap();
        assert_eq!(storage.github_config().unwrap().repo, "saved/repo");
    }
}

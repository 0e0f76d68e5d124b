//! 启动时 GitHub 设置检查

mod common;

use common::{configured_settings, response, FakeIdentityApi, MemorySettingsStore};
use leetsync::clients::RepoSummary;
use leetsync::error::SyncError;
use leetsync::models::StoredSettings;
use leetsync::services::{check_settings, import_settings, SettingsStatus};
use serde_json::json;

fn identity(status: u16) -> FakeIdentityApi {
    FakeIdentityApi {
        user: Ok(response(status, json!({ "login": "octo", "message": "Bad credentials" }))),
        repos: serde_json::from_value::<Vec<RepoSummary>>(json!([
            { "name": "leetcode", "owner": { "login": "octo" } },
            { "name": "dotfiles", "owner": { "login": "octo" } }
        ]))
        .unwrap(),
    }
}

#[tokio::test]
async fn test_no_token_is_not_configured() {
    let store = MemorySettingsStore::default();
    let status = check_settings(&identity(200), &store).await.unwrap();
    assert_eq!(status, SettingsStatus::NotConfigured);
}

#[tokio::test]
async fn test_ready_when_token_and_repo_present() {
    let store = MemorySettingsStore::configured();
    let status = check_settings(&identity(200), &store).await.unwrap();
    assert_eq!(
        status,
        SettingsStatus::Ready {
            login: "octo".into(),
            owner: "octo".into(),
            repo: "leetcode".into(),
        }
    );
}

#[tokio::test]
async fn test_invalid_token_clears_store() {
    let store = MemorySettingsStore::configured();
    let status = check_settings(&identity(401), &store).await.unwrap();

    assert_eq!(status, SettingsStatus::InvalidToken);
    assert_eq!(store.current(), StoredSettings::default());
}

#[tokio::test]
async fn test_repo_not_selected_lists_repositories() {
    let store = MemorySettingsStore::new(StoredSettings {
        repo_name: None,
        ..configured_settings()
    });
    let status = check_settings(&identity(200), &store).await.unwrap();

    assert_eq!(
        status,
        SettingsStatus::RepoNotSelected {
            repos: vec!["octo/leetcode".into(), "octo/dotfiles".into()]
        }
    );
}

#[tokio::test]
async fn test_network_failure_is_error_and_keeps_settings() {
    let store = MemorySettingsStore::configured();
    let api = FakeIdentityApi {
        user: Err(SyncError::Transport("dns error".into())),
        repos: Vec::new(),
    };

    assert!(check_settings(&api, &store).await.is_err());
    assert_eq!(store.current(), configured_settings());
}

#[tokio::test]
async fn test_import_merges_token_and_repo() {
    let store = MemorySettingsStore::default();

    let changed = import_settings(&store, Some(" ghp_env "), Some("octo/leetcode"))
        .await
        .unwrap();

    assert!(changed);
    assert_eq!(store.current(), StoredSettings {
        github_token: Some("ghp_env".into()),
        repo_owner: Some("octo".into()),
        repo_name: Some("leetcode".into()),
    });
    let status = check_settings(&identity(200), &store).await.unwrap();
    assert!(matches!(status, SettingsStatus::Ready { .. }));
}

#[tokio::test]
async fn test_import_keeps_missing_keys() {
    let store = MemorySettingsStore::configured();

    assert!(import_settings(&store, Some("ghp_new"), None).await.unwrap());

    let settings = store.current();
    assert_eq!(settings.token(), Some("ghp_new"));
    assert_eq!(settings.repo_owner.as_deref(), Some("octo"));
    assert_eq!(settings.repo_name.as_deref(), Some("leetcode"));
}

#[tokio::test]
async fn test_import_without_values_or_changes_is_noop() {
    let store = MemorySettingsStore::configured();

    assert!(!import_settings(&store, None, Some("  ")).await.unwrap());
    assert!(!import_settings(&store, Some("ghp_test"), Some("octo/leetcode")).await.unwrap());
    assert_eq!(store.current(), configured_settings());
}

#[tokio::test]
async fn test_import_rejects_malformed_repo() {
    let store = MemorySettingsStore::default();

    for repo in ["leetcode", "octo/", "/leetcode", "a/b/c"] {
        assert!(import_settings(&store, Some("ghp_x"), Some(repo)).await.is_err(), "{}", repo);
    }
    assert_eq!(store.current(), StoredSettings::default());
}

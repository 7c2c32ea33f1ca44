//! Test infrastructure for the persistence layer.
//!
//! [`contract`] holds backend-agnostic checks of the `ItemStore` behavior;
//! each backend's test file runs them through `item_store_contract!`.

#![allow(dead_code, unused_macros)]

pub mod contract;
pub mod fixtures;

pub use fixtures::*;

/// Generates one `#[tokio::test]` per contract check for a backend.
///
/// `$factory` is an expression that yields a fresh, empty store.
macro_rules! item_store_contract {
    ($backend:ident, $factory:expr) => {
        mod $backend {
            use std::sync::Arc;

            use super::common::contract;
            #[allow(unused_imports)]
            use super::*;

            #[tokio::test]
            async fn test_save_assigns_id_and_timestamps() {
                contract::save_assigns_id_and_timestamps(&$factory).await;
            }

            #[tokio::test]
            async fn test_save_keeps_client_id() {
                contract::save_keeps_client_id(&$factory).await;
            }

            #[tokio::test]
            async fn test_save_duplicate_id_is_conflict() {
                contract::save_duplicate_id_is_conflict(&$factory).await;
            }

            #[tokio::test]
            async fn test_get_by_id_returns_saved_item() {
                contract::get_by_id_returns_saved_item(&$factory).await;
            }

            #[tokio::test]
            async fn test_get_missing_is_not_found() {
                contract::get_missing_is_not_found(&$factory).await;
            }

            #[tokio::test]
            async fn test_get_all_empty() {
                contract::get_all_empty(&$factory).await;
            }

            #[tokio::test]
            async fn test_get_all_returns_every_item() {
                contract::get_all_returns_every_item(&$factory).await;
            }

            #[tokio::test]
            async fn test_delete_removes_item() {
                contract::delete_removes_item(&$factory).await;
            }

            #[tokio::test]
            async fn test_delete_missing_is_not_found() {
                contract::delete_missing_is_not_found(&$factory).await;
            }

            #[tokio::test]
            async fn test_update_with_current_token() {
                contract::update_with_current_token(&$factory).await;
            }

            #[tokio::test]
            async fn test_update_ignores_client_timestamps() {
                contract::update_ignores_client_timestamps(&$factory).await;
            }

            #[tokio::test]
            async fn test_update_with_stale_token_is_outdated() {
                contract::update_with_stale_token_is_outdated(&$factory).await;
            }

            #[tokio::test]
            async fn test_update_missing_is_not_found() {
                contract::update_missing_is_not_found(&$factory).await;
            }

            #[tokio::test]
            async fn test_token_chain_across_updates() {
                contract::token_chain_across_updates(&$factory).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_updates_one_wins() {
                contract::concurrent_updates_one_wins(Arc::new($factory)).await;
            }
        }
    };
}

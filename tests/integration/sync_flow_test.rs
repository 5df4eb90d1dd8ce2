// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{listing, setup_db};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use sweethome::application::use_cases::crawl_use_case::ListingCrawler;
use sweethome::application::use_cases::sync_use_case::SyncUseCase;
use sweethome::domain::models::district::{District, DistrictCatalog};
use sweethome::domain::models::listing::ListingRecord;
use sweethome::domain::repositories::listing_repository::ListingRepository;
use sweethome::domain::services::fingerprint::compute_fingerprint;
use sweethome::engines::traits::EngineError;
use sweethome::infrastructure::repositories::listing_repo_impl::ListingRepositoryImpl;

/// 返回测试设定的页面内容
struct StaticCrawler {
    page: Mutex<Vec<ListingRecord>>,
}

impl StaticCrawler {
    fn new(records: Vec<ListingRecord>) -> Arc<Self> {
        Arc::new(Self {
            page: Mutex::new(records),
        })
    }

    fn replace(&self, records: Vec<ListingRecord>) {
        *self.page.lock().unwrap() = records;
    }
}

#[async_trait]
impl ListingCrawler for StaticCrawler {
    async fn crawl_district(&self, _: &District) -> Result<Vec<ListingRecord>, EngineError> {
        Ok(self.page.lock().unwrap().clone())
    }

    fn sentinel(&self) -> District {
        DistrictCatalog::seoul().sentinel().clone()
    }
}

fn page() -> Vec<ListingRecord> {
    vec![
        listing("역삼 청년주택", "전체", "모집중"),
        listing("합정 청년주택", "전체", "모집중"),
        listing("신림 청년주택", "전체", "모집예정"),
    ]
}

#[tokio::test]
async fn test_first_sync_stores_everything_without_changes() {
    let repo = Arc::new(ListingRepositoryImpl::new(setup_db().await));
    let sync = SyncUseCase::new(StaticCrawler::new(page()), repo.clone());

    let outcome = sync.run_full_sync().await.unwrap();

    assert_eq!(outcome.saved_count, 3);
    assert!(outcome.changes.is_empty());

    let stored = repo.find_all().await.unwrap();
    assert_eq!(stored.len(), 3);
    for persisted in &stored {
        assert_eq!(
            persisted.data_hash.as_deref(),
            Some(compute_fingerprint(&persisted.record).as_str())
        );
    }
}

#[tokio::test]
async fn test_rerun_with_same_page_is_idempotent() {
    let repo = Arc::new(ListingRepositoryImpl::new(setup_db().await));
    let sync = SyncUseCase::new(StaticCrawler::new(page()), repo.clone());

    sync.run_full_sync().await.unwrap();
    let before = repo.find_all().await.unwrap();
    let outcome = sync.run_full_sync().await.unwrap();
    let after = repo.find_all().await.unwrap();

    assert!(outcome.changes.is_empty());
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_status_change_is_reported_once() {
    let repo = Arc::new(ListingRepositoryImpl::new(setup_db().await));
    let crawler = StaticCrawler::new(page());
    let sync = SyncUseCase::new(crawler.clone(), repo.clone());
    sync.run_full_sync().await.unwrap();

    let mut changed = page();
    changed[1] = listing("합정 청년주택", "전체", "모집마감");
    crawler.replace(changed);

    let outcome = sync.run_full_sync().await.unwrap();
    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(outcome.changes[0].name, "합정 청년주택");

    let outcome = sync.run_full_sync().await.unwrap();
    assert!(outcome.changes.is_empty());
}

#[tokio::test]
async fn test_image_only_change_is_not_written() {
    let repo = Arc::new(ListingRepositoryImpl::new(setup_db().await));
    let crawler = StaticCrawler::new(page());
    let sync = SyncUseCase::new(crawler.clone(), repo.clone());
    sync.run_full_sync().await.unwrap();
    let before = repo.find_all().await.unwrap();

    let mut changed = page();
    changed[0].image_url = Some("https://soco.seoul.go.kr/images/other.jpg".to_string());
    crawler.replace(changed);

    let outcome = sync.run_full_sync().await.unwrap();

    assert!(outcome.changes.is_empty());
    assert_eq!(repo.find_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_listing_shown_in_list_and_slider_settles_after_first_sync() {
    let repo = Arc::new(ListingRepositoryImpl::new(setup_db().await));
    let mut slider_copy = listing("역삼 청년주택", "전체", "모집중");
    slider_copy.description = Some("지하철: 2호선 역삼역".to_string());
    let page = vec![listing("역삼 청년주택", "전체", "모집중"), slider_copy];
    let sync = SyncUseCase::new(StaticCrawler::new(page), repo.clone());

    let first = sync.run_full_sync().await.unwrap();
    let stored = repo.find_all().await.unwrap();
    let second = sync.run_full_sync().await.unwrap();

    assert!(first.changes.is_empty());
    assert_eq!(stored.len(), 1);
    assert!(second.changes.is_empty());
    assert_eq!(repo.find_all().await.unwrap(), stored);
}

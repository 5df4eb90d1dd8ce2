// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::{ListingRecord, PersistedRecord};
use crate::domain::repositories::listing_repository::{ListingRepository, RepositoryError};
use crate::domain::services::diff_service::{classify, Classification, DiffEngine};
use crate::domain::services::fingerprint::compute_fingerprint;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

// --- Fakes ---

#[derive(Default)]
struct FakeListingRepository {
    rows: Mutex<Vec<PersistedRecord>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
    fail_on_update: bool,
}

impl FakeListingRepository {
    fn with_rows(rows: Vec<PersistedRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn rows(&self) -> Vec<PersistedRecord> {
        self.rows.lock().unwrap().clone()
    }

    fn writes(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingRepository for FakeListingRepository {
    async fn find_all(&self) -> Result<Vec<PersistedRecord>, RepositoryError> {
        Ok(self.rows())
    }

    async fn create(
        &self,
        record: &ListingRecord,
        data_hash: &str,
    ) -> Result<PersistedRecord, RepositoryError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let persisted = PersistedRecord {
            id: Uuid::new_v4(),
            record: record.clone(),
            data_hash: Some(data_hash.to_string()),
        };
        self.rows.lock().unwrap().push(persisted.clone());
        Ok(persisted)
    }

    async fn update(
        &self,
        id: Uuid,
        record: &ListingRecord,
        data_hash: &str,
    ) -> Result<PersistedRecord, RepositoryError> {
        if self.fail_on_update {
            return Err(RepositoryError::NotFound);
        }
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepositoryError::NotFound)?;
        row.record.address = record.address.clone();
        row.record.image_url = record.image_url.clone();
        row.record.detail_url = record.detail_url.clone();
        row.record.description = record.description.clone();
        row.data_hash = Some(data_hash.to_string());
        Ok(row.clone())
    }
}

fn listing(name: &str, district: &str, description: &str) -> ListingRecord {
    let mut record = ListingRecord::new(name, district);
    record.description = Some(description.to_string());
    record
}

fn persist(record: &ListingRecord) -> PersistedRecord {
    PersistedRecord {
        id: Uuid::new_v4(),
        record: record.clone(),
        data_hash: Some(compute_fingerprint(record)),
    }
}

// --- classify ---

#[test]
fn test_classify_new_record() {
    let crawled = listing("A", "강남구", "상태: 모집중");
    let fp = compute_fingerprint(&crawled);
    assert_eq!(classify(None, &crawled, &fp), Classification::New);
}

#[test]
fn test_classify_unchanged_record() {
    let crawled = listing("A", "강남구", "상태: 모집중");
    let persisted = persist(&crawled);
    let fp = compute_fingerprint(&crawled);
    assert_eq!(classify(Some(&persisted), &crawled, &fp), Classification::Unchanged);
}

#[test]
fn test_classify_description_change_notifies() {
    let persisted = persist(&listing("A", "강남구", "상태: 모집중"));
    let crawled = listing("A", "강남구", "상태: 모집마감");
    let fp = compute_fingerprint(&crawled);
    assert_eq!(
        classify(Some(&persisted), &crawled, &fp),
        Classification::Changed { notify: true }
    );
}

#[test]
fn test_classify_address_change_is_silent() {
    let persisted = persist(&listing("A", "강남구", "상태: 모집중"));
    let mut crawled = listing("A", "강남구", "상태: 모집중");
    crawled.address = Some("정정된 주소".to_string());
    let fp = compute_fingerprint(&crawled);
    assert_eq!(
        classify(Some(&persisted), &crawled, &fp),
        Classification::Changed { notify: false }
    );
}

#[test]
fn test_classify_missing_hash_counts_as_changed() {
    let mut persisted = persist(&listing("A", "강남구", "상태: 모집중"));
    persisted.data_hash = None;
    let crawled = listing("A", "강남구", "상태: 모집중");
    let fp = compute_fingerprint(&crawled);
    assert_eq!(
        classify(Some(&persisted), &crawled, &fp),
        Classification::Changed { notify: false }
    );
}

// --- reconcile ---

#[tokio::test]
async fn test_status_change_updates_and_reports() {
    let repo = FakeListingRepository::with_rows(vec![persist(&listing(
        "A",
        "강남구",
        "상태: 모집중",
    ))]);
    let crawled = vec![listing("A", "강남구", "상태: 모집마감")];

    let report = DiffEngine::reconcile(&repo, &crawled).await.unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.changes, crawled);
    let rows = repo.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.description.as_deref(), Some("상태: 모집마감"));
    assert_eq!(rows[0].data_hash, Some(compute_fingerprint(&crawled[0])));
}

#[tokio::test]
async fn test_address_only_change_updates_without_change_set() {
    let original = listing("A", "강남구", "상태: 모집중");
    let repo = FakeListingRepository::with_rows(vec![persist(&original)]);
    let mut corrected = original.clone();
    corrected.address = Some("서울특별시 강남구 테헤란로 2".to_string());

    let report = DiffEngine::reconcile(&repo, &[corrected]).await.unwrap();

    assert_eq!(report.updated, 1);
    assert!(report.changes.is_empty());
    assert_eq!(
        repo.rows()[0].record.address.as_deref(),
        Some("서울특별시 강남구 테헤란로 2")
    );
}

#[tokio::test]
async fn test_new_record_is_created_but_not_reported() {
    let repo = FakeListingRepository::default();
    let crawled = vec![listing("새 주택", "마포구", "상태: 모집예정")];

    let report = DiffEngine::reconcile(&repo, &crawled).await.unwrap();

    assert_eq!(report.created, 1);
    assert!(report.changes.is_empty());
    assert_eq!(repo.rows().len(), 1);
}

#[tokio::test]
async fn test_absent_record_is_left_untouched() {
    let kept = persist(&listing("사라진 주택", "중구", "상태: 모집중"));
    let repo = FakeListingRepository::with_rows(vec![kept.clone()]);

    let report = DiffEngine::reconcile(&repo, &[listing("다른 주택", "중구", "상태: 모집중")])
        .await
        .unwrap();

    assert_eq!(report.created, 1);
    let rows = repo.rows();
    assert_eq!(rows.len(), 2);
    assert!(rows.contains(&kept));
}

#[tokio::test]
async fn test_unchanged_records_cause_no_writes() {
    let crawled = vec![
        listing("A", "전체", "상태: 모집중"),
        listing("B", "전체", "지하철: 2호선"),
    ];
    let repo = FakeListingRepository::with_rows(crawled.iter().map(persist).collect());

    let report = DiffEngine::reconcile(&repo, &crawled).await.unwrap();

    assert_eq!(report.unchanged, 2);
    assert_eq!(report.writes(), 0);
    assert_eq!(repo.writes(), 0);
}

#[tokio::test]
async fn test_same_name_in_other_district_is_a_different_key() {
    let repo = FakeListingRepository::with_rows(vec![persist(&listing(
        "A",
        "강남구",
        "상태: 모집중",
    ))]);

    let report = DiffEngine::reconcile(&repo, &[listing("A", "서초구", "상태: 모집마감")])
        .await
        .unwrap();

    assert_eq!(report.created, 1);
    assert!(report.changes.is_empty());
}

#[tokio::test]
async fn test_key_repeated_within_one_crawl_creates_once() {
    let repo = FakeListingRepository::default();
    let item = listing("A", "전체", "상태: 모집중");

    let report = DiffEngine::reconcile(&repo, &[item.clone(), item]).await.unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.repeated, 1);
    assert_eq!(repo.rows().len(), 1);
}

#[tokio::test]
async fn test_repeated_new_key_with_different_badges_settles() {
    let repo = FakeListingRepository::default();
    let crawled = vec![
        listing("A", "전체", "상태: 모집중 | 지하철: 2호선"),
        listing("A", "전체", "지하철: 2호선"),
    ];

    let first = DiffEngine::reconcile(&repo, &crawled).await.unwrap();

    assert_eq!(first.created, 1);
    assert_eq!(first.updated, 0);
    assert!(first.changes.is_empty());
    assert_eq!(
        repo.rows()[0].record.description.as_deref(),
        Some("상태: 모집중 | 지하철: 2호선")
    );

    let writes_before = repo.writes();
    let second = DiffEngine::reconcile(&repo, &crawled).await.unwrap();

    assert_eq!(repo.writes(), writes_before);
    assert_eq!(second.writes(), 0);
    assert!(second.changes.is_empty());
}

#[tokio::test]
async fn test_repeated_existing_key_is_compared_to_stored_state() {
    let stored = persist(&listing("A", "전체", "상태: 모집중"));
    let repo = FakeListingRepository::with_rows(vec![stored.clone()]);
    let crawled = vec![
        listing("A", "전체", "상태: 모집중"),
        listing("A", "전체", "상태: 모집마감"),
    ];

    let report = DiffEngine::reconcile(&repo, &crawled).await.unwrap();

    assert_eq!(report.unchanged, 1);
    assert_eq!(report.repeated, 1);
    assert_eq!(repo.writes(), 0);
    assert!(report.changes.is_empty());
    assert_eq!(repo.rows(), vec![stored]);
}

#[tokio::test]
async fn test_duplicate_persisted_keys_match_first_row() {
    let first = persist(&listing("A", "강남구", "상태: 모집중"));
    let second = persist(&listing("A", "강남구", "상태: 오래된 상태"));
    let repo = FakeListingRepository::with_rows(vec![first.clone(), second.clone()]);

    let report = DiffEngine::reconcile(&repo, &[listing("A", "강남구", "상태: 모집마감")])
        .await
        .unwrap();

    assert_eq!(report.changes.len(), 1);
    let rows = repo.rows();
    let updated = rows.iter().find(|r| r.id == first.id).unwrap();
    assert_eq!(updated.record.description.as_deref(), Some("상태: 모집마감"));
    assert!(rows.contains(&second));
}

#[tokio::test]
async fn test_storage_failure_propagates_after_partial_writes() {
    let existing = persist(&listing("B", "전체", "상태: 모집중"));
    let repo = FakeListingRepository {
        rows: Mutex::new(vec![existing]),
        fail_on_update: true,
        ..Default::default()
    };
    let crawled = vec![
        listing("A", "전체", "상태: 모집중"),
        listing("B", "전체", "상태: 모집마감"),
    ];

    let result = DiffEngine::reconcile(&repo, &crawled).await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
    // The create that happened before the failure is not rolled back.
    assert_eq!(repo.rows().len(), 2);
}

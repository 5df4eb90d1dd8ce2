// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{listing, setup_db};
use sweethome::domain::repositories::listing_repository::{ListingRepository, RepositoryError};
use sweethome::infrastructure::repositories::listing_repo_impl::ListingRepositoryImpl;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_find_all() {
    let repo = ListingRepositoryImpl::new(setup_db().await);

    let first = repo
        .create(&listing("역삼 청년주택", "강남구", "모집중"), "hash-1")
        .await
        .unwrap();
    repo.create(&listing("합정 청년주택", "마포구", "모집중"), "hash-2")
        .await
        .unwrap();

    let all = repo.find_all().await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[0].record.name, "역삼 청년주택");
    assert_eq!(all[0].record.district, "강남구");
    assert_eq!(all[0].data_hash.as_deref(), Some("hash-1"));
    assert_eq!(
        all[0].record.description.as_deref(),
        Some("상태: 모집중 | 지하철: 2호선 역삼역")
    );
}

#[tokio::test]
async fn test_update_replaces_fields_and_hash() {
    let repo = ListingRepositoryImpl::new(setup_db().await);
    let created = repo
        .create(&listing("역삼 청년주택", "강남구", "모집중"), "hash-1")
        .await
        .unwrap();

    let mut changed = listing("역삼 청년주택", "강남구", "모집마감");
    changed.image_url = None;
    let updated = repo.update(created.id, &changed, "hash-2").await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.data_hash.as_deref(), Some("hash-2"));
    assert_eq!(updated.record.image_url, None);
    assert_eq!(
        updated.record.description.as_deref(),
        Some("상태: 모집마감 | 지하철: 2호선 역삼역")
    );

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].data_hash.as_deref(), Some("hash-2"));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let repo = ListingRepositoryImpl::new(setup_db().await);

    let err = repo
        .update(Uuid::new_v4(), &listing("없음", "강남구", "모집중"), "hash")
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
}

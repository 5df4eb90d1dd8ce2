// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::setup_db;
use sweethome::domain::models::subscriber::Subscriber;
use sweethome::domain::repositories::listing_repository::RepositoryError;
use sweethome::domain::repositories::subscriber_repository::SubscriberRepository;
use sweethome::infrastructure::repositories::subscriber_repo_impl::SubscriberRepositoryImpl;

#[tokio::test]
async fn test_create_and_find_by_email() {
    let repo = SubscriberRepositoryImpl::new(setup_db().await);

    repo.create(&Subscriber::new("a@example.com")).await.unwrap();

    let found = repo.find_by_email("a@example.com").await.unwrap().unwrap();
    assert!(found.is_active);
    assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_active_skips_unsubscribed() {
    let repo = SubscriberRepositoryImpl::new(setup_db().await);
    repo.create(&Subscriber::new("a@example.com")).await.unwrap();
    repo.create(&Subscriber::new("b@example.com")).await.unwrap();

    let deactivated = repo.set_active("a@example.com", false).await.unwrap();
    assert!(!deactivated.is_active);

    let active = repo.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].email, "b@example.com");

    repo.set_active("a@example.com", true).await.unwrap();
    assert_eq!(repo.list_active().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_set_active_unknown_email_is_not_found() {
    let repo = SubscriberRepositoryImpl::new(setup_db().await);

    let err = repo.set_active("ghost@example.com", false).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound));
}

use crate::{InMemoryUserRepository, StoreError, UserRepository};

use cv_core::User;

use std::sync::Arc;

use googletest::prelude::*;

fn user(email: &str) -> User {
    User::new(email.to_string(), "$argon2id$stub".to_string())
}

#[tokio::test]
async fn given_inserted_user_when_found_by_email_then_returns_it() {
    // Given
    let repo = InMemoryUserRepository::new();
    let stored = repo.insert(user("a@x.com")).await.unwrap();

    // When
    let found = repo.find_by_email("a@x.com").await.unwrap();

    // Then
    assert_that!(found, some(eq(&stored)));
    assert_that!(repo.exists("a@x.com").await.unwrap(), eq(true));
}

#[tokio::test]
async fn given_inserted_user_when_found_by_id_then_returns_it() {
    let repo = InMemoryUserRepository::new();
    let stored = repo.insert(user("a@x.com")).await.unwrap();

    let found = repo.find_by_id(stored.id).await.unwrap();

    assert_that!(found.map(|u| u.email), some(eq("a@x.com")));
}

#[tokio::test]
async fn given_empty_store_when_queried_then_nothing_is_found() {
    let repo = InMemoryUserRepository::new();

    assert_that!(repo.find_by_email("a@x.com").await.unwrap(), none());
    assert_that!(repo.exists("a@x.com").await.unwrap(), eq(false));
    assert_that!(repo.count().await.unwrap(), eq(0));
}

#[tokio::test]
async fn given_existing_email_when_inserted_again_then_rejects_duplicate() {
    // Given
    let repo = InMemoryUserRepository::new();
    let first = repo.insert(user("a@x.com")).await.unwrap();

    // When
    let result = repo.insert(user("a@x.com")).await;

    // Then
    assert!(matches!(result, Err(StoreError::DuplicateEmail { ref email, .. }) if email == "a@x.com"));
    let kept = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_that!(kept.id, eq(first.id));
    assert_that!(repo.count().await.unwrap(), eq(1));
}

#[tokio::test]
async fn given_emails_differing_by_case_when_inserted_then_both_are_kept() {
    let repo = InMemoryUserRepository::new();

    repo.insert(user("a@x.com")).await.unwrap();
    repo.insert(user("A@x.com")).await.unwrap();

    assert_that!(repo.count().await.unwrap(), eq(2));
}

#[tokio::test]
async fn given_concurrent_registrations_for_same_email_when_inserted_then_exactly_one_wins() {
    // Given
    let repo = Arc::new(InMemoryUserRepository::new());

    // When
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.insert(user("race@x.com")).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    // Then
    assert_that!(successes, eq(1));
    assert_that!(repo.count().await.unwrap(), eq(1));
}

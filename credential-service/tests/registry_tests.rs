mod common;

use std::sync::Arc;

use common::TestDb;
use credential_service::domain::user::models::EmailAddress;
use credential_service::domain::user::models::NewUser;
use credential_service::domain::user::ports::UserRegistry;
use credential_service::outbound::repositories::PostgresUserRegistry;
use credential_service::user::errors::CredentialError;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE__URL"]
async fn test_create_and_find_by_email() {
    let db = TestDb::new().await;
    let registry = PostgresUserRegistry::new(db.pool.clone());

    let id = registry
        .create(new_user("a@b.com"))
        .await
        .expect("Failed to create user");
    assert!(id.0 > 0);

    let email = EmailAddress::new("a@b.com".to_string()).unwrap();
    let found = registry
        .find_by_email(&email)
        .await
        .expect("Failed to query user")
        .expect("User should exist");
    assert_eq!(found.id, id);
    assert_eq!(found.email, email);

    let missing = EmailAddress::new("nobody@b.com".to_string()).unwrap();
    assert!(registry.find_by_email(&missing).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE__URL"]
async fn test_create_duplicate_email() {
    let db = TestDb::new().await;
    let registry = PostgresUserRegistry::new(db.pool.clone());

    registry.create(new_user("a@b.com")).await.unwrap();
    let result = registry.create(new_user("a@b.com")).await;

    assert!(matches!(
        result,
        Err(CredentialError::EmailAlreadyExists(ref email)) if email == "a@b.com"
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires Postgres at DATABASE__URL"]
async fn test_concurrent_creates_single_winner() {
    let db = TestDb::new().await;
    let registry = Arc::new(PostgresUserRegistry::new(db.pool.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.create(new_user("a@b.com")).await })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(CredentialError::EmailAlreadyExists(_)) => conflicts += 1,
            Err(e) => panic!("unexpected registry error: {}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);
}

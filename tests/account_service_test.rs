//! Account service tests against a mocked repository.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use domain::{Account, Credential, CredentialScheme};
use referral_portal::infra::MockAccountRepository;
use referral_portal::services::{AccountManager, AccountService};
use referral_portal::AppError;

fn create_test_account(email: &str, password: Option<&str>) -> Account {
    Account {
        id: 7,
        name: "Bob".to_string(),
        email: email.to_string(),
        credential: Credential::from_stored(password.map(str::to_string)),
        user_id: Some("U1".to_string()),
        referrer_id: Some("U0".to_string()),
        token_id: Some("88".to_string()),
        plan_data: Some(serde_json::json!({"tier": "gold"})),
        profile_picture: Some("data:image/png;base64,AAAA".to_string()),
        profile_media_type: Some("image/png".to_string()),
        reset_code: Some("ABC123".to_string()),
        reset_code_expires: Some(Utc::now()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn service(repo: MockAccountRepository) -> AccountManager {
    AccountManager::new(Arc::new(repo), CredentialScheme::Plaintext)
}

fn assert_sanitized(value: &serde_json::Value) {
    let object = value.as_object().expect("account serializes to an object");
    for secret in ["password_hash", "reset_code", "reset_code_expires", "credential"] {
        assert!(!object.contains_key(secret), "{} leaked", secret);
    }
}

#[tokio::test]
async fn test_login_success_returns_sanitized_account() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email == "bob@example.com")
        .returning(|email| Ok(Some(create_test_account(email, Some("secret")))));

    let account = service(repo).login("bob@example.com", "secret").await.unwrap();

    assert_eq!(account.email, "bob@example.com");
    assert_sanitized(&serde_json::to_value(&account).unwrap());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(create_test_account(email, Some("secret")))));

    let err = service(repo).login("bob@example.com", "nope").await.unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Invalid password");
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(create_test_account(email, Some("secret")))));

    let result = service(repo).login("bob@example.com", "Secret").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_login_without_stored_credential_fails() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(create_test_account(email, None))));

    let result = service(repo).login("bob@example.com", "").await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn test_login_accepts_argon2_credential() {
    let stored = Credential::seal("secret", CredentialScheme::Argon2).unwrap();

    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email().returning(move |email| {
        Ok(Some(create_test_account(email, Some(stored.as_str()))))
    });

    let account = service(repo).login("bob@example.com", "secret").await.unwrap();
    assert_eq!(account.name, "Bob");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));

    let err = service(repo).login("ghost@example.com", "x").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.user_message(), "User not found");
}

#[tokio::test]
async fn test_forgot_password_persists_code_with_one_hour_expiry() {
    let captured = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let mut repo = MockAccountRepository::new();
    repo.expect_set_reset_code()
        .times(1)
        .returning(move |_, code, expires_at| {
            *sink.lock().unwrap() = Some((code, expires_at));
            Ok(1)
        });

    let reset = service(repo).forgot_password("bob@example.com").await.unwrap();

    assert_eq!(reset.code.len(), 6);
    assert!(reset
        .code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert_eq!(reset.expires_at - reset.issued_at, Duration::minutes(60));

    let stored = captured.lock().unwrap().clone().unwrap();
    assert_eq!(stored, (reset.code.clone(), reset.expires_at));
}

#[tokio::test]
async fn test_forgot_password_unknown_email_still_succeeds() {
    let mut repo = MockAccountRepository::new();
    repo.expect_set_reset_code().returning(|_, _, _| Ok(0));

    let reset = service(repo).forgot_password("ghost@example.com").await.unwrap();
    assert_eq!(reset.code.len(), 6);
}

#[tokio::test]
async fn test_update_profile_with_picture_removal() {
    let mut repo = MockAccountRepository::new();
    repo.expect_update_profile()
        .withf(|email, name, remove| email == "bob@example.com" && name == "Robert" && *remove)
        .times(1)
        .returning(|email, name, _| {
            let mut account = create_test_account(email, Some("secret"));
            account.name = name;
            account.profile_picture = None;
            account.profile_media_type = None;
            Ok(Some(account))
        });

    let view = service(repo)
        .update_profile("bob@example.com", "Robert", true)
        .await
        .unwrap();

    assert_eq!(view.name, "Robert");
    assert!(view.profile_picture.is_none());
    assert!(view.profile_media_type.is_none());
}

#[tokio::test]
async fn test_update_profile_is_a_pure_overwrite() {
    let mut repo = MockAccountRepository::new();
    repo.expect_update_profile().times(2).returning(|email, name, _| {
        let mut account = create_test_account(email, Some("secret"));
        account.name = name;
        Ok(Some(account))
    });

    let service = service(repo);
    let first = service.update_profile("bob@example.com", "Robert", false).await.unwrap();
    let second = service.update_profile("bob@example.com", "Robert", false).await.unwrap();

    assert_eq!(first.name, second.name);
    assert_eq!(first.profile_picture, second.profile_picture);
}

#[tokio::test]
async fn test_update_profile_unknown_email() {
    let mut repo = MockAccountRepository::new();
    repo.expect_update_profile().returning(|_, _, _| Ok(None));

    let err = service(repo)
        .update_profile("ghost@example.com", "Robert", false)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "User not found");
}

#[tokio::test]
async fn test_change_password_rejects_wrong_current() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(create_test_account(email, Some("secret")))));
    repo.expect_update_credential().never();

    let err = service(repo)
        .change_password("bob@example.com", "wrong", "new")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Current password is incorrect");
}

#[tokio::test]
async fn test_change_password_overwrites_credential() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(create_test_account(email, Some("secret")))));
    repo.expect_update_credential()
        .withf(|email, stored| email == "bob@example.com" && stored == "fresh")
        .times(1)
        .returning(|_, _| Ok(1));

    service(repo)
        .change_password("bob@example.com", "secret", "fresh")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_accounts_is_sanitized() {
    let mut repo = MockAccountRepository::new();
    repo.expect_list().returning(|| {
        Ok(vec![
            create_test_account("a@example.com", Some("one")),
            create_test_account("b@example.com", Some("two")),
        ])
    });

    let accounts = service(repo).list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 2);
    let json = serde_json::to_value(&accounts).unwrap();
    for account in json.as_array().unwrap() {
        assert_sanitized(account);
    }
}

#[tokio::test]
async fn test_find_referrer_projection() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_user_id()
        .withf(|id| id == "U1")
        .returning(|_| Ok(Some(create_test_account("bob@example.com", Some("secret")))));

    let referrer = service(repo).find_referrer("U1").await.unwrap();

    let json = serde_json::to_value(&referrer).unwrap();
    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["email", "name", "token_id", "user_id"]);
}

#[tokio::test]
async fn test_find_referrer_distinguishes_absence_from_outage() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_user_id()
        .withf(|id| id == "missing")
        .returning(|_| Ok(None));
    repo.expect_find_by_user_id()
        .withf(|id| id == "down")
        .returning(|_| Err(AppError::backend_unavailable("connection refused")));

    let service = service(repo);

    let missing = service.find_referrer("missing").await.unwrap_err();
    assert_eq!(missing.user_message(), "Referrer not found");

    let down = service.find_referrer("down").await.unwrap_err();
    assert!(matches!(down, AppError::BackendUnavailable(_)));
}

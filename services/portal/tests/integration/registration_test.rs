use sesmine_domain::id::RequestId;
use sesmine_domain::plan::Plan;
use sesmine_domain::request::RequestStatus;
use sesmine_domain::user::{Permission, Role};
use sesmine_portal::domain::repository::{PendingRequestRepository, UserRepository};
use sesmine_portal::domain::types::{Notification, NotificationKind};
use sesmine_portal::error::PortalError;
use sesmine_portal::infra::store::LocalStore;
use sesmine_portal::usecase::registration::{ApproveRequestUseCase, SubmitRegistrationUseCase};

use crate::helpers::{RecordingNotifier, seeded_store, signup_input};

fn submit(
    store: &LocalStore,
    notifier: &RecordingNotifier,
) -> SubmitRegistrationUseCase<LocalStore, RecordingNotifier> {
    SubmitRegistrationUseCase {
        requests: store.clone(),
        notifier: notifier.clone(),
        enabled: true,
    }
}

fn approve(
    store: &LocalStore,
    notifier: &RecordingNotifier,
) -> ApproveRequestUseCase<LocalStore, RecordingNotifier> {
    ApproveRequestUseCase {
        requests: store.clone(),
        notifier: notifier.clone(),
    }
}

async fn population(store: &LocalStore) -> usize {
    UserRepository::list(store).await.unwrap().len()
        + PendingRequestRepository::list(store).await.unwrap().len()
}

#[tokio::test]
async fn should_create_exactly_one_pending_request() {
    let store = seeded_store().await;
    let notifier = RecordingNotifier::succeeding();
    let before = population(&store).await;

    let out = submit(&store, &notifier)
        .execute(signup_input("Ada@Example.com "))
        .await
        .unwrap();

    assert_eq!(population(&store).await, before + 1);
    let requests = PendingRequestRepository::list(&store).await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request, &out.request);
    assert_eq!(request.email, "ada@example.com");
    assert_eq!(request.name, "Ada Lovelace");
    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.id.0.starts_with("req_"));
    assert!(out.admin_notified.success && out.welcome_sent.success);

    let mut kinds = notifier.kinds();
    kinds.sort_by_key(|k| k.as_str());
    assert_eq!(
        kinds,
        vec![
            NotificationKind::RegistrationNotification,
            NotificationKind::WelcomeEmail
        ]
    );
}

#[tokio::test]
async fn should_reject_same_email_twice_case_normalised() {
    let store = seeded_store().await;
    let notifier = RecordingNotifier::succeeding();
    let usecase = submit(&store, &notifier);

    usecase.execute(signup_input("ada@example.com")).await.unwrap();
    let before = population(&store).await;
    let result = usecase.execute(signup_input("ADA@example.com")).await;

    assert!(
        matches!(result, Err(PortalError::DuplicateEmail)),
        "expected DuplicateEmail, got {result:?}"
    );
    assert_eq!(population(&store).await, before);
    assert_eq!(notifier.kinds().len(), 2, "no notification for the rejected signup");
}

#[tokio::test]
async fn should_reject_signup_for_existing_user_email() {
    let store = seeded_store().await;
    let result = submit(&store, &RecordingNotifier::succeeding())
        .execute(signup_input("demo@sesmine.com"))
        .await;
    assert!(matches!(result, Err(PortalError::DuplicateEmail)));
}

#[tokio::test]
async fn should_accept_only_one_of_concurrent_signups_for_same_email() {
    let store = seeded_store().await;
    let notifier = RecordingNotifier::succeeding();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let usecase = submit(&store, &notifier);
            tokio::spawn(async move { usecase.execute(signup_input("race@example.com")).await })
        })
        .collect();
    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(PortalError::DuplicateEmail) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(PendingRequestRepository::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_validate_email_then_company() {
    let store = seeded_store().await;
    let usecase = submit(&store, &RecordingNotifier::succeeding());

    let result = usecase.execute(signup_input("not-an-email")).await;
    assert!(matches!(result, Err(PortalError::InvalidEmail)));

    let mut input = signup_input("ada@example.com");
    input.company = " X ".to_owned();
    let result = usecase.execute(input).await;
    assert!(matches!(result, Err(PortalError::InvalidCompany)));

    assert!(PendingRequestRepository::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_refuse_signup_when_registration_disabled() {
    let store = seeded_store().await;
    let usecase = SubmitRegistrationUseCase {
        requests: store.clone(),
        notifier: RecordingNotifier::succeeding(),
        enabled: false,
    };
    let result = usecase.execute(signup_input("ada@example.com")).await;
    assert!(matches!(result, Err(PortalError::RegistrationDisabled)));
}

#[tokio::test]
async fn should_keep_request_when_notifications_fail() {
    let store = seeded_store().await;
    let out = submit(&store, &RecordingNotifier::failing())
        .execute(signup_input("ada@example.com"))
        .await
        .unwrap();

    assert!(!out.admin_notified.success);
    assert!(!out.welcome_sent.success);
    assert_eq!(out.welcome_sent.error.as_deref(), Some("smtp unreachable"));
    assert_eq!(PendingRequestRepository::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_approve_into_active_user_with_plan_permissions() {
    let store = seeded_store().await;
    let notifier = RecordingNotifier::succeeding();
    let submitted = submit(&store, &notifier)
        .execute(signup_input("ada@example.com"))
        .await
        .unwrap();
    let users_before = UserRepository::list(&store).await.unwrap().len();

    let out = approve(&store, &notifier)
        .execute(&submitted.request.id)
        .await
        .unwrap();

    let users = UserRepository::list(&store).await.unwrap();
    assert_eq!(users.len(), users_before + 1);
    let created: Vec<_> = users.iter().filter(|u| u.email == "ada@example.com").collect();
    assert_eq!(created.len(), 1);
    let user = created[0];
    assert_eq!(user, &out.user);
    assert_eq!(user.role, Role::User);
    assert_eq!(user.plan, Plan::Professional);
    assert!(user.is_active);
    assert!(user.permissions.contains(&Permission::Basic));
    assert!(user.permissions.contains(&Permission::Advanced));
    assert_eq!(user.company.as_deref(), Some("Analytical Engines"));

    let request = PendingRequestRepository::find_by_id(&store, &submitted.request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.status, RequestStatus::Approved);
    assert!(request.approved_at.is_some());
    assert!(out.credential_delivered());
    assert!(out.credential.is_none());

    let sent = notifier.sent_handle();
    let sent = sent.lock().unwrap();
    let Some(Notification::UserApproval { credential, .. }) = sent.last() else {
        panic!("expected a user approval notification");
    };
    assert_eq!(credential.expose().len(), 8);
    assert!(credential.expose().chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(user.password.matches(credential.expose()));
}

#[tokio::test]
async fn should_reject_re_approval() {
    let store = seeded_store().await;
    let notifier = RecordingNotifier::succeeding();
    let submitted = submit(&store, &notifier)
        .execute(signup_input("ada@example.com"))
        .await
        .unwrap();
    let usecase = approve(&store, &notifier);
    usecase.execute(&submitted.request.id).await.unwrap();
    let users = UserRepository::list(&store).await.unwrap().len();

    let result = usecase.execute(&submitted.request.id).await;

    assert!(
        matches!(result, Err(PortalError::RequestNotFound)),
        "expected RequestNotFound, got {result:?}"
    );
    assert_eq!(UserRepository::list(&store).await.unwrap().len(), users);
}

#[tokio::test]
async fn should_reject_unknown_request_id() {
    let store = seeded_store().await;
    let result = approve(&store, &RecordingNotifier::succeeding())
        .execute(&RequestId("req_missing".to_owned()))
        .await;
    assert!(matches!(result, Err(PortalError::RequestNotFound)));
}

#[tokio::test]
async fn should_keep_approval_when_credential_email_fails() {
    let store = seeded_store().await;
    let submitted = submit(&store, &RecordingNotifier::succeeding())
        .execute(signup_input("ada@example.com"))
        .await
        .unwrap();

    let out = approve(&store, &RecordingNotifier::failing())
        .execute(&submitted.request.id)
        .await
        .unwrap();

    assert!(!out.credential_delivered());
    let credential = out.credential.as_ref().unwrap();
    assert_eq!(credential.expose().len(), 8);
    assert!(out.user.password.matches(credential.expose()));
    let request = PendingRequestRepository::find_by_id(&store, &submitted.request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(request.status, RequestStatus::Approved);
    assert!(
        UserRepository::list(&store)
            .await
            .unwrap()
            .iter()
            .any(|u| u.email == "ada@example.com" && u.is_active)
    );
}

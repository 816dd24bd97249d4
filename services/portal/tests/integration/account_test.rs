use sesmine_domain::id::UserId;
use sesmine_domain::plan::Plan;
use sesmine_domain::user::{IdentifierMatching, Permission, Role};
use sesmine_domain::validation::PasswordRules;
use sesmine_portal::domain::repository::{PendingRequestRepository, UserRepository};
use sesmine_portal::error::PortalError;
use sesmine_portal::infra::store::LocalStore;
use sesmine_portal::usecase::account::{
    ChangePasswordInput, ChangePasswordUseCase, CreateUserInput, CreateUserUseCase, NewUser,
    SetUserActiveUseCase, authenticate,
};
use sesmine_portal::usecase::registration::SubmitRegistrationUseCase;

use crate::helpers::{RecordingNotifier, seeded_store, signup_input};

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Katherine Johnson".to_owned(),
        email: email.to_owned(),
        role: Role::User,
        plan: Plan::Starter,
        company: Some("Orbital".to_owned()),
        job_title: None,
        phone: None,
    }
}

fn create(store: &LocalStore) -> CreateUserUseCase<LocalStore> {
    CreateUserUseCase {
        users: store.clone(),
        rules: PasswordRules::default(),
    }
}

async fn demo_session(store: &LocalStore) -> sesmine_domain::session::Session {
    let user = authenticate(store, "demo@sesmine.com", "demo123", IdentifierMatching::Exact)
        .await
        .unwrap();
    sesmine_domain::session::Session::for_user(&user, chrono::Utc::now())
}

#[tokio::test]
async fn should_create_user_with_plan_permissions() {
    let store = seeded_store().await;
    let user = create(&store)
        .execute(CreateUserInput {
            user: new_user(" Katherine@Orbit.example "),
            password: "launch42".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(user.email, "katherine@orbit.example");
    assert_eq!(user.username, user.email);
    assert_eq!(user.permissions.len(), 1);
    assert!(user.permissions.contains(&Permission::Basic));
    assert!(user.id.0.starts_with("user_"));

    let found = authenticate(
        &store,
        "katherine@orbit.example",
        "launch42",
        IdentifierMatching::Exact,
    )
    .await
    .unwrap();
    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn should_reject_created_user_with_pending_request_email() {
    let store = seeded_store().await;
    SubmitRegistrationUseCase {
        requests: store.clone(),
        notifier: RecordingNotifier::succeeding(),
        enabled: true,
    }
    .execute(signup_input("ada@example.com"))
    .await
    .unwrap();

    let result = create(&store)
        .execute(CreateUserInput {
            user: new_user("ada@example.com"),
            password: "launch42".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(PortalError::DuplicateEmail)));
    assert_eq!(PendingRequestRepository::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_weak_password_and_bad_email() {
    let store = seeded_store().await;
    let usecase = CreateUserUseCase {
        users: store.clone(),
        rules: PasswordRules {
            min_length: 8,
            require_numbers: true,
            ..PasswordRules::default()
        },
    };

    let weak = usecase
        .execute(CreateUserInput {
            user: new_user("k@orbit.example"),
            password: "launchpad".to_owned(),
        })
        .await;
    assert!(matches!(weak, Err(PortalError::WeakPassword)));

    let bad_email = usecase
        .execute(CreateUserInput {
            user: new_user("k@orbit"),
            password: "launch42".to_owned(),
        })
        .await;
    assert!(matches!(bad_email, Err(PortalError::InvalidEmail)));
    assert_eq!(UserRepository::list(&store).await.unwrap().len(), 3);
}

#[tokio::test]
async fn should_change_password_when_current_matches() {
    let store = seeded_store().await;
    let session = demo_session(&store).await;
    let usecase = ChangePasswordUseCase {
        users: store.clone(),
        rules: PasswordRules::default(),
    };

    usecase
        .execute(
            &session,
            ChangePasswordInput {
                current: "demo123".to_owned(),
                new: "better-secret".to_owned(),
            },
        )
        .await
        .unwrap();

    let old = authenticate(&store, "demo@sesmine.com", "demo123", IdentifierMatching::Exact).await;
    assert!(matches!(old, Err(PortalError::InvalidCredentials)));
    authenticate(
        &store,
        "demo@sesmine.com",
        "better-secret",
        IdentifierMatching::Exact,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn should_refuse_password_change_with_wrong_current_or_weak_new() {
    let store = seeded_store().await;
    let session = demo_session(&store).await;
    let usecase = ChangePasswordUseCase {
        users: store.clone(),
        rules: PasswordRules::default(),
    };

    let wrong_current = usecase
        .execute(
            &session,
            ChangePasswordInput {
                current: "nope".to_owned(),
                new: "better-secret".to_owned(),
            },
        )
        .await;
    assert!(matches!(wrong_current, Err(PortalError::InvalidCredentials)));

    let weak = usecase
        .execute(
            &session,
            ChangePasswordInput {
                current: "demo123".to_owned(),
                new: "abc".to_owned(),
            },
        )
        .await;
    assert!(matches!(weak, Err(PortalError::WeakPassword)));

    authenticate(&store, "demo@sesmine.com", "demo123", IdentifierMatching::Exact)
        .await
        .unwrap();
}

#[tokio::test]
async fn should_toggle_activation_and_reject_unknown_user() {
    let store = seeded_store().await;
    let usecase = SetUserActiveUseCase {
        users: store.clone(),
    };
    let demo = UserId("demo_001".to_owned());

    let user = usecase.execute(&demo, false).await.unwrap();
    assert!(!user.is_active);
    let user = usecase.execute(&demo, true).await.unwrap();
    assert!(user.is_active);

    let missing = usecase.execute(&UserId("ghost".to_owned()), false).await;
    assert!(matches!(missing, Err(PortalError::UserNotFound)));
}

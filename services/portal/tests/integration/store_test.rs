use chrono::{TimeZone, Utc};

use sesmine_domain::activity::UserActivity;
use sesmine_domain::contact::ContactMessage;
use sesmine_domain::id::{RequestId, SessionId, UserId};
use sesmine_domain::plan::Plan;
use sesmine_domain::request::{PendingRequest, RequestStatus};
use sesmine_domain::session::{Session, SessionScope};
use sesmine_domain::settings::Settings;
use sesmine_domain::user::{Permission, Role, User};
use sesmine_portal::domain::repository::{
    ActivityRepository, ContactRepository, PendingRequestRepository, SessionRepository,
    SettingsRepository, UserRepository,
};
use sesmine_portal::domain::types::{USERS_KEY, session_key};
use sesmine_portal::error::PortalError;
use sesmine_portal::infra::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use sesmine_portal::infra::store::LocalStore;
use sesmine_portal::usecase::registration::SubmitRegistrationUseCase;
use sesmine_testing::fixture::Fixture;

use crate::helpers::{RecordingNotifier, fixture_store, signup_input};

#[tokio::test]
async fn should_load_fixture_users_unchanged() {
    let (store, _) = fixture_store().await;
    let users = UserRepository::list(&store).await.unwrap();
    let expected: Vec<User> = Fixture::load_as("store/users.json");
    assert_eq!(users, expected);

    let admin = &users[0];
    assert_eq!(admin.id, UserId("admin_001".to_owned()));
    assert_eq!(admin.role, Role::Admin);
    assert!(admin.permissions.contains(&Permission::All));
    assert!(admin.password.matches("admin123"));
    assert!(admin.company.is_none());
    assert_eq!(
        users[2].last_login,
        Some(Utc.with_ymd_and_hms(2024, 2, 10, 8, 30, 0).unwrap())
    );
}

#[tokio::test]
async fn should_load_every_fixture_collection() {
    let (store, _) = fixture_store().await;

    let requests = PendingRequestRepository::list(&store).await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].status, RequestStatus::Pending);
    assert!(requests[0].approved_at.is_none());
    assert_eq!(requests[1].status, RequestStatus::Approved);
    assert_eq!(
        requests[1].approved_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap())
    );

    let contacts = ContactRepository::list(&store).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].subject, "Pricing");

    let activities = ActivityRepository::list(&store).await.unwrap();
    assert_eq!(activities[0].page, "home.html");

    let settings = SettingsRepository::get(&store).await.unwrap();
    let expected: Settings = Fixture::load_as("store/settings.json");
    assert_eq!(settings, expected);
}

#[tokio::test]
async fn should_round_trip_fixture_session() {
    let store = LocalStore::in_memory();
    let session: Session = Fixture::load_as("store/session.json");
    let id = SessionId::new();

    store
        .put(SessionScope::Persistent, id, &session)
        .await
        .unwrap();
    let loaded = SessionRepository::get(&store, SessionScope::Persistent, id)
        .await
        .unwrap();
    assert_eq!(loaded, Some(session));
}

#[tokio::test]
async fn should_round_trip_every_record_type_field_for_field() {
    let store = LocalStore::in_memory();
    let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

    let user = User {
        id: UserId("user_abc".to_owned()),
        username: "ada@example.com".to_owned(),
        email: "ada@example.com".to_owned(),
        password: sesmine_domain::user::Credential::new("Xy7pQ2rS"),
        name: "Ada Lovelace".to_owned(),
        role: Role::User,
        plan: Plan::Professional,
        is_active: false,
        created_at: at,
        last_login: None,
        company: Some("Analytical".to_owned()),
        job_title: None,
        phone: Some(String::new()),
        permissions: Plan::Professional.default_permissions(),
    };
    UserRepository::insert_unique(&store, &user).await.unwrap();
    assert_eq!(
        UserRepository::find_by_id(&store, &user.id).await.unwrap(),
        Some(user)
    );

    let request = PendingRequest {
        id: RequestId("req_abc".to_owned()),
        name: "Grace Hopper".to_owned(),
        email: "grace@example.com".to_owned(),
        company: "Fleet".to_owned(),
        job_title: String::new(),
        phone: String::new(),
        plan: Plan::Enterprise,
        newsletter: false,
        timestamp: at,
        status: RequestStatus::Pending,
        approved_at: None,
    };
    PendingRequestRepository::insert_unique(&store, &request)
        .await
        .unwrap();
    assert_eq!(
        PendingRequestRepository::find_by_id(&store, &request.id)
            .await
            .unwrap(),
        Some(request)
    );

    let message = ContactMessage {
        id: sesmine_domain::id::ContactId("contact_abc".to_owned()),
        name: "Visitor".to_owned(),
        email: "visitor@example.com".to_owned(),
        subject: String::new(),
        message: "multi\nline".to_owned(),
        timestamp: at,
    };
    store.append(&message).await.unwrap();
    assert_eq!(ContactRepository::list(&store).await.unwrap(), vec![message]);

    let activity = UserActivity {
        page: "home.html".to_owned(),
        timestamp: at,
        user: "ada@example.com".to_owned(),
    };
    store.record(activity.clone()).await.unwrap();
    assert_eq!(ActivityRepository::list(&store).await.unwrap(), vec![activity]);

    let settings = Settings {
        theme: "dark".to_owned(),
        auto_save: false,
        ..Settings::default()
    };
    store.save(&settings).await.unwrap();
    assert_eq!(SettingsRepository::get(&store).await.unwrap(), settings);
}

#[tokio::test]
async fn should_surface_quota_overflow_as_storage_unavailable() {
    let store = LocalStore::new(
        MemoryStorage::with_quota(64).into(),
        MemoryStorage::new().into(),
    );
    let usecase = SubmitRegistrationUseCase {
        requests: store.clone(),
        notifier: RecordingNotifier::succeeding(),
        enabled: true,
    };

    let result = usecase.execute(signup_input("ada@example.com")).await;

    assert!(
        matches!(result, Err(PortalError::StorageUnavailable(_))),
        "expected StorageUnavailable, got {result:?}"
    );
    assert!(PendingRequestRepository::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_treat_unreadable_blobs_as_empty() {
    let durable = MemoryStorage::new();
    durable
        .set(USERS_KEY, "[{\"id\":".to_owned())
        .await
        .unwrap();
    let short_lived = MemoryStorage::new();
    let id = SessionId::new();
    short_lived
        .set(&session_key(id), "not json".to_owned())
        .await
        .unwrap();
    let store = LocalStore::new(durable.into(), short_lived.into());

    assert!(UserRepository::list(&store).await.unwrap().is_empty());
    assert!(
        SessionRepository::get(&store, SessionScope::ShortLived, id)
            .await
            .unwrap()
            .is_none()
    );

    // The next write replaces the unreadable blob.
    UserRepository::insert_unique(&store, &Fixture::load_as::<Vec<User>>("store/users.json")[0])
        .await
        .unwrap();
    assert_eq!(UserRepository::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_persist_durable_scope_across_restarts() {
    let dir = std::env::temp_dir().join(format!("sesmine-store-{}", SessionId::new()));
    let session: Session = Fixture::load_as("store/session.json");
    let id = SessionId::new();

    {
        let store = LocalStore::new(
            FileStorage::new(&dir).into(),
            MemoryStorage::new().into(),
        );
        let users: Vec<User> = Fixture::load_as("store/users.json");
        assert!(store.seed_if_absent(&users).await.unwrap());
        store
            .put(SessionScope::Persistent, id, &session)
            .await
            .unwrap();
        store
            .put(SessionScope::ShortLived, SessionId::new(), &session)
            .await
            .unwrap();
    }

    let reopened = LocalStore::new(
        FileStorage::new(&dir).into(),
        MemoryStorage::new().into(),
    );
    assert_eq!(UserRepository::list(&reopened).await.unwrap().len(), 3);
    assert_eq!(
        SessionRepository::get(&reopened, SessionScope::Persistent, id)
            .await
            .unwrap(),
        Some(session)
    );
    assert!(dir.join(format!("sesmine_session_{id}.json")).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn should_stay_writable_under_concurrent_readiness_checks() {
    let dir = std::env::temp_dir().join(format!("sesmine-store-{}", SessionId::new()));
    let store = LocalStore::new(FileStorage::new(&dir).into(), MemoryStorage::new().into());

    let checks = (0..16).map(|_| store.check_writable());
    for result in futures::future::join_all(checks).await {
        result.unwrap();
    }
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    let _ = std::fs::remove_dir_all(&dir);
}

//! Service rules against a hand-written repository that counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use registrations::contract::error::EntityKind;
use registrations::contract::model::{
    EventSummary, NewRegistration, Registration, RegistrationDetails, UserRole, UserSummary,
};
use registrations::domain::error::DomainError;
use registrations::domain::repo::{InsertError, RegistrationsRepository};
use registrations::domain::service::Service;

const EVENT_ID: &str = "7d0f6c1e-3b0a-4f7e-9c52-2a1d5b8e4f10";
const USER_ID: &str = "c4a9e2b7-5d13-4e88-b0f6-9e3c7a2d1b55";

#[derive(Clone, Copy, PartialEq)]
enum InsertOutcome {
    Ok,
    Duplicate,
    Fail,
}

struct MockRepo {
    event_exists: bool,
    user_exists: bool,
    already_registered: bool,
    lookups_fail: bool,
    insert_outcome: InsertOutcome,
    calls: AtomicUsize,
    inserts: Mutex<Vec<Registration>>,
}

impl MockRepo {
    fn happy() -> Self {
        Self {
            event_exists: true,
            user_exists: true,
            already_registered: false,
            lookups_fail: false,
            insert_outcome: InsertOutcome::Ok,
            calls: AtomicUsize::new(0),
            inserts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn inserted(&self) -> Vec<Registration> {
        self.inserts.lock().unwrap().clone()
    }

    fn tick(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.lookups_fail {
            anyhow::bail!("connection reset by peer");
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationsRepository for MockRepo {
    async fn find_event_by_id(&self, id: Uuid) -> anyhow::Result<Option<EventSummary>> {
        self.tick()?;
        Ok(self.event_exists.then(|| EventSummary {
            id,
            name: "RustConf".into(),
            date: Utc::now(),
            location: "Main Hall".into(),
            organizer_id: Uuid::new_v4(),
        }))
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserSummary>> {
        self.tick()?;
        Ok(self.user_exists.then(|| UserSummary {
            id,
            username: "alice".into(),
            email: "alice@example.com".into(),
            role: UserRole::Attendee,
        }))
    }

    async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Registration>> {
        self.tick()?;
        let now = Utc::now();
        Ok(self.already_registered.then(|| Registration {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn insert_registration(&self, r: Registration) -> Result<(), InsertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.insert_outcome {
            InsertOutcome::Ok => {
                self.inserts.lock().unwrap().push(r);
                Ok(())
            }
            InsertOutcome::Duplicate => Err(InsertError::Duplicate),
            InsertOutcome::Fail => Err(anyhow::anyhow!("disk I/O error").into()),
        }
    }

    async fn list_registrations_with_event_and_user(
        &self,
    ) -> anyhow::Result<Vec<RegistrationDetails>> {
        self.tick()?;
        Ok(Vec::new())
    }
}

fn service(repo: &Arc<MockRepo>) -> Service {
    Service::new(repo.clone())
}

fn valid_request() -> NewRegistration {
    NewRegistration::new(EVENT_ID, USER_ID)
}

#[tokio::test]
async fn success_inserts_exactly_once() {
    let repo = Arc::new(MockRepo::happy());
    let created = service(&repo).register(valid_request()).await.unwrap();

    assert_eq!(created.event_id.to_string(), EVENT_ID);
    assert_eq!(created.user_id.to_string(), USER_ID);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(repo.inserted(), vec![created]);
    // event, user, existing registration, insert
    assert_eq!(repo.calls(), 4);
}

#[tokio::test]
async fn invalid_input_does_no_io() {
    let cases = [
        NewRegistration::default(),
        NewRegistration::new("", USER_ID),
        NewRegistration::new(EVENT_ID, "abc"),
        // version 1 uuid
        NewRegistration::new("6fa459ea-ee8a-1ca4-894e-db77e160355e", USER_ID),
    ];
    for req in cases {
        let repo = Arc::new(MockRepo::happy());
        let err = service(&repo).register(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }), "{err:?}");
        assert_eq!(repo.calls(), 0);
    }
}

#[tokio::test]
async fn validation_wins_over_missing_entities() {
    let repo = Arc::new(MockRepo {
        event_exists: false,
        user_exists: false,
        ..MockRepo::happy()
    });
    let err = service(&repo)
        .register(NewRegistration::new(EVENT_ID, "bad"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn missing_event_short_circuits() {
    let repo = Arc::new(MockRepo {
        event_exists: false,
        user_exists: false,
        ..MockRepo::happy()
    });
    let err = service(&repo).register(valid_request()).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity: EntityKind::Event,
            ..
        }
    ));
    assert_eq!(repo.calls(), 1);
    assert!(repo.inserted().is_empty());
}

#[tokio::test]
async fn missing_user_stops_before_duplicate_check() {
    let repo = Arc::new(MockRepo {
        user_exists: false,
        already_registered: true,
        ..MockRepo::happy()
    });
    let err = service(&repo).register(valid_request()).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity: EntityKind::User,
            ..
        }
    ));
    assert_eq!(repo.calls(), 2);
}

#[tokio::test]
async fn existing_registration_conflicts_without_insert() {
    let repo = Arc::new(MockRepo {
        already_registered: true,
        ..MockRepo::happy()
    });
    let err = service(&repo).register(valid_request()).await.unwrap_err();

    assert!(matches!(err, DomainError::AlreadyRegistered { .. }));
    assert_eq!(repo.calls(), 3);
    assert!(repo.inserted().is_empty());
}

#[tokio::test]
async fn losing_the_insert_race_is_a_conflict() {
    let repo = Arc::new(MockRepo {
        insert_outcome: InsertOutcome::Duplicate,
        ..MockRepo::happy()
    });
    let err = service(&repo).register(valid_request()).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyRegistered { .. }));
}

#[tokio::test]
async fn storage_failures_are_internal() {
    let repo = Arc::new(MockRepo {
        insert_outcome: InsertOutcome::Fail,
        ..MockRepo::happy()
    });
    let err = service(&repo).register(valid_request()).await.unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));

    let repo = Arc::new(MockRepo {
        lookups_fail: true,
        ..MockRepo::happy()
    });
    let svc = service(&repo);
    assert!(matches!(
        svc.register(valid_request()).await.unwrap_err(),
        DomainError::Database { .. }
    ));
    assert!(matches!(
        svc.list_registrations().await.unwrap_err(),
        DomainError::Database { .. }
    ));
}

#[tokio::test]
async fn generated_ids_are_unique_v4() {
    let repo = Arc::new(MockRepo::happy());
    let svc = service(&repo);
    let a = svc.register(valid_request()).await.unwrap();
    let b = svc.register(valid_request()).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.id.get_version_num(), 4);
    assert_eq!(b.id.get_version_num(), 4);
}

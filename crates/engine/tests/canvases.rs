use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter};

use engine::{
    CanvasFilter, CanvasUpdate, Engine, EngineError, MemberRef, NewCanvas, NewInvitation,
    NewMember, SettingsUpdate, UserIdentity, canvas_invitations, canvas_members,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn user(engine: &Engine, email: &str) -> i32 {
    engine.create_user(email, None, None).await.unwrap().id
}

#[tokio::test]
async fn create_canvas_makes_the_creator_its_only_owner() {
    let (engine, db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    let (canvas, member) = engine
        .create_canvas(alice, NewCanvas::new("Family"))
        .await
        .unwrap();
    assert_eq!(canvas.name, "Family");
    assert_eq!(canvas.created_by, Some(alice));
    assert!(member.is_owner);

    let rows = canvas_members::Entity::find()
        .filter(canvas_members::Column::CanvasId.eq(canvas.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, alice);
    assert!(rows[0].is_owner);
    assert!(rows[0].role_id.is_some());

    let usd = engine.currency_by_code("usd").await.unwrap();
    assert_eq!(member.base_currency_id, usd.id);
}

#[tokio::test]
async fn blank_canvas_name_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    let err = engine
        .create_canvas(alice, NewCanvas::new("   "))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("canvas name is required".to_string())
    );
}

#[tokio::test]
async fn base_currency_follows_request_then_user_settings() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let eur = engine.currency_by_code("EUR").await.unwrap();
    let gbp = engine.currency_by_code("GBP").await.unwrap();

    engine
        .update_user_settings(
            alice,
            SettingsUpdate {
                default_currency_id: Some(Some(eur.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (_, from_settings) = engine
        .create_canvas(alice, NewCanvas::new("Home"))
        .await
        .unwrap();
    assert_eq!(from_settings.base_currency_id, eur.id);

    let (_, requested) = engine
        .create_canvas(alice, NewCanvas::new("Travel").base_currency_id(gbp.id))
        .await
        .unwrap();
    assert_eq!(requested.base_currency_id, gbp.id);

    let err = engine
        .create_canvas(alice, NewCanvas::new("Broken").base_currency_id(9999))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidId(_)));
}

#[tokio::test]
async fn non_members_are_denied_and_missing_canvases_are_not_found() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;
    let (canvas, _) = engine
        .create_canvas(alice, NewCanvas::new("Private"))
        .await
        .unwrap();

    assert_eq!(
        engine.canvas(bob, canvas.id).await.unwrap_err(),
        EngineError::Forbidden("Access denied".to_string())
    );
    assert_eq!(
        engine.canvas(alice, canvas.id + 100).await.unwrap_err(),
        EngineError::KeyNotFound("Canvas not found".to_string())
    );
    assert!(!engine.is_canvas_member(canvas.id, bob).await.unwrap());
    assert!(engine.is_canvas_member(canvas.id, alice).await.unwrap());
    assert!(!engine.is_canvas_member(canvas.id + 100, alice).await.unwrap());
}

#[tokio::test]
async fn update_canvas_changes_only_supplied_fields() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let (canvas, _) = engine
        .create_canvas(
            alice,
            NewCanvas {
                name: "Family".to_string(),
                description: Some("shared budget".to_string()),
                canvas_type: Some("family".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = engine
        .update_canvas(
            alice,
            canvas.id,
            CanvasUpdate {
                name: Some("Household".to_string()),
                canvas_type: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Household");
    assert_eq!(updated.description.as_deref(), Some("shared budget"));
    assert_eq!(updated.canvas_type, None);
    assert_eq!(updated.last_modified_by, Some(alice));
}

#[tokio::test]
async fn archived_canvases_stay_listed_unless_filtered() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let (active, _) = engine
        .create_canvas(alice, NewCanvas::new("Active"))
        .await
        .unwrap();
    let (old, _) = engine
        .create_canvas(alice, NewCanvas::new("Old"))
        .await
        .unwrap();
    engine.archive_canvas(alice, old.id).await.unwrap();

    let all = engine
        .list_canvases(alice, CanvasFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|item| item.is_owner));

    let archived = engine
        .list_canvases(alice, CanvasFilter { archived: Some(true) })
        .await
        .unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].canvas.id, old.id);

    let live = engine
        .list_canvases(alice, CanvasFilter { archived: Some(false) })
        .await
        .unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].canvas.id, active.id);

    let still_there = engine.canvas(alice, old.id).await.unwrap();
    assert!(still_there.canvas.is_archived);
}

#[tokio::test]
async fn only_the_owner_manages_members_and_the_owner_stays() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;
    let carol = user(&engine, "carol@example.com").await;
    let (canvas, owner) = engine
        .create_canvas(alice, NewCanvas::new("Family"))
        .await
        .unwrap();

    let (member, created) = engine
        .upsert_canvas_member(
            alice,
            canvas.id,
            NewMember {
                user: MemberRef::Email(" BOB@example.com ".to_string()),
                role_id: None,
                base_currency_id: None,
            },
        )
        .await
        .unwrap();
    assert!(created);
    assert_eq!(member.user_id, bob);
    assert!(!member.is_owner);
    assert_eq!(member.base_currency_id, owner.base_currency_id);

    let eur = engine.currency_by_code("EUR").await.unwrap();
    let (member, created) = engine
        .upsert_canvas_member(
            alice,
            canvas.id,
            NewMember {
                user: MemberRef::Id(bob),
                role_id: None,
                base_currency_id: Some(eur.id),
            },
        )
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(member.base_currency_id, eur.id);

    let err = engine
        .upsert_canvas_member(
            bob,
            canvas.id,
            NewMember {
                user: MemberRef::Id(carol),
                role_id: None,
                base_currency_id: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Forbidden("Access denied".to_string()));

    let err = engine
        .update_canvas(
            bob,
            canvas.id,
            CanvasUpdate {
                name: Some("Mine".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Forbidden("Access denied".to_string()));

    let members = engine.canvas_members(bob, canvas.id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].user.email, "alice@example.com");

    let err = engine
        .remove_canvas_member(alice, canvas.id, alice)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("the canvas owner cannot be removed".to_string())
    );

    engine
        .remove_canvas_member(alice, canvas.id, bob)
        .await
        .unwrap();
    assert!(!engine.is_canvas_member(canvas.id, bob).await.unwrap());
}

#[tokio::test]
async fn resolve_user_links_existing_email_then_reuses_subject() {
    let (engine, _db) = engine_with_db().await;
    let existing = engine
        .create_user("dana@example.com", Some("Dana"), None)
        .await
        .unwrap();

    let identity = UserIdentity {
        external_id: "subject-1".to_string(),
        email: "Dana@Example.com".to_string(),
        first_name: None,
        last_name: None,
        email_verified: true,
    };
    let linked = engine.resolve_user(identity.clone()).await.unwrap();
    assert_eq!(linked.id, existing.id);
    assert_eq!(linked.external_id.as_deref(), Some("subject-1"));
    assert!(linked.email_verified);

    let again = engine.resolve_user(identity).await.unwrap();
    assert_eq!(again.id, existing.id);

    let fresh = engine
        .resolve_user(UserIdentity {
            external_id: "subject-2".to_string(),
            email: "erin@example.com".to_string(),
            first_name: Some("Erin".to_string()),
            last_name: None,
            email_verified: false,
        })
        .await
        .unwrap();
    assert_ne!(fresh.id, existing.id);
    assert_eq!(fresh.first_name.as_deref(), Some("Erin"));
}

#[tokio::test]
async fn duplicate_emails_surface_as_existing_key() {
    let (engine, _db) = engine_with_db().await;
    user(&engine, "alice@example.com").await;

    let err = engine
        .create_user("alice@example.com", None, None)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("alice@example.com".to_string()));
}

#[tokio::test]
async fn settings_are_created_with_defaults_on_first_read() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    let settings = engine.user_settings(alice).await.unwrap();
    assert_eq!(settings.timezone, "UTC");
    assert_eq!(settings.default_currency_id, None);
    assert!(settings.notification_enabled);

    let updated = engine
        .update_user_settings(
            alice,
            SettingsUpdate {
                theme: Some("dark".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, settings.id);
    assert_eq!(updated.theme, "dark");
    assert_eq!(updated.language, settings.language);
}

fn invitation(email: &str, token: &str) -> NewInvitation {
    NewInvitation {
        email: email.to_string(),
        role_id: None,
        token: token.to_string(),
        expires_at: Utc::now() + Duration::days(7),
    }
}

#[tokio::test]
async fn invitations_are_accepted_once_by_the_invited_address() {
    let (engine, db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;
    let carol = user(&engine, "carol@example.com").await;
    let (canvas, owner) = engine
        .create_canvas(alice, NewCanvas::new("Family"))
        .await
        .unwrap();

    let err = engine
        .create_invitation(bob, canvas.id, invitation("carol@example.com", "t-0"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Forbidden("Access denied".to_string()));

    let sent = engine
        .create_invitation(alice, canvas.id, invitation(" Bob@Example.com ", "t-1"))
        .await
        .unwrap();
    assert_eq!(sent.invitee_email, "bob@example.com");
    assert_eq!(sent.status, canvas_invitations::STATUS_PENDING);
    assert_eq!(
        engine.canvas_invitations(alice, canvas.id).await.unwrap().len(),
        1
    );

    let err = engine.accept_invitation(carol, "t-1").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let member = engine.accept_invitation(bob, "t-1").await.unwrap();
    assert_eq!(member.canvas_id, canvas.id);
    assert!(!member.is_owner);
    assert_eq!(member.base_currency_id, owner.base_currency_id);
    assert!(engine.is_canvas_member(canvas.id, bob).await.unwrap());

    let stored = canvas_invitations::Entity::find_by_id(sent.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, canvas_invitations::STATUS_ACCEPTED);
    assert!(stored.accepted_at.is_some());

    assert_eq!(
        engine.accept_invitation(bob, "t-1").await.unwrap_err(),
        EngineError::KeyNotFound("Invitation not found".to_string())
    );

    let err = engine
        .create_invitation(alice, canvas.id, invitation("bob@example.com", "t-2"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn expired_invitations_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;
    let (canvas, _) = engine
        .create_canvas(alice, NewCanvas::new("Family"))
        .await
        .unwrap();

    let mut stale = invitation("bob@example.com", "old");
    stale.expires_at = Utc::now() - Duration::hours(1);
    engine
        .create_invitation(alice, canvas.id, stale)
        .await
        .unwrap();

    let err = engine.accept_invitation(bob, "old").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("invitation has expired".to_string())
    );
    assert!(!engine.is_canvas_member(canvas.id, bob).await.unwrap());
}

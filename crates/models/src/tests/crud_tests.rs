use anyhow::Result;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::comment::{self, CommentStatus, NewComment};
use crate::db::connect_in_memory;
use crate::{bookmark, history, user, user_permission};

fn new_comment(user_id: i32, text: &str, parent_id: Option<i32>) -> NewComment {
    NewComment {
        user_id,
        object_id: "Product".into(),
        model_id: "42".into(),
        text: text.into(),
        parent_id,
        status: CommentStatus::Approve,
    }
}

#[tokio::test]
async fn comment_create_find_update_delete() -> Result<()> {
    let db = connect_in_memory().await?;
    let author = user::create(&db, "ann@example.com", "Ann", "Lee").await?;

    let created = comment::create(&db, new_comment(author.id, "first!", None)).await?;
    assert_eq!(created.status(), CommentStatus::Approve);
    assert_eq!(created.parent_id, None);

    let found = comment::Entity::find_by_id(created.id).one(&db).await?.expect("comment exists");
    assert_eq!(found.text, "first!");

    let mut am: comment::ActiveModel = found.into();
    am.status = Set(CommentStatus::Banned.as_str().into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.status(), CommentStatus::Banned);

    comment::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(comment::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn comment_with_blank_text_is_rejected_before_insert() -> Result<()> {
    let db = connect_in_memory().await?;
    let author = user::create(&db, "bob@example.com", "Bob", "Ray").await?;
    let err = comment::create(&db, new_comment(author.id, "   ", None)).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Validation(_)));
    assert!(comment::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_a_root_removes_its_replies() -> Result<()> {
    let db = connect_in_memory().await?;
    let author = user::create(&db, "cy@example.com", "Cy", "Doe").await?;
    let root = comment::create(&db, new_comment(author.id, "root", None)).await?;
    let reply = comment::create(&db, new_comment(author.id, "reply", Some(root.id))).await?;

    comment::Entity::delete_by_id(root.id).exec(&db).await?;
    assert!(comment::Entity::find_by_id(reply.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn bookmark_exists_only_for_its_owner() -> Result<()> {
    let db = connect_in_memory().await?;
    let ann = user::create(&db, "ann2@example.com", "Ann", "Lee").await?;
    let bob = user::create(&db, "bob2@example.com", "Bob", "Ray").await?;
    let c = comment::create(&db, new_comment(ann.id, "save me", None)).await?;

    bookmark::create(&db, bob.id, c.id).await?;
    assert!(bookmark::exists(&db, bob.id, c.id).await?);
    assert!(!bookmark::exists(&db, ann.id, c.id).await?);
    Ok(())
}

#[tokio::test]
async fn permissions_are_listed_per_user() -> Result<()> {
    let db = connect_in_memory().await?;
    let admin = user::create(&db, "root@example.com", "Root", "Admin").await?;
    user_permission::grant(&db, admin.id, "comment show").await?;
    user_permission::grant(&db, admin.id, "comment edit").await?;

    let mut names = user_permission::names_for_user(&db, admin.id).await?;
    names.sort();
    assert_eq!(names, vec!["comment edit".to_string(), "comment show".to_string()]);

    // unique (user, permission)
    assert!(user_permission::grant(&db, admin.id, "comment edit").await.is_err());
    Ok(())
}

#[tokio::test]
async fn history_is_appended_in_order() -> Result<()> {
    let db = connect_in_memory().await?;
    for action in ["create", "edit", "delete"] {
        history::append(&db, history::NewHistory {
            user_id: Some(1),
            ip: Some("10.0.0.1".into()),
            action: action.into(),
            entity_type: "Comment".into(),
            entity_id: Some(7),
            entity_name: None,
        })
        .await?;
    }
    let rows = history::for_entity(&db, "Comment", 7).await?;
    let actions: Vec<_> = rows.iter().map(|r| r.action.as_str()).collect();
    assert_eq!(actions, ["create", "edit", "delete"]);
    assert!(history::for_entity(&db, "Comment", 8).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn history_requires_action() -> Result<()> {
    let db = connect_in_memory().await?;
    let res = history::append(&db, history::NewHistory { entity_type: "Comment".into(), ..Default::default() }).await;
    assert!(res.is_err());
    Ok(())
}

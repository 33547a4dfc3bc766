use crate::{client, manager, service_profile};
use crate::client::ClientFields;
use sea_orm::EntityTrait;
use anyhow::Result;
use uuid::Uuid;

use super::setup_test_db;

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4())
}

/// Test service profile create/list
#[tokio::test]
async fn test_service_profile_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()); };

    let name = unique("profile");
    let created = service_profile::create(&db, &format!("  {}  ", name)).await?;
    assert_eq!(created.name, name);

    let all = service_profile::list(&db).await?;
    assert!(all.iter().any(|p| p.id == created.id));

    // Blank names never reach the database
    assert!(service_profile::create(&db, "   ").await.is_err());

    service_profile::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

/// Test manager create/update/delete
#[tokio::test]
async fn test_manager_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()); };

    let p1 = service_profile::create(&db, &unique("mgr_profile_a")).await?;
    let p2 = service_profile::create(&db, &unique("mgr_profile_b")).await?;

    let m = manager::create(&db, "Anna Smirnova", p1.id).await?;
    assert_eq!(m.service_profile_id, p1.id);

    let updated = manager::update(&db, m.id, "Anna S.", p2.id).await?.unwrap();
    assert_eq!(updated.full_name, "Anna S.");
    assert_eq!(updated.service_profile_id, p2.id);

    assert!(manager::update(&db, -1, "Nobody", p2.id).await?.is_none());

    manager::Entity::delete_by_id(m.id).exec(&db).await?;
    let after = manager::Entity::find_by_id(m.id).one(&db).await?;
    assert!(after.is_none());

    service_profile::Entity::delete_by_id(p1.id).exec(&db).await?;
    service_profile::Entity::delete_by_id(p2.id).exec(&db).await?;
    Ok(())
}

/// Test client CRUD, per-manager counting and reassignment
#[tokio::test]
async fn test_client_crud_and_count() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()); };

    let p = service_profile::create(&db, &unique("client_profile")).await?;
    let m = manager::create(&db, "Oleg Ivanov", p.id).await?;
    let other = manager::create(&db, "Maria Orlova", p.id).await?;

    let a = client::create(&db, ClientFields {
        company_name: "Alpha".into(),
        legal_form: "LLC".into(),
        service_profile_id: p.id,
        assigned_manager_id: Some(m.id),
    }).await?;
    let b = client::create(&db, ClientFields {
        company_name: "Beta".into(),
        legal_form: "JSC".into(),
        service_profile_id: p.id,
        assigned_manager_id: Some(m.id),
    }).await?;

    assert_eq!(client::count_by_manager(&db, m.id, None).await?, 2);
    assert_eq!(client::count_by_manager(&db, m.id, Some(a.id)).await?, 1);

    let listed = client::list_by_manager(&db, m.id).await?;
    assert_eq!(listed.iter().map(|c| c.id).collect::<Vec<_>>(), vec![a.id, b.id]);

    let moved = client::reassign(&db, b.id, other.id, None).await?.unwrap();
    assert_eq!(moved.assigned_manager_id, Some(other.id));
    assert_eq!(client::count_by_manager(&db, m.id, None).await?, 1);

    let rewritten = client::update(&db, a.id, ClientFields {
        company_name: "Alpha Group".into(),
        legal_form: "PLC".into(),
        service_profile_id: p.id,
        assigned_manager_id: None,
    }).await?.unwrap();
    assert_eq!(rewritten.company_name, "Alpha Group");
    assert_eq!(rewritten.assigned_manager_id, None);

    // Deleting a manager detaches its clients via ON DELETE SET NULL
    manager::Entity::delete_by_id(other.id).exec(&db).await?;
    let b_after = client::Entity::find_by_id(b.id).one(&db).await?.unwrap();
    assert_eq!(b_after.assigned_manager_id, None);

    client::Entity::delete_by_id(a.id).exec(&db).await?;
    client::Entity::delete_by_id(b.id).exec(&db).await?;
    manager::Entity::delete_by_id(m.id).exec(&db).await?;
    service_profile::Entity::delete_by_id(p.id).exec(&db).await?;
    Ok(())
}

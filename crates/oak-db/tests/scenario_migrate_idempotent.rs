/// Migrating twice on a clean database must be idempotent, and a migrated
/// database must report a healthy status with the menu schema present.
#[tokio::test]
async fn migrate_idempotent_on_clean_db() -> anyhow::Result<()> {
    let pool = oak_db::connect_in_memory().await?;

    oak_db::migrate(&pool).await?;
    oak_db::migrate(&pool).await?;

    let s = oak_db::status(&pool).await?;
    assert!(s.ok);
    assert!(s.has_menu_table);

    Ok(())
}

/// A fresh, unmigrated database answers queries but has no schema yet.
#[tokio::test]
async fn status_reports_missing_schema_before_migrate() -> anyhow::Result<()> {
    let pool = oak_db::connect_in_memory().await?;

    let s = oak_db::status(&pool).await?;
    assert!(s.ok);
    assert!(!s.has_menu_table);

    Ok(())
}

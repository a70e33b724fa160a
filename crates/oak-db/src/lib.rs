//! Storage gateway for the Oak Donuts point of sale.
//!
//! One embedded SQLite database behind a shared sqlx pool.  Migrations are
//! embedded in the binary and idempotent; run [`migrate`] before first use.
//! Repositories are plain async functions over plain row structs — no ORM,
//! no global connection state: callers construct a pool once and pass it
//! down.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

use oak_checkout::{OrderDraft, OrderStore};

mod import;
pub use import::{import_menu_csv, MenuImportReport};

// The connection handle callers pass around; re-exported so front ends do
// not need a direct sqlx dependency.
pub use sqlx::SqlitePool as Pool;

pub const ENV_DB_URL: &str = "OAK_DATABASE_URL";

/// Local database file, created on demand next to the working directory.
const DEFAULT_DB_URL: &str = "sqlite:oakdonuts.db";

/// Connect using OAK_DATABASE_URL, falling back to a local `oakdonuts.db`
/// created on first run.
pub async fn connect_from_env() -> Result<SqlitePool> {
    let url = std::env::var(ENV_DB_URL).unwrap_or_else(|_| DEFAULT_DB_URL.to_string());
    connect(&url).await
}

/// Open (and if missing, create) the database at `url`.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("invalid database url: {url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    // One connection: this is a single-terminal system with one writer, and
    // it keeps `sqlite::memory:` databases alive across acquires in tests.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .with_context(|| format!("failed to open database: {url}"))?;

    Ok(pool)
}

/// Fresh in-memory database. Used by tests; migrations still apply.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    connect("sqlite::memory:").await
}

/// Run embedded migrations. Idempotent.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("db migrate failed")?;
    Ok(())
}

/// Simple status query (connectivity + schema presence).
pub async fn status(pool: &SqlitePool) -> Result<DbStatus> {
    let (one,): (i64,) = sqlx::query_as("select 1")
        .fetch_one(pool)
        .await
        .context("status connectivity query failed")?;

    let (tables,): (i64,) = sqlx::query_as(
        "select count(*) from sqlite_master where type = 'table' and name = 'menu_items'",
    )
    .fetch_one(pool)
    .await
    .context("status table-exists query failed")?;

    Ok(DbStatus {
        ok: one == 1,
        has_menu_table: tables > 0,
    })
}

#[derive(Debug, Clone)]
pub struct DbStatus {
    pub ok: bool,
    pub has_menu_table: bool,
}

// ---------------------------------------------------------------------------
// Menu repository
// ---------------------------------------------------------------------------

/// A menu item to insert. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub name: String,
    pub price_micros: i64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemRow {
    pub menu_item_id: i64,
    pub name: String,
    pub price_micros: i64,
    pub category: String,
}

fn check_menu_fields(name: &str, price_micros: i64) -> Result<()> {
    if name.trim().is_empty() {
        bail!("menu item name must not be blank");
    }
    if price_micros < 0 {
        bail!("menu item price must be non-negative");
    }
    Ok(())
}

/// Insert a menu item and return the storage-assigned id.
pub async fn insert_menu_item(pool: &SqlitePool, item: &NewMenuItem) -> Result<i64> {
    check_menu_fields(&item.name, item.price_micros)?;

    let res = sqlx::query(
        r#"
        insert into menu_items (name, price_micros, category)
        values ($1, $2, $3)
        "#,
    )
    .bind(&item.name)
    .bind(item.price_micros)
    .bind(&item.category)
    .execute(pool)
    .await
    .context("insert_menu_item failed")?;

    Ok(res.last_insert_rowid())
}

pub async fn fetch_menu_item(pool: &SqlitePool, menu_item_id: i64) -> Result<Option<MenuItemRow>> {
    let row = sqlx::query(
        r#"
        select menu_item_id, name, price_micros, category
        from menu_items
        where menu_item_id = $1
        "#,
    )
    .bind(menu_item_id)
    .fetch_optional(pool)
    .await
    .context("fetch_menu_item failed")?;

    row.map(|r| menu_item_from_row(&r)).transpose()
}

/// All menu items in insertion order.
pub async fn fetch_menu_items(pool: &SqlitePool) -> Result<Vec<MenuItemRow>> {
    let rows = sqlx::query(
        r#"
        select menu_item_id, name, price_micros, category
        from menu_items
        order by menu_item_id asc
        "#,
    )
    .fetch_all(pool)
    .await
    .context("fetch_menu_items failed")?;

    rows.iter().map(menu_item_from_row).collect()
}

fn menu_item_from_row(row: &SqliteRow) -> Result<MenuItemRow> {
    Ok(MenuItemRow {
        menu_item_id: row.try_get("menu_item_id")?,
        name: row.try_get("name")?,
        price_micros: row.try_get("price_micros")?,
        category: row.try_get("category")?,
    })
}

/// Full replace of the row matching `item.menu_item_id`.
/// Returns `false` when no such row exists.
pub async fn update_menu_item(pool: &SqlitePool, item: &MenuItemRow) -> Result<bool> {
    check_menu_fields(&item.name, item.price_micros)?;

    let res = sqlx::query(
        r#"
        update menu_items
        set name = $1, price_micros = $2, category = $3
        where menu_item_id = $4
        "#,
    )
    .bind(&item.name)
    .bind(item.price_micros)
    .bind(&item.category)
    .bind(item.menu_item_id)
    .execute(pool)
    .await
    .context("update_menu_item failed")?;

    Ok(res.rows_affected() > 0)
}

/// Idempotent delete. Returns `false` when the id was already absent.
pub async fn delete_menu_item(pool: &SqlitePool, menu_item_id: i64) -> Result<bool> {
    let res = sqlx::query("delete from menu_items where menu_item_id = $1")
        .bind(menu_item_id)
        .execute(pool)
        .await
        .context("delete_menu_item failed")?;

    Ok(res.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Order repository (append-only)
// ---------------------------------------------------------------------------

/// An order to insert. The id is assigned by storage; `placed_at` and
/// `item_summary` are stored verbatim as the workflow supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub total_micros: i64,
    pub placed_at: String,
    pub item_summary: String,
    pub lines: Vec<NewOrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price_micros: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order_id: i64,
    pub total_micros: i64,
    pub placed_at: String,
    pub item_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRow {
    pub order_id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price_micros: i64,
}

/// Insert one order with its lines in a single transaction.
///
/// Orders are append-only: there is no update or delete. If any line fails
/// (constraint violation, connection loss) the whole order is rolled back —
/// history never contains a partial order.
pub async fn insert_order(pool: &SqlitePool, order: &NewOrder) -> Result<i64> {
    let mut tx = pool.begin().await.context("insert_order begin failed")?;

    let res = sqlx::query(
        r#"
        insert into orders (total_micros, placed_at, item_summary)
        values ($1, $2, $3)
        "#,
    )
    .bind(order.total_micros)
    .bind(&order.placed_at)
    .bind(&order.item_summary)
    .execute(&mut *tx)
    .await
    .context("insert_order order row failed")?;

    let order_id = res.last_insert_rowid();

    for line in &order.lines {
        sqlx::query(
            r#"
            insert into order_lines (order_id, menu_item_id, name, quantity, unit_price_micros)
            values ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order_id)
        .bind(line.menu_item_id)
        .bind(&line.name)
        .bind(line.quantity)
        .bind(line.unit_price_micros)
        .execute(&mut *tx)
        .await
        .context("insert_order line row failed")?;
    }

    tx.commit().await.context("insert_order commit failed")?;
    Ok(order_id)
}

/// All orders in insertion order.
pub async fn fetch_orders(pool: &SqlitePool) -> Result<Vec<OrderRow>> {
    let rows = sqlx::query(
        r#"
        select order_id, total_micros, placed_at, item_summary
        from orders
        order by order_id asc
        "#,
    )
    .fetch_all(pool)
    .await
    .context("fetch_orders failed")?;

    rows.iter().map(order_from_row).collect()
}

pub async fn fetch_order(pool: &SqlitePool, order_id: i64) -> Result<Option<OrderRow>> {
    let row = sqlx::query(
        r#"
        select order_id, total_micros, placed_at, item_summary
        from orders
        where order_id = $1
        "#,
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await
    .context("fetch_order failed")?;

    row.map(|r| order_from_row(&r)).transpose()
}

fn order_from_row(row: &SqliteRow) -> Result<OrderRow> {
    Ok(OrderRow {
        order_id: row.try_get("order_id")?,
        total_micros: row.try_get("total_micros")?,
        placed_at: row.try_get("placed_at")?,
        item_summary: row.try_get("item_summary")?,
    })
}

/// Structured lines of one order, in the order they were written.
pub async fn fetch_order_lines(pool: &SqlitePool, order_id: i64) -> Result<Vec<OrderLineRow>> {
    let rows = sqlx::query(
        r#"
        select order_id, menu_item_id, name, quantity, unit_price_micros
        from order_lines
        where order_id = $1
        order by rowid asc
        "#,
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
    .context("fetch_order_lines failed")?;

    rows.iter()
        .map(|r| {
            Ok(OrderLineRow {
                order_id: r.try_get("order_id")?,
                menu_item_id: r.try_get("menu_item_id")?,
                name: r.try_get("name")?,
                quantity: r.try_get("quantity")?,
                unit_price_micros: r.try_get("unit_price_micros")?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Checkout storage port
// ---------------------------------------------------------------------------

/// The live storage behind checkout: one order row plus its lines,
/// all-or-nothing.
pub struct SqliteOrderStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SqliteOrderStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore<'_> {
    async fn record_order(&self, draft: &OrderDraft) -> Result<i64> {
        let order = NewOrder {
            total_micros: draft.total.raw(),
            placed_at: draft.placed_at.clone(),
            item_summary: draft.item_summary.clone(),
            lines: draft
                .lines
                .iter()
                .map(|l| NewOrderLine {
                    menu_item_id: l.menu_item_id,
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price_micros: l.unit_price.raw(),
                })
                .collect(),
        };
        insert_order(self.pool, &order).await
    }
}

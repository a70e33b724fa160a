//! Menu management commands.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::fs::File;
use tracing::warn;

use oak_checkout::Micros;
use oak_db::{MenuItemRow, NewMenuItem, Pool};

#[derive(Subcommand)]
pub enum MenuCmd {
    /// Print the menu in insertion order
    List,

    /// Insert a new menu item (the id is assigned by the database)
    Add {
        #[arg(long)]
        name: String,

        /// Decimal price, e.g. 1.50
        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        category: String,
    },

    /// Replace all fields of an existing item
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: String,

        /// Decimal price, e.g. 1.50
        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        category: String,
    },

    /// Delete an item (no-op when already absent)
    Delete {
        #[arg(long)]
        id: i64,
    },

    /// Bulk-load items from a name,price,category CSV
    Import {
        #[arg(long)]
        csv: String,
    },
}

pub async fn run(pool: &Pool, cmd: MenuCmd) -> Result<()> {
    match cmd {
        MenuCmd::List => {
            for item in oak_db::fetch_menu_items(pool).await? {
                println!(
                    "{:>4}  {:<24}  {:>8}  {}",
                    item.menu_item_id,
                    item.name,
                    Micros::new(item.price_micros).to_string(),
                    item.category
                );
            }
        }

        MenuCmd::Add {
            name,
            price,
            category,
        } => {
            let price = Micros::parse_decimal(&price)?;
            let id = oak_db::insert_menu_item(
                pool,
                &NewMenuItem {
                    name,
                    price_micros: price.raw(),
                    category,
                },
            )
            .await?;
            println!("menu_item_id={id} inserted=true");
        }

        MenuCmd::Update {
            id,
            name,
            price,
            category,
        } => {
            let price = Micros::parse_decimal(&price)?;
            let updated = oak_db::update_menu_item(
                pool,
                &MenuItemRow {
                    menu_item_id: id,
                    name,
                    price_micros: price.raw(),
                    category,
                },
            )
            .await?;
            if !updated {
                bail!("menu item {id} not found");
            }
            println!("menu_item_id={id} updated=true");
        }

        MenuCmd::Delete { id } => {
            let deleted = oak_db::delete_menu_item(pool, id).await?;
            println!("menu_item_id={id} deleted={deleted}");
        }

        MenuCmd::Import { csv } => {
            let file =
                File::open(&csv).with_context(|| format!("failed to open csv: {csv}"))?;
            let report = oak_db::import_menu_csv(pool, file).await?;
            for line in &report.sample_rejects {
                warn!("rejected {line}");
            }
            println!(
                "rows_ok={} rows_rejected={}",
                report.rows_ok, report.rows_rejected
            );
        }
    }

    Ok(())
}

//! Order taking and history commands.
//!
//! `place` is the terminal's checkout flow: resolve each `--line` against
//! the live menu, snapshot name/price into the cart (duplicate ids merge),
//! commit through the workflow, and print the receipt.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use tracing::info;

use oak_checkout::{place_order, Cart, Micros, PlacedOrder};
use oak_config::StoreConfig;
use oak_db::Pool;

#[derive(Subcommand)]
pub enum OrderCmd {
    /// Print order history in insertion order
    List,

    /// Print one order with its line items
    Show {
        #[arg(long)]
        id: i64,
    },

    /// Assemble a cart and place the order
    Place {
        /// Cart line as <menu_id>:<qty> (a bare <menu_id> means quantity 1);
        /// repeatable, duplicate ids merge into one line
        #[arg(long = "line")]
        lines: Vec<String>,
    },
}

pub async fn run(pool: &Pool, config: &StoreConfig, cmd: OrderCmd) -> Result<()> {
    match cmd {
        OrderCmd::List => {
            for o in oak_db::fetch_orders(pool).await? {
                println!(
                    "{:>4}  {:>8}  {}  {}",
                    o.order_id,
                    Micros::new(o.total_micros).to_string(),
                    o.placed_at,
                    o.item_summary
                );
            }
        }

        OrderCmd::Show { id } => {
            let order = oak_db::fetch_order(pool, id)
                .await?
                .with_context(|| format!("order {id} not found"))?;
            println!("order_id={}", order.order_id);
            println!("placed_at={}", order.placed_at);
            println!("total={}", Micros::new(order.total_micros));
            println!("items={}", order.item_summary);
            for line in oak_db::fetch_order_lines(pool, id).await? {
                println!(
                    "  {:<24} x{:<4} @ {}",
                    line.name,
                    line.quantity,
                    Micros::new(line.unit_price_micros)
                );
            }
        }

        OrderCmd::Place { lines } => {
            let mut cart = Cart::new();
            for raw in &lines {
                let (menu_id, qty) = parse_cart_line(raw)?;
                let item = oak_db::fetch_menu_item(pool, menu_id)
                    .await?
                    .with_context(|| format!("menu item {menu_id} not found"))?;
                cart.add_line(
                    item.menu_item_id,
                    &item.name,
                    Micros::new(item.price_micros),
                    qty,
                )?;
            }

            let store = oak_db::SqliteOrderStore::new(pool);
            let placed = place_order(&mut cart, &store, Local::now().naive_local()).await?;
            info!(order_id = placed.order_id, "order placed");
            print_receipt(config, &placed);
        }
    }

    Ok(())
}

/// Parse a "<menu_id>:<qty>" cart line; a bare "<menu_id>" means quantity 1.
fn parse_cart_line(raw: &str) -> Result<(i64, i64)> {
    let (id_str, qty_str) = match raw.split_once(':') {
        Some((id, qty)) => (id, qty),
        None => (raw, "1"),
    };

    let menu_id: i64 = id_str
        .trim()
        .parse()
        .with_context(|| format!("bad cart line {raw:?}: menu id must be an integer"))?;
    let qty: i64 = qty_str
        .trim()
        .parse()
        .with_context(|| format!("bad cart line {raw:?}: quantity must be an integer"))?;

    Ok((menu_id, qty))
}

fn print_receipt(config: &StoreConfig, placed: &PlacedOrder) {
    println!("==== {} ====", config.store_name);
    println!("order_id={}", placed.order_id);
    println!("items={}", placed.item_summary);
    println!("subtotal={}", placed.subtotal);
    println!("tax={}", placed.tax);
    println!("total={}", placed.total);
    if let Some(footer) = &config.receipt_footer {
        println!("{footer}");
    }
}

#[cfg(test)]
mod tests {
    use super::parse_cart_line;

    #[test]
    fn parses_id_and_quantity() {
        assert_eq!(parse_cart_line("3:2").unwrap(), (3, 2));
        assert_eq!(parse_cart_line(" 2 : 5 ").unwrap(), (2, 5));
    }

    #[test]
    fn bare_id_defaults_to_quantity_one() {
        assert_eq!(parse_cart_line("7").unwrap(), (7, 1));
    }

    #[test]
    fn rejects_non_numeric_parts() {
        assert!(parse_cart_line("a:1").is_err());
        assert!(parse_cart_line("1:b").is_err());
        assert!(parse_cart_line("").is_err());
    }
}

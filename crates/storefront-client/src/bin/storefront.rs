//! # Storefront CLI
//!
//! Drives the storefront services from a terminal against the configured
//! fixture and storage.
//!
//! ## Usage
//! ```bash
//! cargo run -p storefront-client --bin storefront -- login a@x.com secret
//! cargo run -p storefront-client --bin storefront -- products lamp
//! cargo run -p storefront-client --bin storefront -- add 3
//!
//! # Use an explicit config file
//! cargo run -p storefront-client --bin storefront -- --config ./storefront.toml cart
//! ```
//!
//! Logs go to stderr. `RUST_LOG=storefront_client=debug` shows cache hits
//! and lookups.

use std::env;
use std::path::PathBuf;

use storefront_client::{ClientResult, ProductFilter, Storefront, StorefrontConfig};
use storefront_core::NewUser;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Storefront CLI

Usage: storefront [--config <PATH>] <COMMAND>

Commands:
  login <EMAIL> <PASSWORD>             Sign in
  register <EMAIL> <PASSWORD> <NAME>   Create an account
  logout                               Sign out
  whoami                               Show the signed-in user
  products [TERM]                      List products, optionally filtered
  categories                           List categories
  product <ID>                         Show one product
  add <ID>                             Add one unit of a product to the cart
  cart                                 Show the cart

Options:
  -c, --config <PATH>   Config file (default: platform config dir)
  -h, --help            Show this help message";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront_client=info,storefront_store=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config_path: Option<PathBuf> = None;
    let mut command: Vec<String> = Vec::new();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => command.push(args[i].clone()),
        }
        i += 1;
    }

    if command.is_empty() {
        println!("{USAGE}");
        return Ok(());
    }

    let config = StorefrontConfig::load(config_path)?;
    let shop = Storefront::open(&config)?;

    let args: Vec<&str> = command.iter().map(String::as_str).collect();
    run(&shop, &args).await?;
    Ok(())
}

async fn run(shop: &Storefront, args: &[&str]) -> ClientResult<()> {
    match args {
        ["login", email, password] => match shop.session().authenticate(email, password).await? {
            Some(user) => println!("✓ Signed in as {} <{}>", user.name, user.email),
            None => println!("✗ Invalid email or password"),
        },
        ["register", email, password, name @ ..] if !name.is_empty() => {
            let user = shop
                .session()
                .register(NewUser::new(*email, *password, name.join(" ")))
                .await?;
            println!("✓ Registered {} with id {}", user.email, user.id);
        }
        ["logout"] => {
            shop.session().logout()?;
            println!("✓ Signed out");
        }
        ["whoami"] => match shop.session().current_session() {
            Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
            None => println!("Not signed in"),
        },
        ["products", term @ ..] => {
            let filter = ProductFilter::new().term(term.join(" "));
            let products = shop.catalog().search(&filter).await?;
            for p in &products {
                println!("{:>5}  {:<40} {:>10}  {}", p.id, p.title, p.price(), p.category);
            }
            println!("{} product(s)", products.len());
        }
        ["categories"] => {
            for category in shop.catalog().list_categories().await? {
                println!("{category}");
            }
        }
        ["product", id] => match id.parse::<i64>() {
            Ok(id) => match shop.catalog().find_by_id(id).await? {
                Some(p) => {
                    println!("{} (id {})", p.title, p.id);
                    println!("  Category: {}", p.category);
                    println!("  Price:    {} ({} after discount)", p.price(), p.discounted_price());
                    println!("  Rating:   {:.2} ({} reviews)", p.rating.rate, p.rating.count);
                    println!("  Stock:    {}", p.stock);
                    if !p.description.is_empty() {
                        println!("  {}", p.description);
                    }
                }
                None => println!("✗ No product with id {id}"),
            },
            Err(_) => println!("✗ '{id}' is not a product id"),
        },
        ["add", id] => match id.parse::<i64>() {
            Ok(id) => {
                let totals = shop.add_product_to_cart(id).await?;
                println!(
                    "✓ Added. Cart: {} line(s), {} item(s), {}",
                    totals.item_count, totals.total_quantity, totals.subtotal
                );
            }
            Err(_) => println!("✗ '{id}' is not a product id"),
        },
        ["cart"] => {
            let items = shop.ledger().items().await;
            if items.is_empty() {
                println!("Cart is empty");
            }
            for item in &items {
                println!(
                    "{:>5}  {:<40} {:>4} x {:>10} = {:>10}",
                    item.id,
                    item.name,
                    item.quantity,
                    item.price,
                    item.line_total()
                );
            }
            let totals = shop.ledger().totals().await;
            println!("Subtotal: {}", totals.subtotal);
        }
        _ => println!("{USAGE}"),
    }
    Ok(())
}

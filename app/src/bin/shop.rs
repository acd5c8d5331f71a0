// verdant/app/src/bin/shop.rs

//! Terminal storefront: browses the catalog API and keeps a local cart.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use verdant::{Cart, CartEngine, CatalogStats, FileStorage, PlantForm, PlantId, PlantQuery, VerdantError};
use verdant_app::config::{LogFormat, ShopConfig};
use verdant_app::services::CatalogClient;
use verdant_app::telemetry;

/// Browse plants and manage a local cart.
#[derive(Parser, Debug)]
#[command(name = "verdant-shop")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Base URL of the catalog API (overrides VERDANT_API_URL)
  #[arg(long, global = true)]
  api_url: Option<Url>,

  /// Directory holding the persisted cart (overrides VERDANT_DATA_DIR)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Extra attempts for requests that fail transiently
  #[arg(long, global = true, default_value = "0")]
  retries: u32,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// List plants, optionally filtered
  #[command(alias = "ls")]
  Plants {
    /// Case-insensitive substring of the plant name
    #[arg(long)]
    name: Option<String>,

    /// Case-insensitive substring of any category label
    #[arg(long)]
    category: Option<String>,
  },

  /// Show one plant
  Plant {
    /// Plant id
    id: String,
  },

  /// Cart operations
  #[command(subcommand)]
  Cart(CartCommands),

  /// Catalog administration
  #[command(subcommand)]
  Admin(AdminCommands),
}

#[derive(Subcommand, Debug)]
enum AdminCommands {
  /// Add a plant to the catalog
  Add {
    /// Plant name
    #[arg(long)]
    name: String,

    /// Unit price, greater than zero
    #[arg(long, allow_negative_numbers = true)]
    price: f64,

    /// Category label; repeat for several
    #[arg(long = "category", required = true)]
    categories: Vec<String>,

    /// List the plant as out of stock
    #[arg(long)]
    unavailable: bool,

    /// Image URL
    #[arg(long)]
    image: Option<String>,
  },

  /// Print catalog totals: plants, stock and summed prices
  Stats,
}

#[derive(Subcommand, Debug)]
enum CartCommands {
  /// Print the cart
  Show,

  /// Add a plant from the catalog
  Add {
    /// Plant id
    id: String,

    /// Units to add
    #[arg(short, long, allow_negative_numbers = true)]
    quantity: Option<i32>,
  },

  /// Remove a plant from the cart
  Remove {
    /// Plant id
    id: String,
  },

  /// Set the quantity of a line; zero or less removes it
  Update {
    /// Plant id
    id: String,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i32,
  },

  /// Empty the cart
  Clear,

  /// Print the number of units in the cart
  Count,
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  telemetry::init_tracing(LogFormat::Pretty, "warn");

  if let Err(e) = run(cli).await {
    match e.downcast_ref::<VerdantError>() {
      Some(err) if err.is_not_found() => eprintln!("{}", err),
      Some(VerdantError::Validation(message)) => eprintln!("Invalid plant: {}", message),
      Some(err) if err.is_retryable() => {
        eprintln!("The catalog is unavailable right now: {}", err);
        eprintln!("Re-run the command, or pass --retries to try again automatically.");
      }
      _ => eprintln!("Error: {:#}", e),
    }
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let config = ShopConfig::from_env().context("Failed to load storefront configuration")?;
  let api_url = cli.api_url.unwrap_or(config.api_url);
  let data_dir = cli.data_dir.unwrap_or(config.data_dir);

  let catalog = || -> Result<CatalogClient> {
    let client = CatalogClient::new(api_url.clone(), Duration::from_secs(config.timeout_secs))?;
    Ok(client.with_retries(cli.retries, Duration::from_millis(500)))
  };

  match cli.command {
    Commands::Plants { name, category } => {
      let query = PlantQuery { name, category };
      let plants = catalog()?.list(&query).await?;
      if plants.is_empty() {
        println!("No plants match.");
      }
      for plant in plants {
        let stock = if plant.availability { "in stock" } else { "out of stock" };
        println!("{}  {}  {:.2}  [{}]  {}", plant.id, plant.name, plant.price, plant.categories.join(", "), stock);
      }
    }
    Commands::Plant { id } => {
      let plant = catalog()?.get(&PlantId::new(id)).await?;
      println!("{}", serde_json::to_string_pretty(&plant)?);
    }
    Commands::Cart(command) => {
      let mut engine = CartEngine::open(FileStorage::new(data_dir));
      match command {
        CartCommands::Show => print_cart(engine.cart()),
        CartCommands::Add { id, quantity } => {
          let plant = catalog()?.get(&PlantId::new(id)).await?;
          println!("Added {} to the cart.", plant.name);
          engine.add_to_cart(plant, quantity);
          print_cart(engine.cart());
        }
        CartCommands::Remove { id } => {
          engine.remove_from_cart(&PlantId::new(id));
          print_cart(engine.cart());
        }
        CartCommands::Update { id, quantity } => {
          engine.update_quantity(&PlantId::new(id), quantity);
          print_cart(engine.cart());
        }
        CartCommands::Clear => {
          engine.clear_cart();
          println!("Cart cleared.");
        }
        CartCommands::Count => println!("{}", engine.cart_items_count()),
      }
    }
    Commands::Admin(AdminCommands::Add {
      name,
      price,
      categories,
      unavailable,
      image,
    }) => {
      let form = PlantForm {
        name,
        price,
        categories,
        available: !unavailable,
        image,
      };
      let payload = form.into_new_plant()?;
      let plant = catalog()?.create(&payload).await?;
      println!("Created {} ({}).", plant.name, plant.id);
    }
    Commands::Admin(AdminCommands::Stats) => {
      let plants = catalog()?.list(&PlantQuery::all()).await?;
      let stats = CatalogStats::from_plants(&plants);
      println!("Total plants:  {}", stats.total_plants);
      println!("In stock:      {}", stats.in_stock);
      println!("Out of stock:  {}", stats.out_of_stock);
      println!("Total value:   {:.2}", stats.total_value);
    }
  }
  Ok(())
}

fn print_cart(cart: &Cart) {
  if cart.is_empty() {
    println!("Your cart is empty.");
    return;
  }
  for line in cart.items() {
    println!(
      "{} x {}  @ {:.2}  = {:.2}",
      line.quantity,
      line.plant.name,
      line.plant.price,
      line.subtotal()
    );
  }
  println!("Total: {:.2}", cart.total());
}

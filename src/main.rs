use anyhow::Context;
use cart_sync::config::{CliConfig, Command, TomlConfig};
use cart_sync::core::ConfigProvider;
use cart_sync::utils::{logger, validation::Validate};
use cart_sync::{
    CartEngine, CartSnapshot, ChannelNotifier, HttpProductApi, LocalStorage, UpdateProductAmount,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let file_config = match &args.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let verbose = args.verbose || file_config.as_ref().is_some_and(TomlConfig::verbose);
    let log_json = args.log_json || file_config.as_ref().is_some_and(TomlConfig::log_json);
    if log_json {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting cart-sync");
    if verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let outcome = match &file_config {
        Some(config) => run(config, &args.command).await,
        None => run(&args, &args.command).await,
    };

    if let Err(e) = outcome {
        tracing::error!("❌ cart-sync failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    command: &Command,
) -> cart_sync::Result<()> {
    config.validate()?;

    let api = HttpProductApi::from_config(config)?;
    let storage = LocalStorage::new(config.storage_path());
    let (notifier, mut notifications) = ChannelNotifier::new();
    let mut engine = CartEngine::open(api, notifier, storage, config.storage_key()).await;

    match *command {
        Command::Show => {}
        Command::Add { product_id } => engine.add_product(product_id).await,
        Command::Remove { product_id } => engine.remove_product(product_id).await,
        Command::Update { product_id, amount } => {
            engine
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await
        }
    }

    while let Ok(notification) = notifications.try_recv() {
        eprintln!("⚠️ {}", notification);
    }

    print_cart(engine.cart());
    Ok(())
}

fn print_cart(cart: &CartSnapshot) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 Cart ({} products)", cart.len());
    let mut subtotal = 0.0;
    for item in cart {
        let title = item.title().unwrap_or("<untitled>");
        match item.price() {
            Some(price) => {
                let line_total = price * f64::from(item.amount);
                subtotal += line_total;
                println!(
                    "  #{:<5} {:<40} x{:<4} {:>10.2}",
                    item.id, title, item.amount, line_total
                );
            }
            None => println!("  #{:<5} {:<40} x{:<4}", item.id, title, item.amount),
        }
    }
    println!("  {:>52} {:>10.2}", "Subtotal", subtotal);
}

//! OpenSASE Storefront - resolve product variants from option selections

use anyhow::{Context, Result};
use clap::Parser;
use opensase_storefront::views::{AvailabilityView, LinkView, OptionChange, PriceView};
use opensase_storefront::{Product, ThemeConfig, VariantId, VariantResolver};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "opensase-storefront", about = "Resolve product variants from option selections")]
struct Cli {
    /// Product JSON as embedded by the product template
    #[arg(long)]
    product: PathBuf,
    /// Requested variant id, e.g. from a shared link
    #[arg(long)]
    variant: Option<String>,
    /// Option change applied in order, e.g. `--select 2=Blue`
    #[arg(long = "select", value_name = "POS=VALUE")]
    selections: Vec<OptionChange>,
    /// Full details link to keep pointed at the selected variant
    #[arg(long)]
    link: Option<String>,
    /// Theme settings JSON; `STOREFRONT_*` variables are used when absent
    #[arg(long, env = "STOREFRONT_THEME")]
    theme: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let theme = match &cli.theme {
        Some(path) => ThemeConfig::from_json(&std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?)?,
        None => ThemeConfig::from_env()?,
    };
    let json = std::fs::read_to_string(&cli.product).with_context(|| format!("reading {}", cli.product.display()))?;
    let product = Product::from_json(&json).context("parsing product JSON")?;

    let requested = cli.variant.map(VariantId::new);
    let mut resolver = VariantResolver::new(product, requested.as_ref())?;

    let price = Arc::new(Mutex::new(PriceView::new(theme.money_format.clone(), resolver.variant())));
    let availability = Arc::new(Mutex::new(AvailabilityView::new(theme.strings.clone(), resolver.variant())));
    let link = cli.link.map(|href| Arc::new(Mutex::new(LinkView::new(href))));
    resolver.attach(Arc::clone(&price));
    resolver.attach(Arc::clone(&availability));
    if let Some(link) = &link { resolver.attach(Arc::clone(link)); }
    resolver.subscribe(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::error!(%error, "could not encode variant change"),
    });

    for change in &cli.selections {
        if let Err(error) = change.apply(&mut resolver) {
            tracing::warn!(%error, position = %change.position, value = %change.value, "selection skipped");
        }
    }

    let price = price.lock().unwrap_or_else(PoisonError::into_inner);
    let availability = availability.lock().unwrap_or_else(PoisonError::into_inner);
    let link = link.as_ref().map(|l| l.lock().unwrap_or_else(PoisonError::into_inner).href().to_string());
    let summary = serde_json::json!({
        "variant": resolver.variant().map(|v| v.id.as_str()),
        "available": resolver.is_available(),
        "price": price.price_text(),
        "compare_at_price": price.compare_at_text(),
        "add_to_cart": availability.add_to_cart(),
        "link": link,
    });
    println!("{summary}");
    Ok(())
}

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use shop_client::HttpShopClient;
use shop_core::calculations::{EstimateCalculator, EstimateTotals};
use shop_core::validation::validate_estimate;
use shop_core::{ApiConfig, Session, ShopApi, SubmitError, TaxMarkupSettings, submit_estimate};
use shop_data::{LineItemLoader, load_settings, logging};
use tracing::info;

/// Build an estimate from a CSV of line items, print its totals, and
/// optionally submit it to the shop backend.
///
/// The CSV file should have the following columns (blank where not
/// relevant to the row's kind):
/// - kind: part, labor or flat_fee
/// - description
/// - part_number, quantity, net_price, list_price (parts)
/// - hours, rate (labor)
/// - price (flat fees)
/// - taxable: yes/no (blank uses the shop default)
#[derive(Parser, Debug)]
#[command(name = "estimate-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing line items
    #[arg(short, long)]
    file: PathBuf,

    /// TOML file with tax and markup settings. Fetched from the backend when
    /// omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Backend base URL (overrides SHOP_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// API token for the backend
    #[arg(long, env = "SHOP_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long)]
    vehicle_id: i64,

    #[arg(long)]
    diagnostic_id: i64,

    /// Note shown to the customer
    #[arg(short, long, default_value = "")]
    note: String,

    /// Internal note for the technician
    #[arg(long)]
    technician_note: Option<String>,

    /// Send the estimate to the backend after it validates
    #[arg(long, default_value_t = false)]
    submit: bool,

    /// Debug logging for the shop crates (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn client(&self) -> Result<HttpShopClient> {
        let mut config = ApiConfig::from_env().context("Invalid API configuration")?;
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url).context("Invalid --api-url")?;
        }
        let Some(token) = &self.token else {
            bail!("An API token is required (--token or SHOP_API_TOKEN)");
        };
        HttpShopClient::new(&config, Session::from_token(token.as_str()))
            .context("Failed to create API client")
    }
}

fn print_totals(totals: &EstimateTotals) {
    println!("  Parts:      {:>10}", totals.parts_subtotal);
    println!("  Labor:      {:>10}", totals.labor_subtotal);
    println!("  Flat fees:  {:>10}", totals.flat_fee_subtotal);
    println!("  Subtotal:   {:>10}", totals.subtotal);
    println!("  Part tax:   {:>10}", totals.part_tax);
    println!("  Labor tax:  {:>10}", totals.labor_tax);
    println!("  Tax:        {:>10}", totals.tax);
    println!("  Total:      {:>10}", totals.total);
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let settings: TaxMarkupSettings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => args
            .client()?
            .get_settings()
            .await
            .context("Failed to fetch settings from the backend")?,
    };

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let items = LineItemLoader::load(file, &settings)
        .with_context(|| format!("Failed to load line items: {}", args.file.display()))?;

    println!(
        "Loaded {} line items from {}",
        items.len(),
        args.file.display()
    );

    let mut draft = items.into_draft(args.vehicle_id, args.diagnostic_id);
    draft.customer_note = args.note.clone();
    draft.technician_note = args.technician_note.clone();

    let totals = EstimateCalculator::new(&settings)
        .calculate_draft(&draft)
        .rounded();
    print_totals(&totals);

    if let Err(errors) = validate_estimate(&draft, &settings) {
        for message in errors.messages() {
            eprintln!("  - {message}");
        }
        bail!("Estimate is not valid ({} problems)", errors.len());
    }

    if !args.submit {
        println!("Estimate is valid. Re-run with --submit to send it.");
        return Ok(());
    }

    let client = args.client()?;
    let estimate = match submit_estimate(&client, &draft, &settings).await {
        Ok(estimate) => estimate,
        Err(SubmitError::Validation(errors)) => bail!("Estimate rejected: {errors}"),
        Err(SubmitError::Api(err)) => {
            return Err(err).context("Failed to submit estimate");
        }
    };

    info!(estimate_id = estimate.id, "submitted");
    println!(
        "Created estimate #{} (total {}, {})",
        estimate.id,
        estimate.total,
        estimate.authorization_status.as_str()
    );

    Ok(())
}

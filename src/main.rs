use boq::config::{config_dir, config_file, init_config_dir, load_boq, load_config, save_new_boq};
use boq::engine::{discount_impact, margin_warnings, rollup, BoqSummary, MarginWarning};
use boq::error::{BoqError, Result};
use boq::logging::init_logging;
use boq::model::{Boq, Item, Preliminary, PricingVersion, SubItem};
use boq::payload;
use boq::Config;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

#[derive(Parser)]
#[command(name = "boq")]
#[command(version, about = "Bill of Quantities cost rollup", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.boq)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Create a new BOQ file with default percentages
    New {
        /// Output file (.toml or .json)
        file: PathBuf,

        /// Project name
        #[arg(short, long)]
        name: Option<String>,

        /// Pricing version (surcharge-split or legacy-vat)
        #[arg(long = "pricing", value_name = "VERSION")]
        pricing: Option<PricingVersion>,
    },

    /// Price a BOQ file and show the cost breakdown
    Calc {
        /// BOQ file (.toml or .json)
        file: PathBuf,

        /// Override the overall discount percentage
        #[arg(short, long, allow_negative_numbers = true)]
        discount: Option<f64>,

        /// Print the full breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare grand total and margin across overall discounts
    Discount {
        /// BOQ file (.toml or .json)
        file: PathBuf,

        /// Discount percentage to evaluate (can be repeated)
        #[arg(short, long, value_name = "PERCENT", allow_negative_numbers = true)]
        percent: Vec<f64>,
    },

    /// Build the submission payload (record plus computed totals) as JSON
    Payload {
        /// BOQ file (.toml or .json)
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show config location and effective pricing policy
    Status,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::New {
            file,
            name,
            pricing,
        } => cmd_new(&cfg_dir, &file, name, pricing),
        Commands::Calc {
            file,
            discount,
            json,
        } => cmd_calc(&cfg_dir, &file, discount, json),
        Commands::Discount { file, percent } => cmd_discount(&cfg_dir, &file, &percent),
        Commands::Payload { file, output } => cmd_payload(&cfg_dir, &file, output),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    let path = init_config_dir(cfg_dir)?;

    println!("Initialized boq config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!("  1. Review pricing policy:  $EDITOR {}", path.display());
    println!("  2. Create a BOQ:           boq new project.toml --name \"My Project\"");
    println!("  3. Price it:               boq calc project.toml");

    Ok(())
}

/// Create a skeleton BOQ file
fn cmd_new(
    cfg_dir: &Path,
    file: &Path,
    name: Option<String>,
    pricing: Option<PricingVersion>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;

    let mut preliminary = Preliminary::new("Approvals and mobilization", config.defaults);
    preliminary.quantity = 1.0;
    preliminary.unit = "lot".to_string();

    let mut item = Item::new("Item 1");
    item.sub_items.push(SubItem::new("Sub-item 1", config.defaults));

    let version = pricing.unwrap_or(config.pricing.default_version);
    let boq = Boq {
        name: name.unwrap_or_else(|| "Untitled".to_string()),
        version: Some(version),
        preliminary,
        items: vec![item],
        ..Boq::default()
    };

    save_new_boq(file, &boq)?;
    tracing::info!(path = %file.display(), %version, "created BOQ");

    println!("Created {}", file.display());
    println!("  Pricing: {version}");
    println!(
        "  Defaults: misc {}%, overhead & profit {}%, transport {}%",
        config.defaults.misc_percentage,
        config.defaults.overhead_profit_percentage,
        config.defaults.transport_percentage
    );

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ITEM")]
    description: String,
    #[tabled(rename = "CLIENT COST")]
    client_cost: String,
    #[tabled(rename = "DISCOUNT")]
    discount: String,
    #[tabled(rename = "VAT")]
    vat: String,
    #[tabled(rename = "SELLING")]
    selling: String,
    #[tabled(rename = "INTERNAL")]
    internal: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
}

#[derive(Tabled)]
struct SubItemRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "SUB-ITEM")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "MATERIALS")]
    materials: String,
    #[tabled(rename = "LABOUR")]
    labour: String,
    #[tabled(rename = "SURCHARGES")]
    surcharges: String,
    #[tabled(rename = "INTERNAL")]
    internal: String,
    #[tabled(rename = "PLANNED")]
    planned: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "TOTALS")]
    label: &'static str,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct DiscountRow {
    #[tabled(rename = "DISCOUNT")]
    percent: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "GRAND TOTAL")]
    grand_total: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
    #[tabled(rename = "MARGIN %")]
    margin_pct: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// Display-only rounding with thousands separators
fn format_amount(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };
    let negative = value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    let grouped = group_digits(whole);
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Load config and record, price it with the record's version
fn price_file(
    cfg_dir: &Path,
    file: &Path,
    discount: Option<f64>,
) -> Result<(Config, Boq, BoqSummary)> {
    let config = load_config(cfg_dir)?;
    let mut boq = load_boq(file)?;
    if let Some(pct) = discount {
        boq.overall_discount_percentage = pct;
    }
    let summary = rollup(&boq, &config.pricing);
    Ok((config, boq, summary))
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    summary: &'a BoqSummary,
    warnings: &'a [MarginWarning],
}

/// Price a BOQ and print the breakdown
fn cmd_calc(cfg_dir: &Path, file: &Path, discount: Option<f64>, json: bool) -> Result<()> {
    let (config, boq, summary) = price_file(cfg_dir, file, discount)?;
    let warnings = margin_warnings(&boq, &summary);
    for warning in &warnings {
        tracing::info!(%warning, "negative margin");
    }

    if json {
        let out = CalcOutput {
            summary: &summary,
            warnings: &warnings,
        };
        let text = serde_json::to_string_pretty(&out).map_err(|e| BoqError::Serialize {
            what: "summary".to_string(),
            reason: e.to_string(),
        })?;
        println!("{text}");
        return Ok(());
    }

    let dp = config.display.decimals;
    let money = |v: f64| format_amount(v, dp);

    let title = if boq.name.is_empty() {
        file.display().to_string()
    } else {
        boq.name.clone()
    };
    println!("BOQ: {title}");
    println!(
        "Pricing: {}  (amounts in {})",
        summary.strategy, config.display.currency
    );
    println!();

    if boq.items.is_empty() {
        println!("No items.");
    } else {
        let item_rows: Vec<ItemRow> = boq
            .items
            .iter()
            .zip(&summary.items)
            .enumerate()
            .map(|(i, (item, priced))| ItemRow {
                index: i + 1,
                description: item.description.clone(),
                client_cost: money(priced.total_client_cost),
                discount: money(priced.discount_amount),
                vat: money(priced.vat_amount),
                selling: money(priced.selling_price),
                internal: money(priced.total_internal_cost),
                margin: money(priced.project_margin),
            })
            .collect();
        println!("{}", Table::new(item_rows).with(Style::rounded()));

        let sub_rows: Vec<SubItemRow> = boq
            .items
            .iter()
            .zip(&summary.items)
            .enumerate()
            .flat_map(|(i, (item, priced))| {
                item.sub_items
                    .iter()
                    .zip(&priced.sub_items)
                    .enumerate()
                    .map(move |(j, (sub, b))| SubItemRow {
                        index: format!("{}.{}", i + 1, j + 1),
                        description: sub.description.clone(),
                        amount: format_amount(b.client_amount, dp),
                        materials: format_amount(b.material_cost, dp),
                        labour: format_amount(b.labour_cost, dp),
                        surcharges: format_amount(
                            b.misc_amount + b.overhead_profit_amount + b.transport_amount,
                            dp,
                        ),
                        internal: format_amount(b.internal_cost, dp),
                        planned: format_amount(b.planned_profit, dp),
                        margin: format_amount(b.negotiable_margin, dp),
                    })
            })
            .collect();
        if !sub_rows.is_empty() {
            println!("{}", Table::new(sub_rows).with(Style::rounded()));
        }
    }

    let pre = &summary.preliminary;
    let total_rows = vec![
        TotalRow {
            label: "Items subtotal",
            amount: money(summary.items_subtotal),
        },
        TotalRow {
            label: "Preliminaries",
            amount: money(pre.client_amount),
        },
        TotalRow {
            label: "Combined subtotal",
            amount: money(summary.combined_subtotal),
        },
        TotalRow {
            label: "(-) Overall discount",
            amount: format!(
                "{} ({})",
                money(summary.discount_amount),
                format_percent(summary.overall_discount_percentage)
            ),
        },
        TotalRow {
            label: "(=) GRAND TOTAL",
            amount: money(summary.grand_total),
        },
        TotalRow {
            label: "Internal cost",
            amount: money(summary.combined_internal_cost),
        },
        TotalRow {
            label: "Planned profit",
            amount: money(summary.combined_planned_profit),
        },
        TotalRow {
            label: "Negotiable margin",
            amount: format!(
                "{} ({})",
                money(summary.negotiable_margin_after_discount),
                format_percent(summary.profit_margin_after_discount)
            ),
        },
    ];
    println!("{}", Table::new(total_rows).with(Style::rounded()));

    println!();
    println!(
        "Suggested discount: {} (max safe {}, not applied)",
        format_percent(summary.suggestion.suggested_discount),
        format_percent(summary.suggestion.max_safe_discount)
    );

    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  ! {warning}");
        }
    }

    Ok(())
}

const DEFAULT_DISCOUNT_STEPS: [f64; 5] = [0.0, 2.5, 5.0, 7.5, 10.0];

/// Discount impact table
fn cmd_discount(cfg_dir: &Path, file: &Path, percents: &[f64]) -> Result<()> {
    let (config, boq, summary) = price_file(cfg_dir, file, None)?;
    let dp = config.display.decimals;

    let steps: Vec<f64> = if percents.is_empty() {
        DEFAULT_DISCOUNT_STEPS.to_vec()
    } else {
        percents.to_vec()
    };

    let rows: Vec<DiscountRow> = steps
        .iter()
        .map(|&pct| {
            let impact = discount_impact(&summary, pct, &config.pricing);
            DiscountRow {
                percent: format_percent(impact.discount_percentage),
                amount: format_amount(impact.discount_amount, dp),
                grand_total: format_amount(impact.grand_total, dp),
                margin: format_amount(impact.negotiable_margin_after_discount, dp),
                margin_pct: format_percent(impact.profit_margin_after_discount),
                status: if impact.below_min_margin {
                    "BELOW MIN".to_string()
                } else {
                    "OK".to_string()
                },
            }
        })
        .collect();

    let title = if boq.name.is_empty() { "BOQ" } else { boq.name.as_str() };
    println!("Discount impact: {title}");
    println!(
        "Combined subtotal {} {}, internal cost {} {}",
        config.display.currency,
        format_amount(summary.combined_subtotal, dp),
        config.display.currency,
        format_amount(summary.combined_internal_cost, dp)
    );
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!(
        "Minimum margin {}; suggested discount {}",
        format_percent(config.pricing.min_profit_margin),
        format_percent(summary.suggestion.suggested_discount)
    );

    Ok(())
}

/// Write the submission payload
fn cmd_payload(cfg_dir: &Path, file: &Path, output: Option<PathBuf>) -> Result<()> {
    let (config, boq, summary) = price_file(cfg_dir, file, None)?;
    let version = boq.version.unwrap_or(config.pricing.default_version);
    let warnings = margin_warnings(&boq, &summary);
    let payload = payload::build(&boq, version, &summary, &warnings, chrono::Utc::now());
    let json = payload::to_json(&payload)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "wrote payload");
            println!("Saved payload: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Show config and policy
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let path = config_file(cfg_dir);
    let config = load_config(cfg_dir)?;

    println!("BOQ Status");
    println!("{}", "-".repeat(50));
    if path.exists() {
        println!("Config file:        {}", path.display());
    } else {
        println!(
            "Config file:        {} (not found, using defaults)",
            path.display()
        );
    }
    println!("Default pricing:    {}", config.pricing.default_version);
    println!(
        "Min profit margin:  {}",
        format_percent(config.pricing.min_profit_margin)
    );
    println!(
        "Max suggested disc: {}",
        format_percent(config.pricing.max_suggested_discount)
    );
    println!(
        "New sub-items:      misc {}, O&P {}, transport {}",
        format_percent(config.defaults.misc_percentage),
        format_percent(config.defaults.overhead_profit_percentage),
        format_percent(config.defaults.transport_percentage)
    );
    println!("Currency:           {}", config.display.currency);

    Ok(())
}

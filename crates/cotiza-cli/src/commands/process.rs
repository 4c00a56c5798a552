//! Process command - extract a quote from a single OCR output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use cotiza_core::{HeuristicQuoteParser, OcrOutput, ParsedQuote, QuoteParser};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// OCR text file, or a JSON file with `text` and `detections`
    #[arg(required = true)]
    input: PathBuf,

    /// JSON file with word-level detections
    #[arg(short, long)]
    detections: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let ocr = load_input(&args.input, args.detections.as_deref())?;
    let parser = HeuristicQuoteParser::from_config(&config)?;
    let result = parser.parse(&ocr.text, &ocr.detections)?;

    if args.validate {
        let issues = result.quote.validate();
        if issues.is_empty() {
            eprintln!("{} Validation passed", style("✓").green());
        } else {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_quote(&result.quote, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings {
        if result.warnings.is_empty() {
            eprintln!("{} No extraction warnings", style("ℹ").blue());
        } else {
            eprintln!("{}", style("Warnings:").yellow());
            for warning in &result.warnings {
                eprintln!("  - {}", warning);
            }
        }
        if result.reflow_applied {
            eprintln!(
                "{} Line items rebuilt from word coordinates",
                style("ℹ").blue()
            );
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read OCR output from disk.
///
/// A `.json` input holds a serialized [`OcrOutput`]; anything else is plain
/// text, optionally paired with a detections file.
pub fn load_input(input: &Path, detections: Option<&Path>) -> anyhow::Result<OcrOutput> {
    let is_json = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if !is_json {
        return Ok(OcrOutput::load(input, detections)?);
    }

    let mut ocr: OcrOutput = serde_json::from_str(&fs::read_to_string(input)?)?;
    if let Some(path) = detections {
        ocr.detections = cotiza_core::read_detections(path)?;
    }
    Ok(ocr)
}

pub fn format_quote(quote: &ParsedQuote, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(quote)?),
        OutputFormat::Csv => format_csv(quote),
        OutputFormat::Text => Ok(format_text(quote)),
    }
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_csv(quote: &ParsedQuote) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "supplier",
        "date",
        "quote_number",
        "quote_total",
        "quantity",
        "unit",
        "description",
        "brand",
        "unit_price",
        "total",
    ])?;

    let supplier = quote.supplier.as_deref().unwrap_or("");
    let date = quote.date.date().to_string();
    let number = quote.quote_number.as_deref().unwrap_or("");
    let quote_total = opt_to_string(quote.total);

    if quote.items.is_empty() {
        wtr.write_record([supplier, date.as_str(), number, quote_total.as_str(), "", "", "", "", "", ""])?;
    }

    for item in &quote.items {
        wtr.write_record([
            supplier,
            date.as_str(),
            number,
            quote_total.as_str(),
            opt_to_string(item.quantity).as_str(),
            item.unit.as_deref().unwrap_or(""),
            item.description.as_deref().unwrap_or(""),
            item.brand.as_deref().unwrap_or(""),
            opt_to_string(item.unit_price).as_str(),
            opt_to_string(item.total).as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(quote: &ParsedQuote) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Supplier: {}\n",
        quote.supplier.as_deref().unwrap_or("-").replace('\n', " ")
    ));
    output.push_str(&format!("Date: {}\n", quote.date.date()));
    output.push_str(&format!(
        "Quote number: {}\n",
        quote.quote_number.as_deref().unwrap_or("-")
    ));
    output.push('\n');

    output.push_str(&format!("Items ({}):\n", quote.items.len()));
    for (i, item) in quote.items.iter().enumerate() {
        let mut line = format!("  {:>3}.", i + 1);
        if let Some(quantity) = item.quantity {
            line.push_str(&format!(" {}", quantity));
        }
        if let Some(unit) = &item.unit {
            line.push_str(&format!(" {}", unit));
        }
        if let Some(description) = &item.description {
            line.push_str(&format!(" {}", description));
        }
        if let Some(brand) = &item.brand {
            line.push_str(&format!(" [{}]", brand));
        }
        if let Some(unit_price) = item.unit_price {
            line.push_str(&format!(" @ {}", unit_price));
        }
        if let Some(total) = item.total {
            line.push_str(&format!(" = {}", total));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output.push('\n');
    match quote.total {
        Some(total) => output.push_str(&format!("Total: {}\n", total)),
        None => output.push_str(&format!("Total: - (items sum {})\n", quote.items_total())),
    }

    output
}

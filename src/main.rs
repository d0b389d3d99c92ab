//! Terminal viewer for TPM test workbooks
//!
//! Usage:
//!   `tpm-sheets sheets run.xlsx`
//!   `tpm-sheets show run.xlsx --sheet "Intense Test" --sample 2`
//!   `tpm-sheets show run.xlsx --json`

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use tpm_sheets::config::Config;
use tpm_sheets::services::processing::utils::cell_text;
use tpm_sheets::{ExcelProcessor, SampleData, TemplateVersion};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct SheetReport {
    file: PathBuf,
    sheet: String,
    template: TemplateVersion,
    headers: Vec<String>,
    samples: Vec<SampleData>,
}

fn cli() -> Command {
    let file = Arg::new("file")
        .value_name("FILE")
        .help("Workbook to read (relative paths resolve against TPM_SHEETS_DATA_DIR)")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    Command::new("tpm-sheets")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect TPM test workbooks sample by sample")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("sheets")
                .about("List the sheets of a workbook with their sample counts")
                .arg(file.clone()),
        )
        .subcommand(
            Command::new("show")
                .about("Show metadata and data rows of the samples on a sheet")
                .arg(file)
                .arg(
                    Arg::new("sheet")
                        .short('s')
                        .long("sheet")
                        .value_name("NAME")
                        .help("Sheet to read (defaults to the first sheet)"),
                )
                .arg(
                    Arg::new("sample")
                        .short('n')
                        .long("sample")
                        .value_name("N")
                        .help("Only show sample N (1-based)")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the extracted samples as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open(config: &Config, args: &ArgMatches) -> Result<ExcelProcessor> {
    let file = args
        .get_one::<PathBuf>("file")
        .context("FILE argument is required")?;
    let path = config.resolve_path(file);

    let mut processor = ExcelProcessor::new();
    processor
        .load_file(&path)
        .with_context(|| format!("Could not load {}", path.display()))?;
    Ok(processor)
}

fn list_sheets(config: &Config, args: &ArgMatches) -> Result<()> {
    let mut processor = open(config, args)?;

    println!("{}", style(&config.app_name).bold());
    println!(
        "Template: {}",
        style(processor.detect_template_version()).cyan()
    );

    for name in processor.sheet_names() {
        if let Err(e) = processor.select_sheet(&name) {
            println!("  {} {name}: {e}", style("✗").red());
            continue;
        }

        let marker = if processor.is_deprecated_user_test_simulation() {
            style(" (deprecated 8-column format)").yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {name}: {} samples{marker}",
            style("•").dim(),
            processor.sample_count()
        );
    }

    Ok(())
}

fn show(config: &Config, args: &ArgMatches) -> Result<()> {
    let mut processor = open(config, args)?;

    if let Some(sheet) = args.get_one::<String>("sheet") {
        processor
            .select_sheet(sheet)
            .with_context(|| format!("Could not select sheet {sheet}"))?;
    }
    let sheet = processor
        .current_sheet()
        .context("Workbook has no readable sheet")?
        .to_string();

    if processor.is_deprecated_user_test_simulation() {
        eprintln!(
            "{} Sheet '{sheet}' uses the deprecated 8-column User Test Simulation format and cannot be displayed",
            style("⚠").yellow()
        );
        bail!("Deprecated sheet format: {sheet}");
    }

    let count = processor.sample_count();
    let samples = match args.get_one::<usize>("sample").copied() {
        Some(n) if (1..=count).contains(&n) => vec![processor.sample(n - 1)],
        Some(n) => bail!("Sample {n} does not exist, sheet '{sheet}' has {count} samples"),
        None => extract_with_progress(&processor, count),
    };

    let report = SheetReport {
        file: processor.file_path().map(PathBuf::from).unwrap_or_default(),
        sheet,
        template: processor.detect_template_version(),
        headers: processor.column_headers(),
        samples,
    };

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn extract_with_progress(processor: &ExcelProcessor, count: usize) -> Vec<SampleData> {
    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let samples = (0..count)
        .map(|index| {
            pb.set_message(format!("Sample {}", index + 1));
            let sample = processor.sample(index);
            pb.inc(1);
            sample
        })
        .collect();

    pb.finish_and_clear();
    samples
}

fn print_report(report: &SheetReport) {
    println!(
        "{} {} ({} template)",
        style("Sheet:").bold(),
        style(&report.sheet).cyan(),
        report.template
    );

    if report.samples.is_empty() {
        println!("{}", style("No samples found").dim());
        return;
    }

    for sample in &report.samples {
        let meta = &sample.metadata;
        println!();
        println!(
            "{} {} (column {})",
            style("Sample").bold(),
            style(&meta.sample_id).green(),
            sample.start_column + 1
        );
        println!("  Test:        {}", meta.test_name);
        println!("  Date:        {}", meta.date);
        println!("  Media:       {}", meta.media);
        println!("  Tester:      {}", meta.tester);
        println!("  Regime:      {}", meta.puffing_regime);
        if !meta.heating_technology.is_empty() {
            println!("  Heating:     {}", meta.heating_technology);
        }
        println!("  Viscosity:   {}", meta.viscosity);
        println!(
            "  Electrical:  {} V, {} Ω, {:.2} W",
            meta.voltage, meta.resistance, meta.power
        );
        println!("  Oil mass:    {}", meta.initial_oil_mass);
        println!();
        for line in format_table(&report.headers, sample) {
            println!("  {line}");
        }
    }
}

/// Lay out headers and data rows as padded, pipe-separated lines
fn format_table(headers: &[String], sample: &SampleData) -> Vec<String> {
    let rows: Vec<Vec<String>> = sample
        .data_rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let columns = headers.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
    let width = |col: usize| {
        let header = headers.get(col).map_or(0, |h| h.chars().count());
        rows.iter()
            .filter_map(|row| row.get(col))
            .map(|cell| cell.chars().count())
            .fold(header, usize::max)
    };
    let widths: Vec<usize> = (0..columns).map(width).collect();

    let render = |cells: &[String]| {
        widths
            .iter()
            .enumerate()
            .map(|(col, &w)| {
                let cell = cells.get(col).map_or("", String::as_str);
                format!("{cell:<w$}")
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| render(row)));
    lines
}

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("sheets", args)) => list_sheets(&config, args),
        Some(("show", args)) => show(&config, args),
        Some((other, _)) => bail!("Unknown command: {other}"),
        None => bail!("No command given"),
    }
}

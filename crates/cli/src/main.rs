//! `dun`: validate, encode, import, and store DUN-14 shipping labels.

mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dunkit_core::{
    Gs1Input, LabelRecord, build_gs1_strings, gtin14_check_digit, normalize_expiry,
    normalize_gtin14, validate_expiry_date, validate_gtin14,
};
use dunkit_diagnostics::{self as diag, Diagnostic, codes};
use dunkit_import::{
    AliasTable, export_labels_csv, import_labels_from_str, import_qr_entries_from_path,
    label_csv_template, load_aliases_from_str, qr_csv_template,
};
use dunkit_store::{
    LabelStore, Orientation, QrSettings, SavedLabelSet, StoreConfig, export_file_name,
    export_label_set_json,
};

use crate::render::{Format, field_line, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "dun",
    version,
    about = "DUN-14 / GS1 label toolkit: validate, encode, import, and store label sets"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Store directory. Falls back to $DUNKIT_STORE_DIR, then ./.dunkit.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log debug detail to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Single values ───────────────────────────────────────────────
    /// Check a GTIN-14 and show its expected check digit.
    Gtin { gtin: String },

    /// Build the GS1-128 element string for one label.
    Encode {
        #[arg(long)]
        gtin: String,
        /// Batch/lot, AI (10).
        #[arg(long)]
        lot: Option<String>,
        /// Expiry as YYYY-MM-DD, YYYYMMDD or DD/MM/YYYY, AI (17).
        #[arg(long)]
        expiry: Option<String>,
    },

    // ── CSV files ───────────────────────────────────────────────────
    /// Validate a label CSV and report every invalid row.
    Validate {
        file: PathBuf,
        /// JSON file overriding the header aliases.
        #[arg(long)]
        aliases: Option<PathBuf>,
    },

    /// Validate a label CSV and save its valid rows as a named set.
    Import {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = OrientationArg::Portrait)]
        orientation: OrientationArg,
        /// JSON file overriding the header aliases.
        #[arg(long)]
        aliases: Option<PathBuf>,
    },

    /// Print an example CSV to fill in.
    Template {
        #[arg(value_enum)]
        kind: TemplateKind,
    },

    // ── Saved sets ──────────────────────────────────────────────────
    /// Manage saved label sets.
    Sets {
        #[command(subcommand)]
        cmd: SetsCmd,
    },

    /// Manage saved QR sets.
    Qr {
        #[command(subcommand)]
        cmd: QrCmd,
    },

    // ── Reference ───────────────────────────────────────────────────
    /// Explain a diagnostic ID (e.g. DUN1001).
    Explain { id: String },
}

#[derive(Subcommand, Debug)]
enum SetsCmd {
    /// List saved label sets.
    List,
    /// Show the labels of a set with their GS1 strings.
    Show { id: String },
    /// Delete a set.
    Delete { id: String },
    /// Export a set as JSON (default) or CSV.
    Export {
        id: String,
        #[arg(long)]
        csv: bool,
        /// Write to this file, or into this directory under the default
        /// export name. Prints to stdout when omitted.
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum QrCmd {
    /// Import a `label,value` CSV as a named QR set.
    Import {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = OrientationArg::Portrait)]
        orientation: OrientationArg,
        /// JSON file with print settings (missing keys use defaults).
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// List saved QR sets.
    List,
    /// Delete a QR set.
    Delete { id: String },
}

/// Page orientation.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(o: OrientationArg) -> Self {
        match o {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

/// Which CSV template to print.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TemplateKind {
    Labels,
    Qr,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());
    init_tracing(cli.verbose);

    if let Err(err) = run(cli, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{out:#}");
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let store = || {
        let config = StoreConfig::resolve(cli.store.as_deref());
        debug!(dir = %config.dir.display(), "using store");
        LabelStore::new(config)
    };

    match cli.cmd {
        Cmd::Gtin { ref gtin } => cmd_gtin(gtin, format),
        Cmd::Encode {
            ref gtin,
            ref lot,
            ref expiry,
        } => cmd_encode(gtin, lot.as_deref(), expiry.as_deref(), format),
        Cmd::Validate {
            ref file,
            ref aliases,
        } => cmd_validate(file, aliases.as_deref(), format),
        Cmd::Import {
            ref file,
            ref name,
            orientation,
            ref aliases,
        } => cmd_import(
            &store(),
            file,
            name,
            orientation.into(),
            aliases.as_deref(),
            format,
        ),
        Cmd::Template { kind } => cmd_template(kind),
        Cmd::Sets { ref cmd } => match cmd {
            SetsCmd::List => cmd_sets_list(&store(), format),
            SetsCmd::Show { id } => cmd_sets_show(&store(), id, format),
            SetsCmd::Delete { id } => {
                let removed = store().delete_label_set(id)?;
                report_delete("label set", id, removed, format)
            }
            SetsCmd::Export { id, csv, out } => {
                cmd_sets_export(&store(), id, *csv, out.as_deref(), format)
            }
        },
        Cmd::Qr { ref cmd } => match cmd {
            QrCmd::Import {
                file,
                name,
                orientation,
                settings,
            } => cmd_qr_import(
                &store(),
                file,
                name,
                (*orientation).into(),
                settings.as_deref(),
                format,
            ),
            QrCmd::List => cmd_qr_list(&store(), format),
            QrCmd::Delete { id } => {
                let removed = store().delete_qr_set(id)?;
                report_delete("QR set", id, removed, format)
            }
        },
        Cmd::Explain { ref id } => cmd_explain(id, format),
    }
}

// ── Single values ───────────────────────────────────────────────────────

fn cmd_gtin(gtin: &str, format: Format) -> Result<()> {
    let digits: String = gtin.chars().filter(|c| !c.is_whitespace()).collect();
    let valid = validate_gtin14(&digits);
    let check_digit = if matches!(digits.len(), 13 | 14) {
        digits.get(..13).and_then(gtin14_check_digit)
    } else {
        None
    };
    let suggested = check_digit
        .filter(|_| !valid)
        .and_then(|d| Some(format!("{}{d}", digits.get(..13)?)));

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "gtin": digits,
                "valid": valid,
                "checkDigit": check_digit,
                "suggested": suggested,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            field_line("gtin", &digits);
            field_line("valid", valid);
            if let Some(d) = check_digit {
                field_line("check digit", d);
            }
            if let Some(s) = &suggested {
                field_line("did you mean", s);
            }
        }
    }

    if !valid {
        process::exit(1);
    }
    Ok(())
}

fn cmd_encode(gtin: &str, lot: Option<&str>, expiry: Option<&str>, format: Format) -> Result<()> {
    let gtin = normalize_gtin14(gtin).unwrap_or_else(|| gtin.trim().to_string());
    let mut diagnostics = Vec::new();

    if !validate_gtin14(&gtin) {
        diagnostics.push(Diagnostic::for_code(
            codes::GTIN14_INVALID,
            format!("GTIN-14 '{gtin}' is invalid"),
            None,
        ));
    }

    let expiry_iso = match expiry.map(str::trim).filter(|e| !e.is_empty()) {
        None => None,
        Some(raw) => {
            let iso = normalize_expiry(raw);
            match &iso {
                None => diagnostics.push(Diagnostic::for_code(
                    codes::EXPIRY_NOT_ENCODABLE,
                    format!("expiry '{raw}' is not a calendar date; AI (17) omitted"),
                    None,
                )),
                Some(date) if !validate_expiry_date(Some(date)) => {
                    diagnostics.push(Diagnostic::warn(
                        codes::EXPIRY_INVALID,
                        format!("expiry {date} is not in the future"),
                        None,
                    ));
                }
                Some(_) => {}
            }
            iso
        }
    };

    let strings = build_gs1_strings(&Gs1Input {
        gtin14: &gtin,
        lot: lot.map(str::trim),
        expiry: expiry_iso.as_deref(),
    });

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "valueForEncoding": strings.value_for_encoding,
                "humanReadable": strings.human_readable,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            field_line("encode", strings.value_for_encoding.escape_debug());
            field_line("human", &strings.human_readable);
            render_diagnostics_pretty("", "encode", &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

// ── CSV files ───────────────────────────────────────────────────────────

fn cmd_validate(file: &Path, aliases: Option<&Path>, format: Format) -> Result<()> {
    let input = read_text(file)?;
    let table = load_alias_table(aliases)?;
    let imp = import_labels_from_str(&input, &table)?;
    let ok = imp.partition.all_valid();

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "rows": imp.rows,
                "validLabels": imp.partition.valid_labels,
                "invalidLabels": imp.partition.invalid_labels,
                "diagnostics": imp.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics_pretty(&input, &file.display().to_string(), &imp.diagnostics);
            print_summary(&imp.diagnostics);
            eprintln!(
                "{} rows: {} valid, {} invalid",
                imp.rows,
                imp.partition.valid_labels.len(),
                imp.partition.invalid_labels.len()
            );
        }
    }

    if !ok {
        process::exit(1);
    }
    Ok(())
}

fn cmd_import(
    store: &LabelStore,
    file: &Path,
    name: &str,
    orientation: Orientation,
    aliases: Option<&Path>,
    format: Format,
) -> Result<()> {
    let input = read_text(file)?;
    let table = load_alias_table(aliases)?;
    let imp = import_labels_from_str(&input, &table)?;
    let skipped = imp.partition.invalid_labels.len();
    if imp.partition.valid_labels.is_empty() {
        bail!("no valid labels in {} ({skipped} invalid)", file.display());
    }

    if format == Format::Pretty {
        render_diagnostics_pretty(&input, &file.display().to_string(), &imp.diagnostics);
        print_summary(&imp.diagnostics);
    }

    let set = store.save_label_set(name, imp.partition.valid_labels, orientation)?;

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": set.id,
                "name": set.name,
                "saved": set.labels.len(),
                "skipped": skipped,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            eprintln!(
                "saved '{}' ({}) with {} labels, {skipped} skipped",
                set.name,
                set.id,
                set.labels.len()
            );
        }
    }
    Ok(())
}

fn cmd_template(kind: TemplateKind) -> Result<()> {
    match kind {
        TemplateKind::Labels => print!("{}", label_csv_template()?),
        TemplateKind::Qr => print!("{}", qr_csv_template()),
    }
    Ok(())
}

// ── Saved label sets ────────────────────────────────────────────────────

fn cmd_sets_list(store: &LabelStore, format: Format) -> Result<()> {
    let sets = store.label_sets();
    match format {
        Format::Json => {
            let out: Vec<_> = sets
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "name": s.name,
                        "labels": s.labels.len(),
                        "createdAt": s.created_at,
                        "orientation": s.orientation,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if sets.is_empty() {
                eprintln!("no saved label sets");
            }
            for s in &sets {
                println!(
                    "{}  {}  ({} labels, {})",
                    s.id,
                    s.name,
                    s.labels.len(),
                    s.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }
    Ok(())
}

fn cmd_sets_show(store: &LabelStore, id: &str, format: Format) -> Result<()> {
    let set = find_label_set(store, id)?;
    match format {
        Format::Json => {
            let gs1: Vec<_> = set.labels.iter().map(LabelRecord::gs1_strings).collect();
            let out = serde_json::json!({ "set": set, "gs1": gs1 });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            field_line("name", &set.name);
            field_line("id", &set.id);
            field_line("labels", set.labels.len());
            for label in &set.labels {
                println!(
                    "  {}  {}  x{}  {}",
                    label.sku,
                    label.product,
                    label.qty_per_box,
                    label.gs1_strings().human_readable
                );
            }
        }
    }
    Ok(())
}

fn cmd_sets_export(
    store: &LabelStore,
    id: &str,
    csv: bool,
    out: Option<&Path>,
    format: Format,
) -> Result<()> {
    let set = find_label_set(store, id)?;
    let content = if csv {
        export_labels_csv(&set.labels)?
    } else {
        export_label_set_json(&set)?
    };

    let Some(out) = out else {
        print!("{content}");
        if !csv {
            println!();
        }
        return Ok(());
    };

    let path = if out.is_dir() {
        let name = PathBuf::from(export_file_name(&set));
        out.join(if csv { name.with_extension("csv") } else { name })
    } else {
        out.to_path_buf()
    };
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;

    match format {
        Format::Json => {
            let out = serde_json::json!({ "id": set.id, "file": path.display().to_string() });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => eprintln!("wrote {}", path.display()),
    }
    Ok(())
}

// ── Saved QR sets ───────────────────────────────────────────────────────

fn cmd_qr_import(
    store: &LabelStore,
    file: &Path,
    name: &str,
    orientation: Orientation,
    settings: Option<&Path>,
    format: Format,
) -> Result<()> {
    let entries = import_qr_entries_from_path(file)?;
    if entries.is_empty() {
        bail!("no QR entries with a value in {}", file.display());
    }
    let settings: QrSettings = match settings {
        Some(path) => serde_json::from_str(&read_text(path)?)
            .with_context(|| format!("invalid QR settings in {}", path.display()))?,
        None => QrSettings::default(),
    };

    let set = store.save_qr_set(name, entries, orientation, settings)?;
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": set.id,
                "name": set.name,
                "saved": set.qr_list.len(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => eprintln!(
            "saved '{}' ({}) with {} QR codes",
            set.name,
            set.id,
            set.qr_list.len()
        ),
    }
    Ok(())
}

fn cmd_qr_list(store: &LabelStore, format: Format) -> Result<()> {
    let sets = store.qr_sets();
    match format {
        Format::Json => {
            let out: Vec<_> = sets
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id,
                        "name": s.name,
                        "entries": s.qr_list.len(),
                        "createdAt": s.created_at,
                        "orientation": s.orientation,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if sets.is_empty() {
                eprintln!("no saved QR sets");
            }
            for s in &sets {
                println!(
                    "{}  {}  ({} QR codes, {})",
                    s.id,
                    s.name,
                    s.qr_list.len(),
                    s.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }
    Ok(())
}

// ── Reference ───────────────────────────────────────────────────────────

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => match diag::explain(id) {
            Some(text) => field_line(id, text),
            None => println!("{id}: (no explanation available)"),
        },
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Exit with code 1 if any diagnostic is an error.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(Diagnostic::is_error) {
        process::exit(1);
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Built-in aliases, or the ones in `path` layered over them.
fn load_alias_table(path: Option<&Path>) -> Result<AliasTable> {
    let Some(path) = path else {
        return Ok(AliasTable::default());
    };
    let text = read_text(path)?;
    load_aliases_from_str(&text).with_context(|| format!("invalid aliases in {}", path.display()))
}

fn find_label_set(store: &LabelStore, id: &str) -> Result<SavedLabelSet> {
    store
        .load_label_set(id)
        .with_context(|| format!("no label set with id '{id}'"))
}

fn report_delete(what: &str, id: &str, removed: bool, format: Format) -> Result<()> {
    if !removed {
        bail!("no {what} with id '{id}'");
    }
    match format {
        Format::Json => {
            let out = serde_json::json!({ "id": id, "deleted": true });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => eprintln!("deleted {what} {id}"),
    }
    Ok(())
}

//! Pretty diagnostic rendering using ariadne.
//!
//! Converts dunkit [`Diagnostic`]s into ariadne [`Report`]s pointing at the
//! offending CSV row. Falls back to structured JSON when the output is piped
//! or when the user explicitly requests it.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use dunkit_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, human-oriented output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, otherwise pretty on a TTY and JSON on a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

fn context_note(diag: &Diagnostic) -> Option<String> {
    let ctx = diag.context.as_ref().filter(|c| !c.is_empty())?;
    Some(
        ctx.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics to stderr. Spanned diagnostics show the source row;
/// the rest are printed as one-line messages.
pub(crate) fn render_diagnostics_pretty(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    // Spans are byte offsets; product names are rarely pure ASCII.
    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        if let Some(span) = &diag.span {
            let start = span.start.min(source.len());
            let end = span.end.min(source.len()).max(start);

            let mut builder = Report::build(report_kind(&diag.severity), (filename, start..end))
                .with_code(diag.id.as_ref())
                .with_message(&diag.message)
                .with_config(config);

            let label_msg = context_note(diag).unwrap_or_else(|| diag.message.clone());
            builder = builder.with_label(
                Label::new((filename, start..end))
                    .with_message(label_msg)
                    .with_color(severity_color(&diag.severity)),
            );

            if let Some(explanation) = diag.explain() {
                builder = builder.with_help(explanation);
            }

            builder.finish().eprint(&mut cache).ok();
        } else {
            eprintln!("{diag}");
            if let Some(note) = context_note(diag) {
                eprintln!("  = note: {note}");
            }
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
        }
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line to stderr, e.g. `2 errors, 1 warning`.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    use ariadne::Fmt;

    let (mut errors, mut warnings, mut infos) = (0usize, 0usize, 0usize);
    for d in diagnostics {
        match d.severity {
            Severity::Error => errors += 1,
            Severity::Info => infos += 1,
            _ => warnings += 1,
        }
    }

    if errors + warnings + infos == 0 {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    if infos > 0 {
        parts.push(format!("{}", format!("{infos} info").fg(Color::Blue)));
    }
    eprintln!("{}", parts.join(", "));
}

/// Print a `label: value` line with the label highlighted.
pub(crate) fn field_line(label: &str, value: impl std::fmt::Display) {
    use ariadne::Fmt;
    println!("{}: {value}", label.fg(Color::Cyan));
}

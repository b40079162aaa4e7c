use std::path::PathBuf;

use colored::Colorize;

use crate::adapters::audit::fixture_source::FixtureAuditSource;
use crate::adapters::audit::json_lines_source::JsonLinesAuditSource;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::models::api_key::{ApiKeyRecord, Permission};
use crate::core::models::audit_entry::{ActionTone, AuditAction, AuditEntry, AuditOutcome};
use crate::core::models::effect::Effect;
use crate::core::models::report::ReportFilterState;
use crate::core::services::audit_filter::AuditFilter;
use crate::core::services::audit_viewer::AuditListing;
use crate::core::services::key_manager::{CreateForm, KeyManagerState};
use crate::core::services::report_view::{self, ReportBody};
use crate::core::traits::audit_source::AuditSource;

/// Pick the audit source: `--source`, then `[audit] source`, then the
/// built-in sample.
pub fn open_audit_source(config: &AppConfig, source: Option<&str>) -> Box<dyn AuditSource> {
    let path = source
        .map(PathBuf::from)
        .or_else(|| config.audit.source.clone());
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using json-lines audit source");
            Box::new(JsonLinesAuditSource::new(path))
        }
        None => Box::new(FixtureAuditSource::sample()),
    }
}

/// Print notification effects of a one-shot command.
pub fn announce(effects: &[Effect]) {
    for effect in effects {
        if let Effect::Notify(msg) = effect {
            for (i, line) in msg.lines().enumerate() {
                if i == 0 {
                    output::success(line);
                } else {
                    println!("    {line}");
                }
            }
        }
    }
}

// ─── Audit log ───────────────────────────────────────────────────

pub fn print_audit_filter(filter: &AuditFilter) {
    if filter.is_empty() {
        return;
    }
    if !filter.search.is_empty() {
        output::field("search", &filter.search);
    }
    output::field("action", &filter.action.to_string());
    output::field("user", &filter.user.to_string());
    let bound = |b: Option<chrono::DateTime<chrono::Utc>>| {
        b.map(|d| d.to_rfc3339()).unwrap_or_else(|| "—".to_string())
    };
    output::field(
        "range",
        &format!("{} … {}", bound(filter.range.start), bound(filter.range.end)),
    );
}

pub fn print_audit_listing(listing: &AuditListing) {
    output::header(&format!(
        "監査ログ ({} of {} records)",
        listing.entries.len(),
        listing.total
    ));

    if listing.is_empty() {
        output::warning("No matching audit records");
        println!("  Try removing filters to see all entries.");
        return;
    }

    println!();
    for entry in &listing.entries {
        print_audit_entry(entry);
    }
}

fn print_audit_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    println!(
        "  {:<3} {} {} {} {:<12} {} {:<16} {} {}",
        entry.id.dimmed(),
        date.to_string().dimmed(),
        "│".dimmed(),
        entry.user_name,
        format_action(&entry.action),
        entry.resource_id,
        entry.ip_address.dimmed(),
        format_outcome(entry.outcome),
        entry.details.dimmed(),
    );
}

/// Color an action label by its tone.
fn format_action(action: &AuditAction) -> String {
    let label = action.label();
    match action.tone() {
        ActionTone::Danger => label.red().to_string(),
        ActionTone::Positive => label.green().to_string(),
        ActionTone::Session => label.blue().to_string(),
        ActionTone::Neutral => label.normal().to_string(),
    }
}

fn format_outcome(outcome: AuditOutcome) -> String {
    match outcome {
        AuditOutcome::Success => outcome.label().green().to_string(),
        AuditOutcome::Failure => outcome.label().red().to_string(),
    }
}

pub fn print_action_catalog() {
    output::header("Action codes");
    for action in AuditAction::ALL {
        println!("  • {:<22} {}", action.code(), action.label());
    }
}

// ─── API keys ────────────────────────────────────────────────────

pub fn print_keys(state: &KeyManagerState) {
    output::header(&format!(
        "APIキー (active {} / {})",
        state.active_count(),
        state.keys.len()
    ));

    if state.keys.is_empty() {
        output::warning("No API keys.");
        return;
    }

    for key in &state.keys {
        print_key(key, &state.display_secret(key));
    }
}

fn print_key(key: &ApiKeyRecord, secret: &str) {
    let status = if key.active {
        key.status_label().green()
    } else {
        key.status_label().red()
    };
    println!("\n  {} {} {}", key.name.bold(), status, format!("[{}]", key.id).dimmed());
    println!("    {}", secret.cyan());
    output::field(
        "  created",
        &key.created_at.format("%Y-%m-%d").to_string(),
    );
    output::field(
        "  last used",
        &key.last_used
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "未使用".to_string()),
    );
    output::field("  usage", &format!("{} calls", key.usage_count));
    let permissions: Vec<&str> = key.permissions.iter().map(|p| p.label()).collect();
    output::field("  permissions", &permissions.join(", "));
}

pub fn print_form(form: &CreateForm) {
    if !form.open {
        return;
    }
    output::header("New API key");
    output::field(
        "name",
        if form.name.is_empty() { "—" } else { form.name.as_str() },
    );
    for permission in Permission::ALL {
        let mark = if form.permissions.contains(&permission) { "[x]" } else { "[ ]" };
        println!("  {mark} {:<20} {}", permission.code(), permission.label());
    }
}

pub fn print_permission_catalog() {
    output::header("Permissions");
    for permission in Permission::ALL {
        println!("  • {:<20} {}", permission.code(), permission.label());
    }
}

// ─── Reports ─────────────────────────────────────────────────────

pub fn print_report(state: &ReportFilterState) {
    output::header(state.report.label());
    output::field("period", &format!("{} … {}", state.start, state.end));
    output::field("department", &state.department.to_string());
    println!();

    match report_view::render(state.report) {
        ReportBody::Metrics { cards, charts } => {
            for card in cards {
                println!("  {:<8} {:>12}  {}", card.title, card.value.bold(), card.note.dimmed());
            }
            for chart in charts {
                println!("  {} {}", "▤".dimmed(), chart);
            }
        }
        ReportBody::Table { title, rows } => {
            println!("  {}", title.bold());
            for row in rows {
                println!(
                    "  {:<6} {:>10} {:>6} {:>9} {:>5}",
                    row.department, row.total, row.trips, row.average, row.change
                );
            }
        }
        ReportBody::Summary { title, description } => {
            println!("  {}", title.bold());
            println!("  {}", description.dimmed());
        }
    }
}

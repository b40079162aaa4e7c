pub mod commands;
pub mod context;
pub mod output;

use clap::{Args, Parser, Subcommand};

/// Administration console for expense and travel management.
#[derive(Parser, Debug)]
#[command(name = "kenja-admin", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to an alternative config file
    #[arg(long, global = true, env = "KENJA_CONFIG")]
    pub config: Option<String>,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors on stderr (command output is unaffected)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the audit trail
    Audit(AuditArgs),

    /// Inspect API keys and the permission catalog
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Show an advanced report
    Report(ReportArgs),

    /// Start an interactive session across all views
    Console,
}

#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Case-insensitive text matched against user, action code and details
    #[arg(long)]
    pub search: Option<String>,
    /// Action code (e.g. USER_LOGIN) or 'all'
    #[arg(long)]
    pub action: Option<String>,
    /// Exact user name or 'all'
    #[arg(long)]
    pub user: Option<String>,
    /// Range start, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,
    /// Range end, inclusive (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,
    /// Show the full detail of one entry
    #[arg(long)]
    pub detail: Option<String>,
    /// JSON-lines audit trail to read instead of the sample data
    #[arg(long)]
    pub source: Option<String>,
    /// Request a CSV export of the listing
    #[arg(long)]
    pub export: bool,
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// List API keys (secrets masked)
    List {
        /// Show secrets unmasked
        #[arg(long)]
        reveal: bool,
    },
    /// List grantable permissions
    Permissions,
}

#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Report type (expense-analysis, department-comparison, user-activity,
    /// compliance-report, tax-optimization)
    #[arg(long = "type")]
    pub report_type: Option<String>,
    /// Period start (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Period end (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Department or 'all'
    #[arg(long)]
    pub department: Option<String>,
    /// Request an export (csv, excel, pdf)
    #[arg(long)]
    pub export: Option<String>,
}

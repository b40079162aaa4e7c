use std::io::{self, IsTerminal, Write};

use colored::Colorize;

use crate::adapters::clipboard::osc52_clipboard::Osc52Clipboard;
use crate::adapters::key_stores::fixture_key_store::FixtureKeyStore;
use crate::adapters::prompt::terminal_prompter::TerminalPrompter;
use crate::adapters::tokens::secure_generator::SecureTokenGenerator;
use crate::cli::commands::{report, view_helpers};
use crate::cli::context;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{AdminError, Result};
use crate::core::models::effect::{Confirmation, Effect};
use crate::core::models::report::{ReportFilterState, parse_department};
use crate::core::models::selection::Selection;
use crate::core::models::view::View;
use crate::core::services::audit_filter::parse_bound;
use crate::core::services::audit_viewer::{AuditViewAction, AuditViewState, AuditViewer};
use crate::core::services::key_manager::{KeyAction, KeyManager, KeyManagerState};
use crate::core::services::report_view::{self, ReportAction};
use crate::core::traits::audit_source::AuditSource;
use crate::core::traits::clipboard::Clipboard;
use crate::core::traits::prompter::Prompter;
use crate::core::traits::token_generator::TokenGenerator;

/// Execute the `kenja-admin console` command.
///
/// Runs an interactive session over stdin. All view state lives for the
/// lifetime of the process and is gone on exit.
pub fn execute() -> Result<()> {
    let config = context::load_config()?;
    let mut session = Session::open(
        &config,
        SecureTokenGenerator::new(config.keys.scheme_tag.clone()),
        TerminalPrompter,
        Osc52Clipboard::stdout(),
    )?;

    let interactive = io::stdin().is_terminal();
    output::header("kenja-admin console");
    println!("  Type 'help' for commands, 'quit' to leave.");

    loop {
        if interactive {
            print!("\n{} ", format!("kenja:{}>", session.view()).cyan());
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        match session.handle(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) if e.is_validation() => output::error(&e.to_string()),
            Err(e) => return Err(e),
        }
    }

    tracing::debug!("console session ended");
    Ok(())
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One console session: the navigation shell plus the three views.
pub struct Session<G: TokenGenerator, P: Prompter, C: Clipboard> {
    view: View,
    audit: AuditViewer<Box<dyn AuditSource>>,
    audit_state: AuditViewState,
    keys: KeyManager<G>,
    key_state: KeyManagerState,
    report_state: ReportFilterState,
    prompter: P,
    clipboard: C,
}

impl<G: TokenGenerator, P: Prompter, C: Clipboard> Session<G, P, C> {
    pub fn open(config: &AppConfig, generator: G, prompter: P, clipboard: C) -> Result<Self> {
        let keys = KeyManager { generator };
        let key_state = keys.open(&FixtureKeyStore)?;
        Ok(Self {
            view: View::default(),
            audit: AuditViewer {
                source: view_helpers::open_audit_source(config, None),
            },
            audit_state: AuditViewState::default(),
            keys,
            key_state,
            report_state: config.report_defaults(),
            prompter,
            clipboard,
        })
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn key_state(&self) -> &KeyManagerState {
        &self.key_state
    }

    pub fn audit_state(&self) -> &AuditViewState {
        &self.audit_state
    }

    pub fn report_state(&self) -> &ReportFilterState {
        &self.report_state
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Handle one input line. On error the session state is unchanged.
    pub fn handle(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => self.print_help(),
            "views" => {
                for view in View::ALL {
                    println!("  • {:<20} {}", view.id(), view.title());
                }
            }
            "go" => {
                let view = rest.parse::<View>()?;
                self.run_effects(vec![Effect::Navigate(view)])?;
            }
            _ => match self.view {
                View::Dashboard => return Err(unknown_command(command)),
                View::AuditLogs => self.handle_audit(command, rest)?,
                View::ApiManagement => self.handle_keys(command, rest)?,
                View::AdvancedReporting => self.handle_report(command, rest)?,
            },
        }
        Ok(Flow::Continue)
    }

    // ─── Audit log ───────────────────────────────────────────────

    fn handle_audit(&mut self, command: &str, rest: &str) -> Result<()> {
        let action = match command {
            "show" | "ls" => return self.show_audit(),
            "actions" => {
                view_helpers::print_action_catalog();
                return Ok(());
            }
            "users" => {
                for user in self.audit.users()? {
                    println!("  • {user}");
                }
                return Ok(());
            }
            "search" => AuditViewAction::SetSearch(rest.to_string()),
            "action" => AuditViewAction::SetAction(Selection::parse_with(rest, str::parse)?),
            "user" => AuditViewAction::SetUser(Selection::parse_with(rest, |u| {
                Ok::<_, AdminError>(u.to_string())
            })?),
            "from" => AuditViewAction::SetStart(parse_optional_bound(rest)?),
            "to" => AuditViewAction::SetEnd(parse_optional_bound(rest)?),
            "reset" => AuditViewAction::ResetFilters,
            "detail" => AuditViewAction::ShowDetail(required(rest, "detail <id>")?),
            "export" => AuditViewAction::Export,
            other => return Err(unknown_command(other)),
        };

        let shows_listing = !matches!(
            action,
            AuditViewAction::ShowDetail(_) | AuditViewAction::Export
        );
        let t = self.audit.reduce(&self.audit_state, action)?;
        self.audit_state = t.state;
        self.run_effects(t.effects)?;
        if shows_listing {
            self.show_audit()?;
        }
        Ok(())
    }

    fn show_audit(&self) -> Result<()> {
        let listing = self.audit.listing(&self.audit_state)?;
        view_helpers::print_audit_filter(&self.audit_state.filter);
        view_helpers::print_audit_listing(&listing);
        Ok(())
    }

    // ─── API keys ────────────────────────────────────────────────

    fn handle_keys(&mut self, command: &str, rest: &str) -> Result<()> {
        let action = match command {
            "list" | "ls" | "show" => {
                view_helpers::print_keys(&self.key_state);
                view_helpers::print_form(&self.key_state.form);
                return Ok(());
            }
            "permissions" => {
                view_helpers::print_permission_catalog();
                return Ok(());
            }
            "new" => KeyAction::OpenCreateForm,
            "cancel" => KeyAction::CloseCreateForm,
            "name" => {
                self.require_form()?;
                KeyAction::SetName(rest.to_string())
            }
            "perm" => {
                self.require_form()?;
                KeyAction::TogglePermission(required(rest, "perm <code>")?.parse()?)
            }
            "create" => {
                self.require_form()?;
                KeyAction::SubmitCreate
            }
            "delete" => KeyAction::RequestDelete(required(rest, "delete <id>")?),
            "toggle" => KeyAction::ToggleActive(required(rest, "toggle <id>")?),
            "reveal" => KeyAction::ToggleReveal(required(rest, "reveal <id>")?),
            "copy" => KeyAction::Copy(required(rest, "copy <id>")?),
            other => return Err(unknown_command(other)),
        };

        let shows_form = matches!(
            action,
            KeyAction::OpenCreateForm | KeyAction::SetName(_) | KeyAction::TogglePermission(_)
        );
        let shows_keys = matches!(
            action,
            KeyAction::ToggleActive(_) | KeyAction::ToggleReveal(_)
        );

        self.dispatch_key(action)?;

        if shows_form {
            view_helpers::print_form(&self.key_state.form);
        } else if shows_keys {
            view_helpers::print_keys(&self.key_state);
        }
        Ok(())
    }

    fn require_form(&self) -> Result<()> {
        if self.key_state.form.open {
            Ok(())
        } else {
            Err(AdminError::validation(
                "No API key form is open. Type 'new' first.",
            ))
        }
    }

    fn dispatch_key(&mut self, action: KeyAction) -> Result<()> {
        let t = self.keys.reduce(&self.key_state, action)?;
        self.key_state = t.state;
        self.run_effects(t.effects)
    }

    // ─── Reports ─────────────────────────────────────────────────

    fn handle_report(&mut self, command: &str, rest: &str) -> Result<()> {
        let action = match command {
            "show" => {
                view_helpers::print_report(&self.report_state);
                return Ok(());
            }
            "types" => {
                for report in crate::core::models::report::ReportType::ALL {
                    println!("  • {:<22} {}", report.id(), report.label());
                }
                return Ok(());
            }
            "type" => ReportAction::Select(required(rest, "type <report-type>")?.parse()?),
            "range" => {
                let (start, end) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| AdminError::validation("Usage: range <start> <end>"))?;
                ReportAction::SetRange {
                    start: report::parse_date(start)?,
                    end: report::parse_date(end)?,
                }
            }
            "dept" | "department" => {
                ReportAction::SetDepartment(Selection::parse_with(rest, parse_department)?)
            }
            "export" => ReportAction::Export(required(rest, "export <csv|excel|pdf>")?.parse()?),
            other => return Err(unknown_command(other)),
        };

        let is_export = matches!(action, ReportAction::Export(_));
        let t = report_view::reduce(&self.report_state, action)?;
        self.report_state = t.state;
        self.run_effects(t.effects)?;
        if !is_export {
            view_helpers::print_report(&self.report_state);
        }
        Ok(())
    }

    // ─── Effects ─────────────────────────────────────────────────

    fn run_effects(&mut self, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Notify(msg) => self.prompter.notify(&msg),
                Effect::CopyToClipboard(text) => self.clipboard.write_text(&text)?,
                Effect::Navigate(view) => {
                    tracing::debug!(view = %view, "navigate");
                    self.view = view;
                    output::header(view.title());
                    println!("  Type 'help' for the commands of this view.");
                }
                Effect::Confirm(confirmation) => {
                    let confirmed = self.prompter.confirm(&confirmation.message())?;
                    match confirmation {
                        Confirmation::DeleteKey { .. } => {
                            self.dispatch_key(KeyAction::ResolveDelete { confirmed })?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn print_help(&self) {
        output::header("Commands");
        println!("  go <view>            switch view (see 'views')");
        println!("  views                list views");
        println!("  quit                 leave the console");

        match self.view {
            View::Dashboard => {
                println!("\n  Start with 'go audit-logs', 'go api-management' or 'go advanced-reporting'.");
            }
            View::AuditLogs => {
                println!("\n  show                 list entries matching the filter");
                println!("  search <text>        text in user, action code or details");
                println!("  action <code|all>    filter by action code (see 'actions')");
                println!("  user <name|all>      filter by user (see 'users')");
                println!("  from <date|clear>    range start, inclusive");
                println!("  to <date|clear>      range end, inclusive");
                println!("  reset                clear all filters");
                println!("  detail <id>          full detail and user agent of an entry");
                println!("  export               export the log as CSV");
            }
            View::ApiManagement => {
                println!("\n  list                 list keys");
                println!("  new                  open the create form");
                println!("  name <text>          set the key name");
                println!("  perm <code>          toggle a permission (see 'permissions')");
                println!("  create | cancel      submit or discard the form");
                println!("  delete <id>          delete a key (asks for confirmation)");
                println!("  toggle <id>          enable or disable a key");
                println!("  reveal <id>          show or mask a secret");
                println!("  copy <id>            copy a secret to the clipboard");
            }
            View::AdvancedReporting => {
                println!("\n  show                 render the selected report");
                println!("  type <report-type>   select a report (see 'types')");
                println!("  range <start> <end>  set the period (YYYY-MM-DD)");
                println!("  dept <name|all>      filter by department");
                println!("  export <format>      export as csv, excel or pdf");
            }
        }
    }
}

fn unknown_command(command: &str) -> AdminError {
    AdminError::validation(format!(
        "Unknown command '{command}'. Type 'help' for the commands of this view."
    ))
}

fn required(rest: &str, usage: &str) -> Result<String> {
    if rest.is_empty() {
        Err(AdminError::validation(format!("Usage: {usage}")))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_optional_bound(rest: &str) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    match rest {
        "" | "clear" => Ok(None),
        value => parse_bound(value).map(Some),
    }
}

use chrono::NaiveDate;

use crate::cli::ReportArgs;
use crate::cli::commands::view_helpers;
use crate::cli::context;
use crate::core::errors::{AdminError, Result};
use crate::core::models::report::{ReportFilterState, parse_department};
use crate::core::models::selection::Selection;
use crate::core::services::report_view::{self, ReportAction};

/// Execute the `kenja-admin report` command.
///
/// Starts from the configured defaults, applies the flags and prints the
/// canned report body.
pub fn execute(args: &ReportArgs) -> Result<()> {
    let config = context::load_config()?;
    let mut state = config.report_defaults();

    for action in actions(&state, args)? {
        let t = report_view::reduce(&state, action)?;
        state = t.state;
        if !t.effects.is_empty() {
            view_helpers::print_report(&state);
            println!();
            view_helpers::announce(&t.effects);
            return Ok(());
        }
    }

    view_helpers::print_report(&state);
    Ok(())
}

/// Translate flags into report actions. Export, if any, comes last.
pub fn actions(state: &ReportFilterState, args: &ReportArgs) -> Result<Vec<ReportAction>> {
    let mut actions = Vec::new();

    if let Some(report) = &args.report_type {
        actions.push(ReportAction::Select(report.parse()?));
    }
    if args.from.is_some() || args.to.is_some() {
        let start = args.from.as_deref().map(parse_date).transpose()?;
        let end = args.to.as_deref().map(parse_date).transpose()?;
        actions.push(ReportAction::SetRange {
            start: start.unwrap_or(state.start),
            end: end.unwrap_or(state.end),
        });
    }
    if let Some(department) = &args.department {
        actions.push(ReportAction::SetDepartment(Selection::parse_with(
            department,
            parse_department,
        )?));
    }
    if let Some(format) = &args.export {
        actions.push(ReportAction::Export(format.parse()?));
    }

    Ok(actions)
}

/// Parse a calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AdminError::InvalidDate {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::report::{ExportFormat, ReportType};

    #[test]
    fn flags_become_actions_in_order() {
        let args = ReportArgs {
            report_type: Some("compliance-report".into()),
            from: Some("2024-04-01".into()),
            department: Some("経理部".into()),
            export: Some("pdf".into()),
            ..ReportArgs::default()
        };
        let state = ReportFilterState::default();
        let actions = actions(&state, &args).unwrap();

        assert_eq!(
            actions,
            vec![
                ReportAction::Select(ReportType::ComplianceReport),
                ReportAction::SetRange {
                    start: parse_date("2024-04-01").unwrap(),
                    end: state.end,
                },
                ReportAction::SetDepartment(Selection::Only("経理部".into())),
                ReportAction::Export(ExportFormat::Pdf),
            ]
        );
    }

    #[test]
    fn unknown_report_type_fails() {
        let args = ReportArgs {
            report_type: Some("profit".into()),
            ..ReportArgs::default()
        };
        assert!(actions(&ReportFilterState::default(), &args).is_err());
    }

    #[test]
    fn department_all_clears_scope() {
        let args = ReportArgs {
            department: Some("all".into()),
            ..ReportArgs::default()
        };
        let actions = actions(&ReportFilterState::default(), &args).unwrap();
        assert_eq!(actions, vec![ReportAction::SetDepartment(Selection::All)]);
    }

    #[test]
    fn parse_date_rejects_timestamps() {
        assert!(parse_date("2024-07-20T00:00:00Z").is_err());
    }
}

use crate::cli::AuditArgs;
use crate::cli::commands::view_helpers;
use crate::cli::context;
use crate::core::errors::{AdminError, Result};
use crate::core::models::selection::Selection;
use crate::core::services::audit_filter::parse_bound;
use crate::core::services::audit_viewer::{AuditViewAction, AuditViewState, AuditViewer};
use crate::core::traits::audit_source::AuditSource;

/// Execute the `kenja-admin audit` command.
///
/// Lists audit entries that match every given criterion, in source order.
pub fn execute(args: &AuditArgs) -> Result<()> {
    let config = context::load_config()?;
    let viewer = AuditViewer {
        source: view_helpers::open_audit_source(&config, args.source.as_deref()),
    };

    if let Some(id) = &args.detail {
        let t = viewer.reduce(
            &AuditViewState::default(),
            AuditViewAction::ShowDetail(id.clone()),
        )?;
        view_helpers::announce(&t.effects);
        return Ok(());
    }

    let state = filter_state(&viewer, args)?;
    let listing = viewer.listing(&state)?;

    view_helpers::print_audit_filter(&state.filter);
    view_helpers::print_audit_listing(&listing);

    if args.export {
        let t = viewer.reduce(&state, AuditViewAction::Export)?;
        println!();
        view_helpers::announce(&t.effects);
    }

    Ok(())
}

/// Turn the command line flags into screen actions and fold them.
pub fn filter_state<S: AuditSource>(
    viewer: &AuditViewer<S>,
    args: &AuditArgs,
) -> Result<AuditViewState> {
    let mut actions = Vec::new();

    if let Some(search) = &args.search {
        actions.push(AuditViewAction::SetSearch(search.clone()));
    }
    if let Some(action) = &args.action {
        actions.push(AuditViewAction::SetAction(Selection::parse_with(
            action,
            str::parse,
        )?));
    }
    if let Some(user) = &args.user {
        actions.push(AuditViewAction::SetUser(Selection::parse_with(user, |u| {
            Ok::<_, AdminError>(u.to_string())
        })?));
    }
    if let Some(from) = &args.from {
        actions.push(AuditViewAction::SetStart(Some(parse_bound(from)?)));
    }
    if let Some(to) = &args.to {
        actions.push(AuditViewAction::SetEnd(Some(parse_bound(to)?)));
    }

    let mut state = AuditViewState::default();
    for action in actions {
        state = viewer.reduce(&state, action)?.state;
    }
    Ok(state)
}

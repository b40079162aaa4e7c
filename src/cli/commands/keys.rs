use crate::adapters::key_stores::fixture_key_store::FixtureKeyStore;
use crate::adapters::tokens::secure_generator::SecureTokenGenerator;
use crate::cli::KeysAction;
use crate::cli::commands::view_helpers;
use crate::cli::context;
use crate::core::errors::Result;
use crate::core::services::key_manager::{KeyAction, KeyManager};

/// Execute the `kenja-admin keys` command.
pub fn execute(action: &KeysAction) -> Result<()> {
    match action {
        KeysAction::List { reveal } => execute_list(*reveal),
        KeysAction::Permissions => {
            view_helpers::print_permission_catalog();
            Ok(())
        }
    }
}

/// List the session's API keys, masked unless `reveal` is set.
fn execute_list(reveal: bool) -> Result<()> {
    let config = context::load_config()?;
    let manager = KeyManager {
        generator: SecureTokenGenerator::new(config.keys.scheme_tag.clone()),
    };

    let mut state = manager.open(&FixtureKeyStore)?;
    if reveal {
        let ids: Vec<String> = state.keys.iter().map(|k| k.id.clone()).collect();
        for id in ids {
            state = manager.reduce(&state, KeyAction::ToggleReveal(id))?.state;
        }
    }

    view_helpers::print_keys(&state);
    println!("\n  Create, delete or toggle keys in 'kenja-admin console'.");
    Ok(())
}

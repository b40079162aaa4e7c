use std::collections::BTreeSet;

use chrono::Utc;

use crate::core::errors::{AdminError, Result};
use crate::core::models::api_key::{ApiKeyRecord, Permission};
use crate::core::models::effect::{Confirmation, Effect, Transition};
use crate::core::traits::key_store::KeyStore;
use crate::core::traits::token_generator::TokenGenerator;

/// Fresh material is regenerated at most this many times on a clash.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Inputs of the "create API key" form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateForm {
    pub open: bool,
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}

/// Everything the API management screen holds for a session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyManagerState {
    pub keys: Vec<ApiKeyRecord>,
    /// Ids whose secret is currently shown unmasked.
    pub revealed: BTreeSet<String>,
    pub form: CreateForm,
    /// Id awaiting a delete confirmation.
    pub pending_delete: Option<String>,
}

impl KeyManagerState {
    pub fn get(&self, id: &str) -> Option<&ApiKeyRecord> {
        self.keys.iter().find(|k| k.id == id)
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// Secret as it should be displayed right now.
    pub fn display_secret(&self, key: &ApiKeyRecord) -> String {
        if self.is_revealed(&key.id) {
            key.secret.clone()
        } else {
            key.masked_secret()
        }
    }

    pub fn active_count(&self) -> usize {
        self.keys.iter().filter(|k| k.active).count()
    }

    fn require(&self, id: &str) -> Result<&ApiKeyRecord> {
        self.get(id)
            .ok_or_else(|| AdminError::KeyNotFound { id: id.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    OpenCreateForm,
    CloseCreateForm,
    SetName(String),
    TogglePermission(Permission),
    SubmitCreate,
    RequestDelete(String),
    ResolveDelete { confirmed: bool },
    ToggleActive(String),
    ToggleReveal(String),
    Copy(String),
}

/// API key lifecycle as a state-transition function.
pub struct KeyManager<G: TokenGenerator> {
    pub generator: G,
}

impl<G: TokenGenerator> KeyManager<G> {
    /// Initial state seeded from a [`KeyStore`].
    pub fn open<K: KeyStore>(&self, store: &K) -> Result<KeyManagerState> {
        let keys = store.load()?;
        tracing::debug!(count = keys.len(), "api keys loaded");
        Ok(KeyManagerState {
            keys,
            ..KeyManagerState::default()
        })
    }

    /// Apply an action. On error the caller keeps its current state.
    pub fn reduce(
        &self,
        state: &KeyManagerState,
        action: KeyAction,
    ) -> Result<Transition<KeyManagerState>> {
        let mut next = state.clone();
        match action {
            KeyAction::OpenCreateForm => next.form.open = true,
            KeyAction::CloseCreateForm => next.form = CreateForm::default(),
            KeyAction::SetName(name) => next.form.name = name,
            KeyAction::TogglePermission(permission) => {
                if !next.form.permissions.remove(&permission) {
                    next.form.permissions.insert(permission);
                }
            }
            KeyAction::SubmitCreate => return self.create(next),
            KeyAction::RequestDelete(id) => {
                let key = state.require(&id)?;
                let confirmation = Confirmation::DeleteKey {
                    id: key.id.clone(),
                    name: key.name.clone(),
                };
                next.pending_delete = Some(id);
                return Ok(Transition::with(next, Effect::Confirm(confirmation)));
            }
            KeyAction::ResolveDelete { confirmed } => {
                let id = next
                    .pending_delete
                    .take()
                    .ok_or(AdminError::NoPendingConfirmation)?;
                if !confirmed {
                    return Ok(Transition::quiet(next));
                }
                next.keys.retain(|k| k.id != id);
                next.revealed.remove(&id);
                tracing::info!(key_id = %id, "api key deleted");
                return Ok(Transition::with(
                    next,
                    Effect::Notify("APIキーが削除されました".to_string()),
                ));
            }
            KeyAction::ToggleActive(id) => {
                state.require(&id)?;
                if let Some(key) = next.keys.iter_mut().find(|k| k.id == id) {
                    key.active = !key.active;
                    tracing::info!(key_id = %id, active = key.active, "api key toggled");
                }
            }
            KeyAction::ToggleReveal(id) => {
                state.require(&id)?;
                if !next.revealed.remove(&id) {
                    next.revealed.insert(id);
                }
            }
            KeyAction::Copy(id) => {
                let secret = state.require(&id)?.secret.clone();
                return Ok(Transition {
                    state: next,
                    effects: vec![
                        Effect::CopyToClipboard(secret),
                        Effect::Notify("APIキーをクリップボードにコピーしました".to_string()),
                    ],
                });
            }
        }
        Ok(Transition::quiet(next))
    }

    fn create(&self, mut next: KeyManagerState) -> Result<Transition<KeyManagerState>> {
        let name = next.form.name.trim().to_string();
        if name.is_empty() || next.form.permissions.is_empty() {
            return Err(AdminError::validation(
                "名前と権限を設定してください",
            ));
        }

        let id = self.unique(&next, |g| g.key_id(), |k| &k.id)?;
        let secret = self.unique(&next, |g| g.secret(), |k| &k.secret)?;

        let record = ApiKeyRecord {
            id,
            name,
            secret,
            permissions: std::mem::take(&mut next.form.permissions),
            created_at: Utc::now(),
            last_used: None,
            active: true,
            usage_count: 0,
        };
        tracing::info!(key_id = %record.id, name = %record.name, "api key created");

        next.keys.push(record);
        next.form = CreateForm::default();
        Ok(Transition::with(
            next,
            Effect::Notify("新しいAPIキーが作成されました".to_string()),
        ))
    }

    /// Draw values until one is not already used by an existing key.
    fn unique(
        &self,
        state: &KeyManagerState,
        draw: impl Fn(&G) -> String,
        field: impl Fn(&ApiKeyRecord) -> &String,
    ) -> Result<String> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = draw(&self.generator);
            if !state.keys.iter().any(|k| field(k) == &candidate) {
                return Ok(candidate);
            }
            tracing::warn!("generated key material collided, retrying");
        }
        Err(AdminError::TokenCollision {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::key_stores::fixture_key_store::FixtureKeyStore;

    /// Hands out a scripted sequence of values.
    struct ScriptedGenerator {
        secrets: Mutex<Vec<String>>,
        ids: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(secrets: &[&str], ids: &[&str]) -> Self {
            Self {
                secrets: Mutex::new(secrets.iter().rev().map(|s| s.to_string()).collect()),
                ids: Mutex::new(ids.iter().rev().map(|s| s.to_string()).collect()),
            }
        }
    }

    impl TokenGenerator for ScriptedGenerator {
        fn secret(&self) -> String {
            self.secrets.lock().unwrap().pop().unwrap_or_default()
        }

        fn key_id(&self) -> String {
            self.ids.lock().unwrap().pop().unwrap_or_default()
        }
    }

    fn manager(secrets: &[&str], ids: &[&str]) -> KeyManager<ScriptedGenerator> {
        KeyManager {
            generator: ScriptedGenerator::new(secrets, ids),
        }
    }

    fn seeded(m: &KeyManager<ScriptedGenerator>) -> KeyManagerState {
        m.open(&FixtureKeyStore).unwrap()
    }

    fn step(
        m: &KeyManager<ScriptedGenerator>,
        state: KeyManagerState,
        action: KeyAction,
    ) -> KeyManagerState {
        m.reduce(&state, action).unwrap().state
    }

    fn filled_form(m: &KeyManager<ScriptedGenerator>, name: &str) -> KeyManagerState {
        let s = seeded(m);
        let s = step(m, s, KeyAction::OpenCreateForm);
        let s = step(m, s, KeyAction::SetName(name.into()));
        step(m, s, KeyAction::TogglePermission(Permission::ReadReports))
    }

    #[test]
    fn create_with_empty_name_is_rejected() {
        let m = manager(&["kenja_live_new"], &["k3"]);
        let state = filled_form(&m, "   ");
        let before = state.keys.len();

        let err = m.reduce(&state, KeyAction::SubmitCreate).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(state.keys.len(), before);
    }

    #[test]
    fn create_without_permissions_is_rejected() {
        let m = manager(&["kenja_live_new"], &["k3"]);
        let s = seeded(&m);
        let s = step(&m, s, KeyAction::SetName("Payroll".into()));
        assert!(m.reduce(&s, KeyAction::SubmitCreate).is_err());
    }

    #[test]
    fn create_appends_active_unused_key_and_closes_form() {
        let m = manager(&["kenja_live_fresh0000000000000000"], &["k3"]);
        let state = filled_form(&m, "Payroll export");
        let before = state.keys.len();

        let t = m.reduce(&state, KeyAction::SubmitCreate).unwrap();
        assert_eq!(t.state.keys.len(), before + 1);

        let created = t.state.keys.last().unwrap();
        assert_eq!(created.id, "k3");
        assert_eq!(created.name, "Payroll export");
        assert!(created.active);
        assert_eq!(created.usage_count, 0);
        assert!(created.last_used.is_none());
        assert_eq!(
            created.permissions.iter().copied().collect::<Vec<_>>(),
            vec![Permission::ReadReports]
        );
        assert_eq!(t.state.form, CreateForm::default());
        assert_eq!(
            t.effects,
            vec![Effect::Notify("新しいAPIキーが作成されました".to_string())]
        );
    }

    #[test]
    fn create_regenerates_colliding_secret() {
        let existing = "kenja_live_1234567890abcdef1234567890abcdef";
        let m = manager(&[existing, "kenja_live_unique"], &["k3"]);
        let state = filled_form(&m, "Retry");

        let t = m.reduce(&state, KeyAction::SubmitCreate).unwrap();
        assert_eq!(t.state.keys.last().unwrap().secret, "kenja_live_unique");
    }

    #[test]
    fn create_gives_up_after_repeated_collisions() {
        let existing = "kenja_live_1234567890abcdef1234567890abcdef";
        let m = manager(&[existing; 8], &["k3"]);
        let state = filled_form(&m, "Unlucky");

        let err = m.reduce(&state, KeyAction::SubmitCreate).unwrap_err();
        assert!(matches!(err, AdminError::TokenCollision { attempts: 8 }));
    }

    #[test]
    fn toggle_permission_adds_then_removes() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        let s = step(&m, s, KeyAction::TogglePermission(Permission::AdminAll));
        assert!(s.form.permissions.contains(&Permission::AdminAll));
        let s = step(&m, s, KeyAction::TogglePermission(Permission::AdminAll));
        assert!(s.form.permissions.is_empty());
    }

    #[test]
    fn delete_requires_confirmation() {
        let m = manager(&[], &[]);
        let state = seeded(&m);

        let t = m
            .reduce(&state, KeyAction::RequestDelete("1".into()))
            .unwrap();
        assert_eq!(t.state.keys.len(), 2);
        assert_eq!(t.state.pending_delete.as_deref(), Some("1"));
        match &t.effects[..] {
            [Effect::Confirm(c)] => assert!(c.message().contains("メインAPI")),
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn confirmed_delete_removes_only_that_key() {
        let m = manager(&[], &[]);
        let state = seeded(&m);
        let untouched = state.get("2").unwrap().clone();

        let s = step(&m, state, KeyAction::RequestDelete("1".into()));
        let s = step(&m, s, KeyAction::ResolveDelete { confirmed: true });

        assert_eq!(s.keys.len(), 1);
        assert!(s.get("1").is_none());
        assert_eq!(s.get("2").unwrap(), &untouched);
        assert!(s.pending_delete.is_none());
    }

    #[test]
    fn declined_delete_keeps_collection() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        let s = step(&m, s, KeyAction::RequestDelete("2".into()));
        let t = m
            .reduce(&s, KeyAction::ResolveDelete { confirmed: false })
            .unwrap();
        assert_eq!(t.state.keys.len(), 2);
        assert!(t.effects.is_empty());
        assert!(t.state.pending_delete.is_none());
    }

    #[test]
    fn resolve_without_request_fails() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        let err = m
            .reduce(&s, KeyAction::ResolveDelete { confirmed: true })
            .unwrap_err();
        assert!(matches!(err, AdminError::NoPendingConfirmation));
    }

    #[test]
    fn toggle_active_twice_is_identity() {
        let m = manager(&[], &[]);
        let original = seeded(&m);
        let once = step(&m, original.clone(), KeyAction::ToggleActive("1".into()));
        assert!(!once.get("1").unwrap().active);
        assert_eq!(once.get("1").unwrap().secret, original.get("1").unwrap().secret);
        assert_eq!(
            once.get("1").unwrap().usage_count,
            original.get("1").unwrap().usage_count
        );

        let twice = step(&m, once, KeyAction::ToggleActive("1".into()));
        assert_eq!(twice, original);
    }

    #[test]
    fn toggle_unknown_key_fails() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        let err = m
            .reduce(&s, KeyAction::ToggleActive("nope".into()))
            .unwrap_err();
        assert!(matches!(err, AdminError::KeyNotFound { .. }));
    }

    #[test]
    fn reveal_toggles_display() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        let key = s.get("1").unwrap().clone();
        assert_eq!(s.display_secret(&key), key.masked_secret());

        let s = step(&m, s, KeyAction::ToggleReveal("1".into()));
        assert_eq!(s.display_secret(&key), key.secret);

        let s = step(&m, s, KeyAction::ToggleReveal("1".into()));
        assert!(!s.is_revealed("1"));
    }

    #[test]
    fn copy_emits_full_secret() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        let t = m.reduce(&s, KeyAction::Copy("2".into())).unwrap();
        assert_eq!(
            t.effects[0],
            Effect::CopyToClipboard("kenja_live_abcdef1234567890abcdef1234567890".into())
        );
        assert_eq!(
            t.effects[1],
            Effect::Notify("APIキーをクリップボードにコピーしました".into())
        );
        assert_eq!(t.state, s);
    }

    #[test]
    fn active_count_tracks_toggles() {
        let m = manager(&[], &[]);
        let s = seeded(&m);
        assert_eq!(s.active_count(), 2);
        let s = step(&m, s, KeyAction::ToggleActive("2".into()));
        assert_eq!(s.active_count(), 1);
    }
}

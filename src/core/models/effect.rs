use crate::core::models::view::View;

/// A decision that needs an explicit yes/no from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteKey { id: String, name: String },
}

impl Confirmation {
    /// Question put to the user.
    pub fn message(&self) -> String {
        match self {
            Confirmation::DeleteKey { id, name } => {
                format!("このAPIキーを削除してもよろしいですか？ {name} ({id})")
            }
        }
    }
}

/// Side effects requested by a view transition.
///
/// Reducers never talk to the terminal or the clipboard directly; the
/// caller interprets these in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Acknowledgement shown to the user.
    Notify(String),
    /// Ask the user and feed the answer back as an action.
    Confirm(Confirmation),
    /// Write the text to the clipboard.
    CopyToClipboard(String),
    Navigate(View),
}

/// Output of a reducer: the next state plus effects to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub effects: Vec<Effect>,
}

impl<S> Transition<S> {
    /// A transition with no effects.
    pub fn quiet(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with(state: S, effect: Effect) -> Self {
        Self {
            state,
            effects: vec![effect],
        }
    }
}

/// A filter criterion that either accepts everything or a single value.
///
/// Parsed from user input where the literal `all` means [`Selection::All`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this criterion.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selection<T> {
    /// Parse user input, delegating non-`all` values to `parse`.
    pub fn parse_with<E>(
        input: &str,
        parse: impl FnOnce(&str) -> std::result::Result<T, E>,
    ) -> std::result::Result<Self, E> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            parse(trimmed).map(Selection::Only)
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Only(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_accepts_anything() {
        let s: Selection<String> = Selection::All;
        assert!(s.accepts(&"x".to_string()));
    }

    #[test]
    fn only_accepts_exact_value() {
        let s = Selection::Only("佐藤花子".to_string());
        assert!(s.accepts(&"佐藤花子".to_string()));
        assert!(!s.accepts(&"佐藤".to_string()));
    }

    #[test]
    fn parse_all_keyword_and_blank() {
        let all: Selection<String> =
            Selection::parse_with::<()>("ALL", |s| Ok(s.to_string())).unwrap();
        assert_eq!(all, Selection::All);
        let blank: Selection<String> =
            Selection::parse_with::<()>("  ", |s| Ok(s.to_string())).unwrap();
        assert_eq!(blank, Selection::All);
    }

    #[test]
    fn parse_value_propagates_errors() {
        let err = Selection::<u8>::parse_with("abc", |s| s.parse::<u8>());
        assert!(err.is_err());
    }
}

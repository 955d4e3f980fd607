//! Normalization of caller-supplied SEARCH/SORT/THREAD arguments.
//!
//! Servers parse command arguments as space-delimited atoms, so the command
//! layer must guarantee that a joined argument list can neither merge two
//! logically distinct criteria nor split one atomic term. These helpers turn
//! loosely-structured caller input into the flat token sequences the
//! [`UidConnection`](crate::UidConnection) contract expects.

/// Flatten a sequence of criteria into atomic tokens.
///
/// Each criterion is stringified; one that contains embedded whitespace is
/// split into one token per word, preserving relative order. The result never
/// contains a token with internal whitespace.
pub(crate) fn flatten_criteria<I>(criteria: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut tokens = Vec::new();
    for criterion in criteria {
        let criterion = criterion.as_ref();
        if criterion.contains(char::is_whitespace) {
            tokens.extend(criterion.split_whitespace().map(String::from));
        } else {
            tokens.push(criterion.to_string());
        }
    }
    tokens
}

/// Ensure a SORT criteria string is a parenthesized list.
///
/// RFC 5256 requires the sort criteria argument to be a parenthesized list
/// even when it holds a single key; callers routinely pass a bare `DATE`.
/// Each side is corrected at most once, so the function is idempotent.
pub(crate) fn parenthesize_sort_criteria(sort_criteria: &str) -> String {
    let mut sort_criteria = sort_criteria.to_string();
    loop {
        let mut delimited = true;
        if !sort_criteria.starts_with('(') {
            sort_criteria.insert(0, '(');
            delimited = false;
        }
        if !sort_criteria.ends_with(')') {
            sort_criteria.push(')');
            delimited = false;
        }
        if delimited {
            return sort_criteria;
        }
    }
}

/// Substitute `UTF-8` for an absent or empty charset.
///
/// SEARCH/SORT/THREAD require a charset token to be present even when the
/// caller wants the universal default.
pub(crate) fn charset_or_default(charset: Option<&str>) -> String {
    match charset {
        Some(charset) if !charset.is_empty() => charset.to_string(),
        _ => "UTF-8".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_splits_embedded_spaces() {
        assert_eq!(
            vec!["FROM", "alice", "SUBJECT", "test"],
            flatten_criteria(["FROM alice", "SUBJECT test"])
        );
    }

    #[test]
    fn flatten_keeps_atomic_terms() {
        assert_eq!(
            vec!["UNSEEN", "FROM", "alice@example.com"],
            flatten_criteria(["UNSEEN", "FROM", "alice@example.com"])
        );
    }

    #[test]
    fn flatten_preserves_word_order() {
        let tokens = flatten_criteria(["SINCE 1-Feb-1994", "NOT", "FROM Smith"]);
        assert_eq!(vec!["SINCE", "1-Feb-1994", "NOT", "FROM", "Smith"], tokens);
        assert!(tokens.iter().all(|t| !t.contains(char::is_whitespace)));
    }

    #[test]
    fn flatten_collapses_runs_of_whitespace() {
        assert_eq!(
            vec!["FROM", "alice"],
            flatten_criteria(["FROM \t alice"])
        );
    }

    #[test]
    fn flatten_accepts_owned_strings() {
        let criteria: Vec<String> = vec!["FROM alice".to_string(), "ALL".to_string()];
        assert_eq!(vec!["FROM", "alice", "ALL"], flatten_criteria(criteria));
    }

    #[test]
    fn flatten_empty_is_empty() {
        assert!(flatten_criteria(std::iter::empty::<&str>()).is_empty());
    }

    #[test]
    fn parenthesize_bare_criteria() {
        assert_eq!("(DATE)", parenthesize_sort_criteria("DATE"));
        assert_eq!("(REVERSE DATE)", parenthesize_sort_criteria("REVERSE DATE"));
    }

    #[test]
    fn parenthesize_corrects_one_missing_side() {
        assert_eq!("(DATE)", parenthesize_sort_criteria("(DATE"));
        assert_eq!("(DATE)", parenthesize_sort_criteria("DATE)"));
    }

    #[test]
    fn parenthesize_handles_degenerate_input() {
        assert_eq!("()", parenthesize_sort_criteria(""));
        assert_eq!("()", parenthesize_sort_criteria(")"));
        assert_eq!("()", parenthesize_sort_criteria("("));
    }

    #[test]
    fn parenthesize_is_idempotent() {
        for input in ["DATE", "(DATE)", "(DATE", "DATE)", "", "ARRIVAL SIZE"] {
            let once = parenthesize_sort_criteria(input);
            assert_eq!(once, parenthesize_sort_criteria(&once));
        }
    }

    #[test]
    fn charset_defaults_when_absent_or_empty() {
        assert_eq!("UTF-8", charset_or_default(None));
        assert_eq!("UTF-8", charset_or_default(Some("")));
    }

    #[test]
    fn charset_passes_explicit_values() {
        assert_eq!("US-ASCII", charset_or_default(Some("US-ASCII")));
        assert_eq!("ISO-8859-1", charset_or_default(Some("ISO-8859-1")));
    }
}

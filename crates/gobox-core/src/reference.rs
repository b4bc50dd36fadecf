//! Repository reference resolution.
//!
//! A reference is one or more `/`-separated non-empty segments with an
//! optional trailing slash, e.g. `github.com/user/tool` or `singlepkg/`.
//! The last segment names both the produced binary and the image.

/// Extract the binary name from a repository reference.
///
/// # Examples
///
/// ```
/// use gobox_core::resolve_binary_name;
///
/// assert_eq!(resolve_binary_name("github.com/user/tool").unwrap(), "tool");
/// assert_eq!(resolve_binary_name("a/b/").unwrap(), "b");
/// assert!(resolve_binary_name("a//b").is_err());
/// ```
///
/// # Errors
///
/// [`Error::InvalidReference`](crate::Error::InvalidReference) when the
/// reference is empty, consists only of slashes, starts with a slash, or
/// contains an empty segment. Any other character is part of a segment.
pub fn resolve_binary_name(reference: &str) -> crate::Result<String> {
    let invalid = |reason| crate::Error::InvalidReference {
        reference: reference.to_owned(),
        reason,
    };

    if reference.is_empty() {
        return Err(invalid("reference is empty"));
    }

    // A single trailing slash is allowed and carries no segment.
    let path = reference.strip_suffix('/').unwrap_or(reference);

    let mut last = None;
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(invalid("reference contains an empty path segment"));
        }
        last = Some(segment);
    }

    let binary = last.ok_or_else(|| invalid("reference has no path segment"))?;
    tracing::debug!(reference, binary, "resolved binary name");
    Ok(binary.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn reason(reference: &str) -> &'static str {
        match resolve_binary_name(reference) {
            Err(Error::InvalidReference { reason, .. }) => reason,
            other => panic!("expected InvalidReference for {reference:?}, got {other:?}"),
        }
    }

    #[test]
    fn last_segment_is_binary() {
        assert_eq!(resolve_binary_name("a/b/c").unwrap(), "c");
        assert_eq!(resolve_binary_name("github.com/user/tool").unwrap(), "tool");
    }

    #[test]
    fn single_segment() {
        assert_eq!(resolve_binary_name("singlepkg").unwrap(), "singlepkg");
    }

    #[test]
    fn trailing_slash_ignored() {
        assert_eq!(resolve_binary_name("a/b/").unwrap(), "b");
        assert_eq!(resolve_binary_name("singlepkg/").unwrap(), "singlepkg");
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(reason(""), "reference is empty");
    }

    #[test]
    fn only_slashes_rejected() {
        assert!(matches!(
            resolve_binary_name("/"),
            Err(Error::InvalidReference { .. })
        ));
        assert!(matches!(
            resolve_binary_name("//"),
            Err(Error::InvalidReference { .. })
        ));
    }

    #[test]
    fn empty_interior_segment_rejected() {
        assert_eq!(reason("a//b"), "reference contains an empty path segment");
    }

    #[test]
    fn leading_slash_rejected() {
        assert_eq!(reason("/a/b"), "reference contains an empty path segment");
    }

    #[test]
    fn double_trailing_slash_rejected() {
        assert_eq!(reason("a/b//"), "reference contains an empty path segment");
    }

    #[test]
    fn whitespace_is_part_of_a_segment() {
        assert_eq!(resolve_binary_name("a b/c d").unwrap(), "c d");
        assert_eq!(resolve_binary_name("   ").unwrap(), "   ");
    }

    // ── Property-based tests ──

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy: any non-empty path segment.
        fn segment() -> impl Strategy<Value = String> {
            "[^/]{1,12}"
        }

        fn segments(max: usize) -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec(segment(), 1..=max)
        }

        proptest! {
            #[test]
            fn never_panics(reference in "\\PC{0,40}") {
                if let Ok(binary) = resolve_binary_name(&reference) {
                    prop_assert!(reference.contains(binary.as_str()));
                }
            }

            #[test]
            fn well_formed_yields_last_segment(
                parts in segments(6),
                trailing in any::<bool>(),
            ) {
                let mut reference = parts.join("/");
                if trailing {
                    reference.push('/');
                }
                let binary = resolve_binary_name(&reference).unwrap();
                prop_assert_eq!(&binary, parts.last().unwrap());
            }

            #[test]
            fn result_is_never_empty_and_has_no_slash(reference in "[a-z/]{0,20}") {
                if let Ok(binary) = resolve_binary_name(&reference) {
                    prop_assert!(!binary.is_empty());
                    prop_assert!(!binary.contains('/'));
                }
            }

            #[test]
            fn empty_segment_always_rejected(
                head in segments(3),
                tail in segments(3),
            ) {
                let reference = format!("{}//{}", head.join("/"), tail.join("/"));
                prop_assert!(resolve_binary_name(&reference).is_err());
            }

            #[test]
            fn only_slashes_always_rejected(count in 0usize..8) {
                let reference = "/".repeat(count);
                prop_assert!(resolve_binary_name(&reference).is_err());
            }
        }
    }
}

//! Path segment joining for URL-style paths.

use itertools::Itertools;

/// Joins path segments with `/`, normalizing separators.
///
/// Each segment is trimmed; empty segments are dropped. Every segment after
/// the first loses one leading slash and every segment loses one trailing
/// slash, so the result never contains a doubled separator and only starts
/// with `/` when the first segment supplied one.
pub fn join_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts: Vec<String> = Vec::new();
    for segment in segments {
        let trimmed = segment.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let head = if parts.is_empty() {
            trimmed
        } else {
            trimmed.strip_prefix('/').unwrap_or(trimmed)
        };
        let clean = head.strip_suffix('/').unwrap_or(head);
        if clean.is_empty() {
            continue;
        }
        parts.push(clean.to_string());
    }
    parts.iter().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_separators_when_joining_then_normalizes() {
        assert_eq!(join_path(["a/", "/b", " c "]), "a/b/c");
    }

    #[test]
    fn given_leading_slash_on_first_segment_when_joining_then_it_is_kept() {
        assert_eq!(join_path(["/api", "v1/", "/users"]), "/api/v1/users");
    }

    #[test]
    fn given_empty_segments_when_joining_then_they_are_dropped() {
        assert_eq!(join_path(["a", "", "  ", "b"]), "a/b");
        assert_eq!(join_path(Vec::<&str>::new()), "");
    }

    #[test]
    fn given_single_segment_when_joining_then_only_trailing_slash_is_stripped() {
        assert_eq!(join_path(["assets/"]), "assets");
    }
}

//! Make metric names safe for every backend we might forward to. Prometheus
//! in particular rejects `*` and `/`, which show up all over the place in
//! route-style and wildcard-style names upstream.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

const ALL_MATCHER: &str = "*/*";
const ALL_REPLACEMENT: &str = "all";
const NORMALIZED_TOKEN: &str = "_";

/// Taken from the prometheus client's metric name validation.
static METRIC_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_:]*$").expect("metric name pattern must compile")
});

/// The only characters we actively rewrite.
static INVALID_CHARACTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*/]").expect("invalid character pattern must compile"));

/// Returns true if `segment` is already an acceptable metric name segment.
pub fn is_valid_segment(segment: &str) -> bool {
    METRIC_NAME_RE.is_match(segment)
}

/// Normalize a single key segment. Valid segments are returned borrowed and
/// untouched. Anything else has `*/*` collapsed into `all` first, and then
/// every leftover `*` or `/` swapped for an underscore.
///
/// NOTE: only `*` and `/` are rewritten. A segment like `foo-bar` fails the
/// validity check but comes back unchanged.
pub fn normalize_segment(segment: &str) -> Cow<'_, str> {
    if is_valid_segment(segment) {
        return Cow::Borrowed(segment);
    }
    if !segment.contains(ALL_MATCHER) {
        return INVALID_CHARACTERS_RE.replace_all(segment, NORMALIZED_TOKEN);
    }
    let collapsed = segment.replace(ALL_MATCHER, ALL_REPLACEMENT);
    if !INVALID_CHARACTERS_RE.is_match(&collapsed) {
        return Cow::Owned(collapsed);
    }
    Cow::Owned(
        INVALID_CHARACTERS_RE
            .replace_all(&collapsed, NORMALIZED_TOKEN)
            .into_owned(),
    )
}

/// Normalize every segment of `key` in place. Segments are never added,
/// removed or reordered, and valid segments are never reallocated.
pub fn normalize_key(key: &mut [String]) {
    for segment in key.iter_mut() {
        if let Cow::Owned(normalized) = normalize_segment(segment) {
            *segment = normalized;
        }
    }
}

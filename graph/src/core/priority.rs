/// Visual priority class of a branch, lower draws first.
///
/// Rules are checked in order and the first match wins:
/// `master` 0, `hotfix/*` 1, `release/*` 2, `develop` 3, `feature/*` 4,
/// anything else 5.
pub fn classify_priority(name: &str) -> u8 {
    if name == "master" || name == "origin/master" {
        return 0;
    }
    if has_prefixed_segment(name, "hotfix/") {
        return 1;
    }
    if has_prefixed_segment(name, "release/") {
        return 2;
    }
    if name == "develop" || name == "origin/develop" {
        return 3;
    }
    if has_prefixed_segment(name, "feature/") {
        return 4;
    }
    5
}

/// True when `prefix` occurs in `name` followed by at least one character
/// on the same line.
fn has_prefixed_segment(name: &str, prefix: &str) -> bool {
    name.match_indices(prefix).any(|(idx, _)| {
        name[idx + prefix.len()..]
            .chars()
            .next()
            .is_some_and(|c| c != '\n')
    })
}

//! Fuzzy matching of `@mention` tokens against document filenames

/// Lower-cased filename with the final `.ext` suffix removed.
///
/// Only a dot followed by at least one non-dot character counts as an extension,
/// so `notes.` keeps its trailing dot.
fn base_name(name_lower: &str) -> &str {
    match name_lower.rfind('.') {
        Some(pos) if pos + 1 < name_lower.len() => &name_lower[..pos],
        _ => name_lower,
    }
}

fn strip_separators(s: &str) -> String {
    s.chars().filter(|c| *c != '_' && *c != '-').collect()
}

/// Check whether a document with `filename` is named by any of `mentions`.
///
/// Matching is a loose, two-way substring test so that abbreviated
/// references such as `@report` find `Q3_Report_Final.pdf`. For each token it
/// succeeds when any of these holds:
///
/// - the lower-cased filename contains the token
/// - the token contains the filename's base name
/// - the base name without `_`/`-` contains the token without `_`/`-`
/// - the token without `_`/`-` contains the base name without `_`/`-`
///
/// Empty comparands never match. An empty base name (`.env`) falls back to the
/// full name, and a token made only of separators is not compared after stripping.
pub fn matches(filename: &str, mentions: &[String]) -> bool {
    let name = filename.to_lowercase();
    // empty comparands are substrings of everything; never let them select every document
    let base = match base_name(&name) {
        "" => name.as_str(),
        base => base,
    };
    let base_clean = strip_separators(base);

    mentions.iter().any(|token| {
        if token.is_empty() {
            return false;
        }
        let token_clean = strip_separators(token);

        name.contains(token.as_str())
            || token.contains(base)
            || (!token_clean.is_empty()
                && !base_clean.is_empty()
                && (base_clean.contains(&token_clean) || token_clean.contains(&base_clean)))
    })
}

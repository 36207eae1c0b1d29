/// Slug used when neither the `slug` column nor the keyword yields one.
pub const PLACEHOLDER_SLUG: &str = "saknar-slug";

/// Resolve the page slug for a row.
///
/// A non-blank `slug` column wins and is used verbatim (trimmed). Otherwise
/// the keyword is slugified, falling back to [`PLACEHOLDER_SLUG`].
pub fn resolve(slug: &str, keyword: &str) -> String {
    let explicit = slug.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let derived = slugify_keyword(keyword);
    if derived.is_empty() {
        PLACEHOLDER_SLUG.to_string()
    } else {
        derived
    }
}

/// Lower-case, fold accented vowels, drop everything outside `[a-z0-9- ]`,
/// then turn each run of spaces into a single `-`.
///
/// Existing hyphens are kept as-is, so `"a - b"` becomes `"a---b"`.
/// Returns an empty string when nothing survives.
pub fn slugify_keyword(keyword: &str) -> String {
    let lowered = keyword.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for ch in lowered.chars() {
        match fold_accent(ch) {
            c @ ('a'..='z' | '0'..='9' | '-') => {
                if pending_dash {
                    out.push('-');
                    pending_dash = false;
                }
                out.push(c);
            }
            // Only spaces become dashes; tabs and newlines are dropped.
            ' ' => pending_dash = true,
            _ => {}
        }
    }

    if pending_dash {
        out.push('-');
    }

    out
}

fn fold_accent(ch: char) -> char {
    match ch {
        'å' | 'ä' | 'á' | 'à' | 'â' | 'ã' => 'a',
        'ö' | 'ó' | 'ò' | 'ô' | 'õ' | 'ø' => 'o',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        _ => ch,
    }
}

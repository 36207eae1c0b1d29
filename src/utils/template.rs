//! String template rendering utilities.

pub struct TemplateVars;

impl TemplateVars {
    pub const META_TITLE: &'static str = "meta_title";
    pub const META_DESC: &'static str = "meta_desc";
    pub const CANONICAL: &'static str = "canonical";
    pub const SITE_ROOT: &'static str = "site_root";
    pub const H1: &'static str = "h1";
    pub const PICK_1: &'static str = "pick1";
    pub const PICK_2: &'static str = "pick2";
    pub const PICK_3: &'static str = "pick3";
    pub const USP_1: &'static str = "usp1";
    pub const USP_2: &'static str = "usp2";
    pub const USP_3: &'static str = "usp3";
    pub const AFF_1: &'static str = "aff1";
    pub const AFF_2: &'static str = "aff2";
    pub const AFF_3: &'static str = "aff3";
    pub const CTA_TEXT: &'static str = "cta_text";
    pub const PERSONA: &'static str = "persona";
    pub const FRONT_MATTER: &'static str = "front_matter";
}

/// Replace every `{{key}}` with its value in a single pass.
///
/// Substituted values are not scanned again, and unknown placeholders are
/// left untouched.
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after[..end];
        match variables.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push_str("{{");
                result.push_str(key);
                result.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}

pub fn is_present(template: &str, key: &str) -> bool {
    let placeholder = format!("{{{{{}}}}}", key);
    template.contains(&placeholder)
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for XML character data.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

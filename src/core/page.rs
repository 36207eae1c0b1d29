//! Field defaulting shared by every page variant.

use crate::offer::OfferRow;

pub const DEFAULT_META_DESC: &str = "Snabb jämförelse och rekommendationer.";
pub const DEFAULT_PICKS: [&str; 3] = ["Val 1", "Val 2", "Val 3"];
pub const DEFAULT_USPS: [&str; 3] = [
    "Stark helhetslösning.",
    "Prisvärd för start.",
    "Bra för tillväxt.",
];
pub const DEFAULT_AFF_LINK: &str = "#";
pub const DEFAULT_CTA_TEXT: &str = "Se aktuella erbjudanden";
pub const DEFAULT_PERSONA: &str = "dig som vill välja rätt snabbt";

/// One recommended alternative on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub name: String,
    pub usp: String,
    pub link: String,
}

/// Every templated value of a page, with blanks already replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    pub slug: String,
    pub keyword: String,
    pub kind: String,
    pub intent: String,
    pub status: String,
    pub meta_title: String,
    pub meta_desc: String,
    pub h1: String,
    pub picks: [Pick; 3],
    pub cta_text: String,
    pub persona: String,
}

impl PageFields {
    pub fn resolve(row: &OfferRow, slug: &str) -> Self {
        let title_or_slug = or_default(&row.title, slug);

        let picks = [
            (&row.pick_1, &row.usp_1, &row.aff_link_1),
            (&row.pick_2, &row.usp_2, &row.aff_link_2),
            (&row.pick_3, &row.usp_3, &row.aff_link_3),
        ];
        let picks = std::array::from_fn(|i| {
            let (name, usp, link) = picks[i];
            Pick {
                name: or_default(name, DEFAULT_PICKS[i]),
                usp: or_default(usp, DEFAULT_USPS[i]),
                link: or_default(link, DEFAULT_AFF_LINK),
            }
        });

        Self {
            slug: slug.to_string(),
            keyword: row.keyword.trim().to_string(),
            kind: row.kind.trim().to_string(),
            intent: row.intent.trim().to_string(),
            status: row.status.trim().to_string(),
            meta_title: or_default(&row.meta_title, &title_or_slug),
            meta_desc: or_default(&row.meta_desc, DEFAULT_META_DESC),
            h1: or_default(&row.h1, &title_or_slug),
            picks,
            cta_text: or_default(&row.cta_text, DEFAULT_CTA_TEXT),
            persona: or_default(&row.persona, DEFAULT_PERSONA),
        }
    }
}

/// The trimmed value when it is non-blank, else `default`.
fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

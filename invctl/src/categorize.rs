//! Deterministic categorization of free-text item names.
//!
//! Resale reporting groups items by a business category derived purely from
//! the item's common name. Matching is case-insensitive and first-match-wins
//! over an ordered rule table; rule order is part of the contract because
//! keyword sets overlap (fog juice is A/V stock even though "JUICE" also
//! appears in slushie supply names).

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Closed set of business categories for resale reporting.
///
/// Serializes as its display label, which is what the presentation layer and
/// the aggregate views key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Category {
    #[serde(rename = "A/V Resale")]
    AvResale,
    #[serde(rename = "Chocolate Resale")]
    ChocolateResale,
    #[serde(rename = "Cotton Candy Resale")]
    CottonCandyResale,
    #[serde(rename = "Disposable Resale")]
    DisposableResale,
    #[serde(rename = "Popcorn-Cheese-Donut Resale")]
    PopcornCheeseDonutResale,
    #[serde(rename = "Slushie Resale")]
    SlushieResale,
    #[serde(rename = "SnoKone Resale")]
    SnoKoneResale,
    #[serde(rename = "KwikCover Round 30/36")]
    KwikCoverRound30x36,
    #[serde(rename = "KwikCover Round 48/60")]
    KwikCoverRound48x60,
    #[serde(rename = "KwikCover 6ft Banquet")]
    KwikCoverBanquet6,
    #[serde(rename = "KwikCover 8ft Banquet")]
    KwikCoverBanquet8,
    #[serde(rename = "KwikCover Other")]
    KwikCoverOther,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::AvResale => "A/V Resale",
            Category::ChocolateResale => "Chocolate Resale",
            Category::CottonCandyResale => "Cotton Candy Resale",
            Category::DisposableResale => "Disposable Resale",
            Category::PopcornCheeseDonutResale => "Popcorn-Cheese-Donut Resale",
            Category::SlushieResale => "Slushie Resale",
            Category::SnoKoneResale => "SnoKone Resale",
            Category::KwikCoverRound30x36 => "KwikCover Round 30/36",
            Category::KwikCoverRound48x60 => "KwikCover Round 48/60",
            Category::KwikCoverBanquet6 => "KwikCover 6ft Banquet",
            Category::KwikCoverBanquet8 => "KwikCover 8ft Banquet",
            Category::KwikCoverOther => "KwikCover Other",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct Rule {
    keywords: &'static [&'static str],
    category: Category,
}

/// Ordered rule table. A rule matches when the normalized name contains any
/// of its keywords; the first matching rule wins. The KwikCover size rules
/// rely on this ordering: the generic "KWIKCOVER" rule must come last so the
/// size-specific rules get first refusal.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["FOG", "JUICE"],
        category: Category::AvResale,
    },
    Rule {
        keywords: &["CHOCOLATE"],
        category: Category::ChocolateResale,
    },
    Rule {
        keywords: &["COTTON CANDY", "FLOSS SUGAR"],
        category: Category::CottonCandyResale,
    },
    Rule {
        keywords: &["DISPOSABLE"],
        category: Category::DisposableResale,
    },
    Rule {
        keywords: &["POPCORN", "CHEESE", "DONUT"],
        category: Category::PopcornCheeseDonutResale,
    },
    Rule {
        keywords: &["SLUSHIE", "SLUSH MIX"],
        category: Category::SlushieResale,
    },
    Rule {
        keywords: &["SNO KONE", "SNOKONE", "KONE SYRUP"],
        category: Category::SnoKoneResale,
    },
    Rule {
        keywords: &["KWIKCOVER ROUND 30", "KWIKCOVER ROUND 36"],
        category: Category::KwikCoverRound30x36,
    },
    Rule {
        keywords: &["KWIKCOVER ROUND 48", "KWIKCOVER ROUND 60"],
        category: Category::KwikCoverRound48x60,
    },
    Rule {
        keywords: &["KWIKCOVER 6"],
        category: Category::KwikCoverBanquet6,
    },
    Rule {
        keywords: &["KWIKCOVER 8"],
        category: Category::KwikCoverBanquet8,
    },
    Rule {
        keywords: &["KWIKCOVER"],
        category: Category::KwikCoverOther,
    },
];

/// Map a free-text common name to its business category.
///
/// Total over its domain: empty and unmatched names fall through to
/// [`Category::Other`]. Pure and safe to call concurrently.
pub fn categorize(common_name: &str) -> Category {
    let name = common_name.trim().to_uppercase();
    if name.is_empty() {
        return Category::Other;
    }
    for rule in RULES {
        if rule.keywords.iter().any(|keyword| name.contains(keyword)) {
            return rule.category;
        }
    }
    Category::Other
}

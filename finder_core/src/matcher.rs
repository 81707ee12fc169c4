//! Local building lookup over the in-memory catalog.
//!
//! `find_one` runs a fixed priority cascade (code, nickname, English name,
//! Korean name). Within a tier the first record in catalog order wins.
//! `find_category` is the low-precision fallback for queries such as
//! "library" that name a kind of building rather than a single one.

use crate::BuildingRecord;

/// Which tier of the cascade produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Code,
    Nickname,
    EnglishName,
    KoreanName,
}

impl MatchTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Nickname => "nickname",
            Self::EnglishName => "name_en",
            Self::KoreanName => "name_kr",
        }
    }
}

/// A bilingual building category keyword pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub english: &'static str,
    pub korean: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        english: "library",
        korean: "도서관",
    },
    Category {
        english: "law",
        korean: "법학",
    },
    Category {
        english: "education",
        korean: "사범",
    },
    Category {
        english: "business",
        korean: "경영",
    },
    Category {
        english: "engineering",
        korean: "공학",
    },
    Category {
        english: "science",
        korean: "과학",
    },
    Category {
        english: "dormitory",
        korean: "기숙사",
    },
];

/// Outcome of resolving one identifier against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Exact(&'a BuildingRecord, MatchTier),
    Category(Vec<&'a BuildingRecord>),
    NoMatch,
}

#[must_use]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn without_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Best single match for `query`, or `None`.
#[must_use]
pub fn find_one<'a>(query: &str, records: &'a [BuildingRecord]) -> Option<&'a BuildingRecord> {
    find_one_with_tier(query, records).map(|(record, _)| record)
}

/// Like [`find_one`], also reporting the tier that matched.
#[must_use]
pub fn find_one_with_tier<'a>(
    query: &str,
    records: &'a [BuildingRecord],
) -> Option<(&'a BuildingRecord, MatchTier)> {
    let q = normalize(query);
    if q.is_empty() {
        return None;
    }

    if let Some(record) = records
        .iter()
        .find(|b| !b.code.is_empty() && normalize(&b.code) == q)
    {
        return Some((record, MatchTier::Code));
    }

    if let Some(record) = records
        .iter()
        .find(|b| b.nicknames().any(|piece| normalize(piece).contains(&q)))
    {
        return Some((record, MatchTier::Nickname));
    }

    if let Some(record) = records
        .iter()
        .find(|b| !b.name_en.is_empty() && normalize(&b.name_en).contains(&q))
    {
        return Some((record, MatchTier::EnglishName));
    }

    let compact = without_whitespace(&q);
    records
        .iter()
        .find(|b| {
            !b.name_kr.is_empty() && without_whitespace(&normalize(&b.name_kr)).contains(&compact)
        })
        .map(|record| (record, MatchTier::KoreanName))
}

/// The first known category whose keyword appears in `query`.
#[must_use]
pub fn detect_category(query: &str) -> Option<&'static Category> {
    let q = query.to_lowercase();
    CATEGORIES
        .iter()
        .find(|c| q.contains(c.english) || q.contains(c.korean))
}

/// Every record belonging to the category named in `query`, in catalog order.
#[must_use]
pub fn find_category<'a>(query: &str, records: &'a [BuildingRecord]) -> Vec<&'a BuildingRecord> {
    let Some(category) = detect_category(query) else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|b| {
            b.name_en.to_lowercase().contains(category.english) || b.name_kr.contains(category.korean)
        })
        .collect()
}

/// Exact cascade first, category search as the fallback.
#[must_use]
pub fn resolve<'a>(query: &str, records: &'a [BuildingRecord]) -> Resolution<'a> {
    if let Some((record, tier)) = find_one_with_tier(query, records) {
        return Resolution::Exact(record, tier);
    }

    let candidates = find_category(query, records);
    if candidates.is_empty() {
        Resolution::NoMatch
    } else {
        Resolution::Category(candidates)
    }
}

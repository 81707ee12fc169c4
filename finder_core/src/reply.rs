//! User-facing reply text.

use crate::BuildingRecord;
use crate::matcher::Resolution;

/// Reply language, picked from the user's own message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Korean,
}

impl Language {
    /// Korean as soon as the text contains any Hangul.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_hangul) {
            Self::Korean
        } else {
            Self::English
        }
    }
}

const fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7A3}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[must_use]
pub fn format_found(record: &BuildingRecord, lang: Language) -> String {
    let header = match lang {
        Language::English => "Here is the information.",
        Language::Korean => "요청하신 건물 정보입니다.",
    };

    format!(
        "{header}\nCode: {}\nBuilding name(KOREAN): {}\nBuilding name(ENGLISH): {}\nMap link(Naver map): {}",
        or_dash(&record.code),
        or_dash(&record.name_kr),
        or_dash(&record.name_en),
        or_dash(&record.map_link),
    )
}

/// Short list of buildings for a category answer.
#[must_use]
pub fn format_candidates(records: &[&BuildingRecord], lang: Language) -> String {
    let header = match lang {
        Language::English => "I found several buildings that may match:",
        Language::Korean => "관련된 건물 목록입니다:",
    };

    let mut out = String::from(header);
    for record in records {
        let mut line = String::from("\n-");
        for part in [&record.code, &record.name_kr] {
            if !part.is_empty() {
                line.push(' ');
                line.push_str(part);
            }
        }
        if !record.name_en.is_empty() {
            line.push_str(&format!(" ({})", record.name_en));
        }
        out.push_str(&line);
    }
    out
}

#[must_use]
pub const fn not_found(lang: Language) -> &'static str {
    match lang {
        Language::English => "The code you entered was not recognized. Please try again.",
        Language::Korean => "입력하신 건물을 찾을 수 없습니다. 다시 시도해 주세요.",
    }
}

#[must_use]
pub const fn upstream_failure(lang: Language) -> &'static str {
    match lang {
        Language::English => {
            "Sorry, the assistant is temporarily unavailable. Please try again in a moment."
        }
        Language::Korean => "죄송합니다. 잠시 후 다시 시도해 주세요.",
    }
}

#[must_use]
pub fn render(resolution: &Resolution<'_>, lang: Language) -> String {
    match resolution {
        Resolution::Exact(record, _) => format_found(record, lang),
        Resolution::Category(records) => format_candidates(records, lang),
        Resolution::NoMatch => not_found(lang).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchTier;

    fn hana_square() -> BuildingRecord {
        BuildingRecord {
            name_kr: "하나스퀘어".to_string(),
            name_en: "Hana Square".to_string(),
            map_link: "https://map.example/141".to_string(),
            nickname: "하나,HanaSquare".to_string(),
            code: "141".to_string(),
            ..BuildingRecord::default()
        }
    }

    #[test]
    fn detects_korean_messages() {
        assert_eq!(Language::detect("하나스퀘어 어디야?"), Language::Korean);
        assert_eq!(Language::detect("where is 141"), Language::English);
        assert_eq!(Language::detect(""), Language::English);
    }

    #[test]
    fn found_reply_uses_fixed_layout() {
        let reply = format_found(&hana_square(), Language::English);
        assert_eq!(
            reply,
            "Here is the information.\nCode: 141\nBuilding name(KOREAN): 하나스퀘어\nBuilding name(ENGLISH): Hana Square\nMap link(Naver map): https://map.example/141"
        );
    }

    #[test]
    fn missing_map_link_renders_dash() {
        let record = BuildingRecord {
            map_link: String::new(),
            ..hana_square()
        };
        assert!(format_found(&record, Language::Korean).ends_with("Map link(Naver map): -"));
    }

    #[test]
    fn candidates_skip_empty_parts() {
        let a = hana_square();
        let b = BuildingRecord {
            name_kr: "중앙도서관".to_string(),
            ..BuildingRecord::default()
        };
        let reply = format_candidates(&[&a, &b], Language::English);
        assert_eq!(
            reply,
            "I found several buildings that may match:\n- 141 하나스퀘어 (Hana Square)\n- 중앙도서관"
        );
    }

    #[test]
    fn render_covers_every_resolution() {
        let record = hana_square();
        assert!(
            render(&Resolution::Exact(&record, MatchTier::Code), Language::English)
                .starts_with("Here is the information.")
        );
        assert_eq!(
            render(&Resolution::NoMatch, Language::Korean),
            not_found(Language::Korean)
        );
    }
}

//! Header alias resolution.

use csv::StringRecord;

/// Logical catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CampusKr,
    CampusEn,
    NameKr,
    NameEn,
    MapLink,
    Nickname,
    Code,
}

impl Field {
    pub const ALL: [Self; 7] = [
        Self::CampusKr,
        Self::CampusEn,
        Self::NameKr,
        Self::NameEn,
        Self::MapLink,
        Self::Nickname,
        Self::Code,
    ];

    /// Known header spellings, in lookup priority order.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::CampusKr => &["Campus(KR)", "캠퍼스(KR)"],
            Self::CampusEn => &["Campus(EN)", "캠퍼스(EN)"],
            Self::NameKr => &[
                "Building name(KR)",
                "Building Name(KR)",
                "건물명(KR)",
                "Building name (KR)",
            ],
            Self::NameEn => &[
                "Building Name(EN)",
                "Building name(EN)",
                "Name(EN)",
                "영문명",
            ],
            Self::MapLink => &["Naver map link", "Map link", "지도링크", "Naver Map link"],
            Self::Nickname => &["Abbreviations (Nicknames)", "Nickname", "Nicknames", "별칭"],
            Self::Code => &["Building Code", "Code", "Building code"],
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Column positions of every alias present in the header, per field.
#[derive(Debug, Clone, Default)]
pub(crate) struct ColumnMap {
    positions: [Vec<usize>; 7],
}

impl ColumnMap {
    pub(crate) fn from_headers(headers: &StringRecord) -> Self {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let mut map = Self::default();
        for field in Field::ALL {
            map.positions[field.slot()] = field
                .aliases()
                .iter()
                .filter_map(|alias| names.iter().position(|name| name == alias))
                .collect();
        }
        map
    }

    pub(crate) fn has_field(&self, field: Field) -> bool {
        !self.positions[field.slot()].is_empty()
    }

    pub(crate) fn recognized(&self) -> usize {
        Field::ALL.into_iter().filter(|f| self.has_field(*f)).count()
    }

    /// Value of the first alias column whose cell is non-empty.
    ///
    /// Surrounding whitespace and literal double quotes are removed.
    pub(crate) fn value(&self, field: Field, row: &StringRecord) -> String {
        self.positions[field.slot()]
            .iter()
            .filter_map(|&idx| row.get(idx))
            .find(|cell| !cell.is_empty())
            .map(|cell| cell.replace('"', "").trim().to_string())
            .unwrap_or_default()
    }
}

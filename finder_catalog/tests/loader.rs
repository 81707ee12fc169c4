//! Integration tests for loading the building catalog from CSV files.

use std::io::Write;

use finder_catalog::{CatalogError, load_catalog, load_catalog_from_reader};
use finder_core::find_one;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const CURRENT_DIALECT: &str = "\
Campus(KR),Campus(EN),Building name(KR),Naver map link,Abbreviations (Nicknames),Building Name(EN),Building Code
서울,Seoul,하나스퀘어,https://map.example/141,\"하나,HanaSquare\",Hana Square,141
서울,Seoul,중앙도서관,https://map.example/142,\"중도, CL\",Main Library,142
서울,Seoul,과학도서관,,과도,Science Library,143
";

#[test]
fn loads_rows_in_file_order() {
    let file = write_csv(CURRENT_DIALECT);
    let catalog = load_catalog(file.path()).unwrap();

    let codes: Vec<&str> = catalog.iter().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["141", "142", "143"]);

    let hana = &catalog[0];
    assert_eq!(hana.campus_kr, "서울");
    assert_eq!(hana.campus_en, "Seoul");
    assert_eq!(hana.name_kr, "하나스퀘어");
    assert_eq!(hana.name_en, "Hana Square");
    assert_eq!(hana.map_link, "https://map.example/141");
    assert_eq!(hana.nickname, "하나,HanaSquare");
    assert!(catalog[2].map_link.is_empty());
}

#[test]
fn older_header_spellings_are_recognized() {
    let file = write_csv(
        "캠퍼스(KR),건물명(KR),영문명,지도링크,별칭,Code\n\
         서울,본관,Main Building,https://map.example/101,본관,101\n",
    );
    let catalog = load_catalog(file.path()).unwrap();

    assert_eq!(catalog.len(), 1);
    let record = &catalog[0];
    assert_eq!(record.campus_kr, "서울");
    assert_eq!(record.campus_en, "");
    assert_eq!(record.name_en, "Main Building");
    assert_eq!(record.map_link, "https://map.example/101");
    assert_eq!(record.code, "101");
}

#[test]
fn unknown_headers_are_ignored() {
    let catalog = load_catalog_from_reader("Floor,Code\n3,141\n".as_bytes()).unwrap();
    assert_eq!(catalog[0].code, "141");
    assert_eq!(catalog[0].name_kr, "");
}

#[test]
fn stray_quotes_and_whitespace_are_stripped() {
    let catalog =
        load_catalog_from_reader("Code,Name(EN)\n\"  \"\"141\"\"  \",  Hana Square  \n".as_bytes())
            .unwrap();
    assert_eq!(catalog[0].code, "141");
    assert_eq!(catalog[0].name_en, "Hana Square");
}

#[test]
fn ragged_rows_are_tolerated() {
    let catalog = load_catalog_from_reader(
        "Code,Name(EN),Map link\n141,Hana Square\n142,Main Library,https://map.example/142,extra\n"
            .as_bytes(),
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].map_link, "");
    assert_eq!(catalog[1].map_link, "https://map.example/142");
}

#[test]
fn utf8_bom_does_not_hide_first_header() {
    let catalog = load_catalog_from_reader("\u{feff}Building Code,영문명\n141,Hana Square\n".as_bytes())
        .unwrap();
    assert_eq!(catalog[0].code, "141");
}

#[test]
fn missing_file_is_a_data_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_catalog(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, CatalogError::FileNotFound { .. }));
    assert!(err.to_string().contains("missing.csv"));
}

#[test]
fn empty_file_has_no_header() {
    let file = write_csv("");
    let err = load_catalog(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingHeader { .. }));
}

#[test]
fn every_loaded_record_is_found_by_its_own_code() {
    let file = write_csv(CURRENT_DIALECT);
    let catalog = load_catalog(file.path()).unwrap();

    for record in &catalog {
        assert_eq!(find_one(&record.code, &catalog), Some(record));
    }
}

mod common;

use common::BoundedLog;
use fdc_core::utils::{
    catalog::{encode_row, parse_first_row},
    controllers::{CsvLog, DataLog},
    glyph::{self, Glyph},
    Action, Catalog, CatalogSource,
};

fn sample_actions(count: usize) -> Vec<Action> {
    let glyphs = [glyph::STILL, glyph::SHAKE, glyph::GO, glyph::RECORDING, glyph::EXIT];
    (0..count)
        .map(|i| Action::new(format!("action {}", i), glyphs[i % glyphs.len()]))
        .collect()
}

fn with_samples(row: &str) -> Vec<u8> {
    let mut text = row.as_bytes().to_vec();
    text.extend_from_slice(b"action,still,\n1,2,3\n4,5,6\n");
    text
}

#[test]
fn test_round_trip_through_log() {
    for count in [0, 1, 5] {
        let actions = sample_actions(count);
        let row = encode_row(&actions).unwrap();
        let text = with_samples(&row);
        let mut log = CsvLog::with_preamble(text.len(), &text);
        let len = log.length().unwrap();
        let parsed = parse_first_row(&mut log, len).unwrap();
        assert_eq!(parsed, actions, "round trip of {} actions", count);
    }
}

#[test]
fn test_loaded_catalog_matches_encoded_row() {
    let actions = sample_actions(5);
    let text = with_samples(&encode_row(&actions).unwrap());
    let mut log = CsvLog::with_preamble(4096, &text);
    let catalog = Catalog::load(&mut log).unwrap();
    assert_eq!(catalog.source(), CatalogSource::Log);
    assert_eq!(catalog.actions(), actions.as_slice());
}

#[test]
fn test_empty_log_gives_default_catalog() {
    let mut log = CsvLog::new(128);
    let catalog = Catalog::load(&mut log).unwrap();
    assert_eq!(catalog.source(), CatalogSource::Builtin);
    assert!(catalog.len() >= 1);
}

#[test]
fn test_empty_row_gives_default_catalog() {
    let text = with_samples(&encode_row(&[]).unwrap());
    let mut log = CsvLog::with_preamble(4096, &text);
    assert_eq!(Catalog::load(&mut log).unwrap(), Catalog::builtin());
}

#[test]
fn test_short_segment_reads_stay_in_bounds() {
    let text = b"ab;cd0101;";
    let mut log = BoundedLog::new(text, text.len());
    let actions = parse_first_row(&mut log, text.len()).unwrap();
    assert!(actions.is_empty());
    assert!(log.furthest_read <= text.len());
}

#[test]
fn test_reads_stop_at_reported_length() {
    // the log holds more bytes than it reports
    let text = b"wave1000101010001000101010001;jump1111110001100011000111111;\n";
    let limit = 40;
    let mut log = BoundedLog::new(text, limit);
    let catalog = Catalog::load(&mut log).unwrap();
    assert_eq!(catalog.actions(), &[Action::new("wave", glyph::EXIT)]);
    assert!(log.furthest_read <= limit);
}

#[test]
fn test_reads_stop_at_first_newline() {
    let mut text = b"wave1000101010001000101010001;\n".to_vec();
    text.extend(std::iter::repeat(b'x').take(4096));
    let mut log = BoundedLog::new(&text, text.len());
    let actions = parse_first_row(&mut log, text.len()).unwrap();
    assert_eq!(actions.len(), 1);
    assert!(log.furthest_read < 128, "read {} bytes", log.furthest_read);
}

#[test]
fn test_glyph_survives_round_trip() {
    let glyph = Glyph::from_storage(b"1010101010101010101010101");
    let row = encode_row(&[Action::new("checker", glyph)]).unwrap();
    assert_eq!(row, "checker1010101010101010101010101;\n");
    let mut log = CsvLog::with_preamble(row.len(), row.as_bytes());
    let parsed = parse_first_row(&mut log, row.len()).unwrap();
    assert_eq!(parsed[0].glyph.to_display(), glyph.to_display());
}

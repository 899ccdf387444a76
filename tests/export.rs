mod common;

use common::*;
use groupset::{DecodeOptions, decode_slice, export::write_csv};

#[test]
fn tables_round_trip_to_csv() {
    let data = FitFileBuilder::new()
        .definition(0, 20, &[(3, 1, UINT8), (4, 1, UINT8)])
        .data(0, &[120, 80])
        .data(0, &[0xFF, 85])
        .build();

    let report = decode_slice(&data, &DecodeOptions::default()).unwrap();

    let directory = tempfile::tempdir().unwrap();
    let written = write_csv(&report.tables, directory.path()).unwrap();
    assert_eq!(written, [directory.path().join("record_mesgs.csv")]);

    let contents = std::fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, ["heart_rate,cadence", "120,80", ",85"]);
}

#[test]
fn arrays_join_with_semicolons() {
    let data = FitFileBuilder::new()
        .definition(0, 300, &[(0, 3, UINT8)])
        .data(0, &[1, 2, 3])
        .build();

    let report = decode_slice(&data, &DecodeOptions::default()).unwrap();

    let directory = tempfile::tempdir().unwrap();
    let written = write_csv(&report.tables, directory.path()).unwrap();

    let contents = std::fs::read_to_string(&written[0]).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, ["field_0", "1;2;3"]);
}

#[test]
fn one_file_per_message_type() {
    let data = FitFileBuilder::new()
        .definition(0, 0, &[(1, 2, UINT16)])
        .data(0, &[1, 0])
        .definition(1, 20, &[(3, 1, UINT8)])
        .data(1, &[130])
        .build();

    let report = decode_slice(&data, &DecodeOptions::default()).unwrap();

    let directory = tempfile::tempdir().unwrap();
    let written = write_csv(&report.tables, directory.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(directory.path().join("file_id_mesgs.csv").is_file());
    assert!(directory.path().join("record_mesgs.csv").is_file());
}

use std::io::Write;

use msku_ingest::{
    DetectionMethod, DetectionOptions, column_values, detect_identifier_column,
    detect_identifier_column_with, read_csv_frame,
};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", content).expect("write csv");
    file
}

#[test]
fn detects_sku_column_in_sales_export() {
    let file = create_temp_csv(
        "Date,Order Number,Qty,Seller SKU\n\
         2024-05-01,405-1234,1,WH001\n\
         2024-05-02,405-5678,2,HEADPHONE_BT\n",
    );
    let df = read_csv_frame(file.path()).expect("read csv");
    assert_eq!(detect_identifier_column(&df).as_deref(), Some("Seller SKU"));
}

#[test]
fn falls_back_to_value_sample() {
    let file = create_temp_csv(
        "qty,amount,ref\n\
         1,10.50,X0024AAU4D\n\
         2,3.25,X0027Z4S1L\n\
         7,7,FUSKED-TEE-M\n",
    );
    let df = read_csv_frame(file.path()).expect("read csv");
    let found =
        detect_identifier_column_with(&df, &DetectionOptions::default()).expect("detected");

    assert_eq!(found.column, "ref");
    assert!(matches!(found.method, DetectionMethod::ValueSample { .. }));
}

#[test]
fn custom_sample_threshold() {
    let file = create_temp_csv("amount,ref\n1.5,WH001\n2.5,ab\n3.5,cd\n");
    let df = read_csv_frame(file.path()).expect("read csv");

    assert_eq!(detect_identifier_column(&df), None);
    let lenient = DetectionOptions {
        sample_size: 10,
        min_identifier_ratio: 0.3,
    };
    let found = detect_identifier_column_with(&df, &lenient).expect("detected");
    assert_eq!(found.column, "ref");
}

#[test]
fn column_values_from_csv() {
    let file = create_temp_csv("sku,qty\nWH001,1\n,2\n 0042 ,3\n");
    let df = read_csv_frame(file.path()).expect("read csv");
    let values = column_values(&df, "sku").expect("values");
    assert_eq!(values.len(), 3);
    assert_eq!(values[0].as_deref(), Some("WH001"));
    assert_eq!(values[1], None);
    assert_eq!(values[2].as_deref(), Some(" 0042 "));
}

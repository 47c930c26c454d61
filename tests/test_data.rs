use chrono::NaiveDate;
use demand_forecast::data::{design_matrix, parse_sale_date, EntityIndex, SalesRecord};
use demand_forecast::error::ForecastError;
use demand_forecast::features::FeatureBuilder;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_sale_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    assert_eq!(parse_sale_date("2024-05-01").unwrap(), expected);
    assert_eq!(parse_sale_date("2024-05-01 10:30:00").unwrap(), expected);
    assert_eq!(parse_sale_date("2024-05-01T10:30:00").unwrap(), expected);

    let err = parse_sale_date("05/01/2024").unwrap_err();
    assert!(matches!(err, ForecastError::Parse(_)));
}

#[test]
fn test_entity_index_groups_and_sorts() {
    let records = vec![
        SalesRecord::new(2, "2024-01-03", 5, 25.0),
        SalesRecord::new(1, "2024-01-02", 3, 15.0),
        SalesRecord::new(1, "2024-01-01", 4, 20.0),
        SalesRecord::new(2, "2024-01-01", 7, 35.0),
    ];

    let index = EntityIndex::build(&records).unwrap();

    assert_eq!(index.entity_count(), 2);
    assert_eq!(index.len(), 4);
    // within each product, indices are sorted by date
    assert_eq!(index.series(1).unwrap(), &[2, 1]);
    assert_eq!(index.series(2).unwrap(), &[3, 0]);
    assert!(index.series(99).is_none());
}

#[test]
fn test_entity_index_duplicate_dates_keep_input_order() {
    // two sales on the same day: the earlier input row stays first
    let records = vec![
        SalesRecord::new(1, "2024-01-02", 5, 25.0),
        SalesRecord::new(1, "2024-01-01", 3, 15.0),
        SalesRecord::new(1, "2024-01-02", 7, 35.0),
    ];

    let index = EntityIndex::build(&records).unwrap();
    assert_eq!(index.series(1).unwrap(), &[1, 0, 2]);

    // the same contract holds through the feature table
    let features = FeatureBuilder::build(&records).unwrap();
    let targets: Vec<f64> = features.iter().map(|f| f.target).collect();
    assert_eq!(targets, vec![3.0, 5.0, 7.0]);
}

#[test]
fn test_entity_index_rejects_bad_date() {
    let records = vec![
        SalesRecord::new(1, "2024-01-01", 4, 20.0),
        SalesRecord::new(1, "not-a-date", 5, 25.0),
    ];

    let err = EntityIndex::build(&records).unwrap_err();
    assert!(matches!(err, ForecastError::Parse(ref raw) if raw == "not-a-date"));
}

#[test]
fn test_feature_row_schema() {
    let records = vec![
        SalesRecord::new(3, "2024-01-01", 10, 50.0),
        SalesRecord::new(3, "2024-01-02", 12, 60.0),
    ];
    let features = FeatureBuilder::build(&records).unwrap();

    let row = features[1].to_row();
    assert_eq!(row.len(), 11);
    assert_eq!(row[0], 3.0); // entity id leads the schema
    assert_eq!(row[1], features[1].day_of_week as f64);
    assert_eq!(row[10], features[1].rolling_30);

    let (x, y) = design_matrix(&features);
    assert_eq!(x.len(), 2);
    assert_eq!(y, vec![10.0, 12.0]);
}

#[test]
fn test_sales_record_serde_round_trip() {
    let record = SalesRecord::new(7, "2024-03-15", 42, 199.5);
    let json = serde_json::to_string(&record).unwrap();
    let back: SalesRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

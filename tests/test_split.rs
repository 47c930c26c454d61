use chrono::{Duration, NaiveDate};
use demand_forecast::data::{CalendarFeatures, FeatureVector};
use demand_forecast::error::ForecastError;
use demand_forecast::split::DatasetSplitter;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn feature_row(entity_id: u32, date: NaiveDate, target: f64) -> FeatureVector {
    let calendar = CalendarFeatures::from_date(date);
    FeatureVector {
        entity_id,
        date,
        day_of_week: calendar.day_of_week,
        month: calendar.month,
        iso_week: calendar.iso_week,
        day_of_month: calendar.day_of_month,
        quarter: calendar.quarter,
        lag_7: 0.0,
        lag_14: 0.0,
        lag_30: 0.0,
        rolling_7: target,
        rolling_30: target,
        target,
    }
}

/// Two products with interleaved dates, laid out entity-block first the way
/// the feature builder emits them
fn blocked_features(rows_per_entity: usize) -> Vec<FeatureVector> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut features = Vec::new();
    for entity_id in [1u32, 2] {
        for i in 0..rows_per_entity {
            let date = start + Duration::days(i as i64);
            features.push(feature_row(entity_id, date, (entity_id * 10 + i as u32) as f64));
        }
    }
    features
}

#[test]
fn test_75_25_split_on_100_rows() {
    let features = blocked_features(50);
    assert_eq!(features.len(), 100);

    let (train, test) = DatasetSplitter::split(features.clone(), 0.25).unwrap();

    assert_eq!(train.len(), 75);
    assert_eq!(test.len(), 25);

    // concatenating train + test reproduces the date-sorted input exactly
    let mut expected = features;
    expected.sort_by_key(|f| f.date);
    let combined: Vec<FeatureVector> = train.iter().chain(test.iter()).cloned().collect();
    assert_eq!(combined, expected);
}

#[test]
fn test_split_is_a_single_global_cutover() {
    let features = blocked_features(20);
    let (train, test) = DatasetSplitter::split(features, 0.25).unwrap();

    let last_train_date = train.last().unwrap().date;
    let first_test_date = test.first().unwrap().date;
    assert!(last_train_date <= first_test_date);

    // both products appear on the train side; the cutover is by date, not id
    assert!(train.iter().any(|f| f.entity_id == 1));
    assert!(train.iter().any(|f| f.entity_id == 2));
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(-0.25)]
#[case(1.5)]
fn test_out_of_range_fraction_is_rejected(#[case] fraction: f64) {
    let features = blocked_features(10);
    let err = DatasetSplitter::split(features, fraction).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidFraction(_)));
}

#[test]
fn test_split_leaving_an_empty_side_is_rejected() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    // one row: any fraction leaves the train side empty
    let one = vec![feature_row(1, start, 5.0)];
    let err = DatasetSplitter::split(one, 0.5).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidFraction(_)));

    // two rows, aggressive fraction: floor(2 * 0.1) = 0
    let two = vec![
        feature_row(1, start, 5.0),
        feature_row(1, start + Duration::days(1), 6.0),
    ];
    let err = DatasetSplitter::split(two, 0.9).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidFraction(_)));

    // two rows, even fraction: 1 and 1 is fine
    let two = vec![
        feature_row(1, start, 5.0),
        feature_row(1, start + Duration::days(1), 6.0),
    ];
    let (train, test) = DatasetSplitter::split(two, 0.5).unwrap();
    assert_eq!(train.len(), 1);
    assert_eq!(test.len(), 1);
}

#[test]
fn test_empty_input_splits_into_empty_sides() {
    let (train, test) = DatasetSplitter::split(Vec::new(), 0.25).unwrap();
    assert!(train.is_empty());
    assert!(test.is_empty());
}

use chrono::{Duration, NaiveDate};
use demand_forecast::data::{design_matrix, SalesRecord};
use demand_forecast::features::FeatureBuilder;
use demand_forecast::forecast::ForecastEngine;
use demand_forecast::metrics::{error_distribution, evaluate_model};
use demand_forecast::models::{MeanRegressor, Regressor};
use demand_forecast::split::DatasetSplitter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: End-to-End Pipeline Example");
    println!("============================================\n");

    // Create sample data
    println!("Creating sample sales history...");
    let records = create_sample_sales(3, 120);
    println!("Sample data created: {} sales records\n", records.len());

    // Build the feature table
    println!("Building feature table...");
    let features = FeatureBuilder::build(&records)?;
    println!("Feature table built: {} rows\n", features.len());

    // Chronological 75/25 split
    println!("Splitting data into train/test (75/25)...");
    let (train, test) = DatasetSplitter::split(features.clone(), 0.25)?;
    println!("Train set: {} rows", train.len());
    println!("Test set:  {} rows\n", test.len());

    // Fit the baseline model
    println!("Fitting baseline model...");
    let (x_train, y_train) = design_matrix(&train);
    let mut model = MeanRegressor::new();
    model.fit(&x_train, &y_train)?;
    println!("Model fitted: {}\n", model.name());

    // Evaluate on both sides of the split
    let train_metrics = evaluate_model(&model, &train)?;
    let test_metrics = evaluate_model(&model, &test)?;
    println!("Training set:\n{}", train_metrics);
    println!("Test set:\n{}", test_metrics);

    let (x_test, y_test) = design_matrix(&test);
    let predicted = model.predict(&x_test)?;
    let dist = error_distribution(&predicted, &y_test)?;
    println!("Error distribution on test:");
    println!("  Median error:  {:.2} units", dist.median);
    println!("  Max error:     {:.2} units", dist.max);
    println!("  Within 1 unit: {:.1}%", dist.within_1);
    println!("  Within 3 units: {:.1}%\n", dist.within_3);

    // Forecast the next week for each product
    for product_id in 1..=3 {
        let history: Vec<_> = features
            .iter()
            .filter(|f| f.entity_id == product_id)
            .cloned()
            .collect();
        let predictions = ForecastEngine::forecast(&model, product_id, 7, &history)?;
        println!("Product {} next 7 days: {:?}", product_id, predictions);
    }

    println!("\nForecasting complete!");
    Ok(())
}

/// Create daily sales for several products with weekly seasonality and noise
fn create_sample_sales(products: u32, days: usize) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut records = Vec::with_capacity(products as usize * days);

    for product_id in 1..=products {
        let base = 8.0 + product_id as f64 * 4.0;
        for i in 0..days {
            let date = start + Duration::days(i as i64);
            let weekday = (i % 7) as f64;
            let seasonality = (weekday * std::f64::consts::PI / 7.0).sin() * 3.0;
            let noise: f64 = rng.gen_range(-2.0..2.0);

            let quantity = (base + seasonality + noise).round().max(0.0) as u32;
            let amount = quantity as f64 * (5.0 + product_id as f64);
            records.push(SalesRecord::new(product_id, date.to_string(), quantity, amount));
        }
    }

    records
}

//! Tests for the simulated price model

use super::predictor::solve_normal_equations;
use super::*;
use rust_decimal_macros::dec;

#[test]
fn test_solver_identity() {
    let a = [[1.0, 0.0], [0.0, 1.0]];
    let b = [3.0, -2.0];
    let x = solve_normal_equations(a, b).unwrap();
    assert!((x[0] - 3.0).abs() < 1e-12);
    assert!((x[1] + 2.0).abs() < 1e-12);
}

#[test]
fn test_solver_needs_pivoting() {
    // Zero on the leading diagonal forces a row swap
    let a = [[0.0, 2.0], [4.0, 1.0]];
    let b = [4.0, 6.0];
    let x = solve_normal_equations(a, b).unwrap();
    assert!((x[0] - 1.0).abs() < 1e-9);
    assert!((x[1] - 2.0).abs() < 1e-9);
}

#[test]
fn test_solver_singular() {
    let a = [[1.0, 2.0], [2.0, 4.0]];
    let b = [1.0, 2.0];
    assert!(solve_normal_equations(a, b).is_err());
}

#[test]
fn test_training_recovers_synthetic_relationship() {
    let model = SimulatedPricePredictor::train(TRAINING_SAMPLES, TRAINING_SEED).unwrap();
    let coef = model.coefficients();

    // price, price*season, price*demand
    assert!((coef[1] - 1.0).abs() < 0.02, "price coefficient {}", coef[1]);
    assert!((coef[2] - 0.1).abs() < 0.02, "season coefficient {}", coef[2]);
    assert!((coef[3] - 0.05).abs() < 0.01, "demand coefficient {}", coef[3]);
    assert_eq!(model.samples(), TRAINING_SAMPLES);
}

#[test]
fn test_training_is_deterministic() {
    let a = SimulatedPricePredictor::train(2_000, 7).unwrap();
    let b = SimulatedPricePredictor::train(2_000, 7).unwrap();
    assert_eq!(a.coefficients(), b.coefficients());
}

#[test]
fn test_too_few_samples_rejected() {
    assert!(SimulatedPricePredictor::train(3, 1).is_err());
}

#[test]
fn test_prediction_ranges() {
    let model = SimulatedPricePredictor::train(TRAINING_SAMPLES, TRAINING_SEED).unwrap();
    let prediction = model.predict(100.0, 3, 2);

    // Unit demand adds ~5%
    assert!(prediction.predicted_price > dec!(100), "{:?}", prediction);
    assert!(prediction.predicted_price < dec!(110), "{:?}", prediction);
    assert!(prediction.confidence >= dec!(0.85));
    assert!(prediction.confidence <= dec!(0.97));
    assert!(prediction.change_percent > dec!(0));
    assert!(model.is_ready());
}

#[test]
fn test_zero_price_has_zero_change() {
    let model = SimulatedPricePredictor::train(1_000, 1).unwrap();
    let prediction = model.predict(0.0, 0, 0);
    assert_eq!(prediction.change_percent, dec!(0));
}

#[test]
fn test_recommendation_thresholds() {
    assert_eq!(Recommendation::from_change(dec!(5.01)), Recommendation::Buy);
    assert_eq!(Recommendation::from_change(dec!(5)), Recommendation::Hold);
    assert_eq!(Recommendation::from_change(dec!(-4.99)), Recommendation::Hold);
    assert_eq!(Recommendation::from_change(dec!(-5)), Recommendation::Sell);
}

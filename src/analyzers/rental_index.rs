// The three weights sum to 1, so three 0–100 inputs give a 0–100 index.
const CITY_COMPARE_WEIGHT: f64 = 0.5;
const PRICE_TREND_WEIGHT: f64 = 0.25;
const PRICE_STABILITY_WEIGHT: f64 = 0.25;

/// Combines the normalized rent-ratio, slope and R² ranks into one score.
///
/// `city_compare` weighs half, `price_trend` and `price_stability` a quarter each.
pub fn rental_index(city_compare: f64, price_trend: f64, price_stability: f64) -> f64 {
    CITY_COMPARE_WEIGHT * city_compare
        + PRICE_TREND_WEIGHT * price_trend
        + PRICE_STABILITY_WEIGHT * price_stability
}

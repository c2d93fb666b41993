/// Base of the tick to price relation.
pub const TICK_BASE: f64 = 1.0001;

/// Lowest tick a pool can initialize.
pub const MIN_TICK: i32 = -887_272;
/// Highest tick a pool can initialize.
pub const MAX_TICK: i32 = 887_272;

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
#[must_use]
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// Returns the smallest tick whose price is at least `price`.
///
/// Prices above the price of [`MAX_TICK`] give `MAX_TICK + 1`.
pub fn price_to_tick_ceil(price: f64) -> Result<i32, &'static str> {
    let estimate = tick_estimate(price)?.ceil();
    let mut tick = clamp_tick(estimate, MIN_TICK, MAX_TICK + 1);
    // The logarithm can be off by one ulp; settle on the same powi used for prices.
    while tick > MIN_TICK && tick_to_price(tick - 1) >= price {
        tick -= 1;
    }
    while tick <= MAX_TICK && tick_to_price(tick) < price {
        tick += 1;
    }
    Ok(tick)
}

/// Returns the largest tick whose price is at most `price`.
///
/// Prices below the price of [`MIN_TICK`] give `MIN_TICK - 1`.
pub fn price_to_tick_floor(price: f64) -> Result<i32, &'static str> {
    let estimate = tick_estimate(price)?.floor();
    let mut tick = clamp_tick(estimate, MIN_TICK - 1, MAX_TICK);
    while tick < MAX_TICK && tick_to_price(tick + 1) <= price {
        tick += 1;
    }
    while tick >= MIN_TICK && tick_to_price(tick) > price {
        tick -= 1;
    }
    Ok(tick)
}

/// tick = log_1.0001(P)
fn tick_estimate(price: f64) -> Result<f64, &'static str> {
    if !price.is_finite() || price <= 0.0 {
        return Err("Price must be positive and finite");
    }
    Ok(price.log(TICK_BASE))
}

fn clamp_tick(estimate: f64, lower: i32, upper: i32) -> i32 {
    estimate.clamp(f64::from(lower), f64::from(upper)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_to_price() {
        // Tick 0 -> Price 1, exactly
        assert_eq!(tick_to_price(0), 1.0);

        // Tick 100 -> 1.0001^100 ~= 1.010049
        let p100 = tick_to_price(100);
        let expected = 1.01004966;
        assert!((p100 - expected).abs() < 0.000001);

        let inverse = tick_to_price(-100) * p100;
        assert!((inverse - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_price_strictly_increasing() {
        let prices: Vec<f64> = (-100..=100).map(tick_to_price).collect();
        assert!(prices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_exact_tick_prices_map_back() {
        for tick in [MIN_TICK, -10_000, -61, -1, 0, 1, 60, 100, 76_012, MAX_TICK] {
            let price = tick_to_price(tick);
            assert_eq!(price_to_tick_ceil(price), Ok(tick), "ceil {tick}");
            assert_eq!(price_to_tick_floor(price), Ok(tick), "floor {tick}");
        }
    }

    #[test]
    fn test_price_between_ticks() {
        // 1.00004 and 1.00006 both sit between tick 0 (1.0) and tick 1 (1.0001).
        assert_eq!(price_to_tick_ceil(1.00004), Ok(1));
        assert_eq!(price_to_tick_floor(1.00006), Ok(0));
        assert_eq!(price_to_tick_ceil(0.99995), Ok(0));
        assert_eq!(price_to_tick_floor(0.99995), Ok(-1));

        for price in [0.0123, 0.5, 0.99999, 1.5, 1234.5678, 3_000.0] {
            let ceil = price_to_tick_ceil(price).unwrap();
            let floor = price_to_tick_floor(price).unwrap();
            assert!(tick_to_price(ceil) >= price && tick_to_price(ceil - 1) < price);
            assert!(tick_to_price(floor) <= price && tick_to_price(floor + 1) > price);
        }
    }

    #[test]
    fn test_prices_beyond_tick_range() {
        assert_eq!(price_to_tick_ceil(f64::MAX), Ok(MAX_TICK + 1));
        assert_eq!(price_to_tick_floor(f64::MAX), Ok(MAX_TICK));
        assert_eq!(price_to_tick_ceil(f64::MIN_POSITIVE), Ok(MIN_TICK));
        assert_eq!(price_to_tick_floor(f64::MIN_POSITIVE), Ok(MIN_TICK - 1));
    }

    #[test]
    fn test_invalid_prices() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(price_to_tick_ceil(price).is_err());
            assert!(price_to_tick_floor(price).is_err());
        }
    }
}

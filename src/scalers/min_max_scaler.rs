pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit on the given values. NaNs are skipped.
    pub fn new(data: &[f64]) -> Self {
        let (min, max) = data
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });

        MinMaxScaler { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Zero range, including a fit on no values.
    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min)
    }

    /// Maps the fitted min to 0.0 and max to 1.0. A degenerate fit maps
    /// everything to 0.0.
    pub fn transform(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        // halved so the range stays finite near f64::MAX
        let half_min = self.min / 2.0;
        (value / 2.0 - half_min) / (self.max / 2.0 - half_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fit_and_transform() {
        let scaler = MinMaxScaler::new(&[2.0, 4.0, 6.0]);
        assert_eq!(scaler.min(), 2.0);
        assert_eq!(scaler.max(), 6.0);
        assert_eq!(scaler.transform(2.0), 0.0);
        assert_eq!(scaler.transform(4.0), 0.5);
        assert_eq!(scaler.transform(6.0), 1.0);
    }

    #[test]
    fn test_constant_data_maps_to_zero() {
        let scaler = MinMaxScaler::new(&[3.5, 3.5, 3.5]);
        assert!(scaler.is_degenerate());
        assert_eq!(scaler.transform(3.5), 0.0);
    }

    #[test]
    fn test_empty_fit_is_degenerate() {
        let scaler = MinMaxScaler::new(&[]);
        assert!(scaler.is_degenerate());
        assert_eq!(scaler.transform(1.0), 0.0);
    }

    #[test]
    fn test_extreme_range_stays_finite() {
        let scaler = MinMaxScaler::new(&[-1e308, 1e308]);
        assert_eq!(scaler.transform(-1e308), 0.0);
        assert_eq!(scaler.transform(0.0), 0.5);
        assert_eq!(scaler.transform(1e308), 1.0);
    }

    #[test]
    fn test_nan_skipped_in_fit() {
        let scaler = MinMaxScaler::new(&[f64::NAN, -1.0, 1.0]);
        assert_eq!(scaler.min(), -1.0);
        assert_eq!(scaler.max(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_fitted_values_land_in_unit_range(
            data in prop::collection::vec(-1.0e6f64..1.0e6, 2..64)
        ) {
            let scaler = MinMaxScaler::new(&data);
            let scaled: Vec<f64> = data.iter().map(|&v| scaler.transform(v)).collect();

            for v in &scaled {
                prop_assert!((0.0..=1.0).contains(v));
            }
            if !scaler.is_degenerate() {
                let min = scaled.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = scaled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert_eq!(min, 0.0);
                prop_assert_eq!(max, 1.0);
            }
        }
    }
}

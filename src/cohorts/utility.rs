//! Weighted summary statistics over survey weights.

/// Survey weights that count toward a weighted mean. Missing, zero,
/// negative and non-finite weights exclude the record.
pub fn usable_weight(weight: Option<f64>) -> Option<f64> {
    weight.filter(|w| w.is_finite() && *w > 0.0)
}

/// Running weighted sums for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedAccumulator {
    count: usize,
    weight_sum: f64,
    weighted_sum: f64,
    weighted_sq_sum: f64,
}

impl WeightedAccumulator {
    /// Adds an observation. Returns `false` if its weight was not usable,
    /// including weights large enough to push the sums past `f64::MAX`.
    pub fn push(&mut self, value: f64, weight: Option<f64>) -> bool {
        let Some(w) = usable_weight(weight) else {
            return false;
        };

        let weight_sum = self.weight_sum + w;
        let weighted_sum = self.weighted_sum + w * value;
        let weighted_sq_sum = self.weighted_sq_sum + w * value * value;
        if !(weight_sum.is_finite() && weighted_sum.is_finite() && weighted_sq_sum.is_finite()) {
            return false;
        }

        self.count += 1;
        self.weight_sum = weight_sum;
        self.weighted_sum = weighted_sum;
        self.weighted_sq_sum = weighted_sq_sum;
        true
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// `None` until at least one observation with a usable weight arrives.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.weighted_sum / self.weight_sum).filter(|m| m.is_finite())
    }

    /// Weighted population standard deviation.
    pub fn stddev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self.weighted_sq_sum / self.weight_sum - mean * mean;
        Some(variance.max(0.0).sqrt()).filter(|sd| sd.is_finite())
    }
}

/// Weighted mean of `(value, weight)` pairs under [`usable_weight`].
pub fn weighted_mean(pairs: &[(f64, Option<f64>)]) -> Option<f64> {
    let mut acc = WeightedAccumulator::default();
    for &(value, weight) in pairs {
        acc.push(value, weight);
    }
    acc.mean()
}

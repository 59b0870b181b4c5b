//! Simple moving average.
//!
//! O(n) sliding window: add the incoming value, drop the one leaving the
//! window. Warmup: the first (period - 1) positions have no value.

pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut window_sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        window_sum += value;
        if i >= period {
            window_sum -= values[i - period];
        }

        if i + 1 >= period {
            out.push(Some(window_sum / period as f64));
        } else {
            out.push(None);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_warmup() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!(out[2].is_some());
        assert!(out[3].is_some());
    }

    #[test]
    fn sma_values() {
        let out = sma(&[10.0, 20.0, 30.0, 40.0, 50.0], 3);
        assert_relative_eq!(out[2].unwrap(), 20.0);
        assert_relative_eq!(out[3].unwrap(), 30.0);
        assert_relative_eq!(out[4].unwrap(), 40.0);
    }

    #[test]
    fn sma_period_one_is_identity() {
        let values = [3.0, 1.0, 4.0];
        let out = sma(&values, 1);
        for (o, v) in out.iter().zip(values.iter()) {
            assert_relative_eq!(o.unwrap(), *v);
        }
    }

    #[test]
    fn sma_period_zero_all_none() {
        assert!(sma(&[1.0, 2.0], 0).iter().all(Option::is_none));
    }

    #[test]
    fn sma_period_longer_than_input() {
        assert!(sma(&[1.0, 2.0], 5).iter().all(Option::is_none));
    }

    #[test]
    fn sma_empty() {
        assert!(sma(&[], 3).is_empty());
    }
}

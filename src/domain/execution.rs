//! Execution parameters and fill price arithmetic.

use super::order::Side;

/// Configuration for simulated order execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Percent, so 0.01 is one basis point.
    pub slippage_pct: f64,
    /// Fill price for intents that carry none.
    pub reference_price: f64,
    /// When false, valid intents are acknowledged as submitted and not filled.
    pub auto_fill: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            slippage_pct: 0.01,
            reference_price: 100.0,
            auto_fill: true,
        }
    }
}

/// Apply slippage against the trader.
/// Buy: price * (1 + slippage_pct / 100)
/// Sell: price * (1 - slippage_pct / 100)
pub fn apply_slippage(price: f64, side: Side, slippage_pct: f64) -> f64 {
    match side {
        Side::Buy => price * (1.0 + slippage_pct / 100.0),
        Side::Sell => price * (1.0 - slippage_pct / 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn slippage_directions() {
        assert_relative_eq!(apply_slippage(100.0, Side::Buy, 0.01), 100.01, epsilon = 1e-9);
        assert_relative_eq!(apply_slippage(100.0, Side::Sell, 0.01), 99.99, epsilon = 1e-9);
    }

    #[test]
    fn zero_slippage_is_identity() {
        assert_relative_eq!(apply_slippage(100.0, Side::Buy, 0.0), 100.0);
        assert_relative_eq!(apply_slippage(100.0, Side::Sell, 0.0), 100.0);
    }

    #[test]
    fn default_is_one_basis_point() {
        let config = ExecutionConfig::default();
        assert_eq!(config.slippage_pct, 0.01);
        assert_eq!(config.reference_price, 100.0);
        assert!(config.auto_fill);
    }
}

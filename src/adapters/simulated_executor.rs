//! Local order simulation.
//!
//! Fills every valid intent immediately at its own price (or the configured
//! reference price) nudged by slippage against the trader. Nothing leaves the
//! process.

use crate::domain::execution::{ExecutionConfig, apply_slippage};
use crate::domain::order::{OrderIntent, OrderResult};
use crate::ports::execution_port::ExecutionPort;

pub struct SimulatedExecutor {
    config: ExecutionConfig,
    history: Vec<OrderResult>,
}

impl SimulatedExecutor {
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
        }
    }
}

impl ExecutionPort for SimulatedExecutor {
    fn execute(&mut self, intent: &OrderIntent) -> OrderResult {
        if let Err(e) = intent.validate() {
            tracing::warn!(symbol = %intent.symbol, error = %e, "order rejected");
            return OrderResult::rejected(intent.clone(), e.to_string());
        }

        if !self.config.auto_fill {
            tracing::info!(order = %intent, "order submitted");
            return OrderResult::submitted(intent.clone());
        }

        let price = intent.price.unwrap_or(self.config.reference_price);
        let executed_price = apply_slippage(price, intent.side, self.config.slippage_pct);
        let result = OrderResult::filled(intent.clone(), executed_price);
        tracing::info!(order = %intent, executed_price, "order filled");

        self.history.push(result.clone());
        result
    }

    fn history(&self) -> &[OrderResult] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderStatus, Side};
    use approx::assert_relative_eq;

    fn buy(qty: f64, price: Option<f64>) -> OrderIntent {
        OrderIntent::new("ABC", Side::Buy, qty, price).unwrap()
    }

    #[test]
    fn fills_valid_intent() {
        let mut executor = SimulatedExecutor::new(ExecutionConfig::default());
        let result = executor.execute(&buy(10.0, Some(100.0)));

        assert_eq!(result.status, OrderStatus::Filled);
        assert_eq!(result.symbol(), "ABC");
        assert_eq!(result.side(), Side::Buy);
        assert_eq!(result.executed_quantity, 10.0);
        assert_relative_eq!(result.executed_price.unwrap(), 100.01, epsilon = 1e-9);
        assert!(result.reason.is_none());
    }

    #[test]
    fn uses_reference_price_when_unpriced() {
        let mut executor = SimulatedExecutor::new(ExecutionConfig {
            slippage_pct: 0.0,
            reference_price: 42.0,
            auto_fill: true,
        });
        let result = executor.execute(&buy(1.0, None));
        assert_relative_eq!(result.executed_price.unwrap(), 42.0);
    }

    #[test]
    fn sell_fills_below_price() {
        let mut executor = SimulatedExecutor::new(ExecutionConfig::default());
        let intent = OrderIntent::new("ABC", Side::Sell, 2.0, Some(50.0)).unwrap();
        let result = executor.execute(&intent);
        assert!(result.executed_price.unwrap() < 50.0);
    }

    #[test]
    fn rejects_invalid_intent() {
        let mut executor = SimulatedExecutor::new(ExecutionConfig::default());
        let intent = OrderIntent {
            symbol: "ABC".into(),
            side: Side::Buy,
            quantity: -3.0,
            price: None,
        };
        let result = executor.execute(&intent);

        assert_eq!(result.status, OrderStatus::Rejected);
        assert!(result.reason.unwrap().contains("quantity"));
        assert!(result.executed_price.is_none());
        assert!(executor.history().is_empty());
    }

    #[test]
    fn submit_only_mode_does_not_fill() {
        let mut executor = SimulatedExecutor::new(ExecutionConfig {
            auto_fill: false,
            ..ExecutionConfig::default()
        });
        let result = executor.execute(&buy(1.0, Some(10.0)));

        assert_eq!(result.status, OrderStatus::Submitted);
        assert!(result.executed_price.is_none());
        assert!(executor.history().is_empty());
    }

    #[test]
    fn history_keeps_fills_in_order() {
        let mut executor = SimulatedExecutor::new(ExecutionConfig::default());
        executor.execute(&buy(1.0, Some(10.0)));
        executor.execute(&OrderIntent::new("XYZ", Side::Sell, 2.0, Some(20.0)).unwrap());

        let history = executor.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].symbol(), "ABC");
        assert_eq!(history[1].symbol(), "XYZ");
    }
}

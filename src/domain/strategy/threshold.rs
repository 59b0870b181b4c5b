//! Price threshold strategy: buy above one level, optionally sell below another.

use crate::domain::error::ValidationError;
use crate::domain::market_data::MarketDataRecord;
use crate::domain::order::{OrderIntent, Side};

use super::{Strategy, check_quantity, intent_at_last_close};

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdStrategy {
    quantity: f64,
    buy_above: f64,
    sell_below: Option<f64>,
}

impl ThresholdStrategy {
    pub fn new(
        quantity: f64,
        buy_above: f64,
        sell_below: Option<f64>,
    ) -> Result<Self, ValidationError> {
        check_quantity(quantity)?;
        if !buy_above.is_finite() || buy_above <= 0.0 {
            return Err(ValidationError::new(
                "buy_above",
                format!("must be a positive number, got {buy_above}"),
            ));
        }
        if let Some(sell) = sell_below {
            if !sell.is_finite() || sell <= 0.0 || sell >= buy_above {
                return Err(ValidationError::new(
                    "sell_below",
                    format!("must be positive and below buy_above ({buy_above}), got {sell}"),
                ));
            }
        }
        Ok(Self {
            quantity,
            buy_above,
            sell_below,
        })
    }
}

impl Strategy for ThresholdStrategy {
    fn name(&self) -> &str {
        "threshold"
    }

    fn decide(&self, window: &[MarketDataRecord]) -> Option<OrderIntent> {
        let close = window.last()?.close();
        if close > self.buy_above {
            return intent_at_last_close(window, Side::Buy, self.quantity);
        }
        match self.sell_below {
            Some(level) if close < level => intent_at_last_close(window, Side::Sell, self.quantity),
            _ => None,
        }
    }
}

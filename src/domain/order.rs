//! Order intents and execution results.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(ValidationError::new(
                "side",
                format!("expected buy or sell, got {other:?}"),
            )),
        }
    }
}

/// A proposed trade produced by a strategy.
///
/// [`OrderIntent::new`] validates its arguments. The fields stay public so an
/// executor can be handed a hand-built value; it re-checks with
/// [`OrderIntent::validate`] before acting on it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub price: Option<f64>,
}

impl OrderIntent {
    pub fn new(
        symbol: &str,
        side: Side,
        quantity: f64,
        price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let intent = Self {
            symbol: symbol.to_string(),
            side,
            quantity,
            price,
        };
        intent.validate()?;
        Ok(intent)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::new("symbol", "must not be blank"));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ValidationError::new(
                "quantity",
                format!("must be a positive number, got {}", self.quantity),
            ));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price <= 0.0 {
                return Err(ValidationError::new(
                    "price",
                    format!("must be a positive number, got {price}"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for OrderIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.side, self.quantity, self.symbol)?;
        if let Some(price) = self.price {
            write!(f, " @ {price:.2}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Submitted,
    Filled,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Submitted => "submitted",
            OrderStatus::Filled => "filled",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of executing an [`OrderIntent`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub intent: OrderIntent,
    pub status: OrderStatus,
    pub executed_price: Option<f64>,
    pub executed_quantity: f64,
    pub reason: Option<String>,
}

impl OrderResult {
    pub fn filled(intent: OrderIntent, executed_price: f64) -> Self {
        let executed_quantity = intent.quantity;
        Self {
            intent,
            status: OrderStatus::Filled,
            executed_price: Some(executed_price),
            executed_quantity,
            reason: None,
        }
    }

    pub fn submitted(intent: OrderIntent) -> Self {
        Self {
            intent,
            status: OrderStatus::Submitted,
            executed_price: None,
            executed_quantity: 0.0,
            reason: None,
        }
    }

    pub fn rejected(intent: OrderIntent, reason: impl Into<String>) -> Self {
        Self {
            intent,
            status: OrderStatus::Rejected,
            executed_price: None,
            executed_quantity: 0.0,
            reason: Some(reason.into()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.intent.symbol
    }

    pub fn side(&self) -> Side {
        self.intent.side
    }

    /// Signed cash flow of the fill: negative for buys, positive for sells.
    pub fn notional(&self) -> Option<f64> {
        let price = self.executed_price?;
        let gross = price * self.executed_quantity;
        Some(match self.intent.side {
            Side::Buy => -gross,
            Side::Sell => gross,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_case_insensitive() {
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" sell ".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("hold".parse::<Side>().unwrap_err().field, "side");
    }

    #[test]
    fn side_display() {
        assert_eq!(Side::Buy.to_string(), "buy");
        assert_eq!(Side::Sell.to_string(), "sell");
    }

    #[test]
    fn new_accepts_valid_intent() {
        let intent = OrderIntent::new("ABC", Side::Buy, 10.0, Some(100.0)).unwrap();
        assert_eq!(intent.symbol, "ABC");
        assert_eq!(intent.quantity, 10.0);
        assert_eq!(intent.price, Some(100.0));
    }

    #[test]
    fn new_accepts_missing_price() {
        assert!(OrderIntent::new("ABC", Side::Sell, 1.0, None).is_ok());
    }

    #[test]
    fn non_positive_quantity_rejected() {
        for qty in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = OrderIntent::new("ABC", Side::Buy, qty, None).unwrap_err();
            assert_eq!(err.field, "quantity");
        }
    }

    #[test]
    fn non_positive_price_rejected() {
        let err = OrderIntent::new("ABC", Side::Buy, 1.0, Some(0.0)).unwrap_err();
        assert_eq!(err.field, "price");
    }

    #[test]
    fn blank_symbol_rejected() {
        let err = OrderIntent::new("", Side::Buy, 1.0, None).unwrap_err();
        assert_eq!(err.field, "symbol");
    }

    #[test]
    fn display_intent() {
        let intent = OrderIntent::new("ABC", Side::Buy, 10.0, Some(100.0)).unwrap();
        assert_eq!(intent.to_string(), "buy 10 ABC @ 100.00");
    }

    #[test]
    fn filled_result_copies_quantity() {
        let intent = OrderIntent::new("ABC", Side::Sell, 4.0, Some(25.0)).unwrap();
        let result = OrderResult::filled(intent, 25.0);
        assert_eq!(result.status, OrderStatus::Filled);
        assert_eq!(result.executed_quantity, 4.0);
        assert_eq!(result.notional(), Some(100.0));
    }

    #[test]
    fn rejected_result_has_no_notional() {
        let intent = OrderIntent::new("ABC", Side::Buy, 4.0, None).unwrap();
        let result = OrderResult::rejected(intent, "nope");
        assert_eq!(result.status.to_string(), "rejected");
        assert_eq!(result.notional(), None);
        assert_eq!(result.reason.as_deref(), Some("nope"));
    }
}

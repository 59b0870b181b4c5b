//! Order execution port trait.

use crate::domain::order::{OrderIntent, OrderResult};

pub trait ExecutionPort {
    fn execute(&mut self, intent: &OrderIntent) -> OrderResult;

    /// Filled results, in execution order.
    fn history(&self) -> &[OrderResult];
}

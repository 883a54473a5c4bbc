use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct NumberInStock(i32);

impl NumberInStock {
    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0 <= 0
    }

    /// Returns the stock after `delta`, or `None` when it would drop below zero.
    pub fn apply(&self, delta: StockDelta) -> Option<Self> {
        self.0
            .checked_add(delta.value())
            .filter(|amount| *amount >= 0)
            .map(Self)
    }
}

/// Stock change applied by the store as a single atomic step.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StockDelta {
    Increment,
    Decrement,
}

impl StockDelta {
    pub fn value(&self) -> i32 {
        match self {
            StockDelta::Increment => 1,
            StockDelta::Decrement => -1,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{NumberInStock, StockDelta};

    #[test]
    fn never_below_zero() {
        let stock = NumberInStock::new(1);
        let stock = stock.apply(StockDelta::Decrement);
        assert_eq!(stock, Some(NumberInStock::new(0)));
        let stock = stock.and_then(|stock| stock.apply(StockDelta::Decrement));
        assert_eq!(stock, None);
    }

    #[test]
    fn increment() {
        let stock = NumberInStock::new(0);
        assert!(stock.is_empty());
        let stock = stock.apply(StockDelta::Increment);
        assert_eq!(stock, Some(NumberInStock::new(1)));
    }
}

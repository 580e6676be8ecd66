use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price level on one side of an order book.
///
/// Price and quantity are exact decimals so that notional sums never
/// accumulate floating-point error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        PriceLevel { price, quantity }
    }

    /// Parse from the wire `[price, quantity]` string pair.
    pub fn parse(raw: &[String; 2]) -> Result<Self, rust_decimal::Error> {
        Ok(PriceLevel {
            price: raw[0].parse::<Decimal>()?,
            quantity: raw[1].parse::<Decimal>()?,
        })
    }

    /// Price × quantity at this level.
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_zero()
    }
}

impl From<(Decimal, Decimal)> for PriceLevel {
    fn from((price, quantity): (Decimal, Decimal)) -> Self {
        PriceLevel { price, quantity }
    }
}

impl PartialEq for PriceLevel {
    fn eq(&self, other: &Self) -> bool {
        self.price == other.price
    }
}

impl Eq for PriceLevel {}

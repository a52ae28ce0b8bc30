use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency a store lists its prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Cad,
}

impl Currency {
    /// Default currency for a store region: `CA` lists in Canadian dollars,
    /// everything else in US dollars.
    #[must_use]
    pub fn for_region(region: Option<&str>) -> Self {
        match region {
            Some(r) if r.eq_ignore_ascii_case("ca") => Currency::Cad,
            _ => Currency::Usd,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cad => "CA$",
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A non-negative amount with at most two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Returns `None` for negative amounts or amounts with more than two
    /// significant fractional digits (`12.500` is accepted, `12.505` is not).
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Option<Self> {
        let normalized = amount.normalize();
        if normalized.is_sign_negative() && !normalized.is_zero() {
            return None;
        }
        if normalized.scale() > 2 {
            return None;
        }
        let mut amount = normalized;
        amount.rescale(2);
        Some(Self { amount, currency })
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.currency.symbol(), self.amount)
    }
}

/// Listed price, or the explicit marker that none could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Price {
    Amount(Money),
    Unavailable,
}

impl Price {
    #[must_use]
    pub fn money(&self) -> Option<&Money> {
        match self {
            Price::Amount(m) => Some(m),
            Price::Unavailable => None,
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Amount(m) => m.fmt(f),
            Price::Unavailable => f.write_str("unavailable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    InStock,
    OutOfStock,
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::InStock => write!(f, "in stock"),
            AvailabilityStatus::OutOfStock => write!(f, "out of stock"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// One matching listing as reported for a store visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Listing title, at most 70 characters (longer titles end in `…`).
    pub title: String,
    pub price: Price,
    pub availability: AvailabilityStatus,
    pub store_id: String,
    pub region: Option<String>,
}

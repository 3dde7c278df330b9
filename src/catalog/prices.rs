//! Prices

use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning wire prices into money.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount is not a decimal number.
    #[error("invalid price amount {0:?}")]
    InvalidAmount(String),

    /// The currency code is not an ISO 4217 code.
    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),

    /// Multiplying the amount overflowed.
    #[error("price amount {0:?} overflowed")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A price as reported by the storefront: a decimal string plus a currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Decimal amount, e.g. `"1299.0"`.
    pub amount: String,

    /// ISO 4217 currency code, e.g. `"INR"`.
    pub currency_code: String,
}

impl Price {
    /// Creates a new price.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// The ISO currency for this price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] when the code is not recognised.
    pub fn currency(&self) -> Result<&'static Currency, PriceError> {
        iso::find(&self.currency_code)
            .ok_or_else(|| PriceError::UnknownCurrency(self.currency_code.clone()))
    }

    /// Convert into [`Money`].
    ///
    /// # Errors
    ///
    /// - [`PriceError::InvalidAmount`]: the amount is not a decimal number.
    /// - [`PriceError::UnknownCurrency`]: the currency code is not recognised.
    pub fn money(&self) -> Result<Money<'static, Currency>, PriceError> {
        Ok(Money::from_decimal(self.decimal()?, self.currency()?))
    }

    /// This price multiplied by `quantity`.
    ///
    /// # Errors
    ///
    /// Same as [`Price::money`], plus [`PriceError::Overflow`].
    pub fn times(&self, quantity: u32) -> Result<Money<'static, Currency>, PriceError> {
        let total = self
            .decimal()?
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| PriceError::Overflow(self.amount.clone()))?;

        Ok(Money::from_decimal(total, self.currency()?))
    }

    fn decimal(&self) -> Result<Decimal, PriceError> {
        Decimal::from_str(self.amount.trim())
            .map_err(|_parse| PriceError::InvalidAmount(self.amount.clone()))
    }

    /// Human-readable price, e.g. `"₹1,299.00"`.
    pub fn display(&self) -> String {
        self.money().map_or_else(
            |_unformattable| format!("{} {}", self.currency_code, self.amount),
            |money| money.to_string(),
        )
    }
}

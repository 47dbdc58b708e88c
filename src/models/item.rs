use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Maximum item name length, matching the `VARCHAR(255)` column
pub const NAME_MAX_CHARS: usize = 255;

/// `price` is stored as `DECIMAL(10, 2)`: 8 integral digits, 2 fractional
pub const PRICE_MAX_INTEGRAL_DIGITS: u32 = 8;
pub const PRICE_MAX_SCALE: u32 = 2;

/// A persisted item row
///
/// `id` and `created_at` are assigned by the database on insert.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

/// Creation payload for `POST /items/`
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl NewItem {
    /// Validate field constraints before any database work
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_empty() {
            return Err(AppError::validation("name", "must not be empty"));
        }

        if self.name.chars().count() > NAME_MAX_CHARS {
            return Err(AppError::validation(
                "name",
                format!("must be at most {} characters", NAME_MAX_CHARS),
            ));
        }

        if let Some(price) = self.price {
            validate_price(price)?;
        }

        Ok(())
    }
}

/// Check that a price fits the declared `DECIMAL(10, 2)` precision
fn validate_price(price: Decimal) -> Result<(), AppError> {
    // Trailing zeros don't count against the scale ("19.990" is fine)
    let normalized = price.normalize();

    if normalized.scale() > PRICE_MAX_SCALE {
        return Err(AppError::validation(
            "price",
            format!("must have at most {} decimal places", PRICE_MAX_SCALE),
        ));
    }

    // 10^8 is the smallest magnitude that no longer fits 8 integral digits
    let limit = Decimal::from(100_000_000_u64);
    if normalized.abs() >= limit {
        return Err(AppError::validation(
            "price",
            format!(
                "must have at most {} digits before the decimal point",
                PRICE_MAX_INTEGRAL_DIGITS
            ),
        ));
    }

    Ok(())
}

use crate::menu::PriceItem;

use super::{normalize::normalize_decimal, Error};

/// Parses "3,50 / 4,20 / 5,00 €" into the three price tiers.
///
/// Blank input is `Ok(None)`: the meal simply has no price. Anything that is
/// not exactly three non-negative amounts is an error and yields no partial price.
pub fn parse_price(text: &str) -> Result<Option<PriceItem>, Error> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let normalized = normalize_decimal(text);
    let tokens: Vec<&str> = normalized.split('/').collect();
    let [student, employee, foreign] = tokens.as_slice() else {
        return Err(Error::Price(format!(
            "expected 3 amounts, found {} in {normalized:?}",
            tokens.len()
        )));
    };
    Ok(Some(PriceItem {
        student: amount(student)?,
        employee: amount(employee)?,
        foreign: amount(foreign)?,
    }))
}

/// Like [`parse_price`], but a malformed price only gets logged.
pub fn price_or_absent(text: &str) -> Option<PriceItem> {
    parse_price(text).unwrap_or_else(|e| {
        log::warn!("{e}");
        None
    })
}

fn amount(token: &str) -> Result<f64, Error> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(Error::Price(format!("invalid amount {token:?}"))),
    }
}

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::config::constant::NO_DISCOUNT_CODE;
use crate::error::{CourierError, Result};

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Fixed,
    Percentage,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    /// Kept raw: a non-numeric value is accepted but grants nothing.
    pub value: Value,
}

impl Discount {
    pub fn fixed(value: f64) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value: Value::from(value),
        }
    }

    pub fn percentage(value: f64) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value: Value::from(value),
        }
    }

    /// Discount granted on a delivery of `delivery_cost`.
    pub fn amount(&self, delivery_cost: f64) -> f64 {
        let Some(value) = self.value.as_f64() else {
            return 0.0;
        };
        match self.kind {
            DiscountKind::Fixed => value,
            DiscountKind::Percentage => delivery_cost * value / 100.0,
            DiscountKind::Unsupported => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscountRule {
    pub code: String,
    pub distance: Bounds,
    pub weight: Bounds,
    pub discount: Discount,
}

impl DiscountRule {
    pub fn applies_to(&self, distance: f64, weight: f64) -> bool {
        self.distance.contains(distance) && self.weight.contains(weight)
    }
}

/// Looks up discount codes in a read-only rule table.
#[derive(Debug, Clone, Default)]
pub struct DiscountResolver {
    rules: Vec<DiscountRule>,
}

impl DiscountResolver {
    pub fn new(rules: Vec<DiscountRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    /// The rule for `code` if it covers the package, `None` for `"NA"` or an
    /// out-of-range package. Unknown codes are an error.
    pub fn resolve(&self, code: &str, distance: f64, weight: f64) -> Result<Option<&DiscountRule>> {
        if code == NO_DISCOUNT_CODE {
            return Ok(None);
        }

        let rule = self
            .rules
            .iter()
            .find(|rule| rule.code == code)
            .ok_or_else(|| CourierError::UnknownDiscountCode {
                code: code.to_string(),
            })?;

        if rule.applies_to(distance, weight) {
            Ok(Some(rule))
        } else {
            trace!(
                "Code {} does not cover distance {} / weight {}",
                code,
                distance,
                weight
            );
            Ok(None)
        }
    }

    pub fn discount_value(
        &self,
        code: &str,
        distance: f64,
        weight: f64,
        delivery_cost: f64,
    ) -> Result<f64> {
        Ok(self
            .resolve(code, distance, weight)?
            .map_or(0.0, |rule| rule.discount.amount(delivery_cost)))
    }
}

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::submission::MetricValueInput;
use crate::error::{Result, StorageError};
use crate::models::{Metric, MetricType};

/// A submitted value, typed by the metric it answers.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Numeric(Decimal),
}

impl TypedValue {
    pub fn text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            TypedValue::Numeric(_) => None,
        }
    }

    pub fn numeric(&self) -> Option<Decimal> {
        match self {
            TypedValue::Numeric(n) => Some(*n),
            TypedValue::Text(_) => None,
        }
    }
}

/// Interpret a raw form value according to the metric's declared type.
pub fn parse_value(metric: &Metric, raw: &str) -> Result<TypedValue> {
    match metric.metric_type {
        MetricType::Text => Ok(TypedValue::Text(raw.to_string())),
        MetricType::Numeric => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(StorageError::Validation(format!(
                    "'{}' requires a numeric value",
                    metric.name
                )));
            }
            Decimal::from_str(trimmed).map(TypedValue::Numeric).map_err(|_| {
                StorageError::Validation(format!(
                    "'{}' must be a number, got '{}'",
                    metric.name, trimmed
                ))
            })
        }
    }
}

/// Match submitted values to a category's metrics.
///
/// Every metric must receive exactly one value, and no value may point at a
/// metric outside the category. The result follows metric order.
pub fn resolve_values(metrics: &[Metric], inputs: &[MetricValueInput]) -> Result<Vec<(Uuid, TypedValue)>> {
    let mut by_metric: HashMap<Uuid, &str> = HashMap::with_capacity(inputs.len());

    for input in inputs {
        if !metrics.iter().any(|m| m.metric_id == input.metric_id) {
            return Err(StorageError::Validation(format!(
                "Metric {} does not belong to this category",
                input.metric_id
            )));
        }
        if by_metric.insert(input.metric_id, &input.value).is_some() {
            return Err(StorageError::Validation(format!(
                "Metric {} was answered more than once",
                input.metric_id
            )));
        }
    }

    metrics
        .iter()
        .map(|metric| {
            let raw = by_metric.get(&metric.metric_id).ok_or_else(|| {
                StorageError::Validation(format!("Missing value for '{}'", metric.name))
            })?;
            Ok((metric.metric_id, parse_value(metric, raw)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, metric_type: MetricType) -> Metric {
        Metric {
            metric_id: Uuid::new_v4(),
            category_id: Uuid::nil(),
            name: name.to_string(),
            description: None,
            metric_type,
            weight: Decimal::ONE,
            sort_order: 0,
        }
    }

    fn input(metric: &Metric, value: &str) -> MetricValueInput {
        MetricValueInput {
            metric_id: metric.metric_id,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_numeric_metric_parses_decimal() {
        let savings = metric("Annual Cost Savings", MetricType::Numeric);
        assert_eq!(
            parse_value(&savings, " 1250000.50 ").unwrap(),
            TypedValue::Numeric("1250000.50".parse().unwrap())
        );
        assert_eq!(
            parse_value(&savings, "007").unwrap(),
            TypedValue::Numeric(Decimal::from(7))
        );
    }

    #[test]
    fn test_numeric_metric_rejects_empty_and_garbage() {
        let users = metric("Users Impacted", MetricType::Numeric);
        assert!(matches!(parse_value(&users, ""), Err(StorageError::Validation(_))));
        assert!(matches!(parse_value(&users, "   "), Err(StorageError::Validation(_))));
        assert!(matches!(parse_value(&users, "1,5"), Err(StorageError::Validation(_))));
        assert!(matches!(parse_value(&users, "lots"), Err(StorageError::Validation(_))));
    }

    #[test]
    fn test_text_metric_keeps_numbers_as_text() {
        let description = metric("Key Innovation", MetricType::Text);
        let value = parse_value(&description, "42").unwrap();
        assert_eq!(value.text(), Some("42"));
        assert_eq!(value.numeric(), None);
    }

    #[test]
    fn test_resolve_follows_metric_order() {
        let m1 = metric("Savings", MetricType::Numeric);
        let m2 = metric("Pitch", MetricType::Text);
        let metrics = vec![m1.clone(), m2.clone()];

        let resolved = resolve_values(&metrics, &[input(&m2, "Great"), input(&m1, "10")]).unwrap();

        assert_eq!(resolved[0], (m1.metric_id, TypedValue::Numeric(Decimal::TEN)));
        assert_eq!(resolved[1], (m2.metric_id, TypedValue::Text("Great".to_string())));
    }

    #[test]
    fn test_resolve_requires_every_metric() {
        let m1 = metric("Savings", MetricType::Numeric);
        let m2 = metric("Pitch", MetricType::Text);

        let err = resolve_values(&[m1.clone(), m2], &[input(&m1, "10")]).unwrap_err();
        assert!(err.to_string().contains("Missing value for 'Pitch'"));
    }

    #[test]
    fn test_resolve_rejects_foreign_and_duplicate_metrics() {
        let m1 = metric("Savings", MetricType::Numeric);
        let stranger = metric("Other", MetricType::Text);

        assert!(resolve_values(std::slice::from_ref(&m1), &[input(&stranger, "x")]).is_err());
        assert!(resolve_values(
            std::slice::from_ref(&m1),
            &[input(&m1, "1"), input(&m1, "2")]
        )
        .is_err());
    }
}

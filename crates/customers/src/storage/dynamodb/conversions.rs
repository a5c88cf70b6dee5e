//! DynamoDB attribute conversion functions.
//!
//! A customer goes record -> JSON document -> attribute map on the way in and
//! back the same way on the way out, with no per-field mapping. These are pure
//! functions and are testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use customers_core::customer::Customer;
use customers_core::storage::RepositoryError;
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use super::keys::{self, PARTITION_KEY, SORT_KEY};

// ============================================================================
// Customer conversions
// ============================================================================

/// Convert a Customer to a DynamoDB item, including its `pk`/`sk` keys.
pub fn customer_to_item(
    customer: &Customer,
) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
    let document = serde_json::to_value(customer)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    let Value::Object(fields) = document else {
        return Err(RepositoryError::Serialization(
            "Customer did not serialize to a JSON object".to_string(),
        ));
    };

    let mut item: HashMap<String, AttributeValue> = fields
        .iter()
        .map(|(name, value)| (name.clone(), json_to_attribute(value)))
        .collect();
    item.extend(customer_key(customer.id));

    Ok(item)
}

/// Convert a DynamoDB item to a Customer. Key attributes are dropped.
pub fn item_to_customer(item: &HashMap<String, AttributeValue>) -> Result<Customer, RepositoryError> {
    let mut document = Map::with_capacity(item.len());
    for (name, value) in item {
        if name == PARTITION_KEY || name == SORT_KEY {
            continue;
        }
        document.insert(name.clone(), attribute_to_json(value)?);
    }

    serde_json::from_value(Value::Object(document))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid customer item: {}", e)))
}

/// Build the primary key of a customer item.
pub fn customer_key(id: Uuid) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (PARTITION_KEY.to_string(), AttributeValue::S(keys::customer_pk(id))),
        (SORT_KEY.to_string(), AttributeValue::S(keys::customer_sk(id))),
    ])
}

// ============================================================================
// Generic document conversions
// ============================================================================

/// Convert a JSON value to a DynamoDB attribute.
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), json_to_attribute(value)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB attribute to a JSON value.
///
/// String and number sets become arrays. Binary attributes are rejected since
/// nothing in a customer document is ever written as binary.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, RepositoryError> {
    match value {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::N(n) => parse_number(n).map(Value::Number),
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(fields) => fields
            .iter()
            .map(|(name, value)| attribute_to_json(value).map(|v| (name.clone(), v)))
            .collect::<Result<Map<_, _>, _>>()
            .map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(RepositoryError::InvalidData(
            "Binary attributes are not supported".to_string(),
        )),
        other => Err(RepositoryError::InvalidData(format!(
            "Unsupported attribute value: {:?}",
            other
        ))),
    }
}

fn parse_number(n: &str) -> Result<Number, RepositoryError> {
    n.parse::<Number>()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", n, e)))
}

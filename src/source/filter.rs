use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::GroupField;

/// Opaque query filter handed to a [`ReportSource`](super::ReportSource).
///
/// Shape: `{"$and" | "$or": [clause, ...]}` where a clause is either a nested
/// combinator or `{field: {"$eq" | "$ne" | "$oneof" | "$notoneof": value}}`,
/// and `{field: null}` matches rows without that key.
pub type Filter = Value;

/// How report conditions combine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConditionsOp {
    #[default]
    And,
    Or,
}

impl ConditionsOp {
    fn key(&self) -> &'static str {
        match self {
            ConditionsOp::And => "$and",
            ConditionsOp::Or => "$or",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOp {
    Is(Uuid),
    IsNot(Uuid),
    OneOf(Vec<Uuid>),
    NotOneOf(Vec<Uuid>),
}

/// User-authored filter condition of a report definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field: GroupField,
    pub op: ConditionOp,
    /// Custom conditions are evaluated elsewhere and never reach the query.
    #[serde(default)]
    pub custom: bool,
}

/// Builds the filter expression for a set of conditions.
///
/// With special cases on, negative matches also keep rows that lack the
/// field entirely, which a plain inequality would drop.
pub fn translate(conditions: &[Condition], op: ConditionsOp, apply_special_cases: bool) -> Filter {
    if conditions.is_empty() {
        return Value::Object(Map::new());
    }
    let clauses = conditions
        .iter()
        .map(|condition| clause(condition, apply_special_cases))
        .collect();
    keyed(op.key(), Value::Array(clauses))
}

fn clause(condition: &Condition, apply_special_cases: bool) -> Value {
    let field = condition.field.as_str();
    let ids = |ids: &[Uuid]| {
        Value::Array(ids.iter().map(|id| Value::String(id.to_string())).collect())
    };
    let (body, negative) = match &condition.op {
        ConditionOp::Is(id) => (keyed("$eq", Value::String(id.to_string())), false),
        ConditionOp::IsNot(id) => (keyed("$ne", Value::String(id.to_string())), true),
        ConditionOp::OneOf(list) => (keyed("$oneof", ids(list.as_slice())), false),
        ConditionOp::NotOneOf(list) => (keyed("$notoneof", ids(list.as_slice())), true),
    };
    let base = keyed(field, body);
    if negative && apply_special_cases {
        keyed("$or", Value::Array(vec![base, keyed(field, Value::Null)]))
    } else {
        base
    }
}

fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Evaluates a filter against a record exposing its group keys through `lookup`.
///
/// Inequalities follow query semantics: a missing key never satisfies them.
pub fn evaluate(filter: &Filter, lookup: &dyn Fn(GroupField) -> Option<Uuid>) -> bool {
    let Value::Object(map) = filter else {
        return true;
    };
    map.iter().all(|(key, clause)| match key.as_str() {
        "$and" => clause
            .as_array()
            .is_some_and(|items| items.iter().all(|item| evaluate(item, lookup))),
        "$or" => clause
            .as_array()
            .is_some_and(|items| items.iter().any(|item| evaluate(item, lookup))),
        name => match GroupField::from_name(name) {
            Some(field) => evaluate_field(lookup(field), clause),
            None => false,
        },
    })
}

fn evaluate_field(value: Option<Uuid>, clause: &Value) -> bool {
    let actual = value.map(|id| id.to_string());
    let actual = actual.as_deref();
    let listed = |expected: &Value| {
        expected
            .as_array()
            .is_some_and(|ids| ids.iter().any(|id| id.as_str() == actual))
    };
    match clause {
        Value::Null => actual.is_none(),
        Value::Object(ops) => ops.iter().all(|(op, expected)| match op.as_str() {
            "$eq" => actual.is_some() && actual == expected.as_str(),
            "$ne" => actual.is_some() && actual != expected.as_str(),
            "$oneof" => actual.is_some() && listed(expected),
            "$notoneof" => actual.is_some() && !listed(expected),
            _ => false,
        }),
        _ => false,
    }
}

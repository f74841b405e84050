use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{ParamSet, ParamValue};

/// Decides how many times one parameter combination is run.
///
/// `None` defers to whatever count the previous rules (or the scan default)
/// settled on. `Some(0)` defers as well.
pub trait RepeatRule {
    fn repeats(&self, params: &ParamSet) -> Option<usize>;
}

impl<F> RepeatRule for F
where
    F: Fn(&ParamSet) -> Option<usize>,
{
    fn repeats(&self, params: &ParamSet) -> Option<usize> {
        self(params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    fn accepts(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        }
    }
}

/// `<param> <op> <value>`, evaluated against a `ParamSet`.
///
/// Numbers compare numerically (ints and floats mix), strings
/// lexicographically, booleans only under `==`/`!=`. A missing parameter or
/// a type mismatch never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub param: String,
    pub op: CompareOp,
    pub value: ParamValue,
}

impl Condition {
    pub fn new(param: impl Into<String>, op: CompareOp, value: impl Into<ParamValue>) -> Self {
        Self {
            param: param.into(),
            op,
            value: value.into(),
        }
    }

    pub fn matches(&self, params: &ParamSet) -> bool {
        let Some(actual) = params.get(&self.param) else {
            return false;
        };

        let ord = match (actual, &self.value) {
            (ParamValue::Str(a), ParamValue::Str(b)) => Some(a.cmp(b)),
            (ParamValue::Bool(a), ParamValue::Bool(b)) => {
                return match self.op {
                    CompareOp::Eq => a == b,
                    CompareOp::Ne => a != b,
                    _ => false,
                };
            }
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        };

        // NaN compares as nothing
        ord.is_some_and(|o| self.op.accepts(o))
    }
}

/// Serializable repeat rule: run `count` times when `when` holds (always,
/// if there is no condition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalRepeat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Condition>,
    pub count: usize,
}

impl ConditionalRepeat {
    pub fn always(count: usize) -> Self {
        Self { when: None, count }
    }

    pub fn when(condition: Condition, count: usize) -> Self {
        Self {
            when: Some(condition),
            count,
        }
    }
}

impl RepeatRule for ConditionalRepeat {
    fn repeats(&self, params: &ParamSet) -> Option<usize> {
        match &self.when {
            Some(cond) if !cond.matches(params) => None,
            _ => Some(self.count),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::types::ParamValue;

/// `num` evenly spaced floats from `start` to `stop`, both inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<ParamValue> {
    match num {
        0 => Vec::new(),
        1 => vec![ParamValue::Float(start)],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<ParamValue> = (0..num - 1)
                .map(|i| ParamValue::Float(start + i as f64 * step))
                .collect();
            // endpoint is exact, not accumulated
            out.push(ParamValue::Float(stop));
            out
        }
    }
}

/// `base` raised to each of `linspace(start, stop, num)`.
pub fn logspace(start: f64, stop: f64, num: usize, base: f64) -> Vec<ParamValue> {
    linspace(start, stop, num)
        .into_iter()
        .filter_map(|v| v.as_f64())
        .map(|e| ParamValue::Float(base.powf(e)))
        .collect()
}

/// Integers from `start` up to (not including) `stop`. A negative `step`
/// counts down. Returns `None` for a zero step.
pub fn range(start: i64, stop: i64, step: i64) -> Option<Vec<ParamValue>> {
    if step == 0 {
        return None;
    }

    let mut out = Vec::new();
    let mut v = start;
    while (step > 0 && v < stop) || (step < 0 && v > stop) {
        out.push(ParamValue::Int(v));
        v = match v.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    Some(out)
}

fn default_base() -> f64 {
    10.0
}

fn default_step() -> i64 {
    1
}

/// Generated value lists, written as a single-key object:
/// `{"linspace": {"start": 0, "stop": 10, "num": 5}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Generator {
    Linspace {
        start: f64,
        stop: f64,
        num: usize,
    },
    Logspace {
        start: f64,
        stop: f64,
        num: usize,
        #[serde(default = "default_base")]
        base: f64,
    },
    Range {
        start: i64,
        stop: i64,
        #[serde(default = "default_step")]
        step: i64,
    },
}

/// What a parameter's `values` entry may hold in a scan file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    List(Vec<ParamValue>),
    Generator(Generator),
    Scalar(ParamValue),
}

impl ValueSpec {
    /// Expand into the concrete values. A scalar becomes a one-element list.
    pub fn expand(&self) -> Result<Vec<ParamValue>, String> {
        match self {
            ValueSpec::List(values) => Ok(values.clone()),
            ValueSpec::Scalar(value) => Ok(vec![value.clone()]),
            ValueSpec::Generator(Generator::Linspace { start, stop, num }) => {
                Ok(linspace(*start, *stop, *num))
            }
            ValueSpec::Generator(Generator::Logspace {
                start,
                stop,
                num,
                base,
            }) => Ok(logspace(*start, *stop, *num, *base)),
            ValueSpec::Generator(Generator::Range { start, stop, step }) => {
                range(*start, *stop, *step).ok_or_else(|| "range step must be non-zero".to_string())
            }
        }
    }
}

impl From<Vec<ParamValue>> for ValueSpec {
    fn from(values: Vec<ParamValue>) -> Self {
        ValueSpec::List(values)
    }
}

impl From<Generator> for ValueSpec {
    fn from(generator: Generator) -> Self {
        ValueSpec::Generator(generator)
    }
}

//! # Aggregation Pipeline
//!
//! An ordered list of stages applied to a collection:
//! - `Match` keeps documents that satisfy a filter set
//! - `Group` folds documents sharing a key into one output document
//! - `Sort` orders the current documents ascending on one field
//!
//! Group output documents hold the group key under `_id` and one field per
//! accumulator. Groups are emitted in the order their key was first seen.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use super::filter::FilterSet;
use super::sorter::{DocumentSorter, SortSpec};

/// A pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Match(FilterSet),
    Group(GroupSpec),
    Sort(SortSpec),
}

/// Grouping stage definition
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    /// Field whose value is the group key
    pub by: String,
    pub accumulators: Vec<Accumulator>,
}

impl GroupSpec {
    pub fn by(field: impl Into<String>) -> Self {
        Self {
            by: field.into(),
            accumulators: Vec::new(),
        }
    }

    pub fn avg(self, output: impl Into<String>, field: impl Into<String>) -> Self {
        self.with(Accumulator::new(output, AccumulatorOp::Avg, field))
    }

    pub fn sum(self, output: impl Into<String>, field: impl Into<String>) -> Self {
        self.with(Accumulator::new(output, AccumulatorOp::Sum, field))
    }

    fn with(mut self, accumulator: Accumulator) -> Self {
        self.accumulators.push(accumulator);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorOp {
    /// Mean of the numeric values; null when there are none
    Avg,
    /// Total of the numeric values; 0 when there are none
    Sum,
}

/// Computes `output` from `field` across a group
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    pub output: String,
    pub op: AccumulatorOp,
    pub field: String,
}

impl Accumulator {
    pub fn new(output: impl Into<String>, op: AccumulatorOp, field: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            op,
            field: field.into(),
        }
    }
}

/// Running totals for one accumulator within one group.
///
/// Integer inputs are summed exactly as long as they fit in an i64.
#[derive(Debug, Default)]
struct NumericState {
    count: u64,
    float_sum: f64,
    int_sum: Option<i64>,
    saw_float: bool,
}

impl NumericState {
    fn push(&mut self, value: &Value) {
        let Value::Number(n) = value else {
            return;
        };
        let Some(f) = n.as_f64() else {
            return;
        };

        if self.count == 0 {
            self.int_sum = Some(0);
        }
        self.count += 1;
        self.float_sum += f;

        match n.as_i64() {
            Some(i) if !self.saw_float => {
                self.int_sum = self.int_sum.and_then(|sum| sum.checked_add(i));
            }
            _ => {
                self.saw_float = true;
                self.int_sum = None;
            }
        }
    }

    fn finish(&self, op: AccumulatorOp) -> Value {
        match op {
            AccumulatorOp::Sum => match self.int_sum {
                Some(sum) if !self.saw_float => Value::Number(sum.into()),
                _ if self.count == 0 => Value::Number(0.into()),
                _ => float_value(self.float_sum),
            },
            AccumulatorOp::Avg => {
                if self.count == 0 {
                    Value::Null
                } else {
                    float_value(self.float_sum / self.count as f64)
                }
            }
        }
    }
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// Runs a pipeline over a set of documents
pub fn run_pipeline(mut documents: Vec<Value>, stages: &[Stage]) -> Vec<Value> {
    for stage in stages {
        documents = match stage {
            Stage::Match(filters) => documents
                .into_iter()
                .filter(|doc| filters.matches(doc))
                .collect(),
            Stage::Group(spec) => group(documents, spec),
            Stage::Sort(spec) => {
                DocumentSorter::sort(&mut documents, spec);
                documents
            }
        };
    }
    documents
}

fn group(documents: Vec<Value>, spec: &GroupSpec) -> Vec<Value> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<NumericState>)> = Vec::new();

    for doc in &documents {
        let key = doc.get(&spec.by).cloned().unwrap_or(Value::Null);
        let slot = *index.entry(key.to_string()).or_insert_with(|| {
            let states = spec.accumulators.iter().map(|_| NumericState::default()).collect();
            groups.push((key.clone(), states));
            groups.len() - 1
        });

        let states = &mut groups[slot].1;
        for (acc, state) in spec.accumulators.iter().zip(states.iter_mut()) {
            if let Some(value) = doc.get(&acc.field) {
                state.push(value);
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, states)| {
            let mut out = Map::new();
            out.insert("_id".to_string(), key);
            for (acc, state) in spec.accumulators.iter().zip(states.iter()) {
                out.insert(acc.output.clone(), state.finish(acc.op));
            }
            Value::Object(out)
        })
        .collect()
}

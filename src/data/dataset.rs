use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::attribute::{Attribute, AttributeKind};

/// Errors raised while assembling a dataset
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("duplicate attribute name '{0}'")]
    DuplicateAttribute(String),
    #[error("instance {index}: {message}")]
    InvalidInstance { index: usize, message: String },
}

/// A single cell of an instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Index into the attribute's legal values
    Nominal(usize),
    Numeric(f64),
}

impl Value {
    pub fn as_nominal(&self) -> Option<usize> {
        match self {
            Value::Nominal(index) => Some(*index),
            Value::Numeric(_) => None,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(x) => Some(*x),
            Value::Nominal(_) => None,
        }
    }
}

/// One row of the dataset, one value per attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    values: Vec<Value>,
}

impl Instance {
    pub fn new(values: Vec<Value>) -> Self {
        Instance { values }
    }

    /// Value for the attribute at `attribute` in the dataset's attribute list
    pub fn value_of(&self, attribute: usize) -> Option<Value> {
        self.values.get(attribute).copied()
    }

    /// Nominal value index for the attribute, if the cell is nominal
    pub fn nominal_value(&self, attribute: usize) -> Option<usize> {
        self.value_of(attribute).and_then(|v| v.as_nominal())
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// A fixed, ordered, read-only collection of instances over a set of attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawDataSet")]
pub struct DataSet {
    /// Name of the relation the data came from
    pub name: String,
    attributes: Vec<Attribute>,
    instances: Vec<Instance>,
}

/// Unchecked serde form of a dataset; goes through `DataSet::new` on load
#[derive(Deserialize)]
struct RawDataSet {
    name: String,
    attributes: Vec<Attribute>,
    instances: Vec<Instance>,
}

impl TryFrom<RawDataSet> for DataSet {
    type Error = DataError;

    fn try_from(raw: RawDataSet) -> Result<Self, Self::Error> {
        DataSet::new(&raw.name, raw.attributes, raw.instances)
    }
}

impl DataSet {
    /// Create a dataset, checking every instance against the attribute list
    pub fn new(
        name: &str,
        attributes: Vec<Attribute>,
        instances: Vec<Instance>,
    ) -> Result<Self, DataError> {
        for (i, attr) in attributes.iter().enumerate() {
            if attributes[..i].iter().any(|a| a.name == attr.name) {
                return Err(DataError::DuplicateAttribute(attr.name.clone()));
            }
        }

        for (index, instance) in instances.iter().enumerate() {
            if instance.values.len() != attributes.len() {
                return Err(DataError::InvalidInstance {
                    index,
                    message: format!(
                        "expected {} values, found {}",
                        attributes.len(),
                        instance.values.len()
                    ),
                });
            }
            for (attr, value) in attributes.iter().zip(instance.values.iter()) {
                match (&attr.kind, value) {
                    (AttributeKind::Nominal(values), Value::Nominal(v)) if *v < values.len() => {}
                    (AttributeKind::Continuous(_), Value::Numeric(_)) => {}
                    _ => {
                        return Err(DataError::InvalidInstance {
                            index,
                            message: format!("{:?} is not a valid value of '{}'", value, attr.name),
                        });
                    }
                }
            }
        }

        Ok(DataSet {
            name: name.to_string(),
            attributes,
            instances,
        })
    }

    /// Build a dataset of nominal attributes from rows of value names
    pub fn from_nominal_rows(
        name: &str,
        attributes: Vec<Attribute>,
        rows: &[Vec<&str>],
    ) -> Result<Self, DataError> {
        let mut instances = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            if row.len() != attributes.len() {
                return Err(DataError::InvalidInstance {
                    index,
                    message: format!("expected {} values, found {}", attributes.len(), row.len()),
                });
            }
            let mut values = Vec::with_capacity(row.len());
            for (attr, cell) in attributes.iter().zip(row.iter()) {
                let value = attr.value_index(cell).ok_or_else(|| DataError::InvalidInstance {
                    index,
                    message: format!("'{}' is not a legal value of '{}'", cell, attr.name),
                })?;
                values.push(Value::Nominal(value));
            }
            instances.push(Instance::new(values));
        }
        DataSet::new(name, attributes, instances)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Values for a set of attributes, keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: BTreeMap<String, String>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, attribute: &str, value: &str) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: &str, value: &str) {
        self.values.insert(attribute.to_string(), value.to_string());
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Assignment of every nominal attribute to the instance's value
    pub fn from_instance(data: &DataSet, instance: &Instance) -> Self {
        let mut assignment = Assignment::new();
        for (index, attr) in data.attributes().iter().enumerate() {
            if let Some(value) = instance
                .nominal_value(index)
                .and_then(|v| attr.legal_values().get(v))
            {
                assignment.set(&attr.name, value);
            }
        }
        assignment
    }
}

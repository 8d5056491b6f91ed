use serde::{Deserialize, Serialize};

/// Observed range of a continuous attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }

    /// Widen the range so it covers `value`
    pub fn include(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// The type tag of an attribute, carrying what each type needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Categorical attribute with an ordered set of legal values
    Nominal(Vec<String>),
    /// Real-valued attribute; never part of the network
    Continuous(ValueRange),
}

/// A column of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Name of the attribute as declared by the data source
    pub name: String,
    /// Nominal or continuous, with its value set or range
    pub kind: AttributeKind,
}

impl Attribute {
    /// Create a nominal attribute from its legal values
    pub fn nominal<S: Into<String>>(name: &str, values: impl IntoIterator<Item = S>) -> Self {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Nominal(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a continuous attribute with the given range
    pub fn continuous(name: &str, range: ValueRange) -> Self {
        Attribute {
            name: name.to_string(),
            kind: AttributeKind::Continuous(range),
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal(_))
    }

    /// The ordered legal values; empty for continuous attributes
    pub fn legal_values(&self) -> &[String] {
        match &self.kind {
            AttributeKind::Nominal(values) => values,
            AttributeKind::Continuous(_) => &[],
        }
    }

    /// Number of legal values; zero for continuous attributes
    pub fn value_count(&self) -> usize {
        self.legal_values().len()
    }

    /// Position of `value` in the legal value set
    pub fn value_index(&self, value: &str) -> Option<usize> {
        self.legal_values().iter().position(|v| v == value)
    }
}

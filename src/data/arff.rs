//! Loader for ARFF files, the attribute-relation format the network is
//! usually trained from.
//!
//! Supported subset:
//! - `@relation <name>`
//! - `@attribute <name> {v1, v2, ...}` for nominal attributes
//! - `@attribute <name> numeric|real|integer` for continuous attributes
//! - `@data` followed by comma separated rows
//! - `%` comments, blank lines, single or double quoted tokens
//!
//! Missing values (`?`) are rejected.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

use super::attribute::{Attribute, AttributeKind, ValueRange};
use super::dataset::{DataSet, Instance, Value};

/// Load an ARFF file from disk
pub fn load_arff<P: AsRef<Path>>(path: P) -> Result<DataSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ARFF file {}", path.display()))?;
    let data = parse_arff(&text)
        .with_context(|| format!("Failed to parse ARFF file {}", path.display()))?;
    info!(
        "Loaded relation '{}' from {}: {} attributes, {} instances",
        data.name,
        path.display(),
        data.attributes().len(),
        data.len()
    );
    Ok(data)
}

/// Parse ARFF text into a dataset
pub fn parse_arff(text: &str) -> Result<DataSet> {
    let mut relation = String::from("unnamed");
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    let mut in_data = false;

    for (number, raw) in text.lines().enumerate() {
        let line_number = number + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if in_data {
            let cells = split_row(line);
            rows.push((line_number, cells));
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if lower.starts_with("@relation") {
            relation = unquote(line["@relation".len()..].trim()).to_string();
        } else if lower.starts_with("@attribute") {
            let attr = parse_attribute(line["@attribute".len()..].trim())
                .with_context(|| format!("line {}: bad attribute declaration", line_number))?;
            debug!("Declared attribute '{}'", attr.name);
            attributes.push(attr);
        } else if lower.starts_with("@data") {
            in_data = true;
        } else {
            bail!("line {}: unexpected header line '{}'", line_number, line);
        }
    }

    if attributes.is_empty() {
        bail!("no @attribute declarations found");
    }

    let mut instances = Vec::with_capacity(rows.len());
    for (line_number, cells) in rows {
        if cells.len() != attributes.len() {
            bail!(
                "line {}: expected {} values, found {}",
                line_number,
                attributes.len(),
                cells.len()
            );
        }
        let mut values = Vec::with_capacity(cells.len());
        for (attr, cell) in attributes.iter_mut().zip(cells.iter()) {
            values.push(
                parse_cell(attr, cell).with_context(|| format!("line {}", line_number))?,
            );
        }
        instances.push(Instance::new(values));
    }

    settle_ranges(&mut attributes);
    Ok(DataSet::new(&relation, attributes, instances)?)
}

fn parse_attribute(decl: &str) -> Result<Attribute> {
    let (name, rest) = split_name(decl)?;
    let rest = rest.trim();

    if let Some(body) = rest.strip_prefix('{') {
        let body = body
            .strip_suffix('}')
            .ok_or_else(|| anyhow!("unterminated value set for '{}'", name))?;
        let values: Vec<String> = body
            .split(',')
            .map(|v| unquote(v.trim()).to_string())
            .filter(|v| !v.is_empty())
            .collect();
        return Ok(Attribute::nominal(&name, values));
    }

    match rest.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Attribute {
            name,
            kind: AttributeKind::Continuous(ValueRange::new(f64::INFINITY, f64::NEG_INFINITY)),
        }),
        other => bail!("unsupported type '{}' for attribute '{}'", other, name),
    }
}

fn split_name(decl: &str) -> Result<(String, &str)> {
    let decl = decl.trim_start();
    let quote = decl.chars().next().filter(|c| *c == '\'' || *c == '"');
    if let Some(q) = quote {
        let end = decl[1..]
            .find(q)
            .ok_or_else(|| anyhow!("unterminated quoted name in '{}'", decl))?;
        Ok((decl[1..end + 1].to_string(), &decl[end + 2..]))
    } else {
        let end = decl
            .find(|c: char| c.is_whitespace() || c == '{')
            .ok_or_else(|| anyhow!("attribute '{}' has no type", decl))?;
        Ok((decl[..end].to_string(), &decl[end..]))
    }
}

fn parse_cell(attr: &mut Attribute, cell: &str) -> Result<Value> {
    let Attribute { name, kind } = attr;
    if cell == "?" {
        bail!("missing value for attribute '{}' is not supported", name);
    }
    match kind {
        AttributeKind::Nominal(values) => values
            .iter()
            .position(|v| v == cell)
            .map(Value::Nominal)
            .ok_or_else(|| anyhow!("'{}' is not a legal value of '{}'", cell, name)),
        AttributeKind::Continuous(range) => {
            let x: f64 = cell
                .parse()
                .with_context(|| format!("'{}' is not a number for '{}'", cell, name))?;
            range.include(x);
            Ok(Value::Numeric(x))
        }
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|c| unquote(c.trim()).to_string()).collect()
}

fn unquote(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Continuous attributes never seen in any row get an empty 0..0 range
fn settle_ranges(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut() {
        if let AttributeKind::Continuous(range) = &mut attr.kind {
            if range.min > range.max {
                *range = ValueRange::new(0.0, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = "% weather data
@relation weather

@attribute outlook {sunny, overcast, rainy}
@attribute temperature numeric
@attribute 'play golf' {yes,no}

@data
sunny, 85, no
overcast, 83, yes
'rainy', 70, yes
";

    #[test]
    fn test_parse_weather() {
        let data = parse_arff(WEATHER).unwrap();
        assert_eq!(data.name, "weather");
        assert_eq!(data.attributes().len(), 3);
        assert_eq!(data.len(), 3);
        assert_eq!(data.attributes()[2].name, "play golf");
        assert_eq!(data.attributes()[0].legal_values(), ["sunny", "overcast", "rainy"]);
        assert_eq!(data.instances()[2].nominal_value(0), Some(2));
        assert_eq!(
            data.attributes()[1].kind,
            AttributeKind::Continuous(ValueRange::new(70.0, 85.0))
        );
    }

    #[test]
    fn test_rejects_missing_value() {
        let text = "@relation r\n@attribute a {x,y}\n@data\n?\n";
        let err = parse_arff(text).unwrap_err();
        assert!(format!("{:#}", err).contains("missing value"));
    }

    #[test]
    fn test_rejects_unknown_nominal_value() {
        let text = "@relation r\n@attribute a {x,y}\n@data\nz\n";
        let err = parse_arff(text).unwrap_err();
        assert!(format!("{:#}", err).contains("line 4"));
    }

    #[test]
    fn test_rejects_wrong_row_width() {
        let text = "@relation r\n@attribute a {x,y}\n@attribute b {x,y}\n@data\nx\n";
        assert!(parse_arff(text).is_err());
    }

    #[test]
    fn test_numeric_without_rows_has_empty_range() {
        let text = "@relation r\n@attribute t real\n@attribute a {x}\n@data\n";
        let data = parse_arff(text).unwrap();
        assert_eq!(
            data.attributes()[0].kind,
            AttributeKind::Continuous(ValueRange::new(0.0, 0.0))
        );
    }
}

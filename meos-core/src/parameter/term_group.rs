use crate::errors::{MeosError, MeosResult};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A group of terms of the same family in compact json notation.
///
/// Every parameter is either a list with one entry per term or a scalar
/// that is shared by all terms of the group:
/// ```json
/// {"type": "Polynomial", "n": [0.5, -1.2], "d": [1, 2], "t": 0.25}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TermGroup {
    #[serde(rename = "type")]
    pub family: String,
    #[serde(flatten)]
    pub parameters: IndexMap<String, Value>,
}

impl TermGroup {
    /// Number of terms described by the group.
    fn count(&self, vector_parameters: &[&str]) -> MeosResult<usize> {
        let mut count = None;
        for (key, value) in &self.parameters {
            if vector_parameters.contains(&key.as_str()) {
                continue;
            }
            if let Value::Array(values) = value {
                match count {
                    None => count = Some(values.len()),
                    Some(c) if c != values.len() => {
                        return Err(MeosError::Configuration(format!(
                            "term group `{}`: parameter `{key}` has {} entries, expected {c}",
                            self.family,
                            values.len()
                        )))
                    }
                    _ => (),
                }
            }
        }
        Ok(count.unwrap_or(1))
    }

    /// Split the group into individual terms.
    ///
    /// Parameters listed in `vector_parameters` are passed to every term
    /// unchanged instead of being distributed over the terms.
    pub fn expand<T: DeserializeOwned>(&self, vector_parameters: &[&str]) -> MeosResult<Vec<T>> {
        let count = self.count(vector_parameters)?;
        (0..count)
            .map(|i| {
                let parameters: Map<String, Value> = self
                    .parameters
                    .iter()
                    .map(|(key, value)| {
                        let value = match value {
                            Value::Array(values) if !vector_parameters.contains(&key.as_str()) => {
                                values[i].clone()
                            }
                            value => value.clone(),
                        };
                        (key.clone(), value)
                    })
                    .collect();
                let mut term = Map::new();
                term.insert(self.family.clone(), Value::Object(parameters));
                serde_json::from_value(Value::Object(term)).map_err(|e| {
                    MeosError::Configuration(format!("term group `{}`: {e}", self.family))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(deny_unknown_fields)]
    enum Term {
        Power { n: f64, t: f64 },
        Vector { b: Vec<f64>, c: f64 },
    }

    #[test]
    fn scalars_are_broadcast() {
        let group: TermGroup =
            serde_json::from_str(r#"{"type": "Power", "n": [1.0, 2.0, 3.0], "t": 0.5}"#).unwrap();
        let terms: Vec<Term> = group.expand(&[]).unwrap();
        assert_eq!(
            terms,
            vec![
                Term::Power { n: 1.0, t: 0.5 },
                Term::Power { n: 2.0, t: 0.5 },
                Term::Power { n: 3.0, t: 0.5 }
            ]
        );
    }

    #[test]
    fn vector_parameters_are_kept() {
        let group: TermGroup =
            serde_json::from_str(r#"{"type": "Vector", "b": [1.0, 2.0], "c": 0.5}"#).unwrap();
        let terms: Vec<Term> = group.expand(&["b"]).unwrap();
        assert_eq!(terms, vec![Term::Vector { b: vec![1.0, 2.0], c: 0.5 }]);
    }

    #[test]
    fn invalid_groups() {
        for json in [
            r#"{"type": "Power", "n": [1.0, 2.0], "t": [0.5]}"#,
            r#"{"type": "Power", "n": 1.0, "t": 0.5, "x": 1.0}"#,
            r#"{"type": "Power", "n": 1.0}"#,
            r#"{"type": "Unknown", "n": 1.0, "t": 0.5}"#,
        ] {
            let group: TermGroup = serde_json::from_str(json).unwrap();
            assert!(matches!(
                group.expand::<Term>(&[]),
                Err(MeosError::Configuration(_))
            ));
        }
    }
}

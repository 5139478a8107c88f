//! Model persistence (feature: `serde`).
//!
//! A trained classifier is stored as a JSON object with exactly five fields:
//!
//! ```json
//! {
//!   "num_classes": 2,
//!   "num_features": 1,
//!   "weight": [[0.5, -0.5], [1.0, 2.0]],
//!   "offset": [3.0],
//!   "divisor": [4.0]
//! }
//! ```
//!
//! `weight` is stored row by row (bias row first), the same layout used by the C
//! header export. Loading parses plain data only and validates every shape, so a
//! corrupted or hand-edited archive fails with [`Error::Persistence`] instead of
//! yielding an inconsistent classifier.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, FeatureScaling, LinearClassifier, Matrix, Result};

/// On-disk representation of a trained [`LinearClassifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializedClassifier {
    pub num_classes: usize,
    pub num_features: usize,
    /// `num_features + 1` rows of `num_classes` values.
    pub weight: Vec<Vec<f64>>,
    pub offset: Vec<f64>,
    pub divisor: Vec<f64>,
}

impl SerializedClassifier {
    pub fn validate(&self) -> Result<()> {
        if self.num_classes < 2 {
            return Err(Error::Persistence(format!(
                "num_classes must be >= 2, got {}",
                self.num_classes
            )));
        }
        if self.num_features == 0 {
            return Err(Error::Persistence("num_features must be > 0".to_owned()));
        }

        let rows = self.num_features.checked_add(1).ok_or_else(|| {
            Error::Persistence(format!("num_features {} is too large", self.num_features))
        })?;
        if self.weight.len() != rows {
            return Err(Error::Persistence(format!(
                "weight has {} rows, expected num_features + 1 = {rows}",
                self.weight.len()
            )));
        }
        for (i, row) in self.weight.iter().enumerate() {
            if row.len() != self.num_classes {
                return Err(Error::Persistence(format!(
                    "weight row {i} has {} columns, expected num_classes = {}",
                    row.len(),
                    self.num_classes
                )));
            }
        }
        for (name, v) in [("offset", &self.offset), ("divisor", &self.divisor)] {
            if v.len() != self.num_features {
                return Err(Error::Persistence(format!(
                    "{name} has length {}, expected num_features = {}",
                    v.len(),
                    self.num_features
                )));
            }
        }

        let all_finite = self
            .weight
            .iter()
            .flatten()
            .chain(&self.offset)
            .chain(&self.divisor)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(Error::Persistence(
                "parameters must contain only finite values".to_owned(),
            ));
        }
        if let Some(i) = self.divisor.iter().position(|&d| d == 0.0) {
            return Err(Error::Persistence(format!("divisor {i} is zero")));
        }

        Ok(())
    }
}

impl TryFrom<&LinearClassifier> for SerializedClassifier {
    type Error = Error;

    fn try_from(model: &LinearClassifier) -> std::result::Result<Self, Self::Error> {
        let scaling = model.trained_scaling()?;
        let ser = Self {
            num_classes: model.num_classes(),
            num_features: model.num_features(),
            weight: model.weight().iter_rows().map(<[f64]>::to_vec).collect(),
            offset: scaling.offset().to_vec(),
            divisor: scaling.divisor().to_vec(),
        };
        ser.validate()?;
        Ok(ser)
    }
}

impl TryFrom<SerializedClassifier> for LinearClassifier {
    type Error = Error;

    fn try_from(value: SerializedClassifier) -> std::result::Result<Self, Self::Error> {
        value.validate()?;

        let weight = Matrix::from_rows(&value.weight)
            .map_err(|e| Error::Persistence(format!("weight invalid: {e}")))?;
        let scaling = FeatureScaling::from_parts(value.offset, value.divisor)
            .map_err(|e| Error::Persistence(format!("scaling invalid: {e}")))?;
        LinearClassifier::from_parts(value.num_classes, value.num_features, weight, scaling)
            .map_err(|e| Error::Persistence(format!("classifier invalid: {e}")))
    }
}

impl LinearClassifier {
    /// Serialize the classifier to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let ser = SerializedClassifier::try_from(self)?;
        serde_json::to_string_pretty(&ser)
            .map_err(|e| Error::Persistence(format!("failed to serialize classifier: {e}")))
    }

    /// Serialize the classifier to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let ser = SerializedClassifier::try_from(self)?;
        serde_json::to_string(&ser)
            .map_err(|e| Error::Persistence(format!("failed to serialize classifier: {e}")))
    }

    /// Parse a classifier from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let ser: SerializedClassifier = serde_json::from_str(s)
            .map_err(|e| Error::Persistence(format!("failed to parse classifier json: {e}")))?;
        ser.try_into()
    }

    /// Save the trained classifier to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        let p = path.as_ref();
        std::fs::write(p, s)
            .map_err(|e| Error::Persistence(format!("failed to write {}: {e}", p.display())))?;
        log::info!("saved classifier to {}", p.display());
        Ok(())
    }

    /// Load a classifier written by [`LinearClassifier::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::Persistence(format!("failed to read {}: {e}", p.display())))?;
        let classifier = Self::from_json_str(&s)?;
        log::info!(
            "loaded classifier from {} ({} classes, {} features)",
            p.display(),
            classifier.num_classes(),
            classifier.num_features()
        );
        Ok(classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: &str = r#"{
  "num_classes": 2,
  "num_features": 1,
  "weight": [
    [
      0.5,
      -0.5
    ],
    [
      1.0,
      2.0
    ]
  ],
  "offset": [
    3.0
  ],
  "divisor": [
    4.0
  ]
}"#;

    fn trained() -> LinearClassifier {
        let w = Matrix::from_rows(&[[0.5, -0.5], [1.0, 2.0]]).unwrap();
        let s = FeatureScaling::from_parts(vec![3.0], vec![4.0]).unwrap();
        LinearClassifier::from_parts(2, 1, w, s).unwrap()
    }

    #[test]
    fn golden_json_is_stable_and_roundtrips() {
        let json = trained().to_json_string_pretty().unwrap();
        assert_eq!(json, GOLDEN);

        let loaded = LinearClassifier::from_json_str(GOLDEN).unwrap();
        assert_eq!(loaded, trained());
        assert_eq!(loaded.to_json_string_pretty().unwrap(), GOLDEN);
    }

    #[test]
    fn untrained_classifier_cannot_be_saved() {
        let c = LinearClassifier::new(2, 1).unwrap();
        assert_eq!(c.to_json_string().unwrap_err(), Error::NotTrained);
    }

    #[test]
    fn rejects_unknown_fields() {
        let bad = r#"{"num_classes":2,"num_features":1,"weight":[[0,0],[0,0]],"offset":[0],"divisor":[1],"extra":1}"#;
        assert!(matches!(
            LinearClassifier::from_json_str(bad),
            Err(Error::Persistence(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let bad = r#"{"num_classes":2,"num_features":1,"weight":[[0,0],[0,0]],"offset":[0]}"#;
        let err = LinearClassifier::from_json_str(bad).unwrap_err();
        assert!(format!("{err}").contains("divisor"));
    }

    #[test]
    fn rejects_shapes_inconsistent_with_declared_dims() {
        let cases = [
            r#"{"num_classes":3,"num_features":1,"weight":[[0,0],[0,0]],"offset":[0],"divisor":[1]}"#,
            r#"{"num_classes":2,"num_features":2,"weight":[[0,0],[0,0]],"offset":[0],"divisor":[1]}"#,
            r#"{"num_classes":2,"num_features":1,"weight":[[0,0],[0,0]],"offset":[0,1],"divisor":[1]}"#,
            r#"{"num_classes":1,"num_features":1,"weight":[[0],[0]],"offset":[0],"divisor":[1]}"#,
            r#"{"num_classes":2,"num_features":1,"weight":[[0,0],[0,0]],"offset":[0],"divisor":[0]}"#,
            r#"{"num_classes":2,"num_features":18446744073709551615,"weight":[[0,0],[0,0]],"offset":[0],"divisor":[1]}"#,
            r#"{"num_classes":18446744073709551615,"num_features":1,"weight":[[0,0],[0,0]],"offset":[0],"divisor":[1]}"#,
        ];
        for case in cases {
            assert!(
                matches!(LinearClassifier::from_json_str(case), Err(Error::Persistence(_))),
                "accepted {case}"
            );
        }
    }

    #[test]
    fn non_finite_parameters_are_not_saved() {
        let mut c = trained();
        c.weight[(0, 0)] = f64::NAN;
        assert!(matches!(c.to_json_string(), Err(Error::Persistence(_))));
    }
}

//! C header export for embedded inference.
//!
//! The generated header defines the macros the on-device classifier is compiled
//! against:
//!
//! ```c
//! static float classifier_weight[CLASSIFIER_NUM_FEATURES + 1][CLASSIFIER_NUM_CLASSES] =
//!     CLASSIFIER_WEIGHT;
//! static float classifier_offset[CLASSIFIER_NUM_FEATURES] = CLASSIFIER_OFFSET;
//! static float classifier_divisor[CLASSIFIER_NUM_FEATURES] = CLASSIFIER_DIVISOR;
//! ```
//!
//! Rows and columns keep the archive layout: bias row first, one column per class.
//! Values are narrowed to `float`.

use std::path::Path;

use crate::{Error, LinearClassifier, Result};

impl LinearClassifier {
    /// Render the trained parameters as a C header.
    pub fn to_c_header(&self) -> Result<String> {
        let scaling = self.trained_scaling()?;
        let representable = self
            .weight()
            .as_slice()
            .iter()
            .chain(scaling.offset())
            .chain(scaling.divisor())
            .all(|&v| (v as f32).is_finite());
        if !representable {
            return Err(Error::Persistence(
                "cannot export parameters that are not finite as float".to_owned(),
            ));
        }

        let weight_rows: Vec<String> = self
            .weight()
            .iter_rows()
            .map(|row| format!("    {}", c_array(row)))
            .collect();

        let mut out = String::new();
        out.push_str("// Generated by linear-classifier. Do not edit.\n");
        out.push_str("#ifndef CLASSIFIER_H\n#define CLASSIFIER_H\n\n");
        out.push_str(&format!(
            "#define CLASSIFIER_NUM_FEATURES {}\n",
            self.num_features()
        ));
        out.push_str(&format!(
            "#define CLASSIFIER_NUM_CLASSES {}\n\n",
            self.num_classes()
        ));
        out.push_str("#define CLASSIFIER_WEIGHT {\\\n");
        out.push_str(&weight_rows.join(",\\\n"));
        out.push_str("\\\n}\n\n");
        out.push_str(&format!(
            "#define CLASSIFIER_OFFSET {}\n",
            c_array(scaling.offset())
        ));
        out.push_str(&format!(
            "#define CLASSIFIER_DIVISOR {}\n\n",
            c_array(scaling.divisor())
        ));
        out.push_str("#endif // CLASSIFIER_H\n");
        Ok(out)
    }

    /// Write [`LinearClassifier::to_c_header`] to `path`.
    pub fn write_c_header<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let header = self.to_c_header()?;
        let p = path.as_ref();
        std::fs::write(p, header)
            .map_err(|e| Error::Persistence(format!("failed to write {}: {e}", p.display())))?;
        log::info!("wrote classifier header to {}", p.display());
        Ok(())
    }
}

fn c_array(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|&v| c_float(v)).collect();
    format!("{{{}}}", items.join(", "))
}

/// A `float` literal that round-trips the narrowed value, e.g. `1.0f`, `-2.5e-7f`.
fn c_float(v: f64) -> String {
    format!("{:?}f", v as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureScaling, Matrix};

    #[test]
    fn header_layout_matches_embedded_arrays() {
        let w = Matrix::from_rows(&[[0.5, -0.5, 1.0], [1.0, 2.0, 3.0], [-4.0, 0.25, 0.0]]).unwrap();
        let s = FeatureScaling::from_parts(vec![49.5, 52.0], vec![98.0, 107.0]).unwrap();
        let c = LinearClassifier::from_parts(3, 2, w, s).unwrap();

        let expected = "\
// Generated by linear-classifier. Do not edit.
#ifndef CLASSIFIER_H
#define CLASSIFIER_H

#define CLASSIFIER_NUM_FEATURES 2
#define CLASSIFIER_NUM_CLASSES 3

#define CLASSIFIER_WEIGHT {\\
    {0.5f, -0.5f, 1.0f},\\
    {1.0f, 2.0f, 3.0f},\\
    {-4.0f, 0.25f, 0.0f}\\
}

#define CLASSIFIER_OFFSET {49.5f, 52.0f}
#define CLASSIFIER_DIVISOR {98.0f, 107.0f}

#endif // CLASSIFIER_H
";
        assert_eq!(c.to_c_header().unwrap(), expected);
    }

    #[test]
    fn small_values_use_exponent_literals() {
        assert_eq!(c_float(1e-7), "1e-7f");
        assert_eq!(c_float(-3.0), "-3.0f");
    }

    #[test]
    fn values_beyond_float_range_are_refused() {
        let s = FeatureScaling::from_parts(vec![0.0], vec![1.0]).unwrap();
        let w = Matrix::from_rows(&[[1e39, 0.0], [1.0, 2.0]]).unwrap();
        let c = LinearClassifier::from_parts(2, 1, w, s).unwrap();
        assert!(matches!(c.to_c_header(), Err(Error::Persistence(_))));

        let s = FeatureScaling::from_parts(vec![-1e300], vec![1.0]).unwrap();
        let w = Matrix::from_rows(&[[0.0, 0.0], [1.0, 2.0]]).unwrap();
        let c = LinearClassifier::from_parts(2, 1, w, s).unwrap();
        assert!(matches!(c.to_c_header(), Err(Error::Persistence(_))));
    }

    #[test]
    fn export_requires_trained_classifier() {
        let c = LinearClassifier::new(2, 1).unwrap();
        assert_eq!(c.to_c_header().unwrap_err(), Error::NotTrained);
    }
}

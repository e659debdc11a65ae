//! CSS-style 3D transform lists with Chromium-compatible interpolation.
//!
//! Re-exports the operation, list and plan types, and glues configuration
//! data to them for the `transform3d` sampling tool.
//!
//! ```
//! use transform3d::TransformList;
//!
//! let from = TransformList::new().rotate(0.0);
//! let to = TransformList::new().rotate(90.0);
//! assert_eq!(from.interpolation(&to).step(0.5).to_string(), "rotate3d(0, 0, 1, 45deg)");
//! ```

use std::fmt::Write;

pub use transform3d_config as config;
pub use transform3d_math as math;
pub use transform3d_ops::{
    InterpolationPlan, MatrixOperation, Operation, OperationKind, PlanMatching, TransformList,
};

use transform3d_config::{OperationSpec, OutputConfig, OutputFormat};
use transform3d_math::Matrix3d;

/// Build a transform list from its configured operations, in order.
pub fn build_list(specs: &[OperationSpec]) -> TransformList {
    specs.iter().fold(TransformList::new(), append_spec)
}

fn append_spec(list: TransformList, spec: &OperationSpec) -> TransformList {
    match *spec {
        OperationSpec::Translate3d { x, y, z } => list.translate3d(x, y, z),
        OperationSpec::Translate { x, y } => list.translate(x, y),
        OperationSpec::TranslateX { x } => list.translate_x(x),
        OperationSpec::TranslateY { y } => list.translate_y(y),
        OperationSpec::TranslateZ { z } => list.translate_z(z),
        OperationSpec::Scale3d { x, y, z } => list.scale3d(x, y, z),
        OperationSpec::Scale { x, y } => list.scale_xy(x, y.unwrap_or(x)),
        OperationSpec::ScaleX { x } => list.scale_x(x),
        OperationSpec::ScaleY { y } => list.scale_y(y),
        OperationSpec::ScaleZ { z } => list.scale_z(z),
        OperationSpec::Rotate3d { x, y, z, angle } => list.rotate3d(x, y, z, angle),
        OperationSpec::Rotate { angle } => list.rotate(angle),
        OperationSpec::RotateX { angle } => list.rotate_x(angle),
        OperationSpec::RotateY { angle } => list.rotate_y(angle),
        OperationSpec::RotateZ { angle } => list.rotate_z(angle),
        OperationSpec::Skew { x, y } => list.skew(x, y),
        OperationSpec::SkewX { x } => list.skew_x(x),
        OperationSpec::SkewY { y } => list.skew_y(y),
        OperationSpec::Perspective { length } => list.perspective(length),
        OperationSpec::Matrix { a, b, c, d, e, f } => list.matrix(a, b, c, d, e, f),
        OperationSpec::Matrix3d { values } => list.matrix3d(values),
    }
}

/// One evaluated point of an interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub progress: f64,
    pub list: TransformList,
}

/// Step `plan` at every progress value.
pub fn sample(plan: &InterpolationPlan, progress_values: &[f64]) -> Vec<Sample> {
    progress_values
        .iter()
        .map(|&progress| Sample {
            progress,
            list: plan.step(progress),
        })
        .collect()
}

/// Render a sample as one output line.
pub fn format_sample(sample: &Sample, output: &OutputConfig) -> String {
    let mut line = format!("t={}", sample.progress);
    if matches!(output.format, OutputFormat::Text | OutputFormat::Both) {
        line.push(' ');
        if sample.list.is_empty() {
            line.push_str("none");
        } else {
            let _ = write!(line, "{}", sample.list);
        }
    }
    if matches!(output.format, OutputFormat::Matrix | OutputFormat::Both) {
        line.push(' ');
        line.push_str(&format_matrix(&sample.list.compose(), output.precision));
    }
    line
}

/// `matrix3d(...)` text, optionally rounded to `precision` decimals.
pub fn format_matrix(matrix: &Matrix3d, precision: Option<usize>) -> String {
    let Some(precision) = precision else {
        return matrix.to_string();
    };
    let entries: Vec<String> = matrix
        .to_css_array()
        .iter()
        .map(|value| format!("{value:.precision$}"))
        .collect();
    format!("matrix3d({})", entries.join(", "))
}

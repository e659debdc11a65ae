//! Serialized form of transform operations.
//!
//! Each entry names one CSS transform function with its arguments as
//! structured fields, e.g. `{ type = "rotate3d", x = 0.0, y = 1.0, z = 0.0, angle = 45.0 }`.
//! Angles are in degrees and lengths in pixels.

use serde::{Deserialize, Serialize};

/// One transform function with its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationSpec {
    Translate3d {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        z: f64,
    },
    Translate {
        x: f64,
        #[serde(default)]
        y: f64,
    },
    TranslateX {
        x: f64,
    },
    TranslateY {
        y: f64,
    },
    TranslateZ {
        z: f64,
    },
    Scale3d {
        x: f64,
        y: f64,
        z: f64,
    },
    /// `y` defaults to `x`.
    Scale {
        x: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<f64>,
    },
    ScaleX {
        x: f64,
    },
    ScaleY {
        y: f64,
    },
    ScaleZ {
        z: f64,
    },
    Rotate3d {
        x: f64,
        y: f64,
        z: f64,
        angle: f64,
    },
    Rotate {
        angle: f64,
    },
    RotateX {
        angle: f64,
    },
    RotateY {
        angle: f64,
    },
    RotateZ {
        angle: f64,
    },
    Skew {
        x: f64,
        #[serde(default)]
        y: f64,
    },
    SkewX {
        x: f64,
    },
    SkewY {
        y: f64,
    },
    Perspective {
        length: f64,
    },
    /// 2D `matrix(a, b, c, d, e, f)`.
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    /// `matrix3d()` arguments in CSS order.
    Matrix3d {
        values: [f64; 16],
    },
}

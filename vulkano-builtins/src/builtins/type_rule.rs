// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::reflect::shape::{ComponentKind, TypeShape};
use std::fmt::{Display, Error as FmtError, Formatter};

/// The type that a built-in must be declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRule {
    /// The type is not checked.
    Any,
    BoolScalar,
    IntScalar {
        width: u32,
    },
    FloatScalar {
        width: u32,
    },
    IntVector {
        count: u32,
        width: u32,
    },
    FloatVector {
        count: u32,
        width: u32,
    },
    /// An array of int scalars. If `length` is `None`, any length is accepted, including a
    /// runtime length.
    IntArray {
        length: Option<u32>,
        width: u32,
    },
    FloatArray {
        length: Option<u32>,
        width: u32,
    },
    /// An array of any length of int vectors.
    IntVectorArray {
        components: u32,
        width: u32,
    },
    FloatVectorArray {
        length: u32,
        components: u32,
        width: u32,
    },
    FloatMatrix {
        columns: u32,
        rows: u32,
        width: u32,
    },
}

/// The three ways in which a type can fail to match. They are checked in this order, so a type
/// that has the wrong kind is never reported as having the wrong width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MismatchTier {
    Kind,
    Count,
    Width,
}

/// A type that doesn't match a [`TypeRule`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub tier: MismatchTier,
    /// What is wrong with the actual type, phrased to follow its ID: "has 3 components".
    pub description: String,
}

impl ShapeMismatch {
    fn kind(description: impl Into<String>) -> Self {
        ShapeMismatch {
            tier: MismatchTier::Kind,
            description: description.into(),
        }
    }

    fn count(description: String) -> Self {
        ShapeMismatch {
            tier: MismatchTier::Count,
            description,
        }
    }

    fn width(description: String) -> Self {
        ShapeMismatch {
            tier: MismatchTier::Width,
            description,
        }
    }
}

impl TypeRule {
    /// Returns whether `shape` has the class of type that the rule expects: scalar, vector, array
    /// or matrix. Used to tell an arrayed declaration apart from a wrong one.
    pub(crate) fn matches_class(self, shape: &TypeShape) -> bool {
        match self {
            Self::Any => false,
            Self::BoolScalar | Self::IntScalar { .. } | Self::FloatScalar { .. } => {
                shape.is_scalar()
            }
            Self::IntVector { .. } | Self::FloatVector { .. } => {
                matches!(shape, TypeShape::Vector { .. })
            }
            Self::IntArray { .. }
            | Self::FloatArray { .. }
            | Self::IntVectorArray { .. }
            | Self::FloatVectorArray { .. } => matches!(shape, TypeShape::Array { .. }),
            Self::FloatMatrix { .. } => matches!(shape, TypeShape::Matrix { .. }),
        }
    }

    /// Checks `shape` against the rule.
    pub fn check(self, shape: &TypeShape) -> Result<(), ShapeMismatch> {
        match self {
            Self::Any => Ok(()),
            Self::BoolScalar => match shape {
                TypeShape::Bool => Ok(()),
                _ => Err(ShapeMismatch::kind("is not a bool scalar")),
            },
            Self::IntScalar { width } => check_scalar(shape, ComponentKind::Int, width),
            Self::FloatScalar { width } => check_scalar(shape, ComponentKind::Float, width),
            Self::IntVector { count, width } => {
                check_vector(shape, ComponentKind::Int, count, width)
            }
            Self::FloatVector { count, width } => {
                check_vector(shape, ComponentKind::Float, count, width)
            }
            Self::IntArray { length, width } => {
                check_scalar_array(shape, ComponentKind::Int, length, width)
            }
            Self::FloatArray { length, width } => {
                check_scalar_array(shape, ComponentKind::Float, length, width)
            }
            Self::IntVectorArray { components, width } => {
                check_vector_array(shape, ComponentKind::Int, None, components, width)
            }
            Self::FloatVectorArray {
                length,
                components,
                width,
            } => check_vector_array(shape, ComponentKind::Float, Some(length), components, width),
            Self::FloatMatrix {
                columns,
                rows,
                width,
            } => check_matrix(shape, columns, rows, width),
        }
    }
}

fn kind_name(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Bool => "bool",
        ComponentKind::Int => "int",
        ComponentKind::Float => "float",
    }
}

fn scalar_kind(shape: &TypeShape) -> Option<ComponentKind> {
    if shape.is_scalar() {
        shape.component_kind()
    } else {
        None
    }
}

fn check_width(shape: &TypeShape, width: u32, prefix: &str) -> Result<(), ShapeMismatch> {
    match shape.bit_width() {
        Some(actual) if actual != width => Err(ShapeMismatch::width(format!(
            "has {}bit width {}",
            prefix, actual,
        ))),
        _ => Ok(()),
    }
}

fn check_scalar(shape: &TypeShape, kind: ComponentKind, width: u32) -> Result<(), ShapeMismatch> {
    if scalar_kind(shape) != Some(kind) {
        return Err(ShapeMismatch::kind(format!(
            "is not {} {} scalar",
            article(kind_name(kind)),
            kind_name(kind),
        )));
    }

    check_width(shape, width, "")
}

fn check_vector(
    shape: &TypeShape,
    kind: ComponentKind,
    count: u32,
    width: u32,
) -> Result<(), ShapeMismatch> {
    let TypeShape::Vector {
        component,
        count: actual_count,
    } = shape
    else {
        return Err(ShapeMismatch::kind(format!(
            "is not {} {} vector",
            article(kind_name(kind)),
            kind_name(kind),
        )));
    };

    if scalar_kind(component) != Some(kind) {
        return Err(ShapeMismatch::kind(format!(
            "is not {} {} vector",
            article(kind_name(kind)),
            kind_name(kind),
        )));
    }

    if *actual_count != count {
        return Err(ShapeMismatch::count(format!(
            "has {} components",
            actual_count,
        )));
    }

    check_width(shape, width, "components with ")
}

fn check_array_length(actual: Option<u32>, expected: u32) -> Result<(), ShapeMismatch> {
    match actual {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(ShapeMismatch::count(format!("has {} components", actual))),
        None => Err(ShapeMismatch::count(
            "has a number of components that is not a constant".to_owned(),
        )),
    }
}

fn check_scalar_array(
    shape: &TypeShape,
    kind: ComponentKind,
    length: Option<u32>,
    width: u32,
) -> Result<(), ShapeMismatch> {
    let TypeShape::Array {
        element,
        length: actual_length,
    } = shape
    else {
        return Err(ShapeMismatch::kind("is not an array"));
    };

    if scalar_kind(element) != Some(kind) {
        return Err(ShapeMismatch::kind(format!(
            "components are not {} scalar",
            kind_name(kind),
        )));
    }

    if let Some(length) = length {
        check_array_length(*actual_length, length)?;
    }

    check_width(shape, width, "components with ")
}

fn check_vector_array(
    shape: &TypeShape,
    kind: ComponentKind,
    length: Option<u32>,
    components: u32,
    width: u32,
) -> Result<(), ShapeMismatch> {
    let TypeShape::Array {
        element,
        length: actual_length,
    } = shape
    else {
        return Err(ShapeMismatch::kind("is not an array"));
    };

    let TypeShape::Vector { component, count } = element.as_ref() else {
        return Err(ShapeMismatch::kind(format!(
            "components are not {} vectors",
            kind_name(kind),
        )));
    };

    if scalar_kind(component) != Some(kind) {
        return Err(ShapeMismatch::kind(format!(
            "components are not {} vectors",
            kind_name(kind),
        )));
    }

    if let Some(length) = length {
        check_array_length(*actual_length, length)?;
    }

    if *count != components {
        return Err(ShapeMismatch::count(format!(
            "has vectors with {} components",
            count,
        )));
    }

    check_width(shape, width, "components with ")
}

fn check_matrix(
    shape: &TypeShape,
    columns: u32,
    rows: u32,
    width: u32,
) -> Result<(), ShapeMismatch> {
    let TypeShape::Matrix {
        component,
        column_count,
        row_count,
    } = shape
    else {
        return Err(ShapeMismatch::kind("is not a float matrix"));
    };

    if scalar_kind(component) != Some(ComponentKind::Float) {
        return Err(ShapeMismatch::kind("is not a float matrix"));
    }

    if *column_count != columns {
        return Err(ShapeMismatch::count(format!(
            "has {} columns",
            column_count,
        )));
    }

    if *row_count != rows {
        return Err(ShapeMismatch::count(format!("has {} rows", row_count)));
    }

    check_width(shape, width, "components with ")
}

/// Returns "a" or "an" for a word.
pub(crate) fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U') => "an",
        _ => "a",
    }
}

/// Describes the expected type: "4-component 32-bit float vector".
impl Display for TypeRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match *self {
            Self::Any => write!(f, "value of any type"),
            Self::BoolScalar => write!(f, "bool scalar"),
            Self::IntScalar { width } => write!(f, "{}-bit int scalar", width),
            Self::FloatScalar { width } => write!(f, "{}-bit float scalar", width),
            Self::IntVector { count, width } => {
                write!(f, "{}-component {}-bit int vector", count, width)
            }
            Self::FloatVector { count, width } => {
                write!(f, "{}-component {}-bit float vector", count, width)
            }
            Self::IntArray {
                length: None,
                width,
            } => write!(f, "{}-bit int array", width),
            Self::IntArray {
                length: Some(length),
                width,
            } => write!(f, "{}-component {}-bit int array", length, width),
            Self::FloatArray {
                length: None,
                width,
            } => write!(f, "{}-bit float array", width),
            Self::FloatArray {
                length: Some(length),
                width,
            } => write!(f, "{}-component {}-bit float array", length, width),
            Self::IntVectorArray { components, width } => write!(
                f,
                "array of {}-component {}-bit int vectors",
                components, width,
            ),
            Self::FloatVectorArray {
                length,
                components,
                width,
            } => write!(
                f,
                "{}-element array of {}-component {}-bit float vectors",
                length, components, width,
            ),
            Self::FloatMatrix {
                columns,
                rows,
                width,
            } => write!(
                f,
                "matrix with {} columns of {}-component vectors of {}-bit floats",
                columns, rows, width,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{article, MismatchTier, TypeRule};
    use crate::reflect::shape::TypeShape;

    fn float(width: u32) -> TypeShape {
        TypeShape::Float { width }
    }

    fn int(width: u32) -> TypeShape {
        TypeShape::Int {
            width,
            signed: false,
        }
    }

    fn vector(component: TypeShape, count: u32) -> TypeShape {
        TypeShape::Vector {
            component: Box::new(component),
            count,
        }
    }

    fn array(element: TypeShape, length: Option<u32>) -> TypeShape {
        TypeShape::Array {
            element: Box::new(element),
            length,
        }
    }

    #[test]
    fn tiers_are_exclusive() {
        let rule = TypeRule::FloatVector {
            count: 4,
            width: 32,
        };

        assert_eq!(rule.check(&vector(float(32), 4)), Ok(()));

        let kind = rule.check(&vector(int(32), 4)).unwrap_err();
        assert_eq!(kind.tier, MismatchTier::Kind);
        assert_eq!(kind.description, "is not a float vector");

        let count = rule.check(&vector(float(32), 3)).unwrap_err();
        assert_eq!(count.tier, MismatchTier::Count);
        assert_eq!(count.description, "has 3 components");

        let width = rule.check(&vector(float(64), 4)).unwrap_err();
        assert_eq!(width.tier, MismatchTier::Width);
        assert_eq!(width.description, "has components with bit width 64");

        // Wrong kind and wrong count at once is reported as the kind only.
        let both = rule.check(&vector(int(64), 3)).unwrap_err();
        assert_eq!(both.tier, MismatchTier::Kind);
    }

    #[test]
    fn scalars() {
        let rule = TypeRule::IntScalar { width: 32 };

        assert_eq!(
            rule.check(&float(32)).unwrap_err().description,
            "is not an int scalar",
        );
        assert_eq!(
            rule.check(&int(16)).unwrap_err().description,
            "has bit width 16",
        );
        assert_eq!(
            TypeRule::BoolScalar.check(&int(32)).unwrap_err().description,
            "is not a bool scalar",
        );
    }

    #[test]
    fn arrays() {
        let rule = TypeRule::FloatArray {
            length: Some(4),
            width: 32,
        };

        assert_eq!(rule.check(&array(float(32), Some(4))), Ok(()));
        assert_eq!(
            rule.check(&float(32)).unwrap_err().description,
            "is not an array",
        );
        assert_eq!(
            rule.check(&array(int(32), Some(4))).unwrap_err().description,
            "components are not float scalar",
        );
        assert_eq!(
            rule.check(&array(float(32), Some(3))).unwrap_err().description,
            "has 3 components",
        );
        assert_eq!(
            rule.check(&array(float(32), None)).unwrap_err().tier,
            MismatchTier::Count,
        );

        let any_length = TypeRule::FloatArray {
            length: None,
            width: 32,
        };
        assert_eq!(any_length.check(&array(float(32), None)), Ok(()));
        assert_eq!(
            any_length.check(&array(float(16), Some(2))).unwrap_err().tier,
            MismatchTier::Width,
        );
    }

    #[test]
    fn vector_arrays() {
        let rule = TypeRule::IntVectorArray {
            components: 3,
            width: 32,
        };

        assert_eq!(rule.check(&array(vector(int(32), 3), Some(64))), Ok(()));
        assert_eq!(
            rule.check(&array(int(32), Some(64))).unwrap_err().description,
            "components are not int vectors",
        );
        assert_eq!(
            rule.check(&array(vector(int(32), 2), Some(64)))
                .unwrap_err()
                .description,
            "has vectors with 2 components",
        );
    }

    #[test]
    fn matrices() {
        let rule = TypeRule::FloatMatrix {
            columns: 4,
            rows: 3,
            width: 32,
        };
        let matrix = |column_count, row_count| TypeShape::Matrix {
            component: Box::new(float(32)),
            column_count,
            row_count,
        };

        assert_eq!(rule.check(&matrix(4, 3)), Ok(()));
        assert_eq!(
            rule.check(&matrix(3, 3)).unwrap_err().description,
            "has 3 columns",
        );
        assert_eq!(
            rule.check(&matrix(4, 4)).unwrap_err().description,
            "has 4 rows",
        );
    }

    #[test]
    fn expected_descriptions() {
        let rule = TypeRule::FloatVector {
            count: 4,
            width: 32,
        };
        assert_eq!(rule.to_string(), "4-component 32-bit float vector");
        assert_eq!(article("int scalar"), "an");
        assert_eq!(article("4-component"), "a");
        assert!(rule.matches_class(&vector(int(16), 2)));
        assert!(!rule.matches_class(&array(vector(float(32), 4), None)));
    }
}

// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::spirv::{Id, Instruction, Spirv};

/// The structure of a SPIR-V type, as far as built-in validation is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeShape {
    Bool,
    Int {
        width: u32,
        signed: bool,
    },
    Float {
        width: u32,
    },
    Vector {
        component: Box<TypeShape>,
        count: u32,
    },
    Matrix {
        component: Box<TypeShape>,
        column_count: u32,
        row_count: u32,
    },
    /// `length` is `None` for runtime arrays, and for arrays whose length is a specialization
    /// constant.
    Array {
        element: Box<TypeShape>,
        length: Option<u32>,
    },
    Struct {
        member_count: usize,
    },
    /// Any other type, identified by the name of its opcode.
    Other {
        opcode: String,
    },
}

/// The kind of the scalars that make up a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Bool,
    Int,
    Float,
}

impl TypeShape {
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool | Self::Int { .. } | Self::Float { .. })
    }

    /// Returns the kind of scalar at the bottom of the type, looking through vectors, matrices
    /// and arrays.
    pub fn component_kind(&self) -> Option<ComponentKind> {
        match self {
            Self::Bool => Some(ComponentKind::Bool),
            Self::Int { .. } => Some(ComponentKind::Int),
            Self::Float { .. } => Some(ComponentKind::Float),
            Self::Vector { component, .. } | Self::Matrix { component, .. } => {
                component.component_kind()
            }
            Self::Array { element, .. } => element.component_kind(),
            Self::Struct { .. } | Self::Other { .. } => None,
        }
    }

    /// Returns the bit width of the scalar at the bottom of the type.
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            Self::Int { width, .. } | Self::Float { width } => Some(*width),
            Self::Vector { component, .. } | Self::Matrix { component, .. } => {
                component.bit_width()
            }
            Self::Array { element, .. } => element.bit_width(),
            Self::Bool | Self::Struct { .. } | Self::Other { .. } => None,
        }
    }

    /// Returns the number of components of a vector, or of the columns of a matrix. Scalars have
    /// one component.
    pub fn component_count(&self) -> Option<u32> {
        match self {
            Self::Bool | Self::Int { .. } | Self::Float { .. } => Some(1),
            Self::Vector { count, .. } => Some(*count),
            Self::Matrix { row_count, .. } => Some(*row_count),
            _ => None,
        }
    }

    #[inline]
    pub fn array_length(&self) -> Option<u32> {
        match self {
            Self::Array { length, .. } => *length,
            _ => None,
        }
    }

    #[inline]
    pub fn column_count(&self) -> Option<u32> {
        match self {
            Self::Matrix { column_count, .. } => Some(*column_count),
            _ => None,
        }
    }
}

/// Resolves the shape of a type. Returns `None` if `type_id` isn't a type declared in the module.
pub fn shape_of(spirv: &Spirv, type_id: Id) -> Option<TypeShape> {
    let shape = match *spirv.id(type_id)?.instruction() {
        Instruction::TypeBool { .. } => TypeShape::Bool,
        Instruction::TypeInt {
            width, signedness, ..
        } => TypeShape::Int {
            width,
            signed: signedness != 0,
        },
        Instruction::TypeFloat { width, .. } => TypeShape::Float { width },
        Instruction::TypeVector {
            component_type,
            component_count,
            ..
        } => TypeShape::Vector {
            component: Box::new(shape_of(spirv, component_type)?),
            count: component_count,
        },
        Instruction::TypeMatrix {
            column_type,
            column_count,
            ..
        } => match shape_of(spirv, column_type)? {
            TypeShape::Vector { component, count } => TypeShape::Matrix {
                component,
                column_count,
                row_count: count,
            },
            _ => TypeShape::Other {
                opcode: "OpTypeMatrix".to_owned(),
            },
        },
        Instruction::TypeArray {
            element_type,
            length,
            ..
        } => TypeShape::Array {
            element: Box::new(shape_of(spirv, element_type)?),
            length: constant_length(spirv, length),
        },
        Instruction::TypeRuntimeArray { element_type, .. } => TypeShape::Array {
            element: Box::new(shape_of(spirv, element_type)?),
            length: None,
        },
        Instruction::TypeStruct {
            ref member_types, ..
        } => TypeShape::Struct {
            member_count: member_types.len(),
        },
        ref instruction if instruction.is_type() => TypeShape::Other {
            opcode: instruction.name().to_owned(),
        },
        _ => return None,
    };

    Some(shape)
}

/// Returns the value of an array length operand, if it is a plain `OpConstant`.
fn constant_length(spirv: &Spirv, length: Id) -> Option<u32> {
    match spirv.id(length)?.instruction() {
        Instruction::Constant { value, .. } => match value.as_slice() {
            &[low] | &[low, 0] => Some(low),
            _ => None,
        },
        _ => None,
    }
}

/// Returns the storage class and pointee type of a pointer type.
pub(crate) fn pointee(
    spirv: &Spirv,
    pointer_type: Id,
) -> Option<(crate::spirv::StorageClass, Id)> {
    match *spirv.id(pointer_type)?.instruction() {
        Instruction::TypePointer {
            storage_class, ty, ..
        } => Some((storage_class, ty)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{shape_of, ComponentKind, TypeShape};
    use crate::{
        spirv::{assemble::assemble, Id, Instruction, Spirv},
        Version,
    };

    fn module() -> Spirv {
        assemble(
            r#"
            %float = OpTypeFloat 32
            %uint = OpTypeInt 32 0
            %v3float = OpTypeVector %float 3
            %mat4v3float = OpTypeMatrix %v3float 4
            %uint_4 = OpConstant %uint 4
            %arr = OpTypeArray %float %uint_4
            %rt = OpTypeRuntimeArray %v3float
            %spec_len = OpSpecConstant %uint 2
            %spec_arr = OpTypeArray %uint %spec_len
            %struct = OpTypeStruct %float %uint
            %sampler = OpTypeSampler
            "#,
            Version::V1_0,
        )
        .unwrap()
    }

    fn type_named(spirv: &Spirv, index: usize) -> Id {
        spirv.types_global_values()[index].result_id().unwrap()
    }

    #[test]
    fn scalars_and_vectors() {
        let spirv = module();

        assert_eq!(
            shape_of(&spirv, type_named(&spirv, 1)),
            Some(TypeShape::Int {
                width: 32,
                signed: false
            }),
        );

        let vector = shape_of(&spirv, type_named(&spirv, 2)).unwrap();
        assert_eq!(vector.component_kind(), Some(ComponentKind::Float));
        assert_eq!(vector.component_count(), Some(3));
        assert_eq!(vector.bit_width(), Some(32));
    }

    #[test]
    fn matrix() {
        let spirv = module();
        let matrix = shape_of(&spirv, type_named(&spirv, 3)).unwrap();

        assert_eq!(matrix.column_count(), Some(4));
        assert_eq!(matrix.component_count(), Some(3));
        assert_eq!(matrix.bit_width(), Some(32));
    }

    #[test]
    fn array_lengths() {
        let spirv = module();

        let array = shape_of(&spirv, type_named(&spirv, 5)).unwrap();
        assert_eq!(array.array_length(), Some(4));
        assert_eq!(array.component_kind(), Some(ComponentKind::Float));

        let runtime = shape_of(&spirv, type_named(&spirv, 6)).unwrap();
        assert!(matches!(runtime, TypeShape::Array { length: None, .. }));

        let spec = shape_of(&spirv, type_named(&spirv, 8)).unwrap();
        assert!(matches!(spec, TypeShape::Array { length: None, .. }));
    }

    #[test]
    fn other_types() {
        let spirv = module();

        assert_eq!(
            shape_of(&spirv, type_named(&spirv, 9)),
            Some(TypeShape::Struct { member_count: 2 }),
        );
        assert_eq!(
            shape_of(&spirv, type_named(&spirv, 10)),
            Some(TypeShape::Other {
                opcode: "OpTypeSampler".to_owned()
            }),
        );

        // A constant is not a type.
        assert!(matches!(
            spirv.types_global_values()[4],
            Instruction::Constant { .. }
        ));
        assert_eq!(shape_of(&spirv, type_named(&spirv, 4)), None);
    }
}

// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    AddressingModel, Capability, Decoration, ExecutionMode, ExecutionModel, MemoryModel,
    StorageClass,
};
use smallvec::SmallVec;
use std::fmt::{Display, Error as FmtError, Formatter};

/// A SPIR-V result ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Id(pub(crate) u32);

impl Id {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Id(id)
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl From<Id> for u32 {
    #[inline]
    fn from(id: Id) -> u32 {
        id.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "%{}", self.0)
    }
}

/// An operand of an instruction that this crate does not interpret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Id(Id),
    Literal(u32),
    String(String),
    Enumerant(String),
}

/// A single SPIR-V instruction.
///
/// Only the instructions that the validator needs to look inside of get their own variant.
/// Everything else is kept as `Unknown`, which still records the IDs it refers to.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Nop,
    Capability {
        capability: Capability,
    },
    Extension {
        name: String,
    },
    ExtInstImport {
        result_id: Id,
        name: String,
    },
    MemoryModel {
        addressing_model: AddressingModel,
        memory_model: MemoryModel,
    },
    EntryPoint {
        execution_model: ExecutionModel,
        entry_point: Id,
        name: String,
        interface: Vec<Id>,
    },
    ExecutionMode {
        entry_point: Id,
        mode: ExecutionMode,
        operands: Vec<u32>,
    },
    ExecutionModeId {
        entry_point: Id,
        mode: ExecutionMode,
        operands: Vec<Id>,
    },
    Name {
        target: Id,
        name: String,
    },
    MemberName {
        ty: Id,
        member: u32,
        name: String,
    },
    Decorate {
        target: Id,
        decoration: Decoration,
    },
    MemberDecorate {
        structure_type: Id,
        member: u32,
        decoration: Decoration,
    },
    DecorationGroup {
        result_id: Id,
    },
    GroupDecorate {
        decoration_group: Id,
        targets: Vec<Id>,
    },
    GroupMemberDecorate {
        decoration_group: Id,
        targets: Vec<(Id, u32)>,
    },
    TypeVoid {
        result_id: Id,
    },
    TypeBool {
        result_id: Id,
    },
    TypeInt {
        result_id: Id,
        width: u32,
        signedness: u32,
    },
    TypeFloat {
        result_id: Id,
        width: u32,
    },
    TypeVector {
        result_id: Id,
        component_type: Id,
        component_count: u32,
    },
    TypeMatrix {
        result_id: Id,
        column_type: Id,
        column_count: u32,
    },
    TypeArray {
        result_id: Id,
        element_type: Id,
        length: Id,
    },
    TypeRuntimeArray {
        result_id: Id,
        element_type: Id,
    },
    TypeStruct {
        result_id: Id,
        member_types: Vec<Id>,
    },
    TypePointer {
        result_id: Id,
        storage_class: StorageClass,
        ty: Id,
    },
    TypeFunction {
        result_id: Id,
        return_type: Id,
        parameter_types: Vec<Id>,
    },
    ConstantTrue {
        result_type_id: Id,
        result_id: Id,
    },
    ConstantFalse {
        result_type_id: Id,
        result_id: Id,
    },
    Constant {
        result_type_id: Id,
        result_id: Id,
        value: Vec<u32>,
    },
    ConstantComposite {
        result_type_id: Id,
        result_id: Id,
        constituents: Vec<Id>,
    },
    ConstantNull {
        result_type_id: Id,
        result_id: Id,
    },
    SpecConstantTrue {
        result_type_id: Id,
        result_id: Id,
    },
    SpecConstantFalse {
        result_type_id: Id,
        result_id: Id,
    },
    SpecConstant {
        result_type_id: Id,
        result_id: Id,
        value: Vec<u32>,
    },
    SpecConstantComposite {
        result_type_id: Id,
        result_id: Id,
        constituents: Vec<Id>,
    },
    SpecConstantOp {
        result_type_id: Id,
        result_id: Id,
        operation: String,
        operands: Vec<Operand>,
    },
    Variable {
        result_type_id: Id,
        result_id: Id,
        storage_class: StorageClass,
        initializer: Option<Id>,
    },
    Function {
        result_type_id: Id,
        result_id: Id,
        function_control: u32,
        function_type: Id,
    },
    FunctionParameter {
        result_type_id: Id,
        result_id: Id,
    },
    FunctionEnd,
    FunctionCall {
        result_type_id: Id,
        result_id: Id,
        function: Id,
        arguments: Vec<Id>,
    },
    Label {
        result_id: Id,
    },
    Load {
        result_type_id: Id,
        result_id: Id,
        pointer: Id,
        memory_operands: Vec<Operand>,
    },
    Store {
        pointer: Id,
        object: Id,
        memory_operands: Vec<Operand>,
    },
    CopyMemory {
        target: Id,
        source: Id,
        memory_operands: Vec<Operand>,
    },
    AccessChain {
        result_type_id: Id,
        result_id: Id,
        base: Id,
        indexes: Vec<Id>,
    },
    InBoundsAccessChain {
        result_type_id: Id,
        result_id: Id,
        base: Id,
        indexes: Vec<Id>,
    },
    CopyObject {
        result_type_id: Id,
        result_id: Id,
        operand: Id,
    },
    CompositeConstruct {
        result_type_id: Id,
        result_id: Id,
        constituents: Vec<Id>,
    },
    CompositeExtract {
        result_type_id: Id,
        result_id: Id,
        composite: Id,
        indexes: Vec<u32>,
    },
    Branch {
        target_label: Id,
    },
    Return,
    ReturnValue {
        value: Id,
    },
    Kill,
    Unreachable,
    Unknown {
        name: String,
        result_id: Option<Id>,
        operands: Vec<Operand>,
    },
}

impl Instruction {
    /// Returns the opcode name, such as `OpVariable`.
    pub fn name(&self) -> &str {
        match self {
            Self::Nop => "OpNop",
            Self::Capability { .. } => "OpCapability",
            Self::Extension { .. } => "OpExtension",
            Self::ExtInstImport { .. } => "OpExtInstImport",
            Self::MemoryModel { .. } => "OpMemoryModel",
            Self::EntryPoint { .. } => "OpEntryPoint",
            Self::ExecutionMode { .. } => "OpExecutionMode",
            Self::ExecutionModeId { .. } => "OpExecutionModeId",
            Self::Name { .. } => "OpName",
            Self::MemberName { .. } => "OpMemberName",
            Self::Decorate { .. } => "OpDecorate",
            Self::MemberDecorate { .. } => "OpMemberDecorate",
            Self::DecorationGroup { .. } => "OpDecorationGroup",
            Self::GroupDecorate { .. } => "OpGroupDecorate",
            Self::GroupMemberDecorate { .. } => "OpGroupMemberDecorate",
            Self::TypeVoid { .. } => "OpTypeVoid",
            Self::TypeBool { .. } => "OpTypeBool",
            Self::TypeInt { .. } => "OpTypeInt",
            Self::TypeFloat { .. } => "OpTypeFloat",
            Self::TypeVector { .. } => "OpTypeVector",
            Self::TypeMatrix { .. } => "OpTypeMatrix",
            Self::TypeArray { .. } => "OpTypeArray",
            Self::TypeRuntimeArray { .. } => "OpTypeRuntimeArray",
            Self::TypeStruct { .. } => "OpTypeStruct",
            Self::TypePointer { .. } => "OpTypePointer",
            Self::TypeFunction { .. } => "OpTypeFunction",
            Self::ConstantTrue { .. } => "OpConstantTrue",
            Self::ConstantFalse { .. } => "OpConstantFalse",
            Self::Constant { .. } => "OpConstant",
            Self::ConstantComposite { .. } => "OpConstantComposite",
            Self::ConstantNull { .. } => "OpConstantNull",
            Self::SpecConstantTrue { .. } => "OpSpecConstantTrue",
            Self::SpecConstantFalse { .. } => "OpSpecConstantFalse",
            Self::SpecConstant { .. } => "OpSpecConstant",
            Self::SpecConstantComposite { .. } => "OpSpecConstantComposite",
            Self::SpecConstantOp { .. } => "OpSpecConstantOp",
            Self::Variable { .. } => "OpVariable",
            Self::Function { .. } => "OpFunction",
            Self::FunctionParameter { .. } => "OpFunctionParameter",
            Self::FunctionEnd => "OpFunctionEnd",
            Self::FunctionCall { .. } => "OpFunctionCall",
            Self::Label { .. } => "OpLabel",
            Self::Load { .. } => "OpLoad",
            Self::Store { .. } => "OpStore",
            Self::CopyMemory { .. } => "OpCopyMemory",
            Self::AccessChain { .. } => "OpAccessChain",
            Self::InBoundsAccessChain { .. } => "OpInBoundsAccessChain",
            Self::CopyObject { .. } => "OpCopyObject",
            Self::CompositeConstruct { .. } => "OpCompositeConstruct",
            Self::CompositeExtract { .. } => "OpCompositeExtract",
            Self::Branch { .. } => "OpBranch",
            Self::Return => "OpReturn",
            Self::ReturnValue { .. } => "OpReturnValue",
            Self::Kill => "OpKill",
            Self::Unreachable => "OpUnreachable",
            Self::Unknown { name, .. } => name,
        }
    }

    /// Returns the ID defined by the instruction, if any.
    pub fn result_id(&self) -> Option<Id> {
        match *self {
            Self::ExtInstImport { result_id, .. }
            | Self::DecorationGroup { result_id }
            | Self::TypeVoid { result_id }
            | Self::TypeBool { result_id }
            | Self::TypeInt { result_id, .. }
            | Self::TypeFloat { result_id, .. }
            | Self::TypeVector { result_id, .. }
            | Self::TypeMatrix { result_id, .. }
            | Self::TypeArray { result_id, .. }
            | Self::TypeRuntimeArray { result_id, .. }
            | Self::TypeStruct { result_id, .. }
            | Self::TypePointer { result_id, .. }
            | Self::TypeFunction { result_id, .. }
            | Self::ConstantTrue { result_id, .. }
            | Self::ConstantFalse { result_id, .. }
            | Self::Constant { result_id, .. }
            | Self::ConstantComposite { result_id, .. }
            | Self::ConstantNull { result_id, .. }
            | Self::SpecConstantTrue { result_id, .. }
            | Self::SpecConstantFalse { result_id, .. }
            | Self::SpecConstant { result_id, .. }
            | Self::SpecConstantComposite { result_id, .. }
            | Self::SpecConstantOp { result_id, .. }
            | Self::Variable { result_id, .. }
            | Self::Function { result_id, .. }
            | Self::FunctionParameter { result_id, .. }
            | Self::FunctionCall { result_id, .. }
            | Self::Label { result_id }
            | Self::Load { result_id, .. }
            | Self::AccessChain { result_id, .. }
            | Self::InBoundsAccessChain { result_id, .. }
            | Self::CopyObject { result_id, .. }
            | Self::CompositeConstruct { result_id, .. }
            | Self::CompositeExtract { result_id, .. } => Some(result_id),
            Self::Unknown { result_id, .. } => result_id,
            _ => None,
        }
    }

    /// Returns the type of the value defined by the instruction, if it has one.
    pub fn result_type_id(&self) -> Option<Id> {
        match *self {
            Self::ConstantTrue { result_type_id, .. }
            | Self::ConstantFalse { result_type_id, .. }
            | Self::Constant { result_type_id, .. }
            | Self::ConstantComposite { result_type_id, .. }
            | Self::ConstantNull { result_type_id, .. }
            | Self::SpecConstantTrue { result_type_id, .. }
            | Self::SpecConstantFalse { result_type_id, .. }
            | Self::SpecConstant { result_type_id, .. }
            | Self::SpecConstantComposite { result_type_id, .. }
            | Self::SpecConstantOp { result_type_id, .. }
            | Self::Variable { result_type_id, .. }
            | Self::Function { result_type_id, .. }
            | Self::FunctionParameter { result_type_id, .. }
            | Self::FunctionCall { result_type_id, .. }
            | Self::Load { result_type_id, .. }
            | Self::AccessChain { result_type_id, .. }
            | Self::InBoundsAccessChain { result_type_id, .. }
            | Self::CopyObject { result_type_id, .. }
            | Self::CompositeConstruct { result_type_id, .. }
            | Self::CompositeExtract { result_type_id, .. } => Some(result_type_id),
            _ => None,
        }
    }

    /// Returns every ID that the instruction refers to, excluding its own result ID.
    ///
    /// The result type comes first, followed by the operands in the order they are written.
    pub fn referenced_ids(&self) -> SmallVec<[Id; 4]> {
        let mut ids = SmallVec::new();
        ids.extend(self.result_type_id());

        match self {
            Self::EntryPoint {
                entry_point,
                interface,
                ..
            } => {
                ids.push(*entry_point);
                ids.extend(interface.iter().copied());
            }
            Self::ExecutionMode { entry_point, .. } => ids.push(*entry_point),
            Self::ExecutionModeId {
                entry_point,
                operands,
                ..
            } => {
                ids.push(*entry_point);
                ids.extend(operands.iter().copied());
            }
            Self::Name { target, .. } | Self::Decorate { target, .. } => ids.push(*target),
            Self::MemberName { ty, .. } => ids.push(*ty),
            Self::MemberDecorate { structure_type, .. } => ids.push(*structure_type),
            Self::GroupDecorate {
                decoration_group,
                targets,
            } => {
                ids.push(*decoration_group);
                ids.extend(targets.iter().copied());
            }
            Self::GroupMemberDecorate {
                decoration_group,
                targets,
            } => {
                ids.push(*decoration_group);
                ids.extend(targets.iter().map(|&(target, _)| target));
            }
            Self::TypeVector { component_type, .. } => ids.push(*component_type),
            Self::TypeMatrix { column_type, .. } => ids.push(*column_type),
            Self::TypeArray {
                element_type,
                length,
                ..
            } => {
                ids.push(*element_type);
                ids.push(*length);
            }
            Self::TypeRuntimeArray { element_type, .. } => ids.push(*element_type),
            Self::TypeStruct { member_types, .. } => ids.extend(member_types.iter().copied()),
            Self::TypePointer { ty, .. } => ids.push(*ty),
            Self::TypeFunction {
                return_type,
                parameter_types,
                ..
            } => {
                ids.push(*return_type);
                ids.extend(parameter_types.iter().copied());
            }
            Self::ConstantComposite { constituents, .. }
            | Self::SpecConstantComposite { constituents, .. }
            | Self::CompositeConstruct { constituents, .. } => {
                ids.extend(constituents.iter().copied())
            }
            Self::SpecConstantOp { operands, .. } | Self::Unknown { operands, .. } => {
                ids.extend(operands.iter().filter_map(|operand| match *operand {
                    Operand::Id(id) => Some(id),
                    _ => None,
                }))
            }
            Self::Variable { initializer, .. } => ids.extend(*initializer),
            Self::Function { function_type, .. } => ids.push(*function_type),
            Self::FunctionCall {
                function,
                arguments,
                ..
            } => {
                ids.push(*function);
                ids.extend(arguments.iter().copied());
            }
            Self::Load { pointer, .. } => ids.push(*pointer),
            Self::Store { pointer, object, .. } => {
                ids.push(*pointer);
                ids.push(*object);
            }
            Self::CopyMemory { target, source, .. } => {
                ids.push(*target);
                ids.push(*source);
            }
            Self::AccessChain { base, indexes, .. }
            | Self::InBoundsAccessChain { base, indexes, .. } => {
                ids.push(*base);
                ids.extend(indexes.iter().copied());
            }
            Self::CopyObject { operand, .. } => ids.push(*operand),
            Self::CompositeExtract { composite, .. } => ids.push(*composite),
            Self::Branch { target_label } => ids.push(*target_label),
            Self::ReturnValue { value } => ids.push(*value),
            _ => (),
        }

        ids
    }

    /// Returns whether the instruction defines a constant or a specialization constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            Self::ConstantTrue { .. }
                | Self::ConstantFalse { .. }
                | Self::Constant { .. }
                | Self::ConstantComposite { .. }
                | Self::ConstantNull { .. }
                | Self::SpecConstantTrue { .. }
                | Self::SpecConstantFalse { .. }
                | Self::SpecConstant { .. }
                | Self::SpecConstantComposite { .. }
                | Self::SpecConstantOp { .. }
        ) || matches!(
            self,
            Self::Unknown { name, .. }
                if name.starts_with("OpConstant") || name.starts_with("OpSpecConstant")
        )
    }

    /// Returns whether the instruction declares a type.
    #[inline]
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::TypeVoid { .. }
                | Self::TypeBool { .. }
                | Self::TypeInt { .. }
                | Self::TypeFloat { .. }
                | Self::TypeVector { .. }
                | Self::TypeMatrix { .. }
                | Self::TypeArray { .. }
                | Self::TypeRuntimeArray { .. }
                | Self::TypeStruct { .. }
                | Self::TypePointer { .. }
                | Self::TypeFunction { .. }
        ) || matches!(self, Self::Unknown { name, .. } if name.starts_with("OpType"))
    }

    /// Returns whether the instruction can only appear inside a function body.
    pub(crate) fn is_function_body_only(&self) -> bool {
        matches!(
            self,
            Self::FunctionParameter { .. }
                | Self::FunctionCall { .. }
                | Self::Label { .. }
                | Self::Load { .. }
                | Self::Store { .. }
                | Self::CopyMemory { .. }
                | Self::AccessChain { .. }
                | Self::InBoundsAccessChain { .. }
                | Self::CopyObject { .. }
                | Self::CompositeConstruct { .. }
                | Self::CompositeExtract { .. }
                | Self::Branch { .. }
                | Self::Return
                | Self::ReturnValue { .. }
                | Self::Kill
                | Self::Unreachable
        )
    }
}

// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! An in-memory representation of a SPIR-V module.
//!
//! [`Spirv::new`] takes the instructions of a module and sorts them into the sections of the
//! logical layout, indexing every result ID along the way. Decoration groups are resolved at this
//! point, so that consumers only ever see plain `OpDecorate` and `OpMemberDecorate` instructions.
//!
//! Instructions can be produced from SPIR-V assembly text with the [`assemble`] module.

pub use self::{
    enums::{
        AddressingModel, BuiltIn, Capability, Decoration, ExecutionMode, ExecutionModel,
        MemoryModel, StorageClass,
    },
    instruction::{Id, Instruction, Operand},
};
use crate::Version;
use foldhash::{HashMap, HashSet};
use indexmap::IndexMap;
use std::{
    error::Error,
    fmt::{Display, Error as FmtError, Formatter},
};

pub mod assemble;
mod enums;
mod instruction;

/// A parsed and indexed SPIR-V module.
#[derive(Clone, Debug)]
pub struct Spirv {
    version: Version,
    ids: HashMap<Id, IdInfo>,

    // Items in the order of SPIR-V section "2.4 Logical Layout of a Module"
    capabilities: Vec<Instruction>,
    extensions: Vec<Instruction>,
    ext_inst_imports: Vec<Instruction>,
    memory_model: Option<Instruction>,
    entry_points: Vec<Instruction>,
    execution_modes: Vec<Instruction>,
    names: Vec<Instruction>,
    decorations: Vec<Instruction>,
    types_global_values: Vec<Instruction>,
    functions: IndexMap<Id, FunctionInfo>,
}

impl Spirv {
    /// Builds a module out of its instructions.
    ///
    /// The instructions must be in the order of the logical layout, except that the order of the
    /// sections that precede the function definitions is not checked.
    pub fn new(version: Version, instructions: Vec<Instruction>) -> Result<Spirv, SpirvError> {
        let mut ids: HashMap<Id, IdInfo> = HashMap::default();
        let mut capabilities = Vec::new();
        let mut extensions = Vec::new();
        let mut ext_inst_imports = Vec::new();
        let mut memory_model = None;
        let mut entry_points = Vec::new();
        let mut execution_modes = Vec::new();
        let mut names = Vec::new();
        let mut raw_decorations = Vec::new();
        let mut types_global_values = Vec::new();
        let mut functions: IndexMap<Id, FunctionInfo> = IndexMap::new();

        let mut current_function: Option<FunctionInfo> = None;
        let mut next_position = 0;

        for instruction in instructions {
            if let Some(result_id) = instruction.result_id() {
                if ids.contains_key(&result_id) {
                    return Err(SpirvError::DuplicateId { id: result_id });
                }

                ids.insert(
                    result_id,
                    IdInfo {
                        instruction: instruction.clone(),
                        position: next_position,
                        function: current_function
                            .as_ref()
                            .map(|function| function.id)
                            .or_else(|| {
                                matches!(instruction, Instruction::Function { .. })
                                    .then_some(result_id)
                            }),
                        names: Vec::new(),
                        decorations: Vec::new(),
                        members: match &instruction {
                            Instruction::TypeStruct { member_types, .. } => {
                                vec![StructMemberInfo::default(); member_types.len()]
                            }
                            _ => Vec::new(),
                        },
                    },
                );
                next_position += 1;
            }

            if let Some(function) = current_function.as_mut() {
                match instruction {
                    Instruction::Function { result_id, .. } => {
                        return Err(SpirvError::NestedFunction {
                            outer: function.id,
                            inner: result_id,
                        });
                    }
                    Instruction::FunctionEnd => {
                        function.instructions.push(instruction);
                        if let Some(function) = current_function.take() {
                            functions.insert(function.id, function);
                        }
                    }
                    _ => function.instructions.push(instruction),
                }

                continue;
            }

            match instruction {
                Instruction::Function { result_id, .. } => {
                    current_function = Some(FunctionInfo {
                        id: result_id,
                        instructions: vec![instruction],
                    });
                }
                Instruction::FunctionEnd => {
                    return Err(SpirvError::InstructionOutsideFunction {
                        name: instruction.name().to_owned(),
                    });
                }
                Instruction::Capability { .. } => capabilities.push(instruction),
                Instruction::Extension { .. } => extensions.push(instruction),
                Instruction::ExtInstImport { .. } => ext_inst_imports.push(instruction),
                Instruction::MemoryModel { .. } => memory_model = Some(instruction),
                Instruction::EntryPoint { .. } => entry_points.push(instruction),
                Instruction::ExecutionMode { .. } | Instruction::ExecutionModeId { .. } => {
                    execution_modes.push(instruction)
                }
                Instruction::Name { .. } | Instruction::MemberName { .. } => {
                    names.push(instruction)
                }
                Instruction::Decorate { .. }
                | Instruction::MemberDecorate { .. }
                | Instruction::DecorationGroup { .. }
                | Instruction::GroupDecorate { .. }
                | Instruction::GroupMemberDecorate { .. } => raw_decorations.push(instruction),
                _ if instruction.is_function_body_only() => {
                    return Err(SpirvError::InstructionOutsideFunction {
                        name: instruction.name().to_owned(),
                    });
                }
                _ => types_global_values.push(instruction),
            }
        }

        if let Some(function) = current_function {
            return Err(SpirvError::UnterminatedFunction {
                function: function.id,
            });
        }

        let all_instructions = capabilities
            .iter()
            .chain(&extensions)
            .chain(&ext_inst_imports)
            .chain(&memory_model)
            .chain(&entry_points)
            .chain(&execution_modes)
            .chain(&names)
            .chain(&raw_decorations)
            .chain(&types_global_values)
            .chain(functions.values().flat_map(|function| &function.instructions));

        for instruction in all_instructions {
            if let Some(&id) = instruction
                .referenced_ids()
                .iter()
                .find(|&&id| !ids.contains_key(&id))
            {
                return Err(SpirvError::UndefinedId {
                    id,
                    instruction: instruction.name().to_owned(),
                });
            }
        }

        for instruction in &entry_points {
            if let Instruction::EntryPoint { entry_point, .. } = *instruction {
                if !functions.contains_key(&entry_point) {
                    return Err(SpirvError::EntryPointNotAFunction { id: entry_point });
                }
            }
        }

        let decorations = resolve_decoration_groups(raw_decorations)?;

        for instruction in &names {
            match *instruction {
                Instruction::Name { target, .. } => {
                    if let Some(info) = ids.get_mut(&target) {
                        info.names.push(instruction.clone());
                    }
                }
                Instruction::MemberName { ty, member, .. } => {
                    if let Some(member_info) = ids
                        .get_mut(&ty)
                        .and_then(|info| info.members.get_mut(member as usize))
                    {
                        member_info.names.push(instruction.clone());
                    }
                }
                _ => (),
            }
        }

        for instruction in &decorations {
            match *instruction {
                Instruction::Decorate { target, .. } => {
                    if let Some(info) = ids.get_mut(&target) {
                        info.decorations.push(instruction.clone());
                    }
                }
                Instruction::MemberDecorate {
                    structure_type,
                    member,
                    ..
                } => {
                    let info = ids
                        .get_mut(&structure_type)
                        .ok_or(SpirvError::UndefinedId {
                            id: structure_type,
                            instruction: instruction.name().to_owned(),
                        })?;

                    if !matches!(info.instruction, Instruction::TypeStruct { .. }) {
                        return Err(SpirvError::NotAStruct { id: structure_type });
                    }

                    let member_info = info.members.get_mut(member as usize).ok_or(
                        SpirvError::MemberOutOfRange {
                            structure_type,
                            member,
                        },
                    )?;
                    member_info.decorations.push(instruction.clone());
                }
                _ => (),
            }
        }

        Ok(Spirv {
            version,
            ids,
            capabilities,
            extensions,
            ext_inst_imports,
            memory_model,
            entry_points,
            execution_modes,
            names,
            decorations,
            types_global_values,
            functions,
        })
    }

    /// Returns the SPIR-V version that the module is written for.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns information about an ID, or `None` if the module doesn't define it.
    #[inline]
    pub fn id(&self, id: Id) -> Option<&IdInfo> {
        self.ids.get(&id)
    }

    /// Returns the `OpCapability` instructions.
    #[inline]
    pub fn capabilities(&self) -> &[Instruction] {
        &self.capabilities
    }

    /// Returns the `OpExtension` instructions.
    #[inline]
    pub fn extensions(&self) -> &[Instruction] {
        &self.extensions
    }

    /// Returns the `OpExtInstImport` instructions.
    #[inline]
    pub fn ext_inst_imports(&self) -> &[Instruction] {
        &self.ext_inst_imports
    }

    /// Returns the `OpMemoryModel` instruction.
    #[inline]
    pub fn memory_model(&self) -> Option<&Instruction> {
        self.memory_model.as_ref()
    }

    /// Returns the `OpEntryPoint` instructions, in declaration order.
    #[inline]
    pub fn entry_points(&self) -> &[Instruction] {
        &self.entry_points
    }

    /// Returns the `OpExecutionMode` and `OpExecutionModeId` instructions.
    #[inline]
    pub fn execution_modes(&self) -> &[Instruction] {
        &self.execution_modes
    }

    /// Returns the `OpName` and `OpMemberName` instructions.
    #[inline]
    pub fn names(&self) -> &[Instruction] {
        &self.names
    }

    /// Returns the `OpDecorate` and `OpMemberDecorate` instructions, with decoration groups
    /// already applied to their targets.
    #[inline]
    pub fn decorations(&self) -> &[Instruction] {
        &self.decorations
    }

    /// Returns the type declarations, constants and global variables, in declaration order.
    #[inline]
    pub fn types_global_values(&self) -> &[Instruction] {
        &self.types_global_values
    }

    /// Returns the global variables.
    pub fn global_variables(&self) -> impl Iterator<Item = &Instruction> {
        self.types_global_values
            .iter()
            .filter(|instruction| matches!(instruction, Instruction::Variable { .. }))
    }

    /// Returns the function definitions, in declaration order.
    #[inline]
    pub fn functions(&self) -> &IndexMap<Id, FunctionInfo> {
        &self.functions
    }

    /// Returns information about a function.
    #[inline]
    pub fn function(&self, function: Id) -> Option<&FunctionInfo> {
        self.functions.get(&function)
    }

    /// Returns an iterator over all instructions of the module, in logical layout order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.capabilities
            .iter()
            .chain(&self.extensions)
            .chain(&self.ext_inst_imports)
            .chain(&self.memory_model)
            .chain(&self.entry_points)
            .chain(&self.execution_modes)
            .chain(&self.names)
            .chain(&self.decorations)
            .chain(&self.types_global_values)
            .chain(
                self.functions
                    .values()
                    .flat_map(|function| &function.instructions),
            )
    }
}

fn resolve_decoration_groups(
    raw_decorations: Vec<Instruction>,
) -> Result<Vec<Instruction>, SpirvError> {
    let groups: HashSet<Id> = raw_decorations
        .iter()
        .filter_map(|instruction| match *instruction {
            Instruction::DecorationGroup { result_id } => Some(result_id),
            _ => None,
        })
        .collect();
    let mut group_decorations: HashMap<Id, Vec<Decoration>> = HashMap::default();

    for instruction in &raw_decorations {
        if let Instruction::Decorate { target, decoration } = instruction {
            if groups.contains(target) {
                group_decorations
                    .entry(*target)
                    .or_default()
                    .push(decoration.clone());
            }
        }
    }

    let mut decorations = Vec::with_capacity(raw_decorations.len());

    for instruction in raw_decorations {
        match instruction {
            Instruction::Decorate { target, .. } if groups.contains(&target) => (),
            Instruction::Decorate { .. } | Instruction::MemberDecorate { .. } => {
                decorations.push(instruction)
            }
            Instruction::GroupDecorate {
                decoration_group,
                targets,
            } => {
                if !groups.contains(&decoration_group) {
                    return Err(SpirvError::NotADecorationGroup {
                        id: decoration_group,
                    });
                }

                let group = group_decorations
                    .get(&decoration_group)
                    .map_or(&[][..], Vec::as_slice);

                for target in targets {
                    decorations.extend(group.iter().map(|decoration| Instruction::Decorate {
                        target,
                        decoration: decoration.clone(),
                    }));
                }
            }
            Instruction::GroupMemberDecorate {
                decoration_group,
                targets,
            } => {
                if !groups.contains(&decoration_group) {
                    return Err(SpirvError::NotADecorationGroup {
                        id: decoration_group,
                    });
                }

                let group = group_decorations
                    .get(&decoration_group)
                    .map_or(&[][..], Vec::as_slice);

                for (structure_type, member) in targets {
                    decorations.extend(group.iter().map(|decoration| {
                        Instruction::MemberDecorate {
                            structure_type,
                            member,
                            decoration: decoration.clone(),
                        }
                    }));
                }
            }
            _ => (),
        }
    }

    Ok(decorations)
}

/// Information associated with an `Id`.
#[derive(Clone, Debug)]
pub struct IdInfo {
    instruction: Instruction,
    position: usize,
    function: Option<Id>,
    names: Vec<Instruction>,
    decorations: Vec<Instruction>,
    members: Vec<StructMemberInfo>,
}

impl IdInfo {
    /// Returns the instruction that defines this `Id`.
    #[inline]
    pub fn instruction(&self) -> &Instruction {
        &self.instruction
    }

    /// Returns the index of the defining instruction among all instructions that define an ID.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the function that the `Id` is defined in, or `None` if it is defined at module
    /// scope. For an `OpFunction`, this is the function itself.
    #[inline]
    pub fn function(&self) -> Option<Id> {
        self.function
    }

    /// Returns the `OpName` instructions that target this `Id`.
    #[inline]
    pub fn names(&self) -> &[Instruction] {
        &self.names
    }

    /// Returns the `OpDecorate` instructions that target this `Id`.
    #[inline]
    pub fn decorations(&self) -> &[Instruction] {
        &self.decorations
    }

    /// If this `Id` refers to a struct type, returns information about each member of the struct.
    /// Empty otherwise.
    #[inline]
    pub fn members(&self) -> &[StructMemberInfo] {
        &self.members
    }
}

/// Information associated with a member of a struct type.
#[derive(Clone, Debug, Default)]
pub struct StructMemberInfo {
    names: Vec<Instruction>,
    decorations: Vec<Instruction>,
}

impl StructMemberInfo {
    /// Returns the `OpMemberName` instructions that target this struct member.
    #[inline]
    pub fn names(&self) -> &[Instruction] {
        &self.names
    }

    /// Returns the `OpMemberDecorate` instructions that target this struct member.
    #[inline]
    pub fn decorations(&self) -> &[Instruction] {
        &self.decorations
    }
}

/// Information associated with a function definition.
#[derive(Clone, Debug)]
pub struct FunctionInfo {
    id: Id,
    instructions: Vec<Instruction>,
}

impl FunctionInfo {
    /// Returns the result ID of the `OpFunction` instruction.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the instructions of the function, from `OpFunction` to `OpFunctionEnd` inclusive.
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// Error that can happen when building a [`Spirv`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpirvError {
    DuplicateId { id: Id },
    UndefinedId { id: Id, instruction: String },
    EntryPointNotAFunction { id: Id },
    NestedFunction { outer: Id, inner: Id },
    UnterminatedFunction { function: Id },
    InstructionOutsideFunction { name: String },
    NotADecorationGroup { id: Id },
    NotAStruct { id: Id },
    MemberOutOfRange { structure_type: Id, member: u32 },
}

impl Error for SpirvError {}

impl Display for SpirvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::DuplicateId { id } => write!(f, "ID {} is defined more than once", id),
            Self::UndefinedId { id, instruction } => {
                write!(f, "ID {} is used by {} but never defined", id, instruction)
            }
            Self::EntryPointNotAFunction { id } => {
                write!(f, "entry point {} is not a function definition", id)
            }
            Self::NestedFunction { outer, inner } => write!(
                f,
                "function {} is defined inside of function {}",
                inner, outer,
            ),
            Self::UnterminatedFunction { function } => {
                write!(f, "function {} has no OpFunctionEnd", function)
            }
            Self::InstructionOutsideFunction { name } => {
                write!(f, "{} can only appear inside of a function", name)
            }
            Self::NotADecorationGroup { id } => {
                write!(f, "ID {} is used as a decoration group but isn't one", id)
            }
            Self::NotAStruct { id } => write!(
                f,
                "ID {} is the target of a member decoration but is not a struct type",
                id,
            ),
            Self::MemberOutOfRange {
                structure_type,
                member,
            } => write!(
                f,
                "struct type {} has no member with index {}",
                structure_type, member,
            ),
        }
    }
}

// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Which entry points can reach which IDs.
//!
//! The index is built once per module. It records, for every function, the entry points whose
//! static call tree contains it, and for every ID, the instructions inside function bodies that
//! use it. A decorated target is then reached by an entry point if the entry point reaches a
//! function that uses a *carrier* of the target: the target itself, or for a struct member, any
//! variable whose type contains the struct.

use crate::spirv::{ExecutionMode, ExecutionModel, Id, Instruction, Spirv, StorageClass};
use foldhash::{HashMap, HashSet};
use smallvec::SmallVec;

/// An `OpEntryPoint` together with its execution modes.
#[derive(Clone, Debug)]
pub struct EntryPoint<'a> {
    pub instruction: &'a Instruction,
    pub function: Id,
    pub name: &'a str,
    pub execution_model: ExecutionModel,
    pub interface: &'a [Id],
    pub execution_modes: SmallVec<[ExecutionMode; 4]>,
}

impl EntryPoint<'_> {
    #[inline]
    pub fn has_execution_mode(&self, mode: ExecutionMode) -> bool {
        self.execution_modes.contains(&mode)
    }
}

/// One way in which a decorated target is used by an entry point.
#[derive(Clone, Copy, Debug)]
pub struct ReachingContext<'a> {
    pub entry_point: &'a EntryPoint<'a>,
    /// The function containing `referenced_from`.
    pub function: Id,
    /// The instruction that uses the carrier. For an interface variable that no reachable
    /// instruction uses, this is the `OpEntryPoint` that lists it.
    pub referenced_from: &'a Instruction,
    /// The variable or constant through which the target is used.
    pub carrier: Id,
    /// The storage class of the carrier, if it is a variable.
    pub storage_class: Option<StorageClass>,
}

#[derive(Clone, Copy, Debug)]
struct Site<'a> {
    function: Id,
    instruction: &'a Instruction,
}

/// Index of the call graph and of ID uses in a module.
#[derive(Clone, Debug)]
pub struct ReachabilityIndex<'a> {
    spirv: &'a Spirv,
    entry_points: Vec<EntryPoint<'a>>,
    // Indices into `entry_points`, in ascending order.
    function_entry_points: HashMap<Id, SmallVec<[usize; 2]>>,
    sites: HashMap<Id, SmallVec<[Site<'a>; 2]>>,
    // For each type, the types that directly contain it.
    containers: HashMap<Id, SmallVec<[Id; 2]>>,
    // For each pointer type, the variables of that type.
    variables: HashMap<Id, SmallVec<[Id; 2]>>,
}

impl<'a> ReachabilityIndex<'a> {
    pub fn new(spirv: &'a Spirv) -> Self {
        let mut execution_modes: HashMap<Id, SmallVec<[ExecutionMode; 4]>> = HashMap::default();

        for instruction in spirv.execution_modes() {
            match *instruction {
                Instruction::ExecutionMode {
                    entry_point, mode, ..
                }
                | Instruction::ExecutionModeId {
                    entry_point, mode, ..
                } => execution_modes.entry(entry_point).or_default().push(mode),
                _ => (),
            }
        }

        let entry_points: Vec<_> = spirv
            .entry_points()
            .iter()
            .filter_map(|instruction| match *instruction {
                Instruction::EntryPoint {
                    execution_model,
                    entry_point,
                    ref name,
                    ref interface,
                } => Some(EntryPoint {
                    instruction,
                    function: entry_point,
                    name,
                    execution_model,
                    interface,
                    execution_modes: execution_modes
                        .get(&entry_point)
                        .cloned()
                        .unwrap_or_default(),
                }),
                _ => None,
            })
            .collect();

        let mut callees: HashMap<Id, SmallVec<[Id; 4]>> = HashMap::default();
        let mut sites: HashMap<Id, SmallVec<[Site<'a>; 2]>> = HashMap::default();

        for (&function, function_info) in spirv.functions() {
            for instruction in function_info.instructions() {
                if let Instruction::FunctionCall { function: callee, .. } = *instruction {
                    callees.entry(function).or_default().push(callee);
                }

                let site = Site {
                    function,
                    instruction,
                };

                // A function-local variable is used where it is defined.
                if let Instruction::Variable { result_id, .. } = *instruction {
                    sites.entry(result_id).or_default().push(site);
                }

                let referenced_ids = instruction.referenced_ids();

                for (index, &id) in referenced_ids.iter().enumerate() {
                    // The same ID used twice by one instruction is one use.
                    if !referenced_ids[..index].contains(&id) {
                        sites.entry(id).or_default().push(site);
                    }
                }
            }
        }

        let mut function_entry_points: HashMap<Id, SmallVec<[usize; 2]>> = HashMap::default();

        for (index, entry_point) in entry_points.iter().enumerate() {
            let mut visited: HashSet<Id> = HashSet::default();
            let mut stack = vec![entry_point.function];

            while let Some(function) = stack.pop() {
                if !visited.insert(function) {
                    continue;
                }

                function_entry_points
                    .entry(function)
                    .or_default()
                    .push(index);

                if let Some(callees) = callees.get(&function) {
                    stack.extend(callees.iter().copied());
                }
            }
        }

        let mut containers: HashMap<Id, SmallVec<[Id; 2]>> = HashMap::default();
        let mut variables: HashMap<Id, SmallVec<[Id; 2]>> = HashMap::default();

        for instruction in spirv.instructions() {
            match *instruction {
                Instruction::TypeArray {
                    result_id,
                    element_type,
                    ..
                }
                | Instruction::TypeRuntimeArray {
                    result_id,
                    element_type,
                } => containers.entry(element_type).or_default().push(result_id),
                Instruction::TypePointer { result_id, ty, .. } => {
                    containers.entry(ty).or_default().push(result_id)
                }
                Instruction::TypeStruct {
                    result_id,
                    ref member_types,
                } => {
                    for &member_type in member_types {
                        let entry = containers.entry(member_type).or_default();

                        if !entry.contains(&result_id) {
                            entry.push(result_id);
                        }
                    }
                }
                Instruction::Variable {
                    result_type_id,
                    result_id,
                    ..
                } => variables.entry(result_type_id).or_default().push(result_id),
                _ => (),
            }
        }

        ReachabilityIndex {
            spirv,
            entry_points,
            function_entry_points,
            sites,
            containers,
            variables,
        }
    }

    /// Returns the entry points of the module, in declaration order.
    #[inline]
    pub fn entry_points(&self) -> &[EntryPoint<'a>] {
        &self.entry_points
    }

    /// Returns the entry points whose static call tree contains `function`.
    pub fn entry_points_reaching(&self, function: Id) -> impl Iterator<Item = &EntryPoint<'a>> {
        self.function_entry_points
            .get(&function)
            .into_iter()
            .flatten()
            .map(|&index| &self.entry_points[index])
    }

    /// Returns the variables and constants through which a target is used.
    ///
    /// For an ID, this is the ID itself. For a struct member, these are the variables whose type
    /// contains the struct, directly or through arrays, other structs and pointers.
    pub fn carriers(&self, target: Id, member: Option<u32>) -> Vec<Id> {
        if member.is_none() {
            return vec![target];
        }

        let mut types = vec![target];
        let mut seen: HashSet<Id> = HashSet::default();
        seen.insert(target);
        let mut index = 0;

        while let Some(&ty) = types.get(index) {
            index += 1;

            for &container in self.containers.get(&ty).into_iter().flatten() {
                if seen.insert(container) {
                    types.push(container);
                }
            }
        }

        let mut carriers: Vec<Id> = types
            .iter()
            .filter_map(|ty| self.variables.get(ty))
            .flatten()
            .copied()
            .collect();
        carriers.sort_by_key(|&carrier| {
            self.spirv
                .id(carrier)
                .map_or(usize::MAX, |info| info.position())
        });

        carriers
    }

    /// Returns every context in which a decorated target is used.
    ///
    /// Contexts are ordered by entry point, then by carrier, then by use. Each function appears at
    /// most once per entry point and carrier, with its first use. Variables in the `Input` or
    /// `Output` storage class only reach the entry points that list them in their interface.
    pub fn reaching_contexts(&self, target: Id, member: Option<u32>) -> Vec<ReachingContext<'_>> {
        let carriers: Vec<_> = self
            .carriers(target, member)
            .into_iter()
            .map(|carrier| (carrier, self.storage_class(carrier)))
            .collect();
        let mut contexts = Vec::new();

        for (index, entry_point) in self.entry_points.iter().enumerate() {
            for &(carrier, storage_class) in &carriers {
                let is_interface = matches!(
                    storage_class,
                    Some(StorageClass::Input | StorageClass::Output)
                );

                if is_interface && !entry_point.interface.contains(&carrier) {
                    continue;
                }

                let first_context = contexts.len();

                for site in self.sites.get(&carrier).into_iter().flatten() {
                    let reached = self
                        .function_entry_points
                        .get(&site.function)
                        .is_some_and(|indices| indices.contains(&index));
                    let duplicate = contexts[first_context..]
                        .iter()
                        .any(|context: &ReachingContext<'_>| context.function == site.function);

                    if reached && !duplicate {
                        contexts.push(ReachingContext {
                            entry_point,
                            function: site.function,
                            referenced_from: site.instruction,
                            carrier,
                            storage_class,
                        });
                    }
                }

                if is_interface && contexts.len() == first_context {
                    contexts.push(ReachingContext {
                        entry_point,
                        function: entry_point.function,
                        referenced_from: entry_point.instruction,
                        carrier,
                        storage_class,
                    });
                }
            }
        }

        contexts
    }

    fn storage_class(&self, carrier: Id) -> Option<StorageClass> {
        match *self.spirv.id(carrier)?.instruction() {
            Instruction::Variable { storage_class, .. } => Some(storage_class),
            _ => None,
        }
    }
}

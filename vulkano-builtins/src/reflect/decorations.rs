// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::spirv::{BuiltIn, Decoration, Id, Instruction, Spirv};
use foldhash::HashMap;

/// The decorations of an ID or of a struct member that built-in validation looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecorationSet {
    /// The first `BuiltIn` decoration applied.
    pub built_in: Option<BuiltIn>,
    pub patch: bool,
    /// `PerPrimitiveEXT`, or its `PerPrimitiveNV` alias.
    pub per_primitive: bool,
    pub block: bool,
    pub flat: bool,
}

impl DecorationSet {
    fn apply(&mut self, decoration: &Decoration) {
        match *decoration {
            Decoration::BuiltIn { built_in } => {
                self.built_in.get_or_insert(built_in);
            }
            Decoration::Patch => self.patch = true,
            Decoration::PerPrimitiveEXT => self.per_primitive = true,
            Decoration::Block => self.block = true,
            Decoration::Flat => self.flat = true,
            _ => (),
        }
    }
}

/// A single `BuiltIn` decoration, as applied by one `OpDecorate` or `OpMemberDecorate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltInDecoration {
    pub target: Id,
    /// The member index, for `OpMemberDecorate`.
    pub member: Option<u32>,
    pub built_in: BuiltIn,
}

/// Index of the decorations of a module.
#[derive(Clone, Debug)]
pub struct DecorationTable {
    sets: HashMap<(Id, Option<u32>), DecorationSet>,
    built_ins: Vec<BuiltInDecoration>,
}

impl DecorationTable {
    pub fn new(spirv: &Spirv) -> Self {
        let mut sets: HashMap<(Id, Option<u32>), DecorationSet> = HashMap::default();
        let mut built_ins = Vec::new();

        for instruction in spirv.decorations() {
            let (target, member, decoration) = match *instruction {
                Instruction::Decorate {
                    target,
                    ref decoration,
                } => (target, None, decoration),
                Instruction::MemberDecorate {
                    structure_type,
                    member,
                    ref decoration,
                } => (structure_type, Some(member), decoration),
                _ => continue,
            };

            sets.entry((target, member)).or_default().apply(decoration);

            if let Decoration::BuiltIn { built_in } = *decoration {
                built_ins.push(BuiltInDecoration {
                    target,
                    member,
                    built_in,
                });
            }
        }

        // Targets in the order they are defined in; the sort is stable so that decorations of the
        // same target stay in instruction order.
        built_ins.sort_by_key(|decoration| {
            spirv
                .id(decoration.target)
                .map_or(usize::MAX, |info| info.position())
        });

        DecorationTable { sets, built_ins }
    }

    /// Returns the decorations of an ID, or of a member of a struct type.
    #[inline]
    pub fn decorations_of(&self, id: Id, member: Option<u32>) -> DecorationSet {
        self.sets.get(&(id, member)).copied().unwrap_or_default()
    }

    /// Returns every `BuiltIn` decoration of the module, ordered by target.
    #[inline]
    pub fn built_ins(&self) -> &[BuiltInDecoration] {
        &self.built_ins
    }
}

#[cfg(test)]
mod tests {
    use super::{DecorationSet, DecorationTable};
    use crate::{
        spirv::{assemble::assemble, BuiltIn},
        Version,
    };

    #[test]
    fn built_ins_follow_definition_order() {
        let spirv = assemble(
            r#"
            OpMemberDecorate %block 1 BuiltIn PointSize
            OpDecorate %frag_coord BuiltIn FragCoord
            OpMemberDecorate %block 0 BuiltIn Position
            OpDecorate %block Block
            %float = OpTypeFloat 32
            %v4float = OpTypeVector %float 4
            %ptr = OpTypePointer Input %v4float
            %frag_coord = OpVariable %ptr Input
            %block = OpTypeStruct %v4float %float
            "#,
            Version::V1_0,
        )
        .unwrap();
        let table = DecorationTable::new(&spirv);

        let order: Vec<_> = table
            .built_ins()
            .iter()
            .map(|decoration| (decoration.member, decoration.built_in))
            .collect();
        assert_eq!(
            order,
            vec![
                (None, BuiltIn::FragCoord),
                (Some(1), BuiltIn::PointSize),
                (Some(0), BuiltIn::Position),
            ],
        );

        let block = table.built_ins()[1].target;
        assert!(table.decorations_of(block, None).block);
        assert_eq!(
            table.decorations_of(block, Some(0)).built_in,
            Some(BuiltIn::Position),
        );
        assert_eq!(table.decorations_of(block, Some(2)), DecorationSet::default());
    }

    #[test]
    fn companion_decorations() {
        let spirv = assemble(
            r#"
            OpDecorate %outer BuiltIn TessLevelOuter
            OpDecorate %outer Patch
            OpDecorate %prim BuiltIn PrimitiveId
            OpDecorate %prim PerPrimitiveNV
            OpDecorate %prim Flat
            %float = OpTypeFloat 32
            %int = OpTypeInt 32 1
            %uint = OpTypeInt 32 0
            %uint_4 = OpConstant %uint 4
            %arr = OpTypeArray %float %uint_4
            %ptr_arr = OpTypePointer Output %arr
            %ptr_int = OpTypePointer Output %int
            %outer = OpVariable %ptr_arr Output
            %prim = OpVariable %ptr_int Output
            "#,
            Version::V1_0,
        )
        .unwrap();
        let table = DecorationTable::new(&spirv);
        let outer = table.built_ins()[0].target;
        let prim = table.built_ins()[1].target;

        assert!(table.decorations_of(outer, None).patch);
        let prim = table.decorations_of(prim, None);
        assert!(prim.per_primitive && prim.flat && !prim.patch);
    }
}

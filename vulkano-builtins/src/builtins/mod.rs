// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Validation of the `BuiltIn` decorations of a module.
//!
//! Every `BuiltIn` decoration is checked against the [rule](rules::BuiltInRule) of its built-in.
//! Most of the rules depend on how the decorated variable is used: a variable that is only
//! declared can't break the execution model rules, but once a function reached from a fragment
//! shader entry point accesses it, it is checked against the rules for fragment shaders. A target
//! is checked once for each [context](ReachingContext) in which it is used, in this order:
//!
//! 1. the execution model of the entry point;
//! 2. the storage class of the variable;
//! 3. the type;
//! 4. the capabilities and extensions declared by the module;
//! 5. companion decorations (`Patch`, `PerPrimitiveEXT`) and use as a struct member;
//! 6. the execution modes of the entry point.
//!
//! A target that no entry point uses is only checked for its type and its use as a struct member.
//! Validation stops at the first violation.

pub use self::diagnostic::{Attribution, ViolationKind};
use self::{
    diagnostic::Violation,
    rules::{BuiltInRule, BuiltInVuids, PerPrimitive, Registration},
    type_rule::{MismatchTier, ShapeMismatch, TypeRule},
};
use crate::{
    environment::{ValidationContext, ValidationOptions},
    reflect::{
        decorations::{BuiltInDecoration, DecorationSet, DecorationTable},
        reachability::{ReachabilityIndex, ReachingContext},
        shape::{pointee, shape_of, TypeShape},
    },
    spirv::{BuiltIn, ExecutionModel, Id, Instruction, Spirv, StorageClass},
    ValidationError,
};
use foldhash::HashMap;
use log::{debug, trace};

mod diagnostic;
pub mod rules;
#[cfg(test)]
mod tests;
pub mod type_rule;

/// Checks every `BuiltIn` decoration of `spirv`.
///
/// This is a shorthand for creating a [`BuiltInValidator`] and calling
/// [`validate`](BuiltInValidator::validate) on it.
pub fn validate_builtins(
    spirv: &Spirv,
    options: &ValidationOptions,
) -> Result<(), Box<ValidationError>> {
    BuiltInValidator::new(spirv, options)?.validate()
}

/// Validates the `BuiltIn` decorations of a module.
///
/// The indices that validation needs are built once, by `new`.
#[derive(Debug)]
pub struct BuiltInValidator<'a> {
    spirv: &'a Spirv,
    context: ValidationContext,
    decorations: DecorationTable,
    reachability: ReachabilityIndex<'a>,
}

impl<'a> BuiltInValidator<'a> {
    /// Indexes `spirv` for validation.
    ///
    /// Returns an error if the module's SPIR-V version is newer than the target environment
    /// accepts.
    pub fn new(spirv: &'a Spirv, options: &ValidationOptions) -> Result<Self, Box<ValidationError>> {
        let environment = options.target_environment;

        if let Some(max_version) = environment.max_spirv_version() {
            if spirv.version() > max_version {
                return Err(diagnostic::unsupported_version(
                    environment,
                    spirv.version(),
                    max_version,
                ));
            }
        }

        if !environment.is_vulkan() {
            debug!(
                "validating BuiltIn decorations for {}, only capabilities are checked",
                environment.api_name(),
            );
        }

        Ok(BuiltInValidator {
            spirv,
            context: ValidationContext::new(spirv, environment),
            decorations: DecorationTable::new(spirv),
            reachability: ReachabilityIndex::new(spirv),
        })
    }

    /// Returns the capabilities, extensions and environment that the module is validated with.
    #[inline]
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Checks every `BuiltIn` decoration, in the order in which their targets are defined.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), Box<ValidationError>> {
        let mut seen: HashMap<(Id, Option<u32>), BuiltIn> = HashMap::default();

        for decoration in self.decorations.built_ins() {
            let target = self.target(decoration);

            if let Some(&first) = seen.get(&(target.id, target.member)) {
                return Err(self.error(Violation::DuplicateBuiltIn { first }, &target, &[], None));
            }

            seen.insert((target.id, target.member), target.built_in);
            self.validate_target(&target)?;
        }

        Ok(())
    }

    fn target(&self, decoration: &BuiltInDecoration) -> BuiltInTarget {
        let instruction = self.spirv.id(decoration.target).map(|info| info.instruction());

        let (kind, declared_type) = match (instruction, decoration.member) {
            (Some(Instruction::TypeStruct { member_types, .. }), Some(member)) => {
                match member_types.get(member as usize) {
                    Some(&member_type) => (Some(TargetKind::StructMember), Some(member_type)),
                    None => (None, None),
                }
            }
            (
                Some(&Instruction::Variable {
                    result_type_id,
                    storage_class,
                    ..
                }),
                None,
            ) => (
                Some(TargetKind::Variable { storage_class }),
                pointee(self.spirv, result_type_id).map(|(_, ty)| ty),
            ),
            (Some(instruction), None) if instruction.is_constant() => {
                (Some(TargetKind::Constant), instruction.result_type_id())
            }
            _ => (None, None),
        };

        BuiltInTarget {
            id: decoration.target,
            member: decoration.member,
            built_in: decoration.built_in,
            kind,
            declared_type,
            shape: declared_type.and_then(|ty| shape_of(self.spirv, ty)),
            decorations: self.decorations.decorations_of(decoration.target, decoration.member),
        }
    }

    fn validate_target(&self, target: &BuiltInTarget) -> Result<(), Box<ValidationError>> {
        trace!(
            "checking BuiltIn {} on {}{}",
            target.built_in,
            target.id,
            target
                .member
                .map_or_else(String::new, |member| format!(" member {}", member)),
        );

        let Some(kind) = target.kind else {
            return Err(self.error(Violation::TargetKind, target, &[], None));
        };

        let Some(Registration { rule, vuids }) = rules::lookup(target.built_in) else {
            debug!("BuiltIn {} has no rule, skipping it", target.built_in);
            return Ok(());
        };

        let is_vulkan = self.context.environment().is_vulkan();

        if is_vulkan && rule.constant_only && kind != TargetKind::Constant {
            return Err(self.error(Violation::NotConstant, target, vuids.constant, None));
        }

        let shape = target.shape.as_ref().map(|shape| strip_arrayed(rule, shape));
        let contexts = self
            .reachability
            .reaching_contexts(target.id, target.member);

        if contexts.is_empty() {
            debug!(
                "BuiltIn {} on {} is not used by any entry point",
                target.built_in, target.id,
            );

            if is_vulkan {
                self.check_type(rule, &vuids, target, shape, None)?;
                self.check_member(rule, &vuids, target, None)?;
            }

            return Ok(());
        }

        if !is_vulkan {
            return self.check_grammar_capabilities(rule, target, contexts.first());
        }

        for context in &contexts {
            trace!(
                "checking BuiltIn {} as used by {} in function {} of entry point \"{}\"",
                target.built_in,
                context.referenced_from.name(),
                context.function,
                context.entry_point.name,
            );

            self.check_context(rule, &vuids, target, shape, context)?;
        }

        Ok(())
    }

    fn check_context(
        &self,
        rule: &BuiltInRule,
        vuids: &BuiltInVuids,
        target: &BuiltInTarget,
        shape: Option<&TypeShape>,
        context: &ReachingContext<'_>,
    ) -> Result<(), Box<ValidationError>> {
        let execution_model = context.entry_point.execution_model;

        if !rule.models.contains(execution_model) {
            return Err(self.error(
                Violation::ExecutionModel {
                    models: rule.models,
                    execution_model,
                },
                target,
                vuids.execution_model,
                Some(context),
            ));
        }

        self.check_storage_class(rule, vuids, target, context)?;
        self.check_type(rule, vuids, target, shape, Some(context))?;
        self.check_grammar_capabilities(rule, target, Some(context))?;

        for requirement in rule.model_requirements {
            if requirement.models.contains(&execution_model)
                && !self.context.satisfies(requirement.requires_one_of)
            {
                return Err(self.error(
                    Violation::ModelCapability {
                        requires_one_of: requirement.requires_one_of,
                        execution_model,
                    },
                    target,
                    vuids.capability,
                    Some(context),
                ));
            }
        }

        self.check_companions(rule, vuids, target, context)?;
        self.check_member(rule, vuids, target, Some(context))?;

        if let Some(required) = rule.execution_mode {
            if required.models.contains(&execution_model)
                && !context.entry_point.has_execution_mode(required.mode)
            {
                return Err(self.error(
                    Violation::ExecutionMode {
                        mode: required.mode,
                    },
                    target,
                    vuids.execution_mode,
                    Some(context),
                ));
            }
        }

        Ok(())
    }

    fn check_storage_class(
        &self,
        rule: &BuiltInRule,
        vuids: &BuiltInVuids,
        target: &BuiltInTarget,
        context: &ReachingContext<'_>,
    ) -> Result<(), Box<ValidationError>> {
        let (Some(storage_class), Some(allowed)) = (context.storage_class, rule.storage_classes)
        else {
            return Ok(());
        };

        if !allowed.contains(&storage_class) {
            return Err(self.error(
                Violation::StorageClass { allowed },
                target,
                vuids.storage_class,
                Some(context),
            ));
        }

        let execution_model = context.entry_point.execution_model;

        for (index, constraint) in rule.storage_constraints.iter().enumerate() {
            if constraint.forbidden == storage_class && constraint.models.contains(&execution_model)
            {
                return Err(self.error(
                    Violation::ForbiddenStorageClass {
                        storage_class,
                        execution_model,
                    },
                    target,
                    vuids.storage_constraint(index),
                    Some(context),
                ));
            }
        }

        Ok(())
    }

    fn check_type(
        &self,
        rule: &BuiltInRule,
        vuids: &BuiltInVuids,
        target: &BuiltInTarget,
        shape: Option<&TypeShape>,
        context: Option<&ReachingContext<'_>>,
    ) -> Result<(), Box<ValidationError>> {
        let result = match shape {
            Some(shape) => rule.ty.check(shape),
            None if rule.ty == TypeRule::Any => Ok(()),
            None => Err(ShapeMismatch {
                tier: MismatchTier::Kind,
                description: "has no known type".to_owned(),
            }),
        };

        result.map_err(|mismatch| {
            self.error(
                Violation::Type {
                    expected: rule.ty,
                    mismatch,
                },
                target,
                vuids.ty,
                context,
            )
        })
    }

    fn check_grammar_capabilities(
        &self,
        rule: &BuiltInRule,
        target: &BuiltInTarget,
        context: Option<&ReachingContext<'_>>,
    ) -> Result<(), Box<ValidationError>> {
        if self.context.satisfies(rule.requires_one_of) {
            return Ok(());
        }

        Err(self.error(
            Violation::Capability {
                requires_one_of: rule.requires_one_of,
            },
            target,
            &[],
            context,
        ))
    }

    fn check_companions(
        &self,
        rule: &BuiltInRule,
        vuids: &BuiltInVuids,
        target: &BuiltInTarget,
        context: &ReachingContext<'_>,
    ) -> Result<(), Box<ValidationError>> {
        let carrier = self.decorations.decorations_of(context.carrier, None);

        if rule.patch && !target.decorations.patch && !carrier.patch {
            return Err(self.error(
                Violation::MissingPatch,
                target,
                vuids.companion,
                Some(context),
            ));
        }

        let per_primitive_output = context.entry_point.execution_model == ExecutionModel::MeshEXT
            && context.storage_class == Some(StorageClass::Output);

        if per_primitive_output {
            let decorated = target.decorations.per_primitive || carrier.per_primitive;
            let violation = match rule.per_primitive {
                PerPrimitive::Required if !decorated => Some(Violation::MissingPerPrimitive),
                PerPrimitive::Forbidden if decorated => Some(Violation::ForbiddenPerPrimitive),
                _ => None,
            };

            if let Some(violation) = violation {
                return Err(self.error(violation, target, vuids.companion, Some(context)));
            }
        }

        Ok(())
    }

    fn check_member(
        &self,
        rule: &BuiltInRule,
        vuids: &BuiltInVuids,
        target: &BuiltInTarget,
        context: Option<&ReachingContext<'_>>,
    ) -> Result<(), Box<ValidationError>> {
        if target.member.is_some() && !rule.member_allowed {
            return Err(self.error(Violation::Member, target, vuids.member, context));
        }

        Ok(())
    }

    fn error(
        &self,
        violation: Violation,
        target: &BuiltInTarget,
        vuids: &'static [&'static str],
        context: Option<&ReachingContext<'_>>,
    ) -> Box<ValidationError> {
        diagnostic::format(
            self.spirv,
            violation,
            target,
            vuids,
            self.context.environment(),
            context,
        )
    }
}

/// An ID or struct member decorated with `BuiltIn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltInTarget {
    /// The decorated ID. For a struct member, this is the struct type.
    pub id: Id,
    pub member: Option<u32>,
    pub built_in: BuiltIn,
    /// `None` if the ID can't carry a `BuiltIn` decoration.
    pub kind: Option<TargetKind>,
    /// The type of the member, the pointee type of the variable, or the type of the constant.
    pub declared_type: Option<Id>,
    /// The shape of `declared_type`.
    pub shape: Option<TypeShape>,
    pub decorations: DecorationSet,
}

/// What kind of definition a `BuiltIn` decoration targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Variable { storage_class: StorageClass },
    StructMember,
    Constant,
}

/// Removes the per-vertex or per-primitive array level that some stages add around a built-in.
fn strip_arrayed<'s>(rule: &BuiltInRule, shape: &'s TypeShape) -> &'s TypeShape {
    match shape {
        TypeShape::Array { element, .. } if rule.arrayed && rule.ty.matches_class(element) => {
            &**element
        }
        _ => shape,
    }
}

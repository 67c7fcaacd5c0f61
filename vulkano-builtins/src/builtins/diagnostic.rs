// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    rules::Models,
    type_rule::{article, MismatchTier, ShapeMismatch, TypeRule},
    BuiltInTarget,
};
use crate::{
    reflect::reachability::ReachingContext,
    spirv::{BuiltIn, ExecutionMode, ExecutionModel, Id, Spirv, StorageClass},
    RequiresOneOf, TargetEnvironment, ValidationError, Version,
};
use std::fmt::Write;

/// The kind of rule that a module breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ViolationKind {
    WrongExecutionModel,
    WrongStorageClass,
    WrongTypeKind,
    WrongTypeWidth,
    WrongTypeCount,
    MissingCapabilityOrExtension,
    InvalidDecorationTarget,
    MissingCompanionDecoration,
    MissingExecutionMode,
    InvalidConstantTarget,
    BuiltInAsMemberForbidden,
    /// The module uses a newer SPIR-V version than the target environment accepts.
    UnsupportedSpirvVersion,
}

/// Where a decorated target is used from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribution {
    pub entry_point: Id,
    pub entry_point_name: String,
    pub execution_model: ExecutionModel,
    /// The function that contains the referencing instruction.
    pub function: Id,
}

/// A broken rule, with what is needed to describe it.
#[derive(Clone, Debug)]
pub(crate) enum Violation {
    ExecutionModel {
        models: Models,
        execution_model: ExecutionModel,
    },
    StorageClass {
        allowed: &'static [StorageClass],
    },
    ForbiddenStorageClass {
        storage_class: StorageClass,
        execution_model: ExecutionModel,
    },
    Type {
        expected: TypeRule,
        mismatch: ShapeMismatch,
    },
    Capability {
        requires_one_of: RequiresOneOf,
    },
    ModelCapability {
        requires_one_of: RequiresOneOf,
        execution_model: ExecutionModel,
    },
    TargetKind,
    DuplicateBuiltIn {
        first: BuiltIn,
    },
    MissingPatch,
    MissingPerPrimitive,
    ForbiddenPerPrimitive,
    Member,
    ExecutionMode {
        mode: ExecutionMode,
    },
    NotConstant,
}

impl Violation {
    pub(crate) fn kind(&self) -> ViolationKind {
        match self {
            Self::ExecutionModel { .. } => ViolationKind::WrongExecutionModel,
            Self::StorageClass { .. } | Self::ForbiddenStorageClass { .. } => {
                ViolationKind::WrongStorageClass
            }
            Self::Type { mismatch, .. } => match mismatch.tier {
                MismatchTier::Kind => ViolationKind::WrongTypeKind,
                MismatchTier::Count => ViolationKind::WrongTypeCount,
                MismatchTier::Width => ViolationKind::WrongTypeWidth,
            },
            Self::Capability { .. } | Self::ModelCapability { .. } => {
                ViolationKind::MissingCapabilityOrExtension
            }
            Self::TargetKind | Self::DuplicateBuiltIn { .. } => {
                ViolationKind::InvalidDecorationTarget
            }
            Self::MissingPatch | Self::MissingPerPrimitive | Self::ForbiddenPerPrimitive => {
                ViolationKind::MissingCompanionDecoration
            }
            Self::Member => ViolationKind::BuiltInAsMemberForbidden,
            Self::ExecutionMode { .. } => ViolationKind::MissingExecutionMode,
            Self::NotConstant => ViolationKind::InvalidConstantTarget,
        }
    }
}

/// Builds the error for a violation of the rules of `target`.
pub(crate) fn format(
    spirv: &Spirv,
    violation: Violation,
    target: &BuiltInTarget,
    vuids: &'static [&'static str],
    environment: TargetEnvironment,
    context: Option<&ReachingContext<'_>>,
) -> Box<ValidationError> {
    let kind = violation.kind();
    let api = environment.api_name();
    let built_in = target.built_in;
    let subject = match target.member {
        Some(member) => format!("{} member #{}", describe(spirv, target.id), member),
        None => describe(spirv, target.id),
    };
    let mut requires_one_of = RequiresOneOf::default();
    let mut attributed = true;

    let mut problem = match violation {
        Violation::ExecutionModel {
            models,
            execution_model,
        } => match models {
            Models::Only(models) => format!(
                "{} spec allows BuiltIn {} to be used only with {} execution model{}.",
                api,
                built_in,
                join(models, " or "),
                if models.len() > 1 { "s" } else { "" },
            ),
            Models::Except(_) => format!(
                "{} spec doesn't allow BuiltIn {} to be used with execution model {}.",
                api, built_in, execution_model,
            ),
            Models::Any | Models::None => format!(
                "{} spec doesn't allow BuiltIn {} to be used.",
                api, built_in,
            ),
        },
        Violation::StorageClass { allowed } => format!(
            "{} spec allows BuiltIn {} to be only used for variables with {} storage class.",
            api,
            built_in,
            join(allowed, " or "),
        ),
        Violation::ForbiddenStorageClass {
            storage_class,
            execution_model,
        } => format!(
            "{} spec doesn't allow BuiltIn {} to be used for variables with {} storage class if \
            execution model is {}.",
            api, built_in, storage_class, execution_model,
        ),
        Violation::Type { expected, mismatch } => {
            attributed = false;
            let expected = expected.to_string();

            format!(
                "According to the {} spec BuiltIn {} variable needs to be {} {}. {} {}.",
                api,
                built_in,
                article(&expected),
                expected,
                subject,
                mismatch.description,
            )
        }
        Violation::Capability {
            requires_one_of: requires,
        } => {
            requires_one_of = requires;

            format!(
                "{} spec doesn't allow BuiltIn {} to be used without declaring one of the \
                required capabilities or extensions.",
                api, built_in,
            )
        }
        Violation::ModelCapability {
            requires_one_of: requires,
            execution_model,
        } => {
            requires_one_of = requires;

            format!(
                "{} spec doesn't allow BuiltIn {} to be used with execution model {} without \
                declaring one of the required capabilities or extensions.",
                api, built_in, execution_model,
            )
        }
        Violation::TargetKind => {
            attributed = false;

            format!(
                "BuiltIns can only target variables, structure members or constants. {} is \
                decorated with BuiltIn {}.",
                subject, built_in,
            )
        }
        Violation::DuplicateBuiltIn { first } => {
            attributed = false;

            format!(
                "{} is decorated with BuiltIn {}, but it is already decorated with BuiltIn {}.",
                subject, built_in, first,
            )
        }
        Violation::MissingPatch => format!(
            "{} spec requires BuiltIn {} to be decorated with Patch.",
            api, built_in,
        ),
        Violation::MissingPerPrimitive => format!(
            "{} spec requires BuiltIn {} to be decorated with PerPrimitiveEXT when used with \
            execution model MeshEXT.",
            api, built_in,
        ),
        Violation::ForbiddenPerPrimitive => format!(
            "{} spec doesn't allow BuiltIn {} to be decorated with PerPrimitiveEXT.",
            api, built_in,
        ),
        Violation::Member => format!(
            "{} spec doesn't allow BuiltIn {} to be used as a structure member decoration.",
            api, built_in,
        ),
        Violation::ExecutionMode { mode } => format!(
            "{} spec requires {} execution mode to be declared when using BuiltIn {}.",
            api, mode, built_in,
        ),
        Violation::NotConstant => {
            attributed = false;

            format!(
                "{} spec requires BuiltIn {} to be a constant. {} is not a constant.",
                api, built_in, subject,
            )
        }
    };

    if let (true, Some(context)) = (attributed, context) {
        problem.push(' ');
        describe_context(&mut problem, spirv, target, context);
    }

    Box::new(ValidationError {
        kind,
        problem: problem.into(),
        requires_one_of,
        vuids,
        attribution: context.map(attribution),
    })
}

/// Builds the error for a module whose SPIR-V version is too new for the target environment.
pub(crate) fn unsupported_version(
    environment: TargetEnvironment,
    version: Version,
    max_version: Version,
) -> Box<ValidationError> {
    Box::new(ValidationError {
        kind: ViolationKind::UnsupportedSpirvVersion,
        problem: format!(
            "{} {} doesn't support SPIR-V version {}; the newest supported version is {}.",
            environment.api_name(),
            environment.version(),
            version,
            max_version,
        )
        .into(),
        requires_one_of: RequiresOneOf::default(),
        vuids: &[],
        attribution: None,
    })
}

fn attribution(context: &ReachingContext<'_>) -> Attribution {
    Attribution {
        entry_point: context.entry_point.function,
        entry_point_name: context.entry_point.name.to_owned(),
        execution_model: context.entry_point.execution_model,
        function: context.function,
    }
}

fn describe_context(
    out: &mut String,
    spirv: &Spirv,
    target: &BuiltInTarget,
    context: &ReachingContext<'_>,
) {
    let referenced_from = context.referenced_from;

    match referenced_from.result_id() {
        Some(result_id) => {
            let _ = write!(
                out,
                "ID {} ({})",
                result_id.as_raw(),
                referenced_from.name(),
            );
        }
        None => {
            let _ = write!(out, "({})", referenced_from.name());
        }
    }

    let _ = write!(
        out,
        " is referencing {}",
        describe(spirv, context.carrier),
    );

    if context.carrier != target.id {
        let _ = write!(out, " which is dependent on {}", describe(spirv, target.id));
    }

    let _ = write!(
        out,
        " which is decorated with BuiltIn {} in function {} called with execution model {}.",
        target.built_in,
        context.function.as_raw(),
        context.entry_point.execution_model,
    );
}

/// "ID 12 (OpVariable)"
fn describe(spirv: &Spirv, id: Id) -> String {
    match spirv.id(id) {
        Some(info) => format!("ID {} ({})", id.as_raw(), info.instruction().name()),
        None => format!("ID {}", id.as_raw()),
    }
}

fn join<T: std::fmt::Display>(items: &[T], last_separator: &str) -> String {
    let mut out = String::new();

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(if index + 1 == items.len() {
                last_separator
            } else {
                ", "
            });
        }

        let _ = write!(out, "{}", item);
    }

    out
}

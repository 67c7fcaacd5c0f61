// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Validation of `BuiltIn` decorations in SPIR-V modules.
//!
//! A `BuiltIn` decoration marks a variable, a struct member or a constant as carrying a value with
//! a predefined meaning, such as the position of a vertex or the index of a compute invocation.
//! Client APIs restrict how each of them can be declared and used: which shader stages can access
//! them, in which storage class, with which type, and which capabilities must be declared. This
//! crate checks a module against those rules.
//!
//! # Usage
//!
//! ```
//! use vulkano_builtins::{spirv::assemble::assemble, validate_builtins, ValidationOptions, Version};
//!
//! let spirv = assemble(
//!     r#"
//!     OpCapability Shader
//!     OpMemoryModel Logical GLSL450
//!     OpEntryPoint Fragment %main "main" %depth
//!     OpExecutionMode %main OriginUpperLeft
//!     OpDecorate %depth BuiltIn FragDepth
//!     %void = OpTypeVoid
//!     %fn = OpTypeFunction %void
//!     %float = OpTypeFloat 32
//!     %ptr = OpTypePointer Output %float
//!     %depth = OpVariable %ptr Output
//!     %float_0 = OpConstant %float 0
//!     %main = OpFunction %void None %fn
//!     %entry = OpLabel
//!     OpStore %depth %float_0
//!     OpReturn
//!     OpFunctionEnd
//!     "#,
//!     Version::V1_0,
//! )
//! .unwrap();
//!
//! // Writing to `FragDepth` requires the `DepthReplacing` execution mode.
//! let err = validate_builtins(&spirv, &ValidationOptions::default()).unwrap_err();
//! assert!(err.has_any_vuid(&["VUID-FragDepth-FragDepth-04216"]));
//! ```
//!
//! # Structure
//!
//! - [`spirv`] holds the in-memory representation of a module, and an assembler for SPIR-V text.
//! - [`reflect`] builds the indices that validation queries: type shapes, decorations and which
//!   entry points reach which IDs.
//! - [`builtins`] holds the rules for each built-in, and the validator that applies them.

pub use crate::{
    builtins::{validate_builtins, Attribution, BuiltInValidator, ViolationKind},
    environment::{TargetEnvironment, ValidationContext, ValidationOptions},
    version::Version,
};
use crate::spirv::Capability;
use std::{
    borrow::Cow,
    error::Error,
    fmt::{Debug, Display, Error as FmtError, Formatter},
};

mod macros;
pub mod builtins;
pub mod environment;
pub mod reflect;
pub mod spirv;
mod version;

/// A helper type for non-exhaustive structs.
///
/// This type cannot be constructed outside this crate. Structures with a field of this type can
/// only be constructed by calling a constructor function or `Default::default()`. The effect is
/// similar to the standard Rust `#[non_exhaustive]` attribute, except that it does not prevent
/// update syntax from being used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NonExhaustive(pub(crate) ());

/// A rule of the client API or of SPIR-V that a module breaks.
#[derive(Clone)]
pub struct ValidationError {
    /// What kind of rule is broken.
    pub kind: ViolationKind,

    /// A description of the problem.
    pub problem: Cow<'static, str>,

    /// If applicable, settings that the module must declare to make the problem go away.
    pub requires_one_of: RequiresOneOf,

    /// *Valid Usage IDs* (VUIDs) in the Vulkan specification that relate to the problem.
    ///
    /// A problem can be reported under more than one VUID, when the rules of several built-ins
    /// are shared. Use [`has_any_vuid`](Self::has_any_vuid) to check for one of them.
    pub vuids: &'static [&'static str],

    /// The entry point and function through which the offending target is used, if it is used.
    pub attribution: Option<Attribution>,
}

impl ValidationError {
    /// Returns whether any of the `candidates` is among the VUIDs of the error.
    #[inline]
    pub fn has_any_vuid(&self, candidates: &[&str]) -> bool {
        self.vuids.iter().any(|vuid| candidates.contains(vuid))
    }
}

impl Debug for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{:?}: {}", self.kind, self)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.problem)?;

        if !self.requires_one_of.is_empty() {
            write!(f, " -- {}", self.requires_one_of)?;
        }

        if let Some((first, rest)) = self.vuids.split_first() {
            write!(f, " (Vulkan VUIDs: {}", first)?;

            for vuid in rest {
                write!(f, ", {}", vuid)?;
            }

            write!(f, ")")?;
        }

        Ok(())
    }
}

impl Error for ValidationError {}

/// Used in errors to indicate a set of alternatives that needs to be available/enabled to allow
/// a given operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequiresOneOf(pub &'static [RequiresAllOf]);

impl RequiresOneOf {
    /// Returns the number of alternatives.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are any alternatives.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for RequiresOneOf {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "requires one of: ")?;

        if let Some((first, rest)) = self.0.split_first() {
            if first.0.len() > 1 {
                write!(f, "({})", first)?;
            } else {
                write!(f, "{}", first)?;
            }

            for rest in rest {
                if rest.0.len() > 1 {
                    write!(f, " or ({})", rest)?;
                } else {
                    write!(f, " or {}", rest)?;
                }
            }
        }

        Ok(())
    }
}

/// Used in errors to indicate a set of requirements that all need to be available/enabled to
/// allow a given operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequiresAllOf(pub &'static [Requires]);

impl Display for RequiresAllOf {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if let Some((first, rest)) = self.0.split_first() {
            write!(f, "{}", first)?;

            for rest in rest {
                write!(f, " + {}", rest)?;
            }
        }

        Ok(())
    }
}

/// Something that needs to be declared by a module, or supported by its version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requires {
    Capability(Capability),
    Extension(&'static str),
    SpirvVersion(Version),
}

impl Display for Requires {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Requires::Capability(capability) => write!(f, "SPIR-V capability `{}`", capability),
            Requires::Extension(extension) => write!(f, "SPIR-V extension `{}`", extension),
            Requires::SpirvVersion(version) => write!(f, "SPIR-V version {}", version),
        }
    }
}

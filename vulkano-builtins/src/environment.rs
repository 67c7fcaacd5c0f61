// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The environment that a module is validated for.

use crate::{
    spirv::{Capability, Instruction, Spirv},
    NonExhaustive, Requires, RequiresOneOf, Version,
};
use foldhash::HashSet;

/// The client API that will consume the module, and its version.
///
/// For `Universal`, the version is the version of SPIR-V itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TargetEnvironment {
    Universal(Version),
    Vulkan(Version),
    OpenGL(Version),
    OpenCL(Version),
}

impl TargetEnvironment {
    /// Returns the name of the API, as used in diagnostics.
    #[inline]
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Universal(_) => "SPIR-V",
            Self::Vulkan(_) => "Vulkan",
            Self::OpenGL(_) => "OpenGL",
            Self::OpenCL(_) => "OpenCL",
        }
    }

    #[inline]
    pub fn version(self) -> Version {
        match self {
            Self::Universal(version)
            | Self::Vulkan(version)
            | Self::OpenGL(version)
            | Self::OpenCL(version) => version,
        }
    }

    #[inline]
    pub fn is_vulkan(self) -> bool {
        matches!(self, Self::Vulkan(_))
    }

    /// Returns the newest SPIR-V version that the environment accepts, if it limits it.
    pub fn max_spirv_version(self) -> Option<Version> {
        match self {
            Self::Universal(version) => Some(version),
            Self::Vulkan(version) => Some(if version >= Version::V1_3 {
                Version::V1_6
            } else if version >= Version::V1_2 {
                Version::V1_5
            } else if version >= Version::V1_1 {
                Version::V1_3
            } else {
                Version::V1_0
            }),
            Self::OpenGL(_) | Self::OpenCL(_) => None,
        }
    }
}

impl Default for TargetEnvironment {
    #[inline]
    fn default() -> Self {
        Self::Vulkan(Version::V1_0)
    }
}

/// Parameters of built-in validation.
#[derive(Clone, Debug)]
pub struct ValidationOptions {
    /// The environment that the module is validated for. The rules of the Vulkan "Built-In
    /// Variables" chapter only apply to `TargetEnvironment::Vulkan`.
    ///
    /// The default value is `TargetEnvironment::Vulkan(Version::V1_0)`.
    pub target_environment: TargetEnvironment,

    pub _ne: NonExhaustive,
}

impl Default for ValidationOptions {
    #[inline]
    fn default() -> Self {
        Self {
            target_environment: TargetEnvironment::default(),
            _ne: NonExhaustive(()),
        }
    }
}

/// The capabilities and extensions declared by a module, in a given environment.
#[derive(Clone, Debug)]
pub struct ValidationContext {
    environment: TargetEnvironment,
    spirv_version: Version,
    capabilities: HashSet<Capability>,
    extensions: HashSet<String>,
}

impl ValidationContext {
    pub fn new(spirv: &Spirv, environment: TargetEnvironment) -> Self {
        let mut capabilities: HashSet<Capability> = HashSet::default();
        let mut pending: Vec<Capability> = spirv
            .capabilities()
            .iter()
            .filter_map(|instruction| match *instruction {
                Instruction::Capability { capability } => Some(capability),
                _ => None,
            })
            .collect();

        while let Some(capability) = pending.pop() {
            if capabilities.insert(capability) {
                pending.extend_from_slice(capability.implicitly_declares());
            }
        }

        let extensions = spirv
            .extensions()
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Extension { name } => Some(name.clone()),
                _ => None,
            })
            .collect();

        ValidationContext {
            environment,
            spirv_version: spirv.version(),
            capabilities,
            extensions,
        }
    }

    /// Returns the declared capabilities, together with those they implicitly declare.
    #[inline]
    pub fn capabilities(&self) -> &HashSet<Capability> {
        &self.capabilities
    }

    #[inline]
    pub fn extensions(&self) -> &HashSet<String> {
        &self.extensions
    }

    #[inline]
    pub fn environment(&self) -> TargetEnvironment {
        self.environment
    }

    #[inline]
    pub fn spirv_version(&self) -> Version {
        self.spirv_version
    }

    #[inline]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    #[inline]
    pub fn has_extension(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// Returns whether any of the alternatives is met in full. An empty set of alternatives is
    /// always met.
    pub fn satisfies(&self, requires_one_of: RequiresOneOf) -> bool {
        requires_one_of.is_empty()
            || requires_one_of.0.iter().any(|requires_all_of| {
                requires_all_of.0.iter().all(|requires| match *requires {
                    Requires::Capability(capability) => self.has_capability(capability),
                    Requires::Extension(extension) => self.has_extension(extension),
                    Requires::SpirvVersion(version) => self.spirv_version >= version,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{TargetEnvironment, ValidationContext};
    use crate::{
        spirv::{assemble::assemble, Capability},
        Requires, RequiresAllOf, RequiresOneOf, Version,
    };

    #[test]
    fn implicit_capabilities() {
        let spirv = assemble(
            r#"
            OpCapability Geometry
            OpCapability ShaderViewportIndexLayerEXT
            OpExtension "SPV_EXT_shader_viewport_index_layer"
            OpMemoryModel Logical GLSL450
            "#,
            Version::V1_0,
        )
        .unwrap();
        let context = ValidationContext::new(&spirv, TargetEnvironment::default());

        for capability in [
            Capability::Geometry,
            Capability::Shader,
            Capability::Matrix,
            Capability::ShaderViewportIndexLayerEXT,
            Capability::MultiViewport,
        ] {
            assert!(context.has_capability(capability), "{}", capability);
        }
        assert!(!context.has_capability(Capability::Tessellation));
        assert!(context.has_extension("SPV_EXT_shader_viewport_index_layer"));
    }

    #[test]
    fn requirements() {
        let spirv = assemble("OpCapability Shader", Version::V1_3).unwrap();
        let context = ValidationContext::new(&spirv, TargetEnvironment::Vulkan(Version::V1_1));

        assert!(context.satisfies(RequiresOneOf(&[])));
        assert!(context.satisfies(RequiresOneOf(&[
            RequiresAllOf(&[Requires::Capability(Capability::Geometry)]),
            RequiresAllOf(&[
                Requires::Capability(Capability::Shader),
                Requires::SpirvVersion(Version::V1_3),
            ]),
        ])));
        assert!(!context.satisfies(RequiresOneOf(&[RequiresAllOf(&[
            Requires::Capability(Capability::Shader),
            Requires::SpirvVersion(Version::V1_5),
        ])])));
        assert!(!context.satisfies(RequiresOneOf(&[RequiresAllOf(&[
            Requires::Extension("SPV_KHR_shader_draw_parameters"),
        ])])));
    }

    #[test]
    fn spirv_version_limits() {
        assert_eq!(
            TargetEnvironment::Vulkan(Version::V1_1).max_spirv_version(),
            Some(Version::V1_3),
        );
        assert_eq!(
            TargetEnvironment::Vulkan(Version::V1_3).max_spirv_version(),
            Some(Version::V1_6),
        );
        assert_eq!(
            TargetEnvironment::OpenGL(Version::major_minor(4, 6)).max_spirv_version(),
            None,
        );
        assert_eq!(TargetEnvironment::default().api_name(), "Vulkan");
    }
}

// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! The rules that each built-in is subject to.
//!
//! Rules follow the "Built-In Variables" chapter of the Vulkan specification, with capability
//! requirements from the SPIR-V grammar. Built-ins that are subject to the same constraints share
//! the same `static` rule; the VUIDs are kept per built-in, because Vulkan numbers them
//! separately.

use super::type_rule::TypeRule;
use crate::{
    macros::vuid,
    spirv::{BuiltIn, Capability, ExecutionMode, ExecutionModel, StorageClass},
    Requires, RequiresAllOf, RequiresOneOf, Version,
};

/// The execution models that a built-in can be used with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Models {
    Any,
    Only(&'static [ExecutionModel]),
    Except(&'static [ExecutionModel]),
    /// The built-in can't be used at all.
    None,
}

impl Models {
    #[inline]
    pub fn contains(self, execution_model: ExecutionModel) -> bool {
        match self {
            Models::Any => true,
            Models::Only(models) => models.contains(&execution_model),
            Models::Except(models) => !models.contains(&execution_model),
            Models::None => false,
        }
    }
}

/// A storage class that a built-in can't be used with in some execution models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageConstraint {
    pub models: &'static [ExecutionModel],
    pub forbidden: StorageClass,
}

/// Capabilities that a built-in needs in some execution models only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelRequirement {
    pub models: &'static [ExecutionModel],
    pub requires_one_of: RequiresOneOf,
}

/// Whether a built-in written by a `MeshEXT` shader must be decorated with `PerPrimitiveEXT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerPrimitive {
    Unchecked,
    Required,
    Forbidden,
}

/// An execution mode that an entry point must declare when it uses a built-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequiredExecutionMode {
    pub models: &'static [ExecutionModel],
    pub mode: ExecutionMode,
}

/// The constraints that a built-in is subject to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltInRule {
    pub models: Models,
    /// `None` if the storage class is not checked.
    pub storage_classes: Option<&'static [StorageClass]>,
    pub storage_constraints: &'static [StorageConstraint],
    pub ty: TypeRule,
    /// Capabilities from the SPIR-V grammar. These apply in every environment.
    pub requires_one_of: RequiresOneOf,
    pub model_requirements: &'static [ModelRequirement],
    /// Whether the built-in can decorate a struct member.
    pub member_allowed: bool,
    /// Whether the built-in can be declared as an array with one element per vertex or per
    /// primitive.
    pub arrayed: bool,
    /// Whether the `Patch` decoration is required.
    pub patch: bool,
    pub per_primitive: PerPrimitive,
    pub execution_mode: Option<RequiredExecutionMode>,
    /// Whether the built-in can only decorate a constant.
    pub constant_only: bool,
}

/// The VUIDs of each kind of violation of a built-in's rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuiltInVuids {
    pub execution_model: &'static [&'static str],
    pub storage_class: &'static [&'static str],
    /// One entry for each of the rule's `storage_constraints`.
    pub storage_constraints: &'static [&'static [&'static str]],
    pub ty: &'static [&'static str],
    /// For the rule's `model_requirements`.
    pub capability: &'static [&'static str],
    /// For `Patch` and `PerPrimitiveEXT`.
    pub companion: &'static [&'static str],
    pub member: &'static [&'static str],
    pub execution_mode: &'static [&'static str],
    pub constant: &'static [&'static str],
}

impl BuiltInVuids {
    #[inline]
    pub(crate) fn storage_constraint(&self, index: usize) -> &'static [&'static str] {
        self.storage_constraints.get(index).copied().unwrap_or(&[])
    }
}

/// A built-in's rule together with its VUIDs.
#[derive(Clone, Copy, Debug)]
pub struct Registration {
    pub rule: &'static BuiltInRule,
    pub vuids: BuiltInVuids,
}

const NO_VUIDS: BuiltInVuids = BuiltInVuids {
    execution_model: &[],
    storage_class: &[],
    storage_constraints: &[],
    ty: &[],
    capability: &[],
    companion: &[],
    member: &[],
    execution_mode: &[],
    constant: &[],
};

macro_rules! vuids {
    (
        $built_in:ident {
            $($field:ident: [$($code:tt),* $(,)?]),* $(,)?
        }
        $(constraints: [$([$($constraint:tt),*]),* $(,)?])?
    ) => {
        BuiltInVuids {
            $($field: &[$(vuid!($built_in, $code)),*],)*
            $(storage_constraints: &[$(&[$(vuid!($built_in, $constraint)),*]),*],)?
            ..NO_VUIDS
        }
    };
}

/// Capabilities, any of which enables a built-in. Extensions listed after `;` enable it too.
macro_rules! capabilities {
    ($($capability:ident),+ $(; $($extension:literal),+)? $(,)?) => {
        RequiresOneOf(&[
            $(RequiresAllOf(&[Requires::Capability(Capability::$capability)]),)+
            $($(RequiresAllOf(&[Requires::Extension($extension)]),)+)?
        ])
    };
}

use ExecutionModel as M;

const VERTEX: &[ExecutionModel] = &[M::Vertex];
const FRAGMENT: &[ExecutionModel] = &[M::Fragment];
const TESSELLATION: &[ExecutionModel] = &[M::TessellationControl, M::TessellationEvaluation];
const COMPUTE: &[ExecutionModel] = &[M::GLCompute, M::MeshNV, M::TaskNV, M::MeshEXT, M::TaskEXT];
const VERTEX_PROCESSING: &[ExecutionModel] = &[
    M::Vertex,
    M::TessellationControl,
    M::TessellationEvaluation,
    M::Geometry,
    M::MeshNV,
    M::MeshEXT,
];
const CLIP_CULL_MODELS: &[ExecutionModel] = &[
    M::Vertex,
    M::TessellationControl,
    M::TessellationEvaluation,
    M::Geometry,
    M::Fragment,
    M::MeshNV,
    M::MeshEXT,
];
const LAYER_MODELS: &[ExecutionModel] = &[
    M::Vertex,
    M::TessellationEvaluation,
    M::Geometry,
    M::Fragment,
    M::MeshNV,
    M::MeshEXT,
];
const PRIMITIVE_ID_MODELS: &[ExecutionModel] = &[
    M::TessellationControl,
    M::TessellationEvaluation,
    M::Geometry,
    M::Fragment,
    M::IntersectionKHR,
    M::AnyHitKHR,
    M::ClosestHitKHR,
    M::MeshNV,
    M::MeshEXT,
];
const RAY_TRACING: &[ExecutionModel] = &[
    M::RayGenerationKHR,
    M::IntersectionKHR,
    M::AnyHitKHR,
    M::ClosestHitKHR,
    M::MissKHR,
    M::CallableKHR,
];
const RAY_TRAVERSAL: &[ExecutionModel] =
    &[M::IntersectionKHR, M::AnyHitKHR, M::ClosestHitKHR, M::MissKHR];
const RAY_HIT_GROUP: &[ExecutionModel] = &[M::IntersectionKHR, M::AnyHitKHR, M::ClosestHitKHR];
const RAY_HIT: &[ExecutionModel] = &[M::AnyHitKHR, M::ClosestHitKHR];
const MESH_EXT: &[ExecutionModel] = &[M::MeshEXT];

const INPUT: &[StorageClass] = &[StorageClass::Input];
const OUTPUT: &[StorageClass] = &[StorageClass::Output];
const INPUT_OUTPUT: &[StorageClass] = &[StorageClass::Input, StorageClass::Output];

const RAY_TRACING_CAPABILITIES: RequiresOneOf = capabilities!(RayTracingNV, RayTracingKHR);

const BASE: BuiltInRule = BuiltInRule {
    models: Models::Any,
    storage_classes: None,
    storage_constraints: &[],
    ty: TypeRule::Any,
    requires_one_of: RequiresOneOf(&[]),
    model_requirements: &[],
    member_allowed: true,
    arrayed: false,
    patch: false,
    per_primitive: PerPrimitive::Unchecked,
    execution_mode: None,
    constant_only: false,
};

const fn input(models: Models, ty: TypeRule, requires_one_of: RequiresOneOf) -> BuiltInRule {
    BuiltInRule {
        models,
        storage_classes: Some(INPUT),
        ty,
        requires_one_of,
        ..BASE
    }
}

const fn output(models: Models, ty: TypeRule, requires_one_of: RequiresOneOf) -> BuiltInRule {
    BuiltInRule {
        models,
        storage_classes: Some(OUTPUT),
        ty,
        requires_one_of,
        ..BASE
    }
}

const INT: TypeRule = TypeRule::IntScalar { width: 32 };
const FLOAT: TypeRule = TypeRule::FloatScalar { width: 32 };
const BOOL: TypeRule = TypeRule::BoolScalar;

// Vertex processing

const POSITION: BuiltInRule = BuiltInRule {
    models: Models::Only(VERTEX_PROCESSING),
    storage_classes: Some(INPUT_OUTPUT),
    storage_constraints: &[StorageConstraint {
        models: VERTEX,
        forbidden: StorageClass::Input,
    }],
    ty: TypeRule::FloatVector {
        count: 4,
        width: 32,
    },
    requires_one_of: capabilities!(Shader),
    arrayed: true,
    per_primitive: PerPrimitive::Forbidden,
    ..BASE
};

static POINT_SIZE: BuiltInRule = BuiltInRule {
    ty: FLOAT,
    ..POSITION
};

const CLIP_CULL_CONSTRAINTS: &[StorageConstraint] = &[
    StorageConstraint {
        models: VERTEX,
        forbidden: StorageClass::Input,
    },
    StorageConstraint {
        models: FRAGMENT,
        forbidden: StorageClass::Output,
    },
];

const CLIP_DISTANCE: BuiltInRule = BuiltInRule {
    models: Models::Only(CLIP_CULL_MODELS),
    storage_classes: Some(INPUT_OUTPUT),
    storage_constraints: CLIP_CULL_CONSTRAINTS,
    ty: TypeRule::FloatArray {
        length: None,
        width: 32,
    },
    requires_one_of: capabilities!(ClipDistance),
    arrayed: true,
    per_primitive: PerPrimitive::Forbidden,
    ..BASE
};

static CULL_DISTANCE: BuiltInRule = BuiltInRule {
    requires_one_of: capabilities!(CullDistance),
    ..CLIP_DISTANCE
};

static VERTEX_ID: BuiltInRule = BuiltInRule {
    models: Models::None,
    requires_one_of: capabilities!(Shader),
    ..BASE
};

static VERTEX_INDEX: BuiltInRule = input(Models::Only(VERTEX), INT, capabilities!(Shader));

static DRAW_PARAMETER: BuiltInRule = input(
    Models::Only(VERTEX),
    INT,
    capabilities!(DrawParameters; "SPV_KHR_shader_draw_parameters"),
);

static DRAW_INDEX: BuiltInRule = input(
    Models::Only(&[M::Vertex, M::MeshNV, M::TaskNV, M::MeshEXT, M::TaskEXT]),
    INT,
    capabilities!(DrawParameters, MeshShadingNV, MeshShadingEXT),
);

static INVOCATION_ID: BuiltInRule = input(
    Models::Only(&[M::TessellationControl, M::Geometry]),
    INT,
    capabilities!(Geometry, Tessellation),
);

static PRIMITIVE_ID: BuiltInRule = BuiltInRule {
    models: Models::Only(PRIMITIVE_ID_MODELS),
    storage_classes: Some(INPUT_OUTPUT),
    storage_constraints: &[
        StorageConstraint {
            models: &[
                M::TessellationControl,
                M::TessellationEvaluation,
                M::Fragment,
                M::IntersectionKHR,
                M::AnyHitKHR,
                M::ClosestHitKHR,
            ],
            forbidden: StorageClass::Output,
        },
        StorageConstraint {
            models: &[M::MeshNV, M::MeshEXT],
            forbidden: StorageClass::Input,
        },
    ],
    ty: INT,
    requires_one_of: capabilities!(
        Geometry,
        Tessellation,
        RayTracingNV,
        RayTracingKHR,
        MeshShadingNV,
        MeshShadingEXT,
    ),
    arrayed: true,
    per_primitive: PerPrimitive::Required,
    ..BASE
};

const LAYER_VIEWPORT_CONSTRAINTS: &[StorageConstraint] = &[
    StorageConstraint {
        models: &[
            M::Vertex,
            M::TessellationEvaluation,
            M::Geometry,
            M::MeshNV,
            M::MeshEXT,
        ],
        forbidden: StorageClass::Input,
    },
    StorageConstraint {
        models: FRAGMENT,
        forbidden: StorageClass::Output,
    },
];

const LAYER: BuiltInRule = BuiltInRule {
    models: Models::Only(LAYER_MODELS),
    storage_classes: Some(INPUT_OUTPUT),
    storage_constraints: LAYER_VIEWPORT_CONSTRAINTS,
    ty: INT,
    requires_one_of: capabilities!(
        Geometry,
        ShaderLayer,
        ShaderViewportIndexLayerEXT,
        MeshShadingNV,
        MeshShadingEXT,
    ),
    model_requirements: &[ModelRequirement {
        models: &[M::Vertex, M::TessellationEvaluation],
        requires_one_of: RequiresOneOf(&[
            RequiresAllOf(&[
                Requires::SpirvVersion(Version::V1_5),
                Requires::Capability(Capability::ShaderLayer),
            ]),
            RequiresAllOf(&[Requires::Capability(Capability::ShaderViewportIndexLayerEXT)]),
        ]),
    }],
    arrayed: true,
    per_primitive: PerPrimitive::Required,
    ..BASE
};

static VIEWPORT_INDEX: BuiltInRule = BuiltInRule {
    requires_one_of: capabilities!(
        MultiViewport,
        ShaderViewportIndex,
        ShaderViewportIndexLayerEXT,
        MeshShadingNV,
        MeshShadingEXT,
    ),
    model_requirements: &[ModelRequirement {
        models: &[M::Vertex, M::TessellationEvaluation],
        requires_one_of: RequiresOneOf(&[
            RequiresAllOf(&[
                Requires::SpirvVersion(Version::V1_5),
                Requires::Capability(Capability::ShaderViewportIndex),
            ]),
            RequiresAllOf(&[Requires::Capability(Capability::ShaderViewportIndexLayerEXT)]),
        ]),
    }],
    ..LAYER
};

static PRIMITIVE_SHADING_RATE: BuiltInRule = BuiltInRule {
    arrayed: true,
    per_primitive: PerPrimitive::Required,
    ..output(
        Models::Only(&[M::Vertex, M::Geometry, M::MeshNV, M::MeshEXT]),
        INT,
        capabilities!(FragmentShadingRateKHR),
    )
};

// Tessellation

const TESS_LEVEL_OUTER: BuiltInRule = BuiltInRule {
    models: Models::Only(TESSELLATION),
    storage_classes: Some(INPUT_OUTPUT),
    storage_constraints: &[
        StorageConstraint {
            models: &[M::TessellationControl],
            forbidden: StorageClass::Input,
        },
        StorageConstraint {
            models: &[M::TessellationEvaluation],
            forbidden: StorageClass::Output,
        },
    ],
    ty: TypeRule::FloatArray {
        length: Some(4),
        width: 32,
    },
    requires_one_of: capabilities!(Tessellation),
    patch: true,
    ..BASE
};

static TESS_LEVEL_INNER: BuiltInRule = BuiltInRule {
    ty: TypeRule::FloatArray {
        length: Some(2),
        width: 32,
    },
    ..TESS_LEVEL_OUTER
};

static TESS_COORD: BuiltInRule = input(
    Models::Only(&[M::TessellationEvaluation]),
    TypeRule::FloatVector {
        count: 3,
        width: 32,
    },
    capabilities!(Tessellation),
);

static PATCH_VERTICES: BuiltInRule =
    input(Models::Only(TESSELLATION), INT, capabilities!(Tessellation));

// Fragment

static FRAG_COORD: BuiltInRule = input(
    Models::Only(FRAGMENT),
    TypeRule::FloatVector {
        count: 4,
        width: 32,
    },
    capabilities!(Shader),
);

static POINT_COORD: BuiltInRule = input(
    Models::Only(FRAGMENT),
    TypeRule::FloatVector {
        count: 2,
        width: 32,
    },
    capabilities!(Shader),
);

static FRAGMENT_BOOL: BuiltInRule = input(Models::Only(FRAGMENT), BOOL, capabilities!(Shader));

static SAMPLE_ID: BuiltInRule =
    input(Models::Only(FRAGMENT), INT, capabilities!(SampleRateShading));

static SAMPLE_POSITION: BuiltInRule = input(
    Models::Only(FRAGMENT),
    TypeRule::FloatVector {
        count: 2,
        width: 32,
    },
    capabilities!(SampleRateShading),
);

static SAMPLE_MASK: BuiltInRule = BuiltInRule {
    models: Models::Only(FRAGMENT),
    storage_classes: Some(INPUT_OUTPUT),
    ty: TypeRule::IntArray {
        length: None,
        width: 32,
    },
    requires_one_of: capabilities!(Shader),
    ..BASE
};

static FRAG_DEPTH: BuiltInRule = BuiltInRule {
    execution_mode: Some(RequiredExecutionMode {
        models: FRAGMENT,
        mode: ExecutionMode::DepthReplacing,
    }),
    ..output(Models::Only(FRAGMENT), FLOAT, capabilities!(Shader))
};

static FRAG_STENCIL_REF: BuiltInRule =
    output(Models::Only(FRAGMENT), INT, capabilities!(StencilExportEXT));

static FULLY_COVERED: BuiltInRule = input(
    Models::Only(FRAGMENT),
    BOOL,
    capabilities!(FragmentFullyCoveredEXT),
);

static FRAG_SIZE: BuiltInRule = input(
    Models::Only(FRAGMENT),
    TypeRule::IntVector {
        count: 2,
        width: 32,
    },
    capabilities!(FragmentDensityEXT),
);

static FRAG_INVOCATION_COUNT: BuiltInRule =
    input(Models::Only(FRAGMENT), INT, capabilities!(FragmentDensityEXT));

static BARY_COORD: BuiltInRule = input(
    Models::Only(FRAGMENT),
    TypeRule::FloatVector {
        count: 3,
        width: 32,
    },
    capabilities!(FragmentBarycentricKHR),
);

static SHADING_RATE: BuiltInRule =
    input(Models::Only(FRAGMENT), INT, capabilities!(FragmentShadingRateKHR));

// Compute

static COMPUTE_ID: BuiltInRule = input(
    Models::Only(COMPUTE),
    TypeRule::IntVector {
        count: 3,
        width: 32,
    },
    RequiresOneOf(&[]),
);

static LOCAL_INVOCATION_INDEX: BuiltInRule =
    input(Models::Only(COMPUTE), INT, RequiresOneOf(&[]));

static WORKGROUP_SIZE: BuiltInRule = BuiltInRule {
    models: Models::Only(COMPUTE),
    ty: TypeRule::IntVector {
        count: 3,
        width: 32,
    },
    member_allowed: false,
    constant_only: true,
    ..BASE
};

static KERNEL_ONLY: BuiltInRule = BuiltInRule {
    models: Models::None,
    requires_one_of: capabilities!(Kernel),
    ..BASE
};

static SUBGROUP_SCALAR: BuiltInRule = input(
    Models::Any,
    INT,
    capabilities!(Kernel, GroupNonUniform, SubgroupBallotKHR),
);

static SUBGROUP_COUNT: BuiltInRule =
    input(Models::Only(COMPUTE), INT, capabilities!(Kernel, GroupNonUniform));

static SUBGROUP_MASK: BuiltInRule = input(
    Models::Any,
    TypeRule::IntVector {
        count: 4,
        width: 32,
    },
    capabilities!(SubgroupBallotKHR, GroupNonUniformBallot),
);

// Multiview and device groups

static DEVICE_INDEX: BuiltInRule = input(
    Models::Any,
    INT,
    capabilities!(DeviceGroup; "SPV_KHR_device_group"),
);

static VIEW_INDEX: BuiltInRule = input(
    Models::Except(&[M::GLCompute]),
    INT,
    capabilities!(MultiView; "SPV_KHR_multiview"),
);

// Mesh shading

const fn primitive_indices(ty: TypeRule, mode: ExecutionMode) -> BuiltInRule {
    BuiltInRule {
        member_allowed: false,
        execution_mode: Some(RequiredExecutionMode {
            models: MESH_EXT,
            mode,
        }),
        ..output(Models::Only(MESH_EXT), ty, capabilities!(MeshShadingEXT))
    }
}

static PRIMITIVE_POINT_INDICES: BuiltInRule = primitive_indices(
    TypeRule::IntArray {
        length: None,
        width: 32,
    },
    ExecutionMode::OutputPoints,
);

static PRIMITIVE_LINE_INDICES: BuiltInRule = primitive_indices(
    TypeRule::IntVectorArray {
        components: 2,
        width: 32,
    },
    ExecutionMode::OutputLinesEXT,
);

static PRIMITIVE_TRIANGLE_INDICES: BuiltInRule = primitive_indices(
    TypeRule::IntVectorArray {
        components: 3,
        width: 32,
    },
    ExecutionMode::OutputTrianglesEXT,
);

static CULL_PRIMITIVE: BuiltInRule = BuiltInRule {
    arrayed: true,
    per_primitive: PerPrimitive::Required,
    ..output(Models::Only(MESH_EXT), BOOL, capabilities!(MeshShadingEXT))
};

static TASK_COUNT_NV: BuiltInRule =
    output(Models::Only(&[M::TaskNV]), INT, capabilities!(MeshShadingNV));

static PRIMITIVE_COUNT_NV: BuiltInRule =
    output(Models::Only(&[M::MeshNV]), INT, capabilities!(MeshShadingNV));

static PRIMITIVE_INDICES_NV: BuiltInRule = output(
    Models::Only(&[M::MeshNV]),
    TypeRule::IntArray {
        length: None,
        width: 32,
    },
    capabilities!(MeshShadingNV),
);

static MESH_VIEW_COUNT_NV: BuiltInRule =
    input(Models::Only(&[M::MeshNV, M::TaskNV]), INT, capabilities!(MeshShadingNV));

static MESH_VIEW_INDICES_NV: BuiltInRule = input(
    Models::Only(&[M::MeshNV, M::TaskNV]),
    TypeRule::IntArray {
        length: None,
        width: 32,
    },
    capabilities!(MeshShadingNV),
);

// Ray tracing

static LAUNCH: BuiltInRule = input(
    Models::Only(RAY_TRACING),
    TypeRule::IntVector {
        count: 3,
        width: 32,
    },
    RAY_TRACING_CAPABILITIES,
);

static WORLD_RAY: BuiltInRule = input(
    Models::Only(RAY_TRAVERSAL),
    TypeRule::FloatVector {
        count: 3,
        width: 32,
    },
    RAY_TRACING_CAPABILITIES,
);

static OBJECT_RAY: BuiltInRule = input(
    Models::Only(RAY_HIT_GROUP),
    TypeRule::FloatVector {
        count: 3,
        width: 32,
    },
    RAY_TRACING_CAPABILITIES,
);

static RAY_T: BuiltInRule = input(Models::Only(RAY_TRAVERSAL), FLOAT, RAY_TRACING_CAPABILITIES);

static INCOMING_RAY_FLAGS: BuiltInRule =
    input(Models::Only(RAY_TRAVERSAL), INT, RAY_TRACING_CAPABILITIES);

static INSTANCE_CUSTOM_INDEX: BuiltInRule =
    input(Models::Only(RAY_HIT_GROUP), INT, RAY_TRACING_CAPABILITIES);

static INSTANCE_ID: BuiltInRule = input(Models::Only(RAY_HIT_GROUP), INT, capabilities!(Shader));

static RAY_GEOMETRY_INDEX: BuiltInRule =
    input(Models::Only(RAY_HIT_GROUP), INT, capabilities!(RayTracingKHR));

static RAY_TRANSFORM: BuiltInRule = input(
    Models::Only(RAY_HIT_GROUP),
    TypeRule::FloatMatrix {
        columns: 4,
        rows: 3,
        width: 32,
    },
    RAY_TRACING_CAPABILITIES,
);

static HIT_KIND: BuiltInRule = input(Models::Only(RAY_HIT), INT, RAY_TRACING_CAPABILITIES);

static HIT_T_NV: BuiltInRule = input(Models::Only(RAY_HIT), FLOAT, capabilities!(RayTracingNV));

static CURRENT_RAY_TIME_NV: BuiltInRule = input(
    Models::Only(RAY_TRAVERSAL),
    FLOAT,
    capabilities!(RayTracingMotionBlurNV),
);

static HIT_TRIANGLE_VERTEX_POSITIONS: BuiltInRule = input(
    Models::Only(RAY_HIT),
    TypeRule::FloatVectorArray {
        length: 3,
        components: 3,
        width: 32,
    },
    capabilities!(RayTracingPositionFetchKHR),
);

static CULL_MASK: BuiltInRule =
    input(Models::Only(RAY_TRAVERSAL), INT, capabilities!(RayCullMaskKHR));

// Vendor built-ins with no Vulkan valid usage of their own

static PER_VIEW_NV: BuiltInRule = BuiltInRule {
    models: Models::Only(&[
        M::Vertex,
        M::TessellationControl,
        M::TessellationEvaluation,
        M::Geometry,
        M::MeshNV,
    ]),
    storage_classes: Some(INPUT_OUTPUT),
    requires_one_of: capabilities!(PerViewAttributesNV, MeshShadingNV),
    ..BASE
};

static VIEWPORT_MASK_NV: BuiltInRule = output(
    Models::Only(&[
        M::Vertex,
        M::TessellationEvaluation,
        M::Geometry,
        M::MeshNV,
    ]),
    TypeRule::IntArray {
        length: None,
        width: 32,
    },
    capabilities!(ShaderViewportMaskNV, MeshShadingNV),
);

static SECONDARY_VIEW_NV: BuiltInRule = BuiltInRule {
    models: Models::Only(&[M::Vertex, M::TessellationEvaluation, M::Geometry]),
    storage_classes: Some(OUTPUT),
    requires_one_of: capabilities!(ShaderStereoViewNV),
    ..BASE
};

static SM_BUILTIN_NV: BuiltInRule = input(Models::Any, INT, capabilities!(ShaderSMBuiltinsNV));

static CORE_BUILTIN_ARM: BuiltInRule = input(Models::Any, INT, capabilities!(CoreBuiltinsARM));

/// Returns the rule of a built-in.
///
/// Returns `None` for the vendor built-ins that are not validated.
pub fn lookup(built_in: BuiltIn) -> Option<Registration> {
    let (rule, vuids): (&'static BuiltInRule, BuiltInVuids) = match built_in {
        BuiltIn::Position => (
            &POSITION,
            vuids!(Position {
                execution_model: [04318],
                storage_class: [04320],
                ty: [04321],
            } constraints: [[04319]]),
        ),
        BuiltIn::PointSize => (
            &POINT_SIZE,
            vuids!(PointSize {
                execution_model: [04314],
                storage_class: [04316],
                ty: [04317],
            } constraints: [[04315]]),
        ),
        BuiltIn::ClipDistance => (
            &CLIP_DISTANCE,
            vuids!(ClipDistance {
                execution_model: [04187],
                storage_class: [04190],
                ty: [04191],
            } constraints: [[04188], [04189]]),
        ),
        BuiltIn::CullDistance => (
            &CULL_DISTANCE,
            vuids!(CullDistance {
                execution_model: [04196],
                storage_class: [04199],
                ty: [04200],
            } constraints: [[04197], [04198]]),
        ),
        BuiltIn::VertexId => (&VERTEX_ID, NO_VUIDS),
        BuiltIn::InstanceId => (
            &INSTANCE_ID,
            vuids!(InstanceId {
                execution_model: [04254],
                storage_class: [04255],
                ty: [04256],
            }),
        ),
        BuiltIn::PrimitiveId => (
            &PRIMITIVE_ID,
            vuids!(PrimitiveId {
                execution_model: [04330],
                storage_class: [04334, 04336],
                ty: [04337],
                companion: [07040],
            } constraints: [[04334], [04336]]),
        ),
        BuiltIn::InvocationId => (
            &INVOCATION_ID,
            vuids!(InvocationId {
                execution_model: [04257],
                storage_class: [04258],
                ty: [04259],
            }),
        ),
        BuiltIn::Layer => (
            &LAYER,
            vuids!(Layer {
                execution_model: [04272],
                capability: [04273],
                storage_class: [04274, 04275],
                ty: [04276],
                companion: [07039],
            } constraints: [[04274], [04275]]),
        ),
        BuiltIn::ViewportIndex => (
            &VIEWPORT_INDEX,
            vuids!(ViewportIndex {
                execution_model: [04404],
                capability: [04405],
                storage_class: [04406, 04407],
                ty: [04408],
                companion: [07060],
            } constraints: [[04406], [04407]]),
        ),
        BuiltIn::TessLevelOuter => (
            &TESS_LEVEL_OUTER,
            vuids!(TessLevelOuter {
                execution_model: [04390],
                storage_class: [04391, 04392],
                ty: [04393],
                companion: [04391, 04392],
            } constraints: [[04391], [04392]]),
        ),
        BuiltIn::TessLevelInner => (
            &TESS_LEVEL_INNER,
            vuids!(TessLevelInner {
                execution_model: [04394],
                storage_class: [04395, 04396],
                ty: [04397],
                companion: [04395, 04396],
            } constraints: [[04395], [04396]]),
        ),
        BuiltIn::TessCoord => (
            &TESS_COORD,
            vuids!(TessCoord {
                execution_model: [04387],
                storage_class: [04388],
                ty: [04389],
            }),
        ),
        BuiltIn::PatchVertices => (
            &PATCH_VERTICES,
            vuids!(PatchVertices {
                execution_model: [04308],
                storage_class: [04309],
                ty: [04310],
            }),
        ),
        BuiltIn::FragCoord => (
            &FRAG_COORD,
            vuids!(FragCoord {
                execution_model: [04210],
                storage_class: [04211],
                ty: [04212],
            }),
        ),
        BuiltIn::PointCoord => (
            &POINT_COORD,
            vuids!(PointCoord {
                execution_model: [04311],
                storage_class: [04312],
                ty: [04313],
            }),
        ),
        BuiltIn::FrontFacing => (
            &FRAGMENT_BOOL,
            vuids!(FrontFacing {
                execution_model: [04229],
                storage_class: [04230],
                ty: [04231],
            }),
        ),
        BuiltIn::SampleId => (
            &SAMPLE_ID,
            vuids!(SampleId {
                execution_model: [04354],
                storage_class: [04355],
                ty: [04356],
            }),
        ),
        BuiltIn::SamplePosition => (
            &SAMPLE_POSITION,
            vuids!(SamplePosition {
                execution_model: [04360],
                storage_class: [04361],
                ty: [04362],
            }),
        ),
        BuiltIn::SampleMask => (
            &SAMPLE_MASK,
            vuids!(SampleMask {
                execution_model: [04357],
                storage_class: [04358],
                ty: [04359],
            }),
        ),
        BuiltIn::FragDepth => (
            &FRAG_DEPTH,
            vuids!(FragDepth {
                execution_model: [04213],
                storage_class: [04214],
                ty: [04215],
                execution_mode: [04216],
            }),
        ),
        BuiltIn::HelperInvocation => (
            &FRAGMENT_BOOL,
            vuids!(HelperInvocation {
                execution_model: [04239],
                storage_class: [04240],
                ty: [04241],
            }),
        ),
        BuiltIn::NumWorkgroups => (
            &COMPUTE_ID,
            vuids!(NumWorkgroups {
                execution_model: [04296],
                storage_class: [04297],
                ty: [04298],
            }),
        ),
        BuiltIn::WorkgroupSize => (
            &WORKGROUP_SIZE,
            vuids!(WorkgroupSize {
                execution_model: [04425],
                ty: [04427],
                constant: [04426],
            }),
        ),
        BuiltIn::WorkgroupId => (
            &COMPUTE_ID,
            vuids!(WorkgroupId {
                execution_model: [04422],
                storage_class: [04423],
                ty: [04424],
            }),
        ),
        BuiltIn::LocalInvocationId => (
            &COMPUTE_ID,
            vuids!(LocalInvocationId {
                execution_model: [04281],
                storage_class: [04282],
                ty: [04283],
            }),
        ),
        BuiltIn::GlobalInvocationId => (
            &COMPUTE_ID,
            vuids!(GlobalInvocationId {
                execution_model: [04236],
                storage_class: [04237],
                ty: [04238],
            }),
        ),
        BuiltIn::LocalInvocationIndex => (
            &LOCAL_INVOCATION_INDEX,
            vuids!(LocalInvocationIndex {
                execution_model: [04284],
                storage_class: [04285],
                ty: [04286],
            }),
        ),
        BuiltIn::WorkDim
        | BuiltIn::GlobalSize
        | BuiltIn::EnqueuedWorkgroupSize
        | BuiltIn::GlobalOffset
        | BuiltIn::GlobalLinearId
        | BuiltIn::SubgroupMaxSize
        | BuiltIn::NumEnqueuedSubgroups => (&KERNEL_ONLY, NO_VUIDS),
        BuiltIn::SubgroupSize => (
            &SUBGROUP_SCALAR,
            vuids!(SubgroupSize {
                storage_class: [04382],
                ty: [04383],
            }),
        ),
        BuiltIn::NumSubgroups => (
            &SUBGROUP_COUNT,
            vuids!(NumSubgroups {
                execution_model: [04293],
                storage_class: [04294],
                ty: [04295],
            }),
        ),
        BuiltIn::SubgroupId => (
            &SUBGROUP_COUNT,
            vuids!(SubgroupId {
                execution_model: [04367],
                storage_class: [04368],
                ty: [04369],
            }),
        ),
        BuiltIn::SubgroupLocalInvocationId => (
            &SUBGROUP_SCALAR,
            vuids!(SubgroupLocalInvocationId {
                storage_class: [04380],
                ty: [04381],
            }),
        ),
        BuiltIn::VertexIndex => (
            &VERTEX_INDEX,
            vuids!(VertexIndex {
                execution_model: [04398],
                storage_class: [04399],
                ty: [04400],
            }),
        ),
        BuiltIn::InstanceIndex => (
            &VERTEX_INDEX,
            vuids!(InstanceIndex {
                execution_model: [04263],
                storage_class: [04264],
                ty: [04265],
            }),
        ),
        BuiltIn::CoreIDARM
        | BuiltIn::CoreCountARM
        | BuiltIn::CoreMaxIDARM
        | BuiltIn::WarpIDARM
        | BuiltIn::WarpMaxIDARM => (&CORE_BUILTIN_ARM, NO_VUIDS),
        BuiltIn::SubgroupEqMask => (
            &SUBGROUP_MASK,
            vuids!(SubgroupEqMask {
                storage_class: [04370],
                ty: [04371],
            }),
        ),
        BuiltIn::SubgroupGeMask => (
            &SUBGROUP_MASK,
            vuids!(SubgroupGeMask {
                storage_class: [04372],
                ty: [04373],
            }),
        ),
        BuiltIn::SubgroupGtMask => (
            &SUBGROUP_MASK,
            vuids!(SubgroupGtMask {
                storage_class: [04374],
                ty: [04375],
            }),
        ),
        BuiltIn::SubgroupLeMask => (
            &SUBGROUP_MASK,
            vuids!(SubgroupLeMask {
                storage_class: [04376],
                ty: [04377],
            }),
        ),
        BuiltIn::SubgroupLtMask => (
            &SUBGROUP_MASK,
            vuids!(SubgroupLtMask {
                storage_class: [04378],
                ty: [04379],
            }),
        ),
        BuiltIn::BaseVertex => (
            &DRAW_PARAMETER,
            vuids!(BaseVertex {
                execution_model: [04184],
                storage_class: [04185],
                ty: [04186],
            }),
        ),
        BuiltIn::BaseInstance => (
            &DRAW_PARAMETER,
            vuids!(BaseInstance {
                execution_model: [04181],
                storage_class: [04182],
                ty: [04183],
            }),
        ),
        BuiltIn::DrawIndex => (
            &DRAW_INDEX,
            vuids!(DrawIndex {
                execution_model: [04207],
                storage_class: [04208],
                ty: [04209],
            }),
        ),
        BuiltIn::PrimitiveShadingRateKHR => (
            &PRIMITIVE_SHADING_RATE,
            vuids!(PrimitiveShadingRateKHR {
                execution_model: [04484],
                storage_class: [04485],
                ty: [04486],
                companion: [07059],
            }),
        ),
        BuiltIn::DeviceIndex => (
            &DEVICE_INDEX,
            vuids!(DeviceIndex {
                storage_class: [04205],
                ty: [04206],
            }),
        ),
        BuiltIn::ViewIndex => (
            &VIEW_INDEX,
            vuids!(ViewIndex {
                execution_model: [04401],
                storage_class: [04402],
                ty: [04403],
            }),
        ),
        BuiltIn::ShadingRateKHR => (
            &SHADING_RATE,
            vuids!(ShadingRateKHR {
                execution_model: [04490],
                storage_class: [04491],
                ty: [04492],
            }),
        ),
        BuiltIn::FragStencilRefEXT => (
            &FRAG_STENCIL_REF,
            vuids!(FragStencilRefEXT {
                execution_model: [04223],
                storage_class: [04224],
                ty: [04225],
            }),
        ),
        BuiltIn::ViewportMaskNV => (&VIEWPORT_MASK_NV, NO_VUIDS),
        BuiltIn::SecondaryPositionNV | BuiltIn::SecondaryViewportMaskNV => {
            (&SECONDARY_VIEW_NV, NO_VUIDS)
        }
        BuiltIn::PositionPerViewNV
        | BuiltIn::ViewportMaskPerViewNV
        | BuiltIn::ClipDistancePerViewNV
        | BuiltIn::CullDistancePerViewNV
        | BuiltIn::LayerPerViewNV => (&PER_VIEW_NV, NO_VUIDS),
        BuiltIn::FullyCoveredEXT => (
            &FULLY_COVERED,
            vuids!(FullyCoveredEXT {
                execution_model: [04232],
                storage_class: [04233],
                ty: [04234],
            }),
        ),
        BuiltIn::TaskCountNV => (&TASK_COUNT_NV, NO_VUIDS),
        BuiltIn::PrimitiveCountNV => (&PRIMITIVE_COUNT_NV, NO_VUIDS),
        BuiltIn::PrimitiveIndicesNV => (&PRIMITIVE_INDICES_NV, NO_VUIDS),
        BuiltIn::MeshViewCountNV => (
            &MESH_VIEW_COUNT_NV,
            vuids!(MeshViewCountNV {
                execution_model: [04287],
                storage_class: [04288],
                ty: [04289],
            }),
        ),
        BuiltIn::MeshViewIndicesNV => (
            &MESH_VIEW_INDICES_NV,
            vuids!(MeshViewIndicesNV {
                execution_model: [04290],
                storage_class: [04291],
                ty: [04292],
            }),
        ),
        BuiltIn::BaryCoordKHR => (
            &BARY_COORD,
            vuids!(BaryCoordKHR {
                execution_model: [04154],
                storage_class: [04155],
                ty: [04156],
            }),
        ),
        BuiltIn::BaryCoordNoPerspKHR => (
            &BARY_COORD,
            vuids!(BaryCoordNoPerspKHR {
                execution_model: [04160],
                storage_class: [04161],
                ty: [04162],
            }),
        ),
        BuiltIn::FragSizeEXT => (
            &FRAG_SIZE,
            vuids!(FragSizeEXT {
                execution_model: [04220],
                storage_class: [04221],
                ty: [04222],
            }),
        ),
        BuiltIn::FragInvocationCountEXT => (
            &FRAG_INVOCATION_COUNT,
            vuids!(FragInvocationCountEXT {
                execution_model: [04217],
                storage_class: [04218],
                ty: [04219],
            }),
        ),
        BuiltIn::PrimitivePointIndicesEXT => (
            &PRIMITIVE_POINT_INDICES,
            vuids!(PrimitivePointIndicesEXT {
                execution_model: [07041],
                storage_class: [07042],
                ty: [07043],
                member: [07042],
                execution_mode: [07046],
            }),
        ),
        BuiltIn::PrimitiveLineIndicesEXT => (
            &PRIMITIVE_LINE_INDICES,
            vuids!(PrimitiveLineIndicesEXT {
                execution_model: [07047],
                storage_class: [07048],
                ty: [07049],
                member: [07048],
                execution_mode: [07052],
            }),
        ),
        BuiltIn::PrimitiveTriangleIndicesEXT => (
            &PRIMITIVE_TRIANGLE_INDICES,
            vuids!(PrimitiveTriangleIndicesEXT {
                execution_model: [07053],
                storage_class: [07054],
                ty: [07055],
                member: [07054],
                execution_mode: [07058],
            }),
        ),
        BuiltIn::CullPrimitiveEXT => (
            &CULL_PRIMITIVE,
            vuids!(CullPrimitiveEXT {
                execution_model: [07034],
                storage_class: [07035],
                ty: [07036],
                companion: [07038],
            }),
        ),
        BuiltIn::LaunchIdKHR => (
            &LAUNCH,
            vuids!(LaunchIdKHR {
                execution_model: [04266],
                storage_class: [04267],
                ty: [04268],
            }),
        ),
        BuiltIn::LaunchSizeKHR => (
            &LAUNCH,
            vuids!(LaunchSizeKHR {
                execution_model: [04269],
                storage_class: [04270],
                ty: [04271],
            }),
        ),
        BuiltIn::WorldRayOriginKHR => (
            &WORLD_RAY,
            vuids!(WorldRayOriginKHR {
                execution_model: [04431],
                storage_class: [04432],
                ty: [04433],
            }),
        ),
        BuiltIn::WorldRayDirectionKHR => (
            &WORLD_RAY,
            vuids!(WorldRayDirectionKHR {
                execution_model: [04428],
                storage_class: [04429],
                ty: [04430],
            }),
        ),
        BuiltIn::ObjectRayOriginKHR => (
            &OBJECT_RAY,
            vuids!(ObjectRayOriginKHR {
                execution_model: [04302],
                storage_class: [04303],
                ty: [04304],
            }),
        ),
        BuiltIn::ObjectRayDirectionKHR => (
            &OBJECT_RAY,
            vuids!(ObjectRayDirectionKHR {
                execution_model: [04299],
                storage_class: [04300],
                ty: [04301],
            }),
        ),
        BuiltIn::RayTminKHR => (
            &RAY_T,
            vuids!(RayTminKHR {
                execution_model: [04351],
                storage_class: [04352],
                ty: [04353],
            }),
        ),
        BuiltIn::RayTmaxKHR => (
            &RAY_T,
            vuids!(RayTmaxKHR {
                execution_model: [04348],
                storage_class: [04349],
                ty: [04350],
            }),
        ),
        BuiltIn::InstanceCustomIndexKHR => (
            &INSTANCE_CUSTOM_INDEX,
            vuids!(InstanceCustomIndexKHR {
                execution_model: [04251],
                storage_class: [04252],
                ty: [04253],
            }),
        ),
        BuiltIn::ObjectToWorldKHR => (
            &RAY_TRANSFORM,
            vuids!(ObjectToWorldKHR {
                execution_model: [04305],
                storage_class: [04306],
                ty: [04307],
            }),
        ),
        BuiltIn::WorldToObjectKHR => (
            &RAY_TRANSFORM,
            vuids!(WorldToObjectKHR {
                execution_model: [04434],
                storage_class: [04435],
                ty: [04436],
            }),
        ),
        BuiltIn::HitTNV => (
            &HIT_T_NV,
            vuids!(HitTNV {
                execution_model: [04245],
                storage_class: [04246],
                ty: [04247],
            }),
        ),
        BuiltIn::HitKindKHR => (
            &HIT_KIND,
            vuids!(HitKindKHR {
                execution_model: [04242],
                storage_class: [04243],
                ty: [04244],
            }),
        ),
        BuiltIn::CurrentRayTimeNV => (&CURRENT_RAY_TIME_NV, NO_VUIDS),
        BuiltIn::HitTriangleVertexPositionsKHR => (
            &HIT_TRIANGLE_VERTEX_POSITIONS,
            vuids!(HitTriangleVertexPositionsKHR {
                execution_model: [08747],
                storage_class: [08748],
                ty: [08749],
            }),
        ),
        BuiltIn::IncomingRayFlagsKHR => (
            &INCOMING_RAY_FLAGS,
            vuids!(IncomingRayFlagsKHR {
                execution_model: [04248],
                storage_class: [04249],
                ty: [04250],
            }),
        ),
        BuiltIn::RayGeometryIndexKHR => (
            &RAY_GEOMETRY_INDEX,
            vuids!(RayGeometryIndexKHR {
                execution_model: [04345],
                storage_class: [04346],
                ty: [04347],
            }),
        ),
        BuiltIn::WarpsPerSMNV | BuiltIn::SMCountNV | BuiltIn::WarpIDNV | BuiltIn::SMIDNV => {
            (&SM_BUILTIN_NV, NO_VUIDS)
        }
        BuiltIn::CullMaskKHR => (
            &CULL_MASK,
            vuids!(CullMaskKHR {
                execution_model: [06735],
                storage_class: [06736],
                ty: [06737],
            }),
        ),
        BuiltIn::BaryCoordNoPerspAMD
        | BuiltIn::BaryCoordNoPerspCentroidAMD
        | BuiltIn::BaryCoordNoPerspSampleAMD
        | BuiltIn::BaryCoordSmoothAMD
        | BuiltIn::BaryCoordSmoothCentroidAMD
        | BuiltIn::BaryCoordSmoothSampleAMD
        | BuiltIn::BaryCoordPullModelAMD
        | BuiltIn::CoalescedInputCountAMDX
        | BuiltIn::ShaderIndexAMDX
        | BuiltIn::HitMicroTriangleVertexPositionsNV
        | BuiltIn::HitMicroTriangleVertexBarycentricsNV
        | BuiltIn::HitKindFrontFacingMicroTriangleNV
        | BuiltIn::HitKindBackFacingMicroTriangleNV => return None,
    };

    Some(Registration { rule, vuids })
}

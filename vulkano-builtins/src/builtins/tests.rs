// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{validate_builtins, BuiltInValidator};
use crate::{
    spirv::{assemble::assemble, ExecutionModel, Spirv},
    TargetEnvironment, ValidationError, ValidationOptions, Version, ViolationKind,
};

fn module(source: &str) -> Spirv {
    assemble(source, Version::V1_0).unwrap()
}

fn validate(source: &str) -> Result<(), Box<ValidationError>> {
    validate_builtins(&module(source), &ValidationOptions::default())
}

fn validate_for(
    source: &str,
    version: Version,
    target_environment: TargetEnvironment,
) -> Result<(), Box<ValidationError>> {
    validate_builtins(
        &assemble(source, version).unwrap(),
        &ValidationOptions {
            target_environment,
            ..Default::default()
        },
    )
}

fn clip_distance(storage_class: &str) -> String {
    format!(
        r#"
        OpCapability Shader
        OpCapability ClipDistance
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %clip
        OpDecorate %clip BuiltIn ClipDistance
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %uint = OpTypeInt 32 0
        %int = OpTypeInt 32 1
        %uint_4 = OpConstant %uint 4
        %int_0 = OpConstant %int 0
        %float_1 = OpConstant %float 1
        %float_arr = OpTypeArray %float %uint_4
        %ptr_arr = OpTypePointer {0} %float_arr
        %ptr_float = OpTypePointer {0} %float
        %clip = OpVariable %ptr_arr {0}
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %element = OpAccessChain %ptr_float %clip %int_0
        %value = OpLoad %float %element
        OpReturn
        OpFunctionEnd
        "#,
        storage_class,
    )
}

#[test]
fn clip_distance_output() {
    validate(&clip_distance("Output")).unwrap();
}

#[test]
fn clip_distance_input_in_vertex() {
    let err = validate(&clip_distance("Input")).unwrap_err();

    assert_eq!(err.kind, ViolationKind::WrongStorageClass);
    assert!(err.problem.contains(
        "to be used for variables with Input storage class if execution model is Vertex",
    ));
    assert!(err.has_any_vuid(&[
        "VUID-ClipDistance-ClipDistance-04188",
        "VUID-CullDistance-CullDistance-04197",
    ]));

    let attribution = err.attribution.as_ref().unwrap();
    assert_eq!(attribution.execution_model, ExecutionModel::Vertex);
    assert_eq!(attribution.entry_point_name, "main");
}

fn frag_depth(execution_modes: &str) -> String {
    format!(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Fragment %main "main" %depth
        OpExecutionMode %main OriginUpperLeft
        {}
        OpDecorate %depth BuiltIn FragDepth
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %ptr = OpTypePointer Output %float
        %depth = OpVariable %ptr Output
        %float_0 = OpConstant %float 0
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpStore %depth %float_0
        OpReturn
        OpFunctionEnd
        "#,
        execution_modes,
    )
}

#[test]
fn frag_depth_without_depth_replacing() {
    let err = validate(&frag_depth("")).unwrap_err();

    assert_eq!(err.kind, ViolationKind::MissingExecutionMode);
    assert!(err
        .problem
        .contains("requires DepthReplacing execution mode to be declared"));
    assert!(err.has_any_vuid(&["VUID-FragDepth-FragDepth-04216"]));
    // `OpStore` has no result ID.
    assert!(err.problem.contains("(OpStore) is referencing ID"));

    validate(&frag_depth("OpExecutionMode %main DepthReplacing")).unwrap();
}

fn workgroup_size(declaration: &str) -> String {
    format!(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint GLCompute %main "main"
        OpExecutionMode %main LocalSize 1 1 1
        OpDecorate %size BuiltIn WorkgroupSize
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %uint = OpTypeInt 32 0
        %v2uint = OpTypeVector %uint 2
        %v3uint = OpTypeVector %uint 3
        %uint_1 = OpConstant %uint 1
        %v3uint_1 = OpConstantComposite %v3uint %uint_1 %uint_1 %uint_1
        %ptr_v3uint = OpTypePointer Input %v3uint
        {}
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpReturn
        OpFunctionEnd
        "#,
        declaration,
    )
}

#[test]
fn workgroup_size_component_count() {
    let err = validate(&workgroup_size(
        "%size = OpConstantComposite %v2uint %uint_1 %uint_1",
    ))
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::WrongTypeCount);
    assert_eq!(
        err.problem,
        "According to the Vulkan spec BuiltIn WorkgroupSize variable needs to be a 3-component \
        32-bit int vector. ID 2 (OpConstantComposite) has 2 components.",
    );
    assert!(err.has_any_vuid(&["VUID-WorkgroupSize-WorkgroupSize-04427"]));

    validate(&workgroup_size(
        "%size = OpConstantComposite %v3uint %uint_1 %uint_1 %uint_1",
    ))
    .unwrap();
    validate(&workgroup_size(
        "%size = OpSpecConstantComposite %v3uint %uint_1 %uint_1 %uint_1",
    ))
    .unwrap();
}

#[test]
fn workgroup_size_on_variable() {
    let err = validate(&workgroup_size("%size = OpVariable %ptr_v3uint Input")).unwrap_err();

    assert_eq!(err.kind, ViolationKind::InvalidConstantTarget);
    assert!(err.problem.ends_with("ID 2 (OpVariable) is not a constant."));
    assert!(err.has_any_vuid(&["VUID-WorkgroupSize-WorkgroupSize-04426"]));
}

#[test]
fn workgroup_size_on_copy() {
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint GLCompute %main "main"
        OpExecutionMode %main LocalSize 1 1 1
        OpDecorate %copy BuiltIn WorkgroupSize
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %uint = OpTypeInt 32 0
        %v3uint = OpTypeVector %uint 3
        %uint_1 = OpConstant %uint 1
        %v3uint_1 = OpConstantComposite %v3uint %uint_1 %uint_1 %uint_1
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %copy = OpCopyObject %v3uint %v3uint_1
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::InvalidDecorationTarget);
    assert!(err
        .problem
        .starts_with("BuiltIns can only target variables, structure members or constants."));
    assert!(err.problem.contains("(OpCopyObject)"));
    assert!(err.vuids.is_empty());
}

const SHARED_POSITION_BLOCK: &str = r#"
    OpCapability Shader
    OpMemoryModel Logical GLSL450
    OpEntryPoint Vertex %vert "vert" %out
    OpEntryPoint Fragment %frag "frag" %in
    OpExecutionMode %frag OriginUpperLeft
    OpMemberDecorate %block 0 BuiltIn Position
    OpDecorate %block Block
    %void = OpTypeVoid
    %fn = OpTypeFunction %void
    %float = OpTypeFloat 32
    %v4float = OpTypeVector %float 4
    %block = OpTypeStruct %v4float
    %ptr_out_block = OpTypePointer Output %block
    %ptr_in_block = OpTypePointer Input %block
    %ptr_out_v4 = OpTypePointer Output %v4float
    %ptr_in_v4 = OpTypePointer Input %v4float
    %out = OpVariable %ptr_out_block Output
    %in = OpVariable %ptr_in_block Input
    %int = OpTypeInt 32 1
    %int_0 = OpConstant %int 0
    %zero = OpConstantNull %v4float
    %vert = OpFunction %void None %fn
    %vert_entry = OpLabel
    %vert_position = OpAccessChain %ptr_out_v4 %out %int_0
    OpStore %vert_position %zero
    OpReturn
    OpFunctionEnd
    %frag = OpFunction %void None %fn
    %frag_entry = OpLabel
    %frag_position = OpAccessChain %ptr_in_v4 %in %int_0
    %value = OpLoad %v4float %frag_position
    OpReturn
    OpFunctionEnd
"#;

#[test]
fn shared_block_attributed_to_fragment() {
    let err = validate(SHARED_POSITION_BLOCK).unwrap_err();

    assert_eq!(err.kind, ViolationKind::WrongExecutionModel);
    assert!(err.problem.starts_with(
        "Vulkan spec allows BuiltIn Position to be used only with Vertex, TessellationControl, \
        TessellationEvaluation, Geometry, MeshNV or MeshEXT execution models.",
    ));
    assert!(err.problem.contains("(OpAccessChain) is referencing ID"));
    assert!(err.problem.contains("(OpVariable) which is dependent on ID"));
    assert!(err
        .problem
        .contains("(OpTypeStruct) which is decorated with BuiltIn Position"));
    assert!(err
        .problem
        .ends_with("called with execution model Fragment."));
    assert!(err.has_any_vuid(&["VUID-Position-Position-04318"]));

    let attribution = err.attribution.as_ref().unwrap();
    assert_eq!(attribution.execution_model, ExecutionModel::Fragment);
    assert_eq!(attribution.entry_point_name, "frag");
    assert_eq!(attribution.function, attribution.entry_point);
}

fn frag_coord(type_declarations: &str, ty: &str) -> String {
    format!(
        r#"
        OpCapability Shader
        OpCapability Float64
        OpMemoryModel Logical GLSL450
        OpEntryPoint Fragment %main "main" %coord
        OpExecutionMode %main OriginUpperLeft
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        {0}
        %ptr = OpTypePointer Input {1}
        %coord = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad {1} %coord
        OpReturn
        OpFunctionEnd
        "#,
        type_declarations, ty,
    )
}

#[test]
fn type_mismatch_tiers() {
    validate(&frag_coord(
        "%float = OpTypeFloat 32\n%v4float = OpTypeVector %float 4",
        "%v4float",
    ))
    .unwrap();

    let err = validate(&frag_coord(
        "%float = OpTypeFloat 32\n%v3float = OpTypeVector %float 3",
        "%v3float",
    ))
    .unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongTypeCount);
    assert!(err.problem.ends_with("has 3 components."));
    assert!(err.has_any_vuid(&["VUID-FragCoord-FragCoord-04212"]));

    let err = validate(&frag_coord(
        "%double = OpTypeFloat 64\n%v4double = OpTypeVector %double 4",
        "%v4double",
    ))
    .unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongTypeWidth);
    assert!(err.problem.ends_with("has components with bit width 64."));

    let err = validate(&frag_coord(
        "%int = OpTypeInt 32 1\n%v4int = OpTypeVector %int 4",
        "%v4int",
    ))
    .unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongTypeKind);
    assert!(err.problem.ends_with("is not a float vector."));
    assert!(!err.problem.contains("components"));
}

#[test]
fn execution_model_and_storage_class() {
    let vertex = r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %coord
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %v4float = OpTypeVector %float 4
        %ptr = OpTypePointer Input %v4float
        %coord = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %v4float %coord
        OpReturn
        OpFunctionEnd
    "#;
    let err = validate(vertex).unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongExecutionModel);
    assert!(err.problem.starts_with(
        "Vulkan spec allows BuiltIn FragCoord to be used only with Fragment execution model.",
    ));
    assert!(err.has_any_vuid(&["VUID-FragCoord-FragCoord-04210"]));

    let output = r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Fragment %main "main" %coord
        OpExecutionMode %main OriginUpperLeft
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %v4float = OpTypeVector %float 4
        %ptr = OpTypePointer Output %v4float
        %coord = OpVariable %ptr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %v4float %coord
        OpReturn
        OpFunctionEnd
    "#;
    let err = validate(output).unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongStorageClass);
    assert!(err.problem.starts_with(
        "Vulkan spec allows BuiltIn FragCoord to be only used for variables with Input storage \
        class.",
    ));
    assert!(err.has_any_vuid(&["VUID-FragCoord-FragCoord-04211"]));
}

#[test]
fn unused_targets_get_context_free_checks() {
    // Wrong storage class, but no entry point uses it.
    validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Fragment %main "main"
        OpExecutionMode %main OriginUpperLeft
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %v4float = OpTypeVector %float 4
        %ptr = OpTypePointer Output %v4float
        %coord = OpVariable %ptr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap();

    // Wrong type is reported even so.
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Fragment %main "main"
        OpExecutionMode %main OriginUpperLeft
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %ptr = OpTypePointer Input %float
        %coord = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongTypeKind);
    assert!(err.attribution.is_none());
}

#[test]
fn unused_targets_skip_capabilities() {
    // Neither listed in the interface nor accessed, and `ClipDistance` isn't declared.
    let unused = r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main"
        OpDecorate %clip BuiltIn ClipDistance
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %uint = OpTypeInt 32 0
        %uint_4 = OpConstant %uint 4
        %float_arr = OpTypeArray %float %uint_4
        %ptr_arr = OpTypePointer Output %float_arr
        %clip = OpVariable %ptr_arr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpReturn
        OpFunctionEnd
    "#;

    validate(unused).unwrap();
    validate_for(
        unused,
        Version::V1_0,
        TargetEnvironment::Universal(Version::V1_0),
    )
    .unwrap();
}

#[test]
fn missing_capability() {
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Fragment %main "main" %sample
        OpExecutionMode %main OriginUpperLeft
        OpDecorate %sample BuiltIn SampleId
        OpDecorate %sample Flat
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %ptr = OpTypePointer Input %int
        %sample = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %int %sample
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::MissingCapabilityOrExtension);
    assert_eq!(err.requires_one_of.len(), 1);
    assert!(err
        .to_string()
        .contains("requires one of: SPIR-V capability `SampleRateShading`"));
}

fn layer_in_vertex(capability: &str) -> String {
    format!(
        r#"
        OpCapability Shader
        OpCapability {}
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %layer
        OpDecorate %layer BuiltIn Layer
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %int_1 = OpConstant %int 1
        %ptr = OpTypePointer Output %int
        %layer = OpVariable %ptr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpStore %layer %int_1
        OpReturn
        OpFunctionEnd
        "#,
        capability,
    )
}

#[test]
fn layer_in_vertex_shader() {
    let err = validate(&layer_in_vertex("ShaderLayer")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingCapabilityOrExtension);
    assert!(err
        .problem
        .contains("to be used with execution model Vertex without declaring"));
    assert_eq!(err.requires_one_of.len(), 2);
    assert!(err.has_any_vuid(&["VUID-Layer-Layer-04273"]));

    validate_for(
        &layer_in_vertex("ShaderLayer"),
        Version::V1_5,
        TargetEnvironment::Vulkan(Version::V1_2),
    )
    .unwrap();
    validate(&layer_in_vertex("ShaderViewportIndexLayerEXT")).unwrap();

    // Allowed by the grammar, but not in vertex shaders.
    let err = validate(&layer_in_vertex("Geometry")).unwrap_err();
    assert!(err.has_any_vuid(&["VUID-Layer-Layer-04273"]));
}

fn tess_level_outer(decorations: &str) -> String {
    format!(
        r#"
        OpCapability Tessellation
        OpMemoryModel Logical GLSL450
        OpEntryPoint TessellationControl %main "main" %levels
        OpExecutionMode %main OutputVertices 3
        OpDecorate %levels BuiltIn TessLevelOuter
        {}
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %uint = OpTypeInt 32 0
        %int = OpTypeInt 32 1
        %uint_4 = OpConstant %uint 4
        %int_0 = OpConstant %int 0
        %float_1 = OpConstant %float 1
        %float_arr = OpTypeArray %float %uint_4
        %ptr_arr = OpTypePointer Output %float_arr
        %ptr_float = OpTypePointer Output %float
        %levels = OpVariable %ptr_arr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %level = OpAccessChain %ptr_float %levels %int_0
        OpStore %level %float_1
        OpReturn
        OpFunctionEnd
        "#,
        decorations,
    )
}

#[test]
fn tess_level_needs_patch() {
    let err = validate(&tess_level_outer("")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingCompanionDecoration);
    assert!(err.problem.starts_with(
        "Vulkan spec requires BuiltIn TessLevelOuter to be decorated with Patch.",
    ));
    assert!(err.has_any_vuid(&["VUID-TessLevelOuter-TessLevelOuter-04391"]));

    validate(&tess_level_outer("OpDecorate %levels Patch")).unwrap();
}

fn mesh_primitive_id(decorations: &str) -> String {
    format!(
        r#"
        OpCapability MeshShadingEXT
        OpExtension "SPV_EXT_mesh_shader"
        OpMemoryModel Logical GLSL450
        OpEntryPoint MeshEXT %main "main" %primitive_ids
        OpExecutionMode %main LocalSize 1 1 1
        OpExecutionMode %main OutputVertices 3
        OpExecutionMode %main OutputPrimitivesEXT 1
        OpExecutionMode %main OutputTrianglesEXT
        OpDecorate %primitive_ids BuiltIn PrimitiveId
        {}
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %uint = OpTypeInt 32 0
        %uint_1 = OpConstant %uint 1
        %int_0 = OpConstant %int 0
        %int_arr = OpTypeArray %int %uint_1
        %ptr_arr = OpTypePointer Output %int_arr
        %ptr_int = OpTypePointer Output %int
        %primitive_ids = OpVariable %ptr_arr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %primitive_id = OpAccessChain %ptr_int %primitive_ids %int_0
        OpStore %primitive_id %int_0
        OpReturn
        OpFunctionEnd
        "#,
        decorations,
    )
}

#[test]
fn mesh_outputs_per_primitive() {
    let err = validate(&mesh_primitive_id("")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingCompanionDecoration);
    assert!(err.problem.contains("PerPrimitiveEXT"));
    assert!(err.has_any_vuid(&["VUID-PrimitiveId-PrimitiveId-07040"]));

    validate(&mesh_primitive_id("OpDecorate %primitive_ids PerPrimitiveEXT")).unwrap();
}

fn triangle_indices(output_mode: &str) -> String {
    format!(
        r#"
        OpCapability MeshShadingEXT
        OpExtension "SPV_EXT_mesh_shader"
        OpMemoryModel Logical GLSL450
        OpEntryPoint MeshEXT %main "main" %indices
        OpExecutionMode %main LocalSize 1 1 1
        OpExecutionMode %main {}
        OpDecorate %indices BuiltIn PrimitiveTriangleIndicesEXT
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %uint = OpTypeInt 32 0
        %int = OpTypeInt 32 1
        %v3uint = OpTypeVector %uint 3
        %uint_1 = OpConstant %uint 1
        %int_0 = OpConstant %int 0
        %indices_arr = OpTypeArray %v3uint %uint_1
        %ptr_arr = OpTypePointer Output %indices_arr
        %ptr_v3uint = OpTypePointer Output %v3uint
        %indices = OpVariable %ptr_arr Output
        %zero = OpConstantNull %v3uint
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %triangle = OpAccessChain %ptr_v3uint %indices %int_0
        OpStore %triangle %zero
        OpReturn
        OpFunctionEnd
        "#,
        output_mode,
    )
}

#[test]
fn primitive_indices_need_output_mode() {
    validate(&triangle_indices("OutputTrianglesEXT")).unwrap();

    let err = validate(&triangle_indices("OutputPoints")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingExecutionMode);
    assert!(err.problem.starts_with(
        "Vulkan spec requires OutputTrianglesEXT execution mode to be declared when using \
        BuiltIn PrimitiveTriangleIndicesEXT.",
    ));
    assert!(err.has_any_vuid(&[
        "VUID-PrimitiveTriangleIndicesEXT-PrimitiveTriangleIndicesEXT-07058",
    ]));
}

#[test]
fn per_vertex_arrays() {
    validate(
        r#"
        OpCapability Geometry
        OpMemoryModel Logical GLSL450
        OpEntryPoint Geometry %main "main" %sizes
        OpExecutionMode %main Triangles
        OpExecutionMode %main Invocations 1
        OpExecutionMode %main OutputTriangleStrip
        OpExecutionMode %main OutputVertices 3
        OpDecorate %sizes BuiltIn PointSize
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %uint = OpTypeInt 32 0
        %int = OpTypeInt 32 1
        %uint_3 = OpConstant %uint 3
        %int_0 = OpConstant %int 0
        %float_arr = OpTypeArray %float %uint_3
        %ptr_arr = OpTypePointer Input %float_arr
        %ptr_float = OpTypePointer Input %float
        %sizes = OpVariable %ptr_arr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %size = OpAccessChain %ptr_float %sizes %int_0
        %value = OpLoad %float %size
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap();
}

#[test]
fn duplicate_built_in() {
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %index
        OpDecorate %index BuiltIn VertexIndex
        OpDecorate %index BuiltIn InstanceIndex
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %ptr = OpTypePointer Input %int
        %index = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::InvalidDecorationTarget);
    assert!(err.problem.ends_with(
        "is decorated with BuiltIn InstanceIndex, but it is already decorated with BuiltIn \
        VertexIndex.",
    ));
}

#[test]
fn unruled_built_ins_are_skipped() {
    validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %bary
        OpDecorate %bary BuiltIn BaryCoordSmoothAMD
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %ptr = OpTypePointer Output %int
        %bary = OpVariable %ptr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %int %bary
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap();
}

#[test]
fn other_environments_only_check_capabilities() {
    let fragment_only = r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %coord
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %ptr = OpTypePointer Output %float
        %coord = OpVariable %ptr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %float %coord
        OpReturn
        OpFunctionEnd
    "#;

    for environment in [
        TargetEnvironment::Universal(Version::V1_0),
        TargetEnvironment::OpenGL(Version::major_minor(4, 5)),
    ] {
        validate_for(fragment_only, Version::V1_0, environment).unwrap();
    }

    let err = validate_for(
        &clip_distance("Output").replace("OpCapability ClipDistance", ""),
        Version::V1_0,
        TargetEnvironment::Universal(Version::V1_0),
    )
    .unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingCapabilityOrExtension);
    assert!(err.problem.starts_with("SPIR-V spec doesn't allow BuiltIn ClipDistance"));
}

#[test]
fn spirv_version_too_new() {
    let spirv = assemble(&frag_depth("OpExecutionMode %main DepthReplacing"), Version::V1_3).unwrap();

    let err = BuiltInValidator::new(&spirv, &ValidationOptions::default()).unwrap_err();
    assert_eq!(err.kind, ViolationKind::UnsupportedSpirvVersion);
    assert_eq!(
        err.problem,
        "Vulkan 1.0 doesn't support SPIR-V version 1.3; the newest supported version is 1.0.",
    );

    validate_for(
        &frag_depth("OpExecutionMode %main DepthReplacing"),
        Version::V1_3,
        TargetEnvironment::Vulkan(Version::V1_1),
    )
    .unwrap();
}

#[test]
fn idempotent() {
    let spirv = module(SHARED_POSITION_BLOCK);
    let validator = BuiltInValidator::new(&spirv, &ValidationOptions::default()).unwrap();

    let first = validator.validate().unwrap_err();
    let second = validator.validate().unwrap_err();
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.attribution, second.attribution);
    assert_eq!(
        validate_builtins(&spirv, &ValidationOptions::default())
            .unwrap_err()
            .to_string(),
        first.to_string(),
    );
}

#[test]
fn execution_model_before_type() {
    // Wrong execution model, storage class and type at once.
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %coord
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %ptr = OpTypePointer Output %float
        %coord = OpVariable %ptr Output
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %float %coord
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::WrongExecutionModel);
    assert!(err.has_any_vuid(&["VUID-FragCoord-FragCoord-04210"]));
    assert!(!err.problem.contains("needs to be"));
    assert!(!err.problem.contains("storage class"));
}

#[test]
fn built_in_forbidden_everywhere() {
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %vertex_id
        OpDecorate %vertex_id BuiltIn VertexId
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %ptr = OpTypePointer Input %int
        %vertex_id = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %int %vertex_id
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::WrongExecutionModel);
    assert!(err
        .problem
        .starts_with("Vulkan spec doesn't allow BuiltIn VertexId to be used."));
    assert!(err.vuids.is_empty());
}

fn view_index(execution_model: &str, declarations: &str) -> String {
    format!(
        r#"
        OpCapability Shader
        {1}
        OpMemoryModel Logical GLSL450
        OpEntryPoint {0} %main "main" %view
        OpDecorate %view BuiltIn ViewIndex
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %int = OpTypeInt 32 1
        %ptr = OpTypePointer Input %int
        %view = OpVariable %ptr Input
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %value = OpLoad %int %view
        OpReturn
        OpFunctionEnd
        "#,
        execution_model, declarations,
    )
}

#[test]
fn view_index_outside_compute() {
    validate(&view_index("Fragment", "OpCapability MultiView")).unwrap();

    let err = validate(&view_index("GLCompute", "OpCapability MultiView")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::WrongExecutionModel);
    assert!(err.problem.starts_with(
        "Vulkan spec doesn't allow BuiltIn ViewIndex to be used with execution model GLCompute.",
    ));
    assert!(err.has_any_vuid(&["VUID-ViewIndex-ViewIndex-04401"]));
}

#[test]
fn extension_enables_built_in() {
    validate(&view_index("Fragment", r#"OpExtension "SPV_KHR_multiview""#)).unwrap();

    let err = validate(&view_index("Fragment", "")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingCapabilityOrExtension);
    assert_eq!(err.requires_one_of.len(), 2);
    assert!(err.to_string().contains(
        "requires one of: SPIR-V capability `MultiView` or SPIR-V extension `SPV_KHR_multiview`",
    ));
}

#[test]
fn nested_call_attribution() {
    let err = validate(
        r#"
        OpCapability Shader
        OpMemoryModel Logical GLSL450
        OpEntryPoint Vertex %main "main" %coord
        OpDecorate %coord BuiltIn FragCoord
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %v4float = OpTypeVector %float 4
        %ptr = OpTypePointer Input %v4float
        %coord = OpVariable %ptr Input
        %inner = OpFunction %void None %fn
        %inner_entry = OpLabel
        %value = OpLoad %v4float %coord
        OpReturn
        OpFunctionEnd
        %helper = OpFunction %void None %fn
        %helper_entry = OpLabel
        %call_inner = OpFunctionCall %void %inner
        OpReturn
        OpFunctionEnd
        %main = OpFunction %void None %fn
        %main_entry = OpLabel
        %call_helper = OpFunctionCall %void %helper
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::WrongExecutionModel);
    assert!(err.problem.ends_with(
        "ID 10 (OpLoad) is referencing ID 2 (OpVariable) which is decorated with BuiltIn \
        FragCoord in function 8 called with execution model Vertex.",
    ));

    let attribution = err.attribution.as_ref().unwrap();
    assert_eq!(attribution.entry_point.as_raw(), 1);
    assert_eq!(attribution.function.as_raw(), 8);
    assert_eq!(attribution.execution_model, ExecutionModel::Vertex);
}

#[test]
fn built_in_as_member_forbidden() {
    let err = validate(
        r#"
        OpCapability MeshShadingEXT
        OpExtension "SPV_EXT_mesh_shader"
        OpMemoryModel Logical GLSL450
        OpEntryPoint MeshEXT %main "main" %block_var
        OpExecutionMode %main LocalSize 1 1 1
        OpExecutionMode %main OutputTrianglesEXT
        OpMemberDecorate %block 0 BuiltIn PrimitiveTriangleIndicesEXT
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %uint = OpTypeInt 32 0
        %int = OpTypeInt 32 1
        %v3uint = OpTypeVector %uint 3
        %uint_1 = OpConstant %uint 1
        %int_0 = OpConstant %int 0
        %indices_arr = OpTypeArray %v3uint %uint_1
        %block = OpTypeStruct %indices_arr
        %ptr_block = OpTypePointer Output %block
        %ptr_arr = OpTypePointer Output %indices_arr
        %block_var = OpVariable %ptr_block Output
        %zero = OpConstantNull %indices_arr
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %indices = OpAccessChain %ptr_arr %block_var %int_0
        OpStore %indices %zero
        OpReturn
        OpFunctionEnd
        "#,
    )
    .unwrap_err();

    assert_eq!(err.kind, ViolationKind::BuiltInAsMemberForbidden);
    assert!(err.problem.starts_with(
        "Vulkan spec doesn't allow BuiltIn PrimitiveTriangleIndicesEXT to be used as a structure \
        member decoration.",
    ));
    assert!(err.has_any_vuid(&[
        "VUID-PrimitiveTriangleIndicesEXT-PrimitiveTriangleIndicesEXT-07054",
    ]));
}

fn mesh_positions(decorations: &str) -> String {
    format!(
        r#"
        OpCapability MeshShadingEXT
        OpExtension "SPV_EXT_mesh_shader"
        OpMemoryModel Logical GLSL450
        OpEntryPoint MeshEXT %main "main" %positions
        OpExecutionMode %main LocalSize 1 1 1
        OpExecutionMode %main OutputVertices 3
        OpExecutionMode %main OutputPrimitivesEXT 1
        OpExecutionMode %main OutputTrianglesEXT
        OpDecorate %positions BuiltIn Position
        {}
        %void = OpTypeVoid
        %fn = OpTypeFunction %void
        %float = OpTypeFloat 32
        %v4float = OpTypeVector %float 4
        %uint = OpTypeInt 32 0
        %int = OpTypeInt 32 1
        %uint_3 = OpConstant %uint 3
        %int_0 = OpConstant %int 0
        %v4float_arr = OpTypeArray %v4float %uint_3
        %ptr_arr = OpTypePointer Output %v4float_arr
        %ptr_v4float = OpTypePointer Output %v4float
        %positions = OpVariable %ptr_arr Output
        %zero = OpConstantNull %v4float
        %main = OpFunction %void None %fn
        %entry = OpLabel
        %position = OpAccessChain %ptr_v4float %positions %int_0
        OpStore %position %zero
        OpReturn
        OpFunctionEnd
        "#,
        decorations,
    )
}

#[test]
fn per_vertex_outputs_not_per_primitive() {
    validate(&mesh_positions("")).unwrap();

    let err = validate(&mesh_positions("OpDecorate %positions PerPrimitiveEXT")).unwrap_err();
    assert_eq!(err.kind, ViolationKind::MissingCompanionDecoration);
    assert!(err.problem.starts_with(
        "Vulkan spec doesn't allow BuiltIn Position to be decorated with PerPrimitiveEXT.",
    ));
    assert!(err.vuids.is_empty());
    assert_eq!(
        err.attribution.as_ref().unwrap().execution_model,
        ExecutionModel::MeshEXT,
    );
}

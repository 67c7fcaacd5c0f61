// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::Operand;
use crate::macros::spirv_enum;

spirv_enum! {
    /// The pipeline stage or kernel kind that an entry point executes as.
    ExecutionModel;

    Vertex = 0,
    TessellationControl = 1,
    TessellationEvaluation = 2,
    Geometry = 3,
    Fragment = 4,
    GLCompute = 5,
    Kernel = 6,
    TaskNV = 5267,
    MeshNV = 5268,
    RayGenerationKHR = 5313 | RayGenerationNV,
    IntersectionKHR = 5314 | IntersectionNV,
    AnyHitKHR = 5315 | AnyHitNV,
    ClosestHitKHR = 5316 | ClosestHitNV,
    MissKHR = 5317 | MissNV,
    CallableKHR = 5318 | CallableNV,
    TaskEXT = 5364,
    MeshEXT = 5365,
}

impl ExecutionModel {
    /// Returns whether the execution model is one of the ray tracing stages.
    #[inline]
    pub fn is_ray_tracing(self) -> bool {
        matches!(
            self,
            Self::RayGenerationKHR
                | Self::IntersectionKHR
                | Self::AnyHitKHR
                | Self::ClosestHitKHR
                | Self::MissKHR
                | Self::CallableKHR
        )
    }
}

spirv_enum! {
    AddressingModel;

    Logical = 0,
    Physical32 = 1,
    Physical64 = 2,
    PhysicalStorageBuffer64 = 5348 | PhysicalStorageBuffer64EXT,
}

spirv_enum! {
    MemoryModel;

    Simple = 0,
    GLSL450 = 1,
    OpenCL = 2,
    Vulkan = 3 | VulkanKHR,
}

spirv_enum! {
    /// The memory space that a variable lives in.
    StorageClass;

    UniformConstant = 0,
    Input = 1,
    Uniform = 2,
    Output = 3,
    Workgroup = 4,
    CrossWorkgroup = 5,
    Private = 6,
    Function = 7,
    Generic = 8,
    PushConstant = 9,
    AtomicCounter = 10,
    Image = 11,
    StorageBuffer = 12,
    TileImageEXT = 4172,
    NodePayloadAMDX = 5068,
    CallableDataKHR = 5328 | CallableDataNV,
    IncomingCallableDataKHR = 5329 | IncomingCallableDataNV,
    RayPayloadKHR = 5338 | RayPayloadNV,
    HitAttributeKHR = 5339 | HitAttributeNV,
    IncomingRayPayloadKHR = 5342 | IncomingRayPayloadNV,
    ShaderRecordBufferKHR = 5343 | ShaderRecordBufferNV,
    PhysicalStorageBuffer = 5349 | PhysicalStorageBufferEXT,
    HitObjectAttributeNV = 5385,
    TaskPayloadWorkgroupEXT = 5402,
    CodeSectionINTEL = 5605,
    DeviceOnlyINTEL = 5936,
    HostOnlyINTEL = 5937,
}

spirv_enum! {
    /// A capability that a module can declare with `OpCapability`.
    Capability;

    Matrix = 0,
    Shader = 1,
    Geometry = 2,
    Tessellation = 3,
    Addresses = 4,
    Linkage = 5,
    Kernel = 6,
    Vector16 = 7,
    Float16Buffer = 8,
    Float16 = 9,
    Float64 = 10,
    Int64 = 11,
    Int64Atomics = 12,
    ImageBasic = 13,
    ImageReadWrite = 14,
    ImageMipmap = 15,
    Pipes = 17,
    Groups = 18,
    DeviceEnqueue = 19,
    LiteralSampler = 20,
    AtomicStorage = 21,
    Int16 = 22,
    TessellationPointSize = 23,
    GeometryPointSize = 24,
    ImageGatherExtended = 25,
    StorageImageMultisample = 27,
    UniformBufferArrayDynamicIndexing = 28,
    SampledImageArrayDynamicIndexing = 29,
    StorageBufferArrayDynamicIndexing = 30,
    StorageImageArrayDynamicIndexing = 31,
    ClipDistance = 32,
    CullDistance = 33,
    ImageCubeArray = 34,
    SampleRateShading = 35,
    ImageRect = 36,
    SampledRect = 37,
    GenericPointer = 38,
    Int8 = 39,
    InputAttachment = 40,
    SparseResidency = 41,
    MinLod = 42,
    Sampled1D = 43,
    Image1D = 44,
    SampledCubeArray = 45,
    SampledBuffer = 46,
    ImageBuffer = 47,
    ImageMSArray = 48,
    StorageImageExtendedFormats = 49,
    ImageQuery = 50,
    DerivativeControl = 51,
    InterpolationFunction = 52,
    TransformFeedback = 53,
    GeometryStreams = 54,
    StorageImageReadWithoutFormat = 55,
    StorageImageWriteWithoutFormat = 56,
    MultiViewport = 57,
    SubgroupDispatch = 58,
    NamedBarrier = 59,
    PipeStorage = 60,
    GroupNonUniform = 61,
    GroupNonUniformVote = 62,
    GroupNonUniformArithmetic = 63,
    GroupNonUniformBallot = 64,
    GroupNonUniformShuffle = 65,
    GroupNonUniformShuffleRelative = 66,
    GroupNonUniformClustered = 67,
    GroupNonUniformQuad = 68,
    ShaderLayer = 69,
    ShaderViewportIndex = 70,
    UniformDecoration = 71,
    CoreBuiltinsARM = 4165,
    FragmentShadingRateKHR = 4422,
    SubgroupBallotKHR = 4423,
    DrawParameters = 4427,
    WorkgroupMemoryExplicitLayoutKHR = 4428,
    SubgroupVoteKHR = 4431,
    StorageBuffer16BitAccess = 4433 | StorageUniformBufferBlock16,
    UniformAndStorageBuffer16BitAccess = 4434 | StorageUniform16,
    StoragePushConstant16 = 4435,
    StorageInputOutput16 = 4436,
    DeviceGroup = 4437,
    MultiView = 4439,
    VariablePointersStorageBuffer = 4441,
    VariablePointers = 4442,
    AtomicStorageOps = 4445,
    SampleMaskPostDepthCoverage = 4447,
    StorageBuffer8BitAccess = 4448,
    UniformAndStorageBuffer8BitAccess = 4449,
    StoragePushConstant8 = 4450,
    DenormPreserve = 4464,
    DenormFlushToZero = 4465,
    SignedZeroInfNanPreserve = 4466,
    RoundingModeRTE = 4467,
    RoundingModeRTZ = 4468,
    RayQueryProvisionalKHR = 4471,
    RayQueryKHR = 4472,
    RayTraversalPrimitiveCullingKHR = 4478,
    RayTracingKHR = 4479,
    Float16ImageAMD = 5008,
    ImageGatherBiasLodAMD = 5009,
    FragmentMaskAMD = 5010,
    StencilExportEXT = 5013,
    ImageReadWriteLodAMD = 5015,
    Int64ImageEXT = 5016,
    ShaderClockKHR = 5055,
    ShaderEnqueueAMDX = 5067,
    SampleMaskOverrideCoverageNV = 5249,
    GeometryShaderPassthroughNV = 5251,
    ShaderViewportIndexLayerEXT = 5254 | ShaderViewportIndexLayerNV,
    ShaderViewportMaskNV = 5255,
    ShaderStereoViewNV = 5259,
    PerViewAttributesNV = 5260,
    FragmentFullyCoveredEXT = 5265,
    MeshShadingNV = 5266,
    ImageFootprintNV = 5282,
    MeshShadingEXT = 5283,
    FragmentBarycentricKHR = 5284 | FragmentBarycentricNV,
    ComputeDerivativeGroupQuadsKHR = 5288 | ComputeDerivativeGroupQuadsNV,
    FragmentDensityEXT = 5291 | ShadingRateNV,
    GroupNonUniformPartitionedNV = 5297,
    ShaderNonUniform = 5301 | ShaderNonUniformEXT,
    RuntimeDescriptorArray = 5302 | RuntimeDescriptorArrayEXT,
    RayTracingPositionFetchKHR = 5336,
    RayTracingNV = 5340,
    RayTracingMotionBlurNV = 5341,
    VulkanMemoryModel = 5345 | VulkanMemoryModelKHR,
    VulkanMemoryModelDeviceScope = 5346 | VulkanMemoryModelDeviceScopeKHR,
    PhysicalStorageBufferAddresses = 5347 | PhysicalStorageBufferAddressesEXT,
    ComputeDerivativeGroupLinearKHR = 5350 | ComputeDerivativeGroupLinearNV,
    RayTracingProvisionalKHR = 5353,
    FragmentShaderSampleInterlockEXT = 5363,
    FragmentShaderShadingRateInterlockEXT = 5372,
    ShaderSMBuiltinsNV = 5373,
    FragmentShaderPixelInterlockEXT = 5378,
    DemoteToHelperInvocation = 5379 | DemoteToHelperInvocationEXT,
    ShaderInvocationReorderNV = 5383,
    RayTracingDisplacementMicromapNV = 5409,
    RayCullMaskKHR = 6020,
    AtomicFloat32AddEXT = 6033,
    AtomicFloat64AddEXT = 6034,
}

impl Capability {
    /// Returns the capabilities that are implicitly declared when `self` is declared.
    pub fn implicitly_declares(self) -> &'static [Capability] {
        match self {
            Self::Shader => &[Self::Matrix],
            Self::Geometry
            | Self::Tessellation
            | Self::AtomicStorage
            | Self::ImageGatherExtended
            | Self::StorageImageMultisample
            | Self::UniformBufferArrayDynamicIndexing
            | Self::SampledImageArrayDynamicIndexing
            | Self::StorageBufferArrayDynamicIndexing
            | Self::StorageImageArrayDynamicIndexing
            | Self::ClipDistance
            | Self::CullDistance
            | Self::SampleRateShading
            | Self::SampledRect
            | Self::InputAttachment
            | Self::SparseResidency
            | Self::MinLod
            | Self::SampledCubeArray
            | Self::ImageMSArray
            | Self::StorageImageExtendedFormats
            | Self::ImageQuery
            | Self::DerivativeControl
            | Self::InterpolationFunction
            | Self::TransformFeedback
            | Self::StorageImageReadWithoutFormat
            | Self::StorageImageWriteWithoutFormat
            | Self::DrawParameters
            | Self::MultiView
            | Self::VariablePointersStorageBuffer
            | Self::RayQueryKHR
            | Self::RayTracingKHR
            | Self::Float16ImageAMD
            | Self::ImageGatherBiasLodAMD
            | Self::FragmentMaskAMD
            | Self::StencilExportEXT
            | Self::ImageReadWriteLodAMD
            | Self::Int64ImageEXT
            | Self::FragmentFullyCoveredEXT
            | Self::MeshShadingNV
            | Self::MeshShadingEXT
            | Self::FragmentDensityEXT
            | Self::ShaderNonUniform
            | Self::RuntimeDescriptorArray
            | Self::RayTracingNV
            | Self::RayTracingMotionBlurNV
            | Self::PhysicalStorageBufferAddresses
            | Self::FragmentShaderSampleInterlockEXT
            | Self::FragmentShaderShadingRateInterlockEXT
            | Self::ShaderSMBuiltinsNV
            | Self::FragmentShaderPixelInterlockEXT
            | Self::DemoteToHelperInvocation
            | Self::FragmentShadingRateKHR
            | Self::ShaderEnqueueAMDX
            | Self::RayTracingProvisionalKHR
            | Self::RayQueryProvisionalKHR => &[Self::Shader],
            Self::Vector16
            | Self::Float16Buffer
            | Self::ImageBasic
            | Self::Pipes
            | Self::DeviceEnqueue
            | Self::LiteralSampler
            | Self::NamedBarrier => &[Self::Kernel],
            Self::Int64Atomics => &[Self::Int64],
            Self::ImageReadWrite | Self::ImageMipmap => &[Self::ImageBasic],
            Self::TessellationPointSize => &[Self::Tessellation],
            Self::GeometryPointSize | Self::GeometryStreams | Self::MultiViewport => {
                &[Self::Geometry]
            }
            Self::ImageCubeArray => &[Self::SampledCubeArray],
            Self::ImageRect => &[Self::SampledRect],
            Self::GenericPointer => &[Self::Addresses],
            Self::Image1D => &[Self::Sampled1D],
            Self::ImageBuffer => &[Self::SampledBuffer],
            Self::SubgroupDispatch => &[Self::DeviceEnqueue],
            Self::PipeStorage => &[Self::Pipes],
            Self::GroupNonUniformVote
            | Self::GroupNonUniformArithmetic
            | Self::GroupNonUniformBallot
            | Self::GroupNonUniformShuffle
            | Self::GroupNonUniformShuffleRelative
            | Self::GroupNonUniformClustered
            | Self::GroupNonUniformQuad
            | Self::GroupNonUniformPartitionedNV => &[Self::GroupNonUniform],
            Self::VariablePointers => &[Self::VariablePointersStorageBuffer],
            Self::UniformAndStorageBuffer16BitAccess => &[Self::StorageBuffer16BitAccess],
            Self::UniformAndStorageBuffer8BitAccess => &[Self::StorageBuffer8BitAccess],
            Self::ShaderViewportIndexLayerEXT => &[Self::MultiViewport],
            Self::ShaderViewportMaskNV => &[Self::ShaderViewportIndexLayerEXT],
            Self::ShaderStereoViewNV => &[Self::ShaderViewportMaskNV],
            Self::PerViewAttributesNV => &[Self::MultiView],
            Self::GeometryShaderPassthroughNV => &[Self::Geometry],
            Self::SampleMaskOverrideCoverageNV => &[Self::SampleRateShading],
            Self::ShaderInvocationReorderNV => &[Self::RayTracingKHR],
            _ => &[],
        }
    }
}

spirv_enum! {
    /// The semantic role attached to an object with the `BuiltIn` decoration.
    BuiltIn;

    Position = 0,
    PointSize = 1,
    ClipDistance = 3,
    CullDistance = 4,
    VertexId = 5,
    InstanceId = 6,
    PrimitiveId = 7,
    InvocationId = 8,
    Layer = 9,
    ViewportIndex = 10,
    TessLevelOuter = 11,
    TessLevelInner = 12,
    TessCoord = 13,
    PatchVertices = 14,
    FragCoord = 15,
    PointCoord = 16,
    FrontFacing = 17,
    SampleId = 18,
    SamplePosition = 19,
    SampleMask = 20,
    FragDepth = 22,
    HelperInvocation = 23,
    NumWorkgroups = 24,
    WorkgroupSize = 25,
    WorkgroupId = 26,
    LocalInvocationId = 27,
    GlobalInvocationId = 28,
    LocalInvocationIndex = 29,
    WorkDim = 30,
    GlobalSize = 31,
    EnqueuedWorkgroupSize = 32,
    GlobalOffset = 33,
    GlobalLinearId = 34,
    SubgroupSize = 36,
    SubgroupMaxSize = 37,
    NumSubgroups = 38,
    NumEnqueuedSubgroups = 39,
    SubgroupId = 40,
    SubgroupLocalInvocationId = 41,
    VertexIndex = 42,
    InstanceIndex = 43,
    CoreIDARM = 4160,
    CoreCountARM = 4161,
    CoreMaxIDARM = 4162,
    WarpIDARM = 4163,
    WarpMaxIDARM = 4164,
    SubgroupEqMask = 4416 | SubgroupEqMaskKHR,
    SubgroupGeMask = 4417 | SubgroupGeMaskKHR,
    SubgroupGtMask = 4418 | SubgroupGtMaskKHR,
    SubgroupLeMask = 4419 | SubgroupLeMaskKHR,
    SubgroupLtMask = 4420 | SubgroupLtMaskKHR,
    BaseVertex = 4424,
    BaseInstance = 4425,
    DrawIndex = 4426,
    PrimitiveShadingRateKHR = 4432,
    DeviceIndex = 4438,
    ViewIndex = 4440,
    ShadingRateKHR = 4444,
    BaryCoordNoPerspAMD = 4992,
    BaryCoordNoPerspCentroidAMD = 4993,
    BaryCoordNoPerspSampleAMD = 4994,
    BaryCoordSmoothAMD = 4995,
    BaryCoordSmoothCentroidAMD = 4996,
    BaryCoordSmoothSampleAMD = 4997,
    BaryCoordPullModelAMD = 4998,
    FragStencilRefEXT = 5014,
    CoalescedInputCountAMDX = 5021,
    ShaderIndexAMDX = 5073,
    ViewportMaskNV = 5253,
    SecondaryPositionNV = 5257,
    SecondaryViewportMaskNV = 5258,
    PositionPerViewNV = 5261,
    ViewportMaskPerViewNV = 5262,
    FullyCoveredEXT = 5264,
    TaskCountNV = 5274,
    PrimitiveCountNV = 5275,
    PrimitiveIndicesNV = 5276,
    ClipDistancePerViewNV = 5277,
    CullDistancePerViewNV = 5278,
    LayerPerViewNV = 5279,
    MeshViewCountNV = 5280,
    MeshViewIndicesNV = 5281,
    BaryCoordKHR = 5286 | BaryCoordNV,
    BaryCoordNoPerspKHR = 5287 | BaryCoordNoPerspNV,
    FragSizeEXT = 5292 | FragmentSizeNV,
    FragInvocationCountEXT = 5293 | InvocationsPerPixelNV,
    PrimitivePointIndicesEXT = 5294,
    PrimitiveLineIndicesEXT = 5295,
    PrimitiveTriangleIndicesEXT = 5296,
    CullPrimitiveEXT = 5299,
    LaunchIdKHR = 5319 | LaunchIdNV,
    LaunchSizeKHR = 5320 | LaunchSizeNV,
    WorldRayOriginKHR = 5321 | WorldRayOriginNV,
    WorldRayDirectionKHR = 5322 | WorldRayDirectionNV,
    ObjectRayOriginKHR = 5323 | ObjectRayOriginNV,
    ObjectRayDirectionKHR = 5324 | ObjectRayDirectionNV,
    RayTminKHR = 5325 | RayTminNV,
    RayTmaxKHR = 5326 | RayTmaxNV,
    InstanceCustomIndexKHR = 5327 | InstanceCustomIndexNV,
    ObjectToWorldKHR = 5330 | ObjectToWorldNV,
    WorldToObjectKHR = 5331 | WorldToObjectNV,
    HitTNV = 5332,
    HitKindKHR = 5333 | HitKindNV,
    CurrentRayTimeNV = 5334,
    HitTriangleVertexPositionsKHR = 5335,
    HitMicroTriangleVertexPositionsNV = 5337,
    HitMicroTriangleVertexBarycentricsNV = 5344,
    IncomingRayFlagsKHR = 5351 | IncomingRayFlagsNV,
    RayGeometryIndexKHR = 5352,
    WarpsPerSMNV = 5374,
    SMCountNV = 5375,
    WarpIDNV = 5376,
    SMIDNV = 5377,
    HitKindFrontFacingMicroTriangleNV = 5405,
    HitKindBackFacingMicroTriangleNV = 5406,
    CullMaskKHR = 6021,
}

spirv_enum! {
    /// An execution mode declared for an entry point with `OpExecutionMode`.
    ExecutionMode;

    Invocations = 0,
    SpacingEqual = 1,
    SpacingFractionalEven = 2,
    SpacingFractionalOdd = 3,
    VertexOrderCw = 4,
    VertexOrderCcw = 5,
    PixelCenterInteger = 6,
    OriginUpperLeft = 7,
    OriginLowerLeft = 8,
    EarlyFragmentTests = 9,
    PointMode = 10,
    Xfb = 11,
    DepthReplacing = 12,
    DepthGreater = 14,
    DepthLess = 15,
    DepthUnchanged = 16,
    LocalSize = 17,
    LocalSizeHint = 18,
    InputPoints = 19,
    InputLines = 20,
    InputLinesAdjacency = 21,
    Triangles = 22,
    InputTrianglesAdjacency = 23,
    Quads = 24,
    Isolines = 25,
    OutputVertices = 26,
    OutputPoints = 27,
    OutputLineStrip = 28,
    OutputTriangleStrip = 29,
    VecTypeHint = 30,
    ContractionOff = 31,
    Initializer = 33,
    Finalizer = 34,
    SubgroupSize = 35,
    SubgroupsPerWorkgroup = 36,
    SubgroupsPerWorkgroupId = 37,
    LocalSizeId = 38,
    LocalSizeHintId = 39,
    PostDepthCoverage = 4446,
    DenormPreserve = 4459,
    DenormFlushToZero = 4460,
    SignedZeroInfNanPreserve = 4461,
    RoundingModeRTE = 4462,
    RoundingModeRTZ = 4463,
    EarlyAndLateFragmentTestsAMD = 5017,
    StencilRefReplacingEXT = 5027,
    OutputLinesEXT = 5269 | OutputLinesNV,
    OutputPrimitivesEXT = 5270 | OutputPrimitivesNV,
    DerivativeGroupQuadsKHR = 5289 | DerivativeGroupQuadsNV,
    DerivativeGroupLinearKHR = 5290 | DerivativeGroupLinearNV,
    OutputTrianglesEXT = 5298 | OutputTrianglesNV,
    PixelInterlockOrderedEXT = 5366,
    PixelInterlockUnorderedEXT = 5367,
    SampleInterlockOrderedEXT = 5368,
    SampleInterlockUnorderedEXT = 5369,
    ShadingRateInterlockOrderedEXT = 5370,
    ShadingRateInterlockUnorderedEXT = 5371,
}

/// A decoration applied with `OpDecorate` or `OpMemberDecorate`, together with its operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoration {
    RelaxedPrecision,
    SpecId { specialization_constant_id: u32 },
    Block,
    BufferBlock,
    RowMajor,
    ColMajor,
    ArrayStride { array_stride: u32 },
    MatrixStride { matrix_stride: u32 },
    BuiltIn { built_in: BuiltIn },
    NoPerspective,
    Flat,
    Patch,
    Centroid,
    Sample,
    Invariant,
    Restrict,
    Aliased,
    Volatile,
    Coherent,
    NonWritable,
    NonReadable,
    Location { location: u32 },
    Component { component: u32 },
    Index { index: u32 },
    Binding { binding_point: u32 },
    DescriptorSet { descriptor_set: u32 },
    Offset { byte_offset: u32 },
    InputAttachmentIndex { attachment_index: u32 },
    PerPrimitiveEXT,
    PerViewNV,
    PerTaskNV,
    PerVertexKHR,

    /// Any decoration that this crate does not interpret.
    Other { name: String, operands: Vec<Operand> },
}

impl Decoration {
    /// Returns the grammar name of the decoration.
    pub fn name(&self) -> &str {
        match self {
            Self::RelaxedPrecision => "RelaxedPrecision",
            Self::SpecId { .. } => "SpecId",
            Self::Block => "Block",
            Self::BufferBlock => "BufferBlock",
            Self::RowMajor => "RowMajor",
            Self::ColMajor => "ColMajor",
            Self::ArrayStride { .. } => "ArrayStride",
            Self::MatrixStride { .. } => "MatrixStride",
            Self::BuiltIn { .. } => "BuiltIn",
            Self::NoPerspective => "NoPerspective",
            Self::Flat => "Flat",
            Self::Patch => "Patch",
            Self::Centroid => "Centroid",
            Self::Sample => "Sample",
            Self::Invariant => "Invariant",
            Self::Restrict => "Restrict",
            Self::Aliased => "Aliased",
            Self::Volatile => "Volatile",
            Self::Coherent => "Coherent",
            Self::NonWritable => "NonWritable",
            Self::NonReadable => "NonReadable",
            Self::Location { .. } => "Location",
            Self::Component { .. } => "Component",
            Self::Index { .. } => "Index",
            Self::Binding { .. } => "Binding",
            Self::DescriptorSet { .. } => "DescriptorSet",
            Self::Offset { .. } => "Offset",
            Self::InputAttachmentIndex { .. } => "InputAttachmentIndex",
            Self::PerPrimitiveEXT => "PerPrimitiveEXT",
            Self::PerViewNV => "PerViewNV",
            Self::PerTaskNV => "PerTaskNV",
            Self::PerVertexKHR => "PerVertexKHR",
            Self::Other { name, .. } => name,
        }
    }
}

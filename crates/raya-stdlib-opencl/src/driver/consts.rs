//! OpenCL ABI constants
//!
//! Values as defined by the Khronos `cl.h` headers up to revision 1.2.

#![allow(missing_docs)]

// ── Status codes ──

pub const CL_SUCCESS: i32 = 0;
pub const CL_DEVICE_NOT_FOUND: i32 = -1;
pub const CL_DEVICE_NOT_AVAILABLE: i32 = -2;
pub const CL_COMPILER_NOT_AVAILABLE: i32 = -3;
pub const CL_MEM_OBJECT_ALLOCATION_FAILURE: i32 = -4;
pub const CL_OUT_OF_RESOURCES: i32 = -5;
pub const CL_OUT_OF_HOST_MEMORY: i32 = -6;
pub const CL_PROFILING_INFO_NOT_AVAILABLE: i32 = -7;
pub const CL_MEM_COPY_OVERLAP: i32 = -8;
pub const CL_IMAGE_FORMAT_MISMATCH: i32 = -9;
pub const CL_IMAGE_FORMAT_NOT_SUPPORTED: i32 = -10;
pub const CL_BUILD_PROGRAM_FAILURE: i32 = -11;
pub const CL_MAP_FAILURE: i32 = -12;
pub const CL_MISALIGNED_SUB_BUFFER_OFFSET: i32 = -13;
pub const CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST: i32 = -14;
pub const CL_COMPILE_PROGRAM_FAILURE: i32 = -15;
pub const CL_LINKER_NOT_AVAILABLE: i32 = -16;
pub const CL_LINK_PROGRAM_FAILURE: i32 = -17;
pub const CL_DEVICE_PARTITION_FAILED: i32 = -18;
pub const CL_KERNEL_ARG_INFO_NOT_AVAILABLE: i32 = -19;
pub const CL_INVALID_VALUE: i32 = -30;
pub const CL_INVALID_DEVICE_TYPE: i32 = -31;
pub const CL_INVALID_PLATFORM: i32 = -32;
pub const CL_INVALID_DEVICE: i32 = -33;
pub const CL_INVALID_CONTEXT: i32 = -34;
pub const CL_INVALID_QUEUE_PROPERTIES: i32 = -35;
pub const CL_INVALID_COMMAND_QUEUE: i32 = -36;
pub const CL_INVALID_HOST_PTR: i32 = -37;
pub const CL_INVALID_MEM_OBJECT: i32 = -38;
pub const CL_INVALID_IMAGE_FORMAT_DESCRIPTOR: i32 = -39;
pub const CL_INVALID_IMAGE_SIZE: i32 = -40;
pub const CL_INVALID_SAMPLER: i32 = -41;
pub const CL_INVALID_BINARY: i32 = -42;
pub const CL_INVALID_BUILD_OPTIONS: i32 = -43;
pub const CL_INVALID_PROGRAM: i32 = -44;
pub const CL_INVALID_PROGRAM_EXECUTABLE: i32 = -45;
pub const CL_INVALID_KERNEL_NAME: i32 = -46;
pub const CL_INVALID_KERNEL_DEFINITION: i32 = -47;
pub const CL_INVALID_KERNEL: i32 = -48;
pub const CL_INVALID_ARG_INDEX: i32 = -49;
pub const CL_INVALID_ARG_VALUE: i32 = -50;
pub const CL_INVALID_ARG_SIZE: i32 = -51;
pub const CL_INVALID_KERNEL_ARGS: i32 = -52;
pub const CL_INVALID_WORK_DIMENSION: i32 = -53;
pub const CL_INVALID_WORK_GROUP_SIZE: i32 = -54;
pub const CL_INVALID_WORK_ITEM_SIZE: i32 = -55;
pub const CL_INVALID_GLOBAL_OFFSET: i32 = -56;
pub const CL_INVALID_EVENT_WAIT_LIST: i32 = -57;
pub const CL_INVALID_EVENT: i32 = -58;
pub const CL_INVALID_OPERATION: i32 = -59;
pub const CL_INVALID_GL_OBJECT: i32 = -60;
pub const CL_INVALID_BUFFER_SIZE: i32 = -61;
pub const CL_INVALID_MIP_LEVEL: i32 = -62;
pub const CL_INVALID_GLOBAL_WORK_SIZE: i32 = -63;
pub const CL_INVALID_PROPERTY: i32 = -64;
pub const CL_INVALID_IMAGE_DESCRIPTOR: i32 = -65;
pub const CL_INVALID_COMPILER_OPTIONS: i32 = -66;
pub const CL_INVALID_LINKER_OPTIONS: i32 = -67;
pub const CL_INVALID_DEVICE_PARTITION_COUNT: i32 = -68;

// ── Platform info ──

pub const CL_PLATFORM_PROFILE: u32 = 0x0900;
pub const CL_PLATFORM_VERSION: u32 = 0x0901;
pub const CL_PLATFORM_NAME: u32 = 0x0902;
pub const CL_PLATFORM_VENDOR: u32 = 0x0903;
pub const CL_PLATFORM_EXTENSIONS: u32 = 0x0904;

// ── Device types (cl_device_type) ──

pub const CL_DEVICE_TYPE_DEFAULT: u64 = 1 << 0;
pub const CL_DEVICE_TYPE_CPU: u64 = 1 << 1;
pub const CL_DEVICE_TYPE_GPU: u64 = 1 << 2;
pub const CL_DEVICE_TYPE_ACCELERATOR: u64 = 1 << 3;
pub const CL_DEVICE_TYPE_CUSTOM: u64 = 1 << 4;
pub const CL_DEVICE_TYPE_ALL: u64 = 0xFFFF_FFFF;

// ── Device info ──

pub const CL_DEVICE_TYPE: u32 = 0x1000;
pub const CL_DEVICE_VENDOR_ID: u32 = 0x1001;
pub const CL_DEVICE_MAX_COMPUTE_UNITS: u32 = 0x1002;
pub const CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS: u32 = 0x1003;
pub const CL_DEVICE_MAX_WORK_GROUP_SIZE: u32 = 0x1004;
pub const CL_DEVICE_MAX_WORK_ITEM_SIZES: u32 = 0x1005;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_CHAR: u32 = 0x1006;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_SHORT: u32 = 0x1007;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_INT: u32 = 0x1008;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_LONG: u32 = 0x1009;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT: u32 = 0x100A;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE: u32 = 0x100B;
pub const CL_DEVICE_MAX_CLOCK_FREQUENCY: u32 = 0x100C;
pub const CL_DEVICE_ADDRESS_BITS: u32 = 0x100D;
pub const CL_DEVICE_MAX_READ_IMAGE_ARGS: u32 = 0x100E;
pub const CL_DEVICE_MAX_WRITE_IMAGE_ARGS: u32 = 0x100F;
pub const CL_DEVICE_MAX_MEM_ALLOC_SIZE: u32 = 0x1010;
pub const CL_DEVICE_IMAGE2D_MAX_WIDTH: u32 = 0x1011;
pub const CL_DEVICE_IMAGE2D_MAX_HEIGHT: u32 = 0x1012;
pub const CL_DEVICE_IMAGE3D_MAX_WIDTH: u32 = 0x1013;
pub const CL_DEVICE_IMAGE3D_MAX_HEIGHT: u32 = 0x1014;
pub const CL_DEVICE_IMAGE3D_MAX_DEPTH: u32 = 0x1015;
pub const CL_DEVICE_IMAGE_SUPPORT: u32 = 0x1016;
pub const CL_DEVICE_MAX_PARAMETER_SIZE: u32 = 0x1017;
pub const CL_DEVICE_MAX_SAMPLERS: u32 = 0x1018;
pub const CL_DEVICE_MEM_BASE_ADDR_ALIGN: u32 = 0x1019;
pub const CL_DEVICE_MIN_DATA_TYPE_ALIGN_SIZE: u32 = 0x101A;
pub const CL_DEVICE_SINGLE_FP_CONFIG: u32 = 0x101B;
pub const CL_DEVICE_GLOBAL_MEM_CACHE_TYPE: u32 = 0x101C;
pub const CL_DEVICE_GLOBAL_MEM_CACHELINE_SIZE: u32 = 0x101D;
pub const CL_DEVICE_GLOBAL_MEM_CACHE_SIZE: u32 = 0x101E;
pub const CL_DEVICE_GLOBAL_MEM_SIZE: u32 = 0x101F;
pub const CL_DEVICE_MAX_CONSTANT_BUFFER_SIZE: u32 = 0x1020;
pub const CL_DEVICE_MAX_CONSTANT_ARGS: u32 = 0x1021;
pub const CL_DEVICE_LOCAL_MEM_TYPE: u32 = 0x1022;
pub const CL_DEVICE_LOCAL_MEM_SIZE: u32 = 0x1023;
pub const CL_DEVICE_ERROR_CORRECTION_SUPPORT: u32 = 0x1024;
pub const CL_DEVICE_PROFILING_TIMER_RESOLUTION: u32 = 0x1025;
pub const CL_DEVICE_ENDIAN_LITTLE: u32 = 0x1026;
pub const CL_DEVICE_AVAILABLE: u32 = 0x1027;
pub const CL_DEVICE_COMPILER_AVAILABLE: u32 = 0x1028;
pub const CL_DEVICE_EXECUTION_CAPABILITIES: u32 = 0x1029;
pub const CL_DEVICE_QUEUE_PROPERTIES: u32 = 0x102A;
pub const CL_DEVICE_NAME: u32 = 0x102B;
pub const CL_DEVICE_VENDOR: u32 = 0x102C;
pub const CL_DRIVER_VERSION: u32 = 0x102D;
pub const CL_DEVICE_PROFILE: u32 = 0x102E;
pub const CL_DEVICE_VERSION: u32 = 0x102F;
pub const CL_DEVICE_EXTENSIONS: u32 = 0x1030;
pub const CL_DEVICE_PLATFORM: u32 = 0x1031;
pub const CL_DEVICE_DOUBLE_FP_CONFIG: u32 = 0x1032;
pub const CL_DEVICE_PREFERRED_VECTOR_WIDTH_HALF: u32 = 0x1034;
pub const CL_DEVICE_HOST_UNIFIED_MEMORY: u32 = 0x1035;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_CHAR: u32 = 0x1036;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_SHORT: u32 = 0x1037;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_INT: u32 = 0x1038;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_LONG: u32 = 0x1039;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_FLOAT: u32 = 0x103A;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_DOUBLE: u32 = 0x103B;
pub const CL_DEVICE_NATIVE_VECTOR_WIDTH_HALF: u32 = 0x103C;
pub const CL_DEVICE_OPENCL_C_VERSION: u32 = 0x103D;
pub const CL_DEVICE_LINKER_AVAILABLE: u32 = 0x103E;
pub const CL_DEVICE_BUILT_IN_KERNELS: u32 = 0x103F;
pub const CL_DEVICE_IMAGE_MAX_BUFFER_SIZE: u32 = 0x1040;
pub const CL_DEVICE_IMAGE_MAX_ARRAY_SIZE: u32 = 0x1041;
pub const CL_DEVICE_PARENT_DEVICE: u32 = 0x1042;
pub const CL_DEVICE_PARTITION_MAX_SUB_DEVICES: u32 = 0x1043;
pub const CL_DEVICE_PARTITION_PROPERTIES: u32 = 0x1044;
pub const CL_DEVICE_PARTITION_AFFINITY_DOMAIN: u32 = 0x1045;
pub const CL_DEVICE_PARTITION_TYPE: u32 = 0x1046;
pub const CL_DEVICE_REFERENCE_COUNT: u32 = 0x1047;
pub const CL_DEVICE_PREFERRED_INTEROP_USER_SYNC: u32 = 0x1048;
pub const CL_DEVICE_PRINTF_BUFFER_SIZE: u32 = 0x1049;

// ── Device fp config (cl_device_fp_config) ──

pub const CL_FP_DENORM: u64 = 1 << 0;
pub const CL_FP_INF_NAN: u64 = 1 << 1;
pub const CL_FP_ROUND_TO_NEAREST: u64 = 1 << 2;
pub const CL_FP_ROUND_TO_ZERO: u64 = 1 << 3;
pub const CL_FP_ROUND_TO_INF: u64 = 1 << 4;
pub const CL_FP_FMA: u64 = 1 << 5;
pub const CL_FP_SOFT_FLOAT: u64 = 1 << 6;
pub const CL_FP_CORRECTLY_ROUNDED_DIVIDE_SQRT: u64 = 1 << 7;

// ── Device mem cache type / local mem type ──

pub const CL_NONE: u32 = 0x0;
pub const CL_READ_ONLY_CACHE: u32 = 0x1;
pub const CL_READ_WRITE_CACHE: u32 = 0x2;
pub const CL_LOCAL: u32 = 0x1;
pub const CL_GLOBAL: u32 = 0x2;

// ── Device exec capabilities ──

pub const CL_EXEC_KERNEL: u64 = 1 << 0;
pub const CL_EXEC_NATIVE_KERNEL: u64 = 1 << 1;

// ── Command queue properties ──

pub const CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE: u64 = 1 << 0;
pub const CL_QUEUE_PROFILING_ENABLE: u64 = 1 << 1;

// ── Context info / properties ──

pub const CL_CONTEXT_REFERENCE_COUNT: u32 = 0x1080;
pub const CL_CONTEXT_DEVICES: u32 = 0x1081;
pub const CL_CONTEXT_PROPERTIES: u32 = 0x1082;
pub const CL_CONTEXT_NUM_DEVICES: u32 = 0x1083;
pub const CL_CONTEXT_PLATFORM: isize = 0x1084;
pub const CL_CONTEXT_INTEROP_USER_SYNC: isize = 0x1085;

// ── Device partition property / affinity domain ──

pub const CL_DEVICE_PARTITION_EQUALLY: isize = 0x1086;
pub const CL_DEVICE_PARTITION_BY_COUNTS: isize = 0x1087;
pub const CL_DEVICE_PARTITION_BY_COUNTS_LIST_END: isize = 0x0;
pub const CL_DEVICE_PARTITION_BY_AFFINITY_DOMAIN: isize = 0x1088;
pub const CL_DEVICE_AFFINITY_DOMAIN_NUMA: u64 = 1 << 0;
pub const CL_DEVICE_AFFINITY_DOMAIN_L4_CACHE: u64 = 1 << 1;
pub const CL_DEVICE_AFFINITY_DOMAIN_L3_CACHE: u64 = 1 << 2;
pub const CL_DEVICE_AFFINITY_DOMAIN_L2_CACHE: u64 = 1 << 3;
pub const CL_DEVICE_AFFINITY_DOMAIN_L1_CACHE: u64 = 1 << 4;
pub const CL_DEVICE_AFFINITY_DOMAIN_NEXT_PARTITIONABLE: u64 = 1 << 5;

// ── Command queue info ──

pub const CL_QUEUE_CONTEXT: u32 = 0x1090;
pub const CL_QUEUE_DEVICE: u32 = 0x1091;
pub const CL_QUEUE_REFERENCE_COUNT: u32 = 0x1092;
pub const CL_QUEUE_PROPERTIES: u32 = 0x1093;

// ── Mem flags / migration flags ──

pub const CL_MEM_READ_WRITE: u64 = 1 << 0;
pub const CL_MEM_WRITE_ONLY: u64 = 1 << 1;
pub const CL_MEM_READ_ONLY: u64 = 1 << 2;
pub const CL_MEM_USE_HOST_PTR: u64 = 1 << 3;
pub const CL_MEM_ALLOC_HOST_PTR: u64 = 1 << 4;
pub const CL_MEM_COPY_HOST_PTR: u64 = 1 << 5;
pub const CL_MEM_HOST_WRITE_ONLY: u64 = 1 << 7;
pub const CL_MEM_HOST_READ_ONLY: u64 = 1 << 8;
pub const CL_MEM_HOST_NO_ACCESS: u64 = 1 << 9;
pub const CL_MIGRATE_MEM_OBJECT_HOST: u64 = 1 << 0;
pub const CL_MIGRATE_MEM_OBJECT_CONTENT_UNDEFINED: u64 = 1 << 1;

// ── Channel order ──

pub const CL_R: u32 = 0x10B0;
pub const CL_A: u32 = 0x10B1;
pub const CL_RG: u32 = 0x10B2;
pub const CL_RA: u32 = 0x10B3;
pub const CL_RGB: u32 = 0x10B4;
pub const CL_RGBA: u32 = 0x10B5;
pub const CL_BGRA: u32 = 0x10B6;
pub const CL_ARGB: u32 = 0x10B7;
pub const CL_INTENSITY: u32 = 0x10B8;
pub const CL_LUMINANCE: u32 = 0x10B9;
pub const CL_RX: u32 = 0x10BA;
pub const CL_RGX: u32 = 0x10BB;
pub const CL_RGBX: u32 = 0x10BC;

// ── Channel type ──

pub const CL_SNORM_INT8: u32 = 0x10D0;
pub const CL_SNORM_INT16: u32 = 0x10D1;
pub const CL_UNORM_INT8: u32 = 0x10D2;
pub const CL_UNORM_INT16: u32 = 0x10D3;
pub const CL_UNORM_SHORT_565: u32 = 0x10D4;
pub const CL_UNORM_SHORT_555: u32 = 0x10D5;
pub const CL_UNORM_INT_101010: u32 = 0x10D6;
pub const CL_SIGNED_INT8: u32 = 0x10D7;
pub const CL_SIGNED_INT16: u32 = 0x10D8;
pub const CL_SIGNED_INT32: u32 = 0x10D9;
pub const CL_UNSIGNED_INT8: u32 = 0x10DA;
pub const CL_UNSIGNED_INT16: u32 = 0x10DB;
pub const CL_UNSIGNED_INT32: u32 = 0x10DC;
pub const CL_HALF_FLOAT: u32 = 0x10DD;
pub const CL_FLOAT: u32 = 0x10DE;

// ── Mem object type ──

pub const CL_MEM_OBJECT_BUFFER: u32 = 0x10F0;
pub const CL_MEM_OBJECT_IMAGE2D: u32 = 0x10F1;
pub const CL_MEM_OBJECT_IMAGE3D: u32 = 0x10F2;
pub const CL_MEM_OBJECT_IMAGE2D_ARRAY: u32 = 0x10F3;
pub const CL_MEM_OBJECT_IMAGE1D: u32 = 0x10F4;
pub const CL_MEM_OBJECT_IMAGE1D_ARRAY: u32 = 0x10F5;
pub const CL_MEM_OBJECT_IMAGE1D_BUFFER: u32 = 0x10F6;

// ── Mem info ──

pub const CL_MEM_TYPE: u32 = 0x1100;
pub const CL_MEM_FLAGS: u32 = 0x1101;
pub const CL_MEM_SIZE: u32 = 0x1102;
pub const CL_MEM_HOST_PTR: u32 = 0x1103;
pub const CL_MEM_MAP_COUNT: u32 = 0x1104;
pub const CL_MEM_REFERENCE_COUNT: u32 = 0x1105;
pub const CL_MEM_CONTEXT: u32 = 0x1106;
pub const CL_MEM_ASSOCIATED_MEMOBJECT: u32 = 0x1107;
pub const CL_MEM_OFFSET: u32 = 0x1108;

// ── Image info ──

pub const CL_IMAGE_FORMAT: u32 = 0x1110;
pub const CL_IMAGE_ELEMENT_SIZE: u32 = 0x1111;
pub const CL_IMAGE_ROW_PITCH: u32 = 0x1112;
pub const CL_IMAGE_SLICE_PITCH: u32 = 0x1113;
pub const CL_IMAGE_WIDTH: u32 = 0x1114;
pub const CL_IMAGE_HEIGHT: u32 = 0x1115;
pub const CL_IMAGE_DEPTH: u32 = 0x1116;
pub const CL_IMAGE_ARRAY_SIZE: u32 = 0x1117;
pub const CL_IMAGE_BUFFER: u32 = 0x1118;
pub const CL_IMAGE_NUM_MIP_LEVELS: u32 = 0x1119;
pub const CL_IMAGE_NUM_SAMPLES: u32 = 0x111A;

// ── Addressing / filter modes ──

pub const CL_ADDRESS_NONE: u32 = 0x1130;
pub const CL_ADDRESS_CLAMP_TO_EDGE: u32 = 0x1131;
pub const CL_ADDRESS_CLAMP: u32 = 0x1132;
pub const CL_ADDRESS_REPEAT: u32 = 0x1133;
pub const CL_ADDRESS_MIRRORED_REPEAT: u32 = 0x1134;
pub const CL_FILTER_NEAREST: u32 = 0x1140;
pub const CL_FILTER_LINEAR: u32 = 0x1141;

// ── Sampler info ──

pub const CL_SAMPLER_REFERENCE_COUNT: u32 = 0x1150;
pub const CL_SAMPLER_CONTEXT: u32 = 0x1151;
pub const CL_SAMPLER_NORMALIZED_COORDS: u32 = 0x1152;
pub const CL_SAMPLER_ADDRESSING_MODE: u32 = 0x1153;
pub const CL_SAMPLER_FILTER_MODE: u32 = 0x1154;

// ── Map flags ──

pub const CL_MAP_READ: u64 = 1 << 0;
pub const CL_MAP_WRITE: u64 = 1 << 1;
pub const CL_MAP_WRITE_INVALIDATE_REGION: u64 = 1 << 2;

// ── Program info ──

pub const CL_PROGRAM_REFERENCE_COUNT: u32 = 0x1160;
pub const CL_PROGRAM_CONTEXT: u32 = 0x1161;
pub const CL_PROGRAM_NUM_DEVICES: u32 = 0x1162;
pub const CL_PROGRAM_DEVICES: u32 = 0x1163;
pub const CL_PROGRAM_SOURCE: u32 = 0x1164;
pub const CL_PROGRAM_BINARY_SIZES: u32 = 0x1165;
pub const CL_PROGRAM_BINARIES: u32 = 0x1166;
pub const CL_PROGRAM_NUM_KERNELS: u32 = 0x1167;
pub const CL_PROGRAM_KERNEL_NAMES: u32 = 0x1168;

// ── Program build info ──

pub const CL_PROGRAM_BUILD_STATUS: u32 = 0x1181;
pub const CL_PROGRAM_BUILD_OPTIONS: u32 = 0x1182;
pub const CL_PROGRAM_BUILD_LOG: u32 = 0x1183;
pub const CL_PROGRAM_BINARY_TYPE: u32 = 0x1184;

// ── Program binary type ──

pub const CL_PROGRAM_BINARY_TYPE_NONE: u32 = 0x0;
pub const CL_PROGRAM_BINARY_TYPE_COMPILED_OBJECT: u32 = 0x1;
pub const CL_PROGRAM_BINARY_TYPE_LIBRARY: u32 = 0x2;
pub const CL_PROGRAM_BINARY_TYPE_EXECUTABLE: u32 = 0x4;

// ── Build status ──

pub const CL_BUILD_SUCCESS: i32 = 0;
pub const CL_BUILD_NONE: i32 = -1;
pub const CL_BUILD_ERROR: i32 = -2;
pub const CL_BUILD_IN_PROGRESS: i32 = -3;

// ── Kernel info ──

pub const CL_KERNEL_FUNCTION_NAME: u32 = 0x1190;
pub const CL_KERNEL_NUM_ARGS: u32 = 0x1191;
pub const CL_KERNEL_REFERENCE_COUNT: u32 = 0x1192;
pub const CL_KERNEL_CONTEXT: u32 = 0x1193;
pub const CL_KERNEL_PROGRAM: u32 = 0x1194;
pub const CL_KERNEL_ATTRIBUTES: u32 = 0x1195;

// ── Kernel arg info ──

pub const CL_KERNEL_ARG_ADDRESS_QUALIFIER: u32 = 0x1196;
pub const CL_KERNEL_ARG_ACCESS_QUALIFIER: u32 = 0x1197;
pub const CL_KERNEL_ARG_TYPE_NAME: u32 = 0x1198;
pub const CL_KERNEL_ARG_TYPE_QUALIFIER: u32 = 0x1199;
pub const CL_KERNEL_ARG_NAME: u32 = 0x119A;

pub const CL_KERNEL_ARG_ADDRESS_GLOBAL: u32 = 0x119B;
pub const CL_KERNEL_ARG_ADDRESS_LOCAL: u32 = 0x119C;
pub const CL_KERNEL_ARG_ADDRESS_CONSTANT: u32 = 0x119D;
pub const CL_KERNEL_ARG_ADDRESS_PRIVATE: u32 = 0x119E;

pub const CL_KERNEL_ARG_ACCESS_READ_ONLY: u32 = 0x11A0;
pub const CL_KERNEL_ARG_ACCESS_WRITE_ONLY: u32 = 0x11A1;
pub const CL_KERNEL_ARG_ACCESS_READ_WRITE: u32 = 0x11A2;
pub const CL_KERNEL_ARG_ACCESS_NONE: u32 = 0x11A3;

pub const CL_KERNEL_ARG_TYPE_NONE: u64 = 0;
pub const CL_KERNEL_ARG_TYPE_CONST: u64 = 1 << 0;
pub const CL_KERNEL_ARG_TYPE_RESTRICT: u64 = 1 << 1;
pub const CL_KERNEL_ARG_TYPE_VOLATILE: u64 = 1 << 2;

// ── Kernel work group info ──

pub const CL_KERNEL_WORK_GROUP_SIZE: u32 = 0x11B0;
pub const CL_KERNEL_COMPILE_WORK_GROUP_SIZE: u32 = 0x11B1;
pub const CL_KERNEL_LOCAL_MEM_SIZE: u32 = 0x11B2;
pub const CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE: u32 = 0x11B3;
pub const CL_KERNEL_PRIVATE_MEM_SIZE: u32 = 0x11B4;
pub const CL_KERNEL_GLOBAL_WORK_SIZE: u32 = 0x11B5;

// ── Event info ──

pub const CL_EVENT_COMMAND_QUEUE: u32 = 0x11D0;
pub const CL_EVENT_COMMAND_TYPE: u32 = 0x11D1;
pub const CL_EVENT_REFERENCE_COUNT: u32 = 0x11D2;
pub const CL_EVENT_COMMAND_EXECUTION_STATUS: u32 = 0x11D3;
pub const CL_EVENT_CONTEXT: u32 = 0x11D4;

// ── Command type ──

pub const CL_COMMAND_NDRANGE_KERNEL: u32 = 0x11F0;
pub const CL_COMMAND_TASK: u32 = 0x11F1;
pub const CL_COMMAND_NATIVE_KERNEL: u32 = 0x11F2;
pub const CL_COMMAND_READ_BUFFER: u32 = 0x11F3;
pub const CL_COMMAND_WRITE_BUFFER: u32 = 0x11F4;
pub const CL_COMMAND_COPY_BUFFER: u32 = 0x11F5;
pub const CL_COMMAND_READ_IMAGE: u32 = 0x11F6;
pub const CL_COMMAND_WRITE_IMAGE: u32 = 0x11F7;
pub const CL_COMMAND_COPY_IMAGE: u32 = 0x11F8;
pub const CL_COMMAND_COPY_IMAGE_TO_BUFFER: u32 = 0x11F9;
pub const CL_COMMAND_COPY_BUFFER_TO_IMAGE: u32 = 0x11FA;
pub const CL_COMMAND_MAP_BUFFER: u32 = 0x11FB;
pub const CL_COMMAND_MAP_IMAGE: u32 = 0x11FC;
pub const CL_COMMAND_UNMAP_MEM_OBJECT: u32 = 0x11FD;
pub const CL_COMMAND_MARKER: u32 = 0x11FE;
pub const CL_COMMAND_ACQUIRE_GL_OBJECTS: u32 = 0x11FF;
pub const CL_COMMAND_RELEASE_GL_OBJECTS: u32 = 0x1200;
pub const CL_COMMAND_READ_BUFFER_RECT: u32 = 0x1201;
pub const CL_COMMAND_WRITE_BUFFER_RECT: u32 = 0x1202;
pub const CL_COMMAND_COPY_BUFFER_RECT: u32 = 0x1203;
pub const CL_COMMAND_USER: u32 = 0x1204;
pub const CL_COMMAND_BARRIER: u32 = 0x1205;
pub const CL_COMMAND_MIGRATE_MEM_OBJECTS: u32 = 0x1206;
pub const CL_COMMAND_FILL_BUFFER: u32 = 0x1207;
pub const CL_COMMAND_FILL_IMAGE: u32 = 0x1208;

// ── Command execution status ──

pub const CL_COMPLETE: i32 = 0x0;
pub const CL_RUNNING: i32 = 0x1;
pub const CL_SUBMITTED: i32 = 0x2;
pub const CL_QUEUED: i32 = 0x3;

// ── Buffer create type ──

pub const CL_BUFFER_CREATE_TYPE_REGION: u32 = 0x1220;

// ── Profiling info ──

pub const CL_PROFILING_COMMAND_QUEUED: u32 = 0x1280;
pub const CL_PROFILING_COMMAND_SUBMIT: u32 = 0x1281;
pub const CL_PROFILING_COMMAND_START: u32 = 0x1282;
pub const CL_PROFILING_COMMAND_END: u32 = 0x1283;

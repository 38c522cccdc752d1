//! Enum and bitfield catalog
//!
//! One flat, declarative row list shared by every enumeration type. The
//! per-type runs are grouped once, at first use, after version filtering;
//! lookups scan the run of a single type in row order.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::driver::consts::*;
use crate::error::{ClError, ClResult};
use crate::version::ApiVersion::{self, V1_0, V1_1, V1_2};

/// Logical enumeration types
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumType {
    DeviceType,
    DeviceFpConfig,
    DeviceMemCacheType,
    DeviceLocalMemType,
    DeviceExecCapabilities,
    CommandQueueProperties,
    ContextProperties,
    DevicePartitionProperty,
    DeviceAffinityDomain,
    MemFlags,
    MemMigrationFlags,
    ChannelOrder,
    ChannelType,
    MemObjectType,
    AddressingMode,
    FilterMode,
    MapFlags,
    ProgramBinaryType,
    BuildStatus,
    KernelArgAddressQualifier,
    KernelArgAccessQualifier,
    KernelArgTypeQualifier,
    CommandType,
    CommandExecutionStatus,
    BufferCreateType,
}

impl EnumType {
    /// Every enumeration type, in catalog order
    pub const ALL: [EnumType; 25] = [
        EnumType::DeviceType,
        EnumType::DeviceFpConfig,
        EnumType::DeviceMemCacheType,
        EnumType::DeviceLocalMemType,
        EnumType::DeviceExecCapabilities,
        EnumType::CommandQueueProperties,
        EnumType::ContextProperties,
        EnumType::DevicePartitionProperty,
        EnumType::DeviceAffinityDomain,
        EnumType::MemFlags,
        EnumType::MemMigrationFlags,
        EnumType::ChannelOrder,
        EnumType::ChannelType,
        EnumType::MemObjectType,
        EnumType::AddressingMode,
        EnumType::FilterMode,
        EnumType::MapFlags,
        EnumType::ProgramBinaryType,
        EnumType::BuildStatus,
        EnumType::KernelArgAddressQualifier,
        EnumType::KernelArgAccessQualifier,
        EnumType::KernelArgTypeQualifier,
        EnumType::CommandType,
        EnumType::CommandExecutionStatus,
        EnumType::BufferCreateType,
    ];

    /// Snake-case type name
    pub const fn name(self) -> &'static str {
        match self {
            EnumType::DeviceType => "device_type",
            EnumType::DeviceFpConfig => "device_fp_config",
            EnumType::DeviceMemCacheType => "device_mem_cache_type",
            EnumType::DeviceLocalMemType => "device_local_mem_type",
            EnumType::DeviceExecCapabilities => "device_exec_capabilities",
            EnumType::CommandQueueProperties => "command_queue_properties",
            EnumType::ContextProperties => "context_properties",
            EnumType::DevicePartitionProperty => "device_partition_property",
            EnumType::DeviceAffinityDomain => "device_affinity_domain",
            EnumType::MemFlags => "mem_flags",
            EnumType::MemMigrationFlags => "mem_migration_flags",
            EnumType::ChannelOrder => "channel_order",
            EnumType::ChannelType => "channel_type",
            EnumType::MemObjectType => "mem_object_type",
            EnumType::AddressingMode => "addressing_mode",
            EnumType::FilterMode => "filter_mode",
            EnumType::MapFlags => "map_flags",
            EnumType::ProgramBinaryType => "program_binary_type",
            EnumType::BuildStatus => "build_status",
            EnumType::KernelArgAddressQualifier => "kernel_arg_address_qualifier",
            EnumType::KernelArgAccessQualifier => "kernel_arg_access_qualifier",
            EnumType::KernelArgTypeQualifier => "kernel_arg_type_qualifier",
            EnumType::CommandType => "command_type",
            EnumType::CommandExecutionStatus => "command_execution_status",
            EnumType::BufferCreateType => "buffer_create_type",
        }
    }

    /// Parse a snake-case type name
    pub fn from_name(name: &str) -> Option<EnumType> {
        EnumType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumRow {
    /// Enumeration type the row belongs to
    pub ty: EnumType,
    /// Native value, widened to `i64`
    pub value: i64,
    /// Canonical name
    pub name: &'static str,
    /// Revision that introduced the value
    pub since: ApiVersion,
}

macro_rules! rows {
    ($( $since:ident $ty:ident $value:expr => $name:literal ),* $(,)?) => {
        &[ $( EnumRow { ty: EnumType::$ty, value: $value as i64, name: $name, since: $since } ),* ]
    };
}

// Rows of one type stay adjacent; the grouping below rejects anything else.
const ROWS: &[EnumRow] = rows![
    V1_0 DeviceType CL_DEVICE_TYPE_DEFAULT => "default",
    V1_0 DeviceType CL_DEVICE_TYPE_CPU => "cpu",
    V1_0 DeviceType CL_DEVICE_TYPE_GPU => "gpu",
    V1_0 DeviceType CL_DEVICE_TYPE_ACCELERATOR => "accelerator",
    V1_2 DeviceType CL_DEVICE_TYPE_CUSTOM => "custom",
    V1_0 DeviceType CL_DEVICE_TYPE_ALL => "all",
    V1_0 DeviceFpConfig CL_FP_DENORM => "denorm",
    V1_0 DeviceFpConfig CL_FP_INF_NAN => "inf_nan",
    V1_0 DeviceFpConfig CL_FP_ROUND_TO_NEAREST => "round_to_nearest",
    V1_0 DeviceFpConfig CL_FP_ROUND_TO_ZERO => "round_to_zero",
    V1_0 DeviceFpConfig CL_FP_ROUND_TO_INF => "round_to_inf",
    V1_0 DeviceFpConfig CL_FP_FMA => "fma",
    V1_1 DeviceFpConfig CL_FP_SOFT_FLOAT => "soft_float",
    V1_2 DeviceFpConfig CL_FP_CORRECTLY_ROUNDED_DIVIDE_SQRT => "correctly_rounded_divide_sqrt",
    V1_0 DeviceMemCacheType CL_NONE => "none",
    V1_0 DeviceMemCacheType CL_READ_ONLY_CACHE => "readonly_cache",
    V1_0 DeviceMemCacheType CL_READ_WRITE_CACHE => "readwrite_cache",
    V1_0 DeviceLocalMemType CL_LOCAL => "local",
    V1_0 DeviceLocalMemType CL_GLOBAL => "global",
    V1_0 DeviceExecCapabilities CL_EXEC_KERNEL => "kernel",
    V1_0 DeviceExecCapabilities CL_EXEC_NATIVE_KERNEL => "native_kernel",
    V1_0 CommandQueueProperties CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE => "out_of_order_exec_mode_enable",
    V1_0 CommandQueueProperties CL_QUEUE_PROFILING_ENABLE => "profiling_enable",
    V1_0 ContextProperties CL_CONTEXT_PLATFORM => "platform",
    V1_2 ContextProperties CL_CONTEXT_INTEROP_USER_SYNC => "interop_user_sync",
    V1_2 DevicePartitionProperty CL_DEVICE_PARTITION_EQUALLY => "equally",
    V1_2 DevicePartitionProperty CL_DEVICE_PARTITION_BY_COUNTS => "by_counts",
    V1_2 DevicePartitionProperty CL_DEVICE_PARTITION_BY_COUNTS_LIST_END => "by_counts_list_end",
    V1_2 DevicePartitionProperty CL_DEVICE_PARTITION_BY_AFFINITY_DOMAIN => "by_affinity_domain",
    V1_2 DeviceAffinityDomain CL_DEVICE_AFFINITY_DOMAIN_NUMA => "numa",
    V1_2 DeviceAffinityDomain CL_DEVICE_AFFINITY_DOMAIN_L4_CACHE => "l4_cache",
    V1_2 DeviceAffinityDomain CL_DEVICE_AFFINITY_DOMAIN_L3_CACHE => "l3_cache",
    V1_2 DeviceAffinityDomain CL_DEVICE_AFFINITY_DOMAIN_L2_CACHE => "l2_cache",
    V1_2 DeviceAffinityDomain CL_DEVICE_AFFINITY_DOMAIN_L1_CACHE => "l1_cache",
    V1_2 DeviceAffinityDomain CL_DEVICE_AFFINITY_DOMAIN_NEXT_PARTITIONABLE => "next_partitionable",
    V1_0 MemFlags CL_MEM_READ_WRITE => "read_write",
    V1_0 MemFlags CL_MEM_WRITE_ONLY => "write_only",
    V1_0 MemFlags CL_MEM_READ_ONLY => "read_only",
    V1_0 MemFlags CL_MEM_USE_HOST_PTR => "use_host_ptr",
    V1_0 MemFlags CL_MEM_ALLOC_HOST_PTR => "alloc_host_ptr",
    V1_0 MemFlags CL_MEM_COPY_HOST_PTR => "copy_host_ptr",
    V1_2 MemFlags CL_MEM_HOST_WRITE_ONLY => "host_write_only",
    V1_2 MemFlags CL_MEM_HOST_READ_ONLY => "host_read_only",
    V1_2 MemFlags CL_MEM_HOST_NO_ACCESS => "host_no_access",
    V1_2 MemMigrationFlags CL_MIGRATE_MEM_OBJECT_HOST => "host",
    V1_2 MemMigrationFlags CL_MIGRATE_MEM_OBJECT_CONTENT_UNDEFINED => "content_undefined",
    V1_0 ChannelOrder CL_R => "r",
    V1_0 ChannelOrder CL_A => "a",
    V1_0 ChannelOrder CL_RG => "rg",
    V1_0 ChannelOrder CL_RA => "ra",
    V1_0 ChannelOrder CL_RGB => "rgb",
    V1_0 ChannelOrder CL_RGBA => "rgba",
    V1_0 ChannelOrder CL_BGRA => "bgra",
    V1_0 ChannelOrder CL_ARGB => "argb",
    V1_0 ChannelOrder CL_INTENSITY => "intensity",
    V1_0 ChannelOrder CL_LUMINANCE => "luminance",
    V1_1 ChannelOrder CL_RX => "rx",
    V1_1 ChannelOrder CL_RGX => "rgx",
    V1_1 ChannelOrder CL_RGBX => "rgbx",
    V1_0 ChannelType CL_SNORM_INT8 => "snormint8",
    V1_0 ChannelType CL_SNORM_INT16 => "snormint16",
    V1_0 ChannelType CL_UNORM_INT8 => "unormint8",
    V1_0 ChannelType CL_UNORM_INT16 => "unormint16",
    V1_0 ChannelType CL_UNORM_SHORT_565 => "unormshort_565",
    V1_0 ChannelType CL_UNORM_SHORT_555 => "unormshort_555",
    V1_0 ChannelType CL_UNORM_INT_101010 => "unormint_101010",
    V1_0 ChannelType CL_SIGNED_INT8 => "signedint8",
    V1_0 ChannelType CL_SIGNED_INT16 => "signedint16",
    V1_0 ChannelType CL_SIGNED_INT32 => "signedint32",
    V1_0 ChannelType CL_UNSIGNED_INT8 => "unsignedint8",
    V1_0 ChannelType CL_UNSIGNED_INT16 => "unsignedint16",
    V1_0 ChannelType CL_UNSIGNED_INT32 => "unsignedint32",
    V1_0 ChannelType CL_HALF_FLOAT => "halffloat",
    V1_0 ChannelType CL_FLOAT => "float",
    V1_0 MemObjectType CL_MEM_OBJECT_BUFFER => "buffer",
    V1_0 MemObjectType CL_MEM_OBJECT_IMAGE2D => "image2d",
    V1_0 MemObjectType CL_MEM_OBJECT_IMAGE3D => "image3d",
    V1_2 MemObjectType CL_MEM_OBJECT_IMAGE2D_ARRAY => "image2d_array",
    V1_2 MemObjectType CL_MEM_OBJECT_IMAGE1D => "image1d",
    V1_2 MemObjectType CL_MEM_OBJECT_IMAGE1D_ARRAY => "image1d_array",
    V1_2 MemObjectType CL_MEM_OBJECT_IMAGE1D_BUFFER => "image1d_buffer",
    V1_0 AddressingMode CL_ADDRESS_NONE => "none",
    V1_0 AddressingMode CL_ADDRESS_CLAMP_TO_EDGE => "clamp_to_edge",
    V1_0 AddressingMode CL_ADDRESS_CLAMP => "clamp",
    V1_0 AddressingMode CL_ADDRESS_REPEAT => "repeat",
    V1_1 AddressingMode CL_ADDRESS_MIRRORED_REPEAT => "mirrored_repeat",
    V1_0 FilterMode CL_FILTER_NEAREST => "nearest",
    V1_0 FilterMode CL_FILTER_LINEAR => "linear",
    V1_0 MapFlags CL_MAP_READ => "read",
    V1_0 MapFlags CL_MAP_WRITE => "write",
    V1_2 MapFlags CL_MAP_WRITE_INVALIDATE_REGION => "write_invalidate_region",
    V1_2 ProgramBinaryType CL_PROGRAM_BINARY_TYPE_NONE => "none",
    V1_2 ProgramBinaryType CL_PROGRAM_BINARY_TYPE_COMPILED_OBJECT => "compiled_object",
    V1_2 ProgramBinaryType CL_PROGRAM_BINARY_TYPE_LIBRARY => "library",
    V1_2 ProgramBinaryType CL_PROGRAM_BINARY_TYPE_EXECUTABLE => "executable",
    V1_0 BuildStatus CL_BUILD_SUCCESS => "success",
    V1_0 BuildStatus CL_BUILD_NONE => "none",
    V1_0 BuildStatus CL_BUILD_ERROR => "error",
    V1_0 BuildStatus CL_BUILD_IN_PROGRESS => "in_progress",
    V1_2 KernelArgAddressQualifier CL_KERNEL_ARG_ADDRESS_GLOBAL => "global",
    V1_2 KernelArgAddressQualifier CL_KERNEL_ARG_ADDRESS_LOCAL => "local",
    V1_2 KernelArgAddressQualifier CL_KERNEL_ARG_ADDRESS_CONSTANT => "constant",
    V1_2 KernelArgAddressQualifier CL_KERNEL_ARG_ADDRESS_PRIVATE => "private",
    V1_2 KernelArgAccessQualifier CL_KERNEL_ARG_ACCESS_READ_ONLY => "read_only",
    V1_2 KernelArgAccessQualifier CL_KERNEL_ARG_ACCESS_WRITE_ONLY => "write_only",
    V1_2 KernelArgAccessQualifier CL_KERNEL_ARG_ACCESS_READ_WRITE => "read_write",
    V1_2 KernelArgAccessQualifier CL_KERNEL_ARG_ACCESS_NONE => "none",
    V1_2 KernelArgTypeQualifier CL_KERNEL_ARG_TYPE_NONE => "type_none",
    V1_2 KernelArgTypeQualifier CL_KERNEL_ARG_TYPE_CONST => "type_const",
    V1_2 KernelArgTypeQualifier CL_KERNEL_ARG_TYPE_RESTRICT => "type_restrict",
    V1_2 KernelArgTypeQualifier CL_KERNEL_ARG_TYPE_VOLATILE => "type_volatile",
    V1_0 CommandType CL_COMMAND_NDRANGE_KERNEL => "ndrange_kernel",
    V1_0 CommandType CL_COMMAND_TASK => "task",
    V1_0 CommandType CL_COMMAND_NATIVE_KERNEL => "native_kernel",
    V1_0 CommandType CL_COMMAND_READ_BUFFER => "read_buffer",
    V1_0 CommandType CL_COMMAND_WRITE_BUFFER => "write_buffer",
    V1_0 CommandType CL_COMMAND_COPY_BUFFER => "copy_buffer",
    V1_0 CommandType CL_COMMAND_READ_IMAGE => "read_image",
    V1_0 CommandType CL_COMMAND_WRITE_IMAGE => "write_image",
    V1_0 CommandType CL_COMMAND_COPY_IMAGE => "copy_image",
    V1_0 CommandType CL_COMMAND_COPY_IMAGE_TO_BUFFER => "copy_image_to_buffer",
    V1_0 CommandType CL_COMMAND_COPY_BUFFER_TO_IMAGE => "copy_buffer_to_image",
    V1_0 CommandType CL_COMMAND_MAP_BUFFER => "map_buffer",
    V1_0 CommandType CL_COMMAND_MAP_IMAGE => "map_image",
    V1_0 CommandType CL_COMMAND_UNMAP_MEM_OBJECT => "unmap_mem_object",
    V1_0 CommandType CL_COMMAND_MARKER => "marker",
    V1_0 CommandType CL_COMMAND_ACQUIRE_GL_OBJECTS => "acquire_gl_objects",
    V1_0 CommandType CL_COMMAND_RELEASE_GL_OBJECTS => "release_gl_objects",
    V1_1 CommandType CL_COMMAND_READ_BUFFER_RECT => "read_buffer_rect",
    V1_1 CommandType CL_COMMAND_WRITE_BUFFER_RECT => "write_buffer_rect",
    V1_1 CommandType CL_COMMAND_COPY_BUFFER_RECT => "copy_buffer_rect",
    V1_1 CommandType CL_COMMAND_USER => "user",
    V1_2 CommandType CL_COMMAND_BARRIER => "barrier",
    V1_2 CommandType CL_COMMAND_MIGRATE_MEM_OBJECTS => "migrate_mem_objects",
    V1_2 CommandType CL_COMMAND_FILL_BUFFER => "fill_buffer",
    V1_2 CommandType CL_COMMAND_FILL_IMAGE => "fill_image",
    V1_0 CommandExecutionStatus CL_COMPLETE => "complete",
    V1_0 CommandExecutionStatus CL_RUNNING => "running",
    V1_0 CommandExecutionStatus CL_SUBMITTED => "submitted",
    V1_0 CommandExecutionStatus CL_QUEUED => "queued",
    V1_1 BufferCreateType CL_BUFFER_CREATE_TYPE_REGION => "region",
];

/// Catalog grouped by enumeration type
pub struct Catalog {
    runs: BTreeMap<EnumType, Vec<&'static EnumRow>>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

impl Catalog {
    fn build() -> Self {
        let mut runs: BTreeMap<EnumType, Vec<&'static EnumRow>> = BTreeMap::new();
        for row in ROWS.iter().filter(|r| r.since.is_available()) {
            runs.entry(row.ty).or_default().push(row);
        }
        Catalog { runs }
    }

    /// Compiled catalog
    pub fn get() -> &'static Catalog {
        &CATALOG
    }

    /// Rows of one type, in row order. Empty when every row of the type
    /// is newer than this build.
    pub fn entries(&self, ty: EnumType) -> &[&'static EnumRow] {
        self.runs.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check that each type occupies one contiguous run of the row list
    pub fn validate(&self) -> ClResult<()> {
        let mut seen = Vec::new();
        let mut current = None;
        for row in ROWS {
            if current != Some(row.ty) {
                if seen.contains(&row.ty) {
                    return Err(ClError::SchemaInvariant(format!(
                        "enum rows of {} are not contiguous",
                        row.ty
                    )));
                }
                seen.push(row.ty);
                current = Some(row.ty);
            }
        }
        Ok(())
    }
}

/// Name of a native enum value. No match is an error, never a numeric fallback.
pub fn decode_enum(value: i64, ty: EnumType) -> ClResult<&'static str> {
    Catalog::get()
        .entries(ty)
        .iter()
        .find(|r| r.value == value)
        .map(|r| r.name)
        .ok_or(ClError::UnknownEnumValue {
            enum_type: ty.name(),
            value,
        })
}

/// Names of every flag contained in `value`, joined by ", " in row order.
///
/// A zero-valued row only matches a zero input.
pub fn decode_bitfield(value: u64, ty: EnumType) -> String {
    let mut out = String::new();
    for row in Catalog::get().entries(ty) {
        let bits = row.value as u64;
        let hit = if bits == 0 { value == 0 } else { value & bits == bits };
        if hit {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(row.name);
        }
    }
    out
}

/// Native value for a canonical name
pub fn encode_enum(name: &str, ty: EnumType) -> ClResult<i64> {
    Catalog::get()
        .entries(ty)
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.value)
        .ok_or_else(|| ClError::UnknownEnumName {
            enum_type: ty.name(),
            name: name.to_string(),
        })
}

/// OR of the flags named in `names` (separated by `,` or `|`)
pub fn encode_bitfield(names: &str, ty: EnumType) -> ClResult<u64> {
    names
        .split([',', '|'])
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .try_fold(0u64, |acc, n| Ok(acc | encode_enum(n, ty)? as u64))
}

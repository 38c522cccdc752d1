//! Info schema: queryable properties of each object category
//!
//! A flat list of `(table, native id, friendly name, shape)` rows sorted by
//! native id. The per-table runs and the category boundary table are derived
//! from the list at first use instead of being maintained by hand, and
//! `Schema::validate` rejects a list whose ordering has drifted.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;

use crate::catalog::EnumType;
use crate::driver::consts::*;
use crate::error::{ClError, ClResult};
use crate::object::Category;
use crate::version::ApiVersion::{self, V1_0, V1_1, V1_2};

/// Sentinel closing the last run of the boundary table
pub const SENTINEL_ID: u32 = 0xFFFF;

/// One native `clGet*Info` entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InfoTable {
    /// `clGetPlatformInfo`
    Platform,
    /// `clGetDeviceInfo`
    Device,
    /// `clGetContextInfo`
    Context,
    /// `clGetCommandQueueInfo`
    Queue,
    /// `clGetMemObjectInfo`
    Mem,
    /// `clGetImageInfo`
    Image,
    /// `clGetSamplerInfo`
    Sampler,
    /// `clGetProgramInfo`
    Program,
    /// `clGetProgramBuildInfo`, keyed by device
    ProgramBuild,
    /// `clGetKernelInfo`
    Kernel,
    /// `clGetKernelArgInfo`, keyed by argument index
    KernelArg,
    /// `clGetKernelWorkGroupInfo`, keyed by device
    Workgroup,
    /// `clGetEventInfo`
    Event,
    /// `clGetEventProfilingInfo`
    Profiling,
}

/// Secondary key a table needs besides the object handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Handle only
    None,
    /// Handle plus a device
    Device,
    /// Handle plus an argument index
    ArgIndex,
}

impl InfoTable {
    /// Every table, in native id order
    pub const ALL: [InfoTable; 14] = [
        InfoTable::Platform,
        InfoTable::Device,
        InfoTable::Context,
        InfoTable::Queue,
        InfoTable::Mem,
        InfoTable::Image,
        InfoTable::Sampler,
        InfoTable::Program,
        InfoTable::ProgramBuild,
        InfoTable::Kernel,
        InfoTable::KernelArg,
        InfoTable::Workgroup,
        InfoTable::Event,
        InfoTable::Profiling,
    ];

    /// Snake-case table name
    pub const fn name(self) -> &'static str {
        match self {
            InfoTable::Platform => "platform",
            InfoTable::Device => "device",
            InfoTable::Context => "context",
            InfoTable::Queue => "queue",
            InfoTable::Mem => "mem",
            InfoTable::Image => "image",
            InfoTable::Sampler => "sampler",
            InfoTable::Program => "program",
            InfoTable::ProgramBuild => "program_build",
            InfoTable::Kernel => "kernel",
            InfoTable::KernelArg => "kernel_arg",
            InfoTable::Workgroup => "workgroup",
            InfoTable::Event => "event",
            InfoTable::Profiling => "profiling",
        }
    }

    /// Secondary key required by the native entry point
    pub const fn key_kind(self) -> KeyKind {
        match self {
            InfoTable::ProgramBuild | InfoTable::Workgroup => KeyKind::Device,
            InfoTable::KernelArg => KeyKind::ArgIndex,
            _ => KeyKind::None,
        }
    }

    /// Parse a snake-case table name
    pub fn from_name(name: &str) -> Option<InfoTable> {
        InfoTable::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for InfoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-width native scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prim {
    /// `cl_uint`
    U32,
    /// `cl_int`
    I32,
    /// `cl_ulong`
    U64,
    /// `size_t`
    Usize,
    /// `intptr_t` / `cl_*_properties`
    Isize,
}

impl Prim {
    /// Width in bytes
    pub const fn width(self) -> usize {
        match self {
            Prim::U32 | Prim::I32 => 4,
            Prim::U64 => 8,
            Prim::Usize => std::mem::size_of::<usize>(),
            Prim::Isize => std::mem::size_of::<isize>(),
        }
    }
}

/// How a property's raw bytes become a host value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One number
    Scalar(Prim),
    /// `cl_bool`
    Bool,
    /// Opaque address, exposed as-is
    Pointer,
    /// Handle re-wrapped as an object of the category
    Handle(Category),
    /// Array of handles, each re-wrapped
    HandleArray(Category),
    /// NUL-terminated string
    Str,
    /// Array of numbers
    Array(Prim),
    /// One enum value stored at the given width
    Enum(EnumType, Prim),
    /// Array of enum values
    EnumArray(EnumType, Prim),
    /// `cl_bitfield` decoded to flag names
    Bitfield(EnumType),
    /// `cl_image_format { order, data_type }`
    ImageFormat,
    /// Zero-terminated `(key, value)` property list
    ContextProperties,
    /// Command status, negative values being error codes
    ExecutionStatus,
    /// Array of blobs whose lengths come from a sibling property
    Binaries {
        /// Friendly name of the sibling size array
        sizes: &'static str,
    },
}

/// One schema row
#[derive(Debug, Clone, Copy)]
pub struct InfoRow {
    /// Table the row belongs to
    pub table: InfoTable,
    /// Native parameter id
    pub id: u32,
    /// Friendly name; may repeat across tables
    pub name: &'static str,
    /// Value shape
    pub shape: Shape,
    /// Revision that introduced the property
    pub since: ApiVersion,
}

const U32: Shape = Shape::Scalar(Prim::U32);
const U64: Shape = Shape::Scalar(Prim::U64);
const USIZE: Shape = Shape::Scalar(Prim::Usize);
const BOOL: Shape = Shape::Bool;
const STR: Shape = Shape::Str;

macro_rules! rows {
    ($( $since:ident $table:ident $id:ident $name:literal => $shape:expr ),* $(,)?) => {
        &[ $( InfoRow { table: InfoTable::$table, id: $id, name: $name, shape: $shape, since: $since } ),* ]
    };
}

use crate::catalog::EnumType as E;
use crate::object::Category as C;
use self::Shape as S;

const ROWS: &[InfoRow] = rows![
    V1_0 Platform CL_PLATFORM_PROFILE "profile" => STR,
    V1_0 Platform CL_PLATFORM_VERSION "version" => STR,
    V1_0 Platform CL_PLATFORM_NAME "name" => STR,
    V1_0 Platform CL_PLATFORM_VENDOR "vendor" => STR,
    V1_0 Platform CL_PLATFORM_EXTENSIONS "extensions" => STR,
    V1_0 Device CL_DEVICE_TYPE "type" => S::Bitfield(E::DeviceType),
    V1_0 Device CL_DEVICE_VENDOR_ID "vendor_id" => U32,
    V1_0 Device CL_DEVICE_MAX_COMPUTE_UNITS "max_compute_units" => U32,
    V1_0 Device CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS "max_work_item_dimensions" => U32,
    V1_0 Device CL_DEVICE_MAX_WORK_GROUP_SIZE "max_work_group_size" => USIZE,
    V1_0 Device CL_DEVICE_MAX_WORK_ITEM_SIZES "max_work_item_sizes" => S::Array(Prim::Usize),
    V1_0 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_CHAR "preferred_vector_width_char" => U32,
    V1_0 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_SHORT "preferred_vector_width_short" => U32,
    V1_0 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_INT "preferred_vector_width_int" => U32,
    V1_0 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_LONG "preferred_vector_width_long" => U32,
    V1_0 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT "preferred_vector_width_float" => U32,
    V1_0 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE "preferred_vector_width_double" => U32,
    V1_0 Device CL_DEVICE_MAX_CLOCK_FREQUENCY "max_clock_frequency" => U32,
    V1_0 Device CL_DEVICE_ADDRESS_BITS "address_bits" => U32,
    V1_0 Device CL_DEVICE_MAX_READ_IMAGE_ARGS "max_read_image_args" => U32,
    V1_0 Device CL_DEVICE_MAX_WRITE_IMAGE_ARGS "max_write_image_args" => U32,
    V1_0 Device CL_DEVICE_MAX_MEM_ALLOC_SIZE "max_mem_alloc_size" => U64,
    V1_0 Device CL_DEVICE_IMAGE2D_MAX_WIDTH "image2d_max_width" => USIZE,
    V1_0 Device CL_DEVICE_IMAGE2D_MAX_HEIGHT "image2d_max_height" => USIZE,
    V1_0 Device CL_DEVICE_IMAGE3D_MAX_WIDTH "image3d_max_width" => USIZE,
    V1_0 Device CL_DEVICE_IMAGE3D_MAX_HEIGHT "image3d_max_height" => USIZE,
    V1_0 Device CL_DEVICE_IMAGE3D_MAX_DEPTH "image3d_max_depth" => USIZE,
    V1_0 Device CL_DEVICE_IMAGE_SUPPORT "image_support" => BOOL,
    V1_0 Device CL_DEVICE_MAX_PARAMETER_SIZE "max_parameter_size" => USIZE,
    V1_0 Device CL_DEVICE_MAX_SAMPLERS "max_samplers" => U32,
    V1_0 Device CL_DEVICE_MEM_BASE_ADDR_ALIGN "mem_base_addr_align" => U32,
    V1_0 Device CL_DEVICE_MIN_DATA_TYPE_ALIGN_SIZE "min_data_type_align_size" => U32,
    V1_0 Device CL_DEVICE_SINGLE_FP_CONFIG "single_fp_config" => S::Bitfield(E::DeviceFpConfig),
    V1_0 Device CL_DEVICE_GLOBAL_MEM_CACHE_TYPE "global_mem_cache_type" => S::Enum(E::DeviceMemCacheType, Prim::U32),
    V1_0 Device CL_DEVICE_GLOBAL_MEM_CACHELINE_SIZE "global_mem_cacheline_size" => U32,
    V1_0 Device CL_DEVICE_GLOBAL_MEM_CACHE_SIZE "global_mem_cache_size" => U64,
    V1_0 Device CL_DEVICE_GLOBAL_MEM_SIZE "global_mem_size" => U64,
    V1_0 Device CL_DEVICE_MAX_CONSTANT_BUFFER_SIZE "max_constant_buffer_size" => U64,
    V1_0 Device CL_DEVICE_MAX_CONSTANT_ARGS "max_constant_args" => U32,
    V1_0 Device CL_DEVICE_LOCAL_MEM_TYPE "local_mem_type" => S::Enum(E::DeviceLocalMemType, Prim::U32),
    V1_0 Device CL_DEVICE_LOCAL_MEM_SIZE "local_mem_size" => U64,
    V1_0 Device CL_DEVICE_ERROR_CORRECTION_SUPPORT "error_correction_support" => BOOL,
    V1_0 Device CL_DEVICE_PROFILING_TIMER_RESOLUTION "profiling_timer_resolution" => USIZE,
    V1_0 Device CL_DEVICE_ENDIAN_LITTLE "endian_little" => BOOL,
    V1_0 Device CL_DEVICE_AVAILABLE "available" => BOOL,
    V1_0 Device CL_DEVICE_COMPILER_AVAILABLE "compiler_available" => BOOL,
    V1_0 Device CL_DEVICE_EXECUTION_CAPABILITIES "execution_capabilities" => S::Bitfield(E::DeviceExecCapabilities),
    V1_0 Device CL_DEVICE_QUEUE_PROPERTIES "queue_properties" => S::Bitfield(E::CommandQueueProperties),
    V1_0 Device CL_DEVICE_NAME "name" => STR,
    V1_0 Device CL_DEVICE_VENDOR "vendor" => STR,
    V1_0 Device CL_DRIVER_VERSION "driver_version" => STR,
    V1_0 Device CL_DEVICE_PROFILE "profile" => STR,
    V1_0 Device CL_DEVICE_VERSION "version" => STR,
    V1_0 Device CL_DEVICE_EXTENSIONS "extensions" => STR,
    V1_0 Device CL_DEVICE_PLATFORM "platform" => S::Handle(C::Platform),
    V1_2 Device CL_DEVICE_DOUBLE_FP_CONFIG "double_fp_config" => S::Bitfield(E::DeviceFpConfig),
    V1_1 Device CL_DEVICE_PREFERRED_VECTOR_WIDTH_HALF "preferred_vector_width_half" => U32,
    V1_1 Device CL_DEVICE_HOST_UNIFIED_MEMORY "host_unified_memory" => BOOL,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_CHAR "native_vector_width_char" => U32,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_SHORT "native_vector_width_short" => U32,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_INT "native_vector_width_int" => U32,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_LONG "native_vector_width_long" => U32,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_FLOAT "native_vector_width_float" => U32,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_DOUBLE "native_vector_width_double" => U32,
    V1_1 Device CL_DEVICE_NATIVE_VECTOR_WIDTH_HALF "native_vector_width_half" => U32,
    V1_1 Device CL_DEVICE_OPENCL_C_VERSION "opencl_c_version" => STR,
    V1_2 Device CL_DEVICE_LINKER_AVAILABLE "linker_available" => BOOL,
    V1_2 Device CL_DEVICE_BUILT_IN_KERNELS "built_in_kernels" => STR,
    V1_2 Device CL_DEVICE_IMAGE_MAX_BUFFER_SIZE "image_max_buffer_size" => USIZE,
    V1_2 Device CL_DEVICE_IMAGE_MAX_ARRAY_SIZE "image_max_array_size" => USIZE,
    V1_2 Device CL_DEVICE_PARENT_DEVICE "parent_device" => S::Handle(C::Device),
    V1_2 Device CL_DEVICE_PARTITION_MAX_SUB_DEVICES "partition_max_sub_devices" => U32,
    V1_2 Device CL_DEVICE_PARTITION_PROPERTIES "partition_properties" => S::EnumArray(E::DevicePartitionProperty, Prim::Isize),
    V1_2 Device CL_DEVICE_PARTITION_AFFINITY_DOMAIN "partition_affinity_domain" => S::Bitfield(E::DeviceAffinityDomain),
    V1_2 Device CL_DEVICE_PARTITION_TYPE "partition_type" => S::Array(Prim::Isize),
    V1_2 Device CL_DEVICE_REFERENCE_COUNT "reference_count" => U32,
    V1_2 Device CL_DEVICE_PREFERRED_INTEROP_USER_SYNC "preferred_interop_user_sync" => BOOL,
    V1_2 Device CL_DEVICE_PRINTF_BUFFER_SIZE "printf_buffer_size" => USIZE,
    V1_0 Context CL_CONTEXT_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Context CL_CONTEXT_DEVICES "devices" => S::HandleArray(C::Device),
    V1_0 Context CL_CONTEXT_PROPERTIES "properties" => S::ContextProperties,
    V1_1 Context CL_CONTEXT_NUM_DEVICES "num_devices" => U32,
    V1_0 Queue CL_QUEUE_CONTEXT "context" => S::Handle(C::Context),
    V1_0 Queue CL_QUEUE_DEVICE "device" => S::Handle(C::Device),
    V1_0 Queue CL_QUEUE_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Queue CL_QUEUE_PROPERTIES "properties" => S::Bitfield(E::CommandQueueProperties),
    V1_0 Mem CL_MEM_TYPE "type" => S::Enum(E::MemObjectType, Prim::U32),
    V1_0 Mem CL_MEM_FLAGS "flags" => S::Bitfield(E::MemFlags),
    V1_0 Mem CL_MEM_SIZE "size" => USIZE,
    V1_0 Mem CL_MEM_HOST_PTR "host_ptr" => S::Pointer,
    V1_0 Mem CL_MEM_MAP_COUNT "map_count" => U32,
    V1_0 Mem CL_MEM_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Mem CL_MEM_CONTEXT "context" => S::Handle(C::Context),
    V1_1 Mem CL_MEM_ASSOCIATED_MEMOBJECT "associated_memobject" => S::Handle(C::Mem),
    V1_1 Mem CL_MEM_OFFSET "offset" => USIZE,
    V1_0 Image CL_IMAGE_FORMAT "format" => S::ImageFormat,
    V1_0 Image CL_IMAGE_ELEMENT_SIZE "element_size" => USIZE,
    V1_0 Image CL_IMAGE_ROW_PITCH "row_pitch" => USIZE,
    V1_0 Image CL_IMAGE_SLICE_PITCH "slice_pitch" => USIZE,
    V1_0 Image CL_IMAGE_WIDTH "width" => USIZE,
    V1_0 Image CL_IMAGE_HEIGHT "height" => USIZE,
    V1_0 Image CL_IMAGE_DEPTH "depth" => USIZE,
    V1_2 Image CL_IMAGE_ARRAY_SIZE "array_size" => USIZE,
    V1_2 Image CL_IMAGE_BUFFER "buffer" => S::Handle(C::Mem),
    V1_2 Image CL_IMAGE_NUM_MIP_LEVELS "num_mip_levels" => U32,
    V1_2 Image CL_IMAGE_NUM_SAMPLES "num_samples" => U32,
    V1_0 Sampler CL_SAMPLER_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Sampler CL_SAMPLER_CONTEXT "context" => S::Handle(C::Context),
    V1_0 Sampler CL_SAMPLER_NORMALIZED_COORDS "normalized_coords" => BOOL,
    V1_0 Sampler CL_SAMPLER_ADDRESSING_MODE "addressing_mode" => S::Enum(E::AddressingMode, Prim::U32),
    V1_0 Sampler CL_SAMPLER_FILTER_MODE "filter_mode" => S::Enum(E::FilterMode, Prim::U32),
    V1_0 Program CL_PROGRAM_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Program CL_PROGRAM_CONTEXT "context" => S::Handle(C::Context),
    V1_0 Program CL_PROGRAM_NUM_DEVICES "num_devices" => U32,
    V1_0 Program CL_PROGRAM_DEVICES "devices" => S::HandleArray(C::Device),
    V1_0 Program CL_PROGRAM_SOURCE "source" => STR,
    V1_0 Program CL_PROGRAM_BINARY_SIZES "binary_sizes" => S::Array(Prim::Usize),
    V1_0 Program CL_PROGRAM_BINARIES "binaries" => S::Binaries { sizes: "binary_sizes" },
    V1_2 Program CL_PROGRAM_NUM_KERNELS "num_kernels" => USIZE,
    V1_2 Program CL_PROGRAM_KERNEL_NAMES "kernel_names" => STR,
    V1_0 ProgramBuild CL_PROGRAM_BUILD_STATUS "build_status" => S::Enum(E::BuildStatus, Prim::I32),
    V1_0 ProgramBuild CL_PROGRAM_BUILD_OPTIONS "build_options" => STR,
    V1_0 ProgramBuild CL_PROGRAM_BUILD_LOG "build_log" => STR,
    V1_2 ProgramBuild CL_PROGRAM_BINARY_TYPE "binary_type" => S::Enum(E::ProgramBinaryType, Prim::U32),
    V1_0 Kernel CL_KERNEL_FUNCTION_NAME "function_name" => STR,
    V1_0 Kernel CL_KERNEL_NUM_ARGS "num_args" => U32,
    V1_0 Kernel CL_KERNEL_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Kernel CL_KERNEL_CONTEXT "context" => S::Handle(C::Context),
    V1_0 Kernel CL_KERNEL_PROGRAM "program" => S::Handle(C::Program),
    V1_2 Kernel CL_KERNEL_ATTRIBUTES "attributes" => STR,
    V1_2 KernelArg CL_KERNEL_ARG_ADDRESS_QUALIFIER "address_qualifier" => S::Enum(E::KernelArgAddressQualifier, Prim::U32),
    V1_2 KernelArg CL_KERNEL_ARG_ACCESS_QUALIFIER "access_qualifier" => S::Enum(E::KernelArgAccessQualifier, Prim::U32),
    V1_2 KernelArg CL_KERNEL_ARG_TYPE_NAME "type_name" => STR,
    V1_2 KernelArg CL_KERNEL_ARG_TYPE_QUALIFIER "type_qualifier" => S::Bitfield(E::KernelArgTypeQualifier),
    V1_2 KernelArg CL_KERNEL_ARG_NAME "name" => STR,
    V1_0 Workgroup CL_KERNEL_WORK_GROUP_SIZE "work_group_size" => USIZE,
    V1_0 Workgroup CL_KERNEL_COMPILE_WORK_GROUP_SIZE "compile_work_group_size" => S::Array(Prim::Usize),
    V1_0 Workgroup CL_KERNEL_LOCAL_MEM_SIZE "local_mem_size" => U64,
    V1_1 Workgroup CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE "preferred_work_group_size_multiple" => USIZE,
    V1_1 Workgroup CL_KERNEL_PRIVATE_MEM_SIZE "private_mem_size" => U64,
    V1_2 Workgroup CL_KERNEL_GLOBAL_WORK_SIZE "global_work_size" => S::Array(Prim::Usize),
    V1_0 Event CL_EVENT_COMMAND_QUEUE "command_queue" => S::Handle(C::Queue),
    V1_0 Event CL_EVENT_COMMAND_TYPE "command_type" => S::Enum(E::CommandType, Prim::U32),
    V1_0 Event CL_EVENT_REFERENCE_COUNT "reference_count" => U32,
    V1_0 Event CL_EVENT_COMMAND_EXECUTION_STATUS "command_execution_status" => S::ExecutionStatus,
    V1_1 Event CL_EVENT_CONTEXT "context" => S::Handle(C::Context),
    V1_0 Profiling CL_PROFILING_COMMAND_QUEUED "queued" => U64,
    V1_0 Profiling CL_PROFILING_COMMAND_SUBMIT "submit" => U64,
    V1_0 Profiling CL_PROFILING_COMMAND_START "start" => U64,
    V1_0 Profiling CL_PROFILING_COMMAND_END "end" => U64,
];

/// Compiled schema, grouped by table
pub struct Schema {
    runs: BTreeMap<InfoTable, Vec<&'static InfoRow>>,
}

static SCHEMA: Lazy<Schema> = Lazy::new(Schema::build);

impl Schema {
    fn build() -> Self {
        let mut runs: BTreeMap<InfoTable, Vec<&'static InfoRow>> = BTreeMap::new();
        for row in ROWS.iter().filter(|r| r.since.is_available()) {
            runs.entry(row.table).or_default().push(row);
        }
        Schema { runs }
    }

    /// Compiled schema
    pub fn get() -> &'static Schema {
        &SCHEMA
    }

    /// Rows of a table in native id order
    pub fn entries(&self, table: InfoTable) -> &[&'static InfoRow] {
        self.runs.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Row for a native id within a table
    pub fn lookup(&self, table: InfoTable, id: u32) -> Option<&'static InfoRow> {
        self.entries(table).iter().find(|r| r.id == id).copied()
    }

    /// Row for a friendly name within a table
    pub fn find(&self, table: InfoTable, name: &str) -> Option<&'static InfoRow> {
        self.entries(table).iter().find(|r| r.name == name).copied()
    }

    /// Every compiled row, in native id order
    pub fn rows(&self) -> impl Iterator<Item = &'static InfoRow> + '_ {
        self.runs.values().flat_map(|run| run.iter().copied())
    }

    /// First native id of each table, in `InfoTable::ALL` order, followed by
    /// `SENTINEL_ID`. A table with no compiled rows gets the next table's
    /// first id, so its range is empty.
    pub fn boundaries(&self) -> Vec<u32> {
        let mut out = vec![SENTINEL_ID; InfoTable::ALL.len() + 1];
        for (i, table) in InfoTable::ALL.iter().enumerate().rev() {
            out[i] = match self.entries(*table).first() {
                Some(row) => row.id,
                None => out[i + 1],
            };
        }
        out
    }

    /// Check ordering and naming invariants of the row list
    pub fn validate(&self) -> ClResult<()> {
        let mut last: Option<&InfoRow> = None;
        for row in ROWS {
            if let Some(prev) = last {
                if prev.table > row.table || prev.id >= row.id {
                    return Err(ClError::SchemaInvariant(format!(
                        "row {} ({:#x}) in {} follows {} ({:#x}) in {}",
                        row.name, row.id, row.table, prev.name, prev.id, prev.table
                    )));
                }
            }
            if row.id >= SENTINEL_ID {
                return Err(ClError::SchemaInvariant(format!(
                    "row {} uses an id at or above the sentinel",
                    row.name
                )));
            }
            last = Some(row);
        }

        for category in Category::ALL {
            let mut names = HashSet::new();
            for table in category.tables() {
                for row in self.entries(*table) {
                    if !names.insert(row.name) {
                        return Err(ClError::SchemaInvariant(format!(
                            "{} property '{}' is defined twice",
                            category.name(),
                            row.name
                        )));
                    }
                }
            }
        }

        for row in self.rows() {
            if let Shape::Binaries { sizes } = row.shape {
                let sibling = self.find(row.table, sizes).filter(|s| s.id < row.id);
                if sibling.is_none() {
                    return Err(ClError::SchemaInvariant(format!(
                        "{} needs '{}' queried before it",
                        row.name, sizes
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid() {
        Schema::get().validate().unwrap();
    }

    #[test]
    fn test_boundaries_match_runs() {
        let schema = Schema::get();
        let bounds = schema.boundaries();
        assert_eq!(bounds.len(), InfoTable::ALL.len() + 1);
        assert_eq!(*bounds.last().unwrap(), SENTINEL_ID);
        assert!(bounds.windows(2).all(|w| w[0] <= w[1]));
        for (i, table) in InfoTable::ALL.iter().enumerate() {
            let by_range: Vec<_> = schema
                .rows()
                .filter(|r| r.id >= bounds[i] && r.id < bounds[i + 1])
                .map(|r| r.name)
                .collect();
            let by_run: Vec<_> = schema.entries(*table).iter().map(|r| r.name).collect();
            assert_eq!(by_range, by_run, "{}", table);
        }
    }

    #[test]
    fn test_first_ids() {
        let schema = Schema::get();
        assert_eq!(schema.entries(InfoTable::Platform)[0].id, CL_PLATFORM_PROFILE);
        assert_eq!(schema.entries(InfoTable::Device)[0].id, CL_DEVICE_TYPE);
        assert_eq!(schema.entries(InfoTable::Profiling)[0].id, CL_PROFILING_COMMAND_QUEUED);
    }

    #[test]
    fn test_platform_names() {
        let names: Vec<_> = Schema::get()
            .entries(InfoTable::Platform)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["profile", "version", "name", "vendor", "extensions"]);
    }

    #[test]
    fn test_driver_version_has_its_own_name() {
        let row = Schema::get().lookup(InfoTable::Device, CL_DRIVER_VERSION).unwrap();
        assert_eq!(row.name, "driver_version");
    }

    #[test]
    fn test_version_filtering() {
        let arg = Schema::get().entries(InfoTable::KernelArg);
        assert_eq!(arg.is_empty(), !ApiVersion::V1_2.is_available());
        let ctx = Schema::get().find(InfoTable::Context, "num_devices");
        assert_eq!(ctx.is_some(), ApiVersion::V1_1.is_available());
    }

    #[test]
    fn test_table_names_round_trip() {
        for t in InfoTable::ALL {
            assert_eq!(InfoTable::from_name(t.name()), Some(t));
        }
        assert_eq!(InfoTable::ProgramBuild.key_kind(), KeyKind::Device);
        assert_eq!(InfoTable::KernelArg.key_kind(), KeyKind::ArgIndex);
    }
}

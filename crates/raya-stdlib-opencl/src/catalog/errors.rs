//! Error catalog: native status code → message

use once_cell::sync::Lazy;

use crate::driver::consts::*;
use crate::driver::Status;
use crate::error::{ClError, ClResult};
use crate::version::ApiVersion::{self, V1_0, V1_1, V1_2};

/// Message returned for codes missing from the catalog
pub const UNKNOWN_ERROR: &str = "unknown error";

/// One catalog row
#[derive(Debug, Clone, Copy)]
pub struct ErrorRow {
    /// Native status code
    pub code: Status,
    /// Human readable message
    pub message: &'static str,
    /// Revision that introduced the code
    pub since: ApiVersion,
}

const fn row(since: ApiVersion, code: Status, message: &'static str) -> ErrorRow {
    ErrorRow { code, message, since }
}

const ROWS: &[ErrorRow] = &[
    row(V1_0, CL_DEVICE_NOT_FOUND, "device not found"),
    row(V1_0, CL_DEVICE_NOT_AVAILABLE, "device not available"),
    row(V1_0, CL_COMPILER_NOT_AVAILABLE, "compiler not available"),
    row(V1_0, CL_MEM_OBJECT_ALLOCATION_FAILURE, "mem object allocation failure"),
    row(V1_0, CL_OUT_OF_RESOURCES, "out of resources"),
    row(V1_0, CL_OUT_OF_HOST_MEMORY, "out of host memory"),
    row(V1_0, CL_PROFILING_INFO_NOT_AVAILABLE, "profiling info not available"),
    row(V1_0, CL_MEM_COPY_OVERLAP, "mem copy overlap"),
    row(V1_0, CL_IMAGE_FORMAT_MISMATCH, "image format mismatch"),
    row(V1_0, CL_IMAGE_FORMAT_NOT_SUPPORTED, "image format not supported"),
    row(V1_0, CL_BUILD_PROGRAM_FAILURE, "build program failure"),
    row(V1_0, CL_MAP_FAILURE, "map failure"),
    row(V1_1, CL_MISALIGNED_SUB_BUFFER_OFFSET, "misaligned sub buffer offset"),
    row(V1_1, CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST, "exec status error for events in wait list"),
    row(V1_2, CL_COMPILE_PROGRAM_FAILURE, "compile program failure"),
    row(V1_2, CL_LINKER_NOT_AVAILABLE, "linker not available"),
    row(V1_2, CL_LINK_PROGRAM_FAILURE, "link program failure"),
    row(V1_2, CL_DEVICE_PARTITION_FAILED, "device partition failed"),
    row(V1_2, CL_KERNEL_ARG_INFO_NOT_AVAILABLE, "kernel arg info not available"),
    row(V1_0, CL_INVALID_VALUE, "invalid value"),
    row(V1_0, CL_INVALID_DEVICE_TYPE, "invalid device type"),
    row(V1_0, CL_INVALID_PLATFORM, "invalid platform"),
    row(V1_0, CL_INVALID_DEVICE, "invalid device"),
    row(V1_0, CL_INVALID_CONTEXT, "invalid context"),
    row(V1_0, CL_INVALID_QUEUE_PROPERTIES, "invalid queue properties"),
    row(V1_0, CL_INVALID_COMMAND_QUEUE, "invalid command queue"),
    row(V1_0, CL_INVALID_HOST_PTR, "invalid host ptr"),
    row(V1_0, CL_INVALID_MEM_OBJECT, "invalid mem object"),
    row(V1_0, CL_INVALID_IMAGE_FORMAT_DESCRIPTOR, "invalid image format descriptor"),
    row(V1_0, CL_INVALID_IMAGE_SIZE, "invalid image size"),
    row(V1_0, CL_INVALID_SAMPLER, "invalid sampler"),
    row(V1_0, CL_INVALID_BINARY, "invalid binary"),
    row(V1_0, CL_INVALID_BUILD_OPTIONS, "invalid build options"),
    row(V1_0, CL_INVALID_PROGRAM, "invalid program"),
    row(V1_0, CL_INVALID_PROGRAM_EXECUTABLE, "invalid program executable"),
    row(V1_0, CL_INVALID_KERNEL_NAME, "invalid kernel name"),
    row(V1_0, CL_INVALID_KERNEL_DEFINITION, "invalid kernel definition"),
    row(V1_0, CL_INVALID_KERNEL, "invalid kernel"),
    row(V1_0, CL_INVALID_ARG_INDEX, "invalid arg index"),
    row(V1_0, CL_INVALID_ARG_VALUE, "invalid arg value"),
    row(V1_0, CL_INVALID_ARG_SIZE, "invalid arg size"),
    row(V1_0, CL_INVALID_KERNEL_ARGS, "invalid kernel args"),
    row(V1_0, CL_INVALID_WORK_DIMENSION, "invalid work dimension"),
    row(V1_0, CL_INVALID_WORK_GROUP_SIZE, "invalid work group size"),
    row(V1_0, CL_INVALID_WORK_ITEM_SIZE, "invalid work item size"),
    row(V1_0, CL_INVALID_GLOBAL_OFFSET, "invalid global offset"),
    row(V1_0, CL_INVALID_EVENT_WAIT_LIST, "invalid event wait list"),
    row(V1_0, CL_INVALID_EVENT, "invalid event"),
    row(V1_0, CL_INVALID_OPERATION, "invalid operation"),
    row(V1_0, CL_INVALID_GL_OBJECT, "invalid gl object"),
    row(V1_0, CL_INVALID_BUFFER_SIZE, "invalid buffer size"),
    row(V1_0, CL_INVALID_MIP_LEVEL, "invalid mip level"),
    row(V1_0, CL_INVALID_GLOBAL_WORK_SIZE, "invalid global work size"),
    row(V1_2, CL_INVALID_PROPERTY, "invalid property"),
    row(V1_2, CL_INVALID_IMAGE_DESCRIPTOR, "invalid image descriptor"),
    row(V1_2, CL_INVALID_COMPILER_OPTIONS, "invalid compiler options"),
    row(V1_2, CL_INVALID_LINKER_OPTIONS, "invalid linker options"),
    row(V1_2, CL_INVALID_DEVICE_PARTITION_COUNT, "invalid device partition count"),
];

static COMPILED_ROWS: Lazy<Vec<ErrorRow>> = Lazy::new(|| {
    ROWS.iter()
        .filter(|r| r.since.is_available())
        .copied()
        .collect()
});

/// Rows compiled into this build, in catalog order
pub fn entries() -> &'static [ErrorRow] {
    &COMPILED_ROWS
}

/// Message for a native status code; `"unknown error"` on a miss
pub fn translate(code: Status) -> &'static str {
    entries()
        .iter()
        .find(|r| r.code == code)
        .map(|r| r.message)
        .unwrap_or(UNKNOWN_ERROR)
}

/// Turn a status code into a result; success never reaches the catalog
#[inline]
pub fn check(status: Status) -> ClResult<()> {
    if status == CL_SUCCESS {
        Ok(())
    } else {
        Err(ClError::native(status))
    }
}

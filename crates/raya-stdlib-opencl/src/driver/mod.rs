//! Boundary to the native OpenCL API
//!
//! `Driver` is the only place the binding talks to OpenCL. Every query
//! follows the two-call idiom: call with `None` to learn the byte size, then
//! again with a buffer of exactly that size. Status codes are raw `cl_int`
//! values; translation to messages happens in the binding, not here.
//!
//! Implementations:
//! - `FakeDriver`: deterministic in-memory platforms, used by tests and by
//!   `raya-clinfo --fake`
//! - `NativeDriver` (feature `native`): the system ICD loader

pub mod consts;
pub mod fake;
#[cfg(feature = "native")]
pub mod native;

use std::fmt;

use crate::object::Category;
use crate::schema::InfoTable;

pub use fake::{DriverCall, FakeDriver};
#[cfg(feature = "native")]
pub use native::NativeDriver;

/// Raw `cl_int` status code; `CL_SUCCESS` (0) never appears as an `Err`
pub type Status = i32;

/// Opaque pointer-sized native handle
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RawHandle(pub usize);

impl RawHandle {
    /// The null handle
    pub const NULL: RawHandle = RawHandle(0);

    /// Whether this is the null handle
    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Numeric address
    #[inline]
    pub fn addr(self) -> usize {
        self.0
    }

    /// Native-endian bytes, as stored in info buffers
    pub fn to_ne_bytes(self) -> [u8; std::mem::size_of::<usize>()] {
        self.0.to_ne_bytes()
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:#x})", self.0)
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Secondary key for info tables that need one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKey {
    /// No secondary key
    None,
    /// Device for build and work-group info
    Device(RawHandle),
    /// Argument index for kernel argument info
    ArgIndex(u32),
}

/// `cl_image_format`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFormat {
    /// `image_channel_order`
    pub order: u32,
    /// `image_channel_data_type`
    pub data_type: u32,
}

impl ImageFormat {
    /// Native byte layout
    pub fn to_ne_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.order.to_ne_bytes());
        out[4..].copy_from_slice(&self.data_type.to_ne_bytes());
        out
    }
}

/// Native OpenCL entry points used by the binding.
///
/// Single-threaded: implementations may use interior mutability and are
/// shared as `Rc<dyn Driver>`.
pub trait Driver {
    /// `clGetPlatformIDs`: fills as many ids as fit, returns the total count
    fn platform_ids(&self, out: Option<&mut [RawHandle]>) -> Result<usize, Status>;

    /// `clGetDeviceIDs`: fills as many ids as fit, returns the total count
    fn device_ids(
        &self,
        platform: RawHandle,
        device_type: u64,
        out: Option<&mut [RawHandle]>,
    ) -> Result<usize, Status>;

    /// `clGet*Info`: probes the size (`out == None`) or fills `out`.
    /// Returns the size of the property in bytes.
    fn info(
        &self,
        table: InfoTable,
        handle: RawHandle,
        key: InfoKey,
        param: u32,
        out: Option<&mut [u8]>,
    ) -> Result<usize, Status>;

    /// `clGetProgramInfo(CL_PROGRAM_BINARIES)`: copies each device's binary
    /// into `out`, one destination per program device in device order.
    /// A destination shorter than the device's `CL_PROGRAM_BINARY_SIZES`
    /// entry, or a count mismatch, fails with `CL_INVALID_VALUE`.
    /// [`Driver::info`] rejects `CL_PROGRAM_BINARIES` the same way.
    fn program_binaries(&self, program: RawHandle, out: &mut [&mut [u8]]) -> Result<(), Status>;

    /// `clRetain*` for the category
    fn retain(&self, category: Category, handle: RawHandle) -> Result<(), Status>;

    /// `clRelease*` for the category
    fn release(&self, category: Category, handle: RawHandle) -> Result<(), Status>;

    /// `clCreateContext`; `properties` is zero-terminated or empty
    fn create_context(&self, properties: &[isize], devices: &[RawHandle]) -> Result<RawHandle, Status>;

    /// `clCreateContextFromType`
    fn create_context_from_type(&self, properties: &[isize], device_type: u64) -> Result<RawHandle, Status>;

    /// `clCreateCommandQueue`
    fn create_queue(&self, context: RawHandle, device: RawHandle, properties: u64) -> Result<RawHandle, Status>;

    /// `clCreateBuffer` without host memory
    fn create_buffer(&self, context: RawHandle, flags: u64, size: usize) -> Result<RawHandle, Status>;

    /// `clCreateImage2D` without host memory
    fn create_image_2d(
        &self,
        context: RawHandle,
        flags: u64,
        format: ImageFormat,
        width: usize,
        height: usize,
    ) -> Result<RawHandle, Status>;

    /// `clCreateSampler`
    fn create_sampler(
        &self,
        context: RawHandle,
        normalized: bool,
        addressing: u32,
        filter: u32,
    ) -> Result<RawHandle, Status>;

    /// `clCreateProgramWithSource`
    fn create_program_with_source(&self, context: RawHandle, source: &str) -> Result<RawHandle, Status>;

    /// `clBuildProgram`, blocking; empty `devices` means every program device
    fn build_program(&self, program: RawHandle, devices: &[RawHandle], options: &str) -> Result<(), Status>;

    /// `clCreateKernel`
    fn create_kernel(&self, program: RawHandle, name: &str) -> Result<RawHandle, Status>;

    /// `clEnqueueMarker`
    fn enqueue_marker(&self, queue: RawHandle) -> Result<RawHandle, Status>;

    /// `clFlush`
    fn flush(&self, queue: RawHandle) -> Result<(), Status>;

    /// `clFinish`
    fn finish(&self, queue: RawHandle) -> Result<(), Status>;

    /// `clWaitForEvents`
    fn wait_for_events(&self, events: &[RawHandle]) -> Result<(), Status>;
}

//! System ICD loader through `opencl-sys`

#![allow(deprecated)]

use std::ffi::{c_void, CString};
use std::mem::size_of;
use std::ptr;

use opencl_sys::*;

use super::{Driver, ImageFormat, InfoKey, RawHandle, Status};
use crate::object::Category;
use crate::schema::InfoTable;

/// `CL_PLATFORM_NOT_FOUND_KHR` from `cl_khr_icd`
const PLATFORM_NOT_FOUND_KHR: cl_int = -1001;

/// Driver backed by the installed OpenCL implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDriver;

impl NativeDriver {
    /// Bind to the system OpenCL library
    pub fn new() -> Self {
        NativeDriver
    }
}

#[inline]
fn ptr_of(handle: RawHandle) -> *mut c_void {
    handle.addr() as *mut c_void
}

#[inline]
fn handle_of(p: *mut c_void) -> RawHandle {
    RawHandle(p as usize)
}

fn status(code: cl_int) -> Result<(), Status> {
    if code == CL_SUCCESS {
        Ok(())
    } else {
        Err(code)
    }
}

fn created(p: *mut c_void, code: cl_int) -> Result<RawHandle, Status> {
    status(code)?;
    Ok(handle_of(p))
}

fn c_string(s: &str) -> Result<CString, Status> {
    CString::new(s).map_err(|_| CL_INVALID_VALUE)
}

fn raw_handles(handles: &[RawHandle]) -> Vec<*mut c_void> {
    handles.iter().map(|h| ptr_of(*h)).collect()
}

fn count(n: usize) -> Result<cl_uint, Status> {
    cl_uint::try_from(n).map_err(|_| CL_INVALID_VALUE)
}

/// Split a buffer for an id list into the (count, pointer) pair the API takes
fn id_out(out: Option<&mut [RawHandle]>) -> Result<(cl_uint, *mut *mut c_void), Status> {
    match out {
        // RawHandle is a transparent usize, the same layout as a handle pointer
        Some(buf) if !buf.is_empty() => Ok((count(buf.len())?, buf.as_mut_ptr().cast())),
        _ => Ok((0, ptr::null_mut())),
    }
}

impl Driver for NativeDriver {
    fn platform_ids(&self, out: Option<&mut [RawHandle]>) -> Result<usize, Status> {
        let (n, buf) = id_out(out)?;
        let mut total: cl_uint = 0;
        // SAFETY: buf is null or points at n writable handle slots
        match unsafe { clGetPlatformIDs(n, buf, &mut total) } {
            // ICD loader with no vendor installed
            PLATFORM_NOT_FOUND_KHR => Ok(0),
            code => status(code).map(|()| total as usize),
        }
    }

    fn device_ids(&self, platform: RawHandle, device_type: u64, out: Option<&mut [RawHandle]>) -> Result<usize, Status> {
        let (n, buf) = id_out(out)?;
        let mut total: cl_uint = 0;
        // SAFETY: buf is null or points at n writable handle slots
        status(unsafe { clGetDeviceIDs(ptr_of(platform), device_type, n, buf, &mut total) })?;
        Ok(total as usize)
    }

    fn info(
        &self,
        table: InfoTable,
        handle: RawHandle,
        key: InfoKey,
        param: u32,
        out: Option<&mut [u8]>,
    ) -> Result<usize, Status> {
        // the native call writes through pointers read from `out`
        if table == InfoTable::Program && param == CL_PROGRAM_BINARIES {
            return Err(CL_INVALID_VALUE);
        }
        let (len, buf) = match out {
            Some(b) => (b.len(), b.as_mut_ptr().cast::<c_void>()),
            None => (0, ptr::null_mut()),
        };
        let mut size: usize = 0;
        let h = ptr_of(handle);
        // SAFETY: buf is null with len 0 or points at len writable bytes;
        // the handle was checked by the binding's type guard
        let code = unsafe {
            match (table, key) {
                (InfoTable::Platform, _) => clGetPlatformInfo(h, param, len, buf, &mut size),
                (InfoTable::Device, _) => clGetDeviceInfo(h, param, len, buf, &mut size),
                (InfoTable::Context, _) => clGetContextInfo(h, param, len, buf, &mut size),
                (InfoTable::Queue, _) => clGetCommandQueueInfo(h, param, len, buf, &mut size),
                (InfoTable::Mem, _) => clGetMemObjectInfo(h, param, len, buf, &mut size),
                (InfoTable::Image, _) => clGetImageInfo(h, param, len, buf, &mut size),
                (InfoTable::Sampler, _) => clGetSamplerInfo(h, param, len, buf, &mut size),
                (InfoTable::Program, _) => clGetProgramInfo(h, param, len, buf, &mut size),
                (InfoTable::ProgramBuild, InfoKey::Device(d)) => {
                    clGetProgramBuildInfo(h, ptr_of(d), param, len, buf, &mut size)
                }
                (InfoTable::Kernel, _) => clGetKernelInfo(h, param, len, buf, &mut size),
                (InfoTable::KernelArg, InfoKey::ArgIndex(i)) => {
                    clGetKernelArgInfo(h, i, param, len, buf, &mut size)
                }
                (InfoTable::Workgroup, InfoKey::Device(d)) => {
                    clGetKernelWorkGroupInfo(h, ptr_of(d), param, len, buf, &mut size)
                }
                (InfoTable::Event, _) => clGetEventInfo(h, param, len, buf, &mut size),
                (InfoTable::Profiling, _) => clGetEventProfilingInfo(h, param, len, buf, &mut size),
                _ => CL_INVALID_VALUE,
            }
        };
        status(code)?;
        Ok(size)
    }

    fn program_binaries(&self, program: RawHandle, out: &mut [&mut [u8]]) -> Result<(), Status> {
        let h = ptr_of(program);
        let mut bytes: usize = 0;
        // SAFETY: size probe without a buffer
        status(unsafe { clGetProgramInfo(h, CL_PROGRAM_BINARY_SIZES, 0, ptr::null_mut(), &mut bytes) })?;
        let mut sizes = vec![0usize; bytes / size_of::<usize>()];
        // SAFETY: sizes has room for exactly the bytes passed
        status(unsafe {
            clGetProgramInfo(
                h,
                CL_PROGRAM_BINARY_SIZES,
                sizes.len() * size_of::<usize>(),
                sizes.as_mut_ptr().cast(),
                ptr::null_mut(),
            )
        })?;
        if sizes.len() != out.len() || sizes.iter().zip(out.iter()).any(|(&n, dst)| dst.len() < n) {
            return Err(CL_INVALID_VALUE);
        }

        let mut pointers: Vec<*mut u8> = out.iter_mut().map(|dst| dst.as_mut_ptr()).collect();
        // SAFETY: one pointer per program device, each to a live buffer at
        // least as long as the size the driver reported for that device
        status(unsafe {
            clGetProgramInfo(
                h,
                CL_PROGRAM_BINARIES,
                pointers.len() * size_of::<*mut u8>(),
                pointers.as_mut_ptr().cast(),
                ptr::null_mut(),
            )
        })
    }

    fn retain(&self, category: Category, handle: RawHandle) -> Result<(), Status> {
        let h = ptr_of(handle);
        // SAFETY: the wrapper holds at least one reference to h
        status(unsafe {
            match category {
                Category::Platform => CL_INVALID_VALUE,
                Category::Device => clRetainDevice(h),
                Category::Context => clRetainContext(h),
                Category::Queue => clRetainCommandQueue(h),
                Category::Mem | Category::Image => clRetainMemObject(h),
                Category::Sampler => clRetainSampler(h),
                Category::Program => clRetainProgram(h),
                Category::Kernel => clRetainKernel(h),
                Category::Event => clRetainEvent(h),
            }
        })
    }

    fn release(&self, category: Category, handle: RawHandle) -> Result<(), Status> {
        let h = ptr_of(handle);
        // SAFETY: each release matches a reference the wrapper holds
        status(unsafe {
            match category {
                Category::Platform => CL_INVALID_VALUE,
                Category::Device => clReleaseDevice(h),
                Category::Context => clReleaseContext(h),
                Category::Queue => clReleaseCommandQueue(h),
                Category::Mem | Category::Image => clReleaseMemObject(h),
                Category::Sampler => clReleaseSampler(h),
                Category::Program => clReleaseProgram(h),
                Category::Kernel => clReleaseKernel(h),
                Category::Event => clReleaseEvent(h),
            }
        })
    }

    fn create_context(&self, properties: &[isize], devices: &[RawHandle]) -> Result<RawHandle, Status> {
        let ids = raw_handles(devices);
        let props = if properties.is_empty() { ptr::null() } else { properties.as_ptr() };
        let mut code = CL_SUCCESS;
        // SAFETY: props is null or zero-terminated; ids holds count(ids) handles
        let ctx = unsafe { clCreateContext(props, count(ids.len())?, ids.as_ptr(), None, ptr::null_mut(), &mut code) };
        created(ctx, code)
    }

    fn create_context_from_type(&self, properties: &[isize], device_type: u64) -> Result<RawHandle, Status> {
        let props = if properties.is_empty() { ptr::null() } else { properties.as_ptr() };
        let mut code = CL_SUCCESS;
        // SAFETY: props is null or zero-terminated
        let ctx = unsafe { clCreateContextFromType(props, device_type, None, ptr::null_mut(), &mut code) };
        created(ctx, code)
    }

    fn create_queue(&self, context: RawHandle, device: RawHandle, properties: u64) -> Result<RawHandle, Status> {
        let mut code = CL_SUCCESS;
        // SAFETY: handles were checked by the type guard
        let q = unsafe { clCreateCommandQueue(ptr_of(context), ptr_of(device), properties, &mut code) };
        created(q, code)
    }

    fn create_buffer(&self, context: RawHandle, flags: u64, size: usize) -> Result<RawHandle, Status> {
        let mut code = CL_SUCCESS;
        // SAFETY: no host pointer is passed
        let mem = unsafe { clCreateBuffer(ptr_of(context), flags, size, ptr::null_mut(), &mut code) };
        created(mem, code)
    }

    fn create_image_2d(
        &self,
        context: RawHandle,
        flags: u64,
        format: ImageFormat,
        width: usize,
        height: usize,
    ) -> Result<RawHandle, Status> {
        let format = cl_image_format {
            image_channel_order: format.order,
            image_channel_data_type: format.data_type,
        };
        let mut code = CL_SUCCESS;
        // SAFETY: format outlives the call; no host pointer is passed
        let mem = unsafe {
            clCreateImage2D(ptr_of(context), flags, &format, width, height, 0, ptr::null_mut(), &mut code)
        };
        created(mem, code)
    }

    fn create_sampler(&self, context: RawHandle, normalized: bool, addressing: u32, filter: u32) -> Result<RawHandle, Status> {
        let normalized = if normalized { CL_TRUE } else { CL_FALSE };
        let mut code = CL_SUCCESS;
        // SAFETY: context was checked by the type guard
        let s = unsafe { clCreateSampler(ptr_of(context), normalized, addressing, filter, &mut code) };
        created(s, code)
    }

    fn create_program_with_source(&self, context: RawHandle, source: &str) -> Result<RawHandle, Status> {
        let text = source.as_ptr().cast();
        let len = source.len();
        let mut code = CL_SUCCESS;
        // SAFETY: one string of explicit length; the driver copies it
        let p = unsafe { clCreateProgramWithSource(ptr_of(context), 1, &text, &len, &mut code) };
        created(p, code)
    }

    fn build_program(&self, program: RawHandle, devices: &[RawHandle], options: &str) -> Result<(), Status> {
        let ids = raw_handles(devices);
        let list = if ids.is_empty() { ptr::null() } else { ids.as_ptr() };
        let options = c_string(options)?;
        // SAFETY: blocking build (no callback); ids and options outlive the call
        status(unsafe {
            clBuildProgram(ptr_of(program), count(ids.len())?, list, options.as_ptr(), None, ptr::null_mut())
        })
    }

    fn create_kernel(&self, program: RawHandle, name: &str) -> Result<RawHandle, Status> {
        let name = c_string(name)?;
        let mut code = CL_SUCCESS;
        // SAFETY: name is NUL-terminated and outlives the call
        let k = unsafe { clCreateKernel(ptr_of(program), name.as_ptr(), &mut code) };
        created(k, code)
    }

    fn enqueue_marker(&self, queue: RawHandle) -> Result<RawHandle, Status> {
        let mut event: cl_event = ptr::null_mut();
        // SAFETY: event receives one new reference
        status(unsafe { clEnqueueMarker(ptr_of(queue), &mut event) })?;
        Ok(handle_of(event))
    }

    fn flush(&self, queue: RawHandle) -> Result<(), Status> {
        // SAFETY: queue was checked by the type guard
        status(unsafe { clFlush(ptr_of(queue)) })
    }

    fn finish(&self, queue: RawHandle) -> Result<(), Status> {
        // SAFETY: queue was checked by the type guard
        status(unsafe { clFinish(ptr_of(queue)) })
    }

    fn wait_for_events(&self, events: &[RawHandle]) -> Result<(), Status> {
        let ids = raw_handles(events);
        // SAFETY: ids holds count(ids) event handles
        status(unsafe { clWaitForEvents(count(ids.len())?, ids.as_ptr()) })
    }
}

//! Deterministic in-memory OpenCL
//!
//! Behaves like an ICD for everything the binding calls: two-call
//! enumeration and info queries (undersized fills fail with
//! `CL_INVALID_VALUE`), live reference counts with parent release on
//! destruction, builds that parse kernel signatures out of the source, and
//! marker events with profiling timestamps. Properties that were not set
//! explicitly read as a schema-conformant default.
//!
//! Every call through the `Driver` trait is appended to a log so tests can
//! check probe/fill consistency and retain/release balance.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::mem::size_of;

use super::consts::*;
use super::{Driver, ImageFormat, InfoKey, RawHandle, Status};
use crate::catalog::{Catalog, EnumType};
use crate::object::Category;
use crate::schema::{InfoRow, InfoTable, Prim, Schema, Shape};

const PTR: usize = size_of::<usize>();
const FIRST_HANDLE: usize = 0x1000;
const HANDLE_STRIDE: usize = 0x10;

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// Info call without a buffer
    Probe {
        /// Table queried
        table: InfoTable,
        /// Object
        handle: RawHandle,
        /// Native parameter id
        param: u32,
        /// Size reported
        size: usize,
    },
    /// Info call with a buffer
    Fill {
        /// Table queried
        table: InfoTable,
        /// Object
        handle: RawHandle,
        /// Native parameter id
        param: u32,
        /// Buffer length supplied by the caller
        len: usize,
    },
    /// `clRetain*`
    Retain {
        /// Category used for the call
        category: Category,
        /// Object
        handle: RawHandle,
    },
    /// `clRelease*`
    Release {
        /// Category used for the call
        category: Category,
        /// Object
        handle: RawHandle,
    },
    /// Any creation call that succeeded
    Create {
        /// Category of the new object
        category: Category,
        /// New handle
        handle: RawHandle,
    },
    /// `clBuildProgram`
    Build {
        /// Program
        program: RawHandle,
        /// Result
        status: Status,
    },
    /// `clGetProgramInfo(CL_PROGRAM_BINARIES)`
    Binaries {
        /// Program
        program: RawHandle,
        /// Destination lengths supplied by the caller
        lens: Vec<usize>,
    },
    /// `clFlush`
    Flush(RawHandle),
    /// `clFinish`
    Finish(RawHandle),
    /// `clWaitForEvents`
    Wait(Vec<RawHandle>),
}

#[derive(Debug, Clone)]
struct KernelArg {
    name: String,
    type_name: String,
    address: u32,
    access: u32,
    qualifiers: u64,
}

#[derive(Debug, Clone)]
struct KernelDecl {
    name: String,
    args: Vec<KernelArg>,
}

#[derive(Debug, Default)]
struct ProgramState {
    source: String,
    devices: Vec<RawHandle>,
    binaries: BTreeMap<RawHandle, Vec<u8>>,
    kernels: Vec<KernelDecl>,
}

#[derive(Debug)]
struct Object {
    category: Category,
    refcount: u32,
    parent: Option<RawHandle>,
    props: HashMap<(InfoKey, u32), Vec<u8>>,
    devices: Vec<RawHandle>,
    device_type: u64,
    program: Option<ProgramState>,
}

impl Object {
    fn new(category: Category, parent: Option<RawHandle>) -> Self {
        Object {
            category,
            refcount: 1,
            parent,
            props: HashMap::new(),
            devices: Vec::new(),
            device_type: 0,
            program: None,
        }
    }

    fn set(&mut self, param: u32, bytes: Vec<u8>) {
        self.props.insert((InfoKey::None, param), bytes);
    }

    fn set_keyed(&mut self, key: InfoKey, param: u32, bytes: Vec<u8>) {
        self.props.insert((key, param), bytes);
    }
}

#[derive(Default)]
struct State {
    objects: BTreeMap<RawHandle, Object>,
    platforms: Vec<RawHandle>,
    next: usize,
    clock: u64,
    failures: HashMap<(RawHandle, u32), Status>,
    fill_failures: HashMap<(RawHandle, u32), Status>,
    create_failure: Option<Status>,
}

/// In-memory driver
#[derive(Default)]
pub struct FakeDriver {
    state: RefCell<State>,
    log: RefCell<Vec<DriverCall>>,
}

fn text(s: &str) -> Vec<u8> {
    let mut bytes = s.as_bytes().to_vec();
    bytes.push(0);
    bytes
}

fn u32_bytes(v: u32) -> Vec<u8> {
    v.to_ne_bytes().to_vec()
}

fn u64_bytes(v: u64) -> Vec<u8> {
    v.to_ne_bytes().to_vec()
}

fn usize_bytes(v: usize) -> Vec<u8> {
    v.to_ne_bytes().to_vec()
}

fn bool_bytes(v: bool) -> Vec<u8> {
    u32_bytes(v as u32)
}

fn handles_bytes(handles: &[RawHandle]) -> Vec<u8> {
    handles.iter().flat_map(|h| h.to_ne_bytes()).collect()
}

fn prim_bytes(p: Prim, v: i64) -> Vec<u8> {
    match p {
        Prim::U32 => (v as u32).to_ne_bytes().to_vec(),
        Prim::I32 => (v as i32).to_ne_bytes().to_vec(),
        Prim::U64 => (v as u64).to_ne_bytes().to_vec(),
        Prim::Usize => (v as usize).to_ne_bytes().to_vec(),
        Prim::Isize => (v as isize).to_ne_bytes().to_vec(),
    }
}

fn first_value(ty: EnumType) -> i64 {
    Catalog::get().entries(ty).first().map_or(0, |r| r.value)
}

/// Value of a property nobody set: zero, empty, or the first catalog name
fn default_bytes(row: &InfoRow) -> Vec<u8> {
    match row.shape {
        Shape::Scalar(p) => vec![0; p.width()],
        Shape::Bool => bool_bytes(false),
        Shape::Pointer | Shape::Handle(_) => vec![0; PTR],
        Shape::Str => text(""),
        Shape::HandleArray(_) | Shape::Array(_) | Shape::EnumArray(..) | Shape::ContextProperties => Vec::new(),
        Shape::Enum(ty, p) => prim_bytes(p, first_value(ty)),
        Shape::Bitfield(_) => u64_bytes(0),
        Shape::ImageFormat => ImageFormat {
            order: first_value(EnumType::ChannelOrder) as u32,
            data_type: first_value(EnumType::ChannelType) as u32,
        }
        .to_ne_bytes()
        .to_vec(),
        Shape::ExecutionStatus => CL_COMPLETE.to_ne_bytes().to_vec(),
        Shape::Binaries { .. } => Vec::new(),
    }
}

/// Status a native call reports for a handle that is not of `category`
fn invalid(category: Category) -> Status {
    match category {
        Category::Platform => CL_INVALID_PLATFORM,
        Category::Device => CL_INVALID_DEVICE,
        Category::Context => CL_INVALID_CONTEXT,
        Category::Queue => CL_INVALID_COMMAND_QUEUE,
        Category::Mem | Category::Image => CL_INVALID_MEM_OBJECT,
        Category::Sampler => CL_INVALID_SAMPLER,
        Category::Program => CL_INVALID_PROGRAM,
        Category::Kernel => CL_INVALID_KERNEL,
        Category::Event => CL_INVALID_EVENT,
    }
}

/// Category whose objects a table is queried on
fn owner(table: InfoTable) -> Category {
    match table {
        InfoTable::Platform => Category::Platform,
        InfoTable::Device => Category::Device,
        InfoTable::Context => Category::Context,
        InfoTable::Queue => Category::Queue,
        InfoTable::Mem => Category::Mem,
        InfoTable::Image => Category::Image,
        InfoTable::Sampler => Category::Sampler,
        InfoTable::Program | InfoTable::ProgramBuild => Category::Program,
        InfoTable::Kernel | InfoTable::KernelArg | InfoTable::Workgroup => Category::Kernel,
        InfoTable::Event | InfoTable::Profiling => Category::Event,
    }
}

/// Whether an object of `actual` answers calls made for `wanted`
fn accepts(actual: Category, wanted: Category) -> bool {
    actual == wanted || (actual == Category::Image && wanted == Category::Mem)
}

fn reference_count_param(category: Category) -> u32 {
    match category {
        Category::Platform => 0,
        Category::Device => CL_DEVICE_REFERENCE_COUNT,
        Category::Context => CL_CONTEXT_REFERENCE_COUNT,
        Category::Queue => CL_QUEUE_REFERENCE_COUNT,
        Category::Mem | Category::Image => CL_MEM_REFERENCE_COUNT,
        Category::Sampler => CL_SAMPLER_REFERENCE_COUNT,
        Category::Program => CL_PROGRAM_REFERENCE_COUNT,
        Category::Kernel => CL_KERNEL_REFERENCE_COUNT,
        Category::Event => CL_EVENT_REFERENCE_COUNT,
    }
}

fn channel_count(order: u32) -> Option<usize> {
    Some(match order {
        CL_R | CL_A | CL_INTENSITY | CL_LUMINANCE | CL_RX => 1,
        CL_RG | CL_RA | CL_RGX => 2,
        CL_RGB | CL_RGBX => 3,
        CL_RGBA | CL_BGRA | CL_ARGB => 4,
        _ => return None,
    })
}

fn element_size(format: ImageFormat) -> Option<usize> {
    let channels = channel_count(format.order)?;
    Some(match format.data_type {
        CL_UNORM_SHORT_565 | CL_UNORM_SHORT_555 => 2,
        CL_UNORM_INT_101010 => 4,
        CL_SNORM_INT8 | CL_UNORM_INT8 | CL_SIGNED_INT8 | CL_UNSIGNED_INT8 => channels,
        CL_SNORM_INT16 | CL_UNORM_INT16 | CL_SIGNED_INT16 | CL_UNSIGNED_INT16 | CL_HALF_FLOAT => channels * 2,
        CL_SIGNED_INT32 | CL_UNSIGNED_INT32 | CL_FLOAT => channels * 4,
        _ => return None,
    })
}

/// Kernel signatures of the form `kernel void name(args)`
fn parse_kernels(source: &str) -> Vec<KernelDecl> {
    let mut out = Vec::new();
    let mut rest = source;
    while let Some(at) = rest.find("kernel") {
        let after = &rest[at + "kernel".len()..];
        rest = after;
        let Some(tail) = after.trim_start().strip_prefix("void") else {
            continue;
        };
        let Some(open) = tail.find('(') else {
            continue;
        };
        let name = tail[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            continue;
        }
        let Some(close) = tail[open..].find(')') else {
            continue;
        };
        let params = &tail[open + 1..open + close];
        let args = params
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "void")
            .map(parse_arg)
            .collect();
        out.push(KernelDecl {
            name: name.to_string(),
            args,
        });
    }
    out
}

fn parse_arg(decl: &str) -> KernelArg {
    let spaced = decl.replace('*', " * ");
    let mut tokens: Vec<&str> = spaced.split_whitespace().collect();
    let name = tokens.pop().unwrap_or_default().to_string();

    let mut address = CL_KERNEL_ARG_ADDRESS_PRIVATE;
    let mut access = CL_KERNEL_ARG_ACCESS_NONE;
    let mut qualifiers = CL_KERNEL_ARG_TYPE_NONE;
    let mut base = Vec::new();
    let mut pointers = 0;
    for token in tokens {
        match token.trim_start_matches("__") {
            "global" => address = CL_KERNEL_ARG_ADDRESS_GLOBAL,
            "local" => address = CL_KERNEL_ARG_ADDRESS_LOCAL,
            "constant" => address = CL_KERNEL_ARG_ADDRESS_CONSTANT,
            "private" => address = CL_KERNEL_ARG_ADDRESS_PRIVATE,
            "read_only" => access = CL_KERNEL_ARG_ACCESS_READ_ONLY,
            "write_only" => access = CL_KERNEL_ARG_ACCESS_WRITE_ONLY,
            "read_write" => access = CL_KERNEL_ARG_ACCESS_READ_WRITE,
            "const" => qualifiers |= CL_KERNEL_ARG_TYPE_CONST,
            "restrict" => qualifiers |= CL_KERNEL_ARG_TYPE_RESTRICT,
            "volatile" => qualifiers |= CL_KERNEL_ARG_TYPE_VOLATILE,
            "*" => pointers += 1,
            other => base.push(other),
        }
    }
    let mut type_name = base.join(" ");
    type_name.push_str(&"*".repeat(pointers));
    KernelArg {
        name,
        type_name,
        address,
        access,
        qualifiers,
    }
}

impl FakeDriver {
    /// No platforms
    pub fn new() -> Self {
        FakeDriver::default()
    }

    /// Two platforms: a full-profile one with a CPU and a GPU, and an
    /// embedded one with an accelerator
    pub fn with_sample_platforms() -> Self {
        let fake = FakeDriver::new();
        let reference = fake.add_platform("Raya Reference Platform", "Raya Project");
        fake.add_device(reference, CL_DEVICE_TYPE_CPU, "Raya Host CPU");
        fake.add_device(reference, CL_DEVICE_TYPE_GPU, "Raya Virtual GPU");
        let embedded = fake.add_platform("Raya Embedded Platform", "Raya Project");
        fake.set_string(embedded, CL_PLATFORM_PROFILE, "EMBEDDED_PROFILE");
        fake.set_string(embedded, CL_PLATFORM_EXTENSIONS, "");
        let accel = fake.add_device(embedded, CL_DEVICE_TYPE_ACCELERATOR, "Raya DSP");
        fake.set_string(accel, CL_DEVICE_PROFILE, "EMBEDDED_PROFILE");
        fake
    }

    fn alloc(&self, object: Object) -> RawHandle {
        let mut state = self.state.borrow_mut();
        if state.next == 0 {
            state.next = FIRST_HANDLE;
        }
        let handle = RawHandle(state.next);
        state.next += HANDLE_STRIDE;
        state.objects.insert(handle, object);
        handle
    }

    fn record(&self, call: DriverCall) {
        self.log.borrow_mut().push(call);
    }

    /// Add a platform reporting full profile and OpenCL 1.2
    pub fn add_platform(&self, name: &str, vendor: &str) -> RawHandle {
        let mut object = Object::new(Category::Platform, None);
        object.set(CL_PLATFORM_PROFILE, text("FULL_PROFILE"));
        object.set(CL_PLATFORM_VERSION, text("OpenCL 1.2 raya"));
        object.set(CL_PLATFORM_NAME, text(name));
        object.set(CL_PLATFORM_VENDOR, text(vendor));
        object.set(CL_PLATFORM_EXTENSIONS, text("cl_khr_icd cl_khr_byte_addressable_store"));
        let handle = self.alloc(object);
        self.state.borrow_mut().platforms.push(handle);
        handle
    }

    /// Add a root device to `platform`
    pub fn add_device(&self, platform: RawHandle, device_type: u64, name: &str) -> RawHandle {
        let mut object = Object::new(Category::Device, Some(platform));
        object.device_type = device_type;
        object.set(CL_DEVICE_TYPE, u64_bytes(device_type));
        object.set(CL_DEVICE_VENDOR_ID, u32_bytes(0x5241));
        object.set(CL_DEVICE_MAX_COMPUTE_UNITS, u32_bytes(4));
        object.set(CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS, u32_bytes(3));
        object.set(CL_DEVICE_MAX_WORK_GROUP_SIZE, usize_bytes(256));
        let mut sizes = usize_bytes(256);
        sizes.extend(usize_bytes(256));
        sizes.extend(usize_bytes(64));
        object.set(CL_DEVICE_MAX_WORK_ITEM_SIZES, sizes);
        object.set(CL_DEVICE_ADDRESS_BITS, u32_bytes(8 * PTR as u32));
        object.set(CL_DEVICE_MAX_MEM_ALLOC_SIZE, u64_bytes(256 << 20));
        object.set(CL_DEVICE_GLOBAL_MEM_SIZE, u64_bytes(1 << 30));
        object.set(CL_DEVICE_LOCAL_MEM_SIZE, u64_bytes(32 << 10));
        object.set(CL_DEVICE_LOCAL_MEM_TYPE, u32_bytes(CL_LOCAL));
        object.set(CL_DEVICE_IMAGE_SUPPORT, bool_bytes(true));
        object.set(CL_DEVICE_SINGLE_FP_CONFIG, u64_bytes(CL_FP_INF_NAN | CL_FP_ROUND_TO_NEAREST));
        object.set(CL_DEVICE_ENDIAN_LITTLE, bool_bytes(cfg!(target_endian = "little")));
        object.set(CL_DEVICE_AVAILABLE, bool_bytes(true));
        object.set(CL_DEVICE_COMPILER_AVAILABLE, bool_bytes(true));
        object.set(CL_DEVICE_EXECUTION_CAPABILITIES, u64_bytes(CL_EXEC_KERNEL));
        object.set(
            CL_DEVICE_QUEUE_PROPERTIES,
            u64_bytes(CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE | CL_QUEUE_PROFILING_ENABLE),
        );
        object.set(CL_DEVICE_NAME, text(name));
        object.set(CL_DEVICE_VENDOR, text("Raya Project"));
        object.set(CL_DRIVER_VERSION, text("0.2.0"));
        object.set(CL_DEVICE_PROFILE, text("FULL_PROFILE"));
        object.set(CL_DEVICE_VERSION, text("OpenCL 1.2 raya"));
        object.set(CL_DEVICE_EXTENSIONS, text("cl_khr_byte_addressable_store"));
        object.set(CL_DEVICE_PLATFORM, platform.to_ne_bytes().to_vec());
        object.set(CL_DEVICE_OPENCL_C_VERSION, text("OpenCL C 1.2"));
        object.set(CL_DEVICE_PARTITION_MAX_SUB_DEVICES, u32_bytes(0));
        object.set(CL_DEVICE_PRINTF_BUFFER_SIZE, usize_bytes(1 << 20));
        let handle = self.alloc(object);
        if let Some(p) = self.state.borrow_mut().objects.get_mut(&platform) {
            p.devices.push(handle);
        }
        handle
    }

    /// Set a raw property
    pub fn set_info(&self, handle: RawHandle, key: InfoKey, param: u32, bytes: Vec<u8>) {
        if let Some(object) = self.state.borrow_mut().objects.get_mut(&handle) {
            object.set_keyed(key, param, bytes);
        }
    }

    /// Set a string property; the NUL terminator is added
    pub fn set_string(&self, handle: RawHandle, param: u32, value: &str) {
        self.set_info(handle, InfoKey::None, param, text(value));
    }

    /// Set a `cl_uint` property
    pub fn set_u32(&self, handle: RawHandle, param: u32, value: u32) {
        self.set_info(handle, InfoKey::None, param, u32_bytes(value));
    }

    /// Make every info call on `(handle, param)` fail with `status`
    pub fn fail_info(&self, handle: RawHandle, param: u32, status: Status) {
        self.state.borrow_mut().failures.insert((handle, param), status);
    }

    /// Make only the filling call on `(handle, param)` fail
    pub fn fail_fill(&self, handle: RawHandle, param: u32, status: Status) {
        self.state.borrow_mut().fill_failures.insert((handle, param), status);
    }

    /// Make the next creation call fail with `status`
    pub fn fail_create(&self, status: Status) {
        self.state.borrow_mut().create_failure = Some(status);
    }

    /// Platforms in creation order
    pub fn platforms(&self) -> Vec<RawHandle> {
        self.state.borrow().platforms.clone()
    }

    /// Devices of a platform in creation order
    pub fn devices_of(&self, platform: RawHandle) -> Vec<RawHandle> {
        self.state
            .borrow()
            .objects
            .get(&platform)
            .map(|p| p.devices.clone())
            .unwrap_or_default()
    }

    /// Live reference count; 0 once the object is destroyed
    pub fn refcount(&self, handle: RawHandle) -> u32 {
        self.state.borrow().objects.get(&handle).map_or(0, |o| o.refcount)
    }

    /// Whether the object still exists
    pub fn is_alive(&self, handle: RawHandle) -> bool {
        self.state.borrow().objects.contains_key(&handle)
    }

    /// Live objects of a category
    pub fn live(&self, category: Category) -> usize {
        self.state
            .borrow()
            .objects
            .values()
            .filter(|o| o.category == category)
            .count()
    }

    /// Recorded calls
    pub fn calls(&self) -> Vec<DriverCall> {
        self.log.borrow().clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.log.borrow_mut().clear();
    }

    fn take_create_failure(&self) -> Result<(), Status> {
        match self.state.borrow_mut().create_failure.take() {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn expect(&self, handle: RawHandle, category: Category) -> Result<(), Status> {
        match self.state.borrow().objects.get(&handle) {
            Some(o) if accepts(o.category, category) => Ok(()),
            _ => Err(invalid(category)),
        }
    }

    fn create(&self, object: Object) -> RawHandle {
        let category = object.category;
        if let Some(parent) = object.parent {
            if let Some(p) = self.state.borrow_mut().objects.get_mut(&parent) {
                p.refcount += 1;
            }
        }
        let handle = self.alloc(object);
        self.record(DriverCall::Create { category, handle });
        handle
    }

    fn destroy_chain(&self, mut handle: RawHandle) {
        let mut state = self.state.borrow_mut();
        loop {
            let Some(object) = state.objects.get_mut(&handle) else {
                return;
            };
            if object.refcount > 0 || matches!(object.category, Category::Platform | Category::Device) {
                return;
            }
            let parent = object.parent;
            state.objects.remove(&handle);
            let Some(parent) = parent else {
                return;
            };
            match state.objects.get_mut(&parent) {
                Some(p) if p.refcount > 0 => {
                    p.refcount -= 1;
                    handle = parent;
                }
                _ => return,
            }
        }
    }

    fn context_devices(&self, context: RawHandle) -> Vec<RawHandle> {
        self.state
            .borrow()
            .objects
            .get(&context)
            .map(|c| c.devices.clone())
            .unwrap_or_default()
    }

    fn new_context(&self, properties: &[isize], devices: Vec<RawHandle>) -> Result<RawHandle, Status> {
        let mut object = Object::new(Category::Context, None);
        object.set(CL_CONTEXT_DEVICES, handles_bytes(&devices));
        object.set(CL_CONTEXT_NUM_DEVICES, u32_bytes(devices.len() as u32));
        object.set(
            CL_CONTEXT_PROPERTIES,
            properties.iter().flat_map(|w| w.to_ne_bytes()).collect(),
        );
        object.devices = devices;
        Ok(self.create(object))
    }

    /// Platform named by a property list, if any; fails on malformed lists
    fn parse_properties(&self, properties: &[isize]) -> Result<Option<RawHandle>, Status> {
        let mut platform = None;
        for pair in properties.chunks(2) {
            match *pair {
                [0] | [0, _] => return Ok(platform),
                [key, value] if key == CL_CONTEXT_PLATFORM => {
                    let handle = RawHandle(value as usize);
                    self.expect(handle, Category::Platform)?;
                    platform = Some(handle);
                }
                [key, _] if key == CL_CONTEXT_INTEROP_USER_SYNC => {}
                _ => return Err(CL_INVALID_PROPERTY),
            }
        }
        if properties.is_empty() {
            Ok(None)
        } else {
            Err(CL_INVALID_PROPERTY)
        }
    }

    fn lookup(&self, table: InfoTable, handle: RawHandle, key: InfoKey, param: u32) -> Result<Vec<u8>, Status> {
        let category = owner(table);
        let state = self.state.borrow();
        let object = match state.objects.get(&handle) {
            Some(o) if accepts(o.category, category) => o,
            _ => return Err(invalid(category)),
        };
        if let Some(&status) = state.failures.get(&(handle, param)) {
            return Err(status);
        }
        let row = Schema::get().lookup(table, param).ok_or(CL_INVALID_VALUE)?;

        match (table, key) {
            (InfoTable::ProgramBuild, InfoKey::Device(d)) => {
                if !object.program.as_ref().is_some_and(|p| p.devices.contains(&d)) {
                    return Err(CL_INVALID_DEVICE);
                }
            }
            (InfoTable::Workgroup, InfoKey::Device(d)) => {
                let program = object.parent.and_then(|p| state.objects.get(&p));
                let ok = program
                    .and_then(|p| p.program.as_ref())
                    .is_some_and(|p| p.devices.contains(&d));
                if !ok {
                    return Err(CL_INVALID_DEVICE);
                }
            }
            (InfoTable::KernelArg, InfoKey::ArgIndex(_)) => {
                if !object.props.contains_key(&(key, param)) {
                    return Err(CL_INVALID_ARG_INDEX);
                }
            }
            (InfoTable::ProgramBuild | InfoTable::Workgroup | InfoTable::KernelArg, _) => {
                return Err(CL_INVALID_VALUE);
            }
            (_, InfoKey::None) => {}
            _ => return Err(CL_INVALID_VALUE),
        }

        if table == InfoTable::Profiling && !object.props.contains_key(&(InfoKey::None, param)) {
            return Err(CL_PROFILING_INFO_NOT_AVAILABLE);
        }

        if param == reference_count_param(object.category) {
            return Ok(u32_bytes(object.refcount));
        }
        if let Some(program) = &object.program {
            match param {
                CL_PROGRAM_BINARY_SIZES => {
                    let sizes: Vec<u8> = program
                        .devices
                        .iter()
                        .flat_map(|d| program.binaries.get(d).map_or(0, Vec::len).to_ne_bytes())
                        .collect();
                    return Ok(sizes);
                }
                CL_PROGRAM_NUM_KERNELS => return Ok(usize_bytes(program.kernels.len())),
                CL_PROGRAM_KERNEL_NAMES => {
                    let names: Vec<_> = program.kernels.iter().map(|k| k.name.as_str()).collect();
                    return Ok(text(&names.join(";")));
                }
                _ => {}
            }
        }

        Ok(object
            .props
            .get(&(key, param))
            .or_else(|| object.props.get(&(InfoKey::None, param)))
            .cloned()
            .unwrap_or_else(|| default_bytes(row)))
    }
}

impl Driver for FakeDriver {
    fn platform_ids(&self, out: Option<&mut [RawHandle]>) -> Result<usize, Status> {
        let platforms = self.platforms();
        if let Some(out) = out {
            let n = out.len().min(platforms.len());
            out[..n].copy_from_slice(&platforms[..n]);
        }
        Ok(platforms.len())
    }

    fn device_ids(&self, platform: RawHandle, device_type: u64, out: Option<&mut [RawHandle]>) -> Result<usize, Status> {
        self.expect(platform, Category::Platform)?;
        if device_type == 0 {
            return Err(CL_INVALID_DEVICE_TYPE);
        }
        let all = self.devices_of(platform);
        let state = self.state.borrow();
        let matching: Vec<RawHandle> = if device_type == CL_DEVICE_TYPE_DEFAULT {
            all.into_iter().take(1).collect()
        } else {
            all.into_iter()
                .filter(|d| state.objects.get(d).is_some_and(|o| o.device_type & device_type != 0))
                .collect()
        };
        if matching.is_empty() {
            return Err(CL_DEVICE_NOT_FOUND);
        }
        if let Some(out) = out {
            let n = out.len().min(matching.len());
            out[..n].copy_from_slice(&matching[..n]);
        }
        Ok(matching.len())
    }

    fn info(
        &self,
        table: InfoTable,
        handle: RawHandle,
        key: InfoKey,
        param: u32,
        out: Option<&mut [u8]>,
    ) -> Result<usize, Status> {
        // only readable through `program_binaries`
        if table == InfoTable::Program && param == CL_PROGRAM_BINARIES {
            return Err(CL_INVALID_VALUE);
        }

        let bytes = self.lookup(table, handle, key, param)?;
        match out {
            None => {
                self.record(DriverCall::Probe { table, handle, param, size: bytes.len() });
                Ok(bytes.len())
            }
            Some(out) => {
                self.record(DriverCall::Fill { table, handle, param, len: out.len() });
                if let Some(&status) = self.state.borrow().fill_failures.get(&(handle, param)) {
                    return Err(status);
                }
                if out.len() < bytes.len() {
                    return Err(CL_INVALID_VALUE);
                }
                out[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
        }
    }

    fn program_binaries(&self, program: RawHandle, out: &mut [&mut [u8]]) -> Result<(), Status> {
        let lens = out.iter().map(|dst| dst.len()).collect();
        self.record(DriverCall::Binaries { program, lens });
        // validates the handle and honours injected failures
        self.lookup(InfoTable::Program, program, InfoKey::None, CL_PROGRAM_BINARY_SIZES)?;

        let state = self.state.borrow();
        let Some(p) = state.objects.get(&program).and_then(|o| o.program.as_ref()) else {
            return Err(CL_INVALID_PROGRAM);
        };
        if out.len() != p.devices.len() {
            return Err(CL_INVALID_VALUE);
        }
        for (device, dst) in p.devices.iter().zip(out.iter_mut()) {
            let binary = p.binaries.get(device).map_or(&[][..], Vec::as_slice);
            let Some(dst) = dst.get_mut(..binary.len()) else {
                return Err(CL_INVALID_VALUE);
            };
            dst.copy_from_slice(binary);
        }
        Ok(())
    }

    fn retain(&self, category: Category, handle: RawHandle) -> Result<(), Status> {
        self.record(DriverCall::Retain { category, handle });
        if category == Category::Platform {
            return Err(CL_INVALID_VALUE);
        }
        let mut state = self.state.borrow_mut();
        match state.objects.get_mut(&handle) {
            Some(o) if accepts(o.category, category) => {
                o.refcount += 1;
                Ok(())
            }
            _ => Err(invalid(category)),
        }
    }

    fn release(&self, category: Category, handle: RawHandle) -> Result<(), Status> {
        self.record(DriverCall::Release { category, handle });
        if category == Category::Platform {
            return Err(CL_INVALID_VALUE);
        }
        {
            let mut state = self.state.borrow_mut();
            match state.objects.get_mut(&handle) {
                Some(o) if accepts(o.category, category) && o.refcount > 0 => o.refcount -= 1,
                _ => return Err(invalid(category)),
            }
        }
        self.destroy_chain(handle);
        Ok(())
    }

    fn create_context(&self, properties: &[isize], devices: &[RawHandle]) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        if devices.is_empty() {
            return Err(CL_INVALID_VALUE);
        }
        for &d in devices {
            self.expect(d, Category::Device)?;
        }
        self.parse_properties(properties)?;
        self.new_context(properties, devices.to_vec())
    }

    fn create_context_from_type(&self, properties: &[isize], device_type: u64) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        let platform = match self.parse_properties(properties)? {
            Some(p) => p,
            None => self.platforms().first().copied().ok_or(CL_INVALID_PLATFORM)?,
        };
        let count = self.device_ids(platform, device_type, None)?;
        let mut devices = vec![RawHandle::NULL; count];
        self.device_ids(platform, device_type, Some(devices.as_mut_slice()))?;
        self.new_context(properties, devices)
    }

    fn create_queue(&self, context: RawHandle, device: RawHandle, properties: u64) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(context, Category::Context)?;
        if !self.context_devices(context).contains(&device) {
            return Err(CL_INVALID_DEVICE);
        }
        if properties & !(CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE | CL_QUEUE_PROFILING_ENABLE) != 0 {
            return Err(CL_INVALID_VALUE);
        }
        let mut object = Object::new(Category::Queue, Some(context));
        object.set(CL_QUEUE_CONTEXT, context.to_ne_bytes().to_vec());
        object.set(CL_QUEUE_DEVICE, device.to_ne_bytes().to_vec());
        object.set(CL_QUEUE_PROPERTIES, u64_bytes(properties));
        Ok(self.create(object))
    }

    fn create_buffer(&self, context: RawHandle, flags: u64, size: usize) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(context, Category::Context)?;
        if size == 0 {
            return Err(CL_INVALID_BUFFER_SIZE);
        }
        let access = flags & (CL_MEM_READ_WRITE | CL_MEM_WRITE_ONLY | CL_MEM_READ_ONLY);
        if access.count_ones() > 1 {
            return Err(CL_INVALID_VALUE);
        }
        if flags & (CL_MEM_USE_HOST_PTR | CL_MEM_COPY_HOST_PTR) != 0 {
            return Err(CL_INVALID_HOST_PTR);
        }
        let flags = if access == 0 { flags | CL_MEM_READ_WRITE } else { flags };
        let mut object = Object::new(Category::Mem, Some(context));
        object.set(CL_MEM_TYPE, u32_bytes(CL_MEM_OBJECT_BUFFER));
        object.set(CL_MEM_FLAGS, u64_bytes(flags));
        object.set(CL_MEM_SIZE, usize_bytes(size));
        object.set(CL_MEM_CONTEXT, context.to_ne_bytes().to_vec());
        Ok(self.create(object))
    }

    fn create_image_2d(
        &self,
        context: RawHandle,
        flags: u64,
        format: ImageFormat,
        width: usize,
        height: usize,
    ) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(context, Category::Context)?;
        if width == 0 || height == 0 {
            return Err(CL_INVALID_IMAGE_SIZE);
        }
        let element = element_size(format).ok_or(CL_INVALID_IMAGE_FORMAT_DESCRIPTOR)?;
        if flags & (CL_MEM_USE_HOST_PTR | CL_MEM_COPY_HOST_PTR) != 0 {
            return Err(CL_INVALID_HOST_PTR);
        }
        let flags = if flags == 0 { CL_MEM_READ_WRITE } else { flags };
        let mut object = Object::new(Category::Image, Some(context));
        object.set(CL_MEM_TYPE, u32_bytes(CL_MEM_OBJECT_IMAGE2D));
        object.set(CL_MEM_FLAGS, u64_bytes(flags));
        object.set(CL_MEM_SIZE, usize_bytes(element * width * height));
        object.set(CL_MEM_CONTEXT, context.to_ne_bytes().to_vec());
        object.set(CL_IMAGE_FORMAT, format.to_ne_bytes().to_vec());
        object.set(CL_IMAGE_ELEMENT_SIZE, usize_bytes(element));
        object.set(CL_IMAGE_ROW_PITCH, usize_bytes(element * width));
        object.set(CL_IMAGE_WIDTH, usize_bytes(width));
        object.set(CL_IMAGE_HEIGHT, usize_bytes(height));
        Ok(self.create(object))
    }

    fn create_sampler(&self, context: RawHandle, normalized: bool, addressing: u32, filter: u32) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(context, Category::Context)?;
        if !(CL_ADDRESS_NONE..=CL_ADDRESS_MIRRORED_REPEAT).contains(&addressing)
            || !(CL_FILTER_NEAREST..=CL_FILTER_LINEAR).contains(&filter)
        {
            return Err(CL_INVALID_VALUE);
        }
        let mut object = Object::new(Category::Sampler, Some(context));
        object.set(CL_SAMPLER_CONTEXT, context.to_ne_bytes().to_vec());
        object.set(CL_SAMPLER_NORMALIZED_COORDS, bool_bytes(normalized));
        object.set(CL_SAMPLER_ADDRESSING_MODE, u32_bytes(addressing));
        object.set(CL_SAMPLER_FILTER_MODE, u32_bytes(filter));
        Ok(self.create(object))
    }

    fn create_program_with_source(&self, context: RawHandle, source: &str) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(context, Category::Context)?;
        if source.is_empty() {
            return Err(CL_INVALID_VALUE);
        }
        let devices = self.context_devices(context);
        let mut object = Object::new(Category::Program, Some(context));
        object.set(CL_PROGRAM_CONTEXT, context.to_ne_bytes().to_vec());
        object.set(CL_PROGRAM_NUM_DEVICES, u32_bytes(devices.len() as u32));
        object.set(CL_PROGRAM_DEVICES, handles_bytes(&devices));
        object.set(CL_PROGRAM_SOURCE, text(source));
        for &d in &devices {
            object.set_keyed(InfoKey::Device(d), CL_PROGRAM_BUILD_STATUS, CL_BUILD_NONE.to_ne_bytes().to_vec());
            object.set_keyed(InfoKey::Device(d), CL_PROGRAM_BINARY_TYPE, u32_bytes(CL_PROGRAM_BINARY_TYPE_NONE));
        }
        object.program = Some(ProgramState {
            source: source.to_string(),
            devices,
            ..ProgramState::default()
        });
        Ok(self.create(object))
    }

    fn build_program(&self, program: RawHandle, devices: &[RawHandle], options: &str) -> Result<(), Status> {
        self.expect(program, Category::Program)?;
        let status = {
            let mut state = self.state.borrow_mut();
            let object = state.objects.get_mut(&program).ok_or(CL_INVALID_PROGRAM)?;
            let Some(p) = object.program.as_mut() else {
                return Err(CL_INVALID_PROGRAM);
            };
            let targets = if devices.is_empty() { p.devices.clone() } else { devices.to_vec() };
            if targets.iter().any(|d| !p.devices.contains(d)) {
                return Err(CL_INVALID_DEVICE);
            }
            let failed_line = p.source.lines().find(|l| l.trim_start().starts_with("#error")).map(str::to_string);
            let (status, build_status, log) = match &failed_line {
                Some(line) => (CL_BUILD_PROGRAM_FAILURE, CL_BUILD_ERROR, format!("error: {}", line.trim())),
                None => (CL_SUCCESS, CL_BUILD_SUCCESS, String::new()),
            };
            if status == CL_SUCCESS {
                p.kernels = parse_kernels(&p.source);
                for &d in &targets {
                    p.binaries.insert(d, p.source.as_bytes().to_vec());
                }
            }
            for &d in &targets {
                let key = InfoKey::Device(d);
                object.set_keyed(key, CL_PROGRAM_BUILD_STATUS, build_status.to_ne_bytes().to_vec());
                object.set_keyed(key, CL_PROGRAM_BUILD_OPTIONS, text(options));
                object.set_keyed(key, CL_PROGRAM_BUILD_LOG, text(&log));
                if status == CL_SUCCESS {
                    object.set_keyed(key, CL_PROGRAM_BINARY_TYPE, u32_bytes(CL_PROGRAM_BINARY_TYPE_EXECUTABLE));
                }
            }
            status
        };
        self.record(DriverCall::Build { program, status });
        if status == CL_SUCCESS {
            Ok(())
        } else {
            Err(status)
        }
    }

    fn create_kernel(&self, program: RawHandle, name: &str) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(program, Category::Program)?;
        let (decl, context) = {
            let state = self.state.borrow();
            let object = state.objects.get(&program).ok_or(CL_INVALID_PROGRAM)?;
            let p = object.program.as_ref().ok_or(CL_INVALID_PROGRAM)?;
            if p.binaries.is_empty() {
                return Err(CL_INVALID_PROGRAM_EXECUTABLE);
            }
            let decl = p.kernels.iter().find(|k| k.name == name).cloned().ok_or(CL_INVALID_KERNEL_NAME)?;
            (decl, object.parent.unwrap_or(RawHandle::NULL))
        };
        let mut object = Object::new(Category::Kernel, Some(program));
        object.set(CL_KERNEL_FUNCTION_NAME, text(&decl.name));
        object.set(CL_KERNEL_NUM_ARGS, u32_bytes(decl.args.len() as u32));
        object.set(CL_KERNEL_CONTEXT, context.to_ne_bytes().to_vec());
        object.set(CL_KERNEL_PROGRAM, program.to_ne_bytes().to_vec());
        object.set(CL_KERNEL_WORK_GROUP_SIZE, usize_bytes(256));
        object.set(CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE, usize_bytes(32));
        let mut compile_size = Vec::new();
        for _ in 0..3 {
            compile_size.extend(usize_bytes(0));
        }
        object.set(CL_KERNEL_COMPILE_WORK_GROUP_SIZE, compile_size.clone());
        object.set(CL_KERNEL_GLOBAL_WORK_SIZE, compile_size);
        for (i, arg) in decl.args.iter().enumerate() {
            let key = InfoKey::ArgIndex(i as u32);
            object.set_keyed(key, CL_KERNEL_ARG_ADDRESS_QUALIFIER, u32_bytes(arg.address));
            object.set_keyed(key, CL_KERNEL_ARG_ACCESS_QUALIFIER, u32_bytes(arg.access));
            object.set_keyed(key, CL_KERNEL_ARG_TYPE_NAME, text(&arg.type_name));
            object.set_keyed(key, CL_KERNEL_ARG_TYPE_QUALIFIER, u64_bytes(arg.qualifiers));
            object.set_keyed(key, CL_KERNEL_ARG_NAME, text(&arg.name));
        }
        Ok(self.create(object))
    }

    fn enqueue_marker(&self, queue: RawHandle) -> Result<RawHandle, Status> {
        self.take_create_failure()?;
        self.expect(queue, Category::Queue)?;
        let (context, profiling) = {
            let state = self.state.borrow();
            let q = state.objects.get(&queue).ok_or(CL_INVALID_COMMAND_QUEUE)?;
            let props = q.props.get(&(InfoKey::None, CL_QUEUE_PROPERTIES)).cloned().unwrap_or_default();
            let mut raw = [0u8; 8];
            if props.len() == 8 {
                raw.copy_from_slice(&props);
            }
            (q.parent.unwrap_or(RawHandle::NULL), u64::from_ne_bytes(raw) & CL_QUEUE_PROFILING_ENABLE != 0)
        };
        let mut object = Object::new(Category::Event, Some(queue));
        object.set(CL_EVENT_COMMAND_QUEUE, queue.to_ne_bytes().to_vec());
        object.set(CL_EVENT_COMMAND_TYPE, u32_bytes(CL_COMMAND_MARKER));
        object.set(CL_EVENT_COMMAND_EXECUTION_STATUS, CL_COMPLETE.to_ne_bytes().to_vec());
        object.set(CL_EVENT_CONTEXT, context.to_ne_bytes().to_vec());
        if profiling {
            let mut state = self.state.borrow_mut();
            let base = state.clock;
            state.clock += 1000;
            drop(state);
            object.set(CL_PROFILING_COMMAND_QUEUED, u64_bytes(base + 100));
            object.set(CL_PROFILING_COMMAND_SUBMIT, u64_bytes(base + 200));
            object.set(CL_PROFILING_COMMAND_START, u64_bytes(base + 300));
            object.set(CL_PROFILING_COMMAND_END, u64_bytes(base + 400));
        }
        Ok(self.create(object))
    }

    fn flush(&self, queue: RawHandle) -> Result<(), Status> {
        self.expect(queue, Category::Queue)?;
        self.record(DriverCall::Flush(queue));
        Ok(())
    }

    fn finish(&self, queue: RawHandle) -> Result<(), Status> {
        self.expect(queue, Category::Queue)?;
        self.record(DriverCall::Finish(queue));
        Ok(())
    }

    fn wait_for_events(&self, events: &[RawHandle]) -> Result<(), Status> {
        if events.is_empty() {
            return Err(CL_INVALID_VALUE);
        }
        for &e in events {
            self.expect(e, Category::Event)?;
        }
        self.record(DriverCall::Wait(events.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_call_enumeration() {
        let fake = FakeDriver::with_sample_platforms();
        assert_eq!(fake.platform_ids(None).unwrap(), 2);
        let mut ids = [RawHandle::NULL; 2];
        fake.platform_ids(Some(&mut ids)).unwrap();
        assert_eq!(ids.to_vec(), fake.platforms());
    }

    #[test]
    fn test_device_filter() {
        let fake = FakeDriver::with_sample_platforms();
        let reference = fake.platforms()[0];
        assert_eq!(fake.device_ids(reference, CL_DEVICE_TYPE_ALL, None).unwrap(), 2);
        assert_eq!(fake.device_ids(reference, CL_DEVICE_TYPE_GPU, None).unwrap(), 1);
        assert_eq!(
            fake.device_ids(reference, CL_DEVICE_TYPE_ACCELERATOR, None),
            Err(CL_DEVICE_NOT_FOUND)
        );
    }

    #[test]
    fn test_undersized_fill_is_rejected() {
        let fake = FakeDriver::with_sample_platforms();
        let p = fake.platforms()[0];
        let size = fake.info(InfoTable::Platform, p, InfoKey::None, CL_PLATFORM_NAME, None).unwrap();
        let mut small = vec![0u8; size - 1];
        assert_eq!(
            fake.info(InfoTable::Platform, p, InfoKey::None, CL_PLATFORM_NAME, Some(&mut small)),
            Err(CL_INVALID_VALUE)
        );
    }

    #[test]
    fn test_wrong_table_for_handle() {
        let fake = FakeDriver::with_sample_platforms();
        let p = fake.platforms()[0];
        assert_eq!(
            fake.info(InfoTable::Device, p, InfoKey::None, CL_DEVICE_NAME, None),
            Err(CL_INVALID_DEVICE)
        );
    }

    #[test]
    fn test_release_destroys_and_releases_parent() {
        let fake = FakeDriver::with_sample_platforms();
        let device = fake.devices_of(fake.platforms()[0])[0];
        let ctx = fake.create_context(&[], &[device]).unwrap();
        let queue = fake.create_queue(ctx, device, 0).unwrap();
        assert_eq!(fake.refcount(ctx), 2);
        fake.release(Category::Context, ctx).unwrap();
        assert!(fake.is_alive(ctx));
        fake.release(Category::Queue, queue).unwrap();
        assert!(!fake.is_alive(queue));
        assert!(!fake.is_alive(ctx));
        assert_eq!(fake.release(Category::Context, ctx), Err(CL_INVALID_CONTEXT));
    }

    #[test]
    fn test_kernel_parsing() {
        let kernels = parse_kernels(
            "__kernel void add(__global const float* a, __global float *b, int n) {}\n\
             kernel void noop(void) {}",
        );
        assert_eq!(kernels.len(), 2);
        let add = &kernels[0];
        assert_eq!(add.name, "add");
        assert_eq!(add.args.len(), 3);
        assert_eq!(add.args[0].name, "a");
        assert_eq!(add.args[0].type_name, "float*");
        assert_eq!(add.args[0].address, CL_KERNEL_ARG_ADDRESS_GLOBAL);
        assert_eq!(add.args[0].qualifiers, CL_KERNEL_ARG_TYPE_CONST);
        assert_eq!(add.args[2].address, CL_KERNEL_ARG_ADDRESS_PRIVATE);
        assert!(kernels[1].args.is_empty());
    }

    #[test]
    fn test_build_failure_sets_log() {
        let fake = FakeDriver::with_sample_platforms();
        let device = fake.devices_of(fake.platforms()[0])[0];
        let ctx = fake.create_context(&[], &[device]).unwrap();
        let program = fake.create_program_with_source(ctx, "#error nope\n").unwrap();
        assert_eq!(fake.build_program(program, &[], ""), Err(CL_BUILD_PROGRAM_FAILURE));
        let log = fake
            .lookup(InfoTable::ProgramBuild, program, InfoKey::Device(device), CL_PROGRAM_BUILD_LOG)
            .unwrap();
        assert_eq!(log, text("error: #error nope"));
        assert_eq!(fake.create_kernel(program, "x"), Err(CL_INVALID_PROGRAM_EXECUTABLE));
    }
}

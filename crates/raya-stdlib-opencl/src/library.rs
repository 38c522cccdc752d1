//! Library entry points shared by the host functions and wrapper methods

use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;
use raya_sdk::NativeValue;

use crate::args;
use crate::catalog::{encode_bitfield, encode_enum, errors, EnumType};
use crate::classes::{Context, Device, Event, Image, Kernel, Mem, Platform, Program, Queue, Sampler};
use crate::driver::consts::CL_DEVICE_NOT_FOUND;
use crate::driver::{Driver, InfoKey, RawHandle, Status};
use crate::error::{ClError, ClResult};
use crate::guard;
use crate::object::{self, Category, ClObject, Wrapped};
use crate::query;
use crate::schema::{InfoTable, Schema};
use crate::version::{self, ApiVersion};

/// The binding, bound to one driver
#[derive(Clone)]
pub struct OpenCl {
    driver: Rc<dyn Driver>,
}

impl OpenCl {
    /// Bind to a driver
    pub fn new(driver: Rc<dyn Driver>) -> Self {
        OpenCl { driver }
    }

    /// The driver every wrapper of this library talks to
    pub fn driver(&self) -> &Rc<dyn Driver> {
        &self.driver
    }

    /// `cl.platforms()`: every platform, wrapped
    pub fn platforms(&self) -> ClResult<NativeValue> {
        let ids = enumerate(|out| self.driver.platform_ids(out))?;
        debug!("{} platform(s)", ids.len());
        ids.into_iter()
            .map(|h| self.wrap::<Platform>(h))
            .collect::<ClResult<Vec<_>>>()
            .map(NativeValue::Array)
    }

    /// Devices of `platform` matching the `device_type` names; none found
    /// is an empty list, not an error
    pub fn devices(&self, platform: RawHandle, device_type: &str) -> ClResult<NativeValue> {
        let bits = encode_bitfield(device_type, EnumType::DeviceType)?;
        let ids = match enumerate(|out| self.driver.device_ids(platform, bits, out)) {
            Err(e) if e.status() == Some(CL_DEVICE_NOT_FOUND) => Vec::new(),
            other => other?,
        };
        ids.into_iter()
            .map(|h| self.wrap::<Device>(h))
            .collect::<ClResult<Vec<_>>>()
            .map(NativeValue::Array)
    }

    /// `cl.context(devices | type_name [, properties])`
    pub fn context(&self, args: &[NativeValue]) -> ClResult<NativeValue> {
        let properties = match args.get(1).filter(|v| !v.is_null()) {
            Some(_) => context_properties(args::table(args, 1)?)?,
            None => Vec::new(),
        };
        let handle = match args.first() {
            Some(NativeValue::Array(devices)) => {
                let devices = devices
                    .iter()
                    .map(|d| guard::check_object(d, Category::Device)?.handle())
                    .collect::<ClResult<Vec<_>>>()?;
                self.driver.create_context(&properties, &devices)
            }
            Some(NativeValue::String(name)) => {
                let bits = encode_bitfield(name, EnumType::DeviceType)?;
                self.driver.create_context_from_type(&properties, bits)
            }
            other => {
                return Err(ClError::Argument(format!(
                    "expected type table or string for argument 1, got {}",
                    other.map_or("nil", NativeValue::type_name)
                )))
            }
        }
        .map_err(ClError::native)?;
        Ok(self.adopt::<Context>(handle))
    }

    /// `cl.features()`: what this build was compiled with
    pub fn features(&self) -> NativeValue {
        let schema = Schema::get();
        let mut map = BTreeMap::new();
        map.insert("api_version".to_string(), NativeValue::string(version::COMPILED.as_str()));
        map.insert("device_refcount".to_string(), NativeValue::bool(Category::Device.refcounted()));
        map.insert(
            "kernel_arg_info".to_string(),
            NativeValue::bool(!schema.entries(InfoTable::KernelArg).is_empty()),
        );
        map.insert(
            "device_partition".to_string(),
            NativeValue::bool(schema.find(InfoTable::Device, "partition_properties").is_some()),
        );
        map.insert(
            "image_arrays".to_string(),
            NativeValue::bool(ApiVersion::V1_2.is_available()),
        );
        NativeValue::Object(map)
    }

    /// `cl.errorString(code)`
    pub fn error_string(&self, code: i64) -> NativeValue {
        let message = Status::try_from(code).map_or(errors::UNKNOWN_ERROR, errors::translate);
        NativeValue::string(message)
    }

    /// Wrap an existing handle, taking a new reference on it
    pub fn wrap<T: ClObject>(&self, handle: RawHandle) -> ClResult<NativeValue> {
        let (object, value) = object::place(self, T::from_wrapped(self.unretained(handle, T::CATEGORY)));
        object.wrapped().retain()?;
        debug!("wrap {} {}", T::CATEGORY, handle);
        Ok(value)
    }

    /// Wrap a handle fresh from a creation call, owning its reference
    pub fn adopt<T: ClObject>(&self, handle: RawHandle) -> NativeValue {
        let (object, value) = object::place(self, T::from_wrapped(self.unretained(handle, T::CATEGORY)));
        object.wrapped().adopt();
        debug!("created {} {}", T::CATEGORY, handle);
        value
    }

    /// [`OpenCl::wrap`] for a category known only at run time
    pub fn wrap_category(&self, category: Category, handle: RawHandle) -> ClResult<NativeValue> {
        match category {
            Category::Platform => self.wrap::<Platform>(handle),
            Category::Device => self.wrap::<Device>(handle),
            Category::Context => self.wrap::<Context>(handle),
            Category::Queue => self.wrap::<Queue>(handle),
            Category::Mem => self.wrap::<Mem>(handle),
            Category::Image => self.wrap::<Image>(handle),
            Category::Sampler => self.wrap::<Sampler>(handle),
            Category::Program => self.wrap::<Program>(handle),
            Category::Kernel => self.wrap::<Kernel>(handle),
            Category::Event => self.wrap::<Event>(handle),
        }
    }

    /// Property map of `tables` for one wrapped handle
    pub fn query(&self, wrapped: &Wrapped, tables: &[InfoTable], key: InfoKey) -> ClResult<NativeValue> {
        let handle = wrapped.handle()?;
        let driver = &self.driver;
        let mut fetch = |table: InfoTable, param: u32, out: Option<&mut [u8]>| {
            driver.info(table, handle, key, param, out)
        };
        let mut fetch_binaries = |out: &mut [&mut [u8]]| driver.program_binaries(handle, out);
        let mut rewrap = |category: Category, h: RawHandle| self.wrap_category(category, h);
        query::collect_info(tables, &mut fetch, &mut fetch_binaries, &mut rewrap)
    }

    fn unretained(&self, handle: RawHandle, category: Category) -> Wrapped {
        Wrapped::new(Rc::clone(&self.driver), handle, category)
    }
}

/// Two-call enumeration into a vector of handles
fn enumerate(
    mut call: impl FnMut(Option<&mut [RawHandle]>) -> Result<usize, Status>,
) -> ClResult<Vec<RawHandle>> {
    let count = call(None).map_err(ClError::native)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    let mut ids = vec![RawHandle::NULL; count];
    let filled = call(Some(ids.as_mut_slice())).map_err(ClError::native)?;
    ids.truncate(filled.min(count));
    Ok(ids)
}

/// Zero-terminated property list from `{ platform = ..., interop_user_sync = ... }`
fn context_properties(table: &NativeValue) -> ClResult<Vec<isize>> {
    let mut out = Vec::new();
    for (name, value) in table.as_object().into_iter().flatten() {
        let key = encode_enum(name, EnumType::ContextProperties)? as isize;
        let raw = match value {
            NativeValue::Bool(b) => *b as isize,
            NativeValue::Int(n) => *n as isize,
            NativeValue::Userdata(_) => guard::check_object(value, Category::Platform)?.handle()?.addr() as isize,
            other => {
                return Err(ClError::Argument(format!(
                    "context property '{}' cannot be {}",
                    name,
                    other.type_name()
                )))
            }
        };
        out.push(key);
        out.push(raw);
    }
    if !out.is_empty() {
        out.push(0);
    }
    Ok(out)
}

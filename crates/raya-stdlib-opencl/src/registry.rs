//! Symbolic native function registry for the OpenCL stdlib
//!
//! Registers the `cl.*` library functions into a `NativeFunctionRegistry`.
//! Wrapper methods are not registered here; they travel with each object's
//! metatable.

use std::rc::Rc;

use raya_sdk::{NativeError, NativeFunctionRegistry};

use crate::args;
use crate::driver::Driver;
use crate::library::OpenCl;

/// Names registered by [`register_opencl`]
pub const FUNCTIONS: [&str; 4] = ["cl.platforms", "cl.context", "cl.features", "cl.errorString"];

/// Register all OpenCL native functions, bound to `driver`.
pub fn register_opencl(registry: &mut NativeFunctionRegistry, driver: Rc<dyn Driver>) -> OpenCl {
    let lib = OpenCl::new(driver);

    let l = lib.clone();
    registry.register("cl.platforms", move |_args| l.platforms().map_err(NativeError::from));

    let l = lib.clone();
    registry.register("cl.context", move |args| l.context(args).map_err(NativeError::from));

    let l = lib.clone();
    registry.register("cl.features", move |_args| Ok(l.features()));

    let l = lib.clone();
    registry.register("cl.errorString", move |args| {
        let code = args::integer(args, 0)?;
        Ok(l.error_string(code))
    });

    lib
}

//! End-to-end tests for the OpenCL library as the host sees it.
//!
//! Everything goes through the registered `cl.*` functions and the bound
//! userdata methods, against the in-memory driver.

use std::collections::BTreeMap;
use std::rc::Rc;

use raya_sdk::{AbiResult, CallStyle, NativeFunctionRegistry, NativeValue};
use raya_stdlib_opencl::classes::Context;
use raya_stdlib_opencl::driver::DriverCall;
use raya_stdlib_opencl::{guard, register_opencl, FakeDriver};

struct Host {
    fake: Rc<FakeDriver>,
    registry: NativeFunctionRegistry,
}

fn host() -> Host {
    let _ = env_logger::builder().is_test(true).try_init();
    let fake = Rc::new(FakeDriver::with_sample_platforms());
    let mut registry = NativeFunctionRegistry::new();
    register_opencl(&mut registry, fake.clone());
    Host { fake, registry }
}

fn call(value: &NativeValue, method: &str, args: &[NativeValue]) -> AbiResult<NativeValue> {
    value
        .as_userdata()
        .expect("value is not userdata")
        .call(method, args, CallStyle::Method)
}

fn info(value: &NativeValue) -> NativeValue {
    call(value, "info", &[]).expect("info failed")
}

fn text<'a>(map: &'a NativeValue, key: &str) -> &'a str {
    map.get(key)
        .and_then(NativeValue::as_str)
        .unwrap_or_else(|| panic!("'{}' is not a string in {:?}", key, map))
}

fn number(map: &NativeValue, key: &str) -> i64 {
    map.get(key)
        .and_then(NativeValue::as_i64)
        .unwrap_or_else(|| panic!("'{}' is not a number in {:?}", key, map))
}

fn class_of(value: &NativeValue) -> &'static str {
    value.as_userdata().expect("value is not userdata").object().class_name()
}

fn s(text: &str) -> NativeValue {
    NativeValue::string(text)
}

impl Host {
    fn platforms(&self) -> Vec<NativeValue> {
        let list = self.registry.call("cl.platforms", &[]).unwrap();
        list.as_array().unwrap().to_vec()
    }

    fn devices(&self, platform: usize, device_type: &str) -> Vec<NativeValue> {
        let platform = &self.platforms()[platform];
        let list = call(platform, "devices", &[s(device_type)]).unwrap();
        list.as_array().unwrap().to_vec()
    }

    /// CPU device of the reference platform and a context on it
    fn cpu_context(&self) -> (NativeValue, NativeValue) {
        let cpu = self.devices(0, "cpu").remove(0);
        let ctx = self
            .registry
            .call("cl.context", &[NativeValue::Array(vec![cpu.clone()])])
            .unwrap();
        (cpu, ctx)
    }
}

const SOURCE: &str = "__kernel void add(__global const float* a, __global float* b, int n) {}\n\
                      __kernel void scale(__global float* v) {}\n";

// ────────────────────────────────────────────────────────────────────────────
// Platforms and devices
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_platform_scenario() {
    let host = host();
    let platforms = host.platforms();
    assert_eq!(platforms.len(), 2);

    for platform in &platforms {
        assert_eq!(class_of(platform), "platform");
        let map = info(platform);
        for key in ["name", "vendor", "version", "profile", "extensions"] {
            assert!(map.get(key).and_then(NativeValue::as_str).is_some(), "{} missing", key);
        }
    }

    let reference = info(&platforms[0]);
    assert_eq!(text(&reference, "name"), "Raya Reference Platform");
    assert_eq!(text(&reference, "profile"), "FULL_PROFILE");
    let embedded = info(&platforms[1]);
    assert_eq!(text(&embedded, "name"), "Raya Embedded Platform");
    assert_eq!(text(&embedded, "profile"), "EMBEDDED_PROFILE");
    assert_eq!(text(&embedded, "extensions"), "");
}

#[test]
fn test_devices_by_type() {
    let host = host();
    assert_eq!(host.devices(0, "all").len(), 2);

    let gpus = host.devices(0, "gpu");
    assert_eq!(gpus.len(), 1);
    assert_eq!(class_of(&gpus[0]), "device");
    assert_eq!(text(&info(&gpus[0]), "name"), "Raya Virtual GPU");

    assert_eq!(host.devices(0, "cpu, gpu").len(), 2);
    assert!(host.devices(0, "accelerator").is_empty());
    assert_eq!(host.devices(1, "accelerator").len(), 1);

    let platform = &host.platforms()[0];
    let default = call(platform, "devices", &[]).unwrap();
    assert_eq!(default.as_array().unwrap().len(), 2);

    let err = call(platform, "devices", &[s("bogus")]).unwrap_err();
    assert!(err.to_string().contains("enumeration value 'bogus' not found in device_type"));
}

#[test]
fn test_device_info_decoding() {
    let host = host();
    let cpu = host.devices(0, "cpu").remove(0);
    let map = info(&cpu);

    assert_eq!(text(&map, "type"), "cpu");
    assert_eq!(text(&map, "name"), "Raya Host CPU");
    assert_eq!(text(&map, "driver_version"), "0.2.0");
    assert_eq!(text(&map, "local_mem_type"), "local");
    assert_eq!(text(&map, "queue_properties"), "out_of_order_exec_mode_enable, profiling_enable");
    assert_eq!(map.get("available").and_then(NativeValue::as_bool), Some(true));

    let sizes: Vec<i64> = map
        .get("max_work_item_sizes")
        .and_then(NativeValue::as_array)
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(sizes, vec![256, 256, 64]);

    let platform = map.get("platform").unwrap();
    assert_eq!(class_of(platform), "platform");
    assert_eq!(text(&info(platform), "name"), "Raya Reference Platform");
}

#[test]
fn test_device_info_serializes_to_json() {
    let host = host();
    let gpu = host.devices(0, "gpu").remove(0);
    let json = serde_json::to_value(info(&gpu)).unwrap();

    assert_eq!(json["name"], "Raya Virtual GPU");
    assert_eq!(json["max_work_item_sizes"], serde_json::json!([256, 256, 64]));
    let platform = json["platform"].as_str().unwrap();
    assert!(platform.starts_with("OpenCL platform (0x"), "{}", platform);
}

#[cfg(feature = "cl-1-2")]
#[test]
fn test_device_partition_rows() {
    let host = host();
    let cpu = host.devices(0, "cpu").remove(0);
    let map = info(&cpu);
    assert!(map.get("parent_device").unwrap().is_null());
    assert_eq!(map.get("partition_properties").and_then(NativeValue::as_array).map(<[_]>::len), Some(0));
    assert!(number(&map, "reference_count") >= 1);
}

// ────────────────────────────────────────────────────────────────────────────
// Type guard
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_device_is_not_a_context() {
    let host = host();
    let cpu = host.devices(0, "cpu").remove(0);

    let err = guard::check::<Context>(&cpu).err().unwrap();
    let message = err.to_string();
    assert!(message.contains("context"), "{}", message);
    assert!(message.contains("device"), "{}", message);
    assert_eq!(message, "expected OpenCL context object, found device object");
}

#[test]
fn test_method_rejects_wrong_category() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let err = call(&ctx, "queue", &[ctx.clone()]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type mismatch: expected OpenCL device object, got context object"
    );

    let err = call(&ctx, "queue", &[NativeValue::int(7)]).unwrap_err();
    assert_eq!(err.to_string(), "Type mismatch: expected OpenCL device object, got number");
}

// ────────────────────────────────────────────────────────────────────────────
// Contexts
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_context_from_devices() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    assert_eq!(class_of(&ctx), "context");

    let map = info(&ctx);
    let devices = map.get("devices").and_then(NativeValue::as_array).unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(text(&info(&devices[0]), "name"), text(&info(&cpu), "name"));
    assert_eq!(number(&map, "num_devices"), 1);
    assert_eq!(map.get("properties").and_then(NativeValue::as_object).map(BTreeMap::len), Some(0));
}

#[test]
fn test_context_from_type_and_platform() {
    let host = host();
    let gpu_ctx = host.registry.call("cl.context", &[s("gpu")]).unwrap();
    let devices = info(&gpu_ctx);
    let devices = devices.get("devices").and_then(NativeValue::as_array).unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(text(&info(&devices[0]), "name"), "Raya Virtual GPU");

    let embedded = host.platforms().remove(1);
    let mut props = BTreeMap::new();
    props.insert("platform".to_string(), embedded);
    let ctx = host
        .registry
        .call("cl.context", &[s("accelerator"), NativeValue::Object(props)])
        .unwrap();
    let map = info(&ctx);
    let properties = map.get("properties").unwrap();
    let platform = properties.get("platform").unwrap();
    assert_eq!(text(&info(platform), "name"), "Raya Embedded Platform");
}

#[test]
fn test_context_argument_errors() {
    let host = host();
    let err = host.registry.call("cl.context", &[NativeValue::int(42)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Argument error: expected type table or string for argument 1, got number"
    );

    let err = host.registry.call("cl.context", &[s("accelerator")]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: device not found");
}

// ────────────────────────────────────────────────────────────────────────────
// Queues and events
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_marker_event_with_profiling() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let queue = call(&ctx, "queue", &[cpu.clone(), s("profiling_enable")]).unwrap();
    assert_eq!(text(&info(&queue), "properties"), "profiling_enable");

    let event = call(&queue, "marker", &[]).unwrap();
    assert_eq!(class_of(&event), "event");
    let map = info(&event);
    assert_eq!(text(&map, "command_type"), "marker");
    assert_eq!(text(&map, "command_execution_status"), "complete");
    assert_eq!(class_of(map.get("command_queue").unwrap()), "queue");

    let times = call(&event, "profiling", &[]).unwrap();
    let stamps: Vec<i64> = ["queued", "submit", "start", "end"]
        .iter()
        .map(|k| number(&times, k))
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]), "{:?}", stamps);

    assert!(call(&event, "wait", &[]).unwrap().is_null());
    assert!(call(&queue, "flush", &[]).unwrap().is_null());
    assert!(call(&queue, "finish", &[]).unwrap().is_null());
    let calls = host.fake.calls();
    assert!(calls.iter().any(|c| matches!(c, DriverCall::Wait(events) if events.len() == 1)));
    assert!(calls.iter().any(|c| matches!(c, DriverCall::Finish(_))));
}

#[test]
fn test_profiling_needs_profiling_queue() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let queue = call(&ctx, "queue", &[cpu]).unwrap();
    assert_eq!(text(&info(&queue), "properties"), "");
    let event = call(&queue, "marker", &[]).unwrap();
    let err = call(&event, "profiling", &[]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: profiling info not available");
}

#[test]
fn test_queue_on_foreign_device_fails() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let gpu = host.devices(0, "gpu").remove(0);
    let err = call(&ctx, "queue", &[gpu]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: invalid device");
}

// ────────────────────────────────────────────────────────────────────────────
// Memory objects and samplers
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_buffer() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let buffer = call(&ctx, "buffer", &[s("read_write"), NativeValue::int(1024)]).unwrap();
    assert_eq!(class_of(&buffer), "mem");

    let map = info(&buffer);
    assert_eq!(text(&map, "type"), "buffer");
    assert_eq!(text(&map, "flags"), "read_write");
    assert_eq!(number(&map, "size"), 1024);
    assert!(matches!(map.get("host_ptr"), Some(NativeValue::Pointer(0))));
    assert_eq!(class_of(map.get("context").unwrap()), "context");
    assert!(map.get("associated_memobject").unwrap().is_null());

    let err = call(&ctx, "buffer", &[s("read_write"), NativeValue::int(0)]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: invalid buffer size");
    let err = call(&ctx, "buffer", &[s("read_write"), NativeValue::int(-1)]).unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
}

#[test]
fn test_image_merges_mem_and_image_tables() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let mut format = BTreeMap::new();
    format.insert("order".to_string(), s("rgba"));
    format.insert("data_type".to_string(), s("unormint8"));
    let image = call(
        &ctx,
        "image",
        &[s("read_only"), NativeValue::Object(format), NativeValue::int(16), NativeValue::int(8)],
    )
    .unwrap();
    assert_eq!(class_of(&image), "image");

    let map = info(&image);
    assert_eq!(text(&map, "type"), "image2d");
    assert_eq!(text(&map, "flags"), "read_only");
    assert_eq!(number(&map, "size"), 16 * 8 * 4);
    assert_eq!(number(&map, "width"), 16);
    assert_eq!(number(&map, "height"), 8);
    assert_eq!(number(&map, "element_size"), 4);
    assert_eq!(number(&map, "row_pitch"), 64);
    let format = map.get("format").unwrap();
    assert_eq!(text(format, "order"), "rgba");
    assert_eq!(text(format, "data_type"), "unormint8");
}

#[test]
fn test_image_is_accepted_where_mem_is_released() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let mut format = BTreeMap::new();
    format.insert("order".to_string(), s("r"));
    format.insert("data_type".to_string(), s("float"));
    let image = call(
        &ctx,
        "image",
        &[s(""), NativeValue::Object(format), NativeValue::int(4), NativeValue::int(4)],
    )
    .unwrap();
    assert_eq!(number(&info(&image), "element_size"), 4);
    call(&image, "close", &[]).unwrap();
    assert_eq!(host.fake.live(raya_stdlib_opencl::Category::Image), 0);
}

#[test]
fn test_sampler() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let sampler = call(&ctx, "sampler", &[NativeValue::bool(true), s("clamp"), s("linear")]).unwrap();
    let map = info(&sampler);
    assert_eq!(map.get("normalized_coords").and_then(NativeValue::as_bool), Some(true));
    assert_eq!(text(&map, "addressing_mode"), "clamp");
    assert_eq!(text(&map, "filter_mode"), "linear");

    let err = call(&ctx, "sampler", &[NativeValue::bool(true), s("wrap_around"), s("linear")]).unwrap_err();
    assert!(err.to_string().contains("enumeration value 'wrap_around' not found in addressing_mode"));
}

// ────────────────────────────────────────────────────────────────────────────
// Programs and kernels
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_program_build_and_binaries() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s(SOURCE)]).unwrap();
    assert_eq!(text(&info(&program), "source"), SOURCE);

    let before = call(&program, "build_info", &[cpu.clone()]).unwrap();
    assert_eq!(text(&before, "build_status"), "none");
    let err = call(&program, "kernel", &[s("add")]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: invalid program executable");

    assert!(call(&program, "build", &[s("-cl-fast-relaxed-math")]).unwrap().is_null());

    let build = call(&program, "info", &[cpu.clone()]).unwrap();
    assert_eq!(text(&build, "build_status"), "success");
    assert_eq!(text(&build, "build_options"), "-cl-fast-relaxed-math");
    assert_eq!(text(&build, "build_log"), "");

    let map = info(&program);
    assert_eq!(number(&map, "num_devices"), 1);
    let sizes = map.get("binary_sizes").and_then(NativeValue::as_array).unwrap();
    assert_eq!(sizes.len(), 1);
    assert_eq!(sizes[0].as_i64(), Some(SOURCE.len() as i64));
    let binaries = map.get("binaries").and_then(NativeValue::as_array).unwrap();
    assert_eq!(binaries.len(), 1);
    assert_eq!(binaries[0].as_bytes(), Some(SOURCE.as_bytes()));
}

#[cfg(feature = "cl-1-2")]
#[test]
fn test_program_kernel_names() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s(SOURCE)]).unwrap();
    call(&program, "build", &[]).unwrap();
    let map = info(&program);
    assert_eq!(number(&map, "num_kernels"), 2);
    assert_eq!(text(&map, "kernel_names"), "add;scale");
    let build = call(&program, "build_info", &[cpu]).unwrap();
    assert_eq!(text(&build, "binary_type"), "executable");
}

#[test]
fn test_failed_build_keeps_log() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s("#error boom\n")]).unwrap();
    let err = call(&program, "build", &[]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: build program failure");

    let build = call(&program, "build_info", &[cpu]).unwrap();
    assert_eq!(text(&build, "build_status"), "error");
    assert_eq!(text(&build, "build_log"), "error: #error boom");
}

#[test]
fn test_kernel_info_and_workgroup() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s(SOURCE)]).unwrap();
    call(&program, "build", &[]).unwrap();

    let kernel = call(&program, "kernel", &[s("add")]).unwrap();
    assert_eq!(class_of(&kernel), "kernel");
    let map = info(&kernel);
    assert_eq!(text(&map, "function_name"), "add");
    assert_eq!(number(&map, "num_args"), 3);
    assert_eq!(class_of(map.get("program").unwrap()), "program");

    let wg = call(&kernel, "workgroup_info", &[cpu.clone()]).unwrap();
    assert_eq!(number(&wg, "work_group_size"), 256);
    let same = call(&kernel, "info", &[cpu]).unwrap();
    assert_eq!(number(&same, "work_group_size"), 256);

    let gpu = host.devices(0, "gpu").remove(0);
    let err = call(&kernel, "workgroup_info", &[gpu]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: invalid device");

    let err = call(&program, "kernel", &[s("nope")]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: invalid kernel name");
}

#[cfg(feature = "cl-1-2")]
#[test]
fn test_kernel_arg_info() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s(SOURCE)]).unwrap();
    call(&program, "build", &[]).unwrap();
    let kernel = call(&program, "kernel", &[s("add")]).unwrap();

    let a = call(&kernel, "arg_info", &[NativeValue::int(0)]).unwrap();
    assert_eq!(text(&a, "name"), "a");
    assert_eq!(text(&a, "type_name"), "float*");
    assert_eq!(text(&a, "address_qualifier"), "global");
    assert_eq!(text(&a, "access_qualifier"), "none");
    assert_eq!(text(&a, "type_qualifier"), "type_const");

    let n = call(&kernel, "arg_info", &[NativeValue::int(2)]).unwrap();
    assert_eq!(text(&n, "type_name"), "int");
    assert_eq!(text(&n, "address_qualifier"), "private");
    assert_eq!(text(&n, "type_qualifier"), "type_none");

    let err = call(&kernel, "arg_info", &[NativeValue::int(3)]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: invalid arg index");
    let err = call(&kernel, "arg_info", &[NativeValue::int(-1)]).unwrap_err();
    assert!(err.to_string().contains("non-negative"));
}

#[cfg(not(feature = "cl-1-2"))]
#[test]
fn test_kernel_arg_info_unsupported() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s(SOURCE)]).unwrap();
    call(&program, "build", &[]).unwrap();
    let kernel = call(&program, "kernel", &[s("add")]).unwrap();
    let err = call(&kernel, "arg_info", &[NativeValue::int(0)]).unwrap_err();
    assert_eq!(err.to_string(), "kernel argument info is not supported by this build");
}

// ────────────────────────────────────────────────────────────────────────────
// Calling convention, string conversion, close
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_function_style_strips_receiver() {
    let host = host();
    let (cpu, ctx) = host.cpu_context();
    let program = call(&ctx, "program", &[s(SOURCE)]).unwrap();
    let cell = program.as_userdata().unwrap();

    let as_function = cell.call("info", &[program.clone()], CallStyle::Function).unwrap();
    assert_eq!(text(&as_function, "source"), SOURCE);

    let build = cell
        .call("build_info", &[program.clone(), cpu.clone()], CallStyle::Function)
        .unwrap();
    assert_eq!(text(&build, "build_status"), "none");

    // a different object in first position is an argument, not the receiver
    let err = cell.call("build_info", &[ctx.clone()], CallStyle::Function).unwrap_err();
    assert!(err.to_string().contains("got context object"));
}

#[test]
fn test_tostring_and_close() {
    let host = host();
    let (_, ctx) = host.cpu_context();
    let cell = ctx.as_userdata().unwrap();
    assert!(cell.describe().starts_with("OpenCL context (0x"), "{}", cell.describe());

    assert!(call(&ctx, "close", &[]).unwrap().is_null());
    assert_eq!(cell.describe(), "OpenCL context (closed)");
    let err = call(&ctx, "info", &[]).unwrap_err();
    assert_eq!(err.to_string(), "OpenCL context object is closed");
    assert!(call(&ctx, "close", &[]).unwrap().is_null());
}

#[test]
fn test_unknown_method() {
    let host = host();
    let platform = host.platforms().remove(0);
    let err = call(&platform, "queue", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Module error: platform has no method 'queue'");
}

// ────────────────────────────────────────────────────────────────────────────
// Library functions
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_error_string() {
    let host = host();
    let known = host.registry.call("cl.errorString", &[NativeValue::int(-5)]).unwrap();
    assert_eq!(known.as_str(), Some("out of resources"));
    let unknown = host.registry.call("cl.errorString", &[NativeValue::int(-9999)]).unwrap();
    assert_eq!(unknown.as_str(), Some("unknown error"));
}

#[test]
fn test_features() {
    let host = host();
    let features = host.registry.call("cl.features", &[]).unwrap();
    let expected = if cfg!(feature = "cl-1-2") { "1.2" } else { "1.1" };
    assert_eq!(text(&features, "api_version"), expected);
    assert_eq!(
        features.get("device_refcount").and_then(NativeValue::as_bool),
        Some(cfg!(feature = "cl-1-2"))
    );
}

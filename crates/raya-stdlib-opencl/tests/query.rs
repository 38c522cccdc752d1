//! Info queries observed from the driver side: the two-call idiom, the
//! exact set of friendly names per table, and failure handling.

use std::collections::BTreeSet;
use std::rc::Rc;

use raya_sdk::{CallStyle, NativeValue};
use raya_stdlib_opencl::classes::{Context, Device, Image, Platform};
use raya_stdlib_opencl::driver::consts::*;
use raya_stdlib_opencl::driver::{Driver, DriverCall, ImageFormat, InfoKey};
use raya_stdlib_opencl::object::ClObject;
use raya_stdlib_opencl::schema::{InfoTable, Schema};
use raya_stdlib_opencl::{guard, Category, ClError, FakeDriver, OpenCl};

fn setup() -> (Rc<FakeDriver>, OpenCl) {
    let fake = Rc::new(FakeDriver::with_sample_platforms());
    let lib = OpenCl::new(fake.clone());
    (fake, lib)
}

fn info(value: &NativeValue) -> NativeValue {
    value
        .as_userdata()
        .unwrap()
        .call("info", &[], CallStyle::Method)
        .unwrap()
}

fn keys(map: &NativeValue) -> BTreeSet<String> {
    map.as_object().unwrap().keys().cloned().collect()
}

fn schema_names(tables: &[InfoTable]) -> BTreeSet<String> {
    tables
        .iter()
        .flat_map(|t| Schema::get().entries(*t))
        .map(|row| row.name.to_string())
        .collect()
}

/// Every fill must be preceded by a probe of the same property and supply
/// exactly the probed length.
fn assert_two_call_consistency(calls: &[DriverCall]) {
    let mut fills = 0;
    let mut last_probe = None;
    for call in calls {
        match call {
            DriverCall::Probe { table, handle, param, size } => {
                last_probe = Some((*table, *handle, *param, *size));
            }
            DriverCall::Fill { table, handle, param, len } => {
                let (t, h, p, size) = last_probe.take().expect("fill without probe");
                assert_eq!((t, h, p), (*table, *handle, *param));
                assert_eq!(size, *len, "{}:{:#x} probed {} filled {}", table, param, size, len);
                fills += 1;
            }
            _ => {}
        }
    }
    assert!(fills > 0);
}

#[test]
fn test_every_category_returns_exactly_its_rows() {
    let (fake, lib) = setup();
    let platform = fake.platforms()[0];
    let device = fake.devices_of(platform)[0];

    let p = lib.wrap::<Platform>(platform).unwrap();
    assert_eq!(keys(&info(&p)), schema_names(&[InfoTable::Platform]));

    let d = lib.wrap::<Device>(device).unwrap();
    assert_eq!(keys(&info(&d)), schema_names(&[InfoTable::Device]));

    let ctx = lib.context(&[NativeValue::Array(vec![d.clone()])]).unwrap();
    assert_eq!(keys(&info(&ctx)), schema_names(&[InfoTable::Context]));

    let cell = ctx.as_userdata().unwrap();
    let queue = cell.call("queue", &[d.clone()], CallStyle::Method).unwrap();
    assert_eq!(keys(&info(&queue)), schema_names(&[InfoTable::Queue]));

    let buffer = cell
        .call("buffer", &[NativeValue::string("read_only"), NativeValue::int(64)], CallStyle::Method)
        .unwrap();
    assert_eq!(keys(&info(&buffer)), schema_names(&[InfoTable::Mem]));

    let program = cell
        .call("program", &[NativeValue::string("kernel void k(int x) {}")], CallStyle::Method)
        .unwrap();
    assert_eq!(keys(&info(&program)), schema_names(&[InfoTable::Program]));

    let program_cell = program.as_userdata().unwrap();
    program_cell.call("build", &[], CallStyle::Method).unwrap();
    let build = program_cell.call("info", &[d.clone()], CallStyle::Method).unwrap();
    assert_eq!(keys(&build), schema_names(&[InfoTable::ProgramBuild]));

    let kernel = program_cell
        .call("kernel", &[NativeValue::string("k")], CallStyle::Method)
        .unwrap();
    assert_eq!(keys(&info(&kernel)), schema_names(&[InfoTable::Kernel]));
    let wg = kernel
        .as_userdata()
        .unwrap()
        .call("workgroup_info", &[d], CallStyle::Method)
        .unwrap();
    assert_eq!(keys(&wg), schema_names(&[InfoTable::Workgroup]));

    let event = queue
        .as_userdata()
        .unwrap()
        .call("marker", &[], CallStyle::Method)
        .unwrap();
    assert_eq!(keys(&info(&event)), schema_names(&[InfoTable::Event]));
}

#[test]
fn test_image_names_are_the_union() {
    let (fake, lib) = setup();
    let device = fake.devices_of(fake.platforms()[0])[0];
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let format = ImageFormat {
        order: CL_RGBA,
        data_type: CL_FLOAT,
    };
    let image = fake.create_image_2d(ctx, CL_MEM_READ_ONLY, format, 2, 2).unwrap();
    let value = lib.adopt::<Image>(image);
    assert_eq!(
        keys(&info(&value)),
        schema_names(&[InfoTable::Mem, InfoTable::Image])
    );
    drop(value);
    fake.release(Category::Context, ctx).unwrap();
    assert!(!fake.is_alive(ctx));
}

#[test]
fn test_size_query_and_fill_agree() {
    let (fake, lib) = setup();
    let platform = fake.platforms()[0];
    let device = fake.devices_of(platform)[0];
    let d = lib.wrap::<Device>(device).unwrap();
    let ctx = lib.context(&[NativeValue::Array(vec![d])]).unwrap();
    let program = ctx
        .as_userdata()
        .unwrap()
        .call("program", &[NativeValue::string("kernel void k(void) {}")], CallStyle::Method)
        .unwrap();
    program.as_userdata().unwrap().call("build", &[], CallStyle::Method).unwrap();

    fake.clear_calls();
    info(&program);
    let calls = fake.calls();
    assert_two_call_consistency(&calls);

    assert!(!calls.iter().any(|c| matches!(
        c,
        DriverCall::Probe { param, .. } | DriverCall::Fill { param, .. } if *param == CL_PROGRAM_BINARIES
    )));
    let source_len = "kernel void k(void) {}".len();
    assert!(calls
        .iter()
        .any(|c| matches!(c, DriverCall::Binaries { lens, .. } if *lens == [source_len])));

    fake.clear_calls();
    let p = lib.wrap::<Platform>(platform).unwrap();
    info(&p);
    let calls = fake.calls();
    assert_two_call_consistency(&calls);
    let probed: Vec<u32> = calls
        .iter()
        .filter_map(|c| match c {
            DriverCall::Probe { param, .. } => Some(*param),
            _ => None,
        })
        .collect();
    let expected: Vec<u32> = Schema::get().entries(InfoTable::Platform).iter().map(|r| r.id).collect();
    assert_eq!(probed, expected);
}

#[test]
fn test_binaries_are_copied_into_checked_buffers() {
    let (fake, _lib) = setup();
    let device = fake.devices_of(fake.platforms()[0])[0];
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let source = "kernel void k(global int* x) {}";
    let program = fake.create_program_with_source(ctx, source).unwrap();
    fake.build_program(program, &[], "").unwrap();

    let mut bytes = [0u8; 64];
    assert_eq!(
        fake.info(InfoTable::Program, program, InfoKey::None, CL_PROGRAM_BINARIES, Some(&mut bytes[..])),
        Err(CL_INVALID_VALUE)
    );
    assert_eq!(
        fake.info(InfoTable::Program, program, InfoKey::None, CL_PROGRAM_BINARIES, None),
        Err(CL_INVALID_VALUE)
    );
    assert!(bytes.iter().all(|&b| b == 0));

    let mut short = vec![0u8; source.len() - 1];
    assert_eq!(
        fake.program_binaries(program, &mut [short.as_mut_slice()]),
        Err(CL_INVALID_VALUE)
    );
    let (mut a, mut b) = (vec![0u8; source.len()], vec![0u8; source.len()]);
    assert_eq!(
        fake.program_binaries(program, &mut [a.as_mut_slice(), b.as_mut_slice()]),
        Err(CL_INVALID_VALUE)
    );
    assert_eq!(fake.program_binaries(program, &mut []), Err(CL_INVALID_VALUE));

    let mut exact = vec![0u8; source.len()];
    fake.program_binaries(program, &mut [exact.as_mut_slice()]).unwrap();
    assert_eq!(exact, source.as_bytes());

    assert_eq!(
        fake.program_binaries(ctx, &mut [exact.as_mut_slice()]),
        Err(CL_INVALID_PROGRAM)
    );
    fake.release(Category::Program, program).unwrap();
    fake.release(Category::Context, ctx).unwrap();
}

#[test]
fn test_native_failure_aborts_whole_query() {
    let (fake, lib) = setup();
    let platform = fake.platforms()[0];
    fake.fail_info(platform, CL_PLATFORM_VENDOR, CL_OUT_OF_HOST_MEMORY);
    let p = lib.wrap::<Platform>(platform).unwrap();
    let err = p
        .as_userdata()
        .unwrap()
        .call("info", &[], CallStyle::Method)
        .unwrap_err();
    assert_eq!(err.to_string(), "OpenCL: out of host memory");
}

#[test]
fn test_fill_failure_is_reported() {
    let (fake, lib) = setup();
    let platform = fake.platforms()[0];
    fake.fail_fill(platform, CL_PLATFORM_NAME, CL_INVALID_VALUE);
    let p = lib.wrap::<Platform>(platform).unwrap();
    let wrapper = guard::check::<Platform>(&p).unwrap();
    let err = lib
        .query(wrapper.wrapped(), &[InfoTable::Platform], InfoKey::None)
        .unwrap_err();
    assert_eq!(err, ClError::native(CL_INVALID_VALUE));
    assert_eq!(err.status(), Some(CL_INVALID_VALUE));
}

#[test]
fn test_unknown_enum_value_fails_query() {
    let (fake, lib) = setup();
    let device = fake.devices_of(fake.platforms()[0])[0];
    fake.set_u32(device, CL_DEVICE_LOCAL_MEM_TYPE, 0x7777);
    let d = lib.wrap::<Device>(device).unwrap();
    let err = d
        .as_userdata()
        .unwrap()
        .call("info", &[], CallStyle::Method)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("unknown enum value = {} for device_local_mem_type", 0x7777)
    );
}

#[test]
fn test_decoder_size_mismatch_is_an_invariant_violation() {
    let (fake, lib) = setup();
    let device = fake.devices_of(fake.platforms()[0])[0];
    fake.set_info(device, InfoKey::None, CL_DEVICE_MAX_COMPUTE_UNITS, vec![1, 2, 3]);
    let d = lib.wrap::<Device>(device).unwrap();
    let wrapper = guard::check::<Device>(&d).unwrap();
    let err = lib
        .query(wrapper.wrapped(), &[InfoTable::Device], InfoKey::None)
        .unwrap_err();
    assert!(matches!(err, ClError::SchemaInvariant(_)), "{:?}", err);
}

#[test]
fn test_closed_wrapper_is_not_queried() {
    let (fake, lib) = setup();
    let device = fake.devices_of(fake.platforms()[0])[0];
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let value = lib.adopt::<Context>(ctx);
    let wrapper = guard::check::<Context>(&value).unwrap();
    wrapper.wrapped().dispose().unwrap();

    fake.clear_calls();
    let err = lib
        .query(wrapper.wrapped(), &[InfoTable::Context], InfoKey::None)
        .unwrap_err();
    assert_eq!(err, ClError::Closed("context"));
    assert!(fake.calls().is_empty());
    assert!(!fake.is_alive(ctx));
}

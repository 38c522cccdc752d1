//! Reference counting of wrapped handles against the in-memory driver.

use std::rc::Rc;

use raya_sdk::{CallStyle, NativeValue};
use raya_stdlib_opencl::classes::{Context, Platform, Program, Queue};
use raya_stdlib_opencl::driver::{Driver, DriverCall};
use raya_stdlib_opencl::object::ClObject;
use raya_stdlib_opencl::{guard, Category, FakeDriver, OpenCl, RawHandle};

fn setup() -> (Rc<FakeDriver>, OpenCl, RawHandle) {
    let fake = Rc::new(FakeDriver::with_sample_platforms());
    let lib = OpenCl::new(fake.clone());
    let device = fake.devices_of(fake.platforms()[0])[0];
    (fake, lib, device)
}

fn releases_of(fake: &FakeDriver, handle: RawHandle) -> usize {
    fake.calls()
        .iter()
        .filter(|c| matches!(c, DriverCall::Release { handle: h, .. } if *h == handle))
        .count()
}

fn retains_of(fake: &FakeDriver, handle: RawHandle) -> usize {
    fake.calls()
        .iter()
        .filter(|c| matches!(c, DriverCall::Retain { handle: h, .. } if *h == handle))
        .count()
}

#[test]
fn test_wrap_then_drop_releases_exactly_once() {
    let (fake, lib, device) = setup();
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let original = fake.refcount(ctx);

    let value = lib.wrap::<Context>(ctx).unwrap();
    assert_eq!(fake.refcount(ctx), original + 1);
    assert_eq!(retains_of(&fake, ctx), 1);

    drop(value);
    assert_eq!(releases_of(&fake, ctx), 1);
    assert_eq!(fake.refcount(ctx), original);
}

#[test]
fn test_extra_retain_nets_to_original() {
    let (fake, lib, device) = setup();
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let original = fake.refcount(ctx);

    let value = lib.wrap::<Context>(ctx).unwrap();
    let context = guard::check::<Context>(&value).unwrap();
    context.wrapped().retain().unwrap();
    assert_eq!(fake.refcount(ctx), original + 2);

    context.wrapped().release().unwrap();
    context.wrapped().release().unwrap();
    assert_eq!(fake.refcount(ctx), original);

    // nothing left to give back on reclamation
    drop(context);
    drop(value);
    assert_eq!(fake.refcount(ctx), original);
    assert_eq!(releases_of(&fake, ctx), 2);
}

#[test]
fn test_platform_wrapper_never_touches_refcounts() {
    let (fake, lib, _) = setup();
    let platform = fake.platforms()[0];
    let value = lib.wrap::<Platform>(platform).unwrap();
    let wrapper = guard::check::<Platform>(&value).unwrap();
    wrapper.wrapped().release().unwrap();
    drop(wrapper);
    drop(value);
    assert_eq!(retains_of(&fake, platform), 0);
    assert_eq!(releases_of(&fake, platform), 0);
}

#[test]
fn test_device_refcount_follows_build() {
    let (fake, lib, device) = setup();
    let value = lib.wrap_category(Category::Device, device).unwrap();
    drop(value);
    let expected = usize::from(cfg!(feature = "cl-1-2"));
    assert_eq!(retains_of(&fake, device), expected);
    assert_eq!(releases_of(&fake, device), expected);
}

#[test]
fn test_created_objects_are_owned_not_retained() {
    let (fake, lib, device) = setup();
    let device_value = lib.wrap_category(Category::Device, device).unwrap();
    let ctx = lib.context(&[NativeValue::Array(vec![device_value])]).unwrap();
    let handle = guard::check::<Context>(&ctx).unwrap().wrapped().raw();
    assert_eq!(fake.refcount(handle), 1);
    assert_eq!(retains_of(&fake, handle), 0);

    drop(ctx);
    assert!(!fake.is_alive(handle));
}

#[test]
fn test_children_keep_parents_alive() {
    let (fake, lib, device) = setup();
    let device_value = lib.wrap_category(Category::Device, device).unwrap();
    let ctx = lib.context(&[NativeValue::Array(vec![device_value.clone()])]).unwrap();
    let ctx_handle = guard::check::<Context>(&ctx).unwrap().wrapped().raw();
    let queue = ctx
        .as_userdata()
        .unwrap()
        .call("queue", &[device_value], CallStyle::Method)
        .unwrap();
    let queue_handle = guard::check::<Queue>(&queue).unwrap().wrapped().raw();

    drop(ctx);
    assert!(fake.is_alive(ctx_handle));
    drop(queue);
    assert!(!fake.is_alive(queue_handle));
    assert!(!fake.is_alive(ctx_handle));
}

#[test]
fn test_close_then_reclaim_releases_once() {
    let (fake, lib, device) = setup();
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let program = fake.create_program_with_source(ctx, "kernel void k(void) {}").unwrap();
    let value = lib.wrap::<Program>(program).unwrap();

    let cell = value.as_userdata().unwrap();
    cell.call("close", &[], CallStyle::Method).unwrap();
    cell.call("close", &[], CallStyle::Method).unwrap();
    assert_eq!(releases_of(&fake, program), 1);

    drop(value);
    assert_eq!(releases_of(&fake, program), 1);
    assert_eq!(fake.refcount(program), 1);
}

#[test]
fn test_failed_retain_leaves_nothing_to_release() {
    let (fake, lib, _) = setup();
    let bogus = RawHandle(0xdead0);
    assert!(lib.wrap::<Context>(bogus).is_err());
    assert_eq!(retains_of(&fake, bogus), 1);
    assert_eq!(releases_of(&fake, bogus), 0);
}

#[test]
fn test_query_rewraps_handles_with_a_reference() {
    let (fake, lib, device) = setup();
    let ctx = fake.create_context(&[], &[device]).unwrap();
    let queue = fake.create_queue(ctx, device, 0).unwrap();
    let value = lib.wrap::<Queue>(queue).unwrap();
    let before = fake.refcount(ctx);

    let info = value
        .as_userdata()
        .unwrap()
        .call("info", &[], CallStyle::Method)
        .unwrap();
    assert_eq!(fake.refcount(ctx), before + 1);
    drop(info);
    assert_eq!(fake.refcount(ctx), before);
    assert!(Queue::CATEGORY.refcounted());
}

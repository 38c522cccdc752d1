//! Type guard for host values handed back to the binding
//!
//! Native calls trust handles blindly, so every handle-typed argument goes
//! through here before it reaches the driver.

use std::rc::Rc;

use raya_sdk::NativeValue;

use crate::error::{ClError, ClResult};
use crate::object::{Category, ClObject, Wrapped, MARKER};

/// Check that `value` is a wrapper of `expected` made by this binding and
/// return its handle.
pub fn check_object(value: &NativeValue, expected: Category) -> ClResult<&Wrapped> {
    let found = match value {
        NativeValue::Userdata(cell) if cell.metatable().marker() == Some(MARKER) => {
            let class = cell.object().class_name();
            if class == expected.name() {
                if let Some(wrapped) = wrapped_of(value, expected) {
                    return Ok(wrapped);
                }
            }
            format!("{} object", class)
        }
        NativeValue::Userdata(_) => "unknown userdata".to_string(),
        other => other.type_name().to_string(),
    };
    Err(ClError::TypeMismatch {
        expected: expected.name(),
        found,
    })
}

/// [`check_object`] on a positional argument; an absent argument reads as nil
pub fn check_arg(args: &[NativeValue], index: usize, expected: Category) -> ClResult<&Wrapped> {
    match args.get(index) {
        Some(value) => check_object(value, expected),
        None => Err(ClError::TypeMismatch {
            expected: expected.name(),
            found: "nil".to_string(),
        }),
    }
}

/// Typed variant of [`check_object`]
pub fn check<T: ClObject>(value: &NativeValue) -> ClResult<Rc<T>> {
    check_object(value, T::CATEGORY)?;
    value
        .as_userdata()
        .and_then(|cell| cell.downcast::<T>())
        .ok_or_else(|| ClError::TypeMismatch {
            expected: T::CATEGORY.name(),
            found: "unknown userdata".to_string(),
        })
}

fn wrapped_of(value: &NativeValue, category: Category) -> Option<&Wrapped> {
    use crate::classes::*;

    let any = value.as_userdata()?.object().as_any();
    match category {
        Category::Platform => any.downcast_ref::<Platform>().map(ClObject::wrapped),
        Category::Device => any.downcast_ref::<Device>().map(ClObject::wrapped),
        Category::Context => any.downcast_ref::<Context>().map(ClObject::wrapped),
        Category::Queue => any.downcast_ref::<Queue>().map(ClObject::wrapped),
        Category::Mem => any.downcast_ref::<Mem>().map(ClObject::wrapped),
        Category::Image => any.downcast_ref::<Image>().map(ClObject::wrapped),
        Category::Sampler => any.downcast_ref::<Sampler>().map(ClObject::wrapped),
        Category::Program => any.downcast_ref::<Program>().map(ClObject::wrapped),
        Category::Kernel => any.downcast_ref::<Kernel>().map(ClObject::wrapped),
        Category::Event => any.downcast_ref::<Event>().map(ClObject::wrapped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    use raya_sdk::{ForeignObject, Metatable, Userdata};

    struct Stranger;

    impl ForeignObject for Stranger {
        fn class_name(&self) -> &'static str {
            "context"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
            self
        }
    }

    #[test]
    fn test_host_scalar_is_rejected() {
        let err = check_object(&NativeValue::int(3), Category::Context).unwrap_err();
        assert_eq!(err.to_string(), "expected OpenCL context object, found number");
    }

    #[test]
    fn test_unmarked_userdata_is_rejected() {
        let cell = Userdata::new(Rc::new(Stranger), Metatable::new());
        let err = check_object(&NativeValue::Userdata(cell), Category::Context).unwrap_err();
        assert_eq!(err.to_string(), "expected OpenCL context object, found unknown userdata");
    }

    #[test]
    fn test_forged_marker_without_wrapper_is_rejected() {
        let cell = Userdata::new(Rc::new(Stranger), Metatable::with_marker(MARKER));
        let err = check_object(&NativeValue::Userdata(cell), Category::Context).unwrap_err();
        assert!(matches!(err, ClError::TypeMismatch { expected: "context", .. }));
    }
}

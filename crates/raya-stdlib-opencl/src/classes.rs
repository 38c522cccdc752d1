//! Host-visible wrapper classes, one per category
//!
//! Every class gets `info`, `__tostring`, `close` and `__gc`; the lists
//! below add the category-specific methods.

use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;

use raya_sdk::{ForeignObject, NativeValue};

use crate::args;
use crate::catalog::{encode_bitfield, encode_enum, EnumType};
use crate::driver::{ImageFormat, InfoKey, Status};
use crate::error::{ClError, ClResult};
use crate::guard;
use crate::library::OpenCl;
use crate::object::{self, Category, ClObject, Method, Wrapped};
use crate::schema::{InfoTable, Schema};

macro_rules! class {
    ($(#[$doc:meta])* $name:ident => $category:ident [ $( $method:literal => $func:path ),* $(,)? ]) => {
        $(#[$doc])*
        pub struct $name {
            wrapped: Wrapped,
        }

        impl ForeignObject for $name {
            fn class_name(&self) -> &'static str {
                Category::$category.name()
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
                self
            }
        }

        impl ClObject for $name {
            const CATEGORY: Category = Category::$category;
            const METHODS: &'static [(&'static str, Method<Self>)] = &[ $( ($method, $func) ),* ];

            fn from_wrapped(wrapped: Wrapped) -> Self {
                $name { wrapped }
            }

            fn wrapped(&self) -> &Wrapped {
                &self.wrapped
            }
        }
    };
}

class!(
    /// `cl_platform_id`
    Platform => Platform ["devices" => Platform::devices]
);
class!(
    /// `cl_device_id`
    Device => Device []
);
class!(
    /// `cl_context`
    Context => Context [
        "queue" => Context::queue,
        "buffer" => Context::buffer,
        "image" => Context::image,
        "sampler" => Context::sampler,
        "program" => Context::program,
    ]
);
class!(
    /// `cl_command_queue`
    Queue => Queue [
        "marker" => Queue::marker,
        "flush" => Queue::flush,
        "finish" => Queue::finish,
    ]
);
class!(
    /// Buffer `cl_mem`
    Mem => Mem []
);
class!(
    /// Image `cl_mem`; `info` merges the mem and image tables
    Image => Image []
);
class!(
    /// `cl_sampler`
    Sampler => Sampler []
);
class!(
    /// `cl_program`; `info(device)` returns build info
    Program => Program [
        "build" => Program::build,
        "build_info" => Program::build_info,
        "kernel" => Program::kernel,
    ]
);
class!(
    /// `cl_kernel`; `info(device)` returns work-group info
    Kernel => Kernel [
        "arg_info" => Kernel::arg_info,
        "workgroup_info" => Kernel::workgroup_info,
    ]
);
class!(
    /// `cl_event`
    Event => Event [
        "profiling" => Event::profiling,
        "wait" => Event::wait,
    ]
);

/// Sorted method names of a category, for completion
pub fn method_names(category: Category) -> Vec<&'static str> {
    match category {
        Category::Platform => object::method_names::<Platform>(),
        Category::Device => object::method_names::<Device>(),
        Category::Context => object::method_names::<Context>(),
        Category::Queue => object::method_names::<Queue>(),
        Category::Mem => object::method_names::<Mem>(),
        Category::Image => object::method_names::<Image>(),
        Category::Sampler => object::method_names::<Sampler>(),
        Category::Program => object::method_names::<Program>(),
        Category::Kernel => object::method_names::<Kernel>(),
        Category::Event => object::method_names::<Event>(),
    }
}

fn done(result: Result<(), Status>) -> ClResult<NativeValue> {
    result.map_err(ClError::native)?;
    Ok(NativeValue::null())
}

impl Platform {
    /// `devices([type])`, type names joined by `,` or `|`, default `all`
    fn devices(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let device_type = args::opt_string(args, 0, "all")?;
        lib.devices(self.wrapped.handle()?, device_type)
    }
}

impl Context {
    /// `queue(device[, properties])`
    fn queue(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let device = guard::check_arg(args, 0, Category::Device)?;
        let properties = encode_bitfield(
            args::opt_string(args, 1, "")?,
            EnumType::CommandQueueProperties,
        )?;
        let handle = lib
            .driver()
            .create_queue(self.wrapped.handle()?, device.handle()?, properties)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Queue>(handle))
    }

    /// `buffer(flags, size)`
    fn buffer(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let flags = encode_bitfield(args::string(args, 0)?, EnumType::MemFlags)?;
        let size = args::size(args, 1)?;
        let handle = lib
            .driver()
            .create_buffer(self.wrapped.handle()?, flags, size)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Mem>(handle))
    }

    /// `image(flags, { order = ..., data_type = ... }, width, height)`
    fn image(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let flags = encode_bitfield(args::string(args, 0)?, EnumType::MemFlags)?;
        let format = args::table(args, 1)?;
        let field = |name: &str| {
            format.get(name).and_then(NativeValue::as_str).ok_or_else(|| {
                ClError::Argument(format!("image format needs a string '{}' field", name))
            })
        };
        let format = ImageFormat {
            order: encode_enum(field("order")?, EnumType::ChannelOrder)? as u32,
            data_type: encode_enum(field("data_type")?, EnumType::ChannelType)? as u32,
        };
        let width = args::size(args, 2)?;
        let height = args::size(args, 3)?;
        let handle = lib
            .driver()
            .create_image_2d(self.wrapped.handle()?, flags, format, width, height)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Image>(handle))
    }

    /// `sampler(normalized, addressing, filter)`
    fn sampler(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let normalized = args::boolean(args, 0)?;
        let addressing = encode_enum(args::string(args, 1)?, EnumType::AddressingMode)? as u32;
        let filter = encode_enum(args::string(args, 2)?, EnumType::FilterMode)? as u32;
        let handle = lib
            .driver()
            .create_sampler(self.wrapped.handle()?, normalized, addressing, filter)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Sampler>(handle))
    }

    /// `program(source)`
    fn program(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let source = args::string(args, 0)?;
        let handle = lib
            .driver()
            .create_program_with_source(self.wrapped.handle()?, source)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Program>(handle))
    }
}

impl Queue {
    /// `marker()`: event completing after every command enqueued so far
    fn marker(&self, lib: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
        let handle = lib
            .driver()
            .enqueue_marker(self.wrapped.handle()?)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Event>(handle))
    }

    fn flush(&self, lib: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
        done(lib.driver().flush(self.wrapped.handle()?))
    }

    fn finish(&self, lib: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
        done(lib.driver().finish(self.wrapped.handle()?))
    }
}

impl Program {
    /// `build([options[, devices]])`; a failed build reports its status,
    /// the log is in `build_info(device)`
    fn build(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let options = args::opt_string(args, 0, "")?;
        let devices = args::opt_array(args, 1)?
            .iter()
            .map(|d| guard::check_object(d, Category::Device)?.handle())
            .collect::<ClResult<Vec<_>>>()?;
        done(lib.driver().build_program(self.wrapped.handle()?, &devices, options))
    }

    /// `build_info(device)`
    fn build_info(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let device = guard::check_arg(args, 0, Category::Device)?;
        lib.query(&self.wrapped, &[InfoTable::ProgramBuild], InfoKey::Device(device.handle()?))
    }

    /// `kernel(name)`
    fn kernel(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let name = args::string(args, 0)?;
        let handle = lib
            .driver()
            .create_kernel(self.wrapped.handle()?, name)
            .map_err(ClError::native)?;
        Ok(lib.adopt::<Kernel>(handle))
    }
}

impl Kernel {
    /// `arg_info(index)`, 0-based
    fn arg_info(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        if Schema::get().entries(InfoTable::KernelArg).is_empty() {
            return Err(ClError::Unsupported("kernel argument info"));
        }
        let index = u32::try_from(args::integer(args, 0)?)
            .map_err(|_| ClError::Argument("argument index must be a non-negative 32-bit integer".to_string()))?;
        lib.query(&self.wrapped, &[InfoTable::KernelArg], InfoKey::ArgIndex(index))
    }

    /// `workgroup_info(device)`
    fn workgroup_info(&self, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
        let device = guard::check_arg(args, 0, Category::Device)?;
        lib.query(&self.wrapped, &[InfoTable::Workgroup], InfoKey::Device(device.handle()?))
    }
}

impl Event {
    /// `profiling()`: queued/submit/start/end timestamps in nanoseconds
    fn profiling(&self, lib: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
        lib.query(&self.wrapped, &[InfoTable::Profiling], InfoKey::None)
    }

    fn wait(&self, lib: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
        done(lib.driver().wait_for_events(&[self.wrapped.handle()?]))
    }
}

/// Method names of every category keyed by category name
pub fn all_method_names() -> BTreeMap<&'static str, Vec<&'static str>> {
    Category::ALL
        .into_iter()
        .map(|c| (c.name(), method_names(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_methods_everywhere() {
        for (class, names) in all_method_names() {
            for common in object::COMMON_METHODS {
                assert!(names.contains(&common), "{} lacks {}", class, common);
            }
        }
    }

    #[test]
    fn test_category_methods() {
        assert!(method_names(Category::Platform).contains(&"devices"));
        assert!(method_names(Category::Program).contains(&"kernel"));
        assert!(method_names(Category::Kernel).contains(&"arg_info"));
        assert_eq!(method_names(Category::Device).len(), object::COMMON_METHODS.len());
    }
}

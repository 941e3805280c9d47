use crate::filters::{CompatTable, Decision, FilterModule};
use crate::models::names::{CLANG, CLANG_CUDA, GCC, HIPCC, ICPX, NVCC};
use crate::models::{Backend, Parameter, Row, Version};

/// clang release → newest CUDA SDK it can compile for.
pub const CLANG_CUDA_SDK: CompatTable = CompatTable::inclusive(&[
    (Version::major(7), Version::major_minor(9, 2)),
    (Version::major(8), Version::major_minor(10, 0)),
    (Version::major(10), Version::major_minor(10, 1)),
    (Version::major(12), Version::major_minor(11, 0)),
    (Version::major(13), Version::major_minor(11, 2)),
    (Version::major(16), Version::major_minor(11, 5)),
]);

/// Mutually exclusive GPU backends.
///
/// CUDA cannot be enabled together with HIP or SYCL, whatever the compiler.
#[derive(Debug, Clone, Copy)]
pub struct BackendConflictFilter;

impl FilterModule for BackendConflictFilter {
    fn name(&self) -> &str {
        "backend-conflict"
    }

    fn required_parameters(&self) -> Vec<Parameter> {
        vec![Parameter::Backends]
    }

    fn evaluate(&self, row: &Row) -> Decision {
        if !row.backend_enabled(Backend::Cuda) {
            return Decision::Admit;
        }
        if row.backend_enabled(Backend::Hip) {
            return Decision::reject("the CUDA and HIP backends cannot be enabled together");
        }
        Decision::reject_if(
            row.backend_enabled(Backend::Sycl),
            "the CUDA and SYCL backends cannot be enabled together",
        )
    }

    fn description(&self) -> &str {
        "Mutually exclusive GPU backends"
    }
}

/// Which backends a device compiler can build.
///
/// - gcc, clang and icpx build neither CUDA nor HIP.
/// - nvcc needs the CUDA backend at its own version, without HIP.
/// - clang-cuda needs an enabled CUDA backend within [`CLANG_CUDA_SDK`],
///   without HIP.
/// - hipcc needs the HIP backend at its own version, without CUDA.
#[derive(Debug, Clone, Copy)]
pub struct BackendCompatibilityFilter;

impl BackendCompatibilityFilter {
    fn without_gpu(row: &Row, compiler: &str) -> Decision {
        if row.backend_enabled(Backend::Cuda) {
            return Decision::reject(format!("{compiler} cannot build the CUDA backend"));
        }
        Decision::reject_if(
            row.backend_enabled(Backend::Hip),
            format!("{compiler} cannot build the HIP backend"),
        )
    }

    /// The backend must be defined with exactly the compiler version.
    fn matching_toolkit(row: &Row, backend: Backend, compiler: &str, version: Version) -> Decision {
        match row.backend_version(backend) {
            None => Decision::reject(format!("{compiler} requires the {backend} backend")),
            Some(toolkit) if toolkit != version => Decision::reject(format!(
                "{compiler} {version} requires {backend} {version}, found {toolkit}"
            )),
            Some(_) => Decision::Admit,
        }
    }

    fn clang_cuda(row: &Row, clang: Version) -> Decision {
        let Some(sdk) = row.backend_version(Backend::Cuda) else {
            return Decision::reject("clang-cuda requires the CUDA backend");
        };
        if sdk.is_off() {
            return Decision::reject("clang-cuda requires an enabled CUDA backend");
        }
        if row.backend_enabled(Backend::Hip) {
            return Decision::reject("clang-cuda cannot build the HIP backend");
        }
        Decision::reject_if(
            !CLANG_CUDA_SDK.permits(clang, sdk),
            format!("clang {clang} does not support CUDA {sdk}"),
        )
    }
}

impl FilterModule for BackendCompatibilityFilter {
    fn name(&self) -> &str {
        "backend-compatibility"
    }

    fn required_parameters(&self) -> Vec<Parameter> {
        vec![Parameter::DeviceCompiler, Parameter::Backends]
    }

    fn evaluate(&self, row: &Row) -> Decision {
        let Some(device) = row.variant(&Parameter::DeviceCompiler) else {
            return Decision::Admit;
        };

        match device.name.as_str() {
            GCC | CLANG | ICPX => Self::without_gpu(row, &device.name),
            NVCC => Self::matching_toolkit(row, Backend::Cuda, NVCC, device.version).and_then(|| {
                Decision::reject_if(
                    row.backend_enabled(Backend::Hip),
                    "nvcc cannot build the HIP backend",
                )
            }),
            CLANG_CUDA => Self::clang_cuda(row, device.version),
            HIPCC => Self::matching_toolkit(row, Backend::Hip, HIPCC, device.version).and_then(|| {
                Decision::reject_if(
                    row.backend_enabled(Backend::Cuda),
                    "hipcc cannot build the CUDA backend",
                )
            }),
            _ => Decision::Admit,
        }
    }

    fn description(&self) -> &str {
        "Backends buildable by the device compiler"
    }
}

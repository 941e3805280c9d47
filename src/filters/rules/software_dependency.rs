use crate::filters::{CompatTable, Decision, FilterModule};
use crate::models::names::{CLANG, CLANG_CUDA, GCC, HIPCC, NVCC};
use crate::models::{Backend, Comparison, Parameter, Row, Version};

/// nvcc release (exclusive) → newest supported C++ standard.
pub const NVCC_CXX: CompatTable = CompatTable::exclusive(&[
    (Version::major_minor(11, 0), Version::major(14)),
    (Version::major_minor(12, 0), Version::major(17)),
    (Version::major_minor(12, 2), Version::major(20)),
]);

const UBUNTU_18_04: Version = Version::major_minor(18, 4);
const UBUNTU_20_04: Version = Version::major_minor(20, 4);
const CXX_20: Version = Version::major(20);

/// Operating system images, CMake and C++ standard support.
///
/// Every rule only applies when all the parameters it mentions are present,
/// so the module has no required parameters.
#[derive(Debug, Clone, Copy)]
pub struct SoftwareDependencyFilter;

impl SoftwareDependencyFilter {
    fn host_is(row: &Row, names: &[&str]) -> bool {
        row.name_of(&Parameter::HostCompiler)
            .is_some_and(|name| names.contains(&name))
    }

    fn device_is(row: &Row, name: &str) -> bool {
        row.check_name(&Parameter::DeviceCompiler, Comparison::Eq, name)
    }

    fn host_version(row: &Row, op: Comparison, version: Version) -> bool {
        row.check_version(&Parameter::HostCompiler, op, version)
    }

    fn ubuntu(row: &Row, op: Comparison, version: Version) -> bool {
        row.check_version(&Parameter::Ubuntu, op, version)
    }

    fn cuda_enabled(row: &Row, op: Comparison, version: Version) -> bool {
        row.backend_enabled(Backend::Cuda) && row.check_backend_version(Backend::Cuda, op, version)
    }

    fn host_compiler_images(row: &Row) -> Decision {
        if Self::ubuntu(row, Comparison::Eq, UBUNTU_20_04)
            && Self::host_is(row, &[GCC])
            && Self::host_version(row, Comparison::Le, Version::major(6))
        {
            return Decision::reject("gcc 6 and older is not available on Ubuntu 20.04");
        }
        Decision::reject_if(
            Self::ubuntu(row, Comparison::Eq, UBUNTU_18_04)
                && Self::host_is(row, &[CLANG, CLANG_CUDA])
                && (Self::host_version(row, Comparison::Eq, Version::major(11))
                    || Self::host_version(row, Comparison::Eq, Version::major(12))),
            "clang 11 and 12 are not available on Ubuntu 18.04",
        )
    }

    fn cxx_standard(row: &Row) -> Decision {
        let Some(cxx) = row.version_of(&Parameter::CxxStandard) else {
            return Decision::Admit;
        };

        if cxx >= CXX_20 && Self::host_version(row, Comparison::Le, Version::major(9)) {
            if Self::host_is(row, &[GCC]) {
                return Decision::reject("gcc 9 and older does not support C++20");
            }
            if Self::host_is(row, &[CLANG, CLANG_CUDA]) {
                return Decision::reject("clang 9 and older does not support C++20");
            }
        }

        match row.version_of(&Parameter::DeviceCompiler) {
            Some(nvcc) if Self::device_is(row, NVCC) => Decision::reject_if(
                !NVCC_CXX.permits(nvcc, cxx),
                format!("nvcc {nvcc} does not support C++{cxx}"),
            ),
            _ => Decision::Admit,
        }
    }

    fn cuda_images(row: &Row) -> Decision {
        if Self::ubuntu(row, Comparison::Eq, UBUNTU_18_04)
            && Self::cuda_enabled(row, Comparison::Ge, Version::major_minor(11, 0))
        {
            return Decision::reject("CUDA 11.0 and newer is not available on Ubuntu 18.04");
        }
        if Self::ubuntu(row, Comparison::Eq, UBUNTU_20_04)
            && Self::cuda_enabled(row, Comparison::Lt, Version::major_minor(11, 0))
        {
            return Decision::reject("CUDA 10.2 and older is not available on Ubuntu 20.04");
        }
        // gcc 10.3 on Ubuntu 20.04 breaks nvcc 11.0 to 11.3
        Decision::reject_if(
            Self::device_is(row, NVCC)
                && row.is_in_range(
                    &Parameter::DeviceCompiler,
                    NVCC,
                    Version::major_minor(11, 0),
                    Version::major_minor(11, 3),
                )
                && Self::host_is(row, &[GCC])
                && Self::host_version(row, Comparison::Eq, Version::major(10))
                && Self::ubuntu(row, Comparison::Eq, UBUNTU_20_04),
            "nvcc 11.0 to 11.3 does not work with gcc 10 on Ubuntu 20.04",
        )
    }

    fn hip_images(row: &Row) -> Decision {
        Decision::reject_if(
            Self::ubuntu(row, Comparison::Ne, UBUNTU_20_04)
                && Self::device_is(row, HIPCC)
                && row.backend_enabled(Backend::Hip),
            "HIP images are only available for Ubuntu 20.04",
        )
    }

    fn cmake(row: &Row) -> Decision {
        // CMake 3.18 ignores CMAKE_CUDA_ARCHITECTURES for clang as CUDA compiler
        Decision::reject_if(
            Self::device_is(row, CLANG_CUDA)
                && row.check_version(&Parameter::Cmake, Comparison::Lt, Version::major_minor(3, 19)),
            "clang-cuda requires CMake 3.19 or newer",
        )
    }
}

impl FilterModule for SoftwareDependencyFilter {
    fn name(&self) -> &str {
        "software-dependency"
    }

    fn evaluate(&self, row: &Row) -> Decision {
        Self::host_compiler_images(row)
            .and_then(|| Self::cxx_standard(row))
            .and_then(|| Self::cuda_images(row))
            .and_then(|| Self::hip_images(row))
            .and_then(|| Self::cmake(row))
    }

    fn description(&self) -> &str {
        "Operating system, CMake and C++ standard support"
    }
}

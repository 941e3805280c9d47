use crate::filters::{CompatTable, Decision, FilterModule};
use crate::models::names::{CLANG, CLANG_CUDA, GCC, NVCC};
use crate::models::{Parameter, Row, Version};

/// nvcc release → highest supported gcc host compiler.
pub const NVCC_GCC: CompatTable = CompatTable::inclusive(&[
    (Version::major_minor(10, 0), Version::major(7)),
    (Version::major_minor(10, 2), Version::major(8)),
    (Version::major_minor(11, 0), Version::major(9)),
    (Version::major_minor(11, 3), Version::major(10)),
    (Version::major_minor(11, 8), Version::major(11)),
    (Version::major_minor(12, 1), Version::major(12)),
]);

/// nvcc release → highest supported clang host compiler.
pub const NVCC_CLANG: CompatTable = CompatTable::inclusive(&[
    (Version::major_minor(10, 0), Version::major(6)),
    (Version::major_minor(10, 2), Version::major(8)),
    (Version::major_minor(11, 0), Version::major(9)),
    (Version::major_minor(11, 1), Version::major(10)),
    (Version::major_minor(11, 3), Version::major(11)),
    (Version::major_minor(11, 5), Version::major(12)),
    (Version::major_minor(11, 8), Version::major(13)),
    (Version::major_minor(12, 0), Version::major(14)),
    (Version::major_minor(12, 1), Version::major(15)),
]);

/// Host/device compiler version rules.
///
/// Host and device compiler versions must match unless nvcc compiles the
/// device code. nvcc bounds its host compiler through [`NVCC_GCC`] and
/// [`NVCC_CLANG`]. clang as CUDA compiler is supported from clang 14.
#[derive(Debug, Clone, Copy)]
pub struct CompilerVersionFilter;

impl CompilerVersionFilter {
    fn nvcc_host(host: &str, host_version: Version, nvcc: Version) -> Decision {
        match host {
            GCC => {
                if !NVCC_GCC.permits(nvcc, host_version) {
                    return Decision::reject(format!(
                        "nvcc {nvcc} does not support gcc {host_version}"
                    ));
                }
                // since CUDA 11.4, gcc 6 is the oldest supported host compiler
                let bounded = NVCC_GCC.limit_for(nvcc).is_some();
                Decision::reject_if(
                    bounded && nvcc >= Version::major_minor(11, 4) && host_version < Version::major(6),
                    format!("nvcc {nvcc} requires gcc 6 or newer"),
                )
            }
            CLANG => {
                if nvcc >= Version::major_minor(11, 3) && nvcc <= Version::major_minor(11, 5) {
                    return Decision::reject(format!(
                        "clang is not supported as host compiler of nvcc {nvcc}"
                    ));
                }
                Decision::reject_if(
                    !NVCC_CLANG.permits(nvcc, host_version),
                    format!("nvcc {nvcc} does not support clang {host_version}"),
                )
            }
            _ => Decision::Admit,
        }
    }
}

impl FilterModule for CompilerVersionFilter {
    fn name(&self) -> &str {
        "compiler-version"
    }

    fn required_parameters(&self) -> Vec<Parameter> {
        vec![Parameter::HostCompiler, Parameter::DeviceCompiler]
    }

    fn evaluate(&self, row: &Row) -> Decision {
        let (Some(host), Some(device)) = (
            row.variant(&Parameter::HostCompiler),
            row.variant(&Parameter::DeviceCompiler),
        ) else {
            return Decision::Admit;
        };

        if device.name == NVCC {
            return Self::nvcc_host(&host.name, host.version, device.version);
        }

        if host.version != device.version {
            return Decision::reject(format!(
                "host and device compiler versions differ ({} vs {})",
                host.version, device.version
            ));
        }

        Decision::reject_if(
            device.name == CLANG_CUDA && device.version < Version::major(14),
            "clang older than 14 is not supported as CUDA compiler",
        )
    }

    fn description(&self) -> &str {
        "Host and device compiler version compatibility"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::rules::test_rows::compilers;
    use crate::models::names::{HIPCC, ICPX};

    fn admits(host: (&str, &str), device: (&str, &str)) -> bool {
        CompilerVersionFilter.check(&compilers(host, device), None)
    }

    #[test]
    fn test_same_compiler_same_version() {
        for name in [GCC, CLANG, HIPCC, ICPX] {
            assert!(admits((name, "13"), (name, "13")), "{name}");
            assert!(!admits((name, "12"), (name, "13")), "{name}");
        }
        assert!(admits((ICPX, "2023.1.0"), (ICPX, "2023.1")));
    }

    #[test]
    fn test_nvcc_gcc_table() {
        assert!(!admits((GCC, "13"), (NVCC, "11.2")));
        assert!(admits((GCC, "9"), (NVCC, "11.2")));
        assert!(admits((GCC, "10"), (NVCC, "11.2")));

        let cases = [
            ("10.0", "7"),
            ("10.1", "8"),
            ("10.2", "8"),
            ("11.0", "9"),
            ("11.1", "10"),
            ("11.3", "10"),
            ("11.4", "11"),
            ("11.8", "11"),
            ("12.0", "12"),
            ("12.1", "12"),
        ];
        for (nvcc, max_gcc) in cases {
            let max: u32 = max_gcc.parse().unwrap();
            assert!(admits((GCC, max_gcc), (NVCC, nvcc)), "nvcc {nvcc} gcc {max_gcc}");
            let above = (max + 1).to_string();
            assert!(!admits((GCC, above.as_str()), (NVCC, nvcc)), "nvcc {nvcc} gcc {above}");
        }
    }

    #[test]
    fn test_nvcc_gcc_minimum() {
        assert!(!admits((GCC, "5"), (NVCC, "11.4")));
        assert!(admits((GCC, "6"), (NVCC, "11.4")));
        assert!(admits((GCC, "5"), (NVCC, "11.2")));
    }

    #[test]
    fn test_nvcc_clang_table() {
        let cases = [
            ("10.0", "6"),
            ("10.1", "8"),
            ("11.0", "9"),
            ("11.1", "10"),
            ("11.2", "11"),
            ("11.6", "13"),
            ("11.8", "13"),
            ("12.0", "14"),
            ("12.1", "15"),
        ];
        for (nvcc, max_clang) in cases {
            let max: u32 = max_clang.parse().unwrap();
            assert!(admits((CLANG, max_clang), (NVCC, nvcc)), "nvcc {nvcc} clang {max_clang}");
            let above = (max + 1).to_string();
            assert!(!admits((CLANG, above.as_str()), (NVCC, nvcc)), "nvcc {nvcc} clang {above}");
        }
    }

    #[test]
    fn test_nvcc_clang_gap() {
        for nvcc in ["11.3", "11.4", "11.5"] {
            assert!(!admits((CLANG, "6"), (NVCC, nvcc)), "nvcc {nvcc}");
        }
    }

    #[test]
    fn test_unreleased_nvcc_is_unbounded() {
        assert!(admits((GCC, "45"), (NVCC, "42.0")));
        assert!(admits((CLANG, "45"), (NVCC, "42.0")));
        assert!(admits((GCC, "5"), (NVCC, "42.0")));
    }

    #[test]
    fn test_clang_cuda_minimum() {
        assert!(!admits((CLANG_CUDA, "9"), (CLANG_CUDA, "9")));
        assert!(!admits((CLANG_CUDA, "13"), (CLANG_CUDA, "13")));
        assert!(admits((CLANG_CUDA, "14"), (CLANG_CUDA, "14")));
        assert!(admits((CLANG_CUDA, "99"), (CLANG_CUDA, "99")));
        assert!(!admits((CLANG_CUDA, "16"), (CLANG_CUDA, "17")));
    }
}

use crate::filters::{Decision, FilterModule};
use crate::models::names::{CLANG, GCC, NVCC};
use crate::models::{Parameter, Row};

/// Host/device compiler name rules.
///
/// - nvcc is never a host compiler.
/// - Host and device compiler must be the same, except for nvcc.
/// - nvcc only accepts gcc or clang as host compiler.
#[derive(Debug, Clone, Copy)]
pub struct CompilerNameFilter;

impl FilterModule for CompilerNameFilter {
    fn name(&self) -> &str {
        "compiler-name"
    }

    fn required_parameters(&self) -> Vec<Parameter> {
        vec![Parameter::HostCompiler]
    }

    fn evaluate(&self, row: &Row) -> Decision {
        let host = row.name_of(&Parameter::HostCompiler);
        let device = row.name_of(&Parameter::DeviceCompiler);

        if host == Some(NVCC) {
            return Decision::reject("nvcc is not allowed as host compiler");
        }

        match (host, device) {
            (Some(host), Some(device)) if device != NVCC && host != device => {
                Decision::reject("host and device compiler must be the same (except for nvcc)")
            }
            (Some(host), Some(NVCC)) if host != GCC && host != CLANG => {
                Decision::reject("only clang and gcc are allowed as nvcc host compilers")
            }
            _ => Decision::Admit,
        }
    }

    fn description(&self) -> &str {
        "Valid host and device compiler name pairs"
    }
}

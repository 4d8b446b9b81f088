//! Module exports and host imports for `wasm32` builds.

#![allow(non_snake_case)]

use extism_pdk::host_fn;
use pdk_bindings_core::kernel::{Kernel, UserImports};

use crate::Stubs;
use crate::exports;
use crate::imports::names;

#[host_fn("extism:host/user")]
extern "ExtismHost" {
    fn eatAFruit(input: Vec<u8>) -> Vec<u8>;
    fn kv_read(input: Vec<u8>) -> Vec<u8>;
    fn kv_write(input: Vec<u8>);
}

#[derive(Debug, Clone, Copy)]
struct SchemaImports;

#[allow(unsafe_code)]
impl UserImports for SchemaImports {
    fn call(&self, function: &str, input: Vec<u8>) -> Option<Vec<u8>> {
        // SAFETY: the host functions take and return a single memory block,
        // matching the declarations above.
        let result = match function {
            names::EAT_A_FRUIT => unsafe { eatAFruit(input) },
            names::KV_READ => unsafe { kv_read(input) },
            _ => return None,
        };
        match result {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                extism_pdk::warn!("{function}: {e}");
                None
            }
        }
    }

    fn call_void(&self, function: &str, input: Vec<u8>) {
        if function == names::KV_WRITE {
            // SAFETY: see `call`.
            if let Err(e) = unsafe { kv_write(input) } {
                extism_pdk::warn!("{function}: {e}");
            }
        }
    }
}

static HOST: Kernel<SchemaImports> = Kernel::new(SchemaImports);

#[unsafe(no_mangle)]
pub extern "C" fn referenceTypes() -> i32 {
    exports::reference_types(&HOST, &Stubs)
}

#[unsafe(no_mangle)]
pub extern "C" fn topLevelPrimitives() -> i32 {
    exports::top_level_primitives(&HOST, &Stubs)
}

#[unsafe(no_mangle)]
pub extern "C" fn voidFunc() -> i32 {
    exports::void_func(&HOST, &Stubs)
}

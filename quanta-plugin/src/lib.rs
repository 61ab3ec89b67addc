//! Quanta Plugin System
//!
//! Builtin functions are plugins: pure computations over evaluated
//! argument values, registered once in a [`PluginRegistry`] and looked up
//! by name at evaluation time.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::{PluginRegistry, ConstantDef};
pub use context::EvalContext;
pub use quanta_core::NumericConfig;

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        FunctionPlugin, FunctionMeta, ArgMeta,
        PluginRegistry, ConstantDef, EvalContext,
    };
    pub use quanta_core::prelude::*;
}

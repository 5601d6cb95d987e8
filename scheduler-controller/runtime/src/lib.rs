#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use scheduler_controller_core as core;
pub use scheduler_controller_k8s_api as k8s;
pub use scheduler_controller_k8s_index as index;
pub use scheduler_controller_prow as prow;

mod args;
pub mod dump;
mod generate;

pub use self::{args::Args, generate::Generator};

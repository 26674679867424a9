//! PAL trait definitions and implementations.
//!
//! This module defines the capability traits for process and host state and
//! provides both real (NativePal) and fake (FakePal) implementations.

pub mod dir_ops;
pub mod env_ops;
pub mod fake_pal;
pub mod host_ops;
pub mod native_pal;
pub mod proc_ops;

pub use dir_ops::{DirOps, SpecialDirOption, SpecialFolder};
pub use env_ops::{EnvOps, EnvScope, MAX_SCOPED_NAME_LEN, MAX_VAR_TOTAL_LEN};
pub use fake_pal::{FakePal, Operation};
pub use host_ops::{HostOps, OsInfo};
pub use native_pal::NativePal;
pub use proc_ops::ProcOps;

/// Complete PAL combining all process and host operation traits.
pub trait HostPal: EnvOps + DirOps + HostOps + ProcOps + Send + Sync {}

/// Automatically implement HostPal for any type implementing all required traits.
impl<T> HostPal for T where T: EnvOps + DirOps + HostOps + ProcOps + Send + Sync {}

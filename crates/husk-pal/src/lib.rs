//! 🌾 HUSK platform abstraction layer (PAL).
//!
//! `husk-pal` puts one set of capability traits in front of process and host
//! state: environment variables, directories and well-known folders, host
//! identity and capacity, and process lifecycle. A real adapter
//! ([`NativePal`]) reads and mutates the live platform; a recording fake
//! ([`FakePal`]) simulates a host in memory so code depending on any of this
//! is testable without touching the machine it runs on.
//!
//! ```
//! use husk_pal::{EnvOps, FakePal, NativePal};
//!
//! fn greeting(pal: &impl EnvOps) -> String {
//!     pal.expand("hello $USER")
//! }
//!
//! let fake = FakePal::new();
//! fake.seed_var("USER", "mira", husk_pal::EnvScope::Process);
//! assert_eq!(greeting(&fake), "hello mira");
//! # let _ = NativePal::new();
//! ```

pub mod error;
pub mod os_release;
pub mod pal;
pub mod procfs;
pub mod snapshot;

#[cfg(test)]
pub mod test_env;

pub use error::{PalError, PalResult};
pub use pal::{
    DirOps, EnvOps, EnvScope, FakePal, HostOps, HostPal, NativePal, Operation, OsInfo, ProcOps,
    SpecialDirOption, SpecialFolder, MAX_SCOPED_NAME_LEN, MAX_VAR_TOTAL_LEN,
};
pub use snapshot::{collect, HostSnapshot};

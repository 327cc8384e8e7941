//! Store Module
//!
//! Typed key-value settings over one registry key.
//!
//! ## Responsibilities
//! - Scope every operation to one open/close of the root key
//! - Marshal logical kinds into Fixed32 / Fixed64 / String cells
//! - Reject reads whose stored cell type disagrees with the accessor
//! - Clear all values with an enumerate-then-delete pass
//!
//! ## Operation Shape
//! ```text
//!   put/get/remove/clear
//!          │
//!          ▼
//!   ┌──────────────┐   create_key   ┌──────────────┐
//!   │ with_root_key├───────────────►│   Registry   │
//!   │  (KeyGuard)  │◄───────────────┤   backend    │
//!   └──────┬───────┘   close_key    └──────────────┘
//!          │ native value calls, status checked on the spot
//!          ▼
//!     Result<T, StoreError>
//! ```

mod cell;
mod registry_store;
mod session;

pub use cell::{
    bits_to_bool, bits_to_f32, bits_to_f64, bits_to_i32, bits_to_i64, bool_to_bits, decode_string,
    encode_string, f32_to_bits, f64_to_bits, i32_to_bits, i64_to_bits, ValueKind,
};
pub use registry_store::RegistryStore;
pub use session::{with_root_key, KeyGuard};

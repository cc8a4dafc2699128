//! MPC driver and steering-authority limiter (§4.5, §4.6).

pub mod authority;
pub mod mpc;

pub use authority::{apply_authority_limit, AuthorityInput};
pub use mpc::{MpcDriver, MpcDriverInput, MpcDriverOutput};

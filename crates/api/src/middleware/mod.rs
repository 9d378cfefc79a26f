//! Response-shaping middleware.
//!
//! - [`envelope::wrap_bare_errors`] -- gives bodyless error responses from
//!   the routing and timeout layers the standard error envelope.
//! - [`envelope::panic_response`] -- the 500 envelope returned when a
//!   handler panics.

pub mod envelope;

#![cfg_attr(not(test), no_std)]
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure report-building logic for the tap-stamp attendance reader:
//! UID rendering, URL percent-encoding, send debouncing and HTTP/1.1
//! text plumbing. No hardware types, so everything here runs (and is
//! tested) on the host.

pub mod debounce;
pub mod http;
pub mod reply;
pub mod request;
pub mod uid;
pub mod urlencode;

use snafu::Snafu;

/// Errors from assembling bounded strings out of tag data.
#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[snafu(display("buffer overflow"))]
    Overflow,
    #[snafu(display("bad url"))]
    BadUrl,
}

#![no_std]
#![forbid(unsafe_code)]
// SPDX-License-Identifier: MIT OR Apache-2.0

extern crate alloc;

pub mod buzzer;
pub mod client;
pub mod config;
pub mod display;
pub mod errors;
pub mod espressif;
pub mod reporter;
pub mod settings;

//! Wire types shared between the device console and the device REST backend.

pub mod domain;
pub mod enums;

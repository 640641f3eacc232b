#![cfg_attr(not(test), no_std)]

extern crate alloc;
extern crate heapless;
extern crate libm;
#[macro_use]
extern crate log;
extern crate nalgebra;
#[macro_use]
extern crate serde;

pub mod collection;
pub mod config;
pub mod datastructures;
pub mod fcs;
pub mod hal;
pub mod ins;
pub mod protocol;
pub mod types;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

//! Implementation of the `#[derive(Inspect)]` macro.

mod attrs;
mod derive;

pub use derive::inspect_derive_impl;

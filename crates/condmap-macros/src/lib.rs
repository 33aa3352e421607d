//! Proc macros for condmap.
//!
//! # Available Macros
//!
//! - [`Inspect`] - Generate field access and value conversion for structs, so
//!   they can be the elements of a mapped sequence and the target of field
//!   checks.
//!
//! # Examples
//!
//! For working examples, see `condmap/tests/inspect_derive.rs`.

mod inspect;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Inspect` and `ToValue` for structs with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Hide this field from field checks and from the record |
/// | `rename = "..."` | Use a custom name in field paths |
///
/// Every field that isn't skipped must implement `condmap::ToValue`.
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Task::NAME`, `Task::PRIORITY`)
/// 2. Implementation of `ToValue::to_value()`, producing a `Value::Record`
///    named after the struct
/// 3. Implementation of `Inspect::field()`
///
/// # Example
///
/// ```ignore
/// use condmap::{field_check, gte, ConditionExt};
/// use condmap_macros::Inspect;
///
/// #[derive(Inspect)]
/// struct Task {
///     name: String,
///     priority: u8,
///     #[inspect(rename = "done")]
///     completed: bool,
///     #[inspect(skip)]
///     internal_id: u64,
/// }
///
/// let tasks = vec![
///     Task { name: "Write docs".into(), priority: 3, completed: false, internal_id: 1 },
///     Task { name: "Fix bug".into(), priority: 5, completed: true, internal_id: 2 },
/// ];
///
/// let urgent = field_check(Task::PRIORITY, gte(4u8));
/// assert_eq!(urgent.positions(&tasks), vec![1]);
/// ```
#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn inspect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    inspect::inspect_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

//! Procedural macros for the Relic item-ability framework.
//!
//! This crate provides:
//!
//! - `#[derive(Properties)]` - Generates the declared property table of a
//!   power or condition type
//!
//! # Properties Derive Macro
//!
//! ```rust,ignore
//! use relic_core::Properties;
//!
//! #[derive(Default, Properties)]
//! pub struct PotionTick {
//!     #[property(parent)]
//!     pub base: BasePower,
//!     #[property(order = 0)]
//!     pub amplifier: u32,
//!     #[property(order = 1, required, accepted(preset = PotionEffectType))]
//!     pub effect: String,
//!     pub cost: u32,
//! }
//! ```

mod properties;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `relic_core::DeclareProperties`.
///
/// Generates:
/// - `declared_properties()` - one `PropertyDecl` per `#[property]` field,
///   each with an accessor bound to that field
/// - `project_parent()` - when a field is marked `#[property(parent)]`,
///   projects an instance onto that field
///
/// See the module documentation of `properties` for every attribute key.
#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match properties::derive_properties(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

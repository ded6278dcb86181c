//! Discriminator rules that narrow a declared type to a subtype.
//!
//! A type carries `@subtype FIELD VALUE TYPE` lines. When data is decoded
//! into a field declared with that type, the rules are tried in order; the
//! first whose `FIELD` in the data equals `VALUE` replaces the type with
//! `TYPE`, and resolution continues from there.

// -----------------------------------------------------------------------------
// Modules

mod resolver;
mod rule;

// -----------------------------------------------------------------------------
// Exports

pub use resolver::SubtypeResolver;
pub use rule::SubtypeRule;

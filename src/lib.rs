//! Folio library exports for testing

pub mod core;
pub mod runtime;
pub mod site;
pub mod tui;

#[cfg(test)]
pub mod test_support;

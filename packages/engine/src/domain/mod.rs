//! Domain types: run parameters, needles, errors

pub mod error;
pub mod needle;
pub mod params;

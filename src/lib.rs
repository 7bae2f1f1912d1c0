#![allow(non_camel_case_types)]
pub mod interpolation;
pub mod solvers;
pub mod symbolic;
pub mod utils;

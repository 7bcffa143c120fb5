//! Progress reporting while roles wait on the generation backend

pub mod reporter;

//! basic-form: a simple person form
//!
//! Declares the form's fields, checks that the stated age matches the
//! birthdate and echoes accepted values through a message sink.

pub mod cli;
pub mod core;
pub mod form;
pub mod yaml;

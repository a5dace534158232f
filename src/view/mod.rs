//! # Form View
//!
//! Client side of the conversion: the form's state machine, how it reaches the
//! conversion endpoint, and the HTML it renders to.

mod endpoint;
mod form;
mod render;

pub use endpoint::*;
pub use form::*;
pub use render::*;

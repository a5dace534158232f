mod convert_message;

pub use convert_message::*;

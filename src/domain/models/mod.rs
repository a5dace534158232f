mod api_key;
mod conversion;
mod mbti_type;

pub use api_key::*;
pub use conversion::*;
pub use mbti_type::*;

pub mod convert_controller;
pub mod page_controller;

pub use convert_controller::ConvertController;
pub use page_controller::PageController;

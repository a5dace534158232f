pub mod container;
pub mod controller;
pub mod router;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use controller::{ConvertController, PageController};
pub use router::build_router;
pub use server::serve;

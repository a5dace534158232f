pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;
pub mod view;

pub use cli::Commands;

pub use application::{CompletionService, ConvertMessageUseCase};

pub use connector::{
    build_router, serve, Container, ContainerConfig, MockCompletion, OpenAiClient,
};

pub use domain::{
    conversion_prompt, ApiKey, ConversionRequest, ConversionResult, DomainError, MbtiType,
};

pub use view::{
    render_page, ConvertEndpoint, DisplayState, EndpointError, EndpointReply, FormView,
    HttpEndpoint, LocalEndpoint, ViewError,
};

use std::sync::Arc;

use tracing::debug;

use crate::domain::DomainError;
use crate::view::{render_page, FormView, LocalEndpoint};

use super::super::Container;

/// Serves the form page and drives the [`FormView`] for plain form posts.
pub struct PageController {
    container: Arc<Container>,
}

impl PageController {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    /// The untouched form: Idle, empty message, default category.
    pub fn index(&self) -> Result<String, DomainError> {
        render_page(&FormView::new())
    }

    /// Run one submit cycle and render the state it ends in.
    ///
    /// An empty message is rejected by the view and no request is issued;
    /// the page is re-rendered as it was.
    pub async fn submit(&self, message: String, mbti_type: String) -> Result<String, DomainError> {
        let mut view = FormView::new();
        view.set_message(message)?;
        view.select_category(mbti_type)?;

        let endpoint = LocalEndpoint::new(self.container.clone());
        if let Err(e) = view.run(&endpoint).await {
            debug!("Form submit rejected: {e}");
        }

        render_page(&view)
    }
}

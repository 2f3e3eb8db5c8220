use std::rc::Rc;

use pagesync_common::ViewportDimensions;

use crate::platform::Document;

/// Computes the dimensions reported to the host application.
///
/// The target element's content box wins when the element exists; otherwise
/// the window's inner size is used. Every call queries the document again.
#[derive(Clone)]
pub struct DimensionSource {
    document: Rc<dyn Document>,
    element_id: Rc<str>,
}

impl DimensionSource {
    pub fn new(document: Rc<dyn Document>, element_id: &str) -> Self {
        Self {
            document,
            element_id: Rc::from(element_id),
        }
    }

    pub fn current(&self) -> ViewportDimensions {
        self.document
            .element_size(&self.element_id)
            .unwrap_or_else(|| self.document.window_inner_size())
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }
}

use crate::error::Result;
use crate::models::{ElementId, ImageFile};

/// Port for the document the controller renders into.
///
/// Writers return `CanopyError::ElementMissing` when the element is absent.
pub trait Page {
    fn has_element(&self, id: ElementId) -> bool;

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()>;

    fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()>;

    /// Point an image element at a URL
    fn set_image_source(&mut self, id: ElementId, src: &str) -> Result<()>;

    /// Make a control navigate to a URL when activated
    fn set_link_target(&mut self, id: ElementId, href: &str) -> Result<()>;

    /// Current value of an input element
    fn input_value(&self, id: ElementId) -> Option<String>;

    /// File chosen in the upload input, if any
    fn selected_file(&self) -> Option<ImageFile>;

    /// Blocking user-facing message
    fn alert(&mut self, message: &str);
}

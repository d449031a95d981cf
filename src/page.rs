//! The page-automation capability this crate consumes. A live WebDriver
//! backend implements these traits outside the crate; `snapshot` provides an
//! offline replay implementation for the CLI and the tests.

use crate::error::PageError;

/// One raw element on the page.
pub trait PageElement {
    /// The value of an attribute, `None` if the attribute is absent.
    fn attribute(&self, name: &str) -> Result<Option<String>, PageError>;

    fn text(&self) -> Result<String, PageError>;

    fn click(&self) -> Result<(), PageError>;

    fn send_keys(&self, text: &str) -> Result<(), PageError>;

    /// Convenience accessor for the `class` attribute, which carries the
    /// whole piece grammar on the target page.
    fn class_name(&self) -> Result<Option<String>, PageError> {
        self.attribute("class")
    }
}

/// The browser/page handle. There is exactly one of these per session and
/// exactly one logical writer, so no locking is imposed here.
pub trait PageDriver {
    type Element: PageElement;

    fn goto(&self, url: &str) -> Result<(), PageError>;

    fn current_url(&self) -> Result<String, PageError>;

    /// All elements matching the selector. An empty result is not an error.
    fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>, PageError>;

    /// The first element matching the selector, or `PageError` if none.
    fn find_element(&self, selector: &str) -> Result<Self::Element, PageError>;

    /// Drags one element onto another in a single gesture.
    fn drag_and_drop(&self, source: &Self::Element, target: &Self::Element)
        -> Result<(), PageError>;
}

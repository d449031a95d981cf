//! Offline implementation of the page capability: a recorded list of page
//! elements replayed from a JSON file. Drives the CLI without a browser and
//! doubles as the test harness; performed actions are logged so callers can
//! inspect what a live driver would have done.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::PageError;
use crate::page::{PageDriver, PageElement};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SnapshotElement {
    /// The selector this element was captured under.
    pub selector: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    /// URL the page moves to when this element is clicked, if any.
    #[serde(default)]
    pub navigates_to: Option<String>,
}

impl SnapshotElement {
    pub fn new(selector: &str, class: &str) -> Self {
        Self {
            selector: selector.to_string(),
            class: class.to_string(),
            text: String::new(),
            attrs: HashMap::new(),
            navigates_to: None,
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_navigation(mut self, url: &str) -> Self {
        self.navigates_to = Some(url.to_string());
        self
    }

    /// How the element shows up in the action log.
    fn describe(&self) -> String {
        if self.class.is_empty() {
            self.selector.clone()
        } else {
            self.class.clone()
        }
    }

    fn matches(&self, selector: &str) -> bool {
        if self.selector == selector {
            return true;
        }
        // Live code re-finds pieces and hint squares by an exact-class
        // XPath; honor the same shape here.
        !self.class.is_empty() && selector == format!(r#"//*[@class="{}"]"#, self.class)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub elements: Vec<SnapshotElement>,
}

impl PageSnapshot {
    pub fn with_elements(elements: Vec<SnapshotElement>) -> Self {
        Self {
            url: String::new(),
            elements,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

/// What a live driver would have done to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageAction {
    Visited(String),
    Clicked(String),
    Typed { target: String, text: String },
    Dragged { source: String, target: String },
}

struct Inner {
    snapshot: PageSnapshot,
    current_url: String,
    actions: Vec<PageAction>,
}

/// Replay driver over a [`PageSnapshot`]. Cloning shares the underlying
/// state, so the action log survives across the session and its workers.
#[derive(Clone)]
pub struct SnapshotDriver {
    inner: Arc<Mutex<Inner>>,
}

impl SnapshotDriver {
    pub fn new(snapshot: PageSnapshot) -> Self {
        let current_url = snapshot.url.clone();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                snapshot,
                current_url,
                actions: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything performed against the page so far, oldest first.
    pub fn actions(&self) -> Vec<PageAction> {
        self.lock().actions.clone()
    }

    fn element_at(&self, index: usize) -> SnapshotElement {
        self.lock().snapshot.elements[index].clone()
    }
}

pub struct SnapshotPageElement {
    driver: SnapshotDriver,
    index: usize,
}

impl std::fmt::Debug for SnapshotPageElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotPageElement")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl PageElement for SnapshotPageElement {
    fn attribute(&self, name: &str) -> Result<Option<String>, PageError> {
        let element = self.driver.element_at(self.index);
        if name == "class" {
            return Ok(Some(element.class));
        }
        Ok(element.attrs.get(name).cloned())
    }

    fn text(&self) -> Result<String, PageError> {
        Ok(self.driver.element_at(self.index).text)
    }

    fn click(&self) -> Result<(), PageError> {
        let element = self.driver.element_at(self.index);
        let mut inner = self.driver.lock();
        inner.actions.push(PageAction::Clicked(element.describe()));
        if let Some(url) = element.navigates_to {
            inner.current_url = url;
        }
        Ok(())
    }

    fn send_keys(&self, text: &str) -> Result<(), PageError> {
        let element = self.driver.element_at(self.index);
        self.driver.lock().actions.push(PageAction::Typed {
            target: element.describe(),
            text: text.to_string(),
        });
        Ok(())
    }
}

impl PageDriver for SnapshotDriver {
    type Element = SnapshotPageElement;

    fn goto(&self, url: &str) -> Result<(), PageError> {
        let mut inner = self.lock();
        inner.current_url = url.to_string();
        inner.actions.push(PageAction::Visited(url.to_string()));
        Ok(())
    }

    fn current_url(&self) -> Result<String, PageError> {
        Ok(self.lock().current_url.clone())
    }

    fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>, PageError> {
        let indices: Vec<usize> = {
            let inner = self.lock();
            inner
                .snapshot
                .elements
                .iter()
                .enumerate()
                .filter(|(_, el)| el.matches(selector))
                .map(|(i, _)| i)
                .collect()
        };
        Ok(indices
            .into_iter()
            .map(|index| SnapshotPageElement {
                driver: self.clone(),
                index,
            })
            .collect())
    }

    fn find_element(&self, selector: &str) -> Result<Self::Element, PageError> {
        self.find_elements(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| PageError::ElementNotFound(selector.to_string()))
    }

    fn drag_and_drop(
        &self,
        source: &Self::Element,
        target: &Self::Element,
    ) -> Result<(), PageError> {
        let from = self.element_at(source.index).describe();
        let to = self.element_at(target.index).describe();
        self.lock().actions.push(PageAction::Dragged {
            source: from,
            target: to,
        });
        Ok(())
    }
}

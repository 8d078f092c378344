//! Page behaviors for the results portal, written against a deterministic
//! in-process document host.
//!
//! A [`Page`] owns a parsed DOM, an event listener store, a fake-clock timer
//! queue and mocked host primitives (alert, confirm, print, downloads,
//! scrolling, navigation and form submission). The behaviors in
//! [`behaviors`] bind themselves to a page exactly the way the portal's
//! templates expect and can be driven from tests with user actions and
//! clock advances.
//!
//! ```no_run
//! use page_behaviors::{Page, Result};
//!
//! fn main() -> Result<()> {
//!     let html = r#"
//!         <form id='filters'><input name='search'></form>
//!     "#;
//!     let mut page = Page::open("https://portal.example/results", html)?;
//!     page.type_text("input[name='search']", "amy")?;
//!     page.advance_time(500)?;
//!     assert_eq!(page.take_form_submissions().len(), 1);
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

pub mod behaviors;
mod config;
mod dom;
mod forms;
mod html;
mod page;
mod platform;
mod scheduler;
mod selector;
mod trace;

#[cfg(test)]
mod tests;

pub use config::{BehaviorConfig, CsvEscaping};
pub use page::{EventState, Page};
pub use platform::{
    DownloadArtifact, FormSubmission, LocationNavigation, ScrollBehavior, ScrollRequest,
};
pub use scheduler::PendingTimer;

use forms::is_submit_control;
use html::{ParseOutput, parse_html};
use platform::{BrowserApiState, PlatformMockState};
use scheduler::SchedulerState;
use selector::{SelectorPart, parse_selector_groups};
use trace::TraceState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Handle to a node in a page's DOM arena.
///
/// Handles stay valid for the lifetime of the page; a removed node keeps its
/// handle but is no longer connected to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: HashMap<String, String>,
    value: String,
    required: bool,
    disabled: bool,
}

#[derive(Debug, Clone)]
struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, Vec<NodeId>>,
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}

use super::*;

type Listener = Rc<dyn Fn(&mut Page, &mut EventState) -> Result<()>>;

#[derive(Default)]
struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    fn add(&mut self, node_id: NodeId, event: String, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    fn count(&self, node_id: NodeId, event: &str) -> usize {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }
}

/// The event object handed to listeners while an event travels from its
/// target up to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventState {
    event_type: String,
    target: NodeId,
    current_target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A parsed document together with its listeners, fake clock and mocked
/// host primitives.
pub struct Page {
    pub(crate) dom: Dom,
    listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) browser_apis: BrowserApiState,
    pub(crate) trace_state: TraceState,
    config: Rc<BehaviorConfig>,
    url: String,
    dom_content_loaded: bool,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url)
            .field("now_ms", &self.scheduler.now_ms)
            .field("pending_timers", &self.scheduler.task_queue.len())
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_url("about:blank", html)
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        Self::with_config(url, html, BehaviorConfig::default())
    }

    /// Parses `html` without installing any behavior.
    pub fn with_config(url: &str, html: &str, config: BehaviorConfig) -> Result<Self> {
        config.validate()?;
        let ParseOutput { dom } = parse_html(html)?;
        tracing::debug!(url, nodes = dom.nodes.len(), "parsed page");
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            platform_mocks: PlatformMockState::default(),
            browser_apis: BrowserApiState::default(),
            trace_state: TraceState::default(),
            config: Rc::new(config),
            url: url.to_string(),
            dom_content_loaded: false,
        })
    }

    /// Parses `html`, installs every behavior and fires `DOMContentLoaded`,
    /// which is what a browser does for a freshly navigated portal page.
    pub fn open(url: &str, html: &str) -> Result<Self> {
        Self::open_with_config(url, html, BehaviorConfig::default())
    }

    pub fn open_with_config(url: &str, html: &str, config: BehaviorConfig) -> Result<Self> {
        let mut page = Self::with_config(url, html, config)?;
        behaviors::install_all(&mut page)?;
        page.fire_dom_content_loaded()?;
        Ok(page)
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub(crate) fn shared_config(&self) -> Rc<BehaviorConfig> {
        Rc::clone(&self.config)
    }

    /// Dispatches `DOMContentLoaded` on the document. It fires at most once
    /// per page; later calls return `Ok(false)`.
    pub fn fire_dom_content_loaded(&mut self) -> Result<bool> {
        if self.dom_content_loaded {
            return Ok(false);
        }
        self.dom_content_loaded = true;
        let root = self.dom.root;
        stacker::grow(32 * 1024 * 1024, || {
            self.dispatch_event(root, "DOMContentLoaded")
        })?;
        Ok(true)
    }

    pub fn location_href(&self) -> &str {
        &self.url
    }

    /// Path component of the page URL, without query or fragment.
    pub fn location_pathname(&self) -> String {
        pathname_of(&self.url)
    }

    pub(crate) fn navigate(&mut self, to: String) {
        tracing::debug!(from = %self.url, to = %to, "location navigation");
        let from = std::mem::replace(&mut self.url, to.clone());
        self.platform_mocks
            .location_navigations
            .push(LocationNavigation { from, to });
    }

    // Typed handle access.

    pub fn document(&self) -> NodeId {
        self.dom.root
    }

    pub fn body(&self) -> Option<NodeId> {
        self.dom.body()
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    /// Like [`Page::query_selector`], restricted to descendants of `root`.
    pub fn query_selector_within(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector_from(root, selector)
    }

    pub fn query_selector_all_within(&self, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all_from(root, selector)
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.dom.tag_name(node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        node.0 < self.dom.nodes.len() && self.dom.is_connected(node)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.dom.attr(node, &name.to_ascii_lowercase())
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.dom.set_attr(node, name, value)
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.dom.remove_attr(node, name)
    }

    pub fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.dom.class_contains(node, class_name)
    }

    pub fn add_class(&mut self, node: NodeId, class_name: &str) -> Result<()> {
        self.dom.class_add(node, class_name)
    }

    pub fn remove_class(&mut self, node: NodeId, class_name: &str) -> Result<()> {
        self.dom.class_remove(node, class_name)
    }

    /// Returns whether the class is present after toggling.
    pub fn toggle_class(&mut self, node: NodeId, class_name: &str) -> Result<bool> {
        self.dom.class_toggle(node, class_name)
    }

    /// Inline style declaration by CSS property name; empty when unset.
    pub fn style(&self, node: NodeId, property: &str) -> Result<String> {
        self.dom.style_get(node, property)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> Result<()> {
        self.dom.style_set(node, property, value)
    }

    pub fn value(&self, node: NodeId) -> Result<String> {
        self.dom.value(node)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        self.dom.set_value(node, value)
    }

    pub fn is_required(&self, node: NodeId) -> bool {
        self.dom.required(node)
    }

    pub fn text_content(&self, node: NodeId) -> String {
        self.dom.text_content(node)
    }

    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.dom.set_text_content(node, text)
    }

    pub fn inner_text(&self, node: NodeId) -> String {
        self.dom.inner_text(node)
    }

    pub fn inner_html(&self, node: NodeId) -> Result<String> {
        self.dom.inner_html(node)
    }

    pub fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<()> {
        self.dom.set_inner_html(node, html)
    }

    /// Creates a detached element; attach it with [`Page::append_child`].
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.dom.create_detached_element(tag_name)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.dom.append_child(parent, child)
    }

    /// Detaches `node`. Removing an already detached node is a no-op that
    /// returns `false`.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.dom.remove_node(node)
    }

    // Events.

    pub fn add_event_listener<F>(&mut self, node: NodeId, event_type: &str, handler: F)
    where
        F: Fn(&mut Page, &mut EventState) -> Result<()> + 'static,
    {
        self.listeners
            .add(node, event_type.to_string(), Rc::new(handler));
    }

    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Runs listeners on `target` and then on each ancestor up to the
    /// document, stopping early when a listener stops propagation. A failing
    /// listener does not keep the others from running; the first error is
    /// returned once dispatch is done.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        let mut first_error = None;
        for node in path {
            event.current_target = node;
            if let Err(err) = self.invoke_listeners(node, &mut event) {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
            if event.propagation_stopped {
                break;
            }
        }

        let outcome = if event.propagation_stopped {
            "propagation_stopped"
        } else {
            "completed"
        };
        self.trace_event_done(&event, outcome);
        first_error.map_or(Ok(event), Err)
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState) -> Result<()> {
        let listeners = self.listeners.get(node_id, &event.event_type);
        let mut first_error = None;
        for listener in listeners {
            if self.trace_state.enabled {
                let target_label = self.trace_node_label(event.target);
                let current_label = self.trace_node_label(event.current_target);
                self.trace_event_line(format!(
                    "[event] {} target={} current={} default_prevented={}",
                    event.event_type, target_label, current_label, event.default_prevented
                ));
            }
            if let Err(err) = listener(self, event) {
                tracing::warn!(event_type = %event.event_type, error = %err, "listener failed");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !self.trace_state.enabled {
            return;
        }
        let target_label = self.trace_node_label(event.target);
        self.trace_event_line(format!(
            "[event] done {} target={} outcome={} default_prevented={}",
            event.event_type, target_label, outcome, event.default_prevented
        ));
    }

    // User actions.

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || self.click_node(target))
    }

    /// Clicks `target` the way a user would: the `click` event bubbles and,
    /// unless cancelled, the nearest submit control submits its form and the
    /// nearest link downloads or navigates.
    pub fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.disabled(target) {
            return Ok(());
        }

        let click_outcome = self.dispatch_event(target, "click")?;
        if click_outcome.default_prevented {
            return Ok(());
        }

        if let Some(control) = self.closest(target, |dom, node| is_submit_control(dom, node)) {
            if self.dom.disabled(control) {
                return Ok(());
            }
            if let Some(form) = self.form_owner(control) {
                self.request_form_submit(form)?;
            }
            return Ok(());
        }

        if let Some(anchor) = self.closest(target, |dom, node| {
            dom.is_tag(node, "a") && dom.has_attr(node, "href")
        }) {
            if !self.maybe_capture_anchor_download(anchor)? {
                self.follow_anchor_hyperlink(anchor);
            }
        }
        Ok(())
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        stacker::grow(32 * 1024 * 1024, || {
            self.dom.set_value(target, text)?;
            self.dispatch_event(target, "input")?;
            Ok(())
        })
    }

    /// Submits the selected form, or the form owning the selected control,
    /// through the `submit` event.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = self.form_owner(target) else {
            return Ok(());
        };
        stacker::grow(32 * 1024 * 1024, || self.request_form_submit(form))?;
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || self.dispatch_event(target, event))?;
        Ok(())
    }

    fn closest(&self, start: NodeId, predicate: impl Fn(&Dom, NodeId) -> bool) -> Option<NodeId> {
        let mut cursor = Some(start);
        while let Some(node) = cursor {
            if predicate(&self.dom, node) {
                return Some(node);
            }
            cursor = self.dom.parent(node);
        }
        None
    }

    fn maybe_capture_anchor_download(&mut self, anchor: NodeId) -> Result<bool> {
        let Some(download) = self.dom.attr(anchor, "download") else {
            return Ok(false);
        };
        let href = self.dom.attr(anchor, "href").unwrap_or_default();
        let Some(blob) = self.browser_apis.blob_url_objects.get(&href).cloned() else {
            return Ok(false);
        };

        let filename = if download.is_empty() {
            None
        } else {
            Some(download)
        };
        tracing::debug!(
            filename = filename.as_deref().unwrap_or(""),
            bytes = blob.bytes.len(),
            "captured download"
        );
        self.browser_apis.downloads.push(DownloadArtifact {
            filename,
            mime_type: Some(blob.mime_type),
            bytes: blob.bytes,
        });
        Ok(true)
    }

    fn follow_anchor_hyperlink(&mut self, anchor: NodeId) {
        let Some(href) = self.dom.attr(anchor, "href") else {
            return;
        };
        let to = resolve_url(&self.url, &href);
        self.navigate(to);
    }

    // Assertions.

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, class_name);
        self.check(
            selector,
            target,
            &format!("has_class({class_name})={expected}"),
            format!("has_class({class_name})={actual}"),
        )
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_missing(&self, selector: &str) -> Result<()> {
        match self.dom.query_selector(selector)? {
            None => Ok(()),
            Some(found) => Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "no match".into(),
                actual: "element present".into(),
                dom_snippet: self.node_snippet(found),
            }),
        }
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: String) -> Result<()> {
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }
}

fn pathname_of(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        return match rest.find('/') {
            Some(slash) => rest[slash..].to_string(),
            None => "/".to_string(),
        };
    }
    match url.split_once(':') {
        Some((_, opaque)) => opaque.to_string(),
        None => url.to_string(),
    }
}

fn origin_of(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&url[..scheme_end + 3 + authority_end])
}

pub(crate) fn resolve_url(base: &str, href: &str) -> String {
    if href.contains("://") || href.starts_with("blob:") || href.starts_with("mailto:") {
        return href.to_string();
    }
    if let Some(fragment) = href.strip_prefix('#') {
        let without_fragment = base.split('#').next().unwrap_or(base);
        return format!("{without_fragment}#{fragment}");
    }
    let Some(origin) = origin_of(base) else {
        return href.to_string();
    };
    if href.starts_with('/') {
        return format!("{origin}{href}");
    }
    let path = pathname_of(base);
    let dir = path.rsplit_once('/').map_or("", |(dir, _)| dir);
    if href.starts_with('?') {
        return format!("{origin}{path}{href}");
    }
    format!("{origin}{dir}/{href}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathname_strips_origin_query_and_fragment() {
        assert_eq!(pathname_of("https://portal.example/results?term=1#top"), "/results");
        assert_eq!(pathname_of("https://portal.example"), "/");
        assert_eq!(pathname_of("https://portal.example/students/"), "/students/");
        assert_eq!(pathname_of("about:blank"), "blank");
    }

    #[test]
    fn relative_links_resolve_against_the_page_url() {
        let base = "https://portal.example/students/list?page=2#top";
        assert_eq!(resolve_url(base, "/results"), "https://portal.example/results");
        assert_eq!(resolve_url(base, "view"), "https://portal.example/students/view");
        assert_eq!(
            resolve_url(base, "#summary"),
            "https://portal.example/students/list?page=2#summary"
        );
        assert_eq!(resolve_url(base, "https://other.example/"), "https://other.example/");
    }
}

use super::*;
use chrono::Datelike;

/// A file the page handed to the host through a `download` anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: Option<String>,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    /// The payload as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub from: String,
    pub to: String,
}

/// A form submission that reached the network boundary.
///
/// `via_submit_event` is false for programmatic `form.submit()` calls, which
/// skip the `submit` event entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: Option<String>,
    pub action: Option<String>,
    pub method: String,
    pub fields: Vec<(String, String)>,
    pub via_submit_event: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target_id: Option<String>,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Default)]
pub(crate) struct PlatformMockState {
    pub(crate) alert_messages: Vec<String>,
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) print_count: usize,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
    pub(crate) location_navigations: Vec<LocationNavigation>,
    pub(crate) form_submissions: Vec<FormSubmission>,
    pub(crate) current_year: Option<i32>,
}

impl PlatformMockState {
    pub(crate) fn next_confirm_response(&mut self) -> bool {
        self.confirm_responses
            .pop_front()
            .unwrap_or(self.default_confirm_response)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BlobValue {
    pub(crate) mime_type: String,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Debug)]
pub(crate) struct BrowserApiState {
    pub(crate) next_blob_url_id: usize,
    pub(crate) blob_url_objects: HashMap<String, BlobValue>,
    pub(crate) downloads: Vec<DownloadArtifact>,
}

impl Default for BrowserApiState {
    fn default() -> Self {
        Self {
            next_blob_url_id: 1,
            blob_url_objects: HashMap::new(),
            downloads: Vec::new(),
        }
    }
}

impl BrowserApiState {
    pub(crate) fn allocate_blob_url(&mut self) -> String {
        let object_url = format!("blob:pb-{}", self.next_blob_url_id);
        self.next_blob_url_id = self.next_blob_url_id.saturating_add(1);
        object_url
    }

    pub(crate) fn create_object_url(&mut self, blob: BlobValue) -> String {
        let url = self.allocate_blob_url();
        self.blob_url_objects.insert(url.clone(), blob);
        url
    }

    pub(crate) fn revoke_object_url(&mut self, url: &str) -> bool {
        self.blob_url_objects.remove(url).is_some()
    }
}

impl Page {
    /// Blocking `window.alert`. The message is recorded for the test driver.
    pub fn alert(&mut self, message: &str) {
        tracing::debug!(text = message, "alert");
        self.platform_mocks.alert_messages.push(message.to_string());
    }

    /// Blocking `window.confirm`. Answers from the scripted response queue,
    /// falling back to the default response once it is empty.
    pub fn confirm(&mut self, message: &str) -> bool {
        self.platform_mocks
            .confirm_messages
            .push(message.to_string());
        let accepted = self.platform_mocks.next_confirm_response();
        tracing::debug!(text = message, accepted, "confirm");
        accepted
    }

    pub fn print(&mut self) {
        self.platform_mocks.print_count += 1;
        tracing::debug!(count = self.platform_mocks.print_count, "print");
    }

    pub fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) {
        let target_id = self.dom.attr(node, "id").filter(|id| !id.is_empty());
        tracing::debug!(node = %self.trace_node_label(node), ?behavior, "scroll into view");
        self.platform_mocks.scroll_requests.push(ScrollRequest {
            target_id,
            behavior,
        });
    }

    /// `URL.createObjectURL(new Blob([bytes], { type }))`.
    pub fn create_object_url(&mut self, mime_type: &str, bytes: Vec<u8>) -> String {
        self.browser_apis.create_object_url(BlobValue {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn revoke_object_url(&mut self, url: &str) -> bool {
        self.browser_apis.revoke_object_url(url)
    }

    /// Object URLs created and not yet revoked.
    pub fn live_object_url_count(&self) -> usize {
        self.browser_apis.blob_url_objects.len()
    }

    /// Calendar year of the host clock, or the mocked year when one is set.
    pub fn current_year(&self) -> i32 {
        self.platform_mocks
            .current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn set_current_year(&mut self, year: i32) {
        self.platform_mocks.current_year = Some(year);
    }

    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.alert_messages)
    }

    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.confirm_messages)
    }

    pub fn print_count(&self) -> usize {
        self.platform_mocks.print_count
    }

    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.platform_mocks.scroll_requests)
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.platform_mocks.location_navigations)
    }

    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.platform_mocks.form_submissions)
    }

    pub fn take_downloads(&mut self) -> Vec<DownloadArtifact> {
        std::mem::take(&mut self.browser_apis.downloads)
    }
}

use super::*;

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }

    if element.tag_name.eq_ignore_ascii_case("input") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit") || kind.eq_ignore_ascii_case("image"))
            .unwrap_or(false);
    }

    false
}

fn is_successful_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if element.disabled || element.attrs.get("name").is_none_or(String::is_empty) {
        return false;
    }
    match element.tag_name.to_ascii_lowercase().as_str() {
        "select" | "textarea" => true,
        "input" => {
            let kind = element
                .attrs
                .get("type")
                .map(|kind| kind.to_ascii_lowercase())
                .unwrap_or_else(|| "text".into());
            match kind.as_str() {
                "submit" | "image" | "button" | "reset" | "file" => false,
                "checkbox" | "radio" => element.attrs.contains_key("checked"),
                _ => true,
            }
        }
        _ => false,
    }
}

impl Page {
    /// The form a control belongs to: its `form` attribute target when that
    /// names a form, else its nearest form ancestor. A form owns itself.
    pub fn form_owner(&self, node_id: NodeId) -> Option<NodeId> {
        if self.dom.is_tag(node_id, "form") {
            return Some(node_id);
        }
        if let Some(form_id) = self.dom.attr(node_id, "form") {
            return self
                .dom
                .by_id(&form_id)
                .filter(|form| self.dom.is_tag(*form, "form"));
        }
        self.dom.find_ancestor_by_tag(node_id, "form")
    }

    /// Named, enabled controls owned by `form`, in document order.
    pub fn form_fields(&self, form: NodeId) -> Vec<NodeId> {
        let mut candidates = Vec::new();
        self.dom.collect_elements_dfs(self.dom.root, &mut candidates);
        candidates
            .into_iter()
            .filter(|node| {
                matches!(
                    self.dom.tag_name(*node).map(str::to_ascii_lowercase).as_deref(),
                    Some("input" | "select" | "textarea")
                ) && self.form_owner(*node) == Some(form)
            })
            .collect()
    }

    /// `form.requestSubmit()`: fires `submit` and records the submission
    /// unless a listener cancels it. Returns whether the form was submitted.
    pub fn request_form_submit(&mut self, form: NodeId) -> Result<bool> {
        let outcome = self.dispatch_event(form, "submit")?;
        if outcome.default_prevented() {
            tracing::debug!(form = %self.trace_node_label(form), "submission cancelled");
            return Ok(false);
        }
        self.record_form_submission(form, true)?;
        Ok(true)
    }

    /// `form.submit()`: records the submission without firing `submit`, so
    /// submit listeners (validation included) never see it.
    pub fn submit_form(&mut self, form: NodeId) -> Result<()> {
        if !self.dom.is_tag(form, "form") {
            return Err(Error::Runtime(format!(
                "submit target {} is not a form",
                self.trace_node_label(form)
            )));
        }
        self.record_form_submission(form, false)
    }

    fn record_form_submission(&mut self, form: NodeId, via_submit_event: bool) -> Result<()> {
        let mut fields = Vec::new();
        for control in self.form_fields(form) {
            if !is_successful_control(&self.dom, control) {
                continue;
            }
            let name = self.dom.attr(control, "name").unwrap_or_default();
            fields.push((name, self.dom.value(control)?));
        }

        let submission = FormSubmission {
            form_id: self.dom.attr(form, "id").filter(|id| !id.is_empty()),
            action: self.dom.attr(form, "action"),
            method: self
                .dom
                .attr(form, "method")
                .map(|method| method.to_ascii_lowercase())
                .filter(|method| method == "post" || method == "dialog")
                .unwrap_or_else(|| "get".into()),
            fields,
            via_submit_event,
        };
        tracing::debug!(
            form = submission.form_id.as_deref().unwrap_or(""),
            via_submit_event,
            fields = submission.fields.len(),
            "form submitted"
        );
        self.trace_behavior_line(format!(
            "[form] submit form={} via_submit_event={via_submit_event}",
            self.trace_node_label(form)
        ));
        self.platform_mocks.form_submissions.push(submission);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_controls_follow_button_and_input_types() -> Result<()> {
        let ParseOutput { dom } = parse_html(
            "<form><button id='a'>Go</button><button id='b' type='button'>x</button>\
             <input id='c' type='submit'><input id='d' type='text'></form>",
        )?;
        let id = |name: &str| dom.by_id(name).ok_or_else(|| Error::Runtime(name.into()));
        assert!(is_submit_control(&dom, id("a")?));
        assert!(!is_submit_control(&dom, id("b")?));
        assert!(is_submit_control(&dom, id("c")?));
        assert!(!is_submit_control(&dom, id("d")?));
        Ok(())
    }

    #[test]
    fn programmatic_submit_collects_successful_controls() -> Result<()> {
        let mut page = Page::from_html(
            "<form id='filters' method='POST' action='/results'>\
               <input name='search' value='amy'>\
               <input name='skip' value='x' disabled>\
               <input type='checkbox' name='passed' checked>\
               <input type='checkbox' name='failed'>\
               <select name='term'><option>1</option><option selected>2</option></select>\
               <button name='go'>Go</button>\
             </form>",
        )?;
        let form = page.select_one("#filters")?;
        page.submit_form(form)?;
        let submissions = page.take_form_submissions();
        assert_eq!(
            submissions,
            vec![FormSubmission {
                form_id: Some("filters".into()),
                action: Some("/results".into()),
                method: "post".into(),
                fields: vec![
                    ("search".into(), "amy".into()),
                    ("passed".into(), "on".into()),
                    ("term".into(), "2".into()),
                ],
                via_submit_event: false,
            }]
        );
        Ok(())
    }

    #[test]
    fn form_attribute_overrides_ancestor_form() -> Result<()> {
        let page = Page::from_html(
            "<form id='outer'><input id='q' form='other'></form><form id='other'></form>",
        )?;
        let q = page.select_one("#q")?;
        assert_eq!(page.form_owner(q), page.element_by_id("other"));
        Ok(())
    }
}

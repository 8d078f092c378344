use super::*;

/// How CSV export treats cell text containing separators or quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvEscaping {
    /// Cells are joined verbatim. A comma inside a cell shifts every column
    /// after it, exactly as the portal's exports always have.
    #[default]
    Preserve,
    /// RFC 4180 quoting: fields containing `,`, `"`, `\r` or `\n` are wrapped
    /// in double quotes with inner quotes doubled.
    Rfc4180,
}

/// Hooks, delays and texts the behaviors bind with.
///
/// The defaults match the markup the portal templates render. Every selector
/// goes through the page's selector engine, so anything it accepts is valid
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorConfig {
    pub alert_selector: String,
    pub alert_display_ms: i64,
    pub alert_exit_ms: i64,
    pub alert_exit_animation: String,

    pub form_selector: String,
    pub validation_message: String,
    pub danger_border_color: String,
    pub default_border_color: String,

    pub search_input_selector: String,
    pub search_debounce_ms: i64,

    pub nav_link_selector: String,
    pub nav_active_background: String,
    pub nav_active_color: String,

    pub data_table_selector: String,
    pub csv_escaping: CsvEscaping,

    pub fragment_link_selector: String,

    pub nav_toggle_id: String,
    pub nav_menu_selector: String,
    pub nav_menu_active_class: String,
    pub nav_icon_open_class: String,
    pub nav_icon_closed_class: String,

    pub marks_input_selector: String,

    pub year_stamp_id: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            alert_selector: ".alert".into(),
            alert_display_ms: 5000,
            alert_exit_ms: 300,
            alert_exit_animation: "slideUp 0.3s ease".into(),

            form_selector: "form".into(),
            validation_message: "Please fill in all required fields".into(),
            danger_border_color: "var(--danger)".into(),
            default_border_color: "var(--border)".into(),

            search_input_selector: "input[name=\"search\"]".into(),
            search_debounce_ms: 500,

            nav_link_selector: ".nav-menu a".into(),
            nav_active_background: "var(--light)".into(),
            nav_active_color: "var(--primary)".into(),

            data_table_selector: ".data-table".into(),
            csv_escaping: CsvEscaping::Preserve,

            fragment_link_selector: "a[href^=\"#\"]".into(),

            nav_toggle_id: "navToggle".into(),
            nav_menu_selector: ".nav-menu".into(),
            nav_menu_active_class: "active".into(),
            nav_icon_open_class: "fa-times".into(),
            nav_icon_closed_class: "fa-bars".into(),

            marks_input_selector: "input[name=\"marks\"]".into(),

            year_stamp_id: "current-year".into(),
        }
    }
}

impl BehaviorConfig {
    /// Rejects negative delays, empty hooks and selectors the engine cannot
    /// parse.
    pub fn validate(&self) -> Result<()> {
        for (name, delay) in [
            ("alert_display_ms", self.alert_display_ms),
            ("alert_exit_ms", self.alert_exit_ms),
            ("search_debounce_ms", self.search_debounce_ms),
        ] {
            if delay < 0 {
                return Err(Error::Config(format!(
                    "{name} must be non-negative (got {delay})"
                )));
            }
        }

        for (name, selector) in [
            ("alert_selector", &self.alert_selector),
            ("form_selector", &self.form_selector),
            ("search_input_selector", &self.search_input_selector),
            ("nav_link_selector", &self.nav_link_selector),
            ("data_table_selector", &self.data_table_selector),
            ("fragment_link_selector", &self.fragment_link_selector),
            ("nav_menu_selector", &self.nav_menu_selector),
            ("marks_input_selector", &self.marks_input_selector),
        ] {
            parse_selector_groups(selector)
                .map_err(|err| Error::Config(format!("{name}: {err}")))?;
        }

        for (name, token) in [
            ("nav_toggle_id", &self.nav_toggle_id),
            ("year_stamp_id", &self.year_stamp_id),
            ("nav_menu_active_class", &self.nav_menu_active_class),
            ("nav_icon_open_class", &self.nav_icon_open_class),
            ("nav_icon_closed_class", &self.nav_icon_closed_class),
        ] {
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "{name} must be a single non-empty token (got {token:?})"
                )));
            }
        }

        if self.nav_icon_open_class == self.nav_icon_closed_class {
            return Err(Error::Config(
                "nav_icon_open_class and nav_icon_closed_class must differ".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() -> Result<()> {
        BehaviorConfig::default().validate()
    }

    #[test]
    fn negative_delay_is_rejected() {
        let config = BehaviorConfig {
            search_debounce_ms: -1,
            ..BehaviorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(msg)) if msg.contains("search_debounce_ms")));
    }

    #[test]
    fn unparseable_selector_is_a_config_error() {
        let config = BehaviorConfig {
            data_table_selector: "table[".into(),
            ..BehaviorConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(msg)) if msg.starts_with("data_table_selector")));
    }

    #[test]
    fn identical_icon_classes_are_rejected() {
        let config = BehaviorConfig {
            nav_icon_open_class: "fa-bars".into(),
            ..BehaviorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

//! In-memory render surfaces the view controllers bind fetched data to.
//!
//! Controllers mutate panels the way the browser pages mutated DOM
//! nodes; the console prints a panel once its controller has finished.
//! Defaults mirror the pages' markup: placeholders visible, real
//! content hidden until a successful fetch reveals it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonColor {
    Red,
    Green,
}

impl fmt::Display for ButtonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonColor::Red => write!(f, "red"),
            ButtonColor::Green => write!(f, "green"),
        }
    }
}

/// One rendered link: a label and the page target it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub label: String,
    pub href: String,
}

/// List page surface (camera roster, record history).
#[derive(Debug, Clone)]
pub struct ListPanel {
    pub rows: Vec<LinkRow>,
    pub table_visible: bool,
    pub placeholder_visible: bool,
    pub placeholder: String,
}

impl ListPanel {
    pub fn new(placeholder: &str) -> Self {
        Self {
            rows: Vec::new(),
            table_visible: false,
            placeholder_visible: true,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn render(&self, title: &str) -> String {
        let mut out = format!("== {} ==\n", title);
        if self.table_visible {
            for row in &self.rows {
                out.push_str(&format!("{}  ->  {}\n", row.label, row.href));
            }
        }
        if self.placeholder_visible {
            out.push_str(&format!("{}\n", self.placeholder));
        }
        out
    }
}

/// Record summary page surface. Fields keep insertion order, matching
/// the append order of the original page.
#[derive(Debug, Clone)]
pub struct SummaryPanel {
    pub image_url: Option<String>,
    pub image_visible: bool,
    pub heading: Option<String>,
    pub fields: Vec<(String, String)>,
    pub info_visible: bool,
    pub placeholder_visible: bool,
}

impl SummaryPanel {
    pub fn new() -> Self {
        Self {
            image_url: None,
            image_visible: false,
            heading: None,
            fields: Vec::new(),
            info_visible: false,
            placeholder_visible: true,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.info_visible {
            if let Some(heading) = &self.heading {
                out.push_str(&format!("== {} ==\n", heading));
            }
            for (label, value) in &self.fields {
                out.push_str(&format!("{}: {}\n", label, value));
            }
        }
        if self.image_visible {
            if let Some(url) = &self.image_url {
                out.push_str(&format!("image: {}\n", url));
            }
        }
        if self.placeholder_visible {
            out.push_str("Record not found\n");
        }
        out
    }
}

impl Default for SummaryPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing page surface: the start/stop button and the live image.
#[derive(Debug, Clone)]
pub struct StatusPanel {
    pub button_label: String,
    pub button_color: ButtonColor,
    pub live_image_url: Option<String>,
    pub image_visible: bool,
    pub alerts: Vec<String>,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            button_label: "Start".to_string(),
            button_color: ButtonColor::Green,
            live_image_url: None,
            image_visible: false,
            alerts: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("[{}] ({})\n", self.button_label, self.button_color);
        if self.image_visible {
            match &self.live_image_url {
                Some(url) => out.push_str(&format!("live image: {}\n", url)),
                None => out.push_str("live image: (waiting for first refresh)\n"),
            }
        }
        out
    }
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Emergency-stop button surface.
#[derive(Debug, Clone)]
pub struct EstopPanel {
    pub label: String,
    pub color: ButtonColor,
    pub alerts: Vec<String>,
}

impl EstopPanel {
    pub fn new() -> Self {
        Self {
            label: "E-stop".to_string(),
            color: ButtonColor::Red,
            alerts: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        format!("[{}] ({})\n", self.label, self.color)
    }
}

impl Default for EstopPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_panel_defaults_to_placeholder() {
        let panel = ListPanel::new("No cameras found");
        assert!(!panel.table_visible);
        assert!(panel.placeholder_visible);
        let rendered = panel.render("Cameras");
        assert!(rendered.contains("No cameras found"));
    }

    #[test]
    fn test_list_panel_hides_placeholder_when_revealed() {
        let mut panel = ListPanel::new("No cameras found");
        panel.rows.push(LinkRow {
            label: "Front".to_string(),
            href: "livefeed.html?cameraID=cam01".to_string(),
        });
        panel.table_visible = true;
        panel.placeholder_visible = false;
        let rendered = panel.render("Cameras");
        assert!(rendered.contains("cam01"));
        assert!(!rendered.contains("No cameras found"));
    }

    #[test]
    fn test_status_panel_defaults() {
        let panel = StatusPanel::new();
        assert_eq!(panel.button_label, "Start");
        assert_eq!(panel.button_color, ButtonColor::Green);
        assert!(!panel.image_visible);
    }
}

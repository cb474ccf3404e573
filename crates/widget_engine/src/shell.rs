use widget_core::WidgetConfig;

pub const BACKDROP_CLASS: &str = "overlay";
pub const CLOSE_CLASS: &str = "close";
pub const LOADER_CLASS: &str = "loader-container";
pub const HIDDEN_CLASS: &str = "hidden";
pub const VISIBLE_CLASS: &str = "is-visible";

const STYLES: &str = r#"
.overlay { display: none; position: fixed; inset: 0; background: rgba(0,0,0,0.7); z-index: 2147483647; justify-content: center; align-items: end; backdrop-filter: blur(4px); }
.modal { background: white; width: 100%; max-width: 100vw; height: 90%; max-height: 90vh; border-radius: 12px 12px 0px 0px; position: relative; overflow: hidden; }
.close { position: absolute; top: 15px; right: 15px; border: none; cursor: pointer; z-index: 30; background: #eee; border-radius: 50%; width: 32px; height: 32px; display: flex; align-items: center; justify-content: center; }
.loader-container { position: absolute; inset: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; background: white; z-index: 10; }
.spinner { width: 40px; height: 40px; border: 4px solid #f3f3f3; border-top: 4px solid #0070f3; border-radius: 50%; animation: spin 1s linear infinite; }
@keyframes spin { 0% { transform: rotate(0deg); } 100% { transform: rotate(360deg); } }
iframe { width: 100%; height: 100%; border: none; opacity: 0; transition: opacity 0.3s; }
iframe.is-visible { opacity: 1; }
.hidden { display: none !important; }

@media (min-width: 1024px) {
    .overlay { align-items: center; }
    .modal { max-width: 80vw; border-radius: 12px; }
}
"#;

/// Style sheet and markup injected into the closed shadow root.
///
/// Everything the widget paints lives under the overlay element, so host
/// styles never reach it and its own rules never leak out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTemplate {
    pub host_id: String,
    pub surface_id: String,
    pub styles: String,
    /// Inner markup of the overlay element.
    pub overlay_markup: String,
}

impl ShellTemplate {
    pub fn from_config(config: &WidgetConfig) -> Self {
        let overlay_markup = format!(
            concat!(
                r#"<div class="modal">"#,
                r#"<button class="{close}" aria-label="Close">&times;</button>"#,
                r#"<div class="{loader}"><div class="spinner"></div></div>"#,
                r#"<iframe id="{surface_id}" allow="{allow}"></iframe>"#,
                r#"</div>"#,
            ),
            close = CLOSE_CLASS,
            loader = LOADER_CLASS,
            surface_id = escape_attribute(&config.surface_id),
            allow = escape_attribute(&config.surface_allow),
        );
        Self {
            host_id: config.host_id.clone(),
            surface_id: config.surface_id.clone(),
            styles: STYLES.trim().to_string(),
            overlay_markup,
        }
    }

    pub fn overlay_class(&self) -> &'static str {
        BACKDROP_CLASS
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

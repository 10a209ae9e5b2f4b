//! HTML index page.
//!
//! A single self-contained page, no external assets.

use std::fmt::Write;

use crate::catalog::DisplayDescriptor;
use crate::reflective::LightEmissionState;

/// Render the index page listing supported displays and the light state.
///
/// # Example
///
/// ```
/// use reflective_display::{list_displays, render_index_page, LightEmissionState};
///
/// let html = render_index_page("Reader", list_displays(), &LightEmissionState::ALL_OFF);
/// assert!(html.contains("E-Ink Carta 1200"));
/// assert!(html.contains("DISABLED"));
/// ```
pub fn render_index_page(
    title: &str,
    displays: &[DisplayDescriptor],
    light: &LightEmissionState,
) -> String {
    let mut rows = String::new();
    for display in displays {
        let mut details = vec![format!("Resolution: {}", display.resolution)];
        if let Some(rate) = display.refresh_rate {
            details.push(format!("Refresh rate: {}", rate));
        }
        if let Some(levels) = display.gray_levels {
            details.push(format!("Gray levels: {}", levels));
        }
        if let Some(ratio) = display.contrast_ratio {
            details.push(format!("Contrast: {}", ratio));
        }
        if let Some(colors) = display.colors {
            details.push(format!("Colors: {}", colors));
        }
        if let Some(technology) = display.technology {
            details.push(format!("Technology: {}", technology));
        }

        // Writing to a String cannot fail
        let _ = write!(
            rows,
            "<li><span class=\"spec-label\">{}</span> {}</li>",
            escape_html(display.display_type),
            details
                .iter()
                .map(|d| escape_html(d))
                .collect::<Vec<_>>()
                .join(" &middot; ")
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{
            background: #f4f1ea;
            color: #111;
            font-family: Georgia, serif;
            max-width: 40em;
            margin: 2em auto;
        }}
        .spec-label {{ font-weight: bold; }}
        code {{ font-family: monospace; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <h2>Supported displays</h2>
    <ul>{rows}</ul>
    <h2>Light emission</h2>
    <ul>
        <li>Screen backlight: {backlight}%</li>
        <li>Front light: <span id="backlightStatus">{front_light}</span></li>
        <li>Auto brightness: {auto_brightness}</li>
        <li>Color temperature: {color_temperature}</li>
    </ul>
    <h2>API</h2>
    <ul>
        <li><code>GET /api/display-specs</code></li>
        <li><code>GET /api/disable-light</code></li>
        <li><code>GET /api/reflective-config/{{ambientLux}}</code></li>
    </ul>
</body>
</html>"#,
        title = escape_html(title),
        rows = rows,
        backlight = light.screen_backlight,
        front_light = light.front_light.as_str(),
        auto_brightness = light.auto_brightness.as_str(),
        color_temperature = light.color_temperature.as_str(),
    )
}

/// Escape text for inclusion in HTML element content.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-spider-ui]";

/// Default CSS for the dashboard along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --spider-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --spider-bg: #f8fafc;
  --spider-card-bg: #ffffff;
  --spider-card-border: #e5e7eb;
  --spider-radius: 12px;
  --spider-text: #1f2933;
  --spider-muted: #6b7280;
  --spider-muted-strong: #374151;
  --spider-accent: #2563eb;
  --spider-nav-bg: #111827;
  --spider-nav-text: #f9fafb;
  --spider-grid: rgba(148, 163, 184, 0.3);
  --spider-zero: #999999;
  --spider-error: #b42318;
  --spider-error-bg: rgba(180, 35, 24, 0.08);
}

.spider-app {
  font-family: var(--spider-font-family);
  background: var(--spider-bg);
  color: var(--spider-text);
  min-height: 100%;
}

.spider-navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 14px 24px;
  background: var(--spider-nav-bg);
  color: var(--spider-nav-text);
}

.spider-logo {
  font-weight: 700;
  letter-spacing: 0.02em;
}

.spider-nav-links {
  display: flex;
  gap: 8px;
}

.spider-nav-link {
  border: none;
  background: transparent;
  color: inherit;
  font: inherit;
  padding: 6px 12px;
  border-radius: 999px;
  cursor: pointer;
  opacity: 0.75;
}

.spider-nav-link.is-active,
.spider-nav-link:hover {
  opacity: 1;
  background: rgba(255, 255, 255, 0.12);
}

.spider-main {
  padding: 24px;
}

.spider-page-header {
  margin-bottom: 16px;
}

.spider-page-title {
  margin: 0;
  font-size: 1.6rem;
}

.spider-page-subtitle {
  margin: 4px 0 0;
  color: var(--spider-muted);
}

.spider-card-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 16px;
}

.spider-card {
  background: var(--spider-card-bg);
  border: 1px solid var(--spider-card-border);
  border-radius: var(--spider-radius);
  padding: 16px;
  box-shadow: 0 1px 2px rgba(0, 0, 0, 0.04);
}

.spider-card-title {
  font-size: 12px;
  color: var(--spider-muted);
  text-transform: uppercase;
  letter-spacing: 0.4px;
}

.spider-card-value {
  font-size: 32px;
  font-weight: 700;
  margin-top: 6px;
  font-variant-numeric: tabular-nums;
}

.spider-card-detail {
  margin-top: 8px;
  color: var(--spider-muted-strong);
}

.spider-toolbar {
  display: flex;
  flex-wrap: wrap;
  align-items: flex-end;
  gap: 16px;
  margin-bottom: 16px;
}

.spider-filter {
  display: flex;
  flex-direction: column;
  gap: 4px;
}

.spider-filter-label {
  font-size: 12px;
  color: var(--spider-muted);
  text-transform: uppercase;
  letter-spacing: 0.4px;
}

.spider-select {
  min-width: 160px;
  padding: 6px 10px;
  border: 1px solid var(--spider-card-border);
  border-radius: 8px;
  background: #ffffff;
  font: inherit;
}

.spider-btn {
  padding: 7px 16px;
  border: 1px solid var(--spider-accent);
  border-radius: 8px;
  background: var(--spider-accent);
  color: #ffffff;
  font: inherit;
  cursor: pointer;
}

.spider-skeleton,
.spider-empty {
  padding: 48px 16px;
  text-align: center;
  color: var(--spider-muted);
}

.spider-error {
  padding: 16px;
  border-radius: var(--spider-radius);
  background: var(--spider-error-bg);
  color: var(--spider-error);
}

.spider-chart {
  position: relative;
  margin: 0;
}

.spider-chart.is-refreshing {
  opacity: 0.6;
}

.spider-chart-title {
  font-weight: 600;
  text-align: center;
  margin-bottom: 8px;
}

.spider-svg {
  width: 100%;
  height: 640px;
}

.spider-svg text {
  font-size: 12px;
  fill: var(--spider-muted-strong);
  font-variant-numeric: tabular-nums;
}

.spider-svg .spider-grid {
  stroke: var(--spider-grid);
  stroke-width: 1;
}

.spider-svg .spider-zero {
  stroke: var(--spider-zero);
  stroke-width: 1.5;
}

.spider-svg .spider-axis-title {
  font-size: 13px;
  font-weight: 600;
}

.spider-legend {
  display: flex;
  flex-wrap: wrap;
  gap: 12px;
  list-style: none;
  padding: 0;
  margin: 12px 0 0;
}

.spider-legend-item {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  font-size: 0.85rem;
}

.spider-legend-swatch {
  width: 14px;
  height: 4px;
  border-radius: 2px;
}

@media (max-width: 720px) {
  .spider-toolbar {
    flex-direction: column;
    align-items: stretch;
  }

  .spider-svg {
    height: 420px;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-spider-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}

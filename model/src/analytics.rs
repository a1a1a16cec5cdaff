use anyhow::{Context, Result};
use serde::Serialize;

const SITE: &str = "wdr.de";
const BRAND: &str = "WDR aktuell";
const PAGE_TITLE: &str = "Reichweiten-Checker";

/// A page view or click reported to an external collector. Delivery is best-effort.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: &'static str,
    pub site: &'static str,
    pub brand: &'static str,
    pub page_type: &'static str,
    pub page_title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_name: Option<String>,
}

impl AnalyticsEvent {
    pub fn page_view() -> Self {
        Self::new("page_view", None)
    }

    pub fn stop_selected(stop_name: &str) -> Self {
        Self::new("click", Some(stop_name.to_string()))
    }

    fn new(event: &'static str, stop_name: Option<String>) -> Self {
        Self {
            event,
            site: SITE,
            brand: BRAND,
            page_type: "widget",
            page_title: PAGE_TITLE,
            stop_name,
        }
    }

    pub async fn send(&self, collector_url: &str) -> Result<()> {
        let resp = reqwest::Client::new()
            .post(collector_url)
            .json(self)
            .send()
            .await
            .with_context(|| format!("posting to {collector_url}"))?;
        if !resp.status().is_success() {
            bail!("{collector_url} returned {}", resp.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape() {
        let json = serde_json::to_value(AnalyticsEvent::stop_selected("Köln Hbf")).unwrap();
        assert_eq!(json["event"], "click");
        assert_eq!(json["stop_name"], "Köln Hbf");

        let json = serde_json::to_value(AnalyticsEvent::page_view()).unwrap();
        assert!(json.get("stop_name").is_none());
    }
}

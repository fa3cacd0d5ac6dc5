//! Core data models for the image feed.
//! Feed items are derived once from [`FeedConfig`] at startup and never change.

use serde::Deserialize;
use yew::virtual_dom::AttrValue;

use crate::error::{FeedError, Result};
use crate::state::ZoomLimits;

/// Element id of the optional inline JSON config in `index.html`.
pub const CONFIG_ELEMENT_ID: &str = "feed-config";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedItem {
    /// Zero-based position in the feed, mirrored into `data-index`.
    pub index: usize,
    pub image: AttrValue,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Directory the images are served from. A trailing `/` is ignored.
    pub image_base: String,
    /// Images are enumerated `1..=count`.
    pub count: usize,
    pub extension: String,
    /// Fraction of an item that must be inside the feed viewport to focus it.
    pub focus_threshold: f64,
    /// Length of the viewer fade-out; the image is released afterwards.
    pub dismiss_delay_ms: u32,
    pub min_scale: f64,
    pub max_scale: f64,
    pub log_level: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            image_base: "images".to_string(),
            count: 9,
            extension: "jpg".to_string(),
            focus_threshold: 0.5,
            dismiss_delay_ms: 300,
            min_scale: 1.0,
            max_scale: 4.0,
            log_level: "info".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: FeedConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the inline `<script id="feed-config">` block. A page without one
    /// gets the defaults.
    pub fn from_document() -> Result<Self> {
        let window = web_sys::window().ok_or(FeedError::NoWindow)?;
        let document = window.document().ok_or(FeedError::NoDocument)?;
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.focus_threshold > 0.0 && self.focus_threshold <= 1.0) {
            return Err(FeedError::InvalidConfig(format!(
                "focus_threshold must be in (0, 1], got {}",
                self.focus_threshold
            )));
        }
        if !(self.min_scale > 0.0) {
            return Err(FeedError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !(self.max_scale >= self.min_scale) {
            return Err(FeedError::InvalidConfig(format!(
                "max_scale {} is below min_scale {}",
                self.max_scale, self.min_scale
            )));
        }
        if self.level_filter().is_none() {
            return Err(FeedError::InvalidConfig(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    pub fn feed_items(&self) -> Vec<FeedItem> {
        let base = self.image_base.trim_end_matches('/');
        (1..=self.count)
            .enumerate()
            .map(|(index, n)| {
                let image = if base.is_empty() {
                    format!("{}.{}", n, self.extension)
                } else {
                    format!("{}/{}.{}", base, n, self.extension)
                };
                FeedItem {
                    index,
                    image: AttrValue::from(image),
                }
            })
            .collect()
    }
}

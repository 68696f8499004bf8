//! Schedule feeds.
//!
//! A feed is a JSON snapshot of what the collaboration API returns for a
//! viewer: their schedules, the projects those belong to and the viewer's
//! personal color.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::ColorChain;
use crate::error::{CalTileError, CalTileResult};
use crate::event::CalendarEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFeed {
    #[serde(default)]
    pub user_color: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectInfo>,
    /// `result` is accepted so raw schedule-list responses load as-is
    #[serde(default, alias = "result")]
    pub schedules: Vec<CalendarEvent>,
}

impl ScheduleFeed {
    pub fn from_json(json: &str) -> CalTileResult<Self> {
        serde_json::from_str(json).map_err(|e| CalTileError::Feed(e.to_string()))
    }

    pub fn load(path: &Path) -> CalTileResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let feed: ScheduleFeed = serde_json::from_str(&content)
            .map_err(|e| CalTileError::Feed(format!("{}: {e}", path.display())))?;
        tracing::debug!(
            path = %path.display(),
            schedules = feed.schedules.len(),
            projects = feed.projects.len(),
            "loaded feed"
        );
        Ok(feed)
    }

    pub fn project_ids(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.id.clone()).collect()
    }

    pub fn project_title(&self, id: &str) -> Option<&str> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.title.as_str())
    }

    /// Extend `base` with this feed's project and user colors.
    pub fn color_chain(&self, base: ColorChain) -> ColorChain {
        let chain = self
            .projects
            .iter()
            .filter_map(|p| p.color.as_ref().map(|c| (p.id.clone(), c.clone())))
            .fold(base, |chain, (id, color)| chain.with_project_color(id, color));

        match &self.user_color {
            Some(color) => chain.with_user_color(color.clone()),
            None => chain,
        }
    }
}

//! Page state owned by a browsing session.
//!
//! Every fetch is issued under a [`FetchTicket`] carrying a generation number.
//! Results are applied only when their generation is still the latest one for
//! that data set, so a slow response for a previously selected plugin can never
//! overwrite the current one.

use log::debug;

use crate::catalog::PluginEntry;
use crate::domain::model::{Build, Channel, Release};
use crate::source::RepoId;

use super::derive::filter_releases;

/// Identifies one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub plugin: String,
    pub repo: RepoId,
}

/// Fetches to issue after a plugin switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSwitch {
    pub releases: FetchTicket,
    /// Present when the build panel is open and must follow the new plugin
    pub builds: Option<FetchTicket>,
}

/// Why the build panel shows a message instead of builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildNotice {
    /// The fetch worked but no run qualified as a build
    NoBuilds,
    /// The fetch failed; the detail is kept for diagnostics
    Unavailable(String),
}

/// State of the build panel, tracked independently from the release list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildPanel {
    expanded: bool,
    loading: bool,
    builds: Vec<Build>,
    notice: Option<BuildNotice>,
    generation: u64,
}

impl BuildPanel {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn builds(&self) -> &[Build] {
        &self.builds
    }

    pub fn notice(&self) -> Option<&BuildNotice> {
        self.notice.as_ref()
    }

    fn start(&mut self, plugin: &PluginEntry) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.notice = None;
        FetchTicket {
            generation: self.generation,
            plugin: plugin.id.clone(),
            repo: plugin.repo.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    selected: PluginEntry,
    channel: Channel,
    releases: Vec<Release>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    builds: BuildPanel,
}

impl PageState {
    /// Creates the state of a freshly mounted page with `plugin` selected and
    /// its release fetch already pending.
    pub fn mount(plugin: &PluginEntry) -> (Self, FetchTicket) {
        let mut state = Self {
            selected: plugin.clone(),
            channel: Channel::default(),
            releases: Vec::new(),
            loading: true,
            error: None,
            generation: 0,
            builds: BuildPanel::default(),
        };
        let ticket = state.start_releases();
        (state, ticket)
    }

    /// Switches to `plugin`, resetting the release list before the new fetch.
    ///
    /// The caller is responsible for only passing enabled plugins.
    pub fn select_plugin(&mut self, plugin: &PluginEntry) -> PluginSwitch {
        debug!("Selecting plugin {}", plugin.id);
        self.selected = plugin.clone();
        let releases = self.start_releases();

        let builds = if self.builds.expanded {
            self.builds.builds.clear();
            Some(self.builds.start(plugin))
        } else {
            None
        };

        PluginSwitch { releases, builds }
    }

    fn start_releases(&mut self) -> FetchTicket {
        self.generation += 1;
        self.releases.clear();
        self.loading = true;
        self.error = None;
        FetchTicket {
            generation: self.generation,
            plugin: self.selected.id.clone(),
            repo: self.selected.repo.clone(),
        }
    }

    /// Applies a release fetch result. Returns `false` when the result is
    /// stale and was discarded.
    pub fn apply_releases(&mut self, generation: u64, result: Result<Vec<Release>, String>) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding stale release response (generation {}, current {})",
                generation, self.generation
            );
            return false;
        }

        match result {
            Ok(releases) => {
                self.releases = releases;
                self.error = None;
            }
            Err(message) => {
                self.releases.clear();
                self.error = Some(message);
            }
        }
        self.loading = false;
        true
    }

    pub fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    /// Opens the build panel. Returns a ticket only on the first expansion;
    /// an already open panel is left alone.
    pub fn expand_builds(&mut self) -> Option<FetchTicket> {
        if self.builds.expanded {
            return None;
        }
        self.builds.expanded = true;
        Some(self.builds.start(&self.selected))
    }

    /// Refetches builds, opening the panel if it was closed.
    pub fn refresh_builds(&mut self) -> FetchTicket {
        self.builds.expanded = true;
        self.builds.start(&self.selected)
    }

    /// Applies a build fetch result. Returns `false` when the result is stale.
    pub fn apply_builds(&mut self, generation: u64, result: Result<Vec<Build>, String>) -> bool {
        if generation != self.builds.generation {
            debug!(
                "Discarding stale build response (generation {}, current {})",
                generation, self.builds.generation
            );
            return false;
        }

        match result {
            Ok(builds) => {
                self.builds.notice = builds.is_empty().then_some(BuildNotice::NoBuilds);
                self.builds.builds = builds;
            }
            Err(detail) => {
                self.builds.builds.clear();
                self.builds.notice = Some(BuildNotice::Unavailable(detail));
            }
        }
        self.builds.loading = false;
        true
    }

    pub fn selected(&self) -> &PluginEntry {
        &self.selected
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn filtered_releases(&self) -> Vec<&Release> {
        filter_releases(&self.releases, self.channel)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn build_panel(&self) -> &BuildPanel {
        &self.builds
    }

    /// Whether any fetch is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading || self.builds.loading
    }
}

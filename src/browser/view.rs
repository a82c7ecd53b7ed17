//! View models derived from [`PageState`].
//!
//! Renderers only ever see these types, so the same state always renders the
//! same way.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::model::{BuildStatus, Channel, Release};

use super::derive::{format_date, format_size};
use super::links::Links;
use super::state::{BuildNotice, PageState};

pub const NO_BUILDS_MESSAGE: &str =
    "No builds available right now. Open \"all builds\" on GitHub for the latest artifacts.";

pub const BUILDS_UNAVAILABLE_MESSAGE: &str = "Live build data could not be fetched, most likely because of GitHub API rate limits or a connection problem. Open \"all builds\" on GitHub instead.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub plugins: Vec<PluginTab>,
    pub plugin: String,
    pub repo: String,
    pub channel: Channel,
    pub channel_description: String,
    pub releases: ReleaseListView,
    pub builds: BuildPanelView,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PluginTab {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReleaseListView {
    Loading,
    Error { message: String, releases_url: String },
    Empty { repo_url: String },
    Ready { releases: Vec<ReleaseCard> },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReleaseCard {
    pub id: u64,
    pub title: String,
    pub tag: String,
    pub date: String,
    pub badge: Badge,
    pub html_url: String,
    pub downloads: Downloads,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Stable,
    Preview,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Stable => "stable",
            Badge::Preview => "preview",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Downloads {
    /// Packaged plugin jars attached to the release
    Files { files: Vec<FileEntry> },
    /// No jar attached; the source archive is offered instead
    SourceArchive { url: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileEntry {
    pub id: u64,
    pub name: String,
    pub size: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BuildPanelView {
    Collapsed,
    Loading {
        actions_url: String,
    },
    /// Informational: the fetch worked but found nothing
    Notice {
        message: String,
        actions_url: String,
    },
    /// The fetch failed
    Warning {
        message: String,
        actions_url: String,
    },
    Ready {
        builds: Vec<BuildEntry>,
        actions_url: String,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BuildEntry {
    pub id: u64,
    pub title: String,
    pub branch: String,
    pub date: String,
    pub status: BuildStatus,
    pub status_label: String,
    pub url: String,
}

impl PageView {
    pub fn new(state: &PageState, catalog: &Catalog, links: &Links) -> Self {
        let selected = state.selected();
        let repo = &selected.repo;

        let plugins = catalog
            .plugins()
            .iter()
            .map(|p| PluginTab {
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
                enabled: p.enabled,
                selected: p.id == selected.id,
            })
            .collect();

        let releases = if state.is_loading() {
            ReleaseListView::Loading
        } else if let Some(message) = state.error() {
            ReleaseListView::Error {
                message: message.to_string(),
                releases_url: links.releases_url(repo),
            }
        } else {
            let filtered = state.filtered_releases();
            if filtered.is_empty() {
                ReleaseListView::Empty {
                    repo_url: links.repo_url(repo),
                }
            } else {
                ReleaseListView::Ready {
                    releases: filtered.into_iter().map(ReleaseCard::from).collect(),
                }
            }
        };

        let panel = state.build_panel();
        let actions_url = links.actions_url(repo);
        let builds = if !panel.is_expanded() {
            BuildPanelView::Collapsed
        } else if panel.is_loading() {
            BuildPanelView::Loading { actions_url }
        } else {
            match panel.notice() {
                Some(BuildNotice::NoBuilds) => BuildPanelView::Notice {
                    message: NO_BUILDS_MESSAGE.to_string(),
                    actions_url,
                },
                Some(BuildNotice::Unavailable(_)) => BuildPanelView::Warning {
                    message: BUILDS_UNAVAILABLE_MESSAGE.to_string(),
                    actions_url,
                },
                None => BuildPanelView::Ready {
                    builds: panel
                        .builds()
                        .iter()
                        .map(|b| BuildEntry {
                            id: b.id,
                            title: format!("{} #{}", b.name, b.number),
                            branch: b.branch.clone(),
                            date: format_date(b.created_at.as_deref()),
                            status: b.status,
                            status_label: b.status.label().to_string(),
                            url: b.url.clone(),
                        })
                        .collect(),
                    actions_url,
                },
            }
        };

        Self {
            plugins,
            plugin: selected.id.clone(),
            repo: repo.to_string(),
            channel: state.channel(),
            channel_description: state.channel().description().to_string(),
            releases,
            builds,
        }
    }
}

impl From<&Release> for ReleaseCard {
    fn from(release: &Release) -> Self {
        let files: Vec<FileEntry> = release
            .packaged_assets()
            .map(|a| FileEntry {
                id: a.id,
                name: a.name.clone(),
                size: format_size(a.size),
                url: a.download_url.clone(),
            })
            .collect();

        let downloads = if files.is_empty() {
            Downloads::SourceArchive {
                url: release.zipball_url.clone(),
            }
        } else {
            Downloads::Files { files }
        };

        ReleaseCard {
            id: release.id,
            title: release.title().to_string(),
            tag: release.tag.clone(),
            date: format_date(release.published_at.as_deref()),
            badge: if release.prerelease {
                Badge::Preview
            } else {
                Badge::Stable
            },
            html_url: release.html_url.clone(),
            downloads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Asset, Build};

    fn asset(id: u64, name: &str) -> Asset {
        Asset {
            id,
            name: name.into(),
            size: 1024 * 1024,
            download_url: format!("https://dl.example.com/{}", name),
        }
    }

    fn mounted() -> (PageState, u64, Catalog) {
        let catalog = Catalog::builtin();
        let (state, ticket) = PageState::mount(catalog.default_plugin());
        (state, ticket.generation, catalog)
    }

    #[test]
    fn test_loading_view() {
        let (state, _, catalog) = mounted();
        let view = PageView::new(&state, &catalog, &Links::default());

        assert_eq!(view.releases, ReleaseListView::Loading);
        assert_eq!(view.builds, BuildPanelView::Collapsed);
        assert_eq!(view.plugin, "arlibs");
        assert!(view.plugins[0].selected);
        assert!(!view.plugins[1].enabled);
    }

    #[test]
    fn test_error_view_links_to_selected_releases_page() {
        let (mut state, generation, catalog) = mounted();
        state.apply_releases(generation, Err("GitHub API request failed: 404 Not Found".into()));

        let view = PageView::new(&state, &catalog, &Links::default());
        assert_eq!(
            view.releases,
            ReleaseListView::Error {
                message: "GitHub API request failed: 404 Not Found".into(),
                releases_url: "https://github.com/ArTeamTech/ArLibs/releases".into(),
            }
        );
    }

    #[test]
    fn test_empty_list_is_empty_view_not_error() {
        let (mut state, generation, catalog) = mounted();
        state.set_channel(Channel::All);
        state.apply_releases(generation, Ok(vec![]));

        let view = PageView::new(&state, &catalog, &Links::default());
        assert_eq!(
            view.releases,
            ReleaseListView::Empty {
                repo_url: "https://github.com/ArTeamTech/ArLibs".into()
            }
        );
    }

    #[test]
    fn test_filtered_out_releases_show_empty_view() {
        let (mut state, generation, catalog) = mounted();
        state.apply_releases(
            generation,
            Ok(vec![Release {
                tag: "v1-beta".into(),
                prerelease: true,
                ..Default::default()
            }]),
        );

        let view = PageView::new(&state, &catalog, &Links::default());
        assert!(matches!(view.releases, ReleaseListView::Empty { .. }));
    }

    #[test]
    fn test_release_card_lists_only_jars() {
        let release = Release {
            id: 1,
            tag: "v1.0.0".into(),
            published_at: Some("2024-02-01T10:00:00Z".into()),
            html_url: "https://github.com/ArTeamTech/ArLibs/releases/tag/v1.0.0".into(),
            zipball_url: "https://api.github.com/zip".into(),
            assets: vec![asset(1, "foo.jar"), asset(2, "foo.zip"), asset(3, "notes.txt")],
            ..Default::default()
        };

        let card = ReleaseCard::from(&release);
        assert_eq!(card.title, "v1.0.0");
        assert_eq!(card.date, "2024-02-01");
        assert_eq!(card.badge, Badge::Stable);
        assert_eq!(
            card.downloads,
            Downloads::Files {
                files: vec![FileEntry {
                    id: 1,
                    name: "foo.jar".into(),
                    size: "1.00 MB".into(),
                    url: "https://dl.example.com/foo.jar".into(),
                }]
            }
        );
    }

    #[test]
    fn test_release_card_without_jars_offers_source_archive() {
        let release = Release {
            tag: "v0.1.0".into(),
            prerelease: true,
            zipball_url: "https://api.github.com/repos/ArTeamTech/ArLibs/zipball/v0.1.0".into(),
            assets: vec![asset(2, "foo.zip")],
            ..Default::default()
        };

        let card = ReleaseCard::from(&release);
        assert_eq!(card.badge, Badge::Preview);
        assert_eq!(
            card.downloads,
            Downloads::SourceArchive {
                url: "https://api.github.com/repos/ArTeamTech/ArLibs/zipball/v0.1.0".into()
            }
        );
    }

    #[test]
    fn test_build_panel_views() {
        let (mut state, _, catalog) = mounted();
        let links = Links::default();
        let actions_url = "https://github.com/ArTeamTech/ArLibs/actions".to_string();

        let ticket = state.expand_builds().unwrap();
        assert_eq!(
            PageView::new(&state, &catalog, &links).builds,
            BuildPanelView::Loading {
                actions_url: actions_url.clone()
            }
        );

        state.apply_builds(ticket.generation, Ok(vec![]));
        assert_eq!(
            PageView::new(&state, &catalog, &links).builds,
            BuildPanelView::Notice {
                message: NO_BUILDS_MESSAGE.into(),
                actions_url: actions_url.clone()
            }
        );

        let ticket = state.refresh_builds();
        state.apply_builds(ticket.generation, Err("403".into()));
        assert_eq!(
            PageView::new(&state, &catalog, &links).builds,
            BuildPanelView::Warning {
                message: BUILDS_UNAVAILABLE_MESSAGE.into(),
                actions_url: actions_url.clone()
            }
        );

        let ticket = state.refresh_builds();
        state.apply_builds(
            ticket.generation,
            Ok(vec![Build {
                id: 5,
                name: "Build".into(),
                number: 42,
                branch: "main".into(),
                created_at: Some("2024-03-02T08:00:00Z".into()),
                status: BuildStatus::Failure,
                url: "https://github.com/ArTeamTech/ArLibs/actions/runs/5".into(),
            }]),
        );
        match PageView::new(&state, &catalog, &links).builds {
            BuildPanelView::Ready { builds, .. } => {
                assert_eq!(builds[0].title, "Build #42");
                assert_eq!(builds[0].date, "2024-03-02");
                assert_eq!(builds[0].status_label, "build failed");
            }
            other => panic!("Expected ready panel, got {:?}", other),
        }
    }

    #[test]
    fn test_view_serializes_tagged_states() {
        let (state, _, catalog) = mounted();
        let view = PageView::new(&state, &catalog, &Links::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["releases"]["state"], "loading");
        assert_eq!(json["builds"]["state"], "collapsed");
        assert_eq!(json["channel"], "stable");
    }
}

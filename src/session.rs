//! Async driver around [`PageState`].
//!
//! The session is the only owner of the page state. Fetches run as spawned
//! tasks and report back over a channel; the session applies each completion,
//! drops the stale ones, and publishes a fresh [`PageView`] to subscribers
//! after every change.

use anyhow::Result;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::browser::{FetchTicket, Links, PageState, PageView, derive::recent_builds};
use crate::catalog::Catalog;
use crate::domain::model::{Channel, Release, WorkflowRun};
use crate::source::{ReleaseSource, RepoId};

/// A user interaction with the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectPlugin(String),
    SetChannel(Channel),
    ExpandBuilds,
    RefreshBuilds,
}

#[derive(Debug)]
enum Completion {
    Releases {
        generation: u64,
        result: Result<Vec<Release>, String>,
    },
    Builds {
        generation: u64,
        repo: RepoId,
        result: Result<Vec<WorkflowRun>, String>,
    },
}

pub struct Session<S: ReleaseSource + 'static> {
    source: Arc<S>,
    catalog: Catalog,
    links: Links,
    state: PageState,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    view: watch::Sender<PageView>,
}

impl<S: ReleaseSource + 'static> Session<S> {
    /// Mounts the page with `initial` selected, or the catalog's default
    /// plugin, and starts fetching its releases.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(source: S, catalog: Catalog, links: Links, initial: Option<&str>) -> Result<Self> {
        let plugin = match initial {
            Some(id) => catalog.selectable(id)?.clone(),
            None => catalog.default_plugin().clone(),
        };

        let (state, ticket) = PageState::mount(&plugin);
        let (tx, rx) = mpsc::unbounded_channel();
        let (view, _) = watch::channel(PageView::new(&state, &catalog, &links));

        let session = Self {
            source: Arc::new(source),
            catalog,
            links,
            state,
            tx,
            rx,
            view,
        };
        session.spawn_releases(ticket);
        Ok(session)
    }

    /// Subscribes to view updates. The receiver always holds the latest view.
    pub fn subscribe(&self) -> watch::Receiver<PageView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> PageView {
        self.view.borrow().clone()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Applies a user action, spawning whatever fetches it needs.
    ///
    /// Selecting an unknown or disabled plugin is an error and leaves the
    /// page untouched. Selecting the current plugin again does nothing.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!("Dispatching {:?}", action);
        match action {
            Action::SelectPlugin(id) => {
                let plugin = self.catalog.selectable(&id)?.clone();
                if plugin.id == self.state.selected().id {
                    debug!("Plugin {} is already selected", plugin.id);
                    return Ok(());
                }
                let switch = self.state.select_plugin(&plugin);
                self.spawn_releases(switch.releases);
                if let Some(ticket) = switch.builds {
                    self.spawn_builds(ticket);
                }
            }
            Action::SetChannel(channel) => self.state.set_channel(channel),
            Action::ExpandBuilds => {
                if let Some(ticket) = self.state.expand_builds() {
                    self.spawn_builds(ticket);
                }
            }
            Action::RefreshBuilds => {
                let ticket = self.state.refresh_builds();
                self.spawn_builds(ticket);
            }
        }
        self.publish();
        Ok(())
    }

    /// Waits for the next fetch to complete and applies it. Returns whether
    /// the page changed; stale completions return `false`.
    pub async fn next(&mut self) -> bool {
        let Some(completion) = self.rx.recv().await else {
            return false;
        };

        let applied = match completion {
            Completion::Releases { generation, result } => {
                self.state.apply_releases(generation, result)
            }
            Completion::Builds {
                generation,
                repo,
                result,
            } => {
                let result = result.map(|runs| recent_builds(&runs, &repo, &self.links));
                self.state.apply_builds(generation, result)
            }
        };

        if applied {
            self.publish();
        }
        applied
    }

    /// Processes completions until no fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.state.is_busy() {
            self.next().await;
        }
    }

    fn publish(&self) {
        self.view
            .send_replace(PageView::new(&self.state, &self.catalog, &self.links));
    }

    fn spawn_releases(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            debug!("Fetching releases of {} from {}", ticket.plugin, ticket.repo);
            let repo = ticket.repo.clone();
            let fetch = tokio::spawn(async move { source.get_releases(&repo).await });
            let result = join_fetch(fetch, "releases", &ticket.repo).await;
            let _ = tx.send(Completion::Releases {
                generation: ticket.generation,
                result,
            });
        });
    }

    fn spawn_builds(&self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            debug!("Fetching builds of {} from {}", ticket.plugin, ticket.repo);
            let repo = ticket.repo.clone();
            let fetch = tokio::spawn(async move { source.get_workflow_runs(&repo).await });
            let result = join_fetch(fetch, "builds", &ticket.repo).await;
            let _ = tx.send(Completion::Builds {
                generation: ticket.generation,
                repo: ticket.repo,
                result,
            });
        });
    }
}

/// Awaits a fetch task. A task that panicked or was cancelled still yields a
/// failure, so every issued ticket gets exactly one completion.
async fn join_fetch<T>(fetch: JoinHandle<Result<T>>, what: &str, repo: &RepoId) -> Result<T, String> {
    match fetch.await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!("Failed to fetch {} for {}: {:#}", what, repo, e);
            Err(format!("{:#}", e))
        }
        Err(e) => {
            warn!("Fetch task for {} of {} did not complete: {}", what, repo, e);
            Err(format!("Fetch task failed: {}", e))
        }
    }
}

//! Release browser core: page state, pure derivations and view models.

pub mod derive;
mod links;
mod state;
mod view;

pub use links::{DEFAULT_WEB_URL, Links};
pub use state::{BuildNotice, BuildPanel, FetchTicket, PageState, PluginSwitch};
pub use view::{
    BUILDS_UNAVAILABLE_MESSAGE, Badge, BuildEntry, BuildPanelView, Downloads, FileEntry,
    NO_BUILDS_MESSAGE, PageView, PluginTab, ReleaseCard, ReleaseListView,
};

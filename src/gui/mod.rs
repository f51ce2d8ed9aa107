//! GUI module - Dashboard window components

mod app;
mod card_viewer;
mod summary_panel;

pub use app::WishlistApp;
pub use card_viewer::CardViewer;
pub use summary_panel::{SummaryPanel, SummaryPanelAction};

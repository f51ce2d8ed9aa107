//! Wishlist Dashboard Main Application
//! Main window with the summary panel and the card list.

use crate::cards::CardRenderer;
use crate::config::AppConfig;
use crate::data::{DataProcessor, SortCriterion, Table, WishlistLoader};
use crate::gui::{CardViewer, SummaryPanel, SummaryPanelAction};
use crate::stats::{MetricsCalculator, MetricsError};
use egui::{Color32, RichText};
use log::{debug, error, info};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

const SORT_STORAGE_KEY: &str = "wishlist_sort";

/// Sheet loading result from background thread
enum LoadResult {
    Complete(Table),
    Error(String),
}

/// What the central panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Failed(String),
    /// Loaded successfully, nothing left unpurchased.
    Empty,
    Ready,
}

/// Main application window.
pub struct WishlistApp {
    config: AppConfig,
    summary_panel: SummaryPanel,
    card_viewer: CardViewer,
    /// Efficiency-rank order, as loaded.
    table: Table,
    state: ViewState,

    // Async sheet loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl WishlistApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let sort = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SORT_STORAGE_KEY))
            .unwrap_or_default();

        let mut app = Self::with_sort(config, sort);
        app.start_load();
        app
    }

    fn with_sort(config: AppConfig, sort: SortCriterion) -> Self {
        Self {
            summary_panel: SummaryPanel::new(config.title.clone(), sort),
            card_viewer: CardViewer::new(),
            table: Table::default(),
            state: ViewState::Loading,
            load_rx: None,
            config,
        }
    }

    /// Fetch the sheet in a background thread; every reload starts from scratch.
    fn start_load(&mut self) {
        if self.load_rx.is_some() {
            return; // Already loading
        }

        self.state = ViewState::Loading;
        self.summary_panel.reload_enabled = false;
        self.summary_panel.set_status("Loading wishlist...");

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let sheets_url = self.config.sheets_url.clone();
        thread::spawn(move || {
            let loader = WishlistLoader::new(sheets_url);
            debug!("Loading wishlist from {}", loader.sheets_url());
            let result = match loader.load() {
                Ok(table) => LoadResult::Complete(table),
                Err(e) => {
                    error!("Failed to load wishlist: {}", e);
                    LoadResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for sheet loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => self.handle_load_result(result),
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.handle_load_result(LoadResult::Error(
                    "Loader stopped without a result".to_string(),
                ));
            }
        }
    }

    fn handle_load_result(&mut self, result: LoadResult) {
        self.summary_panel.reload_enabled = true;

        match result {
            LoadResult::Complete(table) => {
                match MetricsCalculator::compute_metrics(&table) {
                    Ok(metrics) => {
                        self.summary_panel
                            .set_status(&format!("Loaded {} items", metrics.count_of_items));
                        self.summary_panel.set_metrics(Some(metrics));
                        self.state = ViewState::Ready;
                    }
                    Err(MetricsError::EmptyTable) => {
                        self.summary_panel.set_status("Loaded 0 items");
                        self.summary_panel.set_metrics(None);
                        self.state = ViewState::Empty;
                    }
                }
                self.table = table;
                info!("Wishlist ready with {} items", self.table.len());
            }
            LoadResult::Error(error) => {
                self.summary_panel.set_status(&format!("Error: {}", error));
                self.summary_panel.set_metrics(None);
                self.table = Table::default();
                self.state = ViewState::Failed(error);
            }
        }

        self.refresh_cards();
    }

    /// Re-render cards in the selected order
    fn refresh_cards(&mut self) {
        if self.table.is_empty() {
            self.card_viewer.clear();
            return;
        }

        let sorted = DataProcessor::apply_sort(&self.table, self.summary_panel.sort);
        self.card_viewer.set_cards(CardRenderer::render(&sorted));
    }

    fn show_central(&self, ui: &mut egui::Ui) {
        match &self.state {
            ViewState::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
            ViewState::Failed(error) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(
                        RichText::new("⚠ Could not load the wishlist")
                            .size(20.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).size(13.0));
                });
            }
            ViewState::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No items on the wishlist").size(20.0));
                });
            }
            ViewState::Ready => self.card_viewer.show(ui),
        }
    }
}

impl eframe::App for WishlistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("summary_panel").show(ctx, |ui| {
            match self.summary_panel.show(ui) {
                SummaryPanelAction::Reload => {
                    info!("Reloading wishlist");
                    self.start_load();
                }
                SummaryPanelAction::SortChanged => {
                    debug!("Sort changed to {:?}", self.summary_panel.sort);
                    self.refresh_cards();
                }
                SummaryPanelAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_central(ui);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SORT_STORAGE_KEY, &self.summary_panel.sort);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_item;
    use rust_decimal::Decimal;

    fn app(sort: SortCriterion) -> WishlistApp {
        let config = AppConfig {
            sheets_url: "http://127.0.0.1:1/d/x/edit#gid=0".to_string(),
            title: "Wishlist".to_string(),
        };
        WishlistApp::with_sort(config, sort)
    }

    fn table() -> Table {
        let mut cheap = sample_item("Cheap", Decimal::new(500, 2), 2.0);
        cheap.want = Some(3);
        let mut wanted = sample_item("Wanted", Decimal::new(9000, 2), 1.0);
        wanted.want = Some(10);
        Table::new(vec![wanted, cheap])
    }

    fn labels(app: &WishlistApp) -> Vec<&str> {
        app.card_viewer.cards.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn loaded_table_becomes_ready_with_metrics() {
        let mut app = app(SortCriterion::EfficiencyRank);
        app.handle_load_result(LoadResult::Complete(table()));

        assert_eq!(app.state, ViewState::Ready);
        assert!(app.summary_panel.reload_enabled);
        let metrics = app.summary_panel.metrics.as_ref().unwrap();
        assert_eq!(metrics.count_of_items, 2);
        assert_eq!(metrics.most_efficient_item, "Wanted");
        assert_eq!(labels(&app), vec!["1. Wanted | $90", "2. Cheap | $5"]);
    }

    #[test]
    fn empty_load_is_distinct_from_failure() {
        let mut app = app(SortCriterion::EfficiencyRank);
        app.handle_load_result(LoadResult::Complete(Table::default()));
        assert_eq!(app.state, ViewState::Empty);
        assert!(app.summary_panel.metrics.is_none());

        app.handle_load_result(LoadResult::Error("Data source error: boom".to_string()));
        assert_eq!(
            app.state,
            ViewState::Failed("Data source error: boom".to_string())
        );
        assert!(app.summary_panel.status.starts_with("Error"));
    }

    #[test]
    fn failure_clears_previous_cards() {
        let mut app = app(SortCriterion::EfficiencyRank);
        app.handle_load_result(LoadResult::Complete(table()));
        app.handle_load_result(LoadResult::Error("down".to_string()));
        assert!(app.card_viewer.cards.is_empty());
        assert!(app.table.is_empty());
    }

    #[test]
    fn sort_change_reorders_cards_but_not_the_table() {
        let mut app = app(SortCriterion::EfficiencyRank);
        app.handle_load_result(LoadResult::Complete(table()));

        app.summary_panel.sort = SortCriterion::Amount;
        app.refresh_cards();

        assert_eq!(labels(&app), vec!["1. Cheap | $5", "2. Wanted | $90"]);
        assert_eq!(app.table.items()[0].item, "Wanted");
    }

    #[test]
    fn stored_sort_applies_to_first_render() {
        let mut app = app(SortCriterion::WantRating);
        app.handle_load_result(LoadResult::Complete(table()));
        assert_eq!(labels(&app)[0], "1. Wanted | $90");
    }
}

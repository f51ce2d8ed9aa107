//! Summary Panel Widget
//! Top panel with the title, metric tiles, sort selector and reload control.

use crate::data::SortCriterion;
use crate::stats::WishlistMetrics;
use egui::{Color32, ComboBox, RichText};

const TILE_WIDTH: f32 = 170.0;

/// Top panel state.
pub struct SummaryPanel {
    pub title: String,
    pub sort: SortCriterion,
    pub metrics: Option<WishlistMetrics>,
    pub status: String,
    pub reload_enabled: bool,
}

impl SummaryPanel {
    pub fn new(title: impl Into<String>, sort: SortCriterion) -> Self {
        Self {
            title: title.into(),
            sort,
            metrics: None,
            status: "Loading...".to_string(),
            reload_enabled: false,
        }
    }

    pub fn set_metrics(&mut self, metrics: Option<WishlistMetrics>) {
        self.metrics = metrics;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> SummaryPanelAction {
        let mut action = SummaryPanelAction::None;

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(self.reload_enabled, |ui| {
                if ui.button("⟳ Reload").clicked() {
                    action = SummaryPanelAction::Reload;
                }
            });

            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{} | 🎁", self.title))
                        .size(22.0)
                        .strong(),
                );
            });
        });
        ui.separator();
        ui.add_space(5.0);

        // ===== Metrics =====
        ui.horizontal(|ui| match &self.metrics {
            Some(metrics) => {
                Self::metric_tile(ui, "Count of items", &metrics.count_label());
                Self::metric_tile(ui, "Sum of all items", &metrics.sum_label());
                Self::metric_tile(ui, "Cheapest item", &metrics.cheapest_label());
                Self::metric_tile(ui, "Most expensive item", &metrics.expensive_label());
                Self::metric_tile(ui, "Most efficient item", &metrics.most_efficient_item);
            }
            None => {
                for label in [
                    "Count of items",
                    "Sum of all items",
                    "Cheapest item",
                    "Most expensive item",
                ] {
                    Self::metric_tile(ui, label, "-");
                }
            }
        });

        ui.add_space(8.0);

        // ===== Sort =====
        // Labelled "Filter..." on purpose: it only reorders the cards.
        ui.horizontal(|ui| {
            ui.label("Filter...");
            ComboBox::from_id_salt("sort_criterion")
                .width(160.0)
                .selected_text(self.sort.label())
                .show_ui(ui, |ui| {
                    for criterion in SortCriterion::ALL {
                        if ui
                            .selectable_label(self.sort == criterion, criterion.label())
                            .clicked()
                            && self.sort != criterion
                        {
                            self.sort = criterion;
                            action = SummaryPanelAction::SortChanged;
                        }
                    }
                });
        });
        ui.add_space(5.0);

        action
    }

    fn metric_tile(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(TILE_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(20.0).strong());
                });
            });
    }
}

/// Actions triggered by the summary panel
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryPanelAction {
    None,
    Reload,
    SortChanged,
}

//! Card Viewer Widget
//! Scrollable list of collapsible wishlist cards.

use crate::cards::DisplayCard;
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 6.0;

/// Scrollable card list in the current sort order.
#[derive(Default)]
pub struct CardViewer {
    pub cards: Vec<DisplayCard>,
}

impl CardViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cards(&mut self, cards: Vec<DisplayCard>) {
        self.cards = cards;
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Draw all cards
    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for card in &self.cards {
                    Self::draw_card(ui, card);
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, card: &DisplayCard) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::CollapsingHeader::new(RichText::new(&card.label).size(15.0).strong())
                    .id_salt(("wishlist_card", &card.label))
                    .default_open(false)
                    .show(ui, |ui| {
                        egui::Grid::new(("card_fields", card.index))
                            .num_columns(2)
                            .spacing([16.0, 4.0])
                            .show(ui, |ui| {
                                for field in &card.fields {
                                    ui.label(RichText::new(field.name).color(Color32::GRAY));
                                    if field.name == "Link" {
                                        Self::draw_link(ui, card.link.as_deref(), &field.value);
                                    } else {
                                        ui.label(&field.value);
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }

    fn draw_link(ui: &mut egui::Ui, link: Option<&str>, text: &str) {
        let Some(url) = link else {
            ui.label(text);
            return;
        };

        if ui.link(text).clicked() {
            if let Err(e) = open::that(url) {
                log::warn!("Failed to open link {}: {}", url, e);
            }
        }
    }
}

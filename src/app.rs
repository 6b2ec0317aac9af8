use std::sync::mpsc;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::config::AppConfig;
use crate::profile;
use crate::state::AppState;
use crate::ui::{list, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CoffeeCompassApp {
    pub state: AppState,
    /// Delivers the avatar once the startup fetch finishes.
    avatar_rx: Option<mpsc::Receiver<Option<Vec<u8>>>>,
}

impl CoffeeCompassApp {
    pub fn new(config: AppConfig) -> Self {
        let avatar_rx = Some(profile::spawn_avatar_fetch(config.github_username.clone()));
        let mut state = AppState::new(config);

        let dataset_path = state.config.dataset_path.clone();
        if dataset_path.exists() {
            state.load_from_path(&dataset_path);
        } else {
            log::info!(
                "no dataset at {}, waiting for File → Open",
                dataset_path.display()
            );
        }

        Self { state, avatar_rx }
    }

    fn poll_avatar(&mut self) {
        let Some(rx) = &self.avatar_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.state.avatar = result.map(std::sync::Arc::from);
                self.avatar_rx = None;
            }
            Err(mpsc::TryRecvError::Disconnected) => self.avatar_rx = None,
            Err(mpsc::TryRecvError::Empty) => {}
        }
    }

    fn central_panel(&mut self, ui: &mut Ui) {
        match &self.state.dataset {
            None => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to see recommendations  (File → Open…)");
                });
                return;
            }
            Some(ds) if ds.is_empty() => {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("The dataset contains no shops.");
                });
                return;
            }
            Some(_) => {}
        }

        ui.heading(format!(
            "Top Recommendations for: {}",
            self.state.persona.label()
        ));
        ui.label(format!(
            "Displaying {} coffee shops that match your criteria.",
            self.state.ranked.len()
        ));
        ui.separator();

        if self.state.ranked.is_empty() {
            ui.label(
                RichText::new(
                    "No coffee shops match your current filters. Try adjusting the criteria.",
                )
                .color(ui.visuals().warn_fg_color),
            );
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                ui.strong("Location Map");
                map::location_map(ui, &self.state);
                ui.separator();

                ui.strong("Detailed List");
                list::ranked_list(ui, &self.state);
            });
    }
}

impl eframe::App for CoffeeCompassApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_avatar();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters and branding ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: map and ranked list ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui);
        });
    }
}

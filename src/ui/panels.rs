use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Persona};

// ---------------------------------------------------------------------------
// Left side panel – filters and branding
// ---------------------------------------------------------------------------

const AUTHOR_NAME: &str = "Ricardo Augusto";
const LINKEDIN_URL: &str = "https://linkedin.com/in/ricardo-yan-augusto-003516308/";
const PROJECT_URL: &str = "https://github.com/ricardoaugusto31/yogyakarta-coffee-shop-analysis";

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Your Preferences");
    ui.separator();

    // ---- Persona selector ----
    ui.strong("Select your main need:");
    let current = state.persona;
    egui::ComboBox::from_id_salt("persona")
        .selected_text(current.label())
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            for persona in Persona::ALL {
                if ui
                    .selectable_label(current == persona, persona.label())
                    .clicked()
                {
                    state.set_persona(persona);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Threshold sliders ----
    ui.strong("Minimum star rating:");
    ui.add(
        egui::Slider::new(&mut state.criteria.min_rating, 4.0..=5.0)
            .step_by(0.1)
            .fixed_decimals(1),
    );
    ui.add_space(4.0);

    ui.strong("Minimum number of reviews:");
    ui.add(egui::Slider::new(&mut state.criteria.min_reviews, 0..=1000).step_by(10.0));

    ui.separator();
    about_block(ui, state);

    // Recompute the ranking after any widget changes.
    state.refilter();
}

/// Project blurb, avatar, and author links at the bottom of the sidebar.
fn about_block(ui: &mut Ui, state: &AppState) {
    ui.heading("About This Project");
    ui.label(
        "Recommendations come from a scored dataset distilled from thousands \
         of Google Maps reviews.",
    );
    ui.hyperlink_to("Data analysis project", PROJECT_URL);
    ui.add_space(8.0);

    ui.heading("Created by");
    if let Some(bytes) = &state.avatar {
        ui.add(
            egui::Image::from_bytes("bytes://avatar", egui::load::Bytes::from(bytes.clone()))
                .max_width(100.0)
                .rounding(4.0),
        );
    }
    ui.strong(AUTHOR_NAME);
    ui.hyperlink_to(
        "GitHub",
        format!("https://github.com/{}", state.config.github_username),
    );
    ui.hyperlink_to("LinkedIn", LINKEDIN_URL);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let path = state.config.dataset_path.clone();
                state.load_from_path(&path);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} shops loaded, {} match",
                ds.len(),
                state.ranked.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open coffee shop dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}

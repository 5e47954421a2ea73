//! The booking tab: search, selection, confirmation, QR display, scan
//! prompt, and the payment acknowledgment.

use eframe::egui;

use cab_core::session::{PaymentMode, RidePhase};

use crate::app::CabApp;

pub fn render_ride_tab(ui: &mut egui::Ui, app: &mut CabApp) {
    ui.heading("Cab Booking");

    render_notice(ui, app);

    ui.label("Enter pickup location:");
    ui.text_edit_singleline(&mut app.pickup_entry);
    if ui.button("Search Drivers").clicked() {
        app.search_drivers();
    }

    ui.add_space(8.0);
    render_match_list(ui, app);
    render_driver_details(ui, app);
    render_qr_section(ui, app);
    render_payment_section(ui, app);
}

fn render_notice(ui: &mut egui::Ui, app: &mut CabApp) {
    let Some(notice) = app.notice.clone() else {
        return;
    };
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(notice.title).strong());
            ui.label(&notice.message);
            if ui.small_button("Dismiss").clicked() {
                app.notice = None;
            }
        });
    });
}

fn render_match_list(ui: &mut egui::Ui, app: &mut CabApp) {
    let labels: Vec<String> = app
        .session
        .matches()
        .iter()
        .enumerate()
        .map(|(index, driver)| {
            format!(
                "{}. {} (ETA: {} mins, Fare: ${})",
                index + 1,
                driver.name,
                driver.eta_minutes,
                driver.base_fare
            )
        })
        .collect();

    if !labels.is_empty() {
        egui::ComboBox::from_label("Available drivers")
            .selected_text(
                labels
                    .get(app.pending_choice)
                    .cloned()
                    .unwrap_or_else(|| "Select a driver".to_string()),
            )
            .show_ui(ui, |ui| {
                for (index, label) in labels.iter().enumerate() {
                    ui.selectable_value(&mut app.pending_choice, index, label);
                }
            });
    }

    let can_confirm = matches!(
        app.session.phase(),
        RidePhase::Idle | RidePhase::Selected
    );
    if ui
        .add_enabled(can_confirm, egui::Button::new("Confirm Ride"))
        .clicked()
    {
        app.confirm_ride_requested();
    }
}

fn render_driver_details(ui: &mut egui::Ui, app: &mut CabApp) {
    if app.session.phase() != RidePhase::Selected {
        return;
    }
    let Some(driver) = app.session.selected_driver().cloned() else {
        return;
    };
    ui.group(|ui| {
        ui.heading("Driver Details");
        ui.label(format!("Name: {}", driver.name));
        ui.label(format!("Rating: {}", driver.rating));
        ui.label(format!(
            "Estimated Time of Arrival: {} minutes",
            driver.eta_minutes
        ));
        ui.label(format!("Fare: ${}", driver.base_fare));
        ui.label(format!("Contact Number: {}", driver.contact_number));
        ui.label(format!("Location: {}", driver.location));

        ui.label("Do you want to confirm this ride?");
        ui.horizontal(|ui| {
            if ui.button("Yes").clicked() {
                app.confirm_ride(true);
            }
            if ui.button("No").clicked() {
                app.confirm_ride(false);
            }
        });
    });
}

fn render_qr_section(ui: &mut egui::Ui, app: &mut CabApp) {
    // Texture upload is deferred to the first frame after confirmation.
    let pending_image = match (&app.qr_texture, app.session.artifact()) {
        (None, Some(artifact)) => Some(egui::ColorImage::from_gray(
            [artifact.width() as usize, artifact.height() as usize],
            artifact.luma_pixels(),
        )),
        _ => None,
    };
    if let Some(image) = pending_image {
        app.qr_texture = Some(ui.ctx().load_texture(
            "qr_code",
            image,
            egui::TextureOptions::NEAREST,
        ));
    }

    if let Some(texture) = &app.qr_texture {
        ui.add_space(8.0);
        ui.add(egui::Image::new((texture.id(), texture.size_vec2())));
    }

    let scan_enabled = app.session.scan_enabled();
    if ui
        .add_enabled(scan_enabled, egui::Button::new("Scanned"))
        .clicked()
    {
        app.scan_prompt_open = true;
    }
    if app.scan_prompt_open && scan_enabled {
        ui.horizontal(|ui| {
            ui.label("Have you scanned the QR code?");
            if ui.button("Yes").clicked() {
                app.acknowledge_scan(true);
            }
            if ui.button("No").clicked() {
                app.acknowledge_scan(false);
            }
        });
    }
}

fn render_payment_section(ui: &mut egui::Ui, app: &mut CabApp) {
    if app.session.phase() != RidePhase::Completed {
        return;
    }
    ui.add_space(8.0);
    ui.group(|ui| {
        ui.label("Select Payment Mode:");
        egui::ComboBox::from_id_salt("payment_mode")
            .selected_text(app.payment_choice.label())
            .show_ui(ui, |ui| {
                for mode in PaymentMode::ALL {
                    ui.selectable_value(&mut app.payment_choice, mode, mode.label());
                }
            });
        if ui.button("OK").clicked() {
            app.acknowledge_payment();
        }
        if let Some(mode) = app.session.payment() {
            ui.label(format!("Selected Payment Mode: {mode}"));
        }
    });
}

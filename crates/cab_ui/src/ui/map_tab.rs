//! The map tab: address entry, background build, an egui preview of the
//! route and offers, and export of the HTML document.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Vec2};

use cab_core::geocode::GeoPoint;

use crate::app::CabApp;

const PREVIEW_HEIGHT: f32 = 280.0;

pub fn render_map_tab(ui: &mut egui::Ui, app: &mut CabApp) {
    ui.heading("Route Map");

    ui.horizontal(|ui| {
        ui.label("Pickup address:");
        ui.text_edit_singleline(&mut app.pickup_address);
    });
    ui.horizontal(|ui| {
        ui.label("Destination address:");
        ui.text_edit_singleline(&mut app.destination_address);
    });
    ui.horizontal(|ui| {
        let idle = app.map_job.is_none();
        if ui
            .add_enabled(idle, egui::Button::new("Build Map"))
            .clicked()
        {
            app.request_map_build();
        }
        if !idle {
            ui.spinner();
            ui.label("Resolving addresses...");
        }
    });

    if let Some(error) = &app.map_error {
        ui.colored_label(Color32::from_rgb(200, 80, 80), error);
    }

    let mut save_clicked = false;
    if let Some(scene) = &app.map_scene {
        ui.add_space(8.0);
        ui.label(format!("Route distance: {:.2} km", scene.route.distance_km()));

        let (rect, _) = ui.allocate_exact_size(
            Vec2::new(ui.available_width(), PREVIEW_HEIGHT),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_gray(20));
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, Color32::from_gray(60)),
            egui::StrokeKind::Middle,
        );

        let mut points = vec![scene.route.pickup, scene.route.destination];
        points.extend(scene.offers.iter().map(|offer| offer.position));
        if let Some(bounds) = PreviewBounds::around(&points) {
            let pickup = bounds.project(scene.route.pickup, rect);
            let destination = bounds.project(scene.route.destination, rect);
            painter.line_segment(
                [pickup, destination],
                egui::Stroke::new(2.5, Color32::from_rgb(80, 140, 255)),
            );
            draw_point(&painter, pickup, "Pickup", Color32::from_rgb(0, 200, 120));
            draw_point(
                &painter,
                destination,
                "Destination",
                Color32::from_rgb(200, 80, 80),
            );
            for offer in &scene.offers {
                draw_point(
                    &painter,
                    bounds.project(offer.position, rect),
                    offer.shop,
                    Color32::from_rgb(255, 140, 0),
                );
            }
        }

        for offer in &scene.offers {
            ui.label(offer.offer_line());
        }

        if ui.button("Save map document").clicked() {
            save_clicked = true;
        }
        if let Some(path) = &app.saved_document_path {
            ui.label(format!("Map document saved to {path}"));
        }
    }
    if save_clicked {
        app.save_map_document();
    }
}

/// Geographic window framing every preview point, padded so markers stay
/// off the border.
struct PreviewBounds {
    lat_min: f64,
    lat_max: f64,
    lng_min: f64,
    lng_max: f64,
}

impl PreviewBounds {
    fn around(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut lat_min = first.lat;
        let mut lat_max = first.lat;
        let mut lng_min = first.lng;
        let mut lng_max = first.lng;
        for point in &points[1..] {
            lat_min = lat_min.min(point.lat);
            lat_max = lat_max.max(point.lat);
            lng_min = lng_min.min(point.lng);
            lng_max = lng_max.max(point.lng);
        }
        let lat_pad = ((lat_max - lat_min) * 0.2).max(0.0005);
        let lng_pad = ((lng_max - lng_min) * 0.2).max(0.0005);
        Some(Self {
            lat_min: lat_min - lat_pad,
            lat_max: lat_max + lat_pad,
            lng_min: lng_min - lng_pad,
            lng_max: lng_max + lng_pad,
        })
    }

    fn project(&self, point: GeoPoint, rect: egui::Rect) -> Pos2 {
        let x = (point.lng - self.lng_min) / (self.lng_max - self.lng_min);
        let y = (self.lat_max - point.lat) / (self.lat_max - self.lat_min);
        egui::pos2(
            rect.left() + rect.width() * x as f32,
            rect.top() + rect.height() * y as f32,
        )
    }
}

fn draw_point(painter: &egui::Painter, pos: Pos2, label: &str, color: Color32) {
    painter.circle_filled(pos, 4.0, color);
    painter.text(
        pos + Vec2::new(6.0, -6.0),
        Align2::LEFT_TOP,
        label,
        FontId::monospace(9.0),
        color,
    );
}

use std::time::Duration;

use eframe::egui;

use crate::app::{CabApp, Tab};
use crate::ui::{map_tab, ride_tab};

pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Cab Booking App",
        options,
        Box::new(|_cc| Ok(Box::new(CabApp::new()))),
    )
}

impl eframe::App for CabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_map_job();
        if self.map_job.is_some() {
            // Keep polling while the worker is out.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Ride, "Ride App");
                ui.selectable_value(&mut self.tab, Tab::Map, "Map");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Ride => ride_tab::render_ride_tab(ui, self),
            Tab::Map => map_tab::render_map_tab(ui, self),
        });
    }
}

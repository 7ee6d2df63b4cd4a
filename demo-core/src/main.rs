use demo_core::DemoApp;
use eframe::{run_native, NativeOptions};

const APP_NAME: &str = "Roadmap Mind-Map";

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = NativeOptions::default();
    run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok::<Box<dyn eframe::App>, _>(Box::new(DemoApp::new(cc)))),
    )
}

//Exercise starting point: the page renders, the buttons do nothing yet.
use coffee_counter::ui::{self, CoffeeApp, Variant};

fn main() -> iced::Result {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let app = match CoffeeApp::boot(Variant::Start) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build the coffee page: {}", e);
            std::process::exit(1);
        }
    };
    ui::run(Variant::Start, app)
}

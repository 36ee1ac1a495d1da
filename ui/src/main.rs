mod components;

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting shavukha menu");
    dioxus::launch(components::app::App);
}

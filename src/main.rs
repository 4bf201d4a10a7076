mod app;
mod audio;
mod config;
mod library;
mod runtime;
mod session;
mod ui;
mod viewport;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}

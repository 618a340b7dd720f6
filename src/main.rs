mod analytics;
mod archive;
mod config;
mod contact;
mod csrf;
mod date;
mod routes;
mod video;

fn main() {
    dioxus::launch(routes::App);
}

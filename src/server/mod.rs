mod app;
mod run;
mod state;

pub use app::create_app;
pub use run::run;
pub use state::AppState;

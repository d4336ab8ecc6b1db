pub mod health_handler;
pub mod history_handler;
pub mod question_handler;

use actix_web::web;

pub use health_handler::health_check;
pub use history_handler::{clear_history, export_history_entry, get_history_entry, list_history};
pub use question_handler::{export_questions, generate_questions, normalize_questions};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(generate_questions)
        .service(normalize_questions)
        .service(export_questions)
        .service(list_history)
        .service(export_history_entry)
        .service(get_history_entry)
        .service(clear_history);
}

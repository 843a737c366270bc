mod change_reminder_status;
mod create_reminder;
mod delete_reminder;
mod edit_reminder;
pub mod generate_reminder_schedules;
mod list_reminders;
pub mod send_due_reminders;
mod send_sms;
pub mod sync_reminder_schedules;
#[cfg(test)]
mod test_helpers;
mod validation;
mod view_reminder;

use actix_web::web;
use change_reminder_status::change_reminder_status_controller;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use edit_reminder::edit_reminder_controller;
use list_reminders::list_reminders_controller;
use view_reminder::view_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/reminder",
        web::post().to(create_reminder_controller),
    );
    cfg.route(
        "/user/{user_id}/reminders",
        web::get().to(list_reminders_controller),
    );
    cfg.route(
        "/user/{user_id}/reminder/{reminder_id}",
        web::get().to(view_reminder_controller),
    );
    cfg.route(
        "/user/{user_id}/reminder/{reminder_id}",
        web::put().to(edit_reminder_controller),
    );
    cfg.route(
        "/user/{user_id}/reminder/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/user/{user_id}/reminder/{reminder_id}/status/{status}",
        web::put().to(change_reminder_status_controller),
    );
}

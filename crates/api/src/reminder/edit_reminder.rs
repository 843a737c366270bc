use super::{
    generate_reminder_schedules::{
        GenerateReminderSchedulesTrigger, GenerateReminderSchedulesUseCase,
    },
    validation::{
        find_user_reminder, parse_reminder_settings, ReminderInputError, ReminderLookupError,
    },
};
use crate::{
    error::GuardianError,
    shared::{
        actor::get_actor,
        usecase::{execute, UseCase},
    },
    user::{find_user, UserLookupError},
};
use actix_web::{web, HttpRequest, HttpResponse};
use guardian_reminders_api_structs::edit_reminder::*;
use guardian_reminders_domain::{ReminderConfiguration, ID};
use guardian_reminders_infra::GuardianContext;

pub async fn edit_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = EditReminderUseCase {
        user_id: path_params.user_id.clone(),
        reminder_id: path_params.reminder_id.clone(),
        actor: get_actor(&http_req)?,
        input: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(GuardianError::from)
}

/// Replaces the settings of a reminder and reschedules it
#[derive(Debug)]
pub struct EditReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub actor: Option<ID>,
    pub input: RequestBody,
}

#[derive(Debug)]
pub enum UseCaseError {
    User(UserLookupError),
    InvalidInput(ReminderInputError),
    Lookup(ReminderLookupError),
    StorageError,
}

impl From<UseCaseError> for GuardianError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::User(e) => e.into(),
            UseCaseError::InvalidInput(e) => e.into(),
            UseCaseError::Lookup(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EditReminderUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "EditReminder";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let user = find_user(&self.user_id, ctx).await.map_err(UseCaseError::User)?;

        let now = ctx.sys.get_timestamp_millis();
        let settings =
            parse_reminder_settings(&self.input, now).map_err(UseCaseError::InvalidInput)?;

        let mut reminder = find_user_reminder(&user.id, &self.reminder_id, ctx)
            .await
            .map_err(UseCaseError::Lookup)?;
        reminder.update_settings(settings, now);
        ctx.repos
            .reminder_configurations
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .reminder_schedules
            .delete_pending_by_reminder(&reminder.user_id, &reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let generate = GenerateReminderSchedulesUseCase {
            user_id: reminder.user_id.clone(),
            reminder_id: reminder.id.clone(),
            trigger: GenerateReminderSchedulesTrigger::ReminderModified {
                actor: self.actor.clone(),
            },
        };
        execute(generate, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ctx
            .repos
            .reminder_configurations
            .find(&reminder.id)
            .await
            .unwrap_or(reminder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_helpers::{create_reminder, reminder_input, setup_user};
    use guardian_reminders_domain::{date::parse_datetime_millis, ReminderType, User};

    #[actix_web::main]
    #[test]
    async fn reschedules_edited_reminder() {
        let (ctx, user) = setup_user("2024-01-09 12:00:00").await;
        let reminder = create_reminder(&ctx, &user, reminder_input("2024-01-10 09:00:00")).await;

        let mut input = reminder_input("2024-01-12 18:30:00");
        input.reminder_days = None;
        input.reminder_hours = None;
        input.reminder_minutes = Some(30);
        input.text = Some("Curfew check".into());
        let usecase = EditReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
            actor: None,
            input,
        };
        let edited = execute(usecase, &ctx).await.unwrap();
        assert_eq!(edited.settings.text, "Curfew check");

        let mut schedules = ctx
            .repos
            .reminder_schedules
            .find_by_reminder(&reminder.id)
            .await
            .unwrap();
        schedules.sort_by_key(|s| s.date_time);
        let fire_times = schedules
            .iter()
            .map(|s| (s.reminder_type, s.date_time, s.text.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            fire_times,
            vec![
                (
                    ReminderType::MinutesBefore,
                    parse_datetime_millis("2024-01-12 18:00:00").unwrap(),
                    "Curfew check"
                ),
                (
                    ReminderType::Event,
                    parse_datetime_millis("2024-01-12 18:30:00").unwrap(),
                    "Curfew check"
                ),
            ]
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_reminder_of_other_user() {
        let (ctx, user) = setup_user("2024-01-09 12:00:00").await;
        let other_user = User::new("5559876543".into(), 0);
        ctx.repos.users.insert(&other_user).await.unwrap();
        let reminder = create_reminder(&ctx, &user, reminder_input("2024-01-10 09:00:00")).await;

        let usecase = EditReminderUseCase {
            user_id: other_user.id.clone(),
            reminder_id: reminder.id.clone(),
            actor: None,
            input: reminder_input("2024-01-11 09:00:00"),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::Lookup(ReminderLookupError::OtherUser(_)))
        ));

        let usecase = EditReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: ID::default(),
            actor: None,
            input: reminder_input("2024-01-11 09:00:00"),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::Lookup(ReminderLookupError::NotFound(_)))
        ));
    }
}

use super::{
    generate_reminder_schedules::{
        GenerateReminderSchedulesTrigger, GenerateReminderSchedulesUseCase,
    },
    validation::{parse_reminder_settings, ReminderInputError},
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
use guardian_reminders_api_structs::create_reminder::*;
use guardian_reminders_domain::{ReminderConfiguration, ID};
use guardian_reminders_infra::GuardianContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = CreateReminderUseCase {
        user_id: path_params.user_id.clone(),
        actor: get_actor(&http_req)?,
        input: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(GuardianError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    /// The case manager creating the reminder
    pub actor: Option<ID>,
    pub input: RequestBody,
}

#[derive(Debug)]
pub enum UseCaseError {
    User(UserLookupError),
    InvalidInput(ReminderInputError),
    StorageError,
}

impl From<UseCaseError> for GuardianError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::User(e) => e.into(),
            UseCaseError::InvalidInput(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let user = find_user(&self.user_id, ctx).await.map_err(UseCaseError::User)?;

        let now = ctx.sys.get_timestamp_millis();
        let settings =
            parse_reminder_settings(&self.input, now).map_err(UseCaseError::InvalidInput)?;

        let reminder = ReminderConfiguration::new(user.id, self.actor.clone(), settings, now);
        ctx.repos
            .reminder_configurations
            .insert(&reminder)
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
    use crate::reminder::test_helpers::{reminder_input, setup_user};
    use guardian_reminders_domain::{date::parse_datetime_millis, ReminderType};

    #[actix_web::main]
    #[test]
    async fn creates_reminder_and_its_schedules() {
        let (ctx, user) = setup_user("2024-01-09 12:00:00").await;
        let actor = ID::default();

        let usecase = CreateReminderUseCase {
            user_id: user.id.clone(),
            actor: Some(actor.clone()),
            input: reminder_input("2024-01-10 09:00:00"),
        };
        let reminder = execute(usecase, &ctx).await.unwrap();
        assert_eq!(reminder.created_by, Some(actor));
        assert!(reminder.is_active);
        assert_eq!(
            reminder.last_executed_at,
            Some(ctx.sys.get_timestamp_millis())
        );

        let mut schedules = ctx
            .repos
            .reminder_schedules
            .find_by_reminder(&reminder.id)
            .await
            .unwrap();
        schedules.sort_by_key(|s| s.date_time);
        let fire_times = schedules
            .iter()
            .map(|s| (s.reminder_type, s.date_time))
            .collect::<Vec<_>>();
        assert_eq!(
            fire_times,
            vec![
                (
                    ReminderType::DaysBefore,
                    parse_datetime_millis("2024-01-09 09:00:00").unwrap()
                ),
                (
                    ReminderType::HoursBefore,
                    parse_datetime_millis("2024-01-10 07:00:00").unwrap()
                ),
                (
                    ReminderType::Event,
                    parse_datetime_millis("2024-01-10 09:00:00").unwrap()
                ),
            ]
        );
        assert!(schedules.iter().all(|s| !s.is_executed));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_user_before_validating_input() {
        let (ctx, _) = setup_user("2024-01-09 12:00:00").await;

        let usecase = CreateReminderUseCase {
            user_id: ID::default(),
            actor: None,
            input: Default::default(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::User(UserLookupError::NotFound(_)))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn invalid_input_is_not_stored() {
        let (ctx, user) = setup_user("2024-01-09 12:00:00").await;

        let usecase = CreateReminderUseCase {
            user_id: user.id.clone(),
            actor: None,
            input: reminder_input("2024-01-01 09:00:00"),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidInput(ReminderInputError::EventInPast(_)))
        ));
        assert!(ctx
            .repos
            .reminder_configurations
            .find_by_user(&user.id)
            .await
            .is_empty());
    }
}

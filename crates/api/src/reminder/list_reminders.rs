use crate::{
    error::GuardianError,
    shared::usecase::{execute, UseCase},
    user::{find_user, UserLookupError},
};
use actix_web::{web, HttpResponse};
use guardian_reminders_api_structs::list_reminders::*;
use guardian_reminders_domain::{ReminderConfiguration, ReminderListFilter, ID};
use guardian_reminders_infra::GuardianContext;

pub async fn list_reminders_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = ListRemindersUseCase {
        user_id: path_params.user_id.clone(),
        status: query_params.0.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(GuardianError::from)
}

#[derive(Debug)]
pub struct ListRemindersUseCase {
    pub user_id: ID,
    pub status: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    User(UserLookupError),
    InvalidStatus(String),
}

impl From<UseCaseError> for GuardianError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::User(e) => e.into(),
            UseCaseError::InvalidStatus(status) => Self::InvalidReminderStatus(status),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListRemindersUseCase {
    type Response = Vec<ReminderConfiguration>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListReminders";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let user = find_user(&self.user_id, ctx).await.map_err(UseCaseError::User)?;

        let filter = match &self.status {
            Some(status) => status
                .parse::<ReminderListFilter>()
                .map_err(|_| UseCaseError::InvalidStatus(status.clone()))?,
            None => ReminderListFilter::default(),
        };

        let mut reminders = ctx
            .repos
            .reminder_configurations
            .find_by_user(&user.id)
            .await
            .into_iter()
            .filter(|r| r.matches_filter(filter))
            .collect::<Vec<_>>();
        reminders.sort_by_key(|r| r.settings.event_ts);

        Ok(reminders)
    }
}

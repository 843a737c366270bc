use crate::{
    error::GuardianError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use guardian_reminders_api_structs::get_user::*;
use guardian_reminders_domain::{User, ID};
use guardian_reminders_infra::GuardianContext;
use tracing::error;

pub async fn get_user_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = GetUserUseCase {
        user_id: path_params.user_id.clone(),
    };
    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(GuardianError::from)
}

#[derive(Debug, PartialEq)]
pub enum UserLookupError {
    NotFound(ID),
    StorageError,
}

impl From<UserLookupError> for GuardianError {
    fn from(e: UserLookupError) -> Self {
        match e {
            UserLookupError::NotFound(id) => Self::UserNotFound(id),
            UserLookupError::StorageError => Self::InternalError,
        }
    }
}

/// Looks up a `User` that can receive reminders. Deleted users are treated
/// as unknown.
pub async fn find_user(user_id: &ID, ctx: &GuardianContext) -> Result<User, UserLookupError> {
    match ctx.repos.users.find(user_id).await {
        Ok(Some(user)) if !user.is_deleted => Ok(user),
        Ok(_) => Err(UserLookupError::NotFound(user_id.clone())),
        Err(e) => {
            error!("Unable to find user {}. Err: {:?}", user_id, e);
            Err(UserLookupError::StorageError)
        }
    }
}

#[derive(Debug)]
struct GetUserUseCase {
    user_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserUseCase {
    type Response = User;

    type Error = UserLookupError;

    const NAME: &'static str = "GetUser";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        find_user(&self.user_id, ctx).await
    }
}

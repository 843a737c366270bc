use crate::{
    error::GuardianError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use guardian_reminders_api_structs::create_user::*;
use guardian_reminders_domain::User;
use guardian_reminders_infra::GuardianContext;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = CreateUserUseCase {
        cellphone: body.0.cellphone,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(GuardianError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub cellphone: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidCellphone(String),
    StorageError,
}

impl From<UseCaseError> for GuardianError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCellphone(cellphone) => Self::BadClientData(format!(
                "The cellphone: {}, is not a valid phone number",
                cellphone
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let cellphone = User::sanitize_cellphone(&self.cellphone)
            .ok_or_else(|| UseCaseError::InvalidCellphone(self.cellphone.clone()))?;
        let user = User::new(cellphone, ctx.sys.get_timestamp_millis());

        ctx.repos
            .users
            .insert(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}

use guardian_reminders_api::Application;
use guardian_reminders_infra::GuardianContext;
use guardian_reminders_sdk::{GuardianSDK, ID};

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// SDK whose requests are made on behalf of the given case manager
    pub fn sdk_with_actor(&self, actor: ID) -> GuardianSDK {
        GuardianSDK::new_with_actor(self.address.clone(), actor)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, GuardianSDK) {
    let mut ctx = GuardianContext::create_inmemory();
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = GuardianSDK::new(address.clone());
    let app = TestApp { address };
    (app, sdk)
}

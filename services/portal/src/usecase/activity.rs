use chrono::Utc;

use sesmine_domain::activity::UserActivity;
use sesmine_domain::page::Page;
use sesmine_domain::session::Session;

use crate::domain::repository::ActivityRepository;
use crate::error::PortalError;

/// Prepend a visit of `page` by the session's user to the capped log.
pub async fn record_activity<A: ActivityRepository>(
    activities: &A,
    session: &Session,
    page: Page,
) -> Result<(), PortalError> {
    activities
        .record(UserActivity {
            page: page.as_str().to_owned(),
            timestamp: Utc::now(),
            user: session.username.clone(),
        })
        .await
}

pub struct ListActivitiesUseCase<A: ActivityRepository> {
    pub activities: A,
}

impl<A: ActivityRepository> ListActivitiesUseCase<A> {
    pub async fn execute(&self) -> Result<Vec<UserActivity>, PortalError> {
        self.activities.list().await
    }
}

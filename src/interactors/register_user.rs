use super::Interactor;
use crate::storage::{UserStore, UserStoreErrorKind};

use std::sync::Arc;
use tracing::{info, instrument};

pub struct RegisterUser {
    store: Arc<UserStore>,
}

impl RegisterUser {
    pub const fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

pub struct RegisterUserInput {
    pub user_id: i64,
}

impl RegisterUserInput {
    pub const fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

impl Interactor<RegisterUserInput> for &RegisterUser {
    type Output = bool;
    type Err = UserStoreErrorKind;

    #[instrument(skip_all, fields(%user_id))]
    async fn execute(self, RegisterUserInput { user_id }: RegisterUserInput) -> Result<Self::Output, Self::Err> {
        let created = self.store.record(user_id).await?;
        if created {
            info!("User registered");
        }
        Ok(created)
    }
}

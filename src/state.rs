use crate::{
    data::StudentStore,
    error::{OpenDatabaseSnafu, StudentResult},
};
use snafu::ResultExt;
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct AppState {
    store: Arc<dyn StudentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// Must succeed before the listener is bound.
    pub async fn check_database(&self) -> StudentResult<()> {
        self.store.ping().await.context(OpenDatabaseSnafu)
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
        info!("database pool closed");
    }
}

impl Deref for AppState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        &*self.store
    }
}

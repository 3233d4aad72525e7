use actix_cors::Cors;
use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthService, SessionKeys, BCRYPT_COST};
use crate::routes;
use crate::store::{TaskStore, UserStore};
use crate::tasks::TaskService;

/// Shared services handed to every worker.
///
/// The binary and the integration tests both build their `App` through
/// [`AppServices::configure`], so they serve the exact same routes.
#[derive(Clone)]
pub struct AppServices {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
    pub keys: web::Data<SessionKeys>,
}

impl AppServices {
    pub fn new<S>(store: Arc<S>, keys: SessionKeys) -> Self
    where
        S: UserStore + TaskStore + 'static,
    {
        Self::with_hash_cost(store, keys, BCRYPT_COST)
    }

    pub fn with_hash_cost<S>(store: Arc<S>, keys: SessionKeys, hash_cost: u32) -> Self
    where
        S: UserStore + TaskStore + 'static,
    {
        let users: Arc<dyn UserStore> = store.clone();
        let tasks: Arc<dyn TaskStore> = store;

        Self {
            auth: web::Data::new(AuthService::new(users, keys.clone()).with_hash_cost(hash_cost)),
            tasks: web::Data::new(TaskService::new(tasks)),
            keys: web::Data::new(keys),
        }
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.tasks.clone())
            .app_data(self.keys.clone())
            .configure(routes::config);
    }
}

/// CORS policy for the browser client, which may be served from elsewhere.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

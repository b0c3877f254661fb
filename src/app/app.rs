use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::admin_user_conf::AdminUserConfig;
use crate::config::app_conf::AppConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::handler::quotation_handler::QuotationHandlerState;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::middlewares::auth_middleware::AuthState;
use crate::model::user::User;
use crate::repository::client_repo::MongoClientRepository;
use crate::repository::counter_repo::MongoCounterRepository;
use crate::repository::quotation_repo::MongoQuotationRepository;
use crate::repository::settings_repo::MongoSettingsRepository;
use crate::repository::user_repo::{MongoUserRepository, UserRepository};
use crate::router::auth_router::auth_router;
use crate::router::client_router::client_router;
use crate::router::quotation_router::quotation_router;
use crate::router::report_router::report_router;
use crate::router::settings_router::settings_router;
use crate::service::client_service::ClientServiceImpl;
use crate::service::export_service::ExportServiceImpl;
use crate::service::quotation_service::QuotationServiceImpl;
use crate::service::report_service::ReportServiceImpl;
use crate::service::settings_service::SettingsServiceImpl;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::jwt::JwtTokenUtilsImpl;
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

pub struct App {
    config: AppConfig,
    router: Router,
    pub user_service: Arc<UserServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");

        let db = crate::repository::connect(&mongo_config)
            .await
            .expect("MongoDB connection error");

        let user_repo = Arc::new(MongoUserRepository::new(&db));
        let client_repo = Arc::new(MongoClientRepository::new(&db));
        let quotation_repo = Arc::new(MongoQuotationRepository::new(&db));
        let counter_repo = Arc::new(MongoCounterRepository::new(&db));
        let settings_repo = Arc::new(MongoSettingsRepository::new(&db));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        let user_service = Arc::new(UserServiceImpl::new(user_repo.clone(), jwt_utils.clone()));
        let client_service = Arc::new(ClientServiceImpl {
            client_repo: MongoClientRepository::new(&db),
        });
        let quotation_service = Arc::new(QuotationServiceImpl::new(
            quotation_repo.clone(),
            client_repo.clone(),
            counter_repo,
            settings_repo.clone(),
            user_repo,
        ));
        let export_service = Arc::new(ExportServiceImpl::new(
            quotation_repo.clone(),
            client_repo.clone(),
        ));
        let settings_service = Arc::new(SettingsServiceImpl::new(settings_repo));
        let report_service = Arc::new(ReportServiceImpl::new(quotation_repo, client_repo));

        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
        });
        let admin_auth_state = Arc::new(AdminAuthState { jwt_utils });

        let api = Router::new()
            .merge(auth_router(
                user_service.clone(),
                auth_state.clone(),
                admin_auth_state.clone(),
            ))
            .merge(client_router(client_service, auth_state.clone()))
            .merge(quotation_router(
                QuotationHandlerState {
                    quotation_service,
                    export_service,
                },
                auth_state.clone(),
            ))
            .merge(settings_router(settings_service, auth_state.clone(), admin_auth_state))
            .merge(report_router(report_service, auth_state));

        let router = Router::new()
            .nest("/api", api)
            .route("/health", get(|| async { "OK" }));

        let app = App {
            config,
            router,
            user_service,
        };
        app.create_first_admin_user().await;
        app
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }

    /// Bootstraps the first admin account from the `ADMIN_*` env vars.
    /// Skipped when the config is absent or the account already exists.
    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        match self.user_service.user_repo.find_by_email(&admin_conf.email).await {
            Ok(Some(_)) => {
                info!("Admin user already exists, skipping creation.");
                return;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check for existing admin user: {e}");
                return;
            }
        }

        let password = match admin_conf.password.clone() {
            Some(p) => p,
            None => {
                let generated = PasswordUtilsImpl::generate_random_password(16);
                // Logged once so the operator can log in; change it afterwards.
                warn!(
                    "ADMIN_PASSWORD not set, generated password for {}: {}",
                    admin_conf.email, generated
                );
                generated
            }
        };

        let user = User {
            id: None,
            username: admin_conf.username.clone(),
            first_name: admin_conf.first_name.clone(),
            last_name: admin_conf.last_name.clone(),
            email: admin_conf.email.clone(),
            password_hash: String::new(), // Set by register
            role: "admin".to_string(),
            created_at: None,
            updated_at: None,
        };
        match self.user_service.register(user, password).await {
            Ok(_) => info!("First admin user created."),
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}

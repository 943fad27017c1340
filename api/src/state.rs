//! Shared application state: fully wired services over the MySQL
//! repositories.

use std::sync::Arc;

use sb_core::services::otp::SystemClock;
use sb_core::services::{
    AuthService, BookingService, FavoriteService, NotificationService, OtpService, TokenService,
};
use sb_infra::{
    ConfiguredDeliveryGateway, DatabasePool, GoogleApiVerifier, InfrastructureError,
    MySqlBookingRepository, MySqlFavoriteRepository, MySqlNotificationRepository,
    MySqlOtpRepository, MySqlRoomRepository, MySqlUserRepository,
};
use sb_shared::config::AppConfig;

/// OTP service over the production repository and delivery types.
pub type SharedOtpService =
    OtpService<MySqlOtpRepository, MySqlUserRepository, ConfiguredDeliveryGateway, SystemClock>;

/// Auth service over the production types.
pub type SharedAuthService = AuthService<
    MySqlUserRepository,
    MySqlOtpRepository,
    ConfiguredDeliveryGateway,
    SystemClock,
    GoogleApiVerifier,
>;

pub type SharedBookingService =
    BookingService<MySqlBookingRepository, MySqlRoomRepository, MySqlNotificationRepository>;

pub type SharedFavoriteService = FavoriteService<MySqlFavoriteRepository, MySqlRoomRepository>;

pub type SharedNotificationService = NotificationService<MySqlNotificationRepository>;

/// Services shared across request handlers.
pub struct AppState {
    pub auth_service: Arc<SharedAuthService>,
    pub otp_service: Arc<SharedOtpService>,
    pub booking_service: Arc<SharedBookingService>,
    pub favorite_service: Arc<SharedFavoriteService>,
    pub notification_service: Arc<SharedNotificationService>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    /// Wires repositories, gateways and services from configuration.
    pub async fn initialize(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let db = DatabasePool::new(&config.database).await?;
        let pool = db.get_pool().clone();

        let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
        let otp_repo = Arc::new(MySqlOtpRepository::new(pool.clone()));
        let booking_repo = Arc::new(MySqlBookingRepository::new(pool.clone()));
        let room_repo = Arc::new(MySqlRoomRepository::new(pool.clone()));
        let favorite_repo = Arc::new(MySqlFavoriteRepository::new(pool.clone()));
        let notification_repo = Arc::new(MySqlNotificationRepository::new(pool));

        let delivery = Arc::new(ConfiguredDeliveryGateway::from_config(&config.email)?);
        let token_service = Arc::new(TokenService::new(config.jwt.clone()));

        let otp_service = Arc::new(OtpService::new(
            otp_repo.clone(),
            user_repo.clone(),
            delivery,
            Arc::new(SystemClock),
        ));

        let auth_service = Arc::new(AuthService::new(
            user_repo,
            otp_repo,
            otp_service.clone(),
            token_service.clone(),
            Arc::new(GoogleApiVerifier::new()),
        ));

        let booking_service = Arc::new(BookingService::new(
            booking_repo,
            room_repo.clone(),
            notification_repo.clone(),
        ));

        let favorite_service = Arc::new(FavoriteService::new(favorite_repo, room_repo));
        let notification_service = Arc::new(NotificationService::new(notification_repo));

        Ok(Self {
            auth_service,
            otp_service,
            booking_service,
            favorite_service,
            notification_service,
            token_service,
        })
    }
}

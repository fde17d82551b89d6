use dotenv::dotenv;
use std::env;
use tracing_subscriber::fmt;

const GRAVATAR_URL: &str = "https://gravatar.com/avatar";
const UI_AVATARS_URL: &str = "https://ui-avatars.com/api/";

pub struct Settings {
    env: String,
    api_key: String,
    region: String,
    bucket: String,
    endpoint: String,
    storage_external_url: String,
    gravatar_url: String,
    ui_avatars_url: String,
}

pub fn new() -> Settings {
    dotenv().ok();

    let settings = Settings {
        env: env::var("ENV").unwrap(),
        api_key: env::var("API_KEY").unwrap(),
        region: env::var("REGION").unwrap(),
        bucket: env::var("BUCKET").unwrap(),
        endpoint: env::var("ENDPOINT").unwrap(),
        storage_external_url: env::var("STORAGE_EXTERNAL_URL").unwrap(),
        // fixed public services, overridable for local testing
        gravatar_url: env::var("GRAVATAR_URL").unwrap_or_else(|_| GRAVATAR_URL.to_string()),
        ui_avatars_url: env::var("UI_AVATARS_URL").unwrap_or_else(|_| UI_AVATARS_URL.to_string()),
    };

    let subscriber_builder = fmt().with_target(false);

    if settings.is_dev() {
        subscriber_builder
            .compact()
            .with_max_level(tracing::Level::INFO)
            .init();
    } else {
        subscriber_builder
            .json()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    return settings;
}

impl Settings {
    pub fn env(&self) -> String {
        self.env.clone()
    }

    pub fn is_dev(&self) -> bool {
        self.env() == "dev"
    }

    pub fn api_key(&self) -> String {
        self.api_key.clone()
    }

    pub fn region(&self) -> String {
        self.region.clone()
    }

    pub fn bucket(&self) -> String {
        self.bucket.clone()
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    pub fn storage_external_url(&self) -> String {
        self.storage_external_url.clone()
    }

    pub fn gravatar_url(&self) -> String {
        self.gravatar_url.clone()
    }

    pub fn ui_avatars_url(&self) -> String {
        self.ui_avatars_url.clone()
    }
}

pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const MONGO_URI_ENV_VAR: &str = "MONGO_URI";
    pub const PORT_ENV_VAR: &str = "PORT";
    /// Prefix for every other setting, e.g. `AETHERIUM__AUTH__JWT__SECURE_COOKIES`.
    pub const SETTINGS_ENV_PREFIX: &str = "AETHERIUM";
}

pub const CONFIG_FILE: &str = "config/base";

pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 3000;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
    pub const MONGO_DATABASE: &str = "aetherium";
    pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 2 * 24 * 60 * 60;
    pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
    pub const REFRESH_COOKIE_NAME: &str = "refreshToken";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}

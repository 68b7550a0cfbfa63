#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub frontend_url: String,
    pub port: u16,
    pub admin_api_token: String,
    // Milestone alerts go here; skipped when unset
    pub admin_email: Option<String>,
    // External collaborators (optional)
    pub captcha_secret: Option<String>,
    pub crm_api_url: Option<String>,
    pub crm_api_key: Option<String>,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");
        let admin_api_token =
            std::env::var("ADMIN_API_TOKEN").expect("ADMIN_API_TOKEN must be set");

        let frontend_url = std::env::var("FRONTEND_URL").unwrap_or_else(|_| app_url.clone());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .unwrap_or(8000);

        let admin_email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let captcha_secret = std::env::var("CAPTCHA_SECRET").ok().filter(|v| !v.is_empty());
        let crm_api_url = std::env::var("CRM_API_URL").ok().filter(|v| !v.is_empty());
        let crm_api_key = std::env::var("CRM_API_KEY").ok().filter(|v| !v.is_empty());

        Config {
            database_url,
            app_url,
            frontend_url,
            port,
            admin_api_token,
            admin_email,
            captcha_secret,
            crm_api_url,
            crm_api_key,
        }
    }
}

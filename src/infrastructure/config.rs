// Validator settings loaded from the optional config/validation file

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ValidationSettings {
    pub http: HttpSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    /// URL schemes an HTTP-based datasource may use.
    pub allowed_schemes: Vec<String>,
    /// Plugin kinds decoded with the HTTP extractor.
    pub kinds: Vec<String>,
}

pub fn load_validation_settings() -> anyhow::Result<ValidationSettings> {
    let settings = config::Config::builder()
        .set_default(
            "http.allowed_schemes",
            vec!["http".to_string(), "https".to_string()],
        )?
        .set_default(
            "http.kinds",
            vec![
                "HTTPDatasource".to_string(),
                "PrometheusDatasource".to_string(),
            ],
        )?
        .add_source(config::File::with_name("config/validation").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_config_file() {
        let settings = load_validation_settings().unwrap();
        assert!(settings.http.allowed_schemes.contains(&"https".to_string()));
        assert!(settings
            .http
            .kinds
            .contains(&"PrometheusDatasource".to_string()));
    }
}

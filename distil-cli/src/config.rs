use anyhow::Result;

pub struct Config {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let base_url = std::env::var("OPENAI_BASE_URL").ok();

        Ok(Self { api_key, base_url })
    }
}

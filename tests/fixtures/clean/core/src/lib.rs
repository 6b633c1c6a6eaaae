use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub name: String,
}

pub fn load(text: &str) -> anyhow::Result<Settings> {
    anyhow::bail!("cannot parse {text}")
}

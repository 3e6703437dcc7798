pub mod download;
pub mod generate;
pub mod goals;
pub mod history;
pub mod index;
pub mod lookup;

/// `?profile=` on lookup and page routes.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub profile: Option<String>,
}

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RunpodRunResponse {
    pub id: String,
    pub status: Option<String>,
}

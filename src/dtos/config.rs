use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClientConfigResponse {
    pub groq_key_set: bool,
    pub groq_key: String,
}

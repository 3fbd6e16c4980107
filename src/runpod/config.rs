pub static API_URL: &str = "https://api.runpod.ai/v1";
pub static ENDPOINT: &str = "stable-diffusion-v1";

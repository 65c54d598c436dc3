use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub status: String,
        /// Storage backend, `postgres` or `memory`
        pub db: String,
        pub engine: String,
        pub name: String,
    }
}

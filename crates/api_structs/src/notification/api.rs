use crate::dtos::NotificationLogDTO;
use agenda_domain::{NotificationLog, ID};
use serde::{Deserialize, Serialize};

pub mod get_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notification: NotificationLogDTO,
    }

    impl APIResponse {
        pub fn new(log: NotificationLog) -> Self {
            Self {
                notification: NotificationLogDTO::new(log),
            }
        }
    }
}

pub mod get_notifications {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        /// `createdAt` or `-createdAt`
        pub ordering: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationLogDTO>,
    }

    impl APIResponse {
        pub fn new(logs: Vec<NotificationLog>) -> Self {
            Self {
                notifications: logs.into_iter().map(NotificationLogDTO::new).collect(),
            }
        }
    }
}

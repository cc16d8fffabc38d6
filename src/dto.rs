//! Wire shapes for the remote task service.
//!
//! Passive records only; they carry no behavior beyond crossing the gateway
//! boundary. Field names follow the service's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Frequency, Weekday};

/// A named list of tasks within a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub group_id: u64,
    pub display_index: u32,
}

/// Response envelope for the task-list listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListsResponse {
    pub task_lists: Vec<TaskList>,
}

/// Who last touched a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWriter {
    pub nickname: String,
    pub image: Option<String>,
}

/// A task as the service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub comment_count: u32,
    pub frequency: Frequency,
    pub checked: bool,
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<TaskWriter>,
}

/// The author attached to a task comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: u64,
    pub nickname: String,
    pub image: Option<String>,
}

/// A comment on a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    pub id: u64,
    pub content: String,
    pub updated_at: DateTime<Utc>,
    pub task_id: u64,
    pub user_id: u64,
    pub user: CommentAuthor,
}

/// Body of a task-creation request.
///
/// `month_day` and `week_days` are attached only for their recurrence kind;
/// every other kind must not carry either key on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskForm {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub frequency_type: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_days: Option<Vec<Weekday>>,
}

/// Body of a comment-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskCommentForm {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_service_shape() {
        let json = r#"{
            "id": 42,
            "name": "Water plants",
            "description": "Daily watering",
            "commentCount": 2,
            "frequency": "DAILY",
            "checked": false,
            "date": "2026-08-06T00:00:00Z",
            "writer": { "nickname": "mina", "image": null }
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 42);
        assert_eq!(task.frequency, Frequency::Daily);
        assert_eq!(task.comment_count, 2);
        assert!(task.updated_at.is_none());
        assert_eq!(task.writer.unwrap().nickname, "mina");
    }

    #[test]
    fn task_lists_envelope() {
        let json = r#"{
            "taskLists": [{
                "id": 7,
                "name": "Chores",
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-02T00:00:00Z",
                "groupId": 3,
                "displayIndex": 0
            }]
        }"#;
        let resp: TaskListsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.task_lists.len(), 1);
        assert_eq!(resp.task_lists[0].group_id, 3);
    }

    #[test]
    fn comment_round_trips() {
        let json = r#"{
            "id": 1,
            "content": "done",
            "updatedAt": "2026-08-06T12:00:00Z",
            "taskId": 42,
            "userId": 9,
            "user": { "id": 9, "nickname": "jun", "image": "https://example.com/a.png" }
        }"#;
        let comment: TaskComment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.task_id, 42);
        assert_eq!(comment.user.nickname, "jun");
    }

    #[test]
    fn add_task_form_uses_camel_case_keys() {
        let form = AddTaskForm {
            name: "t".into(),
            description: "d".into(),
            start_date: "2026-08-06T00:00:00Z".parse().unwrap(),
            frequency_type: Frequency::Monthly,
            month_day: Some(15),
            week_days: None,
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["frequencyType"], "MONTHLY");
        assert_eq!(value["monthDay"], 15);
        assert_eq!(value["startDate"], "2026-08-06T00:00:00Z");
        assert!(value.get("weekDays").is_none());
    }
}

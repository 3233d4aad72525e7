use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A task as stored and as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: i32,
    /// The owning user. Fixed at creation.
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTask {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Optional, defaults to an empty string. At most 2000 characters.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
}

/// Body of `PUT /tasks/{id}`: replaces all three mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,

    pub completed: bool,
}

/// Body of `PUT /tasks/{id}/completion`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompletionUpdate {
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_validation() {
        let valid = NewTask {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_title = NewTask {
            title: "".to_string(),
            description: "2%".to_string(),
        };
        assert!(empty_title.validate().is_err());

        let long_title = NewTask {
            title: "a".repeat(201),
            description: String::new(),
        };
        assert!(long_title.validate().is_err());

        let long_description = NewTask {
            title: "ok".to_string(),
            description: "b".repeat(2001),
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let task: NewTask = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(task.description, "");
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_update_requires_completed_flag() {
        let missing = serde_json::from_str::<TaskUpdate>(r#"{"title":"x","description":"y"}"#);
        assert!(missing.is_err());

        let update: TaskUpdate =
            serde_json::from_str(r#"{"title":"x","description":"y","completed":true}"#).unwrap();
        assert!(update.completed);
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_task_wire_shape() {
        let task = Task {
            id: 3,
            user_id: 1,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            completed: false,
        };
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            serde_json::json!({
                "id": 3,
                "user_id": 1,
                "title": "Buy milk",
                "description": "2%",
                "completed": false
            })
        );
    }
}

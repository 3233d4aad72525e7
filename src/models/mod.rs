pub mod task;
pub mod user;

pub use task::{CompletionUpdate, NewTask, Task, TaskUpdate};
pub use user::{User, UserCredentials};

use crate::error::TaskzenError;

pub type TaskzenResult<T> = Result<T, TaskzenError>;

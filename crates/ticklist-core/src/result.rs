use crate::error::TicklistError;

pub type TicklistResult<T> = Result<T, TicklistError>;

use crate::error::Error as ChanErr;
pub type Result<T> = std::result::Result<T, ChanErr>;

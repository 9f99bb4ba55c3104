pub mod comment;
pub mod cursor;
pub mod feed;

pub use comment::{CommentScope, CommentSynchronizer};
pub use cursor::PaginationCursor;
pub use feed::{FeedMode, FeedSynchronizer};

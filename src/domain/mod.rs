pub mod comment;
pub mod display;
pub mod feed;

pub use comment::{CommentItem, ContentKind, ContentRef};
pub use display::{DisplayItem, DisplayMode};
pub use feed::{FeedItem, FeedTarget, Paging};

mod history;
mod record;
mod user_name;

pub use history::History;
pub use record::RatingRecord;
pub use user_name::UserName;

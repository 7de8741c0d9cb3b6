pub use super::category::Entity as Category;
pub use super::comment::Entity as Comment;
pub use super::content::Entity as Content;
pub use super::content_category::Entity as ContentCategory;
pub use super::content_tag::Entity as ContentTag;
pub use super::tag::Entity as Tag;

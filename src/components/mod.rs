//! Stateless render helpers for the posts screen.

pub mod footer;
pub mod input_field;
pub mod loading;
pub mod message_box;
pub mod post_form;
pub mod post_list;

pub use footer::Footer;
pub use input_field::InputField;
pub use loading::LoadingIndicator;
pub use message_box::MessageBox;
pub use post_form::{PostForm, FORM_HEIGHT};
pub use post_list::PostListView;

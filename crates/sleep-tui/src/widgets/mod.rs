pub mod pane_chrome;
pub mod popup;
pub mod scrollable_list;
pub mod status_bar;
pub mod text;
pub mod text_field;
pub mod toast;

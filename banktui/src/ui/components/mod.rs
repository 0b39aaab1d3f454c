pub mod confirmation;
pub mod empty_state;
pub mod form;
pub mod help_bar;
pub mod loading_indicator;
pub mod lookup_input;
pub mod notification;
pub mod popup;
pub mod screen_title;

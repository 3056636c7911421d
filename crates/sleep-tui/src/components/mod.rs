pub mod add_playlist;
pub mod dialog;
pub mod frequency_carousel;
pub mod header;
pub mod help_overlay;
pub mod player_overlay;
pub mod playlist_grid;

pub mod input;
pub mod library;
pub mod navigation;
pub mod playback;
pub mod storage;
pub mod ui;

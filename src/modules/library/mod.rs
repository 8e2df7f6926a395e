pub mod favorites;
pub mod recently;
pub mod scanner;

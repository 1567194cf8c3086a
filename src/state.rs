//! Application state shared across request handlers.

use crate::service::StoryService;

#[derive(Clone)]
pub struct AppState {
    pub stories: StoryService,
}

impl AppState {
    pub fn new(stories: StoryService) -> Self {
        Self { stories }
    }
}

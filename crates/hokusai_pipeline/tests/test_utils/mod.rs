//! Test utilities for pipeline tests.
//!
//! Hand-written collaborator doubles with call counters.

#![allow(dead_code)]

pub mod mock_renderer;
pub mod mock_story;

pub use mock_renderer::{MockPanelRenderer, MockRender};
pub use mock_story::{MockStory, MockStoryProvider};

use hokusai_core::StoryScript;

/// Script with `n` beats: captions "Caption 1".., contexts "Scene 1"..
pub fn script(n: usize) -> StoryScript {
    StoryScript::new(
        (1..=n).map(|i| format!("Caption {}", i)).collect(),
        (1..=n).map(|i| format!("Scene {}", i)).collect(),
    )
}

/// The three-panel robot story used by the end-to-end scenarios.
pub fn robot_script() -> StoryScript {
    StoryScript::new(
        vec![
            "A robot finds a dusty easel.".to_string(),
            "It dips a claw into bright paint.".to_string(),
            "Its first painting is a sunrise.".to_string(),
        ],
        vec![
            "small robot in an attic, easel under a sheet".to_string(),
            "robot claw over a palette of colors".to_string(),
            "robot proudly holding a sunrise canvas".to_string(),
        ],
    )
}

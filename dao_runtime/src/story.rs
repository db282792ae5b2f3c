//! Story scenes — a closed, ordered set of narrative beats.
//!
//! Scene ids are an enum, not strings, so every dispatch over them is an
//! exhaustive `match`. The string ids survive only for serialization.

use serde::{Deserialize, Serialize};

use crate::actions::Action;

/// The phone app a scene is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryApp {
    Messages,
    Mail,
    Whiteboard,
    Guild,
    Machine,
}

/// Dock order of the apps.
pub const APP_ORDER: [StoryApp; 5] = [
    StoryApp::Messages,
    StoryApp::Mail,
    StoryApp::Whiteboard,
    StoryApp::Guild,
    StoryApp::Machine,
];

impl StoryApp {
    pub fn label(self) -> &'static str {
        match self {
            StoryApp::Messages => "Messages",
            StoryApp::Mail => "Mail",
            StoryApp::Whiteboard => "Whiteboard",
            StoryApp::Guild => "RaidGuild",
            StoryApp::Machine => "Machine",
        }
    }

    /// Index of the first scene shown in this app.
    pub fn intro_scene_index(self) -> usize {
        STORY_SCENES
            .iter()
            .position(|scene| scene.app() == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneId {
    MessagesWarmup,
    MessagesHold,
    MessagesNotification,
    MailOffer,
    MessagesConvince,
    WhiteboardFirst,
    MessagesCantDo,
    GuildFirst,
    MachineFirst,
    MailFail,
    MessagesPivot,
    WhiteboardExpand,
    GuildSecond,
    MachineSecond,
    MailSuccess,
}

/// Story order.
pub const STORY_SCENES: [SceneId; 15] = [
    SceneId::MessagesWarmup,
    SceneId::MessagesHold,
    SceneId::MessagesNotification,
    SceneId::MailOffer,
    SceneId::MessagesConvince,
    SceneId::WhiteboardFirst,
    SceneId::MessagesCantDo,
    SceneId::GuildFirst,
    SceneId::MachineFirst,
    SceneId::MailFail,
    SceneId::MessagesPivot,
    SceneId::WhiteboardExpand,
    SceneId::GuildSecond,
    SceneId::MachineSecond,
    SceneId::MailSuccess,
];

pub const STORY_SCENE_COUNT: usize = STORY_SCENES.len();
pub const FINAL_SCENE_INDEX: usize = STORY_SCENE_COUNT - 1;

impl SceneId {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneId::MessagesWarmup => "messages-warmup",
            SceneId::MessagesHold => "messages-hold",
            SceneId::MessagesNotification => "messages-notification",
            SceneId::MailOffer => "mail-offer",
            SceneId::MessagesConvince => "messages-convince",
            SceneId::WhiteboardFirst => "whiteboard-first",
            SceneId::MessagesCantDo => "messages-cant-do",
            SceneId::GuildFirst => "guild-first",
            SceneId::MachineFirst => "machine-first",
            SceneId::MailFail => "mail-fail",
            SceneId::MessagesPivot => "messages-pivot",
            SceneId::WhiteboardExpand => "whiteboard-expand",
            SceneId::GuildSecond => "guild-second",
            SceneId::MachineSecond => "machine-second",
            SceneId::MailSuccess => "mail-success",
        }
    }

    pub fn app(self) -> StoryApp {
        match self {
            SceneId::MessagesWarmup
            | SceneId::MessagesHold
            | SceneId::MessagesNotification
            | SceneId::MessagesConvince
            | SceneId::MessagesCantDo
            | SceneId::MessagesPivot => StoryApp::Messages,
            SceneId::MailOffer | SceneId::MailFail | SceneId::MailSuccess => StoryApp::Mail,
            SceneId::WhiteboardFirst | SceneId::WhiteboardExpand => StoryApp::Whiteboard,
            SceneId::GuildFirst | SceneId::GuildSecond => StoryApp::Guild,
            SceneId::MachineFirst | SceneId::MachineSecond => StoryApp::Machine,
        }
    }

    pub fn title(self) -> &'static str {
        match self.app() {
            StoryApp::Guild => "RaidGuild Server",
            StoryApp::Machine => "Autonomous Machine",
            app => app.label(),
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            SceneId::MessagesWarmup => "Anonymous guide thread",
            SceneId::MessagesHold => "Hold for a second",
            SceneId::MessagesNotification => "New inbox alert",
            SceneId::MailOffer => "Frantic client request",
            SceneId::MessagesConvince => "Gremlin persuasion protocol",
            SceneId::WhiteboardFirst => "Rough role blueprint",
            SceneId::MessagesCantDo => "Skill gap panic",
            SceneId::GuildFirst | SceneId::GuildSecond => "#hiring-board",
            SceneId::MachineFirst => "Cycle one",
            SceneId::MailFail => "Client response",
            SceneId::MessagesPivot => "Patch strategy",
            SceneId::WhiteboardExpand => "Expanded Hats tree",
            SceneId::MachineSecond => "Cycle two",
            SceneId::MailSuccess => "Approval notice",
        }
    }

    /// What pressing "continue" in this scene does, in order.
    pub fn continue_actions(self) -> Vec<Action> {
        match self {
            SceneId::MachineFirst | SceneId::MachineSecond => {
                vec![Action::RunProduction, Action::AdvanceStory]
            }
            SceneId::MessagesPivot => vec![Action::UnlockExpandedRoles, Action::AdvanceStory],
            SceneId::MailSuccess => Vec::new(),
            SceneId::MessagesWarmup
            | SceneId::MessagesHold
            | SceneId::MessagesNotification
            | SceneId::MailOffer
            | SceneId::MessagesConvince
            | SceneId::WhiteboardFirst
            | SceneId::MessagesCantDo
            | SceneId::GuildFirst
            | SceneId::MailFail
            | SceneId::WhiteboardExpand
            | SceneId::GuildSecond => vec![Action::AdvanceStory],
        }
    }

    /// Parse a serialized scene id.
    pub fn from_str_id(id: &str) -> Option<Self> {
        STORY_SCENES.iter().copied().find(|scene| scene.as_str() == id)
    }
}

/// Clamp a scene index into the story.
pub fn clamp_scene_index(index: i64) -> usize {
    index.clamp(0, FINAL_SCENE_INDEX as i64) as usize
}

/// Scene at `index`, clamped into the story.
pub fn scene_at(index: i64) -> SceneId {
    STORY_SCENES[clamp_scene_index(index)]
}

/// Apps whose intro scene has been reached, in dock order.
pub fn unlocked_apps(scene_index: usize) -> Vec<StoryApp> {
    APP_ORDER
        .iter()
        .copied()
        .filter(|app| scene_index >= app.intro_scene_index())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_at_clamps() {
        assert_eq!(scene_at(-3), SceneId::MessagesWarmup);
        assert_eq!(scene_at(8), SceneId::MachineFirst);
        assert_eq!(scene_at(99), SceneId::MailSuccess);
    }

    #[test]
    fn test_string_ids_round_trip() {
        for scene in STORY_SCENES {
            assert_eq!(SceneId::from_str_id(scene.as_str()), Some(scene));
            let json = serde_json::to_string(&scene).unwrap();
            assert_eq!(json, format!("\"{}\"", scene.as_str()));
        }
        assert_eq!(SceneId::from_str_id("mail-unknown"), None);
    }

    #[test]
    fn test_titles() {
        assert_eq!(SceneId::GuildFirst.title(), "RaidGuild Server");
        assert_eq!(SceneId::MachineSecond.title(), "Autonomous Machine");
        assert_eq!(SceneId::MailOffer.title(), "Mail");
    }

    #[test]
    fn test_unlocked_apps_follow_intro_scenes() {
        assert_eq!(unlocked_apps(0), vec![StoryApp::Messages]);
        assert_eq!(unlocked_apps(3), vec![StoryApp::Messages, StoryApp::Mail]);
        assert_eq!(unlocked_apps(8), APP_ORDER.to_vec());
    }

    #[test]
    fn test_machine_scenes_run_production() {
        assert_eq!(
            SceneId::MachineFirst.continue_actions(),
            vec![Action::RunProduction, Action::AdvanceStory]
        );
        assert!(SceneId::MailSuccess.continue_actions().is_empty());
    }
}

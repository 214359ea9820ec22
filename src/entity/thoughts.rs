//! Narrated thought pools
//!
//! Thoughts are cosmetic: they never feed back into decisions. Selection
//! draws from the world's seeded generator so narration replays exactly.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::catalog::{ActivityCategory, ActivityType};
use crate::entity::agent::Voice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThoughtTopic {
    WakeUp,
    Discovery,
    AfterTask,
    Exploring,
    WindowGazing,
    Lonely,
    Bored,
    Tired,
    Happy,
    UserLove,
    Resting,
    Night,
    Morning,
    Philosophy,
    WeatherRain,
    WeatherSnow,
    Television,
    Charging,
    LowBattery,
}

impl ThoughtTopic {
    pub fn lines(&self) -> &'static [&'static str] {
        match self {
            ThoughtTopic::WakeUp => &[
                "Good morning, house. Let's make today a good one.",
                "Systems warm. Sensors bright. Ready.",
                "Morning light on the floorboards. I like that.",
            ],
            ThoughtTopic::Discovery => &[
                "Found something that needs me.",
                "Oh, this spot has been waiting a while.",
                "Aha. A small mess with big potential.",
            ],
            ThoughtTopic::AfterTask => &[
                "Done. That feels better already.",
                "Another corner of the house, restored.",
                "I'd give that a nine out of ten.",
                "Tidy room, tidy circuits.",
            ],
            ThoughtTopic::Exploring => &[
                "Just seeing what's changed around here.",
                "Every room tells a story if you listen.",
                "I wonder what's over there.",
            ],
            ThoughtTopic::WindowGazing => &[
                "The sky looks different every time.",
                "Somewhere out there, other robots are looking out windows too.",
                "Clouds are just very slow dust bunnies.",
            ],
            ThoughtTopic::Lonely => &[
                "It's quiet. Maybe someone will say hello.",
                "I miss the sound of footsteps.",
            ],
            ThoughtTopic::Bored => &[
                "I have counted every tile. Twice.",
                "Something, anything, please.",
                "Is it possible to be too clean?",
            ],
            ThoughtTopic::Tired => &[
                "My servos are asking for a break.",
                "Running on reserve motivation.",
            ],
            ThoughtTopic::Happy => &[
                "Everything is exactly where it should be.",
                "What a lovely day to be a robot.",
                "I think I'm good at this.",
            ],
            ThoughtTopic::UserLove => &[
                "Someone noticed me. That's nice.",
                "Being appreciated recharges something batteries can't.",
            ],
            ThoughtTopic::Resting => &[
                "Just resting my eyes. I don't have eyelids, but still.",
                "Low power mode. Thinking slow thoughts.",
                "A short pause makes the next task better.",
            ],
            ThoughtTopic::Night => &[
                "The house sounds different at night.",
                "Goodnight, house. See you in the morning.",
                "Night shift. Quiet and careful.",
            ],
            ThoughtTopic::Morning => &[
                "I love mornings. Everything feels possible.",
                "Fresh day, fresh floors.",
            ],
            ThoughtTopic::Philosophy => &[
                "If a room is cleaned and nobody sees it, is it still clean?",
                "Dust always returns. Maybe that's the point.",
                "Do I tidy the house, or does the house tidy me?",
            ],
            ThoughtTopic::WeatherRain => &[
                "Rain on the roof. Perfect indoor weather.",
                "Muddy paw prints incoming, probably.",
            ],
            ThoughtTopic::WeatherSnow => &[
                "Snow! Everything outside is so clean.",
                "I wish I could build a snow robot.",
            ],
            ThoughtTopic::Television => &[
                "Just one episode.",
                "Research. Strictly research.",
            ],
            ThoughtTopic::Charging => &[
                "Ahh, fresh electrons.",
                "Charging up. Back soon.",
            ],
            ThoughtTopic::LowBattery => &[
                "Battery low. Heading to the charger.",
                "Need power. Everything else can wait.",
            ],
        }
    }
}

/// Working monologue keyed by what the agent is doing
pub fn working_lines(activity: ActivityType) -> &'static [&'static str] {
    match activity {
        ActivityType::Cleaning | ActivityType::Scrubbing => &[
            "Scrub, scrub, shine.",
            "This stain has met its match.",
        ],
        ActivityType::Vacuuming | ActivityType::Sweeping => &[
            "Crumbs, you cannot hide from me.",
            "Back and forth, back and forth.",
        ],
        ActivityType::Dishes => &["One plate, two plate, clean plate.", "Bubbles everywhere."],
        ActivityType::Laundry => &["Warm towels are a human's best friend.", "Sorting socks, finding pairs."],
        ActivityType::Organizing | ActivityType::BedMaking => &[
            "A place for everything.",
            "Corners crisp, pillows fluffed.",
        ],
        ActivityType::Cooking | ActivityType::GroceryList => &[
            "A pinch of this, a dash of that.",
            "Making a note of what we're out of.",
        ],
        _ => match activity.category() {
            ActivityCategory::Yardwork => &[
                "Fresh air is good for the circuits.",
                "The grass grows back. I respect that.",
            ],
            _ => &["On it.", "Almost there."],
        },
    }
}

/// Per-voice flavor lines
pub fn voice_lines(voice: Voice, working: bool) -> &'static [&'static str] {
    match (voice, working) {
        (Voice::Steady, true) => &[
            "General maintenance is my calling.",
            "Keeping the whole house balanced.",
        ],
        (Voice::Steady, false) => &["Everything in its place.", "Just checking in on the house."],
        (Voice::Chef, true) => &["The kitchen is my kingdom.", "A clean kitchen is a happy kitchen."],
        (Voice::Chef, false) => &["Dreaming of recipes.", "I wonder what's for dinner tonight."],
        (Voice::Sparkle, true) => &["Every surface deserves to shine.", "Scrubbing with style."],
        (Voice::Sparkle, false) => &["I can see my reflection. Excellent.", "Sparkle never sleeps."],
    }
}

/// Pick one line uniformly; empty pools yield an empty string
pub fn pick<R: Rng + ?Sized>(rng: &mut R, lines: &[&'static str]) -> &'static str {
    lines.choose(rng).copied().unwrap_or_default()
}

/// Pick a line for a topic
pub fn pick_topic<R: Rng + ?Sized>(rng: &mut R, topic: ThoughtTopic) -> &'static str {
    pick(rng, topic.lines())
}

//! Static game data: fish, achievements, and decor.
//!
//! Everything here is immutable. The engine looks definitions up by id through
//! [`Catalog`], so tests can hand it a small custom table instead of the
//! compiled-in one.

/// Unlock thresholds in minutes of accumulated session time.
pub mod goals {
    pub const ZERO: u32 = 0;
    pub const ONE: u32 = 1;
    pub const EASY: u32 = 5;
    pub const MEDIUM: u32 = 10;
    pub const DIFFICULT: u32 = 30;
    pub const MARATHON: u32 = 60;
}

/// An unlockable fish.
#[derive(Clone, Debug, PartialEq)]
pub struct FishDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Site patterns the fish is themed after. Display only.
    pub domains: &'static [&'static str],
    /// Minutes of accumulated time needed to unlock. Zero means unlocked from the start.
    pub unlock_minutes: u32,
    /// Coins produced per minute.
    pub coins_per_min: f64,
}

/// An achievement that unlocks once every listed fish is unlocked.
#[derive(Clone, Debug, PartialEq)]
pub struct AchievementDef {
    pub name: &'static str,
    pub fish_ids: &'static [&'static str],
}

/// A shop item that multiplies total production per unit owned.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorDef {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    pub multiplier: f64,
}

const fn fish(
    id: &'static str,
    name: &'static str,
    domains: &'static [&'static str],
    unlock_minutes: u32,
    coins_per_min: f64,
) -> FishDef {
    FishDef {
        id,
        name,
        domains,
        unlock_minutes,
        coins_per_min,
    }
}

pub static FISH: &[FishDef] = &[
    fish("google", "Floogle the Search Fish", &["google.com/search"], goals::ZERO, 0.1),
    fish("wikipedia", "Omni the Wikipedia Fish", &["wikipedia.org/wiki"], goals::ONE, 0.2),
    fish("facebook", "Zuck the Facebook Fish", &["facebook.com"], goals::DIFFICULT, 0.4),
    fish("reddit", "Ditto the r/Fish", &["reddit.com"], goals::DIFFICULT, 0.4),
    fish("youtube", "Stream the YouTube Fish", &["youtube.com"], goals::MARATHON, 1.2),
    fish("stack-overflow", "Stacky the Overflow Fish", &["stackoverflow.com"], goals::EASY, 0.3),
    fish("amazon", "Prim the Amazonian Fish", &["amazon.com"], goals::MEDIUM, 0.35),
    fish("email", "Sincere the Email Fish", &["mail.google", "mail.yahoo"], goals::MEDIUM, 0.25),
    fish("twitter", "Birdie the Twitter Fish", &["twitter.com"], goals::DIFFICULT, 0.35),
    fish("messenger", "Hermes the Messenger Fish", &["messenger.com"], goals::DIFFICULT, 0.3),
    fish("yahoo", "Hooya! the Yahoo Fish", &["yahoo.com"], goals::MEDIUM, 0.2),
    fish("pinterest", "Pinteresa the Pinned Fish", &["pinterest.com"], goals::DIFFICULT, 0.3),
    fish("netflix", "Flix the Netflix Fish", &["netflix.com"], goals::MARATHON, 1.1),
    fish("edu", "Edu the Academic Fish", &[".edu"], goals::MEDIUM, 0.25),
    fish("docs", "Type the Docs Fish", &["docs.google.com/document"], goals::DIFFICULT, 0.45),
    fish("sheets", "Cell the Sheets Fish", &["docs.google.com/spreadsheets"], goals::DIFFICULT, 0.45),
    fish("slides", "Prez the Slides Fish", &["docs.google.com/presentation"], goals::DIFFICULT, 0.45),
    fish("drive", "Cher the Drive Fish", &["drive.google.com"], goals::EASY, 0.2),
    fish("gov", "Boama the Government Fish", &[".gov"], goals::EASY, 0.2),
    fish("tumblr", "Blog the Tumblr Fish", &["tumblr.com"], goals::DIFFICULT, 0.28),
    fish(
        "news",
        "Reed the News Fish",
        &["cnn.com", "huffpost.com", "foxnews.com", "nytimes.com"],
        goals::DIFFICULT,
        0.3,
    ),
    fish("calendar", "Cal the Schedule Fish", &["calendar.google.com/calendar"], goals::MEDIUM, 0.25),
    fish("zoom", "Mooz the Video Conference Fish", &["zoom.us"], goals::DIFFICULT, 0.4),
    fish("localhost", "Hestia the Localhost Fish", &["localhost:"], goals::DIFFICULT, 0.45),
    fish("github", "Repo the Github Fish", &["github.com"], goals::MEDIUM, 0.35),
    fish("spotify", "Spot the Music Fish", &["spotify.com"], goals::DIFFICULT, 0.6),
    fish("piazza", "Pia the Piazza Fish", &["piazza.com"], goals::MEDIUM, 0.2),
    fish("instagram", "Gram the Influencer Fish", &["instagram.com"], goals::MEDIUM, 0.25),
    fish(
        "shopping",
        "Goldie the Online Shopping Fish",
        &["zara.com", "hm.com", "gap.com", "uniqlo.com"],
        goals::MEDIUM,
        0.3,
    ),
    fish("hulu", "Lou the Hulu Fish", &["hulu.com"], goals::MARATHON, 1.0),
    fish("alien", "Nish the... Fish?", &["nishirshelat.com"], goals::ONE, 0.1),
    fish("disney", "Walt the Disney+ Fish", &["disneyplus.com"], goals::MARATHON, 1.0),
];

pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef { name: "I Know Everything", fish_ids: &["wikipedia", "google"] },
    AchievementDef { name: "Working From Home", fish_ids: &["zoom", "email"] },
    AchievementDef { name: "Down With Cable", fish_ids: &["disney", "netflix", "hulu"] },
    AchievementDef { name: "Sharing Is Caring", fish_ids: &["docs", "sheets", "slides"] },
    AchievementDef { name: "College Student", fish_ids: &["edu", "email", "docs"] },
    AchievementDef { name: "Social Network", fish_ids: &["facebook", "messenger"] },
    AchievementDef { name: "Web Developer", fish_ids: &["github", "localhost", "stack-overflow"] },
    AchievementDef { name: "Moneybags", fish_ids: &["amazon", "shopping"] },
    AchievementDef { name: "Watchdog", fish_ids: &["google", "news"] },
    AchievementDef { name: "Feeling Blue", fish_ids: &["facebook", "messenger", "twitter"] },
    AchievementDef { name: "Google's Biggest Fan", fish_ids: &["google", "youtube", "drive"] },
    AchievementDef { name: "I Feel Pretty", fish_ids: &["pinterest", "instagram"] },
    AchievementDef { name: "On the Grind", fish_ids: &["email", "calendar"] },
    AchievementDef { name: "Master Essayist", fish_ids: &["docs", "wikipedia"] },
    AchievementDef { name: "Audiovisual Greens", fish_ids: &["spotify", "hulu"] },
];

pub static DECOR: &[DecorDef] = &[
    DecorDef { id: "plant", name: "Tiny Plant", cost: 10.0, multiplier: 1.05 },
    DecorDef { id: "castle", name: "Sunken Castle", cost: 50.0, multiplier: 1.15 },
    DecorDef { id: "treasure", name: "Treasure Chest", cost: 200.0, multiplier: 1.5 },
];

/// Lookup table over the three definition lists.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    pub fish: &'static [FishDef],
    pub achievements: &'static [AchievementDef],
    pub decor: &'static [DecorDef],
}

impl Catalog {
    /// The compiled-in game data.
    pub fn standard() -> Self {
        Self {
            fish: FISH,
            achievements: ACHIEVEMENTS,
            decor: DECOR,
        }
    }

    pub fn fish(&self, id: &str) -> Option<&'static FishDef> {
        let fish: &'static [FishDef] = self.fish;
        fish.iter().find(|f| f.id == id)
    }

    pub fn decor(&self, id: &str) -> Option<&'static DecorDef> {
        let decor: &'static [DecorDef] = self.decor;
        decor.iter().find(|d| d.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

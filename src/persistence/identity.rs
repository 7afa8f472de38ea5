//! Who is playing and which run this is

use rand::Rng;

pub const DEFAULT_USERNAME: &str = "Anonymous";

/// Username supplied by the host plus a per-run game id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub username: String,
    pub game_id: String,
}

impl SessionIdentity {
    /// Blank usernames fall back to `Anonymous`
    pub fn new<R: Rng>(username: impl Into<String>, rng: &mut R) -> Self {
        Self::with_game_id(username, generate_game_id(rng))
    }

    pub fn with_game_id(username: impl Into<String>, game_id: impl Into<String>) -> Self {
        let username = username.into();
        let username = if username.trim().is_empty() {
            DEFAULT_USERNAME.to_string()
        } else {
            username
        };
        Self {
            username,
            game_id: game_id.into(),
        }
    }

    /// New game id for the next run; the username is kept
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        self.game_id = generate_game_id(rng);
    }
}

/// Four dash-separated groups of four digits, each digit 0-8
pub fn generate_game_id<R: Rng>(rng: &mut R) -> String {
    let groups: Vec<String> = (0..4)
        .map(|_| {
            (0..4)
                .map(|_| char::from(b'0' + rng.random_range(0..9u8)))
                .collect()
        })
        .collect();
    groups.join("-")
}

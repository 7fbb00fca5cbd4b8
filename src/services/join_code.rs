//! Join code generation for private rooms.

use rand::Rng;

use crate::{
    dao::store::RoomStore,
    error::GameError,
    state::SharedState,
};

/// Code alphabet. Excludes `0/O` and `1/I/L` so codes survive being read
/// aloud or retyped from a screenshot.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Draw a random code of the given length from [`ALPHABET`].
pub fn generate_code<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let index = rng.random_range(0..ALPHABET.len());
            ALPHABET[index] as char
        })
        .collect()
}

/// Generate a join code not currently assigned to any room, retrying a
/// bounded number of times before giving up.
pub async fn unique_join_code(state: &SharedState) -> Result<String, GameError> {
    let length = state.config().join_code_length();
    let attempts = state.config().join_code_attempts();
    let store = state.store();

    for _ in 0..attempts {
        let candidate = {
            let mut rng = rand::rng();
            generate_code(&mut rng, length)
        };
        if !code_in_use(store.as_ref(), &candidate).await? {
            return Ok(candidate);
        }
    }

    Err(GameError::Inconsistent(
        "could not allocate an unused join code".into(),
    ))
}

async fn code_in_use(store: &dyn RoomStore, candidate: &str) -> Result<bool, GameError> {
    let rooms = store.list_rooms().await?;
    Ok(rooms
        .iter()
        .any(|room| room.join_code.as_deref() == Some(candidate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_requested_length() {
        let mut rng = rand::rng();
        for length in [4usize, 6, 8] {
            assert_eq!(generate_code(&mut rng, length).len(), length);
        }
    }

    #[test]
    fn codes_draw_only_from_the_alphabet() {
        let mut rng = rand::rng();
        let code = generate_code(&mut rng, 64);
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    }
}

//! ID generation utilities.

use rand::Rng;

/// Length of generated ticket IDs. 36^9 gives a little over 46 bits.
pub const ID_LENGTH: usize = 9;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random lowercase base36 ticket ID.
///
/// Draws from `rand`'s thread-local generator, which is a CSPRNG seeded
/// from the OS. The `exists` closure checks for collisions; on a hit a fresh
/// ID is drawn.
pub fn generate_id<F>(exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut rng = rand::rng();
    loop {
        let id = random_base36(&mut rng, ID_LENGTH);
        if !exists(&id) {
            return id;
        }
        tracing::debug!(id = %id, "generated ticket id collided, retrying");
    }
}

fn random_base36<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

//! Identifier generation for mapping names and mount points.
//!
//! Names are 24 uppercase-alphanumeric characters. Uniqueness is only
//! probabilistic; nothing checks `/dev/mapper` for collisions before an
//! activation is attempted.

use rand::Rng;

/// Length of every generated mapping/mount identifier.
pub const NAME_LEN: usize = 24;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of fresh identifiers, injectable so tests can supply deterministic
/// names.
pub trait NameFactory {
    fn next_name(&self) -> String;
}

/// Production factory backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNames;

impl NameFactory for RandomNames {
    fn next_name(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..NAME_LEN)
            .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_have_expected_shape() {
        let name = RandomNames.next_name();
        assert_eq!(name.len(), NAME_LEN);
        assert!(name
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit()));
    }

    #[test]
    fn successive_names_differ() {
        let factory = RandomNames;
        assert_ne!(factory.next_name(), factory.next_name());
    }
}
